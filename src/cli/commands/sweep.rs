//! `fac sweep` command - per-sample angle listing

use console::style;
use miette::Result;
use serde::Serialize;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::cli::output::{effective_format, print_delimited, print_json, print_yaml, requested_format};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::cycle::Computation;
use crate::core::Config;

use super::compute::ParameterArgs;

#[derive(clap::Args, Debug)]
pub struct SweepArgs {
    #[command(flatten)]
    pub values: ParameterArgs,

    /// Only print every Nth sample (the intersection is always included)
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub every: u32,
}

/// One row of sweep output
#[derive(Debug, Clone, Serialize)]
pub struct SampleRow {
    pub index: usize,
    pub velocity: f64,
    pub angle: f64,
    pub intersection: bool,
}

fn render_table(rows: &[SampleRow]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["INDEX", "VELOCITY (mm/s)", "ANGLE (°)", "HIT"]);
    for row in rows {
        builder.push_record([
            row.index.to_string(),
            format!("{:.4}", row.velocity),
            format!("{:.4}", row.angle),
            if row.intersection { "◄".to_string() } else { String::new() },
        ]);
    }
    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

/// Collect the rows to print, keeping every `every`th sample plus the intersection
pub fn sample_rows(computation: &Computation, every: usize) -> Vec<SampleRow> {
    let every = every.max(1);
    let hit = computation.intersection.index;
    computation
        .sweep
        .as_slice()
        .iter()
        .zip(computation.curve.as_slice())
        .enumerate()
        .filter(|(i, _)| i % every == 0 || *i == hit)
        .map(|(index, (&velocity, &angle))| SampleRow {
            index,
            velocity,
            angle,
            intersection: index == hit,
        })
        .collect()
}

pub fn run(args: SweepArgs, global: &GlobalOpts, config: &Config) -> Result<()> {
    let store = args.values.to_store()?;
    let computation = Computation::run(&store.parameters());
    let rows = sample_rows(&computation, args.every as usize);

    match effective_format(requested_format(global, config), true) {
        OutputFormat::Json => print_json(&rows),
        OutputFormat::Yaml => print_yaml(&rows),
        OutputFormat::Csv => print_delimited(&rows, b','),
        OutputFormat::Tsv => print_delimited(&rows, b'\t'),
        OutputFormat::Table | OutputFormat::Text | OutputFormat::Auto => {
            println!("{}", render_table(&rows));
            println!();
            println!(
                "{} of {} sample(s) shown",
                style(rows.len()).cyan(),
                computation.sweep.len()
            );
            println!("{}", style(&computation.summary).bold());
            Ok(())
        }
    }
}
