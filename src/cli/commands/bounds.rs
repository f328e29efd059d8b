//! `fac bounds` command - parameter ranges and defaults

use miette::Result;
use serde::Serialize;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::cli::output::{effective_format, print_delimited, print_json, print_yaml, requested_format};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::bounds::ParameterName;
use crate::core::Config;

#[derive(clap::Args, Debug)]
pub struct BoundsArgs {}

#[derive(Debug, Clone, Serialize)]
pub struct BoundsRow {
    pub parameter: &'static str,
    pub flag: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub unit: &'static str,
}

pub fn bounds_rows() -> Vec<BoundsRow> {
    ParameterName::ALL
        .iter()
        .map(|&name| {
            let b = name.bounds();
            BoundsRow {
                parameter: name.as_str(),
                flag: name.cli_name(),
                min: b.min,
                max: b.max,
                default: b.default,
                unit: name.unit(),
            }
        })
        .collect()
}

fn render_table(rows: &[BoundsRow]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["PARAMETER", "FLAG", "MIN", "MAX", "DEFAULT", "UNIT"]);
    for row in rows {
        builder.push_record([
            row.parameter.to_string(),
            format!("--{}", row.flag),
            row.min.to_string(),
            row.max.to_string(),
            row.default.to_string(),
            row.unit.to_string(),
        ]);
    }
    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

pub fn run(_args: BoundsArgs, global: &GlobalOpts, config: &Config) -> Result<()> {
    let rows = bounds_rows();

    match effective_format(requested_format(global, config), true) {
        OutputFormat::Json => print_json(&rows),
        OutputFormat::Yaml => print_yaml(&rows),
        OutputFormat::Csv => print_delimited(&rows, b','),
        OutputFormat::Tsv => print_delimited(&rows, b'\t'),
        OutputFormat::Table | OutputFormat::Text | OutputFormat::Auto => {
            println!("{}", render_table(&rows));
            Ok(())
        }
    }
}
