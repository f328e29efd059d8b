//! `fac compute` command - fibre angle curve and operating point

use std::path::PathBuf;

use console::style;
use miette::Result;
use tracing::info;

use crate::cli::helpers::format_signed;
use crate::cli::output::{effective_format, print_json, print_yaml, requested_format};
use crate::cli::viz;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::bounds::ParameterName;
use crate::core::cycle::Computation;
use crate::core::input::ParameterFile;
use crate::core::model::{SWEEP_END, SWEEP_START};
use crate::core::sync::{ControlEvent, EventKind, ParameterStore};
use crate::core::Config;

/// Parameter values as typed by the operator
///
/// Each value is handled like a text entry submission: out-of-range values are
/// clamped, and empty or non-numeric values fall back to the default.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ParameterArgs {
    /// Number of horn gears [1-192, default 192]
    #[arg(long, short = 'n', allow_hyphen_values = true)]
    pub gears: Option<String>,

    /// Mandrel diameter in mm [1-1000, default 100]
    #[arg(long, short = 'd', allow_hyphen_values = true)]
    pub diameter: Option<String>,

    /// Horn gear speed in RPM [25-150, default 100]
    #[arg(long, short = 's', allow_hyphen_values = true)]
    pub speed: Option<String>,

    /// Target fibre angle in degrees [10-80, default 45]
    #[arg(long, short = 'a', allow_hyphen_values = true)]
    pub angle: Option<String>,

    /// YAML file with base parameter values (flags take precedence)
    #[arg(long, short = 'p')]
    pub params: Option<PathBuf>,
}

impl ParameterArgs {
    fn raw(&self, name: ParameterName) -> Option<&str> {
        match name {
            ParameterName::GearCount => self.gears.as_deref(),
            ParameterName::MandrelDiameter => self.diameter.as_deref(),
            ParameterName::HornGearSpeed => self.speed.as_deref(),
            ParameterName::TargetAngle => self.angle.as_deref(),
        }
    }

    /// Text-entry events for every flag that was given
    pub fn events(&self) -> Vec<ControlEvent> {
        ParameterName::ALL
            .iter()
            .filter_map(|&name| {
                self.raw(name)
                    .map(|raw| ControlEvent::text(name, raw, EventKind::Submitted))
            })
            .collect()
    }

    /// Build a normalized store from the parameter file and flags
    pub fn to_store(&self) -> Result<ParameterStore> {
        let mut store = ParameterStore::new();

        if let Some(path) = &self.params {
            let file = ParameterFile::load(path)?;
            for event in file.events() {
                store.apply(&event);
            }
        }

        for event in self.events() {
            let outcome = store.apply(&event);
            if let Some(candidate) = event.candidate {
                if candidate != outcome.value {
                    info!(
                        parameter = %event.parameter,
                        candidate,
                        value = outcome.value,
                        "value clamped to bounds"
                    );
                }
            } else {
                info!(
                    parameter = %event.parameter,
                    value = outcome.value,
                    "entry not numeric, using default"
                );
            }
        }

        Ok(store)
    }
}

#[derive(clap::Args, Debug)]
pub struct ComputeArgs {
    #[command(flatten)]
    pub values: ParameterArgs,

    /// Skip the chart in text output
    #[arg(long)]
    pub no_chart: bool,
}

pub fn run(args: ComputeArgs, global: &GlobalOpts, config: &Config) -> Result<()> {
    let store = args.values.to_store()?;
    let computation = Computation::run(&store.parameters());

    match effective_format(requested_format(global, config), false) {
        OutputFormat::Json => print_json(&computation),
        OutputFormat::Yaml => print_yaml(&computation),
        OutputFormat::Csv | OutputFormat::Tsv | OutputFormat::Table => {
            // Per-sample output belongs to `fac sweep`; print the one-line result
            println!("{}", computation.summary);
            Ok(())
        }
        OutputFormat::Text | OutputFormat::Auto => {
            print_report(&computation, !args.no_chart, config);
            Ok(())
        }
    }
}

/// Print the human-readable report for one computation
pub fn print_report(computation: &Computation, chart: bool, config: &Config) {
    let params = &computation.parameters;

    println!("{}", style("Fibre Angle (α) vs. Mandrel Velocity").bold());
    println!("{}", style("─".repeat(60)).dim());
    for name in ParameterName::ALL {
        println!(
            "{}: {}",
            style(name.label()).bold(),
            style(name.format_value(params.get(name))).cyan()
        );
    }
    println!("{}", style("─".repeat(60)).dim());

    if chart {
        println!();
        println!(
            "{}",
            viz::render_curve_chart(computation, config.chart.width, config.chart.height)
        );
        println!();
    }

    println!(
        "{} Intersection at {} mm/s (α = {}°, sample {} of {})",
        style("◆").cyan(),
        style(format!("{:.2}", computation.intersection.velocity)).yellow(),
        style(format!("{:.2}", computation.intersection.angle)).yellow(),
        computation.intersection.index + 1,
        computation.sweep.len()
    );

    match (computation.analytic_velocity, computation.sampling_error()) {
        (Some(exact), _) if computation.is_saturated() => println!(
            "   {} exact solution {:.2} mm/s lies outside the {}-{} mm/s sweep",
            style("!").yellow(),
            exact,
            SWEEP_START,
            SWEEP_END,
        ),
        (Some(exact), Some(error)) => println!(
            "   {} exact solution {:.2} mm/s (sample {} mm/s, step {:.2} mm/s)",
            style("ℹ").blue(),
            exact,
            format_signed(error, 2),
            computation.sweep.resolution()
        ),
        _ => {}
    }

    println!();
    println!("{}", style(&computation.summary).bold());
}
