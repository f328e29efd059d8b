//! `fac session` command - interactive parameter adjustment
//!
//! Drives one [`Session`] with a stream of control events. With piped stdin each
//! line is an event:
//!
//! ```text
//! slider angle 30        # drag the target angle slider to 30
//! text gears 500         # type 500 into the gear count box
//! submit diameter        # press enter on an empty diameter box
//! reset speed            # restore one default (or `reset` for all)
//! show                   # print the full report
//! ```
//!
//! On a terminal the same events are collected with prompts.

use console::style;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::cli::commands::compute::print_report;
use crate::cli::helpers::read_lines_from_stdin;
use crate::cli::output::{effective_format, requested_format};
use crate::cli::viz;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::bounds::{ParameterName, ParameterNameError};
use crate::core::cycle::Session;
use crate::core::sync::{parse_entry, ControlEvent, EventKind, Source, SyncOutcome};
use crate::core::Config;

use super::compute::ParameterArgs;

#[derive(clap::Args, Debug)]
pub struct SessionArgs {
    /// Initial parameter values
    #[command(flatten)]
    pub values: ParameterArgs,
}

/// One parsed session instruction
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    Event(ControlEvent),
    Reset(Option<ParameterName>),
    Show,
    Quit,
}

#[derive(Debug, Error, PartialEq)]
pub enum LineError {
    #[error("unknown instruction '{0}' (expected slider, text, submit, reset, show or quit)")]
    UnknownInstruction(String),

    #[error("'{0}' needs a parameter name")]
    MissingParameter(String),

    #[error("{0}")]
    Parameter(String),
}

impl From<ParameterNameError> for LineError {
    fn from(err: ParameterNameError) -> Self {
        LineError::Parameter(err.to_string())
    }
}

/// Parse one event line; `Ok(None)` for blank lines and comments
pub fn parse_line(line: &str) -> Result<Option<Instruction>, LineError> {
    let line = line.split('#').next().unwrap_or("").trim();
    if line.is_empty() {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let verb = words.next().unwrap_or("").to_lowercase();
    let parameter = words.next();
    let rest = words.collect::<Vec<_>>().join(" ");

    let instruction = match verb.as_str() {
        "slider" | "text" | "submit" => {
            let name: ParameterName = parameter
                .ok_or_else(|| LineError::MissingParameter(verb.clone()))?
                .parse()?;
            let (source, kind) = match verb.as_str() {
                "slider" => (Source::Slider, EventKind::Changed),
                "text" => (Source::TextEntry, EventKind::Changed),
                _ => (Source::TextEntry, EventKind::Submitted),
            };
            Instruction::Event(ControlEvent {
                parameter: name,
                source,
                kind,
                candidate: parse_entry(&rest),
            })
        }
        "reset" => Instruction::Reset(
            parameter
                .map(str::parse::<ParameterName>)
                .transpose()?,
        ),
        "show" => Instruction::Show,
        "quit" | "exit" => Instruction::Quit,
        other => return Err(LineError::UnknownInstruction(other.to_string())),
    };

    Ok(Some(instruction))
}

/// Machine-readable record of one applied event
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub parameter: ParameterName,
    pub previous: f64,
    pub value: f64,
    pub changed: bool,
    pub slider: f64,
    pub text: String,
    pub velocity: f64,
    pub angle: f64,
    pub summary: String,
}

impl EventRecord {
    fn new(session: &Session, outcome: &SyncOutcome) -> Self {
        let projection = session.store().projection(outcome.parameter);
        let computation = session.computation();
        Self {
            parameter: outcome.parameter,
            previous: outcome.previous,
            value: outcome.value,
            changed: outcome.changed,
            slider: projection.slider,
            text: projection.text.clone(),
            velocity: computation.intersection.velocity,
            angle: computation.intersection.angle,
            summary: computation.summary.clone(),
        }
    }
}

struct SessionOutput<'a> {
    format: OutputFormat,
    config: &'a Config,
}

impl SessionOutput<'_> {
    fn outcome(&self, session: &Session, outcome: &SyncOutcome) -> Result<()> {
        if self.format == OutputFormat::Json {
            let record = EventRecord::new(session, outcome);
            println!("{}", serde_json::to_string(&record).into_diagnostic()?);
            return Ok(());
        }

        let name = outcome.parameter;
        if !outcome.changed {
            println!(
                "{} {} unchanged at {}",
                style("=").dim(),
                style(name).cyan(),
                name.format_value(outcome.value)
            );
            return Ok(());
        }

        let projection = session.store().projection(name);
        println!(
            "{} {}: {} → {}",
            style("✓").green(),
            style(name).cyan(),
            name.format_value(outcome.previous),
            style(name.format_value(outcome.value)).yellow()
        );
        println!(
            "   {} {}",
            style("slider").dim(),
            viz::render_slider(name, projection.slider)
        );
        println!("   {} \"{}\"", style("text  ").dim(), projection.text);
        println!("   {}", style(&session.computation().summary).bold());
        Ok(())
    }

    fn show(&self, session: &Session) -> Result<()> {
        if self.format == OutputFormat::Json {
            println!(
                "{}",
                serde_json::to_string(session.computation()).into_diagnostic()?
            );
        } else {
            print_report(session.computation(), true, self.config);
        }
        Ok(())
    }
}

/// Apply one instruction; returns false when the session should end
fn execute(session: &mut Session, instruction: Instruction, out: &SessionOutput) -> Result<bool> {
    match instruction {
        Instruction::Event(event) => {
            let outcome = session.interact(&event);
            out.outcome(session, &outcome)?;
        }
        Instruction::Reset(Some(name)) => {
            let outcome = session.reset(name);
            out.outcome(session, &outcome)?;
        }
        Instruction::Reset(None) => {
            for outcome in session.reset_all() {
                out.outcome(session, &outcome)?;
            }
        }
        Instruction::Show => out.show(session)?,
        Instruction::Quit => return Ok(false),
    }
    Ok(true)
}

pub fn run(args: SessionArgs, global: &GlobalOpts, config: &Config) -> Result<()> {
    let mut session = Session::new(args.values.to_store()?);
    let out = SessionOutput {
        format: effective_format(requested_format(global, config), false),
        config,
    };

    match read_lines_from_stdin() {
        Some(lines) => run_script(&mut session, &lines, &out),
        None => run_interactive(&mut session, &out),
    }
}

fn run_script(session: &mut Session, lines: &[String], out: &SessionOutput) -> Result<()> {
    for (number, line) in lines.iter().enumerate() {
        match parse_line(line) {
            Ok(Some(instruction)) => {
                if !execute(session, instruction, out)? {
                    break;
                }
            }
            Ok(None) => {}
            Err(err) => {
                debug!(line = number + 1, %err, "skipping malformed event");
                eprintln!(
                    "{} line {}: {}",
                    style("!").yellow(),
                    number + 1,
                    err
                );
            }
        }
    }
    Ok(())
}

fn run_interactive(session: &mut Session, out: &SessionOutput) -> Result<()> {
    out.show(session)?;
    let theme = ColorfulTheme::default();

    loop {
        let mut items: Vec<String> = ParameterName::ALL
            .iter()
            .map(|&name| {
                format!(
                    "{} ({})",
                    name.label(),
                    name.format_value(session.store().value(name))
                )
            })
            .collect();
        items.extend(["Reset all", "Show report", "Quit"].map(String::from));

        let choice = Select::with_theme(&theme)
            .with_prompt("Adjust")
            .items(&items[..])
            .default(0)
            .interact()
            .into_diagnostic()?;

        let instruction = match choice {
            i if i < ParameterName::ALL.len() => {
                let name = ParameterName::ALL[i];
                let bounds = name.bounds();
                let control = Select::with_theme(&theme)
                    .with_prompt("Control")
                    .items(&["Slider", "Text entry"])
                    .default(1)
                    .interact()
                    .into_diagnostic()?;
                let raw: String = Input::with_theme(&theme)
                    .with_prompt(format!(
                        "{} [{}-{}]",
                        name.label(),
                        bounds.min,
                        bounds.max
                    ))
                    .with_initial_text(session.store().projection(name).text.clone())
                    .allow_empty(true)
                    .interact_text()
                    .into_diagnostic()?;
                let source = if control == 0 {
                    Source::Slider
                } else {
                    Source::TextEntry
                };
                Instruction::Event(ControlEvent {
                    parameter: name,
                    source,
                    kind: EventKind::Submitted,
                    candidate: parse_entry(&raw),
                })
            }
            i if i == ParameterName::ALL.len() => Instruction::Reset(None),
            i if i == ParameterName::ALL.len() + 1 => Instruction::Show,
            _ => Instruction::Quit,
        };

        if !execute(session, instruction, out)? {
            return Ok(());
        }
    }
}
