//! Output formatting utilities

use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Config;

/// Determine the effective output format based on context
pub fn effective_format(format: OutputFormat, is_list: bool) -> OutputFormat {
    match format {
        OutputFormat::Auto => {
            if is_list {
                OutputFormat::Table
            } else {
                OutputFormat::Text
            }
        }
        other => other,
    }
}

/// Pick the requested format: command-line flag first, then config, then auto
pub fn requested_format(global: &GlobalOpts, config: &Config) -> OutputFormat {
    if let Some(format) = global.format {
        return format;
    }
    config
        .format
        .as_deref()
        .and_then(|name| <OutputFormat as clap::ValueEnum>::from_str(name, true).ok())
        .unwrap_or_default()
}

/// Print a value as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).into_diagnostic()?;
    println!("{}", json);
    Ok(())
}

/// Print a value as YAML
pub fn print_yaml<T: Serialize>(value: &T) -> Result<()> {
    let yaml = serde_yml::to_string(value).into_diagnostic()?;
    print!("{}", yaml);
    Ok(())
}

/// Write rows as CSV or TSV to stdout
pub fn print_delimited<T: Serialize>(rows: &[T], delimiter: u8) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(std::io::stdout());
    for row in rows {
        writer.serialize(row).into_diagnostic()?;
    }
    writer.flush().into_diagnostic()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global(format: Option<OutputFormat>) -> GlobalOpts {
        GlobalOpts {
            format,
            config: None,
            verbose: 0,
            no_color: false,
        }
    }

    #[test]
    fn test_effective_format() {
        assert_eq!(effective_format(OutputFormat::Auto, true), OutputFormat::Table);
        assert_eq!(effective_format(OutputFormat::Auto, false), OutputFormat::Text);
        assert_eq!(effective_format(OutputFormat::Json, true), OutputFormat::Json);
    }

    #[test]
    fn test_flag_beats_config() {
        let config = Config {
            format: Some("yaml".to_string()),
            ..Config::default()
        };
        assert_eq!(
            requested_format(&global(Some(OutputFormat::Csv)), &config),
            OutputFormat::Csv
        );
        assert_eq!(requested_format(&global(None), &config), OutputFormat::Yaml);
    }

    #[test]
    fn test_unknown_config_format_falls_back_to_auto() {
        let config = Config {
            format: Some("xml".to_string()),
            ..Config::default()
        };
        assert_eq!(requested_format(&global(None), &config), OutputFormat::Auto);
    }
}
