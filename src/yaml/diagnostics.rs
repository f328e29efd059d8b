//! YAML error diagnostics with source spans

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Errors raised while reading a YAML document
#[derive(Debug, Error, Diagnostic)]
pub enum YamlError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] Box<YamlSyntaxError>),

    #[error("failed to read file: {0}")]
    #[diagnostic(code(fac::yaml::io))]
    Io(#[from] std::io::Error),
}

impl From<YamlSyntaxError> for YamlError {
    fn from(err: YamlSyntaxError) -> Self {
        YamlError::Syntax(Box::new(err))
    }
}

/// A YAML syntax or shape error pointing at the offending location
#[derive(Debug, Error, Diagnostic)]
#[error("invalid YAML in {filename}: {message}")]
#[diagnostic(
    code(fac::yaml::syntax),
    help("check indentation and key names; unknown keys are rejected")
)]
pub struct YamlSyntaxError {
    pub filename: String,
    pub message: String,

    #[source_code]
    pub src: NamedSource<String>,

    #[label("here")]
    pub span: Option<SourceSpan>,
}

impl YamlSyntaxError {
    /// Build a diagnostic from a serde_yml error and the document it came from
    pub fn from_serde_error(err: &serde_yml::Error, content: &str, filename: &str) -> Self {
        let span = err
            .location()
            .map(|loc| SourceSpan::from((offset_of(content, loc.line(), loc.column()), 1)));

        Self {
            filename: filename.to_string(),
            message: err.to_string(),
            src: NamedSource::new(filename, content.to_string()),
            span,
        }
    }
}

/// Byte offset of a 1-based line/column position, clamped to the content length
fn offset_of(content: &str, line: usize, column: usize) -> usize {
    let mut offset = 0;
    for (i, text) in content.split_inclusive('\n').enumerate() {
        if i + 1 == line {
            let col = column.saturating_sub(1).min(text.trim_end_matches('\n').len());
            return offset + col;
        }
        offset += text.len();
    }
    content.len().saturating_sub(1)
}
