//! Errors reported by the CLI.

use std::{
    io,
    path::{Path, PathBuf},
};

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use stepflow::RenderError;

/// Everything that can stop the CLI from writing a diagram.
#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("Cannot access `{path}`: {source}")]
    #[diagnostic(code(stepflow::io))]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Invalid configuration file `{path}`: {message}")]
    #[diagnostic(
        code(stepflow::config::parse),
        help("only [layout] and [style] are read; omitted values keep their defaults")
    )]
    ConfigParse {
        path: String,
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
    },

    #[error("Missing configuration file: {0}")]
    #[diagnostic(code(stepflow::config::missing))]
    MissingConfig(PathBuf),

    #[error("Invalid request: {0}")]
    #[diagnostic(
        code(stepflow::request),
        help("expected a `title` string plus `manualSteps` and `automationSteps` string arrays")
    )]
    Request(#[from] serde_json::Error),

    #[error("{0}")]
    #[diagnostic(
        code(stepflow::usage),
        help("pass a JSON request file, or --title with --manual/--automation steps")
    )]
    Usage(String),

    #[error(transparent)]
    #[diagnostic(code(stepflow::render))]
    Render(#[from] RenderError),
}

impl CliError {
    pub(crate) fn io(path: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Points at the part of the configuration file `toml` rejected.
    pub(crate) fn config_parse(path: &Path, content: &str, err: &toml::de::Error) -> Self {
        let path = path.display().to_string();
        Self::ConfigParse {
            message: err.message().to_string(),
            src: NamedSource::new(&path, content.to_string()),
            span: err.span().map(SourceSpan::from),
            path,
        }
    }
}
