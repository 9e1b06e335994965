// File: crates/avexport-core/src/error.rs
// Summary: Export error types; runtime failures and usage errors with stable exit codes.

use std::io;

use avexport_chart::ChartError;
use thiserror::Error;

pub type ExportResult<T> = std::result::Result<T, ExportError>;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("row of {actual} cells does not fit the {expected} columns of `{document}`")]
    RowWidthMismatch { document: String, expected: usize, actual: usize },
    #[error("artifact `{name}` is declared by both `{first}` and `{second}`")]
    DuplicateArtifact { name: String, first: String, second: String },
    #[error("engine `{engine}` declares `{name}` but produced nothing for this result")]
    NothingToExport { engine: String, name: String },
    #[error(transparent)]
    Usage(#[from] UsageError),
    #[error("chart: {0}")]
    Chart(#[from] ChartError),
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("xlsx: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("template: {0}")]
    Template(#[from] minijinja::Error),
    #[error("config: {0}")]
    Config(#[from] toml::de::Error),
    #[error("config: `{key}`: {reason}")]
    InvalidConfig { key: &'static str, reason: String },
    #[error("io: {0}")]
    Io(#[from] io::Error),
}

/// Command-line misuse detected before any analysis work starts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UsageError {
    #[error("malformed single export request `{request}`: {reason}")]
    MalformedSingleExport { request: String, reason: &'static str },
    #[error("single export accepts exactly one input, got {0}")]
    MultipleInputs(usize),
    #[error("no engine exports an artifact named `{0}`")]
    UnknownArtifact(String),
    #[error("formats `{0}` and `{1}` cannot be requested together")]
    IncompatibleFormats(String, String),
}

impl UsageError {
    pub fn exit_code(&self) -> i32 {
        match self {
            UsageError::MalformedSingleExport { .. } => 3,
            UsageError::MultipleInputs(_) => 4,
            UsageError::UnknownArtifact(_) => 5,
            UsageError::IncompatibleFormats(..) => 6,
        }
    }
}

impl ExportError {
    /// Exit code for the binary: usage errors keep their own, everything else is 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            ExportError::Usage(u) => u.exit_code(),
            _ => 1,
        }
    }
}
