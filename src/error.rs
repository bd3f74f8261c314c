use std::path::PathBuf;

use thiserror::Error;

/// Result alias for corpus loading and index building
pub type DataResult<T> = std::result::Result<T, DataError>;

/// Result alias for the crate-level error
pub type Result<T> = std::result::Result<T, Error>;

/// Corpus missing, empty, or malformed.
/// Raised at load/build time and never retried internally.
#[derive(Debug, Error)]
pub enum DataError {
    /// The corpus holds no records
    #[error("corpus is empty")]
    EmptyCorpus,

    /// A required column is absent from the header row
    #[error("corpus is missing required column `{column}`")]
    MissingColumn { column: &'static str },

    /// A data row is too short to hold a required column
    #[error("corpus row {row} has no value for column `{column}`")]
    MissingField { row: usize, column: &'static str },

    /// The corpus file could not be read
    #[error("cannot read corpus {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The corpus is not valid CSV
    #[error("malformed corpus: {0}")]
    Csv(#[from] csv::Error),
}

/// Configuration file or environment override problems
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid {key} value {value:?}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// Crate-level error used by the command line front end
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Process exit code for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Data(_) => 3,
            Self::Config(_) => 4,
            Self::Io(_) => 5,
        }
    }
}
