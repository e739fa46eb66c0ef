// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

use crate::schema::NumericError;

/// Everything that can go wrong while loading or writing a register.
#[derive(Error, Debug)]
pub enum WtrError {
    /// Ragged rows or broken quoting in the source.
    #[error("could not read or write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An extension column was present in the header but a value in it is not a number.
    #[error("could not convert column \"{column}\" at row {row}: {value:?}")]
    Extension {
        column: String,
        /// 1-based data row, header excluded.
        row: usize,
        value: String,
        #[source]
        source: NumericError,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, WtrError>;
