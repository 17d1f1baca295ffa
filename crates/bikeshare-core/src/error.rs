use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BikeshareError {
    #[error("No data file for {city} at {}", path.display())]
    DataFileNotFound { city: String, path: PathBuf },

    #[error("Invalid {kind}: {value:?}")]
    InvalidFilter { kind: &'static str, value: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input closed")]
    InputClosed,
}

pub type Result<T> = std::result::Result<T, BikeshareError>;
