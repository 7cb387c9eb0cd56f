//! Error types for Tally

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid date '{value}' on row {row} (expected mm-dd-yyyy)")]
    Format { row: usize, value: String },

    #[error("No data for this view: {0}")]
    EmptyDataset(String),

    #[error("Sub-category '{sub_category}' does not belong to category '{category}'")]
    CategoryMismatch {
        category: String,
        sub_category: String,
    },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Too many invalid attempts for {field} ({attempts})")]
    TooManyAttempts { field: &'static str, attempts: u32 },

    #[error("Config error: {0}")]
    Config(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for the "nothing to aggregate" case
    pub fn empty(view: impl Into<String>) -> Self {
        Self::EmptyDataset(view.into())
    }

    /// Errors caused by the contents of the store rather than the environment
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::Format { .. } | Self::CategoryMismatch { .. } | Self::InvalidData(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
