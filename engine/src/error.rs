use shared::utils::FormatError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("CSV parsing system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Missing column '{column}' in {source_name}")]
    MissingColumn { column: String, source_name: String },

    #[error("CSV data format error: {0}")]
    CsvDataFormatError(String),

    #[error("Unknown statistic '{0}'")]
    UnknownStat(String),

    #[error("Number formatting error: {0}")]
    Format(#[from] FormatError),
}

impl EngineError {
    pub fn missing_column(column: &str, source_name: &str) -> Self {
        EngineError::MissingColumn {
            column: column.to_string(),
            source_name: source_name.to_string(),
        }
    }
}
