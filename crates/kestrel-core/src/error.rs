use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read export workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Export workbook has no worksheets")]
    EmptyWorkbook,

    #[error("Failed to write output CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unrecognized date value: {0:?}")]
    DateParse(String),

    #[error("Expected column not found: {0}")]
    MissingColumn(String),

    #[error("Row count {rows} does not match extracted version id count {version_ids}")]
    CountMismatch { rows: usize, version_ids: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
