use std::path::PathBuf;

use thiserror::Error;

/// Failures that stop a catalog from being loaded at all.
///
/// Per-row problems (bad dates, out-of-range coordinates) never surface here;
/// they are recovered or dropped inside the cleaning pipeline.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("catalog is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("column '{0}' appears more than once after renaming")]
    DuplicateColumn(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
