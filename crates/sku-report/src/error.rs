use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    /// The export would exceed the configured row ceiling.
    #[error("{scope} would produce {} rows, above the limit of {limit}", format_rows(.rows))]
    CombinationExplosion {
        scope: String,
        /// `None` when the count does not even fit in a `u64`.
        rows: Option<u64>,
        limit: u64,
    },
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_rows(rows: &Option<u64>) -> String {
    match rows {
        Some(rows) => rows.to_string(),
        None => "more than 2^64".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
