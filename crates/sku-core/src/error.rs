use thiserror::Error;

/// Why a selection could not be encoded.
///
/// None of these abort assembly: callers render an empty code for the
/// field and surface the message next to it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("field {field} has no options to choose from")]
    NoOptionsAvailable { field: String },
    #[error("field {field} has no option with code {value:?}")]
    UnknownOption { field: String, value: String },
    #[error("field {field} is free text and cannot take a dropdown option")]
    KindMismatch { field: String },
    #[error("unknown field: {field}")]
    UnknownField { field: String },
    #[error("category {category} has no extra with code {code:?}")]
    UnknownExtra { category: String, code: String },
    #[error("category {category} allows a single extra, got {count}")]
    TooManyExtras { category: String, count: usize },
}
