use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("category name must not be empty")]
    EmptyCategoryName,
    #[error("category already exists: {name}")]
    DuplicateCategory { name: String },
    #[error("unknown category: {name}")]
    UnknownCategory { name: String },
    #[error("field name must not be empty")]
    EmptyFieldName,
    #[error("field {field} already exists in category {category}")]
    DuplicateField { category: String, field: String },
    #[error("unknown field {field} in category {category}")]
    UnknownField { category: String, field: String },
    #[error("field {field} takes free text and has no options")]
    FreeTextField { field: String },
    #[error("no option with code {code:?} in field {field}")]
    UnknownOption { field: String, code: String },
    #[error("no extra with code {code:?} in category {category}")]
    UnknownExtra { category: String, code: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
