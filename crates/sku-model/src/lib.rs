//! Data model for the SKU configurator.

pub mod category;
pub mod error;
pub mod inventory;
pub mod issue;
pub mod ordered;
pub mod raw;

pub use category::{
    Category, DEFAULT_SEPARATOR, Extra, Field, FieldInput, Settings, SkuOption,
};
pub use error::{ModelError, Result};
pub use inventory::Inventory;
pub use issue::{CategoryReport, ConfigIssue, IssueKind, IssueSeverity};
pub use ordered::OrderedMap;
pub use raw::{
    ExtrasMode, FieldKind, FieldSpec, RawCategory, RawConfiguration, RawField, RawItem,
    RawSettings,
};
