//! Bulk export of SKU matrices.
//!
//! The core enumerator never refuses work; this crate sizes an export
//! first and refuses it with [`ReportError::CombinationExplosion`] when it
//! would exceed the configured ceiling.

pub mod error;
pub mod export;

pub use error::{ReportError, Result};
pub use export::{
    DEFAULT_MAX_ROWS, ExportOptions, ExportPlan, MatrixCsvWriter, PlannedCategory, export_inventory,
    export_matrix, plan_export,
};
