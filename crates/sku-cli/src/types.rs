use std::path::PathBuf;

use sku_core::MatrixSize;
use sku_model::{CategoryReport, ExtrasMode, FieldKind, Settings};
use sku_report::ExportPlan;

#[derive(Debug)]
pub struct CategoriesResult {
    pub config_path: PathBuf,
    pub fingerprint: String,
    pub categories: Vec<CategorySummary>,
}

#[derive(Debug)]
pub struct CategorySummary {
    pub name: String,
    pub fields: usize,
    pub extras: usize,
    pub extras_mode: ExtrasMode,
    pub separator: String,
    /// `None` when the matrix size overflows.
    pub rows: Option<u64>,
}

#[derive(Debug)]
pub struct ShowResult {
    pub category: String,
    pub settings: Settings,
    /// Fields in SKU order.
    pub fields: Vec<FieldSummary>,
    /// Extra labels in extra order.
    pub extras: Vec<String>,
    pub size: MatrixSize,
}

#[derive(Debug)]
pub struct FieldSummary {
    pub name: String,
    pub order: Option<i64>,
    pub kind: FieldKind,
    /// Option labels (`code: name`) in display order.
    pub options: Vec<String>,
}

#[derive(Debug)]
pub struct AssembleResult {
    pub category: String,
    pub sku: String,
    pub description: String,
}

#[derive(Debug)]
pub struct CheckResult {
    pub reports: Vec<CategoryReport>,
}

impl CheckResult {
    pub fn has_errors(&self) -> bool {
        self.reports.iter().any(CategoryReport::has_errors)
    }
}

#[derive(Debug)]
pub struct MatrixResult {
    /// `None` when the CSV went to stdout.
    pub output: Option<PathBuf>,
    pub fingerprint: String,
    pub plan: ExportPlan,
}

#[derive(Debug)]
pub struct SavedResult {
    pub config_path: PathBuf,
    pub fingerprint: String,
    pub message: String,
}
