//! CSV export of SKU matrices.

use std::io::Write;

use sku_core::{MatrixIter, MatrixRow, matrix_size, ordered_field_names};
use sku_model::{Category, Inventory};
use tracing::{debug, info, info_span};

use crate::error::{ReportError, Result};

/// Default ceiling on exported rows.
pub const DEFAULT_MAX_ROWS: u64 = 1_000_000;

pub const CATEGORY_HEADER: &str = "Category";
pub const SKU_HEADER: &str = "Generated SKU";
pub const DESCRIPTION_HEADER: &str = "Full Description";
pub const EXTRAS_HEADER: &str = "Extras";

/// Options controlling matrix export.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Refuse exports above this many rows; `None` disables the guard.
    pub max_rows: Option<u64>,
    /// Add one column per field with the chosen code.
    pub field_columns: bool,
    /// Add a column with the concatenated extras code.
    pub extras_column: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            max_rows: Some(DEFAULT_MAX_ROWS),
            field_columns: false,
            extras_column: false,
        }
    }
}

impl ExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_rows(mut self, max_rows: Option<u64>) -> Self {
        self.max_rows = max_rows;
        self
    }

    #[must_use]
    pub fn with_field_columns(mut self, enable: bool) -> Self {
        self.field_columns = enable;
        self
    }

    #[must_use]
    pub fn with_extras_column(mut self, enable: bool) -> Self {
        self.extras_column = enable;
        self
    }
}

/// Planned row count for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedCategory {
    pub name: String,
    pub rows: u64,
}

/// What an export will write, computed before any row is produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportPlan {
    pub categories: Vec<PlannedCategory>,
    pub total_rows: u64,
    /// Union of field names, in first-seen resolver order.
    pub field_names: Vec<String>,
}

/// Size the export and apply the row ceiling.
///
/// Categories with neither fields nor extras are skipped.
pub fn plan_export(categories: &[&Category], options: &ExportOptions) -> Result<ExportPlan> {
    let mut plan = ExportPlan::default();
    for category in categories {
        if category.is_empty() {
            debug!(category = %category.name, "skipping empty category");
            continue;
        }
        let rows = matrix_size(category).rows();
        let rows = check_limit(&category.name, rows, options.max_rows)?;
        plan.total_rows = check_limit(
            "export",
            plan.total_rows.checked_add(rows),
            options.max_rows,
        )?;
        plan.categories.push(PlannedCategory {
            name: category.name.clone(),
            rows,
        });
        for name in ordered_field_names(&category.fields) {
            if !plan.field_names.iter().any(|existing| existing == name) {
                plan.field_names.push(name.to_string());
            }
        }
    }
    Ok(plan)
}

fn check_limit(scope: &str, rows: Option<u64>, limit: Option<u64>) -> Result<u64> {
    match (rows, limit) {
        (Some(rows), Some(limit)) if rows <= limit => Ok(rows),
        (Some(rows), None) => Ok(rows),
        (rows, limit) => Err(ReportError::CombinationExplosion {
            scope: scope.to_string(),
            rows,
            limit: limit.unwrap_or(u64::MAX),
        }),
    }
}

/// Streams matrix rows into CSV.
pub struct MatrixCsvWriter<W: Write> {
    writer: csv::Writer<W>,
    field_names: Vec<String>,
    options: ExportOptions,
    rows: u64,
}

impl<W: Write> MatrixCsvWriter<W> {
    /// Create the writer and emit the header record.
    pub fn new(inner: W, field_names: Vec<String>, options: &ExportOptions) -> Result<Self> {
        let mut writer = csv::Writer::from_writer(inner);
        let mut header = vec![CATEGORY_HEADER, SKU_HEADER, DESCRIPTION_HEADER];
        if options.extras_column {
            header.push(EXTRAS_HEADER);
        }
        let field_headers = if options.field_columns {
            field_headers(&field_names)
        } else {
            Vec::new()
        };
        header.extend(field_headers.iter().map(String::as_str));
        writer.write_record(&header)?;
        Ok(Self {
            writer,
            field_names,
            options: options.clone(),
            rows: 0,
        })
    }

    pub fn write_row(&mut self, row: &MatrixRow) -> Result<()> {
        let extras_code = row.extras_code();
        let mut record = vec![
            row.category.as_str(),
            row.sku.as_str(),
            row.description.as_str(),
        ];
        if self.options.extras_column {
            record.push(extras_code.as_str());
        }
        if self.options.field_columns {
            record.extend(
                self.field_names
                    .iter()
                    .map(|name| row.field_code(name).unwrap_or("")),
            );
        }
        self.writer.write_record(&record)?;
        self.rows += 1;
        Ok(())
    }

    pub fn rows(&self) -> u64 {
        self.rows
    }

    /// Flush buffered output and return the row count.
    pub fn finish(mut self) -> Result<u64> {
        self.writer.flush()?;
        Ok(self.rows)
    }
}

/// Column headers for the per-field columns. A field whose name clashes
/// with a fixed column (or an earlier header) gets a ` (field)` suffix,
/// then a counter.
fn field_headers(field_names: &[String]) -> Vec<String> {
    let mut taken: Vec<String> = [CATEGORY_HEADER, SKU_HEADER, DESCRIPTION_HEADER, EXTRAS_HEADER]
        .iter()
        .map(ToString::to_string)
        .collect();
    let mut headers = Vec::with_capacity(field_names.len());
    for name in field_names {
        let mut header = name.clone();
        let mut attempt = 1;
        while taken.contains(&header) {
            header = if attempt == 1 {
                format!("{name} (field)")
            } else {
                format!("{name} (field {attempt})")
            };
            attempt += 1;
        }
        taken.push(header.clone());
        headers.push(header);
    }
    headers
}

/// Plan, guard and write the matrices of `categories` as one CSV.
///
/// `progress` is called after every written row with the running total.
pub fn export_matrix<W: Write>(
    categories: &[&Category],
    inner: W,
    options: &ExportOptions,
    mut progress: impl FnMut(u64),
) -> Result<ExportPlan> {
    let plan = plan_export(categories, options)?;
    let mut writer = MatrixCsvWriter::new(inner, plan.field_names.clone(), options)?;
    for category in categories.iter().filter(|category| !category.is_empty()) {
        let span = info_span!("export_category", category = %category.name);
        let _guard = span.enter();
        for row in MatrixIter::new(category) {
            writer.write_row(&row)?;
            progress(writer.rows());
        }
    }
    let rows = writer.finish()?;
    info!(
        categories = plan.categories.len(),
        rows,
        "matrix export complete"
    );
    Ok(plan)
}

/// Export every category of an inventory.
pub fn export_inventory<W: Write>(
    inventory: &Inventory,
    inner: W,
    options: &ExportOptions,
    progress: impl FnMut(u64),
) -> Result<ExportPlan> {
    let categories: Vec<&Category> = inventory.categories().iter().collect();
    export_matrix(&categories, inner, options, progress)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colliding_field_headers_are_suffixed() {
        let names = ["Category", "Brand", "Category (field)", "Extras"].map(String::from);
        assert_eq!(
            field_headers(&names),
            vec!["Category (field)", "Brand", "Category (field) (field)", "Extras (field)"]
        );
    }

    #[test]
    fn limit_check() {
        assert_eq!(check_limit("c", Some(5), Some(5)).unwrap(), 5);
        assert_eq!(check_limit("c", Some(5), None).unwrap(), 5);
        assert!(matches!(
            check_limit("c", Some(6), Some(5)),
            Err(ReportError::CombinationExplosion {
                rows: Some(6),
                limit: 5,
                ..
            })
        ));
        let err = check_limit("c", None, None).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("c would produce more than 2^64 rows, above the limit of {}", u64::MAX)
        );
    }
}
