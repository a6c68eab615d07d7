use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use sku_model::{ExtrasMode, FieldKind, IssueSeverity};

use crate::types::{
    AssembleResult, CategoriesResult, CheckResult, MatrixResult, SavedResult, ShowResult,
};

pub fn print_categories(result: &CategoriesResult) {
    println!("Configuration: {}", result.config_path.display());
    println!("Snapshot: {}", result.fingerprint);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Category"),
        header_cell("Fields"),
        header_cell("Extras"),
        header_cell("Extras mode"),
        header_cell("Separator"),
        header_cell("Matrix rows"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);
    align_column(&mut table, 5, CellAlignment::Right);
    for category in &result.categories {
        table.add_row(vec![
            Cell::new(&category.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            count_cell(category.fields),
            count_cell(category.extras),
            Cell::new(mode_label(category.extras_mode)),
            separator_cell(&category.separator),
            rows_cell(category.rows),
        ]);
    }
    println!("{table}");
}

pub fn print_show(result: &ShowResult) {
    println!("Category: {}", result.category);
    println!(
        "Separator: {:?}  Extras mode: {}  Matrix rows: {}",
        result.settings.separator,
        mode_label(result.settings.extras_mode),
        result
            .size
            .rows()
            .map_or_else(|| "overflow".to_string(), |rows| rows.to_string())
    );
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Order"),
        header_cell("Field"),
        header_cell("Kind"),
        header_cell("Options"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for field in &result.fields {
        let options = match field.kind {
            FieldKind::FreeText => dim_cell("(typed text)"),
            FieldKind::Dropdown if field.options.is_empty() => {
                Cell::new("(no options)").fg(Color::Yellow)
            }
            FieldKind::Dropdown => Cell::new(field.options.join("\n")),
        };
        table.add_row(vec![
            field.order.map_or_else(|| dim_cell("-"), Cell::new),
            Cell::new(&field.name).add_attribute(Attribute::Bold),
            Cell::new(kind_label(field.kind)),
            options,
        ]);
    }
    println!("{table}");
    if result.extras.is_empty() {
        println!("Extras: none");
    } else {
        println!("Extras: {}", result.extras.join(", "));
    }
}

pub fn print_assemble(result: &AssembleResult) {
    println!("{}", result.sku);
    if !result.description.is_empty() {
        eprintln!("{}: {}", result.category, result.description);
    }
}

pub fn print_check(result: &CheckResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Category"),
        header_cell("Severity"),
        header_cell("Field"),
        header_cell("Issue"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    let mut errors = 0usize;
    let mut warnings = 0usize;
    for report in &result.reports {
        errors += report.error_count();
        warnings += report.warning_count();
        for issue in &report.issues {
            table.add_row(vec![
                Cell::new(&report.category),
                severity_cell(issue.severity),
                issue
                    .field
                    .as_deref()
                    .map_or_else(|| dim_cell("extras"), Cell::new),
                Cell::new(format!("{:?}", issue.kind)),
                Cell::new(&issue.message),
            ]);
        }
    }
    if errors + warnings == 0 {
        println!("No issues in {} categories.", result.reports.len());
        return;
    }
    println!("{table}");
    println!("{errors} errors, {warnings} warnings");
}

/// Goes to stderr: stdout may be carrying the CSV.
pub fn print_matrix(result: &MatrixResult) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Category"), header_cell("Rows")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for category in &result.plan.categories {
        table.add_row(vec![Cell::new(&category.name), Cell::new(category.rows)]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(result.plan.total_rows).add_attribute(Attribute::Bold),
    ]);
    eprintln!("{table}");
    if let Some(path) = &result.output {
        eprintln!("Output: {}", path.display());
    }
    eprintln!("Snapshot: {}", result.fingerprint);
}

pub fn print_saved(result: &SavedResult) {
    println!("{}: {}", result.config_path.display(), result.message);
    println!("Snapshot: {}", result.fingerprint);
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn mode_label(mode: ExtrasMode) -> &'static str {
    match mode {
        ExtrasMode::Single => "Single",
        ExtrasMode::Multiple => "Multiple",
    }
}

fn kind_label(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Dropdown => "dropdown",
        FieldKind::FreeText => "free text",
    }
}

fn separator_cell(separator: &str) -> Cell {
    if separator.is_empty() {
        dim_cell("(none)")
    } else {
        Cell::new(format!("{separator:?}"))
    }
}

fn rows_cell(rows: Option<u64>) -> Cell {
    match rows {
        Some(rows) if rows > sku_report::DEFAULT_MAX_ROWS => Cell::new(rows).fg(Color::Yellow),
        Some(rows) => Cell::new(rows),
        None => Cell::new("overflow").fg(Color::Red),
    }
}

fn count_cell(count: usize) -> Cell {
    if count == 0 {
        dim_cell(count)
    } else {
        Cell::new(count)
    }
}

fn severity_cell(severity: IssueSeverity) -> Cell {
    match severity {
        IssueSeverity::Error => Cell::new("ERROR")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        IssueSeverity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
