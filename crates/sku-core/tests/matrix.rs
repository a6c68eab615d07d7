//! Matrix enumeration scenarios.

use sku_core::{Selections, assemble, enumerate_matrix, matrix_size};
use sku_model::{Category, Extra, ExtrasMode, Field, Settings, SkuOption};

fn blast_machine(mode: ExtrasMode) -> Category {
    Category::new("Blast Machine")
        .with_settings(Settings::default().with_extras_mode(mode))
        .with_field(Field::dropdown(
            "Brand",
            Some(1),
            vec![SkuOption::new("BL", "Blastline", Some(1))],
        ))
        .with_field(Field::dropdown(
            "Capacity",
            Some(2),
            vec![
                SkuOption::new("20", "1080", Some(1)),
                SkuOption::new("24", "1440", Some(2)),
            ],
        ))
        .with_extra(Extra::new("R", "Remote Control", Some(1)))
        .with_extra(Extra::new("W", "Water Separator", Some(2)))
}

fn skus(category: &Category) -> Vec<String> {
    enumerate_matrix(category)
        .into_iter()
        .map(|row| row.sku)
        .collect()
}

#[test]
fn multiple_mode_enumerates_power_set() {
    let category = blast_machine(ExtrasMode::Multiple);
    assert_eq!(
        skus(&category),
        vec![
            "BL-20", "BL-20-R", "BL-20-W", "BL-20-RW", "BL-24", "BL-24-R", "BL-24-W", "BL-24-RW",
        ]
    );
    assert_eq!(matrix_size(&category).rows(), Some(8));
}

#[test]
fn single_mode_enumerates_none_plus_each() {
    let category = blast_machine(ExtrasMode::Single);
    assert_eq!(
        skus(&category),
        vec!["BL-20", "BL-20-R", "BL-20-W", "BL-24", "BL-24-R", "BL-24-W"]
    );
    assert_eq!(matrix_size(&category).rows(), Some(6));
}

#[test]
fn free_text_field_is_a_fixed_placeholder() {
    let category =
        blast_machine(ExtrasMode::Multiple).with_field(Field::free_text("Part Number", Some(3)));
    let rows = enumerate_matrix(&category);
    assert_eq!(rows.len(), 8);
    for row in &rows {
        assert_eq!(row.field_code("Part Number"), Some(""));
        assert!(!row.sku.ends_with('-'));
    }
    assert_eq!(rows[0].sku, "BL-20");
}

#[test]
fn empty_dropdown_does_not_collapse_the_product() {
    let category =
        blast_machine(ExtrasMode::Single).with_field(Field::dropdown("Thread", Some(0), vec![]));
    assert_eq!(skus(&category).len(), 6);
    assert_eq!(skus(&category)[0], "BL-20");
}

#[test]
fn extras_without_code_are_not_enumerated() {
    let category = blast_machine(ExtrasMode::Multiple).with_extra(Extra::new("", "Cover", None));
    assert_eq!(enumerate_matrix(&category).len(), 8);
}

#[test]
fn category_without_fields_still_yields_extras() {
    let category = Category::new("Accessories")
        .with_settings(Settings::default().with_extras_mode(ExtrasMode::Single))
        .with_extra(Extra::new("C", "Cover", Some(1)));
    assert_eq!(skus(&category), vec!["", "C"]);

    assert_eq!(skus(&Category::new("Empty")), vec![""]);
}

#[test]
fn rows_carry_descriptions_and_field_columns() {
    let category = blast_machine(ExtrasMode::Multiple);
    let rows = enumerate_matrix(&category);
    let last = rows.last().unwrap();
    assert_eq!(last.category, "Blast Machine");
    assert_eq!(
        last.description,
        "Blastline | 1440 | Remote Control | Water Separator"
    );
    assert_eq!(last.field_code("Capacity"), Some("24"));
    assert_eq!(last.extras_code(), "RW");
    assert_eq!(rows[0].description, "Blastline | 1080");
}

#[test]
fn custom_separator_applies_to_every_row() {
    let category = blast_machine(ExtrasMode::Single).with_settings(
        Settings::default()
            .with_separator("/")
            .with_extras_mode(ExtrasMode::Single),
    );
    assert_eq!(
        skus(&category),
        vec!["BL/20", "BL/20/R", "BL/20/W", "BL/24", "BL/24/R", "BL/24/W"]
    );
}

#[test]
fn rows_reassemble_to_the_same_sku() {
    let category =
        blast_machine(ExtrasMode::Multiple).with_field(Field::free_text("Part Number", Some(3)));
    for row in enumerate_matrix(&category) {
        let selections: Selections = row
            .fields
            .iter()
            .map(|cell| (cell.field.clone(), cell.code.clone()))
            .collect();
        let chosen: Vec<&Extra> = row
            .extras
            .iter()
            .map(|cell| category.extra(&cell.code).unwrap())
            .collect();
        assert_eq!(assemble(&category, &selections, &chosen), row.sku);
    }
}
