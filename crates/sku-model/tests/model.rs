//! Tests for sku-model types.

use sku_model::{
    Category, CategoryReport, ConfigIssue, Extra, ExtrasMode, Field, Inventory, IssueKind,
    IssueSeverity, ModelError, RawConfiguration, Settings, SkuOption,
};

#[test]
fn category_report_counts() {
    let report = CategoryReport {
        category: "Blast Machine".to_string(),
        issues: vec![
            ConfigIssue {
                kind: IssueKind::MissingCode,
                severity: IssueSeverity::Error,
                field: Some("Valve".to_string()),
                names: vec!["Thompson".to_string()],
                message: "options without a code: Thompson".to_string(),
            },
            ConfigIssue {
                kind: IssueKind::NoOptionsAvailable,
                severity: IssueSeverity::Warning,
                field: Some("Thread".to_string()),
                names: vec![],
                message: "no options in Thread".to_string(),
            },
        ],
    };
    assert_eq!(report.error_count(), 1);
    assert_eq!(report.warning_count(), 1);
    assert!(report.has_errors());
    assert!(!report.is_clean());
}

#[test]
fn report_serializes() {
    let report = CategoryReport {
        category: "Hose".to_string(),
        issues: vec![],
    };
    let json = serde_json::to_string(&report).expect("serialize report");
    let round: CategoryReport = serde_json::from_str(&json).expect("deserialize report");
    assert_eq!(round, report);
}

#[test]
fn inventory_to_raw_keeps_category_order_and_settings() {
    let mut inventory = Inventory::new();
    inventory
        .insert(
            Category::new("Zeta")
                .with_settings(
                    Settings::default()
                        .with_separator("/")
                        .with_extras_mode(ExtrasMode::Single),
                )
                .with_field(Field::dropdown(
                    "Brand",
                    Some(1),
                    vec![SkuOption::new("BL", "Blastline", Some(1))],
                )),
        )
        .unwrap();
    inventory.add_category("Alpha").unwrap();

    let json = serde_json::to_string(&inventory.to_raw()).expect("serialize inventory");
    let raw: RawConfiguration = serde_json::from_str(&json).expect("deserialize inventory");
    let names: Vec<&str> = raw.inventory.keys().collect();
    assert_eq!(names, vec!["Zeta", "Alpha"]);

    let zeta = raw.inventory.get("Zeta").unwrap();
    assert_eq!(zeta.settings.separator.as_deref(), Some("/"));
    assert_eq!(zeta.settings.extras_mode, ExtrasMode::Single);
    assert!(json.contains(r#""extras_mode":"Single""#));
}

#[test]
fn options_and_extras_can_be_edited_and_removed() {
    let mut category = Category::new("Blast Machine")
        .with_field(Field::dropdown(
            "Brand",
            Some(1),
            vec![
                SkuOption::new("BL", "Blastline", Some(1)),
                SkuOption::new("CX", "Clemko", Some(2)),
            ],
        ))
        .with_field(Field::free_text("Serial", Some(2)))
        .with_extra(Extra::new("R", "Remote Control", Some(1)))
        .with_extra(Extra::new("W", "Water Separator", Some(2)));

    let brand = category.field_mut("Brand").unwrap();
    let typo = brand.option_mut("CX").unwrap();
    typo.name = "Clemco".to_string();
    typo.order = Some(0);
    assert_eq!(brand.options()[1], SkuOption::new("CX", "Clemco", Some(0)));

    assert_eq!(brand.remove_option("BL").unwrap().name, "Blastline");
    assert_eq!(
        brand.remove_option("BL"),
        Err(ModelError::UnknownOption {
            field: "Brand".to_string(),
            code: "BL".to_string(),
        })
    );
    assert_eq!(brand.options().len(), 1);

    assert!(matches!(
        category.field_mut("Serial").unwrap().remove_option("X"),
        Err(ModelError::FreeTextField { .. })
    ));

    category.extra_mut("W").unwrap().order = Some(0);
    assert_eq!(category.extra("W").unwrap().order, Some(0));
    assert_eq!(category.remove_extra("R").unwrap().name, "Remote Control");
    assert_eq!(
        category.remove_extra("R").unwrap_err().to_string(),
        "no extra with code \"R\" in category Blast Machine"
    );
    assert_eq!(category.extras.len(), 1);
}
