//! Configuration checks.
//!
//! Assembly tolerates gaps; these checks tell the editor where the gaps are.

use std::collections::BTreeMap;

use sku_model::{
    Category, CategoryReport, ConfigIssue, FieldInput, Inventory, IssueKind, IssueSeverity,
};
use tracing::debug;

use crate::ordering::{ordered_extras, ordered_fields, ordered_options};

/// How to treat selectable items that have no code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodePolicy {
    /// Report a warning; the item contributes nothing to SKUs.
    #[default]
    Warn,
    /// Report an error.
    Strict,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CheckOptions {
    pub code_policy: CodePolicy,
}

impl CheckOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict() -> Self {
        Self {
            code_policy: CodePolicy::Strict,
        }
    }

    pub fn with_code_policy(mut self, policy: CodePolicy) -> Self {
        self.code_policy = policy;
        self
    }

    fn missing_code_severity(&self) -> IssueSeverity {
        match self.code_policy {
            CodePolicy::Warn => IssueSeverity::Warning,
            CodePolicy::Strict => IssueSeverity::Error,
        }
    }
}

const UNNAMED: &str = "(unnamed)";

struct Item<'a> {
    code: &'a str,
    name: &'a str,
}

pub fn check_category(category: &Category, options: &CheckOptions) -> CategoryReport {
    let mut issues = Vec::new();
    for field in ordered_fields(&category.fields) {
        match &field.input {
            FieldInput::FreeText => {}
            FieldInput::Dropdown(list) if list.is_empty() => issues.push(ConfigIssue {
                kind: IssueKind::NoOptionsAvailable,
                severity: IssueSeverity::Warning,
                field: Some(field.name.clone()),
                names: Vec::new(),
                message: format!("no options in {}", field.name),
            }),
            FieldInput::Dropdown(_) => {
                let items: Vec<Item<'_>> = ordered_options(field)
                    .into_iter()
                    .map(|option| Item {
                        code: &option.code,
                        name: &option.name,
                    })
                    .collect();
                check_items(
                    &items,
                    Some(field.name.as_str()),
                    &format!("options of {}", field.name),
                    options,
                    &mut issues,
                );
            }
        }
    }
    let extras: Vec<Item<'_>> = ordered_extras(category)
        .into_iter()
        .map(|extra| Item {
            code: &extra.code,
            name: &extra.name,
        })
        .collect();
    check_items(&extras, None, "extras", options, &mut issues);

    debug!(
        category = %category.name,
        issue_count = issues.len(),
        "checked category"
    );
    CategoryReport {
        category: category.name.clone(),
        issues,
    }
}

pub fn check_inventory(inventory: &Inventory, options: &CheckOptions) -> Vec<CategoryReport> {
    inventory
        .categories()
        .iter()
        .map(|category| check_category(category, options))
        .collect()
}

fn check_items(
    items: &[Item<'_>],
    field: Option<&str>,
    what: &str,
    options: &CheckOptions,
    issues: &mut Vec<ConfigIssue>,
) {
    let missing: Vec<String> = items
        .iter()
        .filter(|item| item.code.is_empty())
        .map(|item| display_name(item.name))
        .collect();
    if !missing.is_empty() {
        issues.push(ConfigIssue {
            kind: IssueKind::MissingCode,
            severity: options.missing_code_severity(),
            field: field.map(str::to_string),
            message: format!("{what} without a code: {}", missing.join(", ")),
            names: missing,
        });
    }

    let mut by_code: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for item in items.iter().filter(|item| !item.code.is_empty()) {
        by_code
            .entry(item.code)
            .or_default()
            .push(display_name(item.name));
    }
    for (code, names) in by_code {
        if names.len() > 1 {
            issues.push(ConfigIssue {
                kind: IssueKind::DuplicateCode,
                severity: IssueSeverity::Warning,
                field: field.map(str::to_string),
                message: format!("{what} share code {code:?}: {}", names.join(", ")),
                names,
            });
        }
    }
}

fn display_name(name: &str) -> String {
    if name.trim().is_empty() {
        UNNAMED.to_string()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sku_model::{Extra, Field, SkuOption};

    fn category() -> Category {
        Category::new("Blast Machine")
            .with_field(Field::dropdown(
                "Valve",
                Some(1),
                vec![
                    SkuOption::new("F", "Flat Sand", Some(1)),
                    SkuOption::new("", "Thompson", Some(2)),
                    SkuOption::new("F", "Flat Sand Mk2", Some(3)),
                ],
            ))
            .with_field(Field::dropdown("Thread", Some(2), vec![]))
            .with_field(Field::free_text("Serial", Some(3)))
            .with_extra(Extra::new("", "", Some(1)))
            .with_extra(Extra::new("R", "Remote Control", Some(2)))
    }

    #[test]
    fn reports_missing_codes_empty_fields_and_duplicates() {
        let report = check_category(&category(), &CheckOptions::default());
        let kinds: Vec<(IssueKind, Option<&str>)> = report
            .issues
            .iter()
            .map(|issue| (issue.kind, issue.field.as_deref()))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (IssueKind::MissingCode, Some("Valve")),
                (IssueKind::DuplicateCode, Some("Valve")),
                (IssueKind::NoOptionsAvailable, Some("Thread")),
                (IssueKind::MissingCode, None),
            ]
        );
        assert_eq!(report.issues[0].names, vec!["Thompson".to_string()]);
        assert_eq!(report.issues[3].names, vec![UNNAMED.to_string()]);
        assert_eq!(report.error_count(), 0);
        assert_eq!(report.warning_count(), 4);
    }

    #[test]
    fn strict_policy_turns_missing_codes_into_errors() {
        let report = check_category(&category(), &CheckOptions::strict());
        assert_eq!(report.error_count(), 2);
        assert!(report.has_errors());
    }

    #[test]
    fn clean_category_has_no_issues() {
        let category = Category::new("Hose").with_field(Field::dropdown(
            "Size",
            Some(1),
            vec![SkuOption::new("1", "1in", Some(1))],
        ));
        assert!(check_category(&category, &CheckOptions::new()).is_clean());
    }
}
