use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Warning,
    Error,
}

/// What is wrong with a piece of configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Selectable items without a code; they contribute nothing to a SKU.
    MissingCode,
    /// A dropdown field with nothing to choose.
    NoOptionsAvailable,
    /// Two items of one list share a code, so SKUs become ambiguous.
    DuplicateCode,
}

/// A configuration issue found while checking a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigIssue {
    pub kind: IssueKind,
    pub severity: IssueSeverity,
    /// Field name, or `None` when the issue concerns the extras list.
    pub field: Option<String>,
    /// Display names of the offending items.
    pub names: Vec<String>,
    pub message: String,
}

/// Issues for a single category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryReport {
    pub category: String,
    pub issues: Vec<ConfigIssue>,
}

impl CategoryReport {
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Warning)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}
