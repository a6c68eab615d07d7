//! On-disk configuration shapes.
//!
//! Persisted configuration may predate the current schema, so these types
//! accept every shape the editor has ever written:
//!
//! - a field stored as a bare list of options, or as the
//!   `{"order", "kind", "options"}` wrapper;
//! - `code`/`name` stored as strings, numbers or `null`;
//! - `order` stored as an integer, an integral float or not at all.
//!
//! Canonicalisation into [`crate::Category`] happens once, at the load
//! boundary, in the normaliser of `sku-core`.

use serde::{Deserialize, Deserializer, Serialize};

use crate::ordered::OrderedMap;

/// Root document: `{"inventory": {<category name>: {...}}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawConfiguration {
    #[serde(default)]
    pub inventory: OrderedMap<RawCategory>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCategory {
    #[serde(default)]
    pub settings: RawSettings,
    #[serde(default)]
    pub fields: OrderedMap<RawField>,
    #[serde(default)]
    pub extras: Vec<RawItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,
    #[serde(default)]
    pub extras_mode: ExtrasMode,
}

/// A field value as found on disk.
///
/// `Bare` is tried first so an empty list stays a bare list rather than an
/// empty wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawField {
    Bare(Vec<RawItem>),
    Wrapped(FieldSpec),
}

/// Canonical field wrapper.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    #[serde(
        default,
        deserialize_with = "lenient_order",
        skip_serializing_if = "Option::is_none"
    )]
    pub order: Option<i64>,
    #[serde(default)]
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<RawItem>>,
}

/// One dropdown option or one extra.
///
/// Both share the `{code, name, order}` shape; unknown keys such as the
/// legacy `selected` flag on extras are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawItem {
    #[serde(default, deserialize_with = "lenient_text")]
    pub code: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(
        default,
        deserialize_with = "lenient_order",
        skip_serializing_if = "Option::is_none"
    )]
    pub order: Option<i64>,
}

/// How a field receives its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Pick one of a fixed list of options.
    #[default]
    #[serde(alias = "Dropdown")]
    Dropdown,
    /// Arbitrary typed text used verbatim as code and label.
    #[serde(alias = "FreeText", alias = "text")]
    FreeText,
}

/// Selection policy for a category's extras.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExtrasMode {
    /// At most one extra per SKU.
    #[serde(alias = "single")]
    Single,
    /// Any subset of extras per SKU.
    #[default]
    #[serde(alias = "multiple")]
    Multiple,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientScalar {
    Int(i64),
    // Above i64::MAX; kept exact rather than rounded through f64.
    UInt(u64),
    Float(f64),
    Bool(bool),
    Text(String),
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Option::<LenientScalar>::deserialize(deserializer)?;
    Ok(match value {
        None => String::new(),
        Some(LenientScalar::Text(text)) => text,
        Some(LenientScalar::Int(number)) => number.to_string(),
        Some(LenientScalar::UInt(number)) => number.to_string(),
        Some(LenientScalar::Float(number)) => float_text(number),
        Some(LenientScalar::Bool(flag)) => flag.to_string(),
    })
}

fn lenient_order<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    let value = Option::<LenientScalar>::deserialize(deserializer)?;
    Ok(match value {
        Some(LenientScalar::Int(number)) => Some(number),
        Some(LenientScalar::UInt(number)) => Some(i64::try_from(number).unwrap_or(i64::MAX)),
        Some(LenientScalar::Float(number)) if number.is_finite() => Some(number.round() as i64),
        Some(LenientScalar::Text(text)) => text.trim().parse().ok(),
        _ => None,
    })
}

// Spreadsheet editors hand back 20.0 for a cell typed as 20.
fn float_text(number: f64) -> String {
    if number.is_finite() && number.fract() == 0.0 && number.abs() < 1e15 {
        format!("{}", number as i64)
    } else if number.is_nan() {
        String::new()
    } else {
        number.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_and_wrapped_fields_decode() {
        let fields: OrderedMap<RawField> = serde_json::from_str(
            r#"{
                "Brand": [{"code": "BL", "name": "Blastline", "order": 1}],
                "Capacity": {"order": 2, "options": [{"code": 20, "name": 1080}]},
                "Part Number": {"order": 3, "kind": "free_text"},
                "Thread": []
            }"#,
        )
        .unwrap();

        assert!(matches!(fields.get("Brand"), Some(RawField::Bare(items)) if items.len() == 1));
        let Some(RawField::Wrapped(capacity)) = fields.get("Capacity") else {
            panic!("expected wrapper");
        };
        let options = capacity.options.as_ref().unwrap();
        assert_eq!(options[0].code, "20");
        assert_eq!(options[0].name, "1080");
        assert_eq!(options[0].order, None);
        let Some(RawField::Wrapped(part)) = fields.get("Part Number") else {
            panic!("expected wrapper");
        };
        assert_eq!(part.kind, FieldKind::FreeText);
        assert!(part.options.is_none());
        assert_eq!(fields.get("Thread"), Some(&RawField::Bare(Vec::new())));
    }

    #[test]
    fn lenient_scalars() {
        let item: RawItem =
            serde_json::from_str(r#"{"code": null, "name": 2.0, "order": "3", "selected": false}"#)
                .unwrap();
        assert_eq!(item.code, "");
        assert_eq!(item.name, "2");
        assert_eq!(item.order, Some(3));

        let item: RawItem = serde_json::from_str(r#"{"order": 4.0}"#).unwrap();
        assert_eq!(item.order, Some(4));
        assert_eq!(item.code, "");
    }

    #[test]
    fn large_integer_codes_keep_every_digit() {
        let item: RawItem =
            serde_json::from_str(r#"{"code": 18446744073709551615, "order": 9223372036854775808}"#)
                .unwrap();
        assert_eq!(item.code, "18446744073709551615");
        assert_eq!(item.order, Some(i64::MAX));
    }

    #[test]
    fn settings_default_to_multiple() {
        let category: RawCategory = serde_json::from_str(r#"{"fields": {}}"#).unwrap();
        assert_eq!(category.settings.extras_mode, ExtrasMode::Multiple);
        assert_eq!(category.settings.separator, None);

        let settings: RawSettings =
            serde_json::from_str(r#"{"extras_mode": "Single", "separator": ""}"#).unwrap();
        assert_eq!(settings.extras_mode, ExtrasMode::Single);
        assert_eq!(settings.separator.as_deref(), Some(""));
    }
}
