//! SKU assembly.
//!
//! The join rules live here and nowhere else; the matrix enumerator calls
//! the same helpers so a row's SKU always equals what [`assemble`] returns
//! for that row's selections.

use std::collections::BTreeMap;

use sku_model::{Category, Extra};

use crate::ordering::{ordered_fields, sort_by_order};

/// Chosen code per field name.
pub type Selections = BTreeMap<String, String>;

/// Separator between labels in human-readable descriptions.
pub const DESCRIPTION_SEPARATOR: &str = " | ";

/// Join field codes with `separator`, skipping empty codes.
pub fn join_base<'a>(separator: &str, codes: impl IntoIterator<Item = &'a str>) -> String {
    let parts: Vec<&str> = codes.into_iter().filter(|code| !code.is_empty()).collect();
    parts.join(separator)
}

/// Extras codes are concatenated without any separator.
pub fn concat_extras<'a>(codes: impl IntoIterator<Item = &'a str>) -> String {
    codes.into_iter().collect()
}

/// Append the extras block, inserting `separator` only when both sides and
/// the separator itself are non-empty.
pub fn attach_extras(separator: &str, base: &str, extras_code: &str) -> String {
    if !base.is_empty() && !extras_code.is_empty() && !separator.is_empty() {
        format!("{base}{separator}{extras_code}")
    } else {
        format!("{base}{extras_code}")
    }
}

/// Human-readable description: non-empty labels joined by
/// [`DESCRIPTION_SEPARATOR`], base labels first.
pub fn join_description<'a>(
    base_labels: impl IntoIterator<Item = &'a str>,
    extra_names: impl IntoIterator<Item = &'a str>,
) -> String {
    let base: Vec<&str> = base_labels
        .into_iter()
        .filter(|label| !label.is_empty())
        .collect();
    let extras: Vec<&str> = extra_names
        .into_iter()
        .filter(|name| !name.is_empty())
        .collect();
    attach_extras(
        DESCRIPTION_SEPARATOR,
        &base.join(DESCRIPTION_SEPARATOR),
        &extras.join(DESCRIPTION_SEPARATOR),
    )
}

/// Assemble the SKU for one set of selections.
///
/// Fields are taken in resolver order; fields without a selection or with
/// an empty code contribute nothing. Chosen extras are placed in extra
/// order. Never fails: gaps in the configuration show up as missing
/// segments, not errors.
pub fn assemble(category: &Category, selections: &Selections, chosen_extras: &[&Extra]) -> String {
    let separator = category.settings.separator.as_str();
    let base = join_base(
        separator,
        ordered_fields(&category.fields)
            .into_iter()
            .filter_map(|field| selections.get(&field.name).map(String::as_str)),
    );
    let extras_code = concat_extras(
        sort_by_order(chosen_extras)
            .into_iter()
            .map(|extra| extra.code.as_str()),
    );
    attach_extras(separator, &base, &extras_code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sku_model::{Field, Settings, SkuOption};

    fn category(separator: &str) -> Category {
        Category::new("Blast Machine")
            .with_settings(Settings::default().with_separator(separator))
            .with_field(Field::dropdown(
                "Capacity",
                Some(2),
                vec![SkuOption::new("20", "1080", Some(1))],
            ))
            .with_field(Field::dropdown(
                "Brand",
                Some(1),
                vec![SkuOption::new("BL", "Blastline", Some(1))],
            ))
            .with_extra(Extra::new("W", "Water Separator", Some(2)))
            .with_extra(Extra::new("R", "Remote Control", Some(1)))
    }

    fn selections(pairs: &[(&str, &str)]) -> Selections {
        pairs
            .iter()
            .map(|(field, code)| ((*field).to_string(), (*code).to_string()))
            .collect()
    }

    #[test]
    fn fields_follow_order_and_extras_concatenate() {
        let category = category("-");
        let chosen: Vec<&Extra> = category.extras.iter().collect();
        let sku = assemble(
            &category,
            &selections(&[("Brand", "BL"), ("Capacity", "20")]),
            &chosen,
        );
        assert_eq!(sku, "BL-20-RW");
    }

    #[test]
    fn empty_codes_and_sides_drop_separators() {
        let category = category("-");
        let remote = category.extra("R").unwrap();
        assert_eq!(
            assemble(&category, &selections(&[("Brand", ""), ("Capacity", "20")]), &[]),
            "20"
        );
        assert_eq!(assemble(&category, &selections(&[]), &[remote]), "R");
        assert_eq!(assemble(&category, &selections(&[]), &[]), "");
        assert_eq!(
            assemble(&category, &selections(&[("Capacity", "20")]), &[remote]),
            "20-R"
        );
    }

    #[test]
    fn empty_separator_concatenates() {
        let category = category("");
        let remote = category.extra("R").unwrap();
        assert_eq!(
            assemble(
                &category,
                &selections(&[("Brand", "BL"), ("Capacity", "24")]),
                &[remote]
            ),
            "BL24R"
        );
    }

    #[test]
    fn description_skips_empty_labels() {
        assert_eq!(
            join_description(["Blastline", "", "1080"], ["Remote Control", "Cover"]),
            "Blastline | 1080 | Remote Control | Cover"
        );
        assert_eq!(join_description(["Blastline"], []), "Blastline");
        assert_eq!(join_description([], ["Cover"]), "Cover");
    }
}
