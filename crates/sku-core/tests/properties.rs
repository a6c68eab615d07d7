//! Property tests for ordering, normalisation, assembly and enumeration.

use std::collections::BTreeMap;

use proptest::prelude::*;

use sku_core::{
    Selections, assemble, enumerate_matrix, matrix_size, normalize_category, normalize_fields,
    ordered_field_names,
};
use sku_model::{
    Category, Extra, ExtrasMode, Field, FieldKind, FieldSpec, OrderedMap, RawCategory, RawField,
    RawItem, Settings, SkuOption,
};

fn separator() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("-".to_string()),
        Just("/".to_string()),
        Just(String::new()),
        Just(" | ".to_string()),
        Just("__".to_string()),
    ]
}

fn option() -> impl Strategy<Value = SkuOption> {
    ("[A-Z0-9]{0,2}", "[a-z]{0,4}", prop::option::of(0i64..4))
        .prop_map(|(code, name, order)| SkuOption::new(code, name, order))
}

fn field(idx: usize) -> impl Strategy<Value = Field> {
    let name = format!("F{idx}");
    (
        prop::option::of(0i64..4),
        prop::bool::weighted(0.2),
        prop::collection::vec(option(), 0..4),
    )
        .prop_map(move |(order, free_text, options)| {
            if free_text {
                Field::free_text(name.clone(), order)
            } else {
                Field::dropdown(name.clone(), order, options)
            }
        })
}

fn fields() -> impl Strategy<Value = Vec<Field>> {
    (0usize..4).prop_flat_map(|count| (0..count).map(field).collect::<Vec<_>>())
}

fn extras() -> impl Strategy<Value = Vec<Extra>> {
    prop::collection::vec((any::<bool>(), prop::option::of(0i64..3)), 0..5).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(idx, (has_code, order))| {
                let code = if has_code { format!("X{idx}") } else { String::new() };
                Extra::new(code, format!("extra {idx}"), order)
            })
            .collect()
    })
}

fn category() -> impl Strategy<Value = Category> {
    (
        fields(),
        extras(),
        separator(),
        prop_oneof![Just(ExtrasMode::Single), Just(ExtrasMode::Multiple)],
    )
        .prop_map(|(fields, extras, separator, mode)| Category {
            name: "Generated".to_string(),
            fields,
            extras,
            settings: Settings::default()
                .with_separator(separator)
                .with_extras_mode(mode),
        })
}

fn raw_item() -> impl Strategy<Value = RawItem> {
    ("[A-Z]{0,2}", "[a-z]{0,3}", prop::option::of(0i64..5)).prop_map(|(code, name, order)| {
        RawItem { code, name, order }
    })
}

fn raw_field() -> impl Strategy<Value = RawField> {
    prop_oneof![
        prop::collection::vec(raw_item(), 0..3).prop_map(RawField::Bare),
        (
            prop::option::of(0i64..5),
            any::<bool>(),
            prop::option::of(prop::collection::vec(raw_item(), 0..3)),
        )
            .prop_map(|(order, free_text, options)| RawField::Wrapped(FieldSpec {
                order,
                kind: if free_text {
                    FieldKind::FreeText
                } else {
                    FieldKind::Dropdown
                },
                options,
            })),
    ]
}

fn raw_fields() -> impl Strategy<Value = OrderedMap<RawField>> {
    prop::collection::vec(raw_field(), 0..5).prop_map(|fields| {
        fields
            .into_iter()
            .enumerate()
            .map(|(idx, field)| (format!("F{idx}"), field))
            .collect()
    })
}

proptest! {
    #[test]
    fn normalization_is_idempotent(fields in raw_fields()) {
        let mut once = fields.clone();
        normalize_fields(&mut once);
        let mut twice = once.clone();
        normalize_fields(&mut twice);
        prop_assert_eq!(&once, &twice);
        prop_assert!(once.values().all(|field| matches!(field, RawField::Wrapped(_))));

        let from_raw = RawCategory {
            fields,
            ..RawCategory::default()
        };
        let from_normalized = RawCategory {
            fields: once,
            ..RawCategory::default()
        };
        prop_assert_eq!(
            normalize_category("C", from_raw),
            normalize_category("C", from_normalized)
        );
    }

    #[test]
    fn distinct_orders_sort_ascending(
        fields in prop::collection::hash_set(-50i64..50, 1..6)
            .prop_map(|orders| {
                orders
                    .into_iter()
                    .map(|order| Field::free_text(format!("O{order}"), Some(order)))
                    .collect::<Vec<_>>()
            })
            .prop_shuffle()
    ) {
        let mut expected: Vec<(i64, String)> = fields
            .iter()
            .map(|field| (field.order.unwrap_or_default(), field.name.clone()))
            .collect();
        expected.sort();
        let expected: Vec<&str> = expected.iter().map(|(_, name)| name.as_str()).collect();
        prop_assert_eq!(ordered_field_names(&fields), expected);
    }

    #[test]
    fn assembled_skus_never_misplace_separators(
        category in category(),
        codes in prop::collection::vec("[A-Z0-9]{0,3}", 4),
        picks in prop::collection::vec(any::<bool>(), 5),
    ) {
        let selections: Selections = category
            .fields
            .iter()
            .zip(codes)
            .map(|(field, code)| (field.name.clone(), code))
            .collect();
        let chosen: Vec<&Extra> = category
            .extras
            .iter()
            .zip(picks)
            .filter(|(_, pick)| *pick)
            .map(|(extra, _)| extra)
            .collect();
        let sku = assemble(&category, &selections, &chosen);
        let separator = category.settings.separator.as_str();
        if !separator.is_empty() {
            prop_assert!(!sku.starts_with(separator), "leading separator in {sku:?}");
            prop_assert!(!sku.ends_with(separator), "trailing separator in {sku:?}");
            let doubled = format!("{separator}{separator}");
            prop_assert!(!sku.contains(&doubled), "doubled separator in {sku:?}");
        }
    }

    #[test]
    fn matrix_cardinality_matches_size_law(category in category()) {
        let core: u64 = category
            .fields
            .iter()
            .map(|field| field.options().len().max(1) as u64)
            .product();
        let valid = category.extras.iter().filter(|extra| !extra.code.is_empty()).count();
        let extras = match category.settings.extras_mode {
            ExtrasMode::Single => valid as u64 + 1,
            ExtrasMode::Multiple => 1u64 << valid,
        };
        let rows = enumerate_matrix(&category);
        prop_assert_eq!(rows.len() as u64, core * extras);
        prop_assert_eq!(matrix_size(&category).rows(), Some(core * extras));
    }

    #[test]
    fn every_row_reassembles_identically(category in category()) {
        let by_code: BTreeMap<&str, &Extra> = category
            .extras
            .iter()
            .filter(|extra| !extra.code.is_empty())
            .map(|extra| (extra.code.as_str(), extra))
            .collect();
        for row in enumerate_matrix(&category) {
            let selections: Selections = row
                .fields
                .iter()
                .map(|cell| (cell.field.clone(), cell.code.clone()))
                .collect();
            let chosen: Vec<&Extra> = row
                .extras
                .iter()
                .map(|cell| by_code[cell.code.as_str()])
                .collect();
            prop_assert_eq!(assemble(&category, &selections, &chosen), row.sku);
        }
    }
}
