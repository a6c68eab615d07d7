//! Schema normalisation at the load boundary.
//!
//! Fields arrive either as a bare option list (older documents) or as the
//! `{order, kind, options}` wrapper. Everything downstream sees only the
//! wrapper.

use sku_model::{
    Category, Extra, Field, FieldKind, FieldSpec, Inventory, OrderedMap, RawCategory,
    RawConfiguration, RawField, RawItem, Settings,
};
use tracing::debug;

/// Rewrite every bare option list into the wrapper, in place.
///
/// A bare list at (zero-based) position `n` becomes
/// `{order: n + 1, kind: dropdown, options: <list>}`. Wrapped values are
/// left untouched, so the pass is idempotent.
pub fn normalize_fields(fields: &mut OrderedMap<RawField>) {
    for (position, (_, field)) in fields.iter_mut().enumerate() {
        if let RawField::Bare(options) = field {
            let options = std::mem::take(options);
            *field = RawField::Wrapped(wrap_bare(position, options));
        }
    }
}

/// Canonical wrapper for the field at `position` in document order.
pub fn canonical_spec(position: usize, field: RawField) -> FieldSpec {
    match field {
        RawField::Wrapped(spec) => spec,
        RawField::Bare(options) => wrap_bare(position, options),
    }
}

fn wrap_bare(position: usize, options: Vec<RawItem>) -> FieldSpec {
    FieldSpec {
        order: Some(position as i64 + 1),
        kind: FieldKind::Dropdown,
        options: Some(options),
    }
}

/// Convert one raw category into its canonical form.
pub fn normalize_category(name: &str, raw: RawCategory) -> Category {
    let fields: Vec<Field> = raw
        .fields
        .into_iter()
        .enumerate()
        .map(|(position, (field_name, field))| {
            Field::from_spec(field_name, canonical_spec(position, field))
        })
        .collect();
    let extras: Vec<Extra> = raw.extras.into_iter().map(Extra::from).collect();
    debug!(
        category = %name,
        field_count = fields.len(),
        extra_count = extras.len(),
        "normalized category"
    );
    Category {
        name: name.to_string(),
        fields,
        extras,
        settings: Settings::from(raw.settings),
    }
}

/// Convert a whole configuration document.
pub fn load_inventory(raw: RawConfiguration) -> Inventory {
    let categories = raw
        .inventory
        .into_iter()
        .map(|(name, category)| normalize_category(&name, category))
        .collect();
    Inventory::from_categories(categories)
}
