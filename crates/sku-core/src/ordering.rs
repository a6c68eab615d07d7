//! Deterministic ordering of fields, options and extras.
//!
//! Everything sorts ascending by its `order` attribute. Items without one
//! sort after every explicit value, and ties keep document order (the sort
//! is stable and the model stores every list as a `Vec`).

use sku_model::{Category, Extra, Field, SkuOption};

/// Sort key for items that carry no explicit `order`.
pub const DEFAULT_ORDER: i64 = i64::MAX;

/// Anything with an optional `order` attribute.
pub trait Ordered {
    fn order(&self) -> Option<i64>;

    fn sort_key(&self) -> i64 {
        self.order().unwrap_or(DEFAULT_ORDER)
    }
}

impl Ordered for Field {
    fn order(&self) -> Option<i64> {
        self.order
    }
}

impl Ordered for SkuOption {
    fn order(&self) -> Option<i64> {
        self.order
    }
}

impl Ordered for Extra {
    fn order(&self) -> Option<i64> {
        self.order
    }
}

impl<T: Ordered + ?Sized> Ordered for &T {
    fn order(&self) -> Option<i64> {
        (**self).order()
    }
}

/// Stable ascending sort by `order`.
pub fn sort_by_order<T: Ordered>(items: &[T]) -> Vec<&T> {
    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by_key(|item| item.sort_key());
    sorted
}

pub fn ordered_fields(fields: &[Field]) -> Vec<&Field> {
    sort_by_order(fields)
}

/// Field names in SKU order.
pub fn ordered_field_names(fields: &[Field]) -> Vec<&str> {
    ordered_fields(fields)
        .into_iter()
        .map(|field| field.name.as_str())
        .collect()
}

/// A dropdown's options in display order; empty for free text.
pub fn ordered_options(field: &Field) -> Vec<&SkuOption> {
    sort_by_order(field.options())
}

pub fn ordered_extras(category: &Category) -> Vec<&Extra> {
    sort_by_order(&category.extras)
}
