//! Factory-default configuration used before anything has been saved.

use sku_model::{Category, Extra, ExtrasMode, Field, Inventory, Settings, SkuOption};

const BLAST_MACHINE_FIELDS: &[(&str, &[(&str, &str)])] = &[
    ("Brand", &[("BL", "Blastline"), ("CL", "Clemco")]),
    ("Capacity", &[("20", "1080"), ("24", "1440")]),
    ("Configuration", &[("C", "Contractor"), ("S", "Standard")]),
    (
        "Certification",
        &[("ST", "Standard 3rd Party"), ("CE", "CE Certified")],
    ),
    ("Valve", &[("F", "Flat Sand"), ("T", "Thompson")]),
    ("Screen / Cover", &[("1", "Screen + Cover"), ("0", "None")]),
];

const BLAST_MACHINE_EXTRAS: &[(&str, &str)] = &[
    ("R", "Remote Control"),
    ("W", "Water Separator"),
    ("S", "Silence Kit"),
    ("C", "Cover"),
    ("Sc", "Screen"),
];

/// The "Blast Machine" starter category.
pub fn blast_machine() -> Category {
    let mut category = Category::new("Blast Machine")
        .with_settings(Settings::default().with_extras_mode(ExtrasMode::Multiple));
    for (position, (name, options)) in BLAST_MACHINE_FIELDS.iter().enumerate() {
        let options = options
            .iter()
            .zip(1..)
            .map(|((code, label), order)| SkuOption::new(*code, *label, Some(order)))
            .collect();
        category
            .fields
            .push(Field::dropdown(*name, Some(position as i64 + 1), options));
    }
    category.extras = BLAST_MACHINE_EXTRAS
        .iter()
        .zip(1..)
        .map(|((code, name), order)| Extra::new(*code, *name, Some(order)))
        .collect();
    category
}

pub fn factory_default() -> Inventory {
    Inventory::from_categories(vec![blast_machine()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_default_shape() {
        let inventory = factory_default();
        let category = inventory.get("Blast Machine").unwrap();
        assert_eq!(category.fields.len(), 6);
        assert_eq!(category.extras.len(), 5);
        assert_eq!(category.fields[5].name, "Screen / Cover");
        assert_eq!(category.fields[5].order, Some(6));
        assert_eq!(category.extras[4].code, "Sc");
        assert_eq!(category.settings.separator, "-");
    }
}
