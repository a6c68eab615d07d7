//! Turning one user selection into a `(code, label)` pair.

use sku_model::{Category, Extra, ExtrasMode, Field, FieldInput, SkuOption};

use crate::error::SelectionError;
use crate::ordering::{ordered_options, sort_by_order};

/// What the user picked for a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<'a> {
    /// A dropdown option, by identity.
    Option(&'a SkuOption),
    /// An option code for dropdowns, or the typed text for free-text fields.
    Value(&'a str),
}

/// Encoded contribution of one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Encoded {
    pub code: String,
    pub label: String,
}

impl Encoded {
    fn from_option(option: &SkuOption) -> Self {
        Self {
            code: option.code.clone(),
            label: option.name.clone(),
        }
    }
}

/// Encode a selection for `field`.
///
/// Free text is accepted verbatim, including the empty string, and becomes
/// both code and label.
pub fn encode(field: &Field, selection: Selection<'_>) -> Result<Encoded, SelectionError> {
    match (&field.input, selection) {
        (FieldInput::FreeText, Selection::Value(text)) => Ok(Encoded {
            code: text.to_string(),
            label: text.to_string(),
        }),
        (FieldInput::FreeText, Selection::Option(_)) => Err(SelectionError::KindMismatch {
            field: field.name.clone(),
        }),
        (FieldInput::Dropdown(options), _) if options.is_empty() => {
            Err(SelectionError::NoOptionsAvailable {
                field: field.name.clone(),
            })
        }
        (FieldInput::Dropdown(options), Selection::Option(chosen)) => options
            .iter()
            .find(|option| *option == chosen)
            .map(Encoded::from_option)
            .ok_or_else(|| SelectionError::UnknownOption {
                field: field.name.clone(),
                value: chosen.code.clone(),
            }),
        (FieldInput::Dropdown(_), Selection::Value(code)) => ordered_options(field)
            .into_iter()
            .find(|option| option.code == code)
            .map(Encoded::from_option)
            .ok_or_else(|| SelectionError::UnknownOption {
                field: field.name.clone(),
                value: code.to_string(),
            }),
    }
}

/// The value a picker shows before the user touches it: the first option
/// in display order, or empty text.
pub fn default_selection(field: &Field) -> Result<Encoded, SelectionError> {
    match &field.input {
        FieldInput::FreeText => Ok(Encoded::default()),
        FieldInput::Dropdown(_) => ordered_options(field)
            .first()
            .map(|option| Encoded::from_option(option))
            .ok_or_else(|| SelectionError::NoOptionsAvailable {
                field: field.name.clone(),
            }),
    }
}

/// Resolve extra codes against a category, enforcing its extras mode.
///
/// Duplicated codes are collapsed. The result is in extra order, not
/// request order.
pub fn select_extras<'a>(
    category: &'a Category,
    codes: &[&str],
) -> Result<Vec<&'a Extra>, SelectionError> {
    let mut chosen: Vec<&Extra> = Vec::new();
    for code in codes {
        let extra = category
            .extras
            .iter()
            .find(|extra| !extra.code.is_empty() && extra.code == *code)
            .ok_or_else(|| SelectionError::UnknownExtra {
                category: category.name.clone(),
                code: (*code).to_string(),
            })?;
        if !chosen.iter().any(|existing| std::ptr::eq(*existing, extra)) {
            chosen.push(extra);
        }
    }
    if category.settings.extras_mode == ExtrasMode::Single && chosen.len() > 1 {
        return Err(SelectionError::TooManyExtras {
            category: category.name.clone(),
            count: chosen.len(),
        });
    }
    Ok(sort_by_order(&chosen).into_iter().copied().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sku_model::Settings;

    fn brand() -> Field {
        Field::dropdown(
            "Brand",
            Some(1),
            vec![
                SkuOption::new("CL", "Clemco", Some(2)),
                SkuOption::new("BL", "Blastline", Some(1)),
            ],
        )
    }

    #[test]
    fn dropdown_by_code_and_identity() {
        let field = brand();
        let by_code = encode(&field, Selection::Value("CL")).unwrap();
        assert_eq!(by_code.code, "CL");
        assert_eq!(by_code.label, "Clemco");

        let option = &field.options()[1];
        let by_identity = encode(&field, Selection::Option(option)).unwrap();
        assert_eq!(by_identity.label, "Blastline");

        let foreign = SkuOption::new("XX", "Other", None);
        assert_eq!(
            encode(&field, Selection::Option(&foreign)),
            Err(SelectionError::UnknownOption {
                field: "Brand".to_string(),
                value: "XX".to_string(),
            })
        );
    }

    #[test]
    fn empty_dropdown_signals_no_options() {
        let field = Field::dropdown("Thread", Some(1), vec![]);
        assert_eq!(
            encode(&field, Selection::Value("anything")),
            Err(SelectionError::NoOptionsAvailable {
                field: "Thread".to_string()
            })
        );
        assert!(default_selection(&field).is_err());
    }

    #[test]
    fn free_text_is_verbatim() {
        let field = Field::free_text("Part Number", Some(3));
        let encoded = encode(&field, Selection::Value(" a/b ")).unwrap();
        assert_eq!(encoded.code, " a/b ");
        assert_eq!(encoded.label, " a/b ");
        assert_eq!(encode(&field, Selection::Value("")).unwrap(), Encoded::default());
    }

    #[test]
    fn default_selection_uses_first_ordered_option() {
        assert_eq!(default_selection(&brand()).unwrap().code, "BL");
    }

    #[test]
    fn select_extras_enforces_single_mode() {
        let category = Category::new("Blast Machine")
            .with_settings(Settings::default().with_extras_mode(ExtrasMode::Single))
            .with_extra(Extra::new("W", "Water Separator", Some(2)))
            .with_extra(Extra::new("R", "Remote Control", Some(1)));

        let one = select_extras(&category, &["W"]).unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(
            select_extras(&category, &["W", "R"]),
            Err(SelectionError::TooManyExtras {
                category: "Blast Machine".to_string(),
                count: 2,
            })
        );
        assert_eq!(select_extras(&category, &["W", "W"]).unwrap().len(), 1);
        assert!(matches!(
            select_extras(&category, &["Z"]),
            Err(SelectionError::UnknownExtra { .. })
        ));
    }

    #[test]
    fn select_extras_returns_extra_order() {
        let category = Category::new("Blast Machine")
            .with_extra(Extra::new("W", "Water Separator", Some(2)))
            .with_extra(Extra::new("R", "Remote Control", Some(1)));
        let codes: Vec<&str> = select_extras(&category, &["W", "R"])
            .unwrap()
            .into_iter()
            .map(|extra| extra.code.as_str())
            .collect();
        assert_eq!(codes, vec!["R", "W"]);
    }
}
