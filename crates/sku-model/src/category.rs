//! Canonical in-memory configuration.

use crate::error::{ModelError, Result};
use crate::raw::{ExtrasMode, FieldKind, FieldSpec, RawCategory, RawField, RawItem, RawSettings};

/// Separator used when a category does not configure one.
pub const DEFAULT_SEPARATOR: &str = "-";

/// A named product line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    /// Fields in document order; see the ordering resolver for SKU order.
    pub fields: Vec<Field>,
    pub extras: Vec<Extra>,
    pub settings: Settings,
}

/// One attribute dimension of a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub order: Option<i64>,
    pub input: FieldInput,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    Dropdown(Vec<SkuOption>),
    FreeText,
}

/// A selectable value within a dropdown field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SkuOption {
    pub code: String,
    pub name: String,
    pub order: Option<i64>,
}

/// An optional add-on, scoped to the category.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Extra {
    pub code: String,
    pub name: String,
    pub order: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub separator: String,
    pub extras_mode: ExtrasMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            extras_mode: ExtrasMode::default(),
        }
    }
}

impl Settings {
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_extras_mode(mut self, mode: ExtrasMode) -> Self {
        self.extras_mode = mode;
        self
    }
}

impl SkuOption {
    pub fn new(code: impl Into<String>, name: impl Into<String>, order: Option<i64>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            order,
        }
    }

    /// Display label used by pickers, e.g. `BL: Blastline`.
    pub fn label(&self) -> String {
        format!("{}: {}", self.code, self.name)
    }
}

impl Extra {
    pub fn new(code: impl Into<String>, name: impl Into<String>, order: Option<i64>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            order,
        }
    }

    pub fn label(&self) -> String {
        format!("{}: {}", self.code, self.name)
    }
}

impl Field {
    pub fn dropdown(name: impl Into<String>, order: Option<i64>, options: Vec<SkuOption>) -> Self {
        Self {
            name: name.into(),
            order,
            input: FieldInput::Dropdown(options),
        }
    }

    pub fn free_text(name: impl Into<String>, order: Option<i64>) -> Self {
        Self {
            name: name.into(),
            order,
            input: FieldInput::FreeText,
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self.input {
            FieldInput::Dropdown(_) => FieldKind::Dropdown,
            FieldInput::FreeText => FieldKind::FreeText,
        }
    }

    /// Options in document order; empty for free-text fields.
    pub fn options(&self) -> &[SkuOption] {
        match &self.input {
            FieldInput::Dropdown(options) => options,
            FieldInput::FreeText => &[],
        }
    }

    /// Append a dropdown option.
    pub fn add_option(&mut self, option: SkuOption) -> Result<()> {
        match &mut self.input {
            FieldInput::Dropdown(options) => {
                options.push(option);
                Ok(())
            }
            FieldInput::FreeText => Err(ModelError::FreeTextField {
                field: self.name.clone(),
            }),
        }
    }

    /// First option carrying `code`, for editing.
    pub fn option_mut(&mut self, code: &str) -> Result<&mut SkuOption> {
        let field = &self.name;
        match &mut self.input {
            FieldInput::Dropdown(options) => options
                .iter_mut()
                .find(|option| option.code == code)
                .ok_or_else(|| ModelError::UnknownOption {
                    field: field.clone(),
                    code: code.to_string(),
                }),
            FieldInput::FreeText => Err(ModelError::FreeTextField {
                field: field.clone(),
            }),
        }
    }

    /// Remove the first option carrying `code`.
    pub fn remove_option(&mut self, code: &str) -> Result<SkuOption> {
        let field = &self.name;
        match &mut self.input {
            FieldInput::Dropdown(options) => {
                let idx = options
                    .iter()
                    .position(|option| option.code == code)
                    .ok_or_else(|| ModelError::UnknownOption {
                        field: field.clone(),
                        code: code.to_string(),
                    })?;
                Ok(options.remove(idx))
            }
            FieldInput::FreeText => Err(ModelError::FreeTextField {
                field: field.clone(),
            }),
        }
    }

    /// Build a field from an already-normalised wrapper.
    pub fn from_spec(name: impl Into<String>, spec: FieldSpec) -> Self {
        let input = match spec.kind {
            FieldKind::FreeText => FieldInput::FreeText,
            FieldKind::Dropdown => FieldInput::Dropdown(
                spec.options
                    .unwrap_or_default()
                    .into_iter()
                    .map(SkuOption::from)
                    .collect(),
            ),
        };
        Self {
            name: name.into(),
            order: spec.order,
            input,
        }
    }

    pub fn to_spec(&self) -> FieldSpec {
        match &self.input {
            FieldInput::Dropdown(options) => FieldSpec {
                order: self.order,
                kind: FieldKind::Dropdown,
                options: Some(options.iter().map(RawItem::from).collect()),
            },
            FieldInput::FreeText => FieldSpec {
                order: self.order,
                kind: FieldKind::FreeText,
                options: None,
            },
        }
    }
}

impl Category {
    /// An empty category with default settings.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            extras: Vec::new(),
            settings: Settings::default(),
        }
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_extra(mut self, extra: Extra) -> Self {
        self.extras.push(extra);
        self
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Look a field up for editing, failing with [`ModelError::UnknownField`].
    pub fn field_mut(&mut self, name: &str) -> Result<&mut Field> {
        let category = &self.name;
        self.fields
            .iter_mut()
            .find(|field| field.name == name)
            .ok_or_else(|| ModelError::UnknownField {
                category: category.clone(),
                field: name.to_string(),
            })
    }

    /// First extra carrying `code`.
    pub fn extra(&self, code: &str) -> Option<&Extra> {
        self.extras.iter().find(|extra| extra.code == code)
    }

    pub fn extra_mut(&mut self, code: &str) -> Result<&mut Extra> {
        let category = &self.name;
        self.extras
            .iter_mut()
            .find(|extra| extra.code == code)
            .ok_or_else(|| ModelError::UnknownExtra {
                category: category.clone(),
                code: code.to_string(),
            })
    }

    /// Remove the first extra carrying `code`.
    pub fn remove_extra(&mut self, code: &str) -> Result<Extra> {
        let idx = self
            .extras
            .iter()
            .position(|extra| extra.code == code)
            .ok_or_else(|| ModelError::UnknownExtra {
                category: self.name.clone(),
                code: code.to_string(),
            })?;
        Ok(self.extras.remove(idx))
    }

    /// Append a new field; names are unique within a category.
    pub fn add_field(&mut self, field: Field) -> Result<&mut Field> {
        if field.name.trim().is_empty() {
            return Err(ModelError::EmptyFieldName);
        }
        if self.field(&field.name).is_some() {
            return Err(ModelError::DuplicateField {
                category: self.name.clone(),
                field: field.name,
            });
        }
        self.fields.push(field);
        let last = self.fields.len() - 1;
        Ok(&mut self.fields[last])
    }

    pub fn remove_field(&mut self, name: &str) -> Result<Field> {
        let idx = self
            .fields
            .iter()
            .position(|field| field.name == name)
            .ok_or_else(|| ModelError::UnknownField {
                category: self.name.clone(),
                field: name.to_string(),
            })?;
        Ok(self.fields.remove(idx))
    }

    /// Whether the category has anything to enumerate.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.extras.is_empty()
    }

    /// Canonical on-disk form (every field wrapped, separator explicit).
    pub fn to_raw(&self) -> RawCategory {
        RawCategory {
            settings: RawSettings {
                separator: Some(self.settings.separator.clone()),
                extras_mode: self.settings.extras_mode,
            },
            fields: self
                .fields
                .iter()
                .map(|field| (field.name.clone(), RawField::Wrapped(field.to_spec())))
                .collect(),
            extras: self.extras.iter().map(RawItem::from).collect(),
        }
    }
}

impl From<RawItem> for SkuOption {
    fn from(item: RawItem) -> Self {
        Self {
            code: item.code,
            name: item.name,
            order: item.order,
        }
    }
}

impl From<RawItem> for Extra {
    fn from(item: RawItem) -> Self {
        Self {
            code: item.code,
            name: item.name,
            order: item.order,
        }
    }
}

impl From<&SkuOption> for RawItem {
    fn from(option: &SkuOption) -> Self {
        Self {
            code: option.code.clone(),
            name: option.name.clone(),
            order: option.order,
        }
    }
}

impl From<&Extra> for RawItem {
    fn from(extra: &Extra) -> Self {
        Self {
            code: extra.code.clone(),
            name: extra.name.clone(),
            order: extra.order,
        }
    }
}

impl From<RawSettings> for Settings {
    fn from(raw: RawSettings) -> Self {
        Self {
            separator: raw
                .separator
                .unwrap_or_else(|| DEFAULT_SEPARATOR.to_string()),
            extras_mode: raw.extras_mode,
        }
    }
}
