//! The full configuration snapshot.

use crate::category::Category;
use crate::error::{ModelError, Result};
use crate::raw::RawConfiguration;

/// Every configured category, in document order.
///
/// Assembly and enumeration take a `&Category` out of an inventory; edits go
/// through the methods here and produce the next snapshot to persist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    categories: Vec<Category>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_categories(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|category| category.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Category> {
        self.categories
            .iter_mut()
            .find(|category| category.name == name)
    }

    /// Look a category up, failing with [`ModelError::UnknownCategory`].
    pub fn require(&self, name: &str) -> Result<&Category> {
        self.get(name).ok_or_else(|| ModelError::UnknownCategory {
            name: name.to_string(),
        })
    }

    /// Create an empty category with default settings.
    pub fn add_category(&mut self, name: &str) -> Result<&mut Category> {
        self.insert(Category::new(name))
    }

    /// Append a fully built category; names are unique.
    pub fn insert(&mut self, category: Category) -> Result<&mut Category> {
        if category.name.trim().is_empty() {
            return Err(ModelError::EmptyCategoryName);
        }
        if self.get(&category.name).is_some() {
            return Err(ModelError::DuplicateCategory {
                name: category.name,
            });
        }
        self.categories.push(category);
        let last = self.categories.len() - 1;
        Ok(&mut self.categories[last])
    }

    /// Delete a category with all its fields and extras.
    pub fn remove_category(&mut self, name: &str) -> Result<Category> {
        let idx = self
            .categories
            .iter()
            .position(|category| category.name == name)
            .ok_or_else(|| ModelError::UnknownCategory {
                name: name.to_string(),
            })?;
        Ok(self.categories.remove(idx))
    }

    /// Canonical on-disk form of the whole snapshot.
    pub fn to_raw(&self) -> RawConfiguration {
        RawConfiguration {
            inventory: self
                .categories
                .iter()
                .map(|category| (category.name.clone(), category.to_raw()))
                .collect(),
        }
    }
}
