//! Enumeration of every SKU a category can produce.
//!
//! The matrix is the cartesian product of one dimension per field (in
//! resolver order) with the extras dimension. Dropdowns with options
//! contribute their options; free-text fields and empty dropdowns
//! contribute a single empty placeholder, so every category yields at
//! least one base combination.
//!
//! Rows are produced lazily by [`MatrixIter`]; [`matrix_size`] gives the
//! row count up front so callers can refuse oversized exports before
//! iterating.

use sku_model::{Category, Extra, ExtrasMode, FieldInput};
use tracing::debug;

use crate::assemble::{attach_extras, concat_extras, join_base, join_description};
use crate::ordering::{ordered_extras, ordered_fields, ordered_options};

/// One field's value within a matrix row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCell {
    pub field: String,
    pub code: String,
    pub label: String,
}

/// One chosen extra within a matrix row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraCell {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixRow {
    pub category: String,
    pub sku: String,
    pub description: String,
    /// Per-field values in resolver order, placeholders included.
    pub fields: Vec<FieldCell>,
    /// Chosen extras in extra order.
    pub extras: Vec<ExtraCell>,
}

impl MatrixRow {
    /// Concatenated code of the chosen extras.
    pub fn extras_code(&self) -> String {
        concat_extras(self.extras.iter().map(|extra| extra.code.as_str()))
    }

    pub fn field_code(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|cell| cell.field == field)
            .map(|cell| cell.code.as_str())
    }
}

/// Row count of a category's matrix, split into its two factors.
///
/// A factor is `None` when it does not fit in a `u64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixSize {
    pub core: Option<u64>,
    pub extras: Option<u64>,
}

impl MatrixSize {
    /// Total rows, or `None` on overflow.
    pub fn rows(&self) -> Option<u64> {
        self.core?.checked_mul(self.extras?)
    }
}

/// Compute the matrix size without enumerating it.
pub fn matrix_size(category: &Category) -> MatrixSize {
    let core = category
        .fields
        .iter()
        .map(|field| field.options().len().max(1) as u64)
        .try_fold(1u64, u64::checked_mul);
    let valid = valid_extras(category).len();
    let extras = match category.settings.extras_mode {
        ExtrasMode::Single => (valid as u64).checked_add(1),
        ExtrasMode::Multiple => u32::try_from(valid)
            .ok()
            .and_then(|count| 2u64.checked_pow(count)),
    };
    MatrixSize { core, extras }
}

/// Materialise the whole matrix.
///
/// Callers should check [`matrix_size`] first: in multiple-extras mode the
/// row count doubles with every extra.
pub fn enumerate_matrix(category: &Category) -> Vec<MatrixRow> {
    let rows: Vec<MatrixRow> = MatrixIter::new(category).collect();
    debug!(category = %category.name, rows = rows.len(), "enumerated matrix");
    rows
}

/// Extras that can take part in a SKU (non-empty code), in extra order.
fn valid_extras(category: &Category) -> Vec<&Extra> {
    ordered_extras(category)
        .into_iter()
        .filter(|extra| !extra.code.is_empty())
        .collect()
}

struct Dimension {
    field: String,
    choices: Vec<Choice>,
}

struct Choice {
    code: String,
    label: String,
}

/// Lazy row iterator; the core combination varies slowest, the extras
/// combination fastest.
pub struct MatrixIter<'a> {
    category: &'a Category,
    dimensions: Vec<Dimension>,
    extras: Vec<&'a Extra>,
    core: Option<Vec<usize>>,
    combinations: ExtrasCombinations,
}

impl<'a> MatrixIter<'a> {
    pub fn new(category: &'a Category) -> Self {
        let dimensions: Vec<Dimension> = ordered_fields(&category.fields)
            .into_iter()
            .map(|field| {
                let choices = match &field.input {
                    FieldInput::Dropdown(options) if !options.is_empty() => {
                        ordered_options(field)
                            .into_iter()
                            .map(|option| Choice {
                                code: option.code.clone(),
                                label: option.name.clone(),
                            })
                            .collect()
                    }
                    _ => vec![Choice {
                        code: String::new(),
                        label: String::new(),
                    }],
                };
                Dimension {
                    field: field.name.clone(),
                    choices,
                }
            })
            .collect();
        let extras = valid_extras(category);
        let combinations = ExtrasCombinations::new(category.settings.extras_mode, extras.len());
        Self {
            category,
            core: Some(vec![0; dimensions.len()]),
            dimensions,
            extras,
            combinations,
        }
    }

    /// Step the core odometer; the last dimension turns fastest.
    fn advance_core(&mut self) {
        let Some(indices) = self.core.as_mut() else {
            return;
        };
        for (idx, dimension) in self.dimensions.iter().enumerate().rev() {
            indices[idx] += 1;
            if indices[idx] < dimension.choices.len() {
                return;
            }
            indices[idx] = 0;
        }
        self.core = None;
    }

    fn build_row(&self, core: &[usize], chosen: &[usize]) -> MatrixRow {
        let separator = self.category.settings.separator.as_str();
        let fields: Vec<FieldCell> = self
            .dimensions
            .iter()
            .zip(core)
            .map(|(dimension, &idx)| {
                let choice = &dimension.choices[idx];
                FieldCell {
                    field: dimension.field.clone(),
                    code: choice.code.clone(),
                    label: choice.label.clone(),
                }
            })
            .collect();
        let extras: Vec<ExtraCell> = chosen
            .iter()
            .map(|&idx| ExtraCell {
                code: self.extras[idx].code.clone(),
                name: self.extras[idx].name.clone(),
            })
            .collect();

        let base = join_base(separator, fields.iter().map(|cell| cell.code.as_str()));
        let extras_code = concat_extras(extras.iter().map(|extra| extra.code.as_str()));
        let sku = attach_extras(separator, &base, &extras_code);
        let description = join_description(
            fields.iter().map(|cell| cell.label.as_str()),
            extras.iter().map(|extra| extra.name.as_str()),
        );
        MatrixRow {
            category: self.category.name.clone(),
            sku,
            description,
            fields,
            extras,
        }
    }
}

impl Iterator for MatrixIter<'_> {
    type Item = MatrixRow;

    fn next(&mut self) -> Option<MatrixRow> {
        loop {
            let core = self.core.clone()?;
            if let Some(chosen) = self.combinations.next() {
                return Some(self.build_row(&core, &chosen));
            }
            self.advance_core();
            self.combinations.reset();
        }
    }
}

/// Index sets over the valid extras.
///
/// Single mode yields the empty set then each extra alone. Multiple mode
/// yields every subset by increasing size, lexicographically within a size.
struct ExtrasCombinations {
    mode: ExtrasMode,
    count: usize,
    current: Option<Vec<usize>>,
    started: bool,
}

impl ExtrasCombinations {
    fn new(mode: ExtrasMode, count: usize) -> Self {
        Self {
            mode,
            count,
            current: Some(Vec::new()),
            started: false,
        }
    }

    fn reset(&mut self) {
        self.current = Some(Vec::new());
        self.started = false;
    }

    fn step(&self, current: &[usize]) -> Option<Vec<usize>> {
        let n = self.count;
        match self.mode {
            ExtrasMode::Single => match current {
                [] if n > 0 => Some(vec![0]),
                [idx] if idx + 1 < n => Some(vec![idx + 1]),
                _ => None,
            },
            ExtrasMode::Multiple => {
                let size = current.len();
                let mut next = current.to_vec();
                // Rightmost position that can still move right.
                if let Some(pos) = (0..size).rev().find(|&pos| next[pos] < n - size + pos) {
                    next[pos] += 1;
                    for later in pos + 1..size {
                        next[later] = next[later - 1] + 1;
                    }
                    return Some(next);
                }
                (size < n).then(|| (0..=size).collect())
            }
        }
    }
}

impl Iterator for ExtrasCombinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.started {
            let following = self.current.as_deref().and_then(|current| self.step(current));
            self.current = following;
        } else {
            self.started = true;
        }
        self.current.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn combos(mode: ExtrasMode, count: usize) -> Vec<Vec<usize>> {
        ExtrasCombinations::new(mode, count).collect()
    }

    #[test]
    fn multiple_mode_walks_subsets_by_size() {
        assert_eq!(
            combos(ExtrasMode::Multiple, 3),
            vec![
                vec![],
                vec![0],
                vec![1],
                vec![2],
                vec![0, 1],
                vec![0, 2],
                vec![1, 2],
                vec![0, 1, 2],
            ]
        );
        assert_eq!(combos(ExtrasMode::Multiple, 0), vec![Vec::<usize>::new()]);
    }

    #[test]
    fn single_mode_is_none_then_each() {
        assert_eq!(
            combos(ExtrasMode::Single, 2),
            vec![vec![], vec![0], vec![1]]
        );
        assert_eq!(combos(ExtrasMode::Single, 0), vec![Vec::<usize>::new()]);
    }

    #[test]
    fn reset_restarts_from_empty_set() {
        let mut combinations = ExtrasCombinations::new(ExtrasMode::Multiple, 1);
        assert_eq!(combinations.by_ref().count(), 2);
        combinations.reset();
        assert_eq!(combinations.next(), Some(vec![]));
    }

    #[test]
    fn size_overflow_is_reported() {
        let mut category = Category::new("Huge");
        for idx in 0..70 {
            category
                .extras
                .push(Extra::new(format!("E{idx}"), format!("Extra {idx}"), None));
        }
        let size = matrix_size(&category);
        assert_eq!(size.core, Some(1));
        assert_eq!(size.extras, None);
        assert_eq!(size.rows(), None);
    }
}
