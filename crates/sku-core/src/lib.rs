//! SKU assembly and combinatorial matrix engine.
//!
//! Data flows one way: a raw configuration document is normalised
//! ([`normalize`]), fields are put in a deterministic order ([`ordering`]),
//! and then either a single selection is assembled into a SKU
//! ([`encode`], [`assemble`]) or every SKU of a category is enumerated
//! ([`matrix`]). Everything here is pure and synchronous.

pub mod assemble;
pub mod check;
pub mod encode;
pub mod error;
pub mod matrix;
pub mod normalize;
pub mod ordering;

pub use assemble::{Selections, assemble, attach_extras, join_base, join_description};
pub use check::{CheckOptions, CodePolicy, check_category, check_inventory};
pub use encode::{Encoded, Selection, default_selection, encode, select_extras};
pub use error::SelectionError;
pub use matrix::{
    ExtraCell, FieldCell, MatrixIter, MatrixRow, MatrixSize, enumerate_matrix, matrix_size,
};
pub use normalize::{load_inventory, normalize_category, normalize_fields};
pub use ordering::{
    DEFAULT_ORDER, Ordered, ordered_extras, ordered_field_names, ordered_fields, ordered_options,
    sort_by_order,
};
