//! Schema-driven form layer: reconciles an endpoint's ordered field list
//! against whatever shape an item was actually stored in, and serializes
//! edits back into the storage shape.

pub mod image;
pub mod item_form;
pub mod reconcile;
pub mod validate;

pub use item_form::{FormMode, ItemForm};
pub use reconcile::{reconcile, ReconciledField, Reconciliation};
