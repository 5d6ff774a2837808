//! `stockpick-selection` — the ordered collection of chosen resource lines.
//!
//! The store is session-local: created empty (or seeded from an existing
//! reservation set) when the wizard dialog opens, mutated only through its
//! own operations, and handed back to the parent form on submit. Every
//! operation returns a fresh store value; hard uniqueness invariants (one
//! reservation per asset anywhere, one reference per lot within a line) are
//! enforced here, never silently bypassed.

pub mod grouping;
pub mod item;
pub mod line;
pub mod quantity;
pub mod store;

pub use grouping::{InventoryGroup, group_by_inventory};
pub use item::SelectionItem;
pub use line::SelectionLine;
pub use quantity::{MIN_FRACTIONAL_STEP, QuantityCheck, check_quantity, excess_stock, normalize_quantity};
pub use store::{ItemChange, SelectionStore};
