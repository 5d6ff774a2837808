//! `stockpick-core` — shared foundation for the selection subsystem.
//!
//! This crate contains **pure** primitives (identifiers, the error taxonomy,
//! text matching helpers). No I/O, no async, no UI concerns.

pub mod error;
pub mod id;
pub mod text;

pub use error::{SelectionError, SelectionResult};
pub use id::{AssetId, InventoryId, LoadRequestId, LotId, ProductId};
pub use text::{cmp_names, normalized_contains};
