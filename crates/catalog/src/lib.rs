//! `stockpick-catalog` — the read-only catalog the wizard selects from.
//!
//! Inventories, products, lots, and assets form a snapshot that is treated as
//! immutable for the wizard's lifetime; the only asynchronous surface is the
//! per-inventory product load behind [`CatalogProvider`].

pub mod inventory;
pub mod product;
pub mod provider;

pub use inventory::{Inventory, ProductCounts};
pub use product::{Asset, AssetStatus, Lot, ManagementType, Product, SelectionPurpose};
pub use provider::{CatalogError, CatalogProvider, InMemoryCatalog};
