//! Catalog provider boundary: on-demand product loading.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;

use stockpick_core::InventoryId;

use crate::product::Product;

/// Catalog fetch failure.
///
/// These never corrupt wizard state; the wizard caches the failure per
/// inventory and the user re-triggers by re-selecting the inventory.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("unknown inventory: {0}")]
    UnknownInventory(InventoryId),

    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// Loads the full nested product/lot/asset graph for one inventory.
///
/// Loads are idempotent reads; no pagination contract is assumed. Callers
/// discard stale responses instead of cancelling in-flight loads.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn load_products(&self, inventory_id: InventoryId)
    -> Result<Vec<Product>, CatalogError>;
}

/// In-memory provider for tests and local development.
///
/// Failure injection: inventories registered through [`fail_with`] reject the
/// next load with the given message, then revert to serving normally —
/// enough to exercise the retry-on-re-entry path.
///
/// [`fail_with`]: InMemoryCatalog::fail_with
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: HashMap<InventoryId, Vec<Product>>,
    failures: Mutex<HashMap<InventoryId, String>>,
    load_count: Mutex<HashMap<InventoryId, u32>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(mut self, inventory_id: InventoryId, products: Vec<Product>) -> Self {
        self.products.insert(inventory_id, products);
        self
    }

    /// Make the next load for `inventory_id` fail with `message`.
    pub fn fail_with(&self, inventory_id: InventoryId, message: impl Into<String>) {
        // A poisoned lock just loses the injection; only reachable after a
        // panic elsewhere in the test.
        if let Ok(mut failures) = self.failures.lock() {
            failures.insert(inventory_id, message.into());
        }
    }

    /// How many loads were served (successes and failures) for `inventory_id`.
    pub fn loads_for(&self, inventory_id: InventoryId) -> u32 {
        self.load_count
            .lock()
            .map(|counts| counts.get(&inventory_id).copied().unwrap_or(0))
            .unwrap_or(0)
    }
}

#[async_trait]
impl CatalogProvider for InMemoryCatalog {
    async fn load_products(
        &self,
        inventory_id: InventoryId,
    ) -> Result<Vec<Product>, CatalogError> {
        {
            let mut counts = self
                .load_count
                .lock()
                .map_err(|_| CatalogError::Unavailable("lock poisoned".to_string()))?;
            *counts.entry(inventory_id).or_insert(0) += 1;
        }

        let injected = self
            .failures
            .lock()
            .map_err(|_| CatalogError::Unavailable("lock poisoned".to_string()))?
            .remove(&inventory_id);
        if let Some(message) = injected {
            tracing::debug!(%inventory_id, "in-memory catalog serving injected failure");
            return Err(CatalogError::Unavailable(message));
        }

        match self.products.get(&inventory_id) {
            Some(products) => Ok(products.clone()),
            None => Err(CatalogError::UnknownInventory(inventory_id)),
        }
    }
}
