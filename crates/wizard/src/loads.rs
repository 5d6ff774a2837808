//! Per-inventory product load cache with stale-response guarding.

use std::collections::HashMap;

use stockpick_catalog::Product;
use stockpick_core::{InventoryId, LoadRequestId};

/// A load the host must perform: fetch the inventory's products and feed the
/// outcome back with the same correlation id.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub request_id: LoadRequestId,
    pub inventory_id: InventoryId,
}

#[derive(Debug, Clone, PartialEq)]
enum LoadState {
    /// Request issued, outcome not yet applied.
    Loading(LoadRequestId),
    /// Products cached for the rest of the wizard session.
    Loaded(Vec<Product>),
    /// Last load failed; the message is surfaced inline. Not retried
    /// automatically — re-selecting the inventory issues a fresh request.
    Failed(String),
}

/// How a completion was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Products cached for the inventory.
    Applied(InventoryId),
    /// Failure cached for the inventory.
    Failed(InventoryId),
    /// Discarded: superseded correlation id, or the target inventory was no
    /// longer the live context.
    Stale,
}

/// Load bookkeeping for one wizard session, keyed by inventory id.
#[derive(Debug, Clone, Default)]
pub struct ProductLoads {
    states: HashMap<InventoryId, LoadState>,
}

impl ProductLoads {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn products(&self, inventory_id: InventoryId) -> Option<&[Product]> {
        match self.states.get(&inventory_id) {
            Some(LoadState::Loaded(products)) => Some(products),
            _ => None,
        }
    }

    pub fn is_loaded(&self, inventory_id: InventoryId) -> bool {
        matches!(self.states.get(&inventory_id), Some(LoadState::Loaded(_)))
    }

    pub fn is_loading(&self, inventory_id: InventoryId) -> bool {
        matches!(self.states.get(&inventory_id), Some(LoadState::Loading(_)))
    }

    pub fn failure(&self, inventory_id: InventoryId) -> Option<&str> {
        match self.states.get(&inventory_id) {
            Some(LoadState::Failed(message)) => Some(message),
            _ => None,
        }
    }

    /// Start a load for `inventory_id` unless one is pending or already done.
    ///
    /// A cached failure does not block: re-entry is the explicit re-trigger.
    pub(crate) fn begin(&mut self, inventory_id: InventoryId) -> Option<LoadRequest> {
        match self.states.get(&inventory_id) {
            Some(LoadState::Loaded(_)) | Some(LoadState::Loading(_)) => None,
            Some(LoadState::Failed(_)) | None => {
                let request_id = LoadRequestId::new();
                self.states.insert(inventory_id, LoadState::Loading(request_id));
                tracing::debug!(%inventory_id, %request_id, "product load requested");
                Some(LoadRequest {
                    request_id,
                    inventory_id,
                })
            }
        }
    }

    /// Apply a load outcome.
    ///
    /// The correlation id must match the pending load for its inventory, and
    /// that inventory must still be the live context; otherwise the outcome
    /// is discarded. Discarding also clears the pending marker so a later
    /// re-entry re-triggers the fetch.
    pub(crate) fn complete(
        &mut self,
        request_id: LoadRequestId,
        result: Result<Vec<Product>, String>,
        live_inventory: Option<InventoryId>,
    ) -> LoadOutcome {
        let target = self.states.iter().find_map(|(inv, state)| match state {
            LoadState::Loading(pending) if *pending == request_id => Some(*inv),
            _ => None,
        });

        let Some(inventory_id) = target else {
            tracing::debug!(%request_id, "ignoring completion with superseded correlation id");
            return LoadOutcome::Stale;
        };

        if live_inventory != Some(inventory_id) {
            self.states.remove(&inventory_id);
            tracing::warn!(
                %inventory_id,
                %request_id,
                "discarding product load for a no-longer-active inventory"
            );
            return LoadOutcome::Stale;
        }

        match result {
            Ok(products) => {
                tracing::debug!(%inventory_id, count = products.len(), "product load applied");
                self.states.insert(inventory_id, LoadState::Loaded(products));
                LoadOutcome::Applied(inventory_id)
            }
            Err(message) => {
                tracing::warn!(%inventory_id, %message, "product load failed");
                self.states.insert(inventory_id, LoadState::Failed(message));
                LoadOutcome::Failed(inventory_id)
            }
        }
    }
}
