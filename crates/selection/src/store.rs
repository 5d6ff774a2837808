//! The ordered collection of selection lines, with immutable updates.

use serde::{Deserialize, Serialize};

use stockpick_core::{AssetId, InventoryId, LotId, ProductId, SelectionError, SelectionResult};

use crate::item::SelectionItem;
use crate::line::SelectionLine;

/// A field edit applied to an existing item.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemChange {
    /// Point a consumable item at a different lot.
    Lot(LotId),
    /// Record a new quantity for a consumable item.
    Quantity(f64),
}

/// The flat, ordered list of [`SelectionLine`]s for one wizard session.
///
/// Every operation takes `&self` and returns a fresh store; the receiver is
/// never mutated, so callers can keep old values for cheap diffing or
/// cancel/rollback. Two invariants are enforced hard here:
///
/// 1. no asset id is referenced by more than one item anywhere in the store;
/// 2. no lot id appears twice within the same line.
///
/// "At most one line per (inventory, product)" is deliberately *not* enforced
/// here; the wizard layer keeps that rule by disabling already-selected
/// products at the Product step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionStore {
    lines: Vec<SelectionLine>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from persisted reservation lines, validating the
    /// uniqueness invariants across the whole set.
    pub fn seed(lines: Vec<SelectionLine>) -> SelectionResult<Self> {
        let store = Self { lines };
        let mut seen_assets: Vec<AssetId> = Vec::new();
        for line in &store.lines {
            for item in line.items() {
                if let Some(asset_id) = item.asset_id() {
                    if seen_assets.contains(&asset_id) {
                        return Err(SelectionError::invariant(format!(
                            "asset {asset_id} is reserved more than once"
                        )));
                    }
                    seen_assets.push(asset_id);
                }
            }
        }
        Ok(store)
    }

    pub fn lines(&self) -> &[SelectionLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, index: usize) -> SelectionResult<&SelectionLine> {
        self.lines.get(index).ok_or(SelectionError::NotFound)
    }

    /// Append a fresh, inventory-unset line.
    pub fn add_line(&self) -> Self {
        let mut store = self.clone();
        store.lines.push(SelectionLine::unset());
        store
    }

    /// Append a line already bound to an inventory and product, returning the
    /// new line's index synchronously.
    pub fn add_line_with_product(
        &self,
        inventory_id: InventoryId,
        product_id: ProductId,
    ) -> (Self, usize) {
        let mut store = self.clone();
        store.lines.push(SelectionLine::bound(inventory_id, product_id));
        let index = store.lines.len() - 1;
        (store, index)
    }

    pub fn set_line_inventory(
        &self,
        index: usize,
        inventory_id: InventoryId,
    ) -> SelectionResult<Self> {
        let updated = self.line(index)?.set_inventory(inventory_id)?;
        Ok(self.with_line_replaced(index, updated))
    }

    pub fn set_line_product(&self, index: usize, product_id: ProductId) -> SelectionResult<Self> {
        let updated = self.line(index)?.set_product(product_id)?;
        Ok(self.with_line_replaced(index, updated))
    }

    pub fn remove_line(&self, index: usize) -> SelectionResult<Self> {
        if index >= self.lines.len() {
            return Err(SelectionError::NotFound);
        }
        let mut store = self.clone();
        store.lines.remove(index);
        Ok(store)
    }

    /// Add an item to a line, enforcing both uniqueness invariants.
    pub fn add_item(
        &self,
        line_index: usize,
        item: SelectionItem,
    ) -> SelectionResult<(Self, usize)> {
        if let Some(asset_id) = item.asset_id() {
            if self.reserves_asset(asset_id) {
                return Err(SelectionError::invariant(format!(
                    "asset {asset_id} is already reserved"
                )));
            }
        }
        let (updated, item_index) = self.line(line_index)?.with_item(item)?;
        Ok((self.with_line_replaced(line_index, updated), item_index))
    }

    pub fn remove_item(&self, line_index: usize, item_index: usize) -> SelectionResult<Self> {
        let updated = self.line(line_index)?.without_item(item_index)?;
        Ok(self.with_line_replaced(line_index, updated))
    }

    /// Apply a field edit to an existing consumable item.
    pub fn update_item(
        &self,
        line_index: usize,
        item_index: usize,
        change: ItemChange,
    ) -> SelectionResult<Self> {
        let line = self.line(line_index)?;
        let current = line.item(item_index)?;

        let (lot_id, quantity) = match current {
            SelectionItem::Consumable { lot_id, quantity } => (*lot_id, *quantity),
            SelectionItem::Asset { .. } => {
                return Err(SelectionError::validation(
                    "asset items have no editable fields",
                ));
            }
        };

        let replacement = match change {
            ItemChange::Lot(new_lot) => SelectionItem::consumable(new_lot, quantity),
            ItemChange::Quantity(new_quantity) => SelectionItem::consumable(lot_id, new_quantity),
        };

        let updated = line.with_item_replaced(item_index, replacement)?;
        Ok(self.with_line_replaced(line_index, updated))
    }

    /// Whether any item anywhere in the store reserves `asset_id`.
    pub fn reserves_asset(&self, asset_id: AssetId) -> bool {
        self.lines
            .iter()
            .flat_map(|line| line.items())
            .any(|item| item.asset_id() == Some(asset_id))
    }

    /// Whether a line for `(inventory_id, product_id)` already exists.
    pub fn has_product(&self, inventory_id: InventoryId, product_id: ProductId) -> bool {
        self.line_for(inventory_id, product_id).is_some()
    }

    /// Index of the line holding `(inventory_id, product_id)`, if any.
    pub fn line_for(&self, inventory_id: InventoryId, product_id: ProductId) -> Option<usize> {
        self.lines.iter().position(|line| {
            line.inventory_id() == Some(inventory_id) && line.product_id() == Some(product_id)
        })
    }

    /// Total number of items across all lines.
    pub fn item_count(&self) -> usize {
        self.lines.iter().map(|line| line.items().len()).sum()
    }

    fn with_line_replaced(&self, index: usize, line: SelectionLine) -> Self {
        let mut store = self.clone();
        store.lines[index] = line;
        store
    }
}
