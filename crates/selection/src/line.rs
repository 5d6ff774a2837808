//! A product's reservation entry within one inventory.

use serde::{Deserialize, Serialize};

use stockpick_core::{InventoryId, LotId, ProductId, SelectionError, SelectionResult};

use crate::item::SelectionItem;

/// One (inventory, product) pair plus its chosen items.
///
/// A freshly added line starts with neither set ("inventory-unset"); the
/// product, once set, is immutable for the line — changing product means
/// removing and re-adding the line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionLine {
    inventory_id: Option<InventoryId>,
    product_id: Option<ProductId>,
    items: Vec<SelectionItem>,
}

impl SelectionLine {
    /// A new line with nothing picked yet.
    pub fn unset() -> Self {
        Self::default()
    }

    /// A line bound to a concrete inventory and product, with no items yet.
    pub fn bound(inventory_id: InventoryId, product_id: ProductId) -> Self {
        Self {
            inventory_id: Some(inventory_id),
            product_id: Some(product_id),
            items: Vec::new(),
        }
    }

    /// Rebuild a line from persisted reservation data.
    ///
    /// Validates the per-line lot uniqueness invariant; cross-line asset
    /// uniqueness is checked by [`SelectionStore::seed`].
    ///
    /// [`SelectionStore::seed`]: crate::store::SelectionStore::seed
    pub fn seeded(
        inventory_id: InventoryId,
        product_id: ProductId,
        items: Vec<SelectionItem>,
    ) -> SelectionResult<Self> {
        let line = Self {
            inventory_id: Some(inventory_id),
            product_id: Some(product_id),
            items,
        };
        line.ensure_unique_lots()?;
        Ok(line)
    }

    pub fn inventory_id(&self) -> Option<InventoryId> {
        self.inventory_id
    }

    pub fn product_id(&self) -> Option<ProductId> {
        self.product_id
    }

    pub fn is_unset(&self) -> bool {
        self.inventory_id.is_none()
    }

    pub fn items(&self) -> &[SelectionItem] {
        &self.items
    }

    pub fn item(&self, index: usize) -> SelectionResult<&SelectionItem> {
        self.items.get(index).ok_or(SelectionError::NotFound)
    }

    /// Whether `lot_id` is already referenced by an item in this line,
    /// ignoring `except` (the item currently being edited, if any).
    pub fn references_lot(&self, lot_id: LotId, except: Option<usize>) -> bool {
        self.items
            .iter()
            .enumerate()
            .any(|(idx, item)| Some(idx) != except && item.lot_id() == Some(lot_id))
    }

    pub(crate) fn set_inventory(&self, inventory_id: InventoryId) -> SelectionResult<Self> {
        if self.product_id.is_some() {
            return Err(SelectionError::conflict(
                "line inventory cannot change after its product is set",
            ));
        }
        let mut line = self.clone();
        line.inventory_id = Some(inventory_id);
        Ok(line)
    }

    pub(crate) fn set_product(&self, product_id: ProductId) -> SelectionResult<Self> {
        if self.product_id.is_some() {
            return Err(SelectionError::conflict(
                "line product is immutable once set; remove and re-add the line",
            ));
        }
        if self.inventory_id.is_none() {
            return Err(SelectionError::conflict(
                "line has no inventory; set the inventory first",
            ));
        }
        let mut line = self.clone();
        line.product_id = Some(product_id);
        Ok(line)
    }

    pub(crate) fn with_item(&self, item: SelectionItem) -> SelectionResult<(Self, usize)> {
        if let Some(lot_id) = item.lot_id() {
            if self.references_lot(lot_id, None) {
                return Err(SelectionError::invariant(format!(
                    "lot {lot_id} is already selected in this line"
                )));
            }
        }
        let mut line = self.clone();
        line.items.push(item);
        let index = line.items.len() - 1;
        Ok((line, index))
    }

    pub(crate) fn without_item(&self, index: usize) -> SelectionResult<Self> {
        if index >= self.items.len() {
            return Err(SelectionError::NotFound);
        }
        let mut line = self.clone();
        line.items.remove(index);
        Ok(line)
    }

    pub(crate) fn with_item_replaced(
        &self,
        index: usize,
        item: SelectionItem,
    ) -> SelectionResult<Self> {
        if index >= self.items.len() {
            return Err(SelectionError::NotFound);
        }
        if let Some(lot_id) = item.lot_id() {
            if self.references_lot(lot_id, Some(index)) {
                return Err(SelectionError::invariant(format!(
                    "lot {lot_id} is already selected in this line"
                )));
            }
        }
        let mut line = self.clone();
        line.items[index] = item;
        Ok(line)
    }

    fn ensure_unique_lots(&self) -> SelectionResult<()> {
        for (idx, item) in self.items.iter().enumerate() {
            if let Some(lot_id) = item.lot_id() {
                let duplicated = self.items[..idx]
                    .iter()
                    .any(|earlier| earlier.lot_id() == Some(lot_id));
                if duplicated {
                    return Err(SelectionError::invariant(format!(
                        "lot {lot_id} appears twice in one line"
                    )));
                }
            }
        }
        Ok(())
    }
}
