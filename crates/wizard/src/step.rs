//! Navigation steps and the per-session navigation state.

use serde::{Deserialize, Serialize};

use stockpick_core::{InventoryId, ProductId};

/// One state of the selection navigation machine.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WizardStep {
    /// The summary of everything selected so far.
    #[default]
    List,
    /// Picking a stock location.
    Inventory,
    /// Picking a product within the chosen location.
    Product,
    /// Picking a concrete lot or asset of the chosen product.
    Item,
}

impl WizardStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            WizardStep::List => "list",
            WizardStep::Inventory => "inventory",
            WizardStep::Product => "product",
            WizardStep::Item => "item",
        }
    }
}

impl core::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current step plus the active drill-down context and search text.
///
/// Transitions clear the search text; popping a level also clears the context
/// that level owned. All transitions go through the methods here so the
/// clearing rules live in one place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WizardState {
    step: WizardStep,
    inventory_id: Option<InventoryId>,
    product_id: Option<ProductId>,
    search: String,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn inventory_id(&self) -> Option<InventoryId> {
        self.inventory_id
    }

    pub fn product_id(&self) -> Option<ProductId> {
        self.product_id
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub(crate) fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// List → Inventory.
    pub(crate) fn begin(&mut self) {
        self.step = WizardStep::Inventory;
        self.search.clear();
    }

    /// Record the picked inventory while remaining on the Inventory step
    /// (the Product step is entered when its products are ready).
    pub(crate) fn set_inventory_context(&mut self, inventory_id: InventoryId) {
        self.inventory_id = Some(inventory_id);
        self.product_id = None;
    }

    /// Record a line's (inventory, product) context for an add-item
    /// drill-down started from the List step; the Item step is entered once
    /// the inventory's products are available.
    pub(crate) fn begin_item_drilldown(
        &mut self,
        inventory_id: InventoryId,
        product_id: ProductId,
    ) {
        self.inventory_id = Some(inventory_id);
        self.product_id = Some(product_id);
        self.search.clear();
    }

    /// Inventory → Product, once products for the context are available.
    pub(crate) fn advance_to_product(&mut self) {
        self.step = WizardStep::Product;
        self.search.clear();
    }

    /// Product → Item.
    pub(crate) fn advance_to_item(&mut self, product_id: ProductId) {
        self.step = WizardStep::Item;
        self.product_id = Some(product_id);
        self.search.clear();
    }

    /// Pop exactly one level; a no-op at List.
    pub(crate) fn back(&mut self) -> WizardStep {
        match self.step {
            WizardStep::List => {}
            WizardStep::Inventory => {
                self.step = WizardStep::List;
                self.inventory_id = None;
                self.search.clear();
            }
            WizardStep::Product => {
                self.step = WizardStep::Inventory;
                self.inventory_id = None;
                self.product_id = None;
                self.search.clear();
            }
            WizardStep::Item => {
                self.step = WizardStep::Product;
                self.product_id = None;
                self.search.clear();
            }
        }
        self.step
    }

    /// Drop the whole drill-down and return to List.
    pub(crate) fn return_to_list(&mut self) {
        self.step = WizardStep::List;
        self.inventory_id = None;
        self.product_id = None;
        self.search.clear();
    }
}
