//! The selection wizard session: navigation, availability, and commits.

use serde::{Deserialize, Serialize};

use stockpick_catalog::{Asset, Inventory, Lot, Product, SelectionPurpose};
use stockpick_core::{
    AssetId, InventoryId, LoadRequestId, LotId, ProductId, SelectionError, SelectionResult,
};
use stockpick_selection::{
    InventoryGroup, ItemChange, QuantityCheck, SelectionItem, SelectionStore, check_quantity,
    group_by_inventory,
};

use crate::availability;
use crate::loads::{LoadOutcome, LoadRequest, ProductLoads};
use crate::step::{WizardStep, WizardState};

/// Quantity recorded when a lot is first committed; edits happen afterwards
/// on the List step.
const INITIAL_QUANTITY: f64 = 1.0;

/// Session configuration supplied by the parent form.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardConfig {
    pub purpose: SelectionPurpose,
    /// Inspection-only mode for past or already-confirmed visits: every
    /// mutating operation fails with [`SelectionError::ReadOnly`].
    pub read_only: bool,
}

impl WizardConfig {
    pub fn new(purpose: SelectionPurpose) -> Self {
        Self {
            purpose,
            read_only: false,
        }
    }

    pub fn read_only(purpose: SelectionPurpose) -> Self {
        Self {
            purpose,
            read_only: true,
        }
    }
}

/// The user's choice at the Item step.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemPick {
    Lot(LotId),
    Asset(AssetId),
}

/// Synchronous result of a committed pick.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub line_index: usize,
    pub item_index: usize,
}

/// What the Item step offers, depending on the product's management type.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemOptions<'a> {
    Lots(Vec<&'a Lot>),
    Assets(Vec<&'a Asset>),
}

/// The inventory›product path of the active drill-down.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Breadcrumb {
    pub inventory: Option<String>,
    pub product: Option<String>,
}

/// One wizard session over a catalog snapshot.
///
/// Owns the working [`SelectionStore`] (seeded by the parent form) for the
/// lifetime of the dialog; the parent reads it back on submit and simply
/// drops the session on cancel. All catalog data is read-only here — the
/// wizard never mutates inventories.
#[derive(Debug)]
pub struct SelectionWizard {
    config: WizardConfig,
    inventories: Vec<Inventory>,
    state: WizardState,
    loads: ProductLoads,
    store: SelectionStore,
}

impl SelectionWizard {
    pub fn new(config: WizardConfig, inventories: Vec<Inventory>, store: SelectionStore) -> Self {
        Self {
            config,
            inventories,
            state: WizardState::new(),
            loads: ProductLoads::new(),
            store,
        }
    }

    pub fn config(&self) -> WizardConfig {
        self.config
    }

    pub fn step(&self) -> WizardStep {
        self.state.step()
    }

    pub fn search(&self) -> &str {
        self.state.search()
    }

    /// Update the search text for the current step listing.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.state.set_search(search);
    }

    pub fn store(&self) -> &SelectionStore {
        &self.store
    }

    pub fn into_store(self) -> SelectionStore {
        self.store
    }

    pub fn inventories(&self) -> &[Inventory] {
        &self.inventories
    }

    /// The inventory of the active drill-down, if one is picked.
    pub fn context_inventory(&self) -> Option<&Inventory> {
        let id = self.state.inventory_id()?;
        self.inventories.iter().find(|inv| inv.id() == id)
    }

    /// The product of the active drill-down, if one is picked.
    pub fn context_product(&self) -> Option<&Product> {
        let inventory_id = self.state.inventory_id()?;
        let product_id = self.state.product_id()?;
        self.loads
            .products(inventory_id)?
            .iter()
            .find(|p| p.id() == product_id)
    }

    pub fn breadcrumb(&self) -> Breadcrumb {
        Breadcrumb {
            inventory: self.context_inventory().map(|inv| inv.name().to_string()),
            product: self.context_product().map(|p| p.name().to_string()),
        }
    }

    // ---- navigation -----------------------------------------------------

    /// List → Inventory: open the picker.
    pub fn start(&mut self) -> SelectionResult<()> {
        self.ensure_step(WizardStep::List, "start")?;
        self.state.begin();
        tracing::debug!("wizard entered inventory step");
        Ok(())
    }

    /// Pick an inventory at the Inventory step.
    ///
    /// Returns the load the host must perform, or `None` when the products
    /// are cached (the wizard advances immediately) or a load is already in
    /// flight. On a cached failure this *is* the explicit re-trigger: a fresh
    /// request with a new correlation id is issued.
    pub fn select_inventory(
        &mut self,
        inventory_id: InventoryId,
    ) -> SelectionResult<Option<LoadRequest>> {
        self.ensure_step(WizardStep::Inventory, "select_inventory")?;
        if !self.inventories.iter().any(|inv| inv.id() == inventory_id) {
            return Err(SelectionError::NotFound);
        }

        self.state.set_inventory_context(inventory_id);
        if self.loads.is_loaded(inventory_id) {
            self.state.advance_to_product();
            tracing::debug!(%inventory_id, "wizard entered product step (cached)");
            return Ok(None);
        }

        Ok(self.loads.begin(inventory_id))
    }

    /// Feed back the outcome of a [`LoadRequest`].
    ///
    /// Stale outcomes (superseded correlation id, or a target inventory that
    /// is no longer the live context) are discarded without touching wizard
    /// state. An applied load for the awaited inventory advances the wizard
    /// to the Product step; a failure keeps it on the Inventory step with the
    /// message surfaced through [`load_failure`].
    ///
    /// [`load_failure`]: SelectionWizard::load_failure
    pub fn complete_load(
        &mut self,
        request_id: LoadRequestId,
        result: Result<Vec<Product>, String>,
    ) -> LoadOutcome {
        let live = self.state.inventory_id();
        let outcome = self.loads.complete(request_id, result, live);
        if let LoadOutcome::Applied(inventory_id) = outcome {
            if live == Some(inventory_id)
                && matches!(self.state.step(), WizardStep::Inventory | WizardStep::List)
            {
                match self.state.product_id() {
                    // An add-item drill-down was waiting for this load.
                    Some(product_id) => {
                        self.state.advance_to_item(product_id);
                        tracing::debug!(%inventory_id, %product_id, "wizard entered item step");
                    }
                    None => {
                        self.state.advance_to_product();
                        tracing::debug!(%inventory_id, "wizard entered product step");
                    }
                }
            }
        }
        outcome
    }

    /// Pick a product at the Product step.
    pub fn select_product(&mut self, product_id: ProductId) -> SelectionResult<()> {
        self.ensure_step(WizardStep::Product, "select_product")?;
        let inventory_id = self.context_inventory_id()?;
        let products = self
            .loads
            .products(inventory_id)
            .ok_or_else(|| SelectionError::conflict("products are not loaded yet"))?;
        let product = products
            .iter()
            .find(|p| p.id() == product_id)
            .ok_or(SelectionError::NotFound)?;

        if !self.config.purpose.matches(product.management_type()) {
            return Err(SelectionError::validation(
                "product does not match the session purpose",
            ));
        }
        if self.store.has_product(inventory_id, product_id) {
            return Err(SelectionError::conflict(
                "product is already selected for this inventory",
            ));
        }

        self.state.advance_to_item(product_id);
        tracing::debug!(%inventory_id, %product_id, "wizard entered item step");
        Ok(())
    }

    /// Pick a lot or asset at the Item step, committing it into the store and
    /// returning the wizard to the List step.
    pub fn select_item(&mut self, pick: ItemPick) -> SelectionResult<Commit> {
        self.ensure_writable()?;
        self.ensure_step(WizardStep::Item, "select_item")?;
        let inventory_id = self.context_inventory_id()?;
        let product_id = self
            .state
            .product_id()
            .ok_or_else(|| SelectionError::conflict("no product context"))?;

        let item = {
            let product = self
                .context_product()
                .ok_or_else(|| SelectionError::conflict("products are not loaded yet"))?;
            match pick {
                ItemPick::Lot(lot_id) => {
                    if !product.is_consumable() {
                        return Err(SelectionError::validation(
                            "lots can only be picked for consumable products",
                        ));
                    }
                    if product.lot(lot_id).is_none() {
                        return Err(SelectionError::NotFound);
                    }
                    if let Some(index) = self.store.line_for(inventory_id, product_id) {
                        if self.store.lines()[index].references_lot(lot_id, None) {
                            return Err(SelectionError::invariant(format!(
                                "lot {lot_id} is already selected in this line"
                            )));
                        }
                    }
                    SelectionItem::consumable(lot_id, INITIAL_QUANTITY)
                }
                ItemPick::Asset(asset_id) => {
                    let asset = product.asset_by_id(asset_id).ok_or(SelectionError::NotFound)?;
                    if !asset.is_selectable() {
                        return Err(SelectionError::invariant(format!(
                            "asset {asset_id} is not available"
                        )));
                    }
                    if self.store.reserves_asset(asset_id) {
                        return Err(SelectionError::invariant(format!(
                            "asset {asset_id} is already reserved"
                        )));
                    }
                    SelectionItem::asset(asset_id)
                }
            }
        };

        let (store, line_index) = match self.store.line_for(inventory_id, product_id) {
            Some(index) => (self.store.clone(), index),
            None => self.store.add_line_with_product(inventory_id, product_id),
        };
        let (store, item_index) = store.add_item(line_index, item)?;
        self.store = store;
        self.state.return_to_list();

        tracing::debug!(%inventory_id, %product_id, line_index, item_index, "selection committed");
        Ok(Commit {
            line_index,
            item_index,
        })
    }

    /// Jump from the List step straight to the Item step of an existing
    /// line, to add another lot/asset to it.
    ///
    /// Like [`select_inventory`], returns the load the host must perform if
    /// the line's inventory has no cached products yet; the Item step is
    /// entered when the load applies.
    ///
    /// [`select_inventory`]: SelectionWizard::select_inventory
    pub fn begin_add_item(&mut self, line_index: usize) -> SelectionResult<Option<LoadRequest>> {
        self.ensure_writable()?;
        self.ensure_step(WizardStep::List, "begin_add_item")?;
        let line = self.store.line(line_index)?;
        let inventory_id = line
            .inventory_id()
            .ok_or_else(|| SelectionError::conflict("line has no inventory yet"))?;
        let product_id = line
            .product_id()
            .ok_or_else(|| SelectionError::conflict("line has no product yet"))?;

        self.state.begin_item_drilldown(inventory_id, product_id);
        if self.loads.is_loaded(inventory_id) {
            self.state.advance_to_item(product_id);
            tracing::debug!(%inventory_id, %product_id, "wizard entered item step (cached)");
            return Ok(None);
        }
        Ok(self.loads.begin(inventory_id))
    }

    /// Pop exactly one level (Item→Product→Inventory→List); no-op at List.
    pub fn go_back(&mut self) -> WizardStep {
        let step = self.state.back();
        tracing::debug!(step = %step, "wizard went back");
        step
    }

    /// Abandon the drill-down and return to the List step. The load cache is
    /// kept for the rest of the session.
    pub fn reset(&mut self) {
        self.state.return_to_list();
        tracing::debug!("wizard reset to list step");
    }

    // ---- step listings --------------------------------------------------

    /// Inventory-step options under the current search text.
    pub fn inventory_options(&self) -> Vec<&Inventory> {
        availability::eligible_inventories(
            &self.inventories,
            &self.loads,
            self.config.purpose,
            self.state.search(),
        )
    }

    /// Product-step options under the current search text. Empty while the
    /// context inventory's products are loading or failed.
    pub fn product_options(&self) -> Vec<&Product> {
        let Some(inventory_id) = self.state.inventory_id() else {
            return Vec::new();
        };
        let Some(products) = self.loads.products(inventory_id) else {
            return Vec::new();
        };
        availability::eligible_products(
            products,
            &self.store,
            inventory_id,
            self.config.purpose,
            self.state.search(),
        )
    }

    /// Item-step options (lots or assets) under the current search text.
    pub fn item_options(&self) -> SelectionResult<ItemOptions<'_>> {
        self.ensure_step(WizardStep::Item, "item_options")?;
        let inventory_id = self.context_inventory_id()?;
        let product_id = self
            .state
            .product_id()
            .ok_or_else(|| SelectionError::conflict("no product context"))?;
        let product = self
            .context_product()
            .ok_or_else(|| SelectionError::conflict("products are not loaded yet"))?;

        if product.is_consumable() {
            let line = self
                .store
                .line_for(inventory_id, product_id)
                .map(|index| &self.store.lines()[index]);
            Ok(ItemOptions::Lots(availability::eligible_lots(
                product,
                line,
                None,
                self.state.search(),
            )))
        } else {
            Ok(ItemOptions::Assets(availability::eligible_assets(
                product,
                &self.store,
                self.state.search(),
            )))
        }
    }

    /// Whether the context inventory's products are still loading.
    pub fn is_loading(&self) -> bool {
        self.state
            .inventory_id()
            .is_some_and(|id| self.loads.is_loading(id))
    }

    /// The cached failure message for the context inventory, if its last
    /// load was rejected.
    pub fn load_failure(&self) -> Option<&str> {
        self.loads.failure(self.state.inventory_id()?)
    }

    // ---- list-step summary and edits ------------------------------------

    /// The by-inventory grouped summary for the List step.
    pub fn groups(&self) -> Vec<InventoryGroup> {
        group_by_inventory(&self.store, &self.inventories)
    }

    /// Edit a committed consumable quantity, applying the product's decimal
    /// policy and flagging (without blocking) stock excess.
    pub fn update_quantity(
        &mut self,
        line_index: usize,
        item_index: usize,
        requested: f64,
    ) -> SelectionResult<QuantityCheck> {
        self.ensure_writable()?;
        let check = {
            let (product, lot) = self.item_catalog_refs(line_index, item_index)?;
            check_quantity(product, lot, requested)?
        };
        self.store =
            self.store
                .update_item(line_index, item_index, ItemChange::Quantity(check.quantity))?;
        Ok(check)
    }

    /// Point a committed consumable item at a different lot of its product.
    pub fn change_item_lot(
        &mut self,
        line_index: usize,
        item_index: usize,
        lot_id: LotId,
    ) -> SelectionResult<()> {
        self.ensure_writable()?;
        {
            let (product, _) = self.item_catalog_refs(line_index, item_index)?;
            if product.lot(lot_id).is_none() {
                return Err(SelectionError::NotFound);
            }
        }
        self.store = self
            .store
            .update_item(line_index, item_index, ItemChange::Lot(lot_id))?;
        Ok(())
    }

    /// Lots offerable for an inline edit of a committed item; the edited
    /// item's own lot stays offerable.
    pub fn eligible_lots_for_edit(
        &self,
        line_index: usize,
        item_index: usize,
    ) -> SelectionResult<Vec<&Lot>> {
        let line = self.store.line(line_index)?;
        line.item(item_index)?;
        let (product, _) = self.item_catalog_refs(line_index, item_index)?;
        Ok(availability::eligible_lots(
            product,
            Some(line),
            Some(item_index),
            "",
        ))
    }

    pub fn remove_line(&mut self, index: usize) -> SelectionResult<()> {
        self.ensure_writable()?;
        self.store = self.store.remove_line(index)?;
        tracing::debug!(index, "selection line removed");
        Ok(())
    }

    pub fn remove_item(&mut self, line_index: usize, item_index: usize) -> SelectionResult<()> {
        self.ensure_writable()?;
        self.store = self.store.remove_item(line_index, item_index)?;
        tracing::debug!(line_index, item_index, "selection item removed");
        Ok(())
    }

    // ---- internals ------------------------------------------------------

    fn ensure_step(&self, expected: WizardStep, op: &str) -> SelectionResult<()> {
        let actual = self.state.step();
        if actual != expected {
            return Err(SelectionError::conflict(format!(
                "{op} requires the {expected} step, wizard is at {actual}"
            )));
        }
        Ok(())
    }

    fn ensure_writable(&self) -> SelectionResult<()> {
        if self.config.read_only {
            return Err(SelectionError::ReadOnly);
        }
        Ok(())
    }

    fn context_inventory_id(&self) -> SelectionResult<InventoryId> {
        self.state
            .inventory_id()
            .ok_or_else(|| SelectionError::conflict("no inventory context"))
    }

    /// Resolve the catalog product and lot behind a committed consumable item.
    fn item_catalog_refs(
        &self,
        line_index: usize,
        item_index: usize,
    ) -> SelectionResult<(&Product, &Lot)> {
        let line = self.store.line(line_index)?;
        let item = line.item(item_index)?;
        let lot_id = item
            .lot_id()
            .ok_or_else(|| SelectionError::validation("asset items have no editable fields"))?;
        let inventory_id = line.inventory_id().ok_or(SelectionError::NotFound)?;
        let product_id = line.product_id().ok_or(SelectionError::NotFound)?;

        let product = self
            .loads
            .products(inventory_id)
            .and_then(|products| products.iter().find(|p| p.id() == product_id))
            .ok_or(SelectionError::NotFound)?;
        let lot = product.lot(lot_id).ok_or(SelectionError::NotFound)?;
        Ok((product, lot))
    }
}
