//! Step availability filtering.
//!
//! Pure set-difference over the catalog snapshot and the current store: each
//! function is a deterministic function of its inputs, applies the shared
//! search normalization, and returns case-insensitively name-ordered results.

use stockpick_catalog::{Asset, Inventory, Lot, Product, SelectionPurpose};
use stockpick_core::{InventoryId, cmp_names, normalized_contains};
use stockpick_selection::{SelectionLine, SelectionStore};

use crate::loads::ProductLoads;

/// Inventories offered at the Inventory step.
///
/// An inventory qualifies when its loaded products contain at least one of
/// the matching management type, or — before its products are loaded — when
/// its summary counts admit one (unknown counts count as eligible).
/// Inventories whose eligible products are all already selected remain
/// listed; their Product step simply shows none remaining.
pub fn eligible_inventories<'a>(
    inventories: &'a [Inventory],
    loads: &ProductLoads,
    purpose: SelectionPurpose,
    search: &str,
) -> Vec<&'a Inventory> {
    let mut eligible: Vec<&Inventory> = inventories
        .iter()
        .filter(|inventory| match loads.products(inventory.id()) {
            Some(products) => products
                .iter()
                .any(|product| purpose.matches(product.management_type())),
            None => inventory.may_contain(purpose),
        })
        .filter(|inventory| normalized_contains(inventory.name(), search))
        .collect();
    eligible.sort_by(|a, b| cmp_names(a.name(), b.name()));
    eligible
}

/// Products offered at the Product step for one inventory.
///
/// Each product may appear at most once per inventory within a session, so
/// products already selected for this inventory are excluded.
pub fn eligible_products<'a>(
    products: &'a [Product],
    store: &SelectionStore,
    inventory_id: InventoryId,
    purpose: SelectionPurpose,
    search: &str,
) -> Vec<&'a Product> {
    let mut eligible: Vec<&Product> = products
        .iter()
        .filter(|product| purpose.matches(product.management_type()))
        .filter(|product| !store.has_product(inventory_id, product.id()))
        .filter(|product| normalized_contains(product.name(), search))
        .collect();
    eligible.sort_by(|a, b| cmp_names(a.name(), b.name()));
    eligible
}

/// Lots offered at the Item step.
///
/// Lots already referenced in the target line are excluded, except the one
/// currently being edited (`editing_item`).
pub fn eligible_lots<'a>(
    product: &'a Product,
    line: Option<&SelectionLine>,
    editing_item: Option<usize>,
    search: &str,
) -> Vec<&'a Lot> {
    let mut eligible: Vec<&Lot> = product
        .lots()
        .iter()
        .filter(|lot| !line.is_some_and(|l| l.references_lot(lot.id, editing_item)))
        .filter(|lot| normalized_contains(&lot.lot_number, search))
        .collect();
    eligible.sort_by(|a, b| cmp_names(&a.lot_number, &b.lot_number));
    eligible
}

/// Assets offered at the Item step.
///
/// Only `Available` assets qualify, and an asset referenced anywhere in the
/// store — any line, any inventory — is excluded (no double-booking).
pub fn eligible_assets<'a>(
    product: &'a Product,
    store: &SelectionStore,
    search: &str,
) -> Vec<&'a Asset> {
    let mut eligible: Vec<&Asset> = product
        .assets()
        .iter()
        .filter(|asset| asset.is_selectable())
        .filter(|asset| !store.reserves_asset(asset.id))
        .filter(|asset| normalized_contains(&asset.label(), search))
        .collect();
    eligible.sort_by(|a, b| cmp_names(&a.label(), &b.label()));
    eligible
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockpick_catalog::{AssetStatus, ManagementType, ProductCounts};
    use stockpick_core::{AssetId, LotId, ProductId};
    use stockpick_selection::SelectionItem;

    fn lot(number: &str) -> Lot {
        Lot {
            id: LotId::new(),
            lot_number: number.to_string(),
            current_quantity: 10.0,
            reserved_quantity: 0.0,
            unit: "pcs".to_string(),
            expiration_date: None,
        }
    }

    fn asset(name: &str, status: AssetStatus) -> Asset {
        Asset {
            id: AssetId::new(),
            serial_number: None,
            assigned_name: Some(name.to_string()),
            status,
        }
    }

    #[test]
    fn inventory_step_uses_counts_until_products_load() {
        let with_consumables = Inventory::new(
            InventoryId::new(),
            "Ward",
            Some(ProductCounts {
                consumable: 2,
                serialized_asset: 0,
                general_asset: 0,
            }),
        );
        let assets_only = Inventory::new(
            InventoryId::new(),
            "Equipment room",
            Some(ProductCounts {
                consumable: 0,
                serialized_asset: 3,
                general_asset: 0,
            }),
        );
        let unknown = Inventory::new(InventoryId::new(), "Annex", None);
        let inventories = vec![with_consumables, assets_only, unknown];

        let loads = ProductLoads::new();
        let names: Vec<&str> =
            eligible_inventories(&inventories, &loads, SelectionPurpose::Consumables, "")
                .iter()
                .map(|i| i.name())
                .collect();
        // Unknown counts are optimistically included; listing is name-ordered.
        assert_eq!(names, vec!["Annex", "Ward"]);
    }

    #[test]
    fn inventory_step_trusts_loaded_products_over_counts() {
        let inventory = Inventory::new(
            InventoryId::new(),
            "Ward",
            Some(ProductCounts {
                consumable: 5,
                serialized_asset: 0,
                general_asset: 0,
            }),
        );
        let inventories = vec![inventory.clone()];

        // Loaded graph turns out to hold assets only.
        let mut loads = ProductLoads::new();
        let request = loads.begin(inventory.id()).unwrap();
        let products = vec![Product::asset(
            ProductId::new(),
            "Monitor",
            ManagementType::GeneralAsset,
            vec![asset("Monitor #1", AssetStatus::Available)],
        )];
        loads.complete(request.request_id, Ok(products), Some(inventory.id()));

        assert!(
            eligible_inventories(&inventories, &loads, SelectionPurpose::Consumables, "")
                .is_empty()
        );
        assert_eq!(
            eligible_inventories(&inventories, &loads, SelectionPurpose::Assets, "").len(),
            1
        );
    }

    #[test]
    fn fully_selected_inventories_remain_listed() {
        let inventory = Inventory::new(InventoryId::new(), "Ward", None);
        let product = Product::consumable(ProductId::new(), "Saline", true, vec![lot("L1")]);

        let mut loads = ProductLoads::new();
        let request = loads.begin(inventory.id()).unwrap();
        loads.complete(request.request_id, Ok(vec![product.clone()]), Some(inventory.id()));

        // Every eligible product of the inventory is already selected...
        let (store, _) = SelectionStore::new().add_line_with_product(inventory.id(), product.id());

        // ...yet the inventory stays listed; its Product step just shows
        // nothing remaining.
        let inventories = vec![inventory.clone()];
        assert_eq!(
            eligible_inventories(&inventories, &loads, SelectionPurpose::Consumables, "").len(),
            1
        );
        assert!(
            eligible_products(
                loads.products(inventory.id()).unwrap(),
                &store,
                inventory.id(),
                SelectionPurpose::Consumables,
                ""
            )
            .is_empty()
        );
    }

    #[test]
    fn product_step_excludes_products_selected_for_the_same_inventory_only() {
        let inventory_id = InventoryId::new();
        let other_inventory = InventoryId::new();
        let product_a = Product::consumable(ProductId::new(), "Saline", true, vec![lot("L1")]);
        let product_b = Product::consumable(ProductId::new(), "Gauze", false, vec![lot("L2")]);
        let products = vec![product_a.clone(), product_b.clone()];

        let (store, _) = SelectionStore::new().add_line_with_product(inventory_id, product_a.id());
        let names: Vec<&str> = eligible_products(
            &products,
            &store,
            inventory_id,
            SelectionPurpose::Consumables,
            "",
        )
        .iter()
        .map(|p| p.name())
        .collect();
        assert_eq!(names, vec!["Gauze"]);

        // The same product stays eligible under a different inventory.
        assert_eq!(
            eligible_products(
                &products,
                &store,
                other_inventory,
                SelectionPurpose::Consumables,
                ""
            )
            .len(),
            2
        );
    }

    #[test]
    fn lot_step_excludes_line_lots_except_the_edited_one() {
        let product = Product::consumable(
            ProductId::new(),
            "Saline",
            true,
            vec![lot("A-1"), lot("B-2"), lot("C-3")],
        );
        let taken = product.lots()[0].id;

        let (store, index) =
            SelectionStore::new().add_line_with_product(InventoryId::new(), product.id());
        let (store, item_index) = store
            .add_item(index, SelectionItem::consumable(taken, 1.0))
            .unwrap();
        let line = &store.lines()[index];

        let numbers: Vec<&str> = eligible_lots(&product, Some(line), None, "")
            .iter()
            .map(|l| l.lot_number.as_str())
            .collect();
        assert_eq!(numbers, vec!["B-2", "C-3"]);

        // Editing that item offers its own lot again.
        let numbers: Vec<&str> = eligible_lots(&product, Some(line), Some(item_index), "")
            .iter()
            .map(|l| l.lot_number.as_str())
            .collect();
        assert_eq!(numbers, vec!["A-1", "B-2", "C-3"]);
    }

    #[test]
    fn asset_step_excludes_unavailable_and_reserved_assets() {
        let free = asset("Free unit", AssetStatus::Available);
        let busy = asset("Busy unit", AssetStatus::InUse);
        let reserved = asset("Reserved unit", AssetStatus::Available);
        let reserved_id = reserved.id;
        let product = Product::asset(
            ProductId::new(),
            "Pump",
            ManagementType::SerializedAsset,
            vec![free, busy, reserved],
        );

        // Reserve one asset under a *different* product line: exclusion is
        // store-wide, not per-line.
        let (store, index) =
            SelectionStore::new().add_line_with_product(InventoryId::new(), ProductId::new());
        let (store, _) = store.add_item(index, SelectionItem::asset(reserved_id)).unwrap();

        let labels: Vec<String> = eligible_assets(&product, &store, "")
            .iter()
            .map(|a| a.label())
            .collect();
        assert_eq!(labels, vec!["Free unit".to_string()]);
    }

    #[test]
    fn search_filters_every_step_the_same_way() {
        let inventories = vec![
            Inventory::new(InventoryId::new(), "Main ward", None),
            Inventory::new(InventoryId::new(), "Storage", None),
        ];
        let loads = ProductLoads::new();
        let hits =
            eligible_inventories(&inventories, &loads, SelectionPurpose::Consumables, "WARD");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name(), "Main ward");

        let product = Product::consumable(ProductId::new(), "Saline", true, vec![lot("A-1")]);
        assert!(eligible_lots(&product, None, None, "a-").len() == 1);
        assert!(eligible_lots(&product, None, None, "zzz").is_empty());
    }
}
