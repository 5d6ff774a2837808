//! By-inventory grouped view of the flat line list.

use serde::{Deserialize, Serialize};

use stockpick_catalog::Inventory;
use stockpick_core::{InventoryId, cmp_names};

use crate::store::SelectionStore;

/// One rendered group in the List-step summary.
///
/// Purely a render-time projection: it holds line *indices* into the store,
/// and mutating it has no effect on the underlying lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryGroup {
    /// `None` groups the still-unset lines.
    pub inventory_id: Option<InventoryId>,
    /// Resolved inventory name; `None` for the unset group or an id missing
    /// from the snapshot.
    pub name: Option<String>,
    pub line_indices: Vec<usize>,
    pub item_count: usize,
}

/// Project the store into ordered inventory groups.
///
/// Groups appear in case-insensitive alphabetical name order; the unset group
/// sorts last. Line order within a group follows store order.
pub fn group_by_inventory(store: &SelectionStore, inventories: &[Inventory]) -> Vec<InventoryGroup> {
    let mut groups: Vec<InventoryGroup> = Vec::new();

    for (index, line) in store.lines().iter().enumerate() {
        let inventory_id = line.inventory_id();
        let group = match groups.iter_mut().find(|g| g.inventory_id == inventory_id) {
            Some(group) => group,
            None => {
                let name = inventory_id.and_then(|id| {
                    inventories
                        .iter()
                        .find(|inv| inv.id() == id)
                        .map(|inv| inv.name().to_string())
                });
                groups.push(InventoryGroup {
                    inventory_id,
                    name,
                    line_indices: Vec::new(),
                    item_count: 0,
                });
                groups.last_mut().expect("group was just pushed")
            }
        };
        group.line_indices.push(index);
        group.item_count += line.items().len();
    }

    groups.sort_by(|a, b| match (&a.inventory_id, &b.inventory_id) {
        (None, None) => core::cmp::Ordering::Equal,
        (None, Some(_)) => core::cmp::Ordering::Greater,
        (Some(_), None) => core::cmp::Ordering::Less,
        (Some(_), Some(_)) => cmp_names(
            a.name.as_deref().unwrap_or(""),
            b.name.as_deref().unwrap_or(""),
        ),
    });

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::SelectionItem;
    use stockpick_core::{LotId, ProductId};

    fn named_inventory(name: &str) -> Inventory {
        Inventory::new(InventoryId::new(), name, None)
    }

    #[test]
    fn groups_sort_alphabetically_with_unset_last() {
        let ward = named_inventory("Ward");
        let archive = named_inventory("archive");

        let (store, _) = SelectionStore::new().add_line_with_product(ward.id(), ProductId::new());
        let (store, _) = store.add_line_with_product(archive.id(), ProductId::new());
        let store = store.add_line(); // unset sentinel line

        let groups = group_by_inventory(&store, &[ward.clone(), archive.clone()]);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].name.as_deref(), Some("archive"));
        assert_eq!(groups[1].name.as_deref(), Some("Ward"));
        assert_eq!(groups[2].inventory_id, None);
        assert_eq!(groups[2].name, None);
    }

    #[test]
    fn lines_of_one_inventory_share_a_group() {
        let ward = named_inventory("Ward");
        let (store, first) = SelectionStore::new().add_line_with_product(ward.id(), ProductId::new());
        let (store, _) = store.add_line_with_product(ward.id(), ProductId::new());
        let (store, _) = store
            .add_item(first, SelectionItem::consumable(LotId::new(), 1.0))
            .unwrap();

        let groups = group_by_inventory(&store, &[ward]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].line_indices, vec![0, 1]);
        assert_eq!(groups[0].item_count, 1);
    }

    #[test]
    fn removing_an_item_drops_the_group_count_by_one() {
        let ward = named_inventory("Ward");
        let (store, index) = SelectionStore::new().add_line_with_product(ward.id(), ProductId::new());
        let (store, _) = store
            .add_item(index, SelectionItem::consumable(LotId::new(), 1.0))
            .unwrap();
        let (store, removable) = store
            .add_item(index, SelectionItem::consumable(LotId::new(), 2.0))
            .unwrap();

        let before = group_by_inventory(&store, std::slice::from_ref(&ward));
        let store = store.remove_item(index, removable).unwrap();
        let after = group_by_inventory(&store, std::slice::from_ref(&ward));

        assert_eq!(after[0].item_count, before[0].item_count - 1);
    }

    #[test]
    fn unknown_inventory_ids_group_without_a_name() {
        let (store, _) = SelectionStore::new().add_line_with_product(InventoryId::new(), ProductId::new());
        let groups = group_by_inventory(&store, &[]);
        assert_eq!(groups.len(), 1);
        assert!(groups[0].inventory_id.is_some());
        assert_eq!(groups[0].name, None);
    }
}
