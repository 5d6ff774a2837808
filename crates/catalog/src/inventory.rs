//! Inventories: the stock locations the wizard picks from.

use serde::{Deserialize, Serialize};

use stockpick_core::InventoryId;

use crate::product::{ManagementType, SelectionPurpose};

/// Summary product counts for an inventory, by management type.
///
/// These come from the catalog listing endpoint and may lag behind the full
/// product graph; they only drive the Inventory step's eligibility check
/// before products are loaded.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCounts {
    pub consumable: u32,
    pub serialized_asset: u32,
    pub general_asset: u32,
}

impl ProductCounts {
    pub fn of(&self, management_type: ManagementType) -> u32 {
        match management_type {
            ManagementType::Consumable => self.consumable,
            ManagementType::SerializedAsset => self.serialized_asset,
            ManagementType::GeneralAsset => self.general_asset,
        }
    }

    /// Total count of products matching a selection purpose.
    pub fn matching(&self, purpose: SelectionPurpose) -> u32 {
        match purpose {
            SelectionPurpose::Consumables => self.consumable,
            SelectionPurpose::Assets => self.serialized_asset + self.general_asset,
        }
    }
}

/// A stock location, as listed in the catalog snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    id: InventoryId,
    name: String,
    /// `None` means the summary counts are unknown, which the Inventory step
    /// treats as eligible (optimistic inclusion).
    counts: Option<ProductCounts>,
}

impl Inventory {
    pub fn new(id: InventoryId, name: impl Into<String>, counts: Option<ProductCounts>) -> Self {
        Self {
            id,
            name: name.into(),
            counts,
        }
    }

    pub fn id(&self) -> InventoryId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn counts(&self) -> Option<&ProductCounts> {
        self.counts.as_ref()
    }

    /// Whether the summary counts admit at least one product for `purpose`.
    ///
    /// Unknown counts admit everything; the Product step will show what is
    /// actually there once the load completes.
    pub fn may_contain(&self, purpose: SelectionPurpose) -> bool {
        match &self.counts {
            Some(counts) => counts.matching(purpose) > 0,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(consumable: u32, serialized: u32, general: u32) -> ProductCounts {
        ProductCounts {
            consumable,
            serialized_asset: serialized,
            general_asset: general,
        }
    }

    #[test]
    fn matching_sums_both_asset_kinds() {
        let c = counts(3, 1, 2);
        assert_eq!(c.matching(SelectionPurpose::Consumables), 3);
        assert_eq!(c.matching(SelectionPurpose::Assets), 3);
    }

    #[test]
    fn unknown_counts_are_optimistically_eligible() {
        let inv = Inventory::new(InventoryId::new(), "Ward A", None);
        assert!(inv.may_contain(SelectionPurpose::Consumables));
        assert!(inv.may_contain(SelectionPurpose::Assets));
    }

    #[test]
    fn zero_counts_are_not_eligible() {
        let inv = Inventory::new(InventoryId::new(), "Ward B", Some(counts(0, 0, 4)));
        assert!(!inv.may_contain(SelectionPurpose::Consumables));
        assert!(inv.may_contain(SelectionPurpose::Assets));
    }
}
