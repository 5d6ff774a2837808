//! Products and the lots/assets they own.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stockpick_core::{AssetId, LotId, ProductId};

/// How a product's stock is tracked.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ManagementType {
    /// Depletable stock tracked per lot.
    Consumable,
    /// Discrete units tracked individually by serial number.
    SerializedAsset,
    /// Discrete units tracked individually without serials.
    GeneralAsset,
}

/// What kind of resources a wizard session is picking.
///
/// Both asset management types are selectable in an asset session; the split
/// only matters for how units are labeled.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SelectionPurpose {
    Consumables,
    Assets,
}

impl SelectionPurpose {
    pub fn matches(self, management_type: ManagementType) -> bool {
        match self {
            SelectionPurpose::Consumables => management_type == ManagementType::Consumable,
            SelectionPurpose::Assets => matches!(
                management_type,
                ManagementType::SerializedAsset | ManagementType::GeneralAsset
            ),
        }
    }
}

/// A batch of a consumable product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lot {
    pub id: LotId,
    pub lot_number: String,
    /// Quantity physically on hand. Display-level offerable quantity equals
    /// this value; sibling selections never reduce it because a lot cannot be
    /// split across lines.
    pub current_quantity: f64,
    pub reserved_quantity: f64,
    pub unit: String,
    pub expiration_date: Option<NaiveDate>,
}

/// Operational status of a discrete asset unit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AssetStatus {
    Available,
    InUse,
    InMaintenance,
    Discarded,
}

/// A discrete, exclusively reservable unit of an asset product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: AssetId,
    pub serial_number: Option<String>,
    pub assigned_name: Option<String>,
    pub status: AssetStatus,
}

impl Asset {
    /// Only `Available` assets can be offered for selection.
    pub fn is_selectable(&self) -> bool {
        self.status == AssetStatus::Available
    }

    /// Human-readable label: assigned name, else serial number, else the id.
    pub fn label(&self) -> String {
        if let Some(name) = &self.assigned_name {
            return name.clone();
        }
        if let Some(serial) = &self.serial_number {
            return serial.clone();
        }
        self.id.to_string()
    }
}

/// A catalog product together with its owned lot/asset graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    management_type: ManagementType,
    /// Whether quantity edits may carry fractional values.
    allows_decimals: bool,
    lots: Vec<Lot>,
    assets: Vec<Asset>,
}

impl Product {
    pub fn consumable(
        id: ProductId,
        name: impl Into<String>,
        allows_decimals: bool,
        lots: Vec<Lot>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            management_type: ManagementType::Consumable,
            allows_decimals,
            lots,
            assets: Vec::new(),
        }
    }

    pub fn asset(
        id: ProductId,
        name: impl Into<String>,
        management_type: ManagementType,
        assets: Vec<Asset>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            management_type,
            allows_decimals: false,
            lots: Vec::new(),
            assets,
        }
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn management_type(&self) -> ManagementType {
        self.management_type
    }

    pub fn allows_decimals(&self) -> bool {
        self.allows_decimals
    }

    pub fn is_consumable(&self) -> bool {
        self.management_type == ManagementType::Consumable
    }

    pub fn lots(&self) -> &[Lot] {
        &self.lots
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn lot(&self, id: LotId) -> Option<&Lot> {
        self.lots.iter().find(|l| l.id == id)
    }

    pub fn asset_by_id(&self, id: AssetId) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn purpose_matches_management_types() {
        assert!(SelectionPurpose::Consumables.matches(ManagementType::Consumable));
        assert!(!SelectionPurpose::Consumables.matches(ManagementType::SerializedAsset));
        assert!(SelectionPurpose::Assets.matches(ManagementType::SerializedAsset));
        assert!(SelectionPurpose::Assets.matches(ManagementType::GeneralAsset));
        assert!(!SelectionPurpose::Assets.matches(ManagementType::Consumable));
    }

    #[test]
    fn asset_label_prefers_assigned_name_then_serial() {
        let id = AssetId::new();
        let mut asset = Asset {
            id,
            serial_number: Some("SN-42".to_string()),
            assigned_name: Some("Ultrasound #2".to_string()),
            status: AssetStatus::Available,
        };
        assert_eq!(asset.label(), "Ultrasound #2");

        asset.assigned_name = None;
        assert_eq!(asset.label(), "SN-42");

        asset.serial_number = None;
        assert_eq!(asset.label(), id.to_string());
    }

    #[test]
    fn only_available_assets_are_selectable() {
        let mut asset = Asset {
            id: AssetId::new(),
            serial_number: None,
            assigned_name: None,
            status: AssetStatus::Available,
        };
        assert!(asset.is_selectable());

        for status in [
            AssetStatus::InUse,
            AssetStatus::InMaintenance,
            AssetStatus::Discarded,
        ] {
            asset.status = status;
            assert!(!asset.is_selectable());
        }
    }

    #[test]
    fn lot_and_asset_lookup_by_id() {
        let lot_id = LotId::new();
        let product = Product::consumable(
            ProductId::new(),
            "Saline 0.9%",
            true,
            vec![Lot {
                id: lot_id,
                lot_number: "L-001".to_string(),
                current_quantity: 5.0,
                reserved_quantity: 0.0,
                unit: "ml".to_string(),
                expiration_date: None,
            }],
        );

        assert!(product.lot(lot_id).is_some());
        assert!(product.lot(LotId::new()).is_none());
        assert!(product.asset_by_id(AssetId::new()).is_none());
    }
}
