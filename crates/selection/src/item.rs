//! Selected resource items: one concrete lot or asset per item.

use serde::{Deserialize, Serialize};

use stockpick_core::{AssetId, LotId};

/// A single chosen resource, discriminated by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SelectionItem {
    /// A quantity drawn from one consumable lot.
    Consumable { lot_id: LotId, quantity: f64 },
    /// An exclusive reservation of one asset unit.
    Asset { asset_id: AssetId },
}

impl SelectionItem {
    pub fn consumable(lot_id: LotId, quantity: f64) -> Self {
        Self::Consumable { lot_id, quantity }
    }

    pub fn asset(asset_id: AssetId) -> Self {
        Self::Asset { asset_id }
    }

    pub fn is_consumable(&self) -> bool {
        matches!(self, Self::Consumable { .. })
    }

    pub fn lot_id(&self) -> Option<LotId> {
        match self {
            Self::Consumable { lot_id, .. } => Some(*lot_id),
            Self::Asset { .. } => None,
        }
    }

    pub fn asset_id(&self) -> Option<AssetId> {
        match self {
            Self::Consumable { .. } => None,
            Self::Asset { asset_id } => Some(*asset_id),
        }
    }

    pub fn quantity(&self) -> Option<f64> {
        match self {
            Self::Consumable { quantity, .. } => Some(*quantity),
            Self::Asset { .. } => None,
        }
    }
}
