//! References to sellable / purchasable items.
//!
//! Sales reference either a manufactured variant or a resale product;
//! purchases reference either a raw material or a resale product. The
//! string form (`var-3`, `rev-7`, `mat-2`) is what select boxes and the
//! marketplace sync list carry.

use crate::domain::a003_raw_material::aggregate::RawMaterialId;
use crate::domain::a005_resale_product::aggregate::ResaleProductId;
use crate::domain::a006_product_variant::aggregate::ProductVariantId;
use crate::enums::ProductKind;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StockItemRef {
    Variant(ProductVariantId),
    Resale(ResaleProductId),
}

impl StockItemRef {
    pub fn unique_id(&self) -> String {
        match self {
            StockItemRef::Variant(id) => format!("var-{}", id),
            StockItemRef::Resale(id) => format!("rev-{}", id),
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let (prefix, raw) = value.split_once('-')?;
        let id: i64 = raw.parse().ok()?;
        if id <= 0 {
            return None;
        }
        match prefix {
            "var" => Some(StockItemRef::Variant(ProductVariantId(id))),
            "rev" => Some(StockItemRef::Resale(ResaleProductId(id))),
            _ => None,
        }
    }

    pub fn kind(&self) -> ProductKind {
        match self {
            StockItemRef::Variant(_) => ProductKind::Manufactured,
            StockItemRef::Resale(_) => ProductKind::Resale,
        }
    }

    pub fn db_id(&self) -> i64 {
        match self {
            StockItemRef::Variant(id) => id.0,
            StockItemRef::Resale(id) => id.0,
        }
    }
}

impl fmt::Display for StockItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.unique_id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PurchaseItemRef {
    Material(RawMaterialId),
    Resale(ResaleProductId),
}

impl PurchaseItemRef {
    pub fn unique_id(&self) -> String {
        match self {
            PurchaseItemRef::Material(id) => format!("mat-{}", id),
            PurchaseItemRef::Resale(id) => format!("rev-{}", id),
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let (prefix, raw) = value.split_once('-')?;
        let id: i64 = raw.parse().ok()?;
        if id <= 0 {
            return None;
        }
        match prefix {
            "mat" => Some(PurchaseItemRef::Material(RawMaterialId(id))),
            "rev" => Some(PurchaseItemRef::Resale(ResaleProductId(id))),
            _ => None,
        }
    }

    /// Resale products are counted in whole units; materials may be fractional.
    pub fn whole_units(&self) -> bool {
        matches!(self, PurchaseItemRef::Resale(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_id_round_trip() {
        let v = StockItemRef::Variant(ProductVariantId(12));
        assert_eq!(v.unique_id(), "var-12");
        assert_eq!(StockItemRef::parse("var-12"), Some(v));
        assert_eq!(
            StockItemRef::parse("rev-3"),
            Some(StockItemRef::Resale(ResaleProductId(3)))
        );
        assert_eq!(v.kind(), ProductKind::Manufactured);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "var", "var-", "var-x", "mat-1", "xyz-2", "rev--1", "var-0"] {
            assert!(StockItemRef::parse(bad).is_none(), "{bad}");
        }
        assert!(PurchaseItemRef::parse("var-1").is_none());
        assert_eq!(
            PurchaseItemRef::parse("mat-4"),
            Some(PurchaseItemRef::Material(RawMaterialId(4)))
        );
    }
}
