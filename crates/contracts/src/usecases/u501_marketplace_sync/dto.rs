use crate::domain::a005_resale_product::aggregate::ResaleProductId;
use crate::domain::a006_product_variant::aggregate::ProductVariantId;
use crate::shared::stock_item::StockItemRef;
use serde::{Deserialize, Serialize};

/// One sellable item in the unified sync list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncProduct {
    /// `var-<id>` or `rev-<id>`
    pub unique_id: String,
    /// "Variante" or "Reventa"
    pub tipo: String,
    pub id_db: i64,
    pub nombre: String,
    pub precio: f64,
    pub stock: i64,
    #[serde(default)]
    pub meli_id: Option<String>,
}

impl SyncProduct {
    pub fn is_published(&self) -> bool {
        self.meli_id.as_deref().is_some_and(|id| !id.is_empty())
    }

    pub fn item_ref(&self) -> Option<StockItemRef> {
        StockItemRef::parse(&self.unique_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublishRequest {
    #[serde(default)]
    pub variante_id: Option<ProductVariantId>,
    #[serde(default)]
    pub reventa_id: Option<ResaleProductId>,
    pub title: String,
    pub price: f64,
    pub available_quantity: i64,
}

impl PublishRequest {
    pub fn for_item(item: &SyncProduct) -> Option<Self> {
        let reference = item.item_ref()?;
        let (variante_id, reventa_id) = match reference {
            StockItemRef::Variant(id) => (Some(id), None),
            StockItemRef::Resale(id) => (None, Some(id)),
        };
        Some(Self {
            variante_id,
            reventa_id,
            title: item.nombre.clone(),
            price: item.precio,
            available_quantity: item.stock,
        })
    }

    /// Exactly one target id is accepted.
    pub fn target(&self) -> Result<StockItemRef, String> {
        match (self.variante_id, self.reventa_id) {
            (Some(v), None) => Ok(StockItemRef::Variant(v)),
            (None, Some(r)) => Ok(StockItemRef::Resale(r)),
            (Some(_), Some(_)) => Err("Indica solo una variante o un producto de reventa".into()),
            (None, None) => Err("Debes indicar una variante o un producto de reventa".into()),
        }
    }

    pub fn validate(&self) -> Result<StockItemRef, String> {
        let target = self.target()?;
        if self.title.trim().is_empty() {
            return Err("El título de la publicación es obligatorio".into());
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err("El precio no puede ser negativo".into());
        }
        if self.available_quantity < 0 {
            return Err("La cantidad disponible no puede ser negativa".into());
        }
        Ok(target)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateListingRequest {
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub available_quantity: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncResponse {
    pub status: String,
    #[serde(default)]
    pub meli_id: Option<String>,
    pub message: String,
}

impl SyncResponse {
    pub fn success(meli_id: Option<String>, message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            meli_id,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(unique_id: &str, meli: Option<&str>) -> SyncProduct {
        SyncProduct {
            unique_id: unique_id.into(),
            tipo: "Variante".into(),
            id_db: 3,
            nombre: "Pijama - M Azul".into(),
            precio: 399.0,
            stock: 5,
            meli_id: meli.map(String::from),
        }
    }

    #[test]
    fn test_publish_request_from_item() {
        let req = PublishRequest::for_item(&item("var-3", None)).unwrap();
        assert_eq!(req.variante_id, Some(ProductVariantId(3)));
        assert_eq!(req.reventa_id, None);
        assert_eq!(req.available_quantity, 5);
        assert_eq!(req.validate(), Ok(StockItemRef::Variant(ProductVariantId(3))));
    }

    #[test]
    fn test_publish_requires_exactly_one_target() {
        let mut req = PublishRequest {
            title: "X".into(),
            ..Default::default()
        };
        assert!(req.target().is_err());
        req.variante_id = Some(ProductVariantId(1));
        req.reventa_id = Some(ResaleProductId(1));
        assert!(req.target().is_err());
    }

    #[test]
    fn test_is_published() {
        assert!(!item("var-3", None).is_published());
        assert!(!item("var-3", Some("")).is_published());
        assert!(item("var-3", Some("MLM-1A2B3C4D")).is_published());
    }
}
