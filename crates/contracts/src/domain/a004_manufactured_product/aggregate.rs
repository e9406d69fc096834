use crate::domain::a006_product_variant::aggregate::ProductVariant;
use crate::domain::common::AggregateRoot;
use serde::{Deserialize, Serialize};

crate::aggregate_id!(ManufacturedProductId);

/// Producto fabricado (pijama, sábana...). Stock lives on its variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManufacturedProduct {
    pub id: ManufacturedProductId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "precioVenta")]
    pub sale_price: f64,
    #[serde(rename = "variantes", default)]
    pub variants: Vec<ProductVariant>,
}

impl ManufacturedProduct {
    pub fn total_stock(&self) -> i64 {
        self.variants.iter().map(|v| v.stock).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManufacturedProductDto {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "precioVenta")]
    pub sale_price: f64,
}

impl ManufacturedProductDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("El nombre del producto es obligatorio".into());
        }
        if !self.sale_price.is_finite() || self.sale_price < 0.0 {
            return Err("El precio de venta no puede ser negativo".into());
        }
        Ok(())
    }
}

impl AggregateRoot for ManufacturedProduct {
    type Id = ManufacturedProductId;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn aggregate_index() -> &'static str {
        "a004"
    }

    fn collection_name() -> &'static str {
        "manufactured_product"
    }

    fn element_name() -> &'static str {
        "Producto fabricado"
    }

    fn list_name() -> &'static str {
        "Productos fabricados"
    }
}
