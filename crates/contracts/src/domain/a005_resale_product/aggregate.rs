use crate::domain::a001_supplier::aggregate::{Supplier, SupplierId};
use crate::domain::common::AggregateRoot;
use serde::{Deserialize, Serialize};

crate::aggregate_id!(ResaleProductId);

/// Producto de reventa: bought finished, sold as is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResaleProduct {
    pub id: ResaleProductId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "costoCompra")]
    pub purchase_cost: f64,
    #[serde(rename = "precioVenta")]
    pub sale_price: f64,
    #[serde(rename = "stockActual")]
    pub stock: i64,
    #[serde(rename = "proveedor_id", default)]
    pub supplier_id: Option<SupplierId>,
    #[serde(rename = "proveedor", default)]
    pub supplier: Option<Supplier>,
    #[serde(default)]
    pub meli_id: Option<String>,
}

impl ResaleProduct {
    pub fn margin(&self) -> f64 {
        self.sale_price - self.purchase_cost
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResaleProductDto {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "costoCompra")]
    pub purchase_cost: f64,
    #[serde(rename = "precioVenta")]
    pub sale_price: f64,
    #[serde(rename = "stockActual", default)]
    pub stock: i64,
    #[serde(rename = "proveedor_id", default)]
    pub supplier_id: Option<SupplierId>,
}

impl ResaleProductDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("El nombre del producto es obligatorio".into());
        }
        if !self.purchase_cost.is_finite() || self.purchase_cost < 0.0 {
            return Err("El costo de compra no puede ser negativo".into());
        }
        if !self.sale_price.is_finite() || self.sale_price < 0.0 {
            return Err("El precio de venta no puede ser negativo".into());
        }
        if self.stock < 0 {
            return Err("El stock inicial no puede ser negativo".into());
        }
        Ok(())
    }
}

impl AggregateRoot for ResaleProduct {
    type Id = ResaleProductId;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn aggregate_index() -> &'static str {
        "a005"
    }

    fn collection_name() -> &'static str {
        "resale_product"
    }

    fn element_name() -> &'static str {
        "Producto de reventa"
    }

    fn list_name() -> &'static str {
        "Productos de reventa"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        let mut dto = ResaleProductDto {
            name: "Sábana Matrimonial".into(),
            purchase_cost: 300.0,
            sale_price: 599.0,
            stock: 10,
            ..Default::default()
        };
        assert!(dto.validate().is_ok());
        dto.stock = -1;
        assert_eq!(
            dto.validate().unwrap_err(),
            "El stock inicial no puede ser negativo"
        );
    }
}
