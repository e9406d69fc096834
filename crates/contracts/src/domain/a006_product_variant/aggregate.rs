use crate::domain::a004_manufactured_product::aggregate::ManufacturedProductId;
use crate::domain::common::AggregateRoot;
use serde::{Deserialize, Serialize};

crate::aggregate_id!(ProductVariantId);

/// Talla/color combination of a manufactured product with its own stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: ProductVariantId,
    #[serde(rename = "producto_fabricado_id")]
    pub product_id: ManufacturedProductId,
    #[serde(rename = "talla")]
    pub size: String,
    pub color: String,
    #[serde(rename = "stockActual")]
    pub stock: i64,
    #[serde(default)]
    pub meli_id: Option<String>,
    /// Parent product name, filled by the backend for display
    #[serde(rename = "producto_nombre", default)]
    pub product_name: Option<String>,
    /// Parent product sale price, filled by the backend
    #[serde(rename = "precioVenta", default)]
    pub sale_price: f64,
}

impl ProductVariant {
    /// "Pijama Azul (M/Azul)"
    pub fn label(&self) -> String {
        format!(
            "{} ({}/{})",
            self.product_name.as_deref().unwrap_or("Producto"),
            self.size,
            self.color
        )
    }

    /// "M / Azul"
    pub fn variant_label(&self) -> String {
        format!("{} / {}", self.size, self.color)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductVariantDto {
    #[serde(rename = "producto_fabricado_id")]
    pub product_id: ManufacturedProductId,
    #[serde(rename = "talla")]
    pub size: String,
    pub color: String,
    #[serde(rename = "stockActual", default)]
    pub stock: i64,
}

impl ProductVariantDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.product_id.0 <= 0 {
            return Err("Selecciona el producto de la variante".into());
        }
        if self.size.trim().is_empty() || self.color.trim().is_empty() {
            return Err("Talla y color son obligatorios".into());
        }
        if self.stock < 0 {
            return Err("El stock inicial no puede ser negativo".into());
        }
        Ok(())
    }
}

impl AggregateRoot for ProductVariant {
    type Id = ProductVariantId;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn aggregate_index() -> &'static str {
        "a006"
    }

    fn collection_name() -> &'static str {
        "product_variant"
    }

    fn element_name() -> &'static str {
        "Variante"
    }

    fn list_name() -> &'static str {
        "Variantes"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        let v = ProductVariant {
            id: ProductVariantId(3),
            product_id: ManufacturedProductId(1),
            size: "M".into(),
            color: "Azul".into(),
            stock: 4,
            meli_id: None,
            product_name: Some("Pijama".into()),
            sale_price: 399.0,
        };
        assert_eq!(v.label(), "Pijama (M/Azul)");
        assert_eq!(v.variant_label(), "M / Azul");
    }

    #[test]
    fn test_validate_requires_parent() {
        let dto = ProductVariantDto {
            size: "S".into(),
            color: "Rojo".into(),
            ..Default::default()
        };
        assert!(dto.validate().is_err());
    }
}
