use crate::domain::a002_sales_channel::aggregate::{SalesChannel, SalesChannelId};
use crate::domain::a005_resale_product::aggregate::ResaleProductId;
use crate::domain::a006_product_variant::aggregate::ProductVariantId;
use crate::domain::common::AggregateRoot;
use crate::enums::SalesOrderStatus;
use crate::shared::cart::CartLine;
use crate::shared::stock_item::StockItemRef;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

crate::aggregate_id!(SalesOrderId);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesOrder {
    pub id: SalesOrderId,
    #[serde(rename = "fecha")]
    pub date: DateTime<Utc>,
    #[serde(rename = "estado")]
    pub status: SalesOrderStatus,
    #[serde(rename = "canal_venta_id")]
    pub channel_id: SalesChannelId,
    #[serde(rename = "canal", default)]
    pub channel: Option<SalesChannel>,
    #[serde(rename = "usuario_id", default)]
    pub user_id: Option<i64>,
    #[serde(rename = "detalles", default)]
    pub lines: Vec<SalesOrderLine>,
}

impl SalesOrder {
    pub fn total(&self) -> f64 {
        self.lines.iter().map(SalesOrderLine::subtotal).sum()
    }

    pub fn channel_name(&self) -> &str {
        self.channel
            .as_ref()
            .map(|c| c.name.as_str())
            .unwrap_or("Desconocido")
    }

    /// "Pijama (M/Azul) x2, Gorra x1"
    pub fn items_summary(&self) -> String {
        self.lines
            .iter()
            .map(|l| format!("{} x{}", l.name, l.quantity))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesOrderLine {
    pub id: i64,
    #[serde(rename = "cantidad")]
    pub quantity: i64,
    #[serde(rename = "precioUnitario")]
    pub unit_price: f64,
    #[serde(rename = "variante_producto_id", default)]
    pub variant_id: Option<ProductVariantId>,
    #[serde(rename = "producto_reventa_id", default)]
    pub resale_product_id: Option<ResaleProductId>,
    #[serde(rename = "nombre", default)]
    pub name: String,
}

impl SalesOrderLine {
    pub fn subtotal(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }

    pub fn item_ref(&self) -> Option<StockItemRef> {
        item_ref(self.variant_id, self.resale_product_id)
    }
}

fn item_ref(
    variant_id: Option<ProductVariantId>,
    resale_product_id: Option<ResaleProductId>,
) -> Option<StockItemRef> {
    match (variant_id, resale_product_id) {
        (Some(v), None) => Some(StockItemRef::Variant(v)),
        (None, Some(r)) => Some(StockItemRef::Resale(r)),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesOrderLineDto {
    #[serde(rename = "cantidad")]
    pub quantity: i64,
    #[serde(rename = "precioUnitario")]
    pub unit_price: f64,
    #[serde(rename = "variante_producto_id", default)]
    pub variant_id: Option<ProductVariantId>,
    #[serde(rename = "producto_reventa_id", default)]
    pub resale_product_id: Option<ResaleProductId>,
}

impl SalesOrderLineDto {
    pub fn item_ref(&self) -> Option<StockItemRef> {
        item_ref(self.variant_id, self.resale_product_id)
    }

    pub fn validate(&self) -> Result<StockItemRef, String> {
        let item = self
            .item_ref()
            .ok_or_else(|| "El detalle debe tener un producto asociado".to_string())?;
        if self.quantity <= 0 {
            return Err("La cantidad debe ser mayor a cero".into());
        }
        if !self.unit_price.is_finite() || self.unit_price < 0.0 {
            return Err("El precio unitario no puede ser negativo".into());
        }
        Ok(item)
    }
}

impl From<&CartLine<StockItemRef>> for SalesOrderLineDto {
    fn from(line: &CartLine<StockItemRef>) -> Self {
        let (variant_id, resale_product_id) = match line.reference {
            StockItemRef::Variant(id) => (Some(id), None),
            StockItemRef::Resale(id) => (None, Some(id)),
        };
        Self {
            quantity: line.quantity.round() as i64,
            unit_price: line.unit_price,
            variant_id,
            resale_product_id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesOrderDto {
    #[serde(rename = "canal_venta_id")]
    pub channel_id: SalesChannelId,
    #[serde(rename = "detalles")]
    pub lines: Vec<SalesOrderLineDto>,
}

impl SalesOrderDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.channel_id.0 <= 0 {
            return Err("Selecciona un canal de venta".into());
        }
        if self.lines.is_empty() {
            return Err("La venta debe tener al menos un producto".into());
        }
        for line in &self.lines {
            line.validate()?;
        }
        Ok(())
    }

    /// Units requested per item, summed over all lines, first-appearance order.
    pub fn demand(&self) -> Vec<(StockItemRef, i64)> {
        let mut result: Vec<(StockItemRef, i64)> = Vec::new();
        for line in &self.lines {
            let Some(item) = line.item_ref() else {
                continue;
            };
            match result.iter_mut().find(|(r, _)| *r == item) {
                Some((_, qty)) => *qty += line.quantity,
                None => result.push((item, line.quantity)),
            }
        }
        result
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesStatusUpdate {
    #[serde(rename = "estado")]
    pub status: SalesOrderStatus,
}

impl AggregateRoot for SalesOrder {
    type Id = SalesOrderId;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn aggregate_index() -> &'static str {
        "a010"
    }

    fn collection_name() -> &'static str {
        "sales_order"
    }

    fn element_name() -> &'static str {
        "Venta"
    }

    fn list_name() -> &'static str {
        "Ventas"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(variant: Option<i64>, resale: Option<i64>, qty: i64) -> SalesOrderLineDto {
        SalesOrderLineDto {
            quantity: qty,
            unit_price: 100.0,
            variant_id: variant.map(ProductVariantId),
            resale_product_id: resale.map(ResaleProductId),
        }
    }

    #[test]
    fn test_demand_sums_repeated_items() {
        let dto = SalesOrderDto {
            channel_id: SalesChannelId(1),
            lines: vec![line(Some(1), None, 2), line(None, Some(1), 1), line(Some(1), None, 3)],
        };
        assert!(dto.validate().is_ok());
        assert_eq!(
            dto.demand(),
            vec![
                (StockItemRef::Variant(ProductVariantId(1)), 5),
                (StockItemRef::Resale(ResaleProductId(1)), 1)
            ]
        );
    }

    #[test]
    fn test_line_without_product_is_rejected() {
        assert_eq!(
            line(None, None, 1).validate().unwrap_err(),
            "El detalle debe tener un producto asociado"
        );
        assert!(line(Some(1), None, 0).validate().is_err());
    }

    #[test]
    fn test_cart_payload_rounds_units() {
        use crate::shared::cart::{Cart, CatalogEntry};
        let item = StockItemRef::Resale(ResaleProductId(3));
        let catalog = vec![CatalogEntry {
            reference: item,
            name: "Gorra".into(),
            stock_limit: Some(10.0),
            default_price: 120.0,
            whole_units: true,
        }];
        let mut cart = Cart::for_sale();
        cart.add(&item, 2.0, 120.0, &catalog).unwrap();
        let payload: Vec<SalesOrderLineDto> = cart.to_payload(|l| SalesOrderLineDto::from(l));
        assert_eq!(payload.len(), 1);
        assert_eq!(payload[0].quantity, 2);
        assert_eq!(payload[0].resale_product_id, Some(ResaleProductId(3)));
        assert_eq!(payload[0].variant_id, None);
        assert_eq!(payload[0].unit_price, 120.0);
    }

    #[test]
    fn test_items_summary() {
        let order = SalesOrder {
            id: SalesOrderId(7),
            date: Utc::now(),
            status: SalesOrderStatus::Paid,
            channel_id: SalesChannelId(1),
            channel: None,
            user_id: None,
            lines: vec![
                SalesOrderLine {
                    id: 1,
                    quantity: 2,
                    unit_price: 350.0,
                    variant_id: Some(ProductVariantId(1)),
                    resale_product_id: None,
                    name: "Pijama (M/Azul)".into(),
                },
                SalesOrderLine {
                    id: 2,
                    quantity: 1,
                    unit_price: 120.0,
                    variant_id: None,
                    resale_product_id: Some(ResaleProductId(3)),
                    name: "Gorra".into(),
                },
            ],
        };
        assert_eq!(order.items_summary(), "Pijama (M/Azul) x2, Gorra x1");
        assert_eq!(order.total(), 820.0);
        assert_eq!(order.channel_name(), "Desconocido");
    }
}
