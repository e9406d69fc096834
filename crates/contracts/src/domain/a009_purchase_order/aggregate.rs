use crate::domain::a001_supplier::aggregate::{Supplier, SupplierId};
use crate::domain::a003_raw_material::aggregate::RawMaterialId;
use crate::domain::a005_resale_product::aggregate::ResaleProductId;
use crate::domain::common::AggregateRoot;
use crate::enums::PurchaseOrderStatus;
use crate::shared::cart::CartLine;
use crate::shared::stock_item::PurchaseItemRef;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

crate::aggregate_id!(PurchaseOrderId);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: PurchaseOrderId,
    #[serde(rename = "fecha")]
    pub date: DateTime<Utc>,
    #[serde(rename = "estado")]
    pub status: PurchaseOrderStatus,
    #[serde(rename = "proveedor_id")]
    pub supplier_id: SupplierId,
    #[serde(rename = "proveedor", default)]
    pub supplier: Option<Supplier>,
    #[serde(rename = "detalles", default)]
    pub lines: Vec<PurchaseOrderLine>,
}

impl PurchaseOrder {
    pub fn total(&self) -> f64 {
        self.lines.iter().map(PurchaseOrderLine::subtotal).sum()
    }

    pub fn supplier_name(&self) -> &str {
        self.supplier
            .as_ref()
            .map(|s| s.name.as_str())
            .unwrap_or("Sin proveedor")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrderLine {
    pub id: i64,
    #[serde(rename = "cantidad")]
    pub quantity: f64,
    #[serde(rename = "costoUnitario")]
    pub unit_cost: f64,
    #[serde(rename = "materia_prima_id", default)]
    pub material_id: Option<RawMaterialId>,
    #[serde(rename = "producto_reventa_id", default)]
    pub resale_product_id: Option<ResaleProductId>,
    #[serde(rename = "nombre", default)]
    pub name: String,
}

impl PurchaseOrderLine {
    pub fn subtotal(&self) -> f64 {
        self.quantity * self.unit_cost
    }

    pub fn item_ref(&self) -> Option<PurchaseItemRef> {
        item_ref(self.material_id, self.resale_product_id)
    }
}

fn item_ref(
    material_id: Option<RawMaterialId>,
    resale_product_id: Option<ResaleProductId>,
) -> Option<PurchaseItemRef> {
    match (material_id, resale_product_id) {
        (Some(m), None) => Some(PurchaseItemRef::Material(m)),
        (None, Some(r)) => Some(PurchaseItemRef::Resale(r)),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrderLineDto {
    #[serde(rename = "cantidad")]
    pub quantity: f64,
    #[serde(rename = "costoUnitario")]
    pub unit_cost: f64,
    #[serde(rename = "materia_prima_id", default)]
    pub material_id: Option<RawMaterialId>,
    #[serde(rename = "producto_reventa_id", default)]
    pub resale_product_id: Option<ResaleProductId>,
}

impl PurchaseOrderLineDto {
    /// Exactly one of material / resale product must be set.
    pub fn item_ref(&self) -> Option<PurchaseItemRef> {
        item_ref(self.material_id, self.resale_product_id)
    }

    pub fn validate(&self) -> Result<PurchaseItemRef, String> {
        let item = self
            .item_ref()
            .ok_or_else(|| "El detalle debe tener un material o producto asociado".to_string())?;
        if !self.quantity.is_finite() || self.quantity <= 0.0 {
            return Err("La cantidad debe ser mayor a cero".into());
        }
        if item.whole_units() && self.quantity.fract() != 0.0 {
            return Err("La cantidad de un producto de reventa debe ser entera".into());
        }
        if !self.unit_cost.is_finite() || self.unit_cost < 0.0 {
            return Err("El costo unitario no puede ser negativo".into());
        }
        Ok(item)
    }
}

impl From<&CartLine<PurchaseItemRef>> for PurchaseOrderLineDto {
    fn from(line: &CartLine<PurchaseItemRef>) -> Self {
        let (material_id, resale_product_id) = match line.reference {
            PurchaseItemRef::Material(id) => (Some(id), None),
            PurchaseItemRef::Resale(id) => (None, Some(id)),
        };
        Self {
            quantity: line.quantity,
            unit_cost: line.unit_price,
            material_id,
            resale_product_id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrderDto {
    #[serde(rename = "proveedor_id")]
    pub supplier_id: SupplierId,
    #[serde(rename = "detalles")]
    pub lines: Vec<PurchaseOrderLineDto>,
}

impl PurchaseOrderDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.supplier_id.0 <= 0 {
            return Err("Selecciona un proveedor".into());
        }
        if self.lines.is_empty() {
            return Err("La orden debe tener al menos un artículo".into());
        }
        for line in &self.lines {
            line.validate()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseStatusUpdate {
    #[serde(rename = "estado")]
    pub status: PurchaseOrderStatus,
}

impl AggregateRoot for PurchaseOrder {
    type Id = PurchaseOrderId;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn aggregate_index() -> &'static str {
        "a009"
    }

    fn collection_name() -> &'static str {
        "purchase_order"
    }

    fn element_name() -> &'static str {
        "Orden de compra"
    }

    fn list_name() -> &'static str {
        "Compras"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::cart::{Cart, CatalogEntry};

    fn line(material: Option<i64>, resale: Option<i64>, qty: f64) -> PurchaseOrderLineDto {
        PurchaseOrderLineDto {
            quantity: qty,
            unit_cost: 10.0,
            material_id: material.map(RawMaterialId),
            resale_product_id: resale.map(ResaleProductId),
        }
    }

    #[test]
    fn test_line_needs_exactly_one_reference() {
        assert_eq!(
            line(None, None, 1.0).validate().unwrap_err(),
            "El detalle debe tener un material o producto asociado"
        );
        assert!(line(Some(1), Some(2), 1.0).validate().is_err());
        assert!(line(Some(1), None, 2.5).validate().is_ok());
        assert!(line(None, Some(2), 2.5).validate().is_err());
        assert!(line(None, Some(2), 3.0).validate().is_ok());
    }

    #[test]
    fn test_order_needs_lines() {
        let dto = PurchaseOrderDto {
            supplier_id: SupplierId(1),
            lines: vec![],
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_cart_payload_maps_reference() {
        let catalog = vec![CatalogEntry {
            reference: PurchaseItemRef::Material(RawMaterialId(4)),
            name: "Tela".into(),
            stock_limit: None,
            default_price: 50.0,
            whole_units: false,
        }];
        let mut cart = Cart::for_purchase();
        cart.add(&PurchaseItemRef::Material(RawMaterialId(4)), 3.5, 48.0, &catalog)
            .unwrap();
        let payload: Vec<PurchaseOrderLineDto> = cart.to_payload(|l| PurchaseOrderLineDto::from(l));
        assert_eq!(payload[0].material_id, Some(RawMaterialId(4)));
        assert_eq!(payload[0].resale_product_id, None);
        assert_eq!(payload[0].unit_cost, 48.0);

        let json = serde_json::to_value(&payload[0]).unwrap();
        assert_eq!(json["costoUnitario"], 48.0);
    }

    #[test]
    fn test_total() {
        let order = PurchaseOrder {
            id: PurchaseOrderId(1),
            date: Utc::now(),
            status: PurchaseOrderStatus::Requested,
            supplier_id: SupplierId(1),
            supplier: None,
            lines: vec![
                PurchaseOrderLine {
                    id: 1,
                    quantity: 2.0,
                    unit_cost: 10.0,
                    material_id: Some(RawMaterialId(1)),
                    resale_product_id: None,
                    name: "Tela".into(),
                },
                PurchaseOrderLine {
                    id: 2,
                    quantity: 3.0,
                    unit_cost: 5.0,
                    material_id: None,
                    resale_product_id: Some(ResaleProductId(1)),
                    name: "Gorra".into(),
                },
            ],
        };
        assert_eq!(order.total(), 35.0);
        assert_eq!(order.supplier_name(), "Sin proveedor");
    }
}
