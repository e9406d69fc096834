use crate::domain::a006_product_variant::aggregate::{ProductVariant, ProductVariantId};
use crate::domain::common::AggregateRoot;
use crate::enums::ProductionOrderStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

crate::aggregate_id!(ProductionOrderId);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionOrder {
    pub id: ProductionOrderId,
    #[serde(rename = "variante_producto_id")]
    pub variant_id: ProductVariantId,
    #[serde(rename = "cantidadProducida")]
    pub quantity: i64,
    #[serde(rename = "estado")]
    pub status: ProductionOrderStatus,
    #[serde(rename = "fechaCreacion")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "fechaFinalizacion", default)]
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(rename = "variante", default)]
    pub variant: Option<ProductVariant>,
}

impl ProductionOrder {
    pub fn variant_label(&self) -> String {
        match &self.variant {
            Some(v) => v.label(),
            None => format!("Variante #{}", self.variant_id),
        }
    }

    /// Elapsed time between creation and finish, for finished orders.
    pub fn lead_time(&self) -> Option<chrono::Duration> {
        self.finished_at.map(|f| f - self.created_at)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductionOrderDto {
    #[serde(rename = "variante_producto_id")]
    pub variant_id: ProductVariantId,
    #[serde(rename = "cantidadProducida")]
    pub quantity: i64,
}

impl ProductionOrderDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.variant_id.0 <= 0 {
            return Err("Selecciona una variante".into());
        }
        if self.quantity <= 0 {
            return Err("La cantidad a producir debe ser mayor a cero".into());
        }
        Ok(())
    }
}

impl AggregateRoot for ProductionOrder {
    type Id = ProductionOrderId;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn aggregate_index() -> &'static str {
        "a008"
    }

    fn collection_name() -> &'static str {
        "production_order"
    }

    fn element_name() -> &'static str {
        "Orden de producción"
    }

    fn list_name() -> &'static str {
        "Producción"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_status_uses_wire_label() {
        let order = ProductionOrder {
            id: ProductionOrderId(1),
            variant_id: ProductVariantId(2),
            quantity: 10,
            status: ProductionOrderStatus::InProgress,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap(),
            finished_at: None,
            variant: None,
        };
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["estado"], "En Proceso");
        assert_eq!(json["cantidadProducida"], 10);
        assert_eq!(order.variant_label(), "Variante #2");
        assert!(order.lead_time().is_none());
    }

    #[test]
    fn test_dto_requires_positive_quantity() {
        let dto = ProductionOrderDto {
            variant_id: ProductVariantId(1),
            quantity: 0,
        };
        assert!(dto.validate().is_err());
    }
}
