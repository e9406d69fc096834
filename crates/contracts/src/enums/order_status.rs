use serde::{Deserialize, Serialize};

/// Purchase order lifecycle: Solicitada -> En Tránsito -> Recibida.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PurchaseOrderStatus {
    #[default]
    #[serde(rename = "Solicitada")]
    Requested,
    #[serde(rename = "En Tránsito")]
    InTransit,
    #[serde(rename = "Recibida")]
    Received,
}

impl PurchaseOrderStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PurchaseOrderStatus::Requested => "Solicitada",
            PurchaseOrderStatus::InTransit => "En Tránsito",
            PurchaseOrderStatus::Received => "Recibida",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::all().into_iter().find(|s| s.label() == label)
    }

    pub fn all() -> Vec<Self> {
        vec![
            PurchaseOrderStatus::Requested,
            PurchaseOrderStatus::InTransit,
            PurchaseOrderStatus::Received,
        ]
    }

    /// The only manual change is Requested -> InTransit. `Received` is set by
    /// the receive operation, which also moves stock.
    pub fn can_change_to(&self, next: PurchaseOrderStatus) -> bool {
        matches!(
            (self, next),
            (PurchaseOrderStatus::Requested, PurchaseOrderStatus::InTransit)
        )
    }

    pub fn is_received(&self) -> bool {
        *self == PurchaseOrderStatus::Received
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ProductionOrderStatus {
    #[default]
    #[serde(rename = "Pendiente")]
    Pending,
    #[serde(rename = "En Proceso")]
    InProgress,
    #[serde(rename = "Terminado")]
    Finished,
}

impl ProductionOrderStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ProductionOrderStatus::Pending => "Pendiente",
            ProductionOrderStatus::InProgress => "En Proceso",
            ProductionOrderStatus::Finished => "Terminado",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        [
            ProductionOrderStatus::Pending,
            ProductionOrderStatus::InProgress,
            ProductionOrderStatus::Finished,
        ]
        .into_iter()
        .find(|s| s.label() == label)
    }

    pub fn is_finished(&self) -> bool {
        *self == ProductionOrderStatus::Finished
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SalesOrderStatus {
    #[default]
    #[serde(rename = "Pagada")]
    Paid,
    #[serde(rename = "En producción")]
    InProduction,
    #[serde(rename = "Enviada")]
    Shipped,
    #[serde(rename = "Entregada")]
    Delivered,
}

impl SalesOrderStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SalesOrderStatus::Paid => "Pagada",
            SalesOrderStatus::InProduction => "En producción",
            SalesOrderStatus::Shipped => "Enviada",
            SalesOrderStatus::Delivered => "Entregada",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::all().into_iter().find(|s| s.label() == label)
    }

    pub fn all() -> Vec<Self> {
        vec![
            SalesOrderStatus::Paid,
            SalesOrderStatus::InProduction,
            SalesOrderStatus::Shipped,
            SalesOrderStatus::Delivered,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_labels() {
        assert_eq!(
            serde_json::to_string(&PurchaseOrderStatus::InTransit).unwrap(),
            "\"En Tránsito\""
        );
        assert_eq!(
            serde_json::from_str::<ProductionOrderStatus>("\"Terminado\"").unwrap(),
            ProductionOrderStatus::Finished
        );
        assert_eq!(
            serde_json::to_string(&SalesOrderStatus::InProduction).unwrap(),
            "\"En producción\""
        );
    }

    #[test]
    fn test_labels_round_trip_through_from_label() {
        for s in PurchaseOrderStatus::all() {
            assert_eq!(PurchaseOrderStatus::from_label(s.label()), Some(s));
        }
        for s in SalesOrderStatus::all() {
            assert_eq!(SalesOrderStatus::from_label(s.label()), Some(s));
        }
        assert_eq!(SalesOrderStatus::from_label("Cancelada"), None);
    }

    #[test]
    fn test_purchase_manual_transitions() {
        let requested = PurchaseOrderStatus::Requested;
        assert!(requested.can_change_to(PurchaseOrderStatus::InTransit));
        assert!(!requested.can_change_to(PurchaseOrderStatus::Received));
        assert!(!PurchaseOrderStatus::Received.can_change_to(PurchaseOrderStatus::InTransit));
        assert!(!PurchaseOrderStatus::InTransit.can_change_to(PurchaseOrderStatus::Requested));
        assert!(!PurchaseOrderStatus::InTransit.can_change_to(PurchaseOrderStatus::InTransit));
    }
}
