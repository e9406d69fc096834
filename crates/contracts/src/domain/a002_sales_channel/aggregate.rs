use crate::domain::common::AggregateRoot;
use serde::{Deserialize, Serialize};

crate::aggregate_id!(SalesChannelId);

/// Canal de venta (Mercado Libre, Shein, tienda física...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesChannel {
    pub id: SalesChannelId,
    #[serde(rename = "nombre")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesChannelDto {
    #[serde(rename = "nombre")]
    pub name: String,
}

impl SalesChannelDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("El nombre del canal es obligatorio".into());
        }
        Ok(())
    }
}

impl AggregateRoot for SalesChannel {
    type Id = SalesChannelId;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "sales_channel"
    }

    fn element_name() -> &'static str {
        "Canal de venta"
    }

    fn list_name() -> &'static str {
        "Canales de venta"
    }
}
