use crate::domain::common::AggregateRoot;
use serde::{Deserialize, Serialize};

crate::aggregate_id!(SupplierId);

/// Proveedor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: SupplierId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "contacto", default)]
    pub contact: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupplierDto {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "contacto", default)]
    pub contact: Option<String>,
}

impl SupplierDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("El nombre del proveedor es obligatorio".into());
        }
        Ok(())
    }

    /// Blank contact strings are stored as NULL.
    pub fn normalized_contact(&self) -> Option<String> {
        self.contact
            .as_ref()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
    }
}

impl AggregateRoot for Supplier {
    type Id = SupplierId;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "supplier"
    }

    fn element_name() -> &'static str {
        "Proveedor"
    }

    fn list_name() -> &'static str {
        "Proveedores"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        let json = r#"{"id":4,"nombre":"Telas del Centro","contacto":"555-0101"}"#;
        let s: Supplier = serde_json::from_str(json).unwrap();
        assert_eq!(s.id, SupplierId(4));
        assert_eq!(s.name, "Telas del Centro");
        assert_eq!(Supplier::full_name(), "a001_supplier");
    }

    #[test]
    fn test_validate_requires_name() {
        let dto = SupplierDto {
            name: "  ".into(),
            contact: None,
        };
        assert!(dto.validate().is_err());
        let dto = SupplierDto {
            name: "Mercería La Ideal".into(),
            contact: Some("  ".into()),
        };
        assert!(dto.validate().is_ok());
        assert_eq!(dto.normalized_contact(), None);
    }
}
