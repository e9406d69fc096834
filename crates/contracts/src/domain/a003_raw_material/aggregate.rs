use crate::domain::a001_supplier::aggregate::{Supplier, SupplierId};
use crate::domain::common::AggregateRoot;
use crate::shared::csv::CsvExportable;
use serde::{Deserialize, Serialize};

crate::aggregate_id!(RawMaterialId);

/// Materia prima (tela, hilo, botones...). Stock is fractional: fabric is
/// measured in meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMaterial {
    pub id: RawMaterialId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "costo")]
    pub cost: f64,
    #[serde(rename = "unidadMedida")]
    pub unit: String,
    #[serde(rename = "stockActual")]
    pub stock: f64,
    #[serde(rename = "proveedor_id", default)]
    pub supplier_id: Option<SupplierId>,
    #[serde(rename = "proveedor", default)]
    pub supplier: Option<Supplier>,
}

impl RawMaterial {
    pub fn supplier_name(&self) -> &str {
        self.supplier
            .as_ref()
            .map(|s| s.name.as_str())
            .unwrap_or("Sin proveedor")
    }

    pub fn inventory_value(&self) -> f64 {
        self.stock * self.cost
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMaterialDto {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "costo")]
    pub cost: f64,
    #[serde(rename = "unidadMedida")]
    pub unit: String,
    #[serde(rename = "stockActual", default)]
    pub stock: f64,
    #[serde(rename = "proveedor_id", default)]
    pub supplier_id: Option<SupplierId>,
}

impl Default for RawMaterialDto {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            cost: 0.0,
            unit: "Metros".to_string(),
            stock: 0.0,
            supplier_id: None,
        }
    }
}

impl RawMaterialDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("El nombre del material es obligatorio".into());
        }
        if self.unit.trim().is_empty() {
            return Err("La unidad de medida es obligatoria".into());
        }
        if !self.cost.is_finite() || self.cost < 0.0 {
            return Err("El costo no puede ser negativo".into());
        }
        if !self.stock.is_finite() || self.stock < 0.0 {
            return Err("El stock inicial no puede ser negativo".into());
        }
        Ok(())
    }
}

impl AggregateRoot for RawMaterial {
    type Id = RawMaterialId;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn aggregate_index() -> &'static str {
        "a003"
    }

    fn collection_name() -> &'static str {
        "raw_material"
    }

    fn element_name() -> &'static str {
        "Materia prima"
    }

    fn list_name() -> &'static str {
        "Inventario Materia Prima"
    }
}

impl CsvExportable for RawMaterial {
    fn headers() -> Vec<&'static str> {
        vec![
            "ID",
            "Nombre",
            "Descripción",
            "Proveedor",
            "Unidad",
            "Stock",
            "Costo",
        ]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.description.clone().unwrap_or_default(),
            self.supplier_name().to_string(),
            self.unit.clone(),
            self.stock.to_string(),
            format!("{:.2}", self.cost),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_payload() {
        let json = r#"{
            "id": 1, "nombre": "Tela Polar Azul", "descripcion": null, "costo": 85.5,
            "unidadMedida": "Metros", "stockActual": 12.5, "proveedor_id": null
        }"#;
        let m: RawMaterial = serde_json::from_str(json).unwrap();
        assert_eq!(m.stock, 12.5);
        assert_eq!(m.supplier_name(), "Sin proveedor");
        assert!((m.inventory_value() - 1068.75).abs() < 1e-9);
    }

    #[test]
    fn test_validate_rejects_negative_values() {
        let mut dto = RawMaterialDto {
            name: "Hilo".into(),
            ..Default::default()
        };
        assert!(dto.validate().is_ok());
        dto.cost = -1.0;
        assert!(dto.validate().is_err());
        dto.cost = 1.0;
        dto.stock = -0.5;
        assert!(dto.validate().is_err());
    }
}
