use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationClass {
    #[serde(rename = "Alta rotación")]
    High,
    #[serde(rename = "Media rotación")]
    Medium,
    #[serde(rename = "Baja rotación")]
    Low,
    #[serde(rename = "Sin ventas")]
    NoSales,
}

impl RotationClass {
    pub fn label(&self) -> &'static str {
        match self {
            RotationClass::High => "Alta rotación",
            RotationClass::Medium => "Media rotación",
            RotationClass::Low => "Baja rotación",
            RotationClass::NoSales => "Sin ventas",
        }
    }

    /// CSS modifier for the badge.
    pub fn badge_class(&self) -> &'static str {
        match self {
            RotationClass::High => "badge badge--success",
            RotationClass::Medium => "badge badge--info",
            RotationClass::Low => "badge badge--warning",
            RotationClass::NoSales => "badge badge--neutral",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductAnalysis {
    pub unique_id: String,
    pub nombre: String,
    pub tipo: String,
    pub unidades_vendidas: i64,
    pub stock: i64,
    pub venta_diaria: f64,
    /// Days the current stock lasts at the current rate; `None` without sales
    #[serde(default)]
    pub dias_cobertura: Option<f64>,
    pub rotacion: RotationClass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SuggestionKind {
    #[serde(rename = "Fabricar")]
    Fabricate,
    #[serde(rename = "Reabastecer")]
    Reorder,
    #[serde(rename = "Promocionar")]
    Promote,
    #[serde(rename = "Comprar materia prima")]
    BuyMaterial,
}

impl SuggestionKind {
    pub fn label(&self) -> &'static str {
        match self {
            SuggestionKind::Fabricate => "Fabricar",
            SuggestionKind::Reorder => "Reabastecer",
            SuggestionKind::Promote => "Promocionar",
            SuggestionKind::BuyMaterial => "Comprar materia prima",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SuggestionPriority {
    #[serde(rename = "Alta")]
    High,
    #[serde(rename = "Media")]
    Medium,
    #[serde(rename = "Baja")]
    Low,
}

impl SuggestionPriority {
    pub fn label(&self) -> &'static str {
        match self {
            SuggestionPriority::High => "Alta",
            SuggestionPriority::Medium => "Media",
            SuggestionPriority::Low => "Baja",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub tipo: SuggestionKind,
    pub prioridad: SuggestionPriority,
    /// `var-n`, `rev-n` or `mat-n`
    pub referencia: String,
    pub nombre: String,
    pub cantidad: f64,
    pub mensaje: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryAnalysisResponse {
    pub analisis_productos: Vec<ProductAnalysis>,
    pub sugerencias: Vec<Suggestion>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_labels() {
        assert_eq!(
            serde_json::to_value(RotationClass::High).unwrap(),
            serde_json::json!("Alta rotación")
        );
        assert_eq!(
            serde_json::to_value(SuggestionKind::BuyMaterial).unwrap(),
            serde_json::json!("Comprar materia prima")
        );
        assert!(SuggestionPriority::High < SuggestionPriority::Low);
    }
}
