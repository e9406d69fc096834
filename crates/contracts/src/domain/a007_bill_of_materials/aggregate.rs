use crate::domain::a003_raw_material::aggregate::{RawMaterial, RawMaterialId};
use crate::domain::a004_manufactured_product::aggregate::ManufacturedProductId;
use crate::domain::common::AggregateRoot;
use serde::{Deserialize, Serialize};

crate::aggregate_id!(BomItemId);

pub const UNKNOWN_PRODUCT: &str = "Producto Desconocido";

/// One line of a product recipe: how much of a material one unit consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomItem {
    pub id: BomItemId,
    #[serde(rename = "producto_fabricado_id")]
    pub product_id: ManufacturedProductId,
    #[serde(rename = "materia_prima_id")]
    pub material_id: RawMaterialId,
    #[serde(rename = "cantidadRequerida")]
    pub quantity: f64,
    #[serde(rename = "materia_prima", default)]
    pub material: Option<RawMaterial>,
    #[serde(rename = "producto_nombre", default)]
    pub product_name: Option<String>,
}

impl BomItem {
    pub fn material_name(&self) -> &str {
        self.material
            .as_ref()
            .map(|m| m.name.as_str())
            .unwrap_or("Material desconocido")
    }

    pub fn material_unit(&self) -> &str {
        self.material.as_ref().map(|m| m.unit.as_str()).unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BomItemDto {
    #[serde(rename = "producto_fabricado_id")]
    pub product_id: ManufacturedProductId,
    #[serde(rename = "materia_prima_id")]
    pub material_id: RawMaterialId,
    #[serde(rename = "cantidadRequerida")]
    pub quantity: f64,
}

impl BomItemDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.product_id.0 <= 0 {
            return Err("Selecciona un producto".into());
        }
        if self.material_id.0 <= 0 {
            return Err("Selecciona un material".into());
        }
        if !self.quantity.is_finite() || self.quantity <= 0.0 {
            return Err("La cantidad requerida debe ser mayor a cero".into());
        }
        Ok(())
    }
}

/// BOM lines of one product, for the grouped recipe view.
#[derive(Debug, Clone, PartialEq)]
pub struct BomGroup {
    pub product_name: String,
    pub items: Vec<BomItem>,
}

/// Groups BOM lines by product name, keeping first-appearance order.
pub fn group_by_product(items: &[BomItem]) -> Vec<BomGroup> {
    let mut groups: Vec<BomGroup> = Vec::new();
    for item in items {
        let name = item
            .product_name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_PRODUCT.to_string());
        match groups.iter_mut().find(|g| g.product_name == name) {
            Some(group) => group.items.push(item.clone()),
            None => groups.push(BomGroup {
                product_name: name,
                items: vec![item.clone()],
            }),
        }
    }
    groups
}

impl AggregateRoot for BomItem {
    type Id = BomItemId;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn aggregate_index() -> &'static str {
        "a007"
    }

    fn collection_name() -> &'static str {
        "bill_of_materials"
    }

    fn element_name() -> &'static str {
        "Material de receta"
    }

    fn list_name() -> &'static str {
        "Lista de Materiales (BOM)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, product: Option<&str>) -> BomItem {
        BomItem {
            id: BomItemId(id),
            product_id: ManufacturedProductId(1),
            material_id: RawMaterialId(id),
            quantity: 1.0,
            material: None,
            product_name: product.map(String::from),
        }
    }

    #[test]
    fn test_group_by_product_keeps_order_and_fallback() {
        let items = vec![
            item(1, Some("Pijama")),
            item(2, None),
            item(3, Some("Pijama")),
            item(4, Some("Sábana")),
        ];
        let groups = group_by_product(&items);
        let names: Vec<_> = groups.iter().map(|g| g.product_name.as_str()).collect();
        assert_eq!(names, vec!["Pijama", UNKNOWN_PRODUCT, "Sábana"]);
        assert_eq!(groups[0].items.len(), 2);
    }

    #[test]
    fn test_dto_rejects_zero_quantity() {
        let dto = BomItemDto {
            product_id: ManufacturedProductId(1),
            material_id: RawMaterialId(2),
            quantity: 0.0,
        };
        assert!(dto.validate().is_err());
    }
}
