//! BOM expansion: turns a recipe and a production quantity into material
//! requirements, and checks them against available stock.

use super::aggregate::BomItem;
use crate::domain::a003_raw_material::aggregate::RawMaterialId;
use crate::shared::format::format_quantity;
use std::fmt;

const STOCK_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub struct MaterialRequirement {
    pub material_id: RawMaterialId,
    pub material_name: String,
    pub required: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaterialShortage {
    pub material_name: String,
    pub required: f64,
    pub available: f64,
}

impl fmt::Display for MaterialShortage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "No hay suficiente stock de {}. Requerido: {}, Disponible: {}",
            self.material_name,
            format_quantity(self.required),
            format_quantity(self.available)
        )
    }
}

/// required = quantity per unit × units, merged per material.
pub fn expand_requirements(bom: &[BomItem], units: i64) -> Vec<MaterialRequirement> {
    let mut result: Vec<MaterialRequirement> = Vec::new();
    for item in bom {
        let required = item.quantity * units as f64;
        match result.iter_mut().find(|r| r.material_id == item.material_id) {
            Some(existing) => existing.required += required,
            None => result.push(MaterialRequirement {
                material_id: item.material_id,
                material_name: item.material_name().to_string(),
                required,
            }),
        }
    }
    result
}

/// First requirement the current stock cannot cover, if any.
pub fn find_shortage<F>(requirements: &[MaterialRequirement], stock_of: F) -> Option<MaterialShortage>
where
    F: Fn(RawMaterialId) -> f64,
{
    requirements.iter().find_map(|req| {
        let available = stock_of(req.material_id);
        if available + STOCK_EPSILON < req.required {
            Some(MaterialShortage {
                material_name: req.material_name.clone(),
                required: req.required,
                available,
            })
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a003_raw_material::aggregate::RawMaterial;
    use crate::domain::a004_manufactured_product::aggregate::ManufacturedProductId;
    use crate::domain::a007_bill_of_materials::aggregate::BomItemId;

    fn line(material: i64, name: &str, qty: f64) -> BomItem {
        BomItem {
            id: BomItemId(material),
            product_id: ManufacturedProductId(1),
            material_id: RawMaterialId(material),
            quantity: qty,
            material: Some(RawMaterial {
                id: RawMaterialId(material),
                name: name.to_string(),
                description: None,
                cost: 10.0,
                unit: "Metros".into(),
                stock: 0.0,
                supplier_id: None,
                supplier: None,
            }),
            product_name: Some("Pijama".into()),
        }
    }

    #[test]
    fn test_expand_multiplies_by_units() {
        let bom = vec![line(1, "Tela", 1.5), line(2, "Botón", 4.0)];
        let reqs = expand_requirements(&bom, 10);
        assert_eq!(reqs.len(), 2);
        assert_eq!(reqs[0].required, 15.0);
        assert_eq!(reqs[1].required, 40.0);
    }

    #[test]
    fn test_expand_merges_repeated_material() {
        let bom = vec![line(1, "Tela", 1.0), line(1, "Tela", 0.5)];
        let reqs = expand_requirements(&bom, 2);
        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].required, 3.0);
    }

    #[test]
    fn test_find_shortage_reports_first_missing_material() {
        let bom = vec![line(1, "Tela", 1.5), line(2, "Botón", 4.0)];
        let reqs = expand_requirements(&bom, 10);
        let shortage = find_shortage(&reqs, |id| if id.0 == 1 { 20.0 } else { 30.0 }).unwrap();
        assert_eq!(shortage.material_name, "Botón");
        assert_eq!(
            shortage.to_string(),
            "No hay suficiente stock de Botón. Requerido: 40, Disponible: 30"
        );
    }

    #[test]
    fn test_exact_stock_is_enough() {
        let bom = vec![line(1, "Tela", 0.1)];
        let reqs = expand_requirements(&bom, 3);
        assert!(find_shortage(&reqs, |_| 0.3).is_none());
    }

    #[test]
    fn test_empty_bom_requires_nothing() {
        assert!(expand_requirements(&[], 5).is_empty());
    }
}
