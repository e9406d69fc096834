//! Rule-based stock analysis over a sales window. Everything here is pure;
//! the service gathers the snapshots.

use std::collections::HashMap;

use contracts::domain::a003_raw_material::aggregate::RawMaterialId;
use contracts::domain::a004_manufactured_product::aggregate::ManufacturedProductId;
use contracts::domain::a007_bill_of_materials::aggregate::BomItem;
use contracts::domain::a007_bill_of_materials::expansion::expand_requirements;
use contracts::shared::format::format_quantity;
use contracts::shared::stock_item::{PurchaseItemRef, StockItemRef};
use contracts::usecases::u502_inventory_analysis::dto::{
    InventoryAnalysisResponse, ProductAnalysis, RotationClass, Suggestion, SuggestionKind,
    SuggestionPriority,
};

/// Daily rate at or above which an item rotates fast.
pub const HIGH_ROTATION_DAILY: f64 = 1.0;
/// Daily rate at or above which an item rotates moderately.
pub const MEDIUM_ROTATION_DAILY: f64 = 0.25;
/// Coverage under this many days makes a restock urgent.
pub const URGENT_COVERAGE_DAYS: f64 = 7.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisParams {
    pub window_days: i64,
    pub coverage_days_target: f64,
}

/// Sellable item as seen at analysis time.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSnapshot {
    pub reference: StockItemRef,
    pub name: String,
    pub stock: i64,
    /// Parent product of a variant, for BOM lookups
    pub product_id: Option<ManufacturedProductId>,
}

pub fn rotation_class(daily: f64) -> RotationClass {
    if daily >= HIGH_ROTATION_DAILY {
        RotationClass::High
    } else if daily >= MEDIUM_ROTATION_DAILY {
        RotationClass::Medium
    } else if daily > 0.0 {
        RotationClass::Low
    } else {
        RotationClass::NoSales
    }
}

pub fn analyze_item(item: &ItemSnapshot, sold: i64, params: &AnalysisParams) -> ProductAnalysis {
    let window = params.window_days.max(1) as f64;
    let daily = sold as f64 / window;
    let coverage = (daily > 0.0).then(|| item.stock.max(0) as f64 / daily);
    ProductAnalysis {
        unique_id: item.reference.unique_id(),
        nombre: item.name.clone(),
        tipo: item.reference.kind().label().to_string(),
        unidades_vendidas: sold,
        stock: item.stock,
        venta_diaria: (daily * 100.0).round() / 100.0,
        dias_cobertura: coverage.map(|c| (c * 10.0).round() / 10.0),
        rotacion: rotation_class(daily),
    }
}

/// Units needed to cover a full window at the current rate, beyond stock.
pub fn restock_quantity(sold: i64, stock: i64, params: &AnalysisParams) -> i64 {
    let window = params.window_days.max(1) as f64;
    let daily = sold as f64 / window;
    let target = (daily * params.window_days as f64).ceil() as i64;
    (target - stock.max(0)).max(1)
}

fn restock_suggestion(item: &ItemSnapshot, sold: i64, coverage: f64, params: &AnalysisParams) -> Suggestion {
    let quantity = restock_quantity(sold, item.stock, params);
    let (tipo, verb) = match item.reference {
        StockItemRef::Variant(_) => (SuggestionKind::Fabricate, "Fabricar"),
        StockItemRef::Resale(_) => (SuggestionKind::Reorder, "Reabastecer"),
    };
    let prioridad = if coverage < URGENT_COVERAGE_DAYS {
        SuggestionPriority::High
    } else {
        SuggestionPriority::Medium
    };
    Suggestion {
        tipo,
        prioridad,
        referencia: item.reference.unique_id(),
        nombre: item.name.clone(),
        cantidad: quantity as f64,
        mensaje: format!(
            "Cobertura de {} días. {} {} unidades para cubrir {} días.",
            format_quantity((coverage * 10.0).round() / 10.0),
            verb,
            quantity,
            params.window_days
        ),
    }
}

fn promote_suggestion(item: &ItemSnapshot, params: &AnalysisParams) -> Suggestion {
    Suggestion {
        tipo: SuggestionKind::Promote,
        prioridad: SuggestionPriority::Low,
        referencia: item.reference.unique_id(),
        nombre: item.name.clone(),
        cantidad: item.stock as f64,
        mensaje: format!(
            "Sin ventas en los últimos {} días con {} unidades en stock. Considera una promoción.",
            params.window_days, item.stock
        ),
    }
}

/// Raw materials whose stock cannot cover the BOM expansion of the planned
/// fabrication. `bom` rows must carry their material summary.
pub fn material_suggestions(
    planned: &[(ManufacturedProductId, i64)],
    bom: &[BomItem],
) -> Vec<Suggestion> {
    let mut by_product: HashMap<ManufacturedProductId, Vec<BomItem>> = HashMap::new();
    for row in bom {
        by_product.entry(row.product_id).or_default().push(row.clone());
    }

    let mut required: Vec<(RawMaterialId, String, f64)> = Vec::new();
    for (product_id, units) in planned {
        let Some(recipe) = by_product.get(product_id) else {
            continue;
        };
        for req in expand_requirements(recipe, *units) {
            match required.iter_mut().find(|(id, _, _)| *id == req.material_id) {
                Some((_, _, total)) => *total += req.required,
                None => required.push((req.material_id, req.material_name, req.required)),
            }
        }
    }

    let stock_of = |id: RawMaterialId| {
        bom.iter()
            .find(|b| b.material_id == id)
            .and_then(|b| b.material.as_ref())
            .map(|m| (m.stock, m.unit.clone()))
            .unwrap_or((0.0, String::new()))
    };

    required
        .into_iter()
        .filter_map(|(id, name, needed)| {
            let (stock, unit) = stock_of(id);
            let missing = needed - stock;
            (missing > 1e-9).then(|| Suggestion {
                tipo: SuggestionKind::BuyMaterial,
                prioridad: SuggestionPriority::High,
                referencia: PurchaseItemRef::Material(id).unique_id(),
                nombre: name,
                cantidad: missing,
                mensaje: format!(
                    "La producción sugerida requiere {} {}; hay {} en stock. Comprar {} {}.",
                    format_quantity(needed),
                    unit,
                    format_quantity(stock),
                    format_quantity(missing),
                    unit
                ),
            })
        })
        .collect()
}

/// Per-item analysis (best sellers first) plus suggestions ordered by
/// priority.
pub fn analyze(
    items: &[ItemSnapshot],
    sold: &HashMap<StockItemRef, i64>,
    bom: &[BomItem],
    params: &AnalysisParams,
) -> InventoryAnalysisResponse {
    let mut analyses = Vec::with_capacity(items.len());
    let mut suggestions = Vec::new();
    let mut planned: Vec<(ManufacturedProductId, i64)> = Vec::new();

    for item in items {
        let units = sold.get(&item.reference).copied().unwrap_or(0);
        let analysis = analyze_item(item, units, params);

        match analysis.dias_cobertura {
            Some(coverage) if coverage < params.coverage_days_target => {
                let suggestion = restock_suggestion(item, units, coverage, params);
                if let (SuggestionKind::Fabricate, Some(product_id)) =
                    (suggestion.tipo, item.product_id)
                {
                    planned.push((product_id, suggestion.cantidad as i64));
                }
                suggestions.push(suggestion);
            }
            None if item.stock > 0 => suggestions.push(promote_suggestion(item, params)),
            _ => {}
        }
        analyses.push(analysis);
    }

    suggestions.extend(material_suggestions(&planned, bom));
    suggestions.sort_by_key(|s| s.prioridad);

    analyses.sort_by(|a, b| {
        b.unidades_vendidas
            .cmp(&a.unidades_vendidas)
            .then_with(|| a.nombre.cmp(&b.nombre))
    });

    InventoryAnalysisResponse {
        analisis_productos: analyses,
        sugerencias: suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a003_raw_material::aggregate::RawMaterial;
    use contracts::domain::a005_resale_product::aggregate::ResaleProductId;
    use contracts::domain::a006_product_variant::aggregate::ProductVariantId;
    use contracts::domain::a007_bill_of_materials::aggregate::BomItemId;

    const PARAMS: AnalysisParams = AnalysisParams {
        window_days: 30,
        coverage_days_target: 15.0,
    };

    fn variant(id: i64, stock: i64) -> ItemSnapshot {
        ItemSnapshot {
            reference: StockItemRef::Variant(ProductVariantId(id)),
            name: format!("Pijama (M/Azul) #{}", id),
            stock,
            product_id: Some(ManufacturedProductId(1)),
        }
    }

    fn resale(id: i64, stock: i64) -> ItemSnapshot {
        ItemSnapshot {
            reference: StockItemRef::Resale(ResaleProductId(id)),
            name: "Zapato clínico".into(),
            stock,
            product_id: None,
        }
    }

    fn bom_row(material_stock: f64, per_unit: f64) -> BomItem {
        BomItem {
            id: BomItemId(1),
            product_id: ManufacturedProductId(1),
            material_id: RawMaterialId(4),
            quantity: per_unit,
            material: Some(RawMaterial {
                id: RawMaterialId(4),
                name: "Tela".into(),
                description: None,
                cost: 80.0,
                unit: "m".into(),
                stock: material_stock,
                supplier_id: None,
                supplier: None,
            }),
            product_name: Some("Pijama".into()),
        }
    }

    #[test]
    fn test_rotation_classes() {
        assert_eq!(rotation_class(2.0), RotationClass::High);
        assert_eq!(rotation_class(1.0), RotationClass::High);
        assert_eq!(rotation_class(0.5), RotationClass::Medium);
        assert_eq!(rotation_class(0.1), RotationClass::Low);
        assert_eq!(rotation_class(0.0), RotationClass::NoSales);
    }

    #[test]
    fn test_analyze_item_rates_and_coverage() {
        let a = analyze_item(&variant(1, 20), 60, &PARAMS);
        assert_eq!(a.venta_diaria, 2.0);
        assert_eq!(a.dias_cobertura, Some(10.0));
        assert_eq!(a.rotacion, RotationClass::High);
        assert_eq!(a.tipo, "Fabricación");

        let idle = analyze_item(&resale(2, 5), 0, &PARAMS);
        assert_eq!(idle.dias_cobertura, None);
        assert_eq!(idle.rotacion, RotationClass::NoSales);
    }

    #[test]
    fn test_restock_quantity_covers_window() {
        // 2/day over 30 days = 60 needed, 20 on hand
        assert_eq!(restock_quantity(60, 20, &PARAMS), 40);
        // never suggests zero
        assert_eq!(restock_quantity(3, 50, &PARAMS), 1);
    }

    #[test]
    fn test_low_coverage_variant_gets_fabrication_and_material_purchase() {
        let items = vec![variant(1, 20)];
        let mut sold = HashMap::new();
        sold.insert(StockItemRef::Variant(ProductVariantId(1)), 60);

        let result = analyze(&items, &sold, &[bom_row(30.0, 1.5)], &PARAMS);
        let kinds: Vec<_> = result.sugerencias.iter().map(|s| s.tipo).collect();
        assert!(kinds.contains(&SuggestionKind::Fabricate));

        let buy = result
            .sugerencias
            .iter()
            .find(|s| s.tipo == SuggestionKind::BuyMaterial)
            .unwrap();
        // 40 units x 1.5 m = 60 m, 30 m in stock
        assert_eq!(buy.cantidad, 30.0);
        assert_eq!(buy.referencia, "mat-4");
    }

    #[test]
    fn test_enough_material_means_no_purchase() {
        let items = vec![variant(1, 20)];
        let mut sold = HashMap::new();
        sold.insert(StockItemRef::Variant(ProductVariantId(1)), 60);

        let result = analyze(&items, &sold, &[bom_row(500.0, 1.5)], &PARAMS);
        assert!(result
            .sugerencias
            .iter()
            .all(|s| s.tipo != SuggestionKind::BuyMaterial));
    }

    #[test]
    fn test_idle_stock_is_promoted_and_empty_idle_is_not() {
        let items = vec![resale(2, 5), resale(3, 0)];
        let result = analyze(&items, &HashMap::new(), &[], &PARAMS);
        assert_eq!(result.sugerencias.len(), 1);
        assert_eq!(result.sugerencias[0].tipo, SuggestionKind::Promote);
        assert_eq!(result.sugerencias[0].referencia, "rev-2");
    }

    #[test]
    fn test_resale_reorder_and_priority_order() {
        let items = vec![resale(2, 5), resale(3, 2)];
        let mut sold = HashMap::new();
        // rev-2: 0.5/day -> 10 days coverage (Medium); rev-3: 1/day -> 2 days (High)
        sold.insert(StockItemRef::Resale(ResaleProductId(2)), 15);
        sold.insert(StockItemRef::Resale(ResaleProductId(3)), 30);

        let result = analyze(&items, &sold, &[], &PARAMS);
        assert_eq!(result.sugerencias.len(), 2);
        assert!(result
            .sugerencias
            .iter()
            .all(|s| s.tipo == SuggestionKind::Reorder));
        assert_eq!(result.sugerencias[0].prioridad, SuggestionPriority::High);
        assert_eq!(result.sugerencias[0].referencia, "rev-3");
        assert_eq!(result.analisis_productos[0].unique_id, "rev-3");
    }
}
