use std::collections::HashMap;

use anyhow::Result;
use chrono::{Duration, Utc};

use super::analysis::{analyze, AnalysisParams, ItemSnapshot};
use crate::domain::{a005_resale_product, a006_product_variant, a007_bill_of_materials, a010_sales_order};
use crate::shared::config::get_config;
use contracts::shared::stock_item::StockItemRef;
use contracts::usecases::u502_inventory_analysis::dto::InventoryAnalysisResponse;

pub async fn run_analysis() -> Result<InventoryAnalysisResponse> {
    let config = &get_config().analysis;
    let params = AnalysisParams {
        window_days: config.window_days,
        coverage_days_target: config.coverage_days_target,
    };

    let now = Utc::now();
    let orders =
        a010_sales_order::repository::list_between(now - Duration::days(params.window_days), now)
            .await?;
    let mut sold: HashMap<StockItemRef, i64> = HashMap::new();
    for line in orders.iter().flat_map(|o| o.lines.iter()) {
        if let Some(reference) = line.item_ref() {
            *sold.entry(reference).or_insert(0) += line.quantity;
        }
    }

    let mut items: Vec<ItemSnapshot> = a006_product_variant::service::list_all()
        .await?
        .into_iter()
        .map(|v| ItemSnapshot {
            reference: StockItemRef::Variant(v.id),
            name: v.label(),
            stock: v.stock,
            product_id: Some(v.product_id),
        })
        .collect();
    items.extend(
        a005_resale_product::service::list_all()
            .await?
            .into_iter()
            .map(|r| ItemSnapshot {
                reference: StockItemRef::Resale(r.id),
                name: r.name,
                stock: r.stock,
                product_id: None,
            }),
    );

    let bom = a007_bill_of_materials::repository::list_all().await?;
    let result = analyze(&items, &sold, &bom, &params);

    tracing::info!(
        "Inventory analysis: {} items, {} suggestions over {} days",
        result.analisis_productos.len(),
        result.sugerencias.len(),
        params.window_days
    );
    Ok(result)
}
