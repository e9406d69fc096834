use anyhow::Result;
use chrono::FixedOffset;
use contracts::projections::p900_reports::dto::{
    MaterialInventoryRow, ProductInventoryRow, SalesReportRow,
};
use contracts::shared::date_range::DateRange;

use super::row_builder;
use crate::domain::{
    a003_raw_material, a005_resale_product, a006_product_variant, a010_sales_order,
};

/// Sales whose date falls inside the range as seen from `offset`, newest first.
pub async fn sales_report(range: DateRange, offset: FixedOffset) -> Result<Vec<SalesReportRow>> {
    let (from, until) = row_builder::day_bounds(&range, offset);
    let orders = a010_sales_order::repository::list_between(from, until).await?;
    tracing::info!(
        "Sales report {}: {} orders",
        range.file_suffix(),
        orders.len()
    );
    Ok(row_builder::sales_rows(&orders, offset))
}

pub async fn product_inventory() -> Result<Vec<ProductInventoryRow>> {
    let variants = a006_product_variant::service::list_all().await?;
    let resale = a005_resale_product::service::list_all().await?;
    Ok(row_builder::product_inventory_rows(&variants, &resale))
}

pub async fn material_inventory() -> Result<Vec<MaterialInventoryRow>> {
    let materials = a003_raw_material::service::list_all().await?;
    Ok(row_builder::material_inventory_rows(&materials))
}
