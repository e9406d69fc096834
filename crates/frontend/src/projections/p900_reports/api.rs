use contracts::projections::p900_reports::dto::{
    MaterialInventoryRow, ProductInventoryRow, ReportKind, SalesReportRow,
};
use contracts::shared::date_range::DateRange;

use crate::shared::api_utils::get_json;
use crate::shared::date_utils::utc_offset_minutes;

pub async fn fetch_sales_report(range: &DateRange) -> Result<Vec<SalesReportRow>, String> {
    get_json(&ReportKind::local_sales_endpoint(range, utc_offset_minutes())).await
}

pub async fn fetch_product_inventory() -> Result<Vec<ProductInventoryRow>, String> {
    get_json(&ReportKind::ProductInventory.endpoint(None)).await
}

pub async fn fetch_material_inventory() -> Result<Vec<MaterialInventoryRow>, String> {
    get_json(&ReportKind::MaterialInventory.endpoint(None)).await
}
