use crate::shared::csv::CsvExportable;
use crate::shared::date_range::DateRange;
use crate::shared::format::format_quantity;
use serde::{Deserialize, Serialize};

/// Report families offered on the reports page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ReportKind {
    #[default]
    #[serde(rename = "ventas")]
    Sales,
    #[serde(rename = "inv-producto")]
    ProductInventory,
    #[serde(rename = "inv-materia")]
    MaterialInventory,
}

impl ReportKind {
    pub fn all() -> Vec<Self> {
        vec![
            ReportKind::Sales,
            ReportKind::ProductInventory,
            ReportKind::MaterialInventory,
        ]
    }

    pub fn code(&self) -> &'static str {
        match self {
            ReportKind::Sales => "ventas",
            ReportKind::ProductInventory => "inv-producto",
            ReportKind::MaterialInventory => "inv-materia",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReportKind::Sales => "Reporte de ventas",
            ReportKind::ProductInventory => "Inventario de producto terminado",
            ReportKind::MaterialInventory => "Inventario de materia prima",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|k| k.code() == code)
    }

    /// Inventory reports are snapshots; only sales take a period.
    pub fn uses_period(&self) -> bool {
        matches!(self, ReportKind::Sales)
    }

    pub fn file_prefix(&self) -> &'static str {
        match self {
            ReportKind::Sales => "reporte_ventas",
            ReportKind::ProductInventory => "inventario_producto",
            ReportKind::MaterialInventory => "inventario_materia_prima",
        }
    }

    /// Backend path relative to `/api`.
    pub fn endpoint(&self, range: Option<&DateRange>) -> String {
        match (self, range) {
            (ReportKind::Sales, Some(r)) => format!(
                "/api/reportes/ventas?fecha_inicio={}&fecha_fin={}",
                r.start.format("%Y-%m-%d"),
                r.end.format("%Y-%m-%d")
            ),
            (ReportKind::Sales, None) => "/api/reportes/ventas".to_string(),
            (ReportKind::ProductInventory, _) => "/api/reportes/inventario-producto".to_string(),
            (ReportKind::MaterialInventory, _) => "/api/reportes/inventario-materia".to_string(),
        }
    }

    /// Sales endpoint whose days are read in the caller's time zone
    /// (`utc_offset` in minutes east of UTC).
    pub fn local_sales_endpoint(range: &DateRange, utc_offset: i32) -> String {
        format!(
            "{}&utc_offset={}",
            ReportKind::Sales.endpoint(Some(range)),
            utc_offset
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesReportRow {
    #[serde(rename = "id_orden")]
    pub order_id: i64,
    #[serde(rename = "fecha")]
    pub date: String,
    #[serde(rename = "canal")]
    pub channel: String,
    pub items: String,
    #[serde(rename = "total_venta")]
    pub total: f64,
    #[serde(rename = "estado")]
    pub status: String,
}

impl CsvExportable for SalesReportRow {
    fn headers() -> Vec<&'static str> {
        vec!["ID Orden", "Fecha", "Canal", "Items", "Total Venta", "Estado"]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.order_id.to_string(),
            self.date.clone(),
            self.channel.clone(),
            self.items.clone(),
            format!("{:.2}", self.total),
            self.status.clone(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInventoryRow {
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "producto")]
    pub product: String,
    #[serde(rename = "variante")]
    pub variant: String,
    #[serde(rename = "stock_actual")]
    pub stock: i64,
    #[serde(rename = "precio_venta")]
    pub sale_price: f64,
    #[serde(rename = "valor_inventario_estimado")]
    pub estimated_value: f64,
}

impl CsvExportable for ProductInventoryRow {
    fn headers() -> Vec<&'static str> {
        vec![
            "Tipo",
            "Código",
            "Producto",
            "Variante",
            "Stock Actual",
            "Precio Venta",
            "Valor Inventario Estimado",
        ]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.kind.clone(),
            self.code.clone(),
            self.product.clone(),
            self.variant.clone(),
            self.stock.to_string(),
            format!("{:.2}", self.sale_price),
            format!("{:.2}", self.estimated_value),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialInventoryRow {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "proveedor")]
    pub supplier: String,
    #[serde(rename = "unidad")]
    pub unit: String,
    #[serde(rename = "stock_actual")]
    pub stock: f64,
    #[serde(rename = "costo_unitario")]
    pub unit_cost: f64,
    #[serde(rename = "valor_total_inversion")]
    pub total_value: f64,
}

impl CsvExportable for MaterialInventoryRow {
    fn headers() -> Vec<&'static str> {
        vec![
            "ID",
            "Nombre",
            "Proveedor",
            "Unidad",
            "Stock Actual",
            "Costo Unitario",
            "Valor Total Inversión",
        ]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.supplier.clone(),
            self.unit.clone(),
            format_quantity(self.stock),
            format!("{:.2}", self.unit_cost),
            format!("{:.2}", self.total_value),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::csv::to_csv;
    use chrono::NaiveDate;

    #[test]
    fn test_kind_codes_and_endpoints() {
        assert_eq!(ReportKind::from_code("inv-materia"), Some(ReportKind::MaterialInventory));
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 31).unwrap(),
        )
        .unwrap();
        assert_eq!(
            ReportKind::Sales.endpoint(Some(&range)),
            "/api/reportes/ventas?fecha_inicio=2024-05-01&fecha_fin=2024-05-31"
        );
        assert_eq!(
            ReportKind::local_sales_endpoint(&range, -360),
            "/api/reportes/ventas?fecha_inicio=2024-05-01&fecha_fin=2024-05-31&utc_offset=-360"
        );
        assert!(!ReportKind::ProductInventory.uses_period());
    }

    #[test]
    fn test_sales_row_csv_quotes_items() {
        let rows = vec![SalesReportRow {
            order_id: 4,
            date: "2024-05-02 10:30".into(),
            channel: "Mostrador".into(),
            items: "Pijama (M/Azul) x2, Gorra \"Hadros\" x1".into(),
            total: 820.0,
            status: "Pagada".into(),
        }];
        let csv = to_csv(&rows);
        let second = csv.lines().nth(1).unwrap();
        assert_eq!(
            second,
            "\"4\",\"2024-05-02 10:30\",\"Mostrador\",\"Pijama (M/Azul) x2, Gorra \"\"Hadros\"\" x1\",\"820.00\",\"Pagada\""
        );
    }
}
