use serde::{Deserialize, Serialize};

/// Headline numbers of the dashboard page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Sales total of the current calendar month
    pub ventas_netas: f64,
    /// Purchase orders not received plus production orders not finished
    pub ordenes_pendientes: i64,
    /// Average production lead time ("45 min", "3.5 h", "2.1 d") or "-"
    pub tiempo_proceso: String,
    /// "active/total" channels with sales in the last 30 days
    pub canales_ok: String,
}
