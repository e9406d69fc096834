//! Tab titles, shared by the sidebar and tabs restored from the URL.

/// Readable title for a tab key. Unknown keys fall back to "Sección".
pub fn tab_label_for_key(key: &str) -> &'static str {
    match key {
        "d400_dashboard_stats" => "Dashboard",
        "a004_product_inventory" => "Inventario Producto",
        "a003_raw_material" => "Inventario Materia Prima",
        "a007_bill_of_materials" => "Lista de Materiales (BOM)",
        "a008_production_order" => "Producción",
        "u501_marketplace_sync" => "Sincronización",
        "a010_sales_order" => "Ventas",
        "a009_purchase_order" => "Compras",
        "u502_inventory_analysis" => "Informes/IA",
        "p900_reports" => "Reportes",
        "sys_admin" => "Administrar",
        _ => "Sección",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::left::sidebar::MENU_ITEMS;

    #[test]
    fn test_every_menu_item_has_a_label() {
        for (key, _) in MENU_ITEMS {
            assert_ne!(tab_label_for_key(key), "Sección", "missing label for {}", key);
        }
    }
}
