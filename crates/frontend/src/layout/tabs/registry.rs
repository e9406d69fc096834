//! Tab content registry: the single place mapping tab keys to page views.

use crate::dashboards::d400_dashboard_stats::DashboardStatsPage;
use crate::domain::a003_raw_material::ui::RawMaterialList;
use crate::domain::a004_manufactured_product::ui::ProductInventoryPage;
use crate::domain::a007_bill_of_materials::ui::BomList;
use crate::domain::a008_production_order::ui::ProductionOrderList;
use crate::domain::a009_purchase_order::ui::PurchaseOrderList;
use crate::domain::a010_sales_order::ui::SalesOrderList;
use crate::layout::global_context::AppGlobalContext;
use crate::projections::p900_reports::ReportsPage;
use crate::system::pages::admin::AdminPage;
use crate::usecases::u501_marketplace_sync::MarketplaceSyncView;
use crate::usecases::u502_inventory_analysis::InventoryAnalysisView;
use leptos::prelude::*;

pub fn render_tab_content(key: &str, tabs_store: AppGlobalContext) -> AnyView {
    match key {
        "d400_dashboard_stats" => view! { <DashboardStatsPage /> }.into_any(),

        // Inventory and production
        "a004_product_inventory" => view! { <ProductInventoryPage /> }.into_any(),
        "a003_raw_material" => view! { <RawMaterialList /> }.into_any(),
        "a007_bill_of_materials" => view! { <BomList /> }.into_any(),
        "a008_production_order" => view! { <ProductionOrderList /> }.into_any(),

        // Orders
        "a010_sales_order" => view! { <SalesOrderList /> }.into_any(),
        "a009_purchase_order" => view! { <PurchaseOrderList /> }.into_any(),

        "u501_marketplace_sync" => view! { <MarketplaceSyncView /> }.into_any(),
        "u502_inventory_analysis" => view! { <InventoryAnalysisView /> }.into_any(),
        "p900_reports" => view! { <ReportsPage /> }.into_any(),

        "sys_admin" => view! { <AdminPage /> }.into_any(),

        _ => {
            log::warn!("Unknown tab key: {}", key);
            let key_for_close = key.to_string();
            view! {
                <div class="placeholder">
                    <span>{format!("Sección desconocida: {}", key)}</span>
                    <button
                        class="button button--secondary"
                        on:click=move |_| tabs_store.close_tab(&key_for_close)
                    >
                        "Cerrar"
                    </button>
                </div>
            }
            .into_any()
        }
    }
}
