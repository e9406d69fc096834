//! Sidebar menu. Every section is one tab; sections outside the user's role
//! are rendered struck through with a lock and cannot be opened.

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_label_for_key;
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;
use crate::system::auth::guard::is_tab_allowed;
use leptos::prelude::*;

/// (tab key, icon) in menu order.
pub const MENU_ITEMS: &[(&str, &str)] = &[
    ("d400_dashboard_stats", "layout-grid"),
    ("a004_product_inventory", "package"),
    ("a003_raw_material", "boxes"),
    ("a007_bill_of_materials", "hammer"),
    ("a008_production_order", "factory"),
    ("u501_marketplace_sync", "zap"),
    ("a010_sales_order", "shopping-cart"),
    ("a009_purchase_order", "truck"),
    ("u502_inventory_analysis", "brain"),
    ("p900_reports", "file-text"),
    ("sys_admin", "settings"),
];

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth_state, _) = use_auth();

    view! {
        <div class="app-sidebar__content">
            {MENU_ITEMS
                .iter()
                .map(|&(key, icon_name)| {
                    let label = tab_label_for_key(key);
                    let allowed = move || is_tab_allowed(auth_state.get().role(), key);
                    view! {
                        <div
                            class="app-sidebar__item"
                            class:app-sidebar__item--active=move || {
                                ctx.active.get().as_deref() == Some(key)
                            }
                            class:app-sidebar__item--locked=move || !allowed()
                            title=label
                            on:click=move |_| {
                                if allowed() {
                                    ctx.open_tab(key, label);
                                }
                            }
                        >
                            <div class="app-sidebar__item-content">
                                {move || if allowed() { icon(icon_name) } else { icon("lock") }}
                                <span>{label}</span>
                            </div>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}
