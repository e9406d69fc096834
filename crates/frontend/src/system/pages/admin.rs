use leptos::prelude::*;
use thaw::*;

use crate::domain::a001_supplier::ui::SuppliersPanel;
use crate::domain::a002_sales_channel::ui::ChannelsPanel;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_SYSTEM;
use crate::system::auth::guard::RequireAdmin;
use crate::system::users::ui::UsersPanel;

/// Administrar: users, suppliers and sales channels.
#[component]
pub fn AdminPage() -> impl IntoView {
    view! {
        <RequireAdmin>
            <AdminTabs />
        </RequireAdmin>
    }
}

#[component]
fn AdminTabs() -> impl IntoView {
    let selected = RwSignal::new("usuarios".to_string());

    view! {
        <PageFrame page_id="sys_admin--system" category=PAGE_CAT_SYSTEM>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Administrar"</h1>
                </div>
            </div>
            <div class="page__content">
                <TabList selected_value=selected>
                    <Tab value="usuarios">"Usuarios"</Tab>
                    <Tab value="proveedores">"Proveedores"</Tab>
                    <Tab value="canales">"Canales de venta"</Tab>
                </TabList>
                {move || match selected.get().as_str() {
                    "proveedores" => view! { <SuppliersPanel /> }.into_any(),
                    "canales" => view! { <ChannelsPanel /> }.into_any(),
                    _ => view! { <UsersPanel /> }.into_any(),
                }}
            </div>
        </PageFrame>
    }
}
