use crate::layout::center::tabs::Tabs;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::left::sidebar::Sidebar;
use crate::layout::tabs::tab_label_for_key;
use crate::layout::Shell;
use crate::system::auth::context::use_auth;
use crate::system::auth::guard::{is_tab_allowed, OPERATIVE_TAB};
use crate::system::pages::login::LoginPage;
use leptos::prelude::*;

#[component]
fn MainLayout() -> impl IntoView {
    let tabs_store = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");
    let (auth_state, _) = use_auth();

    tabs_store.init_router_integration();

    // Operators land on production; tabs outside their role are dropped.
    Effect::new(move |_| {
        let role = auth_state.get().role();
        if role.is_some_and(|r| !r.is_admin()) {
            tabs_store.retain_tabs(|key| is_tab_allowed(role, key));
            tabs_store.open_tab(OPERATIVE_TAB, tab_label_for_key(OPERATIVE_TAB));
        } else if role.is_some() && tabs_store.opened.with_untracked(|t| t.is_empty()) {
            tabs_store.open_tab("d400_dashboard_stats", tab_label_for_key("d400_dashboard_stats"));
        }
    });

    view! {
        <Shell
            left=|| view! { <Sidebar /> }.into_any()
            center=|| view! { <Tabs /> }.into_any()
        />
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.get().access_token.is_some()
            fallback=|| view! { <LoginPage /> }
        >
            <MainLayout />
        </Show>
    }
}
