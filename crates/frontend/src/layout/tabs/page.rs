use super::registry::render_tab_content;
use crate::layout::global_context::{AppGlobalContext, Tab as TabData};
use crate::system::auth::context::use_auth;
use crate::system::auth::guard::{is_tab_allowed, LockedNotice};
use leptos::prelude::*;

/// Wrapper for one opened tab. Content is created once; visibility follows
/// the active tab through the `tabs__item--hidden` class.
#[component]
pub fn TabPage(tab: TabData, tabs_store: AppGlobalContext) -> impl IntoView {
    let (auth_state, _) = use_auth();
    let tab_key = tab.key.clone();
    let key_for_active = tab_key.clone();
    let is_active = move || tabs_store.active.get().as_deref() == Some(key_for_active.as_str());

    log::debug!("TabPage created: '{}'", tab_key);

    // a tab restored from the URL may be outside the user's role
    let content = if is_tab_allowed(auth_state.get_untracked().role(), &tab_key) {
        render_tab_content(&tab_key, tabs_store)
    } else {
        view! { <LockedNotice /> }.into_any()
    };

    view! {
        <div
            class="tabs__item"
            class:tabs__item--hidden=move || !is_active()
            data-tab-key=tab_key
        >
            {content}
        </div>
    }
}
