//! PageFrame: standard root wrapper for every page rendered inside a tab.
//!
//! ```rust,no_run
//! # use leptos::prelude::*;
//! # use frontend::shared::page_frame::PageFrame;
//! # use frontend::shared::page_standard::*;
//! # fn _example() -> impl IntoView {
//! view! {
//!     <PageFrame page_id="a003_raw_material--list" category=PAGE_CAT_LIST>
//!         <div class="page__header">...</div>
//!         <div class="page__content">...</div>
//!     </PageFrame>
//! }
//! # }
//! ```

use super::page_standard::*;
use leptos::prelude::*;

#[component]
pub fn PageFrame(
    /// `{entity}--{category}`, e.g. `"a010_sales_order--list"`.
    page_id: &'static str,
    /// One of the PAGE_CAT_* constants from `page_standard`.
    category: &'static str,
    children: Children,
) -> impl IntoView {
    debug_assert!(is_valid_page_id(page_id), "bad page id: {}", page_id);

    let class = match category {
        PAGE_CAT_DASHBOARD => "page page--dashboard",
        _ => "page",
    };

    view! {
        <div id=page_id class=class data-page-category=category>
            {children()}
        </div>
    }
}
