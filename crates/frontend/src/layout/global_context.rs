use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

use crate::layout::tabs::tab_label_for_key;

/// Opened tabs, the active one, and sidebar visibility.
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub opened: RwSignal<Vec<Tab>>,
    pub active: RwSignal<Option<String>>,
    pub left_open: RwSignal<bool>,
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            opened: RwSignal::new(vec![]),
            active: RwSignal::new(None),
            left_open: RwSignal::new(true),
        }
    }

    /// Restores `?active=<key>` on load and mirrors the active tab back into the URL.
    pub fn init_router_integration(&self) {
        if let Some(key) = active_from_query(&current_search()) {
            self.open_tab(&key, tab_label_for_key(&key));
        }

        let this = *self;
        Effect::new(move |_| {
            let Some(key) = this.active.get() else {
                return;
            };
            let url = query_for_active(&key);
            if current_search() == url {
                return;
            }
            if let Some(history) = window().and_then(|w| w.history().ok()) {
                let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&url));
            }
        });
    }

    pub fn open_tab(&self, key: &str, title: &str) {
        log::debug!("open_tab: key='{}', title='{}'", key, title);
        let exists = self
            .opened
            .with_untracked(|tabs| tabs.iter().any(|tab| tab.key == key));
        if !exists {
            self.opened.update(|tabs| {
                tabs.push(Tab {
                    key: key.to_string(),
                    title: title.to_string(),
                })
            });
        }
        self.activate_tab(key);
    }

    pub fn activate_tab(&self, key: &str) {
        self.active.set(Some(key.to_string()));
    }

    pub fn close_tab(&self, key: &str) {
        log::debug!("close_tab: key='{}'", key);
        self.opened.update(|tabs| tabs.retain(|tab| tab.key != key));
        if self
            .active
            .with_untracked(|active| active.as_deref() == Some(key))
        {
            self.active.set(self.last_tab_key());
        }
    }

    /// Keeps only the tabs accepted by `allowed` (used after a role change).
    pub fn retain_tabs(&self, allowed: impl Fn(&str) -> bool) {
        self.opened.update(|tabs| tabs.retain(|tab| allowed(&tab.key)));
        let still_open = self.active.with_untracked(|active| {
            active.as_deref().is_some_and(|key| {
                self.opened.with_untracked(|tabs| tabs.iter().any(|t| t.key == key))
            })
        });
        if !still_open {
            self.active.set(self.last_tab_key());
        }
    }

    fn last_tab_key(&self) -> Option<String> {
        self.opened
            .with_untracked(|tabs| tabs.last().map(|t| t.key.clone()))
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub key: String,
    pub title: String,
}

fn current_search() -> String {
    window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

/// Tab key from a `?active=<key>` query string.
fn active_from_query(search: &str) -> Option<String> {
    let params: HashMap<String, String> =
        serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
    params.get("active").filter(|key| !key.is_empty()).cloned()
}

fn query_for_active(key: &str) -> String {
    let params = HashMap::from([("active", key)]);
    format!("?{}", serde_qs::to_string(&params).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_tab_survives_the_url() {
        let url = query_for_active("a010_sales_order");
        assert_eq!(url, "?active=a010_sales_order");
        assert_eq!(active_from_query(&url).as_deref(), Some("a010_sales_order"));
    }

    #[test]
    fn test_missing_active_param() {
        assert_eq!(active_from_query(""), None);
        assert_eq!(active_from_query("?other=1"), None);
        assert_eq!(active_from_query("?active="), None);
    }
}
