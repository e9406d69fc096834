/// Client-side search and sorting for fetched lists.
use leptos::prelude::*;
use std::cmp::Ordering;

/// Types that can be matched against a free-text filter.
pub trait Searchable {
    /// `filter` arrives trimmed and lowercased.
    fn matches_filter(&self, filter: &str) -> bool;
}

pub trait Sortable {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

pub fn sort_list<T: Sortable>(items: &mut [T], field: &str, ascending: bool) {
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, field);
        if ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
}

pub fn filter_list<T: Searchable>(items: Vec<T>, filter: &str) -> Vec<T> {
    let filter = filter.trim().to_lowercase();
    if filter.is_empty() {
        return items;
    }
    items
        .into_iter()
        .filter(|item| item.matches_filter(&filter))
        .collect()
}

/// Case-insensitive containment, for `Searchable` impls.
pub fn contains_ci(haystack: &str, filter: &str) -> bool {
    haystack.to_lowercase().contains(filter)
}

pub fn compare_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

pub fn get_sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field == field {
        if ascending {
            " ▲"
        } else {
            " ▼"
        }
    } else {
        " ⇅"
    }
}

/// Text input bound to a filter signal, with a clear button.
#[component]
pub fn SearchInput(
    value: RwSignal<String>,
    #[prop(optional, into)] placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Buscar...".to_string()
    } else {
        placeholder
    };

    view! {
        <div class="search-input">
            <input
                type="text"
                class="search-input__field"
                class:search-input__field--active=move || !value.get().trim().is_empty()
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
            <Show when=move || !value.get().is_empty()>
                <button
                    class="search-input__clear"
                    title="Limpiar"
                    on:click=move |_| value.set(String::new())
                >
                    {crate::shared::icons::icon("x")}
                </button>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: &'static str,
        stock: f64,
    }

    impl Searchable for Row {
        fn matches_filter(&self, filter: &str) -> bool {
            contains_ci(self.name, filter)
        }
    }

    impl Sortable for Row {
        fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
            match field {
                "stock" => compare_f64(self.stock, other.stock),
                _ => self.name.cmp(other.name),
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "Tela Oxford", stock: 40.0 },
            Row { name: "Botón blanco", stock: 500.0 },
            Row { name: "Hilo", stock: 12.5 },
        ]
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let found = filter_list(rows(), "  OXFORD ");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Tela Oxford");
        assert_eq!(filter_list(rows(), "").len(), 3);
    }

    #[test]
    fn test_sort_by_field() {
        let mut items = rows();
        sort_list(&mut items, "stock", false);
        assert_eq!(items[0].name, "Botón blanco");
        sort_list(&mut items, "name", true);
        assert_eq!(items[0].name, "Botón blanco");
        assert_eq!(items[2].name, "Tela Oxford");
    }
}
