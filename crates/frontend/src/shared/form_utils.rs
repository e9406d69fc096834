//! Parsing of raw form input values.

use leptos::prelude::*;
use thaw::{Flex, FlexGap, Label};

/// Decimal amount; empty input is zero. Accepts a comma as decimal separator.
pub fn parse_amount(field: &str, value: &str) -> Result<f64, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(0.0);
    }
    value
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("{}: valor numérico inválido", field))
}

/// Whole number of units; empty input is zero.
pub fn parse_count(field: &str, value: &str) -> Result<i64, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(0);
    }
    value
        .parse::<i64>()
        .map_err(|_| format!("{}: debe ser un número entero", field))
}

/// Value of a `<select>` holding an id; "" means nothing selected.
pub fn parse_id(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok().filter(|id| *id > 0)
}

pub fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Labelled `<input type="number">` bound to the raw text.
#[component]
pub fn NumberField(
    label: &'static str,
    value: RwSignal<String>,
    #[prop(optional)] step: Option<&'static str>,
) -> impl IntoView {
    view! {
        <Flex vertical=true gap=FlexGap::Small>
            <Label>{label}</Label>
            <input
                type="number"
                class="form__input"
                min="0"
                step=step.unwrap_or("1")
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </Flex>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("Costo", " 12.5 "), Ok(12.5));
        assert_eq!(parse_amount("Costo", "12,5"), Ok(12.5));
        assert_eq!(parse_amount("Costo", ""), Ok(0.0));
        assert!(parse_amount("Costo", "doce").is_err());
    }

    #[test]
    fn test_parse_count_rejects_fractions() {
        assert_eq!(parse_count("Cantidad", "3"), Ok(3));
        assert!(parse_count("Cantidad", "2.5").is_err());
    }

    #[test]
    fn test_parse_id_and_non_empty() {
        assert_eq!(parse_id("7"), Some(7));
        assert_eq!(parse_id(""), None);
        assert_eq!(parse_id("0"), None);
        assert_eq!(non_empty("  "), None);
        assert_eq!(non_empty(" Juan "), Some("Juan".to_string()));
    }
}
