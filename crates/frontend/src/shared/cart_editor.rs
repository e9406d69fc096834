//! Line editor shared by the purchase and sales pages.
//!
//! Items are picked from a catalog fetched by the page; the `<select>` value
//! is the item's unique id (`mat-3`, `var-12`, ...).

use contracts::shared::cart::{Cart, CatalogEntry};
use contracts::shared::format::{format_money, format_quantity};
use leptos::prelude::*;
use thaw::*;

use crate::shared::form_utils::{parse_amount, NumberField};
use crate::shared::icons::icon;
use crate::shared::notify::alert;

/// Display values of one cart line, detached from the cart borrow.
#[derive(Debug, Clone, PartialEq)]
pub struct LineRow {
    pub temp_key: u32,
    pub name: String,
    pub quantity: String,
    pub unit_price: String,
    pub subtotal: String,
    pub over: bool,
}

pub fn line_rows<R: Clone + PartialEq>(cart: &Cart<R>) -> Vec<LineRow> {
    cart.lines()
        .iter()
        .map(|line| LineRow {
            temp_key: line.temp_key,
            name: line.name.clone(),
            quantity: format_quantity(line.quantity),
            unit_price: format_money(line.unit_price),
            subtotal: format_money(line.subtotal()),
            over: line
                .stock_limit
                .is_some_and(|limit| cart.quantity_for(&line.reference) > limit),
        })
        .collect()
}

/// Adds a line through the signal. A disposed cart is an error, never a
/// silent success.
pub fn add_to_cart<R>(
    cart: RwSignal<Cart<R>>,
    reference: &R,
    quantity: f64,
    unit_price: f64,
    catalog: &[CatalogEntry<R>],
) -> Result<u32, String>
where
    R: Clone + PartialEq + Send + Sync + 'static,
{
    cart.try_update(|c| c.add(reference, quantity, unit_price, catalog))
        .ok_or_else(|| "El carrito ya no está disponible".to_string())?
        .map_err(|e| e.to_string())
}

/// Option text for the item picker: name plus known stock, when bounded.
pub fn option_label<R>(entry: &CatalogEntry<R>) -> String {
    match entry.stock_limit {
        Some(stock) => format!("{} · disponible {}", entry.name, format_quantity(stock)),
        None => entry.name.clone(),
    }
}

#[component]
pub fn CartEditor<R>(
    cart: RwSignal<Cart<R>>,
    #[prop(into)] catalog: Signal<Vec<CatalogEntry<R>>>,
    key_of: fn(&R) -> String,
    parse: fn(&str) -> Option<R>,
    #[prop(optional)] price_label: Option<&'static str>,
) -> impl IntoView
where
    R: Clone + PartialEq + Send + Sync + 'static,
{
    let item = RwSignal::new(String::new());
    let quantity = RwSignal::new(String::new());
    let price = RwSignal::new(String::new());

    // Picking an item proposes its catalog price.
    Effect::new(move |_| {
        let Some(reference) = parse(&item.get()) else {
            return;
        };
        let default_price = catalog.with_untracked(|entries| {
            entries
                .iter()
                .find(|e| e.reference == reference)
                .map(|e| e.default_price)
        });
        if let Some(p) = default_price {
            price.set(format!("{:.2}", p));
        }
    });

    let add_line = move |_| {
        let Some(reference) = parse(&item.get_untracked()) else {
            return alert("Selecciona un artículo");
        };
        let parsed = parse_amount("Cantidad", &quantity.get_untracked())
            .and_then(|q| parse_amount("Precio", &price.get_untracked()).map(|p| (q, p)));
        let (qty, unit_price) = match parsed {
            Ok(values) => values,
            Err(e) => return alert(&e),
        };
        let added = catalog
            .with_untracked(|entries| add_to_cart(cart, &reference, qty, unit_price, entries));
        match added {
            Ok(_) => {
                item.set(String::new());
                quantity.set(String::new());
                price.set(String::new());
            }
            Err(e) => alert(&e),
        }
    };

    view! {
        <div class="cart-editor">
            <Flex gap=FlexGap::Small align=FlexAlign::End style="flex-wrap: wrap;">
                <Flex vertical=true gap=FlexGap::Small>
                    <Label>"Artículo"</Label>
                    <Select value=item>
                        <option value="">"Selecciona..."</option>
                        {move || {
                            catalog
                                .get()
                                .iter()
                                .map(|entry| {
                                    let value = key_of(&entry.reference);
                                    view! { <option value=value>{option_label(entry)}</option> }
                                })
                                .collect_view()
                        }}
                    </Select>
                </Flex>
                <NumberField label="Cantidad" value=quantity step="0.01" />
                <NumberField label=price_label.unwrap_or("Precio unitario") value=price step="0.01" />
                <Button appearance=ButtonAppearance::Secondary on_click=add_line>
                    {icon("plus")}
                    " Agregar"
                </Button>
            </Flex>

            <Table attr:style="width: 100%;">
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>"Artículo"</TableHeaderCell>
                        <TableHeaderCell>"Cantidad"</TableHeaderCell>
                        <TableHeaderCell>"Precio"</TableHeaderCell>
                        <TableHeaderCell>"Subtotal"</TableHeaderCell>
                        <TableHeaderCell>""</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    <For
                        each=move || cart.with(line_rows)
                        key=|row| (row.temp_key, row.over)
                        children=move |row: LineRow| {
                            let key = row.temp_key;
                            view! {
                                <TableRow class=if row.over { "cart__line cart__line--over" } else { "cart__line" }>
                                    <TableCell>{row.name}</TableCell>
                                    <TableCell>{row.quantity}</TableCell>
                                    <TableCell>{row.unit_price}</TableCell>
                                    <TableCell>{row.subtotal}</TableCell>
                                    <TableCell>
                                        <Button
                                            appearance=ButtonAppearance::Subtle
                                            on_click=move |_| cart.update(|c| {
                                                c.remove(key);
                                            })
                                        >
                                            {icon("x")}
                                        </Button>
                                    </TableCell>
                                </TableRow>
                            }
                        }
                    />
                </TableBody>
            </Table>

            <Show when=move || !cart.with(Cart::is_empty)>
                <div class="cart__summary">
                    {move || {
                        cart.with(|c| {
                            c.grouped()
                                .into_iter()
                                .map(|g| {
                                    let text = format!(
                                        "{} × {} = {}",
                                        g.name,
                                        format_quantity(g.quantity),
                                        format_money(g.subtotal)
                                    );
                                    view! { <span class="cart__group">{text}</span> }
                                })
                                .collect_view()
                        })
                    }}
                    <strong class="cart__total">
                        "Total: " {move || format_money(cart.with(Cart::total))}
                    </strong>
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a006_product_variant::aggregate::ProductVariantId;
    use contracts::shared::stock_item::StockItemRef;

    fn filipina() -> StockItemRef {
        StockItemRef::Variant(ProductVariantId(1))
    }

    fn sale_catalog(stock: f64) -> Vec<CatalogEntry<StockItemRef>> {
        vec![CatalogEntry {
            reference: filipina(),
            name: "Filipina (M/Azul)".to_string(),
            stock_limit: Some(stock),
            default_price: 450.0,
            whole_units: true,
        }]
    }

    #[test]
    fn test_line_rows_own_their_text() {
        let mut cart = Cart::for_sale();
        cart.add(&filipina(), 2.0, 450.0, &sale_catalog(5.0)).unwrap();
        cart.add(&filipina(), 1.0, 400.0, &sale_catalog(5.0)).unwrap();

        let rows = line_rows(&cart);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Filipina (M/Azul)");
        assert_eq!(rows[0].quantity, "2");
        assert_eq!(rows[0].subtotal, "$900.00");
        assert!(!rows[0].over);

        // stock dropped after a re-fetch
        cart.refresh_limits(&sale_catalog(2.0));
        assert!(line_rows(&cart).iter().all(|r| r.over));
    }

    #[test]
    fn test_add_to_cart_through_signal() {
        let cart = RwSignal::new(Cart::for_sale());
        let catalog = sale_catalog(3.0);

        assert!(add_to_cart(cart, &filipina(), 2.0, 450.0, &catalog).is_ok());
        let err = add_to_cart(cart, &filipina(), 2.0, 450.0, &catalog).unwrap_err();
        assert!(err.contains("Filipina"), "{}", err);
        assert_eq!(cart.with_untracked(Cart::len), 1);
    }

    #[test]
    fn test_add_to_disposed_cart_is_an_error() {
        let cart = RwSignal::new(Cart::for_sale());
        cart.dispose();
        assert!(add_to_cart(cart, &filipina(), 1.0, 450.0, &sale_catalog(3.0)).is_err());
    }

    #[test]
    fn test_option_label_shows_stock_when_bounded() {
        let bounded = CatalogEntry {
            reference: 1,
            name: "Filipina (M/Azul)".to_string(),
            stock_limit: Some(4.0),
            default_price: 450.0,
            whole_units: true,
        };
        assert_eq!(option_label(&bounded), "Filipina (M/Azul) · disponible 4");

        let unbounded = CatalogEntry { stock_limit: None, ..bounded };
        assert_eq!(option_label(&unbounded), "Filipina (M/Azul)");
    }
}
