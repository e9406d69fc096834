use contracts::domain::a002_sales_channel::aggregate::{SalesChannel, SalesChannelId};
use contracts::domain::a005_resale_product::aggregate::ResaleProduct;
use contracts::domain::a006_product_variant::aggregate::ProductVariant;
use contracts::domain::a010_sales_order::aggregate::{SalesOrder, SalesOrderDto, SalesOrderLineDto};
use contracts::enums::SalesOrderStatus;
use contracts::shared::cart::Cart;
use contracts::shared::format::format_money;
use contracts::shared::stock_item::StockItemRef;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a002_sales_channel::api::fetch_channels;
use crate::domain::a005_resale_product::api::fetch_resale_products;
use crate::domain::a006_product_variant::api::fetch_variants;
use crate::domain::a010_sales_order::api::{cancel_sale, create_sale, fetch_sales, update_status};
use crate::shared::cart_editor::CartEditor;
use crate::shared::catalog::sale_catalog;
use crate::shared::date_utils::format_datetime;
use crate::shared::form_utils::parse_id;
use crate::shared::icons::icon;
use crate::shared::notify::{alert, alert_error, confirm};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;

fn status_color(status: SalesOrderStatus) -> BadgeColor {
    match status {
        SalesOrderStatus::Paid => BadgeColor::Brand,
        SalesOrderStatus::InProduction => BadgeColor::Warning,
        SalesOrderStatus::Shipped => BadgeColor::Informative,
        SalesOrderStatus::Delivered => BadgeColor::Success,
    }
}

/// Channel and status filters; "" selects everything.
fn matches_filters(order: &SalesOrder, channel: &str, status: &str) -> bool {
    let channel_ok = parse_id(channel).map_or(true, |id| order.channel_id.0 == id);
    let status_ok = status.is_empty() || order.status.label() == status;
    channel_ok && status_ok
}

#[component]
pub fn SalesOrderList() -> impl IntoView {
    let sales = RwSignal::new(Vec::<SalesOrder>::new());
    let channels = RwSignal::new(Vec::<SalesChannel>::new());
    let variants = RwSignal::new(Vec::<ProductVariant>::new());
    let resale = RwSignal::new(Vec::<ResaleProduct>::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);
    let (show_form, set_show_form) = signal(false);

    let channel = RwSignal::new(String::new());
    let cart = RwSignal::new(Cart::<StockItemRef>::for_sale());
    let channel_filter = RwSignal::new(String::new());
    let status_filter = RwSignal::new(String::new());

    let catalog = Signal::derive(move || variants.with(|v| resale.with(|r| sale_catalog(v, r))));

    let load = move || {
        spawn_local(async move {
            set_loading.set(true);
            set_error.set(None);
            match fetch_sales().await {
                Ok(list) => sales.set(list),
                Err(e) => {
                    log::error!("Failed to fetch sales: {}", e);
                    set_error.set(Some(e));
                }
            }
            match fetch_channels().await {
                Ok(list) => channels.set(list),
                Err(e) => log::error!("Failed to fetch channels: {}", e),
            }
            match fetch_variants().await {
                Ok(list) => variants.set(list),
                Err(e) => log::error!("Failed to fetch variants: {}", e),
            }
            match fetch_resale_products().await {
                Ok(list) => resale.set(list),
                Err(e) => log::error!("Failed to fetch resale products: {}", e),
            }
            // Lines drafted before the refetch are checked against the new stock.
            cart.update(|c| c.refresh_limits(&catalog.get_untracked()));
            set_loading.set(false);
        });
    };

    Effect::new(move |_| load());

    let visible = Signal::derive(move || {
        let channel = channel_filter.get();
        let status = status_filter.get();
        sales
            .get()
            .into_iter()
            .filter(|o| matches_filters(o, &channel, &status))
            .collect::<Vec<_>>()
    });

    let submit = move |_| {
        let dto = SalesOrderDto {
            channel_id: SalesChannelId(parse_id(&channel.get_untracked()).unwrap_or(0)),
            lines: cart.with_untracked(|c| c.to_payload(|l| SalesOrderLineDto::from(l))),
        };
        if let Err(e) = dto.validate() {
            return alert(&e);
        }
        spawn_local(async move {
            set_saving.set(true);
            match create_sale(&dto).await {
                Ok(order) => {
                    log::info!("Sale {} registered", order.id);
                    cart.update(Cart::clear);
                    channel.set(String::new());
                    set_show_form.set(false);
                    load();
                }
                Err(e) => alert_error("Create sale", &e),
            }
            set_saving.set(false);
        });
    };

    let change_status = move |id: i64, label: String| {
        let Some(status) = SalesOrderStatus::from_label(&label) else {
            return;
        };
        spawn_local(async move {
            match update_status(id, status).await {
                Ok(_) => load(),
                Err(e) => {
                    alert_error("Update sale status", &e);
                    load();
                }
            }
        });
    };

    let cancel = move |id: i64| {
        if !confirm(&format!("¿Cancelar la venta #{}? El stock será devuelto al inventario.", id)) {
            return;
        }
        spawn_local(async move {
            match cancel_sale(id).await {
                Ok(()) => load(),
                Err(e) => alert_error("Cancel sale", &e),
            }
        });
    };

    view! {
        <PageFrame page_id="a010_sales_order--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Ventas"</h1>
                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>
                        {move || visible.with(Vec::len).to_string()}
                    </Badge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| set_show_form.update(|v| *v = !*v)
                    >
                        {icon("plus")}
                        {move || if show_form.get() { " Cerrar" } else { " Nueva venta" }}
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        {move || if loading.get() { " Cargando..." } else { " Actualizar" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <Show when=move || show_form.get()>
                    <Card>
                        <Flex vertical=true gap=FlexGap::Small>
                            <Label>"Canal de venta"</Label>
                            <Select value=channel>
                                <option value="">"Selecciona..."</option>
                                {move || {
                                    channels
                                        .get()
                                        .into_iter()
                                        .map(|c| view! { <option value=c.id.to_string()>{c.name}</option> })
                                        .collect_view()
                                }}
                            </Select>
                        </Flex>
                        <CartEditor
                            cart=cart
                            catalog=catalog
                            key_of=StockItemRef::unique_id
                            parse=StockItemRef::parse
                        />
                        <Show when=move || cart.with(Cart::over_limit)>
                            <div class="alert alert--error">
                                "Hay artículos que superan el stock disponible"
                            </div>
                        </Show>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=submit
                            disabled=Signal::derive(move || saving.get() || !cart.with(Cart::can_submit))
                        >
                            {icon("send")}
                            {move || if saving.get() { " Enviando..." } else { " Registrar venta" }}
                        </Button>
                    </Card>
                </Show>

                {move || error.get().map(|err| view! { <div class="alert alert--error">{err}</div> })}

                <Flex gap=FlexGap::Small align=FlexAlign::End>
                    <Flex vertical=true gap=FlexGap::Small>
                        <Label>"Canal"</Label>
                        <Select value=channel_filter>
                            <option value="">"Todos"</option>
                            {move || {
                                channels
                                    .get()
                                    .into_iter()
                                    .map(|c| view! { <option value=c.id.to_string()>{c.name}</option> })
                                    .collect_view()
                            }}
                        </Select>
                    </Flex>
                    <Flex vertical=true gap=FlexGap::Small>
                        <Label>"Estado"</Label>
                        <Select value=status_filter>
                            <option value="">"Todos"</option>
                            {SalesOrderStatus::all()
                                .into_iter()
                                .map(|s| view! { <option value=s.label()>{s.label()}</option> })
                                .collect_view()}
                        </Select>
                    </Flex>
                </Flex>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"#"</TableHeaderCell>
                                <TableHeaderCell>"Fecha"</TableHeaderCell>
                                <TableHeaderCell>"Canal"</TableHeaderCell>
                                <TableHeaderCell>"Artículos"</TableHeaderCell>
                                <TableHeaderCell>"Total"</TableHeaderCell>
                                <TableHeaderCell>"Estado"</TableHeaderCell>
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || visible.get()
                                key=|o| (o.id, o.status)
                                children=move |order: SalesOrder| {
                                    let id = order.id.0;
                                    let status = order.status;
                                    let number = order.id.to_string();
                                    let date = format_datetime(&order.date);
                                    let channel = order.channel_name().to_string();
                                    let summary = order.items_summary();
                                    let total = format_money(order.total());
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout>{number}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{date}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{channel}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{summary}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{total}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <Flex gap=FlexGap::Small align=FlexAlign::Center>
                                                    <Badge appearance=BadgeAppearance::Tint color=status_color(status)>
                                                        {status.label()}
                                                    </Badge>
                                                    <select
                                                        class="form__select form__select--compact"
                                                        on:change=move |ev| change_status(id, event_target_value(&ev))
                                                    >
                                                        {SalesOrderStatus::all()
                                                            .into_iter()
                                                            .map(|s| {
                                                                view! {
                                                                    <option value=s.label() selected=s == status>
                                                                        {s.label()}
                                                                    </option>
                                                                }
                                                            })
                                                            .collect_view()}
                                                    </select>
                                                </Flex>
                                            </TableCell>
                                            <TableCell>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| cancel(id)
                                                >
                                                    {icon("trash")}
                                                    " Cancelar"
                                                </Button>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                    <Show when=move || !loading.get() && visible.with(Vec::is_empty)>
                        <div class="table__empty">"No hay ventas registradas"</div>
                    </Show>
                </div>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use contracts::domain::a010_sales_order::aggregate::SalesOrderId;

    fn sale(channel: i64, status: SalesOrderStatus) -> SalesOrder {
        SalesOrder {
            id: SalesOrderId(1),
            date: Utc::now(),
            status,
            channel_id: SalesChannelId(channel),
            channel: None,
            user_id: None,
            lines: Vec::new(),
        }
    }

    #[test]
    fn test_filters() {
        let order = sale(2, SalesOrderStatus::Shipped);
        assert!(matches_filters(&order, "", ""));
        assert!(matches_filters(&order, "2", "Enviada"));
        assert!(!matches_filters(&order, "3", ""));
        assert!(!matches_filters(&order, "", "Pagada"));
    }
}
