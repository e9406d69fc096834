use contracts::domain::a006_product_variant::aggregate::{ProductVariant, ProductVariantId};
use contracts::domain::a008_production_order::aggregate::{ProductionOrder, ProductionOrderDto};
use contracts::enums::ProductionOrderStatus;
use contracts::shared::format::format_lead_time;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a006_product_variant::api::fetch_variants;
use crate::domain::a008_production_order::api::{create_order, fetch_orders, finish_order};
use crate::shared::date_utils::format_datetime;
use crate::shared::form_utils::{parse_count, parse_id, NumberField};
use crate::shared::icons::icon;
use crate::shared::notify::{alert, alert_error, confirm};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;

fn status_color(status: ProductionOrderStatus) -> BadgeColor {
    match status {
        ProductionOrderStatus::Pending => BadgeColor::Warning,
        ProductionOrderStatus::InProgress => BadgeColor::Informative,
        ProductionOrderStatus::Finished => BadgeColor::Success,
    }
}

#[component]
pub fn ProductionOrderList() -> impl IntoView {
    let orders = RwSignal::new(Vec::<ProductionOrder>::new());
    let variants = RwSignal::new(Vec::<ProductVariant>::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);
    let show_finished = RwSignal::new(true);

    let variant = RwSignal::new(String::new());
    let quantity = RwSignal::new(String::new());

    let load = move || {
        spawn_local(async move {
            set_loading.set(true);
            set_error.set(None);
            match fetch_orders().await {
                Ok(list) => orders.set(list),
                Err(e) => {
                    log::error!("Failed to fetch production orders: {}", e);
                    set_error.set(Some(e));
                }
            }
            match fetch_variants().await {
                Ok(list) => variants.set(list),
                Err(e) => log::error!("Failed to fetch variants: {}", e),
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| load());

    let visible = Signal::derive(move || {
        let all = show_finished.get();
        orders
            .get()
            .into_iter()
            .filter(|o| all || !o.status.is_finished())
            .collect::<Vec<_>>()
    });

    let submit = move |_| {
        let dto = parse_count("Cantidad", &quantity.get_untracked()).map(|quantity| {
            ProductionOrderDto {
                variant_id: ProductVariantId(parse_id(&variant.get_untracked()).unwrap_or(0)),
                quantity,
            }
        });
        let dto = match dto.and_then(|dto| dto.validate().map(|_| dto)) {
            Ok(dto) => dto,
            Err(e) => return alert(&e),
        };
        spawn_local(async move {
            set_saving.set(true);
            match create_order(&dto).await {
                Ok(order) => {
                    log::info!("Production order {} created", order.id);
                    variant.set(String::new());
                    quantity.set(String::new());
                    load();
                }
                Err(e) => alert_error("Create production order", &e),
            }
            set_saving.set(false);
        });
    };

    let finish = move |order: ProductionOrder| {
        let message = format!(
            "¿Terminar la orden #{} ({} x {})? Se descontarán los materiales.",
            order.id,
            order.quantity,
            order.variant_label()
        );
        if !confirm(&message) {
            return;
        }
        spawn_local(async move {
            match finish_order(order.id.0).await {
                Ok(_) => load(),
                // Shortage detail from the server, e.g. "No hay suficiente stock de Tela..."
                Err(e) => alert_error("Finish production order", &e),
            }
        });
    };

    view! {
        <PageFrame page_id="a008_production_order--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Producción"</h1>
                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Warning>
                        {move || {
                            orders.with(|list| list.iter().filter(|o| !o.status.is_finished()).count())
                                .to_string()
                        }}
                    </Badge>
                </div>
                <div class="page__header-right">
                    <label class="page__toggle">
                        <input
                            type="checkbox"
                            prop:checked=move || show_finished.get()
                            on:change=move |ev| show_finished.set(event_target_checked(&ev))
                        />
                        " Mostrar terminadas"
                    </label>
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
                <Card>
                    <Flex gap=FlexGap::Small align=FlexAlign::End style="flex-wrap: wrap;">
                        <Flex vertical=true gap=FlexGap::Small>
                            <Label>"Variante"</Label>
                            <Select value=variant>
                                <option value="">"Selecciona..."</option>
                                {move || {
                                    variants
                                        .get()
                                        .into_iter()
                                        .map(|v| {
                                            let text = format!("{} · stock {}", v.label(), v.stock);
                                            view! { <option value=v.id.to_string()>{text}</option> }
                                        })
                                        .collect_view()
                                }}
                            </Select>
                        </Flex>
                        <NumberField label="Cantidad a producir" value=quantity />
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=submit
                            disabled=Signal::derive(move || saving.get())
                        >
                            {icon("plus")}
                            " Crear orden"
                        </Button>
                    </Flex>
                </Card>

                {move || error.get().map(|err| view! { <div class="alert alert--error">{err}</div> })}

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"#"</TableHeaderCell>
                                <TableHeaderCell>"Variante"</TableHeaderCell>
                                <TableHeaderCell>"Cantidad"</TableHeaderCell>
                                <TableHeaderCell>"Estado"</TableHeaderCell>
                                <TableHeaderCell>"Creada"</TableHeaderCell>
                                <TableHeaderCell>"Terminada"</TableHeaderCell>
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || visible.get()
                                key=|o| (o.id, o.status)
                                children=move |order: ProductionOrder| {
                                    let finished = match (order.finished_at, order.lead_time()) {
                                        (Some(at), Some(lead)) => {
                                            format!("{} ({})", format_datetime(&at), format_lead_time(lead.num_seconds() as f64 / 60.0))
                                        }
                                        _ => "-".to_string(),
                                    };
                                    let is_finished = order.status.is_finished();
                                    let status = order.status;
                                    let id = order.id.to_string();
                                    let variant = order.variant_label();
                                    let quantity = order.quantity;
                                    let created = format_datetime(&order.created_at);
                                    let row = order;
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout>{id}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{variant}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{quantity}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <Badge appearance=BadgeAppearance::Tint color=status_color(status)>
                                                    {status.label()}
                                                </Badge>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{created}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{finished}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                {(!is_finished).then(|| view! {
                                                    <Button
                                                        appearance=ButtonAppearance::Primary
                                                        on_click=move |_| finish(row.clone())
                                                    >
                                                        {icon("check")}
                                                        " Terminar"
                                                    </Button>
                                                })}
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                    <Show when=move || !loading.get() && visible.with(Vec::is_empty)>
                        <div class="table__empty">"No hay órdenes de producción"</div>
                    </Show>
                </div>
            </div>
        </PageFrame>
    }
}
