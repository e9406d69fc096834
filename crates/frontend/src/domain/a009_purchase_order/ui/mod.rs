use contracts::domain::a001_supplier::aggregate::{Supplier, SupplierId};
use contracts::domain::a003_raw_material::aggregate::RawMaterial;
use contracts::domain::a005_resale_product::aggregate::ResaleProduct;
use contracts::domain::a009_purchase_order::aggregate::{
    PurchaseOrder, PurchaseOrderDto, PurchaseOrderLineDto,
};
use contracts::enums::PurchaseOrderStatus;
use contracts::shared::cart::Cart;
use contracts::shared::format::{format_money, format_quantity};
use contracts::shared::stock_item::PurchaseItemRef;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_supplier::api::fetch_suppliers;
use crate::domain::a003_raw_material::api::fetch_materials;
use crate::domain::a005_resale_product::api::fetch_resale_products;
use crate::domain::a009_purchase_order::api::{
    create_purchase, fetch_purchases, receive, update_status,
};
use crate::shared::cart_editor::CartEditor;
use crate::shared::catalog::purchase_catalog;
use crate::shared::date_utils::format_datetime;
use crate::shared::form_utils::parse_id;
use crate::shared::icons::icon;
use crate::shared::notify::{alert, alert_error, confirm};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;

fn status_color(status: PurchaseOrderStatus) -> BadgeColor {
    match status {
        PurchaseOrderStatus::Requested => BadgeColor::Warning,
        PurchaseOrderStatus::InTransit => BadgeColor::Informative,
        PurchaseOrderStatus::Received => BadgeColor::Success,
    }
}

fn lines_summary(order: &PurchaseOrder) -> String {
    order
        .lines
        .iter()
        .map(|l| format!("{} × {}", format_quantity(l.quantity), l.name))
        .collect::<Vec<_>>()
        .join(", ")
}

#[component]
pub fn PurchaseOrderList() -> impl IntoView {
    let purchases = RwSignal::new(Vec::<PurchaseOrder>::new());
    let suppliers = RwSignal::new(Vec::<Supplier>::new());
    let materials = RwSignal::new(Vec::<RawMaterial>::new());
    let resale = RwSignal::new(Vec::<ResaleProduct>::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);
    let (show_form, set_show_form) = signal(false);

    let supplier = RwSignal::new(String::new());
    let cart = RwSignal::new(Cart::<PurchaseItemRef>::for_purchase());

    let load = move || {
        spawn_local(async move {
            set_loading.set(true);
            set_error.set(None);
            match fetch_purchases().await {
                Ok(list) => purchases.set(list),
                Err(e) => {
                    log::error!("Failed to fetch purchases: {}", e);
                    set_error.set(Some(e));
                }
            }
            match fetch_suppliers().await {
                Ok(list) => suppliers.set(list),
                Err(e) => log::error!("Failed to fetch suppliers: {}", e),
            }
            match fetch_materials().await {
                Ok(list) => materials.set(list),
                Err(e) => log::error!("Failed to fetch raw materials: {}", e),
            }
            match fetch_resale_products().await {
                Ok(list) => resale.set(list),
                Err(e) => log::error!("Failed to fetch resale products: {}", e),
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| load());

    let catalog = Signal::derive(move || materials.with(|m| resale.with(|r| purchase_catalog(m, r))));

    let submit = move |_| {
        let dto = PurchaseOrderDto {
            supplier_id: SupplierId(parse_id(&supplier.get_untracked()).unwrap_or(0)),
            lines: cart.with_untracked(|c| c.to_payload(|l| PurchaseOrderLineDto::from(l))),
        };
        if let Err(e) = dto.validate() {
            return alert(&e);
        }
        spawn_local(async move {
            set_saving.set(true);
            match create_purchase(&dto).await {
                Ok(order) => {
                    log::info!("Purchase order {} created", order.id);
                    cart.update(Cart::clear);
                    supplier.set(String::new());
                    set_show_form.set(false);
                    load();
                }
                Err(e) => alert_error("Create purchase order", &e),
            }
            set_saving.set(false);
        });
    };

    let mark_in_transit = move |id: i64| {
        spawn_local(async move {
            match update_status(id, PurchaseOrderStatus::InTransit).await {
                Ok(_) => load(),
                Err(e) => alert_error("Update purchase status", &e),
            }
        });
    };

    let receive_order = move |id: i64| {
        if !confirm(&format!("¿Recibir la orden #{}? El stock se sumará al inventario.", id)) {
            return;
        }
        spawn_local(async move {
            match receive(id).await {
                Ok(_) => load(),
                Err(e) => alert_error("Receive purchase order", &e),
            }
        });
    };

    view! {
        <PageFrame page_id="a009_purchase_order--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Compras"</h1>
                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>
                        {move || purchases.with(Vec::len).to_string()}
                    </Badge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| set_show_form.update(|v| *v = !*v)
                    >
                        {icon("plus")}
                        {move || if show_form.get() { " Cerrar" } else { " Nueva compra" }}
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
                            <Label>"Proveedor"</Label>
                            <Select value=supplier>
                                <option value="">"Selecciona..."</option>
                                {move || {
                                    suppliers
                                        .get()
                                        .into_iter()
                                        .map(|s| view! { <option value=s.id.to_string()>{s.name}</option> })
                                        .collect_view()
                                }}
                            </Select>
                        </Flex>
                        <CartEditor
                            cart=cart
                            catalog=catalog
                            key_of=PurchaseItemRef::unique_id
                            parse=PurchaseItemRef::parse
                            price_label="Costo unitario"
                        />
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=submit
                            disabled=Signal::derive(move || saving.get() || !cart.with(Cart::can_submit))
                        >
                            {icon("send")}
                            {move || if saving.get() { " Enviando..." } else { " Registrar compra" }}
                        </Button>
                    </Card>
                </Show>

                {move || error.get().map(|err| view! { <div class="alert alert--error">{err}</div> })}

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"#"</TableHeaderCell>
                                <TableHeaderCell>"Fecha"</TableHeaderCell>
                                <TableHeaderCell>"Proveedor"</TableHeaderCell>
                                <TableHeaderCell>"Artículos"</TableHeaderCell>
                                <TableHeaderCell>"Total"</TableHeaderCell>
                                <TableHeaderCell>"Estado"</TableHeaderCell>
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || purchases.get()
                                key=|p| (p.id, p.status)
                                children=move |order: PurchaseOrder| {
                                    let id = order.id.0;
                                    let status = order.status;
                                    let can_ship = status.can_change_to(PurchaseOrderStatus::InTransit);
                                    let number = order.id.to_string();
                                    let date = format_datetime(&order.date);
                                    let supplier = order.supplier_name().to_string();
                                    let summary = lines_summary(&order);
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
                                                <TableCellLayout>{supplier}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{summary}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{total}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <Badge appearance=BadgeAppearance::Tint color=status_color(status)>
                                                    {status.label()}
                                                </Badge>
                                            </TableCell>
                                            <TableCell>
                                                <Flex gap=FlexGap::Small>
                                                    {can_ship.then(|| view! {
                                                        <Button
                                                            appearance=ButtonAppearance::Secondary
                                                            on_click=move |_| mark_in_transit(id)
                                                        >
                                                            {icon("truck")}
                                                            " En tránsito"
                                                        </Button>
                                                    })}
                                                    {(!status.is_received()).then(|| view! {
                                                        <Button
                                                            appearance=ButtonAppearance::Primary
                                                            on_click=move |_| receive_order(id)
                                                        >
                                                            {icon("check")}
                                                            " Recibir"
                                                        </Button>
                                                    })}
                                                </Flex>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                    <Show when=move || !loading.get() && purchases.with(Vec::is_empty)>
                        <div class="table__empty">"No hay órdenes de compra"</div>
                    </Show>
                </div>
            </div>
        </PageFrame>
    }
}
