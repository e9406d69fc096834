use contracts::shared::format::format_money;
use contracts::usecases::u501_marketplace_sync::dto::{
    PublishRequest, SyncProduct, UpdateListingRequest,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::api;
use crate::shared::icons::icon;
use crate::shared::list_utils::{contains_ci, filter_list, SearchInput, Searchable};
use crate::shared::notify::{alert, alert_error, confirm};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_USECASE;

impl Searchable for SyncProduct {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_ci(&self.nombre, filter)
            || self.meli_id.as_deref().is_some_and(|id| contains_ci(id, filter))
    }
}

/// Marketplace publishing (simulated on the server side).
#[component]
pub fn MarketplaceSyncView() -> impl IntoView {
    let items = RwSignal::new(Vec::<SyncProduct>::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);
    // unique_id of the row with a request in flight
    let busy = RwSignal::new(None::<String>);
    let search = RwSignal::new(String::new());
    let only_unpublished = RwSignal::new(false);

    let load = move || {
        spawn_local(async move {
            set_loading.set(true);
            set_error.set(None);
            match api::fetch_sync_products().await {
                Ok(list) => items.set(list),
                Err(e) => {
                    log::error!("Failed to fetch sync products: {}", e);
                    set_error.set(Some(e));
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| load());

    let visible = Signal::derive(move || {
        let unpublished = only_unpublished.get();
        filter_list(items.get(), &search.get())
            .into_iter()
            .filter(|i| !unpublished || !i.is_published())
            .collect::<Vec<_>>()
    });

    let publish = move |item: SyncProduct| {
        let Some(request) = PublishRequest::for_item(&item) else {
            return alert(&format!("Identificador inválido: {}", item.unique_id));
        };
        if let Err(e) = request.validate() {
            return alert(&e);
        }
        busy.set(Some(item.unique_id.clone()));
        spawn_local(async move {
            match api::publish(&request).await {
                Ok(response) => {
                    log::info!(
                        "Published {} as {}",
                        item.unique_id,
                        response.meli_id.as_deref().unwrap_or("-")
                    );
                    alert(&response.message);
                    load();
                }
                Err(e) => alert_error("Publish listing", &e),
            }
            busy.set(None);
        });
    };

    let sync_stock = move |item: SyncProduct| {
        let Some(meli_id) = item.meli_id.clone() else {
            return;
        };
        let request = UpdateListingRequest {
            price: Some(item.precio),
            available_quantity: Some(item.stock),
        };
        busy.set(Some(item.unique_id.clone()));
        spawn_local(async move {
            match api::update_listing(&meli_id, &request).await {
                Ok(response) => {
                    alert(&response.message);
                    load();
                }
                Err(e) => alert_error("Update listing", &e),
            }
            busy.set(None);
        });
    };

    let unlink = move |item: SyncProduct| {
        if !confirm(&format!("¿Desvincular {} de Mercado Libre?", item.nombre)) {
            return;
        }
        busy.set(Some(item.unique_id.clone()));
        spawn_local(async move {
            match api::unlink(&item.unique_id).await {
                Ok(()) => load(),
                Err(e) => alert_error("Unlink listing", &e),
            }
            busy.set(None);
        });
    };

    view! {
        <PageFrame page_id="u501_marketplace_sync--usecase" category=PAGE_CAT_USECASE>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Sincronización Mercado Libre"</h1>
                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Success>
                        {move || {
                            let published = items.with(|l| l.iter().filter(|i| i.is_published()).count());
                            format!("{} publicados", published)
                        }}
                    </Badge>
                </div>
                <div class="page__header-right">
                    <label class="page__toggle">
                        <input
                            type="checkbox"
                            prop:checked=move || only_unpublished.get()
                            on:change=move |ev| only_unpublished.set(event_target_checked(&ev))
                        />
                        " Solo sin publicar"
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
                {move || error.get().map(|err| view! { <div class="alert alert--error">{err}</div> })}

                <SearchInput value=search placeholder="Producto o MLM..." />

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Producto"</TableHeaderCell>
                                <TableHeaderCell>"Tipo"</TableHeaderCell>
                                <TableHeaderCell>"Precio"</TableHeaderCell>
                                <TableHeaderCell>"Stock"</TableHeaderCell>
                                <TableHeaderCell>"Publicación"</TableHeaderCell>
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || visible.get()
                                key=|i| (i.unique_id.clone(), i.meli_id.clone(), i.stock)
                                children=move |item: SyncProduct| {
                                    let row_id = item.unique_id.clone();
                                    let row_busy = Signal::derive(move || busy.get().as_deref() == Some(row_id.as_str()));
                                    let listing = match item.meli_id.clone().filter(|_| item.is_published()) {
                                        Some(id) => view! {
                                            <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Success>{id}</Badge>
                                        }.into_any(),
                                        None => view! {
                                            <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Informative>"Sin publicar"</Badge>
                                        }.into_any(),
                                    };
                                    let actions = if item.is_published() {
                                        let for_sync = item.clone();
                                        let for_unlink = item.clone();
                                        view! {
                                            <Flex gap=FlexGap::Small>
                                                <Button
                                                    appearance=ButtonAppearance::Secondary
                                                    on_click=move |_| sync_stock(for_sync.clone())
                                                    disabled=row_busy
                                                >
                                                    {icon("refresh")}
                                                    " Stock"
                                                </Button>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| unlink(for_unlink.clone())
                                                    disabled=row_busy
                                                >
                                                    {icon("unlink")}
                                                    " Desvincular"
                                                </Button>
                                            </Flex>
                                        }.into_any()
                                    } else {
                                        let for_publish = item.clone();
                                        view! {
                                            <Button
                                                appearance=ButtonAppearance::Primary
                                                on_click=move |_| publish(for_publish.clone())
                                                disabled=row_busy
                                            >
                                                {icon("send")}
                                                " Publicar"
                                            </Button>
                                        }.into_any()
                                    };
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{item.nombre.clone()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>{item.tipo.clone()}</TableCell>
                                            <TableCell>{format_money(item.precio)}</TableCell>
                                            <TableCell>{item.stock}</TableCell>
                                            <TableCell>{listing}</TableCell>
                                            <TableCell>{actions}</TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </div>
            </div>
        </PageFrame>
    }
}
