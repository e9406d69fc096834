use contracts::shared::format::format_quantity;
use contracts::usecases::u502_inventory_analysis::dto::{
    InventoryAnalysisResponse, ProductAnalysis, Suggestion, SuggestionKind, SuggestionPriority,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::api;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_USECASE;

fn priority_color(priority: SuggestionPriority) -> BadgeColor {
    match priority {
        SuggestionPriority::High => BadgeColor::Danger,
        SuggestionPriority::Medium => BadgeColor::Warning,
        SuggestionPriority::Low => BadgeColor::Informative,
    }
}

fn kind_icon(kind: SuggestionKind) -> &'static str {
    match kind {
        SuggestionKind::Fabricate => "factory",
        SuggestionKind::Reorder => "truck",
        SuggestionKind::Promote => "zap",
        SuggestionKind::BuyMaterial => "shopping-cart",
    }
}

/// "12.5 días", "∞" when there are no sales to measure against.
fn coverage_text(days: Option<f64>) -> String {
    match days {
        Some(d) => format!("{} días", format_quantity((d * 10.0).round() / 10.0)),
        None => "∞".to_string(),
    }
}

#[component]
pub fn InventoryAnalysisView() -> impl IntoView {
    let (data, set_data) = signal(None::<InventoryAnalysisResponse>);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);

    let load = move || {
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::fetch_analysis().await {
                Ok(response) => {
                    log::info!(
                        "Inventory analysis: {} items, {} suggestions",
                        response.analisis_productos.len(),
                        response.sugerencias.len()
                    );
                    set_data.set(Some(response));
                }
                Err(e) => {
                    log::error!("Failed to fetch inventory analysis: {}", e);
                    set_error.set(Some(e));
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| load());

    let suggestions = Signal::derive(move || {
        let mut list = data.get().map(|d| d.sugerencias).unwrap_or_default();
        list.sort_by_key(|s| s.prioridad);
        list
    });
    let analysis = Signal::derive(move || data.get().map(|d| d.analisis_productos).unwrap_or_default());

    view! {
        <PageFrame page_id="u502_inventory_analysis--usecase" category=PAGE_CAT_USECASE>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Informes / IA"</h1>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| load()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("brain")}
                        {move || if loading.get() { " Analizando..." } else { " Analizar" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || error.get().map(|err| view! { <div class="alert alert--error">{err}</div> })}
                <Show when=move || loading.get()>
                    <Spinner />
                </Show>

                <h2 class="page__section-title">"Sugerencias"</h2>
                <Show
                    when=move || !suggestions.with(Vec::is_empty)
                    fallback=|| view! { <div class="table__empty">"Sin sugerencias por ahora"</div> }
                >
                    <div class="suggestions">
                        <For
                            each=move || suggestions.get()
                            key=|s| (s.tipo, s.referencia.clone())
                            children=move |s: Suggestion| {
                                view! {
                                    <Card>
                                        <div class="suggestion">
                                            <div class="suggestion__icon">{icon(kind_icon(s.tipo))}</div>
                                            <div class="suggestion__body">
                                                <Flex gap=FlexGap::Small align=FlexAlign::Center>
                                                    <strong>{s.tipo.label()}</strong>
                                                    <Badge appearance=BadgeAppearance::Tint color=priority_color(s.prioridad)>
                                                        {format!("Prioridad {}", s.prioridad.label())}
                                                    </Badge>
                                                </Flex>
                                                <div class="suggestion__title">
                                                    {format!("{}: {}", s.nombre, format_quantity(s.cantidad))}
                                                </div>
                                                <div class="suggestion__message">{s.mensaje.clone()}</div>
                                            </div>
                                        </div>
                                    </Card>
                                }
                            }
                        />
                    </div>
                </Show>

                <h2 class="page__section-title">"Análisis de rotación (30 días)"</h2>
                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Producto"</TableHeaderCell>
                                <TableHeaderCell>"Tipo"</TableHeaderCell>
                                <TableHeaderCell>"Vendidas"</TableHeaderCell>
                                <TableHeaderCell>"Stock"</TableHeaderCell>
                                <TableHeaderCell>"Venta diaria"</TableHeaderCell>
                                <TableHeaderCell>"Cobertura"</TableHeaderCell>
                                <TableHeaderCell>"Rotación"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || analysis.get()
                                key=|a| a.unique_id.clone()
                                children=move |a: ProductAnalysis| {
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{a.nombre.clone()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>{a.tipo.clone()}</TableCell>
                                            <TableCell>{a.unidades_vendidas}</TableCell>
                                            <TableCell>{a.stock}</TableCell>
                                            <TableCell>{format!("{:.2}", a.venta_diaria)}</TableCell>
                                            <TableCell>{coverage_text(a.dias_cobertura)}</TableCell>
                                            <TableCell>
                                                <span class=a.rotacion.badge_class()>{a.rotacion.label()}</span>
                                            </TableCell>
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coverage_text() {
        assert_eq!(coverage_text(None), "∞");
        assert_eq!(coverage_text(Some(12.46)), "12.5 días");
        assert_eq!(coverage_text(Some(3.0)), "3 días");
    }
}
