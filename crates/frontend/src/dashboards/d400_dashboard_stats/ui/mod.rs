use contracts::dashboards::d400_dashboard_stats::dto::DashboardStats;
use contracts::shared::format::format_money;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::dashboards::d400_dashboard_stats::api;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;

#[component]
fn StatCard(
    title: &'static str,
    icon_name: &'static str,
    #[prop(into)] value: Signal<String>,
    hint: &'static str,
) -> impl IntoView {
    view! {
        <Card>
            <div class="stat-card">
                <div class="stat-card__icon">{icon(icon_name)}</div>
                <div class="stat-card__body">
                    <span class="stat-card__title">{title}</span>
                    <span class="stat-card__value">{move || value.get()}</span>
                    <span class="stat-card__hint">{hint}</span>
                </div>
            </div>
        </Card>
    }
}

#[component]
pub fn DashboardStatsPage() -> impl IntoView {
    let (stats, set_stats) = signal(None::<DashboardStats>);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);

    let load = move || {
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::get_stats().await {
                Ok(data) => set_stats.set(Some(data)),
                Err(e) => {
                    log::error!("Failed to load dashboard stats: {}", e);
                    set_error.set(Some(e));
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| load());

    let field = move |f: fn(&DashboardStats) -> String| {
        Signal::derive(move || {
            stats
                .get()
                .as_ref()
                .map(f)
                .unwrap_or_else(|| "-".to_string())
        })
    };

    view! {
        <PageFrame page_id="d400_dashboard_stats--dashboard" category=PAGE_CAT_DASHBOARD>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Dashboard"</h1>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        " Actualizar"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || error.get().map(|err| view! { <div class="alert alert--error">{err}</div> })}
                <Show when=move || loading.get() && stats.get().is_none()>
                    <Spinner />
                </Show>
                <div class="stat-grid">
                    <StatCard
                        title="Ventas netas"
                        icon_name="shopping-cart"
                        value=field(|s| format_money(s.ventas_netas))
                        hint="Mes en curso"
                    />
                    <StatCard
                        title="Órdenes pendientes"
                        icon_name="truck"
                        value=field(|s| s.ordenes_pendientes.to_string())
                        hint="Compras sin recibir y producción abierta"
                    />
                    <StatCard
                        title="Tiempo de proceso"
                        icon_name="factory"
                        value=field(|s| s.tiempo_proceso.clone())
                        hint="Promedio de órdenes terminadas"
                    />
                    <StatCard
                        title="Canales activos"
                        icon_name="zap"
                        value=field(|s| s.canales_ok.clone())
                        hint="Con ventas en los últimos 30 días"
                    />
                </div>
            </div>
        </PageFrame>
    }
}
