use chrono::NaiveDate;
use contracts::projections::p900_reports::dto::ReportKind;
use contracts::shared::csv::csv_filename;
use contracts::shared::date_range::{DatePreset, DateRange};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::projections::p900_reports::api;
use crate::shared::date_utils::{parse_input_date, today_local};
use crate::shared::export::export_to_csv;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_USECASE;

/// Period of a sales report; inventory reports are snapshots and take none.
fn resolve_period(
    kind: ReportKind,
    preset: DatePreset,
    today: NaiveDate,
    custom_start: &str,
    custom_end: &str,
) -> Result<Option<DateRange>, String> {
    if !kind.uses_period() {
        return Ok(None);
    }
    let custom = match (parse_input_date(custom_start), parse_input_date(custom_end)) {
        (Some(start), Some(end)) => Some((start, end)),
        _ => None,
    };
    preset.resolve(today, custom).map(Some)
}

fn report_filename(kind: ReportKind, range: Option<&DateRange>) -> String {
    let suffix = range.map(DateRange::file_suffix).unwrap_or_default();
    csv_filename(kind.file_prefix(), &suffix)
}

/// Fetches the rows and starts the download. Returns the row count.
async fn download(kind: ReportKind, range: Option<DateRange>) -> Result<usize, String> {
    let filename = report_filename(kind, range.as_ref());
    match (kind, range) {
        (ReportKind::Sales, Some(range)) => {
            let rows = api::fetch_sales_report(&range).await?;
            export_to_csv(&rows, &filename).map(|_| rows.len())
        }
        (ReportKind::Sales, None) => Err("Selecciona el periodo del reporte".to_string()),
        (ReportKind::ProductInventory, _) => {
            let rows = api::fetch_product_inventory().await?;
            export_to_csv(&rows, &filename).map(|_| rows.len())
        }
        (ReportKind::MaterialInventory, _) => {
            let rows = api::fetch_material_inventory().await?;
            export_to_csv(&rows, &filename).map(|_| rows.len())
        }
    }
}

#[component]
pub fn ReportsPage() -> impl IntoView {
    let kind_code = RwSignal::new(ReportKind::default().code().to_string());
    let preset_code = RwSignal::new(DatePreset::Month.code().to_string());
    let custom_start = RwSignal::new(String::new());
    let custom_end = RwSignal::new(String::new());
    let (busy, set_busy) = signal(false);
    let (message, set_message) = signal(None::<Result<String, String>>);

    let kind = Signal::derive(move || ReportKind::from_code(&kind_code.get()).unwrap_or_default());
    let preset = Signal::derive(move || DatePreset::from_code(&preset_code.get()).unwrap_or_default());

    let generate = move |_| {
        let kind = kind.get_untracked();
        let range = resolve_period(
            kind,
            preset.get_untracked(),
            today_local(),
            &custom_start.get_untracked(),
            &custom_end.get_untracked(),
        );
        let range = match range {
            Ok(range) => range,
            Err(e) => {
                set_message.set(Some(Err(e)));
                return;
            }
        };
        set_busy.set(true);
        set_message.set(None);
        spawn_local(async move {
            match download(kind, range).await {
                Ok(count) => {
                    log::info!("Report {} exported, {} rows", kind.code(), count);
                    let text = format!("{}: {} filas exportadas", kind.label(), count);
                    set_message.set(Some(Ok(text.clone())));
                    set_busy.set(false);

                    // success notice fades out unless replaced meanwhile
                    gloo_timers::future::TimeoutFuture::new(5000).await;
                    if message.get_untracked() == Some(Ok(text)) {
                        set_message.set(None);
                    }
                }
                Err(e) => {
                    log::warn!("Report {} failed: {}", kind.code(), e);
                    set_message.set(Some(Err(e)));
                    set_busy.set(false);
                }
            }
        });
    };

    view! {
        <PageFrame page_id="p900_reports--usecase" category=PAGE_CAT_USECASE>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Reportes"</h1>
                </div>
            </div>

            <div class="page__content">
                <Card>
                    <Flex gap=FlexGap::Small align=FlexAlign::End style="flex-wrap: wrap;">
                        <Flex vertical=true gap=FlexGap::Small>
                            <Label>"Reporte"</Label>
                            <Select value=kind_code>
                                {ReportKind::all()
                                    .into_iter()
                                    .map(|k| view! { <option value=k.code()>{k.label()}</option> })
                                    .collect_view()}
                            </Select>
                        </Flex>
                        <Show when=move || kind.get().uses_period()>
                            <Flex vertical=true gap=FlexGap::Small>
                                <Label>"Periodo"</Label>
                                <Select value=preset_code>
                                    {DatePreset::all()
                                        .into_iter()
                                        .map(|p| view! { <option value=p.code()>{p.label()}</option> })
                                        .collect_view()}
                                </Select>
                            </Flex>
                            <Show when=move || preset.get() == DatePreset::Custom>
                                <Flex vertical=true gap=FlexGap::Small>
                                    <Label>"Desde"</Label>
                                    <input
                                        type="date"
                                        class="form__input"
                                        prop:value=move || custom_start.get()
                                        on:input=move |ev| custom_start.set(event_target_value(&ev))
                                    />
                                </Flex>
                                <Flex vertical=true gap=FlexGap::Small>
                                    <Label>"Hasta"</Label>
                                    <input
                                        type="date"
                                        class="form__input"
                                        prop:value=move || custom_end.get()
                                        on:input=move |ev| custom_end.set(event_target_value(&ev))
                                    />
                                </Flex>
                            </Show>
                        </Show>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=generate
                            disabled=Signal::derive(move || busy.get())
                        >
                            {icon("download")}
                            {move || if busy.get() { " Generando..." } else { " Descargar CSV" }}
                        </Button>
                    </Flex>
                </Card>

                {move || message.get().map(|m| match m {
                    Ok(text) => view! { <div class="alert alert--success">{text}</div> }.into_any(),
                    Err(text) => view! { <div class="alert alert--error">{text}</div> }.into_any(),
                })}
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_inventory_reports_take_no_period() {
        let range = resolve_period(
            ReportKind::MaterialInventory,
            DatePreset::Custom,
            d(2024, 5, 16),
            "",
            "",
        );
        assert_eq!(range, Ok(None));
        assert_eq!(
            report_filename(ReportKind::MaterialInventory, None),
            "inventario_materia_prima.csv"
        );
    }

    #[test]
    fn test_sales_report_period() {
        let range = resolve_period(
            ReportKind::Sales,
            DatePreset::Custom,
            d(2024, 5, 16),
            "2024-05-01",
            "2024-05-10",
        )
        .unwrap();
        assert_eq!(
            report_filename(ReportKind::Sales, range.as_ref()),
            "reporte_ventas_2024-05-01_2024-05-10.csv"
        );

        let incomplete = resolve_period(
            ReportKind::Sales,
            DatePreset::Custom,
            d(2024, 5, 16),
            "2024-05-01",
            "",
        );
        assert!(incomplete.is_err());

        let inverted = resolve_period(
            ReportKind::Sales,
            DatePreset::Custom,
            d(2024, 5, 16),
            "2024-05-10",
            "2024-05-01",
        );
        assert!(inverted.is_err());
    }
}
