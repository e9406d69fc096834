use std::cmp::Ordering;

use contracts::domain::a001_supplier::aggregate::{Supplier, SupplierId};
use contracts::domain::a003_raw_material::aggregate::{RawMaterial, RawMaterialDto};
use contracts::shared::csv::csv_filename;
use contracts::shared::format::{format_money, format_quantity};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_supplier::api::fetch_suppliers;
use crate::domain::a003_raw_material::api::{create_material, fetch_materials};
use crate::shared::export::export_to_csv;
use crate::shared::form_utils::{non_empty, parse_amount, parse_id, NumberField};
use crate::shared::icons::icon;
use crate::shared::list_utils::{
    compare_f64, contains_ci, filter_list, get_sort_indicator, sort_list, SearchInput,
    Searchable, Sortable,
};
use crate::shared::notify::{alert, alert_error};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;

const UNITS: &[&str] = &["Metros", "Piezas", "Kilogramos", "Rollos", "Conos"];

impl Searchable for RawMaterial {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_ci(&self.name, filter)
            || contains_ci(self.supplier_name(), filter)
            || self
                .description
                .as_deref()
                .is_some_and(|d| contains_ci(d, filter))
    }
}

impl Sortable for RawMaterial {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "stock" => compare_f64(self.stock, other.stock),
            "cost" => compare_f64(self.cost, other.cost),
            "value" => compare_f64(self.inventory_value(), other.inventory_value()),
            "supplier" => self.supplier_name().cmp(other.supplier_name()),
            _ => self.name.to_lowercase().cmp(&other.name.to_lowercase()),
        }
    }
}

/// Form fields as typed; parsed into a DTO on submit.
#[derive(Clone, Copy)]
struct MaterialForm {
    name: RwSignal<String>,
    description: RwSignal<String>,
    cost: RwSignal<String>,
    unit: RwSignal<String>,
    stock: RwSignal<String>,
    supplier: RwSignal<String>,
}

impl MaterialForm {
    fn new() -> Self {
        Self {
            name: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            cost: RwSignal::new(String::new()),
            unit: RwSignal::new(RawMaterialDto::default().unit),
            stock: RwSignal::new(String::new()),
            supplier: RwSignal::new(String::new()),
        }
    }

    fn to_dto(self) -> Result<RawMaterialDto, String> {
        let dto = RawMaterialDto {
            name: self.name.get_untracked().trim().to_string(),
            description: non_empty(&self.description.get_untracked()),
            cost: parse_amount("Costo", &self.cost.get_untracked())?,
            unit: self.unit.get_untracked(),
            stock: parse_amount("Stock inicial", &self.stock.get_untracked())?,
            supplier_id: parse_id(&self.supplier.get_untracked()).map(SupplierId),
        };
        dto.validate()?;
        Ok(dto)
    }

    fn reset(self) {
        self.name.set(String::new());
        self.description.set(String::new());
        self.cost.set(String::new());
        self.unit.set(RawMaterialDto::default().unit);
        self.stock.set(String::new());
        self.supplier.set(String::new());
    }
}

#[component]
pub fn RawMaterialList() -> impl IntoView {
    let materials = RwSignal::new(Vec::<RawMaterial>::new());
    let suppliers = RwSignal::new(Vec::<Supplier>::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let (show_form, set_show_form) = signal(false);
    let (saving, set_saving) = signal(false);
    let search = RwSignal::new(String::new());
    let sort_field = RwSignal::new("name".to_string());
    let sort_ascending = RwSignal::new(true);
    let form = MaterialForm::new();

    let load = move || {
        spawn_local(async move {
            set_loading.set(true);
            set_error.set(None);
            match fetch_materials().await {
                Ok(list) => materials.set(list),
                Err(e) => {
                    log::error!("Failed to fetch raw materials: {}", e);
                    set_error.set(Some(e));
                }
            }
            match fetch_suppliers().await {
                Ok(list) => suppliers.set(list),
                Err(e) => log::error!("Failed to fetch suppliers: {}", e),
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| load());

    let visible = Signal::derive(move || {
        let mut rows = filter_list(materials.get(), &search.get());
        sort_list(&mut rows, &sort_field.get(), sort_ascending.get());
        rows
    });

    let total_value = Signal::derive(move || {
        materials.with(|list| list.iter().map(RawMaterial::inventory_value).sum::<f64>())
    });

    let toggle_sort = move |field: &'static str| {
        if sort_field.get_untracked() == field {
            sort_ascending.update(|asc| *asc = !*asc);
        } else {
            sort_field.set(field.to_string());
            sort_ascending.set(true);
        }
    };
    let indicator = move |field: &'static str| {
        move || get_sort_indicator(&sort_field.get(), field, sort_ascending.get())
    };

    let submit = move |_| {
        let dto = match form.to_dto() {
            Ok(dto) => dto,
            Err(e) => {
                alert(&e);
                return;
            }
        };
        spawn_local(async move {
            set_saving.set(true);
            match create_material(&dto).await {
                Ok(created) => {
                    log::info!("Raw material {} created", created.id);
                    form.reset();
                    set_show_form.set(false);
                    load();
                }
                Err(e) => alert_error("Create raw material", &e),
            }
            set_saving.set(false);
        });
    };

    let export = move |_| {
        let filename = csv_filename("inventario_materia_prima", "");
        if let Err(e) = export_to_csv(&visible.get_untracked(), &filename) {
            alert(&e);
        }
    };

    view! {
        <PageFrame page_id="a003_raw_material--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Inventario Materia Prima"</h1>
                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>
                        {move || materials.with(Vec::len).to_string()}
                    </Badge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| set_show_form.update(|v| *v = !*v)
                    >
                        {icon("plus")}
                        {move || if show_form.get() { " Cerrar" } else { " Nuevo material" }}
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=export>
                        {icon("download")}
                        " CSV"
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
                        <Flex gap=FlexGap::Small align=FlexAlign::End style="flex-wrap: wrap;">
                            <Flex vertical=true gap=FlexGap::Small>
                                <Label>"Nombre"</Label>
                                <Input value=form.name placeholder="Tela Polar Azul" />
                            </Flex>
                            <Flex vertical=true gap=FlexGap::Small>
                                <Label>"Descripción"</Label>
                                <Input value=form.description />
                            </Flex>
                            <NumberField label="Costo unitario" value=form.cost step="0.01" />
                            <Flex vertical=true gap=FlexGap::Small>
                                <Label>"Unidad"</Label>
                                <Select value=form.unit>
                                    {UNITS
                                        .iter()
                                        .map(|u| view! { <option value=*u>{*u}</option> })
                                        .collect_view()}
                                </Select>
                            </Flex>
                            <NumberField label="Stock inicial" value=form.stock step="0.01" />
                            <Flex vertical=true gap=FlexGap::Small>
                                <Label>"Proveedor"</Label>
                                <Select value=form.supplier>
                                    <option value="">"Sin proveedor"</option>
                                    {move || {
                                        suppliers
                                            .get()
                                            .into_iter()
                                            .map(|s| {
                                                view! { <option value=s.id.to_string()>{s.name}</option> }
                                            })
                                            .collect_view()
                                    }}
                                </Select>
                            </Flex>
                            <Button
                                appearance=ButtonAppearance::Primary
                                on_click=submit
                                disabled=Signal::derive(move || saving.get())
                            >
                                "Guardar"
                            </Button>
                        </Flex>
                    </Card>
                </Show>

                {move || error.get().map(|err| view! { <div class="alert alert--error">{err}</div> })}

                <Flex gap=FlexGap::Medium align=FlexAlign::Center>
                    <SearchInput value=search placeholder="Material, proveedor..." />
                    <span class="page__summary">
                        "Valor del inventario: "
                        {move || format_money(total_value.get())}
                    </span>
                </Flex>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>
                                    <div class="table__sortable-header" on:click=move |_| toggle_sort("name")>
                                        "Material" {indicator("name")}
                                    </div>
                                </TableHeaderCell>
                                <TableHeaderCell>
                                    <div class="table__sortable-header" on:click=move |_| toggle_sort("supplier")>
                                        "Proveedor" {indicator("supplier")}
                                    </div>
                                </TableHeaderCell>
                                <TableHeaderCell>
                                    <div class="table__sortable-header" on:click=move |_| toggle_sort("stock")>
                                        "Stock" {indicator("stock")}
                                    </div>
                                </TableHeaderCell>
                                <TableHeaderCell>
                                    <div class="table__sortable-header" on:click=move |_| toggle_sort("cost")>
                                        "Costo" {indicator("cost")}
                                    </div>
                                </TableHeaderCell>
                                <TableHeaderCell>
                                    <div class="table__sortable-header" on:click=move |_| toggle_sort("value")>
                                        "Valor" {indicator("value")}
                                    </div>
                                </TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || visible.get()
                                key=|m| (m.id, m.stock.to_bits(), m.cost.to_bits())
                                children=move |m: RawMaterial| {
                                    let value = format_money(m.inventory_value());
                                    let supplier = m.supplier_name().to_string();
                                    let stock = format!("{} {}", format_quantity(m.stock), m.unit);
                                    let cost = format_money(m.cost);
                                    let RawMaterial { name, description, .. } = m;
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <strong>{name}</strong>
                                                    {description.map(|d| view! {
                                                        <div class="table__secondary">{d}</div>
                                                    })}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{supplier}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{stock}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{cost}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{value}</TableCellLayout>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                    <Show when=move || !loading.get() && visible.with(Vec::is_empty)>
                        <div class="table__empty">"No hay materiales registrados"</div>
                    </Show>
                </div>
            </div>
        </PageFrame>
    }
}
