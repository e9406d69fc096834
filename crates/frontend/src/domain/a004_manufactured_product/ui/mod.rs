//! Inventario Producto: manufactured products with their variants, plus
//! resale products. Each table has its own create form.

use contracts::domain::a001_supplier::aggregate::{Supplier, SupplierId};
use contracts::domain::a004_manufactured_product::aggregate::{
    ManufacturedProduct, ManufacturedProductDto, ManufacturedProductId,
};
use contracts::domain::a005_resale_product::aggregate::{ResaleProduct, ResaleProductDto};
use contracts::domain::a006_product_variant::aggregate::ProductVariantDto;
use contracts::projections::p900_reports::dto::ReportKind;
use contracts::shared::csv::csv_filename;
use contracts::shared::format::format_money;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_supplier::api::fetch_suppliers;
use crate::domain::a004_manufactured_product::api::{create_product, fetch_products};
use crate::domain::a005_resale_product::api::{create_resale_product, fetch_resale_products};
use crate::domain::a006_product_variant::api::create_variant;
use crate::projections::p900_reports::api::fetch_product_inventory;
use crate::shared::export::export_to_csv;
use crate::shared::form_utils::{non_empty, parse_amount, parse_count, parse_id, NumberField};
use crate::shared::icons::icon;
use crate::shared::list_utils::{contains_ci, filter_list, SearchInput, Searchable};
use crate::shared::notify::{alert, alert_error};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;

impl Searchable for ManufacturedProduct {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_ci(&self.name, filter)
            || self
                .variants
                .iter()
                .any(|v| contains_ci(&v.variant_label(), filter))
    }
}

impl Searchable for ResaleProduct {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_ci(&self.name, filter)
            || self
                .supplier
                .as_ref()
                .is_some_and(|s| contains_ci(&s.name, filter))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OpenForm {
    None,
    Product,
    Variant,
    Resale,
}

#[component]
pub fn ProductInventoryPage() -> impl IntoView {
    let products = RwSignal::new(Vec::<ManufacturedProduct>::new());
    let resale = RwSignal::new(Vec::<ResaleProduct>::new());
    let suppliers = RwSignal::new(Vec::<Supplier>::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let open_form = RwSignal::new(OpenForm::None);
    let search = RwSignal::new(String::new());

    let load = move || {
        spawn_local(async move {
            set_loading.set(true);
            set_error.set(None);
            match fetch_products().await {
                Ok(list) => products.set(list),
                Err(e) => {
                    log::error!("Failed to fetch manufactured products: {}", e);
                    set_error.set(Some(e));
                }
            }
            match fetch_resale_products().await {
                Ok(list) => resale.set(list),
                Err(e) => {
                    log::error!("Failed to fetch resale products: {}", e);
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

    let on_saved = Callback::new(move |()| {
        open_form.set(OpenForm::None);
        load();
    });

    let toggle_form = move |form: OpenForm| {
        open_form.update(|current| {
            *current = if *current == form { OpenForm::None } else { form };
        });
    };

    let export = move |_| {
        spawn_local(async move {
            match fetch_product_inventory().await {
                Ok(rows) => {
                    let filename = csv_filename(ReportKind::ProductInventory.file_prefix(), "");
                    if let Err(e) = export_to_csv(&rows, &filename) {
                        alert(&e);
                    }
                }
                Err(e) => alert_error("Export product inventory", &e),
            }
        });
    };

    let visible_products = Signal::derive(move || filter_list(products.get(), &search.get()));
    let visible_resale = Signal::derive(move || filter_list(resale.get(), &search.get()));

    view! {
        <PageFrame page_id="a004_product_inventory--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Inventario Producto"</h1>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| toggle_form(OpenForm::Product)>
                        {icon("plus")}
                        " Producto"
                    </Button>
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| toggle_form(OpenForm::Variant)>
                        {icon("plus")}
                        " Variante"
                    </Button>
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| toggle_form(OpenForm::Resale)>
                        {icon("plus")}
                        " Reventa"
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
                {move || match open_form.get() {
                    OpenForm::None => view! { <></> }.into_any(),
                    OpenForm::Product => view! { <ProductForm on_saved=on_saved /> }.into_any(),
                    OpenForm::Variant => {
                        view! { <VariantForm products=products.read_only() on_saved=on_saved /> }.into_any()
                    }
                    OpenForm::Resale => {
                        view! { <ResaleForm suppliers=suppliers.read_only() on_saved=on_saved /> }.into_any()
                    }
                }}

                {move || error.get().map(|err| view! { <div class="alert alert--error">{err}</div> })}

                <SearchInput value=search placeholder="Producto, talla, color..." />

                <h2 class="page__section-title">"Productos fabricados"</h2>
                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Producto"</TableHeaderCell>
                                <TableHeaderCell>"Precio venta"</TableHeaderCell>
                                <TableHeaderCell>"Variantes (talla / color: stock)"</TableHeaderCell>
                                <TableHeaderCell>"Stock total"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || visible_products.get()
                                key=|p| (p.id, p.total_stock(), p.variants.len())
                                children=move |p: ManufacturedProduct| {
                                    let total = p.total_stock();
                                    let variants = p
                                        .variants
                                        .iter()
                                        .map(|v| {
                                            let color = if v.stock > 0 {
                                                BadgeColor::Informative
                                            } else {
                                                BadgeColor::Danger
                                            };
                                            let text = format!("{}: {}", v.variant_label(), v.stock);
                                            view! {
                                                <Badge appearance=BadgeAppearance::Tint color=color>
                                                    {text}
                                                </Badge>
                                            }
                                        })
                                        .collect_view();
                                    let price = format_money(p.sale_price);
                                    let name = p.name;
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <strong>{name}</strong>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{price}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <Flex gap=FlexGap::Small style="flex-wrap: wrap;">
                                                    {variants}
                                                </Flex>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{total}</TableCellLayout>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </div>

                <h2 class="page__section-title">"Productos de reventa"</h2>
                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Producto"</TableHeaderCell>
                                <TableHeaderCell>"Proveedor"</TableHeaderCell>
                                <TableHeaderCell>"Costo"</TableHeaderCell>
                                <TableHeaderCell>"Precio venta"</TableHeaderCell>
                                <TableHeaderCell>"Margen"</TableHeaderCell>
                                <TableHeaderCell>"Stock"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || visible_resale.get()
                                key=|r| (r.id, r.stock)
                                children=move |r: ResaleProduct| {
                                    let supplier = r
                                        .supplier
                                        .as_ref()
                                        .map(|s| s.name.clone())
                                        .unwrap_or_else(|| "Sin proveedor".to_string());
                                    let cost = format_money(r.purchase_cost);
                                    let price = format_money(r.sale_price);
                                    let margin = format_money(r.margin());
                                    let ResaleProduct { name, stock, .. } = r;
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <strong>{name}</strong>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{supplier}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{cost}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{price}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{margin}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{stock}</TableCellLayout>
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

#[component]
fn ProductForm(on_saved: Callback<()>) -> impl IntoView {
    let name = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let price = RwSignal::new(String::new());
    let (saving, set_saving) = signal(false);

    let submit = move |_| {
        let dto = parse_amount("Precio de venta", &price.get_untracked()).map(|sale_price| {
            ManufacturedProductDto {
                name: name.get_untracked().trim().to_string(),
                description: non_empty(&description.get_untracked()),
                sale_price,
            }
        });
        let dto = match dto.and_then(|dto| dto.validate().map(|_| dto)) {
            Ok(dto) => dto,
            Err(e) => return alert(&e),
        };
        spawn_local(async move {
            set_saving.set(true);
            match create_product(&dto).await {
                Ok(_) => on_saved.run(()),
                Err(e) => alert_error("Create product", &e),
            }
            set_saving.set(false);
        });
    };

    view! {
        <Card>
            <Flex gap=FlexGap::Small align=FlexAlign::End style="flex-wrap: wrap;">
                <Flex vertical=true gap=FlexGap::Small>
                    <Label>"Nombre"</Label>
                    <Input value=name placeholder="Filipina quirúrgica" />
                </Flex>
                <Flex vertical=true gap=FlexGap::Small>
                    <Label>"Descripción"</Label>
                    <Input value=description />
                </Flex>
                <NumberField label="Precio venta" value=price step="0.01" />
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=submit
                    disabled=Signal::derive(move || saving.get())
                >
                    "Guardar producto"
                </Button>
            </Flex>
        </Card>
    }
}

#[component]
fn VariantForm(
    products: ReadSignal<Vec<ManufacturedProduct>>,
    on_saved: Callback<()>,
) -> impl IntoView {
    let product = RwSignal::new(String::new());
    let size = RwSignal::new(String::new());
    let color = RwSignal::new(String::new());
    let stock = RwSignal::new(String::new());
    let (saving, set_saving) = signal(false);

    let submit = move |_| {
        let dto = parse_count("Stock inicial", &stock.get_untracked()).map(|stock| {
            ProductVariantDto {
                product_id: ManufacturedProductId(parse_id(&product.get_untracked()).unwrap_or(0)),
                size: size.get_untracked().trim().to_string(),
                color: color.get_untracked().trim().to_string(),
                stock,
            }
        });
        let dto = match dto.and_then(|dto| dto.validate().map(|_| dto)) {
            Ok(dto) => dto,
            Err(e) => return alert(&e),
        };
        spawn_local(async move {
            set_saving.set(true);
            match create_variant(&dto).await {
                Ok(_) => on_saved.run(()),
                Err(e) => alert_error("Create variant", &e),
            }
            set_saving.set(false);
        });
    };

    view! {
        <Card>
            <Flex gap=FlexGap::Small align=FlexAlign::End style="flex-wrap: wrap;">
                <Flex vertical=true gap=FlexGap::Small>
                    <Label>"Producto"</Label>
                    <Select value=product>
                        <option value="">"Selecciona..."</option>
                        {move || {
                            products
                                .get()
                                .into_iter()
                                .map(|p| view! { <option value=p.id.to_string()>{p.name}</option> })
                                .collect_view()
                        }}
                    </Select>
                </Flex>
                <Flex vertical=true gap=FlexGap::Small>
                    <Label>"Talla"</Label>
                    <Input value=size placeholder="M" />
                </Flex>
                <Flex vertical=true gap=FlexGap::Small>
                    <Label>"Color"</Label>
                    <Input value=color placeholder="Azul marino" />
                </Flex>
                <NumberField label="Stock inicial" value=stock />
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=submit
                    disabled=Signal::derive(move || saving.get())
                >
                    "Guardar variante"
                </Button>
            </Flex>
        </Card>
    }
}

#[component]
fn ResaleForm(suppliers: ReadSignal<Vec<Supplier>>, on_saved: Callback<()>) -> impl IntoView {
    let name = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let cost = RwSignal::new(String::new());
    let price = RwSignal::new(String::new());
    let stock = RwSignal::new(String::new());
    let supplier = RwSignal::new(String::new());
    let (saving, set_saving) = signal(false);

    let build = move || -> Result<ResaleProductDto, String> {
        let dto = ResaleProductDto {
            name: name.get_untracked().trim().to_string(),
            description: non_empty(&description.get_untracked()),
            purchase_cost: parse_amount("Costo de compra", &cost.get_untracked())?,
            sale_price: parse_amount("Precio de venta", &price.get_untracked())?,
            stock: parse_count("Stock inicial", &stock.get_untracked())?,
            supplier_id: parse_id(&supplier.get_untracked()).map(SupplierId),
        };
        dto.validate()?;
        Ok(dto)
    };

    let submit = move |_| {
        let dto = match build() {
            Ok(dto) => dto,
            Err(e) => return alert(&e),
        };
        spawn_local(async move {
            set_saving.set(true);
            match create_resale_product(&dto).await {
                Ok(_) => on_saved.run(()),
                Err(e) => alert_error("Create resale product", &e),
            }
            set_saving.set(false);
        });
    };

    view! {
        <Card>
            <Flex gap=FlexGap::Small align=FlexAlign::End style="flex-wrap: wrap;">
                <Flex vertical=true gap=FlexGap::Small>
                    <Label>"Nombre"</Label>
                    <Input value=name placeholder="Estetoscopio" />
                </Flex>
                <Flex vertical=true gap=FlexGap::Small>
                    <Label>"Descripción"</Label>
                    <Input value=description />
                </Flex>
                <NumberField label="Costo compra" value=cost step="0.01" />
                <NumberField label="Precio venta" value=price step="0.01" />
                <NumberField label="Stock inicial" value=stock />
                <Flex vertical=true gap=FlexGap::Small>
                    <Label>"Proveedor"</Label>
                    <Select value=supplier>
                        <option value="">"Sin proveedor"</option>
                        {move || {
                            suppliers
                                .get()
                                .into_iter()
                                .map(|s| view! { <option value=s.id.to_string()>{s.name}</option> })
                                .collect_view()
                        }}
                    </Select>
                </Flex>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=submit
                    disabled=Signal::derive(move || saving.get())
                >
                    "Guardar producto"
                </Button>
            </Flex>
        </Card>
    }
}
