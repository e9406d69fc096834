use contracts::domain::a003_raw_material::aggregate::{RawMaterial, RawMaterialId};
use contracts::domain::a004_manufactured_product::aggregate::{
    ManufacturedProduct, ManufacturedProductId,
};
use contracts::domain::a007_bill_of_materials::aggregate::{
    group_by_product, BomGroup, BomItem, BomItemDto,
};
use contracts::shared::cart::{Cart, CatalogEntry};
use contracts::shared::format::format_quantity;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a003_raw_material::api::fetch_materials;
use crate::domain::a004_manufactured_product::api::fetch_products;
use crate::domain::a007_bill_of_materials::api::{create_bom_item, delete_bom_item, fetch_bom};
use crate::shared::catalog::bom_catalog;
use crate::shared::form_utils::{parse_amount, parse_id, NumberField};
use crate::shared::icons::icon;
use crate::shared::notify::{alert, alert_error, confirm};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;

/// Materials not yet in the recipe of `product`.
fn assignable(
    materials: &[RawMaterial],
    bom: &[BomItem],
    product: ManufacturedProductId,
) -> Vec<CatalogEntry<RawMaterialId>> {
    bom_catalog(materials)
        .into_iter()
        .filter(|entry| {
            !bom
                .iter()
                .any(|b| b.product_id == product && b.material_id == entry.reference)
        })
        .collect()
}

#[component]
pub fn BomList() -> impl IntoView {
    let bom = RwSignal::new(Vec::<BomItem>::new());
    let products = RwSignal::new(Vec::<ManufacturedProduct>::new());
    let materials = RwSignal::new(Vec::<RawMaterial>::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);

    let product = RwSignal::new(String::new());
    let material = RwSignal::new(String::new());
    let quantity = RwSignal::new(String::new());
    let draft = RwSignal::new(Cart::<RawMaterialId>::for_bom());

    let load = move || {
        spawn_local(async move {
            set_loading.set(true);
            set_error.set(None);
            match fetch_bom().await {
                Ok(list) => bom.set(list),
                Err(e) => {
                    log::error!("Failed to fetch BOM: {}", e);
                    set_error.set(Some(e));
                }
            }
            match fetch_products().await {
                Ok(list) => products.set(list),
                Err(e) => log::error!("Failed to fetch products: {}", e),
            }
            match fetch_materials().await {
                Ok(list) => materials.set(list),
                Err(e) => log::error!("Failed to fetch raw materials: {}", e),
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| load());

    // A draft belongs to one product.
    Effect::new(move |_| {
        product.track();
        draft.update(Cart::clear);
        material.set(String::new());
    });

    let selected_product = Signal::derive(move || parse_id(&product.get()).map(ManufacturedProductId));

    let catalog = Signal::derive(move || match selected_product.get() {
        Some(p) => materials.with(|m| bom.with(|b| assignable(m, b, p))),
        None => Vec::new(),
    });

    let groups = Signal::derive(move || bom.with(|items| group_by_product(items)));

    let add_line = move |_| {
        let Some(reference) = parse_id(&material.get_untracked()).map(RawMaterialId) else {
            return alert("Selecciona un material");
        };
        let qty = match parse_amount("Cantidad", &quantity.get_untracked()) {
            Ok(q) => q,
            Err(e) => return alert(&e),
        };
        let result = draft
            .try_update(|cart| cart.add(&reference, qty, 0.0, &catalog.get_untracked()))
            .unwrap_or(Ok(0));
        match result {
            Ok(_) => {
                material.set(String::new());
                quantity.set(String::new());
            }
            Err(e) => alert(&e.to_string()),
        }
    };

    let save = move |_| {
        let Some(product_id) = selected_product.get_untracked() else {
            return alert("Selecciona un producto");
        };
        let lines = draft.with_untracked(|cart| {
            cart.to_payload(|line| {
                (
                    line.temp_key,
                    BomItemDto {
                        product_id,
                        material_id: line.reference,
                        quantity: line.quantity,
                    },
                )
            })
        });
        spawn_local(async move {
            set_saving.set(true);
            for (temp_key, dto) in lines {
                if let Err(e) = dto.validate() {
                    alert(&e);
                    break;
                }
                match create_bom_item(&dto).await {
                    Ok(_) => {
                        draft.update(|cart| {
                            cart.remove(temp_key);
                        });
                    }
                    Err(e) => {
                        alert_error("Create BOM item", &e);
                        break;
                    }
                }
            }
            set_saving.set(false);
            load();
        });
    };

    let remove_item = move |item: BomItem| {
        let message = format!(
            "¿Quitar {} de {}?",
            item.material_name(),
            item.product_name.as_deref().unwrap_or("la receta")
        );
        if !confirm(&message) {
            return;
        }
        spawn_local(async move {
            match delete_bom_item(item.id.0).await {
                Ok(()) => load(),
                Err(e) => alert_error("Delete BOM item", &e),
            }
        });
    };

    view! {
        <PageFrame page_id="a007_bill_of_materials--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Lista de Materiales (BOM)"</h1>
                </div>
                <div class="page__header-right">
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
                            <Label>"Material"</Label>
                            <Select value=material>
                                <option value="">"Selecciona..."</option>
                                {move || {
                                    catalog
                                        .get()
                                        .into_iter()
                                        .map(|e| view! { <option value=e.reference.to_string()>{e.name}</option> })
                                        .collect_view()
                                }}
                            </Select>
                        </Flex>
                        <NumberField label="Cantidad por unidad" value=quantity step="0.01" />
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=add_line
                            disabled=Signal::derive(move || selected_product.get().is_none())
                        >
                            {icon("plus")}
                            " Agregar"
                        </Button>
                    </Flex>

                    <Show when=move || !draft.with(Cart::is_empty)>
                        <ul class="cart">
                            {move || {
                                draft
                                    .get()
                                    .lines()
                                    .iter()
                                    .map(|line| {
                                        let key = line.temp_key;
                                        view! {
                                            <li class="cart__line">
                                                <span>{format!("{}: {}", line.name, format_quantity(line.quantity))}</span>
                                                <button
                                                    class="cart__remove"
                                                    title="Quitar"
                                                    on:click=move |_| draft.update(|cart| {
                                                        cart.remove(key);
                                                    })
                                                >
                                                    {icon("x")}
                                                </button>
                                            </li>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </ul>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=save
                            disabled=Signal::derive(move || saving.get() || !draft.with(Cart::can_submit))
                        >
                            {move || if saving.get() { "Guardando..." } else { "Guardar receta" }}
                        </Button>
                    </Show>
                </Card>

                {move || error.get().map(|err| view! { <div class="alert alert--error">{err}</div> })}

                <For
                    each=move || groups.get()
                    key=|g: &BomGroup| (g.product_name.clone(), g.items.len())
                    children=move |group: BomGroup| {
                        view! {
                            <div class="bom-group">
                                <h2 class="page__section-title">{group.product_name.clone()}</h2>
                                <Table attr:style="width: 100%;">
                                    <TableHeader>
                                        <TableRow>
                                            <TableHeaderCell>"Material"</TableHeaderCell>
                                            <TableHeaderCell>"Cantidad requerida"</TableHeaderCell>
                                            <TableHeaderCell>""</TableHeaderCell>
                                        </TableRow>
                                    </TableHeader>
                                    <TableBody>
                                        {group
                                            .items
                                            .into_iter()
                                            .map(|item| {
                                                let qty = format!(
                                                    "{} {}",
                                                    format_quantity(item.quantity),
                                                    item.material_unit()
                                                );
                                                let name = item.material_name().to_string();
                                                view! {
                                                    <TableRow>
                                                        <TableCell>
                                                            <TableCellLayout>{name}</TableCellLayout>
                                                        </TableCell>
                                                        <TableCell>
                                                            <TableCellLayout>{qty}</TableCellLayout>
                                                        </TableCell>
                                                        <TableCell>
                                                            <Button
                                                                appearance=ButtonAppearance::Subtle
                                                                on_click=move |_| remove_item(item.clone())
                                                            >
                                                                {icon("trash")}
                                                            </Button>
                                                        </TableCell>
                                                    </TableRow>
                                                }
                                            })
                                            .collect_view()}
                                    </TableBody>
                                </Table>
                            </div>
                        }
                    }
                />
                <Show when=move || !loading.get() && groups.with(Vec::is_empty)>
                    <div class="table__empty">"Ningún producto tiene materiales asignados"</div>
                </Show>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a007_bill_of_materials::aggregate::BomItemId;

    fn material(id: i64, name: &str) -> RawMaterial {
        RawMaterial {
            id: RawMaterialId(id),
            name: name.into(),
            description: None,
            cost: 10.0,
            unit: "Metros".into(),
            stock: 5.0,
            supplier_id: None,
            supplier: None,
        }
    }

    #[test]
    fn test_assignable_skips_materials_in_recipe() {
        let materials = vec![material(1, "Tela"), material(2, "Hilo")];
        let bom = vec![BomItem {
            id: BomItemId(9),
            product_id: ManufacturedProductId(3),
            material_id: RawMaterialId(1),
            quantity: 1.5,
            material: None,
            product_name: Some("Filipina".into()),
        }];

        let for_filipina = assignable(&materials, &bom, ManufacturedProductId(3));
        assert_eq!(for_filipina.len(), 1);
        assert_eq!(for_filipina[0].reference, RawMaterialId(2));

        let for_other = assignable(&materials, &bom, ManufacturedProductId(4));
        assert_eq!(for_other.len(), 2);
    }
}
