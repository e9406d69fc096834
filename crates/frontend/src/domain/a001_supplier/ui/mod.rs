use contracts::domain::a001_supplier::aggregate::{Supplier, SupplierDto};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_supplier::api::{
    create_supplier, delete_supplier, fetch_suppliers, update_supplier,
};
use crate::shared::form_utils::non_empty;
use crate::shared::icons::icon;
use crate::shared::notify::{alert, alert_error, confirm};

/// Suppliers catalog, shown inside the admin page.
#[component]
pub fn SuppliersPanel() -> impl IntoView {
    let suppliers = RwSignal::new(Vec::<Supplier>::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    let name = RwSignal::new(String::new());
    let contact = RwSignal::new(String::new());
    // Row being edited; the form fields above are reused for it.
    let editing = RwSignal::new(None::<i64>);

    let load = move || {
        spawn_local(async move {
            set_loading.set(true);
            match fetch_suppliers().await {
                Ok(list) => {
                    suppliers.set(list);
                    set_error.set(None);
                }
                Err(e) => {
                    log::error!("Failed to fetch suppliers: {}", e);
                    set_error.set(Some(e));
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| load());

    let reset = move || {
        name.set(String::new());
        contact.set(String::new());
        editing.set(None);
    };

    let save = move |_| {
        let dto = SupplierDto {
            name: name.get_untracked().trim().to_string(),
            contact: non_empty(&contact.get_untracked()),
        };
        if let Err(e) = dto.validate() {
            return alert(&e);
        }
        let target = editing.get_untracked();
        spawn_local(async move {
            let result = match target {
                Some(id) => update_supplier(id, &dto).await,
                None => create_supplier(&dto).await,
            };
            match result {
                Ok(_) => {
                    reset();
                    load();
                }
                Err(e) => alert_error("Save supplier", &e),
            }
        });
    };

    let start_edit = move |supplier: Supplier| {
        name.set(supplier.name);
        contact.set(supplier.contact.unwrap_or_default());
        editing.set(Some(supplier.id.0));
    };

    let remove = move |supplier: Supplier| {
        if !confirm(&format!("¿Eliminar el proveedor {}?", supplier.name)) {
            return;
        }
        spawn_local(async move {
            match delete_supplier(supplier.id.0).await {
                Ok(()) => load(),
                // Refused while materials or purchases still reference it
                Err(e) => alert_error("Delete supplier", &e),
            }
        });
    };

    view! {
        <div class="admin-panel">
            <Flex gap=FlexGap::Small align=FlexAlign::End>
                <Flex vertical=true gap=FlexGap::Small>
                    <Label>"Nombre"</Label>
                    <Input value=name placeholder="Textiles del Bajío" />
                </Flex>
                <Flex vertical=true gap=FlexGap::Small>
                    <Label>"Contacto"</Label>
                    <Input value=contact placeholder="Teléfono o email" />
                </Flex>
                <Button appearance=ButtonAppearance::Primary on_click=save>
                    {move || if editing.get().is_some() { "Guardar cambios" } else { "Agregar proveedor" }}
                </Button>
                <Show when=move || editing.get().is_some()>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| reset()>
                        "Cancelar"
                    </Button>
                </Show>
            </Flex>

            {move || error.get().map(|err| view! { <div class="alert alert--error">{err}</div> })}

            <Table attr:style="width: 100%;">
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>"Proveedor"</TableHeaderCell>
                        <TableHeaderCell>"Contacto"</TableHeaderCell>
                        <TableHeaderCell>""</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    <For
                        each=move || suppliers.get()
                        key=|s| (s.id, s.name.clone(), s.contact.clone())
                        children=move |supplier: Supplier| {
                            let for_edit = supplier.clone();
                            let for_delete = supplier.clone();
                            view! {
                                <TableRow>
                                    <TableCell>{supplier.name.clone()}</TableCell>
                                    <TableCell>{supplier.contact.clone().unwrap_or_else(|| "-".to_string())}</TableCell>
                                    <TableCell>
                                        <Button
                                            appearance=ButtonAppearance::Subtle
                                            on_click=move |_| start_edit(for_edit.clone())
                                        >
                                            "Editar"
                                        </Button>
                                        <Button
                                            appearance=ButtonAppearance::Subtle
                                            on_click=move |_| remove(for_delete.clone())
                                        >
                                            {icon("trash")}
                                        </Button>
                                    </TableCell>
                                </TableRow>
                            }
                        }
                    />
                </TableBody>
            </Table>
            <Show when=move || loading.get()>
                <Spinner />
            </Show>
        </div>
    }
}
