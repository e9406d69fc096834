use contracts::domain::a002_sales_channel::aggregate::{SalesChannel, SalesChannelDto};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a002_sales_channel::api::{
    create_channel, delete_channel, fetch_channels, update_channel,
};
use crate::shared::icons::icon;
use crate::shared::notify::{alert, alert_error, confirm};

#[component]
pub fn ChannelsPanel() -> impl IntoView {
    let channels = RwSignal::new(Vec::<SalesChannel>::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let name = RwSignal::new(String::new());
    let editing = RwSignal::new(None::<i64>);

    let load = move || {
        spawn_local(async move {
            match fetch_channels().await {
                Ok(list) => {
                    channels.set(list);
                    set_error.set(None);
                }
                Err(e) => {
                    log::error!("Failed to fetch channels: {}", e);
                    set_error.set(Some(e));
                }
            }
        });
    };

    Effect::new(move |_| load());

    let save = move |_| {
        let dto = SalesChannelDto {
            name: name.get_untracked().trim().to_string(),
        };
        if let Err(e) = dto.validate() {
            return alert(&e);
        }
        let target = editing.get_untracked();
        spawn_local(async move {
            let result = match target {
                Some(id) => update_channel(id, &dto).await,
                None => create_channel(&dto).await,
            };
            match result {
                Ok(_) => {
                    name.set(String::new());
                    editing.set(None);
                    load();
                }
                Err(e) => alert_error("Save channel", &e),
            }
        });
    };

    let remove = move |channel: SalesChannel| {
        if !confirm(&format!("¿Eliminar el canal {}?", channel.name)) {
            return;
        }
        spawn_local(async move {
            match delete_channel(channel.id.0).await {
                Ok(()) => load(),
                Err(e) => alert_error("Delete channel", &e),
            }
        });
    };

    view! {
        <div class="admin-panel">
            <Flex gap=FlexGap::Small align=FlexAlign::End>
                <Flex vertical=true gap=FlexGap::Small>
                    <Label>"Canal"</Label>
                    <Input value=name placeholder="Mercado Libre" />
                </Flex>
                <Button appearance=ButtonAppearance::Primary on_click=save>
                    {move || if editing.get().is_some() { "Guardar cambios" } else { "Agregar canal" }}
                </Button>
                <Show when=move || editing.get().is_some()>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| {
                            name.set(String::new());
                            editing.set(None);
                        }
                    >
                        "Cancelar"
                    </Button>
                </Show>
            </Flex>

            {move || error.get().map(|err| view! { <div class="alert alert--error">{err}</div> })}

            <Table attr:style="width: 100%;">
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>"Canal"</TableHeaderCell>
                        <TableHeaderCell>""</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    <For
                        each=move || channels.get()
                        key=|c| (c.id, c.name.clone())
                        children=move |channel: SalesChannel| {
                            let id = channel.id.0;
                            let current = channel.name.clone();
                            let for_delete = channel.clone();
                            view! {
                                <TableRow>
                                    <TableCell>{channel.name.clone()}</TableCell>
                                    <TableCell>
                                        <Button
                                            appearance=ButtonAppearance::Subtle
                                            on_click=move |_| {
                                                name.set(current.clone());
                                                editing.set(Some(id));
                                            }
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
        </div>
    }
}
