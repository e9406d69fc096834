use contracts::enums::UserRole;
use contracts::system::users::{CreateUserDto, UpdateUserDto, User};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::form_utils::non_empty;
use crate::shared::icons::icon;
use crate::shared::notify::{alert, alert_error, confirm};
use crate::system::auth::context::use_auth;
use crate::system::users::api;

#[derive(Clone, Copy)]
struct UserForm {
    nombre: RwSignal<String>,
    email: RwSignal<String>,
    password: RwSignal<String>,
    rol: RwSignal<String>,
    /// `Some(id)` while editing an existing user
    editing: RwSignal<Option<i64>>,
}

impl UserForm {
    fn new() -> Self {
        Self {
            nombre: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            password: RwSignal::new(String::new()),
            rol: RwSignal::new(UserRole::Operativo.code().to_string()),
            editing: RwSignal::new(None),
        }
    }

    fn load(self, user: &User) {
        self.nombre.set(user.nombre.clone());
        self.email.set(user.email.clone());
        self.password.set(String::new());
        self.rol.set(user.rol.code().to_string());
        self.editing.set(Some(user.id));
    }

    fn reset(self) {
        self.nombre.set(String::new());
        self.email.set(String::new());
        self.password.set(String::new());
        self.rol.set(UserRole::Operativo.code().to_string());
        self.editing.set(None);
    }

    fn role(self) -> UserRole {
        UserRole::from_code(&self.rol.get_untracked()).unwrap_or(UserRole::Operativo)
    }
}

fn role_color(role: UserRole) -> BadgeColor {
    if role.is_admin() {
        BadgeColor::Brand
    } else {
        BadgeColor::Informative
    }
}

/// User accounts, shown inside the admin page.
#[component]
pub fn UsersPanel() -> impl IntoView {
    let (auth_state, _) = use_auth();
    let users = RwSignal::new(Vec::<User>::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);
    let form = UserForm::new();

    let current_user_id =
        Signal::derive(move || auth_state.get().user_info.map(|u| u.id).unwrap_or_default());

    let load = move || {
        spawn_local(async move {
            match api::fetch_users().await {
                Ok(list) => {
                    users.set(list);
                    set_error.set(None);
                }
                Err(e) => {
                    log::error!("Failed to fetch users: {}", e);
                    set_error.set(Some(e));
                }
            }
        });
    };

    Effect::new(move |_| load());

    let save = move |_| {
        let nombre = form.nombre.get_untracked().trim().to_string();
        let email = form.email.get_untracked().trim().to_string();
        let password = form.password.get_untracked();
        let rol = form.role();

        match form.editing.get_untracked() {
            Some(id) => {
                let dto = UpdateUserDto {
                    nombre,
                    email,
                    password: non_empty(&password),
                    rol,
                };
                if let Err(e) = dto.validate() {
                    return alert(&e);
                }
                spawn_local(async move {
                    set_saving.set(true);
                    match api::update_user(id, &dto).await {
                        Ok(_) => {
                            form.reset();
                            load();
                        }
                        Err(e) => alert_error("Update user", &e),
                    }
                    set_saving.set(false);
                });
            }
            None => {
                let dto = CreateUserDto {
                    nombre,
                    email,
                    password,
                    rol,
                };
                if let Err(e) = dto.validate() {
                    return alert(&e);
                }
                spawn_local(async move {
                    set_saving.set(true);
                    match api::create_user(&dto).await {
                        Ok(user) => {
                            log::info!("User {} created", user.email);
                            form.reset();
                            load();
                        }
                        Err(e) => alert_error("Create user", &e),
                    }
                    set_saving.set(false);
                });
            }
        }
    };

    let remove = move |user: User| {
        if !confirm(&format!("¿Eliminar al usuario {} ({})?", user.nombre, user.email)) {
            return;
        }
        spawn_local(async move {
            match api::delete_user(user.id).await {
                Ok(()) => load(),
                Err(e) => alert_error("Delete user", &e),
            }
        });
    };

    view! {
        <div class="admin-panel">
            <Flex gap=FlexGap::Small align=FlexAlign::End style="flex-wrap: wrap;">
                <Flex vertical=true gap=FlexGap::Small>
                    <Label>"Nombre"</Label>
                    <Input value=form.nombre />
                </Flex>
                <Flex vertical=true gap=FlexGap::Small>
                    <Label>"Email"</Label>
                    <Input value=form.email placeholder="usuario@hadros.mx" />
                </Flex>
                <Flex vertical=true gap=FlexGap::Small>
                    <Label>
                        {move || if form.editing.get().is_some() {
                            "Contraseña (vacía = sin cambio)"
                        } else {
                            "Contraseña"
                        }}
                    </Label>
                    <Input value=form.password input_type=InputType::Password />
                </Flex>
                <Flex vertical=true gap=FlexGap::Small>
                    <Label>"Rol"</Label>
                    <Select value=form.rol>
                        {UserRole::all()
                            .into_iter()
                            .map(|r| view! { <option value=r.code()>{r.display_name()}</option> })
                            .collect_view()}
                    </Select>
                </Flex>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=save
                    disabled=Signal::derive(move || saving.get())
                >
                    {move || if form.editing.get().is_some() { "Guardar cambios" } else { "Crear usuario" }}
                </Button>
                <Show when=move || form.editing.get().is_some()>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| form.reset()>
                        "Cancelar"
                    </Button>
                </Show>
            </Flex>

            {move || error.get().map(|err| view! { <div class="alert alert--error">{err}</div> })}

            <Table attr:style="width: 100%;">
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>"Nombre"</TableHeaderCell>
                        <TableHeaderCell>"Email"</TableHeaderCell>
                        <TableHeaderCell>"Rol"</TableHeaderCell>
                        <TableHeaderCell>""</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    <For
                        each=move || users.get()
                        key=|u| (u.id, u.email.clone(), u.nombre.clone(), u.rol)
                        children=move |user: User| {
                            let for_edit = user.clone();
                            let for_delete = user.clone();
                            let id = user.id;
                            view! {
                                <TableRow>
                                    <TableCell>
                                        <TableCellLayout>
                                            {icon("user")}
                                            {user.nombre.clone()}
                                        </TableCellLayout>
                                    </TableCell>
                                    <TableCell>{user.email.clone()}</TableCell>
                                    <TableCell>
                                        <Badge appearance=BadgeAppearance::Tint color=role_color(user.rol)>
                                            {user.rol.display_name()}
                                        </Badge>
                                    </TableCell>
                                    <TableCell>
                                        <Button
                                            appearance=ButtonAppearance::Subtle
                                            on_click=move |_| form.load(&for_edit)
                                        >
                                            "Editar"
                                        </Button>
                                        // Own account cannot be deleted
                                        <Show when=move || current_user_id.get() != id>
                                            {
                                                let for_delete = for_delete.clone();
                                                view! {
                                                    <Button
                                                        appearance=ButtonAppearance::Subtle
                                                        on_click=move |_| remove(for_delete.clone())
                                                    >
                                                        {icon("trash")}
                                                    </Button>
                                                }
                                            }
                                        </Show>
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
