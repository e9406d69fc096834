use contracts::enums::UserRole;
use leptos::prelude::*;

use super::context::use_auth;

/// The only tab an `operativo` user may open.
pub const OPERATIVE_TAB: &str = "a008_production_order";

/// Tab access by role: admins open everything, operators only production.
pub fn is_tab_allowed(role: Option<UserRole>, key: &str) -> bool {
    match role {
        Some(UserRole::Admin) => true,
        Some(UserRole::Operativo) => key == OPERATIVE_TAB,
        None => false,
    }
}

/// Renders `children` only for administrators.
#[component]
pub fn RequireAdmin(children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.get().is_admin()
            fallback=|| view! { <LockedNotice /> }
        >
            {children()}
        </Show>
    }
}

#[component]
pub fn LockedNotice() -> impl IntoView {
    view! {
        <div class="locked-notice">
            {crate::shared::icons::icon("lock")}
            <span>"No tienes permiso para ver esta sección."</span>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operativo_only_sees_production() {
        let role = Some(UserRole::Operativo);
        assert!(is_tab_allowed(role, "a008_production_order"));
        assert!(!is_tab_allowed(role, "a010_sales_order"));
        assert!(!is_tab_allowed(role, "sys_admin"));
    }

    #[test]
    fn test_admin_sees_everything() {
        let role = Some(UserRole::Admin);
        assert!(is_tab_allowed(role, "sys_admin"));
        assert!(is_tab_allowed(role, "p900_reports"));
        assert!(!is_tab_allowed(None, "a008_production_order"));
    }
}
