use anyhow::Result;
use contracts::enums::UserRole;
use contracts::system::users::CreateUserDto;

use crate::system::users::{repository, service};

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@hadros.mx";
const DEFAULT_ADMIN_PASSWORD: &str = "admin";

/// Creates the default admin account when the user table is empty.
pub async fn ensure_admin_user_exists() -> Result<()> {
    if repository::count_users().await? > 0 {
        return Ok(());
    }

    tracing::info!("No users found. Creating default admin user...");
    let admin = service::create(CreateUserDto {
        nombre: "Administrador".to_string(),
        email: DEFAULT_ADMIN_EMAIL.to_string(),
        password: DEFAULT_ADMIN_PASSWORD.to_string(),
        rol: UserRole::Admin,
    })
    .await?;

    tracing::warn!("═══════════════════════════════════════════════");
    tracing::warn!("  Default admin user created (id {})", admin.id);
    tracing::warn!("  Email: {}", DEFAULT_ADMIN_EMAIL);
    tracing::warn!("  Password: {}", DEFAULT_ADMIN_PASSWORD);
    tracing::warn!("  ⚠️  PLEASE CHANGE THE PASSWORD IMMEDIATELY!");
    tracing::warn!("═══════════════════════════════════════════════");
    Ok(())
}
