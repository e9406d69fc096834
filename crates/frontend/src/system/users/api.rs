use contracts::system::users::{CreateUserDto, UpdateUserDto, User};

use crate::shared::api_utils::{delete, get_json, post_json, put_json};

/// Fetch all users (admin only)
pub async fn fetch_users() -> Result<Vec<User>, String> {
    get_json("/api/usuarios").await
}

/// Duplicate emails come back as "Email ya registrado".
pub async fn create_user(dto: &CreateUserDto) -> Result<User, String> {
    post_json("/api/usuarios", dto).await
}

/// A blank password keeps the current one.
pub async fn update_user(id: i64, dto: &UpdateUserDto) -> Result<User, String> {
    put_json(&format!("/api/usuarios/{}", id), dto).await
}

pub async fn delete_user(id: i64) -> Result<(), String> {
    delete(&format!("/api/usuarios/{}", id)).await
}
