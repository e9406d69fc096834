use anyhow::Result;
use contracts::system::users::{CreateUserDto, UpdateUserDto, User};

use super::repository;
use crate::shared::error::ApiError;
use crate::system::auth::password;

pub async fn list_all() -> Result<Vec<User>> {
    repository::list_all().await
}

pub async fn get_by_id(id: i64) -> Result<Option<User>> {
    repository::get_by_id(id).await
}

async fn ensure_email_free(email: &str, except_id: Option<i64>) -> Result<()> {
    if let Some(existing) = repository::get_by_email(email).await? {
        if Some(existing.id) != except_id {
            return Err(ApiError::bad_request("Email ya registrado").into());
        }
    }
    Ok(())
}

pub async fn create(dto: CreateUserDto) -> Result<User> {
    dto.validate().map_err(ApiError::BadRequest)?;
    let email = dto.email.trim().to_lowercase();
    ensure_email_free(&email, None).await?;

    let hash = password::hash_password(&dto.password)?;
    let id = repository::insert(dto.nombre.trim(), &email, dto.rol, &hash).await?;
    tracing::info!("User {} created ({})", email, dto.rol.code());

    Ok(User {
        id,
        nombre: dto.nombre.trim().to_string(),
        email,
        rol: dto.rol,
    })
}

/// Blank or absent password keeps the stored hash.
pub async fn update(id: i64, dto: UpdateUserDto) -> Result<User> {
    dto.validate().map_err(ApiError::BadRequest)?;
    if repository::get_by_id(id).await?.is_none() {
        return Err(ApiError::not_found("Usuario no encontrado").into());
    }
    let email = dto.email.trim().to_lowercase();
    ensure_email_free(&email, Some(id)).await?;

    let user = User {
        id,
        nombre: dto.nombre.trim().to_string(),
        email,
        rol: dto.rol,
    };
    repository::update(&user).await?;

    if let Some(new_password) = dto.new_password() {
        let hash = password::hash_password(new_password)?;
        repository::update_password(id, &hash).await?;
    }
    Ok(user)
}

/// `requester_id` cannot delete their own account.
pub async fn delete(id: i64, requester_id: Option<i64>) -> Result<()> {
    if requester_id == Some(id) {
        return Err(ApiError::bad_request("No puedes eliminar tu propio usuario").into());
    }
    if !repository::delete(id).await? {
        return Err(ApiError::not_found("Usuario no encontrado").into());
    }
    Ok(())
}

/// `Ok(None)` for unknown email or wrong password.
pub async fn verify_credentials(email: &str, password: &str) -> Result<Option<User>> {
    let Some(user) = repository::get_by_email(email).await? else {
        return Ok(None);
    };
    let hash = repository::get_password_hash(user.id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Password hash not found"))?;

    if !password::verify_password(password, &hash)? {
        return Ok(None);
    }
    if let Err(e) = repository::update_last_login(user.id).await {
        tracing::warn!("Failed to update last login for {}: {}", user.id, e);
    }
    Ok(Some(user))
}
