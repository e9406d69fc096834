use axum::{extract::Json, http::StatusCode};
use contracts::system::auth::{
    LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, UserInfo,
};
use contracts::system::users::User;

use crate::shared::error::{ApiError, ApiResult};
use crate::system::auth::extractor::CurrentUser;
use crate::system::{auth::jwt, users::service as user_service};

fn user_info(user: User) -> UserInfo {
    UserInfo {
        id: user.id,
        nombre: user.nombre,
        email: user.email,
        rol: user.rol,
    }
}

/// POST /api/system/auth/login
pub async fn login(Json(request): Json<LoginRequest>) -> ApiResult<Json<LoginResponse>> {
    let user = user_service::verify_credentials(&request.email, &request.password)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Email o contraseña incorrectos".into()))?;

    let access_token = jwt::generate_access_token(user.id, &user.email, user.rol).await?;
    let refresh_token = jwt::generate_refresh_token();
    store_refresh_token(user.id, &refresh_token).await?;

    tracing::info!("User {} logged in", user.email);
    Ok(Json(LoginResponse {
        access_token,
        refresh_token,
        token_type: "bearer".to_string(),
        user: user_info(user),
    }))
}

/// POST /api/system/auth/refresh
pub async fn refresh(Json(request): Json<RefreshRequest>) -> ApiResult<Json<RefreshResponse>> {
    let invalid = || ApiError::Unauthorized("Sesión expirada".into());

    let user_id = validate_refresh_token(&request.refresh_token)
        .await?
        .ok_or_else(invalid)?;
    let user = user_service::get_by_id(user_id).await?.ok_or_else(invalid)?;

    let access_token = jwt::generate_access_token(user.id, &user.email, user.rol).await?;
    Ok(Json(RefreshResponse { access_token }))
}

/// POST /api/system/auth/logout
pub async fn logout(Json(request): Json<RefreshRequest>) -> ApiResult<StatusCode> {
    revoke_refresh_token(&request.refresh_token).await?;
    Ok(StatusCode::OK)
}

/// GET /api/system/auth/me
pub async fn current_user(CurrentUser(claims): CurrentUser) -> ApiResult<Json<UserInfo>> {
    let id = claims
        .user_id()
        .ok_or_else(|| ApiError::Unauthorized("Token inválido".into()))?;
    let user = user_service::get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Usuario no encontrado"))?;
    Ok(Json(user_info(user)))
}

// Refresh tokens are stored as sha256 hashes.

async fn store_refresh_token(user_id: i64, token: &str) -> anyhow::Result<()> {
    use crate::shared::data::db::get_connection;
    use chrono::Utc;
    use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

    get_connection()
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "INSERT INTO sys_refresh_tokens (id, user_id, token_hash, expires_at, created_at)
             VALUES (?, ?, ?, ?, ?)",
            [
                uuid::Uuid::new_v4().to_string().into(),
                user_id.into(),
                hash_token(token).into(),
                jwt::calculate_refresh_token_expiration().into(),
                Utc::now().to_rfc3339().into(),
            ],
        ))
        .await?;
    Ok(())
}

async fn validate_refresh_token(token: &str) -> anyhow::Result<Option<i64>> {
    use crate::shared::data::db::get_connection;
    use chrono::Utc;
    use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

    let row = get_connection()
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT user_id FROM sys_refresh_tokens
             WHERE token_hash = ? AND expires_at > ? AND revoked_at IS NULL",
            [hash_token(token).into(), Utc::now().to_rfc3339().into()],
        ))
        .await?;

    match row {
        Some(row) => Ok(Some(row.try_get("", "user_id")?)),
        None => Ok(None),
    }
}

async fn revoke_refresh_token(token: &str) -> anyhow::Result<()> {
    use crate::shared::data::db::get_connection;
    use chrono::Utc;
    use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

    get_connection()
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "UPDATE sys_refresh_tokens SET revoked_at = ? WHERE token_hash = ?",
            [Utc::now().to_rfc3339().into(), hash_token(token).into()],
        ))
        .await?;
    Ok(())
}

fn hash_token(token: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_token_is_stable_hex() {
        let a = hash_token("abc");
        assert_eq!(a, hash_token("abc"));
        assert_eq!(a.len(), 64);
        assert_ne!(a, hash_token("abd"));
    }
}
