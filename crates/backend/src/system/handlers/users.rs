use axum::extract::{Json, Path};
use contracts::system::users::{CreateUserDto, UpdateUserDto, User};
use serde_json::{json, Value};

use crate::shared::error::ApiResult;
use crate::system::auth::extractor::CurrentUser;
use crate::system::users::service;

/// GET /api/usuarios
pub async fn list() -> ApiResult<Json<Vec<User>>> {
    Ok(Json(service::list_all().await?))
}

/// POST /api/usuarios
pub async fn create(Json(dto): Json<CreateUserDto>) -> ApiResult<Json<User>> {
    Ok(Json(service::create(dto).await?))
}

/// PUT /api/usuarios/:id
pub async fn update(Path(id): Path<i64>, Json(dto): Json<UpdateUserDto>) -> ApiResult<Json<User>> {
    Ok(Json(service::update(id, dto).await?))
}

/// DELETE /api/usuarios/:id
pub async fn delete(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<Value>> {
    service::delete(id, claims.user_id()).await?;
    Ok(Json(json!({ "ok": true })))
}
