//! Session endpoints under `/api/system/auth`. These run before a token is
//! available (or with an explicit one), so they bypass `api_utils`.
use contracts::system::auth::{
    LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, UserInfo,
};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::shared::api_utils::{api_base, error_detail};

fn auth_url(action: &str) -> String {
    format!("{}/api/system/auth/{}", api_base(), action)
}

async fn checked(response: Response) -> Result<Response, String> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(error_detail(status, &body))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    checked(response)
        .await?
        .json::<T>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

async fn post<B: Serialize>(action: &str, body: &B) -> Result<Response, String> {
    Request::post(&auth_url(action))
        .json(body)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("No se pudo conectar con el servidor: {}", e))
}

pub async fn login(email: String, password: String) -> Result<LoginResponse, String> {
    decode(post("login", &LoginRequest { email, password }).await?).await
}

/// New access token for a stored refresh token.
pub async fn refresh_token(refresh_token: String) -> Result<RefreshResponse, String> {
    decode(post("refresh", &RefreshRequest { refresh_token }).await?).await
}

/// Revokes the refresh token server-side.
pub async fn logout(refresh_token: String) -> Result<(), String> {
    checked(post("logout", &RefreshRequest { refresh_token }).await?)
        .await
        .map(|_| ())
}

pub async fn get_current_user(access_token: &str) -> Result<UserInfo, String> {
    let response = Request::get(&auth_url("me"))
        .header("Authorization", &format!("Bearer {}", access_token))
        .send()
        .await
        .map_err(|e| format!("No se pudo conectar con el servidor: {}", e))?;
    decode(response).await
}
