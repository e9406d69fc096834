//! API utilities for frontend-backend communication
//!
//! Every business endpoint sits behind the bearer token, so the JSON helpers
//! below attach it from local storage. Failed responses are turned into the
//! backend `detail` text so pages can show it as is.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::system::auth::storage;

/// Backend port (see `[server] port` in the backend config).
pub const API_PORT: u16 = 8000;

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location,
/// using port 8000 for the backend server.
///
/// # Returns
/// - API base URL like "http://localhost:8000"
/// - Empty string if window is not available
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, API_PORT)
}

/// Build a full API URL from a path
///
/// # Example
/// ```rust,no_run
/// # use frontend::shared::api_utils::api_url;
/// let url = api_url("/api/materia-prima");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Extracts a readable message from an error response body.
///
/// The backend answers `{"detail": "..."}`; anything else falls back to the
/// HTTP status.
pub fn error_detail(status: u16, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| match v.get("detail") {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(other) if !other.is_null() => Some(other.to_string()),
            _ => None,
        })
        .unwrap_or_else(|| format!("Error del servidor ({})", status))
}

fn with_auth(builder: RequestBuilder) -> RequestBuilder {
    match storage::get_access_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    if !response.ok() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(error_detail(status, &body));
    }
    response.json::<T>().await.map_err(|e| {
        log::error!("Failed to parse response from {}: {}", response.url(), e);
        format!("Respuesta inválida del servidor: {}", e)
    })
}

async fn send(builder: RequestBuilder) -> Result<Response, String> {
    with_auth(builder).send().await.map_err(|e| {
        log::error!("Request failed: {}", e);
        format!("No se pudo conectar con el servidor: {}", e)
    })
}

async fn send_body<B: Serialize>(builder: RequestBuilder, body: &B) -> Result<Response, String> {
    let request: Request = with_auth(builder)
        .json(body)
        .map_err(|e| format!("Failed to serialize request: {}", e))?;
    request.send().await.map_err(|e| {
        log::error!("Request failed: {}", e);
        format!("No se pudo conectar con el servidor: {}", e)
    })
}

/// GET `path` and decode the JSON body.
pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    read_json(send(Request::get(&api_url(path))).await?).await
}

/// POST a JSON body to `path`.
pub async fn post_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, String> {
    read_json(send_body(Request::post(&api_url(path)), body).await?).await
}

/// PUT a JSON body to `path`.
pub async fn put_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, String> {
    read_json(send_body(Request::put(&api_url(path)), body).await?).await
}

/// PUT without a body (state transitions like `/terminar`, `/recibir`).
pub async fn put_empty<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    read_json(send(Request::put(&api_url(path))).await?).await
}

/// DELETE `path`; the confirmation body is discarded.
pub async fn delete(path: &str) -> Result<(), String> {
    read_json::<serde_json::Value>(send(Request::delete(&api_url(path))).await?)
        .await
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_detail_from_backend() {
        let body = r#"{"detail":"Stock insuficiente de Tela"}"#;
        assert_eq!(error_detail(400, body), "Stock insuficiente de Tela");
    }

    #[test]
    fn test_error_detail_fallback() {
        assert_eq!(error_detail(502, "<html>bad gateway</html>"), "Error del servidor (502)");
        assert_eq!(error_detail(500, r#"{"detail":null}"#), "Error del servidor (500)");
    }
}
