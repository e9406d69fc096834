use axum::{body::Body, extract::Request, http::HeaderMap, middleware::Next, response::Response};
use contracts::system::auth::TokenClaims;

use crate::shared::error::ApiError;

/// Owned bearer token, so nothing borrowed from the request crosses an await.
fn bearer_token(headers: &HeaderMap) -> Result<String, ApiError> {
    headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("No autenticado".into()))
}

async fn claims_for(token: String) -> Result<TokenClaims, ApiError> {
    super::jwt::validate_token(&token)
        .await
        .map_err(|_| ApiError::Unauthorized("Token inválido o expirado".into()))
}

/// Valid bearer token required; claims go into request extensions.
pub async fn require_auth(mut req: Request<Body>, next: Next) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers())?;
    let claims = claims_for(token).await?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Same as [`require_auth`] plus the admin role.
pub async fn require_admin(mut req: Request<Body>, next: Next) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers())?;
    let claims = claims_for(token).await?;
    if !claims.rol.is_admin() {
        return Err(ApiError::Forbidden(
            "Se requieren permisos de administrador".into(),
        ));
    }
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(auth: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("Authorization", HeaderValue::from_str(auth).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extracted() {
        assert_eq!(bearer_token(&headers("Bearer abc.def")).unwrap(), "abc.def");
    }

    #[test]
    fn test_bearer_token_missing_or_malformed() {
        assert!(matches!(
            bearer_token(&HeaderMap::new()),
            Err(ApiError::Unauthorized(_))
        ));
        assert!(bearer_token(&headers("Basic abc")).is_err());
        assert!(bearer_token(&headers("Bearer ")).is_err());
    }

    #[test]
    fn test_middleware_futures_are_send() {
        fn assert_send<T: Send>(_: &T) {}
        let validation = claims_for(String::from("token"));
        assert_send(&validation);

        let req = Request::new(Body::empty());
        let headers = req.headers().clone();
        assert_send(&bearer_token(&headers));
    }
}
