use anyhow::{Context, Result};
use chrono::Utc;
use contracts::enums::UserRole;
use contracts::system::auth::TokenClaims;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;

use crate::shared::config::get_config;

const JWT_SECRET_KEY: &str = "jwt_secret";

/// Claims for a user, valid for `lifetime_minutes` from now.
pub fn build_claims(user_id: i64, email: &str, rol: UserRole, lifetime_minutes: i64) -> TokenClaims {
    let now = Utc::now();
    TokenClaims {
        sub: user_id.to_string(),
        email: email.to_string(),
        rol,
        exp: (now + chrono::Duration::minutes(lifetime_minutes)).timestamp() as usize,
        iat: now.timestamp() as usize,
    }
}

pub fn encode_claims(claims: &TokenClaims, secret: &str) -> Result<String> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .context("Failed to encode JWT token")
}

pub fn decode_claims(token: &str, secret: &str) -> Result<TokenClaims> {
    let data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .context("Failed to decode JWT token")?;
    Ok(data.claims)
}

/// Access token with the configured lifetime (`[auth] access_token_minutes`).
pub async fn generate_access_token(user_id: i64, email: &str, rol: UserRole) -> Result<String> {
    let minutes = get_config().auth.access_token_minutes;
    let claims = build_claims(user_id, email, rol, minutes);
    let secret = get_jwt_secret().await?;
    encode_claims(&claims, &secret)
}

pub async fn validate_token(token: &str) -> Result<TokenClaims> {
    let secret = get_jwt_secret().await?;
    decode_claims(token, &secret)
}

/// Opaque refresh token; only its hash is stored.
pub fn generate_refresh_token() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub fn calculate_refresh_token_expiration() -> String {
    let days = get_config().auth.refresh_token_days;
    (Utc::now() + chrono::Duration::days(days)).to_rfc3339()
}

/// Secret from sys_settings, generated and stored on first use.
pub async fn get_jwt_secret() -> Result<String> {
    match get_jwt_secret_from_db().await {
        Ok(Some(secret)) => Ok(secret),
        Ok(None) | Err(_) => {
            let secret = generate_jwt_secret();
            if let Err(e) = save_jwt_secret_to_db(&secret).await {
                tracing::warn!("Could not persist JWT secret: {}", e);
            }
            Ok(secret)
        }
    }
}

/// 256 random bits, base64.
fn generate_jwt_secret() -> String {
    use base64::{engine::general_purpose, Engine as _};
    let mut rng = rand::thread_rng();
    let random_bytes: Vec<u8> = (0..32).map(|_| rng.gen::<u8>()).collect();
    general_purpose::STANDARD.encode(&random_bytes)
}

async fn get_jwt_secret_from_db() -> Result<Option<String>> {
    use crate::shared::data::db::get_connection;
    use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

    let row = get_connection()
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT value FROM sys_settings WHERE key = ?",
            [JWT_SECRET_KEY.into()],
        ))
        .await?;

    match row {
        Some(row) => Ok(Some(row.try_get("", "value")?)),
        None => Ok(None),
    }
}

async fn save_jwt_secret_to_db(secret: &str) -> Result<()> {
    use crate::shared::data::db::get_connection;
    use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

    let now = Utc::now().to_rfc3339();
    get_connection()
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "INSERT OR REPLACE INTO sys_settings (key, value, description, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)",
            [
                JWT_SECRET_KEY.into(),
                secret.to_string().into(),
                "Clave de firma de tokens".into(),
                now.clone().into(),
                now.into(),
            ],
        ))
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_round_trip() {
        let secret = generate_jwt_secret();
        let claims = build_claims(7, "ana@hadros.mx", UserRole::Operativo, 60);
        let token = encode_claims(&claims, &secret).unwrap();

        let decoded = decode_claims(&token, &secret).unwrap();
        assert_eq!(decoded.user_id(), Some(7));
        assert_eq!(decoded.email, "ana@hadros.mx");
        assert_eq!(decoded.rol, UserRole::Operativo);
        assert_eq!(decoded.exp - decoded.iat, 3600);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let claims = build_claims(1, "admin@hadros.mx", UserRole::Admin, 60);
        let token = encode_claims(&claims, "uno").unwrap();
        assert!(decode_claims(&token, "otro").is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let claims = build_claims(1, "admin@hadros.mx", UserRole::Admin, -10);
        let token = encode_claims(&claims, "secreto").unwrap();
        assert!(decode_claims(&token, "secreto").is_err());
    }

    #[test]
    fn test_generated_secrets_differ() {
        assert_ne!(generate_jwt_secret(), generate_jwt_secret());
    }
}
