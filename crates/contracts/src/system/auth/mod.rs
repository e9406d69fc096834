use crate::enums::UserRole;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub user: UserInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub nombre: String,
    pub email: String,
    pub rol: UserRole,
}

impl UserInfo {
    pub fn is_admin(&self) -> bool {
        self.rol.is_admin()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String, // user id
    pub email: String,
    pub rol: UserRole,
    pub exp: usize,
    pub iat: usize,
}

impl TokenClaims {
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}
