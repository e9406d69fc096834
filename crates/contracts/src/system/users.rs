use crate::enums::UserRole;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub nombre: String,
    pub email: String,
    pub rol: UserRole,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateUserDto {
    pub nombre: String,
    pub email: String,
    pub password: String,
    pub rol: UserRole,
}

impl CreateUserDto {
    pub fn validate(&self) -> Result<(), String> {
        validate_identity(&self.nombre, &self.email)?;
        if self.password.trim().is_empty() {
            return Err("La contraseña es obligatoria".into());
        }
        Ok(())
    }
}

/// Update payload. An empty or absent password keeps the current one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserDto {
    pub nombre: String,
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
    pub rol: UserRole,
}

impl UpdateUserDto {
    pub fn validate(&self) -> Result<(), String> {
        validate_identity(&self.nombre, &self.email)
    }

    pub fn new_password(&self) -> Option<&str> {
        self.password
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

fn validate_identity(nombre: &str, email: &str) -> Result<(), String> {
    if nombre.trim().is_empty() {
        return Err("El nombre es obligatorio".into());
    }
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err("El email no es válido".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_keeps_password_when_blank() {
        let mut dto = UpdateUserDto {
            nombre: "Ana".into(),
            email: "ana@hadros.mx".into(),
            password: Some("   ".into()),
            rol: UserRole::Operativo,
        };
        assert_eq!(dto.new_password(), None);
        dto.password = None;
        assert_eq!(dto.new_password(), None);
        dto.password = Some("nueva".into());
        assert_eq!(dto.new_password(), Some("nueva"));
    }

    #[test]
    fn test_email_validation() {
        let mut dto = CreateUserDto {
            nombre: "Ana".into(),
            email: "ana".into(),
            password: "x".into(),
            rol: UserRole::Admin,
        };
        assert!(dto.validate().is_err());
        dto.email = "ana@hadros.mx".into();
        assert!(dto.validate().is_ok());
    }
}
