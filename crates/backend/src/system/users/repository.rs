use anyhow::{Context, Result};
use contracts::enums::UserRole;
use contracts::system::users::User;
use sea_orm::{ConnectionTrait, DatabaseBackend, QueryResult, Statement};

use crate::shared::data::db::get_connection;

const USER_COLUMNS: &str = "id, name, email, role";

fn user_from_row(row: &QueryResult) -> Result<User> {
    let role: String = row.try_get("", "role")?;
    Ok(User {
        id: row.try_get("", "id")?,
        nombre: row.try_get("", "name")?,
        email: row.try_get("", "email")?,
        rol: UserRole::from_code(&role).unwrap_or_default(),
    })
}

pub async fn insert(nombre: &str, email: &str, rol: UserRole, password_hash: &str) -> Result<i64> {
    let now = chrono::Utc::now().to_rfc3339();
    let result = get_connection()
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "INSERT INTO sys_users (name, email, password_hash, role, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            [
                nombre.into(),
                email.into(),
                password_hash.into(),
                rol.code().into(),
                now.clone().into(),
                now.into(),
            ],
        ))
        .await
        .context("Failed to insert user")?;
    Ok(result.last_insert_id() as i64)
}

pub async fn get_by_id(id: i64) -> Result<Option<User>> {
    let row = get_connection()
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            &format!("SELECT {} FROM sys_users WHERE id = ?", USER_COLUMNS),
            [id.into()],
        ))
        .await?;
    row.as_ref().map(user_from_row).transpose()
}

/// Case-insensitive lookup.
pub async fn get_by_email(email: &str) -> Result<Option<User>> {
    let row = get_connection()
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            &format!(
                "SELECT {} FROM sys_users WHERE lower(email) = lower(?)",
                USER_COLUMNS
            ),
            [email.trim().into()],
        ))
        .await?;
    row.as_ref().map(user_from_row).transpose()
}

pub async fn list_all() -> Result<Vec<User>> {
    let rows = get_connection()
        .query_all(Statement::from_string(
            DatabaseBackend::Sqlite,
            format!("SELECT {} FROM sys_users ORDER BY name", USER_COLUMNS),
        ))
        .await?;
    rows.iter().map(user_from_row).collect()
}

pub async fn get_password_hash(id: i64) -> Result<Option<String>> {
    let row = get_connection()
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT password_hash FROM sys_users WHERE id = ?",
            [id.into()],
        ))
        .await?;
    match row {
        Some(row) => Ok(Some(row.try_get("", "password_hash")?)),
        None => Ok(None),
    }
}

pub async fn update(user: &User) -> Result<bool> {
    let result = get_connection()
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "UPDATE sys_users SET name = ?, email = ?, role = ?, updated_at = ? WHERE id = ?",
            [
                user.nombre.clone().into(),
                user.email.clone().into(),
                user.rol.code().into(),
                chrono::Utc::now().to_rfc3339().into(),
                user.id.into(),
            ],
        ))
        .await
        .context("Failed to update user")?;
    Ok(result.rows_affected() > 0)
}

pub async fn update_password(id: i64, password_hash: &str) -> Result<()> {
    get_connection()
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "UPDATE sys_users SET password_hash = ?, updated_at = ? WHERE id = ?",
            [
                password_hash.into(),
                chrono::Utc::now().to_rfc3339().into(),
                id.into(),
            ],
        ))
        .await
        .context("Failed to update password")?;
    Ok(())
}

pub async fn delete(id: i64) -> Result<bool> {
    let result = get_connection()
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "DELETE FROM sys_users WHERE id = ?",
            [id.into()],
        ))
        .await
        .context("Failed to delete user")?;
    Ok(result.rows_affected() > 0)
}

pub async fn update_last_login(id: i64) -> Result<()> {
    get_connection()
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "UPDATE sys_users SET last_login_at = ? WHERE id = ?",
            [chrono::Utc::now().to_rfc3339().into(), id.into()],
        ))
        .await
        .context("Failed to update last login")?;
    Ok(())
}

pub async fn count_users() -> Result<i64> {
    let row = get_connection()
        .query_one(Statement::from_string(
            DatabaseBackend::Sqlite,
            "SELECT COUNT(*) AS count FROM sys_users".to_string(),
        ))
        .await?;
    match row {
        Some(row) => Ok(row.try_get("", "count")?),
        None => Ok(0),
    }
}
