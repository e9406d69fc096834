use anyhow::Context;
use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, SqlxSqliteConnector, Statement};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

use crate::shared::config;

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// Tables in dependency order. Every statement is idempotent.
const SCHEMA: &[(&str, &str)] = &[
    (
        "sys_settings",
        r#"CREATE TABLE IF NOT EXISTS sys_settings (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL,
            description TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );"#,
    ),
    (
        "sys_users",
        r#"CREATE TABLE IF NOT EXISTS sys_users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            role TEXT NOT NULL DEFAULT 'operativo',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            last_login_at TEXT
        );"#,
    ),
    (
        "sys_refresh_tokens",
        r#"CREATE TABLE IF NOT EXISTS sys_refresh_tokens (
            id TEXT PRIMARY KEY NOT NULL,
            user_id INTEGER NOT NULL REFERENCES sys_users(id) ON DELETE CASCADE,
            token_hash TEXT NOT NULL,
            expires_at TEXT NOT NULL,
            created_at TEXT NOT NULL,
            revoked_at TEXT
        );"#,
    ),
    (
        "a001_supplier",
        r#"CREATE TABLE IF NOT EXISTS a001_supplier (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            contact TEXT
        );"#,
    ),
    (
        "a002_sales_channel",
        r#"CREATE TABLE IF NOT EXISTS a002_sales_channel (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL
        );"#,
    ),
    (
        "a003_raw_material",
        r#"CREATE TABLE IF NOT EXISTS a003_raw_material (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT,
            cost REAL NOT NULL DEFAULT 0,
            unit TEXT NOT NULL,
            stock REAL NOT NULL DEFAULT 0,
            supplier_id INTEGER REFERENCES a001_supplier(id)
        );"#,
    ),
    (
        "a004_manufactured_product",
        r#"CREATE TABLE IF NOT EXISTS a004_manufactured_product (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT,
            sale_price REAL NOT NULL DEFAULT 0
        );"#,
    ),
    (
        "a005_resale_product",
        r#"CREATE TABLE IF NOT EXISTS a005_resale_product (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT,
            purchase_cost REAL NOT NULL DEFAULT 0,
            sale_price REAL NOT NULL DEFAULT 0,
            stock INTEGER NOT NULL DEFAULT 0,
            supplier_id INTEGER REFERENCES a001_supplier(id),
            meli_id TEXT
        );"#,
    ),
    (
        "a006_product_variant",
        r#"CREATE TABLE IF NOT EXISTS a006_product_variant (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            product_id INTEGER NOT NULL REFERENCES a004_manufactured_product(id),
            size TEXT NOT NULL,
            color TEXT NOT NULL,
            stock INTEGER NOT NULL DEFAULT 0,
            meli_id TEXT
        );"#,
    ),
    (
        "a007_bill_of_materials",
        r#"CREATE TABLE IF NOT EXISTS a007_bill_of_materials (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            product_id INTEGER NOT NULL REFERENCES a004_manufactured_product(id),
            material_id INTEGER NOT NULL REFERENCES a003_raw_material(id),
            quantity REAL NOT NULL,
            UNIQUE (product_id, material_id)
        );"#,
    ),
    (
        "a008_production_order",
        r#"CREATE TABLE IF NOT EXISTS a008_production_order (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            variant_id INTEGER NOT NULL REFERENCES a006_product_variant(id),
            quantity INTEGER NOT NULL,
            status TEXT NOT NULL,
            created_at TEXT NOT NULL,
            finished_at TEXT
        );"#,
    ),
    (
        "a009_purchase_order",
        r#"CREATE TABLE IF NOT EXISTS a009_purchase_order (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL,
            status TEXT NOT NULL,
            supplier_id INTEGER NOT NULL REFERENCES a001_supplier(id)
        );"#,
    ),
    (
        "a009_purchase_order_line",
        r#"CREATE TABLE IF NOT EXISTS a009_purchase_order_line (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            order_id INTEGER NOT NULL REFERENCES a009_purchase_order(id) ON DELETE CASCADE,
            quantity REAL NOT NULL,
            unit_cost REAL NOT NULL,
            material_id INTEGER REFERENCES a003_raw_material(id),
            resale_product_id INTEGER REFERENCES a005_resale_product(id)
        );"#,
    ),
    (
        "a010_sales_order",
        r#"CREATE TABLE IF NOT EXISTS a010_sales_order (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL,
            status TEXT NOT NULL,
            channel_id INTEGER NOT NULL REFERENCES a002_sales_channel(id),
            user_id INTEGER REFERENCES sys_users(id) ON DELETE SET NULL
        );"#,
    ),
    (
        "a010_sales_order_line",
        r#"CREATE TABLE IF NOT EXISTS a010_sales_order_line (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            order_id INTEGER NOT NULL REFERENCES a010_sales_order(id) ON DELETE CASCADE,
            quantity INTEGER NOT NULL,
            unit_price REAL NOT NULL,
            variant_id INTEGER REFERENCES a006_product_variant(id),
            resale_product_id INTEGER REFERENCES a005_resale_product(id)
        );"#,
    ),
];

fn build_sqlite_url(path: &Path) -> String {
    let normalized = path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    format!("sqlite://{}{}?mode=rwc", prefix, normalized)
}

/// Opens the SQLite file from config (or `HADROS_DB_PATH`) and bootstraps
/// the schema.
pub async fn initialize_database() -> anyhow::Result<()> {
    let cfg = config::get_config();
    let db_path = config::get_database_path(cfg)?;
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    tracing::info!("Database file: {}", db_path.display());

    let conn = connect(&build_sqlite_url(&db_path)).await?;
    apply_schema(&conn).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

/// SQLite leaves foreign keys off unless asked per connection.
pub async fn connect(url: &str) -> anyhow::Result<DatabaseConnection> {
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;
    Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
}

pub async fn apply_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    for (table, sql) in SCHEMA {
        conn.execute(Statement::from_string(DatabaseBackend::Sqlite, sql.to_string()))
            .await
            .with_context(|| format!("Failed to create table {}", table))?;
    }
    tracing::info!("Database schema ready ({} tables)", SCHEMA.len());
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_url() {
        assert_eq!(
            build_sqlite_url(Path::new("/tmp/hadros.db")),
            "sqlite:///tmp/hadros.db?mode=rwc"
        );
        assert_eq!(
            build_sqlite_url(Path::new("C:\\data\\hadros.db")),
            "sqlite:///C:/data/hadros.db?mode=rwc"
        );
    }

    #[test]
    fn test_schema_tables_follow_aggregate_names() {
        use contracts::domain::a009_purchase_order::aggregate::PurchaseOrder;
        use contracts::domain::common::AggregateRoot;
        let names: Vec<&str> = SCHEMA.iter().map(|(t, _)| *t).collect();
        assert!(names.contains(&PurchaseOrder::full_name().as_str()));
        for (table, sql) in SCHEMA {
            assert!(sql.contains(&format!("IF NOT EXISTS {} (", table)), "{}", table);
        }
    }

    #[tokio::test]
    async fn test_schema_applies_twice_in_memory() {
        let conn = connect("sqlite::memory:").await.unwrap();
        apply_schema(&conn).await.unwrap();
        apply_schema(&conn).await.unwrap();
    }

    mod stock {
        use super::*;
        use chrono::{Duration, FixedOffset, Utc};
        use contracts::domain::a001_supplier::aggregate::SupplierDto;
        use contracts::domain::a002_sales_channel::aggregate::SalesChannelDto;
        use contracts::domain::a003_raw_material::aggregate::{RawMaterial, RawMaterialDto};
        use contracts::domain::a004_manufactured_product::aggregate::ManufacturedProductDto;
        use contracts::domain::a006_product_variant::aggregate::{
            ProductVariantDto, ProductVariantId,
        };
        use contracts::domain::a007_bill_of_materials::aggregate::BomItemDto;
        use contracts::domain::a008_production_order::aggregate::ProductionOrderDto;
        use contracts::domain::a009_purchase_order::aggregate::{
            PurchaseOrderDto, PurchaseOrderLineDto,
        };
        use contracts::domain::a010_sales_order::aggregate::{SalesOrderDto, SalesOrderLineDto};
        use contracts::shared::date_range::DateRange;

        use crate::domain::{
            a001_supplier, a002_sales_channel, a003_raw_material, a004_manufactured_product,
            a006_product_variant, a007_bill_of_materials, a008_production_order,
            a009_purchase_order, a010_sales_order,
        };
        use crate::projections::p900_reports;

        /// Pooled `sqlite::memory:` gives every connection its own database,
        /// so the services share a throwaway file instead.
        async fn init_file_database() -> std::path::PathBuf {
            let path = std::env::temp_dir().join(format!(
                "hadros_stock_{}_{}.db",
                std::process::id(),
                Utc::now().timestamp_nanos_opt().unwrap_or_default()
            ));
            let conn = connect(&build_sqlite_url(&path)).await.unwrap();
            apply_schema(&conn).await.unwrap();
            DB_CONN.set(conn).unwrap();
            path
        }

        async fn material(m: &RawMaterial) -> f64 {
            a003_raw_material::service::get_by_id(m.id.0).await.unwrap().stock
        }

        async fn variant_stock(id: ProductVariantId) -> i64 {
            a006_product_variant::service::list_all()
                .await
                .unwrap()
                .into_iter()
                .find(|v| v.id == id)
                .unwrap()
                .stock
        }

        fn sale_line(variant: ProductVariantId, quantity: i64) -> SalesOrderLineDto {
            SalesOrderLineDto {
                quantity,
                unit_price: 350.0,
                variant_id: Some(variant),
                resale_product_id: None,
            }
        }

        // One test owns the global connection; the steps depend on each other.
        #[tokio::test]
        async fn test_stock_moves_inside_transactions() {
            let path = init_file_database().await;

            let supplier = a001_supplier::service::create(SupplierDto {
                name: "Textiles del Norte".into(),
                contact: None,
            })
            .await
            .unwrap();
            let raw = |name: &str, unit: &str, stock: f64| RawMaterialDto {
                name: name.into(),
                description: None,
                cost: 40.0,
                unit: unit.into(),
                stock,
                supplier_id: Some(supplier.id),
            };
            let tela = a003_raw_material::service::create(raw("Tela", "m", 10.0))
                .await
                .unwrap();
            let boton = a003_raw_material::service::create(raw("Botón", "pz", 3.0))
                .await
                .unwrap();

            let product = a004_manufactured_product::service::create(ManufacturedProductDto {
                name: "Filipina".into(),
                description: None,
                sale_price: 350.0,
            })
            .await
            .unwrap();
            let variant = a006_product_variant::service::create(ProductVariantDto {
                product_id: product.id,
                size: "M".into(),
                color: "Blanco".into(),
                stock: 5,
            })
            .await
            .unwrap();
            for (m, quantity) in [(&tela, 2.0), (&boton, 2.0)] {
                a007_bill_of_materials::service::create(BomItemDto {
                    product_id: product.id,
                    material_id: m.id,
                    quantity,
                })
                .await
                .unwrap();
            }

            // finishing 2 units needs 4 m of tela and 4 botones; only 3 botones exist
            let order = a008_production_order::service::create(ProductionOrderDto {
                variant_id: variant.id,
                quantity: 2,
            })
            .await
            .unwrap();
            let err = a008_production_order::service::finish(order.id.0)
                .await
                .unwrap_err();
            assert_eq!(
                err.to_string(),
                "No hay suficiente stock de Botón. Requerido: 4, Disponible: 3"
            );
            assert_eq!(material(&tela).await, 10.0);
            assert_eq!(material(&boton).await, 3.0);
            assert_eq!(variant_stock(variant.id).await, 5);

            // receiving a purchase adds to stock
            let purchase = a009_purchase_order::service::create(PurchaseOrderDto {
                supplier_id: supplier.id,
                lines: vec![PurchaseOrderLineDto {
                    quantity: 5.0,
                    unit_cost: 2.5,
                    material_id: Some(boton.id),
                    resale_product_id: None,
                }],
            })
            .await
            .unwrap();
            let received = a009_purchase_order::service::receive(purchase.id.0)
                .await
                .unwrap();
            assert!(received.status.is_received());
            assert_eq!(material(&boton).await, 8.0);
            assert!(a009_purchase_order::service::receive(purchase.id.0)
                .await
                .is_err());
            assert_eq!(material(&boton).await, 8.0);

            let finished = a008_production_order::service::finish(order.id.0)
                .await
                .unwrap();
            assert!(finished.status.is_finished());
            assert_eq!(material(&tela).await, 6.0);
            assert_eq!(material(&boton).await, 4.0);
            assert_eq!(variant_stock(variant.id).await, 7);
            assert!(a008_production_order::service::finish(order.id.0)
                .await
                .is_err());

            // duplicate lines are summed: 4 + 4 > 7 although each line fits
            let channel = a002_sales_channel::service::create(SalesChannelDto {
                name: "Mostrador".into(),
            })
            .await
            .unwrap();
            let err = a010_sales_order::service::create(
                SalesOrderDto {
                    channel_id: channel.id,
                    lines: vec![sale_line(variant.id, 4), sale_line(variant.id, 4)],
                },
                None,
            )
            .await
            .unwrap_err();
            assert!(err.to_string().starts_with("Stock insuficiente para Filipina"));
            assert_eq!(variant_stock(variant.id).await, 7);

            let sale = a010_sales_order::service::create(
                SalesOrderDto {
                    channel_id: channel.id,
                    lines: vec![sale_line(variant.id, 3), sale_line(variant.id, 3)],
                },
                None,
            )
            .await
            .unwrap();
            assert_eq!(variant_stock(variant.id).await, 1);

            let today = Utc::now().date_naive();
            let range = DateRange::new(today - Duration::days(1), today + Duration::days(1))
                .unwrap();
            let utc = FixedOffset::east_opt(0).unwrap();
            let rows = p900_reports::service::sales_report(range, utc)
                .await
                .unwrap();
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].total, 2100.0);

            // cancelling returns every line and drops the sale from reports
            a010_sales_order::service::cancel(sale.id.0).await.unwrap();
            assert_eq!(variant_stock(variant.id).await, 7);
            assert!(p900_reports::service::sales_report(range, utc)
                .await
                .unwrap()
                .is_empty());
            assert!(a010_sales_order::service::cancel(sale.id.0).await.is_err());

            let _ = std::fs::remove_file(path);
        }
    }
}
