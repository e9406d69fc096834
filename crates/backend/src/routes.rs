use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::system::auth::middleware::{require_admin, require_auth};
use crate::{handlers, system};

/// All application routes.
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(auth_routes())
        .merge(user_routes())
        .merge(business_routes())
}

fn auth_routes() -> Router {
    Router::new()
        .route("/api/system/auth/login", post(system::handlers::auth::login))
        .route("/api/system/auth/refresh", post(system::handlers::auth::refresh))
        .route("/api/system/auth/logout", post(system::handlers::auth::logout))
        .route(
            "/api/system/auth/me",
            get(system::handlers::auth::current_user).layer(middleware::from_fn(require_auth)),
        )
}

fn user_routes() -> Router {
    Router::new()
        .route(
            "/api/usuarios",
            get(system::handlers::users::list).post(system::handlers::users::create),
        )
        .route(
            "/api/usuarios/:id",
            put(system::handlers::users::update).delete(system::handlers::users::delete),
        )
        .route_layer(middleware::from_fn(require_admin))
}

fn business_routes() -> Router {
    Router::new()
        // ========================================
        // CATALOGS
        // ========================================
        .route(
            "/api/productos/proveedores",
            get(handlers::a001_supplier::list_all).post(handlers::a001_supplier::create),
        )
        .route(
            "/api/productos/proveedores/:id",
            put(handlers::a001_supplier::update).delete(handlers::a001_supplier::delete),
        )
        .route(
            "/api/ventas/canales",
            get(handlers::a002_sales_channel::list_all).post(handlers::a002_sales_channel::create),
        )
        .route(
            "/api/ventas/canales/:id",
            put(handlers::a002_sales_channel::update).delete(handlers::a002_sales_channel::delete),
        )
        .route(
            "/api/materia-prima",
            get(handlers::a003_raw_material::list_all).post(handlers::a003_raw_material::create),
        )
        .route(
            "/api/materia-prima/:id",
            get(handlers::a003_raw_material::get_by_id),
        )
        .route(
            "/api/productos/fabricados",
            get(handlers::a004_manufactured_product::list_all)
                .post(handlers::a004_manufactured_product::create),
        )
        .route(
            "/api/productos/reventa",
            get(handlers::a005_resale_product::list_all)
                .post(handlers::a005_resale_product::create),
        )
        // ========================================
        // PRODUCTION
        // ========================================
        .route(
            "/api/produccion/variantes",
            get(handlers::a006_product_variant::list_all)
                .post(handlers::a006_product_variant::create),
        )
        .route(
            "/api/produccion/bom",
            get(handlers::a007_bill_of_materials::list_all)
                .post(handlers::a007_bill_of_materials::create),
        )
        .route(
            "/api/produccion/bom/:id",
            get(handlers::a007_bill_of_materials::list_by_product)
                .delete(handlers::a007_bill_of_materials::delete),
        )
        .route(
            "/api/produccion/ordenes",
            get(handlers::a008_production_order::list_all)
                .post(handlers::a008_production_order::create),
        )
        .route(
            "/api/produccion/ordenes/:id/terminar",
            put(handlers::a008_production_order::finish),
        )
        // ========================================
        // PURCHASES & SALES
        // ========================================
        .route(
            "/api/compras",
            get(handlers::a009_purchase_order::list_all).post(handlers::a009_purchase_order::create),
        )
        .route(
            "/api/compras/:id/estado",
            put(handlers::a009_purchase_order::update_status),
        )
        .route(
            "/api/compras/:id/recibir",
            put(handlers::a009_purchase_order::receive),
        )
        .route(
            "/api/ventas",
            get(handlers::a010_sales_order::list_all).post(handlers::a010_sales_order::create),
        )
        .route(
            "/api/ventas/:id",
            delete(handlers::a010_sales_order::cancel),
        )
        .route(
            "/api/ventas/:id/estado",
            put(handlers::a010_sales_order::update_status),
        )
        // ========================================
        // REPORTS, DASHBOARD, SYNC, ANALYSIS
        // ========================================
        .route("/api/reportes/ventas", get(handlers::p900_reports::sales))
        .route(
            "/api/reportes/inventario-producto",
            get(handlers::p900_reports::product_inventory),
        )
        .route(
            "/api/reportes/inventario-materia",
            get(handlers::p900_reports::material_inventory),
        )
        .route(
            "/api/dashboard/stats",
            get(handlers::d400_dashboard_stats::get_stats),
        )
        .route(
            "/api/sincronizacion/productos",
            get(handlers::u501_marketplace_sync::list_products),
        )
        .route(
            "/api/sincronizacion/mercadolibre/publicar",
            post(handlers::u501_marketplace_sync::publish),
        )
        // one segment: a listing id on PUT, a unique id on DELETE
        .route(
            "/api/sincronizacion/mercadolibre/:id",
            put(handlers::u501_marketplace_sync::update_listing)
                .delete(handlers::u501_marketplace_sync::unlink),
        )
        .route(
            "/api/ia/analisis",
            get(handlers::u502_inventory_analysis::get_analysis),
        )
        .route_layer(middleware::from_fn(require_auth))
}
