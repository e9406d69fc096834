use std::collections::HashMap;

use chrono::Utc;
use sea_orm::TransactionTrait;

use super::repository;
use crate::domain::{a003_raw_material, a006_product_variant, a007_bill_of_materials};
use crate::shared::data::db::get_connection;
use crate::shared::error::ApiError;
use contracts::domain::a003_raw_material::aggregate::RawMaterialId;
use contracts::domain::a004_manufactured_product::aggregate::ManufacturedProductId;
use contracts::domain::a007_bill_of_materials::aggregate::{BomItem, BomItemId};
use contracts::domain::a007_bill_of_materials::expansion::{expand_requirements, find_shortage};
use contracts::domain::a008_production_order::aggregate::{ProductionOrder, ProductionOrderDto};

pub async fn list_all() -> anyhow::Result<Vec<ProductionOrder>> {
    let variants: HashMap<_, _> = a006_product_variant::service::list_all()
        .await?
        .into_iter()
        .map(|v| (v.id.0, v))
        .collect();
    let items = repository::list_models()
        .await?
        .into_iter()
        .map(|m| {
            let variant = variants.get(&m.variant_id).cloned();
            m.into_aggregate(variant)
        })
        .collect();
    Ok(items)
}

pub async fn create(dto: ProductionOrderDto) -> anyhow::Result<ProductionOrder> {
    dto.validate().map_err(ApiError::BadRequest)?;
    let variant = a006_product_variant::service::list_all()
        .await?
        .into_iter()
        .find(|v| v.id == dto.variant_id)
        .ok_or_else(|| ApiError::bad_request("Variante no encontrada"))?;

    let model = repository::insert(&dto).await?;
    tracing::info!(
        "Production order {} created: {} x{}",
        model.id,
        variant.label(),
        model.quantity
    );
    Ok(model.into_aggregate(Some(variant)))
}

/// Consumes the recipe materials and adds the produced units to the variant.
/// Every material is checked before any stock moves; the whole operation runs
/// in one transaction.
pub async fn finish(id: i64) -> anyhow::Result<ProductionOrder> {
    let txn = get_connection().begin().await?;

    let order = repository::find_on(&txn, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Orden no encontrada"))?;
    if order.status().is_finished() {
        return Err(ApiError::bad_request("La orden ya está terminada").into());
    }

    let variant = a006_product_variant::repository::find_on(&txn, order.variant_id)
        .await?
        .ok_or_else(|| ApiError::bad_request("Variante no encontrada"))?;

    let rows = a007_bill_of_materials::repository::find_by_product_on(&txn, variant.product_id)
        .await?;
    let material_ids: Vec<i64> = rows.iter().map(|r| r.material_id).collect();
    let materials: HashMap<i64, a003_raw_material::repository::Model> =
        a003_raw_material::repository::find_many_on(&txn, &material_ids)
            .await?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();

    let bom: Vec<BomItem> = rows
        .into_iter()
        .map(|r| BomItem {
            id: BomItemId(r.id),
            product_id: ManufacturedProductId(r.product_id),
            material_id: RawMaterialId(r.material_id),
            quantity: r.quantity,
            material: materials
                .get(&r.material_id)
                .map(|m| m.clone().into_aggregate(&HashMap::new())),
            product_name: None,
        })
        .collect();

    let requirements = expand_requirements(&bom, order.quantity);
    let stock_of = |material: RawMaterialId| {
        materials
            .get(&material.0)
            .map(|m| m.stock)
            .unwrap_or_default()
    };
    if let Some(shortage) = find_shortage(&requirements, stock_of) {
        return Err(ApiError::BadRequest(shortage.to_string()).into());
    }

    for req in &requirements {
        a003_raw_material::repository::add_stock_on(&txn, req.material_id.0, -req.required)
            .await?;
    }
    a006_product_variant::repository::add_stock_on(&txn, variant.id, order.quantity).await?;
    let finished = repository::mark_finished_on(&txn, order, Utc::now()).await?;

    txn.commit().await?;
    tracing::info!(
        "Production order {} finished: {} materials consumed, +{} units on variant {}",
        finished.id,
        requirements.len(),
        finished.quantity,
        variant.id
    );

    let variant = a006_product_variant::service::list_all()
        .await?
        .into_iter()
        .find(|v| v.id.0 == finished.variant_id);
    Ok(finished.into_aggregate(variant))
}
