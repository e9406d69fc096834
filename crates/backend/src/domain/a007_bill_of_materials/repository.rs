use contracts::domain::a003_raw_material::aggregate::{RawMaterial, RawMaterialId};
use contracts::domain::a004_manufactured_product::aggregate::ManufacturedProductId;
use contracts::domain::a007_bill_of_materials::aggregate::{BomItem, BomItemDto, BomItemId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, ConnectionTrait, QueryOrder, Set};

use crate::domain::{a003_raw_material, a004_manufactured_product};
use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a007_bill_of_materials")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub product_id: i64,
    pub material_id: i64,
    pub quantity: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// Attaches the material summary and the product name to raw rows.
async fn hydrate(models: Vec<Model>) -> anyhow::Result<Vec<BomItem>> {
    let materials: HashMap<i64, RawMaterial> = a003_raw_material::repository::list_all()
        .await?
        .into_iter()
        .map(|m| (m.id.0, m))
        .collect();
    let products = a004_manufactured_product::repository::model_map().await?;

    Ok(models
        .into_iter()
        .map(|m| BomItem {
            id: BomItemId(m.id),
            product_id: ManufacturedProductId(m.product_id),
            material_id: RawMaterialId(m.material_id),
            quantity: m.quantity,
            material: materials.get(&m.material_id).cloned(),
            product_name: products.get(&m.product_id).map(|p| p.name.clone()),
        })
        .collect())
}

pub async fn list_all() -> anyhow::Result<Vec<BomItem>> {
    let models = Entity::find()
        .order_by_asc(Column::ProductId)
        .order_by_asc(Column::Id)
        .all(conn())
        .await?;
    hydrate(models).await
}

pub async fn list_by_product(product_id: i64) -> anyhow::Result<Vec<BomItem>> {
    let models = find_by_product_on(conn(), product_id).await?;
    hydrate(models).await
}

pub async fn find_by_product_on<C: ConnectionTrait>(
    db: &C,
    product_id: i64,
) -> anyhow::Result<Vec<Model>> {
    Ok(Entity::find()
        .filter(Column::ProductId.eq(product_id))
        .order_by_asc(Column::Id)
        .all(db)
        .await?)
}

pub async fn exists(product_id: i64, material_id: i64) -> anyhow::Result<bool> {
    let count = Entity::find()
        .filter(Column::ProductId.eq(product_id))
        .filter(Column::MaterialId.eq(material_id))
        .count(conn())
        .await?;
    Ok(count > 0)
}

pub async fn insert(dto: &BomItemDto) -> anyhow::Result<BomItem> {
    let active = ActiveModel {
        id: NotSet,
        product_id: Set(dto.product_id.0),
        material_id: Set(dto.material_id.0),
        quantity: Set(dto.quantity),
    };
    let model = active.insert(conn()).await?;
    let mut items = hydrate(vec![model]).await?;
    items
        .pop()
        .ok_or_else(|| anyhow::anyhow!("Inserted BOM row missing"))
}

pub async fn delete(id: i64) -> anyhow::Result<bool> {
    let result = Entity::delete_by_id(id).exec(conn()).await?;
    Ok(result.rows_affected > 0)
}

/// Every recipe row, for the inventory analysis.
pub async fn list_models() -> anyhow::Result<Vec<Model>> {
    Ok(Entity::find().all(conn()).await?)
}
