use contracts::domain::a001_supplier::aggregate::{Supplier, SupplierId};
use contracts::domain::a003_raw_material::aggregate::{RawMaterial, RawMaterialDto, RawMaterialId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, ConnectionTrait, QueryOrder, Set};

use crate::domain::a001_supplier;
use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a003_raw_material")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub cost: f64,
    pub unit: String,
    pub stock: f64,
    pub supplier_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_aggregate(self, suppliers: &HashMap<i64, Supplier>) -> RawMaterial {
        let supplier = self.supplier_id.and_then(|id| suppliers.get(&id).cloned());
        RawMaterial {
            id: RawMaterialId(self.id),
            name: self.name,
            description: self.description,
            cost: self.cost,
            unit: self.unit,
            stock: self.stock,
            supplier_id: self.supplier_id.map(SupplierId),
            supplier,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

async fn supplier_map() -> anyhow::Result<HashMap<i64, Supplier>> {
    Ok(a001_supplier::repository::list_all()
        .await?
        .into_iter()
        .map(|s| (s.id.0, s))
        .collect())
}

pub async fn list_all() -> anyhow::Result<Vec<RawMaterial>> {
    let suppliers = supplier_map().await?;
    let items = Entity::find()
        .order_by_asc(Column::Name)
        .all(conn())
        .await?
        .into_iter()
        .map(|m| m.into_aggregate(&suppliers))
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: i64) -> anyhow::Result<Option<RawMaterial>> {
    let Some(model) = Entity::find_by_id(id).one(conn()).await? else {
        return Ok(None);
    };
    let suppliers = supplier_map().await?;
    Ok(Some(model.into_aggregate(&suppliers)))
}

pub async fn insert(dto: &RawMaterialDto) -> anyhow::Result<RawMaterial> {
    let active = ActiveModel {
        id: NotSet,
        name: Set(dto.name.trim().to_string()),
        description: Set(dto
            .description
            .as_ref()
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())),
        cost: Set(dto.cost),
        unit: Set(dto.unit.trim().to_string()),
        stock: Set(dto.stock),
        supplier_id: Set(dto.supplier_id.map(|s| s.0)),
    };
    let model = active.insert(conn()).await?;
    let suppliers = supplier_map().await?;
    Ok(model.into_aggregate(&suppliers))
}

pub async fn count_by_supplier(supplier_id: i64) -> anyhow::Result<u64> {
    let count = Entity::find()
        .filter(Column::SupplierId.eq(supplier_id))
        .count(conn())
        .await?;
    Ok(count)
}

// Transaction-aware helpers used by production and purchase flows.

pub async fn find_on<C: ConnectionTrait>(db: &C, id: i64) -> anyhow::Result<Option<Model>> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

pub async fn find_many_on<C: ConnectionTrait>(db: &C, ids: &[i64]) -> anyhow::Result<Vec<Model>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    Ok(Entity::find()
        .filter(Column::Id.is_in(ids.iter().copied()))
        .all(db)
        .await?)
}

/// Adds `delta` (negative to consume) to a material's stock.
pub async fn add_stock_on<C: ConnectionTrait>(db: &C, id: i64, delta: f64) -> anyhow::Result<()> {
    let model = find_on(db, id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Raw material {} not found", id))?;
    let new_stock = model.stock + delta;
    let mut active: ActiveModel = model.into();
    active.stock = Set(new_stock);
    active.update(db).await?;
    Ok(())
}

/// Plain models for the inventory analysis.
pub async fn list_models() -> anyhow::Result<Vec<Model>> {
    Ok(Entity::find().all(conn()).await?)
}
