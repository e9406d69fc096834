use contracts::domain::a001_supplier::aggregate::{Supplier, SupplierId};
use contracts::domain::a005_resale_product::aggregate::{
    ResaleProduct, ResaleProductDto, ResaleProductId,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, ConnectionTrait, QueryOrder, Set};

use crate::domain::a001_supplier;
use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a005_resale_product")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub purchase_cost: f64,
    pub sale_price: f64,
    pub stock: i64,
    pub supplier_id: Option<i64>,
    pub meli_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    fn into_aggregate(self, suppliers: &HashMap<i64, Supplier>) -> ResaleProduct {
        let supplier = self.supplier_id.and_then(|id| suppliers.get(&id).cloned());
        ResaleProduct {
            id: ResaleProductId(self.id),
            name: self.name,
            description: self.description,
            purchase_cost: self.purchase_cost,
            sale_price: self.sale_price,
            stock: self.stock,
            supplier_id: self.supplier_id.map(SupplierId),
            supplier,
            meli_id: self.meli_id,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_all() -> anyhow::Result<Vec<ResaleProduct>> {
    let suppliers: HashMap<i64, Supplier> = a001_supplier::repository::list_all()
        .await?
        .into_iter()
        .map(|s| (s.id.0, s))
        .collect();
    let items = Entity::find()
        .order_by_asc(Column::Name)
        .all(conn())
        .await?
        .into_iter()
        .map(|m| m.into_aggregate(&suppliers))
        .collect();
    Ok(items)
}

pub async fn list_models() -> anyhow::Result<Vec<Model>> {
    Ok(Entity::find()
        .order_by_asc(Column::Name)
        .all(conn())
        .await?)
}

pub async fn insert(dto: &ResaleProductDto) -> anyhow::Result<ResaleProduct> {
    let active = ActiveModel {
        id: NotSet,
        name: Set(dto.name.trim().to_string()),
        description: Set(dto
            .description
            .as_ref()
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())),
        purchase_cost: Set(dto.purchase_cost),
        sale_price: Set(dto.sale_price),
        stock: Set(dto.stock),
        supplier_id: Set(dto.supplier_id.map(|s| s.0)),
        meli_id: Set(None),
    };
    let model = active.insert(conn()).await?;
    Ok(model.into_aggregate(&HashMap::new()))
}

pub async fn count_by_supplier(supplier_id: i64) -> anyhow::Result<u64> {
    let count = Entity::find()
        .filter(Column::SupplierId.eq(supplier_id))
        .count(conn())
        .await?;
    Ok(count)
}

pub async fn find_on<C: ConnectionTrait>(db: &C, id: i64) -> anyhow::Result<Option<Model>> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

pub async fn find_by_meli_id_on<C: ConnectionTrait>(
    db: &C,
    meli_id: &str,
) -> anyhow::Result<Option<Model>> {
    Ok(Entity::find()
        .filter(Column::MeliId.eq(meli_id))
        .one(db)
        .await?)
}

/// Adds `delta` units (negative to consume).
pub async fn add_stock_on<C: ConnectionTrait>(db: &C, id: i64, delta: i64) -> anyhow::Result<()> {
    let model = find_on(db, id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Resale product {} not found", id))?;
    let new_stock = model.stock + delta;
    let mut active: ActiveModel = model.into();
    active.stock = Set(new_stock);
    active.update(db).await?;
    Ok(())
}

/// Sets listing id and/or absolute stock (marketplace sync).
pub async fn update_listing_on<C: ConnectionTrait>(
    db: &C,
    model: Model,
    meli_id: Option<Option<String>>,
    stock: Option<i64>,
) -> anyhow::Result<()> {
    let mut active: ActiveModel = model.into();
    if let Some(meli_id) = meli_id {
        active.meli_id = Set(meli_id);
    }
    if let Some(stock) = stock {
        active.stock = Set(stock);
    }
    active.update(db).await?;
    Ok(())
}
