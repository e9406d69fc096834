use contracts::domain::a004_manufactured_product::aggregate::ManufacturedProductId;
use contracts::domain::a006_product_variant::aggregate::{
    ProductVariant, ProductVariantDto, ProductVariantId,
};
use serde::{Deserialize, Serialize};

use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, ConnectionTrait, QueryOrder, Set};

use crate::domain::a004_manufactured_product::repository as product_repository;
use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a006_product_variant")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub product_id: i64,
    pub size: String,
    pub color: String,
    pub stock: i64,
    pub meli_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Parent name and price come from the product row.
    pub fn into_aggregate(self, parent: Option<&product_repository::Model>) -> ProductVariant {
        ProductVariant {
            id: ProductVariantId(self.id),
            product_id: ManufacturedProductId(self.product_id),
            size: self.size,
            color: self.color,
            stock: self.stock,
            meli_id: self.meli_id,
            product_name: parent.map(|p| p.name.clone()),
            sale_price: parent.map(|p| p.sale_price).unwrap_or_default(),
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_models() -> anyhow::Result<Vec<Model>> {
    Ok(Entity::find()
        .order_by_asc(Column::ProductId)
        .order_by_asc(Column::Id)
        .all(conn())
        .await?)
}

pub async fn insert(dto: &ProductVariantDto) -> anyhow::Result<Model> {
    let active = ActiveModel {
        id: NotSet,
        product_id: Set(dto.product_id.0),
        size: Set(dto.size.trim().to_string()),
        color: Set(dto.color.trim().to_string()),
        stock: Set(dto.stock),
        meli_id: Set(None),
    };
    Ok(active.insert(conn()).await?)
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
        .ok_or_else(|| anyhow::anyhow!("Product variant {} not found", id))?;
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
