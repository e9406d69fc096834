use contracts::domain::a004_manufactured_product::aggregate::{
    ManufacturedProduct, ManufacturedProductDto, ManufacturedProductId,
};
use contracts::domain::a006_product_variant::aggregate::ProductVariant;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, ConnectionTrait, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a004_manufactured_product")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub sale_price: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_aggregate(self, variants: Vec<ProductVariant>) -> ManufacturedProduct {
        ManufacturedProduct {
            id: ManufacturedProductId(self.id),
            name: self.name,
            description: self.description,
            sale_price: self.sale_price,
            variants,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_models() -> anyhow::Result<Vec<Model>> {
    Ok(Entity::find()
        .order_by_asc(Column::Name)
        .all(conn())
        .await?)
}

pub async fn model_map() -> anyhow::Result<HashMap<i64, Model>> {
    Ok(list_models()
        .await?
        .into_iter()
        .map(|m| (m.id, m))
        .collect())
}

pub async fn get_model(id: i64) -> anyhow::Result<Option<Model>> {
    get_model_on(conn(), id).await
}

pub async fn get_model_on<C: ConnectionTrait>(db: &C, id: i64) -> anyhow::Result<Option<Model>> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

pub async fn insert(dto: &ManufacturedProductDto) -> anyhow::Result<ManufacturedProduct> {
    let active = ActiveModel {
        id: NotSet,
        name: Set(dto.name.trim().to_string()),
        description: Set(dto
            .description
            .as_ref()
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())),
        sale_price: Set(dto.sale_price),
    };
    let model = active.insert(conn()).await?;
    Ok(model.into_aggregate(Vec::new()))
}
