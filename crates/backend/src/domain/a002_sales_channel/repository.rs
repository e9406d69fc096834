use contracts::domain::a002_sales_channel::aggregate::{SalesChannel, SalesChannelDto, SalesChannelId};
use serde::{Deserialize, Serialize};

use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_sales_channel")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for SalesChannel {
    fn from(m: Model) -> Self {
        SalesChannel {
            id: SalesChannelId(m.id),
            name: m.name,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_all() -> anyhow::Result<Vec<SalesChannel>> {
    let items = Entity::find()
        .order_by_asc(Column::Name)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: i64) -> anyhow::Result<Option<SalesChannel>> {
    let result = Entity::find_by_id(id).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn find_by_name(name: &str) -> anyhow::Result<Option<SalesChannel>> {
    let result = Entity::find()
        .filter(Column::Name.eq(name))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

pub async fn insert(dto: &SalesChannelDto) -> anyhow::Result<SalesChannel> {
    let active = ActiveModel {
        id: NotSet,
        name: Set(dto.name.trim().to_string()),
    };
    let model = active.insert(conn()).await?;
    Ok(model.into())
}

pub async fn update(id: i64, dto: &SalesChannelDto) -> anyhow::Result<Option<SalesChannel>> {
    let Some(model) = Entity::find_by_id(id).one(conn()).await? else {
        return Ok(None);
    };
    let mut active: ActiveModel = model.into();
    active.name = Set(dto.name.trim().to_string());
    let model = active.update(conn()).await?;
    Ok(Some(model.into()))
}

pub async fn delete(id: i64) -> anyhow::Result<bool> {
    let result = Entity::delete_by_id(id).exec(conn()).await?;
    Ok(result.rows_affected > 0)
}
