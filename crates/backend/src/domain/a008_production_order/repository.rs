use chrono::{DateTime, Utc};
use contracts::domain::a006_product_variant::aggregate::{ProductVariant, ProductVariantId};
use contracts::domain::a008_production_order::aggregate::{
    ProductionOrder, ProductionOrderDto, ProductionOrderId,
};
use contracts::enums::ProductionOrderStatus;
use serde::{Deserialize, Serialize};

use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, ConnectionTrait, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a008_production_order")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub variant_id: i64,
    pub quantity: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn status(&self) -> ProductionOrderStatus {
        ProductionOrderStatus::from_label(&self.status).unwrap_or_default()
    }

    pub fn into_aggregate(self, variant: Option<ProductVariant>) -> ProductionOrder {
        let status = self.status();
        ProductionOrder {
            id: ProductionOrderId(self.id),
            variant_id: ProductVariantId(self.variant_id),
            quantity: self.quantity,
            status,
            created_at: self.created_at,
            finished_at: self.finished_at,
            variant,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// Newest first.
pub async fn list_models() -> anyhow::Result<Vec<Model>> {
    Ok(Entity::find()
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id)
        .all(conn())
        .await?)
}

pub async fn insert(dto: &ProductionOrderDto) -> anyhow::Result<Model> {
    let active = ActiveModel {
        id: NotSet,
        variant_id: Set(dto.variant_id.0),
        quantity: Set(dto.quantity),
        status: Set(ProductionOrderStatus::Pending.label().to_string()),
        created_at: Set(Utc::now()),
        finished_at: Set(None),
    };
    Ok(active.insert(conn()).await?)
}

pub async fn find_on<C: ConnectionTrait>(db: &C, id: i64) -> anyhow::Result<Option<Model>> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

pub async fn mark_finished_on<C: ConnectionTrait>(
    db: &C,
    model: Model,
    finished_at: DateTime<Utc>,
) -> anyhow::Result<Model> {
    let mut active: ActiveModel = model.into();
    active.status = Set(ProductionOrderStatus::Finished.label().to_string());
    active.finished_at = Set(Some(finished_at));
    Ok(active.update(db).await?)
}

/// Orders not yet finished, for the dashboard.
pub async fn count_open() -> anyhow::Result<u64> {
    Ok(Entity::find()
        .filter(Column::Status.ne(ProductionOrderStatus::Finished.label()))
        .count(conn())
        .await?)
}

pub async fn list_finished() -> anyhow::Result<Vec<Model>> {
    Ok(Entity::find()
        .filter(Column::Status.eq(ProductionOrderStatus::Finished.label()))
        .filter(Column::FinishedAt.is_not_null())
        .all(conn())
        .await?)
}
