use chrono::{DateTime, Utc};
use contracts::domain::a002_sales_channel::aggregate::{SalesChannel, SalesChannelId};
use contracts::domain::a005_resale_product::aggregate::ResaleProductId;
use contracts::domain::a006_product_variant::aggregate::ProductVariantId;
use contracts::domain::a010_sales_order::aggregate::{
    SalesOrder, SalesOrderDto, SalesOrderId, SalesOrderLine,
};
use contracts::enums::SalesOrderStatus;
use std::collections::HashMap;

use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, ConnectionTrait, QueryOrder, Select, Set};

use crate::domain::{a002_sales_channel, a005_resale_product, a006_product_variant};
use crate::shared::data::db::get_connection;

pub mod header {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "a010_sales_order")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        pub date: chrono::DateTime<chrono::Utc>,
        pub status: String,
        pub channel_id: i64,
        pub user_id: Option<i64>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod line {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "a010_sales_order_line")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        pub order_id: i64,
        pub quantity: i64,
        pub unit_price: f64,
        pub variant_id: Option<i64>,
        pub resale_product_id: Option<i64>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// Display names for sold items: "Producto (talla/color)" or the resale name.
async fn line_names() -> anyhow::Result<(HashMap<i64, String>, HashMap<i64, String>)> {
    let variants = a006_product_variant::service::list_all()
        .await?
        .into_iter()
        .map(|v| (v.id.0, v.label()))
        .collect();
    let resale = a005_resale_product::repository::list_models()
        .await?
        .into_iter()
        .map(|r| (r.id, r.name))
        .collect();
    Ok((variants, resale))
}

async fn hydrate(headers: Vec<header::Model>) -> anyhow::Result<Vec<SalesOrder>> {
    if headers.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<i64> = headers.iter().map(|h| h.id).collect();
    let mut lines_by_order: HashMap<i64, Vec<line::Model>> = HashMap::new();
    for l in line::Entity::find()
        .filter(line::Column::OrderId.is_in(ids))
        .order_by_asc(line::Column::Id)
        .all(conn())
        .await?
    {
        lines_by_order.entry(l.order_id).or_default().push(l);
    }

    let channels: HashMap<i64, SalesChannel> = a002_sales_channel::repository::list_all()
        .await?
        .into_iter()
        .map(|c| (c.id.0, c))
        .collect();
    let (variant_names, resale_names) = line_names().await?;

    Ok(headers
        .into_iter()
        .map(|h| {
            let lines = lines_by_order
                .remove(&h.id)
                .unwrap_or_default()
                .into_iter()
                .map(|l| {
                    let name = match (l.variant_id, l.resale_product_id) {
                        (Some(id), _) => variant_names.get(&id),
                        (None, Some(id)) => resale_names.get(&id),
                        (None, None) => None,
                    };
                    SalesOrderLine {
                        id: l.id,
                        quantity: l.quantity,
                        unit_price: l.unit_price,
                        variant_id: l.variant_id.map(ProductVariantId),
                        resale_product_id: l.resale_product_id.map(ResaleProductId),
                        name: name.cloned().unwrap_or_else(|| "Producto".to_string()),
                    }
                })
                .collect();
            SalesOrder {
                id: SalesOrderId(h.id),
                date: h.date,
                status: SalesOrderStatus::from_label(&h.status).unwrap_or_default(),
                channel_id: SalesChannelId(h.channel_id),
                channel: channels.get(&h.channel_id).cloned(),
                user_id: h.user_id,
                lines,
            }
        })
        .collect())
}

fn newest_first(select: Select<header::Entity>) -> Select<header::Entity> {
    select
        .order_by_desc(header::Column::Date)
        .order_by_desc(header::Column::Id)
}

pub async fn list_all() -> anyhow::Result<Vec<SalesOrder>> {
    let headers = newest_first(header::Entity::find()).all(conn()).await?;
    hydrate(headers).await
}

/// Orders with `from <= fecha < until`, newest first.
pub async fn list_between(
    from: DateTime<Utc>,
    until: DateTime<Utc>,
) -> anyhow::Result<Vec<SalesOrder>> {
    let headers = newest_first(header::Entity::find())
        .filter(header::Column::Date.gte(from))
        .filter(header::Column::Date.lt(until))
        .all(conn())
        .await?;
    hydrate(headers).await
}

pub async fn get_by_id(id: i64) -> anyhow::Result<Option<SalesOrder>> {
    let Some(h) = header::Entity::find_by_id(id).one(conn()).await? else {
        return Ok(None);
    };
    Ok(hydrate(vec![h]).await?.pop())
}

pub async fn count_by_channel(channel_id: i64) -> anyhow::Result<u64> {
    Ok(header::Entity::find()
        .filter(header::Column::ChannelId.eq(channel_id))
        .count(conn())
        .await?)
}

pub async fn insert_on<C: ConnectionTrait>(
    db: &C,
    dto: &SalesOrderDto,
    user_id: Option<i64>,
) -> anyhow::Result<i64> {
    let order = header::ActiveModel {
        id: NotSet,
        date: Set(Utc::now()),
        status: Set(SalesOrderStatus::Paid.label().to_string()),
        channel_id: Set(dto.channel_id.0),
        user_id: Set(user_id),
    }
    .insert(db)
    .await?;

    for l in &dto.lines {
        line::ActiveModel {
            id: NotSet,
            order_id: Set(order.id),
            quantity: Set(l.quantity),
            unit_price: Set(l.unit_price),
            variant_id: Set(l.variant_id.map(|v| v.0)),
            resale_product_id: Set(l.resale_product_id.map(|r| r.0)),
        }
        .insert(db)
        .await?;
    }
    Ok(order.id)
}

pub async fn find_header_on<C: ConnectionTrait>(
    db: &C,
    id: i64,
) -> anyhow::Result<Option<header::Model>> {
    Ok(header::Entity::find_by_id(id).one(db).await?)
}

pub async fn lines_on<C: ConnectionTrait>(db: &C, order_id: i64) -> anyhow::Result<Vec<line::Model>> {
    Ok(line::Entity::find()
        .filter(line::Column::OrderId.eq(order_id))
        .all(db)
        .await?)
}

pub async fn set_status(model: header::Model, status: SalesOrderStatus) -> anyhow::Result<()> {
    let mut active: header::ActiveModel = model.into();
    active.status = Set(status.label().to_string());
    active.update(conn()).await?;
    Ok(())
}

pub async fn delete_on<C: ConnectionTrait>(db: &C, id: i64) -> anyhow::Result<()> {
    line::Entity::delete_many()
        .filter(line::Column::OrderId.eq(id))
        .exec(db)
        .await?;
    header::Entity::delete_by_id(id).exec(db).await?;
    Ok(())
}
