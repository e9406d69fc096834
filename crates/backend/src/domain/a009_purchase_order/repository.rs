use chrono::Utc;
use contracts::domain::a001_supplier::aggregate::{Supplier, SupplierId};
use contracts::domain::a003_raw_material::aggregate::RawMaterialId;
use contracts::domain::a005_resale_product::aggregate::ResaleProductId;
use contracts::domain::a009_purchase_order::aggregate::{
    PurchaseOrder, PurchaseOrderDto, PurchaseOrderId, PurchaseOrderLine,
};
use contracts::enums::PurchaseOrderStatus;
use std::collections::HashMap;

use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, ConnectionTrait, QueryOrder, Set};

use crate::domain::{a001_supplier, a003_raw_material, a005_resale_product};
use crate::shared::data::db::get_connection;

pub mod header {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "a009_purchase_order")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        pub date: chrono::DateTime<chrono::Utc>,
        pub status: String,
        pub supplier_id: i64,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod line {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "a009_purchase_order_line")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        pub order_id: i64,
        pub quantity: f64,
        pub unit_cost: f64,
        pub material_id: Option<i64>,
        pub resale_product_id: Option<i64>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

impl header::Model {
    pub fn status(&self) -> PurchaseOrderStatus {
        PurchaseOrderStatus::from_label(&self.status).unwrap_or_default()
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// Display names for the items a purchase line can reference.
struct LineNames {
    materials: HashMap<i64, String>,
    resale: HashMap<i64, String>,
}

impl LineNames {
    async fn load() -> anyhow::Result<Self> {
        let materials = a003_raw_material::repository::list_models()
            .await?
            .into_iter()
            .map(|m| (m.id, m.name))
            .collect();
        let resale = a005_resale_product::repository::list_models()
            .await?
            .into_iter()
            .map(|r| (r.id, r.name))
            .collect();
        Ok(Self { materials, resale })
    }

    fn name_of(&self, line: &line::Model) -> String {
        let found = match (line.material_id, line.resale_product_id) {
            (Some(id), _) => self.materials.get(&id),
            (None, Some(id)) => self.resale.get(&id),
            (None, None) => None,
        };
        found.cloned().unwrap_or_else(|| "Artículo".to_string())
    }
}

async fn hydrate(headers: Vec<header::Model>) -> anyhow::Result<Vec<PurchaseOrder>> {
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

    let suppliers: HashMap<i64, Supplier> = a001_supplier::repository::list_all()
        .await?
        .into_iter()
        .map(|s| (s.id.0, s))
        .collect();
    let names = LineNames::load().await?;

    Ok(headers
        .into_iter()
        .map(|h| {
            let status = h.status();
            let lines = lines_by_order
                .remove(&h.id)
                .unwrap_or_default()
                .into_iter()
                .map(|l| PurchaseOrderLine {
                    id: l.id,
                    name: names.name_of(&l),
                    quantity: l.quantity,
                    unit_cost: l.unit_cost,
                    material_id: l.material_id.map(RawMaterialId),
                    resale_product_id: l.resale_product_id.map(ResaleProductId),
                })
                .collect();
            PurchaseOrder {
                id: PurchaseOrderId(h.id),
                date: h.date,
                status,
                supplier_id: SupplierId(h.supplier_id),
                supplier: suppliers.get(&h.supplier_id).cloned(),
                lines,
            }
        })
        .collect())
}

/// Newest first.
pub async fn list_all() -> anyhow::Result<Vec<PurchaseOrder>> {
    let headers = header::Entity::find()
        .order_by_desc(header::Column::Date)
        .order_by_desc(header::Column::Id)
        .all(conn())
        .await?;
    hydrate(headers).await
}

pub async fn get_by_id(id: i64) -> anyhow::Result<Option<PurchaseOrder>> {
    let Some(h) = header::Entity::find_by_id(id).one(conn()).await? else {
        return Ok(None);
    };
    Ok(hydrate(vec![h]).await?.pop())
}

pub async fn count_by_supplier(supplier_id: i64) -> anyhow::Result<u64> {
    Ok(header::Entity::find()
        .filter(header::Column::SupplierId.eq(supplier_id))
        .count(conn())
        .await?)
}

pub async fn count_not_received() -> anyhow::Result<u64> {
    Ok(header::Entity::find()
        .filter(header::Column::Status.ne(PurchaseOrderStatus::Received.label()))
        .count(conn())
        .await?)
}

/// Writes the header with status `Solicitada` and all its lines.
pub async fn insert_on<C: ConnectionTrait>(db: &C, dto: &PurchaseOrderDto) -> anyhow::Result<i64> {
    let order = header::ActiveModel {
        id: NotSet,
        date: Set(Utc::now()),
        status: Set(PurchaseOrderStatus::Requested.label().to_string()),
        supplier_id: Set(dto.supplier_id.0),
    }
    .insert(db)
    .await?;

    for l in &dto.lines {
        line::ActiveModel {
            id: NotSet,
            order_id: Set(order.id),
            quantity: Set(l.quantity),
            unit_cost: Set(l.unit_cost),
            material_id: Set(l.material_id.map(|m| m.0)),
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
        .order_by_asc(line::Column::Id)
        .all(db)
        .await?)
}

pub async fn set_status_on<C: ConnectionTrait>(
    db: &C,
    model: header::Model,
    status: PurchaseOrderStatus,
) -> anyhow::Result<()> {
    let mut active: header::ActiveModel = model.into();
    active.status = Set(status.label().to_string());
    active.update(db).await?;
    Ok(())
}
