use std::collections::HashMap;

use sea_orm::{ConnectionTrait, TransactionTrait};

use super::repository;
use crate::domain::{
    a002_sales_channel, a004_manufactured_product, a005_resale_product, a006_product_variant,
};
use crate::shared::data::db::get_connection;
use crate::shared::error::ApiError;
use contracts::domain::a010_sales_order::aggregate::{SalesOrder, SalesOrderDto, SalesStatusUpdate};
use contracts::shared::stock_item::StockItemRef;

/// Current stock of a sellable item, as read inside the sale transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct StockLevel {
    pub name: String,
    pub available: i64,
}

/// Checks the aggregated demand against stock before anything is written.
/// Fails on the first item that is unknown or not fully covered.
pub fn check_stock(
    demand: &[(StockItemRef, i64)],
    levels: &HashMap<StockItemRef, StockLevel>,
) -> Result<(), String> {
    for (item, quantity) in demand {
        let level = levels
            .get(item)
            .ok_or_else(|| format!("Producto no encontrado: {}", item))?;
        if level.available < *quantity {
            return Err(format!(
                "Stock insuficiente para {}. Disponible: {}",
                level.name, level.available
            ));
        }
    }
    Ok(())
}

async fn stock_level_on<C: ConnectionTrait>(
    db: &C,
    item: StockItemRef,
) -> anyhow::Result<Option<StockLevel>> {
    let level = match item {
        StockItemRef::Variant(id) => {
            match a006_product_variant::repository::find_on(db, id.0).await? {
                Some(v) => {
                    let product =
                        a004_manufactured_product::repository::get_model_on(db, v.product_id)
                            .await?;
                    let available = v.stock;
                    Some(StockLevel {
                        name: v.into_aggregate(product.as_ref()).label(),
                        available,
                    })
                }
                None => None,
            }
        }
        StockItemRef::Resale(id) => a005_resale_product::repository::find_on(db, id.0)
            .await?
            .map(|r| StockLevel {
                name: r.name,
                available: r.stock,
            }),
    };
    Ok(level)
}

async fn add_stock_on<C: ConnectionTrait>(
    db: &C,
    item: StockItemRef,
    delta: i64,
) -> anyhow::Result<()> {
    match item {
        StockItemRef::Variant(id) => {
            a006_product_variant::repository::add_stock_on(db, id.0, delta).await
        }
        StockItemRef::Resale(id) => {
            a005_resale_product::repository::add_stock_on(db, id.0, delta).await
        }
    }
}

pub async fn list_all() -> anyhow::Result<Vec<SalesOrder>> {
    repository::list_all().await
}

async fn load(id: i64) -> anyhow::Result<SalesOrder> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Venta no encontrada").into())
}

/// Records the sale for `user_id` and deducts stock, in one transaction.
pub async fn create(dto: SalesOrderDto, user_id: Option<i64>) -> anyhow::Result<SalesOrder> {
    dto.validate().map_err(ApiError::BadRequest)?;
    if a002_sales_channel::repository::get_by_id(dto.channel_id.0)
        .await?
        .is_none()
    {
        return Err(ApiError::bad_request("Canal no encontrado").into());
    }

    let txn = get_connection().begin().await?;
    let demand = dto.demand();
    let mut levels = HashMap::new();
    for (item, _) in &demand {
        if let Some(level) = stock_level_on(&txn, *item).await? {
            levels.insert(*item, level);
        }
    }
    check_stock(&demand, &levels).map_err(ApiError::BadRequest)?;

    let id = repository::insert_on(&txn, &dto, user_id).await?;
    for (item, quantity) in &demand {
        add_stock_on(&txn, *item, -quantity).await?;
    }
    txn.commit().await?;

    tracing::info!(
        "Sale {} recorded: {} items, channel {}",
        id,
        demand.len(),
        dto.channel_id
    );
    load(id).await
}

pub async fn update_status(id: i64, update: SalesStatusUpdate) -> anyhow::Result<SalesOrder> {
    let order = repository::find_header_on(get_connection(), id)
        .await?
        .ok_or_else(|| ApiError::not_found("Venta no encontrada"))?;
    repository::set_status(order, update.status).await?;
    load(id).await
}

/// Returns every line's quantity to stock and deletes the order.
pub async fn cancel(id: i64) -> anyhow::Result<()> {
    let txn = get_connection().begin().await?;
    if repository::find_header_on(&txn, id).await?.is_none() {
        return Err(ApiError::not_found("Venta no encontrada").into());
    }
    let lines = repository::lines_on(&txn, id).await?;
    for line in &lines {
        match (line.variant_id, line.resale_product_id) {
            (Some(v), _) => {
                a006_product_variant::repository::add_stock_on(&txn, v, line.quantity).await?
            }
            (None, Some(r)) => {
                a005_resale_product::repository::add_stock_on(&txn, r, line.quantity).await?
            }
            (None, None) => {}
        }
    }
    repository::delete_on(&txn, id).await?;
    txn.commit().await?;

    tracing::info!("Sale {} cancelled, {} lines returned to stock", id, lines.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a005_resale_product::aggregate::ResaleProductId;
    use contracts::domain::a006_product_variant::aggregate::ProductVariantId;

    fn levels() -> HashMap<StockItemRef, StockLevel> {
        let mut map = HashMap::new();
        map.insert(
            StockItemRef::Variant(ProductVariantId(1)),
            StockLevel {
                name: "Filipina (M/Blanco)".into(),
                available: 5,
            },
        );
        map.insert(
            StockItemRef::Resale(ResaleProductId(2)),
            StockLevel {
                name: "Zapato clínico".into(),
                available: 0,
            },
        );
        map
    }

    #[test]
    fn test_check_stock_accepts_covered_demand() {
        let demand = vec![(StockItemRef::Variant(ProductVariantId(1)), 5)];
        assert!(check_stock(&demand, &levels()).is_ok());
    }

    #[test]
    fn test_check_stock_reports_first_shortage() {
        let demand = vec![
            (StockItemRef::Variant(ProductVariantId(1)), 6),
            (StockItemRef::Resale(ResaleProductId(2)), 1),
        ];
        assert_eq!(
            check_stock(&demand, &levels()).unwrap_err(),
            "Stock insuficiente para Filipina (M/Blanco). Disponible: 5"
        );
    }

    #[test]
    fn test_check_stock_rejects_unknown_item() {
        let demand = vec![(StockItemRef::Variant(ProductVariantId(9)), 1)];
        let err = check_stock(&demand, &levels()).unwrap_err();
        assert!(err.starts_with("Producto no encontrado"));
    }

    #[test]
    fn test_duplicate_lines_are_checked_together() {
        use contracts::domain::a010_sales_order::aggregate::SalesOrderLineDto;
        let line = SalesOrderLineDto {
            quantity: 3,
            unit_price: 100.0,
            variant_id: Some(ProductVariantId(1)),
            resale_product_id: None,
        };
        let dto = SalesOrderDto {
            channel_id: contracts::domain::a002_sales_channel::aggregate::SalesChannelId(1),
            lines: vec![line.clone(), line],
        };
        // 3 + 3 > 5 even though each line alone fits
        assert!(check_stock(&dto.demand(), &levels()).is_err());
    }
}
