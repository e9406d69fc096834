//! Pure builders turning aggregates into report rows.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Utc};
use contracts::domain::a003_raw_material::aggregate::RawMaterial;
use contracts::domain::a005_resale_product::aggregate::ResaleProduct;
use contracts::domain::a006_product_variant::aggregate::ProductVariant;
use contracts::domain::a010_sales_order::aggregate::SalesOrder;
use contracts::enums::ProductKind;
use contracts::projections::p900_reports::dto::{
    MaterialInventoryRow, ProductInventoryRow, SalesReportRow,
};
use contracts::shared::date_range::DateRange;

/// Client time zones are real ones, at most 14 hours from UTC.
pub fn client_offset(minutes: i32) -> Option<FixedOffset> {
    if minutes.abs() > 14 * 60 {
        return None;
    }
    FixedOffset::east_opt(minutes * 60)
}

fn local_midnight(day: NaiveDate, offset: FixedOffset) -> DateTime<Utc> {
    (day.and_time(NaiveTime::MIN) - Duration::seconds(offset.local_minus_utc() as i64)).and_utc()
}

/// `[start 00:00, day after end 00:00)` in the client's time zone, as UTC
/// instants, so both bounds cover whole local days.
pub fn day_bounds(range: &DateRange, offset: FixedOffset) -> (DateTime<Utc>, DateTime<Utc>) {
    let from = local_midnight(range.start, offset);
    let until = local_midnight(range.end.succ_opt().unwrap_or(range.end), offset);
    (from, until)
}

/// Dates are rendered in the same zone the bounds were computed in.
pub fn sales_rows(orders: &[SalesOrder], offset: FixedOffset) -> Vec<SalesReportRow> {
    orders
        .iter()
        .map(|o| SalesReportRow {
            order_id: o.id.0,
            date: o
                .date
                .with_timezone(&offset)
                .format("%Y-%m-%d %H:%M")
                .to_string(),
            channel: o.channel_name().to_string(),
            items: o.items_summary(),
            total: o.total(),
            status: o.status.label().to_string(),
        })
        .collect()
}

/// Variants first (`VAR-n`), then resale products (`REV-n`).
pub fn product_inventory_rows(
    variants: &[ProductVariant],
    resale: &[ResaleProduct],
) -> Vec<ProductInventoryRow> {
    let manufactured = variants.iter().map(|v| ProductInventoryRow {
        kind: ProductKind::Manufactured.label().to_string(),
        code: format!("{}-{}", ProductKind::Manufactured.code_prefix(), v.id),
        product: v
            .product_name
            .clone()
            .unwrap_or_else(|| "Producto".to_string()),
        variant: v.variant_label(),
        stock: v.stock,
        sale_price: v.sale_price,
        estimated_value: v.stock as f64 * v.sale_price,
    });
    let resold = resale.iter().map(|r| ProductInventoryRow {
        kind: ProductKind::Resale.label().to_string(),
        code: format!("{}-{}", ProductKind::Resale.code_prefix(), r.id),
        product: r.name.clone(),
        variant: "N/A".to_string(),
        stock: r.stock,
        sale_price: r.sale_price,
        estimated_value: r.stock as f64 * r.sale_price,
    });
    manufactured.chain(resold).collect()
}

pub fn material_inventory_rows(materials: &[RawMaterial]) -> Vec<MaterialInventoryRow> {
    materials
        .iter()
        .map(|m| MaterialInventoryRow {
            id: m.id.0,
            name: m.name.clone(),
            supplier: m.supplier_name().to_string(),
            unit: m.unit.clone(),
            stock: m.stock,
            unit_cost: m.cost,
            total_value: m.inventory_value(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use contracts::domain::a002_sales_channel::aggregate::{SalesChannel, SalesChannelId};
    use contracts::domain::a003_raw_material::aggregate::RawMaterialId;
    use contracts::domain::a004_manufactured_product::aggregate::ManufacturedProductId;
    use contracts::domain::a005_resale_product::aggregate::ResaleProductId;
    use contracts::domain::a006_product_variant::aggregate::ProductVariantId;
    use contracts::domain::a010_sales_order::aggregate::{SalesOrderId, SalesOrderLine};
    use contracts::enums::SalesOrderStatus;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn variant() -> ProductVariant {
        ProductVariant {
            id: ProductVariantId(3),
            product_id: ManufacturedProductId(1),
            size: "M".into(),
            color: "Azul".into(),
            stock: 4,
            meli_id: None,
            product_name: Some("Pijama quirúrgica".into()),
            sale_price: 350.0,
        }
    }

    fn resale() -> ResaleProduct {
        ResaleProduct {
            id: ResaleProductId(8),
            name: "Zapato clínico".into(),
            description: None,
            purchase_cost: 200.0,
            sale_price: 499.5,
            stock: 2,
            supplier_id: None,
            supplier: None,
            meli_id: None,
        }
    }

    #[test]
    fn test_day_bounds_cover_whole_days() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 31).unwrap(),
        )
        .unwrap();
        let (from, until) = day_bounds(&range, utc());
        assert_eq!(from, Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap());
        assert_eq!(until, Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());

        let late_on_last_day = Utc.with_ymd_and_hms(2024, 5, 31, 23, 59, 0).unwrap();
        assert!(late_on_last_day >= from && late_on_last_day < until);
    }

    #[test]
    fn test_day_bounds_follow_client_zone() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let range = DateRange::new(today, today).unwrap();
        let mexico = client_offset(-360).unwrap();

        let (from, until) = day_bounds(&range, mexico);
        assert_eq!(from, Utc.with_ymd_and_hms(2024, 5, 10, 6, 0, 0).unwrap());
        assert_eq!(until, Utc.with_ymd_and_hms(2024, 5, 11, 6, 0, 0).unwrap());

        // 20:00 local on the 10th is already the 11th in UTC
        let evening_sale = Utc.with_ymd_and_hms(2024, 5, 11, 2, 0, 0).unwrap();
        assert!(evening_sale >= from && evening_sale < until);
        let early_sale = Utc.with_ymd_and_hms(2024, 5, 10, 3, 0, 0).unwrap();
        assert!(early_sale < from);
    }

    #[test]
    fn test_client_offset_limits() {
        assert_eq!(client_offset(0), Some(utc()));
        assert_eq!(client_offset(330).map(|o| o.local_minus_utc()), Some(19_800));
        assert_eq!(client_offset(15 * 60), None);
        assert_eq!(client_offset(-24 * 60), None);
    }

    #[test]
    fn test_product_inventory_codes_and_values() {
        let rows = product_inventory_rows(&[variant()], &[resale()]);
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].kind, "Fabricación");
        assert_eq!(rows[0].code, "VAR-3");
        assert_eq!(rows[0].variant, "M / Azul");
        assert_eq!(rows[0].estimated_value, 1400.0);

        assert_eq!(rows[1].kind, "Reventa");
        assert_eq!(rows[1].code, "REV-8");
        assert_eq!(rows[1].variant, "N/A");
        assert_eq!(rows[1].estimated_value, 999.0);
    }

    #[test]
    fn test_material_rows_without_supplier() {
        let material = RawMaterial {
            id: RawMaterialId(5),
            name: "Tela antifluido".into(),
            description: None,
            cost: 80.0,
            unit: "m".into(),
            stock: 12.5,
            supplier_id: None,
            supplier: None,
        };
        let rows = material_inventory_rows(&[material]);
        assert_eq!(rows[0].supplier, "Sin proveedor");
        assert_eq!(rows[0].total_value, 1000.0);
    }

    #[test]
    fn test_sales_rows_summarize_lines() {
        let order = SalesOrder {
            id: SalesOrderId(10),
            date: Utc.with_ymd_and_hms(2024, 5, 2, 15, 30, 0).unwrap(),
            status: SalesOrderStatus::Shipped,
            channel_id: SalesChannelId(1),
            channel: Some(SalesChannel {
                id: SalesChannelId(1),
                name: "Tienda".into(),
            }),
            user_id: Some(1),
            lines: vec![
                SalesOrderLine {
                    id: 1,
                    quantity: 2,
                    unit_price: 350.0,
                    variant_id: Some(ProductVariantId(3)),
                    resale_product_id: None,
                    name: "Pijama quirúrgica (M/Azul)".into(),
                },
                SalesOrderLine {
                    id: 2,
                    quantity: 1,
                    unit_price: 499.5,
                    variant_id: None,
                    resale_product_id: Some(ResaleProductId(8)),
                    name: "Zapato clínico".into(),
                },
            ],
        };
        let rows = sales_rows(&[order.clone()], utc());
        assert_eq!(rows[0].date, "2024-05-02 15:30");
        let local = sales_rows(&[order], client_offset(-360).unwrap());
        assert_eq!(local[0].date, "2024-05-02 09:30");
        assert_eq!(rows[0].channel, "Tienda");
        assert_eq!(
            rows[0].items,
            "Pijama quirúrgica (M/Azul) x2, Zapato clínico x1"
        );
        assert_eq!(rows[0].total, 1199.5);
        assert_eq!(rows[0].status, "Enviada");
    }
}
