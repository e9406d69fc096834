use std::collections::HashSet;

use anyhow::Result;
use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc};
use contracts::dashboards::d400_dashboard_stats::dto::DashboardStats;

use crate::domain::{
    a002_sales_channel, a008_production_order, a009_purchase_order, a010_sales_order,
};
use contracts::shared::format::format_lead_time;

const ACTIVE_CHANNEL_DAYS: i64 = 30;

/// First instant of the calendar month containing `now`.
pub fn month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive()
        .with_day(1)
        .unwrap_or_else(|| now.date_naive())
        .and_time(NaiveTime::MIN)
        .and_utc()
}

/// Mean of `finished - created` in minutes; `None` without samples.
pub fn average_lead_minutes(samples: &[(DateTime<Utc>, DateTime<Utc>)]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let total: i64 = samples
        .iter()
        .map(|(created, finished)| (*finished - *created).num_seconds())
        .sum();
    Some(total as f64 / samples.len() as f64 / 60.0)
}

pub async fn get_stats() -> Result<DashboardStats> {
    let now = Utc::now();

    let month_sales = a010_sales_order::repository::list_between(month_start(now), now).await?;
    let ventas_netas = month_sales.iter().map(|o| o.total()).sum();

    let pending_purchases = a009_purchase_order::repository::count_not_received().await?;
    let open_production = a008_production_order::repository::count_open().await?;

    let samples: Vec<_> = a008_production_order::repository::list_finished()
        .await?
        .into_iter()
        .filter_map(|o| o.finished_at.map(|f| (o.created_at, f)))
        .collect();
    let tiempo_proceso = average_lead_minutes(&samples)
        .map(format_lead_time)
        .unwrap_or_else(|| "-".to_string());

    let total_channels = a002_sales_channel::repository::list_all().await?.len();
    let recent = a010_sales_order::repository::list_between(
        now - Duration::days(ACTIVE_CHANNEL_DAYS),
        now,
    )
    .await?;
    let active: HashSet<_> = recent.iter().map(|o| o.channel_id).collect();

    Ok(DashboardStats {
        ventas_netas,
        ordenes_pendientes: (pending_purchases + open_production) as i64,
        tiempo_proceso,
        canales_ok: format!("{}/{}", active.len(), total_channels),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_month_start() {
        let now = Utc.with_ymd_and_hms(2024, 2, 29, 18, 45, 0).unwrap();
        assert_eq!(
            month_start(now),
            Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_average_lead_minutes() {
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let samples = vec![
            (t0, t0 + Duration::minutes(30)),
            (t0, t0 + Duration::minutes(90)),
        ];
        assert_eq!(average_lead_minutes(&samples), Some(60.0));
        assert_eq!(average_lead_minutes(&[]), None);
        assert_eq!(format_lead_time(60.0), "1 h");
    }
}
