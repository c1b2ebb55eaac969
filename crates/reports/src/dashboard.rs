//! Dashboard: today vs. yesterday, stock value and recent activity.

use chrono::{DateTime, Days, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use mpsystem_core::SaleId;
use mpsystem_inventory::InventoryItem;
use mpsystem_sales::{Sale, SaleStatus};

use crate::financial::recognises_revenue;
use crate::error::ReportResult;
use crate::money::{self, percent};

pub const RECENT_ACTIVITY_LIMIT: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayTotals {
    pub revenue: Decimal,
    pub orders: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Changes {
    /// Percent change of revenue against yesterday.
    pub revenue: Decimal,
    /// Percent change of order count against yesterday.
    pub orders: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryGlance {
    pub total_value: Decimal,
    pub item_count: u64,
    pub low_stock_items: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentSale {
    pub sale_id: SaleId,
    pub customer_name: String,
    pub amount: Decimal,
    pub items: u64,
    pub status: SaleStatus,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    LowStock,
    NoSalesToday,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardAlert {
    pub kind: AlertKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub generated_at: DateTime<Utc>,
    pub date: NaiveDate,
    pub today: DayTotals,
    pub yesterday: DayTotals,
    pub changes: Changes,
    pub inventory: InventoryGlance,
    pub recent_activity: Vec<RecentSale>,
    pub alerts: Vec<DashboardAlert>,
}

fn day_totals(sales: &[Sale], date: NaiveDate) -> ReportResult<DayTotals> {
    sales
        .iter()
        .filter(|s| s.date == date && recognises_revenue(s.status))
        .try_fold(DayTotals::default(), |mut acc, s| {
            money::add(&mut acc.revenue, s.total)?;
            acc.orders += 1;
            Ok(acc)
        })
}

/// Build the dashboard as seen on `today`.
pub fn dashboard(
    sales: &[Sale],
    items: &[InventoryItem],
    today: NaiveDate,
    generated_at: DateTime<Utc>,
) -> ReportResult<Dashboard> {
    let current = day_totals(sales, today)?;
    let previous = match today.checked_sub_days(Days::new(1)) {
        Some(d) => day_totals(sales, d)?,
        None => DayTotals::default(),
    };

    let changes = Changes {
        revenue: percent(money::sub(current.revenue, previous.revenue)?, previous.revenue)?,
        orders: percent(
            Decimal::from(current.orders) - Decimal::from(previous.orders),
            Decimal::from(previous.orders),
        )?,
    };

    let mut inventory = InventoryGlance::default();
    for item in items {
        money::add(&mut inventory.total_value, item.stock_value()?)?;
        inventory.item_count += 1;
        if item.is_low_stock() {
            inventory.low_stock_items += 1;
        }
    }

    let mut newest: Vec<&Sale> = sales.iter().collect();
    newest.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    let recent_activity = newest
        .into_iter()
        .take(RECENT_ACTIVITY_LIMIT)
        .map(|s| RecentSale {
            sale_id: s.id,
            customer_name: s.customer_name.clone(),
            amount: s.total,
            items: s.items_sold(),
            status: s.status,
            timestamp: s.created_at,
        })
        .collect();

    let mut alerts = Vec::new();
    if inventory.low_stock_items > 0 {
        alerts.push(DashboardAlert {
            kind: AlertKind::LowStock,
            message: format!("{} товаров с низким остатком", inventory.low_stock_items),
        });
    }
    if current.orders == 0 {
        alerts.push(DashboardAlert {
            kind: AlertKind::NoSalesToday,
            message: "Сегодня еще не было продаж".to_string(),
        });
    }

    Ok(Dashboard {
        generated_at,
        date: today,
        today: current,
        yesterday: previous,
        changes,
        inventory,
        recent_activity,
        alerts,
    })
}
