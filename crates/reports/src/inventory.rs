//! Inventory report: stock value, category breakdown and stock alerts.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use mpsystem_core::ItemId;
use mpsystem_inventory::{InventoryItem, ItemStatus};

use crate::error::ReportResult;
use crate::filter::{FilterParams, RecordFilter};
use crate::group::GroupTable;
use crate::money;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    pub total_items: u64,
    pub total_quantity: u64,
    /// Σ quantity × price.
    pub total_value: Decimal,
    /// Σ quantity × cost.
    pub total_cost: Decimal,
    pub potential_profit: Decimal,
    pub low_stock_items: u64,
    pub over_stock_items: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotals {
    pub count: u64,
    pub quantity: u64,
    pub value: Decimal,
    pub cost: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAlert {
    pub id: ItemId,
    pub name: String,
    pub sku: String,
    pub quantity: u32,
}

impl From<&InventoryItem> for StockAlert {
    fn from(item: &InventoryItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            sku: item.sku.clone(),
            quantity: item.quantity,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAlerts {
    pub low_stock: Vec<StockAlert>,
    pub over_stock: Vec<StockAlert>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryReport {
    pub generated_at: DateTime<Utc>,
    pub filters: FilterParams,
    pub summary: InventorySummary,
    pub category_breakdown: GroupTable<CategoryTotals>,
    pub alerts: StockAlerts,
    pub items: Vec<InventoryItem>,
}

/// Build the inventory report for the records passing `params`.
pub fn inventory_report(
    items: &[InventoryItem],
    params: &FilterParams,
    generated_at: DateTime<Utc>,
) -> ReportResult<InventoryReport> {
    let filter: RecordFilter<ItemStatus> = params.parse::<InventoryItem>()?;
    let selected = filter.apply(items);

    let mut summary = InventorySummary::default();
    let mut categories: GroupTable<CategoryTotals> = GroupTable::new();
    let mut alerts = StockAlerts::default();

    for item in &selected {
        let quantity = u64::from(item.quantity);
        let value = item.stock_value()?;
        let cost = item.stock_cost()?;

        summary.total_items += 1;
        summary.total_quantity += quantity;
        money::add(&mut summary.total_value, value)?;
        money::add(&mut summary.total_cost, cost)?;

        if item.is_low_stock() {
            summary.low_stock_items += 1;
            alerts.low_stock.push(StockAlert::from(*item));
        }
        if item.is_over_stock() {
            summary.over_stock_items += 1;
            alerts.over_stock.push(StockAlert::from(*item));
        }

        let group = categories.entry(&item.category);
        group.count += 1;
        group.quantity += quantity;
        money::add(&mut group.value, value)?;
        money::add(&mut group.cost, cost)?;
    }
    summary.potential_profit = money::sub(summary.total_value, summary.total_cost)?;

    Ok(InventoryReport {
        generated_at,
        filters: params.clone(),
        summary,
        category_breakdown: categories,
        alerts,
        items: selected.into_iter().cloned().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportError;
    use crate::testing::{inventory_fixture, test_time};

    #[test]
    fn seed_inventory_totals() {
        let report =
            inventory_report(&inventory_fixture(), &FilterParams::default(), test_time()).unwrap();
        let s = &report.summary;

        assert_eq!(s.total_items, 3);
        assert_eq!(s.total_quantity, 225);
        assert_eq!(s.total_value, Decimal::new(340_000, 0));
        assert_eq!(s.total_cost, Decimal::new(235_000, 0));
        assert_eq!(s.potential_profit, Decimal::new(105_000, 0));
        assert_eq!(s.low_stock_items, 0);
        assert_eq!(s.over_stock_items, 0);
    }

    #[test]
    fn category_breakdown_in_first_seen_order() {
        let report =
            inventory_report(&inventory_fixture(), &FilterParams::default(), test_time()).unwrap();
        let keys: Vec<&str> = report.category_breakdown.keys().collect();
        assert_eq!(keys, vec!["Категория А", "Категория В"]);

        let a = report.category_breakdown.get("Категория А").unwrap();
        assert_eq!(a.count, 2);
        assert_eq!(a.quantity, 175);
        assert_eq!(a.value, Decimal::new(240_000, 0));
    }

    #[test]
    fn per_item_minimum_drives_low_stock() {
        let mut items = inventory_fixture();
        items[0].quantity = 8;
        items[1].min_stock_level = Some(60);
        items[2].quantity = 150;

        let report = inventory_report(&items, &FilterParams::default(), test_time()).unwrap();

        assert_eq!(report.summary.low_stock_items, 2);
        assert_eq!(report.summary.over_stock_items, 1);
        let low: Vec<&str> = report.alerts.low_stock.iter().map(|a| a.sku.as_str()).collect();
        assert_eq!(low, vec!["SKU001", "SKU002"]);
        assert_eq!(report.alerts.over_stock[0].sku, "SKU003");
    }

    #[test]
    fn empty_input_is_all_zero() {
        let report = inventory_report(&[], &FilterParams::default(), test_time()).unwrap();
        assert_eq!(report.summary, InventorySummary::default());
        assert!(report.category_breakdown.is_empty());
        assert!(report.items.is_empty());
    }

    #[test]
    fn value_overflow_is_reported_not_panicked() {
        let mut items = inventory_fixture();
        items[0].quantity = u32::MAX;
        items[0].price = Decimal::MAX;

        let err = inventory_report(&items, &FilterParams::default(), test_time()).unwrap_err();
        assert!(matches!(err, ReportError::Validation(_)));

        // Each value fits on its own; the running total does not.
        let mut items = inventory_fixture();
        for item in &mut items {
            item.quantity = 1;
            item.price = Decimal::MAX;
        }
        assert!(inventory_report(&items, &FilterParams::default(), test_time()).is_err());
    }

    #[test]
    fn category_filter_narrows_totals() {
        let params = FilterParams {
            category: Some("в".into()),
            ..FilterParams::default()
        };
        let report = inventory_report(&inventory_fixture(), &params, test_time()).unwrap();

        assert_eq!(report.summary.total_items, 1);
        assert_eq!(report.summary.total_value, Decimal::new(100_000, 0));
    }
}
