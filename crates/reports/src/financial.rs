//! Financial report: revenue, cost of goods, expenses and margins.
//!
//! Revenue is recognised for pending and completed sales; cancelled and
//! refunded sales contribute nothing. Cost of goods uses each item's current
//! cost; lines whose item no longer exists are costed at zero.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use mpsystem_accounting::Expense;
use mpsystem_core::ItemId;
use mpsystem_inventory::InventoryItem;
use mpsystem_sales::{Sale, SaleStatus};

use crate::error::ReportResult;
use crate::filter::{FilterParams, RecordFilter};
use crate::group::GroupTable;
use crate::money::{self, percent};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub total_revenue: Decimal,
    pub total_cost: Decimal,
    pub total_expenses: Decimal,
    pub gross_profit: Decimal,
    pub net_profit: Decimal,
    /// Percent of revenue.
    pub gross_margin: Decimal,
    /// Percent of revenue.
    pub net_margin: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyFinancials {
    pub revenue: Decimal,
    pub cost_of_goods: Decimal,
    pub expenses: Decimal,
    pub gross_profit: Decimal,
    pub net_profit: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialReport {
    pub generated_at: DateTime<Utc>,
    pub filters: FilterParams,
    pub summary: FinancialSummary,
    pub expense_by_category: GroupTable<Decimal>,
    pub daily_financials: GroupTable<DailyFinancials>,
    pub revenue_streams: GroupTable<Decimal>,
    pub expenses: Vec<Expense>,
}

pub fn recognises_revenue(status: SaleStatus) -> bool {
    matches!(status, SaleStatus::Pending | SaleStatus::Completed)
}

/// Build the financial report. Date criteria apply to sales and expenses;
/// the remaining criteria apply to sales only.
pub fn financial_report(
    sales: &[Sale],
    items: &[InventoryItem],
    expenses: &[Expense],
    params: &FilterParams,
    generated_at: DateTime<Utc>,
) -> ReportResult<FinancialReport> {
    let filter: RecordFilter<SaleStatus> = params.parse::<Sale>()?;
    let unit_costs: HashMap<ItemId, Decimal> = items.iter().map(|i| (i.id, i.cost)).collect();

    let mut summary = FinancialSummary::default();
    let mut daily: GroupTable<DailyFinancials> = GroupTable::new();
    let mut streams: GroupTable<Decimal> = GroupTable::new();
    let mut by_category: GroupTable<Decimal> = GroupTable::new();

    for sale in filter.apply(sales) {
        if !recognises_revenue(sale.status) {
            continue;
        }
        let mut cost_of_goods = Decimal::ZERO;
        for line in &sale.items {
            let unit_cost = unit_costs.get(&line.item_id).copied().unwrap_or(Decimal::ZERO);
            money::add(&mut cost_of_goods, mpsystem_core::money::extend(line.quantity, unit_cost)?)?;
        }

        money::add(&mut summary.total_revenue, sale.total)?;
        money::add(&mut summary.total_cost, cost_of_goods)?;

        let day = daily.entry(&sale.date.format("%Y-%m-%d").to_string());
        money::add(&mut day.revenue, sale.total)?;
        money::add(&mut day.cost_of_goods, cost_of_goods)?;

        money::add(streams.entry(sale.payment_method.as_str()), sale.total)?;
    }

    let dates = filter.dates();
    let selected_expenses: Vec<Expense> = expenses
        .iter()
        .filter(|e| dates.contains(e.date))
        .cloned()
        .collect();

    for expense in &selected_expenses {
        money::add(&mut summary.total_expenses, expense.amount)?;
        money::add(by_category.entry(&expense.category), expense.amount)?;
        money::add(
            &mut daily.entry(&expense.date.format("%Y-%m-%d").to_string()).expenses,
            expense.amount,
        )?;
    }

    for (_, day) in daily.iter_mut() {
        day.gross_profit = money::sub(day.revenue, day.cost_of_goods)?;
        day.net_profit = money::sub(day.gross_profit, day.expenses)?;
    }

    summary.gross_profit = money::sub(summary.total_revenue, summary.total_cost)?;
    summary.net_profit = money::sub(summary.gross_profit, summary.total_expenses)?;
    summary.gross_margin = percent(summary.gross_profit, summary.total_revenue)?;
    summary.net_margin = percent(summary.net_profit, summary.total_revenue)?;

    Ok(FinancialReport {
        generated_at,
        filters: params.clone(),
        summary,
        expense_by_category: by_category,
        daily_financials: daily,
        revenue_streams: streams,
        expenses: selected_expenses,
    })
}
