//! Sales report: revenue summary with daily and payment-method tables.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use mpsystem_sales::{Sale, SaleStatus};

use crate::error::ReportResult;
use crate::filter::{FilterParams, RecordFilter};
use crate::group::GroupTable;
use crate::money::{self, round2, safe_div};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub total_sales: u64,
    /// Σ total over every passing sale, whatever its status.
    pub total_revenue: Decimal,
    /// `totalRevenue / totalSales` in cents; zero without sales.
    pub average_order_value: Decimal,
    pub completed_sales: u64,
    pub pending_sales: u64,
    pub cancelled_sales: u64,
    pub refunded_sales: u64,
    pub completed_revenue: Decimal,
    pub pending_revenue: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySales {
    pub count: u64,
    pub revenue: Decimal,
    pub items_sold: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentTotals {
    pub count: u64,
    pub revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReport {
    pub generated_at: DateTime<Utc>,
    pub filters: FilterParams,
    pub summary: SalesSummary,
    pub daily_breakdown: GroupTable<DailySales>,
    pub payment_method_breakdown: GroupTable<PaymentTotals>,
    pub sales: Vec<Sale>,
}

/// Build the sales report for the records passing `params`.
pub fn sales_report(
    sales: &[Sale],
    params: &FilterParams,
    generated_at: DateTime<Utc>,
) -> ReportResult<SalesReport> {
    let filter: RecordFilter<SaleStatus> = params.parse::<Sale>()?;
    let selected = filter.apply(sales);

    let mut summary = SalesSummary::default();
    let mut daily: GroupTable<DailySales> = GroupTable::new();
    let mut by_method: GroupTable<PaymentTotals> = GroupTable::new();

    for sale in &selected {
        summary.total_sales += 1;
        money::add(&mut summary.total_revenue, sale.total)?;

        match sale.status {
            SaleStatus::Completed => {
                summary.completed_sales += 1;
                money::add(&mut summary.completed_revenue, sale.total)?;
            }
            SaleStatus::Pending => {
                summary.pending_sales += 1;
                money::add(&mut summary.pending_revenue, sale.total)?;
            }
            SaleStatus::Cancelled => summary.cancelled_sales += 1,
            SaleStatus::Refunded => summary.refunded_sales += 1,
        }

        let day = daily.entry(&sale.date.format("%Y-%m-%d").to_string());
        day.count += 1;
        money::add(&mut day.revenue, sale.total)?;
        day.items_sold += sale.items_sold();

        let method = by_method.entry(sale.payment_method.as_str());
        method.count += 1;
        money::add(&mut method.revenue, sale.total)?;
    }

    summary.average_order_value = round2(safe_div(
        summary.total_revenue,
        Decimal::from(summary.total_sales),
    )?);

    Ok(SalesReport {
        generated_at,
        filters: params.clone(),
        summary,
        daily_breakdown: daily,
        payment_method_breakdown: by_method,
        sales: selected.into_iter().cloned().collect(),
    })
}
