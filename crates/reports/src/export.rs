//! CSV rendering of the inventory, sales and financial reports.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{ReportError, ReportResult};
use crate::financial::FinancialReport;
use crate::inventory::InventoryReport;
use crate::sales::SalesReport;

/// Reports available for export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Inventory,
    Sales,
    Financial,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Inventory => "inventory",
            ReportKind::Sales => "sales",
            ReportKind::Financial => "financial",
        }
    }

    /// `attachment` file name, e.g. `sales-report.csv`.
    pub fn file_name(&self) -> String {
        format!("{}-report.csv", self.as_str())
    }
}

impl core::str::FromStr for ReportKind {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inventory" => Ok(ReportKind::Inventory),
            "sales" => Ok(ReportKind::Sales),
            "financial" => Ok(ReportKind::Financial),
            other => Err(ReportError::validation(format!(
                "unknown report type '{other}' (expected inventory, sales or financial)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl core::str::FromStr for ExportFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(ReportError::validation(format!(
                "unsupported export format '{other}' (expected csv or json)"
            ))),
        }
    }
}

fn money(value: Decimal) -> String {
    value.normalize().to_string()
}

fn write_rows<T: Serialize>(rows: impl IntoIterator<Item = T>) -> ReportResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| ReportError::Export(e.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ReportError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ReportError::Export(e.to_string()))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InventoryRow<'a> {
    id: u64,
    name: &'a str,
    sku: &'a str,
    category: &'a str,
    quantity: u32,
    price: String,
    cost: String,
    value: String,
    stock_status: &'static str,
}

pub fn inventory_csv(report: &InventoryReport) -> ReportResult<String> {
    let rows = report
        .items
        .iter()
        .map(|item| {
            Ok(InventoryRow {
                id: item.id.get(),
                name: &item.name,
                sku: &item.sku,
                category: &item.category,
                quantity: item.quantity,
                price: money(item.price),
                cost: money(item.cost),
                value: money(item.stock_value()?),
                stock_status: item.stock_status().as_str(),
            })
        })
        .collect::<ReportResult<Vec<_>>>()?;
    write_rows(rows)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SaleRow<'a> {
    id: u64,
    date: String,
    customer_name: &'a str,
    status: &'static str,
    payment_method: &'static str,
    items_sold: u64,
    subtotal: String,
    tax: String,
    discount: String,
    total: String,
}

pub fn sales_csv(report: &SalesReport) -> ReportResult<String> {
    write_rows(report.sales.iter().map(|sale| SaleRow {
        id: sale.id.get(),
        date: sale.date.format("%Y-%m-%d").to_string(),
        customer_name: &sale.customer_name,
        status: sale.status.as_str(),
        payment_method: sale.payment_method.as_str(),
        items_sold: sale.items_sold(),
        subtotal: money(sale.subtotal),
        tax: money(sale.tax),
        discount: money(sale.discount),
        total: money(sale.total),
    }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FinancialRow<'a> {
    date: &'a str,
    revenue: String,
    cost_of_goods: String,
    expenses: String,
    gross_profit: String,
    net_profit: String,
}

pub fn financial_csv(report: &FinancialReport) -> ReportResult<String> {
    write_rows(report.daily_financials.iter().map(|(date, day)| FinancialRow {
        date,
        revenue: money(day.revenue),
        cost_of_goods: money(day.cost_of_goods),
        expenses: money(day.expenses),
        gross_profit: money(day.gross_profit),
        net_profit: money(day.net_profit),
    }))
}
