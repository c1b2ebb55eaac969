//! Report aggregation over inventory, sales and expense records.
//!
//! Every report is a pure function of its input records, the filter
//! parameters and the caller-supplied `generated_at` timestamp. Nothing here
//! performs IO or keeps state between calls.

pub mod dashboard;
pub mod error;
pub mod export;
pub mod filter;
pub mod financial;
pub mod group;
pub mod inventory;
pub mod money;
pub mod record;
pub mod sales;
pub mod users;

#[cfg(test)]
mod testing;

pub use dashboard::{Dashboard, dashboard};
pub use error::{ReportError, ReportResult};
pub use export::{ExportFormat, ReportKind, financial_csv, inventory_csv, sales_csv};
pub use filter::{DateRange, FilterParams, RecordFilter};
pub use financial::{FinancialReport, financial_report};
pub use group::GroupTable;
pub use inventory::{InventoryReport, InventorySummary, inventory_report};
pub use record::ReportRecord;
pub use sales::{SalesReport, SalesSummary, sales_report};
pub use users::{UserStats, user_stats};
