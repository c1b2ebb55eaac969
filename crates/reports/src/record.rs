//! What the aggregator needs to know about a record in order to filter it.

use chrono::NaiveDate;

use mpsystem_core::DomainError;
use mpsystem_inventory::{InventoryItem, ItemStatus};
use mpsystem_sales::{PaymentMethod, Sale, SaleStatus};

/// A record the aggregator can filter.
///
/// A criterion is only applied to records that carry the matching field;
/// `None` means the criterion does not apply to this kind of record.
pub trait ReportRecord {
    /// Closed status enumeration of the record kind.
    type Status: core::str::FromStr<Err = DomainError> + PartialEq + Copy;

    fn record_date(&self) -> Option<NaiveDate>;

    fn category(&self) -> Option<&str> {
        None
    }

    fn status(&self) -> Option<Self::Status> {
        None
    }

    fn payment_method(&self) -> Option<PaymentMethod> {
        None
    }

    /// Text fields searched by the `search` criterion.
    fn search_fields(&self) -> Vec<&str>;
}

impl ReportRecord for InventoryItem {
    type Status = ItemStatus;

    fn record_date(&self) -> Option<NaiveDate> {
        Some(self.created_at.date_naive())
    }

    fn category(&self) -> Option<&str> {
        Some(&self.category)
    }

    fn status(&self) -> Option<ItemStatus> {
        Some(self.status)
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.description, &self.sku]
    }
}

impl ReportRecord for Sale {
    type Status = SaleStatus;

    fn record_date(&self) -> Option<NaiveDate> {
        Some(self.date)
    }

    fn status(&self) -> Option<SaleStatus> {
        Some(self.status)
    }

    fn payment_method(&self) -> Option<PaymentMethod> {
        Some(self.payment_method)
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.customer_name, &self.customer_email]
    }
}
