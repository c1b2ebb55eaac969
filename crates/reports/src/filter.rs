//! Report filters: raw query parameters and their parsed form.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use mpsystem_sales::PaymentMethod;

use crate::error::{ReportError, ReportResult};
use crate::record::ReportRecord;

/// Filter criteria as they arrive in a query string. Empty values count as
/// absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterParams {
    pub category: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub status: Option<String>,
    pub payment_method: Option<String>,
    pub search: Option<String>,
}

impl FilterParams {
    /// Validate the criteria for records of kind `R`.
    pub fn parse<R: ReportRecord>(&self) -> ReportResult<RecordFilter<R::Status>> {
        let status = match present(&self.status) {
            Some(s) => Some(s.parse::<R::Status>()?),
            None => None,
        };
        let payment_method = match present(&self.payment_method) {
            Some(s) => Some(s.parse::<PaymentMethod>()?),
            None => None,
        };

        Ok(RecordFilter {
            category: present(&self.category).map(str::to_lowercase),
            dates: DateRange {
                from: present(&self.date_from).map(|s| parse_date("dateFrom", s)).transpose()?,
                to: present(&self.date_to).map(|s| parse_date("dateTo", s)).transpose()?,
            },
            status,
            payment_method,
            search: present(&self.search).map(str::to_lowercase),
        })
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp (its calendar date is used).
pub fn parse_date(field: &str, value: &str) -> ReportResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.date_naive()))
        .map_err(|_| {
            ReportError::validation(format!(
                "{field} must be an ISO-8601 date (YYYY-MM-DD), got '{value}'"
            ))
        })
}

/// Inclusive date range; either bound may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

/// Parsed filter for one record kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFilter<S> {
    category: Option<String>,
    dates: DateRange,
    status: Option<S>,
    payment_method: Option<PaymentMethod>,
    search: Option<String>,
}

impl<S> Default for RecordFilter<S> {
    fn default() -> Self {
        Self {
            category: None,
            dates: DateRange::default(),
            status: None,
            payment_method: None,
            search: None,
        }
    }
}

impl<S: PartialEq + Copy> RecordFilter<S> {
    pub fn dates(&self) -> DateRange {
        self.dates
    }

    /// Every supplied criterion that applies to the record must match.
    pub fn matches<R>(&self, record: &R) -> bool
    where
        R: ReportRecord<Status = S>,
    {
        if let (Some(needle), Some(category)) = (&self.category, record.category()) {
            if !category.to_lowercase().contains(needle.as_str()) {
                return false;
            }
        }

        if let Some(date) = record.record_date() {
            if !self.dates.contains(date) {
                return false;
            }
        }

        if let (Some(wanted), Some(actual)) = (self.status, record.status()) {
            if wanted != actual {
                return false;
            }
        }

        if let (Some(wanted), Some(actual)) = (self.payment_method, record.payment_method()) {
            if wanted != actual {
                return false;
            }
        }

        if let Some(needle) = &self.search {
            let hit = record
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(needle.as_str()));
            if !hit {
                return false;
            }
        }

        true
    }

    /// Passing records, in input order.
    pub fn apply<'a, R>(&self, records: &'a [R]) -> Vec<&'a R>
    where
        R: ReportRecord<Status = S>,
    {
        records.iter().filter(|r| self.matches(*r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{inventory_fixture, sales_fixture};
    use mpsystem_inventory::InventoryItem;
    use mpsystem_sales::{Sale, SaleStatus};

    fn params() -> FilterParams {
        FilterParams::default()
    }

    #[test]
    fn empty_strings_are_absent() {
        let filter = FilterParams {
            category: Some("".into()),
            date_from: Some("  ".into()),
            status: Some("".into()),
            ..params()
        }
        .parse::<Sale>()
        .unwrap();

        assert_eq!(filter, RecordFilter::default());
    }

    #[test]
    fn unparseable_date_is_a_validation_error() {
        let err = FilterParams {
            date_from: Some("15/01/2024".into()),
            ..params()
        }
        .parse::<Sale>()
        .unwrap_err();

        match err {
            ReportError::Validation(msg) if msg.contains("dateFrom") => {}
            _ => panic!("expected Validation error, got {err:?}"),
        }
    }

    #[test]
    fn unknown_status_is_a_validation_error() {
        let err = FilterParams {
            status: Some("shipped".into()),
            ..params()
        }
        .parse::<Sale>()
        .unwrap_err();
        assert!(matches!(err, ReportError::Validation(_)));
    }

    #[test]
    fn rfc3339_dates_use_calendar_day() {
        let filter = FilterParams {
            date_to: Some("2024-01-16T23:59:59Z".into()),
            ..params()
        }
        .parse::<Sale>()
        .unwrap();

        assert_eq!(filter.dates().to, NaiveDate::from_ymd_opt(2024, 1, 16));
    }

    #[test]
    fn date_range_is_inclusive() {
        let sales = sales_fixture();
        let filter = FilterParams {
            date_from: Some("2024-01-15".into()),
            date_to: Some("2024-01-16".into()),
            ..params()
        }
        .parse::<Sale>()
        .unwrap();

        let ids: Vec<u64> = filter.apply(&sales).iter().map(|s| s.id.get()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn category_is_case_insensitive_substring() {
        let items = inventory_fixture();
        let filter = FilterParams {
            category: Some("категория а".into()),
            ..params()
        }
        .parse::<InventoryItem>()
        .unwrap();

        let skus: Vec<&str> = filter.apply(&items).iter().map(|i| i.sku.as_str()).collect();
        assert_eq!(skus, vec!["SKU001", "SKU003"]);
    }

    #[test]
    fn category_does_not_apply_to_sales() {
        let sales = sales_fixture();
        let filter = FilterParams {
            category: Some("anything".into()),
            ..params()
        }
        .parse::<Sale>()
        .unwrap();

        assert_eq!(filter.apply(&sales).len(), sales.len());
    }

    #[test]
    fn search_and_status_combine() {
        let sales = sales_fixture();
        let filter = FilterParams {
            search: Some("EXAMPLE.COM".into()),
            status: Some("pending".into()),
            ..params()
        }
        .parse::<Sale>()
        .unwrap();

        let hits = filter.apply(&sales);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].status, SaleStatus::Pending);
    }

    #[test]
    fn payment_method_is_exact() {
        let sales = sales_fixture();
        let filter = FilterParams {
            payment_method: Some("cash".into()),
            ..params()
        }
        .parse::<Sale>()
        .unwrap();

        assert_eq!(filter.apply(&sales).len(), 1);
    }
}
