use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mpsystem_core::validation::validate_email;
use mpsystem_core::{DomainError, DomainResult, Entity, ItemId, Record, SaleId, money};

use crate::totals;

macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident ($label:literal) { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl core::str::FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(DomainError::validation(format!(
                        "unknown {} '{}' (expected one of: {})",
                        $label,
                        other,
                        [$($text),+].join(", "),
                    ))),
                }
            }
        }
    };
}

closed_enum! {
    /// Sale lifecycle status.
    pub enum SaleStatus ("sale status") {
        Pending => "pending",
        Completed => "completed",
        Cancelled => "cancelled",
        Refunded => "refunded",
    }
}

closed_enum! {
    pub enum PaymentMethod ("payment method") {
        Cash => "cash",
        Card => "card",
        BankTransfer => "bank_transfer",
        Check => "check",
        Online => "online",
    }
}

closed_enum! {
    pub enum PaymentStatus ("payment status") {
        Pending => "pending",
        Paid => "paid",
        Partial => "partial",
        Refunded => "refunded",
        Failed => "failed",
    }
}

/// One sold line. `total` is always `quantity × price`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleLine {
    pub item_id: ItemId,
    pub name: String,
    pub quantity: u32,
    pub price: Decimal,
    pub total: Decimal,
}

impl SaleLine {
    pub fn new(
        item_id: ItemId,
        name: impl Into<String>,
        quantity: u32,
        price: Decimal,
    ) -> DomainResult<Self> {
        Ok(Self {
            item_id,
            name: name.into(),
            quantity,
            price,
            total: money::extend(quantity, price)?,
        })
    }

    pub fn line_total(&self) -> DomainResult<Decimal> {
        money::extend(self.quantity, self.price)
    }
}

/// Line input as sent by clients.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewSaleLine {
    pub item_id: Option<ItemId>,
    pub name: Option<String>,
    pub quantity: i64,
    pub price: Decimal,
}

impl NewSaleLine {
    fn validate(self) -> DomainResult<SaleLine> {
        let item_id = self
            .item_id
            .ok_or_else(|| DomainError::validation("each line needs an itemId"))?;
        if self.quantity <= 0 {
            return Err(DomainError::validation("line quantity must be positive"));
        }
        let quantity = u32::try_from(self.quantity)
            .map_err(|_| DomainError::validation("line quantity out of range"))?;
        money::validate_amount("line price", self.price)?;
        let name = self.name.unwrap_or_else(|| format!("item {item_id}"));
        SaleLine::new(item_id, name, quantity, self.price)
    }
}

/// A sales transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: SaleId,
    pub date: NaiveDate,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub items: Vec<SaleLine>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
    pub status: SaleStatus,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for recording a sale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewSale {
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub items: Vec<NewSaleLine>,
    pub discount: Option<Decimal>,
    pub payment_method: Option<PaymentMethod>,
    pub status: Option<SaleStatus>,
    pub date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Fields a client may change on an existing sale.
///
/// Status is not patchable; it moves through [`Sale::complete`],
/// [`Sale::cancel`] and [`Sale::refund`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct SalePatch {
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub items: Option<Vec<NewSaleLine>>,
    pub discount: Option<Decimal>,
    pub payment_method: Option<PaymentMethod>,
    pub date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl Sale {
    /// Validate input and price a new sale. The id is assigned by the store.
    pub fn create(input: NewSale, now: DateTime<Utc>) -> DomainResult<Self> {
        let customer_name = input
            .customer_name
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let Some(customer_name) = customer_name else {
            return Err(DomainError::validation("customer name and items are required"));
        };
        if input.items.is_empty() {
            return Err(DomainError::validation("customer name and items are required"));
        }

        let customer_email = input.customer_email.unwrap_or_default();
        if !customer_email.is_empty() {
            validate_email(&customer_email)?;
        }

        let items = input
            .items
            .into_iter()
            .map(NewSaleLine::validate)
            .collect::<DomainResult<Vec<_>>>()?;
        let totals = totals::compute(&items, input.discount.unwrap_or(Decimal::ZERO))?;

        let status = input.status.unwrap_or(SaleStatus::Completed);
        let payment_status = match status {
            SaleStatus::Pending => PaymentStatus::Pending,
            SaleStatus::Completed => PaymentStatus::Paid,
            SaleStatus::Cancelled => PaymentStatus::Failed,
            SaleStatus::Refunded => PaymentStatus::Refunded,
        };

        Ok(Self {
            id: SaleId::new(0),
            date: input.date.unwrap_or_else(|| now.date_naive()),
            customer_name,
            customer_email,
            customer_phone: input.customer_phone.unwrap_or_default(),
            items,
            subtotal: totals.subtotal,
            tax: totals.tax,
            discount: totals.discount,
            total: totals.total,
            status,
            payment_method: input.payment_method.unwrap_or(PaymentMethod::Cash),
            payment_status,
            notes: input.notes.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a partial update, re-pricing when lines or discount change.
    pub fn apply(&mut self, patch: SalePatch, now: DateTime<Utc>) -> DomainResult<()> {
        let mut next = self.clone();

        if let Some(name) = patch.customer_name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(DomainError::validation("customer name cannot be empty"));
            }
            next.customer_name = name;
        }
        if let Some(email) = patch.customer_email {
            if !email.is_empty() {
                validate_email(&email)?;
            }
            next.customer_email = email;
        }
        if let Some(phone) = patch.customer_phone {
            next.customer_phone = phone;
        }
        if let Some(method) = patch.payment_method {
            next.payment_method = method;
        }
        if let Some(date) = patch.date {
            next.date = date;
        }
        if let Some(notes) = patch.notes {
            next.notes = notes;
        }

        let reprice = patch.items.is_some() || patch.discount.is_some();
        if let Some(lines) = patch.items {
            if lines.is_empty() {
                return Err(DomainError::validation("a sale needs at least one line"));
            }
            next.items = lines
                .into_iter()
                .map(NewSaleLine::validate)
                .collect::<DomainResult<Vec<_>>>()?;
        }
        if reprice {
            if matches!(next.status, SaleStatus::Cancelled | SaleStatus::Refunded) {
                return Err(DomainError::invariant(format!(
                    "cannot reprice a {} sale",
                    next.status
                )));
            }
            let totals = totals::compute(&next.items, patch.discount.unwrap_or(next.discount))?;
            next.subtotal = totals.subtotal;
            next.tax = totals.tax;
            next.discount = totals.discount;
            next.total = totals.total;
        }

        next.updated_at = now;
        *self = next;
        Ok(())
    }

    /// pending → completed; payment is marked paid.
    pub fn complete(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        if self.status != SaleStatus::Pending {
            return Err(DomainError::invariant(format!(
                "only pending sales can be completed (status: {})",
                self.status
            )));
        }
        if self.items.is_empty() {
            return Err(DomainError::invariant("cannot complete a sale without lines"));
        }
        self.status = SaleStatus::Completed;
        self.payment_status = PaymentStatus::Paid;
        self.updated_at = now;
        Ok(())
    }

    /// pending | completed → cancelled, recording the reason in the notes.
    pub fn cancel(&mut self, reason: &str, now: DateTime<Utc>) -> DomainResult<()> {
        if !matches!(self.status, SaleStatus::Pending | SaleStatus::Completed) {
            return Err(DomainError::invariant(format!(
                "cannot cancel a {} sale",
                self.status
            )));
        }
        self.status = SaleStatus::Cancelled;
        if self.payment_status != PaymentStatus::Paid {
            self.payment_status = PaymentStatus::Failed;
        }
        self.append_note(&format!("Cancelled: {}", reason.trim()));
        self.updated_at = now;
        Ok(())
    }

    /// completed → refunded for at most the sale total. Returns the refunded amount.
    pub fn refund(&mut self, amount: Option<Decimal>, now: DateTime<Utc>) -> DomainResult<Decimal> {
        if self.status != SaleStatus::Completed {
            return Err(DomainError::invariant("only completed sales can be refunded"));
        }
        let amount = amount.unwrap_or(self.total);
        if amount <= Decimal::ZERO || amount > self.total {
            return Err(DomainError::validation(
                "refund amount must be positive and not exceed the sale total",
            ));
        }
        self.status = SaleStatus::Refunded;
        self.payment_status = if amount == self.total {
            PaymentStatus::Refunded
        } else {
            PaymentStatus::Partial
        };
        self.append_note(&format!("Refunded: {amount}"));
        self.updated_at = now;
        Ok(amount)
    }

    /// Units across all lines.
    pub fn items_sold(&self) -> u64 {
        self.items.iter().map(|l| u64::from(l.quantity)).sum()
    }

    fn append_note(&mut self, note: &str) {
        if self.notes.is_empty() {
            self.notes = note.to_string();
        } else {
            self.notes = format!("{}\n{}", self.notes, note);
        }
    }
}

impl Entity for Sale {
    type Id = SaleId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Record for Sale {
    fn assign_id(&mut self, id: SaleId) {
        self.id = id;
    }
}
