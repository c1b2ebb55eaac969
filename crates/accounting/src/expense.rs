use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mpsystem_core::{DomainError, DomainResult, Entity, ExpenseId, Record, money};

/// An operating expense (rent, salaries, utilities, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: ExpenseId,
    pub date: NaiveDate,
    pub category: String,
    pub amount: Decimal,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewExpense {
    pub date: Option<NaiveDate>,
    pub category: Option<String>,
    pub amount: Option<Decimal>,
    pub description: Option<String>,
}

impl Expense {
    pub fn create(input: NewExpense, now: DateTime<Utc>) -> DomainResult<Self> {
        let category = input
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| DomainError::validation("category and amount are required"))?;
        let amount = input
            .amount
            .ok_or_else(|| DomainError::validation("category and amount are required"))?;
        if amount <= Decimal::ZERO {
            return Err(DomainError::validation("amount must be positive"));
        }
        money::validate_amount("amount", amount)?;

        Ok(Self {
            id: ExpenseId::new(0),
            date: input.date.unwrap_or_else(|| now.date_naive()),
            category,
            amount,
            description: input.description.unwrap_or_default(),
            created_at: now,
        })
    }
}

impl Entity for Expense {
    type Id = ExpenseId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Record for Expense {
    fn assign_id(&mut self, id: ExpenseId) {
        self.id = id;
    }
}
