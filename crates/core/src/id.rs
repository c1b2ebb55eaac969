//! Strongly-typed record identifiers.
//!
//! Records are numbered sequentially by the store that owns them, so ids are
//! plain `u64` values on the wire (`"id": 3`).

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of an inventory item.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u64);

/// Identifier of a sale.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SaleId(u64);

/// Identifier of a user account.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

/// Identifier of an operating expense.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(u64);

/// Identifiers handed out by a store as `max + 1`.
pub trait SequentialId: Copy + Ord + core::hash::Hash + core::fmt::Debug + Send + Sync {
    fn from_raw(raw: u64) -> Self;
    fn raw(&self) -> u64;

    /// The identifier following `self`.
    fn next(&self) -> Self {
        Self::from_raw(self.raw() + 1)
    }
}

macro_rules! impl_seq_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            pub fn get(&self) -> u64 {
                self.0
            }
        }

        impl SequentialId for $t {
            fn from_raw(raw: u64) -> Self {
                Self(raw)
            }

            fn raw(&self) -> u64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<u64> for $t {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for u64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = s
                    .trim()
                    .parse::<u64>()
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(raw))
            }
        }
    };
}

impl_seq_newtype!(ItemId, "ItemId");
impl_seq_newtype!(SaleId, "SaleId");
impl_seq_newtype!(UserId, "UserId");
impl_seq_newtype!(ExpenseId, "ExpenseId");
