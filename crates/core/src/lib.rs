//! `mpsystem-core`: ids, errors and validation shared by the domain crates.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod validation;

pub use entity::{Entity, Record};
pub use error::{DomainError, DomainResult};
pub use money::MAX_AMOUNT;
pub use id::{ExpenseId, ItemId, SaleId, SequentialId, UserId};
