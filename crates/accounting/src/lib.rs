//! Accounting module: operating expenses booked against revenue.
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns.

pub mod expense;

pub use expense::{Expense, NewExpense};
