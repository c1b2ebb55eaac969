//! Sales domain module.
//!
//! Sales transactions, their pricing and their status lifecycle. Pure domain
//! logic (no IO, no HTTP, no storage).

pub mod sale;
pub mod totals;

pub use sale::{
    NewSale, NewSaleLine, PaymentMethod, PaymentStatus, Sale, SaleLine, SalePatch, SaleStatus,
};
pub use totals::{TAX_RATE, Totals};
