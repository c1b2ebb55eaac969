//! Inventory domain module.
//!
//! This crate contains business rules for inventory, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod item;
pub mod stock;
pub mod validation;

pub use item::{
    DEFAULT_CATEGORY, DEFAULT_UNIT, InventoryItem, ItemPatch, ItemStatus, NewItem, QuantityChange,
};
pub use stock::{DEFAULT_LOW_STOCK_THRESHOLD, DEFAULT_OVER_STOCK_THRESHOLD, StockStatus};
