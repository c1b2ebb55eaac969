use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mpsystem_core::{DomainError, DomainResult, Entity, ItemId, Record, money};

use crate::stock::{self, StockStatus};
use crate::validation;

/// Category assigned when none is supplied.
pub const DEFAULT_CATEGORY: &str = "Без категории";

/// Unit of measure assigned when none is supplied.
pub const DEFAULT_UNIT: &str = "шт";

/// Lifecycle status of a catalogue entry.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    #[default]
    Active,
    Archived,
    Discontinued,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Active => "active",
            ItemStatus::Archived => "archived",
            ItemStatus::Discontinued => "discontinued",
        }
    }
}

impl core::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for ItemStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ItemStatus::Active),
            "archived" => Ok(ItemStatus::Archived),
            "discontinued" => Ok(ItemStatus::Discontinued),
            other => Err(DomainError::validation(format!(
                "unknown item status '{other}' (expected active, archived or discontinued)"
            ))),
        }
    }
}

/// A stocked inventory item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub sku: String,
    pub quantity: u32,
    pub price: Decimal,
    pub cost: Decimal,
    pub category: String,
    pub supplier: Option<String>,
    pub min_stock_level: Option<u32>,
    pub max_stock_level: Option<u32>,
    pub unit: String,
    pub barcode: Option<String>,
    pub location: Option<String>,
    pub status: ItemStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an item.
///
/// Required fields are optional here so that a missing field surfaces as a
/// validation error rather than a body-decoding failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewItem {
    pub name: Option<String>,
    pub description: Option<String>,
    pub sku: Option<String>,
    pub quantity: Option<i64>,
    pub price: Option<Decimal>,
    pub cost: Option<Decimal>,
    pub category: Option<String>,
    pub supplier: Option<String>,
    pub min_stock_level: Option<u32>,
    pub max_stock_level: Option<u32>,
    pub unit: Option<String>,
    pub barcode: Option<String>,
    pub location: Option<String>,
}

/// Partial update: the complete list of fields a client may change.
///
/// Status changes go through [`InventoryItem::archive`] / [`InventoryItem::restore`]
/// and quantity corrections preferably through [`InventoryItem::adjust_quantity`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub sku: Option<String>,
    pub quantity: Option<i64>,
    pub price: Option<Decimal>,
    pub cost: Option<Decimal>,
    pub category: Option<String>,
    pub supplier: Option<String>,
    pub min_stock_level: Option<u32>,
    pub max_stock_level: Option<u32>,
    pub unit: Option<String>,
    pub barcode: Option<String>,
    pub location: Option<String>,
}

/// Audit record returned by quantity adjustments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantityChange {
    pub item_id: ItemId,
    pub old_quantity: u32,
    pub new_quantity: u32,
    pub change: i64,
    pub reason: String,
    pub timestamp: DateTime<Utc>,
}

impl InventoryItem {
    /// Validate input and build a new item. The id is assigned by the store.
    pub fn create(input: NewItem, now: DateTime<Utc>) -> DomainResult<Self> {
        let (Some(name), Some(sku), Some(quantity), Some(price)) =
            (input.name, input.sku, input.quantity, input.price)
        else {
            return Err(DomainError::validation(
                "name, sku, quantity and price are required",
            ));
        };

        let cost = input.cost.unwrap_or(Decimal::ZERO);

        validation::validate_name(&name)?;
        validation::validate_sku(&sku)?;
        let quantity = validation::validate_quantity(quantity)?;
        validation::validate_amount("price", price)?;
        validation::validate_amount("cost", cost)?;
        validation::validate_stock_levels(input.min_stock_level, input.max_stock_level)?;

        Ok(Self {
            id: ItemId::new(0),
            name: name.trim().to_string(),
            description: input.description.unwrap_or_default(),
            sku,
            quantity,
            price,
            cost,
            category: non_blank(input.category).unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            supplier: input.supplier,
            min_stock_level: input.min_stock_level,
            max_stock_level: input.max_stock_level,
            unit: non_blank(input.unit).unwrap_or_else(|| DEFAULT_UNIT.to_string()),
            barcode: input.barcode,
            location: input.location,
            status: ItemStatus::Active,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a partial update. Nothing is changed if any field is invalid.
    pub fn apply(&mut self, patch: ItemPatch, now: DateTime<Utc>) -> DomainResult<()> {
        let mut next = self.clone();

        if let Some(name) = patch.name {
            validation::validate_name(&name)?;
            next.name = name.trim().to_string();
        }
        if let Some(sku) = patch.sku {
            validation::validate_sku(&sku)?;
            next.sku = sku;
        }
        if let Some(quantity) = patch.quantity {
            next.quantity = validation::validate_quantity(quantity)?;
        }
        if let Some(price) = patch.price {
            validation::validate_amount("price", price)?;
            next.price = price;
        }
        if let Some(cost) = patch.cost {
            validation::validate_amount("cost", cost)?;
            next.cost = cost;
        }
        if let Some(description) = patch.description {
            next.description = description;
        }
        if let Some(category) = non_blank(patch.category) {
            next.category = category;
        }
        if let Some(unit) = non_blank(patch.unit) {
            next.unit = unit;
        }
        if patch.supplier.is_some() {
            next.supplier = patch.supplier;
        }
        if patch.barcode.is_some() {
            next.barcode = patch.barcode;
        }
        if patch.location.is_some() {
            next.location = patch.location;
        }
        if patch.min_stock_level.is_some() {
            next.min_stock_level = patch.min_stock_level;
        }
        if patch.max_stock_level.is_some() {
            next.max_stock_level = patch.max_stock_level;
        }
        validation::validate_stock_levels(next.min_stock_level, next.max_stock_level)?;

        next.updated_at = now;
        *self = next;
        Ok(())
    }

    /// Move stock by `delta` (negative for issues, positive for receipts).
    pub fn adjust_quantity(
        &mut self,
        delta: i64,
        reason: impl Into<String>,
        now: DateTime<Utc>,
    ) -> DomainResult<QuantityChange> {
        let new_quantity = i64::from(self.quantity)
            .checked_add(delta)
            .filter(|q| *q >= 0)
            .ok_or_else(|| DomainError::invariant("insufficient stock"))?;
        let new_quantity = u32::try_from(new_quantity)
            .map_err(|_| DomainError::invariant("quantity out of range"))?;

        let change = QuantityChange {
            item_id: self.id,
            old_quantity: self.quantity,
            new_quantity,
            change: delta,
            reason: reason.into(),
            timestamp: now,
        };

        self.quantity = new_quantity;
        self.updated_at = now;
        Ok(change)
    }

    pub fn archive(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        if self.status == ItemStatus::Archived {
            return Err(DomainError::invariant("item is already archived"));
        }
        self.status = ItemStatus::Archived;
        self.updated_at = now;
        Ok(())
    }

    pub fn restore(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        if self.status != ItemStatus::Archived {
            return Err(DomainError::invariant("only archived items can be restored"));
        }
        self.status = ItemStatus::Active;
        self.updated_at = now;
        Ok(())
    }

    /// `quantity × price`.
    pub fn stock_value(&self) -> DomainResult<Decimal> {
        money::extend(self.quantity, self.price)
    }

    /// `quantity × cost`.
    pub fn stock_cost(&self) -> DomainResult<Decimal> {
        money::extend(self.quantity, self.cost)
    }

    /// Margin on price in percent; zero for free items.
    pub fn profit_margin(&self) -> Decimal {
        if self.price.is_zero() {
            return Decimal::ZERO;
        }
        ((self.price - self.cost) / self.price * Decimal::ONE_HUNDRED).round_dp(2)
    }

    pub fn is_low_stock(&self) -> bool {
        stock::is_low_stock(self.quantity, self.min_stock_level)
    }

    pub fn is_over_stock(&self) -> bool {
        stock::is_over_stock(self.quantity, self.max_stock_level)
    }

    pub fn stock_status(&self) -> StockStatus {
        stock::classify(self.quantity, self.min_stock_level, self.max_stock_level)
    }
}

impl Entity for InventoryItem {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Record for InventoryItem {
    fn assign_id(&mut self, id: ItemId) {
        self.id = id;
    }

    fn conflicts_with(&self, other: &Self) -> Option<DomainError> {
        if self.sku.eq_ignore_ascii_case(&other.sku) {
            return Some(DomainError::conflict(format!(
                "item with sku '{}' already exists",
                other.sku
            )));
        }
        None
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
