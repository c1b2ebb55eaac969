//! Demo data loaded at startup when `SEED_DEMO_DATA` is on.
//!
//! Records go through the regular constructors and the stores' `create`, so
//! seeded data obeys the same validation and numbering as API writes.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;

use mpsystem_accounting::{Expense, NewExpense};
use mpsystem_auth::{NewUser, Role, User};
use mpsystem_core::{DomainError, DomainResult, ItemId};
use mpsystem_inventory::{InventoryItem, NewItem};
use mpsystem_sales::{NewSale, NewSaleLine, PaymentMethod, Sale, SaleStatus};

use crate::stores::Stores;

/// Counts of seeded records, for the startup log line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub items: usize,
    pub sales: usize,
    pub users: usize,
    pub expenses: usize,
}

fn at(day: u32, hour: u32) -> DomainResult<DateTime<Utc>> {
    Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0)
        .single()
        .ok_or_else(|| DomainError::invariant(format!("invalid seed date 2024-01-{day}")))
}

fn date(day: u32) -> DomainResult<NaiveDate> {
    NaiveDate::from_ymd_opt(2024, 1, day)
        .ok_or_else(|| DomainError::invariant(format!("invalid seed date 2024-01-{day}")))
}

fn demo_items() -> DomainResult<Vec<InventoryItem>> {
    let rows = [
        ("Товар 1", "SKU001", 100, 1500, 1000, "Категория А", "Поставщик 1", "A-01", 1),
        ("Товар 2", "SKU002", 50, 2000, 1500, "Категория В", "Поставщик 2", "B-02", 2),
        ("Товар 3", "SKU003", 75, 1200, 800, "Категория А", "Поставщик 1", "A-03", 3),
    ];

    rows.into_iter()
        .map(|(name, sku, qty, price, cost, category, supplier, location, day)| {
            InventoryItem::create(
                NewItem {
                    name: Some(name.into()),
                    description: Some(format!("Описание {name}")),
                    sku: Some(sku.into()),
                    quantity: Some(qty),
                    price: Some(Decimal::new(price, 0)),
                    cost: Some(Decimal::new(cost, 0)),
                    category: Some(category.into()),
                    supplier: Some(supplier.into()),
                    location: Some(location.into()),
                    ..NewItem::default()
                },
                at(day, 0)?,
            )
        })
        .collect()
}

fn line(item: u64, quantity: i64, price: i64) -> NewSaleLine {
    NewSaleLine {
        item_id: Some(ItemId::new(item)),
        name: Some(format!("Товар {item}")),
        quantity,
        price: Decimal::new(price, 0),
    }
}

fn demo_sales() -> DomainResult<Vec<Sale>> {
    let rows = [
        (
            15,
            "Иван Иванов",
            "ivan@example.com",
            "+7 900 123-45-67",
            vec![line(1, 2, 1500), line(2, 1, 2000)],
            0,
            SaleStatus::Completed,
            PaymentMethod::Card,
        ),
        (
            16,
            "Мария Петрова",
            "maria@example.com",
            "+7 900 765-43-21",
            vec![line(3, 3, 1200), line(1, 1, 1500)],
            100,
            SaleStatus::Completed,
            PaymentMethod::Cash,
        ),
        (
            17,
            "Алексей Сидоров",
            "alex@example.com",
            "+7 900 555-11-22",
            vec![line(2, 2, 2000)],
            0,
            SaleStatus::Pending,
            PaymentMethod::BankTransfer,
        ),
    ];

    rows.into_iter()
        .map(|(day, name, email, phone, items, discount, status, method)| {
            Sale::create(
                NewSale {
                    customer_name: Some(name.into()),
                    customer_email: Some(email.into()),
                    customer_phone: Some(phone.into()),
                    items,
                    discount: Some(Decimal::new(discount, 0)),
                    payment_method: Some(method),
                    status: Some(status),
                    date: Some(date(day)?),
                    notes: None,
                },
                at(day, 10)?,
            )
        })
        .collect()
}

fn demo_users() -> DomainResult<Vec<User>> {
    let rows = [
        ("admin", "admin123", "Администратор", "Системы", Role::Administrator),
        ("manager", "manager123", "Менеджер", "Продаж", Role::Manager),
        ("employee", "employee123", "Сотрудник", "Склада", Role::Employee),
    ];

    rows.into_iter()
        .map(|(username, password, first, last, role)| {
            User::create(
                NewUser {
                    username: Some(username.into()),
                    email: Some(format!("{username}@mpsystem.com")),
                    password: Some(password.into()),
                    first_name: Some(first.into()),
                    last_name: Some(last.into()),
                    role: Some(role),
                },
                role,
                at(1, 0)?,
            )
        })
        .collect()
}

fn demo_expenses() -> DomainResult<Vec<Expense>> {
    let rows = [
        (15, "Rent", 50_000, "Аренда офиса"),
        (15, "Salary", 150_000, "Зарплата сотрудников"),
        (16, "Utilities", 25_000, "Коммунальные услуги"),
        (17, "Marketing", 30_000, "Реклама"),
    ];

    rows.into_iter()
        .map(|(day, category, amount, description)| {
            Expense::create(
                NewExpense {
                    date: Some(date(day)?),
                    category: Some(category.into()),
                    amount: Some(Decimal::new(amount, 0)),
                    description: Some(description.into()),
                },
                at(day, 9)?,
            )
        })
        .collect()
}

/// Load the demo data set into `stores`.
pub fn seed_demo(stores: &Stores) -> DomainResult<SeedSummary> {
    let mut summary = SeedSummary::default();

    for item in demo_items()? {
        stores.items.create(item)?;
        summary.items += 1;
    }
    for sale in demo_sales()? {
        stores.sales.create(sale)?;
        summary.sales += 1;
    }
    for user in demo_users()? {
        stores.users.create(user)?;
        summary.users += 1;
    }
    for expense in demo_expenses()? {
        stores.expenses.create(expense)?;
        summary.expenses += 1;
    }

    Ok(summary)
}
