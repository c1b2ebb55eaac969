//! Fixtures shared by the report tests.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;

use mpsystem_accounting::Expense;
use mpsystem_core::{ExpenseId, ItemId, SaleId};
use mpsystem_inventory::{InventoryItem, ItemStatus};
use mpsystem_sales::{PaymentMethod, PaymentStatus, Sale, SaleLine, SaleStatus};

pub fn test_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 17, 18, 0, 0).unwrap()
}

pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
}

fn item(id: u64, name: &str, sku: &str, quantity: u32, price: i64, cost: i64, category: &str, d: u32) -> InventoryItem {
    let created = Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap();
    InventoryItem {
        id: ItemId::new(id),
        name: name.into(),
        description: format!("Описание {name}"),
        sku: sku.into(),
        quantity,
        price: Decimal::new(price, 0),
        cost: Decimal::new(cost, 0),
        category: category.into(),
        supplier: None,
        min_stock_level: None,
        max_stock_level: None,
        unit: "шт".into(),
        barcode: None,
        location: None,
        status: ItemStatus::Active,
        created_at: created,
        updated_at: created,
    }
}

pub fn inventory_fixture() -> Vec<InventoryItem> {
    vec![
        item(1, "Товар 1", "SKU001", 100, 1500, 1000, "Категория А", 1),
        item(2, "Товар 2", "SKU002", 50, 2000, 1500, "Категория В", 2),
        item(3, "Товар 3", "SKU003", 75, 1200, 800, "Категория А", 3),
    ]
}

/// A single-line sale with zero tax, so `subtotal == total`.
pub fn sale(id: u64, date: NaiveDate, total: Decimal, status: SaleStatus, method: PaymentMethod) -> Sale {
    let created = date.and_hms_opt(12, 0, 0).unwrap().and_utc();
    Sale {
        id: SaleId::new(id),
        date,
        customer_name: format!("Customer {id}"),
        customer_email: format!("customer{id}@example.org"),
        customer_phone: String::new(),
        items: vec![SaleLine::new(ItemId::new(1), "Товар 1", 1, total).unwrap()],
        subtotal: total,
        tax: Decimal::ZERO,
        discount: Decimal::ZERO,
        total,
        status,
        payment_method: method,
        payment_status: PaymentStatus::Paid,
        notes: String::new(),
        created_at: created,
        updated_at: created,
    }
}

#[allow(clippy::too_many_arguments)]
fn seeded_sale(
    id: u64,
    d: u32,
    customer: &str,
    email: &str,
    lines: Vec<SaleLine>,
    discount: i64,
    status: SaleStatus,
    method: PaymentMethod,
) -> Sale {
    let subtotal: Decimal = lines.iter().map(|l| l.line_total().unwrap()).sum();
    let tax = subtotal * Decimal::new(1, 1);
    let discount = Decimal::new(discount, 0);
    let created = day(d).and_hms_opt(10, 0, 0).unwrap().and_utc();
    Sale {
        id: SaleId::new(id),
        date: day(d),
        customer_name: customer.into(),
        customer_email: email.into(),
        customer_phone: String::new(),
        items: lines,
        subtotal,
        tax,
        discount,
        total: subtotal + tax - discount,
        status,
        payment_method: method,
        payment_status: if status == SaleStatus::Completed {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Pending
        },
        notes: String::new(),
        created_at: created,
        updated_at: created,
    }
}

pub fn sales_fixture() -> Vec<Sale> {
    let line = |id: u64, qty: u32, price: i64| {
        SaleLine::new(ItemId::new(id), format!("Товар {id}"), qty, Decimal::new(price, 0)).unwrap()
    };
    vec![
        seeded_sale(
            1,
            15,
            "Иван Иванов",
            "ivan@example.com",
            vec![line(1, 2, 1500), line(2, 1, 2000)],
            0,
            SaleStatus::Completed,
            PaymentMethod::Card,
        ),
        seeded_sale(
            2,
            16,
            "Мария Петрова",
            "maria@example.com",
            vec![line(3, 3, 1200), line(1, 1, 1500)],
            100,
            SaleStatus::Completed,
            PaymentMethod::Cash,
        ),
        seeded_sale(
            3,
            17,
            "Алексей Сидоров",
            "alex@example.com",
            vec![line(2, 2, 2000)],
            0,
            SaleStatus::Pending,
            PaymentMethod::BankTransfer,
        ),
    ]
}

pub fn expenses_fixture() -> Vec<Expense> {
    let expense = |id: u64, d: u32, category: &str, amount: i64| Expense {
        id: ExpenseId::new(id),
        date: day(d),
        category: category.into(),
        amount: Decimal::new(amount, 0),
        description: String::new(),
        created_at: day(d).and_hms_opt(9, 0, 0).unwrap().and_utc(),
    };
    vec![
        expense(1, 15, "Rent", 50_000),
        expense(2, 15, "Salary", 150_000),
        expense(3, 16, "Utilities", 25_000),
        expense(4, 17, "Marketing", 30_000),
    ]
}
