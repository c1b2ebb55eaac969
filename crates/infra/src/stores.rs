//! The set of record stores the application runs against.

use std::sync::Arc;

use mpsystem_accounting::Expense;
use mpsystem_auth::User;
use mpsystem_inventory::InventoryItem;
use mpsystem_sales::Sale;

use crate::repository::{InMemoryRepository, Repository};

/// One injected store per record kind.
#[derive(Clone)]
pub struct Stores {
    pub items: Arc<dyn Repository<InventoryItem>>,
    pub sales: Arc<dyn Repository<Sale>>,
    pub users: Arc<dyn Repository<User>>,
    pub expenses: Arc<dyn Repository<Expense>>,
}

impl Stores {
    /// Empty in-memory stores.
    pub fn in_memory() -> Self {
        Self {
            items: Arc::new(InMemoryRepository::<InventoryItem>::new()),
            sales: Arc::new(InMemoryRepository::<Sale>::new()),
            users: Arc::new(InMemoryRepository::<User>::new()),
            expenses: Arc::new(InMemoryRepository::<Expense>::new()),
        }
    }
}

impl core::fmt::Debug for Stores {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Stores")
            .field("items", &self.items.count())
            .field("sales", &self.sales.count())
            .field("users", &self.users.count())
            .field("expenses", &self.expenses.count())
            .finish()
    }
}
