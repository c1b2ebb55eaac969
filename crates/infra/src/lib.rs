//! Infrastructure layer: record stores and demo data.

pub mod repository;
pub mod seed;
pub mod stores;

pub use repository::{InMemoryRepository, Repository};
pub use seed::{SeedSummary, seed_demo};
pub use stores::Stores;
