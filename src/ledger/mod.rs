//! Transactions, the category catalog, and per-category display overrides.

pub mod association;
pub mod category;
pub mod transaction;

pub use association::{category_data_equals, AssetCache, CategoryAssociations};
pub use category::{Category, CategoryCatalog, CategoryData, IconDescriptor, IconSource};
pub use transaction::{Flow, Transaction, TransactionLog, TransactionRecord};
