pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

pub use manager::DatabaseManager;
pub use memory::MemoryProfileStore;
pub use postgres::PgProfileStore;
pub use store::{ProfileStore, StoreError};
