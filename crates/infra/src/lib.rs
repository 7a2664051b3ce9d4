//! Infrastructure layer: JSON file stores, configuration and the service facade.

pub mod account_manager;
pub mod config;
pub mod store;

pub use account_manager::{AccountManager, AccountStores};
pub use config::StoreConfig;
pub use store::{InMemoryStore, JsonFileStore, MissingFile, RecordStore};
