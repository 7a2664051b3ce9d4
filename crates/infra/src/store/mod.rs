//! Record stores: flat JSON array files and an in-memory variant for tests/dev.

pub mod in_memory;
pub mod json_file;
pub mod r#trait;

pub use in_memory::InMemoryStore;
pub use json_file::{JsonFileStore, MissingFile};
pub use r#trait::RecordStore;
