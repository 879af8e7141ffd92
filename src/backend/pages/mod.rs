//! Page Module
//!
//! Persistence and HTTP handlers for page records.
//!
//! # Module Structure
//!
//! ```text
//! pages/
//! ├── mod.rs       - Module exports
//! ├── store.rs     - PageStore trait and StoreError
//! ├── db.rs        - PostgreSQL implementation
//! ├── memory.rs    - In-memory implementation
//! └── handlers.rs  - /api/page handlers
//! ```

/// Store interface
pub mod store;

/// PostgreSQL page store
pub mod db;

/// In-memory page store
pub mod memory;

/// HTTP handlers
pub mod handlers;

pub use store::{PageStore, StoreError};
pub use db::PgPageStore;
pub use memory::MemoryPageStore;
pub use handlers::{create_page, delete_page, get_page, list_pages, update_page};
