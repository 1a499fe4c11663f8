//! # wealthsync-db
//!
//! SQLite persistence for wealthsync: the concrete [`ProfileStore`]
//! collaborator behind the serving layer. Plain CRUD over an opaque JSON
//! blob; nothing here knows what an analysis document means.
//!
//! [`ProfileStore`]: wealthsync_core::ProfileStore

pub mod pool;
pub mod profiles;

pub use pool::{create_pool, create_pool_with_config, init_schema, PoolConfig};
pub use profiles::SqliteProfileStore;
