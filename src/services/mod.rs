// Service exports
pub mod auth;
pub mod memory;
pub mod postgres;
pub mod rest;
pub mod store;

pub use auth::{AuthError, Claims, TokenVerifier};
pub use memory::{MemoryStore, StoreOp};
pub use postgres::PostgresStore;
pub use rest::{RestStore, RestTables};
pub use store::{MatchStore, StoreError};
