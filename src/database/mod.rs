//! Database module exports.

mod kv_repository;
mod models;
mod mongo;
mod store;

pub use kv_repository::KvRepository;
pub use mongo::Database;
pub use store::{KvStore, MemoryStore};
