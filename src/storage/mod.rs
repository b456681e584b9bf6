//! Storage implementations for the user and product stores

pub mod in_memory;
pub mod mongodb;

pub use in_memory::{InMemoryProductStore, InMemoryUserStore};
pub use mongodb::{MongoProductStore, MongoUserStore};
