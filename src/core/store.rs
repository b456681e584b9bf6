//! Store traits for users and products
//!
//! The services are agnostic to the underlying storage mechanism; the
//! MongoDB stores in `storage::mongodb` are the production implementations
//! and the in-memory stores back tests and development.

use crate::core::error::StoreError;
use crate::core::filter::ProductFilter;
use crate::core::product::Product;
use crate::core::user::User;
use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

/// Result type returned by store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence of user credential records
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up a user by email
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Insert a new user
    ///
    /// Email uniqueness is enforced here, not by the caller: a concurrent
    /// registration that slips past the application-level existence check
    /// must surface as [`StoreError::Duplicate`].
    async fn insert(&self, user: User) -> StoreResult<User>;
}

/// Persistence of product documents
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Retrieve all products accepted by the filter
    async fn find(&self, filter: &ProductFilter) -> StoreResult<Vec<Product>>;

    /// Retrieve a single product by id
    async fn get(&self, id: &Uuid) -> StoreResult<Option<Product>>;

    /// Retrieve flash-sale products, ordered by creation time ascending
    async fn find_flash_sale(&self) -> StoreResult<Vec<Product>>;

    /// Retrieve the highest-rated products, at most `limit` of them
    async fn find_trending(&self, limit: i64) -> StoreResult<Vec<Product>>;

    /// Insert a new product
    async fn insert(&self, product: Product) -> StoreResult<Product>;

    /// Replace the product stored under `id`, creating it when absent
    async fn upsert(&self, id: &Uuid, product: Product) -> StoreResult<UpsertReport>;

    /// Delete a product; returns `false` when no document matched
    async fn delete(&self, id: &Uuid) -> StoreResult<bool>;
}

/// Outcome of an upsert, reported back to the client
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpsertReport {
    /// Documents matched by the id lookup (0 or 1)
    pub matched_count: u64,

    /// Documents actually modified (0 or 1)
    pub modified_count: u64,

    /// Set when the upsert created a new document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upserted_id: Option<Uuid>,
}
