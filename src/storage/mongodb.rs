//! MongoDB storage backend using the official MongoDB async driver.
//!
//! Provides [`MongoUserStore`] and [`MongoProductStore`] backed by a
//! `mongodb::Database`, one collection per record type (`users`,
//! `products`).
//!
//! # Serialization strategy
//!
//! Records are serialized via `serde_json::Value` as an intermediate
//! format, then converted to BSON documents. This keeps UUIDs stored as
//! strings and DateTimes as ISO 8601 strings, and the `id` field is mapped
//! to MongoDB's `_id` convention in both directions.
//!
//! # Uniqueness
//!
//! `MongoUserStore::ensure_indexes` creates a unique index on
//! `users.email`; a racing insert that violates it is reported as
//! [`StoreError::Duplicate`], which the auth layer maps to its
//! duplicate-user error.

use crate::core::error::StoreError;
use crate::core::filter::ProductFilter;
use crate::core::product::Product;
use crate::core::store::{ProductStore, StoreResult, UpsertReport, UserStore};
use crate::core::user::User;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{Bson, Document, doc};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{Database, IndexModel};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

const USERS_COLLECTION: &str = "users";
const PRODUCTS_COLLECTION: &str = "products";

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Serialize a record into a BSON Document, renaming `id` → `_id`.
fn to_document<T: Serialize>(record: &T) -> StoreResult<Document> {
    let json = serde_json::to_value(record).map_err(|e| StoreError::Serialization {
        message: format!("Failed to serialize record: {}", e),
    })?;

    let bson = mongodb::bson::to_bson(&json).map_err(|e| StoreError::Serialization {
        message: format!("Failed to convert JSON to BSON: {}", e),
    })?;

    let mut doc = match bson {
        Bson::Document(d) => d,
        _ => {
            return Err(StoreError::Serialization {
                message: "Expected BSON document, got non-object".to_string(),
            });
        }
    };

    if let Some(id) = doc.remove("id") {
        doc.insert("_id", id);
    }

    Ok(doc)
}

/// Deserialize a BSON Document back into a record, renaming `_id` → `id`.
fn from_document<T: DeserializeOwned>(mut doc: Document) -> StoreResult<T> {
    if let Some(id) = doc.remove("_id") {
        doc.insert("id", id);
    }

    let json = Bson::Document(doc).into_relaxed_extjson();
    serde_json::from_value(json).map_err(|e| StoreError::Serialization {
        message: format!("Failed to deserialize record from document: {}", e),
    })
}

/// Convert a UUID to its BSON string representation for queries.
fn uuid_bson(id: &Uuid) -> Bson {
    Bson::String(id.to_string())
}

/// Map a driver error to a store error, keeping connectivity failures
/// distinguishable from query failures.
fn store_error(err: mongodb::error::Error) -> StoreError {
    match err.kind.as_ref() {
        ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) => StoreError::Unavailable {
            message: err.to_string(),
        },
        _ => StoreError::Query {
            message: err.to_string(),
        },
    }
}

/// E11000: unique index violation.
fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == 11000,
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Filter translation
// ---------------------------------------------------------------------------

/// Translate a [`ProductFilter`] into a MongoDB filter document.
///
/// Criteria groups join under `$and`; category and price groups are `$or`
/// disjunctions over their tokens. Category tokens are regex-escaped so
/// they match as case-insensitive literals, never as patterns. An empty
/// filter translates to the match-all document `{}`.
///
/// Must select exactly the documents [`ProductFilter::matches`] accepts.
pub fn filter_document(filter: &ProductFilter) -> Document {
    let mut clauses: Vec<Document> = Vec::new();

    if !filter.ratings.is_empty() {
        clauses.push(doc! { "rating": { "$in": filter.ratings.clone() } });
    }

    if !filter.categories.is_empty() {
        let tokens: Vec<Document> = filter
            .categories
            .iter()
            .map(|token| {
                doc! { "category": { "$regex": regex::escape(token), "$options": "i" } }
            })
            .collect();
        clauses.push(doc! { "$or": tokens });
    }

    if !filter.price_ranges.is_empty() {
        let ranges: Vec<Document> = filter
            .price_ranges
            .iter()
            .map(|range| doc! { "price": { "$gte": range.min, "$lte": range.max } })
            .collect();
        clauses.push(doc! { "$or": ranges });
    }

    if clauses.is_empty() {
        doc! {}
    } else {
        doc! { "$and": clauses }
    }
}

// ---------------------------------------------------------------------------
// MongoUserStore
// ---------------------------------------------------------------------------

/// User store backed by the `users` collection.
#[derive(Clone, Debug)]
pub struct MongoUserStore {
    database: Database,
}

impl MongoUserStore {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    fn collection(&self) -> mongodb::Collection<Document> {
        self.database.collection(USERS_COLLECTION)
    }

    /// Create the unique index on `email`.
    ///
    /// This is the authoritative guard against duplicate registrations;
    /// the application-level existence check is only a fast path. This
    /// method is idempotent — safe to call on every startup.
    pub async fn ensure_indexes(&self) -> StoreResult<()> {
        let options = IndexOptions::builder().unique(true).build();
        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(options)
            .build();

        self.collection()
            .create_index(index)
            .await
            .map_err(store_error)?;

        Ok(())
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let doc = self
            .collection()
            .find_one(doc! { "email": email })
            .await
            .map_err(store_error)?;

        match doc {
            Some(d) => Ok(Some(from_document(d)?)),
            None => Ok(None),
        }
    }

    async fn insert(&self, user: User) -> StoreResult<User> {
        let doc = to_document(&user)?;

        self.collection().insert_one(doc).await.map_err(|err| {
            if is_duplicate_key(&err) {
                StoreError::Duplicate { field: "email" }
            } else {
                store_error(err)
            }
        })?;

        Ok(user)
    }
}

// ---------------------------------------------------------------------------
// MongoProductStore
// ---------------------------------------------------------------------------

/// Product store backed by the `products` collection.
#[derive(Clone, Debug)]
pub struct MongoProductStore {
    database: Database,
}

impl MongoProductStore {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    fn collection(&self) -> mongodb::Collection<Document> {
        self.database.collection(PRODUCTS_COLLECTION)
    }

    async fn collect(
        cursor: mongodb::Cursor<Document>,
    ) -> StoreResult<Vec<Product>> {
        let docs: Vec<Document> = cursor.try_collect().await.map_err(store_error)?;
        docs.into_iter().map(from_document).collect()
    }
}

#[async_trait]
impl ProductStore for MongoProductStore {
    async fn find(&self, filter: &ProductFilter) -> StoreResult<Vec<Product>> {
        let cursor = self
            .collection()
            .find(filter_document(filter))
            .await
            .map_err(store_error)?;

        Self::collect(cursor).await
    }

    async fn get(&self, id: &Uuid) -> StoreResult<Option<Product>> {
        let doc = self
            .collection()
            .find_one(doc! { "_id": uuid_bson(id) })
            .await
            .map_err(store_error)?;

        match doc {
            Some(d) => Ok(Some(from_document(d)?)),
            None => Ok(None),
        }
    }

    async fn find_flash_sale(&self) -> StoreResult<Vec<Product>> {
        let cursor = self
            .collection()
            .find(doc! { "flashSale": true })
            .sort(doc! { "createdAt": 1 })
            .await
            .map_err(store_error)?;

        Self::collect(cursor).await
    }

    async fn find_trending(&self, limit: i64) -> StoreResult<Vec<Product>> {
        let cursor = self
            .collection()
            .find(doc! {})
            .sort(doc! { "rating": -1 })
            .limit(limit)
            .await
            .map_err(store_error)?;

        Self::collect(cursor).await
    }

    async fn insert(&self, product: Product) -> StoreResult<Product> {
        let doc = to_document(&product)?;
        let id = uuid_bson(&product.id);

        self.collection()
            .insert_one(doc)
            .await
            .map_err(store_error)?;

        // Read back the stored version so the response reflects exactly
        // what the collection holds.
        let stored = self
            .collection()
            .find_one(doc! { "_id": id })
            .await
            .map_err(store_error)?
            .ok_or_else(|| StoreError::Query {
                message: "Product not found after insert".to_string(),
            })?;

        from_document(stored)
    }

    async fn upsert(&self, id: &Uuid, product: Product) -> StoreResult<UpsertReport> {
        let mut doc = to_document(&product)?;
        // The id comes from the query; `$set` must not touch `_id`.
        doc.remove("_id");

        let result = self
            .collection()
            .update_one(doc! { "_id": uuid_bson(id) }, doc! { "$set": doc })
            .upsert(true)
            .await
            .map_err(store_error)?;

        let upserted_id = match result.upserted_id {
            Some(Bson::String(s)) => Uuid::parse_str(&s).ok(),
            _ => None,
        };

        Ok(UpsertReport {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_id,
        })
    }

    async fn delete(&self, id: &Uuid) -> StoreResult<bool> {
        let result = self
            .collection()
            .delete_one(doc! { "_id": uuid_bson(id) })
            .await
            .map_err(store_error)?;

        Ok(result.deleted_count > 0)
    }
}
