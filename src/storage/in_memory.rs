//! In-memory store implementations for testing and development
//!
//! Mirrors the MongoDB stores' observable behavior: email uniqueness,
//! filter semantics (via [`ProductFilter::matches`]), and the flash-sale
//! and trending sort orders. Uses RwLock for thread-safe access.

use crate::core::error::StoreError;
use crate::core::filter::ProductFilter;
use crate::core::product::Product;
use crate::core::store::{ProductStore, StoreResult, UpsertReport, UserStore};
use crate::core::user::User;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use uuid::Uuid;

fn lock_error<T>(err: PoisonError<T>) -> StoreError {
    StoreError::Query {
        message: format!("Failed to acquire lock: {}", err),
    }
}

// ---------------------------------------------------------------------------
// InMemoryUserStore
// ---------------------------------------------------------------------------

/// In-memory user store
#[derive(Clone, Default)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let users = self.users.read().map_err(lock_error)?;
        Ok(users.values().find(|user| user.email == email).cloned())
    }

    async fn insert(&self, user: User) -> StoreResult<User> {
        let mut users = self.users.write().map_err(lock_error)?;

        // Uniqueness check and insert under one write lock, like the
        // unique index on the MongoDB side.
        if users.values().any(|existing| existing.email == user.email) {
            return Err(StoreError::Duplicate { field: "email" });
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }
}

// ---------------------------------------------------------------------------
// InMemoryProductStore
// ---------------------------------------------------------------------------

/// In-memory product store
#[derive(Clone, Default)]
pub struct InMemoryProductStore {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn find(&self, filter: &ProductFilter) -> StoreResult<Vec<Product>> {
        let products = self.products.read().map_err(lock_error)?;
        Ok(products
            .values()
            .filter(|product| filter.matches(product))
            .cloned()
            .collect())
    }

    async fn get(&self, id: &Uuid) -> StoreResult<Option<Product>> {
        let products = self.products.read().map_err(lock_error)?;
        Ok(products.get(id).cloned())
    }

    async fn find_flash_sale(&self) -> StoreResult<Vec<Product>> {
        let products = self.products.read().map_err(lock_error)?;

        let mut items: Vec<Product> = products
            .values()
            .filter(|product| product.flash_sale)
            .cloned()
            .collect();
        items.sort_by_key(|product| product.created_at);

        Ok(items)
    }

    async fn find_trending(&self, limit: i64) -> StoreResult<Vec<Product>> {
        let products = self.products.read().map_err(lock_error)?;

        let mut items: Vec<Product> = products.values().cloned().collect();
        items.sort_by(|a, b| b.rating.cmp(&a.rating));
        items.truncate(limit.max(0) as usize);

        Ok(items)
    }

    async fn insert(&self, product: Product) -> StoreResult<Product> {
        let mut products = self.products.write().map_err(lock_error)?;
        products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn upsert(&self, id: &Uuid, product: Product) -> StoreResult<UpsertReport> {
        let mut products = self.products.write().map_err(lock_error)?;

        let existed = products.insert(*id, product).is_some();
        Ok(if existed {
            UpsertReport {
                matched_count: 1,
                modified_count: 1,
                upserted_id: None,
            }
        } else {
            UpsertReport {
                matched_count: 0,
                modified_count: 0,
                upserted_id: Some(*id),
            }
        })
    }

    async fn delete(&self, id: &Uuid) -> StoreResult<bool> {
        let mut products = self.products.write().map_err(lock_error)?;
        Ok(products.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn test_user_store_enforces_unique_email() {
        let store = InMemoryUserStore::new();
        store
            .insert(User::new("Alice", "alice@example.com", "hash-a".to_string()))
            .await
            .unwrap();

        let err = store
            .insert(User::new("Also Alice", "alice@example.com", "hash-b".to_string()))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Duplicate { field: "email" }));

        // Only the first record exists.
        let found = store.find_by_email("alice@example.com").await.unwrap();
        assert_eq!(found.unwrap().name, "Alice");
    }

    #[tokio::test]
    async fn test_find_by_email_miss_is_none() {
        let store = InMemoryUserStore::new();
        assert!(store.find_by_email("nobody@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_product_find_applies_filter() {
        let store = InMemoryProductStore::new();
        for (rating, category, price) in [(3, "soap", 5.0), (5, "sponge", 50.0)] {
            store
                .insert(Product::new(rating, category, price))
                .await
                .unwrap();
        }

        let filter = ProductFilter {
            ratings: vec![3],
            ..Default::default()
        };
        let found = store.find(&filter).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].category, "soap");
    }

    #[tokio::test]
    async fn test_flash_sale_sorted_by_created_at_ascending() {
        let store = InMemoryProductStore::new();
        let base = Utc::now();

        for (offset, category, flash_sale) in
            [(2, "newest", true), (0, "oldest", true), (1, "skipped", false)]
        {
            let mut product = Product::new(3, category, 1.0);
            product.flash_sale = flash_sale;
            product.created_at = base + Duration::seconds(offset);
            store.insert(product).await.unwrap();
        }

        let sale = store.find_flash_sale().await.unwrap();
        let categories: Vec<&str> = sale.iter().map(|p| p.category.as_str()).collect();
        assert_eq!(categories, vec!["oldest", "newest"]);
    }

    #[tokio::test]
    async fn test_trending_limits_and_sorts_descending() {
        let store = InMemoryProductStore::new();
        for rating in [1, 5, 3, 4, 2, 5, 4] {
            store.insert(Product::new(rating, "soap", 1.0)).await.unwrap();
        }

        let trending = store.find_trending(6).await.unwrap();
        let ratings: Vec<i32> = trending.iter().map(|p| p.rating).collect();
        assert_eq!(ratings, vec![5, 5, 4, 4, 3, 2]);
    }

    #[tokio::test]
    async fn test_upsert_replaces_existing() {
        let store = InMemoryProductStore::new();
        let product = store.insert(Product::new(1, "soap", 1.0)).await.unwrap();

        let mut replacement = Product::new(2, "detergent", 9.0);
        replacement.id = product.id;
        let report = store.upsert(&product.id, replacement).await.unwrap();

        assert_eq!(report.matched_count, 1);
        assert_eq!(report.upserted_id, None);
        assert_eq!(
            store.get(&product.id).await.unwrap().unwrap().category,
            "detergent"
        );
    }
}
