//! Product catalog operations
//!
//! Thin pass-through over a [`ProductStore`]: the only logic here is
//! mapping store misses to `NotFound` and fixing the trending listing
//! size. Filter construction lives in [`crate::core::filter`].

use crate::core::error::{ApiError, ApiResult};
use crate::core::filter::ProductFilter;
use crate::core::product::Product;
use crate::core::store::{ProductStore, UpsertReport};
use std::sync::Arc;
use uuid::Uuid;

/// Number of products returned by the trending listing
pub const TRENDING_LIMIT: i64 = 6;

/// Catalog retrieval and mutation over a [`ProductStore`]
#[derive(Clone)]
pub struct CatalogService {
    products: Arc<dyn ProductStore>,
}

impl CatalogService {
    pub fn new(products: Arc<dyn ProductStore>) -> Self {
        Self { products }
    }

    /// List products accepted by the filter (all of them when it is empty)
    pub async fn list(&self, filter: &ProductFilter) -> ApiResult<Vec<Product>> {
        Ok(self.products.find(filter).await?)
    }

    /// Fetch a single product
    pub async fn get(&self, id: &Uuid) -> ApiResult<Product> {
        self.products
            .get(id)
            .await?
            .ok_or_else(|| ApiError::NotFound {
                resource: "product",
                id: id.to_string(),
            })
    }

    /// Flash-sale products, oldest first
    pub async fn flash_sale(&self) -> ApiResult<Vec<Product>> {
        Ok(self.products.find_flash_sale().await?)
    }

    /// The [`TRENDING_LIMIT`] highest-rated products
    pub async fn trending(&self) -> ApiResult<Vec<Product>> {
        Ok(self.products.find_trending(TRENDING_LIMIT).await?)
    }

    /// Insert a new product
    pub async fn add(&self, product: Product) -> ApiResult<Product> {
        Ok(self.products.insert(product).await?)
    }

    /// Replace the product under `id`, creating it when absent
    ///
    /// The path id wins over any id carried in the body.
    pub async fn upsert(&self, id: &Uuid, mut product: Product) -> ApiResult<UpsertReport> {
        product.id = *id;
        Ok(self.products.upsert(id, product).await?)
    }

    /// Delete a product; unknown ids are reported, not swallowed
    pub async fn delete(&self, id: &Uuid) -> ApiResult<()> {
        if self.products.delete(id).await? {
            Ok(())
        } else {
            Err(ApiError::NotFound {
                resource: "product",
                id: id.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::in_memory::InMemoryProductStore;

    fn service() -> CatalogService {
        CatalogService::new(Arc::new(InMemoryProductStore::new()))
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_not_found() {
        let catalog = service();
        let err = catalog.get(&Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_not_found() {
        let catalog = service();
        let err = catalog.delete(&Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_removes_the_product() {
        let catalog = service();
        let product = catalog.add(Product::new(4, "soap", 10.0)).await.unwrap();

        catalog.delete(&product.id).await.unwrap();
        assert!(catalog.get(&product.id).await.is_err());
    }

    #[tokio::test]
    async fn test_trending_returns_six_items_by_descending_rating() {
        let catalog = service();
        for rating in [1, 5, 3, 4, 2, 5, 4] {
            catalog
                .add(Product::new(rating, "soap", 10.0))
                .await
                .unwrap();
        }

        let trending = catalog.trending().await.unwrap();
        let ratings: Vec<i32> = trending.iter().map(|p| p.rating).collect();
        assert_eq!(ratings, vec![5, 5, 4, 4, 3, 2]);
    }

    #[tokio::test]
    async fn test_upsert_with_unknown_id_creates_under_that_id() {
        let catalog = service();
        let id = Uuid::new_v4();

        let report = catalog
            .upsert(&id, Product::new(3, "sponge", 2.0))
            .await
            .unwrap();

        assert_eq!(report.matched_count, 0);
        assert_eq!(report.upserted_id, Some(id));
        assert_eq!(catalog.get(&id).await.unwrap().category, "sponge");
    }

    #[tokio::test]
    async fn test_upsert_path_id_wins_over_body_id() {
        let catalog = service();
        let stored = catalog.add(Product::new(1, "soap", 1.0)).await.unwrap();

        // Body carries a different id; the path id must be preserved.
        let body = Product::new(2, "detergent", 5.0);
        let report = catalog.upsert(&stored.id, body).await.unwrap();

        assert_eq!(report.matched_count, 1);
        let updated = catalog.get(&stored.id).await.unwrap();
        assert_eq!(updated.category, "detergent");
        assert_eq!(updated.id, stored.id);
    }
}
