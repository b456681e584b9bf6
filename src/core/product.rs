//! Product document model
//!
//! Products are schema-less beyond a small set of known fields: `rating`,
//! `category` and `price` are required and type-checked on the way in,
//! `flashSale` and `createdAt` default when absent, and anything else the
//! client sends is captured untouched in an extension bag and round-tripped
//! on the way out.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// A catalog product
///
/// Wire and storage field names follow the public API (`flashSale`,
/// `createdAt`); the id maps to Mongo's `_id` at the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Generated when the client does not supply one
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    /// Integer score used by the trending listing
    pub rating: i32,

    /// Free-text label, matched case-insensitively by filters
    pub category: String,

    pub price: f64,

    /// Flags the product for the time-limited promotional listing
    #[serde(rename = "flashSale", default)]
    pub flash_sale: bool,

    /// Orders the flash-sale listing (ascending)
    #[serde(rename = "createdAt", default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    /// Open extension bag for any additional client-supplied fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    /// Construct a product with defaults for the optional fields
    pub fn new(rating: i32, category: impl Into<String>, price: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            rating,
            category: category.into(),
            price,
            flash_sale: false,
            created_at: Utc::now(),
            extra: Map::new(),
        }
    }
}
