//! # CleanHub Backend
//!
//! A minimal e-commerce backend exposing user registration/login and a
//! filterable product catalog over HTTP, backed by MongoDB.
//!
//! ## Architecture
//!
//! - **Core**: the product/user data model, the catalog filter builder,
//!   the store traits, and the typed error hierarchy
//! - **Auth**: bcrypt password hashing, credential verification, JWT
//!   issuance
//! - **Catalog**: pass-through CRUD plus the flash-sale and trending
//!   listings
//! - **Storage**: MongoDB stores for production, in-memory stores for
//!   tests and development
//! - **Server**: axum handlers and router
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cleanhub::prelude::*;
//!
//! let users: Arc<dyn UserStore> = Arc::new(InMemoryUserStore::new());
//! let products: Arc<dyn ProductStore> = Arc::new(InMemoryProductStore::new());
//!
//! let auth = AuthService::new(users, TokenIssuer::new("secret", Duration::hours(24)));
//! let catalog = CatalogService::new(products);
//!
//! let app = build_router(AppState::new(auth, catalog));
//! // axum::serve(listener, app).await?;
//! ```

pub mod auth;
pub mod catalog;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::{ApiError, ApiResult, AuthError, ConfigError, FilterError, StoreError},
        filter::{CatalogQuery, PriceRange, ProductFilter},
        product::Product,
        response::{ApiResponse, ServerStatus},
        store::{ProductStore, StoreResult, UpsertReport, UserStore},
        user::{Role, User},
    };

    // === Services ===
    pub use crate::auth::{AuthService, Claims, LoginRequest, RegisterRequest, TokenIssuer};
    pub use crate::catalog::{CatalogService, TRENDING_LIMIT};

    // === Storage ===
    pub use crate::storage::{
        InMemoryProductStore, InMemoryUserStore, MongoProductStore, MongoUserStore,
    };

    // === Config ===
    pub use crate::config::AppConfig;

    // === Server ===
    pub use crate::server::{AppState, build_router};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Duration, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;
    pub use uuid::Uuid;
}
