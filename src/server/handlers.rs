//! HTTP handlers
//!
//! Thin request/response adapters: deserialize the input, call the
//! service, wrap the result in the `{success, message, ...}` envelope.
//! All failures propagate as [`ApiError`] and serialize through its
//! `IntoResponse` impl.

use crate::auth::{AuthService, LoginRequest, RegisterRequest};
use crate::catalog::CatalogService;
use crate::core::error::{ApiError, ApiResult};
use crate::core::filter::{CatalogQuery, ProductFilter};
use crate::core::product::Product;
use crate::core::response::{ApiResponse, ServerStatus};
use crate::core::store::UpsertReport;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Serialize;
use uuid::Uuid;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub catalog: CatalogService,
}

impl AppState {
    pub fn new(auth: AuthService, catalog: CatalogService) -> Self {
        Self { auth, catalog }
    }
}

/// Response for a successful login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
}

/// Response for the upsert endpoint
#[derive(Debug, Serialize)]
pub struct UpsertResponse {
    pub success: bool,
    pub message: String,
    pub result: UpsertReport,
}

/// Path segments arrive as strings; ids are UUIDs underneath.
fn parse_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::InvalidId {
        value: raw.to_string(),
    })
}

/// GET /
pub async fn server_status() -> Json<ServerStatus> {
    Json(ServerStatus::now())
}

/// POST /api/v1/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse>)> {
    state.auth.register(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("User registered successfully")),
    ))
}

/// POST /api/v1/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let token = state.auth.login(request).await?;

    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful".to_string(),
        token,
    }))
}

/// GET /dishWashing-items
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> ApiResult<Json<ApiResponse<Vec<Product>>>> {
    let filter = ProductFilter::from_query(&query)?;
    let products = state.catalog.list(&filter).await?;

    Ok(Json(ApiResponse::with_data(
        "Products fetched successfully",
        products,
    )))
}

/// GET /dishWashing-items/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Product>>> {
    let id = parse_id(&id)?;
    let product = state.catalog.get(&id).await?;

    Ok(Json(ApiResponse::with_data(
        "Product fetched successfully",
        product,
    )))
}

/// GET /flash-sale
pub async fn flash_sale(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<Product>>>> {
    let products = state.catalog.flash_sale().await?;

    Ok(Json(ApiResponse::with_data(
        "Flash sale fetched successfully",
        products,
    )))
}

/// GET /trending-product
pub async fn trending(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<Product>>>> {
    let products = state.catalog.trending().await?;

    Ok(Json(ApiResponse::with_data(
        "Trending products fetched successfully",
        products,
    )))
}

/// POST /addProduct
pub async fn add_product(
    State(state): State<AppState>,
    Json(product): Json<Product>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Product>>)> {
    let created = state.catalog.add(product).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_data("Product created", created)),
    ))
}

/// PUT /product/{id}
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(product): Json<Product>,
) -> ApiResult<Json<UpsertResponse>> {
    let id = parse_id(&id)?;
    let result = state.catalog.upsert(&id, product).await?;

    Ok(Json(UpsertResponse {
        success: true,
        message: "Product updated".to_string(),
        result,
    }))
}

/// DELETE /product/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse>> {
    let id = parse_id(&id)?;
    state.catalog.delete(&id).await?;

    Ok(Json(ApiResponse::ok("Product deleted")))
}
