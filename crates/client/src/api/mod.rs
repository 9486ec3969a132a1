//! Storefront API
//!
//! The [`StorefrontApi`] trait is the seam between checkout logic and the
//! backend; [`HttpStorefrontApi`] is the reqwest implementation.

use async_trait::async_trait;
use mockall::automock;
use serde::{Deserialize, Serialize};

use gryadka::{
    orders::{Order, OrderRequest},
    products::{Product, ProductId, ProductTag},
    settings::ShopSettings,
};

mod errors;
mod http;

pub use errors::ApiError;
pub use http::HttpStorefrontApi;

/// Catalog listing filters. Unset filters are left out of the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductQuery {
    /// Category id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<u64>,

    /// Merchandising badge
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<ProductTag>,

    /// Free-text search
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,

    /// Only products that can be added to the cart
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
}

/// Catalog category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Identifier
    pub id: u64,

    /// Display name
    pub name: String,

    /// Image URL
    #[serde(default)]
    pub image: Option<String>,

    /// Display position
    #[serde(default)]
    pub sort_order: i32,

    /// Whether the category is shown
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

fn active_by_default() -> bool {
    true
}

/// Storefront backend operations used by the client.
#[automock]
#[async_trait]
pub trait StorefrontApi: Send + Sync {
    /// List catalog products matching `query`.
    async fn products(&self, query: &ProductQuery) -> Result<Vec<Product>, ApiError>;

    /// Fetch a single product.
    async fn product(&self, id: ProductId) -> Result<Product, ApiError>;

    /// List catalog categories.
    async fn categories(&self) -> Result<Vec<Category>, ApiError>;

    /// Fetch the shop checkout settings.
    async fn settings(&self) -> Result<ShopSettings, ApiError>;

    /// Place an order.
    async fn create_order(&self, request: &OrderRequest) -> Result<Order, ApiError>;

    /// List the current user's orders, newest first.
    async fn orders(&self) -> Result<Vec<Order>, ApiError>;

    /// Fetch one of the current user's orders.
    async fn order(&self, id: u64) -> Result<Order, ApiError>;
}
