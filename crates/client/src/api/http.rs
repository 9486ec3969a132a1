//! reqwest-backed storefront client.

use async_trait::async_trait;
use reqwest::{
    Client, RequestBuilder, Response,
    header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue},
};
use serde::{Deserialize, de::DeserializeOwned};
use tracing::{debug, warn};

use gryadka::{
    orders::{Order, OrderRequest},
    products::{Product, ProductId},
    settings::ShopSettings,
};

use crate::{
    api::{ApiError, Category, ProductQuery, StorefrontApi},
    config::ApiConfig,
};

const DEV_USER_HEADER: &str = "x-dev-user-id";

/// HTTP client for the storefront REST API.
#[derive(Debug, Clone)]
pub struct HttpStorefrontApi {
    base_url: String,
    http: Client,
}

impl HttpStorefrontApi {
    /// Create a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the init data is not a valid header value or the
    /// HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();

        if let Some(init_data) = &config.init_data {
            let mut value = HeaderValue::from_str(init_data)?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        if let Some(user_id) = config.dev_user_id {
            headers.insert(
                HeaderName::from_static(DEV_USER_HEADER),
                HeaderValue::from(user_id),
            );
        }

        let http = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;

        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();

        debug!(%status, url = %response.url(), "storefront api response");

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .and_then(|body| body.error);

            warn!(%status, ?message, "storefront api request failed");

            return Err(ApiError::Status { status, message });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl StorefrontApi for HttpStorefrontApi {
    async fn products(&self, query: &ProductQuery) -> Result<Vec<Product>, ApiError> {
        Self::send(self.http.get(self.url("/products/")).query(query)).await
    }

    async fn product(&self, id: ProductId) -> Result<Product, ApiError> {
        Self::send(self.http.get(self.url(&format!("/products/{id}/")))).await
    }

    async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        Self::send(self.http.get(self.url("/categories/"))).await
    }

    async fn settings(&self) -> Result<ShopSettings, ApiError> {
        Self::send(self.http.get(self.url("/settings/"))).await
    }

    async fn create_order(&self, request: &OrderRequest) -> Result<Order, ApiError> {
        Self::send(self.http.post(self.url("/orders/")).json(request)).await
    }

    async fn orders(&self) -> Result<Vec<Order>, ApiError> {
        Self::send(self.http.get(self.url("/orders/"))).await
    }

    async fn order(&self, id: u64) -> Result<Order, ApiError> {
        Self::send(self.http.get(self.url(&format!("/orders/{id}/")))).await
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}
