//! Checkout submission.

use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tracing::{error, info, warn};

use gryadka::{
    cart::CartLedger,
    checkout::{CheckoutError, CheckoutSelection},
    orders::{Order, OrderRequest},
    settings::ShopSettings,
};

use crate::api::{ApiError, StorefrontApi};

/// Message shown when the server gives no reason for a failed order.
pub const ORDER_FAILED_MESSAGE: &str = "Ошибка при оформлении заказа";

/// Reasons an order submission did not produce an order.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Another submission is still waiting for the server.
    #[error("order submission already in progress")]
    AlreadySubmitting,

    /// The cart cannot be checked out.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// The order service refused the order or could not be reached.
    #[error("{message}")]
    Rejected {
        /// Customer-facing reason
        message: String,

        /// Underlying API failure
        #[source]
        source: ApiError,
    },
}

impl From<ApiError> for SubmitError {
    fn from(source: ApiError) -> Self {
        let message = source
            .server_message()
            .unwrap_or(ORDER_FAILED_MESSAGE)
            .to_string();

        SubmitError::Rejected { message, source }
    }
}

/// Places orders through a [`StorefrontApi`], allowing one submission at a time.
#[derive(Debug)]
pub struct CheckoutService<A> {
    api: A,
    submitting: AtomicBool,
}

impl<A: StorefrontApi> CheckoutService<A> {
    /// Create a service backed by `api`.
    pub fn new(api: A) -> Self {
        Self {
            api,
            submitting: AtomicBool::new(false),
        }
    }

    /// Underlying API client.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Check if a submission is waiting for the server.
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    /// Fetch shop settings, falling back to the defaults when they are unavailable.
    pub async fn load_settings(&self) -> ShopSettings {
        match self.api.settings().await {
            Ok(settings) => settings,
            Err(error) => {
                error!(%error, "failed to load shop settings, using defaults");

                ShopSettings::default()
            }
        }
    }

    /// Validate the cart, submit it and clear it once the order is created.
    ///
    /// The cart is left untouched when the order is not placed.
    ///
    /// # Errors
    ///
    /// - [`SubmitError::Checkout`]: the cart is empty or below the minimum order sum.
    /// - [`SubmitError::AlreadySubmitting`]: another submission is in flight.
    /// - [`SubmitError::Rejected`]: the order service did not accept the order.
    pub async fn place_order(
        &self,
        cart: &mut CartLedger,
        selection: &CheckoutSelection,
        settings: &ShopSettings,
    ) -> Result<Order, SubmitError> {
        let request = OrderRequest::from_checkout(cart, selection, settings)?;

        let order = self.submit(&request).await?;

        cart.clear();

        Ok(order)
    }

    /// Send an order request, refusing to start while another is in flight.
    ///
    /// # Errors
    ///
    /// - [`SubmitError::AlreadySubmitting`]: another submission is in flight.
    /// - [`SubmitError::Rejected`]: the order service did not accept the order.
    pub async fn submit(&self, request: &OrderRequest) -> Result<Order, SubmitError> {
        let Some(_in_flight) = InFlight::acquire(&self.submitting) else {
            warn!("order submission ignored, another one is in flight");

            return Err(SubmitError::AlreadySubmitting);
        };

        match self.api.create_order(request).await {
            Ok(order) => {
                info!(order = order.id, total = %order.total, "order placed");

                Ok(order)
            }
            Err(error) => {
                warn!(%error, "order submission failed");

                Err(error.into())
            }
        }
    }
}

/// Holds the in-flight flag; releases it when dropped, including when the
/// submitting future is cancelled.
#[derive(Debug)]
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use httpmock::prelude::*;
    use reqwest::StatusCode;
    use rust_decimal::Decimal;
    use serde_json::json;
    use testresult::TestResult;

    use gryadka::{
        products::{Product, ProductId, UnitKind},
        settings::{DeliveryMethod, PaymentMethod},
    };

    use crate::{
        api::{HttpStorefrontApi, MockStorefrontApi},
        config::ApiConfig,
    };

    use super::*;

    fn settings() -> ShopSettings {
        ShopSettings {
            min_order_sum: Decimal::from(300),
            delivery_methods: vec![DeliveryMethod {
                id: 1,
                name: "Курьер".to_string(),
                price: Decimal::from(250),
                is_active: true,
                sort_order: 0,
            }],
            payment_methods: vec![PaymentMethod {
                id: 1,
                name: "Картой".to_string(),
                is_active: true,
                sort_order: 0,
            }],
            ..ShopSettings::default()
        }
    }

    fn cart() -> CartLedger {
        let walnuts = Product::new(ProductId::new(3), "Грецкий орех")
            .with_price(UnitKind::Gram, Decimal::from(80))
            .with_available_grams("250,500");

        let mut cart = CartLedger::new();
        let key = cart.add(&walnuts, UnitKind::Gram, Some(500));
        cart.set_quantity(&key, 2);
        cart
    }

    fn order_json(id: u64) -> serde_json::Value {
        json!({
            "id": id,
            "status": "new",
            "delivery_method": "Курьер",
            "payment_method": "Картой",
            "total": "1050.00",
            "items": [],
            "created_at": "2026-03-01T09:15:00Z"
        })
    }

    fn order(id: u64) -> TestResult<Order> {
        Ok(serde_json::from_value(order_json(id))?)
    }

    #[tokio::test]
    async fn settings_failure_falls_back_to_defaults() {
        let mut api = MockStorefrontApi::new();

        api.expect_settings().once().returning(|| {
            Err(ApiError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: None,
            })
        });

        let settings = CheckoutService::new(api).load_settings().await;

        assert_eq!(settings, ShopSettings::default());
        assert_eq!(settings.free_delivery_threshold, Decimal::from(5000));
    }

    #[tokio::test]
    async fn placed_order_clears_cart() -> TestResult {
        let expected = order(11)?;
        let mut api = MockStorefrontApi::new();

        api.expect_create_order()
            .once()
            .withf(|request| {
                request.delivery_method == "Курьер"
                    && request.items.len() == 1
                    && request
                        .items
                        .first()
                        .is_some_and(|item| item.selected_grams == Some(500))
            })
            .return_once(move |_| Ok(expected));

        let service = CheckoutService::new(api);
        let settings = settings();
        let mut cart = cart();

        let placed = service
            .place_order(&mut cart, &CheckoutSelection::from_settings(&settings), &settings)
            .await?;

        assert_eq!(placed.id, 11);
        assert!(cart.is_empty());
        assert!(!service.is_submitting());

        Ok(())
    }

    #[tokio::test]
    async fn rejected_order_keeps_cart_and_server_message() -> TestResult {
        let mut api = MockStorefrontApi::new();

        api.expect_create_order().once().returning(|_| {
            Err(ApiError::Status {
                status: StatusCode::BAD_REQUEST,
                message: Some("Промокод недействителен".to_string()),
            })
        });

        let service = CheckoutService::new(api);
        let settings = settings();
        let mut cart = cart();

        let result = service
            .place_order(&mut cart, &CheckoutSelection::from_settings(&settings), &settings)
            .await;

        assert!(
            matches!(&result, Err(SubmitError::Rejected { message, .. }) if message == "Промокод недействителен")
        );
        assert_eq!(cart.len(), 1);
        assert!(!service.is_submitting());

        Ok(())
    }

    #[tokio::test]
    async fn rejection_without_reason_uses_generic_message() {
        let mut api = MockStorefrontApi::new();

        api.expect_create_order().once().returning(|_| {
            Err(ApiError::Status {
                status: StatusCode::BAD_GATEWAY,
                message: None,
            })
        });

        let service = CheckoutService::new(api);
        let settings = settings();

        let result = service
            .place_order(&mut cart(), &CheckoutSelection::from_settings(&settings), &settings)
            .await;

        let message = result.err().map(|error| error.to_string());

        assert_eq!(message.as_deref(), Some(ORDER_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn below_minimum_never_reaches_the_server() {
        let mut api = MockStorefrontApi::new();

        api.expect_create_order().never();

        let service = CheckoutService::new(api);
        let mut settings = settings();
        settings.min_order_sum = Decimal::from(1000);

        let result = service
            .place_order(&mut cart(), &CheckoutSelection::from_settings(&settings), &settings)
            .await;

        assert!(matches!(
            result,
            Err(SubmitError::Checkout(CheckoutError::BelowMinimum { .. }))
        ));
    }

    #[tokio::test]
    async fn second_submission_is_refused_while_first_is_in_flight() -> TestResult {
        let server = MockServer::start_async().await;

        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/orders/");
                then.status(201)
                    .json_body(order_json(12))
                    .delay(Duration::from_millis(300));
            })
            .await;

        let service = CheckoutService::new(HttpStorefrontApi::new(&ApiConfig::new(
            server.base_url(),
        ))?);
        let settings = settings();
        let request =
            OrderRequest::from_checkout(&cart(), &CheckoutSelection::from_settings(&settings), &settings)?;

        let (first, second) = tokio::join!(service.submit(&request), service.submit(&request));

        assert_eq!(first?.id, 12);
        assert!(matches!(second, Err(SubmitError::AlreadySubmitting)));
        assert_eq!(mock.hits_async().await, 1);
        assert!(!service.is_submitting());

        Ok(())
    }

    #[tokio::test]
    async fn abandoned_submission_releases_the_flag() -> TestResult {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(POST).path("/orders/");
                then.status(201)
                    .json_body(order_json(13))
                    .delay(Duration::from_millis(500));
            })
            .await;

        let service = CheckoutService::new(HttpStorefrontApi::new(&ApiConfig::new(
            server.base_url(),
        ))?);
        let settings = settings();
        let request =
            OrderRequest::from_checkout(&cart(), &CheckoutSelection::from_settings(&settings), &settings)?;

        let abandoned = tokio::time::timeout(Duration::from_millis(50), service.submit(&request)).await;

        assert!(abandoned.is_err(), "submission should have timed out");
        assert!(!service.is_submitting());

        let retried = service.submit(&request).await?;

        assert_eq!(retried.id, 13);
        assert!(!service.is_submitting());

        Ok(())
    }
}
