//! Orders

use std::fmt;

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    cart::CartLedger,
    checkout::{CheckoutError, CheckoutSelection, CheckoutSummary},
    products::{ProductId, UnitKind},
    settings::ShopSettings,
};

/// One item of an order creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItemRequest {
    /// Ordered product
    pub product_id: ProductId,

    /// Number of units
    pub quantity: u32,

    /// Unit kind the product is bought by
    pub price_type: UnitKind,

    /// Gram amount, only for gram lines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_grams: Option<u32>,
}

/// Order creation request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Delivery method name
    pub delivery_method: String,

    /// Delivery district name
    pub delivery_district: String,

    /// Delivery interval label
    pub delivery_interval: String,

    /// Urgent delivery requested
    pub is_urgent: bool,

    /// Payment method name
    pub payment_method: String,

    /// Free-text delivery address
    pub address: String,

    /// Free-text comment
    pub comment: String,

    /// Promo code as typed by the customer
    pub promo_code: String,

    /// Ordered items
    pub items: Vec<OrderItemRequest>,
}

impl OrderRequest {
    /// Build the request for the current cart and checkout choices.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::EmptyCart`]: there is nothing to order.
    /// - [`CheckoutError::BelowMinimum`]: the item subtotal is under the shop minimum.
    pub fn from_checkout(
        cart: &CartLedger,
        selection: &CheckoutSelection,
        settings: &ShopSettings,
    ) -> Result<Self, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        CheckoutSummary::for_cart(cart, settings, selection).ensure_submittable()?;

        let delivery_method = selection
            .delivery_method
            .and_then(|id| settings.delivery_method(id))
            .map(|method| method.name.clone())
            .unwrap_or_default();

        Ok(Self {
            delivery_method,
            delivery_district: selection.district.clone(),
            delivery_interval: selection.interval.clone(),
            is_urgent: selection.urgent,
            payment_method: selection.payment_method.clone(),
            address: selection.address.clone(),
            comment: selection.comment.clone(),
            promo_code: selection.promo_code.clone(),
            items: cart.order_items(),
        })
    }
}

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Just placed
    New,
    /// Accepted by the shop
    Confirmed,
    /// Being picked
    Preparing,
    /// Out for delivery
    Delivering,
    /// Delivered
    Completed,
    /// Cancelled
    Cancelled,
}

impl OrderStatus {
    /// Customer-facing label.
    pub const fn label(self) -> &'static str {
        match self {
            OrderStatus::New => "Новый",
            OrderStatus::Confirmed => "Подтвержден",
            OrderStatus::Preparing => "Собирается",
            OrderStatus::Delivering => "Доставляется",
            OrderStatus::Completed => "Завершен",
            OrderStatus::Cancelled => "Отменен",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Priced line of a placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Identifier
    pub id: u64,

    /// Product, if it still exists
    pub product: Option<ProductId>,

    /// Product name at the time of ordering
    pub product_name: String,

    /// Ordered quantity
    pub quantity: Decimal,

    /// Unit kind
    pub price_type: UnitKind,

    /// Unit price charged
    pub price: Decimal,

    /// Line total
    pub subtotal: Decimal,
}

/// Order as returned by the order service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Identifier
    pub id: u64,

    /// Current status
    pub status: OrderStatus,

    /// Delivery method name
    #[serde(default)]
    pub delivery_method: String,

    /// Delivery district name
    #[serde(default)]
    pub delivery_district: String,

    /// Delivery interval label
    #[serde(default)]
    pub delivery_interval: String,

    /// Payment method name
    #[serde(default)]
    pub payment_method: String,

    /// Customer comment
    #[serde(default)]
    pub comment: String,

    /// Promo code
    #[serde(default)]
    pub promo_code: String,

    /// Order total charged by the service
    pub total: Decimal,

    /// Order lines
    #[serde(default)]
    pub items: Vec<OrderLine>,

    /// Creation time
    pub created_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        products::Product,
        settings::{DeliveryMethod, PaymentMethod},
    };

    use super::*;

    fn settings() -> ShopSettings {
        ShopSettings {
            min_order_sum: Decimal::from(300),
            delivery_methods: vec![DeliveryMethod {
                id: 3,
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
        let apples = Product::new(ProductId::new(1), "Яблоки")
            .with_price(UnitKind::Kg, Decimal::from(120));
        let mut cart = CartLedger::new();
        let key = cart.add(&apples, UnitKind::Kg, None);
        cart.set_quantity(&key, 3);
        cart
    }

    #[test]
    fn from_checkout_resolves_delivery_method_name() -> TestResult {
        let settings = settings();
        let mut selection = CheckoutSelection::from_settings(&settings);
        selection.district = "Центральный".to_string();
        selection.urgent = true;

        let request = OrderRequest::from_checkout(&cart(), &selection, &settings)?;

        assert_eq!(request.delivery_method, "Курьер");
        assert_eq!(request.payment_method, "Картой");
        assert_eq!(request.delivery_district, "Центральный");
        assert!(request.is_urgent);
        assert_eq!(request.items.len(), 1);

        Ok(())
    }

    #[test]
    fn from_checkout_refuses_empty_cart() {
        let settings = settings();
        let selection = CheckoutSelection::from_settings(&settings);

        assert_eq!(
            OrderRequest::from_checkout(&CartLedger::new(), &selection, &settings),
            Err(CheckoutError::EmptyCart)
        );
    }

    #[test]
    fn from_checkout_refuses_below_minimum() {
        let mut settings = settings();
        settings.min_order_sum = Decimal::from(1000);
        let selection = CheckoutSelection::from_settings(&settings);

        assert_eq!(
            OrderRequest::from_checkout(&cart(), &selection, &settings),
            Err(CheckoutError::BelowMinimum {
                minimum: Decimal::from(1000)
            })
        );
    }

    #[test]
    fn deserializes_created_order() -> TestResult {
        let json = r#"{
            "id": 41,
            "user": 5,
            "user_display_name": "Анна",
            "status": "new",
            "delivery_method": "Курьер",
            "delivery_district": "",
            "delivery_interval": "9:00 - 15:00",
            "payment_method": "Картой",
            "comment": "",
            "promo_code": "",
            "total": "360.00",
            "items": [{
                "id": 90,
                "product": 1,
                "product_name": "Яблоки",
                "quantity": "3.00",
                "price_type": "kg",
                "price": "120.00",
                "subtotal": "360.00"
            }],
            "created_at": "2026-03-01T09:15:00.123456+03:00",
            "updated_at": "2026-03-01T09:15:00.123456+03:00"
        }"#;

        let order: Order = serde_json::from_str(json)?;

        assert_eq!(order.status, OrderStatus::New);
        assert_eq!(order.status.label(), "Новый");
        assert_eq!(order.total, Decimal::from(360));
        assert_eq!(
            order.items.first().map(|line| line.price_type),
            Some(UnitKind::Kg)
        );

        Ok(())
    }
}
