//! Checkout
//!
//! Delivery, urgency and minimum-order rules derived from the cart subtotal and
//! the shop settings. Everything here is recomputed on read.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    cart::CartLedger,
    pricing::format_rubles,
    settings::{DeliveryMethod, ShopSettings},
};

/// Reasons an order cannot be submitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// The cart has no lines.
    #[error("Корзина пуста")]
    EmptyCart,

    /// The item subtotal is under the shop minimum.
    #[error("Минимальная сумма заказа: {}", format_rubles(.minimum))]
    BelowMinimum {
        /// Configured minimum order sum
        minimum: Decimal,
    },
}

/// Customer choices on the checkout screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutSelection {
    /// Selected delivery method id
    pub delivery_method: Option<u64>,

    /// Selected district name
    pub district: String,

    /// Selected delivery interval label
    pub interval: String,

    /// Urgent delivery requested
    pub urgent: bool,

    /// Selected payment method name
    pub payment_method: String,

    /// Free-text delivery address
    pub address: String,

    /// Free-text comment
    pub comment: String,

    /// Promo code
    pub promo_code: String,
}

impl CheckoutSelection {
    /// Preselect the first delivery method and the first payment method.
    pub fn from_settings(settings: &ShopSettings) -> Self {
        Self {
            delivery_method: settings.delivery_methods.first().map(|method| method.id),
            payment_method: settings
                .payment_methods
                .first()
                .map(|method| method.name.clone())
                .unwrap_or_default(),
            ..Self::default()
        }
    }
}

/// Derived checkout totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutSummary {
    /// Item subtotal
    pub items_total: Decimal,

    /// Delivery is waived because the subtotal reached the threshold
    pub is_free_delivery: bool,

    /// Delivery fee actually charged
    pub delivery_price: Decimal,

    /// Urgency surcharge actually charged
    pub urgency_cost: Decimal,

    /// Subtotal plus delivery and urgency
    pub grand_total: Decimal,

    /// The subtotal is under the shop minimum
    pub below_minimum: bool,

    /// Configured minimum order sum
    pub minimum_order: Decimal,

    /// Configured free-delivery threshold
    pub free_delivery_threshold: Decimal,
}

impl CheckoutSummary {
    /// Derive checkout totals from an item subtotal.
    ///
    /// The minimum order is checked against `items_total` alone; delivery and
    /// urgency charges never count towards it.
    pub fn calculate(
        items_total: Decimal,
        settings: &ShopSettings,
        selection: &CheckoutSelection,
    ) -> Self {
        let threshold = settings.free_delivery_threshold;
        let is_free_delivery = threshold > Decimal::ZERO && items_total >= threshold;

        let delivery_price = if is_free_delivery {
            Decimal::ZERO
        } else {
            selection
                .delivery_method
                .and_then(|id| settings.delivery_method(id))
                .map_or(Decimal::ZERO, |method| method.price)
        };

        let urgency_cost = if selection.urgent {
            settings.urgency_surcharge
        } else {
            Decimal::ZERO
        };

        let grand_total = items_total + delivery_price + urgency_cost;

        let minimum = settings.min_order_sum;
        let below_minimum = minimum > Decimal::ZERO && items_total < minimum;

        Self {
            items_total,
            is_free_delivery,
            delivery_price,
            urgency_cost,
            grand_total,
            below_minimum,
            minimum_order: minimum,
            free_delivery_threshold: threshold,
        }
    }

    /// Derive checkout totals for a cart.
    pub fn for_cart(
        cart: &CartLedger,
        settings: &ShopSettings,
        selection: &CheckoutSelection,
    ) -> Self {
        Self::calculate(cart.total_price(), settings, selection)
    }

    /// Check that the order may be submitted.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::BelowMinimum`] when the subtotal is under the minimum.
    pub fn ensure_submittable(&self) -> Result<(), CheckoutError> {
        if self.below_minimum {
            return Err(CheckoutError::BelowMinimum {
                minimum: self.minimum_order,
            });
        }

        Ok(())
    }

    /// Fee label shown next to a delivery method option.
    pub fn delivery_label(&self, method: &DeliveryMethod) -> String {
        if self.is_free_delivery || method.price <= Decimal::ZERO {
            "Бесплатно".to_string()
        } else {
            format_rubles(&method.price)
        }
    }
}
