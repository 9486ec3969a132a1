//! Shop Settings

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Free-delivery threshold assumed when the shop has not configured one.
pub const DEFAULT_FREE_DELIVERY_THRESHOLD: Decimal = Decimal::from_parts(5000, 0, 0, false, 0);

/// Shop-wide checkout settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopSettings {
    /// Item subtotal below which orders are refused
    pub min_order_sum: Decimal,

    /// Item subtotal at or above which delivery is free
    pub free_delivery_threshold: Decimal,

    /// Flat surcharge for urgent delivery
    pub urgency_surcharge: Decimal,

    /// Delivery methods, each with its own price
    pub delivery_methods: Vec<DeliveryMethod>,

    /// Payment methods
    pub payment_methods: Vec<PaymentMethod>,

    /// Districts the shop delivers to
    pub delivery_districts: Vec<DeliveryDistrict>,

    /// Delivery time windows
    pub delivery_intervals: Vec<DeliveryInterval>,
}

impl Default for ShopSettings {
    fn default() -> Self {
        Self {
            min_order_sum: Decimal::ZERO,
            free_delivery_threshold: DEFAULT_FREE_DELIVERY_THRESHOLD,
            urgency_surcharge: Decimal::ZERO,
            delivery_methods: Vec::new(),
            payment_methods: Vec::new(),
            delivery_districts: Vec::new(),
            delivery_intervals: Vec::new(),
        }
    }
}

impl ShopSettings {
    /// Look up a delivery method by id.
    pub fn delivery_method(&self, id: u64) -> Option<&DeliveryMethod> {
        self.delivery_methods.iter().find(|method| method.id == id)
    }

    /// Active delivery methods, in display order.
    pub fn active_delivery_methods(&self) -> impl Iterator<Item = &DeliveryMethod> {
        self.delivery_methods.iter().filter(|method| method.is_active)
    }

    /// Active payment methods, in display order.
    pub fn active_payment_methods(&self) -> impl Iterator<Item = &PaymentMethod> {
        self.payment_methods.iter().filter(|method| method.is_active)
    }

    /// Whether urgent delivery should be offered at all.
    pub fn offers_urgent_delivery(&self) -> bool {
        self.urgency_surcharge > Decimal::ZERO
    }
}

/// Named delivery method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryMethod {
    /// Identifier
    pub id: u64,

    /// Display name
    pub name: String,

    /// Delivery fee
    #[serde(default)]
    pub price: Decimal,

    /// Whether customers may pick it
    #[serde(default = "active_by_default")]
    pub is_active: bool,

    /// Display position
    #[serde(default)]
    pub sort_order: i32,
}

/// Named payment method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    /// Identifier
    pub id: u64,

    /// Display name
    pub name: String,

    /// Whether customers may pick it
    #[serde(default = "active_by_default")]
    pub is_active: bool,

    /// Display position
    #[serde(default)]
    pub sort_order: i32,
}

/// Delivery district.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryDistrict {
    /// Identifier
    pub id: u64,

    /// Display name
    pub name: String,
}

/// Delivery time window, e.g. `"9:00 - 15:00"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryInterval {
    /// Identifier
    pub id: u64,

    /// Display label
    pub label: String,

    /// Display position
    #[serde(default)]
    pub sort_order: i32,
}

fn active_by_default() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn default_settings_use_standard_free_delivery_threshold() {
        let settings = ShopSettings::default();

        assert_eq!(settings.free_delivery_threshold, Decimal::from(5000));
        assert_eq!(settings.min_order_sum, Decimal::ZERO);
        assert!(!settings.offers_urgent_delivery());
    }

    #[test]
    fn deserializes_public_settings_payload() -> TestResult {
        let json = r#"{
            "min_order_sum": "1000.00",
            "free_delivery_threshold": "5000.00",
            "urgency_surcharge": "300.00",
            "payment_methods": [
                {"id": 1, "name": "Наличными", "is_active": true, "sort_order": 0}
            ],
            "delivery_methods": [
                {"id": 1, "name": "Курьер", "price": "250.00", "is_active": true, "sort_order": 0},
                {"id": 2, "name": "Самовывоз", "price": "0.00", "is_active": false, "sort_order": 1}
            ],
            "delivery_districts": [{"id": 4, "name": "Центральный"}],
            "delivery_intervals": [{"id": 1, "label": "9:00 - 15:00", "sort_order": 0}]
        }"#;

        let settings: ShopSettings = serde_json::from_str(json)?;

        assert_eq!(settings.min_order_sum, Decimal::from(1000));
        assert_eq!(
            settings.delivery_method(1).map(|method| method.price),
            Some(Decimal::from(250))
        );
        assert_eq!(settings.active_delivery_methods().count(), 1);
        assert!(settings.offers_urgent_delivery());

        Ok(())
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() -> TestResult {
        let settings: ShopSettings = serde_json::from_str(r#"{"min_order_sum": "500"}"#)?;

        assert_eq!(settings.min_order_sum, Decimal::from(500));
        assert_eq!(settings.free_delivery_threshold, Decimal::from(5000));
        assert!(settings.delivery_methods.is_empty());

        Ok(())
    }
}
