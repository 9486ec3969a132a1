//! Prices
//!
//! All arithmetic stays in [`Decimal`]; rounding to whole rubles happens only when
//! an amount is formatted for display.

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{
    Money,
    iso::{self, Currency},
};

use crate::products::{Product, UnitKind};

/// Currency every storefront price is quoted in.
pub const SHOP_CURRENCY: &Currency = iso::RUB;

const GRAMS_PER_KG: u32 = 1000;

/// Price of one unit of `unit` for `product`.
///
/// Missing prices resolve to zero, which callers treat as "not purchasable".
/// For gram offers the result is the price of `grams` grams, or the per-100g
/// price when no gram amount has been chosen yet.
pub fn unit_price(product: &Product, unit: UnitKind, grams: Option<u32>) -> Decimal {
    match unit {
        UnitKind::Gram => gram_price(product.price_per_100g.unwrap_or_default(), grams),
        UnitKind::Kg | UnitKind::Pack | UnitKind::Box | UnitKind::Unit => {
            product.price_for(unit).unwrap_or_default()
        }
    }
}

/// Price of `grams` grams at `per_100g`; falls back to `per_100g` for a missing or zero amount.
pub fn gram_price(per_100g: Decimal, grams: Option<u32>) -> Decimal {
    match grams {
        Some(grams) if grams > 0 => per_100g * Decimal::from(grams) / Decimal::ONE_HUNDRED,
        _ => per_100g,
    }
}

/// Price of `quantity` units at `unit_price`.
pub fn line_total(unit_price: Decimal, quantity: u32) -> Decimal {
    unit_price * Decimal::from(quantity)
}

/// Round an amount to whole rubles for display.
pub fn display_amount(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount as whole rubles, e.g. `"840 ₽"`.
pub fn format_rubles(amount: &Decimal) -> String {
    format!("{} ₽", display_amount(*amount))
}

/// Wrap an amount as money in the shop currency.
pub fn to_money(amount: Decimal) -> Money<'static, Currency> {
    Money::from_decimal(amount, SHOP_CURRENCY)
}

/// Format a weight: grams below one kilogram, otherwise kilograms with at most one decimal.
pub fn format_weight(grams: u32) -> String {
    if grams < GRAMS_PER_KG {
        return format!("{grams} г");
    }

    let kg = (Decimal::from(grams) / Decimal::from(GRAMS_PER_KG))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
        .normalize();

    format!("{kg} кг")
}
