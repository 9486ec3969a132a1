//! Cart

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    orders::OrderItemRequest,
    pricing::{line_total, to_money, unit_price},
    products::{Product, ProductId, UnitKind, UnitOffer},
};

/// Reasons a product cannot be added to the cart as requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AddRefusal {
    /// The product is out of stock.
    #[error("product is out of stock")]
    OutOfStock,

    /// The product has no price for this unit kind.
    #[error("product is not sold {}", .0.label())]
    UnitUnavailable(UnitKind),

    /// A gram amount has to be chosen first.
    #[error("choose a gram amount first")]
    GramsRequired,

    /// The chosen gram amount is not one the product is sold in.
    #[error("product is not sold in {0} g portions")]
    GramsNotPermitted(u32),
}

/// Identity of a cart line.
///
/// The gram amount only takes part in the identity of [`UnitKind::Gram`] lines;
/// it is dropped for every other unit kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineKey {
    product: ProductId,
    unit: UnitKind,
    grams: Option<u32>,
}

impl LineKey {
    /// Build a key, discarding `grams` unless `unit` is [`UnitKind::Gram`].
    pub fn new(product: ProductId, unit: UnitKind, grams: Option<u32>) -> Self {
        Self {
            product,
            unit,
            grams: grams.filter(|_| unit == UnitKind::Gram),
        }
    }

    /// Product of the line
    pub fn product(&self) -> ProductId {
        self.product
    }

    /// Unit kind of the line
    pub fn unit(&self) -> UnitKind {
        self.unit
    }

    /// Gram amount of a gram line
    pub fn grams(&self) -> Option<u32> {
        self.grams
    }
}

/// One consolidated entry in the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    product: Product,
    key: LineKey,
    quantity: u32,
}

impl CartLine {
    /// Identity of the line
    pub fn key(&self) -> LineKey {
        self.key
    }

    /// Product snapshot taken when the line was created
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Unit kind of the line
    pub fn unit(&self) -> UnitKind {
        self.key.unit
    }

    /// Gram amount of a gram line
    pub fn grams(&self) -> Option<u32> {
        self.key.grams
    }

    /// Number of units, always at least one
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Price of a single unit
    pub fn unit_price(&self) -> Decimal {
        unit_price(&self.product, self.key.unit, self.key.grams)
    }

    /// Price of the whole line
    pub fn total(&self) -> Decimal {
        line_total(self.unit_price(), self.quantity)
    }

    /// Order payload entry for this line
    pub fn order_item(&self) -> OrderItemRequest {
        OrderItemRequest {
            product_id: self.key.product,
            quantity: self.quantity,
            price_type: self.key.unit,
            selected_grams: self.key.grams,
        }
    }
}

/// In-memory cart, lines kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct CartLedger {
    lines: Vec<CartLine>,
}

impl CartLedger {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether `product` may be added as `unit` (and `grams` for gram offers).
    ///
    /// The ledger itself accepts any input; this is the gate callers apply before [`CartLedger::add`].
    ///
    /// # Errors
    ///
    /// Returns the first [`AddRefusal`] that applies.
    pub fn check_add(product: &Product, unit: UnitKind, grams: Option<u32>) -> Result<(), AddRefusal> {
        if !product.in_stock {
            return Err(AddRefusal::OutOfStock);
        }

        let offer = product
            .offer(unit)
            .ok_or(AddRefusal::UnitUnavailable(unit))?;

        if let UnitOffer::Gram { grams: permitted, .. } = &offer {
            let grams = grams.filter(|grams| *grams > 0).ok_or(AddRefusal::GramsRequired)?;

            if !permitted.contains(&grams) {
                return Err(AddRefusal::GramsNotPermitted(grams));
            }
        }

        Ok(())
    }

    /// Add one unit. Repeated adds with the same key increase the quantity of one line.
    pub fn add(&mut self, product: &Product, unit: UnitKind, grams: Option<u32>) -> LineKey {
        let key = LineKey::new(product.id, unit, grams);

        if let Some(line) = self.line_mut(&key) {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.lines.push(CartLine {
                product: product.clone(),
                key,
                quantity: 1,
            });
        }

        key
    }

    /// Set the quantity of a line; zero removes it. Unknown keys are ignored.
    pub fn set_quantity(&mut self, key: &LineKey, quantity: u32) {
        if quantity == 0 {
            self.remove(key);
            return;
        }

        if let Some(line) = self.line_mut(key) {
            line.quantity = quantity;
        }
    }

    /// Take one unit off a line, removing it when it reaches zero.
    pub fn decrement(&mut self, key: &LineKey) {
        let quantity = self.quantity_of(key);

        if quantity > 0 {
            self.set_quantity(key, quantity - 1);
        }
    }

    /// Remove the line with this exact key. Returns whether a line was removed.
    pub fn remove(&mut self, key: &LineKey) -> bool {
        let before = self.lines.len();

        self.lines.retain(|line| line.key != *key);

        self.lines.len() != before
    }

    /// Remove every line of a product, whatever its unit kind. Returns the number of lines removed.
    pub fn remove_product(&mut self, product: ProductId) -> usize {
        let before = self.lines.len();

        self.lines.retain(|line| line.key.product != product);

        before - self.lines.len()
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Look up a line.
    pub fn get(&self, key: &LineKey) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.key == *key)
    }

    /// Quantity of a line, zero when absent.
    pub fn quantity_of(&self, key: &LineKey) -> u32 {
        self.get(key).map_or(0, CartLine::quantity)
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of all line quantities.
    pub fn total_item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of all line totals.
    pub fn total_price(&self) -> Decimal {
        self.lines.iter().map(CartLine::total).sum()
    }

    /// Items subtotal as money in the shop currency.
    pub fn subtotal(&self) -> Money<'static, Currency> {
        to_money(self.total_price())
    }

    /// Order payload entries for every line.
    pub fn order_items(&self) -> Vec<OrderItemRequest> {
        self.lines.iter().map(CartLine::order_item).collect()
    }

    fn line_mut(&mut self, key: &LineKey) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.key == *key)
    }
}
