//! Gryadka
//!
//! Pricing, cart and checkout rules for the Gryadka grocery storefront: unit
//! price resolution for weight, gram, pack, box and piece offers, a cart ledger
//! that consolidates repeated adds, the delivery/urgency/minimum-order checkout
//! rules and a persisted favorites list.

pub mod cart;
pub mod checkout;
pub mod favorites;
pub mod fixtures;
pub mod orders;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod receipt;
pub mod settings;
