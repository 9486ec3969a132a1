//! Gryadka prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{AddRefusal, CartLedger, CartLine, LineKey},
    checkout::{CheckoutError, CheckoutSelection, CheckoutSummary},
    favorites::{FavoritesLedger, FavoritesStore, FileStore, MemoryStore, StoreError},
    fixtures::{Fixture, FixtureError},
    orders::{Order, OrderItemRequest, OrderLine, OrderRequest, OrderStatus},
    pricing::{SHOP_CURRENCY, format_rubles, format_weight, unit_price},
    products::{Product, ProductId, ProductTag, UnitKind, UnitOffer},
    receipt::ReceiptError,
    settings::{DeliveryDistrict, DeliveryInterval, DeliveryMethod, PaymentMethod, ShopSettings},
};
