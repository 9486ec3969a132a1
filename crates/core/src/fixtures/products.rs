//! Product Fixtures

use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::products::Product;

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Map of fixture key -> product record
    pub products: FxHashMap<String, Product>,
}
