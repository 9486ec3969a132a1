//! Fixtures
//!
//! Named YAML data sets for tests and offline quoting. A set `name` lives in
//! `products/<name>.yml`, `settings/<name>.yml` and `carts/<name>.yml` under
//! the fixture base path.

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::{
    cart::{CartLedger, LineKey},
    fixtures::{carts::CartFixture, products::ProductsFixture},
    products::Product,
    settings::ShopSettings,
};

pub mod carts;
pub mod products;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file {path}: {source}")]
    Io {
        /// File that could not be read
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Cart line with a zero quantity
    #[error("Cart line for {0} has a zero quantity")]
    ZeroQuantity(String),

    /// Repeated cart lines add up to more than a line can hold
    #[error("Cart quantity for {0} overflows")]
    QuantityOverflow(String),

    /// Settings were requested before being loaded
    #[error("No settings loaded")]
    NoSettings,
}

/// Fixture
#[derive(Debug, Clone)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Fixture key -> product
    products: FxHashMap<String, Product>,

    /// Loaded shop settings
    settings: Option<ShopSettings>,

    /// Cart built from the loaded cart lines
    cart: CartLedger,
}

impl Fixture {
    /// Create an empty fixture reading from `./fixtures`.
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create an empty fixture reading from `base_path`.
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            products: FxHashMap::default(),
            settings: None,
            cart: CartLedger::new(),
        }
    }

    /// Load a complete fixture set (products, settings and cart with the same name).
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture
            .load_products(name)?
            .load_settings(name)?
            .load_cart(name)?;

        Ok(fixture)
    }

    /// Load products from a YAML fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: ProductsFixture = self.read("products", name)?;

        self.products.extend(fixture.products);

        Ok(self)
    }

    /// Load shop settings from a YAML fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_settings(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        self.settings = Some(self.read("settings", name)?);

        Ok(self)
    }

    /// Load cart lines from a YAML fixture file, adding them to the fixture cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if a line references
    /// an unknown product, if a line has a zero quantity, or if repeated lines
    /// overflow a quantity.
    pub fn load_cart(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: CartFixture = self.read("carts", name)?;

        for line in fixture.lines {
            if line.quantity == 0 {
                return Err(FixtureError::ZeroQuantity(line.product));
            }

            let product = self.product(&line.product)?.clone();
            let key = LineKey::new(product.id, line.unit, line.grams);

            let quantity = self
                .cart
                .quantity_of(&key)
                .checked_add(line.quantity)
                .ok_or_else(|| FixtureError::QuantityOverflow(line.product.clone()))?;

            self.cart.add(&product, line.unit, line.grams);
            self.cart.set_quantity(&key, quantity);
        }

        Ok(self)
    }

    /// Get a product by its fixture key
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product(&self, key: &str) -> Result<&Product, FixtureError> {
        self.products
            .get(key)
            .ok_or_else(|| FixtureError::ProductNotFound(key.to_string()))
    }

    /// All loaded products, in no particular order
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    /// Loaded shop settings
    ///
    /// # Errors
    ///
    /// Returns an error if no settings were loaded.
    pub fn settings(&self) -> Result<&ShopSettings, FixtureError> {
        self.settings.as_ref().ok_or(FixtureError::NoSettings)
    }

    /// Cart built from the loaded cart lines
    pub fn cart(&self) -> &CartLedger {
        &self.cart
    }

    fn read<T: DeserializeOwned>(&self, kind: &str, name: &str) -> Result<T, FixtureError> {
        let path = self.base_path.join(kind).join(format!("{name}.yml"));

        let contents = fs::read_to_string(&path).map_err(|source| FixtureError::Io {
            path: path.clone(),
            source,
        })?;

        Ok(serde_norway::from_str(&contents)?)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
