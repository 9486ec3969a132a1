//! Cart Fixtures

use serde::Deserialize;

use crate::products::UnitKind;

/// Wrapper for cart lines in YAML
#[derive(Debug, Deserialize)]
pub struct CartFixture {
    /// Lines, added to the cart in order
    pub lines: Vec<CartLineFixture>,
}

/// Cart Line Fixture
#[derive(Debug, Deserialize)]
pub struct CartLineFixture {
    /// Fixture key of the product
    pub product: String,

    /// Unit kind (`kg`, `gram`, `pack`, `box`, `unit`)
    pub unit: UnitKind,

    /// Gram amount for gram lines
    #[serde(default)]
    pub grams: Option<u32>,

    /// Number of units
    #[serde(default = "one")]
    pub quantity: u32,
}

fn one() -> u32 {
    1
}
