//! Products

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Permitted gram amounts for a per-100g offer, ascending.
pub type GramAmounts = SmallVec<[u32; 6]>;

/// Catalog product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    /// Wrap a raw catalog identifier.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw catalog identifier.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Pricing basis for a cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    /// Priced per kilogram.
    Kg,

    /// Priced per 100 grams, sold in fixed gram amounts.
    Gram,

    /// Priced per pack.
    Pack,

    /// Priced per box.
    Box,

    /// Priced per piece.
    Unit,
}

impl UnitKind {
    /// Every unit kind, in offer priority order.
    pub const PRIORITY: [UnitKind; 5] = [
        UnitKind::Kg,
        UnitKind::Gram,
        UnitKind::Unit,
        UnitKind::Pack,
        UnitKind::Box,
    ];

    /// Wire name (`kg`, `gram`, `pack`, `box`, `unit`).
    pub const fn as_str(self) -> &'static str {
        match self {
            UnitKind::Kg => "kg",
            UnitKind::Gram => "gram",
            UnitKind::Pack => "pack",
            UnitKind::Box => "box",
            UnitKind::Unit => "unit",
        }
    }

    /// Price suffix shown next to a price of this kind.
    pub const fn label(self) -> &'static str {
        match self {
            UnitKind::Kg => "за кг",
            UnitKind::Gram => "за 100г",
            UnitKind::Pack => "за упаковку",
            UnitKind::Box => "за ящик",
            UnitKind::Unit => "за штуку",
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Merchandising badge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductTag {
    /// No badge.
    #[default]
    #[serde(rename = "")]
    None,

    /// Best seller.
    Hit,

    /// On sale.
    Sale,

    /// Shop recommendation.
    Recommended,
}

impl ProductTag {
    /// Badge text, if any.
    pub const fn label(self) -> Option<&'static str> {
        match self {
            ProductTag::None => None,
            ProductTag::Hit => Some("Хит"),
            ProductTag::Sale => Some("Акция"),
            ProductTag::Recommended => Some("Советую"),
        }
    }
}

/// Product record as served by the catalog.
///
/// Each `price_per_*` field is independent; a unit kind is available for the
/// product exactly when its price is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog identifier
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// Category identifier
    #[serde(default)]
    pub category: u64,

    /// Category display name
    #[serde(default)]
    pub category_name: String,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// Price per kilogram
    #[serde(default)]
    pub price_per_kg: Option<Decimal>,

    /// Price per 100 grams
    #[serde(default)]
    pub price_per_100g: Option<Decimal>,

    /// Price per pack
    #[serde(default)]
    pub price_per_pack: Option<Decimal>,

    /// Price per box
    #[serde(default)]
    pub price_per_box: Option<Decimal>,

    /// Price per piece
    #[serde(default)]
    pub price_per_unit: Option<Decimal>,

    /// Pre-sale price of the primary offer
    #[serde(default)]
    pub old_price: Option<Decimal>,

    /// Pre-sale price per kilogram
    #[serde(default)]
    pub old_price_per_kg: Option<Decimal>,

    /// Pre-sale price per 100 grams
    #[serde(default)]
    pub old_price_per_100g: Option<Decimal>,

    /// Pre-sale price per pack
    #[serde(default)]
    pub old_price_per_pack: Option<Decimal>,

    /// Pre-sale price per box
    #[serde(default)]
    pub old_price_per_box: Option<Decimal>,

    /// Pre-sale price per piece
    #[serde(default)]
    pub old_price_per_unit: Option<Decimal>,

    /// Comma-separated gram amounts for the per-100g offer, e.g. `"250,300,500"`
    #[serde(default)]
    pub available_grams: String,

    /// Nominal pack weight in grams
    #[serde(default)]
    pub pack_weight: Option<u32>,

    /// Nominal box weight in grams
    #[serde(default)]
    pub box_weight: Option<u32>,

    /// Merchandising badge
    #[serde(default)]
    pub tag: ProductTag,

    /// Whether the product can be added to the cart
    #[serde(default = "in_stock_by_default")]
    pub in_stock: bool,

    /// Main image URL
    #[serde(default)]
    pub main_image: Option<String>,
}

fn in_stock_by_default() -> bool {
    true
}

impl Product {
    /// Create an in-stock product with no prices set.
    pub fn new(id: ProductId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            category: 0,
            category_name: String::new(),
            description: String::new(),
            price_per_kg: None,
            price_per_100g: None,
            price_per_pack: None,
            price_per_box: None,
            price_per_unit: None,
            old_price: None,
            old_price_per_kg: None,
            old_price_per_100g: None,
            old_price_per_pack: None,
            old_price_per_box: None,
            old_price_per_unit: None,
            available_grams: String::new(),
            pack_weight: None,
            box_weight: None,
            tag: ProductTag::None,
            in_stock: true,
            main_image: None,
        }
    }

    /// Set the price for a unit kind. For [`UnitKind::Gram`] this is the per-100g price.
    #[must_use]
    pub fn with_price(mut self, unit: UnitKind, price: Decimal) -> Self {
        *self.price_slot(unit) = Some(price);
        self
    }

    /// Set the permitted gram amounts for the per-100g offer.
    #[must_use]
    pub fn with_available_grams(mut self, grams: impl Into<String>) -> Self {
        self.available_grams = grams.into();
        self
    }

    /// Mark the product as out of stock.
    #[must_use]
    pub fn out_of_stock(mut self) -> Self {
        self.in_stock = false;
        self
    }

    /// Listed price for a unit kind. For [`UnitKind::Gram`] this is the per-100g price.
    pub fn price_for(&self, unit: UnitKind) -> Option<Decimal> {
        match unit {
            UnitKind::Kg => self.price_per_kg,
            UnitKind::Gram => self.price_per_100g,
            UnitKind::Pack => self.price_per_pack,
            UnitKind::Box => self.price_per_box,
            UnitKind::Unit => self.price_per_unit,
        }
    }

    /// Whether the product can be bought by the given unit kind.
    pub fn is_available(&self, unit: UnitKind) -> bool {
        self.price_for(unit).is_some()
    }

    /// Parsed gram amounts for the per-100g offer.
    pub fn permitted_grams(&self) -> GramAmounts {
        parse_gram_amounts(&self.available_grams)
    }

    /// Available offers in priority order. The first one is the primary offer.
    pub fn offers(&self) -> SmallVec<[UnitOffer; 5]> {
        let primary = self.primary_unit();

        UnitKind::PRIORITY
            .into_iter()
            .filter_map(|unit| {
                let price = self.price_for(unit)?;
                let old_price = self
                    .old_price_for(unit)
                    .or_else(|| self.old_price.filter(|_| Some(unit) == primary));

                Some(match unit {
                    UnitKind::Kg => UnitOffer::Kg { price, old_price },
                    UnitKind::Gram => UnitOffer::Gram {
                        price_per_100g: price,
                        grams: self.permitted_grams(),
                        old_price,
                    },
                    UnitKind::Pack => UnitOffer::Pack {
                        price,
                        weight_grams: self.pack_weight,
                        old_price,
                    },
                    UnitKind::Box => UnitOffer::Box {
                        price,
                        weight_grams: self.box_weight,
                        old_price,
                    },
                    UnitKind::Unit => UnitOffer::Unit { price, old_price },
                })
            })
            .collect()
    }

    /// The offer for a single unit kind, if available.
    pub fn offer(&self, unit: UnitKind) -> Option<UnitOffer> {
        self.offers().into_iter().find(|offer| offer.kind() == unit)
    }

    /// The offer shown on product cards.
    pub fn primary_offer(&self) -> Option<UnitOffer> {
        self.offers().into_iter().next()
    }

    fn primary_unit(&self) -> Option<UnitKind> {
        UnitKind::PRIORITY
            .into_iter()
            .find(|unit| self.is_available(*unit))
    }

    fn old_price_for(&self, unit: UnitKind) -> Option<Decimal> {
        match unit {
            UnitKind::Kg => self.old_price_per_kg,
            UnitKind::Gram => self.old_price_per_100g,
            UnitKind::Pack => self.old_price_per_pack,
            UnitKind::Box => self.old_price_per_box,
            UnitKind::Unit => self.old_price_per_unit,
        }
    }

    fn price_slot(&mut self, unit: UnitKind) -> &mut Option<Decimal> {
        match unit {
            UnitKind::Kg => &mut self.price_per_kg,
            UnitKind::Gram => &mut self.price_per_100g,
            UnitKind::Pack => &mut self.price_per_pack,
            UnitKind::Box => &mut self.price_per_box,
            UnitKind::Unit => &mut self.price_per_unit,
        }
    }
}

/// One way a product can be bought, carrying only the fields that unit kind needs.
#[derive(Debug, Clone, PartialEq)]
pub enum UnitOffer {
    /// Sold by the kilogram.
    Kg {
        /// Price per kilogram
        price: Decimal,
        /// Pre-sale price per kilogram
        old_price: Option<Decimal>,
    },

    /// Sold in fixed gram amounts, priced per 100 grams.
    Gram {
        /// Price per 100 grams
        price_per_100g: Decimal,
        /// Permitted gram amounts, ascending
        grams: GramAmounts,
        /// Pre-sale price per 100 grams
        old_price: Option<Decimal>,
    },

    /// Sold by the pack.
    Pack {
        /// Price per pack
        price: Decimal,
        /// Nominal pack weight in grams
        weight_grams: Option<u32>,
        /// Pre-sale price per pack
        old_price: Option<Decimal>,
    },

    /// Sold by the box.
    Box {
        /// Price per box
        price: Decimal,
        /// Nominal box weight in grams
        weight_grams: Option<u32>,
        /// Pre-sale price per box
        old_price: Option<Decimal>,
    },

    /// Sold by the piece.
    Unit {
        /// Price per piece
        price: Decimal,
        /// Pre-sale price per piece
        old_price: Option<Decimal>,
    },
}

impl UnitOffer {
    /// Unit kind of this offer.
    pub fn kind(&self) -> UnitKind {
        match self {
            UnitOffer::Kg { .. } => UnitKind::Kg,
            UnitOffer::Gram { .. } => UnitKind::Gram,
            UnitOffer::Pack { .. } => UnitKind::Pack,
            UnitOffer::Box { .. } => UnitKind::Box,
            UnitOffer::Unit { .. } => UnitKind::Unit,
        }
    }

    /// Listed price; per 100 grams for gram offers.
    pub fn listed_price(&self) -> Decimal {
        match self {
            UnitOffer::Kg { price, .. }
            | UnitOffer::Pack { price, .. }
            | UnitOffer::Box { price, .. }
            | UnitOffer::Unit { price, .. } => *price,
            UnitOffer::Gram { price_per_100g, .. } => *price_per_100g,
        }
    }

    /// Pre-sale price as configured.
    pub fn old_price(&self) -> Option<Decimal> {
        match self {
            UnitOffer::Kg { old_price, .. }
            | UnitOffer::Gram { old_price, .. }
            | UnitOffer::Pack { old_price, .. }
            | UnitOffer::Box { old_price, .. }
            | UnitOffer::Unit { old_price, .. } => *old_price,
        }
    }

    /// Pre-sale price, only when it is above the listed price.
    pub fn discounted_from(&self) -> Option<Decimal> {
        self.old_price().filter(|old| *old > self.listed_price())
    }

    /// Permitted gram amounts; empty for every offer but [`UnitOffer::Gram`].
    pub fn permitted_grams(&self) -> &[u32] {
        match self {
            UnitOffer::Gram { grams, .. } => grams,
            _ => &[],
        }
    }

    /// Nominal weight of a pack or box.
    pub fn weight_grams(&self) -> Option<u32> {
        match self {
            UnitOffer::Pack { weight_grams, .. } | UnitOffer::Box { weight_grams, .. } => {
                *weight_grams
            }
            _ => None,
        }
    }

    /// Whether a gram amount must be chosen before this offer can go into the cart.
    pub fn requires_grams(&self) -> bool {
        matches!(self, UnitOffer::Gram { .. })
    }
}

/// Parse a comma-separated gram list such as `"500, 250,300"`.
///
/// Blank, zero and malformed entries are skipped; the result is sorted and deduplicated.
pub fn parse_gram_amounts(raw: &str) -> GramAmounts {
    let mut grams: GramAmounts = raw
        .split(',')
        .filter_map(|part| part.trim().parse::<u32>().ok())
        .filter(|grams| *grams > 0)
        .collect();

    grams.sort_unstable();
    grams.dedup();

    grams
}
