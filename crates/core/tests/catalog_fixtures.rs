//! Catalog fixture loading and add-to-cart gating.

use std::fs;

use rust_decimal::Decimal;
use testresult::TestResult;

use gryadka::{
    cart::{AddRefusal, CartLedger},
    fixtures::{Fixture, FixtureError},
    products::{ProductTag, UnitKind, UnitOffer},
};

#[test]
fn loads_every_market_product() -> TestResult {
    let mut fixture = Fixture::new();
    fixture.load_products("market")?;

    assert_eq!(fixture.products().count(), 6);
    assert_eq!(fixture.product("walnuts")?.tag, ProductTag::Hit);

    Ok(())
}

#[test]
fn primary_offer_prefers_weight_units() -> TestResult {
    let mut fixture = Fixture::new();
    fixture.load_products("market")?;

    let oranges = fixture.product("oranges")?;
    let primary = oranges.primary_offer();

    assert_eq!(primary.as_ref().map(UnitOffer::kind), Some(UnitKind::Kg));
    assert_eq!(
        oranges
            .offer(UnitKind::Box)
            .and_then(|offer| offer.weight_grams()),
        Some(15000)
    );

    Ok(())
}

#[test]
fn legacy_old_price_marks_primary_offer_as_discounted() -> TestResult {
    let mut fixture = Fixture::new();
    fixture.load_products("market")?;

    let apples = fixture.product("apples")?;

    assert_eq!(
        apples.primary_offer().and_then(|offer| offer.discounted_from()),
        Some(Decimal::from(150))
    );
    assert_eq!(
        apples
            .offer(UnitKind::Unit)
            .and_then(|offer| offer.discounted_from()),
        None
    );

    Ok(())
}

#[test]
fn out_of_stock_fixture_product_cannot_be_added() -> TestResult {
    let mut fixture = Fixture::new();
    fixture.load_products("market")?;

    let strawberries = fixture.product("strawberries")?;

    assert_eq!(
        CartLedger::check_add(strawberries, UnitKind::Pack, None),
        Err(AddRefusal::OutOfStock)
    );

    Ok(())
}

#[test]
fn missing_cart_file_is_reported() -> TestResult {
    let mut fixture = Fixture::new();
    fixture.load_products("market")?;

    let result = fixture.load_cart("missing-product");

    assert!(matches!(result, Err(FixtureError::Io { .. })));

    Ok(())
}

#[test]
fn settings_must_be_loaded_before_use() {
    let fixture = Fixture::new();

    assert!(matches!(fixture.settings(), Err(FixtureError::NoSettings)));
}

#[test]
fn repeated_cart_lines_overflowing_quantity_are_reported() -> TestResult {
    let dir = tempfile::tempdir()?;

    fs::create_dir_all(dir.path().join("products"))?;
    fs::create_dir_all(dir.path().join("carts"))?;

    fs::write(
        dir.path().join("products/huge.yml"),
        "products:\n  apples:\n    id: 1\n    name: Яблоки\n    price_per_kg: \"120.00\"\n",
    )?;
    fs::write(
        dir.path().join("carts/huge.yml"),
        "lines:\n  - product: apples\n    unit: kg\n    quantity: 2\n  - product: apples\n    unit: kg\n    quantity: 4294967295\n",
    )?;

    let mut fixture = Fixture::with_base_path(dir.path());
    fixture.load_products("huge")?;

    let result = fixture.load_cart("huge");

    assert!(matches!(result, Err(FixtureError::QuantityOverflow(ref product)) if product == "apples"));
    assert_eq!(fixture.cart().total_item_count(), 2);

    Ok(())
}
