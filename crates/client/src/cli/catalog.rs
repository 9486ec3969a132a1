use clap::Args;

use gryadka::{
    pricing::{format_rubles, format_weight},
    products::{Product, ProductTag, UnitOffer},
};
use gryadka_client::api::{ProductQuery, StorefrontApi};

#[derive(Debug, Args)]
pub(crate) struct ProductsArgs {
    /// Only products in this category
    #[arg(long)]
    category: Option<u64>,

    /// Only products with this badge (hit, sale, recommended)
    #[arg(long, value_parser = parse_tag)]
    tag: Option<ProductTag>,

    /// Free-text search
    #[arg(long)]
    search: Option<String>,

    /// Only products in stock
    #[arg(long)]
    in_stock: bool,
}

impl From<ProductsArgs> for ProductQuery {
    fn from(args: ProductsArgs) -> Self {
        ProductQuery {
            category: args.category,
            tag: args.tag,
            search: args.search,
            in_stock: args.in_stock.then_some(true),
        }
    }
}

fn parse_tag(value: &str) -> Result<ProductTag, String> {
    match value {
        "hit" => Ok(ProductTag::Hit),
        "sale" => Ok(ProductTag::Sale),
        "recommended" => Ok(ProductTag::Recommended),
        other => Err(format!("unknown tag {other}")),
    }
}

pub(crate) async fn products(api: &impl StorefrontApi, args: ProductsArgs) -> Result<(), String> {
    let products = api
        .products(&args.into())
        .await
        .map_err(|error| format!("failed to list products: {error}"))?;

    if products.is_empty() {
        println!("no products found");
        return Ok(());
    }

    for product in &products {
        println!("{}", product_line(product));
    }

    Ok(())
}

pub(crate) async fn categories(api: &impl StorefrontApi) -> Result<(), String> {
    let categories = api
        .categories()
        .await
        .map_err(|error| format!("failed to list categories: {error}"))?;

    for category in categories.iter().filter(|category| category.is_active) {
        println!("{:>4}  {}", category.id, category.name);
    }

    Ok(())
}

pub(crate) async fn settings(api: &impl StorefrontApi) -> Result<(), String> {
    let settings = api
        .settings()
        .await
        .map_err(|error| format!("failed to load shop settings: {error}"))?;

    println!("Минимальная сумма заказа: {}", format_rubles(&settings.min_order_sum));
    println!(
        "Бесплатная доставка от: {}",
        format_rubles(&settings.free_delivery_threshold)
    );

    if settings.offers_urgent_delivery() {
        println!("Срочная доставка: +{}", format_rubles(&settings.urgency_surcharge));
    }

    for method in settings.active_delivery_methods() {
        println!(
            "Доставка #{}: {} ({})",
            method.id,
            method.name,
            format_rubles(&method.price)
        );
    }

    for method in settings.active_payment_methods() {
        println!("Оплата: {}", method.name);
    }

    Ok(())
}

fn product_line(product: &Product) -> String {
    let offers = product
        .offers()
        .iter()
        .map(offer_label)
        .collect::<Vec<_>>()
        .join(", ");

    let mut line = format!("{:>4}  {}  {offers}", product.id, product.name);

    if let Some(badge) = product.tag.label() {
        line.push_str(&format!("  [{badge}]"));
    }

    if !product.in_stock {
        line.push_str("  (нет в наличии)");
    }

    line
}

fn offer_label(offer: &UnitOffer) -> String {
    let mut label = format!(
        "{} {}",
        format_rubles(&offer.listed_price()),
        offer.kind().label()
    );

    if let Some(old_price) = offer.discounted_from() {
        label.push_str(&format!(" (было {})", format_rubles(&old_price)));
    }

    if let Some(weight) = offer.weight_grams() {
        label.push_str(&format!(" / {}", format_weight(weight)));
    }

    label
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use rust_decimal::Decimal;

    use gryadka::products::{ProductId, UnitKind};
    use gryadka_client::api::{ApiError, MockStorefrontApi};

    use super::*;

    #[test]
    fn product_line_lists_every_offer() {
        let product = Product::new(ProductId::new(1), "Яблоки")
            .with_price(UnitKind::Kg, Decimal::from(120))
            .with_price(UnitKind::Unit, Decimal::from(25));

        assert_eq!(product_line(&product), "   1  Яблоки  120 ₽ за кг, 25 ₽ за штуку");
    }

    #[test]
    fn product_line_marks_out_of_stock() {
        let product = Product::new(ProductId::new(4), "Клубника")
            .with_price(UnitKind::Pack, Decimal::from(399))
            .out_of_stock();

        assert!(product_line(&product).ends_with("(нет в наличии)"));
    }

    #[test]
    fn in_stock_flag_only_sent_when_set() {
        let query = ProductQuery::from(ProductsArgs {
            category: None,
            tag: None,
            search: None,
            in_stock: false,
        });

        assert_eq!(query.in_stock, None);
    }

    #[test]
    fn parses_known_tags_only() {
        assert_eq!(parse_tag("sale"), Ok(ProductTag::Sale));
        assert!(parse_tag("new").is_err());
    }

    #[tokio::test]
    async fn settings_reports_fetch_failure() {
        let mut api = MockStorefrontApi::new();

        api.expect_settings().once().returning(|| {
            Err(ApiError::Status {
                status: StatusCode::SERVICE_UNAVAILABLE,
                message: None,
            })
        });

        let result = settings(&api).await;

        assert!(
            result.is_err_and(|message| message.starts_with("failed to load shop settings")),
            "fetch failure must not fall back to default settings"
        );
    }
}
