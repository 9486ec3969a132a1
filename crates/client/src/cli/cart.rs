use std::{io, path::PathBuf};

use clap::Args;
use tracing::{debug, warn};

use gryadka::{
    checkout::{CheckoutSelection, CheckoutSummary},
    fixtures::Fixture,
    pricing::format_rubles,
    receipt,
    settings::ShopSettings,
};
use gryadka_client::{
    api::HttpStorefrontApi,
    checkout::CheckoutService,
    config::ApiConfig,
};

use super::connect;

#[derive(Debug, Args)]
pub(crate) struct CartArgs {
    /// Cart fixture to check out
    #[arg(long)]
    pub(crate) cart: String,

    /// Fixture set providing the products (and offline settings)
    #[arg(long, default_value = "market")]
    pub(crate) catalog: String,

    /// Fixture base directory
    #[arg(long, env = "GRYADKA_FIXTURES_DIR", default_value = "./fixtures")]
    pub(crate) fixtures: PathBuf,
}

#[derive(Debug, Args)]
pub(crate) struct SelectionArgs {
    /// Delivery method id; defaults to the first configured method
    #[arg(long)]
    pub(crate) delivery: Option<u64>,

    /// Request urgent delivery
    #[arg(long)]
    pub(crate) urgent: bool,

    /// Delivery district
    #[arg(long)]
    pub(crate) district: Option<String>,

    /// Delivery interval, e.g. "9:00 - 15:00"
    #[arg(long)]
    pub(crate) interval: Option<String>,

    /// Payment method name; defaults to the first configured method
    #[arg(long)]
    pub(crate) payment: Option<String>,

    /// Delivery address
    #[arg(long)]
    pub(crate) address: Option<String>,

    /// Order comment
    #[arg(long)]
    pub(crate) comment: Option<String>,

    /// Promo code
    #[arg(long)]
    pub(crate) promo_code: Option<String>,
}

#[derive(Debug, Args)]
pub(crate) struct QuoteArgs {
    #[command(flatten)]
    pub(crate) cart: CartArgs,

    #[command(flatten)]
    pub(crate) selection: SelectionArgs,

    /// Use the fixture set's shop settings instead of fetching them
    #[arg(long)]
    pub(crate) offline: bool,
}

#[derive(Debug, Args)]
pub(crate) struct OrderArgs {
    #[command(flatten)]
    pub(crate) cart: CartArgs,

    #[command(flatten)]
    pub(crate) selection: SelectionArgs,
}

impl CartArgs {
    fn fixture(&self) -> Result<Fixture, String> {
        let mut fixture = Fixture::with_base_path(&self.fixtures);

        fixture
            .load_products(&self.catalog)
            .and_then(|fixture| fixture.load_cart(&self.cart))
            .map_err(|error| format!("failed to load cart fixture {}: {error}", self.cart))?;

        debug!(cart = %self.cart, lines = fixture.cart().len(), "cart fixture loaded");

        Ok(fixture)
    }
}

impl SelectionArgs {
    fn apply(self, settings: &ShopSettings) -> CheckoutSelection {
        let mut selection = CheckoutSelection::from_settings(settings);

        if let Some(id) = self.delivery {
            if settings.delivery_method(id).is_none() {
                warn!(id, "unknown delivery method selected");
            }

            selection.delivery_method = Some(id);
        }

        selection.urgent = self.urgent;

        if let Some(district) = self.district {
            selection.district = district;
        }

        if let Some(interval) = self.interval {
            selection.interval = interval;
        }

        if let Some(payment) = self.payment {
            selection.payment_method = payment;
        }

        if let Some(address) = self.address {
            selection.address = address;
        }

        if let Some(comment) = self.comment {
            selection.comment = comment;
        }

        if let Some(promo_code) = self.promo_code {
            selection.promo_code = promo_code;
        }

        selection
    }
}

pub(crate) async fn quote(config: &ApiConfig, args: QuoteArgs) -> Result<(), String> {
    let mut fixture = args.cart.fixture()?;

    let settings = if args.offline {
        fixture
            .load_settings(&args.cart.catalog)
            .map_err(|error| format!("failed to load settings fixture: {error}"))?;

        fixture
            .settings()
            .map_err(|error| error.to_string())?
            .clone()
    } else {
        CheckoutService::new(connect(config)?).load_settings().await
    };

    let selection = args.selection.apply(&settings);
    let summary = CheckoutSummary::for_cart(fixture.cart(), &settings, &selection);

    receipt::write_to(io::stdout().lock(), fixture.cart(), &summary)
        .map_err(|error| error.to_string())?;

    Ok(())
}

pub(crate) async fn order(api: &HttpStorefrontApi, args: OrderArgs) -> Result<(), String> {
    let fixture = args.cart.fixture()?;
    let mut cart = fixture.cart().clone();

    let service = CheckoutService::new(api.clone());
    let settings = service.load_settings().await;
    let selection = args.selection.apply(&settings);

    let order = service
        .place_order(&mut cart, &selection, &settings)
        .await
        .map_err(|error| error.to_string())?;

    println!(
        "Заказ #{} оформлен: {}, итого {}",
        order.id,
        order.status,
        format_rubles(&order.total)
    );

    Ok(())
}
