use clap::{Parser, Subcommand};

use gryadka_client::{
    api::HttpStorefrontApi,
    config::{ApiConfig, LoggingConfig, StorageConfig},
};

mod cart;
mod catalog;
mod favorites;
mod orders;

#[derive(Debug, Parser)]
#[command(name = "gryadka", about = "Gryadka storefront client", long_about = None)]
pub(crate) struct Cli {
    /// Storefront API settings.
    #[command(flatten)]
    api: ApiConfig,

    /// Logging output settings.
    #[command(flatten)]
    logging: LoggingConfig,

    /// Local persistence settings.
    #[command(flatten)]
    storage: StorageConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List catalog products
    Products(catalog::ProductsArgs),

    /// List catalog categories
    Categories,

    /// Show shop checkout settings
    Settings,

    /// Price a fixture cart and print the receipt
    Quote(cart::QuoteArgs),

    /// Place an order for a fixture cart
    Order(cart::OrderArgs),

    /// List your orders
    Orders,

    /// Add a product to favorites, or remove it if already there
    Favorite(favorites::FavoriteArgs),

    /// List favorite products
    Favorites,
}

impl Cli {
    /// Parse arguments, reading `.env` first so its values act as env fallbacks.
    pub(crate) fn load() -> Result<Self, clap::Error> {
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    pub(crate) fn logging(&self) -> &LoggingConfig {
        &self.logging
    }

    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Products(args) => catalog::products(&connect(&self.api)?, args).await,
            Commands::Categories => catalog::categories(&connect(&self.api)?).await,
            Commands::Settings => catalog::settings(&connect(&self.api)?).await,
            Commands::Quote(args) => cart::quote(&self.api, args).await,
            Commands::Order(args) => cart::order(&connect(&self.api)?, args).await,
            Commands::Orders => orders::list(&connect(&self.api)?).await,
            Commands::Favorite(args) => {
                favorites::toggle(&self.storage, &args);
                Ok(())
            }
            Commands::Favorites => {
                favorites::list(&self.storage);
                Ok(())
            }
        }
    }
}

fn connect(config: &ApiConfig) -> Result<HttpStorefrontApi, String> {
    HttpStorefrontApi::new(config)
        .map_err(|error| format!("failed to create API client: {error}"))
}
