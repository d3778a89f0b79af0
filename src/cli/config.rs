//! Storefront configuration

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use rusty_money::iso::{self, Currency};

use storefront::{
    catalog::{CategoryFilter, LoadOptions},
    checkout::{DestinationId, MessageTemplate},
    products::{PriceSchema, PriceTier},
};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum LogFormat {
    /// Human-readable single-line logs
    Compact,

    /// One JSON object per event
    Json,
}

/// Pricing layout selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum SchemaChoice {
    /// Detect from the catalog's header row
    Auto,

    /// Force the single-price layout
    Single,

    /// Force the dual-price layout
    Dual,
}

impl From<SchemaChoice> for Option<PriceSchema> {
    fn from(choice: SchemaChoice) -> Self {
        match choice {
            SchemaChoice::Auto => None,
            SchemaChoice::Single => Some(PriceSchema::Single),
            SchemaChoice::Dual => Some(PriceSchema::Dual),
        }
    }
}

/// Price tier selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum TierChoice {
    /// Pix / cash price
    Pix,

    /// Card price
    Card,
}

impl From<TierChoice> for PriceTier {
    fn from(choice: TierChoice) -> Self {
        match choice {
            TierChoice::Pix => PriceTier::Pix,
            TierChoice::Card => PriceTier::Card,
        }
    }
}

/// Storefront configuration
#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Storefront catalog and checkout", long_about = None)]
pub(crate) struct StoreConfig {
    /// Catalog CSV file
    #[arg(long, env = "STOREFRONT_CATALOG", default_value = "produtos.csv", global = true)]
    pub catalog: PathBuf,

    /// Pricing layout of the catalog
    #[arg(long, env = "STOREFRONT_SCHEMA", value_enum, default_value_t = SchemaChoice::Auto, global = true)]
    pub schema: SchemaChoice,

    /// ISO code of the catalog's currency (BRL, USD, EUR, GBP)
    #[arg(long, env = "STOREFRONT_CURRENCY", default_value = "BRL", value_parser = parse_currency, global = true)]
    pub currency: &'static Currency,

    /// Decimal separator used in the order message
    #[arg(long, env = "STOREFRONT_DECIMAL_SEPARATOR", default_value_t = '.', global = true)]
    pub decimal_separator: char,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info", global = true)]
    pub log_level: String,

    /// Log output format
    #[arg(long, env = "STOREFRONT_LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// List the catalog, optionally filtered
    Products(ProductsArgs),

    /// Fill a cart and check it out
    Order(OrderArgs),
}

#[derive(Debug, Args)]
pub(crate) struct ProductsArgs {
    /// Category to show ("Todas" for every category)
    #[arg(short, long, default_value = "Todas")]
    pub category: CategoryFilter,

    /// Highest price to show
    #[arg(short, long)]
    pub max_price: Option<Decimal>,

    /// Price tier the ceiling applies to
    #[arg(short, long, value_enum, default_value_t = TierChoice::Pix)]
    pub tier: TierChoice,
}

#[derive(Debug, Args)]
pub(crate) struct OrderArgs {
    /// Messaging account that receives orders (digits only)
    #[arg(long, env = "STOREFRONT_DESTINATION")]
    pub destination: DestinationId,

    /// Product id to add; repeat to add more lines
    #[arg(short, long = "item")]
    pub items: Vec<u32>,

    /// Customer name
    #[arg(short, long, default_value = "")]
    pub name: String,

    /// Show each line's price in the order message
    #[arg(long)]
    pub line_prices: bool,
}

impl StoreConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub(crate) fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Options for reading the catalog.
    pub(crate) fn load_options(&self) -> LoadOptions {
        LoadOptions {
            schema: self.schema.into(),
            currency: self.currency,
        }
    }

    /// Order message template for `args`.
    pub(crate) fn template(&self, args: &OrderArgs) -> MessageTemplate {
        MessageTemplate {
            decimal_separator: self.decimal_separator,
            line_prices: args.line_prices,
            ..MessageTemplate::default()
        }
    }
}

fn parse_currency(code: &str) -> Result<&'static Currency, String> {
    match code.trim().to_ascii_uppercase().as_str() {
        "BRL" => Ok(iso::BRL),
        "USD" => Ok(iso::USD),
        "EUR" => Ok(iso::EUR),
        "GBP" => Ok(iso::GBP),
        other => Err(format!("unsupported currency {other:?}")),
    }
}
