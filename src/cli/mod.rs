//! Storefront commands

use std::io;

use rust_decimal::Decimal;
use thiserror::Error;

use storefront::{
    cart::observer::TracingObserver,
    catalog::{Catalog, CatalogError, CatalogFilter},
    products::{PriceTier, ProductId, money_from_decimal},
    render::{self, RenderError},
    session::{Session, SessionError},
    totals::TotalsError,
};

pub(crate) mod config;
pub(crate) mod observability;

use config::{Command, OrderArgs, ProductsArgs, StoreConfig};

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Totals(#[from] TotalsError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("price ceiling {0} is out of range")]
    InvalidPrice(Decimal),
}

impl AppError {
    /// Message shown to the shopper. A missing catalog blocks the whole store.
    pub(crate) fn blocking_message(&self) -> String {
        match self {
            AppError::Catalog(CatalogError::DataUnavailable { path, .. }) => {
                format!("Erro: Arquivo '{}' não encontrado.", path.display())
            }
            other => format!("Erro: {other}"),
        }
    }
}

pub(crate) fn run(config: &StoreConfig) -> Result<(), AppError> {
    let catalog = Catalog::load(&config.catalog, config.load_options())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &config.command {
        Command::Products(args) => list_products(&mut out, &catalog, args),
        Command::Order(args) => place_order(&mut out, &catalog, config, args),
    }
}

fn list_products(
    out: &mut impl io::Write,
    catalog: &Catalog<'_>,
    args: &ProductsArgs,
) -> Result<(), AppError> {
    let max_price = args
        .max_price
        .map(|amount| {
            money_from_decimal(amount, catalog.currency()).ok_or(AppError::InvalidPrice(amount))
        })
        .transpose()?;

    let tier: PriceTier = args.tier.into();

    render::write_filter_options(out, catalog, tier)?;

    let products = catalog.filter(&CatalogFilter {
        category: args.category.clone(),
        max_price,
        tier: Some(tier),
    });

    render::write_products(out, &products, catalog.schema(), catalog.base_dir())?;

    Ok(())
}

fn place_order(
    out: &mut impl io::Write,
    catalog: &Catalog<'_>,
    config: &StoreConfig,
    args: &OrderArgs,
) -> Result<(), AppError> {
    let mut session = Session::with_observer(catalog, args.destination.clone(), TracingObserver)
        .with_template(config.template(args));

    for &id in &args.items {
        session.add_to_cart(ProductId(id))?;
    }

    render::write_cart(out, session.cart(), &session.cart().totals()?)?;

    let view = session.checkout(&args.name)?;

    render::write_checkout(out, &view)?;

    Ok(())
}
