//! Products

use std::fmt;

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use serde::Deserialize;

use crate::images::ImageRef;

/// Product identifier, as written in the catalog's `id` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which pricing layout a catalog uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSchema {
    /// One price per product (`preco`).
    Single,

    /// A Pix/cash price and a card price per product (`preco_pix`, `preco_cartao`).
    Dual,
}

/// One of the two parallel prices of the dual-price layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceTier {
    /// Pix / cash price, the cheaper tier.
    Pix,

    /// Card price.
    Card,
}

/// Product pricing
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pricing<'a> {
    /// A single price.
    Single(Money<'a, Currency>),

    /// Pix/cash and card prices.
    Dual {
        /// Pix / cash price
        pix: Money<'a, Currency>,

        /// Card price
        card: Money<'a, Currency>,
    },
}

impl<'a> Pricing<'a> {
    /// The price charged in the given tier. Single prices apply to every tier.
    pub fn price(&self, tier: PriceTier) -> Money<'a, Currency> {
        match (self, tier) {
            (Pricing::Single(price), _) | (Pricing::Dual { pix: price, .. }, PriceTier::Pix) => {
                *price
            }
            (Pricing::Dual { card, .. }, PriceTier::Card) => *card,
        }
    }

    /// The price used when only one figure is wanted: the single price or the Pix tier.
    pub fn primary(&self) -> Money<'a, Currency> {
        self.price(PriceTier::Pix)
    }

    /// Schema this pricing belongs to.
    pub fn schema(&self) -> PriceSchema {
        match self {
            Pricing::Single(_) => PriceSchema::Single,
            Pricing::Dual { .. } => PriceSchema::Dual,
        }
    }
}

/// Product
#[derive(Debug, Clone)]
pub struct Product<'a> {
    /// Product identifier
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Product category
    pub category: String,

    /// Image reference, resolved lazily by the rendering layer
    pub image: ImageRef,

    /// Product pricing
    pub pricing: Pricing<'a>,
}

/// Convert a decimal amount into money, rounding to whole minor units.
///
/// Returns `None` when the amount does not fit in minor units.
pub fn money_from_decimal(amount: Decimal, currency: &Currency) -> Option<Money<'_, Currency>> {
    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())?;

    Some(Money::from_minor(minor_units, currency))
}

/// Join the lines of `text` with single spaces, dropping blank ones.
///
/// Names end up one per line in the order text, so they never carry a line
/// break of their own.
pub fn single_line(text: &str) -> String {
    text.split(['\r', '\n'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
