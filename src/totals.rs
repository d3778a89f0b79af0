//! Totals

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::{
    cart::CartLine,
    products::{PriceSchema, PriceTier},
};

/// Errors that can occur while summing cart lines.
#[derive(Debug, Error, PartialEq)]
pub enum TotalsError {
    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Cart totals, one per price tier of the catalog's schema.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Totals<'a> {
    /// Single-price total.
    Single {
        /// Sum of line prices
        sum: Money<'a, Currency>,
    },

    /// Dual-price totals.
    Dual {
        /// Sum of Pix / cash prices
        pix: Money<'a, Currency>,

        /// Sum of card prices
        card: Money<'a, Currency>,
    },
}

impl<'a> Totals<'a> {
    /// Total charged in `tier`. A single total applies to every tier.
    pub fn tier(&self, tier: PriceTier) -> Money<'a, Currency> {
        match (self, tier) {
            (Totals::Single { sum }, _) | (Totals::Dual { pix: sum, .. }, PriceTier::Pix) => *sum,
            (Totals::Dual { card, .. }, PriceTier::Card) => *card,
        }
    }

    /// Whether every tier sums to zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Totals::Single { sum } => sum.is_zero(),
            Totals::Dual { pix, card } => pix.is_zero() && card.is_zero(),
        }
    }
}

/// Sum the lines' prices in `tier`.
///
/// # Errors
///
/// Returns [`TotalsError::Money`] if a line is priced in another currency.
pub fn tier_total<'a>(
    lines: &[CartLine<'a>],
    tier: PriceTier,
    currency: &'a Currency,
) -> Result<Money<'a, Currency>, TotalsError> {
    let total = lines.iter().try_fold(Money::from_minor(0, currency), |acc, line| {
        acc.add(line.pricing.price(tier))
    })?;

    Ok(total)
}

/// Compute the totals of `lines` for a catalog priced under `schema`.
///
/// # Errors
///
/// Returns [`TotalsError::Money`] if a line is priced in another currency.
pub fn compute_totals<'a>(
    lines: &[CartLine<'a>],
    schema: PriceSchema,
    currency: &'a Currency,
) -> Result<Totals<'a>, TotalsError> {
    Ok(match schema {
        PriceSchema::Single => Totals::Single {
            sum: tier_total(lines, PriceTier::Pix, currency)?,
        },
        PriceSchema::Dual => Totals::Dual {
            pix: tier_total(lines, PriceTier::Pix, currency)?,
            card: tier_total(lines, PriceTier::Card, currency)?,
        },
    })
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{BRL, USD};
    use testresult::TestResult;

    use crate::products::{Pricing, ProductId};

    use super::*;

    fn line(id: u32, pix: i64, card: i64) -> CartLine<'static> {
        CartLine {
            product_id: ProductId(id),
            name: format!("Produto {id}"),
            pricing: Pricing::Dual {
                pix: Money::from_minor(pix, BRL),
                card: Money::from_minor(card, BRL),
            },
        }
    }

    #[test]
    fn dual_totals_sum_each_tier_independently() -> TestResult {
        let lines = [line(1, 1000, 1150), line(2, 2550, 2700)];

        let totals = compute_totals(&lines, PriceSchema::Dual, BRL)?;

        assert_eq!(
            totals,
            Totals::Dual {
                pix: Money::from_minor(3550, BRL),
                card: Money::from_minor(3850, BRL),
            }
        );

        Ok(())
    }

    #[test]
    fn single_totals_use_primary_price() -> TestResult {
        let lines = [line(1, 1000, 1150)];

        let totals = compute_totals(&lines, PriceSchema::Single, BRL)?;

        assert_eq!(
            totals,
            Totals::Single {
                sum: Money::from_minor(1000, BRL)
            }
        );
        assert_eq!(totals.tier(PriceTier::Card), Money::from_minor(1000, BRL));

        Ok(())
    }

    #[test]
    fn no_lines_total_zero() -> TestResult {
        let totals = compute_totals(&[], PriceSchema::Dual, BRL)?;

        assert!(totals.is_zero());

        Ok(())
    }

    #[test]
    fn currency_mismatch_errors() {
        let lines = [CartLine {
            product_id: ProductId(1),
            name: "Cup".to_string(),
            pricing: Pricing::Single(Money::from_minor(100, USD)),
        }];

        let result = tier_total(&lines, PriceTier::Pix, BRL);

        assert!(matches!(result, Err(TotalsError::Money(_))));
    }
}
