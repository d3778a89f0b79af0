//! Catalog CSV records

use csv::StringRecord;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use serde::Deserialize;

use crate::{
    catalog::CatalogError,
    images::ImageRef,
    products::{PriceSchema, Pricing, Product, ProductId, money_from_decimal, single_line},
};

/// Columns every catalog must carry.
pub const REQUIRED_COLUMNS: [&str; 4] = ["id", "nome", "categoria", "img"];

/// Price column of the single-price layout.
pub const SINGLE_PRICE_COLUMN: &str = "preco";

/// Price columns of the dual-price layout (Pix, card).
pub const DUAL_PRICE_COLUMNS: [&str; 2] = ["preco_pix", "preco_cartao"];

/// One catalog row, before validation.
#[derive(Debug, Deserialize)]
pub struct ProductRecord {
    /// Product identifier
    pub id: ProductId,

    /// Product name
    pub nome: String,

    /// Product category
    pub categoria: String,

    /// Image reference
    #[serde(default)]
    pub img: Option<String>,

    /// Single price (e.g. "10.00")
    #[serde(default)]
    pub preco: Option<String>,

    /// Pix / cash price
    #[serde(default)]
    pub preco_pix: Option<String>,

    /// Card price
    #[serde(default)]
    pub preco_cartao: Option<String>,
}

impl ProductRecord {
    /// Validate the record into a product priced under `schema`.
    ///
    /// `row` is the 1-based data row, used in error messages.
    ///
    /// # Errors
    ///
    /// Returns an error if a price column required by the schema is empty or
    /// does not hold a non-negative decimal amount.
    pub fn into_product(
        self,
        row: usize,
        schema: PriceSchema,
        currency: &Currency,
    ) -> Result<Product<'_>, CatalogError> {
        let pricing = match schema {
            PriceSchema::Single => Pricing::Single(parse_price(
                row,
                SINGLE_PRICE_COLUMN,
                self.preco.as_deref(),
                currency,
            )?),
            PriceSchema::Dual => Pricing::Dual {
                pix: parse_price(row, "preco_pix", self.preco_pix.as_deref(), currency)?,
                card: parse_price(row, "preco_cartao", self.preco_cartao.as_deref(), currency)?,
            },
        };

        Ok(Product {
            id: self.id,
            name: single_line(&self.nome),
            category: single_line(&self.categoria),
            image: ImageRef::new(self.img.unwrap_or_default()),
            pricing,
        })
    }
}

/// Work out the pricing layout from the header row.
///
/// A `forced` schema skips detection but still requires its columns. With
/// detection, the dual layout wins when both layouts' columns are present.
///
/// # Errors
///
/// Returns [`CatalogError::MissingColumn`] naming the first absent column.
pub fn detect_schema(
    headers: &StringRecord,
    forced: Option<PriceSchema>,
) -> Result<PriceSchema, CatalogError> {
    let has = |column: &str| headers.iter().any(|header| header.trim() == column);

    if let Some(column) = REQUIRED_COLUMNS.iter().copied().find(|column| !has(column)) {
        return Err(CatalogError::MissingColumn(column));
    }

    let schema = match forced {
        Some(schema) => schema,
        None if DUAL_PRICE_COLUMNS.iter().all(|column| has(column)) => PriceSchema::Dual,
        None if has(SINGLE_PRICE_COLUMN) => PriceSchema::Single,
        None => {
            let column = DUAL_PRICE_COLUMNS
                .iter()
                .copied()
                .find(|column| !has(column))
                .unwrap_or(SINGLE_PRICE_COLUMN);

            return Err(CatalogError::MissingColumn(column));
        }
    };

    let needed: &[&'static str] = match schema {
        PriceSchema::Single => &[SINGLE_PRICE_COLUMN],
        PriceSchema::Dual => &DUAL_PRICE_COLUMNS,
    };

    match needed.iter().copied().find(|column| !has(column)) {
        Some(column) => Err(CatalogError::MissingColumn(column)),
        None => Ok(schema),
    }
}

/// Parse a price cell (e.g. "10.50") into money.
///
/// # Errors
///
/// Returns [`CatalogError::InvalidPrice`] if the cell is empty, is not a
/// decimal number, or is negative.
pub fn parse_price<'c>(
    row: usize,
    column: &'static str,
    value: Option<&str>,
    currency: &'c Currency,
) -> Result<Money<'c, Currency>, CatalogError> {
    let raw = value.map(str::trim).unwrap_or_default();

    let invalid = || CatalogError::InvalidPrice {
        row,
        column,
        value: raw.to_string(),
    };

    let amount = raw.parse::<Decimal>().map_err(|_err| invalid())?;

    if amount.is_sign_negative() {
        return Err(invalid());
    }

    money_from_decimal(amount, currency).ok_or_else(invalid)
}
