//! Cart
//!
//! A cart is an append-only list of line snapshots that can be emptied in one
//! go. It is either empty or non-empty; `add` and `clear` are the only
//! transitions between the two.

use std::fmt;

use rusty_money::iso::Currency;
use tracing::debug;

use crate::{
    products::{PriceSchema, Pricing, Product, ProductId},
    totals::{Totals, TotalsError, compute_totals},
};

pub mod observer;

/// A product as it was when it was added to the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine<'a> {
    /// Identifier of the product the line was taken from
    pub product_id: ProductId,

    /// Product name at add time
    pub name: String,

    /// Product pricing at add time
    pub pricing: Pricing<'a>,
}

impl<'a> From<&Product<'a>> for CartLine<'a> {
    fn from(product: &Product<'a>) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            pricing: product.pricing,
        }
    }
}

/// Something that happened to a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// A line was appended.
    Added {
        /// Product the line was taken from
        product_id: ProductId,

        /// Name of the added product
        name: String,

        /// Number of lines after the add
        lines: usize,
    },

    /// Every line was removed.
    Cleared {
        /// Number of lines removed
        removed: usize,
    },
}

impl fmt::Display for CartEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CartEvent::Added { name, .. } => write!(f, "{name} adicionado!"),
            CartEvent::Cleared { .. } => f.write_str("Carrinho esvaziado."),
        }
    }
}

/// Cart
#[derive(Debug, Clone)]
pub struct Cart<'a> {
    lines: Vec<CartLine<'a>>,
    schema: PriceSchema,
    currency: &'static Currency,
}

impl<'a> Cart<'a> {
    /// Create an empty cart for a catalog with the given pricing layout.
    pub fn new(schema: PriceSchema, currency: &'static Currency) -> Self {
        Self {
            lines: Vec::new(),
            schema,
            currency,
        }
    }

    /// Append a line to the end of the cart.
    pub fn add(&mut self, line: CartLine<'a>) -> CartEvent {
        let product_id = line.product_id;
        let name = line.name.clone();

        self.lines.push(line);

        debug!(%product_id, lines = self.lines.len(), "cart line added");

        CartEvent::Added {
            product_id,
            name,
            lines: self.lines.len(),
        }
    }

    /// Snapshot `product` and append it.
    pub fn add_product(&mut self, product: &Product<'a>) -> CartEvent {
        self.add(CartLine::from(product))
    }

    /// Remove every line.
    pub fn clear(&mut self) -> CartEvent {
        let removed = self.lines.len();

        self.lines.clear();

        debug!(removed, "cart cleared");

        CartEvent::Cleared { removed }
    }

    /// Compute the totals for each price tier.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalsError`] if a line is priced in another currency.
    pub fn totals(&self) -> Result<Totals<'a>, TotalsError> {
        compute_totals(&self.lines, self.schema, self.currency)
    }

    /// Iterate over the lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine<'a>> {
        self.lines.iter()
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine<'a>] {
        &self.lines
    }

    /// Get the number of lines in the cart.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Pricing layout of the cart's catalog.
    pub fn schema(&self) -> PriceSchema {
        self.schema
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::BRL};
    use testresult::TestResult;

    use crate::images::ImageRef;

    use super::*;

    fn copo() -> Product<'static> {
        Product {
            id: ProductId(1),
            name: "Copo 300ml".to_string(),
            category: "Copos".to_string(),
            image: ImageRef::default(),
            pricing: Pricing::Single(Money::from_minor(1000, BRL)),
        }
    }

    #[test]
    fn new_cart_is_empty() -> TestResult {
        let cart = Cart::new(PriceSchema::Single, BRL);

        assert!(cart.is_empty());
        assert!(cart.totals()?.is_zero());

        Ok(())
    }

    #[test]
    fn add_appends_and_reports_event() {
        let mut cart = Cart::new(PriceSchema::Single, BRL);

        let event = cart.add_product(&copo());

        assert_eq!(cart.len(), 1);
        assert_eq!(
            event,
            CartEvent::Added {
                product_id: ProductId(1),
                name: "Copo 300ml".to_string(),
                lines: 1,
            }
        );
        assert_eq!(event.to_string(), "Copo 300ml adicionado!");
    }

    #[test]
    fn duplicate_adds_create_duplicate_lines() -> TestResult {
        let mut cart = Cart::new(PriceSchema::Single, BRL);
        let product = copo();

        cart.add_product(&product);
        cart.add_product(&product);

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.lines().first(), cart.lines().get(1));
        assert_eq!(
            cart.totals()?,
            Totals::Single {
                sum: Money::from_minor(2000, BRL)
            }
        );

        Ok(())
    }

    #[test]
    fn line_is_a_snapshot_of_the_product() {
        let mut cart = Cart::new(PriceSchema::Single, BRL);
        let mut product = copo();

        cart.add_product(&product);

        product.name = "Copo 400ml".to_string();
        product.pricing = Pricing::Single(Money::from_minor(9900, BRL));

        let line = cart.iter().next();

        assert_eq!(line.map(|line| line.name.as_str()), Some("Copo 300ml"));
        assert_eq!(
            line.map(|line| line.pricing),
            Some(Pricing::Single(Money::from_minor(1000, BRL)))
        );
    }

    #[test]
    fn lines_keep_insertion_order() {
        let mut cart = Cart::new(PriceSchema::Single, BRL);
        let mut prato = copo();
        prato.id = ProductId(2);
        prato.name = "Prato".to_string();

        cart.add_product(&prato);
        cart.add_product(&copo());

        let ids: Vec<ProductId> = cart.iter().map(|line| line.product_id).collect();

        assert_eq!(ids, vec![ProductId(2), ProductId(1)]);
    }

    #[test]
    fn clear_is_idempotent() -> TestResult {
        let mut cart = Cart::new(PriceSchema::Single, BRL);
        cart.add_product(&copo());

        assert_eq!(cart.clear(), CartEvent::Cleared { removed: 1 });
        assert_eq!(cart.clear(), CartEvent::Cleared { removed: 0 });
        assert!(cart.is_empty());
        assert!(cart.totals()?.is_zero());

        Ok(())
    }
}
