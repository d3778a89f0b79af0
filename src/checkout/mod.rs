//! Checkout
//!
//! Turns a cart into the plain-text order sent to the shop, and that text
//! into a messaging link.
//!
//! The message layout is fixed:
//!
//! ```text
//! Olá! Gostaria de fazer o seguinte pedido:
//!
//! • Copo 300ml
//! • Prato Fundo
//!
//! 💰 *Total no Pix/Dinheiro: R$ 35.50*
//! 💳 *Total no Cartão: R$ 38.50*
//!
//! Nome do Cliente: Ana
//! ```
//!
//! Single-price catalogs get one `💰 *Total: 35.50*` line instead of the two
//! tier lines.

use std::fmt;

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    cart::{Cart, CartLine},
    products::{PriceTier, Pricing, single_line},
    totals::Totals,
};

pub mod link;

pub use link::{CheckoutError, CheckoutLink, DestinationError, DestinationId, build_checkout_link};

/// Default opening line of the order message.
pub const GREETING: &str = "Olá! Gostaria de fazer o seguinte pedido:";

/// Label in front of the customer's name.
pub const CUSTOMER_LABEL: &str = "Nome do Cliente:";

/// Reasons an order message is withheld.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderMessageError {
    /// There is nothing to order.
    #[error("cart is empty")]
    EmptyCart,

    /// The customer has not given a name.
    #[error("customer name is required")]
    MissingCustomerName,
}

/// Formatting choices for the order message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    /// Opening line
    pub greeting: String,

    /// Character between whole and fractional amounts
    pub decimal_separator: char,

    /// Append each line's price after its name
    pub line_prices: bool,
}

impl Default for MessageTemplate {
    fn default() -> Self {
        Self {
            greeting: GREETING.to_string(),
            decimal_separator: '.',
            line_prices: false,
        }
    }
}

impl MessageTemplate {
    /// Render the order message.
    ///
    /// # Errors
    ///
    /// Returns [`OrderMessageError::EmptyCart`] for an empty cart and
    /// [`OrderMessageError::MissingCustomerName`] when `customer_name` is blank.
    pub fn render(
        &self,
        cart: &Cart<'_>,
        customer_name: &str,
        totals: &Totals<'_>,
    ) -> Result<OrderMessage, OrderMessageError> {
        if cart.is_empty() {
            return Err(OrderMessageError::EmptyCart);
        }

        let customer_name = single_line(customer_name);

        if customer_name.is_empty() {
            return Err(OrderMessageError::MissingCustomerName);
        }

        let mut lines = Vec::with_capacity(cart.len() + 7);

        lines.push(self.greeting.clone());
        lines.push(String::new());
        lines.extend(cart.iter().map(|line| self.item_line(line)));
        lines.push(String::new());
        lines.extend(self.total_lines(totals));
        lines.push(String::new());
        lines.push(format!("{CUSTOMER_LABEL} {customer_name}"));

        Ok(OrderMessage(lines.join("\n")))
    }

    fn item_line(&self, line: &CartLine<'_>) -> String {
        let name = single_line(&line.name);

        if !self.line_prices {
            return format!("• {name}");
        }

        match line.pricing {
            Pricing::Single(price) => format!("• {name} - {}", self.amount(&price)),
            Pricing::Dual { pix, card } => format!(
                "• {name} - {} / {}",
                self.amount(&pix),
                self.amount(&card)
            ),
        }
    }

    fn total_lines(&self, totals: &Totals<'_>) -> Vec<String> {
        match totals {
            Totals::Single { sum } => vec![format!("💰 *Total: {}*", self.amount(sum))],
            Totals::Dual { .. } => vec![
                format!(
                    "💰 *Total no Pix/Dinheiro: R$ {}*",
                    self.amount(&totals.tier(PriceTier::Pix))
                ),
                format!(
                    "💳 *Total no Cartão: R$ {}*",
                    self.amount(&totals.tier(PriceTier::Card))
                ),
            ],
        }
    }

    fn amount(&self, money: &Money<'_, Currency>) -> String {
        format_amount(money, self.decimal_separator)
    }
}

/// A rendered order message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderMessage(String);

impl OrderMessage {
    /// The message text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of text lines, blank lines included.
    pub fn line_count(&self) -> usize {
        self.0.lines().count()
    }
}

impl fmt::Display for OrderMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Format an amount with exactly two decimals and no grouping.
pub fn format_amount(money: &Money<'_, Currency>, decimal_separator: char) -> String {
    let formatted = format!("{:.2}", money.amount());

    if decimal_separator == '.' {
        formatted
    } else {
        formatted.replace('.', &decimal_separator.to_string())
    }
}

/// Render the order message with the default template.
///
/// # Errors
///
/// See [`MessageTemplate::render`].
pub fn build_order_message(
    cart: &Cart<'_>,
    customer_name: &str,
    totals: &Totals<'_>,
) -> Result<OrderMessage, OrderMessageError> {
    MessageTemplate::default().render(cart, customer_name, totals)
}
