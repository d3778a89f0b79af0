//! Session
//!
//! One shopper's view of the store: a borrowed catalog, an owned cart, and the
//! checkout settings fixed at deployment time. Sessions never share carts.

use thiserror::Error;
use tracing::info;

use crate::{
    cart::{
        Cart, CartEvent, CartLine,
        observer::{CartObserver, NoopObserver},
    },
    catalog::Catalog,
    checkout::{
        CheckoutError, CheckoutLink, DestinationId, MessageTemplate, OrderMessage,
        OrderMessageError, build_checkout_link,
    },
    products::ProductId,
    totals::{Totals, TotalsError},
};

/// Notice shown instead of checkout when the cart is empty.
pub const EMPTY_CART_NOTICE: &str = "Seu carrinho está vazio.";

/// Warning shown until the customer fills in a name.
pub const MISSING_NAME_NOTICE: &str = "Preencha seu nome acima";

/// Session errors
#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    /// The product id is not in the catalog.
    #[error("product {0} is not in the catalog")]
    UnknownProduct(ProductId),

    /// Totals could not be computed.
    #[error(transparent)]
    Totals(#[from] TotalsError),

    /// The checkout link could not be built.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),
}

/// What the checkout area shows for the current cart.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutView<'a> {
    /// Nothing to check out.
    EmptyCart,

    /// Totals are known but the customer still has to give a name.
    MissingCustomerName {
        /// Current totals
        totals: Totals<'a>,
    },

    /// Everything needed to send the order.
    Ready {
        /// Current totals
        totals: Totals<'a>,

        /// Order text
        message: OrderMessage,

        /// Link that sends the order text
        link: CheckoutLink,
    },
}

impl CheckoutView<'_> {
    /// Informational notice for the states that cannot check out yet.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            CheckoutView::EmptyCart => Some(EMPTY_CART_NOTICE),
            CheckoutView::MissingCustomerName { .. } => Some(MISSING_NAME_NOTICE),
            CheckoutView::Ready { .. } => None,
        }
    }

    /// The checkout link, only present once the order is ready.
    pub fn link(&self) -> Option<&CheckoutLink> {
        match self {
            CheckoutView::Ready { link, .. } => Some(link),
            _ => None,
        }
    }
}

/// Session
#[derive(Debug)]
pub struct Session<'c, 'a, O: CartObserver = NoopObserver> {
    catalog: &'c Catalog<'a>,
    cart: Cart<'a>,
    destination: DestinationId,
    template: MessageTemplate,
    observer: O,
}

impl<'c, 'a> Session<'c, 'a> {
    /// Start a session with an empty cart and no observer.
    pub fn new(catalog: &'c Catalog<'a>, destination: DestinationId) -> Self {
        Self::with_observer(catalog, destination, NoopObserver)
    }
}

impl<'c, 'a, O: CartObserver> Session<'c, 'a, O> {
    /// Start a session with an empty cart, notifying `observer` of cart changes.
    pub fn with_observer(catalog: &'c Catalog<'a>, destination: DestinationId, observer: O) -> Self {
        Self {
            catalog,
            cart: Cart::new(catalog.schema(), catalog.currency()),
            destination,
            template: MessageTemplate::default(),
            observer,
        }
    }

    /// Use `template` for the order message.
    #[must_use]
    pub fn with_template(mut self, template: MessageTemplate) -> Self {
        self.template = template;
        self
    }

    /// Snapshot the product into a new cart line.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownProduct`] if the id is not in the catalog.
    pub fn add_to_cart(&mut self, product_id: ProductId) -> Result<CartEvent, SessionError> {
        let product = self
            .catalog
            .product(product_id)
            .ok_or(SessionError::UnknownProduct(product_id))?;

        let event = self.cart.add(CartLine::from(product));
        self.notify(&event);

        Ok(event)
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        let event = self.cart.clear();
        self.notify(&event);
    }

    /// Work out what checkout can offer for the current cart.
    ///
    /// The link is only built once the cart has lines and `customer_name` is
    /// not blank.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if totals cannot be summed or the link does
    /// not parse.
    pub fn checkout(&self, customer_name: &str) -> Result<CheckoutView<'a>, SessionError> {
        if self.cart.is_empty() {
            return Ok(CheckoutView::EmptyCart);
        }

        let totals = self.cart.totals()?;

        let message = match self.template.render(&self.cart, customer_name, &totals) {
            Ok(message) => message,
            Err(OrderMessageError::MissingCustomerName) => {
                return Ok(CheckoutView::MissingCustomerName { totals });
            }
            Err(OrderMessageError::EmptyCart) => return Ok(CheckoutView::EmptyCart),
        };

        let link = build_checkout_link(message.as_str(), &self.destination)?;

        info!(
            lines = self.cart.len(),
            destination = %self.destination,
            "checkout link built"
        );

        Ok(CheckoutView::Ready {
            totals,
            message,
            link,
        })
    }

    /// The session's cart.
    pub fn cart(&self) -> &Cart<'a> {
        &self.cart
    }

    /// The session's observer.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    fn notify(&mut self, event: &CartEvent) {
        self.observer.on_cart_event(event);
    }
}
