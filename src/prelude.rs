//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{
        Cart, CartEvent, CartLine,
        observer::{CartObserver, NoopObserver, RecordingObserver, TracingObserver},
    },
    catalog::{
        Catalog, CatalogError, CatalogFilter, CategoryFilter, LoadOptions, filter_by_category,
        filter_by_max_price, filter_by_max_price_on,
    },
    checkout::{
        CheckoutError, CheckoutLink, DestinationError, DestinationId, MessageTemplate,
        OrderMessage, OrderMessageError, build_checkout_link, build_order_message,
    },
    images::{ImageHandle, ImageRef, ImageUnavailable, Thumbnail},
    products::{PriceSchema, PriceTier, Pricing, Product, ProductId},
    session::{CheckoutView, Session, SessionError},
    totals::{Totals, TotalsError, compute_totals},
};
