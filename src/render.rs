//! Terminal rendering
//!
//! Plain-text views of the catalog, the cart and the checkout state, written
//! to any [`io::Write`].

use std::{io, path::Path};

use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{
    cart::Cart,
    catalog::{Catalog, CategoryFilter},
    checkout::format_amount,
    images::Thumbnail,
    products::{PriceSchema, PriceTier, Pricing, Product},
    session::CheckoutView,
    totals::Totals,
};

/// Shown when a filter leaves nothing.
pub const NO_PRODUCTS_NOTICE: &str = "Nenhum produto encontrado.";

/// Rendering errors
#[derive(Debug, Error)]
pub enum RenderError {
    /// Writing to the output failed.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// Write the category choices and the price range a filter can use.
///
/// # Errors
///
/// Returns [`RenderError::Io`] if writing fails.
pub fn write_filter_options(
    out: &mut impl io::Write,
    catalog: &Catalog<'_>,
    tier: PriceTier,
) -> Result<(), RenderError> {
    let mut categories = vec![CategoryFilter::All.to_string()];
    categories.extend(catalog.categories().into_iter().map(str::to_string));

    let tier_label = match tier {
        PriceTier::Pix => "Pix",
        PriceTier::Card => "Cartão",
    };

    writeln!(out, "Categoria: {}", categories.join(", "))?;
    writeln!(
        out,
        "Até R$ ({tier_label}): 0.00 - {}",
        format_amount(&catalog.price_ceiling(tier), '.')
    )?;

    Ok(())
}

/// Write the result count and a table of `products`.
///
/// Images are resolved against `image_dir`; unavailable ones show the
/// placeholder text.
///
/// # Errors
///
/// Returns [`RenderError::Io`] if writing fails.
pub fn write_products(
    out: &mut impl io::Write,
    products: &[&Product<'_>],
    schema: PriceSchema,
    image_dir: &Path,
) -> Result<(), RenderError> {
    writeln!(out, "{} produtos encontrados", products.len())?;

    if products.is_empty() {
        writeln!(out, "{NO_PRODUCTS_NOTICE}")?;
        return Ok(());
    }

    let mut builder = Builder::default();

    match schema {
        PriceSchema::Single => builder.push_record(["ID", "Produto", "Categoria", "Preço", "Imagem"]),
        PriceSchema::Dual => builder.push_record([
            "ID",
            "Produto",
            "Categoria",
            "Pix",
            "Cartão",
            "Imagem",
        ]),
    }

    for product in products {
        let mut record = vec![
            product.id.to_string(),
            product.name.clone(),
            product.category.clone(),
        ];

        record.extend(price_cells(&product.pricing));
        record.push(Thumbnail::for_image(&product.image, image_dir).label());

        builder.push_record(record);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.modify(Columns::first(), Alignment::right());

    writeln!(out, "{table}")?;

    Ok(())
}

/// Write the cart lines and totals.
///
/// # Errors
///
/// Returns [`RenderError::Io`] if writing fails.
pub fn write_cart(
    out: &mut impl io::Write,
    cart: &Cart<'_>,
    totals: &Totals<'_>,
) -> Result<(), RenderError> {
    writeln!(out, "🛒 Carrinho ({})", cart.len())?;

    if cart.is_empty() {
        return Ok(());
    }

    let mut builder = Builder::default();
    builder.push_record(["Item", "Preço"]);

    for line in cart.iter() {
        builder.push_record([format!("• {}", line.name), price_cells(&line.pricing).join(" / ")]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.modify(Columns::last(), Alignment::right());

    writeln!(out, "{table}")?;

    match totals {
        Totals::Single { sum } => writeln!(out, "Total: R$ {}", format_amount(sum, '.'))?,
        Totals::Dual { pix, card } => {
            writeln!(out, "Total no PIX/Dinheiro: R$ {}", format_amount(pix, '.'))?;
            writeln!(out, "Total no Cartão: R$ {}", format_amount(card, '.'))?;
        }
    }

    Ok(())
}

/// Write the checkout state: the notice, or the message and its link.
///
/// # Errors
///
/// Returns [`RenderError::Io`] if writing fails.
pub fn write_checkout(out: &mut impl io::Write, view: &CheckoutView<'_>) -> Result<(), RenderError> {
    if let Some(notice) = view.notice() {
        writeln!(out, "{notice}")?;
    }

    if let CheckoutView::Ready { message, link, .. } = view {
        writeln!(out, "\n{message}\n")?;
        writeln!(out, "Enviar no WhatsApp ➤ {link}")?;
    }

    Ok(())
}

fn price_cells(pricing: &Pricing<'_>) -> Vec<String> {
    match pricing {
        Pricing::Single(price) => vec![format_amount(price, '.')],
        Pricing::Dual { pix, card } => vec![format_amount(pix, '.'), format_amount(card, '.')],
    }
}
