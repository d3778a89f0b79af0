//! Integration tests for the cart and checkout flow of a single session.

use percent_encoding::percent_decode_str;
use rusty_money::{Money, iso::BRL};
use testresult::TestResult;

use storefront::prelude::*;

const ONE_CUP: &str = "\
id,nome,categoria,preco,img
1,Copo 300ml,Copos,10.00,
";

const DUAL: &str = "\
id,nome,categoria,preco_pix,preco_cartao,img
1,Copo 300ml,Copos,10.00,11.50,
2,Prato Fundo,Pratos,25.50,27.00,
";

fn destination() -> Result<DestinationId, DestinationError> {
    "5511999990000".parse()
}

#[test]
fn adding_the_same_product_twice_doubles_the_total() -> TestResult {
    let catalog = Catalog::from_reader(ONE_CUP.as_bytes(), LoadOptions::default())?;
    let mut session = Session::new(&catalog, destination()?);

    session.add_to_cart(ProductId(1))?;
    session.add_to_cart(ProductId(1))?;

    let lines = session.cart().lines();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines.first(), lines.get(1));
    assert_eq!(
        session.cart().totals()?,
        Totals::Single {
            sum: Money::from_minor(2000, BRL)
        }
    );

    Ok(())
}

#[test]
fn order_message_for_one_cup() -> TestResult {
    let catalog = Catalog::from_reader(ONE_CUP.as_bytes(), LoadOptions::default())?;
    let mut session = Session::new(&catalog, destination()?);
    session.add_to_cart(ProductId(1))?;

    let CheckoutView::Ready { message, link, .. } = session.checkout("Ana")? else {
        panic!("Expected a ready checkout");
    };

    let text: Vec<&str> = message.as_str().lines().collect();

    assert!(text.contains(&"• Copo 300ml"));
    assert!(text.iter().any(|line| line.contains("Total: 10.00")));
    assert_eq!(text.last(), Some(&"Nome do Cliente: Ana"));

    let (base, query) = link
        .as_str()
        .split_once("?text=")
        .ok_or("link has no text parameter")?;

    assert_eq!(base, "https://wa.me/5511999990000");
    assert_eq!(percent_decode_str(query).decode_utf8()?, message.as_str());

    Ok(())
}

#[test]
fn empty_name_never_builds_a_link() -> TestResult {
    let catalog = Catalog::from_reader(ONE_CUP.as_bytes(), LoadOptions::default())?;
    let mut session = Session::new(&catalog, destination()?);
    session.add_to_cart(ProductId(1))?;

    for name in ["", "   "] {
        let view = session.checkout(name)?;

        assert!(view.link().is_none());
        assert_eq!(view.notice(), Some("Preencha seu nome acima"));
    }

    Ok(())
}

#[test]
fn dual_totals_sum_each_tier() -> TestResult {
    let catalog = Catalog::from_reader(DUAL.as_bytes(), LoadOptions::default())?;
    let mut cart = Cart::new(catalog.schema(), catalog.currency());

    for product in catalog.products() {
        cart.add_product(product);
        cart.add_product(product);
    }

    let totals = cart.totals()?;

    for tier in [PriceTier::Pix, PriceTier::Card] {
        let expected: i64 = cart
            .iter()
            .map(|line| line.pricing.price(tier).to_minor_units())
            .sum();

        assert_eq!(totals.tier(tier).to_minor_units(), expected);
    }

    assert_eq!(totals.tier(PriceTier::Pix), Money::from_minor(7100, BRL));
    assert_eq!(totals.tier(PriceTier::Card), Money::from_minor(7700, BRL));

    Ok(())
}

#[test]
fn dual_order_message_shows_both_totals() -> TestResult {
    let catalog = Catalog::from_reader(DUAL.as_bytes(), LoadOptions::default())?;
    let mut session = Session::new(&catalog, destination()?);
    session.add_to_cart(ProductId(1))?;
    session.add_to_cart(ProductId(2))?;

    let CheckoutView::Ready { message, .. } = session.checkout("Ana")? else {
        panic!("Expected a ready checkout");
    };

    assert_eq!(
        message.as_str(),
        "Olá! Gostaria de fazer o seguinte pedido:\n\
         \n\
         • Copo 300ml\n\
         • Prato Fundo\n\
         \n\
         💰 *Total no Pix/Dinheiro: R$ 35.50*\n\
         💳 *Total no Cartão: R$ 38.50*\n\
         \n\
         Nome do Cliente: Ana"
    );

    Ok(())
}

#[test]
fn clear_resets_every_tier_to_zero() -> TestResult {
    let catalog = Catalog::from_reader(DUAL.as_bytes(), LoadOptions::default())?;
    let mut session =
        Session::with_observer(&catalog, destination()?, RecordingObserver::default());

    session.add_to_cart(ProductId(1))?;
    session.add_to_cart(ProductId(2))?;
    session.clear_cart();

    let totals = session.cart().totals()?;

    assert!(session.cart().is_empty());
    assert!(totals.is_zero());
    assert_eq!(session.checkout("Ana")?, CheckoutView::EmptyCart);
    assert_eq!(
        session.observer().events().last(),
        Some(&CartEvent::Cleared { removed: 2 })
    );

    Ok(())
}

#[test]
fn cart_lines_outlive_the_catalog() -> TestResult {
    let catalog = Catalog::from_reader(ONE_CUP.as_bytes(), LoadOptions::default())?;
    let product = catalog.product(ProductId(1)).ok_or("missing product")?;
    let snapshot = CartLine::from(product);

    let mut cart = Cart::new(catalog.schema(), catalog.currency());
    let before = cart.len();
    cart.add_product(product);

    drop(catalog);

    assert_eq!(cart.len(), before + 1);
    assert_eq!(cart.lines().first(), Some(&snapshot));

    Ok(())
}

#[test]
fn message_template_controls_separator_and_line_prices() -> TestResult {
    let catalog = Catalog::from_reader(ONE_CUP.as_bytes(), LoadOptions::default())?;
    let template = MessageTemplate {
        decimal_separator: ',',
        line_prices: true,
        ..MessageTemplate::default()
    };

    let mut session = Session::new(&catalog, destination()?).with_template(template);
    session.add_to_cart(ProductId(1))?;

    let CheckoutView::Ready { message, .. } = session.checkout("Ana")? else {
        panic!("Expected a ready checkout");
    };

    assert!(message.as_str().contains("• Copo 300ml - 10,00"));
    assert!(message.as_str().contains("💰 *Total: 10,00*"));

    Ok(())
}

#[test]
fn multi_line_catalog_name_keeps_one_message_line_per_item() -> TestResult {
    let csv = "id,nome,categoria,preco,img\n1,\"Copo\n300ml\",Copos,10.00,\n";
    let catalog = Catalog::from_reader(csv.as_bytes(), LoadOptions::default())?;
    let mut session = Session::new(&catalog, destination()?);
    session.add_to_cart(ProductId(1))?;

    let CheckoutView::Ready { message, .. } = session.checkout("Ana")? else {
        panic!("Expected a ready checkout");
    };

    assert_eq!(message.line_count(), session.cart().len() + 6);
    assert!(message.as_str().contains("• Copo 300ml\n"));

    Ok(())
}
