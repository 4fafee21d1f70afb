//! Integration tests for the quote fixtures shipped under `fixtures/quotes`.

use std::io::Write;

use rust_decimal::Decimal;
use testresult::TestResult;

use andamio::prelude::*;

#[test]
fn torre_norte_rental_quote() -> TestResult {
    let quote = Fixture::from_set("torre-norte")?;
    let totals = quote.totals();

    // 40 × 6.50 × 30 + 80 × 2 × 30 + 20 × 8 × 15 (own days) + 16 × 1.50 × 30
    assert_eq!(
        totals.line_importes.as_slice(),
        &[
            Decimal::from(7800),
            Decimal::from(4800),
            Decimal::from(2400),
            Decimal::from(720),
        ]
    );
    assert_eq!(totals.subtotal, Decimal::from(15720));
    assert_eq!(totals.discount_amount, Decimal::from(1572));
    assert_eq!(totals.taxable_base, Decimal::from(15648));
    assert_eq!(totals.tax, Decimal::new(250_368, 2));
    assert_eq!(totals.total, Decimal::new(1_815_168, 2));
    assert_eq!(totals.total_weight_kg, Decimal::new(15656, 1));

    let rental = totals.rental.ok_or("rental totals missing")?;

    assert_eq!(rental.daily_rent_subtotal, Decimal::from(604));
    assert_eq!(rental.rent_for_days_subtotal, Decimal::from(18120));
    // The accessory has no sale price, so its daily rate is used
    assert_eq!(rental.total_guarantee, Decimal::from(123_624));

    Ok(())
}

#[test]
fn venta_bodega_sale_quote() -> TestResult {
    let quote = Fixture::from_set("venta-bodega")?;
    let totals = quote.totals();

    assert!(!quote.config().discount().enabled());
    assert_eq!(totals.subtotal, Decimal::from(18050));
    assert_eq!(totals.discount_amount, Decimal::ZERO);
    assert_eq!(totals.tax, Decimal::from(2888));
    assert_eq!(totals.total, Decimal::from(20938));
    assert_eq!(totals.total_weight_kg, Decimal::new(3074, 1));
    assert_eq!(totals.rental, None);

    Ok(())
}

#[test]
fn fixture_summary_renders() -> TestResult {
    let quote = Fixture::from_set("torre-norte")?;

    let mut out = Vec::new();
    quote.summary().write_to(&mut out)?;
    let rendered = String::from_utf8(out)?;

    assert!(rendered.contains("Torre Norte - fachada (Rental)"));
    assert!(rendered.contains("PL-300"));
    assert!(rendered.contains("Rent for 30 days:"));
    assert!(rendered.contains("1565.6 kg"));

    Ok(())
}

#[test]
fn loads_fixture_from_arbitrary_path() -> TestResult {
    let mut file = tempfile::NamedTempFile::new()?;
    writeln!(
        file,
        "currency: USD\nitems:\n  - id: a\n    quantity: 2\n    unit_price: \"100\"\n"
    )?;

    let quote = Quote::try_from(QuoteFixture::from_path(file.path())?)?;

    assert_eq!(quote.currency().iso_alpha_code, "USD");
    assert_eq!(quote.totals().total, Decimal::from(200));

    Ok(())
}

#[test]
fn loads_named_fixture_from_custom_directory() -> TestResult {
    let dir = tempfile::tempdir()?;
    std::fs::create_dir_all(dir.path().join("quotes"))?;
    std::fs::write(
        dir.path().join("quotes").join("tiny.yml"),
        "config:\n  mode: rental\n  rental_days: 2\nitems:\n  - id: a\n    unit_price: \"10\"\n",
    )?;

    let quote = Fixture::with_base_path(dir.path()).quote("tiny")?;

    assert_eq!(quote.totals().subtotal, Decimal::from(20));

    Ok(())
}

#[test]
fn unknown_currency_is_rejected() -> TestResult {
    let fixture = QuoteFixture::from_yaml("currency: XYZ\n")?;

    assert!(matches!(
        Quote::try_from(fixture),
        Err(FixtureError::UnknownCurrency(code)) if code == "XYZ"
    ));

    Ok(())
}
