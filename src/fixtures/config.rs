//! Quote Configuration Fixtures

use serde::Deserialize;

use crate::{
    config::{DiscountConfig, QuoteConfig, QuoteMode},
    fixtures::{FixtureError, parse_amount, parse_percentage},
};

/// Discount configuration from YAML fixtures
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiscountFixture {
    /// Percentage points (e.g., "10%" or "10")
    pub percent: String,

    /// Whether the discount applies, defaults to true
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

/// Quote configuration from YAML fixtures
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFixture {
    /// Rental or sale
    pub mode: QuoteMode,

    /// Default rental days
    pub rental_days: Option<u32>,

    /// Optional discount
    pub discount: Option<DiscountFixture>,

    /// Whether to charge tax
    pub apply_tax: bool,

    /// Shipping cost (e.g., "350.00")
    pub shipping_cost: Option<String>,
}

impl TryFrom<DiscountFixture> for DiscountConfig {
    type Error = FixtureError;

    fn try_from(fixture: DiscountFixture) -> Result<Self, Self::Error> {
        let percent = parse_percentage(&fixture.percent)?;

        Ok(DiscountConfig::new(percent).with_enabled(fixture.enabled))
    }
}

impl TryFrom<ConfigFixture> for QuoteConfig {
    type Error = FixtureError;

    fn try_from(fixture: ConfigFixture) -> Result<Self, Self::Error> {
        let discount = fixture
            .discount
            .map(DiscountConfig::try_from)
            .transpose()?
            .unwrap_or_default();

        let shipping_cost = fixture
            .shipping_cost
            .as_deref()
            .map(parse_amount)
            .transpose()?
            .unwrap_or_default();

        Ok(QuoteConfig::default()
            .with_mode(fixture.mode)
            .with_rental_days(fixture.rental_days.unwrap_or(1))
            .with_discount(discount)
            .with_tax(fixture.apply_tax)
            .with_shipping_cost(shipping_cost))
    }
}
