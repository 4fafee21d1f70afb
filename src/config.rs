//! Quote Configuration

use std::fmt;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::coerce::non_negative;

/// Whether a quote rents equipment by the day or sells it outright.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteMode {
    /// `importe = quantity × unit_price × days`; guarantee and rent subtotals are computed.
    Rental,

    /// `importe = quantity × unit_price`.
    #[default]
    Sale,
}

impl QuoteMode {
    /// Returns true for rental quotes.
    pub fn is_rental(self) -> bool {
        matches!(self, QuoteMode::Rental)
    }
}

impl fmt::Display for QuoteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteMode::Rental => f.write_str("Rental"),
            QuoteMode::Sale => f.write_str("Sale"),
        }
    }
}

/// Quote-wide percentage discount.
///
/// `percent` is expressed in points (`10` means 10%). Out of range values are
/// kept as given and clamped to `0..=100` whenever the discount is applied.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscountConfig {
    enabled: bool,
    percent: Decimal,
}

impl DiscountConfig {
    /// An enabled discount of `percent` points.
    pub fn new(percent: Decimal) -> Self {
        Self {
            enabled: true,
            percent,
        }
    }

    /// No discount.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Turn the discount on or off, keeping its percentage.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Whether the discount applies.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// The percentage exactly as configured.
    pub fn percent(&self) -> Decimal {
        self.percent
    }

    /// The percentage clamped to `0..=100`.
    pub fn clamped_percent(&self) -> Decimal {
        self.percent.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
    }

    /// The fraction of the subtotal to take off, zero when disabled.
    pub fn fraction(&self) -> Percentage {
        if self.enabled {
            Percentage::from(self.clamped_percent() / Decimal::ONE_HUNDRED)
        } else {
            Percentage::from(Decimal::ZERO)
        }
    }
}

/// Quote-level settings shared by every line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteConfig {
    mode: QuoteMode,
    rental_days: u32,
    discount: DiscountConfig,
    apply_tax: bool,
    shipping_cost: Decimal,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            mode: QuoteMode::default(),
            rental_days: 1,
            discount: DiscountConfig::disabled(),
            apply_tax: false,
            shipping_cost: Decimal::ZERO,
        }
    }
}

impl QuoteConfig {
    /// A sale quote with no discount, tax or shipping.
    pub fn sale() -> Self {
        Self::default()
    }

    /// A rental quote for `rental_days` days with no discount, tax or shipping.
    pub fn rental(rental_days: u32) -> Self {
        Self {
            mode: QuoteMode::Rental,
            ..Self::default()
        }
        .with_rental_days(rental_days)
    }

    /// Change the quote mode.
    #[must_use]
    pub fn with_mode(mut self, mode: QuoteMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the default rental days (zero becomes one).
    #[must_use]
    pub fn with_rental_days(mut self, rental_days: u32) -> Self {
        self.rental_days = rental_days.max(1);
        self
    }

    /// Set the quote discount.
    #[must_use]
    pub fn with_discount(mut self, discount: DiscountConfig) -> Self {
        self.discount = discount;
        self
    }

    /// Enable or disable the 16% tax.
    #[must_use]
    pub fn with_tax(mut self, apply_tax: bool) -> Self {
        self.apply_tax = apply_tax;
        self
    }

    /// Set the shipping cost (negative becomes zero).
    #[must_use]
    pub fn with_shipping_cost(mut self, shipping_cost: Decimal) -> Self {
        self.shipping_cost = non_negative(shipping_cost);
        self
    }

    /// Rental or sale.
    pub fn mode(&self) -> QuoteMode {
        self.mode
    }

    /// Rental days for lines without their own override, at least one.
    pub fn rental_days(&self) -> u32 {
        self.rental_days.max(1)
    }

    /// The quote discount.
    pub fn discount(&self) -> DiscountConfig {
        self.discount
    }

    /// Whether tax is charged.
    pub fn apply_tax(&self) -> bool {
        self.apply_tax
    }

    /// Shipping cost, never negative.
    pub fn shipping_cost(&self) -> Decimal {
        non_negative(self.shipping_cost)
    }
}
