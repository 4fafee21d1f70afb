//! Command line arguments for the `andamio` binary.
//!
//! Settings are layered: the quote fixture provides the base configuration and
//! every flag given on the command line (or through its `ANDAMIO_*` environment
//! variable) overrides it.

use std::path::PathBuf;

use clap::{Parser, ValueEnum, builder::BoolishValueParser};
use rust_decimal::Decimal;

use crate::{
    config::{DiscountConfig, QuoteMode},
    fixtures::{FixtureError, parse_amount, parse_percentage},
    quote::Quote,
};

/// Quote mode as accepted on the command line.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Daily rental
    Rental,
    /// Outright sale
    Sale,
}

impl From<ModeArg> for QuoteMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Rental => QuoteMode::Rental,
            ModeArg::Sale => QuoteMode::Sale,
        }
    }
}

/// Compute and print the totals of a quote fixture.
#[derive(Debug, Parser)]
#[command(name = "andamio", version, about)]
pub struct QuoteArgs {
    /// Quote fixture (YAML) to load
    #[arg(short, long, env = "ANDAMIO_FIXTURE")]
    pub fixture: PathBuf,

    /// Override the quote mode
    #[arg(short, long, env = "ANDAMIO_MODE", value_enum)]
    pub mode: Option<ModeArg>,

    /// Override the default rental days
    #[arg(short, long, env = "ANDAMIO_DAYS")]
    pub days: Option<u32>,

    /// Apply a discount, in percent (e.g. "10" or "10%")
    #[arg(long, env = "ANDAMIO_DISCOUNT", value_parser = percentage_arg, conflicts_with = "no_discount")]
    pub discount: Option<Decimal>,

    /// Disable the fixture's discount
    #[arg(long)]
    pub no_discount: bool,

    /// Charge tax (true/false)
    #[arg(long, env = "ANDAMIO_TAX", value_parser = BoolishValueParser::new())]
    pub tax: Option<bool>,

    /// Override the shipping cost
    #[arg(long, env = "ANDAMIO_SHIPPING", value_parser = amount_arg)]
    pub shipping: Option<Decimal>,

    /// Print a JSON snapshot instead of the table
    #[arg(long)]
    pub json: bool,

    /// Log filter, used when `RUST_LOG` is not set
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl QuoteArgs {
    /// Apply the command line overrides to a quote loaded from its fixture.
    pub fn apply(&self, quote: Quote) -> Quote {
        let mut config = quote.config().clone();

        if let Some(mode) = self.mode {
            config = config.with_mode(mode.into());
        }

        if let Some(days) = self.days {
            config = config.with_rental_days(days);
        }

        if let Some(percent) = self.discount {
            config = config.with_discount(DiscountConfig::new(percent));
        }

        if self.no_discount {
            let discount = config.discount().with_enabled(false);
            config = config.with_discount(discount);
        }

        if let Some(apply_tax) = self.tax {
            config = config.with_tax(apply_tax);
        }

        if let Some(shipping) = self.shipping {
            config = config.with_shipping_cost(shipping);
        }

        quote.with_config(config)
    }
}

fn percentage_arg(s: &str) -> Result<Decimal, FixtureError> {
    parse_percentage(s)
}

fn amount_arg(s: &str) -> Result<Decimal, FixtureError> {
    parse_amount(s)
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::MXN;
    use testresult::TestResult;

    use crate::{config::QuoteConfig, items::LineItem};

    use super::*;

    fn quote() -> Quote {
        Quote::new(
            MXN,
            QuoteConfig::sale().with_discount(DiscountConfig::new(Decimal::from(5))),
            [LineItem::product("MT-200", 2, Decimal::from(100))],
        )
    }

    #[test]
    fn no_flags_keep_fixture_config() -> TestResult {
        let args = QuoteArgs::try_parse_from(["andamio", "-f", "quote.yml"])?;

        let quote = args.apply(quote());

        assert_eq!(
            quote.config(),
            &QuoteConfig::sale().with_discount(DiscountConfig::new(Decimal::from(5)))
        );

        Ok(())
    }

    #[test]
    fn flags_override_fixture_config() -> TestResult {
        let args = QuoteArgs::try_parse_from([
            "andamio",
            "--fixture",
            "quote.yml",
            "--mode",
            "rental",
            "--days",
            "3",
            "--discount",
            "10%",
            "--tax",
            "true",
            "--shipping",
            "50",
        ])?;

        let totals = args.apply(quote()).totals();

        // 2 × 100 × 3 = 600, -60, +50
        assert_eq!(totals.subtotal, Decimal::from(600));
        assert_eq!(totals.discount_amount, Decimal::from(60));
        assert_eq!(totals.taxable_base, Decimal::from(590));
        assert_eq!(totals.tax, Decimal::new(9440, 2));

        Ok(())
    }

    #[test]
    fn no_discount_disables_fixture_discount() -> TestResult {
        let args = QuoteArgs::try_parse_from(["andamio", "-f", "q.yml", "--no-discount"])?;

        let quote = args.apply(quote());

        assert!(!quote.config().discount().enabled());
        assert_eq!(quote.totals().discount_amount, Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn invalid_values_are_rejected() {
        let parse = |extra: &[&str]| {
            QuoteArgs::try_parse_from(["andamio", "-f", "q.yml"].iter().chain(extra))
        };

        assert!(parse(&["--discount", "120"]).is_err());
        assert!(parse(&["--shipping", "-1"]).is_err());
        assert!(parse(&["--discount", "5", "--no-discount"]).is_err());
        assert!(parse(&["--mode", "lease"]).is_err());
    }
}
