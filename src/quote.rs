//! Quotes
//!
//! A [`Quote`] is an immutable snapshot of everything the totals depend on.
//! Editing a quote (adding a line, changing the discount...) produces a new
//! snapshot which is then recomputed as a whole.

use rusty_money::iso::Currency;
use serde::Serialize;

use crate::{
    config::QuoteConfig,
    items::LineItem,
    summary::QuoteSummary,
    totals::{QuoteTotals, compute_totals},
};

/// Quote snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    name: Option<String>,
    currency: &'static Currency,
    config: QuoteConfig,
    items: Vec<LineItem>,
}

impl Quote {
    /// Create a new quote.
    pub fn new(
        currency: &'static Currency,
        config: QuoteConfig,
        items: impl Into<Vec<LineItem>>,
    ) -> Self {
        Self {
            name: None,
            currency,
            config,
            items: items.into(),
        }
    }

    /// Attach a display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replace the quote configuration.
    #[must_use]
    pub fn with_config(mut self, config: QuoteConfig) -> Self {
        self.config = config;
        self
    }

    /// Append a line.
    #[must_use]
    pub fn with_item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    /// Remove the line at `index`, if any.
    #[must_use]
    pub fn without_item(mut self, index: usize) -> Self {
        if index < self.items.len() {
            self.items.remove(index);
        }
        self
    }

    /// Display name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Currency every amount is expressed in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Quote configuration.
    pub fn config(&self) -> &QuoteConfig {
        &self.config
    }

    /// Lines, in display order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Compute the totals of this snapshot.
    pub fn totals(&self) -> QuoteTotals {
        compute_totals(&self.items, &self.config)
    }

    /// Compute the totals and wrap them for presentation.
    pub fn summary(&self) -> QuoteSummary<'_> {
        QuoteSummary::new(self, self.totals())
    }

    /// Compute the totals and pair them with the inputs, ready to be stored.
    pub fn snapshot(&self) -> QuoteSnapshot<'_> {
        QuoteSnapshot {
            name: self.name(),
            currency: self.currency.iso_alpha_code,
            config: &self.config,
            items: &self.items,
            totals: self.totals(),
        }
    }
}

/// Serializable record of a quote and its computed totals.
#[derive(Debug, Serialize)]
pub struct QuoteSnapshot<'a> {
    /// Display name
    pub name: Option<&'a str>,

    /// ISO currency code
    pub currency: &'static str,

    /// Configuration used
    pub config: &'a QuoteConfig,

    /// Lines used
    pub items: &'a [LineItem],

    /// Totals computed from the above
    pub totals: QuoteTotals,
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::iso::MXN;
    use testresult::TestResult;

    use crate::config::DiscountConfig;

    use super::*;

    fn quote() -> Quote {
        Quote::new(
            MXN,
            QuoteConfig::sale(),
            [
                LineItem::product("a", 1, Decimal::from(100)),
                LineItem::accessory("b", 2, Decimal::from(25)),
            ],
        )
    }

    #[test]
    fn edits_produce_new_snapshots() {
        let original = quote();
        let edited = original
            .clone()
            .with_item(LineItem::product("c", 1, Decimal::from(50)))
            .with_config(QuoteConfig::sale().with_discount(DiscountConfig::new(Decimal::from(10))));

        assert_eq!(original.totals().subtotal, Decimal::from(150));
        assert_eq!(edited.totals().subtotal, Decimal::from(200));
        assert_eq!(edited.totals().discount_amount, Decimal::from(20));
    }

    #[test]
    fn without_item_ignores_out_of_range_index() {
        let quote = quote();

        assert_eq!(quote.clone().without_item(9).items().len(), 2);
        assert_eq!(quote.without_item(0).items().len(), 1);
    }

    #[test]
    fn snapshot_serializes_inputs_and_totals() -> TestResult {
        let quote = quote().with_name("Obra Norte");

        let json = serde_json::to_value(quote.snapshot())?;

        assert_eq!(json["name"], "Obra Norte");
        assert_eq!(json["currency"], "MXN");
        assert_eq!(json["items"][1]["kind"], "accessory");
        assert_eq!(json["totals"]["subtotal"], "150");
        assert_eq!(json["totals"]["rental"], serde_json::Value::Null);

        Ok(())
    }
}
