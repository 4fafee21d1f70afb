//! Quote Summary
//!
//! Presentation of a quote and its totals as a terminal table. This is the only
//! place amounts are rounded, to the currency's minor units.

use std::io;

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{
    items::LineItem,
    quote::Quote,
    totals::{QuoteTotals, TAX_RATE, effective_days},
};

/// Errors that can occur when rendering a summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// The amount does not fit in minor units.
    #[error("amount {0} cannot be represented in minor units")]
    Amount(Decimal),

    /// Writing to the output failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Round an amount to minor units and wrap it as money for display.
///
/// # Errors
///
/// Returns [`SummaryError::Amount`] if the amount overflows `i64` minor units.
pub fn to_money(
    amount: Decimal,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, SummaryError> {
    let minor = amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|value| value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|value| value.to_i64())
        .ok_or(SummaryError::Amount(amount))?;

    Ok(Money::from_minor(minor, currency))
}

/// A quote paired with its computed totals.
#[derive(Debug)]
pub struct QuoteSummary<'a> {
    quote: &'a Quote,
    totals: QuoteTotals,
}

impl<'a> QuoteSummary<'a> {
    /// Wrap a quote and the totals computed from it.
    pub fn new(quote: &'a Quote, totals: QuoteTotals) -> Self {
        Self { quote, totals }
    }

    /// The computed totals.
    pub fn totals(&self) -> &QuoteTotals {
        &self.totals
    }

    /// Write the line table followed by the totals.
    ///
    /// # Errors
    ///
    /// Returns an error if an amount cannot be formatted or writing fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), SummaryError> {
        if let Some(name) = self.quote.name() {
            writeln!(out, "{name} ({})", self.quote.config().mode())?;
        }

        let table = self.item_table()?;

        writeln!(out, "{table}")?;

        let lines = self.summary_lines()?;

        let label_width = lines.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
        let value_width = lines.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

        for (label, value) in &lines {
            writeln!(out, " {label:<label_width$}  {value:>value_width$}")?;
        }

        Ok(())
    }

    fn item_table(&self) -> Result<String, SummaryError> {
        let mut builder = Builder::default();

        builder.push_record([
            "#",
            "Item",
            "Kind",
            "Qty",
            "Unit Price",
            "Days",
            "Importe",
            "Weight (kg)",
        ]);

        for (idx, (item, importe)) in self
            .quote
            .items()
            .iter()
            .zip(self.totals.line_importes.iter())
            .enumerate()
        {
            builder.push_record(self.item_row(idx, item, *importe)?);
        }

        let mut table = builder.build();

        table.with(Style::rounded());
        table.modify(Columns::new(3..), Alignment::right());

        Ok(table.to_string())
    }

    fn item_row(
        &self,
        idx: usize,
        item: &LineItem,
        importe: Decimal,
    ) -> Result<[String; 8], SummaryError> {
        let currency = self.quote.currency();
        let config = self.quote.config();

        let days = if config.mode().is_rental() {
            effective_days(item, config).to_string()
        } else {
            String::new()
        };

        Ok([
            (idx + 1).to_string(),
            item.id().to_string(),
            item.kind().to_string(),
            item.quantity().to_string(),
            to_money(item.unit_price(), currency)?.to_string(),
            days,
            to_money(importe, currency)?.to_string(),
            format_weight(item.line_weight_kg()),
        ])
    }

    fn summary_lines(&self) -> Result<Vec<(String, String)>, SummaryError> {
        let currency = self.quote.currency();
        let config = self.quote.config();
        let totals = &self.totals;

        let mut lines = vec![(
            "Subtotal:".to_string(),
            to_money(totals.subtotal, currency)?.to_string(),
        )];

        let discount = config.discount();
        if discount.enabled() {
            lines.push((
                format!("Discount ({}%):", discount.clamped_percent().normalize()),
                format!("-{}", to_money(totals.discount_amount, currency)?),
            ));
        }

        if !config.shipping_cost().is_zero() {
            lines.push((
                "Shipping:".to_string(),
                to_money(config.shipping_cost(), currency)?.to_string(),
            ));
        }

        lines.push((
            "Taxable base:".to_string(),
            to_money(totals.taxable_base, currency)?.to_string(),
        ));

        if config.apply_tax() {
            lines.push((
                format!("IVA ({}%):", (TAX_RATE * Decimal::ONE_HUNDRED).normalize()),
                to_money(totals.tax, currency)?.to_string(),
            ));
        }

        lines.push((
            "Total:".to_string(),
            to_money(totals.total, currency)?.to_string(),
        ));
        lines.push((
            "Weight:".to_string(),
            format!("{} kg", format_weight(totals.total_weight_kg)),
        ));

        if let Some(rental) = totals.rental {
            lines.push((
                "Daily rent:".to_string(),
                to_money(rental.daily_rent_subtotal, currency)?.to_string(),
            ));
            lines.push((
                format!("Rent for {} days:", config.rental_days()),
                to_money(rental.rent_for_days_subtotal, currency)?.to_string(),
            ));
            lines.push((
                "Guarantee:".to_string(),
                to_money(rental.total_guarantee, currency)?.to_string(),
            ));
        }

        Ok(lines)
    }
}

fn format_weight(weight_kg: Decimal) -> String {
    weight_kg
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
        .to_string()
}
