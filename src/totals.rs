//! Quote Totals
//!
//! Pure computation of quote totals from a snapshot of line items and the quote
//! configuration. Nothing here rounds; callers format the full precision values
//! when presenting them (see [`crate::summary`]).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, instrument};

use crate::{
    coerce::non_negative,
    config::{QuoteConfig, QuoteMode},
    items::LineItem,
};

/// Mexican VAT (IVA) rate applied when tax is enabled.
pub const TAX_RATE: Decimal = Decimal::from_parts(16, 0, 0, false, 2);

/// Per-line importes, inline for typical quote sizes.
pub type LineImportes = SmallVec<[Decimal; 16]>;

/// Rental-only aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RentalTotals {
    /// `Σ quantity × unit_price`: the rent for a single day.
    pub daily_rent_subtotal: Decimal,

    /// `daily_rent_subtotal × rental_days`, using the quote-level days.
    pub rent_for_days_subtotal: Decimal,

    /// `Σ quantity × sale price`: deposit held against the rented equipment.
    pub total_guarantee: Decimal,
}

/// Everything derived from one quote snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuoteTotals {
    /// Importe of every line, in input order.
    pub line_importes: LineImportes,

    /// Sum of the line importes.
    pub subtotal: Decimal,

    /// Discount taken off the subtotal.
    pub discount_amount: Decimal,

    /// `max(0, subtotal - discount + shipping)`.
    pub taxable_base: Decimal,

    /// Tax on the taxable base, zero when tax is disabled.
    pub tax: Decimal,

    /// `taxable_base + tax`.
    pub total: Decimal,

    /// `Σ quantity × weight_kg`.
    pub total_weight_kg: Decimal,

    /// Present on rental quotes only.
    pub rental: Option<RentalTotals>,
}

/// Rental days that apply to `item`: its own override, or the quote default.
pub fn effective_days(item: &LineItem, config: &QuoteConfig) -> u32 {
    item.days()
        .filter(|days| *days > 0)
        .unwrap_or_else(|| config.rental_days())
}

/// Importe of a single line.
///
/// Sale quotes charge `quantity × unit_price`; rental quotes charge
/// `quantity × unit_price × days` with the line's effective days.
pub fn compute_line_importe(item: &LineItem, config: &QuoteConfig) -> Decimal {
    let base = item.quantity_decimal().saturating_mul(item.unit_price());

    match config.mode() {
        QuoteMode::Sale => base,
        QuoteMode::Rental => base.saturating_mul(Decimal::from(effective_days(item, config))),
    }
}

/// Guarantee (deposit) for a rented line: `quantity × sale price`, where the
/// sale price falls back to the unit price when the line has none.
pub fn line_guarantee(item: &LineItem) -> Decimal {
    item.quantity_decimal()
        .saturating_mul(item.guarantee_unit_price())
}

/// Compute every total for a quote.
///
/// Never fails: inputs have already been coerced into valid line items, the
/// discount percentage is clamped to `0..=100` and the taxable base to zero.
#[instrument(level = "debug", skip_all, fields(items = items.len(), mode = %config.mode()))]
pub fn compute_totals(items: &[LineItem], config: &QuoteConfig) -> QuoteTotals {
    let line_importes: LineImportes = items
        .iter()
        .map(|item| compute_line_importe(item, config))
        .collect();

    let subtotal = sum(line_importes.iter().copied());

    let discount_amount = config.discount().fraction() * subtotal;

    let taxable_base = non_negative(
        subtotal
            .saturating_sub(discount_amount)
            .saturating_add(config.shipping_cost()),
    );

    let tax = if config.apply_tax() {
        taxable_base.saturating_mul(TAX_RATE)
    } else {
        Decimal::ZERO
    };

    let total = taxable_base.saturating_add(tax);

    let total_weight_kg = sum(items.iter().map(LineItem::line_weight_kg));

    let rental = config
        .mode()
        .is_rental()
        .then(|| rental_totals(items, config));

    debug!(%subtotal, %discount_amount, %taxable_base, %tax, %total, "computed quote totals");

    QuoteTotals {
        line_importes,
        subtotal,
        discount_amount,
        taxable_base,
        tax,
        total,
        total_weight_kg,
        rental,
    }
}

fn rental_totals(items: &[LineItem], config: &QuoteConfig) -> RentalTotals {
    let daily_rent_subtotal = sum(
        items
            .iter()
            .map(|item| item.quantity_decimal().saturating_mul(item.unit_price())),
    );

    RentalTotals {
        daily_rent_subtotal,
        rent_for_days_subtotal: daily_rent_subtotal
            .saturating_mul(Decimal::from(config.rental_days())),
        total_guarantee: sum(items.iter().map(line_guarantee)),
    }
}

fn sum(values: impl Iterator<Item = Decimal>) -> Decimal {
    values.fold(Decimal::ZERO, Decimal::saturating_add)
}

#[cfg(test)]
mod tests {
    use crate::config::DiscountConfig;

    use super::*;

    #[test]
    fn tax_rate_is_sixteen_percent() {
        assert_eq!(TAX_RATE, Decimal::new(16, 2));
    }

    #[test]
    fn sale_importe_ignores_days() {
        let item = LineItem::product("marco-200", 2, Decimal::from(100)).with_days(10);

        assert_eq!(
            compute_line_importe(&item, &QuoteConfig::sale().with_rental_days(5)),
            Decimal::from(200)
        );
    }

    #[test]
    fn rental_importe_prefers_line_days() {
        let config = QuoteConfig::rental(4);
        let defaulted = LineItem::product("marco-200", 3, Decimal::from(50));
        let overridden = defaulted.clone().with_days(2);

        assert_eq!(compute_line_importe(&defaulted, &config), Decimal::from(600));
        assert_eq!(compute_line_importe(&overridden, &config), Decimal::from(300));
        assert_eq!(effective_days(&overridden, &config), 2);
        assert_eq!(effective_days(&defaulted, &config), 4);
    }

    #[test]
    fn guarantee_uses_sale_price_when_present() {
        let plain = LineItem::accessory("base-nivel", 4, Decimal::from(5));
        let priced = plain.clone().with_sale_unit_price(Decimal::from(320));

        assert_eq!(line_guarantee(&plain), Decimal::from(20));
        assert_eq!(line_guarantee(&priced), Decimal::from(1280));
    }

    #[test]
    fn line_importes_preserve_input_order() {
        let items = [
            LineItem::product("a", 1, Decimal::from(30)),
            LineItem::product("b", 1, Decimal::from(10)),
            LineItem::accessory("c", 2, Decimal::from(10)),
        ];

        let totals = compute_totals(&items, &QuoteConfig::sale());

        assert_eq!(
            totals.line_importes.as_slice(),
            &[Decimal::from(30), Decimal::from(10), Decimal::from(20)]
        );
    }

    #[test]
    fn sale_quotes_have_no_rental_totals() {
        let items = [LineItem::product("a", 1, Decimal::from(30))];

        assert_eq!(compute_totals(&items, &QuoteConfig::sale()).rental, None);
    }

    #[test]
    fn rent_for_days_uses_quote_days_not_line_overrides() {
        let items = [LineItem::product("a", 2, Decimal::from(10)).with_days(7)];

        let totals = compute_totals(&items, &QuoteConfig::rental(3));

        assert_eq!(totals.subtotal, Decimal::from(140));
        assert_eq!(
            totals.rental,
            Some(RentalTotals {
                daily_rent_subtotal: Decimal::from(20),
                rent_for_days_subtotal: Decimal::from(60),
                total_guarantee: Decimal::from(20),
            })
        );
    }

    #[test]
    fn out_of_range_discount_is_clamped() {
        let items = [LineItem::product("a", 1, Decimal::from(300))];
        let config = QuoteConfig::sale().with_discount(DiscountConfig::new(Decimal::from(250)));

        let totals = compute_totals(&items, &config);

        assert_eq!(totals.discount_amount, Decimal::from(300));
        assert_eq!(totals.taxable_base, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::ZERO);
    }

    #[test]
    fn weight_sums_quantity_times_unit_weight() {
        let items = [
            LineItem::product("marco", 10, Decimal::ONE).with_weight_kg(Decimal::new(185, 1)),
            LineItem::accessory("cople", 20, Decimal::ONE).with_weight_kg(Decimal::new(12, 1)),
        ];

        let totals = compute_totals(&items, &QuoteConfig::sale());

        assert_eq!(totals.total_weight_kg, Decimal::from(209));
    }

    #[test]
    fn full_precision_is_kept() {
        let items = [LineItem::product("a", 3, Decimal::new(3333, 3))];
        let config = QuoteConfig::sale().with_tax(true);

        let totals = compute_totals(&items, &config);

        assert_eq!(totals.subtotal, Decimal::new(9999, 3));
        assert_eq!(totals.tax, Decimal::new(159_984, 5));
        assert_eq!(totals.total, Decimal::new(1_159_884, 5));
    }

    #[test]
    fn huge_amounts_saturate_instead_of_panicking() {
        let items = [LineItem::product("a", u32::MAX, Decimal::MAX)];
        let config = QuoteConfig::rental(u32::MAX).with_tax(true);

        let totals = compute_totals(&items, &config);

        assert_eq!(totals.subtotal, Decimal::MAX);
        assert_eq!(totals.total, Decimal::MAX);
    }
}
