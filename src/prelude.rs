//! Andamio prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    config::{DiscountConfig, QuoteConfig, QuoteMode},
    fixtures::{Fixture, FixtureError, QuoteFixture},
    items::{ItemKind, LineItem},
    normalize::{NormalizeError, normalize_record, normalize_records},
    quote::{Quote, QuoteSnapshot},
    summary::{QuoteSummary, SummaryError, to_money},
    totals::{
        QuoteTotals, RentalTotals, TAX_RATE, compute_line_importe, compute_totals, line_guarantee,
    },
};
