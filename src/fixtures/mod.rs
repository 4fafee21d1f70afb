//! Fixtures
//!
//! Quotes defined in YAML, used by the CLI and the integration tests.
//!
//! ```yaml
//! name: Torre Norte
//! currency: MXN
//! config:
//!   mode: rental
//!   rental_days: 4
//!   discount:
//!     percent: 10%
//!   apply_tax: true
//!   shipping_cost: "350.00"
//! items:
//!   - id: MT-200
//!     quantity: 3
//!     unit_price: "50"
//!     sale_unit_price: "1200"
//!     weight_kg: "18.5"
//! ```
//!
//! Unlike the totals engine, fixture parsing is strict: a malformed amount is
//! an error rather than zero.

use std::{
    fs,
    path::{Path, PathBuf},
};

use rust_decimal::Decimal;
use rusty_money::iso::{Currency, EUR, MXN, USD};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::{
    fixtures::{config::ConfigFixture, items::ItemFixture},
    items::LineItem,
    quote::Quote,
};

pub mod config;
pub mod items;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file {path}: {source}")]
    Io {
        /// File that could not be read
        path: PathBuf,

        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid amount format
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Invalid percentage format
    #[error("Invalid percentage: {0}")]
    InvalidPercentage(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Invalid line
    #[error("Item {index} ({id}): {source}")]
    Item {
        /// Position of the line in the fixture
        index: usize,

        /// Line identifier
        id: String,

        /// Underlying error
        #[source]
        source: Box<FixtureError>,
    },
}

/// Quote fixture from YAML
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuoteFixture {
    /// Display name
    #[serde(default)]
    pub name: Option<String>,

    /// ISO currency code
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Quote configuration
    #[serde(default)]
    pub config: ConfigFixture,

    /// Quote lines
    #[serde(default)]
    pub items: Vec<ItemFixture>,
}

fn default_currency() -> String {
    "MXN".to_string()
}

impl QuoteFixture {
    /// Parse a fixture from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed.
    pub fn from_yaml(yaml: &str) -> Result<Self, FixtureError> {
        Ok(serde_norway::from_str(yaml)?)
    }

    /// Read and parse a fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let path = path.as_ref();

        let contents = fs::read_to_string(path).map_err(|source| FixtureError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), "loaded quote fixture");

        Self::from_yaml(&contents)
    }
}

impl TryFrom<QuoteFixture> for Quote {
    type Error = FixtureError;

    fn try_from(fixture: QuoteFixture) -> Result<Self, Self::Error> {
        let currency = parse_currency(&fixture.currency)?;
        let config = fixture.config.try_into()?;

        let items = fixture
            .items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                let id = item.id.clone();

                LineItem::try_from(item).map_err(|source| FixtureError::Item {
                    index,
                    id,
                    source: Box::new(source),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let quote = Quote::new(currency, config, items);

        Ok(match fixture.name {
            Some(name) => quote.with_name(name),
            None => quote,
        })
    }
}

/// Loads named quote fixtures from a directory.
#[derive(Debug, Clone)]
pub struct Fixture {
    base_path: PathBuf,
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixture {
    /// Create a loader rooted at `./fixtures`.
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a loader with a custom base path.
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Load `quotes/<name>.yml` under the base path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or contains invalid values.
    pub fn quote(&self, name: &str) -> Result<Quote, FixtureError> {
        let path = self.base_path.join("quotes").join(format!("{name}.yml"));

        QuoteFixture::from_path(path)?.try_into()
    }

    /// Load a named quote from the default fixture directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or contains invalid values.
    pub fn from_set(name: &str) -> Result<Quote, FixtureError> {
        Self::new().quote(name)
    }
}

/// Parse a non-negative decimal amount, e.g. `"1250.50"`.
///
/// # Errors
///
/// Returns [`FixtureError::InvalidAmount`] if the string is not a decimal or is negative.
pub fn parse_amount(s: &str) -> Result<Decimal, FixtureError> {
    let amount = s
        .trim()
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidAmount(s.to_string()))?;

    if amount < Decimal::ZERO {
        return Err(FixtureError::InvalidAmount(s.to_string()));
    }

    Ok(amount)
}

/// Parse percentage points, written either as `"15%"` or `"15"`.
///
/// # Errors
///
/// Returns [`FixtureError::InvalidPercentage`] if the value is not a number in `0..=100`.
pub fn parse_percentage(s: &str) -> Result<Decimal, FixtureError> {
    let trimmed = s.trim();
    let points = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();

    let value = points
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPercentage(s.to_string()))?;

    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(FixtureError::InvalidPercentage(s.to_string()));
    }

    Ok(value)
}

/// Resolve a supported ISO currency code.
///
/// # Errors
///
/// Returns [`FixtureError::UnknownCurrency`] for anything other than MXN, USD or EUR.
pub fn parse_currency(code: &str) -> Result<&'static Currency, FixtureError> {
    match code.trim() {
        "MXN" => Ok(MXN),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        other => Err(FixtureError::UnknownCurrency(other.to_string())),
    }
}
