//! Record Normalization
//!
//! Backend payloads for products and accessories are not consistent: the same
//! value can arrive under several keys (`precio_venta`, `precioVenta`, `pventa`,
//! ...) and numbers are often sent as strings. This module resolves those
//! aliases once, at the boundary, and produces canonical [`LineItem`]s so the
//! totals engine never has to branch on payload shapes.
//!
//! The item kind and the quote mode are always passed in explicitly. Whether a
//! record can be rented is never inferred from a non-zero rental rate.

use rust_decimal::Decimal;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::{
    coerce::{amount_from_f64, count_from_f64, count_or, parse_amount, parse_count},
    config::QuoteMode,
    items::{ItemKind, LineItem},
};

/// Keys that may hold the record identifier.
pub const ID_KEYS: &[&str] = &["id", "id_producto", "id_accesorio", "clave", "sku"];

/// Keys that may hold the sale price.
pub const SALE_PRICE_KEYS: &[&str] = &["precio_venta", "precioVenta", "pventa", "precio"];

/// Keys that may hold the daily rental rate.
pub const RENTAL_RATE_KEYS: &[&str] = &[
    "tarifa_renta",
    "tarifaRenta",
    "tarifa",
    "precio_renta",
    "renta",
];

/// Keys that may hold the unit weight in kilograms.
pub const WEIGHT_KEYS: &[&str] = &["peso_kg", "pesoKg", "peso"];

/// Keys that may hold the quantity.
pub const QUANTITY_KEYS: &[&str] = &["cantidad", "qty", "quantity"];

/// Keys that may hold a per-line rental days override.
pub const DAYS_KEYS: &[&str] = &["dias", "days"];

/// Errors raised while normalizing backend records.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    /// The record is not a JSON object.
    #[error("record is not an object")]
    NotAnObject,

    /// None of the identifier keys holds a usable value.
    #[error("record has no identifier (looked for {})", ID_KEYS.join(", "))]
    MissingId,

    /// A record inside a batch failed to normalize.
    #[error("record {index}: {source}")]
    Record {
        /// Position of the record in the batch
        index: usize,

        /// Underlying error
        #[source]
        source: Box<NormalizeError>,
    },
}

/// Normalize a single backend record into a [`LineItem`].
///
/// On rental quotes the unit price is the rental rate; on sale quotes it is the
/// sale price. The sale price, when present, is kept as the guarantee price.
/// Missing or malformed numbers are coerced (see [`crate::coerce`]).
///
/// # Errors
///
/// - [`NormalizeError::NotAnObject`]: the value is not a JSON object.
/// - [`NormalizeError::MissingId`]: no identifier could be found.
pub fn normalize_record(
    record: &Value,
    kind: ItemKind,
    mode: QuoteMode,
) -> Result<LineItem, NormalizeError> {
    let fields = record.as_object().ok_or(NormalizeError::NotAnObject)?;

    let id = lookup(fields, ID_KEYS)
        .and_then(id_string)
        .ok_or(NormalizeError::MissingId)?;

    let sale_price = lookup(fields, SALE_PRICE_KEYS).map(amount);

    let unit_price = match mode {
        QuoteMode::Sale => sale_price.unwrap_or(Decimal::ZERO),
        QuoteMode::Rental => lookup(fields, RENTAL_RATE_KEYS).map_or(Decimal::ZERO, amount),
    };

    let quantity = lookup(fields, QUANTITY_KEYS).map_or(1, |value| count(value, 1));

    let mut item = LineItem::new(id, kind, quantity, unit_price)
        .with_weight_kg(lookup(fields, WEIGHT_KEYS).map_or(Decimal::ZERO, amount));

    if let Some(sale_price) = sale_price {
        item = item.with_sale_unit_price(sale_price);
    }

    if let Some(days) = lookup(fields, DAYS_KEYS) {
        item = item.with_days(count(days, 0));
    }

    debug!(id = item.id(), %kind, %mode, "normalized record");

    Ok(item)
}

/// Normalize a batch of records that share a kind.
///
/// # Errors
///
/// Returns [`NormalizeError::Record`] for the first record that fails.
pub fn normalize_records(
    records: &[Value],
    kind: ItemKind,
    mode: QuoteMode,
) -> Result<Vec<LineItem>, NormalizeError> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            normalize_record(record, kind, mode).map_err(|source| NormalizeError::Record {
                index,
                source: Box::new(source),
            })
        })
        .collect()
}

/// First alias that is present and not `null`.
fn lookup<'a>(fields: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| fields.get(*key))
        .find(|value| !value.is_null())
}

fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(id) if !id.trim().is_empty() => Some(id.trim().to_string()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

fn amount(value: &Value) -> Decimal {
    match value {
        Value::Number(number) => number.as_f64().map_or(Decimal::ZERO, amount_from_f64),
        Value::String(raw) => parse_amount(raw),
        _ => Decimal::ZERO,
    }
}

fn count(value: &Value, default: u32) -> u32 {
    match value {
        Value::Number(number) => number.as_i64().map_or_else(
            || number.as_f64().map_or(default, |n| count_from_f64(n, default)),
            |n| count_or(n, default),
        ),
        Value::String(raw) => parse_count(raw, default),
        _ => default,
    }
}
