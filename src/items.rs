//! Line Items

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::coerce::non_negative;

/// What a quote line refers to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// A scaffolding product (frames, braces, platforms...).
    #[default]
    Product,

    /// An accessory sold or rented alongside products (couplers, bases, wheels...).
    Accessory,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::Product => f.write_str("Product"),
            ItemKind::Accessory => f.write_str("Accessory"),
        }
    }
}

/// A single quote line.
///
/// Built once from already normalized data and never mutated afterwards:
/// the `with_*` methods consume the item and return an updated copy.
/// Construction enforces the line invariants, so a `quantity` of zero becomes
/// one and negative amounts become zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    id: String,
    kind: ItemKind,
    quantity: u32,
    unit_price: Decimal,
    sale_unit_price: Option<Decimal>,
    weight_kg: Decimal,
    days: Option<u32>,
}

impl LineItem {
    /// Create a new line item.
    ///
    /// `unit_price` is the daily rental rate on rental quotes and the sale price
    /// on sale quotes.
    pub fn new(id: impl Into<String>, kind: ItemKind, quantity: u32, unit_price: Decimal) -> Self {
        Self {
            id: id.into(),
            kind,
            quantity: quantity.max(1),
            unit_price: non_negative(unit_price),
            sale_unit_price: None,
            weight_kg: Decimal::ZERO,
            days: None,
        }
    }

    /// Create a product line.
    pub fn product(id: impl Into<String>, quantity: u32, unit_price: Decimal) -> Self {
        Self::new(id, ItemKind::Product, quantity, unit_price)
    }

    /// Create an accessory line.
    pub fn accessory(id: impl Into<String>, quantity: u32, unit_price: Decimal) -> Self {
        Self::new(id, ItemKind::Accessory, quantity, unit_price)
    }

    /// Set the sale price used to compute the rental guarantee.
    #[must_use]
    pub fn with_sale_unit_price(mut self, sale_unit_price: Decimal) -> Self {
        self.sale_unit_price = Some(non_negative(sale_unit_price));
        self
    }

    /// Set the unit weight in kilograms.
    #[must_use]
    pub fn with_weight_kg(mut self, weight_kg: Decimal) -> Self {
        self.weight_kg = non_negative(weight_kg);
        self
    }

    /// Override the quote-level rental days for this line. Zero clears the override.
    #[must_use]
    pub fn with_days(mut self, days: u32) -> Self {
        self.days = (days > 0).then_some(days);
        self
    }

    /// Return a copy with a different quantity (zero becomes one).
    #[must_use]
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity.max(1);
        self
    }

    /// Opaque identifier of the product or accessory.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Product or accessory.
    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    /// Number of units, always at least one.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Quantity as a decimal, for arithmetic.
    pub fn quantity_decimal(&self) -> Decimal {
        Decimal::from(self.quantity)
    }

    /// Daily rate (rental) or sale price (sale).
    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// The explicit sale price, if one was given.
    pub fn sale_unit_price(&self) -> Option<Decimal> {
        self.sale_unit_price
    }

    /// Sale price used for the guarantee, falling back to the unit price.
    pub fn guarantee_unit_price(&self) -> Decimal {
        self.sale_unit_price.unwrap_or(self.unit_price)
    }

    /// Unit weight in kilograms.
    pub fn weight_kg(&self) -> Decimal {
        self.weight_kg
    }

    /// Per-line rental days override.
    pub fn days(&self) -> Option<u32> {
        self.days
    }

    /// Weight of the whole line (`quantity × weight_kg`).
    pub fn line_weight_kg(&self) -> Decimal {
        self.quantity_decimal().saturating_mul(self.weight_kg)
    }
}
