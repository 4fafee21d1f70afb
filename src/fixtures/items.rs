//! Line Item Fixtures

use serde::Deserialize;

use crate::{
    fixtures::{FixtureError, parse_amount},
    items::{ItemKind, LineItem},
};

/// Quote line from YAML fixtures
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemFixture {
    /// Product or accessory identifier
    pub id: String,

    /// Product or accessory, defaults to product
    #[serde(default)]
    pub kind: ItemKind,

    /// Number of units, defaults to one
    #[serde(default = "one")]
    pub quantity: u32,

    /// Daily rate or sale price (e.g., "50.00")
    pub unit_price: String,

    /// Sale price for the rental guarantee
    #[serde(default)]
    pub sale_unit_price: Option<String>,

    /// Unit weight in kilograms
    #[serde(default)]
    pub weight_kg: Option<String>,

    /// Rental days override
    #[serde(default)]
    pub days: Option<u32>,
}

fn one() -> u32 {
    1
}

impl TryFrom<ItemFixture> for LineItem {
    type Error = FixtureError;

    fn try_from(fixture: ItemFixture) -> Result<Self, Self::Error> {
        let mut item = LineItem::new(
            fixture.id,
            fixture.kind,
            fixture.quantity,
            parse_amount(&fixture.unit_price)?,
        );

        if let Some(sale_unit_price) = fixture.sale_unit_price.as_deref() {
            item = item.with_sale_unit_price(parse_amount(sale_unit_price)?);
        }

        if let Some(weight_kg) = fixture.weight_kg.as_deref() {
            item = item.with_weight_kg(parse_amount(weight_kg)?);
        }

        if let Some(days) = fixture.days {
            item = item.with_days(days);
        }

        Ok(item)
    }
}
