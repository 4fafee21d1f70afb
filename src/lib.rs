//! Andamio
//!
//! Andamio computes the totals of scaffolding rental and sale quotations: line
//! importes, discount, shipping, IVA, weight and, for rentals, the daily rent and
//! the guarantee deposit.

pub mod cli;
pub mod coerce;
pub mod config;
pub mod fixtures;
pub mod items;
pub mod normalize;
pub mod prelude;
pub mod quote;
pub mod summary;
pub mod totals;
