//! Pricing logic lives here: commission rates, the price formula and the calculator pipeline.

pub mod calculator;
pub mod pricing;
pub mod rates;

pub use calculator::{Breakdown, CalculationPipeline, CalculationResult, CalculatorInputs, Settled};
pub use pricing::AmountMode;
pub use rates::{RateLookup, RatePair, RateTable, SaleMode};
