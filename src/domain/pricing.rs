//! Sale price formula.
//!
//! The marketplace takes its commission as a fraction of the final price, so the
//! price solves `price = base + rate * price`, i.e. `price = base / (1 - rate)`.
//! The profit margin is taken against the purchase price only.

use thiserror::Error;

/// How a cost or profit field is interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AmountMode {
    #[default]
    Absolute,
    Percent,
}

impl AmountMode {
    /// Resolves `value` to a currency amount against `purchase_price`.
    pub fn resolve(&self, purchase_price: f64, value: f64) -> f64 {
        match self {
            AmountMode::Absolute => value,
            AmountMode::Percent => purchase_price * (value / 100.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("Commission must be below 100%")]
    CommissionTooHigh,
    #[error("Percentages cannot be negative")]
    NegativePercentage,
    #[error("Amounts cannot be negative")]
    NegativeAmount,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PriceInputs {
    pub purchase_price: f64,
    pub shipping_cost: f64,
    pub other_costs: f64,
    pub other_costs_mode: AmountMode,
    pub profit_margin: f64,
    pub profit_mode: AmountMode,
    /// Fraction of the final price, expected in `[0, 1)`.
    pub commission_rate: f64,
}

impl PriceInputs {
    pub fn other_amount(&self) -> f64 {
        self.other_costs_mode
            .resolve(self.purchase_price, self.other_costs)
    }

    pub fn profit_amount(&self) -> f64 {
        self.profit_mode
            .resolve(self.purchase_price, self.profit_margin)
    }

    /// Costs plus profit, before commission.
    pub fn base(&self) -> f64 {
        self.purchase_price + self.shipping_cost + self.other_amount() + self.profit_amount()
    }
}

/// Final sale price, rounded up to a whole currency unit.
pub fn calculate_final_price(inputs: &PriceInputs) -> Result<i64, PricingError> {
    let rate = inputs.commission_rate;
    if rate >= 1.0 {
        return Err(PricingError::CommissionTooHigh);
    }
    if rate < 0.0 {
        return Err(PricingError::NegativePercentage);
    }

    let profit = inputs.profit_amount();
    match inputs.profit_mode {
        AmountMode::Percent if inputs.profit_margin / 100.0 < 0.0 => {
            return Err(PricingError::NegativePercentage)
        }
        AmountMode::Absolute if profit < 0.0 => return Err(PricingError::NegativeAmount),
        _ => {}
    }

    let final_price = inputs.base() / (1.0 - rate);
    Ok(final_price.ceil() as i64)
}
