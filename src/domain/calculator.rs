//! Live calculator state and the debounced recompute pipeline.

use std::{sync::Arc, time::Duration};

use tokio::sync::watch;
use tracing::debug;

use super::{
    pricing::{calculate_final_price, AmountMode, PriceInputs},
    rates::{RateLookup, SaleMode},
};
use crate::util::debounce::Debouncer;

pub const DEFAULT_PROFIT_MARGIN: f64 = 20.0;

/// Everything the seller types or selects.
#[derive(Clone, Debug, PartialEq)]
pub struct CalculatorInputs {
    pub purchase_price: f64,
    pub shipping_cost: f64,
    pub other_costs: f64,
    pub other_costs_mode: AmountMode,
    pub profit_margin: f64,
    pub profit_mode: AmountMode,
    pub selected_category: Option<String>,
    pub sale_mode: SaleMode,
}

impl Default for CalculatorInputs {
    fn default() -> Self {
        Self {
            purchase_price: 0.0,
            shipping_cost: 0.0,
            other_costs: 0.0,
            other_costs_mode: AmountMode::Absolute,
            profit_margin: DEFAULT_PROFIT_MARGIN,
            profit_mode: AmountMode::Percent,
            selected_category: None,
            sale_mode: SaleMode::Retail,
        }
    }
}

impl CalculatorInputs {
    pub fn price_inputs(&self, commission_rate: f64) -> PriceInputs {
        PriceInputs {
            purchase_price: self.purchase_price,
            shipping_cost: self.shipping_cost,
            other_costs: self.other_costs,
            other_costs_mode: self.other_costs_mode,
            profit_margin: self.profit_margin,
            profit_mode: self.profit_mode,
            commission_rate,
        }
    }

    pub fn commission_rate(&self, rates: &RateLookup) -> f64 {
        rates.rate_for_selection(self.selected_category.as_deref(), self.sale_mode)
    }
}

/// Independently rounded line items; their sum may miss the price by a rounding remainder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Breakdown {
    pub purchase: i64,
    pub shipping: i64,
    pub other: i64,
    pub commission: i64,
    pub profit: i64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CalculationResult {
    pub price: i64,
    pub error: Option<String>,
    pub breakdown: Option<Breakdown>,
}

impl CalculationResult {
    fn failed(message: String) -> Self {
        Self {
            price: 0,
            error: Some(message),
            breakdown: None,
        }
    }
}

/// Computes the result for a settled snapshot. Validation failures become `error`.
pub fn evaluate(snapshot: &CalculatorInputs, rates: &RateLookup) -> CalculationResult {
    if snapshot.purchase_price <= 0.0 {
        return CalculationResult::default();
    }

    let commission_rate = snapshot.commission_rate(rates);
    let inputs = snapshot.price_inputs(commission_rate);
    let price = match calculate_final_price(&inputs) {
        Ok(price) => price,
        Err(err) => {
            debug!(%err, commission_rate, "price calculation rejected");
            return CalculationResult::failed(err.to_string());
        }
    };

    // Second pass over the raw snapshot, not the formula's intermediates.
    let breakdown = Breakdown {
        purchase: round(snapshot.purchase_price),
        shipping: round(snapshot.shipping_cost),
        other: round(
            snapshot
                .other_costs_mode
                .resolve(snapshot.purchase_price, snapshot.other_costs),
        ),
        commission: round(price as f64 * commission_rate),
        profit: round(
            snapshot
                .profit_mode
                .resolve(snapshot.purchase_price, snapshot.profit_margin),
        ),
    };

    CalculationResult {
        price,
        error: None,
        breakdown: Some(breakdown),
    }
}

// Halves round toward positive infinity, so -2.5 becomes -2.
fn round(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// A committed snapshot and the result derived from it, swapped as one value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Settled {
    /// Number of snapshots committed so far.
    pub generation: u64,
    pub snapshot: CalculatorInputs,
    pub result: CalculationResult,
}

/// Owns the live inputs and publishes a debounced [`Settled`] value to subscribers.
pub struct CalculationPipeline {
    rates: Arc<RateLookup>,
    inputs: CalculatorInputs,
    settled: Arc<watch::Sender<Settled>>,
    debounce: Debouncer,
}

impl CalculationPipeline {
    pub fn new(rates: Arc<RateLookup>, window: Duration) -> Self {
        let (settled, _) = watch::channel(Settled::default());
        Self {
            rates,
            inputs: CalculatorInputs::default(),
            settled: Arc::new(settled),
            debounce: Debouncer::new(window),
        }
    }

    pub fn inputs(&self) -> &CalculatorInputs {
        &self.inputs
    }

    pub fn rates(&self) -> &Arc<RateLookup> {
        &self.rates
    }

    pub fn category_names(&self) -> &[String] {
        self.rates.category_names()
    }

    /// Rate for the live selection, ahead of the debounced result.
    pub fn current_rate(&self) -> f64 {
        self.inputs.commission_rate(&self.rates)
    }

    pub fn settled(&self) -> Settled {
        self.settled.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Settled> {
        self.settled.subscribe()
    }

    /// True while live inputs differ from the last committed snapshot.
    pub fn is_pending(&self) -> bool {
        self.debounce.is_pending() && self.inputs != self.settled.borrow().snapshot
    }

    pub fn set_purchase_price(&mut self, value: f64) {
        self.update(|inputs| inputs.purchase_price = value);
    }

    pub fn set_shipping_cost(&mut self, value: f64) {
        self.update(|inputs| inputs.shipping_cost = value);
    }

    pub fn set_other_costs(&mut self, value: f64) {
        self.update(|inputs| inputs.other_costs = value);
    }

    pub fn set_other_costs_mode(&mut self, mode: AmountMode) {
        self.update(|inputs| inputs.other_costs_mode = mode);
    }

    pub fn set_profit_margin(&mut self, value: f64) {
        self.update(|inputs| inputs.profit_margin = value);
    }

    pub fn set_profit_mode(&mut self, mode: AmountMode) {
        self.update(|inputs| inputs.profit_mode = mode);
    }

    pub fn select_category(&mut self, category: Option<String>) {
        let category = category.filter(|name| !name.is_empty());
        self.update(|inputs| inputs.selected_category = category);
    }

    pub fn set_sale_mode(&mut self, mode: SaleMode) {
        self.update(|inputs| inputs.sale_mode = mode);
    }

    /// Restores default inputs; the result follows after the debounce window.
    pub fn reset(&mut self) {
        self.update(|inputs| *inputs = CalculatorInputs::default());
    }

    /// Cancels any pending commit. Later mutations schedule again.
    pub fn dispose(&mut self) {
        if self.debounce.is_pending() {
            debug!("dropping pending calculator snapshot");
        }
        self.debounce.cancel();
    }

    fn update(&mut self, apply: impl FnOnce(&mut CalculatorInputs)) {
        let before = self.inputs.clone();
        apply(&mut self.inputs);
        if self.inputs == before {
            return;
        }

        let snapshot = self.inputs.clone();
        let rates = self.rates.clone();
        let settled = self.settled.clone();
        self.debounce.schedule(async move {
            commit(&settled, snapshot, &rates);
        });
    }
}

fn commit(settled: &watch::Sender<Settled>, snapshot: CalculatorInputs, rates: &RateLookup) {
    settled.send_if_modified(|current| {
        if current.snapshot == snapshot {
            return false;
        }
        current.result = evaluate(&snapshot, rates);
        current.snapshot = snapshot;
        current.generation += 1;
        debug!(
            generation = current.generation,
            price = current.result.price,
            error = current.result.error.as_deref(),
            "calculator snapshot committed"
        );
        true
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rates::{RatePair, RateTable};
    use tokio::time::sleep;

    const WINDOW: Duration = Duration::from_millis(300);

    fn total(breakdown: &Breakdown) -> i64 {
        breakdown.purchase
            + breakdown.shipping
            + breakdown.other
            + breakdown.commission
            + breakdown.profit
    }

    fn rates() -> Arc<RateLookup> {
        let mut table = RateTable::new();
        table.insert(
            "Handmade Soap",
            RatePair {
                retail: 0.1,
                wholesale: 0.05,
            },
        );
        table.insert("Broken", RatePair::flat(1.0));
        Arc::new(RateLookup::new(table))
    }

    fn scenario_a() -> CalculatorInputs {
        CalculatorInputs {
            purchase_price: 100_000.0,
            shipping_cost: 20_000.0,
            other_costs: 5_000.0,
            profit_margin: 30.0,
            selected_category: Some("Handmade Soap".to_string()),
            ..CalculatorInputs::default()
        }
    }

    #[test]
    fn defaults_match_a_fresh_form() {
        let inputs = CalculatorInputs::default();
        assert_eq!(inputs.profit_margin, 20.0);
        assert_eq!(inputs.profit_mode, AmountMode::Percent);
        assert_eq!(inputs.other_costs_mode, AmountMode::Absolute);
        assert_eq!(inputs.selected_category, None);
        assert_eq!(inputs.sale_mode, SaleMode::Retail);
    }

    #[test]
    fn evaluates_scenario_with_breakdown() {
        let result = evaluate(&scenario_a(), &rates());
        assert_eq!(result.price, 172_223);
        assert_eq!(result.error, None);
        let breakdown = result.breakdown.unwrap();
        assert_eq!(
            breakdown,
            Breakdown {
                purchase: 100_000,
                shipping: 20_000,
                other: 5_000,
                commission: 17_222,
                profit: 30_000,
            }
        );
        assert!((total(&breakdown) - result.price).abs() <= 1);
    }

    #[test]
    fn wholesale_uses_wholesale_rate() {
        let snapshot = CalculatorInputs {
            sale_mode: SaleMode::Wholesale,
            ..scenario_a()
        };
        let result = evaluate(&snapshot, &rates());
        assert_eq!(result.price, (155_000.0_f64 / (1.0 - 0.05)).ceil() as i64);
    }

    #[test]
    fn empty_purchase_price_short_circuits() {
        for purchase_price in [0.0, -10.0] {
            let snapshot = CalculatorInputs {
                purchase_price,
                selected_category: Some("Broken".to_string()),
                profit_margin: -50.0,
                ..scenario_a()
            };
            assert_eq!(evaluate(&snapshot, &rates()), CalculationResult::default());
        }
    }

    #[test]
    fn validation_failure_becomes_error_text() {
        let snapshot = CalculatorInputs {
            selected_category: Some("Broken".to_string()),
            ..scenario_a()
        };
        let result = evaluate(&snapshot, &rates());
        assert_eq!(result.price, 0);
        assert_eq!(result.error.as_deref(), Some("Commission must be below 100%"));
        assert_eq!(result.breakdown, None);

        let snapshot = CalculatorInputs {
            profit_mode: AmountMode::Absolute,
            profit_margin: -1.0,
            ..scenario_a()
        };
        assert_eq!(
            evaluate(&snapshot, &rates()).error.as_deref(),
            Some("Amounts cannot be negative")
        );
    }

    #[test]
    fn unknown_category_costs_no_commission() {
        let snapshot = CalculatorInputs {
            selected_category: Some("Spaceships".to_string()),
            ..scenario_a()
        };
        let result = evaluate(&snapshot, &rates());
        assert_eq!(result.price, 155_000);
        assert_eq!(result.breakdown.unwrap().commission, 0);
    }

    #[test]
    fn breakdown_rounds_halves_upward() {
        let snapshot = CalculatorInputs {
            purchase_price: 100.0,
            other_costs: -2.5,
            profit_margin: 0.0,
            profit_mode: AmountMode::Absolute,
            ..CalculatorInputs::default()
        };
        let breakdown = evaluate(&snapshot, &rates()).breakdown.unwrap();
        assert_eq!(breakdown.other, -2);

        let snapshot = CalculatorInputs {
            other_costs: 2.5,
            ..snapshot
        };
        assert_eq!(evaluate(&snapshot, &rates()).breakdown.unwrap().other, 3);
    }

    #[test]
    fn breakdown_stays_within_one_of_price() {
        let lookup = rates();
        for purchase in [10.0, 250.0, 12_340.0, 99_990.0] {
            for shipping in [0.0, 35.0, 1_250.0] {
                for profit in [0.0, 20.0, 50.0] {
                    for category in [None, Some("Handmade Soap".to_string())] {
                        let snapshot = CalculatorInputs {
                            purchase_price: purchase,
                            shipping_cost: shipping,
                            profit_margin: profit,
                            selected_category: category,
                            ..CalculatorInputs::default()
                        };
                        let result = evaluate(&snapshot, &lookup);
                        let sum = total(&result.breakdown.unwrap());
                        assert!(
                            (sum - result.price).abs() <= 1,
                            "{snapshot:?}: {sum} vs {}",
                            result.price
                        );
                    }
                }
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn burst_commits_one_snapshot() {
        let mut pipeline = CalculationPipeline::new(rates(), WINDOW);
        let mut rx = pipeline.subscribe();

        pipeline.set_purchase_price(1.0);
        pipeline.set_purchase_price(10.0);
        pipeline.set_purchase_price(100_000.0);
        pipeline.set_shipping_cost(20_000.0);
        pipeline.set_other_costs(5_000.0);
        pipeline.set_profit_margin(30.0);
        pipeline.select_category(Some("Handmade Soap".to_string()));
        assert_eq!(pipeline.settled().generation, 0);
        assert_eq!(pipeline.settled().result, CalculationResult::default());

        assert!(pipeline.is_pending());
        rx.changed().await.unwrap();
        assert!(!pipeline.is_pending());
        let settled = rx.borrow_and_update().clone();
        assert_eq!(settled.generation, 1);
        assert_eq!(settled.snapshot, scenario_a());
        assert_eq!(settled.result.price, 172_223);

        sleep(WINDOW * 3).await;
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn typing_within_window_defers_commit() {
        let mut pipeline = CalculationPipeline::new(rates(), WINDOW);

        pipeline.set_purchase_price(5.0);
        sleep(Duration::from_millis(200)).await;
        pipeline.set_purchase_price(50.0);
        sleep(Duration::from_millis(200)).await;
        assert_eq!(pipeline.settled().generation, 0);

        sleep(Duration::from_millis(150)).await;
        let settled = pipeline.settled();
        assert_eq!(settled.generation, 1);
        assert_eq!(settled.snapshot.purchase_price, 50.0);
    }

    #[tokio::test(start_paused = true)]
    async fn live_rate_leads_debounced_result() {
        let mut pipeline = CalculationPipeline::new(rates(), WINDOW);
        pipeline.set_purchase_price(100.0);
        sleep(WINDOW * 2).await;

        pipeline.select_category(Some("Handmade Soap".to_string()));
        assert_eq!(pipeline.current_rate(), 0.1);
        assert_eq!(pipeline.settled().result.breakdown.unwrap().commission, 0);

        pipeline.set_sale_mode(SaleMode::Wholesale);
        assert_eq!(pipeline.current_rate(), 0.05);

        sleep(WINDOW * 2).await;
        assert_eq!(pipeline.settled().result.breakdown.unwrap().commission, 6);
    }

    #[tokio::test(start_paused = true)]
    async fn unchanged_values_do_not_recompute() {
        let mut pipeline = CalculationPipeline::new(rates(), WINDOW);
        pipeline.set_profit_margin(DEFAULT_PROFIT_MARGIN);
        pipeline.select_category(Some(String::new()));
        assert!(!pipeline.is_pending());

        pipeline.set_purchase_price(10.0);
        pipeline.set_purchase_price(0.0);
        sleep(WINDOW * 2).await;
        assert_eq!(pipeline.settled().generation, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_restores_defaults_after_window() {
        let mut pipeline = CalculationPipeline::new(rates(), WINDOW);
        pipeline.set_purchase_price(100_000.0);
        pipeline.set_profit_mode(AmountMode::Absolute);
        sleep(WINDOW * 2).await;
        assert!(pipeline.settled().result.price > 0);

        pipeline.reset();
        assert_eq!(pipeline.inputs(), &CalculatorInputs::default());
        sleep(WINDOW * 2).await;
        let settled = pipeline.settled();
        assert_eq!(settled.generation, 2);
        assert_eq!(settled.result, CalculationResult::default());
    }

    #[tokio::test(start_paused = true)]
    async fn dispose_cancels_pending_commit() {
        let mut pipeline = CalculationPipeline::new(rates(), WINDOW);
        pipeline.set_purchase_price(100_000.0);
        pipeline.dispose();
        sleep(WINDOW * 2).await;
        assert_eq!(pipeline.settled().generation, 0);
    }
}
