pub mod calculator;
pub mod rates;

pub use calculator::CalculatorPage;
pub use rates::RatesPage;
