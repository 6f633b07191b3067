use crate::config::StrategyConfig;
use crate::data::PricePoint;
use std::fmt;
use thiserror::Error;

//which of the two input series a price came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Traded,
    Benchmark,
}

impl fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesKind::Traded => f.write_str("traded"),
            SeriesKind::Benchmark => f.write_str("benchmark"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("Series length mismatch: traded has {traded} periods, benchmark has {benchmark}")]
    LengthMismatch { traded: usize, benchmark: usize },
    #[error("Non-positive or non-finite {series} price {price} at index {index}")]
    NonPositivePrice {
        series: SeriesKind,
        index: usize,
        price: f64,
    },
    #[error("Initial balance must be positive and finite, got {0}")]
    NonPositiveInitialBalance(f64),
    #[error("Periodic growth rate must be finite, got {0}")]
    NonFiniteGrowthRate(f64),
}

//checks every input up front so the recurrence itself cannot fail
pub fn validate_inputs(
    traded: &[PricePoint],
    benchmark: &[PricePoint],
    config: &StrategyConfig,
) -> Result<(), InputError> {
    if !is_positive_finite(config.initial_balance) {
        return Err(InputError::NonPositiveInitialBalance(config.initial_balance));
    }

    if !config.periodic_growth_rate.is_finite() {
        return Err(InputError::NonFiniteGrowthRate(config.periodic_growth_rate));
    }

    if traded.len() != benchmark.len() {
        return Err(InputError::LengthMismatch {
            traded: traded.len(),
            benchmark: benchmark.len(),
        });
    }

    check_prices(traded, SeriesKind::Traded)?;
    check_prices(benchmark, SeriesKind::Benchmark)
}

//false for zero, negatives, NaN and infinities
fn is_positive_finite(x: f64) -> bool {
    x.is_finite() && x > 0.0
}

fn check_prices(series: &[PricePoint], kind: SeriesKind) -> Result<(), InputError> {
    match series.iter().position(|p| !is_positive_finite(p.price)) {
        Some(index) => Err(InputError::NonPositivePrice {
            series: kind,
            index,
            price: series[index].price,
        }),
        None => Ok(()),
    }
}
