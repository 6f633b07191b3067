use crate::config::StrategyConfig;
use crate::data::PricePoint;
use crate::engine::backtest::BacktestEngine;
use crate::engine::ledger::Ledger;
use crate::engine::validation::InputError;
use indexmap::IndexMap;
use rayon::prelude::*;
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BatchError {
    #[error("Duplicate instrument label: {0}")]
    DuplicateLabel(String),
}

//one instrument to backtest, borrowing its series
//several runs may point at the same benchmark slice
#[derive(Debug, Clone, Copy)]
pub struct InstrumentRun<'a> {
    pub label: &'a str,
    pub traded: &'a [PricePoint],
    pub benchmark: &'a [PricePoint],
}

impl<'a> InstrumentRun<'a> {
    pub fn new(label: &'a str, traded: &'a [PricePoint], benchmark: &'a [PricePoint]) -> Self {
        InstrumentRun {
            label,
            traded,
            benchmark,
        }
    }
}

//ledger per label, in the order the runs were given
pub type BatchResult = IndexMap<String, Result<Ledger, InputError>>;

//runs independent backtests in parallel with a shared strategy configuration
pub fn run_batch(
    runs: &[InstrumentRun<'_>],
    config: &StrategyConfig,
) -> Result<BatchResult, BatchError> {
    let mut seen = HashSet::with_capacity(runs.len());
    if let Some(dup) = runs.iter().find(|r| !seen.insert(r.label)) {
        return Err(BatchError::DuplicateLabel(dup.label.to_string()));
    }

    info!(instruments = runs.len(), "starting batch");

    let engine = BacktestEngine::new(config.clone());

    //collect on an indexed parallel iterator keeps input order
    let ledgers: Vec<_> = runs
        .par_iter()
        .map(|run| {
            debug!(label = run.label, periods = run.traded.len(), "running instrument");
            (run.label.to_string(), engine.run(run.traded, run.benchmark))
        })
        .collect();

    Ok(ledgers.into_iter().collect())
}
