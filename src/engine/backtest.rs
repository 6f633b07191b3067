use crate::config::StrategyConfig;
use crate::data::PricePoint;
use crate::engine::ledger::Ledger;
use crate::engine::state::EngineState;
use crate::engine::validation::{validate_inputs, InputError};
use std::iter;
use tracing::debug;

//value averaging backtest engine
//each run is a pure function of the series and the configuration
#[derive(Debug, Clone)]
pub struct BacktestEngine {
    config: StrategyConfig,
}

impl BacktestEngine {
    //creates a new backtest engine
    pub fn new(config: StrategyConfig) -> Self {
        BacktestEngine { config }
    }

    //runs the strategy over index-aligned traded and benchmark series
    //all inputs are validated before the first period is computed
    pub fn run(
        &self,
        traded: &[PricePoint],
        benchmark: &[PricePoint],
    ) -> Result<Ledger, InputError> {
        validate_inputs(traded, benchmark, &self.config)?;

        let mut periods = traded.iter().zip(benchmark);

        let Some((first_traded, first_benchmark)) = periods.next() else {
            debug!("empty series, nothing to simulate");
            return Ok(Ledger::default());
        };

        let (state, opening_row) = EngineState::open(first_traded, first_benchmark, &self.config);

        let rows: Vec<_> = iter::once(opening_row)
            .chain(periods.scan(state, |state, (t, b)| Some(state.advance(t, b))))
            .collect();

        debug!(
            periods = rows.len(),
            initial_balance = self.config.initial_balance,
            growth_rate = self.config.periodic_growth_rate,
            "ledger complete"
        );

        Ok(Ledger::from_rows(rows))
    }
}

//runs a single backtest without keeping an engine around
pub fn run(
    traded: &[PricePoint],
    benchmark: &[PricePoint],
    config: &StrategyConfig,
) -> Result<Ledger, InputError> {
    BacktestEngine::new(config.clone()).run(traded, benchmark)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ledger::Holding;

    fn series(points: &[(&str, f64)]) -> Vec<PricePoint> {
        points
            .iter()
            .map(|&(date, price)| PricePoint::new(date, price))
            .collect()
    }

    #[test]
    fn two_period_scenario() {
        let traded = series(&[("2014-06", 10.0), ("2014-07", 12.0)]);
        let benchmark = series(&[("2014-06", 20.0), ("2014-07", 22.0)]);
        let config = StrategyConfig {
            initial_balance: 10000.0,
            periodic_growth_rate: 0.01,
        };

        let ledger = run(&traded, &benchmark, &config).unwrap();
        assert_eq!(ledger.len(), 2);

        let first = &ledger.rows()[0];
        assert_eq!(first.date.to_string(), "2014-06");
        assert_eq!(first.period_action_volume, 1000.0);
        assert_eq!(first.period_cash_flow, -10000.0);
        assert_eq!(first.target_balance, 10000.0);
        assert_eq!(first.control_value, 10000.0);
        assert_eq!(first.benchmark_value, 10000.0);
        assert_eq!(first.held_volume, Holding::NotYetHeld);
        assert_eq!(first.held_value, Holding::NotYetHeld);

        let second = &ledger.rows()[1];
        assert_eq!(second.target_balance, 10100.0);
        assert_eq!(second.control_value, 12000.0);
        assert_eq!(second.held_volume, Holding::Held(1000.0));
        assert_eq!(second.held_value, Holding::Held(12000.0));
        assert_eq!(second.period_cash_flow, 1900.0);
        assert_eq!(second.cumulative_cash_flow, -8100.0);
        assert_eq!(second.period_action_volume, -158.3333);
        assert_eq!(second.benchmark_price, 22.0);
    }

    #[test]
    fn third_period_applies_previous_sale() {
        let traded = series(&[("a", 10.0), ("b", 12.0), ("c", 11.0)]);
        let benchmark = series(&[("a", 20.0), ("b", 22.0), ("c", 21.0)]);
        let ledger = run(&traded, &benchmark, &StrategyConfig::default()).unwrap();

        let third = &ledger.rows()[2];
        //1000 - 1900/12 shares held, target 10000 * 1.01^2
        let held = 1000.0 - 1900.0 / 12.0;
        let target = 10000.0 * 1.01 * 1.01;
        let cash_flow = held * 11.0 - target;
        assert_eq!(third.held_volume, Holding::Held(crate::engine::rounded(held)));
        assert_eq!(third.target_balance, 10201.0);
        assert_eq!(third.period_cash_flow, crate::engine::rounded(cash_flow));
        assert_eq!(
            third.cumulative_cash_flow,
            crate::engine::rounded(-8100.0 + cash_flow)
        );
        assert_eq!(third.control_value, 11000.0);
    }

    #[test]
    fn infinite_inputs_never_reach_the_recurrence() {
        let traded = series(&[("a", 10.0), ("b", 12.0)]);
        let benchmark = series(&[("a", 20.0), ("b", 22.0)]);
        let unbounded = StrategyConfig {
            initial_balance: f64::INFINITY,
            periodic_growth_rate: 0.01,
        };
        assert!(matches!(
            run(&traded, &benchmark, &unbounded),
            Err(InputError::NonPositiveInitialBalance(_))
        ));

        let infinite = series(&[("a", f64::INFINITY), ("b", f64::INFINITY)]);
        assert!(matches!(
            run(&infinite, &benchmark, &StrategyConfig::default()),
            Err(InputError::NonPositivePrice { index: 0, .. })
        ));
    }

    #[test]
    fn empty_series_give_empty_ledger() {
        let ledger = run(&[], &[], &StrategyConfig::default()).unwrap();
        assert!(ledger.is_empty());
    }

    #[test]
    fn invalid_input_returns_no_ledger() {
        let traded = series(&[("a", 10.0), ("b", -1.0)]);
        let benchmark = series(&[("a", 20.0), ("b", 22.0)]);
        let engine = BacktestEngine::new(StrategyConfig::default());
        assert!(matches!(
            engine.run(&traded, &benchmark),
            Err(InputError::NonPositivePrice { index: 1, .. })
        ));
    }
}
