use crate::config::StrategyConfig;
use crate::data::PricePoint;
use crate::engine::ledger::{Holding, ResultRow};
use crate::engine::rounding::rounded;

//running values carried from one period to the next during a single run
//values are kept unrounded, rounding happens only when a row is emitted
#[derive(Debug, Clone, PartialEq)]
pub struct EngineState {
    //volume accumulated from all previous trades
    held_volume: f64,
    //volume traded in the most recent period, added to the holding next period
    last_action_volume: f64,
    target_balance: f64,
    cumulative_cash_flow: f64,
    //buy-and-hold volumes fixed at period 0
    control_volume: f64,
    benchmark_volume: f64,
    growth_factor: f64,
}

impl EngineState {
    //period 0: deploys the whole initial balance and seeds the control and benchmark positions
    pub fn open(
        traded: &PricePoint,
        benchmark: &PricePoint,
        config: &StrategyConfig,
    ) -> (Self, ResultRow) {
        let initial_balance = config.initial_balance;
        let action_volume = initial_balance / traded.price;
        let cash_flow = -initial_balance;

        let state = EngineState {
            held_volume: 0.0,
            last_action_volume: action_volume,
            target_balance: initial_balance,
            cumulative_cash_flow: cash_flow,
            control_volume: action_volume,
            benchmark_volume: initial_balance / benchmark.price,
            growth_factor: 1.0 + config.periodic_growth_rate,
        };

        let row = ResultRow {
            date: traded.date.clone(),
            price: rounded(traded.price),
            held_volume: Holding::NotYetHeld,
            held_value: Holding::NotYetHeld,
            period_action_volume: rounded(action_volume),
            period_cash_flow: rounded(cash_flow),
            cumulative_cash_flow: rounded(cash_flow),
            target_balance: rounded(initial_balance),
            control_value: rounded(initial_balance),
            benchmark_price: rounded(benchmark.price),
            benchmark_value: rounded(initial_balance),
        };

        (state, row)
    }

    //period i > 0: grows the target and trades back towards it
    pub fn advance(&mut self, traded: &PricePoint, benchmark: &PricePoint) -> ResultRow {
        let price = traded.price;

        self.target_balance *= self.growth_factor;
        let control_value = self.control_volume * price;
        let benchmark_value = self.benchmark_volume * benchmark.price;

        self.held_volume += self.last_action_volume;
        let held_value = self.held_volume * price;

        let cash_flow = held_value - self.target_balance;
        self.cumulative_cash_flow += cash_flow;
        self.last_action_volume = -cash_flow / price;

        ResultRow {
            date: traded.date.clone(),
            price: rounded(price),
            held_volume: Holding::Held(rounded(self.held_volume)),
            held_value: Holding::Held(rounded(held_value)),
            period_action_volume: rounded(self.last_action_volume),
            period_cash_flow: rounded(cash_flow),
            cumulative_cash_flow: rounded(self.cumulative_cash_flow),
            target_balance: rounded(self.target_balance),
            control_value: rounded(control_value),
            benchmark_price: rounded(benchmark.price),
            benchmark_value: rounded(benchmark_value),
        }
    }

    pub fn target_balance(&self) -> f64 {
        self.target_balance
    }

    pub fn cumulative_cash_flow(&self) -> f64 {
        self.cumulative_cash_flow
    }

    pub fn held_volume(&self) -> f64 {
        self.held_volume
    }
}
