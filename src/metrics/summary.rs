use crate::config::StrategyConfig;
use crate::engine::Ledger;
use crate::metrics::chart::derive_chart_series;
use crate::metrics::timeseries::{max_drawdown, period_returns, total_return};
use prettytable::{Cell, Row, Table};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

//summary metrics for one value averaging run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub periods: usize,
    pub initial_balance: f64,
    pub final_target_balance: f64,
    pub final_total_balance: f64,
    pub final_control_value: f64,
    pub final_benchmark_value: f64,
    pub net_cash_flow: f64,
    pub peak_capital_committed: f64,
    pub strategy_return_pct: f64,
    pub control_return_pct: f64,
    pub benchmark_return_pct: f64,
    pub strategy_max_drawdown: f64,
    pub control_max_drawdown: f64,
    pub benchmark_max_drawdown: f64,
    pub control_volatility: f64,
}

impl SummaryMetrics {
    //calculate summary metrics from a finished ledger
    pub fn from_ledger(ledger: &Ledger, config: &StrategyConfig) -> Self {
        let initial_balance = config.initial_balance;
        let chart = derive_chart_series(ledger);

        let final_total_balance = chart.total_balance.last().copied().unwrap_or(0.0);
        let (final_target_balance, final_control_value, final_benchmark_value, net_cash_flow) =
            ledger
                .last()
                .map(|row| {
                    (
                        row.target_balance,
                        row.control_value,
                        row.benchmark_value,
                        row.cumulative_cash_flow,
                    )
                })
                .unwrap_or((initial_balance, initial_balance, initial_balance, 0.0));

        //deepest point the cumulative cash flow reached, as money put in
        let peak_capital_committed = ledger
            .iter()
            .map(|row| -row.cumulative_cash_flow)
            .fold(0.0f64, f64::max);

        let benchmark_values: Vec<f64> = ledger.iter().map(|row| row.benchmark_value).collect();

        let control_returns = period_returns(&chart.control);
        let control_volatility = if control_returns.len() >= 2 {
            let returns: &[f64] = &control_returns;
            returns.std_dev()
        } else {
            0.0
        };

        SummaryMetrics {
            periods: ledger.len(),
            initial_balance,
            final_target_balance,
            final_total_balance,
            final_control_value,
            final_benchmark_value,
            net_cash_flow,
            peak_capital_committed,
            strategy_return_pct: total_return(final_total_balance, initial_balance) * 100.0,
            control_return_pct: total_return(final_control_value, initial_balance) * 100.0,
            benchmark_return_pct: total_return(final_benchmark_value, initial_balance) * 100.0,
            strategy_max_drawdown: max_drawdown(&chart.total_balance),
            control_max_drawdown: max_drawdown(&chart.control),
            benchmark_max_drawdown: max_drawdown(&benchmark_values),
            control_volatility,
        }
    }

    //builds the metrics table
    pub fn to_table(&self) -> Table {
        let mut table = Table::new();

        table.add_row(Row::new(vec![Cell::new("Metric"), Cell::new("Value")]));

        let rows = [
            ("Periods", format!("{}", self.periods)),
            ("Initial Balance", format!("${:.2}", self.initial_balance)),
            ("Final Target Balance", format!("${:.2}", self.final_target_balance)),
            ("Final Total Balance", format!("${:.2}", self.final_total_balance)),
            ("Net Cash Flow", format!("${:.2}", self.net_cash_flow)),
            ("Peak Capital Committed", format!("${:.2}", self.peak_capital_committed)),
            ("Strategy Return", format!("{:.2}%", self.strategy_return_pct)),
            ("Control Value", format!("${:.2}", self.final_control_value)),
            ("Control Return", format!("{:.2}%", self.control_return_pct)),
            ("Benchmark Value", format!("${:.2}", self.final_benchmark_value)),
            ("Benchmark Return", format!("{:.2}%", self.benchmark_return_pct)),
            ("Strategy Max Drawdown", format!("{:.2}%", self.strategy_max_drawdown * 100.0)),
            ("Control Max Drawdown", format!("{:.2}%", self.control_max_drawdown * 100.0)),
            ("Benchmark Max Drawdown", format!("{:.2}%", self.benchmark_max_drawdown * 100.0)),
            ("Control Volatility", format!("{:.2}%", self.control_volatility * 100.0)),
        ];

        for (name, value) in rows {
            table.add_row(Row::new(vec![Cell::new(name), Cell::new(&value)]));
        }

        table
    }

    //prints metrics in a formatted table
    pub fn pretty_print_table(&self) {
        self.to_table().printstd();
    }
}
