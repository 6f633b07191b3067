use crate::engine::{rounded, Ledger};
use serde::{Deserialize, Serialize};

//chart-ready series derived from a finished ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    //x-axis labels, one per row
    pub labels: Vec<String>,

    //legend names of the two datasets
    pub total_balance_label: String,
    pub control_label: String,

    //cumulative cash flow plus target balance
    pub total_balance: Vec<f64>,

    //buy-and-hold value
    pub control: Vec<f64>,
}

impl ChartSeries {
    //names the total balance dataset after its growth rate, eg "Total Balance at 1% Growth"
    pub fn with_growth_rate(mut self, periodic_growth_rate: f64) -> Self {
        self.total_balance_label = format!(
            "Total Balance at {}% Growth",
            rounded(periodic_growth_rate * 100.0)
        );
        self
    }
}

//derives the chart series from a ledger without touching any engine state
pub fn derive_chart_series(ledger: &Ledger) -> ChartSeries {
    ChartSeries {
        labels: ledger.iter().map(|row| row.date.to_string()).collect(),
        total_balance_label: "Total Balance".to_string(),
        control_label: "Control".to_string(),
        total_balance: ledger
            .iter()
            .map(|row| rounded(row.cumulative_cash_flow + row.target_balance))
            .collect(),
        control: ledger.iter().map(|row| row.control_value).collect(),
    }
}
