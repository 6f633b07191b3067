//a Rust-based value averaging backtesting engine

pub mod config;
pub mod data;
pub mod engine;
pub mod metrics;
pub mod report;

//prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{BatchConfiguration, InstrumentConfig, StrategyConfig};
    pub use crate::data::{ensure_aligned, load_price_csv, PeriodDate, PricePoint, PriceSeries};
    pub use crate::engine::{
        rounded, run, run_batch, BacktestEngine, BatchError, BatchResult, EngineState, Holding,
        InputError, InstrumentRun, Ledger, ResultRow,
    };
    pub use crate::metrics::{derive_chart_series, ChartSeries, SummaryMetrics};
    pub use crate::report::{ledger_table, print_ledger, write_chart_json, write_ledger_csv};
}
