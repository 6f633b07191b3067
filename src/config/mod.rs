pub mod backtest_config;

pub use backtest_config::{BatchConfiguration, InstrumentConfig, StrategyConfig};
