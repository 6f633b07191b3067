pub mod backtest;
pub mod batch;
pub mod ledger;
pub mod rounding;
pub mod state;
pub mod validation;

pub use backtest::{run, BacktestEngine};
pub use batch::{run_batch, BatchError, BatchResult, InstrumentRun};
pub use ledger::{Holding, Ledger, ResultRow};
pub use rounding::rounded;
pub use state::EngineState;
pub use validation::{validate_inputs, InputError, SeriesKind};
