pub mod chart;
pub mod summary;
pub mod timeseries;

pub use chart::{derive_chart_series, ChartSeries};
pub use summary::SummaryMetrics;
pub use timeseries::{max_drawdown, period_returns, total_return};
