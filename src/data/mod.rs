pub mod loader;
pub mod point;

pub use loader::{ensure_aligned, load_price_csv};
pub use point::{PeriodDate, PricePoint, PriceSeries};
