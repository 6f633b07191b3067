pub mod export;
pub mod table;

pub use export::{write_chart_json, write_ledger_csv};
pub use table::{ledger_table, print_ledger, SignColumn};
