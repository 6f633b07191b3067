use crate::engine::Ledger;
use prettytable::{Cell, Row, Table};

const HEADERS: [&str; 11] = [
    "DATE",
    "OPEN PRICE",
    "CURRENT VOLUME",
    "CURRENT VOLUME VALUE",
    "ACTION VOLUME",
    "CASH FLOW",
    "CUMULATIVE CASH FLOW",
    "NEW BALANCE",
    "CONTROL",
    "BENCHMARK PRICE",
    "BENCHMARK",
];

//columns coloured by the sign of their value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignColumn {
    //buying or holding (<= 0) is green
    ActionVolume,
    //cash coming back (>= 0) is green
    CashFlow,
    //only a net positive position is green
    CumulativeCashFlow,
}

impl SignColumn {
    pub fn is_favourable(self, value: f64) -> bool {
        match self {
            SignColumn::ActionVolume => value <= 0.0,
            SignColumn::CashFlow => value >= 0.0,
            SignColumn::CumulativeCashFlow => value > 0.0,
        }
    }

    //prettytable style spec: green or red foreground
    pub fn style_spec(self, value: f64) -> &'static str {
        if self.is_favourable(value) {
            "Fg"
        } else {
            "Fr"
        }
    }
}

fn signed_cell(value: f64, column: SignColumn) -> Cell {
    Cell::new(&value.to_string()).style_spec(column.style_spec(value))
}

//builds a table with one line per ledger row
//values are printed as the engine emitted them, no further rounding
pub fn ledger_table(ledger: &Ledger) -> Table {
    let mut table = Table::new();

    table.set_titles(Row::new(HEADERS.iter().map(|h| Cell::new(h)).collect()));

    for row in ledger {
        table.add_row(Row::new(vec![
            Cell::new(&row.date.to_string()),
            Cell::new(&row.price.to_string()),
            Cell::new(&row.held_volume.to_string()),
            Cell::new(&row.held_value.to_string()),
            signed_cell(row.period_action_volume, SignColumn::ActionVolume),
            signed_cell(row.period_cash_flow, SignColumn::CashFlow),
            signed_cell(row.cumulative_cash_flow, SignColumn::CumulativeCashFlow),
            Cell::new(&row.target_balance.to_string()),
            Cell::new(&row.control_value.to_string()),
            Cell::new(&row.benchmark_price.to_string()),
            Cell::new(&row.benchmark_value.to_string()),
        ]));
    }

    table
}

//prints the ledger table to stdout
pub fn print_ledger(ledger: &Ledger) {
    ledger_table(ledger).printstd();
}
