use crate::data::PeriodDate;
use serde::{Deserialize, Serialize};
use std::fmt;

//current holding of the traded instrument
//the first period has no prior holding yet, so it is NotYetHeld rather than zero
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Holding {
    NotYetHeld,
    Held(f64),
}

impl Holding {
    pub fn is_held(&self) -> bool {
        matches!(self, Holding::Held(_))
    }
}

impl fmt::Display for Holding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Holding::NotYetHeld => f.write_str("--"),
            Holding::Held(v) => write!(f, "{}", v),
        }
    }
}

//one period of the ledger, every number already rounded to 4 places
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub date: PeriodDate,
    pub price: f64,
    pub held_volume: Holding,
    pub held_value: Holding,
    //signed volume traded this period (negative = sale)
    pub period_action_volume: f64,
    //held value minus target (positive = ahead of target)
    pub period_cash_flow: f64,
    pub cumulative_cash_flow: f64,
    pub target_balance: f64,
    //buy-and-hold position opened at period 0
    pub control_value: f64,
    pub benchmark_price: f64,
    pub benchmark_value: f64,
}

//ordered result rows of one engine run, one per input period
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    rows: Vec<ResultRow>,
}

impl Ledger {
    pub(crate) fn from_rows(rows: Vec<ResultRow>) -> Self {
        Ledger { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResultRow> {
        self.rows.iter()
    }

    pub fn first(&self) -> Option<&ResultRow> {
        self.rows.first()
    }

    pub fn last(&self) -> Option<&ResultRow> {
        self.rows.last()
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a ResultRow;
    type IntoIter = std::slice::Iter<'a, ResultRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
