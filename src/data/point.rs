use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

//accepted calendar date formats, tried in order
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

//the period a price belongs to: a calendar date or an opaque label (eg 2014-06)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PeriodDate {
    Date(NaiveDate),
    Label(String),
}

impl PeriodDate {
    //parses a calendar date, falling back to keeping the text verbatim
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
            .map(PeriodDate::Date)
            .unwrap_or_else(|| PeriodDate::Label(trimmed.to_string()))
    }

    //returns the calendar date if this period has one
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            PeriodDate::Date(date) => Some(*date),
            PeriodDate::Label(_) => None,
        }
    }
}

impl fmt::Display for PeriodDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodDate::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            PeriodDate::Label(label) => f.write_str(label),
        }
    }
}

impl FromStr for PeriodDate {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(PeriodDate::parse(s))
    }
}

impl From<&str> for PeriodDate {
    fn from(s: &str) -> Self {
        PeriodDate::parse(s)
    }
}

impl From<NaiveDate> for PeriodDate {
    fn from(date: NaiveDate) -> Self {
        PeriodDate::Date(date)
    }
}

impl Serialize for PeriodDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PeriodDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(PeriodDate::parse(&raw))
    }
}

//a single period's price for one instrument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: PeriodDate,
    pub price: f64,
}

impl PricePoint {
    pub fn new(date: impl Into<PeriodDate>, price: f64) -> Self {
        PricePoint {
            date: date.into(),
            price,
        }
    }
}

//chronological prices, one entry per period
pub type PriceSeries = Vec<PricePoint>;
