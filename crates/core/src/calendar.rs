use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Payment term in calendar days counted from the emission date.
const PRAZO_DIAS: u64 = 60;

pub fn is_dia_util(data: NaiveDate) -> bool {
    !matches!(data.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Advances day-by-day until a weekday (Mon-Fri) is reached. Returns the
/// input unchanged when it already is one.
pub fn proximo_dia_util(data: NaiveDate) -> NaiveDate {
    let mut data = data;
    while !is_dia_util(data) {
        data = data.succ_opt().unwrap();
    }
    data
}

/// Due date for an emission: 60 calendar days out, rolled to the first day
/// of the month after that mark, then to the next business day.
///
/// The month rollover goes through `chrono::Months` so the December-to-
/// January wrap carries the year along.
pub fn data_vencimento(emissao: NaiveDate) -> NaiveDate {
    let marco = emissao + Days::new(PRAZO_DIAS);
    let primeiro_do_mes_seguinte = marco.with_day(1).unwrap() + Months::new(1);
    proximo_dia_util(primeiro_do_mes_seguinte)
}

/// Inclusive date interval, as used by the period filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}
