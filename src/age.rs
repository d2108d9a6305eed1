//! age.rs
//!
//! Account age as whole years, months and days, for the card header
//! subtitle (`@login · joined 9 years, 3 months ago`).
//!
//! Chrono has no year/month/day difference, so the calendar borrowing is done
//! by hand: a negative day count borrows the length of the month before
//! `today`, a negative month count borrows a year.

use chrono::{Datelike, NaiveDate};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccountAge {
    pub years: i32,
    pub months: i32,
    pub days: i32,
}

impl AccountAge {
    /// Elapsed calendar time from `start` to `today`. Zero when `start` is
    /// after `today`.
    pub fn between(start: NaiveDate, today: NaiveDate) -> Self {
        if start > today {
            return Self::default();
        }

        let mut years = today.year() - start.year();
        let mut months = today.month() as i32 - start.month() as i32;
        let mut days = today.day() as i32 - start.day() as i32;

        if days < 0 {
            months -= 1;
            let (prev_year, prev_month) = if today.month() == 1 {
                (today.year() - 1, 12)
            } else {
                (today.year(), today.month() - 1)
            };
            // A start day past the end of that month clamps to its last day.
            let prev_len = days_in_month(prev_year, prev_month) as i32;
            days = today.day() as i32 + (prev_len - start.day() as i32).max(0);
        }

        if months < 0 {
            years -= 1;
            months += 12;
        }

        Self { years, months, days }
    }
}

impl fmt::Display for AccountAge {
    /// Years and months only; days are noise on a stats card.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.years, self.months) {
            (0, 0) => write!(f, "{} day{}", self.days, plural(self.days)),
            (0, m) => write!(f, "{m} month{}", plural(m)),
            (y, 0) => write!(f, "{y} year{}", plural(y)),
            (y, m) => write!(f, "{y} year{}, {m} month{}", plural(y), plural(m)),
        }
    }
}

fn plural(n: i32) -> &'static str {
    if n == 1 { "" } else { "s" }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(30)
}
