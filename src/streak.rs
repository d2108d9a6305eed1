//! Streak figures derived from a contribution calendar.
//!
//! A streak is a maximal run of consecutive calendar days that each carry at
//! least one contribution. Days missing from the calendar count as zero.

use crate::contributions::ContributionCalendar;
use chrono::{Days, NaiveDate};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreakResult {
    pub total_contributions: u64,
    pub current_streak: u32,
    pub longest_streak: u32,
}

pub fn compute_streaks(calendar: &ContributionCalendar) -> StreakResult {
    let (Some(first), Some(last)) = (calendar.first_date(), calendar.last_date()) else {
        return StreakResult::default();
    };

    let have: BTreeSet<NaiveDate> = calendar
        .iter()
        .filter(|(_, count)| *count > 0)
        .map(|(date, _)| date)
        .collect();

    StreakResult {
        total_contributions: calendar.total(),
        current_streak: current_streak(&have, last),
        longest_streak: longest_streak(&have, first, last),
    }
}

/// Longest run over every day in `first..=last`, gaps included.
fn longest_streak(have: &BTreeSet<NaiveDate>, first: NaiveDate, last: NaiveDate) -> u32 {
    let mut run = 0u32;
    let mut best = 0u32;

    for date in first.iter_days().take_while(|d| *d <= last) {
        if have.contains(&date) {
            run += 1;
        } else {
            best = best.max(run);
            run = 0;
        }
    }

    // A run that reaches the last day never hits the reset branch.
    best.max(run)
}

/// Run ending at `last`, walking backward until the first empty day.
fn current_streak(have: &BTreeSet<NaiveDate>, last: NaiveDate) -> u32 {
    let mut run = 0u32;
    let mut cursor = Some(last);

    while let Some(date) = cursor {
        if !have.contains(&date) {
            break;
        }
        run += 1;
        cursor = date.checked_sub_days(Days::new(1));
    }

    run
}
