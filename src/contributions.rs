//! Contribution history gathered one calendar year at a time.
//!
//! GitHub caps a `contributionsCollection` query to a one-year window, so the
//! history is assembled by walking every year from the epoch to today and
//! folding each answer into a running total and a merged day calendar.

use crate::github::GithubClient;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::ops::AddAssign;
use tracing::{debug, warn};

/// First year GitHub has contribution data for.
pub const EPOCH_YEAR: i32 = 2008;

/// Per-day contribution counts, ordered by date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContributionCalendar {
    days: BTreeMap<NaiveDate, u64>,
}

impl ContributionCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `count` contributions on `date`. Repeated dates accumulate.
    pub fn add(&mut self, date: NaiveDate, count: u64) {
        let slot = self.days.entry(date).or_insert(0);
        *slot = slot.saturating_add(count);
    }

    pub fn merge(&mut self, other: ContributionCalendar) {
        for (date, count) in other.days {
            self.add(date, count);
        }
    }

    pub fn get(&self, date: NaiveDate) -> u64 {
        self.days.get(&date).copied().unwrap_or(0)
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.days.keys().next().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.days.keys().next_back().copied()
    }

    pub fn total(&self) -> u64 {
        self.days.values().fold(0u64, |acc, c| acc.saturating_add(*c))
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, u64)> + '_ {
        self.days.iter().map(|(d, c)| (*d, *c))
    }
}

impl FromIterator<(NaiveDate, u64)> for ContributionCalendar {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, u64)>>(iter: I) -> Self {
        let mut calendar = Self::new();
        for (date, count) in iter {
            calendar.add(date, count);
        }
        calendar
    }
}

/// Summed contribution counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContributionTotals {
    pub total_contributions: u64,
    pub commits: u64,
    pub pull_requests: u64,
    pub reviews: u64,
    pub issues: u64,
    pub restricted_contributions: u64,
}

impl AddAssign for ContributionTotals {
    fn add_assign(&mut self, rhs: Self) {
        self.total_contributions = self.total_contributions.saturating_add(rhs.total_contributions);
        self.commits = self.commits.saturating_add(rhs.commits);
        self.pull_requests = self.pull_requests.saturating_add(rhs.pull_requests);
        self.reviews = self.reviews.saturating_add(rhs.reviews);
        self.issues = self.issues.saturating_add(rhs.issues);
        self.restricted_contributions = self
            .restricted_contributions
            .saturating_add(rhs.restricted_contributions);
    }
}

/// One year's answer from the contributions query.
#[derive(Debug, Clone, Default)]
pub struct ContributionYear {
    pub year: i32,
    pub totals: ContributionTotals,
    pub calendar: ContributionCalendar,
}

/// Everything gathered across all years.
#[derive(Debug, Clone, Default)]
pub struct ContributionHistory {
    pub totals: ContributionTotals,
    pub calendar: ContributionCalendar,
    pub failed_years: Vec<i32>,
}

/// Query window for `year`: `[year-01-01T00:00:00Z, year-12-31T23:59:59Z)`.
pub fn year_window(year: i32) -> (String, String) {
    (
        format!("{year:04}-01-01T00:00:00Z"),
        format!("{year:04}-12-31T23:59:59Z"),
    )
}

/// Fetch every year in `first_year..=last_year`, skipping years that fail.
pub async fn collect_contributions(
    client: &GithubClient,
    login: &str,
    first_year: i32,
    last_year: i32,
) -> ContributionHistory {
    let mut history = ContributionHistory::default();

    for year in first_year..=last_year {
        match client.contribution_year(login, year).await {
            Ok(contrib) => {
                debug!(
                    year,
                    total = contrib.totals.total_contributions,
                    days = contrib.calendar.len(),
                    "fetched contribution year"
                );
                history.totals += contrib.totals;
                history.calendar.merge(contrib.calendar);
            }
            Err(e) => {
                warn!(year, "skipping contribution year: {e:#}");
                history.failed_years.push(year);
            }
        }
    }

    history
}
