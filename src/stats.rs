use crate::age::AccountAge;
use crate::contributions::ContributionTotals;
use crate::languages::LanguageShare;
use crate::streak::StreakResult;
use chrono::{DateTime, Utc};

/// Everything the card shows. Rendering depends on nothing else.
#[derive(Debug, Clone, PartialEq)]
pub struct CardStats {
    pub login: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub account_age: Option<AccountAge>,
    pub followers: u64,
    pub totals: ContributionTotals,
    pub streak: StreakResult,
    pub repositories: u64,
    pub stars: u64,
    pub contributed_repos: u64,
    pub languages: Vec<LanguageShare>,
    pub generated_at: DateTime<Utc>,
}

impl CardStats {
    /// Display name when the profile has one, otherwise the login.
    pub fn title(&self) -> &str {
        self.display_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.login)
    }
}
