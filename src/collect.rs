use crate::age::AccountAge;
use crate::config::Config;
use crate::contributions::collect_contributions;
use crate::github::{GithubClient, UserProfile};
use crate::repos::{collect_repositories, count_contributed_repos};
use crate::stats::CardStats;
use crate::streak::compute_streaks;
use chrono::{DateTime, Datelike, Utc};
use tracing::{info, warn};

/// Run every fetch in sequence and assemble the card's numbers.
///
/// Only the profile, a year, a page or a repository can fail here, and each
/// failure just leaves its share out.
pub async fn collect_stats(client: &GithubClient, config: &Config, now: DateTime<Utc>) -> CardStats {
    let login = config.login.as_str();

    let profile = match client.user_profile(login).await {
        Ok(profile) => profile,
        Err(e) => {
            warn!(login, "profile lookup failed: {e:#}");
            UserProfile::default()
        }
    };

    let current_year = now.year();
    info!(login, from = config.since_year, to = current_year, "fetching contribution years");
    let history = collect_contributions(client, login, config.since_year, current_year).await;
    if !history.failed_years.is_empty() {
        warn!(years = ?history.failed_years, "some contribution years were skipped");
    }
    let streak = compute_streaks(&history.calendar);

    info!(login, "aggregating repositories");
    let repos = collect_repositories(client, login, config.max_repo_pages).await;
    let contributed_repos = count_contributed_repos(client, login, config.max_repo_pages).await;

    let stats = CardStats {
        login: login.to_string(),
        display_name: profile.name,
        avatar_url: profile.avatar_url,
        account_age: profile
            .created_at
            .map(|created| AccountAge::between(created.date_naive(), now.date_naive())),
        followers: profile.followers,
        totals: history.totals,
        streak,
        repositories: repos.repositories,
        stars: repos.stars,
        contributed_repos,
        languages: repos.languages.top(config.top_languages),
        generated_at: now,
    };

    info!(
        contributions = stats.totals.total_contributions,
        current_streak = stats.streak.current_streak,
        longest_streak = stats.streak.longest_streak,
        repositories = stats.repositories,
        stars = stats.stars,
        "collected stats"
    );

    stats
}
