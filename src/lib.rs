//! Fetches a GitHub user's contribution history, stars and repository
//! languages, then renders them as a static SVG stats card.

pub mod age;
pub mod collect;
pub mod config;
pub mod contributions;
pub mod github;
pub mod languages;
pub mod repos;
pub mod stats;
pub mod streak;
pub mod svg;
pub mod writer;

use anyhow::Result;
use chrono::Utc;
use config::Config;
use github::GithubClient;
use std::path::PathBuf;
use svg::Theme;

/// File stem of the card for `theme`, e.g. `github-stats-dark`.
pub fn card_stem(theme: Theme) -> String {
    format!("github-stats-{}", theme.name())
}

/// Fetch, render both themes, write. Returns the files written.
pub async fn run(config: &Config) -> Result<Vec<PathBuf>> {
    let client = GithubClient::new(config.token.as_str(), config.api_url.as_str(), config.timeout)?;
    let now = Utc::now();

    let stats = collect::collect_stats(&client, config, now).await;

    let stamp = config.timestamped.then_some(now);
    let mut written = Vec::new();
    for theme in Theme::ALL {
        let card = svg::render_card(&stats, theme);
        written.extend(writer::write_card(&config.output_dir, &card_stem(theme), &card, stamp)?);
    }

    Ok(written)
}
