//! Repository-level aggregates: stars, languages and the approximate
//! contributed-to count.

use crate::github::GithubClient;
use crate::languages::LanguageTotals;
use tracing::{debug, warn};

pub const PER_PAGE: u32 = 100;
pub const DEFAULT_MAX_PAGES: u32 = 10;

#[derive(Debug, Clone, Default)]
pub struct RepoAggregate {
    pub repositories: u64,
    pub stars: u64,
    pub languages: LanguageTotals,
}

/// Page through owned repositories, summing stars and language bytes.
///
/// Stops on the first short page or after `max_pages` pages. A page that
/// fails ends pagination; a repository whose languages fail contributes
/// nothing to the language totals.
pub async fn collect_repositories(client: &GithubClient, login: &str, max_pages: u32) -> RepoAggregate {
    let mut agg = RepoAggregate::default();

    for page in 1..=max_pages {
        let repos = match client.owned_repos_page(login, page, PER_PAGE).await {
            Ok(repos) => repos,
            Err(e) => {
                warn!(page, "stopping repository listing: {e:#}");
                break;
            }
        };
        let short_page = repos.len() < PER_PAGE as usize;
        debug!(page, count = repos.len(), "fetched repository page");

        for repo in &repos {
            agg.repositories += 1;
            agg.stars = agg.stars.saturating_add(repo.stargazers_count);

            match client.repo_languages(repo).await {
                Ok(breakdown) => agg.languages.absorb(breakdown),
                Err(e) => warn!(repo = %repo.full_name, "skipping languages: {e:#}"),
            }
        }

        if short_page {
            break;
        }
    }

    agg
}

/// Approximate number of repositories contributed to: repositories the
/// user owns, collaborates on or reaches through an organization whose
/// default branch has at least one commit. Follows at most `max_pages`
/// GraphQL cursors.
pub async fn count_contributed_repos(client: &GithubClient, login: &str, max_pages: u32) -> u64 {
    let mut count = 0u64;
    let mut cursor: Option<String> = None;

    for page in 1..=max_pages {
        match client.contributed_repos_page(login, cursor.as_deref()).await {
            Ok(result) => {
                debug!(
                    page,
                    scanned = result.repositories,
                    with_commits = result.with_commits,
                    "fetched contributed-to page"
                );
                count += result.with_commits;
                match result.next_cursor {
                    Some(next) => cursor = Some(next),
                    None => break,
                }
            }
            Err(e) => {
                warn!(page, "stopping contributed-to count: {e:#}");
                break;
            }
        }
    }

    count
}
