use crate::contributions::{
    ContributionCalendar, ContributionTotals, ContributionYear, year_window,
};
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
const AGENT: &str = "github-stats-card";

/// Upstream counters are sometimes absent or `null`; both read as zero.
fn zero_if_null<'de, D>(de: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(de)?.unwrap_or(0))
}

#[derive(Clone)]
pub struct GithubClient {
    token: Arc<String>,
    api_url: Arc<String>,
    http: Arc<Client>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub followers: u64,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepoSummary {
    pub full_name: String,
    pub languages_url: Option<String>,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub stargazers_count: u64,
}

/// One page of the repositories considered for the contributed-to count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContributedPage {
    pub repositories: u64,
    pub with_commits: u64,
    pub next_cursor: Option<String>,
}

const CONTRIBUTIONS_QUERY: &str = r#"
query($login: String!, $from: DateTime!, $to: DateTime!) {
    user(login: $login) {
        contributionsCollection(from: $from, to: $to) {
            totalCommitContributions
            totalPullRequestContributions
            totalPullRequestReviewContributions
            totalIssueContributions
            restrictedContributionsCount
            contributionCalendar {
                totalContributions
                weeks {
                    contributionDays {
                        date
                        contributionCount
                    }
                }
            }
        }
    }
}
"#;

const CONTRIBUTED_QUERY: &str = r#"
query($login: String!, $after: String) {
    user(login: $login) {
        repositories(
            first: 100,
            after: $after,
            ownerAffiliations: [OWNER, COLLABORATOR, ORGANIZATION_MEMBER]
        ) {
            pageInfo {
                hasNextPage
                endCursor
            }
            nodes {
                defaultBranchRef {
                    target {
                        ... on Commit {
                            history(first: 0) {
                                totalCount
                            }
                        }
                    }
                }
            }
        }
    }
}
"#;

impl GithubClient {
    /// Create a client for the REST API rooted at `api_url`; GraphQL lives at
    /// `{api_url}/graphql`.
    pub fn new(token: impl Into<String>, api_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        let api_url = api_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            token: Arc::new(token.into()),
            api_url: Arc::new(api_url),
            http: Arc::new(http),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Single GraphQL request with `errors` checking. No retries.
    async fn graphql(&self, query: &str, variables: Value) -> Result<Value> {
        let resp = self
            .http
            .post(format!("{}/graphql", self.api_url))
            .bearer_auth(&*self.token)
            .header(USER_AGENT, AGENT)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Network error sending GraphQL request: {e}"))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("GitHub GraphQL returned HTTP {}: {body}", status.as_u16());
        }

        let json: Value = resp
            .json()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to parse JSON from GitHub: {e}"))?;

        if let Some(errors) = json
            .get("errors")
            .filter(|e| e.as_array().is_some_and(|a| !a.is_empty()))
        {
            anyhow::bail!("GraphQL reported errors: {errors:#}");
        }

        Ok(json)
    }

    /// Authenticated REST GET decoding the body as `T`.
    async fn rest<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let resp = self
            .http
            .get(url)
            .bearer_auth(&*self.token)
            .header(USER_AGENT, AGENT)
            .header(ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .with_context(|| format!("Network error requesting {url}"))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("GitHub API returned HTTP {} for {url}: {body}", status.as_u16());
        }

        resp.json::<T>()
            .await
            .with_context(|| format!("Failed to deserialize response from {url}"))
    }

    pub async fn user_profile(&self, login: &str) -> Result<UserProfile> {
        let url = format!("{}/users/{login}", self.api_url);
        self.rest(&url).await
    }

    /// Contribution totals and per-day calendar for one calendar year.
    pub async fn contribution_year(&self, login: &str, year: i32) -> Result<ContributionYear> {
        #[derive(Deserialize)]
        struct ContribResponse {
            data: Option<ContribData>,
        }
        #[derive(Deserialize)]
        struct ContribData {
            user: Option<ContribUser>,
        }
        #[derive(Deserialize)]
        struct ContribUser {
            #[serde(rename = "contributionsCollection")]
            contributions_collection: Option<Collection>,
        }
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Collection {
            #[serde(default, deserialize_with = "zero_if_null")]
            total_commit_contributions: u64,
            #[serde(default, deserialize_with = "zero_if_null")]
            total_pull_request_contributions: u64,
            #[serde(default, deserialize_with = "zero_if_null")]
            total_pull_request_review_contributions: u64,
            #[serde(default, deserialize_with = "zero_if_null")]
            total_issue_contributions: u64,
            #[serde(default, deserialize_with = "zero_if_null")]
            restricted_contributions_count: u64,
            contribution_calendar: Option<Calendar>,
        }
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Calendar {
            #[serde(default, deserialize_with = "zero_if_null")]
            total_contributions: u64,
            #[serde(default)]
            weeks: Vec<Week>,
        }
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Week {
            #[serde(default)]
            contribution_days: Vec<Day>,
        }
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Day {
            date: NaiveDate,
            #[serde(default, deserialize_with = "zero_if_null")]
            contribution_count: u64,
        }

        let (from, to) = year_window(year);
        let json = self
            .graphql(
                CONTRIBUTIONS_QUERY,
                json!({ "login": login, "from": from, "to": to }),
            )
            .await?;
        let parsed: ContribResponse = serde_json::from_value(json)
            .with_context(|| format!("Failed to deserialize contributions for {year}"))?;

        let collection = parsed
            .data
            .and_then(|d| d.user)
            .ok_or_else(|| anyhow::anyhow!("User {login} not found"))?
            .contributions_collection
            .ok_or_else(|| anyhow::anyhow!("No contributions collection for {login} in {year}"))?;

        let mut totals = ContributionTotals {
            total_contributions: 0,
            commits: collection.total_commit_contributions,
            pull_requests: collection.total_pull_request_contributions,
            reviews: collection.total_pull_request_review_contributions,
            issues: collection.total_issue_contributions,
            restricted_contributions: collection.restricted_contributions_count,
        };

        let mut calendar = ContributionCalendar::new();
        if let Some(cal) = collection.contribution_calendar {
            totals.total_contributions = cal.total_contributions;
            for day in cal.weeks.into_iter().flat_map(|w| w.contribution_days) {
                calendar.add(day.date, day.contribution_count);
            }
        }

        Ok(ContributionYear {
            year,
            totals,
            calendar,
        })
    }

    /// One page (1-based) of repositories owned by `login`.
    pub async fn owned_repos_page(&self, login: &str, page: u32, per_page: u32) -> Result<Vec<RepoSummary>> {
        let url = format!(
            "{}/users/{login}/repos?type=owner&per_page={per_page}&page={page}",
            self.api_url
        );
        self.rest(&url).await
    }

    /// Language byte counts for one repository.
    pub async fn repo_languages(&self, repo: &RepoSummary) -> Result<HashMap<String, u64>> {
        let url = match &repo.languages_url {
            Some(url) => url.clone(),
            None => format!("{}/repos/{}/languages", self.api_url, repo.full_name),
        };
        let raw: HashMap<String, Option<u64>> = self.rest(&url).await?;
        Ok(raw
            .into_iter()
            .map(|(lang, bytes)| (lang, bytes.unwrap_or(0)))
            .collect())
    }

    /// One page of repositories the user owns, collaborates on or reaches
    /// through an organization, counting those whose default branch has
    /// any commit.
    pub async fn contributed_repos_page(&self, login: &str, after: Option<&str>) -> Result<ContributedPage> {
        #[derive(Deserialize)]
        struct Response {
            data: Option<Data>,
        }
        #[derive(Deserialize)]
        struct Data {
            user: Option<User>,
        }
        #[derive(Deserialize)]
        struct User {
            repositories: Repos,
        }
        #[derive(Deserialize)]
        struct Repos {
            #[serde(rename = "pageInfo")]
            page_info: PageInfo,
            nodes: Option<Vec<Option<RepoNode>>>,
        }
        #[derive(Deserialize)]
        struct PageInfo {
            #[serde(rename = "hasNextPage", default)]
            has_next_page: bool,
            #[serde(rename = "endCursor")]
            end_cursor: Option<String>,
        }
        #[derive(Deserialize)]
        struct RepoNode {
            #[serde(rename = "defaultBranchRef")]
            default_branch_ref: Option<BranchRef>,
        }
        #[derive(Deserialize)]
        struct BranchRef {
            target: Option<Target>,
        }
        #[derive(Deserialize)]
        struct Target {
            history: Option<History>,
        }
        #[derive(Deserialize)]
        struct History {
            #[serde(rename = "totalCount", default, deserialize_with = "zero_if_null")]
            total_count: u64,
        }

        let json = self
            .graphql(CONTRIBUTED_QUERY, json!({ "login": login, "after": after }))
            .await?;
        let parsed: Response = serde_json::from_value(json)
            .context("Failed to deserialize contributed repositories response")?;

        let repos = parsed
            .data
            .and_then(|d| d.user)
            .ok_or_else(|| anyhow::anyhow!("User {login} not found"))?
            .repositories;

        let nodes = repos.nodes.unwrap_or_default();
        let with_commits = nodes
            .iter()
            .flatten()
            .filter_map(|n| n.default_branch_ref.as_ref())
            .filter_map(|b| b.target.as_ref())
            .filter_map(|t| t.history.as_ref())
            .filter(|h| h.total_count > 0)
            .count() as u64;

        let next_cursor = if repos.page_info.has_next_page {
            repos.page_info.end_cursor
        } else {
            None
        };

        Ok(ContributedPage {
            repositories: nodes.len() as u64,
            with_commits,
            next_cursor,
        })
    }
}
