#![allow(dead_code)]

use github_stats_card::github::GithubClient;
use serde_json::{Value, json};
use std::time::Duration;
use wiremock::MockServer;

pub const LOGIN: &str = "octo";

pub fn client(server: &MockServer) -> GithubClient {
    GithubClient::new("test-token", server.uri(), Duration::from_secs(5)).unwrap()
}

/// REST repository entry whose languages live on the mock server.
pub fn repo(server: &MockServer, name: &str, stars: u64) -> Value {
    json!({
        "full_name": format!("{LOGIN}/{name}"),
        "languages_url": format!("{}/repos/{LOGIN}/{name}/languages", server.uri()),
        "stargazers_count": stars,
    })
}

/// GraphQL answer for one year of contributions.
pub fn year_body(commits: u64, prs: u64, days: &[(&str, u64)]) -> Value {
    let total: u64 = days.iter().map(|(_, c)| c).sum();
    let days: Vec<Value> = days
        .iter()
        .map(|(date, count)| json!({ "date": date, "contributionCount": count }))
        .collect();
    json!({
        "data": {
            "user": {
                "contributionsCollection": {
                    "totalCommitContributions": commits,
                    "totalPullRequestContributions": prs,
                    "totalPullRequestReviewContributions": null,
                    "totalIssueContributions": 1,
                    "restrictedContributionsCount": 0,
                    "contributionCalendar": {
                        "totalContributions": total,
                        "weeks": [{ "contributionDays": days }]
                    }
                }
            }
        }
    })
}

/// GraphQL answer for one page of the contributed-to query.
pub fn contributed_body(history_counts: &[Option<u64>], next: Option<&str>) -> Value {
    let nodes: Vec<Value> = history_counts
        .iter()
        .map(|count| match count {
            Some(c) => json!({
                "defaultBranchRef": { "target": { "history": { "totalCount": c } } }
            }),
            None => json!({ "defaultBranchRef": null }),
        })
        .collect();
    json!({
        "data": {
            "user": {
                "repositories": {
                    "pageInfo": { "hasNextPage": next.is_some(), "endCursor": next },
                    "nodes": nodes
                }
            }
        }
    })
}
