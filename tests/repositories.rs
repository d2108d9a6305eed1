mod common;

use common::{LOGIN, client, contributed_body, repo};
use github_stats_card::repos::{PER_PAGE, collect_repositories, count_contributed_repos};
use serde_json::json;
use wiremock::matchers::{body_partial_json, body_string_contains, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn short_page_ends_pagination() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/users/{LOGIN}/repos")))
        .and(query_param("page", "1"))
        .and(query_param("per_page", PER_PAGE.to_string()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([repo(&server, "a", 3), repo(&server, "b", 4)])),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/users/{LOGIN}/repos")))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/repos/{LOGIN}/a/languages")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Rust": 900, "Shell": 100 })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/repos/{LOGIN}/b/languages")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Rust": 1000 })))
        .mount(&server)
        .await;

    let agg = collect_repositories(&client(&server), LOGIN, 10).await;

    assert_eq!(agg.repositories, 2);
    assert_eq!(agg.stars, 7);
    assert_eq!(agg.languages.total_bytes(), 2000);
    let top = agg.languages.top(1);
    assert_eq!(top[0].name, "Rust");
    assert_eq!(top[0].percent, 95.0);

    server.verify().await;
}

#[tokio::test]
async fn page_ceiling_bounds_requests() {
    let server = MockServer::start().await;

    let full_page: Vec<_> = (0..PER_PAGE)
        .map(|i| {
            json!({
                "full_name": format!("{LOGIN}/r{i}"),
                "stargazers_count": 1,
            })
        })
        .collect();

    Mock::given(method("GET"))
        .and(path(format!("/users/{LOGIN}/repos")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(full_page)))
        .expect(2)
        .mount(&server)
        .await;
    // No languages_url in the listing: the client builds one from full_name.
    Mock::given(method("GET"))
        .and(path_regex(r"^/repos/octo/r\d+/languages$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Go": 1 })))
        .mount(&server)
        .await;

    let agg = collect_repositories(&client(&server), LOGIN, 2).await;

    assert_eq!(agg.repositories, 2 * PER_PAGE as u64);
    assert_eq!(agg.stars, 2 * PER_PAGE as u64);
    assert_eq!(agg.languages.total_bytes(), 2 * PER_PAGE as u64);

    server.verify().await;
}

#[tokio::test]
async fn failing_language_lookup_is_skipped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/users/{LOGIN}/repos")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            repo(&server, "ok", 1),
            repo(&server, "broken", 10),
            repo(&server, "also-ok", 0),
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/repos/{LOGIN}/ok/languages")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Python": 40 })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/repos/{LOGIN}/broken/languages")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/repos/{LOGIN}/also-ok/languages")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Python": 10, "C": 30 })))
        .mount(&server)
        .await;

    let agg = collect_repositories(&client(&server), LOGIN, 10).await;

    assert_eq!(agg.repositories, 3);
    assert_eq!(agg.stars, 11);
    let names: Vec<String> = agg.languages.shares().into_iter().map(|s| s.name).collect();
    assert_eq!(names, ["Python", "C"]);
}

#[tokio::test]
async fn failing_listing_keeps_earlier_pages() {
    let server = MockServer::start().await;

    let full_page: Vec<_> = (0..PER_PAGE)
        .map(|i| json!({ "full_name": format!("{LOGIN}/r{i}"), "stargazers_count": 2 }))
        .collect();

    Mock::given(method("GET"))
        .and(path(format!("/users/{LOGIN}/repos")))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(full_page)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/users/{LOGIN}/repos")))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/users/{LOGIN}/repos")))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/repos/octo/r\d+/languages$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let agg = collect_repositories(&client(&server), LOGIN, 10).await;

    assert_eq!(agg.repositories, PER_PAGE as u64);
    assert_eq!(agg.stars, 2 * PER_PAGE as u64);
    assert!(agg.languages.is_empty());

    server.verify().await;
}

#[tokio::test]
async fn contributed_count_follows_cursors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("defaultBranchRef"))
        .and(body_partial_json(json!({ "variables": { "after": "cursor-1" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(contributed_body(&[Some(1), Some(0)], None)))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("defaultBranchRef"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(contributed_body(&[Some(12), Some(0), None, Some(3)], Some("cursor-1"))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let count = count_contributed_repos(&client(&server), LOGIN, 10).await;
    assert_eq!(count, 3);

    server.verify().await;
}

#[tokio::test]
async fn contributed_count_survives_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [{ "message": "Something went wrong" }]
        })))
        .mount(&server)
        .await;

    assert_eq!(count_contributed_repos(&client(&server), LOGIN, 10).await, 0);
}

#[tokio::test]
async fn contributed_count_shares_the_page_ceiling() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("defaultBranchRef"))
        .respond_with(ResponseTemplate::new(200).set_body_json(contributed_body(&[Some(4)], Some("again"))))
        .expect(2)
        .mount(&server)
        .await;

    assert_eq!(count_contributed_repos(&client(&server), LOGIN, 2).await, 2);

    server.verify().await;
}
