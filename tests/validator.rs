use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cv_screener::config::{GithubConfig, ThresholdConfig};
use cv_screener::github::GITHUB_WEB_BASE;
use cv_screener::outcome::{Existence, OutcomeStatus, ValidationFailure};
use cv_screener::validator::GithubValidator;

fn validator_for(server: &MockServer, token: Option<&str>) -> GithubValidator {
    let github = GithubConfig {
        api_base: server.uri(),
        user_agent: "cv-screener-tests".to_string(),
        timeout_secs: 1,
        token: token.map(str::to_string),
    };
    GithubValidator::with_settings(&github, ThresholdConfig::default())
        .expect("build validator")
}

fn user_body(login: &str, public_repos: u32, age_days: i64) -> serde_json::Value {
    let created = Utc::now() - chrono::Duration::days(age_days);
    json!({
        "login": login,
        "public_repos": public_repos,
        "followers": 12,
        "following": 4,
        "created_at": created.to_rfc3339_opts(SecondsFormat::Secs, true),
        "name": "The Octocat",
        "bio": "Mascot",
        "location": "San Francisco",
        "company": null,
        "blog": ""
    })
}

async fn mount_user(server: &MockServer, login: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/users/{login}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn active_account_passes() {
    let server = MockServer::start().await;
    mount_user(&server, "octocat", user_body("octocat", 10, 731)).await;

    let outcome = validator_for(&server, None).validate("octocat").await;

    assert_eq!(outcome.status, OutcomeStatus::Passed);
    assert_eq!(outcome.exists, Existence::Confirmed);
    assert_eq!(outcome.username, "octocat");
    assert!(outcome.format_valid);
    assert_eq!(outcome.error, None);
    assert_eq!(
        outcome.profile_url.as_deref(),
        Some(format!("{GITHUB_WEB_BASE}/octocat").as_str())
    );

    let profile = outcome.profile.expect("profile populated");
    assert_eq!(profile.public_repos, 10);
    assert_eq!(profile.account_age_years, 2.0);
}

#[tokio::test]
async fn zero_repos_warns_regardless_of_age() {
    let server = MockServer::start().await;
    mount_user(&server, "octocat", user_body("octocat", 0, 30)).await;

    let outcome = validator_for(&server, None).validate("octocat").await;

    assert_eq!(outcome.status, OutcomeStatus::Warning);
    assert_eq!(outcome.exists, Existence::Confirmed);
    assert!(outcome.assessment.contains("no public repositories"));
    assert!(outcome.recommendation.contains("Proceed with caution"));
}

#[tokio::test]
async fn sparse_repos_on_mature_account_warns() {
    let server = MockServer::start().await;
    mount_user(&server, "octocat", user_body("octocat", 3, 731)).await;

    let outcome = validator_for(&server, None).validate("octocat").await;

    assert_eq!(outcome.status, OutcomeStatus::Warning);
    assert!(outcome.assessment.contains("only 3 public repositories"));
}

#[tokio::test]
async fn sparse_repos_on_young_account_passes() {
    let server = MockServer::start().await;
    mount_user(&server, "newdev", user_body("newdev", 3, 120)).await;

    let outcome = validator_for(&server, None).validate("newdev").await;

    assert_eq!(outcome.status, OutcomeStatus::Passed);
}

#[tokio::test]
async fn profile_urls_are_normalized_before_lookup() {
    let server = MockServer::start().await;
    mount_user(&server, "octo-cat", user_body("octo-cat", 9, 400)).await;

    let outcome = validator_for(&server, None)
        .validate("  https://github.com/octo-cat?tab=repositories  ")
        .await;

    assert_eq!(outcome.username, "octo-cat");
    assert_eq!(outcome.status, OutcomeStatus::Passed);
}

#[tokio::test]
async fn invalid_format_short_circuits_without_lookup() {
    let server = MockServer::start().await;

    let outcome = validator_for(&server, None).validate("-bad-handle-").await;

    assert_eq!(outcome.status, OutcomeStatus::Failed);
    assert!(!outcome.format_valid);
    assert_eq!(outcome.exists, Existence::Absent);
    assert_eq!(outcome.error, Some(ValidationFailure::InvalidFormat));

    let requests = server.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty(), "no lookup expected for bad format");
}

#[tokio::test]
async fn missing_account_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/ghost"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let outcome = validator_for(&server, None).validate("ghost").await;

    assert_eq!(outcome.status, OutcomeStatus::Failed);
    assert_eq!(outcome.exists, Existence::Absent);
    assert!(outcome.format_valid);
    assert_eq!(outcome.error, Some(ValidationFailure::AccountNotFound));
}

#[tokio::test]
async fn rate_limit_is_indeterminate() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let outcome = validator_for(&server, None).validate("octocat").await;

    assert_eq!(outcome.status, OutcomeStatus::Warning);
    assert_eq!(outcome.exists, Existence::Indeterminate);
    assert_eq!(outcome.error, Some(ValidationFailure::RateLimited));
    assert!(outcome.assessment.contains("GITHUB_TOKEN"));
}

#[tokio::test]
async fn unexpected_status_warns_with_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let outcome = validator_for(&server, None).validate("octocat").await;

    assert_eq!(outcome.status, OutcomeStatus::Warning);
    assert_eq!(outcome.exists, Existence::Indeterminate);
    assert_eq!(outcome.error, Some(ValidationFailure::RemoteService(500)));
    assert!(outcome.assessment.contains("500"));
}

#[tokio::test]
async fn timeout_is_indeterminate_not_absent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/slowpoke"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(user_body("slowpoke", 10, 731))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let outcome = validator_for(&server, None).validate("slowpoke").await;

    assert_eq!(outcome.status, OutcomeStatus::Warning);
    assert_eq!(outcome.exists, Existence::Indeterminate);
    assert_eq!(outcome.error, Some(ValidationFailure::Timeout));
}

#[tokio::test]
async fn token_is_sent_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .and(header("authorization", "token sekrit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body("octocat", 10, 731)))
        .mount(&server)
        .await;

    // The mock only matches with the header present, so a PASSED outcome
    // proves the credential was attached.
    let outcome = validator_for(&server, Some("sekrit")).validate("octocat").await;
    assert_eq!(outcome.status, OutcomeStatus::Passed);
}
