use std::sync::LazyLock;
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use regex::Regex;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use tracing::debug;

use crate::config::{Config, GithubConfig, ThresholdConfig};
use crate::github::{GithubUser, GITHUB_WEB_BASE};
use crate::outcome::{
    Existence, OutcomeStatus, ProfileCompleteness, ProfileSummary, ValidationOutcome,
};

static PROFILE_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"github\.com/([A-Za-z0-9-]+)").expect("profile path regex"));

static HANDLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9]([A-Za-z0-9-]{0,37}[A-Za-z0-9])?$").expect("handle format regex")
});

/// Reduce a free-form identifier (profile URL, @-handle, or bare handle) to
/// the canonical account handle.
pub fn normalize_identifier(raw: &str) -> String {
    let mut handle = raw.trim().to_string();

    // Handle github.com/username URLs
    if handle.contains("github.com/") {
        if let Some(extracted) = PROFILE_PATH_RE.captures(&handle).map(|c| c[1].to_string()) {
            handle = extracted;
        }
    }

    // Handle @username format
    if handle.starts_with('@') {
        handle.remove(0);
    }

    // Remove query params and trailing slashes
    if let Some(idx) = handle.find('?') {
        handle.truncate(idx);
    }
    while handle.ends_with('/') {
        handle.pop();
    }

    handle
}

/// GitHub's lexical rule: 1-39 alphanumerics or hyphens, no leading or
/// trailing hyphen.
pub fn handle_format_valid(handle: &str) -> bool {
    HANDLE_RE.is_match(handle)
}

/// Validates account existence and profile activity against the GitHub REST
/// API. Stateless between calls; every call is one bounded lookup.
#[derive(Debug, Clone)]
pub struct GithubValidator {
    client: reqwest::Client,
    api_base: String,
    token: Option<String>,
    thresholds: ThresholdConfig,
}

impl GithubValidator {
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_settings(&config.github, config.thresholds.clone())
    }

    pub fn with_settings(github: &GithubConfig, thresholds: ThresholdConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(github.timeout_secs))
            .user_agent(github.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            api_base: github.api_base.trim_end_matches('/').to_string(),
            token: github.token.clone(),
            thresholds,
        })
    }

    /// Validate a candidate-supplied identifier. Never fails: malformed input,
    /// missing accounts, rate limits, and transport errors all come back as a
    /// structured outcome the caller can branch on.
    pub async fn validate(&self, identifier: &str) -> ValidationOutcome {
        debug!(identifier, "validating GitHub identifier");

        let username = normalize_identifier(identifier);
        if !handle_format_valid(&username) {
            return ValidationOutcome::invalid_format(username);
        }

        let url = format!("{}/users/{}", self.api_base, username);
        let mut request = self
            .client
            .get(&url)
            .header(ACCEPT, "application/vnd.github.v3+json");

        // Token raises the rate allowance; absence is not an error
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("token {token}"));
        }

        match request.send().await {
            Ok(response) => self.classify_response(username, response).await,
            Err(err) if err.is_timeout() => ValidationOutcome::timed_out(username),
            Err(err) => ValidationOutcome::network_failure(username, err.to_string()),
        }
    }

    async fn classify_response(
        &self,
        username: String,
        response: reqwest::Response,
    ) -> ValidationOutcome {
        match response.status() {
            StatusCode::OK => match response.json::<GithubUser>().await {
                Ok(user) => self.assess_profile(username, user),
                Err(err) => ValidationOutcome::network_failure(username, err.to_string()),
            },
            StatusCode::NOT_FOUND => ValidationOutcome::not_found(username),
            StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
                ValidationOutcome::rate_limited(username)
            }
            status => ValidationOutcome::remote_error(username, status.as_u16()),
        }
    }

    fn assess_profile(&self, username: String, user: GithubUser) -> ValidationOutcome {
        let age_years = account_age_years(user.created_at, Utc::now());
        let completeness = profile_completeness(&user);

        let (status, recommendation, assessment) = if user.public_repos == 0 {
            (
                OutcomeStatus::Warning,
                "⚠️ Proceed with caution - No public repositories found".to_string(),
                "Account exists but has no public repositories. This may indicate a private \
                 portfolio or inactive account."
                    .to_string(),
            )
        } else if user.public_repos < self.thresholds.min_public_repos
            && age_years > self.thresholds.min_account_age_years
        {
            (
                OutcomeStatus::Warning,
                "⚠️ Proceed with caution - Limited repository activity".to_string(),
                format!(
                    "Account has only {} public repositories despite being {:.1} years old. \
                     Limited portfolio visibility.",
                    user.public_repos, age_years
                ),
            )
        } else {
            (
                OutcomeStatus::Passed,
                "✅ Proceed with GitHub analysis - Account appears valid and active".to_string(),
                format!(
                    "Active GitHub account with {} public repositories. Profile is {}. Account \
                     age: {:.1} years.",
                    user.public_repos,
                    completeness.to_string().to_lowercase(),
                    age_years
                ),
            )
        };

        let profile_url = format!("{GITHUB_WEB_BASE}/{username}");

        ValidationOutcome {
            status,
            username,
            format_valid: true,
            exists: Existence::Confirmed,
            profile: Some(ProfileSummary {
                public_repos: user.public_repos,
                followers: user.followers,
                following: user.following,
                account_age_years: (age_years * 10.0).round() / 10.0,
                profile_completeness: completeness,
                name: user.name,
                bio: user.bio,
                location: user.location,
                company: user.company,
                blog: user.blog,
            }),
            error: None,
            assessment,
            recommendation,
            profile_url: Some(profile_url),
        }
    }
}

fn account_age_years(created_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    match created_at {
        Some(created) => (now - created).num_days() as f64 / 365.25,
        None => 0.0,
    }
}

fn profile_completeness(user: &GithubUser) -> ProfileCompleteness {
    let fields = [&user.name, &user.bio, &user.location, &user.company, &user.blog];
    let populated = fields
        .iter()
        .filter(|f| f.as_deref().is_some_and(|v| !v.trim().is_empty()))
        .count();

    if populated >= 4 {
        ProfileCompleteness::Complete
    } else if populated >= 2 {
        ProfileCompleteness::Partial
    } else {
        ProfileCompleteness::Minimal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn normalizes_profile_urls_to_handle() {
        assert_eq!(normalize_identifier("https://github.com/octocat"), "octocat");
        assert_eq!(normalize_identifier("github.com/octocat"), "octocat");
        assert_eq!(
            normalize_identifier("https://github.com/octo-cat/repos"),
            "octo-cat"
        );
    }

    #[test]
    fn strips_one_leading_at_sign() {
        assert_eq!(normalize_identifier("@octocat"), "octocat");
        assert_eq!(normalize_identifier("@@octocat"), "@octocat");
    }

    #[test]
    fn strips_query_string_and_trailing_slash() {
        assert_eq!(normalize_identifier("octocat?tab=repositories"), "octocat");
        assert_eq!(normalize_identifier("octocat/"), "octocat");
        assert_eq!(
            normalize_identifier("  https://github.com/octocat?tab=stars  "),
            "octocat"
        );
    }

    #[test]
    fn bare_handles_pass_through() {
        assert_eq!(normalize_identifier("octocat"), "octocat");
    }

    #[test]
    fn rejects_malformed_handles() {
        assert!(!handle_format_valid(""));
        assert!(!handle_format_valid("-octocat"));
        assert!(!handle_format_valid("octocat-"));
        assert!(!handle_format_valid("octo_cat"));
        assert!(!handle_format_valid("octo cat"));
        assert!(!handle_format_valid(&"a".repeat(40)));
    }

    #[test]
    fn accepts_valid_handles() {
        assert!(handle_format_valid("a"));
        assert!(handle_format_valid("a-b"));
        assert!(handle_format_valid("octo-cat-42"));
        assert!(handle_format_valid(&"a".repeat(39)));
    }

    #[test]
    fn account_age_uses_julian_year() {
        let created = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).single();
        let now = Utc
            .with_ymd_and_hms(2022, 1, 1, 0, 0, 0)
            .single()
            .expect("valid timestamp");
        let age = account_age_years(created, now);
        assert!((age - 2.0).abs() < 0.01, "age was {age}");
        assert_eq!(account_age_years(None, now), 0.0);
    }

    #[test]
    fn completeness_counts_populated_fields() {
        let mut user = GithubUser {
            login: "octocat".to_string(),
            public_repos: 1,
            followers: 0,
            following: 0,
            created_at: None,
            name: Some("The Octocat".to_string()),
            bio: Some("Mascot".to_string()),
            location: Some("San Francisco".to_string()),
            company: Some("GitHub".to_string()),
            blog: Some("https://octocat.dev".to_string()),
        };
        assert_eq!(profile_completeness(&user), ProfileCompleteness::Complete);

        user.company = None;
        user.blog = Some(String::new());
        assert_eq!(profile_completeness(&user), ProfileCompleteness::Partial);

        user.bio = None;
        user.location = None;
        assert_eq!(profile_completeness(&user), ProfileCompleteness::Minimal);
    }
}
