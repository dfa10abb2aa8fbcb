use serde::ser::Serializer;
use serde::Serialize;

/// Tri-state confidence classification for a validation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutcomeStatus {
    Passed,
    Warning,
    Failed,
}

impl std::fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutcomeStatus::Passed => write!(f, "PASSED"),
            OutcomeStatus::Warning => write!(f, "WARNING"),
            OutcomeStatus::Failed => write!(f, "FAILED"),
        }
    }
}

/// Whether the account was confirmed present, confirmed absent, or could not
/// be determined (rate limit, remote error, timeout).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Existence {
    Confirmed,
    Absent,
    Indeterminate,
}

impl Existence {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Existence::Confirmed)
    }

    pub fn is_indeterminate(&self) -> bool {
        matches!(self, Existence::Indeterminate)
    }
}

// Serialized as true/false/null so JSON consumers see the familiar
// boolean-or-unknown shape.
impl Serialize for Existence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Existence::Confirmed => serializer.serialize_bool(true),
            Existence::Absent => serializer.serialize_bool(false),
            Existence::Indeterminate => serializer.serialize_none(),
        }
    }
}

/// Everything that can go wrong during validation. None of these escape the
/// validator as errors; they are carried inside the returned outcome.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationFailure {
    #[error("Invalid username format. Must be 1-39 alphanumeric characters or hyphens, cannot start/end with hyphen.")]
    InvalidFormat,
    #[error("GitHub account not found")]
    AccountNotFound,
    #[error("GitHub API rate limit exceeded. Cannot verify account at this time.")]
    RateLimited,
    #[error("GitHub API error: {0}")]
    RemoteService(u16),
    #[error("Request timeout")]
    Timeout,
    #[error("Network error: {0}")]
    Network(String),
}

impl Serialize for ValidationFailure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Heuristic classification of how much of the optional profile is filled in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProfileCompleteness {
    Complete,
    Partial,
    Minimal,
}

impl std::fmt::Display for ProfileCompleteness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileCompleteness::Complete => write!(f, "Complete"),
            ProfileCompleteness::Partial => write!(f, "Partial"),
            ProfileCompleteness::Minimal => write!(f, "Minimal"),
        }
    }
}

/// Profile attributes reported when the account was confirmed to exist
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileSummary {
    pub public_repos: u32,
    pub followers: u32,
    pub following: u32,
    pub account_age_years: f64,
    pub profile_completeness: ProfileCompleteness,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
    pub blog: Option<String>,
}

/// Structured result of one validation run, immutable once built
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationOutcome {
    pub status: OutcomeStatus,
    pub username: String,
    pub format_valid: bool,
    pub exists: Existence,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ValidationFailure>,
    pub assessment: String,
    pub recommendation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
}

impl ValidationOutcome {
    pub fn invalid_format(username: String) -> Self {
        Self {
            status: OutcomeStatus::Failed,
            username,
            format_valid: false,
            exists: Existence::Absent,
            profile: None,
            error: Some(ValidationFailure::InvalidFormat),
            assessment: "The identifier does not normalize to a well-formed GitHub username."
                .to_string(),
            recommendation: "❌ Skip GitHub analysis - Invalid username format".to_string(),
            profile_url: None,
        }
    }

    pub fn not_found(username: String) -> Self {
        Self {
            status: OutcomeStatus::Failed,
            username,
            format_valid: true,
            exists: Existence::Absent,
            profile: None,
            error: Some(ValidationFailure::AccountNotFound),
            assessment:
                "The username has valid format but no GitHub account exists with this username."
                    .to_string(),
            recommendation: "❌ Skip GitHub analysis - Account does not exist".to_string(),
            profile_url: None,
        }
    }

    pub fn rate_limited(username: String) -> Self {
        Self {
            status: OutcomeStatus::Warning,
            username,
            format_valid: true,
            exists: Existence::Indeterminate,
            profile: None,
            error: Some(ValidationFailure::RateLimited),
            assessment: "GitHub API rate limit exceeded. Please verify account manually or try \
                         again later. Consider adding GITHUB_TOKEN environment variable for \
                         higher rate limits."
                .to_string(),
            recommendation: "⚠️ Manual verification needed - API rate limit reached".to_string(),
            profile_url: None,
        }
    }

    pub fn remote_error(username: String, status_code: u16) -> Self {
        Self {
            status: OutcomeStatus::Warning,
            username,
            format_valid: true,
            exists: Existence::Indeterminate,
            profile: None,
            error: Some(ValidationFailure::RemoteService(status_code)),
            assessment: format!(
                "Received unexpected response from GitHub API (status {status_code}). Manual \
                 verification recommended."
            ),
            recommendation: "⚠️ Manual verification recommended - API error occurred".to_string(),
            profile_url: None,
        }
    }

    pub fn timed_out(username: String) -> Self {
        Self {
            status: OutcomeStatus::Warning,
            username,
            format_valid: true,
            exists: Existence::Indeterminate,
            profile: None,
            error: Some(ValidationFailure::Timeout),
            assessment: "Connection to GitHub API timed out. Please try again.".to_string(),
            recommendation: "⚠️ Retry verification - Connection timeout".to_string(),
            profile_url: None,
        }
    }

    pub fn network_failure(username: String, detail: String) -> Self {
        Self {
            status: OutcomeStatus::Warning,
            username,
            format_valid: true,
            exists: Existence::Indeterminate,
            profile: None,
            error: Some(ValidationFailure::Network(detail.clone())),
            assessment: format!(
                "Network error occurred while connecting to GitHub API: {detail}"
            ),
            recommendation: "⚠️ Manual verification needed - Network error".to_string(),
            profile_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn existence_serializes_as_bool_or_null() {
        let json = |e: Existence| serde_json::to_string(&e).expect("serialize existence");
        assert_eq!(json(Existence::Confirmed), "true");
        assert_eq!(json(Existence::Absent), "false");
        assert_eq!(json(Existence::Indeterminate), "null");
    }

    #[test]
    fn status_serializes_screaming_case() {
        assert_eq!(
            serde_json::to_string(&OutcomeStatus::Passed).expect("serialize status"),
            "\"PASSED\""
        );
    }

    #[test]
    fn failure_serializes_as_message() {
        let json = serde_json::to_string(&ValidationFailure::RemoteService(502))
            .expect("serialize failure");
        assert_eq!(json, "\"GitHub API error: 502\"");
    }

    #[test]
    fn error_paths_omit_profile_fields() {
        let outcome = ValidationOutcome::timed_out("octocat".to_string());
        let value = serde_json::to_value(&outcome).expect("serialize outcome");
        assert_eq!(value["exists"], serde_json::Value::Null);
        assert!(value.get("profile").is_none());
        assert!(value.get("profile_url").is_none());
    }
}
