use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Canonical base URL for profile links shown to the user. Lookups go through
/// the configurable API base instead so tests can point at a local server.
pub const GITHUB_WEB_BASE: &str = "https://github.com";

/// Profile payload from the GitHub `/users/{username}` REST endpoint.
/// Only the fields the validator reports on are deserialized.
#[derive(Debug, Clone, Deserialize)]
pub struct GithubUser {
    pub login: String,
    #[serde(default)]
    pub public_repos: u32,
    #[serde(default)]
    pub followers: u32,
    #[serde(default)]
    pub following: u32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub blog: Option<String>,
}
