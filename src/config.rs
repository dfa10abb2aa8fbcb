use anyhow::{anyhow, Result};
use dirs::home_dir;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub version: String,
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub thresholds: ThresholdConfig,
    #[serde(default)]
    pub output: OutputConfig,

    // Runtime paths
    #[serde(skip)]
    pub config_dir: PathBuf,
    #[serde(skip)]
    pub prompts_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    pub api_base: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Optional bearer credential. Absence is valid and just leaves the
    /// unauthenticated rate allowance in effect.
    pub token: Option<String>,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.github.com".to_string(),
            user_agent: "GitHub-Profile-Validator".to_string(),
            timeout_secs: 10,
            token: None,
        }
    }
}

/// Repository-activity heuristics. The calibration is provisional, so these
/// live in configuration instead of the validator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    pub min_public_repos: u32,
    pub min_account_age_years: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            min_public_repos: 5,
            min_account_age_years: 1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: String,
    pub verbose: bool,
    pub colors: bool,
    pub log_level: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
            verbose: false,
            colors: true,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file or create default
    pub async fn load(config_path: Option<&Path>) -> Result<Self> {
        let config_dir = Self::get_config_dir()?;
        let config_file = config_path
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| config_dir.join("config.yaml"));

        if config_file.exists() {
            let contents = fs::read_to_string(&config_file).await?;
            let mut config: Config = serde_yaml::from_str(&contents)?;

            // Set runtime paths
            config.config_dir = config_dir.clone();
            config.prompts_dir = config_dir.join("prompts");

            // Merge environment variables
            config.merge_env_vars();

            Ok(config)
        } else {
            let mut config = Self::with_dirs(config_dir);
            config.save().await?;
            config.merge_env_vars();
            Ok(config)
        }
    }

    /// Get the configuration directory path
    pub fn get_config_dir() -> Result<PathBuf> {
        let home = home_dir().ok_or_else(|| anyhow!("Cannot determine home directory"))?;
        Ok(home.join(".cv-screener"))
    }

    /// Default configuration rooted at the given directory
    pub fn with_dirs(config_dir: PathBuf) -> Self {
        let prompts_dir = config_dir.join("prompts");

        Config {
            version: env!("CARGO_PKG_VERSION").to_string(),
            github: GithubConfig::default(),
            thresholds: ThresholdConfig::default(),
            output: OutputConfig::default(),
            config_dir,
            prompts_dir,
        }
    }

    /// Save configuration to file
    pub async fn save(&self) -> Result<()> {
        fs::create_dir_all(&self.config_dir).await?;
        fs::create_dir_all(&self.prompts_dir).await?;

        let config_file = self.config_dir.join("config.yaml");
        let yaml = serde_yaml::to_string(self)?;
        fs::write(config_file, yaml).await?;

        Ok(())
    }

    /// Merge environment variables into configuration
    fn merge_env_vars(&mut self) {
        if let Ok(token) = std::env::var("GITHUB_TOKEN") {
            if !token.is_empty() {
                self.github.token = Some(token);
            }
        }

        if std::env::var("CV_SCREENER_VERBOSE").is_ok() {
            self.output.verbose = true;
        }
    }

    /// Advisory configuration issues. A missing token is deliberately not
    /// listed here; it only lowers the API rate allowance.
    pub fn validate(&self) -> Result<Vec<String>> {
        let mut issues = Vec::new();

        if self.github.api_base.is_empty() {
            issues.push("GitHub API base URL is not configured".to_string());
        }

        if self.github.timeout_secs == 0 {
            issues.push("GitHub request timeout must be greater than zero".to_string());
        }

        if !self.config_dir.exists() {
            issues.push(format!(
                "Configuration directory does not exist: {}",
                self.config_dir.display()
            ));
        }

        if !self.prompts_dir.exists() {
            issues.push(format!(
                "Prompts directory does not exist: {}",
                self.prompts_dir.display()
            ));
        }

        Ok(issues)
    }
}
