use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Parsed metadata describing one evaluation prompt document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptSpec {
    pub name: String,
    pub description: Option<String>,
    pub stage: Option<String>,
    pub keywords: Vec<String>,
    pub instructions: String,
    pub source_path: Option<PathBuf>,
    pub source: PromptSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PromptSource {
    Builtin,
    User,
}

impl std::fmt::Display for PromptSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PromptSource::Builtin => write!(f, "builtin"),
            PromptSource::User => write!(f, "user"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawFrontMatter {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stage: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl PromptSpec {
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn stage(&self) -> Option<&str> {
        self.stage.as_deref()
    }

    /// Parse a prompt definition from markdown content
    pub fn parse_document(
        contents: &str,
        source_path: Option<PathBuf>,
        source: PromptSource,
    ) -> Result<Self> {
        let normalized = contents.replace('\r', "");
        let trimmed = normalized.trim_start_matches(['\u{feff}', '\n']);

        if !trimmed.starts_with("---") {
            return Err(anyhow!(
                "Prompt definition must start with YAML front matter delimited by `---`"
            ));
        }

        let after_delim = trimmed
            .strip_prefix("---")
            .ok_or_else(|| anyhow!("Missing front matter delimiter"))?;

        let (front_matter_raw, body) = split_front_matter(after_delim)
            .ok_or_else(|| anyhow!("Missing closing front matter delimiter `---`"))?;

        let mut front_matter: RawFrontMatter = serde_yaml::from_str(front_matter_raw)
            .map_err(|e| anyhow!("YAML parsing error: {}", e))?;

        front_matter.keywords = clean_list(front_matter.keywords);

        let instructions = body.trim_start_matches('\n').trim().to_string();

        Ok(PromptSpec {
            name: front_matter.name,
            description: front_matter.description,
            stage: front_matter.stage,
            keywords: front_matter.keywords,
            instructions,
            source_path,
            source,
        })
    }

    /// Validate prompt specification
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(anyhow!("Prompt name cannot be empty"));
        }

        if !self
            .name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(anyhow!(
                "Prompt name must contain only alphanumeric characters, hyphens, and underscores"
            ));
        }

        if self.instructions.trim().is_empty() {
            return Err(anyhow!("Prompt instructions cannot be empty"));
        }

        Ok(())
    }

    /// Convert to YAML frontmatter format for saving
    pub fn to_markdown(&self) -> String {
        let mut yaml = String::from("---\n");
        yaml.push_str(&format!("name: {}\n", self.name));

        if let Some(desc) = &self.description {
            yaml.push_str(&format!("description: {}\n", desc));
        }

        if let Some(stage) = &self.stage {
            yaml.push_str(&format!("stage: {}\n", stage));
        }

        if !self.keywords.is_empty() {
            yaml.push_str("keywords:\n");
            for keyword in &self.keywords {
                yaml.push_str(&format!("  - {}\n", keyword));
            }
        }

        yaml.push_str("---\n\n");
        yaml.push_str(&self.instructions);
        yaml
    }
}

fn split_front_matter(after_delim: &str) -> Option<(&str, &str)> {
    let after_delim = after_delim.strip_prefix('\n').unwrap_or(after_delim);
    let closing = after_delim.find("\n---\n")?;
    let (front_matter, rest) = after_delim.split_at(closing);
    let body = rest.strip_prefix("\n---\n").unwrap_or("");
    Some((front_matter, body))
}

fn clean_list(values: Vec<String>) -> Vec<String> {
    let mut result = Vec::new();
    let mut seen = std::collections::HashSet::new();

    for v in values {
        let trimmed = v.trim().to_string();
        if !trimmed.is_empty() && !seen.contains(&trimmed) {
            seen.insert(trimmed.clone());
            result.push(trimmed);
        }
    }

    result
}
