use crate::prompt::{PromptSource, PromptSpec};
use anyhow::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::warn;

/// Prompt documents compiled into the binary. User files with the same name
/// take precedence.
const BUILTIN_PROMPTS: &[&str] = &[
    include_str!("../prompts/orchestrator.md"),
    include_str!("../prompts/rubric-builder.md"),
    include_str!("../prompts/resume-reviewer.md"),
    include_str!("../prompts/github-reviewer.md"),
    include_str!("../prompts/verdict-synthesizer.md"),
];

#[derive(Debug)]
pub struct PromptRegistry {
    prompts: HashMap<String, PromptSpec>,
    user_prompts_dir: PathBuf,
}

#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: usize,
    pub errors: Vec<LoadError>,
}

#[derive(Debug)]
pub struct LoadError {
    pub path: PathBuf,
    pub message: String,
}

impl PromptRegistry {
    /// Create a registry with user overrides drawn from the given directory
    pub async fn new(user_prompts_dir: impl Into<PathBuf>) -> Result<Self> {
        let mut registry = Self {
            prompts: HashMap::new(),
            user_prompts_dir: user_prompts_dir.into(),
        };

        registry.reload().await?;
        Ok(registry)
    }

    /// Reload prompts from all sources
    pub async fn reload(&mut self) -> Result<LoadReport> {
        self.prompts.clear();
        let mut report = LoadReport::default();

        // Load user prompts first so they override builtin ones
        let user_dir = self.user_prompts_dir.clone();
        if user_dir.exists() {
            self.load_prompts_from_dir(&user_dir, &mut report).await?;
        }

        for contents in BUILTIN_PROMPTS {
            match PromptSpec::parse_document(contents, None, PromptSource::Builtin) {
                Ok(spec) => {
                    if !self.prompts.contains_key(&spec.name) {
                        self.prompts.insert(spec.name.clone(), spec);
                        report.loaded += 1;
                    }
                }
                Err(e) => {
                    // A broken builtin is a packaging defect, surface loudly
                    warn!("builtin prompt failed to parse: {e}");
                }
            }
        }

        Ok(report)
    }

    /// All loaded prompts, sorted by name
    pub fn list_prompts(&self) -> Vec<&PromptSpec> {
        let mut prompts: Vec<&PromptSpec> = self.prompts.values().collect();
        prompts.sort_by_key(|p| &p.name);
        prompts
    }

    pub fn get_prompt(&self, name: &str) -> Option<&PromptSpec> {
        self.prompts.get(name)
    }

    pub fn has_prompt(&self, name: &str) -> bool {
        self.prompts.contains_key(name)
    }

    async fn load_prompts_from_dir(&mut self, dir: &Path, report: &mut LoadReport) -> Result<()> {
        let mut entries = fs::read_dir(dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();

            if path.extension().and_then(|s| s.to_str()) == Some("md") {
                match self.load_prompt_file(&path).await {
                    Ok(spec) => {
                        if !self.prompts.contains_key(&spec.name) {
                            self.prompts.insert(spec.name.clone(), spec);
                            report.loaded += 1;
                        }
                    }
                    Err(e) => {
                        report.errors.push(LoadError {
                            path: path.clone(),
                            message: e.to_string(),
                        });
                    }
                }
            }
        }

        Ok(())
    }

    async fn load_prompt_file(&self, path: &Path) -> Result<PromptSpec> {
        let content = fs::read_to_string(path).await?;
        let spec =
            PromptSpec::parse_document(&content, Some(path.to_path_buf()), PromptSource::User)?;
        spec.validate()?;
        Ok(spec)
    }
}
