use crate::config::Config;
use crate::outcome::{Existence, OutcomeStatus, ValidationOutcome};
use crate::prompt::{PromptSource, PromptSpec};
use crate::registry::PromptRegistry;
use crate::validator::GithubValidator;
use anyhow::{anyhow, Result};
use colored::*;
use dialoguer::Input;
use serde_json::json;

/// Validate a candidate-supplied GitHub identifier and print the report
pub async fn validate_account(
    config: &Config,
    identifier: Option<String>,
    format: &str,
    timeout_override: Option<u64>,
) -> Result<()> {
    let identifier = match identifier {
        Some(id) => id,
        None => {
            let input: String = Input::new()
                .with_prompt("GitHub URL, @handle, or username")
                .interact_text()?;
            input
        }
    };

    if identifier.trim().is_empty() {
        return Err(anyhow!("Identifier cannot be empty"));
    }

    let mut github = config.github.clone();
    if let Some(secs) = timeout_override {
        github.timeout_secs = secs;
    }

    let validator = GithubValidator::with_settings(&github, config.thresholds.clone())?;
    let outcome = validator.validate(&identifier).await;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&outcome)?),
        _ => print_outcome(&outcome),
    }

    Ok(())
}

fn status_glyph(status: OutcomeStatus) -> ColoredString {
    match status {
        OutcomeStatus::Passed => "✅ PASSED".green().bold(),
        OutcomeStatus::Warning => "⚠️ WARNING".yellow().bold(),
        OutcomeStatus::Failed => "❌ FAILED".red().bold(),
    }
}

fn print_outcome(outcome: &ValidationOutcome) {
    println!("{}\n", "🔍 GitHub Validation Report".blue().bold());

    println!("   {}: {}", "Status".blue(), status_glyph(outcome.status));
    println!("   {}: {}", "Username".blue(), outcome.username.cyan());

    let exists = match outcome.exists {
        Existence::Confirmed => "yes".green(),
        Existence::Absent => "no".red(),
        Existence::Indeterminate => "unknown".yellow(),
    };
    println!("   {}: {}", "Account exists".blue(), exists);

    if let Some(profile) = &outcome.profile {
        println!();
        println!("{}", "👤 Profile:".blue());
        println!(
            "   Name: {}",
            profile.name.as_deref().unwrap_or("Not provided").bright_black()
        );
        println!(
            "   Company: {}",
            profile.company.as_deref().unwrap_or("Not provided").bright_black()
        );
        println!(
            "   Location: {}",
            profile.location.as_deref().unwrap_or("Not provided").bright_black()
        );
        println!(
            "   Public repositories: {}",
            profile.public_repos.to_string().bright_black()
        );
        println!(
            "   Followers / following: {} / {}",
            profile.followers.to_string().bright_black(),
            profile.following.to_string().bright_black()
        );
        println!(
            "   Account age: {} years",
            format!("{:.1}", profile.account_age_years).bright_black()
        );
        println!(
            "   Profile completeness: {}",
            profile.profile_completeness.to_string().bright_black()
        );
    }

    if let Some(error) = &outcome.error {
        println!();
        println!("   {}: {}", "Error".blue(), error.to_string().red());
    }

    println!();
    println!("{}", "📋 Assessment:".blue());
    println!("   {}", outcome.assessment);
    println!();
    println!("{}", "💡 Recommendation:".blue());
    println!("   {}", outcome.recommendation);

    if let Some(url) = &outcome.profile_url {
        println!();
        println!("   {}: {}", "Profile".blue(), url.cyan());
    }
}

/// List available prompt documents
pub async fn list_prompts(registry: &PromptRegistry, format: &str) -> Result<()> {
    let prompts = registry.list_prompts();

    match format {
        "json" => {
            let json_output = json!({
                "prompts": prompts.iter().map(|spec| {
                    json!({
                        "name": spec.name,
                        "description": spec.description,
                        "stage": spec.stage,
                        "keywords": spec.keywords,
                        "source": spec.source.to_string()
                    })
                }).collect::<Vec<_>>()
            });
            println!("{}", serde_json::to_string_pretty(&json_output)?);
        }
        _ => {
            println!("{}\n", "📋 Evaluation Prompts:".blue().bold());

            let builtin: Vec<_> = prompts
                .iter()
                .filter(|p| p.source == PromptSource::Builtin)
                .collect();
            let user: Vec<_> = prompts
                .iter()
                .filter(|p| p.source == PromptSource::User)
                .collect();

            if !builtin.is_empty() {
                println!("{}", "Built-in:".blue());
                for spec in builtin {
                    print_prompt_info(spec);
                }
            }

            if !user.is_empty() {
                println!("{}", "Custom overrides:".blue());
                for spec in user {
                    print_prompt_info(spec);
                }
            }

            println!("{}", "💡 Usage:".blue());
            println!("   {}", "cv-screener show <prompt-name>".cyan());
            println!("   {}", "cv-screener validate <github-url-or-handle>".cyan());
        }
    }

    Ok(())
}

fn print_prompt_info(spec: &PromptSpec) {
    let name_color = match spec.source {
        PromptSource::Builtin => "cyan",
        PromptSource::User => "green",
    };
    let prefix = match spec.source {
        PromptSource::Builtin => "  📦",
        PromptSource::User => "  👤",
    };

    println!("{} {}", prefix, spec.name.color(name_color));

    if let Some(description) = spec.description() {
        println!("      {}", description.bright_black());
    }

    if let Some(stage) = spec.stage() {
        println!("      {}: {}", "Stage".blue(), stage);
    }

    if !spec.keywords.is_empty() {
        println!("      {}: {}", "Keywords".blue(), spec.keywords.join(", "));
    }

    println!();
}

/// Print one prompt document for use in an external runner
pub async fn show_prompt(registry: &PromptRegistry, name: &str) -> Result<()> {
    let spec = registry
        .get_prompt(name)
        .ok_or_else(|| anyhow!("Prompt '{}' not found", name))?;

    println!("{}", spec.to_markdown());
    Ok(())
}

/// Show status of configuration and prompts
pub async fn show_status(registry: &PromptRegistry, config: &Config) -> Result<()> {
    println!("{}", "📊 CV Screener Status".blue().bold());
    println!();

    println!("{}", "⚙️ Configuration:".blue());
    println!(
        "   Config dir: {}",
        config.config_dir.display().to_string().bright_black()
    );
    println!("   API base: {}", config.github.api_base.bright_black());
    println!(
        "   Request timeout: {}s",
        config.github.timeout_secs.to_string().bright_black()
    );
    println!(
        "   Token: {}",
        if config.github.token.is_some() {
            "✅ Configured".green()
        } else {
            "Not configured (unauthenticated rate limits apply)".yellow()
        }
    );
    println!(
        "   Thresholds: warn below {} repos on accounts older than {} years",
        config.thresholds.min_public_repos.to_string().bright_black(),
        config
            .thresholds
            .min_account_age_years
            .to_string()
            .bright_black()
    );
    println!();

    let prompts = registry.list_prompts();
    println!("{}", "📄 Prompts:".blue());
    println!("   Total: {}", prompts.len().to_string().bright_black());

    let builtin_count = prompts
        .iter()
        .filter(|p| p.source == PromptSource::Builtin)
        .count();
    let user_count = prompts
        .iter()
        .filter(|p| p.source == PromptSource::User)
        .count();

    println!("   Built-in: {}", builtin_count.to_string().bright_black());
    println!("   Custom: {}", user_count.to_string().bright_black());
    println!();

    let issues = config.validate()?;
    if issues.is_empty() {
        println!("{}", "✅ All checks passed".green());
    } else {
        println!("{}", "⚠️ Issues found:".yellow());
        for issue in issues {
            println!("   - {}", issue.yellow());
        }
    }

    Ok(())
}

/// Initialize configuration
pub async fn initialize_config(force: bool) -> Result<()> {
    let config_dir = Config::get_config_dir()?;
    let config_file = config_dir.join("config.yaml");

    if config_file.exists() && !force {
        return Err(anyhow!(
            "Configuration already exists. Use --force to overwrite."
        ));
    }

    println!("{}", "🔧 Initializing configuration...".blue());

    let config = Config::with_dirs(config_dir);
    config.save().await?;

    println!(
        "{} {}",
        "✅ Configuration created:".green(),
        config_file.display().to_string().bright_black()
    );
    println!(
        "   Prompt overrides: {}",
        config.prompts_dir.display().to_string().bright_black()
    );
    println!();

    if std::env::var("GITHUB_TOKEN").map(|t| !t.is_empty()).unwrap_or(false) {
        println!("{}", "✅ GITHUB_TOKEN detected".green());
    } else {
        println!("{}", "ℹ️ No GITHUB_TOKEN set.".blue());
        println!("   Unauthenticated requests are rate limited; for more headroom:");
        println!("   {}", "export GITHUB_TOKEN=\"your-token-here\"".cyan());
    }

    println!();
    println!("{}", "🚀 Ready to use! Try:".blue());
    println!("   {}", "cv-screener validate github.com/octocat".cyan());
    println!("   {}", "cv-screener prompts".cyan());

    Ok(())
}

/// Check health of the installation
pub async fn check_health(registry: &PromptRegistry, config: &Config) -> Result<()> {
    println!("{}", "🏥 Health Check".blue().bold());
    println!();

    let mut all_good = true;

    println!("{}", "⚙️ Configuration:".blue());
    let issues = config.validate()?;
    if issues.is_empty() {
        println!("   {}", "✅ Configuration is valid".green());
    } else {
        all_good = false;
        for issue in issues {
            println!("   {} {}", "❌".red(), issue);
        }
    }

    println!();
    println!("{}", "📄 Prompts:".blue());
    let prompts = registry.list_prompts();
    if prompts.is_empty() {
        println!("   {} No prompts loaded", "❌".red());
        all_good = false;
    } else {
        println!(
            "   {} {} prompts loaded successfully",
            "✅".green(),
            prompts.len()
        );
    }

    println!();
    println!("{}", "🌐 GitHub API:".blue());
    if config.github.token.is_some() {
        println!("   {} Token configured (higher rate limits)", "✅".green());
    } else {
        // Not a failure; anonymous lookups just get a smaller allowance
        println!(
            "   {} No token configured; unauthenticated rate limits apply",
            "ℹ️".blue()
        );
    }

    println!();
    if all_good {
        println!("{}", "🎉 Everything looks good!".green().bold());
    } else {
        println!(
            "{}",
            "⚠️ Some issues found. Please address them for optimal functionality.".yellow()
        );
    }

    Ok(())
}
