use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::pipeline::PipelineConfig;

/// Service configuration loaded from environment variables.
/// Startup fails if a required variable is missing or a numeric one is malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub webdriver_url: String,
    pub render_wait_ms: u64,
    pub profile_path: PathBuf,
    pub knowledge_base_path: PathBuf,
    pub writing_style_path: PathBuf,
    pub output_root: PathBuf,
    pub tracking_log_path: PathBuf,
    pub bullet_count: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            webdriver_url: env_or("WEBDRIVER_URL", "http://localhost:4444"),
            render_wait_ms: env_or("RENDER_WAIT_MS", "3000")
                .parse::<u64>()
                .context("RENDER_WAIT_MS must be a number of milliseconds")?,
            profile_path: env_or("PROFILE_PATH", "master_resume.json").into(),
            knowledge_base_path: env_or("KNOWLEDGE_BASE_PATH", "knowledge_base.json").into(),
            writing_style_path: env_or("WRITING_STYLE_PATH", "my_writing_style.txt").into(),
            output_root: env_or("OUTPUT_ROOT", "applications").into(),
            tracking_log_path: env_or("TRACKING_LOG_PATH", "applications_log.csv").into(),
            bullet_count: parse_bullet_count(&env_or("BULLET_COUNT", "4"))?,
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }

    /// The explicit configuration handed to the orchestrator.
    pub fn pipeline(&self) -> PipelineConfig {
        PipelineConfig {
            profile_path: self.profile_path.clone(),
            knowledge_base_path: self.knowledge_base_path.clone(),
            writing_style_path: self.writing_style_path.clone(),
            output_root: self.output_root.clone(),
            tracking_log_path: self.tracking_log_path.clone(),
            bullet_count: self.bullet_count,
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_bullet_count(raw: &str) -> Result<usize> {
    let count = raw
        .trim()
        .parse::<usize>()
        .context("BULLET_COUNT must be a positive integer")?;
    if count == 0 {
        bail!("BULLET_COUNT must be a positive integer, got 0");
    }
    Ok(count)
}
