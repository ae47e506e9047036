use crate::classifier::ClassifierConfig;
use clap::Parser;
use std::time::Duration;

/// Every setting is a flag with an environment fallback; `.env` is read first.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Tracks AI YouTube channels and classifies their videos", long_about = None)]
pub struct Args {
    /// SQLite database file
    #[arg(long, env = "AIWATCH_DATABASE_URL", default_value = "./aiwatch.db")]
    pub database_url: String,

    #[arg(long, env = "AIWATCH_PORT", default_value_t = 8080)]
    pub port: u16,

    #[arg(long, env = "AIWATCH_BIND", default_value = "127.0.0.1")]
    pub bind: String,

    /// Base URL of the YouTube extraction service
    #[arg(long, env = "YOUTUBE_API_URL")]
    pub youtube_api_url: Option<String>,

    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    #[arg(long, env = "OPENAI_BASE_URL", default_value = "https://api.openai.com/v1")]
    pub openai_base_url: String,

    #[arg(long, env = "OPENAI_MODEL", default_value = "gpt-4o-mini")]
    pub openai_model: String,

    #[arg(long, env = "AIWATCH_METADATA_TIMEOUT_SECS", default_value_t = 30)]
    pub metadata_timeout_secs: u64,

    #[arg(long, env = "AIWATCH_CLASSIFIER_TIMEOUT_SECS", default_value_t = 90)]
    pub classifier_timeout_secs: u64,

    /// Uploads imported when a channel is added
    #[arg(long, env = "AIWATCH_INITIAL_VIDEOS", default_value_t = 10)]
    pub initial_videos: u32,
}

impl Args {
    pub fn metadata_timeout(&self) -> Duration {
        Duration::from_secs(self.metadata_timeout_secs)
    }

    pub fn classifier_config(&self) -> ClassifierConfig {
        ClassifierConfig {
            api_key: self.openai_api_key.clone(),
            base_url: self.openai_base_url.clone(),
            model: self.openai_model.clone(),
            timeout: Duration::from_secs(self.classifier_timeout_secs),
            ..Default::default()
        }
    }

    /// Logs which external services are missing. Startup continues either way.
    pub fn log_summary(&self) {
        log::info!("Using database {}", self.database_url);
        if self.youtube_api_url.as_deref().map_or(true, |u| u.trim().is_empty()) {
            log::warn!("YOUTUBE_API_URL is not set; channel and transcript requests will fail");
        }
        if self.openai_api_key.as_deref().map_or(true, |k| k.trim().is_empty()) {
            log::warn!("OPENAI_API_KEY is not set; video analysis will fail");
        }
    }
}
