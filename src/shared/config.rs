use anyhow::Result;
use std::sync::OnceLock;
use std::time::Duration;

const DEFAULT_PERSONALITY: &str = "You are a helpful, expressive and intelligent AI avatar \
assistant. Limit your responses to 100 words.";

#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the chat/audio server, no trailing slash.
    pub server_base_url: String,
    pub personality: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let server_base_url = std::env::var("AVATAR_SERVER_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string())
            .trim_end_matches('/')
            .to_string();
        let personality =
            std::env::var("AVATAR_PERSONALITY").unwrap_or_else(|_| DEFAULT_PERSONALITY.to_string());

        Ok(Self {
            server_base_url,
            personality,
        })
    }
}

#[derive(Clone, Debug)]
pub struct Timeouts {
    pub chat_http: Duration,
    pub audio_http: Duration,
}

impl Timeouts {
    fn from_env() -> Self {
        // Defaults: chat 20s (LLM round trip), audio fetch 5s.
        // Env: CHAT_HTTP_TIMEOUT_MS / AUDIO_HTTP_TIMEOUT_MS.
        Self {
            chat_http: env_duration_ms("CHAT_HTTP_TIMEOUT_MS", 20_000),
            audio_http: env_duration_ms("AUDIO_HTTP_TIMEOUT_MS", 5_000),
        }
    }
}

static TIMEOUTS: OnceLock<Timeouts> = OnceLock::new();

pub fn timeouts() -> &'static Timeouts {
    TIMEOUTS.get_or_init(Timeouts::from_env)
}

fn env_duration_ms(key: &str, default_ms: u64) -> Duration {
    let ms = std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default_ms);
    Duration::from_millis(ms)
}

#[derive(Clone, Debug)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

impl LoggingConfig {
    fn from_env() -> Self {
        let format = match std::env::var("LOG_FORMAT").ok().as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };
        Self { format }
    }
}

static LOGGING: OnceLock<LoggingConfig> = OnceLock::new();

pub fn logging_config() -> &'static LoggingConfig {
    LOGGING.get_or_init(LoggingConfig::from_env)
}
