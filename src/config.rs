use std::net::IpAddr;

pub const DEFAULT_TELEGRAM_API: &str = "https://api.telegram.org";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub max_body_size: usize,
    pub log_level: String,
    pub telegram: TelegramConfig,
}

#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
    /// Scheme and host of the Bot API, without a trailing slash.
    pub api_base: String,
    pub timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let bot_token = env_required("TG_BOT_TOKEN")?;
        let chat_id = env_required("TG_CHAT_ID")?;

        let api_base = env_or("TG_API_BASE", DEFAULT_TELEGRAM_API)
            .trim_end_matches('/')
            .to_string();

        let host: IpAddr = env_or("RELAY_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid RELAY_HOST: {e}"))?;

        let port: u16 = env_or("RELAY_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid RELAY_PORT: {e}"))?;

        let max_body_size: usize = env_or("RELAY_MAX_BODY_SIZE", "65536")
            .parse()
            .map_err(|e| format!("Invalid RELAY_MAX_BODY_SIZE: {e}"))?;

        let timeout_secs: u64 = env_or("RELAY_TIMEOUT_SECS", "30")
            .parse()
            .map_err(|e| format!("Invalid RELAY_TIMEOUT_SECS: {e}"))?;

        let log_level = env_or("RELAY_LOG_LEVEL", "info");

        Ok(Config {
            host,
            port,
            max_body_size,
            log_level,
            telegram: TelegramConfig {
                bot_token,
                chat_id,
                api_base,
                timeout_secs,
            },
        })
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
