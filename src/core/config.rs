use std::time::Duration;

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn env_port(key: &str, default: u16) -> u16 {
    parse_port(std::env::var(key).ok().as_deref(), default)
}

/// Ports must fit `u16` exactly; anything unparseable or out of range
/// falls back to the default instead of wrapping.
fn parse_port(raw: Option<&str>, default: u16) -> u16 {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Knobs of the relay engine itself. Defaults match the documented
/// canonical values: 60s poll/scan, 30-message dedup window, 20s per
/// network call.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub poll_interval: Duration,
    pub scan_interval: Duration,
    pub dedup_window: usize,
    pub call_timeout: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(60),
            scan_interval: Duration::from_secs(60),
            dedup_window: 30,
            call_timeout: Duration::from_secs(20),
        }
    }
}

impl RelayConfig {
    pub fn from_env() -> Self {
        let poll_secs = env_u64("TELEFWD_POLL_SECS", 60);
        Self {
            poll_interval: Duration::from_secs(poll_secs),
            scan_interval: Duration::from_secs(env_u64("TELEFWD_SCAN_SECS", poll_secs)),
            dedup_window: env_u64("TELEFWD_DEDUP_WINDOW", 30) as usize,
            call_timeout: Duration::from_secs(env_u64("TELEFWD_CALL_TIMEOUT_SECS", 20)),
        }
    }
}

/// Process-level configuration: where the API listens and how to reach
/// the external collaborators. Missing collaborator credentials are not
/// fatal here; the affected component logs the gap and idles, matching
/// the original service's degrade-but-start behavior.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub api_host: String,
    pub api_port: u16,
    pub store_url: Option<String>,
    pub store_key: Option<String>,
    pub gateway_url: Option<String>,
    pub relay: RelayConfig,
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        Self {
            api_host: env_nonempty("TELEFWD_API_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            api_port: env_port("TELEFWD_API_PORT", 8080),
            store_url: env_nonempty("SUPABASE_URL"),
            store_key: env_nonempty("SUPABASE_KEY"),
            gateway_url: env_nonempty("TELEFWD_GATEWAY_URL"),
            relay: RelayConfig::from_env(),
        }
    }
}
