use std::{env, time::Duration};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend_url: String,
    pub host: String,
    pub port: u16,
    pub backend_timeout: Duration,
    pub max_upload_bytes: usize,
    pub cors_origin: Option<String>,
    pub session_idle: Duration,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let backend_url = env::var("BACKEND_API_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let backend_timeout = env::var("BACKEND_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(30));
        let max_upload_bytes = env::var("MAX_UPLOAD_BYTES")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(5 * 1024 * 1024);
        let cors_origin = env::var("CORS_ORIGIN").ok().filter(|s| !s.is_empty());
        let session_idle = env::var("SESSION_IDLE_MINUTES")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(|minutes| Duration::from_secs(minutes * 60))
            .unwrap_or(Duration::from_secs(60 * 60));
        Ok(Self {
            backend_url,
            host,
            port,
            backend_timeout,
            max_upload_bytes,
            cors_origin,
            session_idle,
        })
    }
}
