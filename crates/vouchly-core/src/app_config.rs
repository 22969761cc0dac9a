use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub data_dir: PathBuf,
    pub cors_origin: Option<String>,
    pub min_match_score: i64,
    pub scrape_cron: String,
    pub request_timeout_secs: u64,
    pub page_attempts: u32,
    pub retry_backoff_secs: u64,
    pub page_delay_min_ms: u64,
    pub page_delay_max_ms: u64,
    pub max_pages: usize,
    pub maxmoney_token: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("data_dir", &self.data_dir)
            .field("cors_origin", &self.cors_origin)
            .field("min_match_score", &self.min_match_score)
            .field("scrape_cron", &self.scrape_cron)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("page_attempts", &self.page_attempts)
            .field("retry_backoff_secs", &self.retry_backoff_secs)
            .field("page_delay_min_ms", &self.page_delay_min_ms)
            .field("page_delay_max_ms", &self.page_delay_max_ms)
            .field("max_pages", &self.max_pages)
            .field(
                "maxmoney_token",
                &self.maxmoney_token.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}
