use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if any env var holds an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files; useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if any env var holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup instead of
/// `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_i64 = |var: &str, default: &str| -> Result<i64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<i64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let bind_addr = parse_addr("VOUCHLY_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("VOUCHLY_LOG_LEVEL", "info");
    let data_dir = PathBuf::from(or_default("VOUCHLY_DATA_DIR", "data"));
    let cors_origin = lookup("VOUCHLY_CORS_ORIGIN").ok();

    let min_match_score = parse_i64("VOUCHLY_MIN_MATCH_SCORE", "25")?;
    let scrape_cron = or_default("VOUCHLY_SCRAPE_CRON", "0 0 2 * * *");

    let request_timeout_secs = parse_u64("VOUCHLY_REQUEST_TIMEOUT_SECS", "30")?;
    let page_attempts = parse_u32("VOUCHLY_PAGE_ATTEMPTS", "3")?;
    let retry_backoff_secs = parse_u64("VOUCHLY_RETRY_BACKOFF_SECS", "2")?;
    let page_delay_min_ms = parse_u64("VOUCHLY_PAGE_DELAY_MIN_MS", "3000")?;
    let page_delay_max_ms = parse_u64("VOUCHLY_PAGE_DELAY_MAX_MS", "7000")?;
    let max_pages = parse_usize("VOUCHLY_MAX_PAGES", "20")?;
    let maxmoney_token = lookup("VOUCHLY_MAXMONEY_TOKEN").ok();

    if page_attempts == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "VOUCHLY_PAGE_ATTEMPTS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    if page_delay_max_ms < page_delay_min_ms {
        return Err(ConfigError::InvalidEnvVar {
            var: "VOUCHLY_PAGE_DELAY_MAX_MS".to_string(),
            reason: "must be >= VOUCHLY_PAGE_DELAY_MIN_MS".to_string(),
        });
    }

    Ok(AppConfig {
        bind_addr,
        log_level,
        data_dir,
        cors_origin,
        min_match_score,
        scrape_cron,
        request_timeout_secs,
        page_attempts,
        retry_backoff_secs,
        page_delay_min_ms,
        page_delay_max_ms,
        max_pages,
        maxmoney_token,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn build_app_config_succeeds_with_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_app_config(lookup_from_map(&map));
        assert!(result.is_ok(), "expected Ok, got: {result:?}");
        let cfg = result.unwrap();
        assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.data_dir.to_string_lossy(), "data");
        assert!(cfg.cors_origin.is_none());
        assert_eq!(cfg.min_match_score, 25);
        assert_eq!(cfg.scrape_cron, "0 0 2 * * *");
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.page_attempts, 3);
        assert_eq!(cfg.retry_backoff_secs, 2);
        assert_eq!(cfg.page_delay_min_ms, 3000);
        assert_eq!(cfg.page_delay_max_ms, 7000);
        assert_eq!(cfg.max_pages, 20);
        assert!(cfg.maxmoney_token.is_none());
    }

    #[test]
    fn build_app_config_fails_with_invalid_bind_addr() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("VOUCHLY_BIND_ADDR", "not-a-socket-addr");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VOUCHLY_BIND_ADDR"),
            "expected InvalidEnvVar(VOUCHLY_BIND_ADDR), got: {result:?}"
        );
    }

    #[test]
    fn min_match_score_override() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("VOUCHLY_MIN_MATCH_SCORE", "40");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.min_match_score, 40);
    }

    #[test]
    fn min_match_score_invalid() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("VOUCHLY_MIN_MATCH_SCORE", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VOUCHLY_MIN_MATCH_SCORE"),
            "expected InvalidEnvVar(VOUCHLY_MIN_MATCH_SCORE), got: {result:?}"
        );
    }

    #[test]
    fn page_attempts_override() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("VOUCHLY_PAGE_ATTEMPTS", "5");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.page_attempts, 5);
    }

    #[test]
    fn page_attempts_zero_rejected() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("VOUCHLY_PAGE_ATTEMPTS", "0");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VOUCHLY_PAGE_ATTEMPTS"),
            "expected InvalidEnvVar(VOUCHLY_PAGE_ATTEMPTS), got: {result:?}"
        );
    }

    #[test]
    fn page_delay_window_override() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("VOUCHLY_PAGE_DELAY_MIN_MS", "100");
        map.insert("VOUCHLY_PAGE_DELAY_MAX_MS", "200");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.page_delay_min_ms, 100);
        assert_eq!(cfg.page_delay_max_ms, 200);
    }

    #[test]
    fn page_delay_window_inverted_rejected() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("VOUCHLY_PAGE_DELAY_MIN_MS", "5000");
        map.insert("VOUCHLY_PAGE_DELAY_MAX_MS", "1000");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VOUCHLY_PAGE_DELAY_MAX_MS"),
            "expected InvalidEnvVar(VOUCHLY_PAGE_DELAY_MAX_MS), got: {result:?}"
        );
    }

    #[test]
    fn page_delay_window_equal_bounds_accepted() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("VOUCHLY_PAGE_DELAY_MIN_MS", "0");
        map.insert("VOUCHLY_PAGE_DELAY_MAX_MS", "0");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.page_delay_min_ms, 0);
        assert_eq!(cfg.page_delay_max_ms, 0);
    }

    #[test]
    fn max_pages_override() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("VOUCHLY_MAX_PAGES", "3");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.max_pages, 3);
    }

    #[test]
    fn max_pages_invalid() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("VOUCHLY_MAX_PAGES", "lots");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VOUCHLY_MAX_PAGES"),
            "expected InvalidEnvVar(VOUCHLY_MAX_PAGES), got: {result:?}"
        );
    }

    #[test]
    fn maxmoney_token_is_picked_up() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("VOUCHLY_MAXMONEY_TOKEN", "secret-token");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.maxmoney_token.as_deref(), Some("secret-token"));
    }

    #[test]
    fn maxmoney_token_redacted_in_debug_output() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("VOUCHLY_MAXMONEY_TOKEN", "secret-token");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("secret-token"), "token leaked: {rendered}");
        assert!(rendered.contains("[redacted]"));
    }

    #[test]
    fn cors_origin_override() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("VOUCHLY_CORS_ORIGIN", "https://deals.example.com");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.cors_origin.as_deref(), Some("https://deals.example.com"));
    }

    #[test]
    fn scrape_cron_override() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("VOUCHLY_SCRAPE_CRON", "0 30 */6 * * *");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.scrape_cron, "0 30 */6 * * *");
    }
}
