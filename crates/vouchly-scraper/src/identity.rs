//! Request identity: user-agent rotation and inter-page pacing.
//!
//! Marketplace sources block clients that present a constant fingerprint or
//! fetch in tight bursts. The policy trait keeps both knobs injectable so
//! adapters stay deterministic under test.

use std::time::Duration;

use rand::Rng;

/// Browser user-agent pool drawn from for marketplace page fetches.
pub(crate) const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/15.1 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36",
];

/// Supplies the identity for one page fetch: the user-agent to present and
/// the pause to insert before the next page.
pub trait IdentityPolicy: Send + Sync {
    fn user_agent(&self) -> String;

    fn page_delay(&self) -> Duration;
}

/// Production policy: uniform draw from [`USER_AGENTS`] per request, and a
/// uniformly-jittered delay within the configured window.
pub struct RotatingIdentity {
    delay_min_ms: u64,
    delay_max_ms: u64,
}

impl RotatingIdentity {
    /// `delay_min_ms..=delay_max_ms` is the jitter window; callers validate
    /// `min <= max` at config time.
    #[must_use]
    pub fn new(delay_min_ms: u64, delay_max_ms: u64) -> Self {
        Self {
            delay_min_ms,
            delay_max_ms: delay_max_ms.max(delay_min_ms),
        }
    }
}

impl IdentityPolicy for RotatingIdentity {
    fn user_agent(&self) -> String {
        let idx = rand::rng().random_range(0..USER_AGENTS.len());
        USER_AGENTS[idx].to_string()
    }

    fn page_delay(&self) -> Duration {
        let ms = rand::rng().random_range(self.delay_min_ms..=self.delay_max_ms);
        Duration::from_millis(ms)
    }
}

/// Deterministic policy for tests: one fixed user-agent, zero delay.
pub struct FixedIdentity {
    user_agent: String,
}

impl FixedIdentity {
    #[must_use]
    pub fn new(user_agent: &str) -> Self {
        Self {
            user_agent: user_agent.to_string(),
        }
    }
}

impl IdentityPolicy for FixedIdentity {
    fn user_agent(&self) -> String {
        self.user_agent.clone()
    }

    fn page_delay(&self) -> Duration {
        Duration::ZERO
    }
}
