use serde::Deserialize;
use std::env;

/// Portal configuration. Loaded from layered config files plus
/// `TRYLINE_`-prefixed environment variables; `Default` gives the values
/// used by tests and the demo session.
#[derive(Debug, Deserialize, Clone)]
pub struct PortalConfig {
    pub business_rules: BusinessRules,
    pub autocomplete: AutocompleteConfig,
    pub mock: MockConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BusinessRules {
    /// Fixed taxes-and-fees component added to every flight checkout total.
    pub taxes_and_fees: f64,
    /// Seconds of idle results viewing before the refresh prompt.
    pub staleness_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AutocompleteConfig {
    /// Keystroke debounce before a lookup fires.
    pub debounce_ms: u64,
    /// Queries shorter than this never trigger a lookup.
    pub min_query_len: usize,
    /// Cap on local airport-index matches.
    pub max_local_results: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MockConfig {
    /// Simulated provider latency.
    pub latency_ms: u64,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            business_rules: BusinessRules {
                taxes_and_fees: 124.50,
                staleness_seconds: 60,
            },
            autocomplete: AutocompleteConfig {
                debounce_ms: 300,
                min_query_len: 2,
                max_local_results: 8,
            },
            mock: MockConfig { latency_ms: 800 },
        }
    }
}

impl PortalConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("TRYLINE").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    /// Load from files/environment, falling back to defaults when nothing
    /// is configured.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}
