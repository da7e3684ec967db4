use tracing_subscriber::EnvFilter;

pub const LOG_LEVEL_ENV: &str = "MULTISPORT_WORKOUTS_LOG_LEVEL";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogConfig {
    pub filter: String,
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Reads `MULTISPORT_WORKOUTS_LOG_LEVEL`, then `RUST_LOG`, through `get`.
    /// Blank values count as unset.
    pub fn from_env_with<F>(mut get: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut lookup = |key: &str| get(key).filter(|v| !v.trim().is_empty());
        let filter = lookup(LOG_LEVEL_ENV)
            .or_else(|| lookup("RUST_LOG"))
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        Self { filter }
    }

    /// An unparsable filter falls back to `info`.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    }
}
