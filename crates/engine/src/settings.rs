//! Engine configuration loaded from the environment.

/// Default cap on concurrently live sessions.
const DEFAULT_SESSIONS_LIMIT: usize = 100;

/// Runtime settings for the engine process.
///
/// Collected into one struct so the capacity limit reaches the registry as
/// an explicit dependency rather than an ambient global.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub host: String,
    pub port: u16,
    /// Maximum number of live sessions; enforced at room creation.
    pub sessions_limit: usize,
}

impl EngineSettings {
    pub fn from_env() -> Self {
        let host = std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = std::env::var("SERVER_PORT")
            .or_else(|_| std::env::var("PORT"))
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .unwrap_or(3000);
        let sessions_limit = std::env::var("SESSIONS_LIMIT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_SESSIONS_LIMIT);

        Self {
            host,
            port,
            sessions_limit,
        }
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
            sessions_limit: DEFAULT_SESSIONS_LIMIT,
        }
    }
}
