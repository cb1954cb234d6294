use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Signing secret used when neither the config file nor `JWT_SECRET` sets one.
pub const INSECURE_JWT_SECRET: &str = "yusmov_insecure_dev_secret_change_me";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub auth: AuthConfig,

    pub security: SecurityConfig,

    pub observability: ObservabilityConfig,

    /// File the settings were read from, `None` when running on defaults
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Database URL, overridden by `CONNECTION_URI`
    pub database_url: String,

    pub log_level: String,

    /// Emit logs as JSON lines instead of the human-readable format
    pub json_logs: bool,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    /// Maximum database connections (default: 5)
    pub max_db_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:data/yusmov.db".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,

    /// Listening port, overridden by `PORT`
    pub port: u16,

    /// Directory served for unmatched GET paths (documentation page etc.)
    pub public_path: String,

    /// `"*"` allows any origin.
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            public_path: "public".to_string(),
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 signing secret, overridden by `JWT_SECRET`.
    /// Empty means "use the insecure built-in fallback".
    pub jwt_secret: String,

    /// Bearer token lifetime in hours (default: 168 = 7 days)
    pub token_ttl_hours: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_hours: 7 * 24,
        }
    }
}

impl AuthConfig {
    /// The secret tokens are signed and verified with.
    #[must_use]
    pub fn signing_secret(&self) -> &str {
        if self.jwt_secret.is_empty() {
            INSECURE_JWT_SECRET
        } else {
            &self.jwt_secret
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Argon2 memory cost in KiB (default: 8192 = 8MB)
    pub argon2_memory_cost_kib: u32,

    /// Argon2 time cost (iterations)
    pub argon2_time_cost: u32,

    /// Argon2 parallelism (default: 1)
    pub argon2_parallelism: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            argon2_memory_cost_kib: 8192,
            argon2_time_cost: 3,
            argon2_parallelism: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
        }
    }
}

impl Config {
    /// Reads the first config file found in the search path, or defaults.
    ///
    /// Runs before tracing is installed, so nothing is logged here; the
    /// chosen file is kept in `source` for reporting later.
    pub fn load_file() -> Result<Self> {
        Self::config_paths()
            .iter()
            .find(|path| path.exists())
            .map_or_else(|| Ok(Self::default()), |path| Self::load_from_path(path))
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.source = Some(path.to_path_buf());

        Ok(config)
    }

    /// Applies `CONNECTION_URI`, `PORT` and `JWT_SECRET` from `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("CONNECTION_URI").filter(|v| !v.is_empty()) {
            self.general.database_url = url;
        }

        if let Some(port) = lookup("PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(e) => warn!("Ignoring invalid PORT value '{port}': {e}"),
            }
        }

        if let Some(secret) = lookup("JWT_SECRET").filter(|v| !v.is_empty()) {
            self.auth.jwt_secret = secret;
        }
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("yusmov").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".yusmov").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.general.database_url.trim().is_empty() {
            anyhow::bail!("Database URL cannot be empty");
        }

        if self.server.port == 0 {
            anyhow::bail!("Server port must be > 0");
        }

        if self.auth.token_ttl_hours == 0 {
            anyhow::bail!("Token lifetime must be at least one hour");
        }

        if self.auth.jwt_secret.is_empty() {
            warn!("JWT_SECRET not set, signing tokens with the insecure built-in secret");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.auth.token_ttl_hours, 168);
        assert_eq!(config.auth.signing_secret(), INSECURE_JWT_SECRET);
        assert_eq!(config.server.cors_allowed_origins, vec!["*".to_string()]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[server]"));
        assert!(toml_str.contains("[auth]"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [auth]
            token_ttl_hours = 1
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.auth.token_ttl_hours, 1);

        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("CONNECTION_URI", "sqlite:/tmp/override.db"),
            ("PORT", "9090"),
            ("JWT_SECRET", "s3cret"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_env_overrides(|key| env.get(key).map(|v| (*v).to_string()));

        assert_eq!(config.general.database_url, "sqlite:/tmp/override.db");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.auth.signing_secret(), "s3cret");
    }

    #[test]
    fn test_invalid_port_override_is_ignored() {
        let mut config = Config::default();
        config.apply_env_overrides(|key| (key == "PORT").then(|| "not-a-port".to_string()));
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_load_from_path_records_source() {
        let path =
            std::env::temp_dir().join(format!("yusmov-config-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[server]\nport = 9191\n").unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.server.port, 9191);
        assert_eq!(config.source.as_deref(), Some(path.as_path()));
        assert!(Config::default().source.is_none());

        let saved = toml::to_string_pretty(&config).unwrap();
        assert!(!saved.contains("source"));

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_validate_rejects_zero_ttl() {
        let mut config = Config::default();
        config.auth.token_ttl_hours = 0;
        assert!(config.validate().is_err());
    }
}
