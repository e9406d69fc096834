use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable that overrides `[database] path`.
pub const DB_PATH_ENV: &str = "HADROS_DB_PATH";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 8000 }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub access_token_minutes: i64,
    pub refresh_token_days: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_token_minutes: 60,
            refresh_token_days: 30,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AnalysisConfig {
    /// Sales history considered by the inventory analysis
    pub window_days: i64,
    /// Items covering fewer days than this get a restock suggestion
    pub coverage_days_target: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window_days: 30,
            coverage_days_target: 15.0,
        }
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[database]
path = "data/hadros.db"

[server]
port = 8000

[auth]
access_token_minutes = 60
refresh_token_days = 30

[analysis]
window_days = 30
coverage_days_target = 15
"#;

/// Load configuration from config.toml next to the executable,
/// falling back to the embedded default.
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

/// Config loaded once per process.
pub fn get_config() -> &'static Config {
    static CONFIG: once_cell::sync::OnceCell<Config> = once_cell::sync::OnceCell::new();
    CONFIG.get_or_init(|| {
        load_config().unwrap_or_else(|e| {
            tracing::error!("Failed to load config.toml, using defaults: {}", e);
            default_config()
        })
    })
}

fn default_config() -> Config {
    Config {
        database: DatabaseConfig {
            path: "data/hadros.db".to_string(),
        },
        server: ServerConfig::default(),
        auth: AuthConfig::default(),
        analysis: AnalysisConfig::default(),
    }
}

/// Database file path: env override first, then config.
/// Relative paths resolve against the executable directory.
pub fn get_database_path(config: &Config) -> anyhow::Result<PathBuf> {
    let env_path = std::env::var(DB_PATH_ENV).ok().filter(|p| !p.trim().is_empty());
    let db_path_str = env_path.as_deref().unwrap_or(&config.database.path);
    let db_path = Path::new(db_path_str);

    if db_path.is_absolute() {
        return Ok(db_path.to_path_buf());
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return Ok(exe_dir.join(db_path));
        }
    }

    Ok(PathBuf::from(db_path_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.database.path, "data/hadros.db");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.auth.access_token_minutes, 60);
        assert_eq!(config.analysis.window_days, 30);
        assert_eq!(config.analysis.coverage_days_target, 15.0);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: Config = toml::from_str("[database]\npath = \"x.db\"\n").unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.auth.refresh_token_days, 30);
    }

    #[test]
    fn test_absolute_path_is_kept() {
        let mut config = default_config();
        config.database.path = if cfg!(windows) {
            "C:\\data\\hadros.db".to_string()
        } else {
            "/var/lib/hadros.db".to_string()
        };
        if std::env::var(DB_PATH_ENV).is_err() {
            let path = get_database_path(&config).unwrap();
            assert_eq!(path, PathBuf::from(&config.database.path));
        }
    }
}
