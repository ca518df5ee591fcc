//! Layered configuration for the FeedbackHub service.
//!
//! Settings are read from `.feedbackhub/hub.toml`, then overridden by
//! environment variables, then by CLI flags.
//!
//! # Configuration File Format
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 3142
//! db_path = ".feedbackhub/hub.db"
//! dev_mode = false
//!
//! [logging]
//! level = "info"
//! json = false
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::roadmap::server::ServerConfig;

pub const CONFIG_DIR: &str = ".feedbackhub";
pub const CONFIG_FILE: &str = "hub.toml";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// `[server]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
    #[serde(default)]
    pub dev_mode: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3142
}

fn default_db_path() -> PathBuf {
    PathBuf::from(CONFIG_DIR).join("hub.db")
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            db_path: default_db_path(),
            dev_mode: false,
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSection {
    /// Default filter directive when `RUST_LOG` is unset
    #[serde(default = "default_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

/// Parsed hub.toml.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HubToml {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

impl HubToml {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse hub.toml")
    }

    /// Load from `<project>/.feedbackhub/hub.toml`, or defaults if absent.
    pub fn load_or_default(project_dir: &Path) -> Result<Self> {
        let path = config_path(project_dir);
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize hub.toml")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Apply `FEEDBACKHUB_*` overrides using `lookup` to read variables.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("FEEDBACKHUB_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("FEEDBACKHUB_PORT") {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid FEEDBACKHUB_PORT '{}'", port))?;
        }
        if let Some(path) = lookup("FEEDBACKHUB_DB_PATH") {
            self.server.db_path = PathBuf::from(path);
        }
        if let Some(level) = lookup("FEEDBACKHUB_LOG") {
            self.logging.level = level;
        }
        if let Some(json) = lookup("FEEDBACKHUB_LOG_JSON") {
            self.logging.json = matches!(json.trim(), "1" | "true" | "yes");
        }
        Ok(())
    }

    /// Validate the configuration and return any warnings.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.server.port == 0 {
            warnings.push("server.port is 0: the OS will pick a random port".to_string());
        }
        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            warnings.push(format!(
                "Unknown logging.level '{}'. Valid values: {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            ));
        }
        if self.server.host.trim().is_empty() {
            warnings.push("server.host is empty".to_string());
        }
        warnings
    }
}

pub fn config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(CONFIG_DIR).join(CONFIG_FILE)
}

/// CLI flags that take precedence over file and environment.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub db_path: Option<PathBuf>,
    pub dev_mode: bool,
    pub verbose: bool,
}

/// Effective configuration (file → env → CLI).
#[derive(Debug, Clone)]
pub struct HubConfig {
    pub project_dir: PathBuf,
    pub toml: HubToml,
}

impl HubConfig {
    /// Resolve configuration for `project_dir`, reading the process environment.
    pub fn load(project_dir: &Path, cli: &CliOverrides) -> Result<Self> {
        // A missing .env is normal.
        let _ = dotenvy::from_path(project_dir.join(".env"));
        Self::load_with_env(project_dir, cli, |name| std::env::var(name).ok())
    }

    pub fn load_with_env<F>(project_dir: &Path, cli: &CliOverrides, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut toml = HubToml::load_or_default(project_dir)?;
        toml.apply_env(lookup)?;

        if let Some(host) = &cli.host {
            toml.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            toml.server.port = port;
        }
        if let Some(path) = &cli.db_path {
            toml.server.db_path = path.clone();
        }
        if cli.dev_mode {
            toml.server.dev_mode = true;
        }
        if cli.verbose {
            toml.logging.level = "debug".to_string();
        }

        Ok(Self {
            project_dir: project_dir.to_path_buf(),
            toml,
        })
    }

    /// Database path, resolved against the project directory when relative.
    pub fn db_path(&self) -> PathBuf {
        if self.toml.server.db_path.is_absolute() {
            self.toml.server.db_path.clone()
        } else {
            self.project_dir.join(&self.toml.server.db_path)
        }
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.toml.server.host.clone(),
            port: self.toml.server.port,
            db_path: self.db_path(),
            dev_mode: self.toml.server.dev_mode,
        }
    }

    pub fn validate(&self) -> Vec<String> {
        self.toml.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_hub_toml_parse_empty() {
        let toml = HubToml::parse("").unwrap();
        assert_eq!(toml, HubToml::default());
        assert_eq!(toml.server.port, 3142);
        assert_eq!(toml.logging.level, "info");
    }

    #[test]
    fn test_hub_toml_parse_sections() {
        let content = r#"
[server]
port = 8080
db_path = "/var/lib/hub.db"

[logging]
json = true
"#;
        let toml = HubToml::parse(content).unwrap();
        assert_eq!(toml.server.port, 8080);
        assert_eq!(toml.server.host, "127.0.0.1");
        assert_eq!(toml.server.db_path, PathBuf::from("/var/lib/hub.db"));
        assert!(toml.logging.json);
        assert_eq!(toml.logging.level, "info");
    }

    #[test]
    fn test_hub_toml_parse_invalid() {
        assert!(HubToml::parse("[server]\nport = \"eighty\"").is_err());
    }

    #[test]
    fn test_save_and_load_roundtrip_through_project_dir() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(CONFIG_DIR)).unwrap();
        let mut toml = HubToml::default();
        toml.server.port = 9000;
        toml.save(&config_path(dir.path())).unwrap();

        let loaded = HubToml::load_or_default(dir.path()).unwrap();
        assert_eq!(loaded.server.port, 9000);
    }

    #[test]
    fn test_env_overrides_file() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("FEEDBACKHUB_PORT", "7000"),
            ("FEEDBACKHUB_LOG_JSON", "true"),
            ("FEEDBACKHUB_LOG", "warn"),
        ]);
        let mut toml = HubToml::default();
        toml.apply_env(|k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(toml.server.port, 7000);
        assert!(toml.logging.json);
        assert_eq!(toml.logging.level, "warn");
    }

    #[test]
    fn test_env_rejects_bad_port() {
        let mut toml = HubToml::default();
        let err = toml
            .apply_env(|k| (k == "FEEDBACKHUB_PORT").then(|| "abc".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("FEEDBACKHUB_PORT"));
    }

    #[test]
    fn test_cli_overrides_env_and_file() {
        let dir = tempdir().unwrap();
        let cli = CliOverrides {
            port: Some(4000),
            dev_mode: true,
            verbose: true,
            ..Default::default()
        };
        let config = HubConfig::load_with_env(dir.path(), &cli, |k| {
            (k == "FEEDBACKHUB_PORT").then(|| "7000".to_string())
        })
        .unwrap();
        assert_eq!(config.toml.server.port, 4000);
        assert!(config.toml.server.dev_mode);
        assert_eq!(config.toml.logging.level, "debug");
    }

    #[test]
    fn test_relative_db_path_resolves_against_project_dir() {
        let dir = tempdir().unwrap();
        let config = HubConfig::load_with_env(dir.path(), &CliOverrides::default(), no_env).unwrap();
        assert_eq!(config.db_path(), dir.path().join(".feedbackhub/hub.db"));

        let server = config.server_config();
        assert_eq!(server.db_path, config.db_path());
        assert_eq!(server.port, 3142);
    }

    #[test]
    fn test_validate_warnings() {
        let mut toml = HubToml::default();
        assert!(toml.validate().is_empty());

        toml.server.port = 0;
        toml.logging.level = "loud".to_string();
        let warnings = toml.validate();
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().any(|w| w.contains("loud")));
    }
}
