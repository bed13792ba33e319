//! Layered configuration.
//!
//! Settings are resolved in layers, later layers winning:
//!
//! 1. built-in defaults
//! 2. a YAML file (`--config`, or the `REVLANE_CONFIG` variable)
//! 3. environment (`REVLANE_BASE_URL`)
//! 4. command-line flags
//!
//! ```yaml
//! base_url: https://billing.example.org/revenue/
//! templates:
//!   - ./templates
//! timeout_secs: 10
//! output: text
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use revlane_dispatch::{EndpointResolver, DEFAULT_BASE_URL};
use revlane_render::{RegistryError, TemplateRegistry};
use serde::{Deserialize, Serialize};

use crate::env::EnvReader;
use crate::output::OutputMode;

pub const CONFIG_ENV: &str = "REVLANE_CONFIG";
pub const BASE_URL_ENV: &str = "REVLANE_BASE_URL";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file \"{}\": {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file \"{}\": {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid base URL \"{url}\": {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("timeout must be at least one second")]
    InvalidTimeout,
}

/// Resolved settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub base_url: String,
    /// Template containers or directories, highest priority first.
    pub templates: Vec<PathBuf>,
    pub timeout_secs: u64,
    pub output: OutputMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            templates: Vec::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            output: OutputMode::default(),
        }
    }
}

/// Values given on the command line. `None` / empty leaves the lower
/// layers in effect.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub base_url: Option<String>,
    pub templates: Vec<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub output: Option<OutputMode>,
}

impl Config {
    /// Resolves every layer and validates the result.
    pub fn load(env: &dyn EnvReader, overrides: &Overrides) -> Result<Self, ConfigError> {
        let file = overrides
            .config
            .clone()
            .or_else(|| env.var(CONFIG_ENV).map(PathBuf::from));
        let mut config = match file {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        if let Some(base_url) = env.var(BASE_URL_ENV) {
            config.base_url = base_url;
        }

        if let Some(base_url) = &overrides.base_url {
            config.base_url = base_url.clone();
        }
        if !overrides.templates.is_empty() {
            config.templates = overrides.templates.clone();
        }
        if let Some(timeout) = overrides.timeout_secs {
            config.timeout_secs = timeout;
        }
        if let Some(output) = overrides.output {
            config.output = output;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reads a YAML file. Fields it leaves out keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn validate(&mut self) -> Result<(), ConfigError> {
        let resolver = self.resolver()?;
        self.base_url = resolver.base_url().to_string();
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(())
    }

    pub fn resolver(&self) -> Result<EndpointResolver, ConfigError> {
        EndpointResolver::new(&self.base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            source,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Built-in templates overlaid with the configured template paths.
    pub fn template_registry(&self) -> Result<TemplateRegistry, RegistryError> {
        let mut registry = TemplateRegistry::with_builtins()?;
        for path in &self.templates {
            let added = registry.add_path(path)?;
            tracing::debug!(path = %path.display(), added, "loaded templates");
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MockEnv;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    // =========================================================================
    // Layering
    // =========================================================================

    #[test]
    fn test_defaults() {
        let config = Config::load(&MockEnv::new(), &Overrides::default()).unwrap();
        assert_eq!(config.base_url, "http://localhost:8580/revenue/");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.output, OutputMode::Html);
        assert!(config.templates.is_empty());
    }

    #[test]
    fn test_file_layer() {
        let file = write_config("base_url: http://billing:9000/rs\ntimeout_secs: 5\noutput: text\n");
        let overrides = Overrides {
            config: Some(file.path().to_path_buf()),
            ..Overrides::default()
        };
        let config = Config::load(&MockEnv::new(), &overrides).unwrap();
        assert_eq!(config.base_url, "http://billing:9000/rs/");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.output, OutputMode::Text);
    }

    #[test]
    fn test_config_file_from_env() {
        let file = write_config("timeout_secs: 7\n");
        let env = MockEnv::new().with_var(CONFIG_ENV, file.path().to_string_lossy());
        let config = Config::load(&env, &Overrides::default()).unwrap();
        assert_eq!(config.timeout_secs, 7);
    }

    #[test]
    fn test_env_overrides_file_and_flags_override_env() {
        let file = write_config("base_url: http://file/\n");
        let env = MockEnv::new().with_var(BASE_URL_ENV, "http://env/");
        let mut overrides = Overrides {
            config: Some(file.path().to_path_buf()),
            ..Overrides::default()
        };
        assert_eq!(Config::load(&env, &overrides).unwrap().base_url, "http://env/");

        overrides.base_url = Some("http://flag".into());
        assert_eq!(Config::load(&env, &overrides).unwrap().base_url, "http://flag/");
    }

    #[test]
    fn test_flag_templates_replace_file_templates() {
        let file = write_config("templates: [a.xhtml]\n");
        let overrides = Overrides {
            config: Some(file.path().to_path_buf()),
            templates: vec![PathBuf::from("b.xhtml")],
            ..Overrides::default()
        };
        let config = Config::load(&MockEnv::new(), &overrides).unwrap();
        assert_eq!(config.templates, vec![PathBuf::from("b.xhtml")]);
    }

    // =========================================================================
    // Errors
    // =========================================================================

    #[test]
    fn test_missing_file() {
        let overrides = Overrides {
            config: Some(PathBuf::from("/definitely/not/here.yaml")),
            ..Overrides::default()
        };
        assert!(matches!(
            Config::load(&MockEnv::new(), &overrides),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let file = write_config("base_uri: http://typo/\n");
        assert!(matches!(
            Config::from_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_invalid_base_url() {
        let overrides = Overrides {
            base_url: Some("not a url".into()),
            ..Overrides::default()
        };
        assert!(matches!(
            Config::load(&MockEnv::new(), &overrides),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_zero_timeout() {
        let overrides = Overrides {
            timeout_secs: Some(0),
            ..Overrides::default()
        };
        assert!(matches!(
            Config::load(&MockEnv::new(), &overrides),
            Err(ConfigError::InvalidTimeout)
        ));
    }

    #[test]
    fn test_template_registry_includes_builtins_and_paths() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("custom.xhtml"),
            r#"<templates><p name="plan_summary_template"/></templates>"#,
        )
        .unwrap();
        let config = Config {
            templates: vec![dir.path().to_path_buf()],
            ..Config::default()
        };
        let registry = config.template_registry().unwrap();
        assert_eq!(registry.lookup("plan_summary").unwrap().tag(), "p");
        assert!(registry.contains("cb_summary"));
    }
}
