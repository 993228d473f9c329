//! Configuration file and settings resolution.
//!
//! Values are resolved with the precedence: command-line flag, then
//! environment variable, then `config.json`, then built-in default.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use paydesk_core::browse::DEFAULT_PAGE_SIZE;
use paydesk_core::mask::DEFAULT_SENSITIVE_FIELDS;
use paydesk_core::{EntityFieldMap, EntityKind, Masker, SourceUrl};
use paydesk_http::{DEFAULT_BULK_LIMIT, DEFAULT_TIMEOUT, HttpConfig};

use crate::cli::GlobalArgs;

pub const SOURCE_ENV: &str = "PAYDESK_SOURCE";
pub const TOKEN_ENV: &str = "PAYDESK_TOKEN";

/// Contents of `config.json`. Every field is optional.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigFile {
    pub source: Option<String>,
    pub token: Option<String>,
    pub bulk_limit: Option<u32>,
    pub timeout_secs: Option<u64>,
    pub page_size: Option<u32>,
    pub sensitive_fields: Option<Vec<String>>,
    #[serde(default)]
    pub field_maps: BTreeMap<EntityKind, EntityFieldMap>,
}

impl ConfigFile {
    /// Read a config file. A missing file is `None`.
    pub fn read(path: &Path) -> Result<Option<Self>> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read config file {}", path.display()));
            }
        };

        let file = serde_json::from_str(&json)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(Some(file))
    }
}

/// Values taken from the environment.
#[derive(Debug, Default, Clone)]
pub struct EnvVars {
    pub source: Option<String>,
    pub token: Option<String>,
}

impl EnvVars {
    pub fn from_process() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v: &String| !v.trim().is_empty());
        Self {
            source: var(SOURCE_ENV),
            token: var(TOKEN_ENV),
        }
    }
}

/// Fully resolved settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub source: Option<SourceUrl>,
    pub token: Option<String>,
    pub bulk_limit: u32,
    pub timeout: Duration,
    pub page_size: u32,
    pub sensitive_fields: Vec<String>,
    pub config_path: Option<PathBuf>,
    field_maps: BTreeMap<EntityKind, EntityFieldMap>,
}

/// Default location of `config.json`.
fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "paydesk").map(|dirs| dirs.config_dir().join("config.json"))
}

impl Settings {
    /// Load settings for the current process.
    ///
    /// An explicit `--config` path must exist; the default location may not.
    pub fn load(args: &GlobalArgs) -> Result<Self> {
        let (file, path) = match &args.config {
            Some(path) => {
                let file = ConfigFile::read(path)?
                    .with_context(|| format!("Config file {} not found", path.display()))?;
                (file, Some(path.clone()))
            }
            None => match default_config_path() {
                Some(path) => match ConfigFile::read(&path)? {
                    Some(file) => (file, Some(path)),
                    None => (ConfigFile::default(), None),
                },
                None => (ConfigFile::default(), None),
            },
        };

        tracing::debug!(config = ?path, "Resolving settings");
        let mut settings = Self::resolve(args, EnvVars::from_process(), file)?;
        settings.config_path = path;
        Ok(settings)
    }

    /// Merge flags, environment and file values.
    pub fn resolve(args: &GlobalArgs, env: EnvVars, file: ConfigFile) -> Result<Self> {
        let source = args
            .source
            .clone()
            .or(env.source)
            .or(file.source)
            .map(|s| SourceUrl::new(s.trim()))
            .transpose()
            .context("Invalid source URL")?;

        let token = args.token.clone().or(env.token).or(file.token);

        let bulk_limit = file.bulk_limit.unwrap_or(DEFAULT_BULK_LIMIT);
        anyhow::ensure!(bulk_limit > 0, "bulkLimit must be greater than zero");

        let page_size = file.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        anyhow::ensure!(page_size > 0, "pageSize must be greater than zero");

        let timeout = file
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        let sensitive_fields = file.sensitive_fields.unwrap_or_else(|| {
            DEFAULT_SENSITIVE_FIELDS
                .iter()
                .map(|s| s.to_string())
                .collect()
        });

        Ok(Self {
            source,
            token,
            bulk_limit,
            timeout,
            page_size,
            sensitive_fields,
            config_path: None,
            field_maps: file.field_maps,
        })
    }

    /// The configured source, or an error telling the user how to set one.
    pub fn require_source(&self) -> Result<&SourceUrl> {
        self.source.as_ref().with_context(|| {
            format!("No source configured. Pass --source, set {SOURCE_ENV}, or add \"source\" to config.json.")
        })
    }

    /// Field roles for an entity, with config overrides applied.
    pub fn field_map(&self, kind: EntityKind) -> EntityFieldMap {
        self.field_maps
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| kind.field_map())
    }

    pub fn masker(&self) -> Masker {
        Masker::new(&self.sensitive_fields)
    }

    pub fn http_config(&self) -> HttpConfig {
        HttpConfig {
            token: self.token.clone(),
            bulk_limit: self.bulk_limit,
            timeout: self.timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn flags(source: Option<&str>, token: Option<&str>) -> GlobalArgs {
        GlobalArgs {
            source: source.map(str::to_string),
            token: token.map(str::to_string),
            config: None,
        }
    }

    fn file(value: serde_json::Value) -> ConfigFile {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn defaults_without_anything() {
        let settings =
            Settings::resolve(&GlobalArgs::default(), EnvVars::default(), ConfigFile::default())
                .unwrap();

        assert!(settings.source.is_none());
        assert_eq!(settings.bulk_limit, DEFAULT_BULK_LIMIT);
        assert_eq!(settings.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(settings.timeout, DEFAULT_TIMEOUT);
        assert!(settings.masker().is_sensitive("password"));
        assert!(settings.require_source().is_err());
    }

    #[test]
    fn flag_beats_env_beats_file() {
        let config = || file(json!({"source": "https://file.example.com", "token": "file-token"}));
        let env = || EnvVars {
            source: Some("https://env.example.com".to_string()),
            token: None,
        };

        let settings = Settings::resolve(&flags(None, None), env(), config()).unwrap();
        assert_eq!(settings.source.unwrap().to_string(), "https://env.example.com/");
        assert_eq!(settings.token.as_deref(), Some("file-token"));

        let settings = Settings::resolve(
            &flags(Some("https://flag.example.com"), Some("flag-token")),
            env(),
            config(),
        )
        .unwrap();
        assert_eq!(settings.source.unwrap().to_string(), "https://flag.example.com/");
        assert_eq!(settings.token.as_deref(), Some("flag-token"));

        let settings = Settings::resolve(&flags(None, None), EnvVars::default(), config()).unwrap();
        assert_eq!(settings.source.unwrap().to_string(), "https://file.example.com/");
    }

    #[test]
    fn rejects_invalid_source() {
        let result = Settings::resolve(
            &flags(Some("http://gateway.example.com"), None),
            EnvVars::default(),
            ConfigFile::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn field_map_override() {
        let config = file(json!({
            "fieldMaps": {
                "transfer": {
                    "id": "transferId",
                    "timestamp": "meta.created",
                    "amount": "total",
                    "search": ["transferId"]
                }
            }
        }));
        let settings = Settings::resolve(&flags(None, None), EnvVars::default(), config).unwrap();

        let transfer = settings.field_map(EntityKind::Transfer);
        assert_eq!(transfer.id, "transferId");
        assert_eq!(transfer.timestamp, "meta.created");
        assert_eq!(transfer.status, None);
        assert_eq!(settings.field_map(EntityKind::Member), EntityKind::Member.field_map());
    }

    #[test]
    fn numeric_settings() {
        let config = file(json!({"bulkLimit": 100, "timeoutSecs": 5, "pageSize": 50}));
        let settings = Settings::resolve(&flags(None, None), EnvVars::default(), config).unwrap();
        let http = settings.http_config();
        assert_eq!(http.bulk_limit, 100);
        assert_eq!(http.timeout, Duration::from_secs(5));
        assert_eq!(settings.page_size, 50);

        let zero = file(json!({"pageSize": 0}));
        assert!(Settings::resolve(&flags(None, None), EnvVars::default(), zero).is_err());
    }

    #[test]
    fn custom_sensitive_fields() {
        let config = file(json!({"sensitiveFields": ["merchantSecret"]}));
        let settings = Settings::resolve(&flags(None, None), EnvVars::default(), config).unwrap();
        let masker = settings.masker();
        assert!(masker.is_sensitive("merchantSecret"));
        assert!(!masker.is_sensitive("password"));
    }

    #[test]
    fn read_missing_and_invalid_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        assert!(ConfigFile::read(&path).unwrap().is_none());

        fs::write(&path, r#"{"source": 42}"#).unwrap();
        assert!(ConfigFile::read(&path).is_err());

        fs::write(&path, r#"{"pageSize": 10}"#).unwrap();
        let file = ConfigFile::read(&path).unwrap().unwrap();
        assert_eq!(file.page_size, Some(10));
    }
}
