//! Configuration for the overseer CLI.
//!
//! TOML profiles layered with `OVERSEER_`-prefixed environment variables,
//! and translation to `overseer_core::MonitorConfig`. The CLI adds
//! flag-aware wrappers on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use overseer_core::config::{DEFAULT_ENDPOINT, DEFAULT_NOTIFICATION_TTL, DEFAULT_POLL_INTERVAL};
use overseer_core::{MonitorConfig, OverlapPolicy};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found in config")]
    UnknownProfile { name: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named service profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    /// Request timeout in seconds. Absent or 0 means no timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default)]
    pub overlap: OverlapPolicy,

    /// Consecutive poll failures before a warning notification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_escalation: Option<u32>,

    #[serde(default = "default_notification_ttl_ms")]
    pub notification_ttl_ms: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: None,
            poll_interval_ms: default_poll_interval_ms(),
            overlap: OverlapPolicy::default(),
            failure_escalation: None,
            notification_ttl_ms: default_notification_ttl_ms(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_poll_interval_ms() -> u64 {
    duration_ms(DEFAULT_POLL_INTERVAL)
}
fn default_notification_ttl_ms() -> u64 {
    duration_ms(DEFAULT_NOTIFICATION_TTL)
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// A named skynet service profile. Unset fields fall back to `Defaults`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Profile {
    /// Service base URL (e.g., "http://farm.local/skynet/").
    pub endpoint: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poll_interval_ms: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlap: Option<OverlapPolicy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_escalation: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_ttl_ms: Option<u64>,
}

impl Profile {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: None,
            poll_interval_ms: None,
            overlap: None,
            failure_escalation: None,
            notification_ttl_ms: None,
        }
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "overseer", "overseer").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("overseer");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the full Config from `path` + environment.
///
/// A missing file is not an error. Nested keys in the environment use a
/// double underscore: `OVERSEER_DEFAULTS__POLL_INTERVAL_MS=1000`,
/// `OVERSEER_PROFILES__LAB__ENDPOINT=http://lab/skynet/`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("OVERSEER_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation ─────────────────────────────────────────────────────

impl Config {
    /// Look up a profile by name. The implicit `default` profile points at
    /// the built-in endpoint when the file does not define it.
    pub fn profile(&self, name: &str) -> Result<Profile, ConfigError> {
        match self.profiles.get(name) {
            Some(p) => Ok(p.clone()),
            None if name == "default" => Ok(Profile::default()),
            None => Err(ConfigError::UnknownProfile { name: name.into() }),
        }
    }
}

/// Build a `MonitorConfig` from a profile, filling unset fields from
/// `defaults`. No CLI flag overrides.
pub fn profile_to_monitor_config(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<MonitorConfig, ConfigError> {
    let endpoint: url::Url = profile
        .endpoint
        .parse()
        .map_err(|_| ConfigError::Validation {
            field: "endpoint".into(),
            reason: format!("invalid URL: {}", profile.endpoint),
        })?;

    let poll_interval_ms = profile.poll_interval_ms.unwrap_or(defaults.poll_interval_ms);
    if poll_interval_ms == 0 {
        return Err(ConfigError::Validation {
            field: "poll_interval_ms".into(),
            reason: "must be greater than zero".into(),
        });
    }

    let mut config = MonitorConfig::new(endpoint);
    config.timeout = profile
        .timeout
        .or(defaults.timeout)
        .filter(|s| *s > 0)
        .map(Duration::from_secs);
    config.poll_interval = Duration::from_millis(poll_interval_ms);
    config.overlap = profile.overlap.unwrap_or(defaults.overlap);
    config.failure_escalation = profile
        .failure_escalation
        .or(defaults.failure_escalation)
        .filter(|n| *n > 0);
    config.notification_ttl = Duration::from_millis(
        profile
            .notification_ttl_ms
            .unwrap_or(defaults.notification_ttl_ms),
    );
    Ok(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use figment::Jail;
    use pretty_assertions::assert_eq;

    use super::*;

    fn load(jail: &Jail) -> Result<Config, figment::Error> {
        load_config_from(&jail.directory().join("config.toml")).map_err(|e| e.to_string().into())
    }

    #[test]
    fn missing_file_yields_defaults() {
        Jail::expect_with(|jail| {
            let cfg = load(jail)?;
            assert_eq!(cfg, Config::default());
            assert_eq!(cfg.defaults.poll_interval_ms, 5000);
            assert_eq!(cfg.defaults.notification_ttl_ms, 10_000);
            Ok(())
        });
    }

    #[test]
    fn file_profiles_are_read() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                    default_profile = "lab"

                    [defaults]
                    poll_interval_ms = 2000

                    [profiles.lab]
                    endpoint = "http://lab.local/skynet/"
                    overlap = "skip-while-in-flight"
                    failure_escalation = 3
                "#,
            )?;

            let cfg = load(jail)?;
            assert_eq!(cfg.default_profile.as_deref(), Some("lab"));
            let lab = cfg.profile("lab").unwrap();
            assert_eq!(lab.endpoint, "http://lab.local/skynet/");
            assert_eq!(lab.overlap, Some(OverlapPolicy::SkipWhileInFlight));

            let monitor = profile_to_monitor_config(&lab, &cfg.defaults).unwrap();
            assert_eq!(monitor.poll_interval, Duration::from_millis(2000));
            assert_eq!(monitor.failure_escalation, Some(3));
            assert_eq!(monitor.timeout, None);
            Ok(())
        });
    }

    #[test]
    fn environment_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                    [profiles.lab]
                    endpoint = "http://lab.local/skynet/"
                "#,
            )?;
            jail.set_env("OVERSEER_DEFAULT_PROFILE", "lab");
            jail.set_env("OVERSEER_DEFAULTS__TIMEOUT", "15");
            jail.set_env("OVERSEER_PROFILES__LAB__POLL_INTERVAL_MS", "750");

            let cfg = load(jail)?;
            assert_eq!(cfg.default_profile.as_deref(), Some("lab"));
            let monitor =
                profile_to_monitor_config(&cfg.profile("lab").unwrap(), &cfg.defaults).unwrap();
            assert_eq!(monitor.timeout, Some(Duration::from_secs(15)));
            assert_eq!(monitor.poll_interval, Duration::from_millis(750));
            Ok(())
        });
    }

    #[test]
    fn implicit_default_profile_uses_builtin_endpoint() {
        let cfg = Config::default();
        let profile = cfg.profile("default").unwrap();
        assert_eq!(profile.endpoint, DEFAULT_ENDPOINT);
        assert!(matches!(
            cfg.profile("nope"),
            Err(ConfigError::UnknownProfile { .. })
        ));
    }

    #[test]
    fn rejects_bad_endpoint_and_zero_interval() {
        let defaults = Defaults::default();
        let err = profile_to_monitor_config(&Profile::new("not a url"), &defaults).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "endpoint"));

        let mut profile = Profile::default();
        profile.poll_interval_ms = Some(0);
        let err = profile_to_monitor_config(&profile, &defaults).unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation { ref field, .. } if field == "poll_interval_ms")
        );
    }

    #[test]
    fn zero_escalation_disables_it() {
        let mut profile = Profile::default();
        profile.failure_escalation = Some(0);
        let cfg = profile_to_monitor_config(&profile, &Defaults::default()).unwrap();
        assert_eq!(cfg.failure_escalation, None);
    }

    #[test]
    fn zero_timeout_means_none() {
        let mut defaults = Defaults::default();
        defaults.timeout = Some(30);

        let mut profile = Profile::default();
        profile.timeout = Some(0);
        let cfg = profile_to_monitor_config(&profile, &defaults).unwrap();
        assert_eq!(cfg.timeout, None);

        defaults.timeout = Some(0);
        let cfg = profile_to_monitor_config(&Profile::default(), &defaults).unwrap();
        assert_eq!(cfg.timeout, None);
    }

    #[test]
    fn save_then_load_keeps_profiles() {
        Jail::expect_with(|jail| {
            let path = jail.directory().join("nested").join("config.toml");
            let mut cfg = Config::default();
            cfg.profiles
                .insert("farm".into(), Profile::new("http://farm.local/skynet/"));
            save_config_to(&cfg, &path).map_err(|e| e.to_string())?;

            let loaded = load_config_from(&path).map_err(|e| e.to_string())?;
            assert_eq!(loaded, cfg);
            Ok(())
        });
    }
}
