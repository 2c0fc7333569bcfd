//! CLI configuration: thin wrapper around `overseer_config` shared types.
//!
//! Re-exports the shared types and adds resolution that respects
//! `GlobalOpts` flag overrides (--endpoint, --timeout, --poll-interval-ms,
//! --output, --color).

use clap::ValueEnum;

use overseer_core::MonitorConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use overseer_config::{
    Config, ConfigError, Defaults, Profile, config_path, load_config, load_config_or_default,
    profile_to_monitor_config, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Settle `--output` / `--color`: an explicit flag wins, otherwise the
/// config file's `[defaults]` apply.
pub fn apply_display_defaults(
    global: &mut GlobalOpts,
    defaults: &Defaults,
) -> Result<(), CliError> {
    global.output = match global.output_flag.clone() {
        Some(format) => format,
        None => parse_default("output", &defaults.output)?,
    };
    global.color = match global.color_flag.clone() {
        Some(mode) => mode,
        None => parse_default("color", &defaults.color)?,
    };
    Ok(())
}

fn parse_default<T: ValueEnum>(key: &str, value: &str) -> Result<T, CliError> {
    T::from_str(value, true).map_err(|reason| CliError::Validation {
        field: format!("defaults.{key}"),
        reason,
    })
}

/// Build a `MonitorConfig` from the config file, active profile, and
/// global flags. Flags take priority over profile values.
pub fn resolve_monitor_config(global: &GlobalOpts) -> Result<MonitorConfig, CliError> {
    let cfg = load_config()?;
    let profile_name = active_profile_name(global, &cfg);

    let mut profile = match cfg.profile(&profile_name) {
        Ok(p) => p,
        // An explicit endpoint needs no profile.
        Err(ConfigError::UnknownProfile { .. }) if global.endpoint.is_some() => Profile::default(),
        Err(ConfigError::UnknownProfile { name }) => {
            let mut names: Vec<_> = cfg.profiles.keys().cloned().collect();
            names.sort();
            return Err(CliError::ProfileNotFound {
                name,
                available: if names.is_empty() {
                    "(none)".into()
                } else {
                    names.join(", ")
                },
            });
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(ref endpoint) = global.endpoint {
        profile.endpoint.clone_from(endpoint);
    }
    if let Some(ms) = global.poll_interval_ms {
        profile.poll_interval_ms = Some(ms);
    }
    if let Some(secs) = global.timeout {
        profile.timeout = Some(secs);
    }

    let monitor = profile_to_monitor_config(&profile, &cfg.defaults)?;
    tracing::debug!(
        profile = %profile_name,
        endpoint = %monitor.endpoint,
        timeout_secs = ?monitor.timeout.map(|t| t.as_secs()),
        "resolved monitor config"
    );
    Ok(monitor)
}
