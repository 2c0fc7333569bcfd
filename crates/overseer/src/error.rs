//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use overseer_config::ConfigError;
use overseer_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach skynet at {url}")]
    #[diagnostic(
        code(overseer::connection_failed),
        help(
            "Check that the service is running and the endpoint is right.\n\
             URL: {url}\n\
             Try: overseer printers --endpoint http://<host>/skynet/"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request to skynet timed out")]
    #[diagnostic(
        code(overseer::timeout),
        help("Increase the timeout with --timeout or check the service's responsiveness.")
    )]
    Timeout,

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(overseer::not_found),
        help("Run: overseer {list_command} to see pending {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────

    #[error("skynet error ({code}): {message}")]
    #[diagnostic(code(overseer::api_error))]
    ApiError { code: String, message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(overseer::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(overseer::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: overseer config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(overseer::config))]
    Config(Box<figment::Error>),

    #[error("Failed to write configuration: {0}")]
    #[diagnostic(code(overseer::config_write))]
    ConfigWrite(#[from] toml::ser::Error),

    // ── IO ───────────────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::ProfileNotFound { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::Timeout => CliError::Timeout,

            CoreError::NotFound { path } => {
                let resource_type = resource_for_path(&path).into();
                let list_command = list_command_for_path(&path_kind(&path)).into();
                CliError::NotFound {
                    resource_type,
                    identifier: id_from_path(&path).unwrap_or(path),
                    list_command,
                }
            }

            CoreError::Api { message, status } => CliError::ApiError {
                code: status.map_or_else(|| "transport".into(), |s| s.to_string()),
                message,
            },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },

            CoreError::NoRuntime => CliError::ApiError {
                code: "internal".into(),
                message: "no async runtime".into(),
            },

            CoreError::Internal(message) => CliError::ApiError {
                code: "internal".into(),
                message,
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::UnknownProfile { name } => CliError::ProfileNotFound {
                name,
                available: String::new(),
            },
            ConfigError::Serialization(e) => CliError::ConfigWrite(e),
            ConfigError::Figment(e) => CliError::Config(e),
            ConfigError::Io(e) => CliError::Io(e),
        }
    }
}

// ── Operation path helpers ───────────────────────────────────────────

/// Operation name of a path like `operations/cancel_active_task/3/`.
fn path_kind(path: &str) -> String {
    path.trim_matches('/')
        .split('/')
        .nth(1)
        .unwrap_or_default()
        .to_owned()
}

fn id_from_path(path: &str) -> Option<String> {
    path.trim_matches('/')
        .rsplit('/')
        .next()
        .filter(|s| s.chars().all(|c| c.is_ascii_digit()) && !s.is_empty())
        .map(str::to_owned)
}

fn resource_for_path(path: &str) -> &'static str {
    match path_kind(path).as_str() {
        "confirm_job_result" => "print job",
        "confirm_filament_change" | "cancel_active_task" | "reset_printer"
        | "toggle_printer_en_dis" => "printer",
        _ => "resource",
    }
}

fn list_command_for_path(kind: &str) -> &'static str {
    match kind {
        "confirm_job_result" => "jobs",
        "confirm_filament_change" => "filament",
        _ => "printers",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_printer() {
        let err = CliError::from(CoreError::NotFound {
            path: "operations/cancel_active_task/42/".into(),
        });
        assert_eq!(err.exit_code(), exit_code::NOT_FOUND);
        match err {
            CliError::NotFound {
                resource_type,
                identifier,
                list_command,
            } => {
                assert_eq!(resource_type, "printer");
                assert_eq!(identifier, "42");
                assert_eq!(list_command, "printers");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn job_not_found_points_at_jobs() {
        let err = CliError::from(CoreError::NotFound {
            path: "operations/confirm_job_result/9/".into(),
        });
        assert!(
            matches!(err, CliError::NotFound { ref resource_type, ref list_command, .. }
                if resource_type == "print job" && list_command == "jobs")
        );
    }

    #[test]
    fn exit_codes() {
        assert_eq!(CliError::from(CoreError::Timeout).exit_code(), exit_code::TIMEOUT);
        assert_eq!(
            CliError::from(CoreError::ConnectionFailed {
                url: "http://x/".into(),
                reason: "refused".into()
            })
            .exit_code(),
            exit_code::CONNECTION
        );
        assert_eq!(
            CliError::from(CoreError::Api {
                message: "boom".into(),
                status: Some(500)
            })
            .exit_code(),
            exit_code::GENERAL
        );
        assert_eq!(
            CliError::from(ConfigError::UnknownProfile { name: "x".into() }).exit_code(),
            exit_code::USAGE
        );
    }
}
