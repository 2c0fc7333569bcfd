//! Config subcommand handlers.

use dialoguer::Input;

use overseer_core::config::DEFAULT_ENDPOINT;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

use super::util;

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn validate_endpoint(endpoint: &str) -> Result<(), CliError> {
    let url = url::Url::parse(endpoint).map_err(|e| CliError::Validation {
        field: "endpoint".into(),
        reason: format!("invalid URL '{endpoint}': {e}"),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(CliError::Validation {
            field: "endpoint".into(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }
    Ok(())
}

/// Render the loaded config in the chosen output format.
fn render_config(cfg: &Config, format: &OutputFormat) -> Result<String, CliError> {
    Ok(match format {
        OutputFormat::Json => output::render_json_pretty(cfg),
        OutputFormat::JsonCompact => output::render_json_compact(cfg),
        OutputFormat::Yaml => output::render_yaml(cfg),
        OutputFormat::Table | OutputFormat::Plain => toml::to_string_pretty(cfg)?,
    })
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            eprintln!("overseer configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            let mut cfg = config::load_config()?;

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            if cfg.profiles.contains_key(&profile_name)
                && !util::confirm(
                    &format!("Profile '{profile_name}' exists. Overwrite?"),
                    global.yes,
                )?
            {
                return Ok(());
            }

            let endpoint: String = Input::new()
                .with_prompt("skynet URL")
                .default(DEFAULT_ENDPOINT.into())
                .interact_text()
                .map_err(prompt_err)?;
            validate_endpoint(&endpoint)?;

            let poll_interval_ms: u64 = Input::new()
                .with_prompt("Poll interval (ms)")
                .default(cfg.defaults.poll_interval_ms)
                .interact_text()
                .map_err(prompt_err)?;
            if poll_interval_ms == 0 {
                return Err(CliError::Validation {
                    field: "poll_interval_ms".into(),
                    reason: "must be greater than zero".into(),
                });
            }

            let mut profile = Profile::new(endpoint);
            if poll_interval_ms != cfg.defaults.poll_interval_ms {
                profile.poll_interval_ms = Some(poll_interval_ms);
            }
            cfg.profiles.insert(profile_name.clone(), profile);
            cfg.default_profile = Some(profile_name.clone());

            config::save_config(&cfg)?;

            eprintln!("\n✓ Configuration written to {}", config_path.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Test it: overseer printers");
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            let out = render_config(&cfg, &global.output)?;
            output::print_output(out.trim_end(), global.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            println!("{}", config::config_path().display());
            Ok(())
        }
    }
}
