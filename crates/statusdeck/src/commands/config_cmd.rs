//! Config subcommand handlers.

use std::path::PathBuf;

use clap::ValueEnum;
use dialoguer::{Input, Select};

use crate::cli::{ColorMode, ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

fn format_config(cfg: &Config) -> String {
    toml::to_string_pretty(cfg).unwrap_or_else(|e| format!("# failed to render config: {e}"))
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> CliError {
    CliError::Validation {
        field: field.into(),
        reason: reason.into(),
    }
}

/// Names of a clap value enum's variants, in declaration order.
fn variant_names<T: ValueEnum>() -> Vec<String> {
    T::value_variants()
        .iter()
        .filter_map(|v| v.to_possible_value().map(|p| p.get_name().to_owned()))
        .collect()
}

fn check_variant<T: ValueEnum>(field: &str, value: &str) -> Result<String, CliError> {
    T::from_str(value, true).map_err(|_| {
        invalid(
            field,
            format!("expected one of: {}", variant_names::<T>().join(", ")),
        )
    })?;
    Ok(value.to_ascii_lowercase())
}

fn parse_optional_u64(field: &str, value: &str) -> Result<Option<u64>, CliError> {
    if value.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    match value.parse::<u64>() {
        Ok(0) | Err(_) => Err(invalid(field, "expected a positive integer or 'none'")),
        Ok(n) => Ok(Some(n)),
    }
}

/// Apply one `config set` assignment.
fn apply_setting(cfg: &mut Config, key: &str, value: &str) -> Result<(), CliError> {
    match key {
        "output" => cfg.defaults.output = check_variant::<OutputFormat>("output", value)?,
        "color" => cfg.defaults.color = check_variant::<ColorMode>("color", value)?,
        "timeout_secs" | "timeout-secs" => {
            cfg.http.timeout_secs = parse_optional_u64("timeout_secs", value)?;
        }
        "tick_ms" | "tick-ms" => {
            cfg.tui.tick_ms = parse_optional_u64("tick_ms", value)?
                .ok_or_else(|| invalid("tick_ms", "a tick interval is required"))?;
        }
        "log_file" | "log-file" => {
            cfg.tui.log_file =
                (!value.eq_ignore_ascii_case("none")).then(|| PathBuf::from(value));
        }
        other => {
            return Err(invalid(
                "key",
                format!(
                    "unknown key '{other}' (expected output, color, timeout-secs, tick-ms, log-file)"
                ),
            ));
        }
    }
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            eprintln!("statusdeck -- configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            // 1. Output format
            let outputs = variant_names::<OutputFormat>();
            let output_idx = Select::new()
                .with_prompt("Default output format")
                .items(&outputs)
                .default(0)
                .interact()
                .map_err(prompt_err)?;

            // 2. Color
            let colors = variant_names::<ColorMode>();
            let color_idx = Select::new()
                .with_prompt("Color output")
                .items(&colors)
                .default(0)
                .interact()
                .map_err(prompt_err)?;

            // 3. Timeout
            let timeout: String = Input::new()
                .with_prompt("Request timeout in seconds ('none' to wait indefinitely)")
                .default("none".into())
                .interact_text()
                .map_err(prompt_err)?;

            let mut cfg = config::load_effective();
            cfg.defaults.output = outputs.get(output_idx).cloned().unwrap_or_default();
            cfg.defaults.color = colors.get(color_idx).cloned().unwrap_or_default();
            cfg.http.timeout_secs = parse_optional_u64("timeout_secs", timeout.trim())?;

            // 4. Write config
            let written = config::save_config(&cfg)?;
            eprintln!("\nConfiguration written to {}", written.display());
            eprintln!("\n  Test it: statusdeck overview");
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_effective();
            let out =
                output::render_single(global.output(), &cfg, format_config, format_config);
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_effective();
            apply_setting(&mut cfg, &key, value.trim())?;
            let written = config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("Updated {key} in {}", written.display());
            }
            Ok(())
        }
    }
}
