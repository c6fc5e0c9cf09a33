//! CLI configuration -- thin wrapper around `statusdeck_config` shared types.
//!
//! Re-exports the shared types and fills unset global flags from the
//! `[defaults]` section.

use clap::ValueEnum;
use tracing::warn;

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};

// ── Re-exports from shared crate ────────────────────────────────────

pub use statusdeck_config::{Config, config_path, load_config, save_config};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Load the config, falling back to defaults with a warning when the
/// file cannot be read or parsed.
pub fn load_effective() -> Config {
    load_config().unwrap_or_else(|e| {
        warn!(error = %e, "ignoring unreadable config, using defaults");
        Config::default()
    })
}

/// Fill `--output` / `--color` from the config when not given on the
/// command line or in the environment.
pub fn apply_defaults(global: &mut GlobalOpts, cfg: &Config) {
    if global.output.is_none() {
        global.output = parse_setting::<OutputFormat>("defaults.output", &cfg.defaults.output);
    }
    if global.color.is_none() {
        global.color = parse_setting::<ColorMode>("defaults.color", &cfg.defaults.color);
    }
}

fn parse_setting<T: ValueEnum>(key: &str, value: &str) -> Option<T> {
    T::from_str(value, true)
        .inspect_err(|_| warn!(key, value, "unknown config value, using built-in default"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["statusdeck"];
        argv.extend_from_slice(args);
        argv.push("overview");
        Cli::try_parse_from(argv)
            .map(|cli| cli.global)
            .unwrap_or_else(|e| panic!("parse failed: {e}"))
    }

    #[test]
    fn config_fills_unset_output() {
        let mut cfg = Config::default();
        cfg.defaults.output = "yaml".into();
        let mut opts = global(&[]);
        opts.output = None;

        apply_defaults(&mut opts, &cfg);
        assert_eq!(opts.output(), OutputFormat::Yaml);
    }

    #[test]
    fn flag_wins_over_config() {
        let mut cfg = Config::default();
        cfg.defaults.output = "yaml".into();
        let mut opts = global(&["-o", "plain"]);

        apply_defaults(&mut opts, &cfg);
        assert_eq!(opts.output(), OutputFormat::Plain);
    }

    #[test]
    fn unknown_value_falls_back() {
        let mut cfg = Config::default();
        cfg.defaults.color = "sometimes".into();
        let mut opts = global(&["--color", "never"]);
        opts.color = None;

        apply_defaults(&mut opts, &cfg);
        assert_eq!(opts.color(), ColorMode::Auto);
    }

    #[test]
    fn json_compact_spelling_is_accepted() {
        let mut cfg = Config::default();
        cfg.defaults.output = "json-compact".into();
        let mut opts = global(&[]);
        opts.output = None;

        apply_defaults(&mut opts, &cfg);
        assert_eq!(opts.output(), OutputFormat::JsonCompact);
    }
}
