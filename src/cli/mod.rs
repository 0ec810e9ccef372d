//! CLI interface and argument parsing
//!
//! This module provides the command-line interface using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Obfuscation Markers - resolve and apply field manifests
#[derive(Parser, Debug)]
#[command(name = "obfuscation-markers")]
#[command(version, about, long_about = None)]
#[command(author = "Obfuscation Markers Contributors")]
pub struct Cli {
    /// Path to the field manifest
    #[arg(
        short,
        long,
        default_value = "fields.toml",
        env = "OBFUSCATION_MARKERS_MANIFEST"
    )]
    pub manifest: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "OBFUSCATION_MARKERS_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve the markers of every field in the manifest
    Validate(commands::validate::ValidateArgs),

    /// Obfuscate a value as a manifest field
    Mask(commands::mask::MaskArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_validate() {
        let cli = Cli::parse_from(["obfuscation-markers", "validate"]);
        assert_eq!(cli.manifest, "fields.toml");
        assert!(!cli.json_logs);
        assert!(matches!(cli.command, Commands::Validate(_)));
    }

    #[test]
    fn test_cli_parse_with_manifest() {
        let cli = Cli::parse_from(["obfuscation-markers", "--manifest", "custom.toml", "validate"]);
        assert_eq!(cli.manifest, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from([
            "obfuscation-markers",
            "--log-level",
            "debug",
            "--json-logs",
            "validate",
        ]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
        assert!(cli.json_logs);
    }

    #[test]
    fn test_cli_parse_mask() {
        let cli = Cli::parse_from([
            "obfuscation-markers",
            "mask",
            "--field",
            "password",
            "hunter2",
        ]);
        let Commands::Mask(args) = cli.command else {
            panic!("expected mask command");
        };
        assert_eq!(args.field, "password");
        assert_eq!(args.value, "hunter2");
        assert!(!args.text);
    }

    #[test]
    fn test_cli_mask_requires_field() {
        let result = Cli::try_parse_from(["obfuscation-markers", "mask", "hunter2"]);
        assert!(result.is_err());
    }
}
