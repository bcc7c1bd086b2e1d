use crate::cmd::ConfigArgs;
use crate::output::print_json;
use clap::Subcommand;
use profile_core::config::WarnLevel;
use std::path::Path;

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Print the effective configuration
    Show {
        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Validate the config for common mistakes
    Validate {
        #[command(flatten)]
        config: ConfigArgs,
    },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(dir: &Path, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Show { config } => show(dir, &config, json),
        ConfigSubcommand::Validate { config } => validate(dir, &config, json),
    }
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

fn show(dir: &Path, args: &ConfigArgs, json: bool) -> anyhow::Result<()> {
    let config = args.resolve(dir)?;
    if json {
        print_json(&config)?;
    } else {
        print!("{}", config.to_yaml()?);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

fn validate(dir: &Path, args: &ConfigArgs, json: bool) -> anyhow::Result<()> {
    let config = args.resolve(dir)?;
    let warnings = config.validate();

    if json {
        let value = serde_json::json!({
            "warnings": warnings,
        });
        print_json(&value)?;
    } else if warnings.is_empty() {
        println!("Config is valid. No warnings.");
    } else {
        for w in &warnings {
            let prefix = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            println!("[{prefix}] {}", w.message);
        }
    }

    if config.has_errors() {
        anyhow::bail!("config validation found errors");
    }

    Ok(())
}
