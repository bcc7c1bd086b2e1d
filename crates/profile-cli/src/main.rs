mod cmd;
mod output;
mod prompt;
mod root;

use clap::{Parser, Subcommand};
use cmd::{config::ConfigSubcommand, run::RunArgs, ConfigArgs};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "sensation-profile",
    about = "Reconstruct end-to-end actuator command profiles from sensation client and server logs",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory holding the profile logs (default: current directory)
    #[arg(long, global = true, env = "SENSATION_PROFILE_DIR")]
    dir: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile client and server logs into a profile table
    Run(RunArgs),

    /// Inverse-map PWM values to logical intensities
    Map {
        /// PWM values as logged by set_pwm
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f64>,

        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Show or validate the effective configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let dir = root::resolve_dir(cli.dir.as_deref());

    let result = match cli.command {
        Commands::Run(args) => cmd::run::run(&dir, args, cli.json),
        Commands::Map { values, config } => cmd::map::run(&dir, &values, &config, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&dir, subcommand, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
