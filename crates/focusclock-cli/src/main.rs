use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod context;

use context::Context;

#[derive(Parser)]
#[command(name = "focusclock", version, about = "Pomodoro focus timer")]
struct Cli {
    /// Directory holding focusclock.db and config.toml
    #[arg(long, global = true, value_name = "PATH")]
    data_dir: Option<PathBuf>,

    /// Keep settings and timer state in memory only
    #[arg(long, global = true)]
    no_persist: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the timer in the foreground
    Run(commands::run::RunArgs),
    /// Timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Phase durations and preferences
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(verbose: bool, configured: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::try_new(configured).unwrap_or_else(|_| EnvFilter::new("warn"))
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    let ctx = Context::new(cli.data_dir, cli.no_persist);
    init_tracing(cli.verbose, &ctx.config().logging.filter);
    ctx.report_startup();

    let result = match cli.command {
        Commands::Run(args) => commands::run::run(&ctx, args),
        Commands::Timer { action } => commands::timer::run(&ctx, action),
        Commands::Settings { action } => commands::settings::run(&ctx, action),
        Commands::Config { action } => commands::config::run(&ctx, action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
