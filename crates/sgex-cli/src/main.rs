//! SGeX routing CLI - debug the deployment-redirect resolution pipeline.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

/// SGeX routing debugger
#[derive(Parser, Debug)]
#[command(name = "sgex-route")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Route configuration file (falls back to the built-in component set)
    #[arg(short, long, global = true)]
    routes: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve one URL the way the 404 handler would
    Resolve {
        /// The URL or path to resolve
        url: String,
        /// Emit the resolution as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replay repeated resolutions of one URL against a shared session
    Simulate {
        /// The URL or path to resolve
        url: String,
        /// Number of resolution attempts
        #[arg(short = 'n', long, default_value_t = 8)]
        count: usize,
    },

    /// Resolve a URL, then restore context the way the SPA would
    Restore {
        /// The URL or path to resolve
        url: String,
        /// Emit the restored page context as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the known DAK components
    Components,
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("sgex={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let routes = cli.routes.as_deref();
    let result = match cli.command {
        Commands::Resolve { url, json } => commands::resolve(&url, routes, json),
        Commands::Simulate { url, count } => commands::simulate(&url, routes, count),
        Commands::Restore { url, json } => commands::restore(&url, routes, json),
        Commands::Components => commands::components(routes),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
