//! wcfg - inspect and upgrade persisted widget configuration

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "wcfg")]
#[command(version)]
#[command(about = "Widget configuration tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upgrade a stored widget array to the current schema version
    Migrate {
        /// JSON file holding the widget array ('-' for stdin)
        #[arg(default_value = "-")]
        input: String,

        /// Write output to FILE instead of stdout
        #[arg(short = 'o', long)]
        output: Option<String>,

        /// Fail if any migration rule failed
        #[arg(long)]
        strict: bool,
    },

    /// Migrate, reconcile against widget templates, and evaluate watchers
    Hydrate {
        /// JSON file holding the widget array ('-' for stdin)
        #[arg(default_value = "-")]
        input: String,

        /// Write output to FILE instead of stdout
        #[arg(short = 'o', long)]
        output: Option<String>,

        /// Fail if any document produced diagnostics
        #[arg(long)]
        strict: bool,
    },

    /// Read setting values from one widget
    Get {
        /// JSON file holding the widget array ('-' for stdin)
        input: String,

        /// Widget name
        #[arg(short = 'w', long)]
        widget: String,

        /// Dot-separated group path, e.g. tabGroup.dimensions
        #[arg(short = 'g', long, default_value = "")]
        group: String,

        /// Leaf keys to read
        #[arg(required = true)]
        keys: Vec<String>,

        /// Read from interactions instead of props
        #[arg(long)]
        interactions: bool,

        /// Fall back to each node's default when it has no value
        #[arg(long)]
        defaults: bool,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "widget_config=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Migrate { input, output, strict } => {
            commands::migrate::execute(commands::migrate::MigrateArgs { input, output, strict })
        }
        Commands::Hydrate { input, output, strict } => {
            commands::hydrate::execute(commands::hydrate::HydrateArgs { input, output, strict })
        }
        Commands::Get {
            input,
            widget,
            group,
            keys,
            interactions,
            defaults,
        } => commands::get::execute(commands::get::GetArgs {
            input,
            widget,
            group,
            keys,
            interactions,
            defaults,
        }),
    }
}
