mod client;
mod commands;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use eventcal_core::EventId;
use eventcal_core::config::EventCalConfig;
use tracing_subscriber::EnvFilter;

use crate::client::Client;
use crate::commands::EventArgs;

#[derive(Parser)]
#[command(name = "eventcal")]
#[command(about = "Browse and edit the events stored by an eventcal server")]
struct Cli {
    /// Server URL (defaults to client.server_url from the config file)
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all events by start date
    List,
    /// Show one event in detail
    Show { id: EventId },
    /// Create an event
    New {
        #[command(flatten)]
        event: EventArgs,
    },
    /// Change an event; omitted fields keep their value
    Edit {
        id: EventId,

        #[command(flatten)]
        event: EventArgs,
    },
    /// Delete an event
    Delete {
        id: EventId,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show a month as a calendar grid
    ///
    /// The grid is built locally from the fetched events, so
    /// recurrence.enforce_recurrence_end comes from this machine's config,
    /// not the server's.
    Month {
        /// Month to show (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },
}

/// Diagnostics go to stderr; quiet unless RUST_LOG asks for more
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = EventCalConfig::load()?;

    let server_url = cli.server.as_deref().unwrap_or(&config.client.server_url);
    let client = Client::connect(server_url).await?;

    match cli.command {
        Commands::List => commands::list::run(&client).await,
        Commands::Show { id } => commands::show::run(&client, id).await,
        Commands::New { event } => commands::new::run(&client, event).await,
        Commands::Edit { id, event } => commands::edit::run(&client, id, event).await,
        Commands::Delete { id, yes } => commands::delete::run(&client, id, yes).await,
        Commands::Month { month } => {
            commands::month::run(&client, month.as_deref(), &config.expand_options()).await
        }
    }
}
