use anyhow::Result;
use clap::{Parser, Subcommand};

/// larder - recipe action server behind a GraphQL engine
#[derive(Parser)]
#[command(name = "larder")]
#[command(about = "Actions, events and picture storage for recipes", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run migrations, then start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = larder::config::Config::load(cli.config)?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    larder::observability::init_observability(&config.observability)?;

    match cli.command {
        Commands::Serve { host, port } => larder::cli::serve(config, host, port).await,
        Commands::Migrate => larder::cli::migrate(&config).await,
        Commands::Reset => larder::cli::reset(&config).await,
    }
}
