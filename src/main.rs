use anyhow::Result;
use clap::{Parser, Subcommand};
use configuration::{ServerOverrides, load_settings};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// The main entry point for the jokes service.
#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file, if there is one.
    // Both RUST_LOG and DATABASE_URL may come from it.
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Parse command-line arguments
    let cli = Cli::parse();
    let mut settings = load_settings()?;

    // Execute the appropriate command
    match cli.command.unwrap_or(Commands::Serve(ServeArgs::default())) {
        Commands::Serve(args) => {
            args.server.apply(&mut settings)?;
            web_server::run_server(settings).await?;
        }
        Commands::Migrate => {
            let pool = database::connect(&settings.database).await?;
            database::run_migrations(&pool).await?;
            pool.close().await;
        }
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A small HTTP service for jokes, their categories and their votes.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the schema if needed, then serve the HTTP API (the default).
    Serve(ServeArgs),
    /// Create the schema and exit.
    Migrate,
}

#[derive(Parser, Default)]
struct ServeArgs {
    #[command(flatten)]
    server: ServerOverrides,
}
