use anyhow::Context;
use clap::{Parser, Subcommand};
use configuration::{load_settings, Settings};
use database::{connect, run_migrations, VoteStore};
use std::net::SocketAddr;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// The main entry point for the voteboard application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file, if one exists.
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install the tracing subscriber")?;

    // Parse command-line arguments
    let cli = Cli::parse();

    // Execute the appropriate command
    match cli.command {
        Commands::Serve => handle_serve().await,
        Commands::InitDb => handle_init_db().await,
        Commands::CheckDb => handle_check_db().await,
    }
}

/// The tabs-versus-spaces voting backend.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server.
    Serve,
    /// Create the votes table if it does not exist yet.
    InitDb,
    /// Connect to the database and read the votes table back.
    CheckDb,
}

/// Loads and validates the settings. Any problem here is fatal: the process
/// refuses to serve traffic on a bad configuration.
fn startup_settings() -> anyhow::Result<Settings> {
    load_settings().context("Invalid configuration; refusing to start")
}

async fn handle_serve() -> anyhow::Result<()> {
    let settings = startup_settings()?;

    let pool = connect(&settings)
        .await
        .context("Failed to connect to the database")?;
    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let store = VoteStore::new(pool.clone());
    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    web_server::run_server(addr, store).await?;

    tracing::info!("Shutting down; closing the connection pool");
    pool.close().await;
    Ok(())
}

async fn handle_init_db() -> anyhow::Result<()> {
    let settings = startup_settings()?;

    let pool = connect(&settings)
        .await
        .context("Failed to connect to the database")?;

    tracing::info!("Creating 'votes' table");
    run_migrations(&pool)
        .await
        .context("Failed to create the votes table")?;

    let tally = VoteStore::new(pool.clone()).tally().await?;
    tracing::info!(
        tab_count = tally.tab_count,
        space_count = tally.space_count,
        "Votes table is ready"
    );

    pool.close().await;
    Ok(())
}

async fn handle_check_db() -> anyhow::Result<()> {
    let settings = startup_settings()?;

    let pool = connect(&settings)
        .await
        .context("Failed to connect to the database")?;

    tracing::info!("Querying 'votes' table");
    let votes = VoteStore::new(pool.clone()).all_votes().await?;
    for vote in &votes {
        tracing::info!(
            vote_id = vote.vote_id,
            candidate = %vote.candidate,
            time_cast = %vote.time_cast,
            "vote"
        );
    }
    tracing::info!(total = votes.len(), "Done");

    pool.close().await;
    Ok(())
}
