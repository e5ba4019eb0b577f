use clap::Parser;
use colored::*;
use portfolio_server::actors::{portfolio, PortfolioActor, PortfolioArgs, PortfolioConfig, PortfolioMessage};
use portfolio_server::cli::Cli;
use portfolio_server::github::GitHubClient;
use portfolio_server::loader::{Loader, LoaderConfig};
use portfolio_server::prefs::PreferenceStore;
use portfolio_server::server::{start_server, AppState};
use std::time::{Duration, Instant};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let cli = Cli::parse();

    println!("{}", "GitHub Portfolio Server".bold().green());
    println!("{}\n", "=".repeat(50).dimmed());

    let client = GitHubClient::with_base_url(&cli.username, &cli.api_base, &cli.user_agent)?;

    let config = PortfolioConfig {
        search_debounce: Duration::from_millis(cli.search_debounce_ms),
        loader: LoaderConfig {
            commit_repo_limit: cli.commit_repo_limit,
        },
    };

    let args = PortfolioArgs {
        loader: Loader::new(client, config.loader.clone()),
        prefs: PreferenceStore::new(&cli.prefs_path),
        config,
    };

    let actor = PortfolioActor::spawn(args)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to start portfolio actor: {}", e))?;

    println!("✅ Portfolio for {} (API: {})", cli.username.cyan(), cli.api_base);

    let state = AppState {
        portfolio: actor.clone(),
        start_time: Instant::now(),
    };
    let addr = format!("{}:{}", cli.bind, cli.port);

    println!("📡 Serving on http://{}", addr);
    println!("\nPress Ctrl+C to stop the server\n");

    let server = tokio::spawn(async move {
        if let Err(e) = start_server(state, &addr).await {
            error!("HTTP server failed: {}", e);
        }
    });

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            println!("\n🛑 Shutting down server...");
        }
        _ = server => {
            eprintln!("{}", "HTTP server exited unexpectedly".red());
        }
    }

    match portfolio::stats(&actor, Duration::from_secs(5)).await {
        Ok(stats) => {
            println!("\n📊 Final Statistics:");
            println!("Intents processed: {}", stats.intents_processed);
            println!("Loads completed: {}", stats.loads_completed);
            println!("Debounced search inputs: {}", stats.debounced_inputs);
            if stats.uses_fallback {
                println!("{}", "Fallback data was in use".yellow());
            }
        }
        Err(e) => {
            eprintln!("Failed to get final statistics: {}", e);
        }
    }

    actor
        .send_message(PortfolioMessage::Shutdown)
        .map_err(|e| anyhow::anyhow!("Failed to shutdown portfolio actor: {:?}", e))?;

    tokio::time::sleep(Duration::from_millis(200)).await;
    println!("✅ Server stopped");

    Ok(())
}
