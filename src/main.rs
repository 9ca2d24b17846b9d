use clap::Parser;
use spoonsearch::{
    api::{handlers::AppState, routes},
    cli::{Cli, Commands},
    config::Settings,
    spoonacular::SpoonacularClient,
    Error, Result,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    // Silently ignore if file doesn't exist
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,spoonsearch=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::from_env()?;
    settings.validate()?;

    // Handle commands
    match cli.command {
        Commands::Serve { port, host } => {
            serve(settings, port, host).await?;
        }
        Commands::Search {
            query,
            cuisine,
            page,
        } => {
            spoonsearch::cli::commands::search(&settings, &query, cuisine, page).await?;
        }
        Commands::Fridge { ingredients, limit } => {
            spoonsearch::cli::commands::fridge(&settings, &ingredients, limit).await?;
        }
        Commands::Show { recipe_id } => {
            spoonsearch::cli::commands::show(&settings, recipe_id).await?;
        }
    }

    Ok(())
}

async fn serve(mut settings: Settings, port: Option<u16>, host: Option<String>) -> Result<()> {
    // Override settings with CLI arguments
    if let Some(port) = port {
        settings.server.port = port;
    }
    if let Some(host) = host {
        settings.server.host = host;
    }

    info!("Starting Spoonsearch server");
    info!("Upstream API: {}", settings.spoonacular.base_url);
    info!("Server: {}:{}", settings.server.host, settings.server.port);

    // Initialize the upstream client
    let client = Arc::new(SpoonacularClient::new(settings.spoonacular.clone())?);

    // Create application state
    let state = AppState {
        client,
        settings: settings.clone(),
    };

    // Create router with rate limiting
    let app = routes::create_router(state, &settings);

    // Start server
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::Internal(format!("Failed to bind to {addr}: {e}")))?;

    println!("\n========================================");
    println!("Spoonsearch Server");
    println!("========================================");
    println!("Status: Running");
    println!("Address: http://{addr}");
    println!("Upstream: {}", settings.spoonacular.base_url);
    println!("\nAPI Endpoints:");
    println!("  GET  /api/search");
    println!("  GET  /api/fridge");
    println!("  GET  /api/recipes/:id");
    println!("\nPress Ctrl+C to stop");
    println!("========================================\n");

    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::Internal(format!("Server error: {e}")))?;

    info!("Shutting down...");
    Ok(())
}
