use actix_web::{web, App, HttpServer};
use clap::Parser;
use scout::api::{self, AppState};
use scout::cli::{
    commands::{Cli, Commands},
    run_cli,
};
use scout::config::AppConfig;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    if !matches!(cli.command, Commands::Serve) {
        if let Err(e) = run_cli(cli.command).await {
            eprintln!("{}", e);
            std::process::exit(1);
        }
        return Ok(());
    }

    info!("Starting Scout agent server...");

    let config = match AppConfig::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if config.search.api_key.is_none() {
        warn!("PERPLEXITY_API_KEY is not set; web searches will fail until it is configured");
    }

    let state = match AppState::from_config(&config) {
        Some(s) => s,
        None => {
            error!(
                "Failed to initialize LLM provider '{}' from configuration",
                config.llm.provider
            );
            std::process::exit(1);
        }
    };

    let host = config.server.host.clone();
    let port = config.server.port;

    info!("Server listening on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(api::configure)
    })
    .bind((host, port))?
    .run()
    .await
}
