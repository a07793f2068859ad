//! AdBoards API server binary.

use std::sync::Arc;

use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use adboards_core::files::PhotoStore;
use adboards_core::mail::LogMailer;

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "adboards_server", about = "AdBoards API server")]
struct Args {
    /// Port to listen on.
    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// PostgreSQL connection URL.
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "postgres://localhost:5432/adboards"
    )]
    database_url: String,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,adboards_api=debug,adboards_core=debug".parse().unwrap()),
        )
        .init();

    let args = Args::parse();

    info!(database_url = %args.database_url, port = args.port, "starting adboards_server");

    let pool = PgPoolOptions::new()
        .max_connections(args.max_connections)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(&args.database_url)
        .await?;

    info!("running database migrations");
    adboards_api::migrate(&pool).await?;

    let mut config = adboards_api::config::ApiConfig::from_env();
    config.bind_addr = format!("127.0.0.1:{}", args.port);
    config.database_url = args.database_url;

    let photos = PhotoStore::new(&config.photo_dir);
    photos.init().await?;

    let state = adboards_api::AppState {
        pool,
        config: config.clone(),
        photos,
        mailer: Arc::new(LogMailer),
    };

    let app = adboards_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "REST API listening");

    axum::serve(listener, app).await?;

    Ok(())
}
