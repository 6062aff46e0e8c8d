//! StudyShare API - AWS Lambda Runtime

use lambda_http::{run, Error};
use tracing::info;

use studyshare_app::create_service;
use studyshare_common::{
    config::{Config, DEFAULT_LOG_FILTER},
    db,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .json()
        .without_time()
        .init();

    info!("Initializing StudyShare API Lambda");

    let config =
        Config::from_env().map_err(|e| Error::from(format!("Configuration error: {}", e)))?;

    let pool = db::connect(&config)
        .await
        .map_err(|e| Error::from(format!("Database error: {}", e)))?;

    info!("Database connection established");

    db::migrate(&pool)
        .await
        .map_err(|e| Error::from(format!("Migration error: {}", e)))?;

    let app = create_service(&config, pool);

    info!("StudyShare API Lambda ready to serve requests");

    run(app).await
}
