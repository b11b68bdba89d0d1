//! Endorsement Network API server

use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use endorsement_api::db::schemas::{EndorsementDoc, ENDORSEMENT_COLLECTION};
use endorsement_api::db::MongoClient;
use endorsement_api::{config::Args, server, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    let log_level = args.log_level.clone();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("endorsement_api={},info", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("======================================");
    info!("  Endorsement Network API");
    info!("======================================");
    info!("Listen: {}", args.listen);
    info!("MongoDB: {}", args.mongodb_uri);
    info!("Database: {}", args.mongodb_db);
    info!("======================================");

    // Store connectivity is fatal at startup, no retry
    let mongo = match MongoClient::new(&args.mongodb_uri, &args.mongodb_db).await {
        Ok(client) => client,
        Err(e) => {
            error!("MongoDB connection failed: {}", e);
            std::process::exit(1);
        }
    };

    let endorsements = match mongo
        .collection::<EndorsementDoc>(ENDORSEMENT_COLLECTION)
        .await
    {
        Ok(col) => col,
        Err(e) => {
            error!("Failed to open endorsement collection: {}", e);
            std::process::exit(1);
        }
    };

    let state = Arc::new(AppState::new(args, mongo, endorsements));

    if let Err(e) = server::run(state).await {
        error!("Server error: {:?}", e);
        std::process::exit(1);
    }

    Ok(())
}
