//! Endorsement network seeder
//!
//! Run once per environment reset: clears both collections, inserts the
//! member fixture, derives the endorsement edges, and bulk-inserts them.
//!
//! Usage:
//!   endorsement-seed --mongodb-uri mongodb://localhost:27017
//!
//! Environment variables:
//!   MONGODB_URI - MongoDB connection URI (default: mongodb://localhost:27017)
//!   MONGODB_DB - database name (default: endorsement_network)
//!   SEED_CONFIG - config fixture path (default: endorsement_network.config.json)
//!   SEED_MEMBERS - members fixture path (default: endorsement_network.members.json)
//!   SEED_INDIRECT - indirect links fixture path (default: endorsement_network.indirect.json)

use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use endorsement_api::db::MongoClient;
use endorsement_api::seed::{self, FixturePaths};

#[derive(Parser, Debug)]
#[command(name = "endorsement-seed")]
#[command(about = "Seed the endorsement network store from JSON fixtures")]
#[command(version)]
struct Args {
    /// MongoDB connection URI
    #[arg(long, env = "MONGODB_URI", default_value = "mongodb://localhost:27017")]
    mongodb_uri: String,

    /// MongoDB database name
    #[arg(long, env = "MONGODB_DB", default_value = "endorsement_network")]
    mongodb_db: String,

    /// Config fixture providing rootInternId
    #[arg(long, env = "SEED_CONFIG", default_value = "endorsement_network.config.json")]
    config: PathBuf,

    /// Members fixture
    #[arg(long, env = "SEED_MEMBERS", default_value = "endorsement_network.members.json")]
    members: PathBuf,

    /// Indirect links fixture (optional; missing file means no links)
    #[arg(long, env = "SEED_INDIRECT", default_value = "endorsement_network.indirect.json")]
    indirect: PathBuf,
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,endorsement_api=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    // Store connectivity is fatal, no retry
    let mongo = match MongoClient::new(&args.mongodb_uri, &args.mongodb_db).await {
        Ok(client) => client,
        Err(e) => {
            error!("MongoDB connection failed: {}", e);
            std::process::exit(1);
        }
    };

    let paths = FixturePaths {
        config: args.config,
        members: args.members,
        indirect: args.indirect,
    };

    match seed::run(&mongo, &paths).await {
        Ok(summary) => {
            info!(
                members = summary.member_count,
                endorsements = summary.endorsement_count,
                "Seed finished"
            );
        }
        Err(e) => {
            error!("Seeding failed: {}", e);
            std::process::exit(1);
        }
    }
}
