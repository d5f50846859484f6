//! HTTP server command
//!
//! Runs the todolists API against MongoDB, or against an in-process store
//! with `--memory`.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use todolists_server::db::mongo::{DEFAULT_COLLECTION, DEFAULT_MONGO_URI};
use todolists_server::{run_server, MemoryStore, MongoConfig, MongoStore, ServerConfig, TodoStore};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "TODOLISTS_BIND", default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    /// MongoDB connection string; its database is used when it names one
    #[arg(long, env = "MONGO_URI", default_value = DEFAULT_MONGO_URI)]
    pub mongo_uri: String,

    /// Collection holding the todo list documents
    #[arg(long, env = "TODOLISTS_COLLECTION", default_value = DEFAULT_COLLECTION)]
    pub collection: String,

    /// Keep lists in process memory instead of MongoDB (lost on exit)
    #[arg(long)]
    pub memory: bool,
}

impl ServeArgs {
    fn mongo_config(&self) -> MongoConfig {
        MongoConfig {
            uri: self.mongo_uri.clone(),
            collection: self.collection.clone(),
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    tracing::info!("Starting todolists server on {}", args.bind);

    let store: Arc<dyn TodoStore> = if args.memory {
        tracing::warn!("Using in-memory store - data is lost on shutdown");
        Arc::new(MemoryStore::new())
    } else {
        let store = MongoStore::connect(&args.mongo_config())
            .await
            .context("Failed to create MongoDB client")?;
        Arc::new(store)
    };

    let config = ServerConfig {
        bind_addr: args.bind,
    };

    // Run server (blocks until shutdown)
    run_server(store, config).await.context("Server error")?;

    Ok(())
}
