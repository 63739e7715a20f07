use std::{net::SocketAddr, path::PathBuf};

use axum_server::Handle;
use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use dt_money::{
    dev_api::{DevApiState, build_dev_api_router, load_seed},
    graceful_shutdown,
};

/// An in-memory transactions API for developing dt money locally.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The port to serve the API from.
    #[arg(short, long, default_value_t = 3333)]
    port: u16,

    /// File path to a `db.json` file to seed the API with.
    #[arg(long)]
    db_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let seed = match &args.db_path {
        Some(path) => load_seed(path).expect("Could not load the seed file"),
        None => Vec::new(),
    };
    tracing::info!("Loaded {} transactions", seed.len());

    let router = build_dev_api_router(DevApiState::new(seed)).layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));
    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    tracing::info!("Transactions API listening on http://{addr}");
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .expect("Server stopped unexpectedly");
}
