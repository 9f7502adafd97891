use axum::{
    Router,
    routing::get,
};
use distributed_cache::group::Group;
use distributed_cache::routing::ring::DEFAULT_REPLICAS;
use distributed_cache::routing::router::PeerRouter;
use distributed_cache::transport::handlers::{
    handle_api_get, handle_peer_get, handle_peer_get_missing_key, handle_stats,
};
use distributed_cache::transport::protocol::{DEFAULT_BASE_PATH, ENDPOINT_API, ENDPOINT_STATS};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        eprintln!(
            "Usage: {} --bind <addr:port> [--peer <url>]... [--data-dir <path>]",
            args[0]
        );
        eprintln!("Example: {} --bind 127.0.0.1:8001", args[0]);
        eprintln!(
            "Example: {} --bind 127.0.0.1:8002 --peer http://127.0.0.1:8001 --peer http://127.0.0.1:8002",
            args[0]
        );

        std::process::exit(1);
    }

    let mut bind_addr: Option<SocketAddr> = None;
    let mut peers: Vec<String> = vec![];
    let mut data_dir = PathBuf::from("./data");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--bind" => {
                bind_addr = Some(args[i + 1].parse()?);
                i += 2;
            }
            "--peer" => {
                peers.push(args[i + 1].clone());
                i += 2;
            }
            "--data-dir" => {
                data_dir = PathBuf::from(&args[i + 1]);
                i += 2;
            }
            _ => {
                i += 1;
            }
        }
    }

    let bind_addr = bind_addr.expect("--bind is required");

    let budget_bytes = std::env::var("CACHE_BUDGET_BYTES")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(64 * 1024 * 1024);

    let replicas = std::env::var("RING_REPLICAS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(DEFAULT_REPLICAS);

    let base_path =
        std::env::var("CACHE_BASE_PATH").unwrap_or_else(|_| DEFAULT_BASE_PATH.to_string());

    tracing::info!("Starting cache node on {}", bind_addr);
    tracing::info!("Source directory: {}", data_dir.display());
    if peers.is_empty() {
        tracing::info!("No peers configured, running standalone");
    } else {
        tracing::info!("Peers: {:?}", peers);
    }

    // 1. The group: a file-backed namespace. A miss reads `{data-dir}/{key}`.
    let group = Group::new("files", budget_bytes, move |key: String| {
        let dir = data_dir.clone();
        async move {
            if key.contains('/') || key.contains('\\') || key.contains("..") {
                anyhow::bail!("invalid key: {}", key);
            }
            tracing::info!("Loading {} from source directory", key);
            let bytes = tokio::fs::read(dir.join(&key)).await?;
            Ok(bytes)
        }
    });

    // 2. Peer routing: this node's identity is its own base URL.
    let host = format!("http://{}", bind_addr);
    let router = Arc::new(PeerRouter::new(host, &base_path, replicas));
    if !peers.is_empty() {
        router.set_peers(&peers);
    }
    group.register_peers(router.clone());

    // 3. HTTP routes: peer surface under the base path, client API, stats.
    let peer_routes = Router::new()
        .route("/:group/:key", get(handle_peer_get))
        .route("/:group", get(handle_peer_get_missing_key));

    let app = Router::new()
        .nest(&format!("/{}", base_path.trim_matches('/')), peer_routes)
        .route(&format!("{}/:group/:key", ENDPOINT_API), get(handle_api_get))
        .route(ENDPOINT_STATS, get(handle_stats));

    tracing::info!("Cache node listening on {}", bind_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
