use distributed_calc::compiler::ids::MonotonicIdGenerator;
use distributed_calc::config::Config;
use distributed_calc::scheduler::handlers::api_router;
use distributed_calc::scheduler::orchestrator::Scheduler;
use distributed_calc::storage::memory::MemoryStore;
use distributed_calc::worker::agent::WorkerPool;

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::watch;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = Config::from_env();

    let mut bind_addr: SocketAddr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let mut worker_count = config.computing_power;

    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--bind" => {
                bind_addr = args[i + 1].parse()?;
                i += 2;
            }
            "--workers" => {
                worker_count = args[i + 1].parse()?;
                i += 2;
            }
            "--help" => {
                eprintln!("Usage: {} [--bind <addr:port>] [--workers <n>]", args[0]);
                eprintln!("Example: {} --bind 127.0.0.1:8080 --workers 4", args[0]);
                std::process::exit(0);
            }
            _ => {
                i += 1;
            }
        }
    }

    tracing::info!("Starting orchestrator on {}", bind_addr);

    // 1. Shared state:
    let store = Arc::new(MemoryStore::new());
    let ids = Arc::new(MonotonicIdGenerator::new());
    let scheduler = Scheduler::new(store, ids, config);

    // 2. HTTP router:
    let app = api_router(scheduler);

    // 3. Worker pool, polling our own task endpoint:
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let pool = WorkerPool::new(format!("http://{}", bind_addr), worker_count);
    pool.start(shutdown_rx);

    // 4. Serve until Ctrl+C, then signal the pool to stop:
    tracing::info!("HTTP server listening on {}", bind_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down");
            let _ = shutdown_tx.send(true);
        })
        .await?;

    Ok(())
}
