use axum::{Router, routing};
use cdw_planner::api::{handle_webhook, root};
use cdw_planner::github::GitHubFileReader;
use cdw_planner::logging::{FileLogger, setup_logging};
use cdw_planner::planner::PlanEvent;
use cdw_planner::sink::ChannelSink;
use cdw_planner::{AppState, PlannerConfig, load_config};
use std::sync::Arc;
use tracing::{error, info};

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8888";
const DEFAULT_CONFIG_PATH: &str = "planner_config.toml";

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let bind_address =
        std::env::var("BIND_ADDRESS").unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string());
    let config_path =
        std::env::var("PLANNER_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    let config: PlannerConfig = match load_config(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let file_logger = config.log_dir.clone().map(FileLogger::new);
    let _log_guard = match setup_logging(file_logger.as_ref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Logging setup error: {}", e);
            std::process::exit(1);
        }
    };

    let reader = match GitHubFileReader::new(&config.github) {
        Ok(reader) => reader,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let (sink, mut operations) = ChannelSink::new();
    tokio::spawn(async move {
        while let Some(operation) = operations.recv().await {
            info!(
                "Workshop operation: {} '{}'",
                operation.operation, operation.folder_info.full_folder
            );
        }
    });

    let planner = PlanEvent::new(Arc::new(reader), config.github.branch.clone());
    let state = Arc::new(AppState {
        config,
        planner,
        sink: Arc::new(sink),
    });

    let app = Router::new()
        .route("/", routing::get(root))
        .route("/webhook", routing::post(handle_webhook))
        .with_state(state);

    info!("Listening on {}", bind_address);
    info!("Using config at {:?}", config_path);
    let listener = match tokio::net::TcpListener::bind(&bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", bind_address, e);
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
    }
}
