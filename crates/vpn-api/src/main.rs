use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use vpn_api::config::AppConfig;
use vpn_api::routes::api_router;
use vpn_api::state::AppState;
use vpn_infra::controller::InstanceController;
use vpn_infra::ec2::Ec2Compute;

#[tokio::main]
async fn main() {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let provider = Ec2Compute::from_env().await;
    tracing::info!(home_region = %provider.home_region(), "EC2 compute provider ready");

    let controller = Arc::new(InstanceController::new(
        Arc::new(provider),
        config.launch_ip_wait,
    ));

    let state = AppState {
        controller,
        config: config.clone(),
    };

    let app = api_router(state).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .expect("failed to bind listener");

    tracing::info!(addr = %config.listen_addr, "starting VPN instance API");

    axum::serve(listener, app).await.expect("server error");
}
