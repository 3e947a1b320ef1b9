//! mathapi HTTP service binary.
//!
//! # Configuration
//!
//! - `PORT` - HTTP port (default: 3000), bound on all interfaces
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `METRICS_ENABLED` - Expose Prometheus metrics (default: false)
//! - `METRICS_PATH` - Metrics route (default: /metrics)

use std::net::SocketAddr;

use tracing::{info, warn};

use mathapi_service_shared::{
    init_logging, init_metrics, AppState, LoggingConfig, MetricsConfig, MetricsError,
    ServiceConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_config = LoggingConfig::from_env().with_service("mathapi");
    init_logging(&logging_config);

    let mut metrics_config = MetricsConfig::from_env();
    match init_metrics(&metrics_config) {
        Ok(()) | Err(MetricsError::Disabled) => {}
        Err(e) => {
            // Serve without the metrics route rather than fail startup.
            warn!(error = %e, "failed to initialize metrics, continuing without metrics");
            metrics_config.enabled = false;
        }
    }

    let config = ServiceConfig::from_env();
    let app = mathapi_service::router(AppState::default(), &metrics_config);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(addr = %addr, port = config.port, "mathapi server listening");
    info!(
        health = %format!("http://localhost:{}/health", config.port),
        get = "GET  /v4/?expr=<expression>&precision=<number>",
        post = r#"POST /v4/ with JSON body: {"expr": "<expression>", "precision": <number>}"#,
        metrics = metrics_config.enabled.then_some(metrics_config.path.as_str()),
        "endpoints available"
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
