use std::time::Duration;

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, post},
};

use tokio::{
    net::TcpListener,
    signal::{
        ctrl_c,
        unix::{SignalKind, signal},
    },
};
use tower_http::cors::CorsLayer;
use tracing::info;

pub mod config;
mod error;
mod routes;
mod state;

use config::Config;
use routes::{
    payment_redirect, payment_webhook, staff_redeem, staff_scan, staff_stamp, submit_order,
};
use state::AppState;

pub async fn start_server(config: Config) {
    info!("Initializing state...");
    let port = config.port;
    let state = AppState::new(config).await;

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let app = Router::new()
        .route("/orders", post(submit_order))
        .route("/webhooks/payment", post(payment_webhook))
        .route("/payment/{outcome}", get(payment_redirect))
        .route("/staff/scan", post(staff_scan))
        .route("/staff/stamp", post(staff_stamp))
        .route("/staff/redeem", post(staff_redeem))
        .layer(cors)
        .with_state(state);

    let address = format!("0.0.0.0:{}", port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    info!("Server shutting down...");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
