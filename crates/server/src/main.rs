use std::net::SocketAddr;

use axum::{
    extract::{Path, Query},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use shared::protocol::{
    ApiMessageResponse, EndpointIndex, HealthResponse, HelloResponse, WelcomeResponse, HEALTHY,
};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;

use config::load_settings;

const SERVICE_NAME: &str = "Hello World API";
const BACKEND_NAME: &str = "FastAPI";
const FRONTEND_NAME: &str = "Vue 3.js";
const SOURCE_NAME: &str = "FastAPI Backend";

#[derive(Debug, Deserialize)]
struct MessageQuery {
    name: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = load_settings();
    let app = build_router();

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, service = SERVICE_NAME, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/hello", get(hello_world))
        .route("/hello/:name", get(hello_name))
        .route("/api/message", get(api_message))
        .route("/health", get(health))
        .layer(CorsLayer::very_permissive())
}

/// Local wall-clock time, ISO-8601 without offset.
fn now_timestamp() -> String {
    chrono::Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

async fn root() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to Hello World API!".into(),
        timestamp: now_timestamp(),
        endpoints: EndpointIndex {
            hello: "/hello".into(),
            personalized: "/hello/{name}".into(),
            api_message: "/api/message".into(),
        },
    })
}

async fn hello_world() -> Json<HelloResponse> {
    Json(HelloResponse {
        message: "Hello, World!".into(),
        name: None,
        timestamp: now_timestamp(),
        source: SOURCE_NAME.into(),
    })
}

async fn hello_name(Path(name): Path<String>) -> Json<HelloResponse> {
    Json(HelloResponse {
        message: format!("Hello, {name}!"),
        name: Some(name),
        timestamp: now_timestamp(),
        source: SOURCE_NAME.into(),
    })
}

async fn api_message(Query(q): Query<MessageQuery>) -> Json<ApiMessageResponse> {
    let name = q.name.as_deref().filter(|name| !name.is_empty());
    info!(personalized = name.is_some(), "api message requested");
    let message = match name {
        Some(name) => format!("Hello, {name}! Welcome to our Vue 3 + FastAPI demo!"),
        None => "Hello, World! This message comes from FastAPI backend.".to_string(),
    };

    Json(ApiMessageResponse {
        success: true,
        message,
        timestamp: now_timestamp(),
        backend: BACKEND_NAME.into(),
        frontend: FRONTEND_NAME.into(),
    })
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HEALTHY.into(),
        timestamp: Some(now_timestamp()),
        service: Some(SERVICE_NAME.into()),
    })
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
