//! Helpers shared by the HTTP integration tests.

use anyhow::Result;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use migration::{Migrator, MigratorTrait};
use platform_db::{DatabaseSettings, DbPool, connect};
use serde_json::Value;
use server::{config::AppConfig, http::build_router, state::AppState};
use tower::ServiceExt;

/// Router without a store, answering from fixtures.
pub fn demo_app() -> Router {
    build_router(AppState::new(None, AppConfig::default()))
}

/// Router backed by a migrated in-memory SQLite store.
pub async fn store_app() -> Result<Router> {
    Ok(store_with_pool().await?.0)
}

/// Like [`store_app`], also handing back the pool for direct setup.
pub async fn store_with_pool() -> Result<(Router, DbPool)> {
    let db = connect(&DatabaseSettings::new("sqlite::memory:")).await?;
    Migrator::up(&db, None).await?;
    let app = build_router(AppState::new(Some(db.clone()), AppConfig::default()));
    Ok((app, db))
}

/// Sends one request and returns the status with the decoded JSON body.
pub async fn call(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> Result<(StatusCode, Value)> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))?,
        None => builder.body(Body::empty())?,
    };
    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, value))
}
