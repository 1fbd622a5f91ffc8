use axum::{extract::Extension, Json};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::server::app::AppState;

pub const API_VERSION: &str = "1.0.0";

#[derive(Serialize)]
pub struct RootResponse {
    message: String,
    status: &'static str,
    version: &'static str,
    endpoints: BTreeMap<&'static str, &'static str>,
}

/// Service banner listing the available endpoints.
pub async fn root_handler(Extension(state): Extension<AppState>) -> Json<RootResponse> {
    let endpoints = BTreeMap::from([
        ("POST /verify", "Verify an article for fake news"),
        ("GET /health", "Detailed health check"),
    ]);

    Json(RootResponse {
        message: format!("{} API", state.app_name),
        status: "online",
        version: API_VERSION,
        endpoints,
    })
}
