use axum::{extract::Extension, Json};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    services: ServicesHealth,
}

#[derive(Serialize)]
pub struct ServicesHealth {
    gemini: &'static str,
    serper: &'static str,
    yellowcake: &'static str,
}

fn describe(configured: bool) -> &'static str {
    if configured {
        "configured"
    } else {
        "not configured"
    }
}

/// Health check endpoint
///
/// Reports which upstream services have credentials. Always 200: a missing
/// key only fails the requests that need it.
pub async fn health_handler(Extension(state): Extension<AppState>) -> Json<HealthResponse> {
    let services = state.services;

    Json(HealthResponse {
        status: "healthy",
        services: ServicesHealth {
            gemini: describe(services.gemini),
            serper: describe(services.serper),
            yellowcake: describe(services.yellowcake),
        },
    })
}
