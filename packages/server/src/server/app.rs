//! Application setup and server configuration.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use verifier::{
    ContentExtractor, GeminiGenerator, Pipeline, SerperSearcher, TextGenerator, WebSearcher,
    YellowcakeExtractor,
};

use crate::config::Config;
use crate::server::routes::{health_handler, root_handler, verify_handler};

/// Pipeline over type-erased collaborators, so the router does not care
/// whether it runs against live services or fakes.
pub type DynPipeline =
    Pipeline<Arc<dyn TextGenerator>, Arc<dyn WebSearcher>, Arc<dyn ContentExtractor>>;

/// Which upstream services have an API key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServiceStatus {
    pub gemini: bool,
    pub serper: bool,
    pub yellowcake: bool,
}

impl ServiceStatus {
    pub fn from_config(config: &Config) -> Self {
        Self {
            gemini: config.gemini_credentials().is_configured(),
            serper: config.serper_credentials().is_configured(),
            yellowcake: config.yellowcake_credentials().is_configured(),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub app_name: Arc<str>,
    pub services: ServiceStatus,
    pub pipeline: Arc<DynPipeline>,
}

impl AppState {
    pub fn new(app_name: impl Into<Arc<str>>, services: ServiceStatus, pipeline: DynPipeline) -> Self {
        Self {
            app_name: app_name.into(),
            services,
            pipeline: Arc::new(pipeline),
        }
    }

    /// Wire the live Gemini, Serper and Yellowcake clients from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            config.app_name.as_str(),
            ServiceStatus::from_config(config),
            build_pipeline(config)?,
        ))
    }
}

/// Build the pipeline against the live services.
pub fn build_pipeline(config: &Config) -> Result<DynPipeline> {
    let generator =
        GeminiGenerator::with_credentials(config.gemini_credentials(), config.gemini_model.as_str())
            .context("Failed to create Gemini client")?;

    let searcher = SerperSearcher::with_credentials(config.serper_credentials())
        .context("Failed to create Serper client")?;

    let extractor = YellowcakeExtractor::with_credentials(config.yellowcake_credentials())
        .context("Failed to create Yellowcake client")?;

    Ok(Pipeline::new(
        Arc::new(generator) as Arc<dyn TextGenerator>,
        Arc::new(searcher) as Arc<dyn WebSearcher>,
        Arc::new(extractor) as Arc<dyn ContentExtractor>,
        config.pipeline_config(),
    ))
}

/// Build the Axum application router
pub fn build_app(state: AppState) -> Router {
    // CORS configuration - any origin, the browser extension calls from arbitrary pages
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/verify", post(verify_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(vars: &[(&str, &str)]) -> Config {
        Config::from_lookup(|name| {
            vars.iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.to_string())
        })
        .unwrap()
    }

    #[test]
    fn test_service_status_from_credentials() {
        let status = ServiceStatus::from_config(&config(&[
            ("GEMINI_API_KEY", "g-key"),
            ("YELLOWCAKE_API_KEY", "   "),
        ]));

        assert_eq!(
            status,
            ServiceStatus {
                gemini: true,
                serper: false,
                yellowcake: false,
            }
        );
    }

    #[test]
    fn test_state_builds_without_keys() {
        let state = AppState::from_config(&config(&[("APP_NAME", "Checker")])).unwrap();
        assert_eq!(&*state.app_name, "Checker");
        assert_eq!(state.services, ServiceStatus::default());
    }
}
