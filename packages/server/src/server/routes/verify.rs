use axum::{
    extract::{rejection::JsonRejection, Extension},
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use verifier::VerificationResult;

use crate::server::{app::AppState, error::ApiError};

/// Shortest article accepted, in characters.
pub const MIN_ARTICLE_CHARS: usize = 10;

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub article_text: String,
}

impl VerifyRequest {
    fn validate(&self) -> Result<(), ApiError> {
        if self.article_text.chars().count() < MIN_ARTICLE_CHARS {
            return Err(ApiError::Validation(format!(
                "article_text must be at least {} characters",
                MIN_ARTICLE_CHARS
            )));
        }
        Ok(())
    }
}

/// Run the Reader → Researcher → Judge pipeline over the submitted article.
pub async fn verify_handler(
    Extension(state): Extension<AppState>,
    payload: Result<Json<VerifyRequest>, JsonRejection>,
) -> Result<Json<VerificationResult>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::Validation(e.body_text()))?;
    request.validate()?;

    let request_id = Uuid::new_v4();
    info!(request_id = %request_id, "Verification requested");

    let result = state
        .pipeline
        .verify_with_id(&request.article_text, request_id)
        .await?;

    Ok(Json(result))
}
