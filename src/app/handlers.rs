use crate::app::response::rejection_response;
use crate::app::server::AppState;
use crate::domain::model::GenerationResult;
use crate::domain::ports::GenerationBackend;
use crate::utils::error::GatewayError;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

/// `POST /api/generate`
pub async fn generate_site<B: GenerationBackend + 'static>(
    State(state): State<AppState<B>>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!("Rejected request body: {}", rejection.body_text());
            return match rejection.status() {
                StatusCode::PAYLOAD_TOO_LARGE => rejection_response(
                    StatusCode::PAYLOAD_TOO_LARGE,
                    format!("Request body exceeds {} bytes.", state.body_limit_bytes),
                ),
                _ => rejection_response(
                    StatusCode::BAD_REQUEST,
                    GatewayError::InvalidPrompt.to_string(),
                ),
            };
        }
    };

    match state.gateway.generate_site(request.prompt.as_deref()).await {
        Ok(site) => Json::<GenerationResult>(site).into_response(),
        Err(e) => {
            if e.status_code().is_server_error() {
                tracing::error!(
                    "❌ Generation failed: {} (Category: {:?}, Severity: {:?})",
                    e,
                    e.category(),
                    e.severity()
                );
                tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            }
            e.into_response()
        }
    }
}
