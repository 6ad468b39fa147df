//! REST API handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use rapidmq_core::RecognizedUtterance;
use rapidmq_voice::DispatchError;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ApiState;

/// Response wrapper for consistent API format.
#[derive(Serialize)]
struct ApiResponse<T: Serialize> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            error: None,
        })
    }
}

fn error_response(msg: &str, status: StatusCode) -> impl IntoResponse {
    (
        status,
        Json(ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(msg.to_string()),
        }),
    )
}

fn dispatch_error_status(err: &DispatchError) -> StatusCode {
    match err {
        DispatchError::UnrecognizedCommand { .. } => StatusCode::NOT_FOUND,
        DispatchError::CaptureMismatch { .. } | DispatchError::EmptyCapture { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
    }
}

/// GET /api/health
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"ok": true}))
}

/// GET /api/metrics
pub async fn latest_metrics(State(state): State<ApiState>) -> impl IntoResponse {
    let dataset = state.latest.borrow().clone();
    ApiResponse::ok(dataset)
}

/// GET /api/panels/health
pub async fn health_panel(State(state): State<ApiState>) -> impl IntoResponse {
    ApiResponse::ok(state.panels.health.clone())
}

/// GET /api/panels/cluster
pub async fn cluster_panel(State(state): State<ApiState>) -> impl IntoResponse {
    ApiResponse::ok(state.panels.cluster.clone())
}

#[derive(Serialize)]
struct TemplateInfo {
    id: &'static str,
    slots: Vec<&'static str>,
}

/// GET /api/voice/templates
pub async fn voice_templates(State(state): State<ApiState>) -> impl IntoResponse {
    let templates: Vec<TemplateInfo> = state
        .router
        .grammar()
        .templates()
        .map(|t| TemplateInfo {
            id: t.id(),
            slots: t.slots().to_vec(),
        })
        .collect();
    ApiResponse::ok(templates)
}

/// POST /api/voice
pub async fn dispatch_utterance(
    State(state): State<ApiState>,
    Json(utterance): Json<RecognizedUtterance>,
) -> impl IntoResponse {
    match state.router.dispatch(&utterance).await {
        Ok(outcome) => ApiResponse::ok(outcome).into_response(),
        Err(e) => error_response(&e.to_string(), dispatch_error_status(&e)).into_response(),
    }
}

#[derive(Debug, Deserialize)]
pub struct TextCommand {
    pub text: String,
}

/// POST /api/voice/text
pub async fn dispatch_text(
    State(state): State<ApiState>,
    Json(req): Json<TextCommand>,
) -> impl IntoResponse {
    let Some(utterance) = state.recognizer.recognize(&req.text) else {
        debug!(text = %req.text, "no template matched");
        let e = DispatchError::UnrecognizedCommand {
            template_id: req.text.trim().to_string(),
        };
        return error_response(&e.to_string(), dispatch_error_status(&e)).into_response();
    };
    dispatch_utterance(State(state), Json(utterance))
        .await
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_errors_map_to_status() {
        assert_eq!(
            dispatch_error_status(&DispatchError::UnrecognizedCommand {
                template_id: "x".to_string()
            }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            dispatch_error_status(&DispatchError::CaptureMismatch {
                template_id: "x".to_string(),
                expected: 1,
                got: 0,
            }),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            dispatch_error_status(&DispatchError::EmptyCapture {
                template_id: "x".to_string(),
                slot: "name".to_string(),
            }),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
