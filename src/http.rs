//! HTTP transport module for the Brunel Engine relay
//!
//! Axum server exposing the interview chat, report analysis and health
//! endpoints. Every failure on the chat and analyze routes is logged here and
//! returned to the caller as a fixed `{ "error": ... }` body.

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::{
    clients::ModelClient,
    config::Config,
    error::{BrunelError, Result},
    extract::extract_json,
    prompts::{ANALYSIS_SYSTEM, INTERVIEW_COMPLETE_MARKER, INTERVIEW_SYSTEM, analysis_request},
    transcript::{ConversationTurn, format_transcript},
};

pub const CHAT_FAILURE: &str = "Failed to get response. Check your API key.";
pub const ANALYZE_FAILURE: &str = "Failed to generate analysis.";
pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";
pub const PAYLOAD_TOO_LARGE: &str = "Request body too large";

/// Shared state for HTTP server
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub client: Arc<dyn ModelClient>,
}

impl AppState {
    pub fn new(config: Config, client: Arc<dyn ModelClient>) -> Self {
        Self {
            config: Arc::new(config),
            client,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ConversationTurn>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub transcript: Vec<ConversationTurn>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub has_api_key: bool,
    pub model: String,
}

/// Flat error body; the message is fixed per route and never carries details.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: &'static str,
}

impl ApiError {
    fn internal(message: &'static str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message,
        }
    }

    /// Oversized bodies get 413; every other failure gets the route's generic 500.
    fn for_route(err: &BrunelError, message: &'static str) -> Self {
        match err {
            BrunelError::PayloadTooLarge => Self {
                status: StatusCode::PAYLOAD_TOO_LARGE,
                message: PAYLOAD_TOO_LARGE,
            },
            _ => Self::internal(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// Interview endpoint: relays the conversation so far and returns the next turn verbatim.
pub async fn chat_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ChatRequest>, JsonRejection>,
) -> std::result::Result<Json<ChatResponse>, ApiError> {
    match run_chat(&state, payload).await {
        Ok(response) => {
            if response.trim() == INTERVIEW_COMPLETE_MARKER {
                tracing::info!("Interview marked complete by the model");
            }
            Ok(Json(ChatResponse { response }))
        }
        Err(e) => {
            tracing::error!("Chat error: {}", e);
            Err(ApiError::for_route(&e, CHAT_FAILURE))
        }
    }
}

async fn run_chat(
    state: &AppState,
    payload: std::result::Result<Json<ChatRequest>, JsonRejection>,
) -> Result<String> {
    let Json(request) = payload.map_err(rejection_error)?;
    let text = state
        .client
        .complete(
            INTERVIEW_SYSTEM,
            &request.messages,
            state.config.model.chat_max_tokens,
        )
        .await?;
    Ok(text)
}

/// Report endpoint: summarises a finished interview into a JSON report.
pub async fn analyze_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<AnalyzeRequest>, JsonRejection>,
) -> std::result::Result<Json<Value>, ApiError> {
    match run_analysis(&state, payload).await {
        Ok(report) => Ok(Json(report)),
        Err(e) => {
            tracing::error!("Analysis error: {}", e);
            Err(ApiError::for_route(&e, ANALYZE_FAILURE))
        }
    }
}

async fn run_analysis(
    state: &AppState,
    payload: std::result::Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Value> {
    let Json(request) = payload.map_err(rejection_error)?;
    let prompt = analysis_request(&format_transcript(&request.transcript));
    let raw = state
        .client
        .complete(
            ANALYSIS_SYSTEM,
            &[ConversationTurn::user(prompt)],
            state.config.model.analysis_max_tokens,
        )
        .await?;

    extract_json(&raw).map_err(|e| {
        tracing::error!(raw_response = %raw, "Model output was not recoverable as JSON");
        BrunelError::from(e)
    })
}

/// Health check endpoint
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        has_api_key: state.config.has_api_key(),
        model: state.config.model.label.clone(),
    })
}

pub async fn method_not_allowed() -> ApiError {
    ApiError {
        status: StatusCode::METHOD_NOT_ALLOWED,
        message: METHOD_NOT_ALLOWED,
    }
}

fn rejection_error(rejection: JsonRejection) -> BrunelError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return BrunelError::PayloadTooLarge;
    }
    BrunelError::InvalidRequest {
        message: rejection.body_text(),
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    let static_dir = state.config.runtime.static_dir.clone();
    let body_limit = state.config.runtime.body_limit_bytes;

    Router::new()
        .route(
            "/api/chat",
            post(chat_handler).fallback(method_not_allowed),
        )
        .route(
            "/api/analyze",
            post(analyze_handler).fallback(method_not_allowed),
        )
        .route("/api/health", get(health_handler))
        .fallback_service(ServeDir::new(static_dir))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_http_server(state: AppState) -> Result<()> {
    let bind = state.config.runtime.http_bind;
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .map_err(|e| BrunelError::Internal {
            message: format!("Failed to bind HTTP listener on {bind}: {e}"),
        })?;

    tracing::info!("Starting HTTP server on {}", bind);

    axum::serve(listener, router(state)).await?;

    Ok(())
}
