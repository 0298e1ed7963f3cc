use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use lemma_types::normalize_word;
use serde::{Deserialize, Serialize};
use suffix_lemmatizer::{LemmaSource, Lemmatizer};
use thiserror::Error;

#[derive(Clone)]
pub struct AppState {
    pub lemmatizer: Arc<Lemmatizer>,
    pub max_batch_size: usize,
}

#[derive(Deserialize)]
pub struct LemmatizeQuery {
    pub word: Option<String>,
}

#[derive(Deserialize)]
pub struct BatchRequest {
    pub words: Vec<String>,
}

#[derive(Serialize)]
pub struct LemmaResponse {
    word: String,
    lemma: String,
    source: LemmaSource,
}

#[derive(Serialize)]
pub struct BatchResponse {
    lemmas: Vec<String>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/v1/lemmatize", get(lemmatize).post(lemmatize_batch))
        .with_state(state)
}

async fn healthz() -> impl IntoResponse {
    "ok"
}

async fn lemmatize(
    State(state): State<AppState>,
    Query(params): Query<LemmatizeQuery>,
) -> Result<Json<LemmaResponse>, ApiError> {
    let word = params.word.as_deref().map(normalize_word).unwrap_or_default();
    if word.is_empty() {
        return Err(ApiError::bad_request("word is required"));
    }

    let analysis = state.lemmatizer.analyze(&word);
    Ok(Json(LemmaResponse {
        word: analysis.word,
        lemma: analysis.lemma,
        source: analysis.source,
    }))
}

async fn lemmatize_batch(
    State(state): State<AppState>,
    Json(request): Json<BatchRequest>,
) -> Result<Json<BatchResponse>, ApiError> {
    if request.words.len() > state.max_batch_size {
        return Err(ApiError::bad_request(format!(
            "at most {} words per request",
            state.max_batch_size
        )));
    }

    let lemmas = request
        .words
        .iter()
        .map(|word| state.lemmatizer.lemmatize(&normalize_word(word)))
        .collect();
    Ok(Json(BatchResponse { lemmas }))
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    fn bad_request<T: Into<String>>(msg: T) -> Self {
        ApiError::BadRequest(msg.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => {
                let body = Json(ErrorResponse { error: msg });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
        }
    }
}
