pub mod error;

use anyhow::{Context, Result};
use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, Multipart, State},
    http::HeaderValue,
    routing::{get, post},
    Json, Router,
};
use error::AppError;
use rank_core::extract::extract_resume_text;
use rank_core::{normalize, normalize_bytes, JobCriteria, Ranker, RankerConfig, Report, ReportRow};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[derive(Deserialize)]
pub struct RankRequest {
    pub job: JobCriteria,
    pub candidates: Vec<CandidateInput>,
    #[serde(default)]
    pub details: bool,
    #[serde(default)]
    pub top: Option<usize>,
}

#[derive(Deserialize)]
pub struct CandidateInput {
    #[serde(default)]
    pub id: Option<String>,
    /// Already-extracted resume text.
    pub text: String,
}

#[derive(Serialize)]
pub struct RankResponse {
    pub query: String,
    pub took_s: f64,
    pub total: usize,
    pub results: Vec<ReportRow>,
}

#[derive(Clone)]
pub struct AppState {
    pub ranker: Arc<Ranker>,
}

/// Startup settings. CORS and upload limit come from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub ranker: RankerConfig,
    pub max_upload_bytes: usize,
    pub cors_allow_origin: Option<String>,
}

impl ServerConfig {
    pub fn new(ranker: RankerConfig) -> Self {
        Self { ranker, max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES, cors_allow_origin: None }
    }

    pub fn from_env(ranker: RankerConfig) -> Result<Self> {
        let max_upload_bytes = match std::env::var("MAX_UPLOAD_BYTES") {
            Ok(v) => v.parse::<usize>().context("MAX_UPLOAD_BYTES must be a byte count")?,
            Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
        };
        Ok(Self { ranker, max_upload_bytes, cors_allow_origin: std::env::var("CORS_ALLOW_ORIGIN").ok() })
    }
}

pub fn build_app(config: ServerConfig) -> Result<Router> {
    let ranker = Ranker::new(config.ranker)?;
    let app_state = AppState { ranker: Arc::new(ranker) };

    // CORS: comma-separated origin list, or allow Any when unset/empty
    let origins: Vec<HeaderValue> = config
        .cors_allow_origin
        .as_deref()
        .unwrap_or("")
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect();
    let cors = if origins.is_empty() {
        CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
    } else {
        CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
    };

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/rank", post(rank_handler))
        .route("/rank/upload", post(upload_handler))
        .with_state(app_state)
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http());
    Ok(app)
}

pub async fn rank_handler(
    State(state): State<AppState>,
    payload: Result<Json<RankRequest>, JsonRejection>,
) -> Result<Json<RankResponse>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    let start = Instant::now();
    let names: Vec<String> = req
        .candidates
        .iter()
        .enumerate()
        .map(|(i, c)| c.id.clone().unwrap_or_else(|| format!("candidate-{}", i + 1)))
        .collect();
    let texts: Vec<String> = req.candidates.iter().map(|c| normalize(&c.text)).collect();
    respond(&state.ranker, &req.job, &names, &texts, req.details, req.top, start).map(Json)
}

/// Multipart form: `role`, `experience`, `skills` (comma list, repeatable),
/// optional `details`/`top`, and one file part per resume.
pub async fn upload_handler(State(state): State<AppState>, mut multipart: Multipart) -> Result<Json<RankResponse>, AppError> {
    let start = Instant::now();
    let mut job = JobCriteria::default();
    let mut details = false;
    let mut top: Option<usize> = None;
    let mut files: Vec<(String, Vec<u8>)> = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| AppError::InvalidInput(e.body_text()))? {
        if let Some(file_name) = field.file_name().map(str::to_string) {
            let bytes = field.bytes().await.map_err(|e| AppError::InvalidInput(e.body_text()))?;
            files.push((file_name, bytes.to_vec()));
            continue;
        }
        let name = field.name().unwrap_or_default().to_string();
        let value = field.text().await.map_err(|e| AppError::InvalidInput(e.body_text()))?;
        match name.as_str() {
            "role" => job.role = value.trim().to_string(),
            "experience" => job.experience = value.trim().to_string(),
            "skills" => job.skills.extend(value.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)),
            "details" => details = matches!(value.trim(), "true" | "1" | "on"),
            "top" => top = Some(value.trim().parse().map_err(|_| AppError::InvalidInput(format!("top must be a number, got {value:?}")))?),
            other => tracing::debug!(field = other, "ignoring form field"),
        }
    }

    // Extract every file before ranking starts; handles are awaited in upload order.
    let handles: Vec<_> = files
        .into_iter()
        .map(|(name, bytes)| {
            tokio::task::spawn_blocking(move || {
                let text = if name.to_ascii_lowercase().ends_with(".pdf") { extract_resume_text(&name, &bytes) } else { normalize_bytes(&bytes) };
                (name, text)
            })
        })
        .collect();
    let mut names = Vec::with_capacity(handles.len());
    let mut texts = Vec::with_capacity(handles.len());
    for handle in handles {
        let (name, text) = handle.await.map_err(|e| AppError::Internal(e.into()))?;
        names.push(name);
        texts.push(text);
    }

    respond(&state.ranker, &job, &names, &texts, details, top, start).map(Json)
}

fn respond(ranker: &Ranker, job: &JobCriteria, names: &[String], texts: &[String], details: bool, top: Option<usize>, start: Instant) -> Result<RankResponse, AppError> {
    if job.is_empty() {
        return Err(AppError::InvalidInput("no job criteria supplied".into()));
    }
    if texts.is_empty() {
        return Err(AppError::InvalidInput("no candidates supplied".into()));
    }
    let query = job.to_query();
    let ranking = ranker.score(&query, texts);
    let mut report = Report::build(&query, names, texts, &ranking, details);
    let total = report.rows.len();
    if let Some(k) = top { report.truncate(k); }
    tracing::info!(candidates = total, "ranked request");
    Ok(RankResponse { query, took_s: start.elapsed().as_secs_f64(), total, results: report.rows })
}
