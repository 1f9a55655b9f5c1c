use std::path::PathBuf;
use std::sync::Arc;

use arc_swap::ArcSwap;
use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use bytes::Bytes;
use log::{debug, error, info};
use serde::Serialize;
use serde_json::{Map, Number, Value};
use tower_http::cors::CorsLayer;

use crate::classifier::{ActivityZone, BpmRange};
use crate::error::ApiError;
use crate::filter::{filter_by_tempo, SongSummary};
use crate::library::{read_tracks, Library};

#[derive(Clone)]
pub struct AppState {
    /// Current table snapshot. Readers load it without locking; a reload
    /// swaps in a new snapshot and never mutates the old one.
    pub library: Arc<ArcSwap<Library>>,
    pub dataset_path: PathBuf,
}

impl AppState {
    pub fn new(library: Library, dataset_path: impl Into<PathBuf>) -> Self {
        Self {
            library: Arc::new(ArcSwap::from_pointee(library)),
            dataset_path: dataset_path.into(),
        }
    }
}

#[derive(Serialize)]
pub struct HeartRateResponse {
    pub message: &'static str,
    pub heart_rate: Number,
    pub bpm_range: BpmRange,
}

#[derive(Serialize)]
pub struct RecommendationResponse {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<Number>,
    pub bpm_range: BpmRange,
    pub songs: Vec<SongSummary>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub dataset: &'static str,
    pub tracks: usize,
}

#[derive(Serialize)]
pub struct ReloadResponse {
    pub message: &'static str,
    pub tracks: usize,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/heart_rate", post(receive_heart_rate))
        .route("/api/song_recommendations/bpm", post(recommend_by_bpm))
        .route("/api/song_recommendations/heart_rate", post(recommend_by_heart_rate))
        .route("/api/dataset/reload", post(reload_dataset))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// A missing body, invalid JSON and a non-object payload all look like
// "the field was not sent".
fn payload_object(body: &Bytes) -> Option<Map<String, Value>> {
    match serde_json::from_slice(body) {
        Ok(Value::Object(object)) => Some(object),
        _ => None,
    }
}

fn heart_rate_field(body: &Bytes) -> Result<Number, ApiError> {
    let payload = payload_object(body).ok_or(ApiError::MissingHeartRate)?;
    match payload.get("heart_rate") {
        None | Some(Value::Null) => Err(ApiError::MissingHeartRate),
        Some(Value::Number(heart_rate)) => Ok(heart_rate.clone()),
        Some(_) => Err(ApiError::InvalidHeartRate),
    }
}

fn bpm_range_field(body: &Bytes) -> Result<BpmRange, ApiError> {
    let payload = payload_object(body).ok_or(ApiError::MissingBpmRange)?;
    let bounds = match payload.get("bpm_range") {
        None | Some(Value::Null) => return Err(ApiError::MissingBpmRange),
        Some(Value::Array(bounds)) if bounds.len() == 2 => bounds,
        Some(_) => return Err(ApiError::InvalidBpmRange),
    };

    let min = bounds[0].as_f64().ok_or(ApiError::InvalidBpmRange)?;
    let max = bounds[1].as_f64().ok_or(ApiError::InvalidBpmRange)?;
    let range = BpmRange::new(min, max);
    if range.is_inverted() {
        return Err(ApiError::InvertedBpmRange { min, max });
    }
    Ok(range)
}

fn classify_reading(heart_rate: &Number) -> BpmRange {
    // Every JSON number converts; the fallback is unreachable in practice.
    let value = heart_rate.as_f64().unwrap_or(f64::NAN);
    let zone = ActivityZone::from_heart_rate(value);
    let range = zone.bpm_range();
    debug!("Received heart rate: {} bpm ({}) -> matching BPM: {}", heart_rate, zone, range);
    range
}

fn songs_in_range(state: &AppState, range: BpmRange) -> Result<Vec<SongSummary>, ApiError> {
    let library = state.library.load();
    filter_by_tempo(&library, range)
        .into_songs()
        .ok_or(ApiError::DatasetUnavailable)
}

// GET /health - Liveness plus dataset status
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let library = state.library.load();
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        dataset: if library.is_loaded() { "loaded" } else { "unavailable" },
        tracks: library.len(),
    })
}

// POST /api/heart_rate - Classify a heart rate into a BPM range
async fn receive_heart_rate(body: Bytes) -> Result<Json<HeartRateResponse>, ApiError> {
    let heart_rate = heart_rate_field(&body)?;
    let bpm_range = classify_reading(&heart_rate);

    Ok(Json(HeartRateResponse {
        message: "Heart rate received",
        heart_rate,
        bpm_range,
    }))
}

// POST /api/song_recommendations/bpm - Songs whose tempo lies in the given range
async fn recommend_by_bpm(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<RecommendationResponse>, ApiError> {
    let bpm_range = bpm_range_field(&body)?;
    let songs = songs_in_range(&state, bpm_range)?;

    Ok(Json(RecommendationResponse {
        message: "Song recommendations",
        heart_rate: None,
        bpm_range,
        songs,
    }))
}

// POST /api/song_recommendations/heart_rate - Classify, then recommend
async fn recommend_by_heart_rate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<RecommendationResponse>, ApiError> {
    let heart_rate = heart_rate_field(&body)?;
    let bpm_range = classify_reading(&heart_rate);
    let songs = songs_in_range(&state, bpm_range)?;

    Ok(Json(RecommendationResponse {
        message: "Song recommendations",
        heart_rate: Some(heart_rate),
        bpm_range,
        songs,
    }))
}

// POST /api/dataset/reload - Re-read the dataset and swap it in
async fn reload_dataset(State(state): State<AppState>) -> Result<Json<ReloadResponse>, ApiError> {
    let path = state.dataset_path.clone();
    info!("Reloading dataset from {}", path.display());

    let tracks = tokio::task::spawn_blocking(move || read_tracks(&path))
        .await
        .map_err(|e| {
            error!("Dataset reload task failed: {:?}", e);
            ApiError::ReloadAborted(e.to_string())
        })?
        .map_err(|e| {
            error!("Dataset reload failed, keeping current snapshot: {}", e);
            ApiError::from(e)
        })?;

    let count = tracks.len();
    state.library.store(Arc::new(Library::from_tracks(tracks)));
    info!("Dataset reloaded: {} tracks", count);

    Ok(Json(ReloadResponse {
        message: "Dataset reloaded",
        tracks: count,
    }))
}

