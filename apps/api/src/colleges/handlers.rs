//! Axum route handlers for the Colleges API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::colleges::advisor::{
    compare_colleges, fetch_and_store, filter_colleges, recommend_college, CompareOutcome,
    FetchOutcome, FilterOutcome, RecommendOutcome,
};
use crate::errors::AppError;
use crate::models::college::{CollegeRecord, CollegeRow};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct FetchRequest {
    pub course: String,
    pub city: String,
    pub top_k: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct FilterRequest {
    pub budget: String,
}

/// Index of the row picked in the table, if any.
#[derive(Debug, Default, Deserialize)]
pub struct SelectionRequest {
    #[serde(default)]
    pub selection: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct CollegeListResponse {
    pub count: usize,
    pub colleges: Vec<CollegeRecord>,
    pub table: Vec<CollegeRow>,
    pub db_path: String,
}

#[derive(Debug, Serialize)]
pub struct FetchResponse {
    #[serde(flatten)]
    pub outcome: FetchOutcome,
    pub collection: CollegeListResponse,
}

async fn list_response(state: &AppState) -> CollegeListResponse {
    let colleges = state.store.read_all().await;
    let table = colleges
        .iter()
        .enumerate()
        .map(|(i, c)| CollegeRow::from_record(i, c))
        .collect();
    CollegeListResponse {
        count: colleges.len(),
        colleges,
        table,
        db_path: state.store.path().display().to_string(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/colleges
///
/// Reloads the whole collection from disk.
pub async fn handle_list_colleges(State(state): State<AppState>) -> Json<CollegeListResponse> {
    Json(list_response(&state).await)
}

/// POST /api/v1/colleges/fetch
///
/// Asks the model for colleges, sanitizes and stores them, then returns the
/// refreshed collection.
pub async fn handle_fetch(
    State(state): State<AppState>,
    Json(request): Json<FetchRequest>,
) -> Result<Json<FetchResponse>, AppError> {
    let top_k = request.top_k.unwrap_or(state.config.fetch_top_k);
    if top_k == 0 {
        return Err(AppError::Validation("top_k must be at least 1".to_string()));
    }

    let gateway = state.gateway()?;
    let outcome =
        fetch_and_store(&state.store, &gateway, &request.course, &request.city, top_k).await?;

    Ok(Json(FetchResponse {
        outcome,
        collection: list_response(&state).await,
    }))
}

/// POST /api/v1/colleges/filter
pub async fn handle_filter(
    State(state): State<AppState>,
    Json(request): Json<FilterRequest>,
) -> Result<Json<FilterOutcome>, AppError> {
    let colleges = state.store.read_all().await;
    Ok(Json(filter_colleges(&colleges, &request.budget)?))
}

/// POST /api/v1/colleges/compare
///
/// Compares the selected college, or every stored college when nothing is selected.
pub async fn handle_compare(
    State(state): State<AppState>,
    Json(request): Json<SelectionRequest>,
) -> Result<Json<CompareOutcome>, AppError> {
    let colleges = state.store.read_all().await;
    let gateway = state.gateway()?;
    Ok(Json(
        compare_colleges(&gateway, &colleges, request.selection).await,
    ))
}

/// POST /api/v1/colleges/recommend
pub async fn handle_recommend(
    State(state): State<AppState>,
    Json(request): Json<SelectionRequest>,
) -> Result<Json<RecommendOutcome>, AppError> {
    let colleges = state.store.read_all().await;
    let gateway = state.gateway()?;
    Ok(Json(
        recommend_college(&gateway, &colleges, request.selection).await?,
    ))
}
