//! Orchestration: turns a dashboard action plus the loaded collection into a
//! display-ready result, routing through the store, filter and gateway.

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::colleges::filter::{filter_by_budget, parse_budget};
use crate::colleges::gateway::CollegeGateway;
use crate::colleges::sanitize::sanitize;
use crate::colleges::store::RecordStore;
use crate::errors::AppError;
use crate::models::college::{CollegeRecord, Comparison};

pub const NO_COMPARISON: &str = "No result.";
pub const SELECT_FIRST: &str = "Select a college first.";

#[derive(Debug, Serialize)]
pub struct FetchOutcome {
    pub fetched: usize,
    pub stored: usize,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct FilterOutcome {
    pub count: usize,
    pub message: String,
    pub colleges: Vec<CollegeRecord>,
}

#[derive(Debug, Serialize)]
pub struct CompareOutcome {
    pub best: Option<Comparison>,
    pub output: String,
}

#[derive(Debug, Serialize)]
pub struct RecommendOutcome {
    pub recommendation: Option<String>,
    pub output: String,
}

/// Fetch pipeline: ask the model, sanitize each usable candidate, append it.
pub async fn fetch_and_store(
    store: &RecordStore,
    gateway: &CollegeGateway,
    course: &str,
    city: &str,
    top_k: usize,
) -> Result<FetchOutcome, AppError> {
    if course.trim().is_empty() || city.trim().is_empty() {
        return Err(AppError::Validation(
            "Enter Course and City first.".to_string(),
        ));
    }

    let candidates = gateway.fetch_candidates(course, city, top_k).await;
    let fetched = candidates.len();
    let mut stored = 0;

    for candidate in candidates {
        let raw = match candidate {
            Value::Object(raw) => raw,
            other => {
                warn!("Skipping non-object candidate from model: {other}");
                continue;
            }
        };
        let record = sanitize(raw);
        if !record.name().is_some_and(|n| !n.trim().is_empty()) {
            warn!("Skipping candidate without a name");
            continue;
        }
        store.append(record).await?;
        stored += 1;
    }

    let message = if stored == 0 {
        "No AI results. Check API key & internet.".to_string()
    } else {
        info!("Stored {stored} colleges for '{course}' in '{city}'");
        "Fetched & stored successfully.".to_string()
    };

    Ok(FetchOutcome {
        fetched,
        stored,
        message,
    })
}

/// Validates the typed budget, then filters. Invalid input is an error, distinct
/// from an empty match.
pub fn filter_colleges(
    records: &[CollegeRecord],
    budget_text: &str,
) -> Result<FilterOutcome, AppError> {
    let budget = parse_budget(budget_text)
        .ok_or_else(|| AppError::Validation("Enter numeric budget.".to_string()))?;

    let colleges = filter_by_budget(records, budget);
    Ok(FilterOutcome {
        count: colleges.len(),
        message: format!("{} colleges found.", colleges.len()),
        colleges,
    })
}

/// Candidate set for comparison: the selected record when the index is valid,
/// otherwise the whole collection.
pub fn select_candidates(records: &[CollegeRecord], selection: Option<usize>) -> &[CollegeRecord] {
    selection
        .and_then(|i| records.get(i..=i))
        .unwrap_or(records)
}

pub async fn compare_colleges(
    gateway: &CollegeGateway,
    records: &[CollegeRecord],
    selection: Option<usize>,
) -> CompareOutcome {
    let best = gateway.compare(select_candidates(records, selection)).await;
    let output = match &best {
        Some(b) => format!("Best: {}\nReason: {}", b.name, b.reason),
        None => NO_COMPARISON.to_string(),
    };
    CompareOutcome { best, output }
}

/// Recommends the selected college. No selection is reported, not an error.
pub async fn recommend_college(
    gateway: &CollegeGateway,
    records: &[CollegeRecord],
    selection: Option<usize>,
) -> Result<RecommendOutcome, AppError> {
    let Some(index) = selection else {
        return Ok(RecommendOutcome {
            recommendation: None,
            output: SELECT_FIRST.to_string(),
        });
    };

    let college = records
        .get(index)
        .ok_or_else(|| AppError::NotFound(format!("College {index} not found")))?;

    let text = gateway.recommend(Some(college)).await;
    Ok(RecommendOutcome {
        recommendation: Some(text.clone()),
        output: text,
    })
}
