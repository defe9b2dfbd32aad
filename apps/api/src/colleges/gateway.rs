//! AI Gateway — the three college prompts (fetch, compare, recommend) on top of
//! a `TextCompletion` service.
//!
//! Every operation degrades instead of failing: errors are logged and the caller
//! gets an empty list, `None`, or a fixed message.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::colleges::extract::{extract_array, extract_object};
use crate::colleges::prompts::{
    render, COMPARE_PROMPT_TEMPLATE, FETCH_PROMPT_TEMPLATE, RECOMMEND_PROMPT_TEMPLATE,
};
use crate::llm_client::{ResponseFormat, TextCompletion};
use crate::models::college::{CollegeRecord, Comparison};

pub const NO_RECOMMENDATION: &str = "No recommendation.";
pub const RECOMMENDATION_FAILED: &str = "Recommendation failed.";

#[derive(Clone)]
pub struct CollegeGateway {
    llm: Arc<dyn TextCompletion>,
}

impl CollegeGateway {
    pub fn new(llm: Arc<dyn TextCompletion>) -> Self {
        Self { llm }
    }

    /// Asks the model for up to `top_k` colleges and returns the raw JSON elements.
    pub async fn fetch_candidates(&self, course: &str, city: &str, top_k: usize) -> Vec<Value> {
        let (course, city) = (course.trim(), city.trim());
        if course.is_empty() || city.is_empty() || top_k == 0 {
            return Vec::new();
        }

        let top_k = top_k.to_string();
        let prompt = render(
            FETCH_PROMPT_TEMPLATE,
            &[("top_k", top_k.as_str()), ("course", course), ("city", city)],
        );

        let text = match self.llm.complete(&prompt, ResponseFormat::Json).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Fetch candidates failed: {e}");
                return Vec::new();
            }
        };

        match extract_array(&text) {
            Ok(candidates) => {
                debug!("Model returned {} candidates", candidates.len());
                candidates
            }
            Err(e) => {
                warn!("Fetch candidates returned unparseable JSON: {e}");
                Vec::new()
            }
        }
    }

    /// Asks the model to pick the single best college from `candidates`.
    pub async fn compare(&self, candidates: &[CollegeRecord]) -> Option<Comparison> {
        if candidates.is_empty() {
            return None;
        }

        let colleges_json = match serde_json::to_string(candidates) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize candidates for comparison: {e}");
                return None;
            }
        };
        let prompt = render(
            COMPARE_PROMPT_TEMPLATE,
            &[("colleges_json", colleges_json.as_str())],
        );

        let text = match self.llm.complete(&prompt, ResponseFormat::Json).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Compare failed: {e}");
                return None;
            }
        };

        let parsed = extract_object(&text)
            .and_then(|obj| serde_json::from_value::<Comparison>(Value::Object(obj)));
        match parsed {
            Ok(best) => Some(best),
            Err(e) => {
                warn!("Compare returned unusable JSON: {e}");
                None
            }
        }
    }

    /// Short free-text recommendation for one college.
    pub async fn recommend(&self, college: Option<&CollegeRecord>) -> String {
        let Some(college) = college.filter(|c| !c.is_empty()) else {
            return NO_RECOMMENDATION.to_string();
        };

        let college_json = match serde_json::to_string(college) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize college for recommendation: {e}");
                return RECOMMENDATION_FAILED.to_string();
            }
        };
        let prompt = render(
            RECOMMEND_PROMPT_TEMPLATE,
            &[("college_json", college_json.as_str())],
        );

        match self.llm.complete(&prompt, ResponseFormat::Text).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Recommend failed: {e}");
                RECOMMENDATION_FAILED.to_string()
            }
        }
    }
}
