// College search: record store, sanitizer, budget filter, AI gateway and the
// orchestration that ties them to the dashboard actions.
// All LLM calls go through llm_client — no direct Gemini calls here.

pub mod advisor;
pub mod extract;
pub mod filter;
pub mod gateway;
pub mod handlers;
pub mod prompts;
pub mod sanitize;
pub mod store;
