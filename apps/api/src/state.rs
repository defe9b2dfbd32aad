use std::sync::{Arc, RwLock};

use anyhow::{anyhow, Result};

use crate::colleges::gateway::CollegeGateway;
use crate::colleges::store::RecordStore;
use crate::config::Config;
use crate::errors::AppError;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: RecordStore,
    pub config: Config,
    /// Swapped wholesale when a new credential is entered; never mutated in place.
    gateway: Arc<RwLock<CollegeGateway>>,
}

impl AppState {
    pub fn new(config: Config, store: RecordStore, gateway: CollegeGateway) -> Self {
        Self {
            store,
            config,
            gateway: Arc::new(RwLock::new(gateway)),
        }
    }

    /// Snapshot of the current gateway; the lock is not held across awaits.
    pub fn gateway(&self) -> Result<CollegeGateway, AppError> {
        self.gateway
            .read()
            .map(|g| g.clone())
            .map_err(|_| AppError::Internal(anyhow!("gateway lock poisoned")))
    }

    pub fn replace_gateway(&self, gateway: CollegeGateway) -> Result<(), AppError> {
        let mut slot = self
            .gateway
            .write()
            .map_err(|_| AppError::Internal(anyhow!("gateway lock poisoned")))?;
        *slot = gateway;
        Ok(())
    }
}

/// Builds the production gateway from config, with `api_key` as the credential.
pub fn build_gateway(config: &Config, api_key: Option<String>) -> Result<CollegeGateway> {
    let llm = LlmClient::new(api_key, config.structured_output)?;
    Ok(CollegeGateway::new(Arc::new(llm)))
}
