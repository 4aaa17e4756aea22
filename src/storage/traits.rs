use anyhow::Result;
use async_trait::async_trait;

use crate::types::{AgentConnectivity, AgentId, ConnectState};

/// Persistence of per-agent connectivity verdicts.
///
/// Only the connectivity service talks to a store; the convergence engine never does.
#[async_trait]
pub trait ConnectivityStore: Send + Sync {
    async fn get_connectivity(&self, agent_id: AgentId) -> Result<Option<AgentConnectivity>>;
    async fn save_connectivity(&self, record: &AgentConnectivity) -> Result<()>;
    async fn list_connectivity(&self, state: Option<ConnectState>) -> Result<Vec<AgentConnectivity>>;
}
