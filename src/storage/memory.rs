use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::storage::traits::ConnectivityStore;
use crate::types::{AgentConnectivity, AgentId, ConnectState};

#[derive(Clone)]
pub struct InMemoryStore {
    records: Arc<RwLock<HashMap<AgentId, AgentConnectivity>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn len(&self) -> Result<usize> {
        let records = self
            .records
            .read()
            .map_err(|_| anyhow!("connectivity store lock poisoned"))?;
        Ok(records.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConnectivityStore for InMemoryStore {
    async fn get_connectivity(&self, agent_id: AgentId) -> Result<Option<AgentConnectivity>> {
        let records = self
            .records
            .read()
            .map_err(|_| anyhow!("connectivity store lock poisoned"))?;
        Ok(records.get(&agent_id).cloned())
    }

    async fn save_connectivity(&self, record: &AgentConnectivity) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| anyhow!("connectivity store lock poisoned"))?;
        records.insert(record.agent_id, record.clone());
        Ok(())
    }

    async fn list_connectivity(&self, state: Option<ConnectState>) -> Result<Vec<AgentConnectivity>> {
        let records = self
            .records
            .read()
            .map_err(|_| anyhow!("connectivity store lock poisoned"))?;
        let mut listed: Vec<AgentConnectivity> = records
            .values()
            .filter(|r| state.map_or(true, |s| r.state() == s))
            .cloned()
            .collect();
        listed.sort_by_key(|r| r.agent_id);
        Ok(listed)
    }
}
