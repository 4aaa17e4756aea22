use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::EngineLimits;
use crate::engine::{converge, ConvergenceEngine};
use crate::storage::ConnectivityStore;
use crate::types::{
    AgentConnectivity, AgentId, ConnectState, Observation, ObservationReport, StatusChange, TenantId,
};
use crate::validation::validate_batch;

#[derive(Debug, Clone, PartialEq)]
pub struct ReportOutcome {
    pub verdict: Observation,
    /// Set when the agent's connectivity state flipped (or was first recorded).
    pub change: Option<StatusChange>,
    /// False when the new verdict equals the stored one and nothing was written.
    pub persisted: bool,
}

/// Runs the fetch, converge, persist cycle for agents reporting connectivity.
///
/// Reports for the same agent are applied one at a time; different agents
/// proceed independently.
pub struct ConnectivityService {
    store: Arc<dyn ConnectivityStore>,
    engine: ConvergenceEngine,
    limits: EngineLimits,
    agent_locks: Mutex<HashMap<AgentId, Arc<Mutex<()>>>>,
}

impl ConnectivityService {
    pub fn new(store: Arc<dyn ConnectivityStore>, limits: EngineLimits) -> Self {
        Self {
            store,
            engine: ConvergenceEngine::new(),
            limits,
            agent_locks: Mutex::new(HashMap::new()),
        }
    }

    pub async fn report(
        &self,
        agent_id: AgentId,
        tenant_id: impl Into<TenantId>,
        observations: Vec<Observation>,
    ) -> Result<ReportOutcome> {
        let lock = self.agent_lock(agent_id).await;
        let outcome = {
            let _guard = lock.lock().await;
            self.apply_report(agent_id, tenant_id.into(), observations).await
        };
        self.release_agent_lock(agent_id, lock).await;
        outcome
    }

    async fn apply_report(
        &self,
        agent_id: AgentId,
        tenant_id: TenantId,
        observations: Vec<Observation>,
    ) -> Result<ReportOutcome> {
        let previous = self.store.get_connectivity(agent_id).await?;

        let mut batch = Vec::with_capacity(observations.len() + 1);
        if let Some(record) = &previous {
            batch.push(record.verdict.clone());
        }
        batch.extend(observations);

        let verdict = self.engine.converge(&batch)?.clone();

        if previous.as_ref().map(|p| &p.verdict) == Some(&verdict) {
            log::debug!("agent {} verdict unchanged", agent_id);
            return Ok(ReportOutcome {
                verdict,
                change: None,
                persisted: false,
            });
        }

        let record = AgentConnectivity::new(agent_id, tenant_id, verdict.clone());
        self.store.save_connectivity(&record).await?;

        let change = StatusChange::between(previous.as_ref(), &record);
        if let Some(change) = &change {
            log::info!(
                "agent {} is now {} via {} at {}",
                agent_id,
                change.current,
                change.channel,
                change.event_time
            );
        }

        Ok(ReportOutcome {
            verdict,
            change,
            persisted: true,
        })
    }

    /// Validates raw reports, then applies them like [`Self::report`].
    pub async fn report_raw(
        &self,
        agent_id: AgentId,
        tenant_id: impl Into<TenantId>,
        reports: Vec<ObservationReport>,
    ) -> Result<ReportOutcome> {
        let observations = validate_batch(reports, &self.limits)?;
        self.report(agent_id, tenant_id, observations).await
    }

    pub async fn connectivity(&self, agent_id: AgentId) -> Result<Option<AgentConnectivity>> {
        self.store.get_connectivity(agent_id).await
    }

    pub async fn list(&self, state: Option<ConnectState>) -> Result<Vec<AgentConnectivity>> {
        self.store.list_connectivity(state).await
    }

    async fn agent_lock(&self, agent_id: AgentId) -> Arc<Mutex<()>> {
        let mut locks = self.agent_locks.lock().await;
        locks.entry(agent_id).or_default().clone()
    }

    /// Drops the agent's lock once no other report holds or awaits it.
    async fn release_agent_lock(&self, agent_id: AgentId, lock: Arc<Mutex<()>>) {
        let mut locks = self.agent_locks.lock().await;
        // One reference is ours, one is the map's.
        if Arc::strong_count(&lock) == 2 {
            locks.remove(&agent_id);
        }
    }
}

/// Validates and converges one standalone batch, with no stored verdict involved.
pub fn converge_reports(
    reports: Vec<ObservationReport>,
    limits: &EngineLimits,
) -> crate::Result<Observation> {
    let observations = validate_batch(reports, limits)?;
    Ok(converge(&observations)?.clone())
}
