use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AgentId, ChannelId, ConnectState, EventTime, Observation, TenantId};

/// The persisted connectivity verdict of one agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentConnectivity {
    pub agent_id: AgentId,
    pub tenant_id: TenantId,
    pub verdict: Observation,
    pub updated_at: DateTime<Utc>,
}

impl AgentConnectivity {
    pub fn new(agent_id: AgentId, tenant_id: TenantId, verdict: Observation) -> Self {
        Self {
            agent_id,
            tenant_id,
            verdict,
            updated_at: Utc::now(),
        }
    }

    pub fn state(&self) -> ConnectState {
        self.verdict.state
    }
}

/// Emitted when a report flips an agent between connected and disconnected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    pub agent_id: AgentId,
    pub tenant_id: TenantId,
    pub previous: Option<ConnectState>,
    pub current: ConnectState,
    pub channel: ChannelId,
    pub event_time: EventTime,
}

impl StatusChange {
    pub fn between(previous: Option<&AgentConnectivity>, current: &AgentConnectivity) -> Option<Self> {
        let previous_state = previous.map(AgentConnectivity::state);
        if previous_state == Some(current.state()) {
            return None;
        }

        Some(Self {
            agent_id: current.agent_id,
            tenant_id: current.tenant_id.clone(),
            previous: previous_state,
            current: current.state(),
            channel: current.verdict.channel.clone(),
            event_time: current.verdict.event_time,
        })
    }
}
