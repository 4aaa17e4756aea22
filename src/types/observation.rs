use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ChannelId, ConnectState, EventTime};

/// A connectivity report for one channel at one logical time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub state: ConnectState,
    pub event_time: EventTime,
    pub channel: ChannelId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl Observation {
    pub fn new(state: ConnectState, event_time: EventTime, channel: impl Into<ChannelId>) -> Self {
        Self {
            state,
            event_time,
            channel: channel.into(),
            payload: None,
        }
    }

    pub fn connected(event_time: EventTime, channel: impl Into<ChannelId>) -> Self {
        Self::new(ConnectState::Connected, event_time, channel)
    }

    pub fn disconnected(event_time: EventTime, channel: impl Into<ChannelId>) -> Self {
        Self::new(ConnectState::Disconnected, event_time, channel)
    }

    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn is_connected(&self) -> bool {
        self.state.is_connected()
    }
}

/// Unvalidated wire form of an observation, as delivered by listeners.
///
/// Turned into an [`Observation`] by [`crate::validation::validate_report`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationReport {
    pub state: String,
    pub event_time: EventTime,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub payload: Option<Value>,
}
