pub mod agent;
pub mod channel;
pub mod observation;

pub use agent::{AgentConnectivity, StatusChange};
pub use channel::ChannelId;
pub use observation::{Observation, ObservationReport};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

pub type AgentId = Uuid;
pub type TenantId = String;

/// Logical time of an observation. Only meaningful for ordering within one channel.
pub type EventTime = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectState {
    Connected,
    Disconnected,
}

impl ConnectState {
    pub fn as_str(&self) -> &str {
        match self {
            ConnectState::Connected => "connected",
            ConnectState::Disconnected => "disconnected",
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectState::Connected)
    }
}

impl fmt::Display for ConnectState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConnectState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        if tag.eq_ignore_ascii_case("connected") {
            Ok(ConnectState::Connected)
        } else if tag.eq_ignore_ascii_case("disconnected") {
            Ok(ConnectState::Disconnected)
        } else {
            Err(tag.to_string())
        }
    }
}
