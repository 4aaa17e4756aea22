use std::collections::BTreeMap;

use crate::error::ConvergeError;
use crate::types::{ChannelId, Observation};

/// Observations of one batch grouped by channel, in arrival order within each group.
pub type ChannelGroups<'a> = BTreeMap<&'a ChannelId, Vec<&'a Observation>>;

pub fn partition(observations: &[Observation]) -> Result<ChannelGroups<'_>, ConvergeError> {
    if observations.is_empty() {
        return Err(ConvergeError::EmptyBatch);
    }

    let mut groups: ChannelGroups<'_> = BTreeMap::new();
    for observation in observations {
        groups
            .entry(&observation.channel)
            .or_default()
            .push(observation);
    }

    Ok(groups)
}
