use crate::engine::partition::ChannelGroups;
use crate::types::Observation;

/// Last-writer-wins selection within one channel.
///
/// The observation with the greatest `event_time` wins; on equal times the
/// one that arrived later wins. Returns `None` only for an empty group.
pub fn resolve_channel<'a>(group: &[&'a Observation]) -> Option<&'a Observation> {
    let mut iter = group.iter().copied();
    let mut winner = iter.next()?;

    for candidate in iter {
        if candidate.event_time >= winner.event_time {
            winner = candidate;
        }
    }

    Some(winner)
}

/// One winner per channel, ordered by channel id.
pub fn resolve_all<'a>(groups: &ChannelGroups<'a>) -> Vec<&'a Observation> {
    groups
        .values()
        .filter_map(|group| resolve_channel(group))
        .collect()
}
