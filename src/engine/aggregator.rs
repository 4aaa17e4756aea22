use crate::error::ConvergeError;
use crate::types::{ConnectState, Observation};

/// Availability-dominant merge: one connected channel makes the agent connected.
pub fn aggregate_state(winners: &[&Observation]) -> Result<ConnectState, ConvergeError> {
    if winners.is_empty() {
        return Err(ConvergeError::EmptyBatch);
    }

    if winners.iter().any(|w| w.is_connected()) {
        Ok(ConnectState::Connected)
    } else {
        Ok(ConnectState::Disconnected)
    }
}

/// Picks the observation that stands for the aggregate verdict.
///
/// Among the winners in `state`, the greatest `event_time` is chosen. Equal
/// times resolve to the smallest channel id.
pub fn representative<'a>(
    winners: &[&'a Observation],
    state: ConnectState,
) -> Option<&'a Observation> {
    winners
        .iter()
        .copied()
        .filter(|w| w.state == state)
        .reduce(|best, candidate| {
            let newer = candidate.event_time > best.event_time;
            let tie_on_smaller_channel =
                candidate.event_time == best.event_time && candidate.channel < best.channel;
            if newer || tie_on_smaller_channel {
                candidate
            } else {
                best
            }
        })
}

/// Aggregate state plus its representative, or `EmptyBatch` for no winners.
pub fn aggregate<'a>(
    winners: &[&'a Observation],
) -> Result<(ConnectState, &'a Observation), ConvergeError> {
    let state = aggregate_state(winners)?;
    // A winner in `state` exists by construction of `aggregate_state`.
    let verdict = representative(winners, state).ok_or(ConvergeError::EmptyBatch)?;
    Ok((state, verdict))
}
