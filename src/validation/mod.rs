use crate::config::EngineLimits;
use crate::error::ValidationError;
use crate::types::{ChannelId, ConnectState, Observation, ObservationReport};

/// Turns one raw report into an [`Observation`].
///
/// `index` is the report's position in its batch and only feeds error messages.
pub fn validate_report(index: usize, report: ObservationReport) -> Result<Observation, ValidationError> {
    let channel = report
        .channel
        .map(ChannelId::new)
        .filter(|c| !c.is_blank())
        .ok_or(ValidationError::BlankChannel { index })?;

    let state: ConnectState = report
        .state
        .parse()
        .map_err(|tag| ValidationError::UnknownState { index, tag })?;

    Ok(Observation {
        state,
        event_time: report.event_time,
        channel,
        payload: report.payload,
    })
}

/// Validates a whole batch; the first malformed report rejects it.
pub fn validate_batch(
    reports: Vec<ObservationReport>,
    limits: &EngineLimits,
) -> Result<Vec<Observation>, ValidationError> {
    if reports.len() > limits.max_batch_observations {
        return Err(ValidationError::BatchTooLarge {
            len: reports.len(),
            max: limits.max_batch_observations,
        });
    }

    reports
        .into_iter()
        .enumerate()
        .map(|(index, report)| {
            validate_report(index, report).inspect_err(|e| log::warn!("rejecting batch: {}", e))
        })
        .collect()
}
