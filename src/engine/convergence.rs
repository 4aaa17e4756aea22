use crate::engine::aggregator::aggregate;
use crate::engine::partition::partition;
use crate::engine::resolver::resolve_all;
use crate::error::ConvergeError;
use crate::types::{ConnectState, Observation};

/// Full outcome of one convergence pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Convergence<'a> {
    /// Last-writer-wins winner of every channel, ordered by channel id.
    pub winners: Vec<&'a Observation>,
    pub state: ConnectState,
    pub verdict: &'a Observation,
}

/// Reduces a batch of observations for one agent to its authoritative verdict.
///
/// The result is always one of the inputs. Fails only on an empty batch.
pub fn converge(observations: &[Observation]) -> Result<&Observation, ConvergeError> {
    converge_detailed(observations).map(|c| c.verdict)
}

pub fn converge_detailed(observations: &[Observation]) -> Result<Convergence<'_>, ConvergeError> {
    let groups = partition(observations)?;
    let winners = resolve_all(&groups);
    let (state, verdict) = aggregate(&winners)?;

    log::debug!(
        "converged {} observations over {} channels to {} on {} at {}",
        observations.len(),
        winners.len(),
        state,
        verdict.channel,
        verdict.event_time
    );

    Ok(Convergence {
        winners,
        state,
        verdict,
    })
}

/// Stateless handle over [`converge`], for callers that hold the engine as a value.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvergenceEngine;

impl ConvergenceEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn converge<'a>(&self, observations: &'a [Observation]) -> Result<&'a Observation, ConvergeError> {
        converge(observations)
    }

    pub fn converge_detailed<'a>(
        &self,
        observations: &'a [Observation],
    ) -> Result<Convergence<'a>, ConvergeError> {
        converge_detailed(observations)
    }
}
