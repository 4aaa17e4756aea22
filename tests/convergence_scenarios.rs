//! End-to-end convergence scenarios: raw reports through validation, the
//! engine, and the connectivity service.

use anyhow::Result;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use reachability::service::converge_reports;
use reachability::storage::{ConnectivityStore, InMemoryStore};
use reachability::{
    converge, ConnectState, ConnectivityService, ConvergeError, EngineLimits, Observation,
    ObservationReport,
};

fn reports(raw: serde_json::Value) -> Vec<ObservationReport> {
    serde_json::from_value(raw).unwrap()
}

#[test]
fn report_disconnected_event_alone() {
    let report = Observation::disconnected(2, "ch1");
    let batch = vec![report.clone()];

    assert_eq!(converge(&batch).unwrap(), &report);
}

#[test]
fn report_disconnected_event_over_stored_connect() {
    let store = Observation::connected(1, "ch1");
    let report = Observation::disconnected(2, "ch1");
    let batch = vec![store, report.clone()];

    assert_eq!(converge(&batch).unwrap(), &report);
}

#[test]
fn report_two_events_connected_channel_survives_disconnect() {
    let store = Observation::connected(1, "ch1");
    let report1 = Observation::connected(2, "ch2");
    let report2 = Observation::disconnected(3, "ch1");
    let batch = vec![store, report1.clone(), report2];

    assert_eq!(converge(&batch).unwrap(), &report1);
}

#[test]
fn report_two_events_latest_connect_wins() {
    let store = Observation::connected(1, "ch1");
    let report1 = Observation::disconnected(2, "ch1");
    let report2 = Observation::connected(3, "ch2");
    let batch = vec![store, report1, report2.clone()];

    assert_eq!(converge(&batch).unwrap(), &report2);
}

#[test]
fn wire_reports_converge_with_payload() {
    let batch = reports(json!([
        {"state": "connected", "eventTime": 1, "channel": "ch1"},
        {"state": "disconnected", "eventTime": 2, "channel": "ch1"},
        {"state": "connected", "eventTime": 3, "channel": "ch2", "payload": {"via": "proxy-7"}}
    ]));

    let verdict = converge_reports(batch, &EngineLimits::default()).unwrap();

    assert_eq!(verdict.state, ConnectState::Connected);
    assert_eq!(verdict.channel.as_str(), "ch2");
    assert_eq!(verdict.payload, Some(json!({"via": "proxy-7"})));
}

#[test]
fn wire_reports_with_blank_channel_are_rejected() {
    let batch = reports(json!([
        {"state": "connected", "eventTime": 1, "channel": "ch1"},
        {"state": "connected", "eventTime": 2, "channel": ""}
    ]));

    let err = converge_reports(batch, &EngineLimits::default()).unwrap_err();
    assert_eq!(err.to_string(), "observation 1 has a blank or missing channel");
}

#[test]
fn whitespace_distinct_channels_are_not_merged() {
    let batch = reports(json!([
        {"state": "connected", "eventTime": 5, "channel": " ch1"},
        {"state": "disconnected", "eventTime": 9, "channel": "ch1 "}
    ]));

    let verdict = converge_reports(batch, &EngineLimits::default()).unwrap();

    assert_eq!(verdict, Observation::connected(5, " ch1"));
}

#[test]
fn empty_batch_is_an_error_not_a_default() {
    assert_eq!(converge(&[]), Err(ConvergeError::EmptyBatch));
}

#[tokio::test]
async fn heartbeat_and_link_channels_over_several_windows() -> Result<()> {
    let store = Arc::new(InMemoryStore::new());
    let service = ConnectivityService::new(store.clone(), EngineLimits::default());
    let agent_id = Uuid::new_v4();

    // Window 1: link comes up.
    let outcome = service
        .report(agent_id, "tenant-1", vec![Observation::connected(100, "link")])
        .await?;
    assert_eq!(outcome.change.map(|c| c.current), Some(ConnectState::Connected));

    // Window 2: heartbeat reports up, then link drops in the same window.
    let outcome = service
        .report(
            agent_id,
            "tenant-1",
            vec![
                Observation::connected(150, "heartbeat"),
                Observation::disconnected(160, "link"),
            ],
        )
        .await?;
    assert_eq!(outcome.verdict, Observation::connected(150, "heartbeat"));
    assert!(outcome.change.is_none());

    // Window 3: heartbeat goes silent with a disconnect.
    let outcome = service
        .report(agent_id, "tenant-1", vec![Observation::disconnected(200, "heartbeat")])
        .await?;
    let change = outcome.change.expect("state flipped");
    assert_eq!(change.previous, Some(ConnectState::Connected));
    assert_eq!(change.current, ConnectState::Disconnected);

    let stored = store.get_connectivity(agent_id).await?.expect("verdict stored");
    assert_eq!(stored.verdict, Observation::disconnected(200, "heartbeat"));
    assert_eq!(stored.tenant_id, "tenant-1");

    Ok(())
}

#[tokio::test]
async fn agents_are_independent() -> Result<()> {
    let service = Arc::new(ConnectivityService::new(
        Arc::new(InMemoryStore::new()),
        EngineLimits::default(),
    ));

    let mut handles = Vec::new();
    for i in 0..8i64 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            let state = if i % 2 == 0 { "connected" } else { "disconnected" };
            let batch = vec![ObservationReport {
                state: state.to_string(),
                event_time: i,
                channel: Some("ch1".to_string()),
                payload: None,
            }];
            service.report_raw(Uuid::new_v4(), "tenant-1", batch).await
        }));
    }
    for handle in handles {
        handle.await??;
    }

    assert_eq!(service.list(Some(ConnectState::Connected)).await?.len(), 4);
    assert_eq!(service.list(Some(ConnectState::Disconnected)).await?.len(), 4);

    Ok(())
}
