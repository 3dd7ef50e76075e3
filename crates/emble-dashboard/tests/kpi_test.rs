mod support;

use emble_dashboard::{KpiStatus, KpiViewModel};
use std::sync::atomic::{AtomicUsize, Ordering};
use support::*;

#[tokio::test]
async fn test_load_replaces_snapshot() {
    let transport = ScriptedTransport::auto(|_, _, _| Ok(kpi_json(120000.0)));
    let kpi = KpiViewModel::new(api(&transport));

    assert_eq!(kpi.snapshot().summary, None);
    assert_eq!(kpi.snapshot().status, KpiStatus::Idle);

    kpi.load().await;

    let state = kpi.snapshot();
    assert_eq!(state.status, KpiStatus::Ready);
    assert_eq!(state.summary.unwrap().revenue_ytd, 120000.0);
    assert_eq!(transport.requests(), vec![("GET".to_string(), "/kpi/summary".to_string())]);
}

#[tokio::test]
async fn test_failure_leaves_null_snapshot() {
    let transport = ScriptedTransport::auto(|_, path, _| Err(status_error(path, 503)));
    let kpi = KpiViewModel::new(api(&transport));

    kpi.load().await;

    let state = kpi.snapshot();
    assert_eq!(state.summary, None);
    assert_eq!(state.status, KpiStatus::Unavailable);
    assert!(state.is_unavailable());
}

#[tokio::test]
async fn test_failure_keeps_prior_snapshot() {
    let calls = AtomicUsize::new(0);
    let transport = ScriptedTransport::auto(move |_, path, _| {
        if calls.fetch_add(1, Ordering::SeqCst) == 0 {
            Ok(kpi_json(500.0))
        } else {
            Err(status_error(path, 500))
        }
    });
    let kpi = KpiViewModel::new(api(&transport));

    kpi.load().await;
    kpi.load().await;

    let state = kpi.snapshot();
    assert_eq!(state.status, KpiStatus::Unavailable);
    assert_eq!(state.summary.as_ref().map(|s| s.revenue_ytd), Some(500.0));
    assert!(!state.is_unavailable());
}

#[tokio::test]
async fn test_malformed_summary_is_failure() {
    let transport = ScriptedTransport::auto(|_, _, _| Ok(serde_json::json!({"revenue": "lots"})));
    let kpi = KpiViewModel::new(api(&transport));

    kpi.load().await;

    assert!(kpi.snapshot().is_unavailable());
}

#[tokio::test]
async fn test_subscribers_see_loading_then_ready() {
    let (transport, mut requests) = ScriptedTransport::manual();
    let kpi = KpiViewModel::new(api(&transport));
    let mut rx = kpi.subscribe();

    let task = tokio::spawn({
        let kpi = kpi.clone();
        async move { kpi.load().await }
    });

    let pending = requests.recv().await.unwrap();
    assert_eq!(pending.path, "/kpi/summary");
    assert_eq!(rx.borrow_and_update().status, KpiStatus::Loading);

    pending.respond(kpi_json(1.0));
    task.await.unwrap();

    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().status, KpiStatus::Ready);
}
