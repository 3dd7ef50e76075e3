use emble_app::{build_dashboard, config::Config, session_provider};
use emble_dashboard::{KpiStatus, SendOutcome, StalePolicy, DEFAULT_GREETING};
use emble_types::MaWindow;
use mockito::Matcher;
use serde_json::json;

fn config_for(server: &mockito::ServerGuard, session_file: &std::path::Path) -> Config {
    let mut config = Config::default();
    config.api.base_url = server.url();
    config.api.timeout_ms = Some(5_000);
    config.session.store_path = Some(session_file.to_path_buf());
    config.series.default_window = MaWindow::Twelve;
    config.series.stale_policy = StalePolicy::LatestRequestWins;
    config
}

#[test]
fn test_session_id_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default().session;
    config.store_path = Some(dir.path().join("session.json"));

    let first = session_provider(&config).session_id();
    let second = session_provider(&config).session_id();

    assert!(!first.is_detached());
    assert_eq!(first, second);
    assert!(dir.path().join("session.json").exists());
}

#[test]
fn test_session_without_persistence_is_not_written() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default().session;
    config.store_path = Some(dir.path().join("session.json"));
    config.persist = false;

    let provider = session_provider(&config);
    let id = provider.session_id();

    assert_eq!(provider.session_id(), id);
    assert!(!dir.path().join("session.json").exists());
}

#[tokio::test]
async fn test_dashboard_against_backend() {
    let dir = tempfile::tempdir().unwrap();
    let session_file = dir.path().join("session.json");
    let mut server = mockito::Server::new_async().await;

    let kpi = server
        .mock("GET", "/kpi/summary")
        .with_status(200)
        .with_body(
            r#"{"currency":"SEK","period":{"year":2024},
                "revenue_ytd":500000,"expenses_ytd":300000,"net_result_ytd":200000}"#,
        )
        .create_async()
        .await;
    let groups = server
        .mock("GET", "/account-groups")
        .with_status(200)
        .with_body(r#"{"groups":["Revenue"]}"#)
        .create_async()
        .await;
    let series = server
        .mock("GET", "/series/amount-by-group")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("group".into(), "Revenue".into()),
            Matcher::UrlEncoded("window".into(), "12".into()),
        ]))
        .with_status(200)
        .with_body(
            r#"{"series":[{"date":"2024-01","amount":40000,"amountMA":38000}],
                "meta":{"group":"Revenue","window":12}}"#,
        )
        .create_async()
        .await;

    let config = config_for(&server, &session_file);
    let session_id = session_provider(&config.session).session_id();

    let chat = server
        .mock("POST", "/chat")
        .match_body(Matcher::PartialJson(json!({
            "session_id": session_id.as_str(),
            "messages": [{"sender": "user", "text": "How is revenue?"}]
        })))
        .with_status(200)
        .with_body(r#"{"reply":"Up 8% on last year"}"#)
        .create_async()
        .await;

    let dashboard = build_dashboard(&config).unwrap();
    dashboard.init().await;

    assert_eq!(dashboard.kpi.snapshot().status, KpiStatus::Ready);
    let state = dashboard.series.snapshot();
    assert_eq!(state.selection.group.as_deref(), Some("Revenue"));
    assert_eq!(state.series[0].amount_ma, 38000.0);

    let transcript = dashboard.chat.snapshot().transcript;
    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript[0].text, DEFAULT_GREETING);

    assert_eq!(dashboard.chat.send_message("How is revenue?").await, SendOutcome::Replied);
    assert_eq!(dashboard.chat.snapshot().transcript[2].text, "Up 8% on last year");

    kpi.assert_async().await;
    groups.assert_async().await;
    series.assert_async().await;
    chat.assert_async().await;
}
