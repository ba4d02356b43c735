//! Token refresh, replay and teardown behavior.
//!
//! # Invariants
//! - Concurrent 401s share one refresh call and resume with the same token
//! - Every waiter is settled after success and after failure
//! - A request is replayed at most once
//! - A failed refresh clears the store and moves to `/login` unless exempt
//! - A 401 for an already rotated token replays without another refresh

mod common;

use std::time::Duration;

use common::*;
use maintdesk_config::constants::{KEY_ACCESS_TOKEN, KEY_EXPIRY, KEY_REFRESH_TOKEN, LOGIN_PATH};
use wiremock::matchers::{header, method, path, query_param};

async fn mount_equipment(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/Equipment"))
        .and(header("Authorization", bearer(REFRESHED_TOKEN).as_str()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("equipment/list_equipment.json")),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/Equipment"))
        .respond_with(ResponseTemplate::new(401))
        .mount(server)
        .await;
}

async fn mount_refresh(server: &MockServer, response: ResponseTemplate, expected: u64) {
    Mock::given(method("POST"))
        .and(path("/Authentication/RefreshToken"))
        .and(query_param("Token", "refresh-1"))
        .respond_with(response)
        .expect(expected)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_expired_token_is_refreshed_and_request_resumed() {
    let server = MockServer::start().await;
    mount_equipment(&server).await;
    mount_refresh(
        &server,
        ResponseTemplate::new(200).set_body_json(load_fixture("auth/refresh_success.json")),
        1,
    )
    .await;

    let h = harness(&server, "/equipment");
    seed_expired_session(&h.store, Some("refresh-1"));

    let equipment = h.client.list_equipment().await.unwrap();
    assert_eq!(equipment.len(), 3);

    assert_eq!(
        h.store.get(KEY_ACCESS_TOKEN).unwrap().as_deref(),
        Some(REFRESHED_TOKEN)
    );
    assert_eq!(
        h.store.get(KEY_REFRESH_TOKEN).unwrap().as_deref(),
        Some("refresh-token-rotated")
    );
    assert_eq!(
        h.store.get(KEY_EXPIRY).unwrap().as_deref(),
        Some("2099-01-01T01:00:00.000Z")
    );
    assert_eq!(h.navigator.current_path(), "/equipment");
    assert!(!h.client.session().is_refreshing());

    // Later requests carry the refreshed token directly.
    let again = h.client.list_equipment().await.unwrap();
    assert_eq!(again.len(), 3);
}

#[tokio::test]
async fn test_concurrent_unauthorized_requests_share_one_refresh() {
    let server = MockServer::start().await;
    mount_equipment(&server).await;
    mount_refresh(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(load_fixture("auth/refresh_success.json"))
            .set_delay(Duration::from_millis(500)),
        1,
    )
    .await;

    let h = harness(&server, "/equipment");
    seed_expired_session(&h.store, Some("refresh-1"));

    let calls = (0..8).map(|_| {
        let client = h.client.clone();
        async move { client.list_equipment().await }
    });
    let results = futures::future::join_all(calls).await;

    for result in results {
        assert_eq!(result.unwrap().len(), 3);
    }
    assert!(!h.client.session().is_refreshing());
    assert_eq!(
        h.store.get(KEY_ACCESS_TOKEN).unwrap().as_deref(),
        Some(REFRESHED_TOKEN)
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_single_flight_holds_on_multi_threaded_runtime() {
    let server = MockServer::start().await;
    mount_equipment(&server).await;
    mount_refresh(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(load_fixture("auth/refresh_success.json"))
            .set_delay(Duration::from_millis(500)),
        1,
    )
    .await;

    let h = harness(&server, "/tasks");
    seed_expired_session(&h.store, Some("refresh-1"));

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let client = h.client.clone();
            tokio::spawn(async move { client.list_equipment().await })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }
}

#[tokio::test]
async fn test_failed_refresh_rejects_every_waiter_and_tears_down() {
    let server = MockServer::start().await;
    mount_equipment(&server).await;
    mount_refresh(
        &server,
        ResponseTemplate::new(500).set_delay(Duration::from_millis(300)),
        1,
    )
    .await;

    let h = harness(&server, "/equipment");
    seed_expired_session(&h.store, Some("refresh-1"));

    let calls = (0..5).map(|_| {
        let client = h.client.clone();
        async move { client.list_equipment().await }
    });
    let results = futures::future::join_all(calls).await;

    for result in results {
        match result.unwrap_err() {
            ClientError::SessionExpired { cause, .. } => {
                assert_eq!(cause, RefreshError::Rejected { status: 500 });
            }
            other => panic!("expected SessionExpired, got {other:?}"),
        }
    }

    assert!(h.store.is_empty());
    assert_eq!(h.navigator.current_path(), LOGIN_PATH);
    assert!(!h.client.session().is_refreshing());
}

#[tokio::test]
async fn test_missing_refresh_token_tears_down_without_network_call() {
    let server = MockServer::start().await;
    mount_equipment(&server).await;
    mount_refresh(&server, ResponseTemplate::new(200), 0).await;

    let h = harness(&server, "/equipment");
    seed_expired_session(&h.store, None);

    let err = h.client.list_equipment().await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::SessionExpired {
            cause: RefreshError::NoRefreshToken,
            ..
        }
    ));
    assert!(err.is_auth_error());
    assert!(h.store.is_empty());
    assert_eq!(h.navigator.current_path(), LOGIN_PATH);
}

#[tokio::test]
async fn test_fresh_token_rejected_is_not_refreshed() {
    let server = MockServer::start().await;
    mount_equipment(&server).await;
    mount_refresh(&server, ResponseTemplate::new(200), 0).await;

    let h = harness(&server, "/equipment");
    seed_session(
        &h.store,
        "revoked-token",
        Some("refresh-1"),
        chrono::Utc::now() + chrono::TimeDelta::hours(1),
        "Technician",
    );

    let err = h.client.list_equipment().await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::SessionExpired {
            cause: RefreshError::NotApplicable,
            ..
        }
    ));
    // Nothing was refreshed, so nothing is torn down either.
    assert_eq!(
        h.store.get(KEY_ACCESS_TOKEN).unwrap().as_deref(),
        Some("revoked-token")
    );
    assert_eq!(
        h.store.get(KEY_REFRESH_TOKEN).unwrap().as_deref(),
        Some("refresh-1")
    );
    assert_eq!(h.navigator.current_path(), "/equipment");
    assert!(!h.client.session().is_refreshing());
}

#[tokio::test]
async fn test_late_unauthorized_after_refresh_replays_with_rotated_token() {
    let server = MockServer::start().await;
    mount_equipment(&server).await;

    Mock::given(method("GET"))
        .and(path("/Tasks"))
        .and(header("Authorization", bearer(REFRESHED_TOKEN).as_str()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("tasks/list_tasks.json")),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/Tasks"))
        .respond_with(ResponseTemplate::new(401).set_delay(Duration::from_millis(500)))
        .expect(1)
        .mount(&server)
        .await;
    mount_refresh(
        &server,
        ResponseTemplate::new(200).set_body_json(load_fixture("auth/refresh_success.json")),
        1,
    )
    .await;

    let h = harness(&server, "/equipment");
    seed_expired_session(&h.store, Some("refresh-1"));

    // Both go out with the stale token; the task 401 lands after the refresh settled.
    let (equipment, tasks) = tokio::join!(h.client.list_equipment(), h.client.list_tasks(None));

    assert_eq!(equipment.unwrap().len(), 3);
    assert!(tasks.is_ok(), "late 401 should replay, got {tasks:?}");
    assert_eq!(
        h.store.get(KEY_ACCESS_TOKEN).unwrap().as_deref(),
        Some(REFRESHED_TOKEN)
    );
    assert_eq!(h.navigator.current_path(), "/equipment");
}

#[tokio::test]
async fn test_replay_unauthorized_is_returned_without_second_retry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Tasks"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "message": "token revoked"
        })))
        .expect(2)
        .mount(&server)
        .await;
    mount_refresh(
        &server,
        ResponseTemplate::new(200).set_body_json(load_fixture("auth/refresh_success.json")),
        1,
    )
    .await;

    let h = harness(&server, "/tasks");
    seed_expired_session(&h.store, Some("refresh-1"));

    let err = h.client.list_tasks(None).await.unwrap_err();
    match err {
        ClientError::Unauthorized { message, .. } => assert_eq!(message, "token revoked"),
        other => panic!("expected Unauthorized, got {other:?}"),
    }
    // The refresh itself succeeded, so the session stays.
    assert_eq!(
        h.store.get(KEY_ACCESS_TOKEN).unwrap().as_deref(),
        Some(REFRESHED_TOKEN)
    );
    assert_eq!(h.navigator.current_path(), "/tasks");
}

#[tokio::test]
async fn test_refresh_failure_on_login_page_keeps_store() {
    let server = MockServer::start().await;
    mount_equipment(&server).await;
    mount_refresh(&server, ResponseTemplate::new(400), 1).await;

    let h = harness(&server, LOGIN_PATH);
    seed_expired_session(&h.store, Some("refresh-1"));

    let err = h.client.list_equipment().await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::SessionExpired {
            cause: RefreshError::Rejected { status: 400 },
            ..
        }
    ));
    assert_eq!(
        h.store.get(KEY_REFRESH_TOKEN).unwrap().as_deref(),
        Some("refresh-1")
    );
    assert_eq!(h.navigator.current_path(), LOGIN_PATH);
}

#[tokio::test]
async fn test_unauthorized_auth_endpoint_never_tears_down() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/Authentication/Login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    mount_refresh(&server, ResponseTemplate::new(200), 0).await;

    let h = harness(&server, "/equipment");
    seed_expired_session(&h.store, None);

    let password = secrecy::SecretString::new("wrong".to_string().into());
    let err = h
        .client
        .login("tech@example.com", &password)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::AuthFailed(_)));

    assert_eq!(
        h.store.get(KEY_ACCESS_TOKEN).unwrap().as_deref(),
        Some("stale-token")
    );
    assert_eq!(h.navigator.current_path(), "/equipment");
}

#[tokio::test]
async fn test_other_statuses_pass_through_untouched() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Equipment/99"))
        .respond_with(
            ResponseTemplate::new(404)
                .insert_header("X-Request-Id", "req-42")
                .set_body_json(serde_json::json!({"title": "Not Found"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_refresh(&server, ResponseTemplate::new(200), 0).await;

    let h = harness(&server, "/equipment");
    seed_expired_session(&h.store, Some("refresh-1"));

    let err = h.client.get_equipment(99).await.unwrap_err();
    match err {
        ClientError::ApiError {
            status,
            message,
            request_id,
            ..
        } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Not Found");
            assert_eq!(request_id.as_deref(), Some("req-42"));
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
    assert!(!h.store.is_empty());
}

#[tokio::test]
async fn test_undecorated_request_without_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Equipment"))
        .and(header("Authorization", "Bearer anything"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/Equipment"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let h = harness(&server, "/");
    let equipment = h.client.list_equipment().await.unwrap();
    assert!(equipment.is_empty());

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert!(!received[0].headers.contains_key("authorization"));
}
