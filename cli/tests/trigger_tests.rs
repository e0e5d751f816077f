// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use ecs_deployer::{BuildTrigger, TriggerError};
use mockito::Matcher;

#[tokio::test]
async fn test_kick_sends_branch_and_commit_as_query() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/production/create")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("branch_name".into(), "main".into()),
            Matcher::UrlEncoded("commit_hash".into(), "abc123".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"queryStringParameters":{"branch_name":"main","commit_hash":"abc123"}}"#)
        .expect(1)
        .create_async()
        .await;

    let trigger = BuildTrigger::new(format!("{}/production/create", server.url())).unwrap();
    let url = trigger.url("main", "abc123");
    let response = trigger.kick(&url).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.status.as_u16(), 200);
    assert!(response.body.contains("abc123"));
    assert!(response.error_for_status().is_ok());
}

#[tokio::test]
async fn test_non_success_status_fails_with_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/production/create")
        .match_query(Matcher::Any)
        .with_status(502)
        .with_body("Internal server error")
        .expect(1)
        .create_async()
        .await;

    let trigger = BuildTrigger::new(format!("{}/production/create", server.url())).unwrap();
    let url = trigger.url("main", "abc123");
    let response = trigger.kick(&url).await.unwrap();

    // Exactly one request: no retry on failure.
    mock.assert_async().await;
    match response.error_for_status() {
        Err(TriggerError::UnexpectedStatus { status, body }) => {
            assert_eq!(status.as_u16(), 502);
            assert_eq!(body, "Internal server error");
        }
        other => panic!("expected UnexpectedStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn test_redirect_is_not_followed() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/production/create")
        .match_query(Matcher::Any)
        .with_status(301)
        .with_header("location", "/elsewhere")
        .create_async()
        .await;

    let trigger = BuildTrigger::new(format!("{}/production/create", server.url())).unwrap();
    let response = trigger.kick(&trigger.url("dev", "1")).await.unwrap();

    assert_eq!(response.status.as_u16(), 301);
    assert!(response.error_for_status().is_err());
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_error() {
    let trigger = BuildTrigger::new("http://127.0.0.1:9/production/create").unwrap();
    let err = trigger.kick(&trigger.url("main", "abc123")).await.unwrap_err();

    assert!(matches!(err, TriggerError::Transport { .. }));
}
