use httpmock::prelude::*;
use order_relay::core::{ChunkSender, Dialect};
use order_relay::TelegramClient;
use serde_json::json;
use std::time::{Duration, Instant};

#[tokio::test]
async fn send_chunk_posts_full_envelope() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/botTEST/sendMessage").json_body_partial(
            r#"{
                "chat_id": "42",
                "text": "salom",
                "parse_mode": "MarkdownV2",
                "disable_web_page_preview": true
            }"#,
        );
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({"ok": true, "result": {"message_id": 7}}));
    });

    let client = TelegramClient::new(&server.base_url(), "TEST");
    let attempt = client
        .send_chunk("42", "salom", Dialect::MarkdownV2, Duration::from_secs(2))
        .await;

    mock.assert();
    assert!(attempt.http_ok);
    assert!(attempt.tg_ok);
    assert_eq!(attempt.body["result"]["message_id"], 7);
}

#[tokio::test]
async fn html_dialect_sets_parse_mode() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/botTEST/sendMessage")
            .json_body_partial(r#"{"parse_mode": "HTML"}"#);
        then.status(200).json_body(json!({"ok": true}));
    });

    let client = TelegramClient::new(&server.base_url(), "TEST");
    let attempt = client
        .send_chunk("42", "<b>salom</b>", Dialect::Html, Duration::from_secs(2))
        .await;

    mock.assert();
    assert!(attempt.tg_ok);
}

#[tokio::test]
async fn remote_rejection_is_reported_not_raised() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/botTEST/sendMessage");
        then.status(400).json_body(json!({
            "ok": false,
            "description": "Bad Request: can't parse entities"
        }));
    });

    let client = TelegramClient::new(&server.base_url(), "TEST");
    let attempt = client
        .send_chunk("42", "oops_", Dialect::MarkdownV2, Duration::from_secs(2))
        .await;

    assert!(!attempt.http_ok);
    assert!(!attempt.tg_ok);
    assert_eq!(
        attempt.body["description"],
        "Bad Request: can't parse entities"
    );
}

#[tokio::test]
async fn unparseable_body_degrades_to_empty_object() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/botTEST/sendMessage");
        then.status(200).body("<html>definitely not json</html>");
    });

    let client = TelegramClient::new(&server.base_url(), "TEST");
    let attempt = client
        .send_chunk("42", "salom", Dialect::MarkdownV2, Duration::from_secs(2))
        .await;

    assert!(attempt.http_ok);
    assert!(!attempt.tg_ok, "acceptance cannot be confirmed");
    assert_eq!(attempt.body, json!({}));
}

#[tokio::test]
async fn slow_remote_yields_timeout_outcome_within_bound() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/botTEST/sendMessage");
        then.status(200)
            .json_body(json!({"ok": true}))
            .delay(Duration::from_millis(800));
    });

    let client = TelegramClient::new(&server.base_url(), "TEST");
    let started = Instant::now();
    let attempt = client
        .send_chunk("42", "salom", Dialect::MarkdownV2, Duration::from_millis(50))
        .await;

    assert!(started.elapsed() < Duration::from_millis(700), "call must not wait out the delay");
    assert!(!attempt.http_ok);
    assert!(!attempt.tg_ok);
    assert!(attempt.body["error"].is_string());
}

#[tokio::test]
async fn identity_check_hits_get_me() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/botTEST/getMe");
        then.status(200)
            .json_body(json!({"ok": true, "result": {"username": "order_bot"}}));
    });

    let client = TelegramClient::new(&server.base_url(), "TEST");
    let attempt = client.identity_check(Duration::from_secs(2)).await;

    mock.assert();
    assert!(attempt.http_ok);
    assert!(attempt.tg_ok);
    assert_eq!(attempt.body["result"]["username"], "order_bot");
}
