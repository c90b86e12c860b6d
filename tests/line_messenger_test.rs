use fernbrom::messenger::Messenger;
use fernbrom::messenger::error::MessengerError;
use fernbrom::messenger::line_messenger::LineMessenger;
use httpmock::prelude::*;
use serde_json::json;

#[tokio::test]
async fn test_push_text_posts_line_payload() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v2/bot/message/push")
            .header("authorization", "Bearer line-token")
            .header("content-type", "application/json")
            .json_body(json!({
                "to": "U123",
                "messages": [ { "type": "text", "text": "早安" } ]
            }));
        then.status(200).json_body(json!({}));
    });

    let messenger = LineMessenger::new(server.url(""), "line-token").unwrap();
    messenger.push_text("U123", "早安").await.unwrap();
    mock.assert();
}

#[tokio::test]
async fn test_non_success_status_is_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v2/bot/message/push");
        then.status(429)
            .json_body(json!({ "message": "You have reached your monthly limit." }));
    });

    let messenger = LineMessenger::new(server.url(""), "line-token").unwrap();
    let result = messenger.push_text("U123", "早安").await;

    match result {
        Err(MessengerError::ApiError { status, message }) => {
            assert_eq!(status, 429);
            assert_eq!(message, "You have reached your monthly limit.");
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_endpoint_is_request_error() {
    let messenger = LineMessenger::new("http://127.0.0.1:1", "line-token").unwrap();
    let result = messenger.push_text("U123", "早安").await;
    assert!(matches!(result, Err(MessengerError::RequestFailed(_))));
}
