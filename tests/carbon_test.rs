use fernbrom::carbon::CarbonAdvisor;
use fernbrom::carbon::FAILURE_REPLY;
use fernbrom::carbon::MISSING_KEY_REPLY;
use fernbrom::carbon::error::CarbonError;
use httpmock::prelude::*;
use serde_json::json;

fn advisor(server: &MockServer, key: Option<&str>) -> CarbonAdvisor {
    CarbonAdvisor::new(server.url("/v1/chat/completions"), key.map(str::to_string)).unwrap()
}

#[tokio::test]
async fn test_ask_sends_prompt_and_returns_trimmed_answer() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/chat/completions")
            .header("authorization", "Bearer ds-key")
            .json_body_partial(r#"{ "model": "deepseek-chat", "max_tokens": 400 }"#)
            .body_contains("範疇一排放怎麼計算？")
            .body_contains("環境永續發展專家");
        then.status(200).json_body(json!({
            "id": "chatcmpl-1",
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": "\n  以燃料用量乘上排放係數。  \n" } }
            ]
        }));
    });

    let answer = advisor(&server, Some("ds-key"))
        .ask("範疇一排放怎麼計算？")
        .await;

    assert_eq!(answer, "以燃料用量乘上排放係數。");
    mock.assert();
}

#[tokio::test]
async fn test_missing_key_skips_network() {
    let server = MockServer::start();
    let mock = server.mock(|_when, then| {
        then.status(200);
    });

    let answer = advisor(&server, None).ask("什麼是碳權？").await;

    assert_eq!(answer, MISSING_KEY_REPLY);
    assert_eq!(answer, "❌ DEEPSEEK_API_KEY 未設定");
    mock.assert_hits(0);
}

#[tokio::test]
async fn test_upstream_error_becomes_fixed_reply() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(500).body("internal error");
    });

    let advisor = advisor(&server, Some("ds-key"));
    assert_eq!(advisor.ask("範疇三").await, FAILURE_REPLY);
    assert!(matches!(
        advisor.try_ask("範疇三").await,
        Err(CarbonError::ApiError { status: 500, .. })
    ));
    mock.assert_hits(2);
}

#[tokio::test]
async fn test_malformed_body_becomes_fixed_reply() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200).body("<html>gateway</html>");
    });

    let answer = advisor(&server, Some("ds-key")).ask("範疇二").await;
    assert_eq!(answer, "⚠️ AI 回覆失敗，請稍後再試");
}
