//! LINE Messaging API push client.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use serde::Serialize;
use serde_json::Value;
use wreq::header::AUTHORIZATION;
use wreq::header::CONTENT_TYPE;

use crate::messenger::Messenger;
use crate::messenger::error::MessengerError;

const PUSH_PATH: &str = "/v2/bot/message/push";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Serialize)]
struct PushRequest<'a> {
    to: &'a str,
    messages: [TextMessage<'a>; 1],
}

#[derive(Serialize)]
struct TextMessage<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    text: &'a str,
}

pub struct LineMessenger {
    client: wreq::Client,
    api_url: String,
    channel_access_token: String,
}

impl LineMessenger {
    pub fn new(
        api_url: impl Into<String>,
        channel_access_token: impl Into<String>,
    ) -> Result<Self, MessengerError> {
        let client = wreq::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_url: api_url.into(),
            channel_access_token: channel_access_token.into(),
        })
    }

    fn push_url(&self) -> String {
        format!("{}{}", self.api_url.trim_end_matches('/'), PUSH_PATH)
    }

    /// LINE errors look like `{"message": "...", "details": [...]}`.
    fn extract_error_message(body: &str) -> String {
        serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .unwrap_or_else(|| body.to_string())
    }
}

#[async_trait]
impl Messenger for LineMessenger {
    async fn push_text(&self, user_id: &str, text: &str) -> Result<(), MessengerError> {
        let payload = PushRequest {
            to: user_id,
            messages: [TextMessage { kind: "text", text }],
        };
        let body = serde_json::to_string(&payload)
            .map_err(|e| MessengerError::RequestFailed(Box::new(e)))?;

        debug!("Pushing message to {user_id}.");
        let response = self
            .client
            .post(self.push_url().as_str())
            .header(AUTHORIZATION, format!("Bearer {}", self.channel_access_token))
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MessengerError::ApiError {
                status: status.as_u16(),
                message: Self::extract_error_message(&body),
            });
        }
        Ok(())
    }
}
