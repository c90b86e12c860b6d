//! Carbon-accounting Q&A over the DeepSeek chat-completion API.
//!
//! [`CarbonAdvisor::ask`] never fails: a missing key and every upstream
//! error come back as fixed user-facing strings.

use std::time::Duration;

use log::debug;
use log::error;
use serde::Deserialize;
use serde::Serialize;
use wreq::header::AUTHORIZATION;
use wreq::header::CONTENT_TYPE;

use crate::carbon::error::CarbonError;

pub mod error;

pub const MISSING_KEY_REPLY: &str = "❌ DEEPSEEK_API_KEY 未設定";
pub const FAILURE_REPLY: &str = "⚠️ AI 回覆失敗，請稍後再試";

pub const SYSTEM_PROMPT: &str = "\n你是一位擁有20年經驗的環境永續發展專家，精通全球ESG發展史與碳管理。\n請協助企業計算碳足跡，提供專業建議。\n";

const MODEL: &str = "deepseek-chat";
const MAX_TOKENS: u32 = 400;
const TEMPERATURE: f64 = 0.2;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'static str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    content: String,
}

pub struct CarbonAdvisor {
    client: wreq::Client,
    api_url: String,
    api_key: Option<String>,
}

impl CarbonAdvisor {
    pub fn new(api_url: impl Into<String>, api_key: Option<String>) -> Result<Self, CarbonError> {
        let client = wreq::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_url: api_url.into(),
            api_key,
        })
    }

    /// Answers `question`, or returns a fixed fallback string.
    pub async fn ask(&self, question: &str) -> String {
        match self.try_ask(question).await {
            Ok(answer) => answer,
            Err(CarbonError::MissingApiKey) => MISSING_KEY_REPLY.to_string(),
            Err(e) => {
                error!("DeepSeek request failed: {e}");
                FAILURE_REPLY.to_string()
            }
        }
    }

    /// Single attempt, no retry. The reply is trimmed.
    pub async fn try_ask(&self, question: &str) -> Result<String, CarbonError> {
        let api_key = self.api_key.as_deref().ok_or(CarbonError::MissingApiKey)?;

        let body = serde_json::to_string(&Self::build_request(question))?;
        debug!("Sending carbon question ({} chars).", question.chars().count());

        let response = self
            .client
            .post(self.api_url.as_str())
            .header(AUTHORIZATION, format!("Bearer {api_key}"))
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(CarbonError::ApiError {
                status: status.as_u16(),
                message: text,
            });
        }

        Self::parse_reply(&text)
    }

    fn build_request(question: &str) -> ChatRequest<'_> {
        ChatRequest {
            model: MODEL,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: question,
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        }
    }

    fn parse_reply(body: &str) -> Result<String, CarbonError> {
        let response: ChatResponse = serde_json::from_str(body)?;
        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or(CarbonError::EmptyResponse)
    }
}
