//! Encoding the outgoing message and decoding the reply.

use url::form_urlencoded;

use crate::config::WidgetConfig;
use crate::error::{ChatError, Result};
use crate::types::ChatReply;

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// A fully prepared POST to the chat endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl ChatRequest {
    /// Build the request posting `content` to the conversation `chat_id`.
    ///
    /// Without a CSRF token the header is omitted and the server decides.
    pub fn new(config: &WidgetConfig, chat_id: &str, csrf_token: Option<&str>, content: &str) -> Self {
        let mut headers = vec![("Content-Type".to_string(), FORM_CONTENT_TYPE.to_string())];
        if let Some(token) = csrf_token {
            headers.push((config.csrf_header_name.clone(), token.to_string()));
        }

        let body = form_urlencoded::Serializer::new(String::new())
            .append_pair("content", content)
            .finish();

        Self {
            url: config.endpoint_for(chat_id),
            headers,
            body,
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Decode the JSON body of a success response.
pub fn parse_reply(body: &str) -> Result<ChatReply> {
    serde_json::from_str(body).map_err(|e| ChatError::MalformedReply(e.to_string()))
}
