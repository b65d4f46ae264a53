//! Widget configuration
//!
//! Every field has a default matching the page contract the server renders,
//! so an empty JSON object (or no configuration at all) is valid.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};

use crate::error::{ChatError, Result};
use crate::format::TrustPolicy;

/// Placeholder in [`WidgetConfig::endpoint_template`] replaced by the chat id.
pub const CHAT_PLACEHOLDER: &str = "{chat}";

const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Element carrying the chat id attribute.
    pub chat_element_id: String,
    pub chat_id_attribute: String,
    pub input_element_id: String,
    pub send_button_id: String,
    pub messages_element_id: String,
    pub loading_element_id: String,
    pub endpoint_template: String,
    pub csrf_cookie_name: String,
    pub csrf_header_name: String,
    pub trust_policy: TrustPolicy,
    /// `None` waits for the server indefinitely.
    pub request_timeout_ms: Option<u32>,
    /// Also show transport failures in the message list.
    pub surface_transport_errors: bool,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            chat_element_id: "chat".to_string(),
            chat_id_attribute: "data-chat".to_string(),
            input_element_id: "message-input".to_string(),
            send_button_id: "send-button".to_string(),
            messages_element_id: "messages".to_string(),
            loading_element_id: "loading".to_string(),
            endpoint_template: format!("/chats/chat/{}/", CHAT_PLACEHOLDER),
            csrf_cookie_name: "csrftoken".to_string(),
            csrf_header_name: "X-CSRFToken".to_string(),
            trust_policy: TrustPolicy::default(),
            request_timeout_ms: None,
            surface_transport_errors: false,
        }
    }
}

impl WidgetConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: WidgetConfig = serde_json::from_str(json)
            .map_err(|e| ChatError::Config(format!("invalid widget config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let ids = [
            ("chat_element_id", &self.chat_element_id),
            ("chat_id_attribute", &self.chat_id_attribute),
            ("input_element_id", &self.input_element_id),
            ("send_button_id", &self.send_button_id),
            ("messages_element_id", &self.messages_element_id),
            ("loading_element_id", &self.loading_element_id),
            ("csrf_cookie_name", &self.csrf_cookie_name),
            ("csrf_header_name", &self.csrf_header_name),
        ];
        if let Some((field, _)) = ids.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ChatError::Config(format!("{} must not be empty", field)));
        }

        if !self.endpoint_template.contains(CHAT_PLACEHOLDER) {
            return Err(ChatError::Config(format!(
                "endpoint_template must contain {}",
                CHAT_PLACEHOLDER
            )));
        }

        if self.request_timeout_ms == Some(0) {
            return Err(ChatError::Config("request_timeout_ms must be positive".to_string()));
        }

        Ok(())
    }

    /// URL to post messages of `chat_id` to.
    pub fn endpoint_for(&self, chat_id: &str) -> String {
        let segment = utf8_percent_encode(chat_id, PATH_SEGMENT).to_string();
        self.endpoint_template.replace(CHAT_PLACEHOLDER, &segment)
    }
}
