//! The submit cycle
//!
//! [`ChatController`] owns the capture → render → send → render sequence and
//! the one-request-in-flight rule. It never touches a browser API directly:
//! the page is reached through [`ChatView`] and the network through
//! [`ChatTransport`], both handed over at construction.

use async_trait::async_trait;
use std::cell::Cell;

use crate::config::WidgetConfig;
use crate::cookie;
use crate::error::{ChatError, FailureKind, Result};
use crate::format;
use crate::request::ChatRequest;
use crate::types::{ChatReply, Sender};

/// The page surface the controller drives.
///
/// Methods take `&self`: implementations wrap shared DOM handles or
/// interior-mutable test doubles.
pub trait ChatView {
    /// Current text of the input field, untrimmed.
    fn input_value(&self) -> String;
    fn clear_input(&self);
    /// Append a message node whose inner HTML is `html`.
    fn append_message(&self, sender: Sender, html: &str);
    /// Insert the loading indicator. Must not create a second one.
    fn show_loading(&self);
    /// Remove the loading indicator if present.
    fn remove_loading(&self);
    fn scroll_to_bottom(&self, animated: bool);
    fn set_send_enabled(&self, enabled: bool);
    /// Conversation id the page was rendered for.
    fn chat_id(&self) -> Option<String>;
    /// Raw cookie string, `name=value; name=value`.
    fn cookies(&self) -> String;
    /// Called once per failed submission after the indicator is gone.
    fn report_failure(&self, _error: &ChatError) {}
}

/// Delivers a prepared request and returns the decoded reply.
///
/// Non-success statuses must come back as [`ChatError::Status`].
#[async_trait(?Send)]
pub trait ChatTransport {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetState {
    Idle,
    AwaitingResponse,
}

/// What a call to [`ChatController::submit`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Input was empty or whitespace; nothing happened.
    Ignored,
    /// A previous submission is still waiting; nothing happened.
    Busy,
    /// The agent's reply was appended.
    Replied,
    /// The user's message was sent but no agent message was appended.
    NoReply(FailureKind),
}

/// Enter submits; Shift+Enter is left to the input (newline).
pub fn is_submit_keystroke(key: &str, shift: bool) -> bool {
    key == "Enter" && !shift
}

pub struct ChatController<V, T> {
    view: V,
    transport: T,
    config: WidgetConfig,
    state: Cell<WidgetState>,
}

impl<V: ChatView, T: ChatTransport> ChatController<V, T> {
    pub fn new(view: V, transport: T, config: WidgetConfig) -> Self {
        Self {
            view,
            transport,
            config,
            state: Cell::new(WidgetState::Idle),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn state(&self) -> WidgetState {
        self.state.get()
    }

    /// Bring the widget into its initial state: idle, send enabled and the
    /// server-rendered history scrolled to its end without animation.
    pub fn attach(&self) {
        self.state.set(WidgetState::Idle);
        self.view.set_send_enabled(true);
        self.view.scroll_to_bottom(false);
    }

    /// Send whatever is in the input field.
    pub async fn submit(&self) -> SubmitOutcome {
        if self.state.get() == WidgetState::AwaitingResponse {
            log::debug!("Submission ignored, a reply is still pending");
            return SubmitOutcome::Busy;
        }

        let input = self.view.input_value();
        let content = input.trim();
        if content.is_empty() {
            return SubmitOutcome::Ignored;
        }

        let user_html = format::render_content(content, false, self.config.trust_policy);
        self.view.append_message(Sender::User, &user_html);
        self.view.clear_input();

        self.state.set(WidgetState::AwaitingResponse);
        self.view.set_send_enabled(false);
        self.view.show_loading();
        self.view.scroll_to_bottom(true);

        let result = self.send_request(content).await;

        self.view.remove_loading();
        self.view.scroll_to_bottom(true);

        let outcome = match result {
            Ok(reply) if reply.output.is_empty() => {
                log::warn!("Server replied without output");
                SubmitOutcome::NoReply(FailureKind::EmptyOutput)
            }
            Ok(reply) => {
                let agent_html =
                    format::render_content(&reply.output, reply.trusted, self.config.trust_policy);
                self.view.append_message(Sender::Agent, &agent_html);
                self.view.scroll_to_bottom(true);
                SubmitOutcome::Replied
            }
            Err(e) => {
                log::error!("Message sending failed: {}", e);
                self.view.report_failure(&e);
                SubmitOutcome::NoReply(e.kind())
            }
        };

        self.state.set(WidgetState::Idle);
        self.view.set_send_enabled(true);
        outcome
    }

    /// Post `content` to the page's conversation and return the reply.
    ///
    /// The chat id and CSRF token are read fresh on every call.
    pub async fn send_request(&self, content: &str) -> Result<ChatReply> {
        let chat_id = self
            .view
            .chat_id()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ChatError::MissingElement(self.config.chat_id_attribute.clone()))?;
        let csrf_token = cookie::get_cookie(&self.view.cookies(), &self.config.csrf_cookie_name);
        if csrf_token.is_none() {
            log::warn!("No {} cookie, sending without CSRF header", self.config.csrf_cookie_name);
        }

        let request = ChatRequest::new(&self.config, &chat_id, csrf_token.as_deref(), content);
        log::debug!("POST {} ({} bytes)", request.url, request.body.len());

        self.transport.send(&request).await
    }
}
