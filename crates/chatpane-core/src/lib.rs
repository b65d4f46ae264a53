//! Platform-independent core of the chatpane widget
//!
//! Everything the widget decides lives here: how content is rendered, how the
//! request is encoded, how replies are decoded and the submit cycle itself.
//! The browser binding in `chatpane-wasm` only supplies a [`ChatView`] and a
//! [`ChatTransport`].

pub mod config;
pub mod controller;
pub mod cookie;
pub mod error;
pub mod format;
pub mod request;
pub mod types;

pub use config::WidgetConfig;
pub use controller::{
    is_submit_keystroke, ChatController, ChatTransport, ChatView, SubmitOutcome, WidgetState,
};
pub use error::{ChatError, FailureKind, Result};
pub use format::{escape_html, format_content, render_content, text_to_html, TrustPolicy};
pub use request::{parse_reply, ChatRequest, FORM_CONTENT_TYPE};
pub use types::{ChatReply, Sender};
