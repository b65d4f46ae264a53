//! Turning message content into the HTML placed inside a message node.
//!
//! Content is text unless something vouches for it. [`TrustPolicy`] decides
//! who may vouch: the server (via [`crate::ChatReply::trusted`]), the content
//! itself (the legacy tag-sniffing heuristic), or nobody.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Where the decision to insert content as live markup comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustPolicy {
    /// Only replies the server explicitly marks as trusted are inserted as markup.
    #[default]
    ServerMarked,
    /// Anything that contains a tag-like substring is treated as markup.
    Sniff,
    /// Everything is text.
    Never,
}

fn tag_pattern() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"<[^>]+>").expect("tag pattern is valid"))
}

/// Whether `content` contains something that looks like an HTML tag.
pub fn contains_markup(content: &str) -> bool {
    tag_pattern().is_match(content)
}

/// Escape HTML to prevent XSS
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Render plain text: escaped, with line breaks preserved.
pub fn text_to_html(content: &str) -> String {
    escape_html(content).replace('\n', "<br>")
}

/// Newlines become `<br>` unless the content already carries markup, in
/// which case it is returned unchanged.
///
/// This does not escape anything. Callers that cannot vouch for the content
/// should go through [`render_content`] instead.
pub fn format_content(content: &str) -> String {
    if contains_markup(content) {
        return content.to_string();
    }
    content.replace('\n', "<br>")
}

/// Produce the inner HTML of a message node.
///
/// `trusted` is the server's claim about this content; user input is never
/// trusted.
pub fn render_content(content: &str, trusted: bool, policy: TrustPolicy) -> String {
    match policy {
        TrustPolicy::Sniff => format_content(content),
        TrustPolicy::ServerMarked if trusted => content.to_string(),
        TrustPolicy::ServerMarked | TrustPolicy::Never => text_to_html(content),
    }
}
