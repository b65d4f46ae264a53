//! `ChatView` backed by the live DOM.

use chatpane_core::{ChatError, ChatView, Result, Sender, WidgetConfig};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement, HtmlTextAreaElement};

use crate::dom;

/// The message field, which pages render either as `<input>` or `<textarea>`
#[derive(Clone)]
pub enum MessageInput {
    Input(HtmlInputElement),
    TextArea(HtmlTextAreaElement),
}

impl MessageInput {
    fn from_element(element: Element) -> Result<Self> {
        let element = match element.dyn_into::<HtmlTextAreaElement>() {
            Ok(textarea) => return Ok(MessageInput::TextArea(textarea)),
            Err(element) => element,
        };
        element
            .dyn_into::<HtmlInputElement>()
            .map(MessageInput::Input)
            .map_err(|e| ChatError::Dom(format!("<{}> is not a text field", e.tag_name().to_lowercase())))
    }

    pub fn value(&self) -> String {
        match self {
            MessageInput::Input(input) => input.value(),
            MessageInput::TextArea(textarea) => textarea.value(),
        }
    }

    pub fn set_value(&self, value: &str) {
        match self {
            MessageInput::Input(input) => input.set_value(value),
            MessageInput::TextArea(textarea) => textarea.set_value(value),
        }
    }

    pub fn element(&self) -> &Element {
        match self {
            MessageInput::Input(input) => input,
            MessageInput::TextArea(textarea) => textarea,
        }
    }
}

pub struct DomChatView {
    document: Document,
    chat: Element,
    input: MessageInput,
    send_button: Element,
    messages: Element,
    chat_id_attribute: String,
    loading_id: String,
    surface_transport_errors: bool,
}

impl DomChatView {
    /// Look up every element the widget needs; fails if any is missing.
    pub fn from_document(document: &Document, config: &WidgetConfig) -> Result<Self> {
        let chat = dom::get_element_by_id(document, &config.chat_element_id)?;
        let input = MessageInput::from_element(dom::get_element_by_id(document, &config.input_element_id)?)?;
        let send_button = dom::get_element_by_id(document, &config.send_button_id)?;
        let messages = dom::get_element_by_id(document, &config.messages_element_id)?;

        Ok(Self {
            document: document.clone(),
            chat,
            input,
            send_button,
            messages,
            chat_id_attribute: config.chat_id_attribute.clone(),
            loading_id: config.loading_element_id.clone(),
            surface_transport_errors: config.surface_transport_errors,
        })
    }

    pub fn input(&self) -> &MessageInput {
        &self.input
    }

    pub fn send_button(&self) -> &Element {
        &self.send_button
    }

    pub fn messages(&self) -> &Element {
        &self.messages
    }

    fn loading_element(&self) -> Option<Element> {
        self.document.get_element_by_id(&self.loading_id)
    }
}

impl ChatView for DomChatView {
    fn input_value(&self) -> String {
        self.input.value()
    }

    fn clear_input(&self) {
        self.input.set_value("");
    }

    fn append_message(&self, sender: Sender, html: &str) {
        match dom::create_element_with_class(&self.document, "div", sender.css_class()) {
            Ok(message) => {
                message.set_inner_html(html);
                dom::append(&self.messages, &message);
            }
            Err(e) => log::error!("Failed to render {} message: {}", sender, e),
        }
    }

    fn show_loading(&self) {
        if self.loading_element().is_some() {
            return;
        }
        match dom::create_element_with_class(&self.document, "div", Sender::Agent.css_class()) {
            Ok(loading) => {
                loading.set_id(&self.loading_id);
                dom::append(&self.messages, &loading);
            }
            Err(e) => log::error!("Failed to add loading indicator: {}", e),
        }
    }

    fn remove_loading(&self) {
        if let Some(loading) = self.loading_element() {
            loading.remove();
        }
    }

    fn scroll_to_bottom(&self, animated: bool) {
        dom::scroll_to_bottom(&self.messages, animated);
    }

    fn set_send_enabled(&self, enabled: bool) {
        dom::set_disabled(&self.send_button, !enabled);
    }

    fn chat_id(&self) -> Option<String> {
        self.chat.get_attribute(&self.chat_id_attribute)
    }

    fn cookies(&self) -> String {
        dom::cookie_string(&self.document)
    }

    fn report_failure(&self, error: &ChatError) {
        if !self.surface_transport_errors || !error.is_transport() {
            return;
        }
        if let Ok(notice) = dom::create_element_with_class(&self.document, "div", "system message error") {
            notice.set_text_content(Some(&error.to_string()));
            dom::append(&self.messages, &notice);
            dom::scroll_to_bottom(&self.messages, true);
        }
    }
}
