//! Browser tests for the DOM-backed view. Run with `wasm-pack test --headless --firefox`.

use async_trait::async_trait;
use chatpane_core::{
    ChatController, ChatError, ChatReply, ChatRequest, ChatTransport, ChatView, Result, Sender,
    SubmitOutcome, WidgetConfig, WidgetState,
};
use chatpane_wasm::{with_timeout, ChatWidget, DomChatView, DomController, HttpTransport};
use gloo_timers::future::TimeoutFuture;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{AbortController, Document, HtmlElement, KeyboardEvent, KeyboardEventInit};

wasm_bindgen_test_configure!(run_in_browser);

const FIXTURE: &str = r#"
<div id="chat" data-chat="42">
  <div id="messages" style="height: 50px; overflow-y: auto"></div>
  <textarea id="message-input"></textarea>
  <button id="send-button">Send</button>
</div>
"#;

fn fixture() -> Document {
    let document = web_sys::window().unwrap().document().unwrap();
    document.body().unwrap().set_inner_html(FIXTURE);
    document
}

fn view(document: &Document) -> DomChatView {
    DomChatView::from_document(document, &WidgetConfig::default()).unwrap()
}

fn classes_in_messages(document: &Document) -> Vec<String> {
    let messages = document.get_element_by_id("messages").unwrap();
    let children = messages.children();
    (0..children.length())
        .filter_map(|i| children.item(i))
        .map(|child| child.class_name())
        .collect()
}

fn started_widget(document: &Document) -> Rc<DomController> {
    let widget = ChatWidget::new(document, WidgetConfig::default()).unwrap();
    let controller = widget.controller();
    widget.start().unwrap();
    controller
}

fn keydown(key: &str, shift: bool) -> KeyboardEvent {
    let init = KeyboardEventInit::new();
    init.set_key(key);
    init.set_shift_key(shift);
    init.set_bubbles(true);
    init.set_cancelable(true);
    KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap()
}

/// Let spawned submissions run until the widget is idle again.
async fn settle(controller: &DomController) {
    for _ in 0..400 {
        TimeoutFuture::new(5).await;
        if controller.state() == WidgetState::Idle {
            return;
        }
    }
}

struct StubTransport {
    reply: RefCell<Option<Result<ChatReply>>>,
    seen: RefCell<Option<ChatRequest>>,
}

impl StubTransport {
    fn new(reply: Result<ChatReply>) -> Self {
        Self {
            reply: RefCell::new(Some(reply)),
            seen: RefCell::new(None),
        }
    }
}

#[async_trait(?Send)]
impl ChatTransport for StubTransport {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply> {
        let document = web_sys::window().unwrap().document().unwrap();
        assert!(document.get_element_by_id("loading").is_some());
        *self.seen.borrow_mut() = Some(request.clone());
        self.reply
            .borrow_mut()
            .take()
            .unwrap_or_else(|| Err(ChatError::Transport("used".to_string())))
    }
}

#[wasm_bindgen_test]
fn test_missing_element_is_reported() {
    let document = fixture();
    document.get_element_by_id("messages").unwrap().remove();

    let err = DomChatView::from_document(&document, &WidgetConfig::default()).err();
    assert_eq!(err, Some(ChatError::MissingElement("messages".to_string())));
}

#[wasm_bindgen_test]
fn test_reads_chat_id_and_input() {
    let document = fixture();
    let view = view(&document);

    assert_eq!(view.chat_id(), Some("42".to_string()));
    view.input().set_value(" hello ");
    assert_eq!(view.input_value(), " hello ");
    view.clear_input();
    assert_eq!(view.input_value(), "");
}

#[wasm_bindgen_test]
fn test_message_nodes_carry_sender_class() {
    let document = fixture();
    let view = view(&document);

    view.append_message(Sender::User, "hi");
    view.append_message(Sender::Agent, "a<br>b");

    assert_eq!(classes_in_messages(&document), vec!["user message", "agent message"]);
    let messages = document.get_element_by_id("messages").unwrap();
    assert_eq!(messages.last_element_child().unwrap().inner_html(), "a<br>b");
}

#[wasm_bindgen_test]
fn test_loading_indicator_is_unique() {
    let document = fixture();
    let view = view(&document);

    view.show_loading();
    view.show_loading();
    assert_eq!(classes_in_messages(&document), vec!["agent message"]);
    let loading = document.get_element_by_id("loading").unwrap();
    assert_eq!(loading.class_name(), "agent message");

    view.remove_loading();
    view.remove_loading();
    assert!(document.get_element_by_id("loading").is_none());
}

#[wasm_bindgen_test]
fn test_send_button_toggles_disabled() {
    let document = fixture();
    let view = view(&document);

    view.set_send_enabled(false);
    assert!(view.send_button().has_attribute("disabled"));
    view.set_send_enabled(true);
    assert!(!view.send_button().has_attribute("disabled"));
}

#[wasm_bindgen_test]
fn test_transport_errors_surface_only_when_enabled() {
    let document = fixture();
    let error = ChatError::Transport("offline".to_string());

    view(&document).report_failure(&error);
    assert!(classes_in_messages(&document).is_empty());

    let config = WidgetConfig {
        surface_transport_errors: true,
        ..Default::default()
    };
    let noisy = DomChatView::from_document(&document, &config).unwrap();
    noisy.report_failure(&ChatError::Status {
        status: 500,
        status_text: String::new(),
    });
    noisy.report_failure(&error);

    assert_eq!(classes_in_messages(&document), vec!["system message error"]);
    let notice = document.get_element_by_id("messages").unwrap().last_element_child().unwrap();
    assert_eq!(notice.text_content().unwrap(), "Transport error: offline");
}

#[wasm_bindgen_test]
async fn test_submit_renders_exchange() {
    let document = fixture();
    let transport = StubTransport::new(Ok(ChatReply {
        output: "hello".to_string(),
        trusted: false,
    }));
    let controller = ChatController::new(view(&document), transport, WidgetConfig::default());
    controller.view().input().set_value("hi");

    let outcome = controller.submit().await;

    assert_eq!(outcome, SubmitOutcome::Replied);
    assert_eq!(classes_in_messages(&document), vec!["user message", "agent message"]);
    assert!(document.get_element_by_id("loading").is_none());
    assert_eq!(controller.view().input_value(), "");
    let seen = controller.transport().seen.borrow();
    assert_eq!(seen.as_ref().unwrap().url, "/chats/chat/42/");
    assert_eq!(seen.as_ref().unwrap().body, "content=hi");
}

#[wasm_bindgen_test]
async fn test_failed_submit_leaves_only_user_message() {
    let document = fixture();
    let transport = StubTransport::new(Err(ChatError::Status {
        status: 500,
        status_text: "Internal Server Error".to_string(),
    }));
    let controller = ChatController::new(view(&document), transport, WidgetConfig::default());
    controller.view().input().set_value("hi");

    controller.submit().await;

    assert_eq!(classes_in_messages(&document), vec!["user message"]);
    assert!(document.get_element_by_id("loading").is_none());
    assert!(!controller.view().send_button().has_attribute("disabled"));
}

#[wasm_bindgen_test]
fn test_widget_rejects_invalid_config() {
    let document = fixture();
    let config = WidgetConfig {
        endpoint_template: "/chats/".to_string(),
        ..Default::default()
    };
    assert!(matches!(ChatWidget::new(&document, config), Err(ChatError::Config(_))));
}

#[wasm_bindgen_test]
async fn test_enter_submits_and_suppresses_newline() {
    let document = fixture();
    let controller = started_widget(&document);
    controller.view().input().set_value("hi");

    let event = keydown("Enter", false);
    controller.view().input().element().dispatch_event(&event).unwrap();
    settle(&controller).await;

    assert!(event.default_prevented());
    assert_eq!(classes_in_messages(&document), vec!["user message"]);
    assert_eq!(controller.view().input_value(), "");
    assert!(document.get_element_by_id("loading").is_none());
}

#[wasm_bindgen_test]
async fn test_shift_enter_keeps_newline_and_does_not_submit() {
    let document = fixture();
    let controller = started_widget(&document);
    controller.view().input().set_value("hi");

    let event = keydown("Enter", true);
    controller.view().input().element().dispatch_event(&event).unwrap();
    settle(&controller).await;

    assert!(!event.default_prevented());
    assert!(classes_in_messages(&document).is_empty());
    assert_eq!(controller.view().input_value(), "hi");
}

#[wasm_bindgen_test]
async fn test_other_keys_are_ignored() {
    let document = fixture();
    let controller = started_widget(&document);
    controller.view().input().set_value("hi");

    let event = keydown("a", false);
    controller.view().input().element().dispatch_event(&event).unwrap();
    settle(&controller).await;

    assert!(!event.default_prevented());
    assert!(classes_in_messages(&document).is_empty());
}

#[wasm_bindgen_test]
async fn test_send_button_click_submits() {
    let document = fixture();
    let controller = started_widget(&document);
    controller.view().input().set_value("from click");

    controller
        .view()
        .send_button()
        .dyn_ref::<HtmlElement>()
        .unwrap()
        .click();
    settle(&controller).await;

    assert_eq!(classes_in_messages(&document), vec!["user message"]);
    let messages = document.get_element_by_id("messages").unwrap();
    assert_eq!(messages.first_element_child().unwrap().inner_html(), "from click");
    assert!(!controller.view().send_button().has_attribute("disabled"));
}

#[wasm_bindgen_test]
async fn test_http_transport_maps_not_found_to_status() {
    let config = WidgetConfig {
        endpoint_template: "/chatpane-no-such-endpoint/{chat}/".to_string(),
        ..Default::default()
    };
    let request = ChatRequest::new(&config, "1", Some("tok"), "hi");

    let result = HttpTransport::new(None).send(&request).await;

    assert!(
        matches!(result, Err(ChatError::Status { status: 404, .. })),
        "unexpected result: {:?}",
        result
    );
}

#[wasm_bindgen_test]
async fn test_timeout_aborts_pending_request() {
    let abort = AbortController::new().unwrap();

    let result = with_timeout(futures::future::pending::<()>(), Some(10), &abort).await;

    assert_eq!(result, Err(ChatError::Timeout(10)));
    assert!(abort.signal().aborted());
}

#[wasm_bindgen_test]
async fn test_completed_request_is_not_aborted() {
    let abort = AbortController::new().unwrap();

    assert_eq!(with_timeout(async { 5 }, Some(1000), &abort).await, Ok(5));
    assert_eq!(with_timeout(async { 6 }, None, &abort).await, Ok(6));
    assert!(!abort.signal().aborted());
}
