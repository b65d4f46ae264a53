use chatpane_core::{ChatError, WidgetConfig};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Window};

mod dom;
mod transport;
mod view;
mod widget;

pub use transport::{with_timeout, HttpTransport};
pub use view::{DomChatView, MessageInput};
pub use widget::{ChatWidget, DomController};

/// Initialize the WASM module
/// This sets up panic hooks and logging
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());

    log::info!("chatpane WASM initialized");
}

/// Attach the chat widget to the current page using the default element ids
///
/// The default trust policy escapes every reply that is not sent with
/// `"trusted": true`. Servers that put HTML (tables, plots, links) in
/// `output` without that flag need `init_chat_widget_with_config` with
/// `{"trust_policy": "sniff"}`, or their markup shows up as escaped text.
#[wasm_bindgen]
pub fn init_chat_widget() -> Result<(), JsValue> {
    mount(WidgetConfig::default())
}

/// Attach the chat widget with a JSON configuration; omitted fields keep
/// their defaults.
#[wasm_bindgen]
pub fn init_chat_widget_with_config(config_json: String) -> Result<(), JsValue> {
    let config = WidgetConfig::from_json(&config_json).map_err(to_js)?;
    mount(config)
}

/// Start the widget now, or once the document has finished parsing.
fn mount(config: WidgetConfig) -> Result<(), JsValue> {
    let document = document()?;

    if document.ready_state() != "loading" {
        return start_widget(&document, config);
    }

    log::debug!("Document still loading, deferring widget start");
    let doc = document.clone();
    let closure = Closure::once(move || {
        if let Err(e) = start_widget(&doc, config) {
            log::error!("Failed to start chat widget: {:?}", e);
        }
    });
    document.add_event_listener_with_callback("DOMContentLoaded", closure.as_ref().unchecked_ref())?;
    closure.forget();

    Ok(())
}

fn start_widget(document: &Document, config: WidgetConfig) -> Result<(), JsValue> {
    let widget = ChatWidget::new(document, config).map_err(to_js)?;
    widget.start()
}

/// Convert a widget error into the value thrown to JavaScript
pub(crate) fn to_js(err: ChatError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Get the window object
fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("No window object"))
}

/// Get the document object
fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("No document object"))
}
