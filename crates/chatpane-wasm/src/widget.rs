use chatpane_core::{is_submit_keystroke, ChatController, Result, WidgetConfig};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Document;

use crate::transport::HttpTransport;
use crate::view::DomChatView;

pub type DomController = ChatController<DomChatView, HttpTransport>;

/// The chat widget mounted on a page
pub struct ChatWidget {
    controller: Rc<DomController>,
}

impl ChatWidget {
    pub fn new(document: &Document, config: WidgetConfig) -> Result<Self> {
        config.validate()?;
        let view = DomChatView::from_document(document, &config)?;
        let transport = HttpTransport::new(config.request_timeout_ms);

        Ok(Self {
            controller: Rc::new(ChatController::new(view, transport, config)),
        })
    }

    pub fn controller(&self) -> Rc<DomController> {
        self.controller.clone()
    }

    /// Wire the send button and Enter key, then show the newest message.
    pub fn start(self) -> std::result::Result<(), JsValue> {
        self.setup_send_button()?;
        self.setup_enter_key()?;
        self.controller.attach();

        log::info!("Chat widget ready");
        Ok(())
    }

    fn setup_send_button(&self) -> std::result::Result<(), JsValue> {
        let controller = self.controller.clone();

        let closure = Closure::wrap(Box::new(move || {
            spawn_submit(controller.clone());
        }) as Box<dyn FnMut()>);

        self.controller
            .view()
            .send_button()
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();

        Ok(())
    }

    fn setup_enter_key(&self) -> std::result::Result<(), JsValue> {
        let controller = self.controller.clone();

        let closure = Closure::wrap(Box::new(move |event: web_sys::KeyboardEvent| {
            if is_submit_keystroke(&event.key(), event.shift_key()) {
                event.prevent_default();
                spawn_submit(controller.clone());
            }
        }) as Box<dyn FnMut(_)>);

        self.controller
            .view()
            .input()
            .element()
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();

        Ok(())
    }
}

fn spawn_submit(controller: Rc<DomController>) {
    wasm_bindgen_futures::spawn_local(async move {
        let outcome = controller.submit().await;
        log::debug!("Submit finished: {:?}", outcome);
    });
}
