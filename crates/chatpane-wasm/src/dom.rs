use chatpane_core::{ChatError, Result};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlDocument, ScrollBehavior, ScrollToOptions};

/// Get element by ID
pub fn get_element_by_id(document: &Document, id: &str) -> Result<Element> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| ChatError::MissingElement(id.to_string()))
}

/// Create element with class
pub fn create_element_with_class(document: &Document, tag: &str, class: &str) -> Result<Element> {
    let element = document
        .create_element(tag)
        .map_err(|e| ChatError::Dom(format!("Failed to create <{}>: {:?}", tag, e)))?;
    element.set_class_name(class);
    Ok(element)
}

/// Append `child` to `parent`, logging instead of failing
pub fn append(parent: &Element, child: &Element) {
    if let Err(e) = parent.append_child(child) {
        log::error!("Failed to append element: {:?}", e);
    }
}

/// Scroll element to bottom
pub fn scroll_to_bottom(element: &Element, smooth: bool) {
    let options = ScrollToOptions::new();
    options.set_top(f64::from(element.scroll_height()));
    options.set_behavior(if smooth {
        ScrollBehavior::Smooth
    } else {
        ScrollBehavior::Auto
    });
    element.scroll_to_with_scroll_to_options(&options);
}

/// Toggle the `disabled` attribute
pub fn set_disabled(element: &Element, disabled: bool) {
    let result = if disabled {
        element.set_attribute("disabled", "")
    } else {
        element.remove_attribute("disabled")
    };
    if let Err(e) = result {
        log::warn!("Failed to toggle disabled: {:?}", e);
    }
}

/// Current `document.cookie`, empty when unavailable
pub fn cookie_string(document: &Document) -> String {
    document
        .dyn_ref::<HtmlDocument>()
        .and_then(|html| html.cookie().ok())
        .unwrap_or_default()
}
