//! DOM and Web API utility functions.
//!
//! Provides consistent access to browser APIs, mapping absence and thrown
//! JavaScript errors onto [`ShellError`].

use js_sys::Reflect;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element, HtmlElement, Window};

use qa_shell_core::ShellError;

/// Get the browser window object.
#[inline]
pub fn window() -> Result<Window, ShellError> {
    web_sys::window().ok_or(ShellError::NoWindow)
}

/// Get the window's document.
pub fn document() -> Result<Document, ShellError> {
    window()?.document().ok_or(ShellError::NoDocument)
}

/// Get `<body>`.
pub fn body(document: &Document) -> Result<HtmlElement, ShellError> {
    document.body().ok_or(ShellError::NoDocumentElement("body"))
}

/// Look up an element by id.
pub fn element_by_id(document: &Document, id: &str) -> Result<Element, ShellError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| ShellError::MissingElement(id.to_string()))
}

/// Viewport width in CSS pixels, or 0 when unavailable.
pub fn viewport_width() -> f64 {
    window()
        .ok()
        .and_then(|w| w.inner_width().ok())
        .and_then(|w| w.as_f64())
        .unwrap_or(0.0)
}

/// Current `location.pathname`.
pub fn current_path() -> String {
    window()
        .ok()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_default()
}

/// Whether the document is still being parsed (`readyState == "loading"`).
pub fn is_loading(document: &Document) -> bool {
    document.ready_state() == "loading"
}

/// Read a global property off `window`, treating `undefined`/`null` as absent.
pub fn global(name: &str) -> Option<JsValue> {
    let window = window().ok()?;
    Reflect::get(&window, &name.into())
        .ok()
        .filter(|value| !value.is_undefined() && !value.is_null())
}

/// Convert a thrown JavaScript value into a [`ShellError`].
pub fn js_error(err: JsValue) -> ShellError {
    ShellError::Js(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}
