//! Owned DOM event listeners.
//!
//! An [`EventListener`] keeps its closure alive and removes it from the
//! target when dropped. Dropping the listeners of a binding epoch is how the
//! shell unsubscribes before rebinding.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use web_sys::{Event, EventTarget};

use qa_shell_core::ShellError;

use crate::dom::js_error;

pub struct EventListener {
    target: EventTarget,
    event: String,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    /// Attach `handler` for `event` on `target`.
    pub fn new(
        target: &EventTarget,
        event: &str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, ShellError> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .map_err(js_error)?;

        Ok(Self {
            target: target.clone(),
            event: event.to_string(),
            callback,
        })
    }

    /// Keep the listener attached for the lifetime of the page.
    ///
    /// Used for window/document listeners installed once at boot.
    pub fn forget(self) {
        std::mem::forget(self);
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback(
            &self.event,
            self.callback.as_ref().unchecked_ref(),
        );
    }
}
