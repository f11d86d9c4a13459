//! Browser implementation of the shell DOM.
//!
//! [`BrowserDom`] locates the toggle, sidebar and overlay by id and attaches
//! one listener set per binding epoch. [`BrowserBinding`] owns those
//! listeners; dropping it detaches them.

use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement, KeyboardEvent, Node};

use qa_shell_core::config::{ElementIds, StateClasses};
use qa_shell_core::{ShellBinding, ShellConfig, ShellDom, ShellError, ShellEvents, ShellView};

use crate::dom::{self, js_error};
use crate::listener::EventListener;

/// The live document, as seen by the shell controller.
pub struct BrowserDom {
    elements: ElementIds,
    classes: StateClasses,
}

impl BrowserDom {
    pub fn new(config: &ShellConfig) -> Self {
        Self {
            elements: config.elements.clone(),
            classes: config.classes.clone(),
        }
    }
}

impl ShellDom for BrowserDom {
    type Binding = BrowserBinding;

    fn viewport_width(&self) -> f64 {
        dom::viewport_width()
    }

    fn bind(&self, events: ShellEvents<Self>) -> Result<BrowserBinding, ShellError> {
        let document = dom::document()?;
        let toggle = dom::element_by_id(&document, &self.elements.toggle)?;
        let sidebar = dom::element_by_id(&document, &self.elements.sidebar)?;
        let overlay = dom::element_by_id(&document, &self.elements.overlay)?;
        let body = dom::body(&document)?;

        let mut listeners = Vec::with_capacity(4);

        let on_toggle = events.clone();
        listeners.push(EventListener::new(&toggle, "click", move |_| {
            on_toggle.toggle_clicked();
        })?);

        let on_overlay = events.clone();
        listeners.push(EventListener::new(&overlay, "click", move |_| {
            on_overlay.overlay_clicked();
        })?);

        let on_document = events.clone();
        let (inside_sidebar, inside_toggle) = (sidebar.clone(), toggle.clone());
        listeners.push(EventListener::new(&document, "click", move |event: Event| {
            let outside = event
                .target()
                .and_then(|target| target.dyn_into::<Node>().ok())
                .is_some_and(|node| {
                    !inside_sidebar.contains(Some(&node)) && !inside_toggle.contains(Some(&node))
                });
            on_document.document_clicked(outside);
        })?);

        let on_key = events;
        listeners.push(EventListener::new(&document, "keydown", move |event: Event| {
            if event
                .dyn_ref::<KeyboardEvent>()
                .is_some_and(|key| key.key() == "Escape")
            {
                on_key.escape_pressed();
            }
        })?);

        Ok(BrowserBinding {
            toggle,
            sidebar,
            overlay,
            body,
            classes: self.classes.clone(),
            _listeners: listeners,
        })
    }
}

/// Shell nodes of one binding epoch and the listeners attached to them.
pub struct BrowserBinding {
    toggle: Element,
    sidebar: Element,
    overlay: Element,
    body: HtmlElement,
    classes: StateClasses,
    _listeners: Vec<EventListener>,
}

impl BrowserBinding {
    fn apply(&self, view: ShellView) -> Result<(), ShellError> {
        self.sidebar
            .class_list()
            .toggle_with_force(&self.classes.sidebar_hidden, !view.sidebar_visible)
            .map_err(js_error)?;
        self.overlay
            .class_list()
            .toggle_with_force(&self.classes.overlay_hidden, !view.overlay_visible)
            .map_err(js_error)?;
        self.body
            .class_list()
            .toggle_with_force(&self.classes.scroll_lock, view.scroll_locked)
            .map_err(js_error)?;
        self.toggle
            .set_attribute("aria-expanded", bool_attr(view.sidebar_visible))
            .map_err(js_error)?;
        Ok(())
    }
}

impl ShellBinding for BrowserBinding {
    fn render(&self, view: ShellView) {
        if let Err(err) = self.apply(view) {
            log::warn!("failed to render shell state: {err}");
        }
    }
}

fn bool_attr(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
