//! Browser bindings for the Q&A navigation shell.
//!
//! - [`BrowserDom`] - Locates shell nodes and attaches per-epoch listeners
//! - [`DocumentInjector`] - Adds the search widget tags to `<head>`
//! - [`EventListener`] - Listener handle that detaches on drop
//! - `boot` - Page-level event wiring (wasm only)

pub mod assets;
#[cfg(target_arch = "wasm32")]
pub mod boot;
pub mod dom;
pub mod listener;
pub mod surface;

pub use assets::{ASSET_MARKER_ATTR, DocumentInjector};
pub use listener::EventListener;
pub use surface::{BrowserBinding, BrowserDom};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::wasm_bindgen;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    boot::start();
}
