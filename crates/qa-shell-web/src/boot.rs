//! Page-level wiring.
//!
//! Installs the window/document listeners that drive the shell for the
//! lifetime of the page:
//!
//! - **Document parsed**: classify the route, bind the shell, and inject
//!   the search assets unless the route is excluded
//! - **resize**: apply the viewport policy
//! - **popstate** and the framework's soft-navigation event: rebind once
//!   the new content has settled
//!
//! These listeners are installed once and never removed. Only the per-epoch
//! shell listeners are rebound on navigation.

use gloo_timers::future::TimeoutFuture;
use log::Level;
use wasm_bindgen_futures::spawn_local;

use qa_shell_core::config::CONFIG_GLOBAL;
use qa_shell_core::{AssetLoader, Breakpoint, ShellConfig, ShellController, ShellError};

use crate::assets::DocumentInjector;
use crate::dom;
use crate::listener::EventListener;
use crate::surface::BrowserDom;

pub type BrowserShell = ShellController<BrowserDom>;

/// Entry point: set up panic reporting and logging, then boot the shell.
pub fn start() {
    console_error_panic_hook::set_once();

    let (config, config_error) = load_config();
    let level = if config.verbose {
        Level::Debug
    } else {
        Level::Info
    };
    let _ = console_log::init_with_level(level);
    if let Some(err) = config_error {
        log::warn!("ignoring malformed {CONFIG_GLOBAL}: {err}");
    }

    if let Err(err) = install(&config) {
        log::warn!("shell not started: {err}");
    }
}

/// Effective configuration, plus the error if the page override was rejected.
pub fn load_config() -> (ShellConfig, Option<serde_wasm_bindgen::Error>) {
    match read_config() {
        Ok(config) => (config, None),
        Err(err) => (ShellConfig::default(), Some(err)),
    }
}

/// Page override from `window.__QA_SHELL_CONFIG__`, or the defaults.
pub fn read_config() -> Result<ShellConfig, serde_wasm_bindgen::Error> {
    match dom::global(CONFIG_GLOBAL) {
        Some(value) => serde_wasm_bindgen::from_value(value),
        None => Ok(ShellConfig::default()),
    }
}

/// Create the shell and attach the page-lifetime listeners that drive it.
///
/// Meant to run once per page load: each call injects the search assets
/// again and adds another set of window/document listeners.
pub fn install(config: &ShellConfig) -> Result<BrowserShell, ShellError> {
    let window = dom::window()?;
    let document = dom::document()?;

    let shell = ShellController::new(
        BrowserDom::new(config),
        Breakpoint::new(config.narrow_breakpoint_px),
    );

    let on_ready = {
        let shell = shell.clone();
        let rules = config.routes.clone();
        let mut loader = AssetLoader::new(DocumentInjector, config.search.assets());
        move || {
            let path = dom::current_path();
            let classification = rules.classify(&path);
            log::debug!(
                "page loaded: {path} (excluded={})",
                classification.is_excluded_route
            );

            shell.initialize();
            spawn_local(async move {
                loader.load_if_allowed(classification);
            });
        }
    };
    when_parsed(&document, on_ready)?;

    let on_resize = shell.clone();
    EventListener::new(&window, "resize", move |_| on_resize.on_resize())?.forget();

    let on_popstate = shell.clone();
    EventListener::new(&window, "popstate", move |_| {
        schedule_reinitialize(on_popstate.clone());
    })?
    .forget();

    let on_navigation = shell.clone();
    EventListener::new(&document, &config.soft_navigation_event, move |_| {
        schedule_reinitialize(on_navigation.clone());
    })?
    .forget();

    Ok(shell)
}

/// Run `f` once the initial document parse has finished.
fn when_parsed(
    document: &web_sys::Document,
    f: impl FnOnce() + 'static,
) -> Result<(), ShellError> {
    if !dom::is_loading(document) {
        f();
        return Ok(());
    }
    let mut f = Some(f);
    EventListener::new(document, "DOMContentLoaded", move |_| {
        if let Some(f) = f.take() {
            f();
        }
    })?
    .forget();
    Ok(())
}

/// Rebind after the current task, once the swapped-in content is in place.
fn schedule_reinitialize(shell: BrowserShell) {
    spawn_local(async move {
        TimeoutFuture::new(0).await;
        shell.initialize();
    });
}
