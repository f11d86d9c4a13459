//! Shell configuration.
//!
//! Centralizes the constants the navigation shell depends on: the layout
//! breakpoint, the DOM contract with the page templates, the excluded routes
//! and the search asset locations. [`ShellConfig`] bundles them into a value
//! that a page may override at boot.

use serde::Deserialize;

use crate::models::{AssetKind, RouteRules, SearchAsset};

// =============================================================================
// Layout
// =============================================================================

/// Viewport widths strictly below this value (in CSS pixels) are "narrow".
pub const NARROW_BREAKPOINT_PX: f64 = 1024.0;

// =============================================================================
// DOM Contract
// =============================================================================

/// Element ids rendered by the page templates.
pub mod elements {
    /// Button that opens and closes the sidebar.
    pub const TOGGLE_ID: &str = "sidebar-toggle";
    /// Collapsible sidebar panel.
    pub const SIDEBAR_ID: &str = "sidebar";
    /// Backdrop shown behind the sidebar on narrow viewports.
    pub const OVERLAY_ID: &str = "sidebar-overlay";
}

/// State classes toggled on the shell nodes.
pub mod classes {
    /// Present on the sidebar while it is slid out of view.
    pub const SIDEBAR_HIDDEN: &str = "-translate-x-full";
    /// Present on the overlay while it is not displayed.
    pub const OVERLAY_HIDDEN: &str = "hidden";
    /// Present on `<body>` while the page behind the sidebar must not scroll.
    pub const SCROLL_LOCK: &str = "overflow-hidden";
}

// =============================================================================
// Routing
// =============================================================================

/// Routes on which the sidebar and search are suppressed.
pub mod routes {
    /// Paths excluded by exact match.
    pub const EXCLUDED_EXACT: &[&str] = &["/login", "/register", "/profile"];
    /// Namespaces excluded together with everything below them.
    pub const EXCLUDED_PREFIXES: &[&str] = &["/auth"];
}

/// Events dispatched by the page framework.
pub mod events {
    /// Fired on `document` once a soft navigation has swapped the page content.
    pub const SOFT_NAVIGATION: &str = "astro:page-load";
}

// =============================================================================
// Search
// =============================================================================

/// Search widget assets, injected in declaration order.
pub mod search {
    pub const RUNTIME_URL: &str = "/pagefind/pagefind.js";
    pub const UI_URL: &str = "/pagefind/pagefind-ui.js";
    pub const STYLESHEET_URL: &str = "/pagefind/pagefind-ui.css";
}

/// Name of the `window` property a page can set to override [`ShellConfig`].
pub const CONFIG_GLOBAL: &str = "__QA_SHELL_CONFIG__";

// =============================================================================
// ShellConfig
// =============================================================================

/// Runtime configuration for the shell.
///
/// Every field falls back to the constants above, so a page override only
/// needs to name the values it changes:
///
/// ```ignore
/// window.__QA_SHELL_CONFIG__ = { narrowBreakpointPx: 960, verbose: true };
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShellConfig {
    /// Width below which the sidebar becomes a modal drawer.
    pub narrow_breakpoint_px: f64,
    pub elements: ElementIds,
    pub classes: StateClasses,
    pub routes: RouteRules,
    /// Event name signalling a completed soft navigation.
    pub soft_navigation_event: String,
    pub search: SearchAssets,
    /// Emit debug-level log records.
    pub verbose: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            narrow_breakpoint_px: NARROW_BREAKPOINT_PX,
            elements: ElementIds::default(),
            classes: StateClasses::default(),
            routes: RouteRules::default(),
            soft_navigation_event: events::SOFT_NAVIGATION.to_string(),
            search: SearchAssets::default(),
            verbose: false,
        }
    }
}

/// Ids of the three nodes the shell controller wires up.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElementIds {
    pub toggle: String,
    pub sidebar: String,
    pub overlay: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            toggle: elements::TOGGLE_ID.to_string(),
            sidebar: elements::SIDEBAR_ID.to_string(),
            overlay: elements::OVERLAY_ID.to_string(),
        }
    }
}

/// Class names that mirror the shell state in the DOM.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StateClasses {
    pub sidebar_hidden: String,
    pub overlay_hidden: String,
    pub scroll_lock: String,
}

impl Default for StateClasses {
    fn default() -> Self {
        Self {
            sidebar_hidden: classes::SIDEBAR_HIDDEN.to_string(),
            overlay_hidden: classes::OVERLAY_HIDDEN.to_string(),
            scroll_lock: classes::SCROLL_LOCK.to_string(),
        }
    }
}

/// URLs of the search widget assets.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchAssets {
    pub runtime_url: String,
    pub ui_url: String,
    pub stylesheet_url: String,
}

impl SearchAssets {
    /// Assets in injection order: runtime module, UI module, stylesheet.
    pub fn assets(&self) -> Vec<SearchAsset> {
        vec![
            SearchAsset::new(AssetKind::ModuleScript, &self.runtime_url),
            SearchAsset::new(AssetKind::ModuleScript, &self.ui_url),
            SearchAsset::new(AssetKind::Stylesheet, &self.stylesheet_url),
        ]
    }
}

impl Default for SearchAssets {
    fn default() -> Self {
        Self {
            runtime_url: search::RUNTIME_URL.to_string(),
            ui_url: search::UI_URL.to_string(),
            stylesheet_url: search::STYLESHEET_URL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_override_yields_defaults() {
        let config: ShellConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ShellConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config: ShellConfig = serde_json::from_str(
            r#"{
                "narrowBreakpointPx": 960,
                "elements": { "toggle": "menu-button" },
                "search": { "uiUrl": "/search/ui.js" },
                "verbose": true
            }"#,
        )
        .unwrap();

        assert_eq!(config.narrow_breakpoint_px, 960.0);
        assert_eq!(config.elements.toggle, "menu-button");
        assert_eq!(config.elements.sidebar, elements::SIDEBAR_ID);
        assert_eq!(config.search.ui_url, "/search/ui.js");
        assert_eq!(config.search.runtime_url, search::RUNTIME_URL);
        assert_eq!(config.soft_navigation_event, events::SOFT_NAVIGATION);
        assert!(config.verbose);
    }

    #[test]
    fn test_search_asset_order() {
        let assets = SearchAssets::default().assets();
        let kinds: Vec<_> = assets.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![
                AssetKind::ModuleScript,
                AssetKind::ModuleScript,
                AssetKind::Stylesheet
            ]
        );
        assert_eq!(assets[0].url, search::RUNTIME_URL);
        assert_eq!(assets[1].url, search::UI_URL);
        assert_eq!(assets[2].url, search::STYLESHEET_URL);
    }
}
