//! Client-side navigation shell for the Q&A site.
//!
//! Target-independent half of the shell:
//! - [`ShellController`] - Sidebar state machine and listener lifecycle
//! - [`AssetLoader`] - Once-per-load injection of the search widget
//! - [`classify_route`] - Auth-route gating
//! - [`ShellConfig`] - Breakpoint, DOM contract and asset locations
//!
//! The browser bindings live in `qa-shell-web`.

pub mod config;
pub mod controller;
pub mod error;
pub mod gate;
pub mod models;

pub use config::ShellConfig;
pub use controller::{ShellBinding, ShellController, ShellDom, ShellEvents};
pub use error::ShellError;
pub use gate::{AssetInjector, AssetLoader, LoadOutcome};
pub use models::{
    AssetKind, Breakpoint, RouteClassification, RouteRules, SearchAsset, ShellState, ShellView,
    Visibility, classify_route,
};
