//! Data models for the navigation shell.
//!
//! - [`RouteClassification`], [`RouteRules`] - Route gating for auth pages
//! - [`ShellState`], [`Visibility`], [`ShellView`] - Sidebar state machine
//! - [`Breakpoint`] - Narrow/wide viewport policy input
//! - [`SearchAsset`], [`AssetKind`] - Search widget resources

mod asset;
mod route;
mod shell;

pub use asset::{AssetKind, SearchAsset};
pub use route::{RouteClassification, RouteRules, classify_route};
pub use shell::{Breakpoint, ShellState, ShellView, Visibility};
