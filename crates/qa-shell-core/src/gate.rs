//! Feature gate for the search widget.
//!
//! The search runtime is heavy and must never appear on auth pages. The gate
//! injects its assets once per full page load, and only when the route
//! allows it. Soft navigations never go through here: the assets injected on
//! the full load stay in the document.

use crate::error::ShellError;
use crate::models::{RouteClassification, SearchAsset};

/// Attaches an asset to the document.
///
/// Loading is the browser's business; an injector only adds the tag.
pub trait AssetInjector {
    fn inject(&self, asset: &SearchAsset) -> Result<(), ShellError>;
}

/// What [`AssetLoader::load_if_allowed`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Route is excluded; nothing injected.
    Excluded,
    /// Assets were already injected during this page load.
    AlreadyLoaded,
    /// Injection ran; `injected` of the configured assets were attached.
    Injected { injected: usize },
}

/// Injects the search assets at most once.
#[derive(Debug)]
pub struct AssetLoader<I> {
    injector: I,
    assets: Vec<SearchAsset>,
    loaded: bool,
}

impl<I: AssetInjector> AssetLoader<I> {
    pub fn new(injector: I, assets: Vec<SearchAsset>) -> Self {
        Self {
            injector,
            assets,
            loaded: false,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Inject every asset, in order, unless the route is excluded or this
    /// loader already ran.
    ///
    /// A failing asset is logged and skipped; the rest are still attached.
    /// The loader counts as loaded even after failures, since a retry would
    /// duplicate the tags that did make it in.
    pub fn load_if_allowed(&mut self, classification: RouteClassification) -> LoadOutcome {
        if classification.is_excluded_route {
            log::debug!("search assets skipped on excluded route");
            return LoadOutcome::Excluded;
        }
        if self.loaded {
            return LoadOutcome::AlreadyLoaded;
        }
        self.loaded = true;

        let mut injected = 0;
        for asset in &self.assets {
            match self.injector.inject(asset) {
                Ok(()) => injected += 1,
                Err(err) => log::warn!("failed to inject {}: {err}", asset.url),
            }
        }
        log::debug!("search assets injected: {injected}/{}", self.assets.len());

        LoadOutcome::Injected { injected }
    }
}
