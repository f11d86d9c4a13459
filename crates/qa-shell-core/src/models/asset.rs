//! Search widget resources.

/// How a resource is attached to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// `<script type="module" src=...>`
    ModuleScript,
    /// `<link rel="stylesheet" href=...>`
    Stylesheet,
}

impl AssetKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ModuleScript => "module-script",
            Self::Stylesheet => "stylesheet",
        }
    }
}

/// A resource the feature gate injects into the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchAsset {
    pub kind: AssetKind,
    pub url: String,
}

impl SearchAsset {
    pub fn new(kind: AssetKind, url: impl Into<String>) -> Self {
        Self {
            kind,
            url: url.into(),
        }
    }
}
