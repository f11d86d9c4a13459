//! Error types for the navigation shell.
//!
//! None of these reach the user. Event handlers log them and carry on, since
//! the shell is an enhancement layered over static content.

use thiserror::Error;

/// Failures while locating, binding or mutating shell DOM nodes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShellError {
    /// Browser window not available
    #[error("browser window not available")]
    NoWindow,
    /// Document not available on the window
    #[error("document not available")]
    NoDocument,
    /// Document has no `<body>` (or `<head>`) yet
    #[error("document element <{0}> not available")]
    NoDocumentElement(&'static str),
    /// A node of the DOM contract was not rendered on this page
    #[error("element #{0} not found")]
    MissingElement(String),
    /// A JavaScript call threw
    #[error("JavaScript error: {0}")]
    Js(String),
}

impl ShellError {
    /// Whether this error only means the page has no shell markup.
    ///
    /// Excluded routes render no sidebar, so this is the expected outcome
    /// there and is logged at debug level only.
    pub fn is_missing_dom(&self) -> bool {
        matches!(self, Self::MissingElement(_))
    }
}
