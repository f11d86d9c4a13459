//! Tag injection for the search widget assets.

use web_sys::{Document, Element};

use qa_shell_core::{AssetInjector, AssetKind, SearchAsset, ShellError};

use crate::dom::{self, js_error};

/// Attribute marking tags added by the shell, valued with the asset kind.
pub const ASSET_MARKER_ATTR: &str = "data-qa-shell-asset";

/// Appends `<script type="module">` and `<link rel="stylesheet">` tags to
/// `<head>`. Module scripts are deferred by the browser, so injection never
/// blocks rendering.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentInjector;

impl AssetInjector for DocumentInjector {
    fn inject(&self, asset: &SearchAsset) -> Result<(), ShellError> {
        let document = dom::document()?;
        let head = document
            .head()
            .ok_or(ShellError::NoDocumentElement("head"))?;

        let element = asset_element(&document, asset)?;
        element
            .set_attribute(ASSET_MARKER_ATTR, asset.kind.as_str())
            .map_err(js_error)?;
        head.append_child(&element).map_err(js_error)?;
        Ok(())
    }
}

fn asset_element(document: &Document, asset: &SearchAsset) -> Result<Element, ShellError> {
    let element = match asset.kind {
        AssetKind::ModuleScript => {
            let script = document.create_element("script").map_err(js_error)?;
            script.set_attribute("type", "module").map_err(js_error)?;
            script.set_attribute("src", &asset.url).map_err(js_error)?;
            script
        }
        AssetKind::Stylesheet => {
            let link = document.create_element("link").map_err(js_error)?;
            link.set_attribute("rel", "stylesheet").map_err(js_error)?;
            link.set_attribute("href", &asset.url).map_err(js_error)?;
            link
        }
    };
    Ok(element)
}
