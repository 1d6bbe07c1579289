pub mod html;
pub mod style;

#[cfg(test)]
mod tests;

use crate::error::Result;
use lol_html::{RewriteStrSettings, element, rewrite_str};
use std::cell::RefCell;
use std::collections::HashSet;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use url::Url;

/// Markup of one page, owned by that page's pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlDocument {
    markup: String,
}

impl HtmlDocument {
    /// Takes ownership of the fetched HTML text
    pub fn parse(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.markup
    }

    pub fn into_string(self) -> String {
        self.markup
    }

    /// Writes the document and flushes the writer
    pub async fn write_to<W>(&self, writer: &mut W) -> std::io::Result<()>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        writer.write_all(self.markup.as_bytes()).await?;
        writer.flush().await?;
        writer.shutdown().await
    }
}

/// Rewrites references in `document` and returns the resources it needs.
///
/// - `<a href>`: relative values become absolute; never returned.
/// - `<link href>`, `<img src>`, `<script src>`: a leading `/` is stripped in
///   the markup; the value as written is resolved against `base` and returned.
/// - `style="background-image: url(...)"`: same rule, first match per element.
///
/// Only the targeted attribute values change; all other bytes are preserved.
/// References that cannot be resolved against `base` are skipped.
pub fn rewrite_and_collect(document: &mut HtmlDocument, base: &Url) -> Result<HashSet<Url>> {
    let resources = RefCell::new(HashSet::new());

    let rewritten = rewrite_str(
        &document.markup,
        RewriteStrSettings {
            element_content_handlers: vec![
                element!("a[href]", |el| html::absolutize_anchor(el, base)),
                element!("link[href]", |el| {
                    if let Some(url) = html::resource_reference(el, base)? {
                        resources.borrow_mut().insert(url);
                    }
                    Ok(())
                }),
                element!("img[src]", |el| {
                    if let Some(url) = html::resource_reference(el, base)? {
                        resources.borrow_mut().insert(url);
                    }
                    Ok(())
                }),
                element!("script[src]", |el| {
                    if let Some(url) = html::resource_reference(el, base)? {
                        resources.borrow_mut().insert(url);
                    }
                    Ok(())
                }),
                element!("*[style]", |el| {
                    if let Some(url) = html::background_image_reference(el, base)? {
                        resources.borrow_mut().insert(url);
                    }
                    Ok(())
                }),
            ],
            ..RewriteStrSettings::new()
        },
    )?;

    document.markup = rewritten;
    let resources = resources.into_inner();
    ::log::debug!("Found {} resources in {}", resources.len(), base);
    Ok(resources)
}
