use crate::parsers::style;
use crate::utils::is_absolute_url;
use lol_html::html_content::Element;
use std::error::Error;
use url::Url;

pub(crate) type HandlerError = Box<dyn Error + Send + Sync>;

/// Reads an attribute with character references decoded
fn attribute(el: &Element<'_, '_>, name: &str) -> Option<String> {
    el.get_attribute(name)
        .map(|raw| html_escape::decode_html_entities(&raw).into_owned())
}

fn resolve(base: &Url, reference: &str) -> Option<Url> {
    match base.join(reference) {
        Ok(url) => Some(url),
        Err(e) => {
            ::log::debug!("Skipping unresolvable reference '{}': {}", reference, e);
            None
        }
    }
}

/// Makes a relative anchor `href` absolute. Anchors are never fetched.
pub fn absolutize_anchor(el: &mut Element<'_, '_>, base: &Url) -> Result<(), HandlerError> {
    let Some(href) = attribute(el, "href") else {
        return Ok(());
    };
    if href.is_empty() || is_absolute_url(&href) {
        return Ok(());
    }

    if let Some(absolute) = resolve(base, &href) {
        el.set_attribute("href", absolute.as_str())?;
    }
    Ok(())
}

/// Handles `href` on `<link>` and `src` on `<img>`/`<script>`.
///
/// A site-root reference (`/x`) is rewritten to `x` so it points into the host
/// folder; the fetch URL is always resolved from the value as written.
pub fn resource_reference(
    el: &mut Element<'_, '_>,
    base: &Url,
) -> Result<Option<Url>, HandlerError> {
    let name = if el.tag_name().eq_ignore_ascii_case("link") {
        "href"
    } else {
        "src"
    };

    let Some(reference) = attribute(el, name) else {
        return Ok(None);
    };
    if reference.is_empty() {
        return Ok(None);
    }

    if reference.starts_with('/') {
        el.set_attribute(name, reference.trim_start_matches('/'))?;
    }

    Ok(resolve(base, &reference))
}

/// Handles the first `background-image: url(...)` of an inline `style`
pub fn background_image_reference(
    el: &mut Element<'_, '_>,
    base: &Url,
) -> Result<Option<Url>, HandlerError> {
    let Some(value) = attribute(el, "style") else {
        return Ok(None);
    };
    let Some(image) = style::rewrite_background_image(&value) else {
        return Ok(None);
    };

    if image.style != value {
        el.set_attribute("style", &image.style)?;
    }

    Ok(resolve(base, &image.reference))
}
