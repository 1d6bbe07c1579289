use regex::Regex;
use std::sync::LazyLock;

/// `background-image: url(...)` with an optionally single or double quoted target
static BACKGROUND_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)background-image\s*:\s*url\((?:'([^'")]+)'|"([^'")]+)"|([^'")]+))\)"#,
    )
    .expect("background-image pattern is valid")
});

/// A background image reference found in an inline style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundImage {
    /// Reference exactly as written in the style text
    pub reference: String,
    /// Style text with the reference made site-root relative
    pub style: String,
}

/// Finds the first background image in `style` and strips a leading `/` from it.
///
/// Only the first `background-image` declaration is considered; later ones are
/// left untouched.
pub fn rewrite_background_image(style: &str) -> Option<BackgroundImage> {
    let captures = BACKGROUND_IMAGE.captures(style)?;
    let reference = captures
        .get(1)
        .or_else(|| captures.get(2))
        .or_else(|| captures.get(3))?
        .as_str();

    if reference.is_empty() {
        return None;
    }

    let style = if reference.starts_with('/') {
        style.replace(reference, reference.trim_start_matches('/'))
    } else {
        style.to_string()
    };

    Some(BackgroundImage {
        reference: reference.to_string(),
        style,
    })
}
