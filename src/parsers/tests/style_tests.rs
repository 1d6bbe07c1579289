use crate::parsers::style::{BackgroundImage, rewrite_background_image};
use crate::parsers::{HtmlDocument, rewrite_and_collect};
use scraper::{Html, Selector};
use url::Url;

fn style_of(doc: &HtmlDocument, selector: &str) -> String {
    let html = Html::parse_document(doc.as_str());
    let selector = Selector::parse(selector).unwrap();
    html.select(&selector)
        .next()
        .and_then(|e| e.value().attr("style"))
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_image_from_style() {
        let mut doc = HtmlDocument::parse("<div style='background-image: url(bg.jpg)'></div>");
        let base = Url::parse("http://example.com/").unwrap();

        let resources = rewrite_and_collect(&mut doc, &base).unwrap();

        assert!(resources.contains(&Url::parse("http://example.com/bg.jpg").unwrap()));
        assert_eq!(style_of(&doc, "div"), "background-image: url(bg.jpg)");
    }

    #[test]
    fn test_root_relative_background_image_is_stripped() {
        let mut doc = HtmlDocument::parse(
            r#"<section style="color: red; background-image: url('/img/hero.jpg')"></section>"#,
        );
        let base = Url::parse("http://example.com/sub/").unwrap();

        let resources = rewrite_and_collect(&mut doc, &base).unwrap();

        assert!(resources.contains(&Url::parse("http://example.com/img/hero.jpg").unwrap()));
        assert_eq!(
            style_of(&doc, "section"),
            "color: red; background-image: url('img/hero.jpg')"
        );
    }

    #[test]
    fn test_quote_styles() {
        let cases = [
            ("background-image: url(a.png)", "a.png"),
            ("background-image: url('a.png')", "a.png"),
            ("background-image: url(\"a.png\")", "a.png"),
            ("BACKGROUND-IMAGE :url(a.png)", "a.png"),
        ];

        for (style, expected) in cases {
            let found = rewrite_background_image(style).expect(style);
            assert_eq!(found.reference, expected, "for {}", style);
            assert_eq!(found.style, style, "style must be unchanged for {}", style);
        }
    }

    #[test]
    fn test_mismatched_quotes_do_not_match() {
        assert_eq!(rewrite_background_image("background-image: url('a.png\")"), None);
    }

    #[test]
    fn test_only_first_background_image_is_processed() {
        let found =
            rewrite_background_image("background-image: url(/one.png); background-image: url(/two.png)")
                .unwrap();

        assert_eq!(
            found,
            BackgroundImage {
                reference: "/one.png".to_string(),
                style: "background-image: url(one.png); background-image: url(/two.png)"
                    .to_string(),
            }
        );
    }

    #[test]
    fn test_other_declarations_are_ignored() {
        assert_eq!(rewrite_background_image("background: url(a.png)"), None);
        assert_eq!(rewrite_background_image("color: blue"), None);
    }
}
