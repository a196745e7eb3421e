const LINE_WIDTH: usize = 78;

/// Derive the plain-text part sent alongside the HTML body.
///
/// Multipart conventions expect a text rendering next to the HTML part so
/// text-only clients get something readable instead of raw markup. A
/// document the renderer cannot parse falls back to the input unchanged.
pub fn plain_text_from_html(html: &str) -> String {
    html2text::from_read(html.as_bytes(), LINE_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::plain_text_from_html;

    #[test]
    fn markup_is_stripped() {
        let text = plain_text_from_html("<h1>x</h1>");
        assert!(text.contains('x'));
        assert!(!text.contains('<'));
    }

    #[test]
    fn link_text_stays_readable() {
        let text =
            plain_text_from_html(r#"<p>Visit <a href="https://example.com">our site</a>.</p>"#);
        assert!(text.contains("our site"));
        assert!(!text.contains("</a>"));
    }

    #[test]
    fn entities_are_decoded() {
        let text = plain_text_from_html("<p>fish &amp; chips</p>");
        assert!(text.contains("fish & chips"));
    }
}
