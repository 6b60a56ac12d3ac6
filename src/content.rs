//! Readable-text extraction from fetched HTML pages.

use ego_tree::iter::Edge;
use scraper::{ElementRef, Html, Node};

use crate::{Result, SearchError};

/// Maximum characters of page text attached to a result.
pub const MAX_CONTENT_CHARS: usize = 10_000;

/// Elements whose whole subtree is dropped before text extraction.
const SKIPPED_TAGS: &[&str] = &["script", "style", "header", "footer", "nav"];

/// Extracts readable text from an HTML document.
///
/// Script, style, header, footer and navigation subtrees are dropped, runs of
/// whitespace collapse to one space, and the text is cut to `max_chars`
/// characters.
///
/// # Errors
///
/// Returns [`SearchError::Parse`] if the page has no text left.
pub fn extract_text(html: &str, max_chars: usize) -> Result<String> {
    let document = Html::parse_document(html);

    let mut raw = String::with_capacity(html.len() / 2);
    collect_text(document.root_element(), &mut raw);

    let text = collapse_whitespace(&raw);
    if text.is_empty() {
        return Err(SearchError::Parse("no extractable content found".into()));
    }
    Ok(truncate_chars(text, max_chars))
}

fn collect_text(root: ElementRef<'_>, out: &mut String) {
    // Depth inside skipped subtrees; text is kept only at zero.
    let mut skipped = 0usize;
    for edge in root.traverse() {
        match edge {
            Edge::Open(node) => match node.value() {
                Node::Element(element) if SKIPPED_TAGS.contains(&element.name()) => skipped += 1,
                Node::Text(text) if skipped == 0 => {
                    out.push_str(text);
                    out.push(' ');
                }
                _ => {}
            },
            Edge::Close(node) => {
                if let Node::Element(element) = node.value() {
                    if SKIPPED_TAGS.contains(&element.name()) {
                        skipped = skipped.saturating_sub(1);
                    }
                }
            }
        }
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn truncate_chars(text: String, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => text[..end].to_string(),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_body_text() {
        let html = "<html><body><h1>Hello</h1><p>World of   Rust</p></body></html>";
        assert_eq!(extract_text(html, MAX_CONTENT_CHARS).unwrap(), "Hello World of Rust");
    }

    #[test]
    fn test_strips_boilerplate_elements() {
        let html = r#"<html><head><style>body { color: red; }</style>
            <script>var tracking = 1;</script></head>
            <body>
            <header>Site header</header>
            <nav><a href="/">Home</a></nav>
            <article>Article content here</article>
            <footer>Copyright</footer>
            </body></html>"#;
        let text = extract_text(html, MAX_CONTENT_CHARS).unwrap();
        assert_eq!(text, "Article content here");
    }

    #[test]
    fn test_nested_skipped_tags() {
        let html = "<body><div>Keep<nav>Drop<span>Also drop</span></nav> this</div></body>";
        assert_eq!(extract_text(html, MAX_CONTENT_CHARS).unwrap(), "Keep this");
    }

    #[test]
    fn test_collapses_newlines_and_tabs() {
        let html = "<body><p>one\n\n\ttwo</p>\n<p>three</p></body>";
        assert_eq!(extract_text(html, MAX_CONTENT_CHARS).unwrap(), "one two three");
    }

    #[test]
    fn test_truncates_to_char_limit() {
        let html = format!("<body><p>{}</p></body>", "a".repeat(MAX_CONTENT_CHARS + 500));
        let text = extract_text(&html, MAX_CONTENT_CHARS).unwrap();
        assert_eq!(text.chars().count(), MAX_CONTENT_CHARS);
    }

    #[test]
    fn test_truncation_respects_multibyte_chars() {
        let html = "<body><p>编程语言教程</p></body>";
        assert_eq!(extract_text(html, 2).unwrap(), "编程");
    }

    #[test]
    fn test_deeply_nested_page_does_not_overflow() {
        let depth = 50_000;
        let html = format!("<body>{}deep text{}</body>", "<div>".repeat(depth), "</div>".repeat(depth));
        let text = std::thread::spawn(move || extract_text(&html, MAX_CONTENT_CHARS))
            .join()
            .expect("extraction thread panicked")
            .unwrap();
        assert_eq!(text, "deep text");
    }

    #[test]
    fn test_deeply_nested_skipped_subtree() {
        let depth = 50_000;
        let html = format!(
            "<body><nav>{}hidden{}</nav><p>shown</p></body>",
            "<div>".repeat(depth),
            "</div>".repeat(depth)
        );
        let text = std::thread::spawn(move || extract_text(&html, MAX_CONTENT_CHARS))
            .join()
            .expect("extraction thread panicked")
            .unwrap();
        assert_eq!(text, "shown");
    }

    #[test]
    fn test_empty_page_is_an_error() {
        let html = "<html><body><script>only()</script></body></html>";
        assert!(matches!(extract_text(html, MAX_CONTENT_CHARS), Err(SearchError::Parse(_))));
    }
}
