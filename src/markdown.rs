use pulldown_cmark::{self as md, html};

use crate::models::LocalizedText;

/// Renders a Markdown document to HTML.
///
/// Tokenizes with pulldown-cmark and writes HTML from the event stream, so
/// nesting (lists in lists, list-like lines in code blocks) is handled by the
/// parser rather than by substitution order.
pub fn render_html(text: &str) -> String {
    let mut options = md::Options::empty();
    options.insert(md::Options::ENABLE_TABLES);
    options.insert(md::Options::ENABLE_STRIKETHROUGH);
    options.insert(md::Options::ENABLE_TASKLISTS);

    let parser = md::Parser::new_ext(text, options);

    let mut output = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut output, parser);
    output
}

/// Renders both translations of a Markdown body.
pub fn render_localized(body: &LocalizedText) -> LocalizedText {
    body.map(render_html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headings_and_lists() {
        let html = render_html("## Title\n\n- one\n- two\n");
        assert!(html.contains("<h2>Title</h2>"));
        assert!(html.contains("<li>one</li>"));
    }

    #[test]
    fn list_markers_inside_code_blocks_stay_literal() {
        let html = render_html("```\n- not a list\n```\n");
        assert!(html.contains("<pre><code>- not a list\n</code></pre>"));
        assert!(!html.contains("<li>"));
    }

    #[test]
    fn nested_lists() {
        let html = render_html("- outer\n  - inner\n");
        assert_eq!(html.matches("<ul>").count(), 2);
    }
}
