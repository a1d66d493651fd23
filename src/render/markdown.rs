//! Markdown to HTML renderer using pulldown-cmark
//!
//! Fenced blocks tagged `mermaid` are intercepted and routed through the
//! diagram renderer seam; a failed embed becomes an inline error block
//! while the rest of the document still renders.

use pulldown_cmark::{html, CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

use super::diagram::DiagramRenderer;
use crate::util::escape_html;

/// Fence language tag that marks embedded diagram source
const DIAGRAM_FENCE: &str = "mermaid";

#[derive(Debug, Clone, Copy)]
pub struct MarkdownRenderer {
    options: Options,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS;
        Self { options }
    }

    /// Render markdown to an HTML fragment, embedding diagram fences via
    /// `diagrams`
    pub fn render(&self, markdown: &str, diagrams: &dyn DiagramRenderer) -> String {
        let parser = Parser::new_ext(markdown, self.options);

        let mut events: Vec<Event> = Vec::new();
        // Collecting a diagram fence's text while Some
        let mut fence: Option<String> = None;
        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(ref lang)))
                    if is_diagram_fence(lang) =>
                {
                    fence = Some(String::new());
                }
                Event::Text(ref text) if fence.is_some() => {
                    if let Some(buf) = fence.as_mut() {
                        buf.push_str(text);
                    }
                }
                Event::End(TagEnd::CodeBlock) if fence.is_some() => {
                    let source = fence.take().unwrap_or_default();
                    events.push(Event::Html(embed_diagram(&source, diagrams).into()));
                }
                other => events.push(other),
            }
        }

        let mut out = String::new();
        html::push_html(&mut out, events.into_iter());
        out
    }
}

fn is_diagram_fence(lang: &str) -> bool {
    lang.split_whitespace().next() == Some(DIAGRAM_FENCE)
}

fn embed_diagram(source: &str, diagrams: &dyn DiagramRenderer) -> String {
    match diagrams.render(source) {
        Ok(markup) => format!("<div class=\"embedded-diagram\">{}</div>\n", markup),
        // One broken embed must not take down the whole document
        Err(e) => format!(
            "<div class=\"diagram-error\">{}</div>\n",
            escape_html(&e)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::diagram::SourceBlockRenderer;

    fn render(md: &str) -> String {
        MarkdownRenderer::new().render(md, &SourceBlockRenderer)
    }

    #[test]
    fn test_basic_markdown() {
        let html = render("# Hello\n\nWorld");
        assert!(html.contains("<h1>"));
        assert!(html.contains("Hello"));
        assert!(html.contains("<p>World</p>"));
    }

    #[test]
    fn test_tables_enabled() {
        let html = render("| A | B |\n|---|---|\n| 1 | 2 |");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn test_plain_code_fence_untouched() {
        let html = render("```rust\nfn main() {}\n```");
        assert!(html.contains("<pre>"));
        assert!(html.contains("fn main()"));
        assert!(!html.contains("embedded-diagram"));
    }

    #[test]
    fn test_diagram_fence_is_embedded() {
        let html = render("before\n\n```mermaid\ngraph TD\nA --> B\n```\n\nafter");
        assert!(html.contains("embedded-diagram"));
        assert!(html.contains("class=\"diagram\""));
        // The fence's own pre/code wrapper is replaced
        assert!(!html.contains("<code class=\"language-mermaid\""));
        assert!(html.contains("<p>before</p>"));
        assert!(html.contains("<p>after</p>"));
    }

    #[test]
    fn test_broken_embed_renders_inline_error() {
        let html = render("# Doc\n\n```mermaid\nnot a diagram\n```");
        assert!(html.contains("diagram-error"));
        // Rest of the document is intact
        assert!(html.contains("<h1>"));
    }
}
