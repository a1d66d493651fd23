//! Diagram renderer seam
//!
//! The actual layout engine lives outside this crate. Everything that needs
//! a diagram rendered goes through [`DiagramRenderer`]; errors are plain
//! message strings surfaced verbatim in the inline error state.

use crate::util::escape_html;

/// External diagram layout engine
pub trait DiagramRenderer {
    /// Render diagram source to a markup fragment, or a syntax error
    /// message
    fn render(&self, source: &str) -> Result<String, String>;
}

/// Built-in fallback renderer: validates the header keyword and emits the
/// source as a tagged preformatted block instead of laid-out graphics.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceBlockRenderer;

impl DiagramRenderer for SourceBlockRenderer {
    fn render(&self, source: &str) -> Result<String, String> {
        let trimmed = source.trim();
        if trimmed.is_empty() {
            return Err("Diagram source is empty".to_string());
        }
        if !crate::classify::matches_diagram_anchor(trimmed) {
            let header = trimmed.lines().next().unwrap_or_default();
            return Err(format!("Unrecognized diagram header: {}", header));
        }
        Ok(format!(
            "<pre class=\"diagram\">{}</pre>",
            escape_html(trimmed)
        ))
    }
}
