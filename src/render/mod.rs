//! Rendering collaborators for the preview surface
//!
//! The diagram layout engine is external by design; [`DiagramRenderer`] is
//! the seam it plugs into, with a built-in placeholder implementation used
//! when no engine is wired up. Markdown rendering is done in-process with
//! pulldown-cmark and routes fenced diagram blocks through the same seam.

pub mod diagram;
pub mod markdown;

pub use diagram::{DiagramRenderer, SourceBlockRenderer};
pub use markdown::MarkdownRenderer;
