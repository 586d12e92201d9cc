//! Core library for the markdown preview.
//!
//! This crate turns a preview URI into a complete, theme-aware HTML document
//! and tells subscribers when a previewed document has gone stale.
//!
//! # Modules
//!
//! - [`uri`] - Preview URIs derived from source file paths
//! - [`href`] - Resolution of stylesheet references against the source file
//! - [`theme`] - Theme variants and the scrollbar styles for each of them
//! - [`assemble`] - Composition of the final HTML document
//! - [`render`] - Markdown to HTML conversion with a code block callback
//! - [`highlight`] - Syntax highlighting seam with an escaped-text fallback
//! - [`emitter`] - Broadcast of change events to subscribers
//! - [`provider`] - The content provider orchestrating a render
//! - [`triggers`] - Save and configuration listeners calling `update`
//! - [`commands`] - Preview commands and view column selection

pub mod assemble;
pub mod commands;
pub mod emitter;
pub mod highlight;
pub mod href;
pub mod provider;
pub mod render;
pub mod theme;
pub mod triggers;
pub mod uri;

// Re-export commonly used types at crate root
pub use assemble::{assemble, FixedAssets};
pub use commands::{ActiveEditor, PreviewCommand, ShowPreview, ViewColumn};
pub use emitter::{EventEmitter, Subscription};
pub use highlight::{escape_html, highlight_code_block, CodeBlock, CodeHighlighter, HighlightError};
pub use href::resolve_href;
pub use provider::{ContentProvider, PreviewHost, ProviderError, StyleConfig};
pub use render::{to_html, RenderOptions};
pub use theme::ThemeVariant;
pub use triggers::{is_markdown_file, ChangeTriggers, MARKDOWN_EXTENSIONS};
pub use uri::{DocumentUri, PREVIEW_SCHEME};
