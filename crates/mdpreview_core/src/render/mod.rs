//! Markdown to HTML rendering.
//!
//! This module drives pulldown-cmark with support for:
//! - GitHub Flavored Markdown (tables, strikethrough, task lists)
//! - Heading IDs for anchor links
//! - A per-fenced-block callback producing the code block markup
//!
//! Raw HTML embedded in the source is passed through unescaped.

mod heading;

use pulldown_cmark::{CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};

pub use heading::slugify;

/// Options for rendering markdown to HTML.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Enable GitHub Flavored Markdown tables
    pub enable_tables: bool,
    /// Enable strikethrough syntax (~~text~~)
    pub enable_strikethrough: bool,
    /// Enable task list items ([x] and [ ])
    pub enable_tasklists: bool,
    /// Enable heading attributes ({#id .class})
    pub enable_heading_attributes: bool,
    /// Give every heading without an explicit id a slug id
    pub enable_heading_anchors: bool,
}

impl RenderOptions {
    /// Options used by the preview, everything enabled.
    pub fn preview() -> Self {
        Self {
            enable_tables: true,
            enable_strikethrough: true,
            enable_tasklists: true,
            enable_heading_attributes: true,
            enable_heading_anchors: true,
        }
    }

    fn to_pulldown_options(&self) -> Options {
        let mut options = Options::empty();
        if self.enable_tables {
            options.insert(Options::ENABLE_TABLES);
        }
        if self.enable_strikethrough {
            options.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if self.enable_tasklists {
            options.insert(Options::ENABLE_TASKLISTS);
        }
        if self.enable_heading_attributes {
            options.insert(Options::ENABLE_HEADING_ATTRIBUTES);
        }
        options
    }
}

/// Render markdown content to HTML.
///
/// `highlight` is called once per fenced code block with the code text and
/// the block's language (the first word of the info string, possibly empty),
/// its return value is emitted verbatim in place of the block.
///
/// # Example
///
/// ```
/// use mdpreview_core::render::{to_html, RenderOptions};
///
/// let html = to_html("# Hello\n\n```sh\nls\n```", &RenderOptions::preview(), |code, lang| {
///     format!("<pre data-lang=\"{lang}\">{code}</pre>")
/// });
/// assert!(html.contains("<h1"));
/// assert!(html.contains("<pre data-lang=\"sh\">ls\n</pre>"));
/// ```
pub fn to_html<F>(markdown_content: &str, options: &RenderOptions, mut highlight: F) -> String
where
    F: FnMut(&str, &str) -> String,
{
    let parser = Parser::new_ext(markdown_content, options.to_pulldown_options());

    let events: Vec<Event> = parser.collect();
    let mut processed_events = Vec::with_capacity(events.len());

    let mut i = 0;
    while i < events.len() {
        match &events[i] {
            Event::Start(Tag::Heading {
                level,
                id: None,
                classes,
                attrs,
            }) if options.enable_heading_anchors => {
                let slug = slugify(&heading::heading_text(&events[i + 1..]));

                processed_events.push(Event::Start(Tag::Heading {
                    level: *level,
                    id: (!slug.is_empty()).then(|| slug.into()),
                    classes: classes.clone(),
                    attrs: attrs.clone(),
                }));

                i += 1;
            }
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                let language = info.split_whitespace().next().unwrap_or_default();

                let mut code = String::new();
                let mut j = i + 1;
                while j < events.len() {
                    match &events[j] {
                        Event::End(TagEnd::CodeBlock) => break,
                        Event::Text(text) => code.push_str(text),
                        _ => {}
                    }
                    j += 1;
                }

                let mut block = highlight(&code, language);
                block.push('\n');
                processed_events.push(Event::Html(CowStr::from(block)));

                // Skip past the end tag of the code block.
                i = j + 1;
            }
            _ => {
                processed_events.push(events[i].clone());
                i += 1;
            }
        }
    }

    let mut html_output = String::new();
    pulldown_cmark::html::push_html(&mut html_output, processed_events.into_iter());
    html_output
}
