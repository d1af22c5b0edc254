//! Message formatting
//!
//! Turns a transcript entry into the HTML that goes inside its content node.
//! Bot text is split on fenced code segments; each segment becomes a code
//! block with a copy button, everything else is escaped literal text.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::message::{ChatMessage, Sender};

/// A language tag only counts when the fence line ends right after it, so
/// "```print(1)```" is code, not a block tagged `print`.
static CODE_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```(?:([\w+#.-]+)?[ \t]*\r?\n)?(.*?)```").expect("valid code fence regex")
});

pub const COPY_BUTTON_CLASS: &str = "copy-button";
pub const CODE_INDEX_ATTR: &str = "data-code-index";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    pub language: Option<String>,
    /// Literal text, exactly what the copy button puts on the clipboard
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Code(CodeBlock),
}

/// Content of one message node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBody {
    pub html: String,
    /// Indexed by the `data-code-index` of each copy button
    pub code_blocks: Vec<CodeBlock>,
}

/// Split text into literal and fenced segments. Unterminated fences stay text.
pub fn split_fenced(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last = 0;

    for cap in CODE_FENCE.captures_iter(text) {
        let Some(whole) = cap.get(0) else {
            continue;
        };
        if whole.start() > last {
            segments.push(Segment::Text(text[last..whole.start()].to_string()));
        }

        let language = cap.get(1).map(|m| m.as_str().to_string());
        let code = cap
            .get(2)
            .map(|m| m.as_str().trim_end_matches(&['\r', '\n'][..]).to_string())
            .unwrap_or_default();
        segments.push(Segment::Code(CodeBlock { language, code }));
        last = whole.end();
    }

    if last < text.len() {
        segments.push(Segment::Text(text[last..].to_string()));
    }

    segments
}

/// Render a message body. User text is never code-formatted.
pub fn render_body(message: &ChatMessage, copy_label: &str) -> RenderedBody {
    match message.sender {
        Sender::User => RenderedBody {
            html: escape_html(&message.text),
            code_blocks: Vec::new(),
        },
        Sender::Bot => render_bot_text(&message.text, copy_label),
    }
}

fn render_bot_text(text: &str, copy_label: &str) -> RenderedBody {
    let mut html = String::with_capacity(text.len() * 2);
    let mut code_blocks = Vec::new();

    for segment in split_fenced(text) {
        match segment {
            Segment::Text(literal) => html.push_str(&escape_html(&literal)),
            Segment::Code(block) => {
                push_code_block(&mut html, code_blocks.len(), &block, copy_label);
                code_blocks.push(block);
            }
        }
    }

    RenderedBody { html, code_blocks }
}

fn push_code_block(html: &mut String, index: usize, block: &CodeBlock, copy_label: &str) {
    let language = block.language.as_deref().map(escape_html);
    let code_class = language
        .as_deref()
        .map(|lang| format!(r#" class="language-{lang}""#))
        .unwrap_or_default();

    html.push_str(r#"<div class="code-block">"#);
    html.push_str(r#"<div class="code-header">"#);
    html.push_str(&format!(
        r#"<span class="code-language">{}</span>"#,
        language.as_deref().unwrap_or("code")
    ));
    html.push_str(&format!(
        r#"<button type="button" class="{COPY_BUTTON_CLASS}" {CODE_INDEX_ATTR}="{index}">{}</button>"#,
        escape_html(copy_label)
    ));
    html.push_str("</div>");
    html.push_str(&format!(
        "<pre><code{code_class}>{}</code></pre>",
        escape_html(&block.code)
    ));
    html.push_str("</div>");
}

/// Escape HTML special characters
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
