//! Browser glue: element lookup, scrolling, clipboard and highlight.js

use chat_widget::{CodeBlock, COPY_BUTTON_CLASS};
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Element, Event};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = hljs, js_name = highlightElement)]
    fn hljs_highlight_element(element: &Element);

    #[wasm_bindgen(catch, js_namespace = ["navigator", "clipboard"], js_name = writeText)]
    fn clipboard_write_text(text: &str) -> Result<js_sys::Promise, JsValue>;
}

fn document() -> Option<web_sys::Document> {
    web_sys::window().and_then(|w| w.document())
}

pub fn element_by_id(id: &str) -> Option<Element> {
    document().and_then(|d| d.get_element_by_id(id))
}

/// Element receiving the theme class: `selector` if it matches, else `<body>`
pub fn theme_root(selector: Option<&str>) -> Option<Element> {
    let document = document()?;
    if let Some(selector) = selector {
        match document.query_selector(selector) {
            Ok(Some(root)) => return Some(root),
            Ok(None) => {
                dioxus_logger::tracing::warn!("No element matches '{}', using <body>", selector)
            }
            Err(e) => dioxus_logger::tracing::warn!("Bad root selector '{}': {:?}", selector, e),
        }
    }
    document.body().map(Element::from)
}

pub fn scroll_to_bottom(id: &str) {
    if let Some(panel) = element_by_id(id) {
        panel.set_scroll_top(panel.scroll_height());
    }
}

fn has_highlighter() -> bool {
    let global = js_sys::global();
    js_sys::Reflect::has(&global, &JsValue::from_str("hljs")).unwrap_or(false)
}

/// Highlight the code blocks inside `node` only, when highlight.js is loaded
pub fn highlight_within(node: &Element) {
    if !has_highlighter() {
        return;
    }
    let Ok(blocks) = node.query_selector_all("pre code") else {
        return;
    };
    for i in 0..blocks.length() {
        if let Some(block) = blocks.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
            hljs_highlight_element(&block);
        }
    }
}

pub async fn write_clipboard(text: &str) -> Result<(), String> {
    let promise = clipboard_write_text(text).map_err(|e| format!("{e:?}"))?;
    JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|e| format!("{e:?}"))
}

/// Copy-button labels and how long the acknowledgment stays up
#[derive(Debug, Clone, PartialEq)]
pub struct CopyFeedback {
    pub label: String,
    pub copied_label: String,
    pub delay_ms: u32,
}

/// Click listeners attached to the copy buttons of one message node.
/// Dropping this detaches them.
pub struct CopyBindings {
    listeners: Vec<(Element, Closure<dyn FnMut(Event)>)>,
}

impl CopyBindings {
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl Drop for CopyBindings {
    fn drop(&mut self) {
        for (button, listener) in &self.listeners {
            let _ = button
                .remove_event_listener_with_callback("click", listener.as_ref().unchecked_ref());
        }
    }
}

/// The code block a copy button's `data-code-index` points at
pub fn code_block_for<'a>(button: &Element, code_blocks: &'a [CodeBlock]) -> Option<&'a CodeBlock> {
    button
        .get_attribute(chat_widget::CODE_INDEX_ATTR)
        .and_then(|idx| idx.parse::<usize>().ok())
        .and_then(|idx| code_blocks.get(idx))
}

/// Wire every copy button under `node` to the code block its
/// `data-code-index` points at.
pub fn bind_copy_buttons(
    node: &Element,
    code_blocks: &[CodeBlock],
    feedback: &CopyFeedback,
) -> CopyBindings {
    let mut listeners = Vec::new();
    let Ok(buttons) = node.query_selector_all(&format!(".{COPY_BUTTON_CLASS}")) else {
        return CopyBindings { listeners };
    };

    for i in 0..buttons.length() {
        let Some(button) = buttons.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let Some(block) = code_block_for(&button, code_blocks) else {
            continue;
        };

        let code = block.code.clone();
        let feedback = feedback.clone();
        let target = button.clone();
        let on_click = Closure::wrap(Box::new(move |_e: Event| {
            copy_with_feedback(&target, code.clone(), &feedback);
        }) as Box<dyn FnMut(Event)>);

        if button
            .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
            .is_ok()
        {
            listeners.push((button, on_click));
        }
    }

    CopyBindings { listeners }
}

fn copy_with_feedback(button: &Element, code: String, feedback: &CopyFeedback) {
    button.set_text_content(Some(&feedback.copied_label));

    wasm_bindgen_futures::spawn_local(async move {
        if let Err(e) = write_clipboard(&code).await {
            log::error!("Failed to copy code block: {}", e);
        }
    });

    let button = button.clone();
    let label = feedback.label.clone();
    let delay_ms = feedback.delay_ms;
    wasm_bindgen_futures::spawn_local(async move {
        TimeoutFuture::new(delay_ms).await;
        button.set_text_content(Some(&label));
    });
}
