//! Browser tests for the page-facing adapters
//!
//! Run with: wasm-pack test --headless --firefox chat-widget-ui

#![cfg(target_arch = "wasm32")]

use chat_widget::{render_body, ChatMessage, ChatView, Theme, ThemeManager, ThemeStore};
use chat_widget_ui::{
    apply_theme_to_document, bind_copy_buttons, code_block_for, element_by_id, theme_root,
    CopyFeedback, LocalStorageThemeStore, RenderedMessage, SignalChatView, Transcript, LOADING_ID,
    TRANSCRIPT_ID,
};
use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlElement;

wasm_bindgen_test_configure!(run_in_browser);

fn unique_key(name: &str) -> String {
    format!("chat-widget-test-{name}-{}", uuid::Uuid::new_v4())
}

fn mount(id: &str, html: &str) -> web_sys::Element {
    let document = web_sys::window().unwrap().document().unwrap();
    let node = document.create_element("div").unwrap();
    node.set_id(id);
    node.set_inner_html(html);
    document.body().unwrap().append_child(&node).unwrap();
    node
}

fn button_in(node: &web_sys::Element) -> HtmlElement {
    node.query_selector(".copy-button")
        .unwrap()
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap()
}

fn feedback(delay_ms: u32) -> CopyFeedback {
    CopyFeedback {
        label: "Copy".to_string(),
        copied_label: "Copied!".to_string(),
        delay_ms,
    }
}

#[wasm_bindgen_test]
fn test_local_storage_round_trip() {
    let store = LocalStorageThemeStore::new(unique_key("round-trip"));
    assert_eq!(store.load(), None);

    store.save(Theme::Dark).unwrap();
    assert_eq!(store.load().as_deref(), Some("dark"));
}

#[wasm_bindgen_test]
fn test_theme_reload_from_local_storage() {
    let key = unique_key("reload");
    let store = LocalStorageThemeStore::new(key.clone());
    store.save(Theme::Dark).unwrap();

    let manager = ThemeManager::new(LocalStorageThemeStore::new(key), Theme::Light);
    assert_eq!(manager.resolve_initial(), Theme::Dark);
}

#[wasm_bindgen_test]
fn test_root_class_swaps_theme() {
    apply_theme_to_document(None, Theme::Light);
    apply_theme_to_document(None, Theme::Dark);

    let body = theme_root(None).unwrap();
    let classes = body.class_list();
    assert!(classes.contains("dark"));
    assert!(!classes.contains("light"));
}

#[wasm_bindgen_test]
async fn test_copy_button_acknowledges_then_reverts() {
    let message = ChatMessage::bot("Try:\n```rust\nif a < b && c > \"d\" {}\n```\nok?");
    let body = render_body(&message, "Copy");
    let node = mount(&unique_key("copy"), &body.html);

    let bindings = bind_copy_buttons(&node, &body.code_blocks, &feedback(50));
    assert_eq!(bindings.len(), 1);

    let button = button_in(&node);
    assert_eq!(button.text_content().as_deref(), Some("Copy"));
    let block = code_block_for(&button, &body.code_blocks).unwrap();
    assert_eq!(block.code, "if a < b && c > \"d\" {}");

    button.click();
    assert_eq!(button.text_content().as_deref(), Some("Copied!"));

    // Reverts whether or not the headless browser grants clipboard access
    TimeoutFuture::new(200).await;
    assert_eq!(button.text_content().as_deref(), Some("Copy"));

    node.remove();
}

#[wasm_bindgen_test]
async fn test_dropped_copy_bindings_detach() {
    let body = render_body(&ChatMessage::bot("```\nls -la\n```"), "Copy");
    let node = mount(&unique_key("detach"), &body.html);

    let bindings = bind_copy_buttons(&node, &body.code_blocks, &feedback(50));
    drop(bindings);

    let button = button_in(&node);
    button.click();
    assert_eq!(button.text_content().as_deref(), Some("Copy"));

    node.remove();
}

const HARNESS_ROOT: &str = "loading-harness";

/// One bot message in a transcript; the buttons drive the loading indicator
/// through the same view the send path uses.
fn loading_harness() -> Element {
    let input = use_signal(String::new);
    let messages = use_signal(|| vec![RenderedMessage::new(ChatMessage::bot("hello"))]);
    let loading = use_signal(|| false);
    let mut view = SignalChatView::new(input, messages, loading);

    rsx! {
        button {
            id: "show-twice",
            onclick: move |_| {
                view.show_loading();
                view.show_loading();
            },
        }
        button {
            id: "hide-twice",
            onclick: move |_| {
                view.hide_loading();
                view.hide_loading();
            },
        }
        Transcript {
            messages: messages,
            loading: loading,
            feedback: feedback(2000),
            highlight: false,
        }
    }
}

fn click(id: &str) {
    element_by_id(id)
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap()
        .click();
}

fn indicator_count() -> u32 {
    let document = web_sys::window().unwrap().document().unwrap();
    document
        .query_selector_all(&format!("#{LOADING_ID}"))
        .unwrap()
        .length()
}

#[wasm_bindgen_test]
async fn test_loading_indicator_in_transcript() {
    mount(HARNESS_ROOT, "");
    dioxus::LaunchBuilder::web()
        .with_cfg(dioxus::web::Config::new().rootname(HARNESS_ROOT))
        .launch(loading_harness);
    TimeoutFuture::new(100).await;

    let transcript = element_by_id(TRANSCRIPT_ID).unwrap();
    assert_eq!(transcript.child_element_count(), 1);

    // Hiding with nothing shown leaves the transcript as it was
    click("hide-twice");
    TimeoutFuture::new(50).await;
    assert_eq!(transcript.child_element_count(), 1);
    assert_eq!(indicator_count(), 0);

    click("show-twice");
    TimeoutFuture::new(50).await;
    assert_eq!(transcript.child_element_count(), 2);
    assert_eq!(indicator_count(), 1);
    let last = transcript.last_element_child().unwrap();
    assert_eq!(last.id(), LOADING_ID);

    click("hide-twice");
    TimeoutFuture::new(50).await;
    assert_eq!(transcript.child_element_count(), 1);
    assert_eq!(indicator_count(), 0);
}
