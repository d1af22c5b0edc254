use std::rc::Rc;

use chat_widget::{
    is_send_shortcut, render_body, theme_name_from_control_id, ChatController, ChatMessage,
    ChatView, KeyModifiers, Theme, ThemeManager, WidgetConfig,
};
use dioxus::prelude::*;

use crate::api::GlooTransport;
use crate::interop::{
    bind_copy_buttons, element_by_id, highlight_within, scroll_to_bottom, CopyBindings,
    CopyFeedback,
};
use crate::theme::{DocumentThemeSurface, LocalStorageThemeStore};

pub const TRANSCRIPT_ID: &str = "chatMessages";
pub const INPUT_ID: &str = "userInput";
pub const SEND_BUTTON_ID: &str = "sendButton";
pub const LOADING_ID: &str = "loadingIndicator";

/// A transcript entry plus the DOM id of its node
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMessage {
    pub id: String,
    pub message: ChatMessage,
}

impl RenderedMessage {
    pub fn new(message: ChatMessage) -> Self {
        Self {
            id: format!("message-{}", uuid::Uuid::new_v4()),
            message,
        }
    }
}

/// The send path's view of the widget, backed by its signals
#[derive(Clone, Copy)]
pub struct SignalChatView {
    input: Signal<String>,
    messages: Signal<Vec<RenderedMessage>>,
    loading: Signal<bool>,
}

impl SignalChatView {
    pub fn new(
        input: Signal<String>,
        messages: Signal<Vec<RenderedMessage>>,
        loading: Signal<bool>,
    ) -> Self {
        Self {
            input,
            messages,
            loading,
        }
    }
}

impl ChatView for SignalChatView {
    fn input_text(&self) -> String {
        self.input.to_string()
    }

    fn clear_input(&mut self) {
        self.input.set(String::new());
    }

    fn append_message(&mut self, message: ChatMessage) {
        dioxus_logger::tracing::debug!(
            "Adding message from {:?}: {}",
            message.sender,
            message.text
        );
        self.messages.push(RenderedMessage::new(message));
    }

    fn show_loading(&mut self) {
        self.loading.set(true);
    }

    fn hide_loading(&mut self) {
        self.loading.set(false);
    }
}

#[component]
pub fn ChatWidget(config: WidgetConfig) -> Element {
    let mut input = use_signal(String::new);
    let messages = use_signal(Vec::<RenderedMessage>::new);
    let loading = use_signal(|| false);
    let current_theme = use_signal(|| config.default_theme);
    let mut theme_initialized = use_signal(|| false);

    let controller = use_hook(|| {
        Rc::new(ChatController::from_config(
            GlooTransport::new(config.endpoint.clone()),
            &config,
        ))
    });
    let theme_manager = use_hook(|| {
        Rc::new(ThemeManager::new(
            LocalStorageThemeStore::new(config.theme_storage_key.clone()),
            config.default_theme,
        ))
    });

    let feedback = CopyFeedback {
        label: config.copy_label.clone(),
        copied_label: config.copied_label.clone(),
        delay_ms: config.copy_feedback_ms,
    };
    let highlight = config.highlight;

    // Apply the persisted theme once, before any interaction
    {
        let theme_manager = theme_manager.clone();
        let root_selector = config.root_selector.clone();
        use_effect(move || {
            if theme_initialized() {
                return;
            }
            theme_initialized.set(true);

            let mut surface = DocumentThemeSurface::new(root_selector.clone(), current_theme);
            theme_manager.initialize(&mut surface);
        });
    }

    let select_theme = {
        let theme_manager = theme_manager.clone();
        let root_selector = config.root_selector.clone();
        use_callback(move |control_id: String| {
            dioxus_logger::tracing::debug!("Theme button clicked: {}", control_id);
            let mut surface = DocumentThemeSurface::new(root_selector.clone(), current_theme);
            let name = theme_name_from_control_id(&control_id);
            if let Err(e) = theme_manager.set_theme(name, &mut surface) {
                dioxus_logger::tracing::warn!("{}", e);
            }
        })
    };

    // Keep the newest message (or the loading indicator) in view
    use_effect(move || {
        let _ = messages.read().len();
        let _ = loading();
        scroll_to_bottom(TRANSCRIPT_ID);
    });

    let send_message = use_callback(move |_: ()| {
        let controller = controller.clone();
        let mut view = SignalChatView::new(input, messages, loading);
        spawn(async move {
            controller.send_message(&mut view).await;
        });
    });

    let onkeydown = move |e: KeyboardEvent| {
        let held = e.modifiers();
        let modifiers = KeyModifiers {
            shift: held.shift(),
            ctrl: held.ctrl(),
            alt: held.alt(),
            meta: held.meta(),
        };
        if is_send_shortcut(&e.key().to_string(), modifiers, e.is_composing()) {
            e.prevent_default();
            send_message.call(());
        }
    };

    rsx! {
        style { {WIDGET_STYLES} }

        div {
            class: "chat-container",

            div {
                class: "chat-header",
                div {
                    class: "chat-title",
                    span { class: "chat-icon", "💬" }
                    span { "Chat" }
                }
                div {
                    class: "theme-switcher",
                    for theme in Theme::ALL {
                        button {
                            key: "{theme}",
                            id: theme.control_id(),
                            class: if current_theme() == theme { "theme-button active" } else { "theme-button" },
                            onclick: move |_| select_theme.call(theme.control_id()),
                            "{theme.label()}"
                        }
                    }
                }
            }

            Transcript {
                messages: messages,
                loading: loading,
                feedback: feedback.clone(),
                highlight: highlight,
            }

            div {
                class: "chat-input-area",
                textarea {
                    id: INPUT_ID,
                    class: "chat-textarea",
                    placeholder: "Type your message...",
                    value: "{input}",
                    rows: "1",
                    oninput: move |e: FormEvent| input.set(e.value()),
                    onkeydown,
                }
                button {
                    id: SEND_BUTTON_ID,
                    class: "send-button",
                    onclick: move |_| send_message.call(()),
                    "Send"
                }
            }
        }
    }
}

/// The scrolling message panel; the loading placeholder, when shown, is its
/// last child.
#[component]
pub fn Transcript(
    messages: Signal<Vec<RenderedMessage>>,
    loading: Signal<bool>,
    feedback: CopyFeedback,
    highlight: bool,
) -> Element {
    rsx! {
        div {
            id: TRANSCRIPT_ID,
            class: "chat-messages",
            for entry in messages.iter() {
                MessageBubble {
                    key: "{entry.id}",
                    entry: entry.clone(),
                    feedback: feedback.clone(),
                    highlight,
                }
            }
            if loading() {
                LoadingIndicator {}
            }
        }
    }
}

#[component]
pub fn MessageBubble(entry: RenderedMessage, feedback: CopyFeedback, highlight: bool) -> Element {
    let sender = entry.message.sender;
    let body = render_body(&entry.message, &feedback.label);
    let mut copy_bindings = use_signal(|| None::<CopyBindings>);

    // Highlight and wire copy buttons on this node only, once it is mounted
    let node_id = entry.id.clone();
    let code_blocks = body.code_blocks.clone();
    use_effect(move || {
        if code_blocks.is_empty() || copy_bindings.peek().is_some() {
            return;
        }
        let Some(node) = element_by_id(&node_id) else {
            return;
        };
        if highlight {
            highlight_within(&node);
        }
        let bindings = bind_copy_buttons(&node, &code_blocks, &feedback);
        dioxus_logger::tracing::debug!("Bound {} copy buttons in {}", bindings.len(), node_id);
        copy_bindings.set(Some(bindings));
    });

    rsx! {
        div {
            id: "{entry.id}",
            class: "message {sender.css_class()}",
            div {
                class: "message-header",
                span { class: "sender-name", "{sender.display_name()}" }
            }
            div {
                class: "message-content",
                dangerous_inner_html: "{body.html}",
            }
        }
    }
}

#[component]
pub fn LoadingIndicator() -> Element {
    rsx! {
        div {
            id: LOADING_ID,
            class: "message bot-message",
            div {
                class: "message-header",
                span { class: "sender-name", "AI" }
            }
            div {
                class: "typing-indicator",
                span {}
                span {}
                span {}
            }
        }
    }
}

const WIDGET_STYLES: &str = r#"
.light {
    --chat-bg: #f8fafc;
    --panel-bg: #ffffff;
    --text-primary: #0f172a;
    --text-muted: #64748b;
    --border-color: #e2e8f0;
    --bubble-bot: #f1f5f9;
    --code-bg: #f6f8fa;
}

.dark {
    --chat-bg: #0f172a;
    --panel-bg: #1e293b;
    --text-primary: #f8fafc;
    --text-muted: #94a3b8;
    --border-color: #334155;
    --bubble-bot: #1e293b;
    --code-bg: #0b1220;
}

.chat-container {
    display: flex;
    flex-direction: column;
    height: 100vh;
    background: var(--chat-bg);
    color: var(--text-primary);
}

.chat-header {
    display: flex;
    align-items: center;
    justify-content: space-between;
    padding: 0.75rem 1rem;
    background: var(--panel-bg);
    border-bottom: 1px solid var(--border-color);
}

.chat-title {
    display: flex;
    gap: 0.5rem;
    font-weight: 600;
}

.theme-switcher {
    display: flex;
    gap: 0.25rem;
}

.theme-button {
    padding: 0.25rem 0.75rem;
    background: transparent;
    color: var(--text-muted);
    border: 1px solid var(--border-color);
    border-radius: 999px;
    cursor: pointer;
}

.theme-button.active {
    background: #3b82f6;
    border-color: #3b82f6;
    color: white;
}

.chat-messages {
    flex: 1;
    overflow-y: auto;
    padding: 1rem;
    display: flex;
    flex-direction: column;
    gap: 0.75rem;
}

.message {
    max-width: 80%;
    padding: 0.5rem 0.875rem;
    border-radius: 1rem;
}

.user-message {
    align-self: flex-end;
    background: #3b82f6;
    color: white;
}

.bot-message {
    align-self: flex-start;
    background: var(--bubble-bot);
    border: 1px solid var(--border-color);
}

.message-header {
    font-size: 0.75rem;
    opacity: 0.8;
    margin-bottom: 0.25rem;
}

.message-content {
    white-space: pre-wrap;
    word-wrap: break-word;
    line-height: 1.5;
}

.code-block {
    margin: 0.5rem 0;
    border: 1px solid var(--border-color);
    border-radius: 0.5rem;
    overflow: hidden;
    white-space: normal;
}

.code-header {
    display: flex;
    justify-content: space-between;
    align-items: center;
    padding: 0.25rem 0.5rem;
    font-size: 0.75rem;
    background: var(--panel-bg);
}

.copy-button {
    padding: 0.125rem 0.5rem;
    font-size: 0.75rem;
    background: transparent;
    color: var(--text-muted);
    border: 1px solid var(--border-color);
    border-radius: 0.25rem;
    cursor: pointer;
}

.code-block pre {
    margin: 0;
    padding: 0.75rem;
    overflow-x: auto;
    background: var(--code-bg);
    white-space: pre;
}

.typing-indicator {
    display: flex;
    gap: 0.25rem;
    padding: 0.5rem 0;
}

.typing-indicator span {
    width: 0.5rem;
    height: 0.5rem;
    background: var(--text-muted);
    border-radius: 50%;
    animation: typing-bounce 1.4s infinite ease-in-out both;
}

.typing-indicator span:nth-child(1) { animation-delay: -0.32s; }
.typing-indicator span:nth-child(2) { animation-delay: -0.16s; }

@keyframes typing-bounce {
    0%, 80%, 100% { transform: scale(0); }
    40% { transform: scale(1); }
}

.chat-input-area {
    display: flex;
    gap: 0.5rem;
    padding: 0.75rem 1rem;
    background: var(--panel-bg);
    border-top: 1px solid var(--border-color);
}

.chat-textarea {
    flex: 1;
    padding: 0.625rem 1rem;
    background: var(--chat-bg);
    color: var(--text-primary);
    border: 1px solid var(--border-color);
    border-radius: 1.25rem;
    font-family: inherit;
    resize: none;
    outline: none;
}

.send-button {
    padding: 0 1.25rem;
    background: #3b82f6;
    color: white;
    border: none;
    border-radius: 1.25rem;
    cursor: pointer;
}
"#;
