//! Fakes for the widget ports
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use chat_widget::{
    ChatError, ChatId, ChatMessage, ChatRequest, ChatResponse, ChatTransport, ChatView, Theme,
    ThemeError, ThemeStore, ThemeSurface,
};
use futures::channel::oneshot;

// ============================================================================
// Send path
// ============================================================================

#[derive(Debug, Default)]
pub struct ViewState {
    pub input: String,
    pub transcript: Vec<ChatMessage>,
    pub loading: bool,
    pub loading_shown: usize,
}

/// In-memory page. Clones share state so two concurrent sends can each hold
/// a `&mut` view.
#[derive(Debug, Clone, Default)]
pub struct FakeView {
    pub state: Rc<RefCell<ViewState>>,
}

impl FakeView {
    pub fn with_input(input: &str) -> Self {
        let view = Self::default();
        view.set_input(input);
        view
    }

    pub fn set_input(&self, input: &str) {
        self.state.borrow_mut().input = input.to_string();
    }

    pub fn input(&self) -> String {
        self.state.borrow().input.clone()
    }

    pub fn transcript(&self) -> Vec<ChatMessage> {
        self.state.borrow().transcript.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }
}

impl ChatView for FakeView {
    fn input_text(&self) -> String {
        self.state.borrow().input.clone()
    }

    fn clear_input(&mut self) {
        self.state.borrow_mut().input.clear();
    }

    fn append_message(&mut self, message: ChatMessage) {
        self.state.borrow_mut().transcript.push(message);
    }

    fn show_loading(&mut self) {
        let mut state = self.state.borrow_mut();
        assert!(!state.loading, "second loading indicator");
        state.loading = true;
        state.loading_shown += 1;
    }

    fn hide_loading(&mut self) {
        self.state.borrow_mut().loading = false;
    }
}

/// Replies from a script and records every request it saw
#[derive(Default)]
pub struct ScriptedTransport {
    replies: RefCell<VecDeque<Result<ChatResponse, ChatError>>>,
    pub requests: RefCell<Vec<ChatRequest>>,
}

impl ScriptedTransport {
    pub fn new(replies: Vec<Result<ChatResponse, ChatError>>) -> Self {
        Self {
            replies: RefCell::new(replies.into()),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl ChatTransport for ScriptedTransport {
    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatResponse, ChatError> {
        self.requests.borrow_mut().push(request.clone());
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ChatError::Transport("script exhausted".to_string())))
    }
}

/// Holds the reply until the test completes the paired sender
pub struct GatedTransport {
    gate: RefCell<Option<oneshot::Receiver<Result<ChatResponse, ChatError>>>>,
    pub calls: Cell<usize>,
}

impl GatedTransport {
    pub fn new() -> (Self, oneshot::Sender<Result<ChatResponse, ChatError>>) {
        let (tx, rx) = oneshot::channel();
        let transport = Self {
            gate: RefCell::new(Some(rx)),
            calls: Cell::new(0),
        };
        (transport, tx)
    }
}

#[async_trait(?Send)]
impl ChatTransport for GatedTransport {
    async fn send_chat(&self, _request: &ChatRequest) -> Result<ChatResponse, ChatError> {
        self.calls.set(self.calls.get() + 1);
        let gate = self.gate.borrow_mut().take();
        match gate {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(ChatError::Transport("gate dropped".to_string()))),
            None => Err(ChatError::Transport("gate already used".to_string())),
        }
    }
}

pub struct PanickingTransport;

#[async_trait(?Send)]
impl ChatTransport for PanickingTransport {
    async fn send_chat(&self, _request: &ChatRequest) -> Result<ChatResponse, ChatError> {
        panic!("connection reset while awaiting reply");
    }
}

pub fn reply(text: &str, chat_id: ChatId) -> Result<ChatResponse, ChatError> {
    Ok(ChatResponse {
        response: text.to_string(),
        chat_id,
    })
}

// ============================================================================
// Theming
// ============================================================================

/// Local storage stand-in; clones share the same slot, like two page loads
#[derive(Debug, Clone, Default)]
pub struct MemoryThemeStore {
    pub slot: Rc<RefCell<Option<String>>>,
    pub fail_writes: bool,
}

impl MemoryThemeStore {
    pub fn with_value(value: &str) -> Self {
        let store = Self::default();
        *store.slot.borrow_mut() = Some(value.to_string());
        store
    }

    pub fn value(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl ThemeStore for MemoryThemeStore {
    fn load(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    fn save(&self, theme: Theme) -> Result<(), ThemeError> {
        if self.fail_writes {
            return Err(ThemeError::Storage("QuotaExceededError".to_string()));
        }
        *self.slot.borrow_mut() = Some(theme.as_str().to_string());
        Ok(())
    }
}

/// Root container class plus the active flag of every theme control
#[derive(Debug, Default)]
pub struct FakeSurface {
    pub root_class: Option<String>,
    pub active_control: Option<String>,
    pub applied: Vec<Theme>,
}

impl ThemeSurface for FakeSurface {
    fn apply_theme(&mut self, theme: Theme) {
        self.root_class = Some(theme.as_str().to_string());
        self.active_control = Some(theme.control_id());
        self.applied.push(theme);
    }
}
