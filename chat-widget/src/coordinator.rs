//! Send coordinator
//!
//! Idle -> Sending -> (Success | Failure) -> Idle. At most one request is in
//! flight; a send issued while another is pending is dropped, not queued.

use std::cell::RefCell;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use futures_util::FutureExt;
use shared_types::{ChatId, ChatRequest, ChatResponse};
use tracing::{debug, error, info};

use crate::config::{WidgetConfig, DEFAULT_APOLOGY_PREFIX};
use crate::error::ChatError;
use crate::message::ChatMessage;

/// Backend round trip. Any non-2xx status must come back as
/// [`ChatError::Http`].
#[async_trait(?Send)]
pub trait ChatTransport {
    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatResponse, ChatError>;
}

/// The page as seen by the send path: the input field, the transcript and
/// the loading indicator.
pub trait ChatView {
    fn input_text(&self) -> String;

    fn clear_input(&mut self);

    /// Append a message node and bring it into view
    fn append_message(&mut self, message: ChatMessage);

    /// Place the single loading placeholder after the latest message
    fn show_loading(&mut self);

    /// Remove the loading placeholder. Must be a no-op when there is none.
    fn hide_loading(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Another send was still in flight
    Busy,
    /// Input was empty after trimming
    Empty,
    Replied,
    Failed(ChatError),
}

/// Modifier keys held during a keypress in the input field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyModifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl KeyModifiers {
    pub fn any(self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

/// Enter sends; Enter with any modifier keeps the newline. The Enter that
/// commits an IME composition never sends.
pub fn is_send_shortcut(key: &str, modifiers: KeyModifiers, composing: bool) -> bool {
    key == "Enter" && !modifiers.any() && !composing
}

/// Strip surrounding whitespace, byte order marks included.
pub fn trim_input(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Clears the in-flight flag when dropped, whichever way the send exits.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Per-page chat state: the conversation id and the in-flight flag.
pub struct ChatController<T> {
    transport: T,
    conversation_id: RefCell<Option<ChatId>>,
    in_flight: AtomicBool,
    apology_prefix: String,
}

impl<T: ChatTransport> ChatController<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            conversation_id: RefCell::new(None),
            in_flight: AtomicBool::new(false),
            apology_prefix: DEFAULT_APOLOGY_PREFIX.to_string(),
        }
    }

    pub fn from_config(transport: T, config: &WidgetConfig) -> Self {
        Self {
            apology_prefix: config.apology_prefix.clone(),
            ..Self::new(transport)
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Id sent with the next request; `None` until the first reply
    pub fn conversation_id(&self) -> Option<ChatId> {
        self.conversation_id.borrow().clone()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Run one send cycle against `view`.
    pub async fn send_message<V: ChatView + ?Sized>(&self, view: &mut V) -> SendOutcome {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            debug!("Send already in progress");
            return SendOutcome::Busy;
        };

        let message = trim_input(&view.input_text()).to_string();
        if message.is_empty() {
            debug!("Empty message, not sending");
            return SendOutcome::Empty;
        }

        view.append_message(ChatMessage::user(message.clone()));
        view.clear_input();
        view.show_loading();

        let request = ChatRequest {
            message,
            chat_id: self.conversation_id(),
        };
        debug!(chat_id = ?request.chat_id, "Sending message to server");

        let result = AssertUnwindSafe(self.transport.send_chat(&request))
            .catch_unwind()
            .await
            .unwrap_or_else(|_| Err(ChatError::Transport("transport panicked".to_string())));

        view.hide_loading();

        match result {
            Ok(reply) => {
                view.append_message(ChatMessage::bot(reply.response));
                self.adopt_conversation_id(reply.chat_id);
                SendOutcome::Replied
            }
            Err(e) => {
                error!("Error in send_message: {}", e);
                view.append_message(ChatMessage::bot(self.apology(&e)));
                SendOutcome::Failed(e)
            }
        }
    }

    fn adopt_conversation_id(&self, chat_id: ChatId) {
        let mut current = self.conversation_id.borrow_mut();
        if current.as_ref() != Some(&chat_id) {
            info!("Conversation id is now {}", chat_id);
            *current = Some(chat_id);
        }
    }

    fn apology(&self, error: &ChatError) -> String {
        format!("{}: {}", self.apology_prefix, error.user_description())
    }
}
