//! Chat widget controller core
//!
//! Everything here is browser-agnostic. The page-facing pieces (DOM, local
//! storage, `fetch`) plug in through the port traits:
//! - [`ChatView`] / [`ChatTransport`] for the send path
//! - [`ThemeSurface`] / [`ThemeStore`] for theming
//!
//! so the whole state machine runs under native `cargo test` with fakes.

pub mod config;
pub mod coordinator;
pub mod error;
pub mod format;
pub mod message;
pub mod theme;

pub use config::*;
pub use coordinator::*;
pub use error::*;
pub use format::*;
pub use message::*;
pub use theme::*;

pub use shared_types::{ChatId, ChatRequest, ChatResponse};
