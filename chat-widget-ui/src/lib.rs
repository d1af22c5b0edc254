pub mod api;
pub mod components;
pub mod config;
pub mod interop;
pub mod theme;

pub use api::*;
pub use components::*;
pub use config::*;
pub use interop::*;
pub use theme::*;
