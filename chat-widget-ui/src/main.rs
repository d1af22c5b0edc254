use dioxus::launch;
use dioxus::prelude::*;
use dioxus_logger::tracing::Level;

use chat_widget_ui::{load_widget_config, ChatWidget};

fn main() {
    // Initialize logging for WASM
    wasm_logger::init(wasm_logger::Config::default());
    dioxus_logger::init(Level::INFO).ok();

    launch(App);
}

#[component]
fn App() -> Element {
    let config = use_hook(load_widget_config);

    rsx! {
        ChatWidget { config }
    }
}
