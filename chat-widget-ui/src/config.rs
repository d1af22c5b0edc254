use chat_widget::WidgetConfig;

/// Id of the optional `<script type="application/json">` block carrying a
/// [`WidgetConfig`] in the host page
pub const CONFIG_ELEMENT_ID: &str = "chat-widget-config";

/// Read the page's widget config; defaults when absent or invalid
pub fn load_widget_config() -> WidgetConfig {
    let raw = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content());

    let Some(raw) = raw else {
        return WidgetConfig::default();
    };

    match WidgetConfig::from_json(&raw) {
        Ok(config) => config,
        Err(e) => {
            dioxus_logger::tracing::warn!("{}, using defaults", e);
            WidgetConfig::default()
        }
    }
}
