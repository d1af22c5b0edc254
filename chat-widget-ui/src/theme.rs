use chat_widget::{Theme, ThemeError, ThemeStore, ThemeSurface};
use dioxus::prelude::{Signal, WritableExt};

use crate::interop::theme_root;

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|window| window.local_storage().ok().flatten())
}

/// Theme preference under one local-storage key
#[derive(Debug, Clone)]
pub struct LocalStorageThemeStore {
    key: String,
}

impl LocalStorageThemeStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl ThemeStore for LocalStorageThemeStore {
    fn load(&self) -> Option<String> {
        local_storage().and_then(|storage| storage.get_item(&self.key).ok().flatten())
    }

    fn save(&self, theme: Theme) -> Result<(), ThemeError> {
        let storage = local_storage()
            .ok_or_else(|| ThemeError::Storage("local storage unavailable".to_string()))?;
        storage
            .set_item(&self.key, theme.as_str())
            .map_err(|e| ThemeError::Storage(format!("{e:?}")))
    }
}

/// Sets the theme class on the root container and publishes the active theme
/// to the signal the theme controls render from.
pub struct DocumentThemeSurface {
    root_selector: Option<String>,
    current: Signal<Theme>,
}

impl DocumentThemeSurface {
    pub fn new(root_selector: Option<String>, current: Signal<Theme>) -> Self {
        Self {
            root_selector,
            current,
        }
    }
}

impl ThemeSurface for DocumentThemeSurface {
    fn apply_theme(&mut self, theme: Theme) {
        apply_theme_to_document(self.root_selector.as_deref(), theme);
        self.current.set(theme);
    }
}

pub fn apply_theme_to_document(root_selector: Option<&str>, theme: Theme) {
    let Some(root) = theme_root(root_selector) else {
        return;
    };
    let classes = root.class_list();
    for other in Theme::ALL {
        let _ = classes.remove_1(other.as_str());
    }
    let _ = classes.add_1(theme.as_str());
}
