//! Theme manager
//!
//! Resolves the persisted preference on load, applies it to the page and keeps
//! storage and the visual state in step on every change.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::ThemeError;

/// Suffix tying a theme control's id to its theme name (`darkTheme` -> `dark`)
pub const THEME_CONTROL_SUFFIX: &str = "Theme";

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub const ALL: [Theme; 2] = [Theme::Light, Theme::Dark];

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Id of the control selecting this theme
    pub fn control_id(self) -> String {
        format!("{}{THEME_CONTROL_SUFFIX}", self.as_str())
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(ThemeError::Unknown(other.to_string())),
        }
    }
}

/// Recover the theme name from a control id. Ids without the suffix pass
/// through unchanged and get rejected later by [`Theme::from_str`].
pub fn theme_name_from_control_id(id: &str) -> &str {
    id.strip_suffix(THEME_CONTROL_SUFFIX).unwrap_or(id)
}

/// Persistent client storage for the preference
pub trait ThemeStore {
    /// Raw persisted value, unvalidated
    fn load(&self) -> Option<String>;

    fn save(&self, theme: Theme) -> Result<(), ThemeError>;
}

/// The page: root container class plus the active state of the theme controls
pub trait ThemeSurface {
    fn apply_theme(&mut self, theme: Theme);
}

pub struct ThemeManager<S> {
    store: S,
    default_theme: Theme,
}

impl<S: ThemeStore> ThemeManager<S> {
    pub fn new(store: S, default_theme: Theme) -> Self {
        Self {
            store,
            default_theme,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Last persisted theme, or the default when nothing valid is stored
    pub fn resolve_initial(&self) -> Theme {
        match self.store.load() {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!("Ignoring persisted theme: {}", e);
                self.default_theme
            }),
            None => self.default_theme,
        }
    }

    /// Apply the resolved theme once, before any user interaction
    pub fn initialize<T: ThemeSurface + ?Sized>(&self, surface: &mut T) -> Theme {
        let theme = self.resolve_initial();
        debug!("Initial theme: {}", theme);
        self.apply(theme, surface);
        theme
    }

    /// Switch to `name`. Unknown names are neither applied nor persisted.
    ///
    /// A storage failure is returned after the theme has already been applied
    /// to the page.
    pub fn set_theme<T: ThemeSurface + ?Sized>(
        &self,
        name: &str,
        surface: &mut T,
    ) -> Result<Theme, ThemeError> {
        let theme: Theme = name.parse()?;
        info!("Setting theme to: {}", theme);
        surface.apply_theme(theme);
        self.store.save(theme)?;
        Ok(theme)
    }

    fn apply<T: ThemeSurface + ?Sized>(&self, theme: Theme, surface: &mut T) {
        surface.apply_theme(theme);
        if let Err(e) = self.store.save(theme) {
            warn!("{}", e);
        }
    }
}
