//! Process-wide theme and language settings
//!
//! Settings live in a `tokio::sync::watch` channel. Components receive a
//! [`SettingsContext`] clone and either read the current value or subscribe
//! to changes.

use crate::i18n::{translate, Language, MessageKey};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;

/// Colour theme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The other theme
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// User interface preferences
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub language: Language,
}

/// Shared, observable settings
#[derive(Debug, Clone)]
pub struct SettingsContext {
    tx: Arc<watch::Sender<Settings>>,
}

impl SettingsContext {
    pub fn new(initial: Settings) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    /// Current settings snapshot
    pub fn current(&self) -> Settings {
        *self.tx.borrow()
    }

    pub fn language(&self) -> Language {
        self.tx.borrow().language
    }

    pub fn theme(&self) -> Theme {
        self.tx.borrow().theme
    }

    pub fn set_theme(&self, theme: Theme) {
        self.tx.send_if_modified(|s| replace(&mut s.theme, theme));
    }

    pub fn toggle_theme(&self) {
        self.tx.send_modify(|s| s.theme = s.theme.toggled());
    }

    pub fn set_language(&self, language: Language) {
        self.tx
            .send_if_modified(|s| replace(&mut s.language, language));
    }

    /// Translate `key` into the current language
    pub fn message(&self, key: MessageKey) -> &'static str {
        translate(self.language(), key)
    }

    /// Receive every settings change
    pub fn subscribe(&self) -> watch::Receiver<Settings> {
        self.tx.subscribe()
    }
}

impl Default for SettingsContext {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}
