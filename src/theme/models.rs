//! Theme Domain Models

use serde::{Deserialize, Serialize};

/// What the user picked
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
    /// Follow the operating system
    #[default]
    System,
}

/// A theme that can actually be rendered
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResolvedTheme {
    #[default]
    Light,
    Dark,
}

impl ResolvedTheme {
    pub fn as_str(self) -> &'static str {
        match self {
            ResolvedTheme::Light => "light",
            ResolvedTheme::Dark => "dark",
        }
    }
}

impl ThemePreference {
    /// Concrete theme for this preference given the OS scheme.
    pub fn resolve(self, system: ResolvedTheme) -> ResolvedTheme {
        match self {
            ThemePreference::Light => ResolvedTheme::Light,
            ThemePreference::Dark => ResolvedTheme::Dark,
            ThemePreference::System => system,
        }
    }

    /// Preference after a toggle. `System` toggles to `Light` whatever the
    /// OS currently shows.
    pub fn toggled(self) -> ThemePreference {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
            ThemePreference::System => ThemePreference::Light,
        }
    }
}

/// Current preference and what it resolved to
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ThemeView {
    pub theme: ThemePreference,
    pub resolved_theme: ResolvedTheme,
}

/// Input for setting the preference
#[derive(Debug, Deserialize)]
pub struct SetThemeInput {
    pub theme: ThemePreference,
}

/// OS color-scheme notification relayed by the rendering client
#[derive(Debug, Deserialize)]
pub struct SystemSchemeInput {
    pub scheme: ResolvedTheme,
}
