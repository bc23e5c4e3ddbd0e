//! Theme State Management
//!
//! [`ThemeStore`] keeps the preference, resolves it against the last known
//! OS color scheme, and publishes the resolved theme on a watch channel the
//! rendering side subscribes to.

use super::models::{ResolvedTheme, ThemePreference, ThemeView};
use crate::storage::{load_json, save_json, SharedStore, THEME_STORAGE_KEY};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedTheme {
    theme: ThemePreference,

    /// Written for readers of the raw record; ignored on load
    #[serde(default, skip_serializing_if = "Option::is_none")]
    resolved_theme: Option<ResolvedTheme>,
}

pub struct ThemeStore {
    preference: ThemePreference,
    resolved: ResolvedTheme,
    /// Last color scheme reported by the OS
    system: ResolvedTheme,
    surface: watch::Sender<ResolvedTheme>,
    storage: SharedStore,
}

impl ThemeStore {
    /// Restores the preference from storage and resolves it against
    /// `system`. A missing or malformed record means "follow the system".
    pub fn load(storage: SharedStore, system: ResolvedTheme) -> Self {
        let preference = load_json::<PersistedTheme>(storage.as_ref(), THEME_STORAGE_KEY)
            .map(|stored| stored.theme)
            .unwrap_or_default();
        let resolved = preference.resolve(system);
        let (surface, _) = watch::channel(resolved);

        info!("Theme restored: {:?} ({})", preference, resolved.as_str());

        Self {
            preference,
            resolved,
            system,
            surface,
            storage,
        }
    }

    pub fn preference(&self) -> ThemePreference {
        self.preference
    }

    pub fn resolved(&self) -> ResolvedTheme {
        self.resolved
    }

    pub fn view(&self) -> ThemeView {
        ThemeView {
            theme: self.preference,
            resolved_theme: self.resolved,
        }
    }

    /// Receiver that sees every theme applied from now on.
    pub fn subscribe(&self) -> watch::Receiver<ResolvedTheme> {
        self.surface.subscribe()
    }

    pub fn set_theme(&mut self, preference: ThemePreference) {
        self.preference = preference;
        self.apply(preference.resolve(self.system));
        self.persist();
    }

    pub fn toggle_theme(&mut self) {
        self.set_theme(self.preference.toggled());
    }

    /// OS color scheme changed. Re-applies only while following the system.
    pub fn on_system_change(&mut self, scheme: ResolvedTheme) {
        self.system = scheme;
        if self.preference == ThemePreference::System {
            self.apply(scheme);
        } else {
            debug!("Ignoring OS scheme {} under explicit preference", scheme.as_str());
        }
    }

    fn apply(&mut self, resolved: ResolvedTheme) {
        self.resolved = resolved;
        self.surface.send_replace(resolved);
        info!("Applied {} theme", resolved.as_str());
    }

    fn persist(&self) {
        let record = PersistedTheme {
            theme: self.preference,
            resolved_theme: Some(self.resolved),
        };
        if let Err(e) = save_json(self.storage.as_ref(), THEME_STORAGE_KEY, &record) {
            warn!("Failed to persist theme: {e}");
        }
    }
}

/// Feeds OS color-scheme notifications into `theme` until every sender of
/// `schemes` is gone.
pub fn spawn_system_watcher(
    theme: Arc<Mutex<ThemeStore>>,
    mut schemes: watch::Receiver<ResolvedTheme>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while schemes.changed().await.is_ok() {
            let scheme = *schemes.borrow_and_update();
            theme.lock().on_system_change(scheme);
        }
        debug!("System theme watcher stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{KeyValueStore, MemoryStore};

    fn store(system: ResolvedTheme) -> (ThemeStore, Arc<MemoryStore>) {
        let storage = Arc::new(MemoryStore::new());
        (ThemeStore::load(storage.clone(), system), storage)
    }

    #[test]
    fn test_defaults_to_system() {
        let (theme, _) = store(ResolvedTheme::Dark);
        assert_eq!(theme.preference(), ThemePreference::System);
        assert_eq!(theme.resolved(), ResolvedTheme::Dark);
    }

    #[test]
    fn test_explicit_preference_resolves_directly() {
        let (mut theme, _) = store(ResolvedTheme::Dark);
        theme.set_theme(ThemePreference::Light);
        assert_eq!(theme.resolved(), ResolvedTheme::Light);

        theme.set_theme(ThemePreference::System);
        assert_eq!(theme.resolved(), ResolvedTheme::Dark);
    }

    #[test]
    fn test_toggle() {
        let (mut theme, _) = store(ResolvedTheme::Light);

        theme.set_theme(ThemePreference::Light);
        theme.toggle_theme();
        assert_eq!(theme.preference(), ThemePreference::Dark);
        assert_eq!(theme.resolved(), ResolvedTheme::Dark);

        theme.toggle_theme();
        assert_eq!(theme.preference(), ThemePreference::Light);
    }

    #[test]
    fn test_toggle_from_system_goes_light() {
        let (mut theme, _) = store(ResolvedTheme::Light);
        theme.on_system_change(ResolvedTheme::Dark);
        assert_eq!(theme.resolved(), ResolvedTheme::Dark);

        theme.toggle_theme();
        assert_eq!(theme.preference(), ThemePreference::Light);
        assert_eq!(theme.resolved(), ResolvedTheme::Light);

        // Starting from a light OS the toggle still lands on light.
        let (mut theme, _) = store(ResolvedTheme::Light);
        theme.toggle_theme();
        assert_eq!(theme.resolved(), ResolvedTheme::Light);
    }

    #[test]
    fn test_system_change_only_applies_while_following() {
        let (mut theme, _) = store(ResolvedTheme::Light);
        let surface = theme.subscribe();

        theme.set_theme(ThemePreference::System);
        theme.on_system_change(ResolvedTheme::Dark);
        assert_eq!(theme.resolved(), ResolvedTheme::Dark);
        assert_eq!(*surface.borrow(), ResolvedTheme::Dark);

        theme.set_theme(ThemePreference::Light);
        theme.on_system_change(ResolvedTheme::Dark);
        assert_eq!(theme.resolved(), ResolvedTheme::Light);
        assert_eq!(*surface.borrow(), ResolvedTheme::Light);

        // The remembered OS scheme is used once system is picked again.
        theme.set_theme(ThemePreference::System);
        assert_eq!(theme.resolved(), ResolvedTheme::Dark);
    }

    #[test]
    fn test_preference_persists() {
        let (mut theme, storage) = store(ResolvedTheme::Light);
        theme.set_theme(ThemePreference::Dark);

        let raw = storage.get(THEME_STORAGE_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["state"]["theme"], "dark");

        let restored = ThemeStore::load(storage, ResolvedTheme::Light);
        assert_eq!(restored.preference(), ThemePreference::Dark);
        assert_eq!(restored.resolved(), ResolvedTheme::Dark);
    }

    #[test]
    fn test_stored_resolved_theme_is_recomputed() {
        let storage = Arc::new(MemoryStore::new());
        storage
            .set(
                THEME_STORAGE_KEY,
                r#"{"state":{"theme":"system","resolvedTheme":"dark"},"version":0}"#.into(),
            )
            .unwrap();

        let theme = ThemeStore::load(storage, ResolvedTheme::Light);
        assert_eq!(theme.resolved(), ResolvedTheme::Light);
    }

    #[test]
    fn test_malformed_record_falls_back_to_system() {
        let storage = Arc::new(MemoryStore::new());
        storage
            .set(THEME_STORAGE_KEY, r#"{"state":{"theme":"sepia"}}"#.into())
            .unwrap();

        let theme = ThemeStore::load(storage, ResolvedTheme::Dark);
        assert_eq!(theme.preference(), ThemePreference::System);
        assert_eq!(theme.resolved(), ResolvedTheme::Dark);
    }

    #[tokio::test]
    async fn test_watcher_reapplies_without_user_action() {
        let (theme, _) = store(ResolvedTheme::Light);
        let theme = Arc::new(Mutex::new(theme));
        let mut surface = theme.lock().subscribe();

        let (os, schemes) = watch::channel(ResolvedTheme::Light);
        let watcher = spawn_system_watcher(theme.clone(), schemes);

        os.send_replace(ResolvedTheme::Dark);
        surface.changed().await.unwrap();
        assert_eq!(*surface.borrow_and_update(), ResolvedTheme::Dark);
        assert_eq!(theme.lock().resolved(), ResolvedTheme::Dark);

        drop(os);
        watcher.await.unwrap();
    }
}
