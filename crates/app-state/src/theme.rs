//! Theme resolution and persistence
//!
//! [`ThemeResolver`] is the single source of truth for which palette is
//! active and which mode the user picked. Reads are synchronous and always
//! derived from the current mode and the platform color scheme; mutations
//! apply in memory immediately and are written through to the preference
//! store in the background.
//!
//! # Example
//!
//! ```no_run
//! use app_platform::{ColorScheme, ManualAppearance};
//! use app_state::config::ThemeConfig;
//! use app_state::theme::ThemeResolver;
//! use std::sync::Arc;
//! use storage::{MemoryPreferenceStore, ThemeMode};
//!
//! #[tokio::main]
//! async fn main() {
//!     let resolver = ThemeResolver::new(
//!         Arc::new(MemoryPreferenceStore::new()),
//!         Arc::new(ManualAppearance::new(ColorScheme::Dark)),
//!         ThemeConfig::default(),
//!     );
//!     resolver.init().await;
//!
//!     resolver.set_theme_mode(ThemeMode::System);
//!     assert!(!resolver.state().is_light);
//!
//!     resolver.dispose().await;
//! }
//! ```

use app_platform::{ColorScheme, SystemAppearance};
use app_ui::{palette_for, resolve_is_light, AppTheme, BrandPalette, ThemeToggleModel, ToggleAction};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use storage::{InvalidModeError, PreferenceStore, ThemeMode};
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;

use crate::config::ThemeConfig;
use crate::write_queue::WriteQueue;

/// Theme state errors
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    /// A mode value outside light/dark/system
    #[error(transparent)]
    InvalidMode(#[from] InvalidModeError),

    /// Configuration could not be parsed
    #[error("Invalid theme configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for theme state operations
pub type Result<T> = std::result::Result<T, ThemeError>;

/// What consumers render from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSnapshot {
    /// The user's preference
    pub theme_mode: ThemeMode,
    /// Whether the light palette is in effect
    pub is_light: bool,
    /// The active brand palette
    pub palette: &'static BrandPalette,
}

impl ThemeSnapshot {
    /// Derive the snapshot for a mode and platform scheme
    pub fn resolve(theme_mode: ThemeMode, scheme: ColorScheme) -> Self {
        let is_light = resolve_is_light(theme_mode, scheme);
        Self { theme_mode, is_light, palette: palette_for(is_light) }
    }

    /// Material roles plus brand colors for this snapshot
    pub fn app_theme(&self) -> AppTheme {
        AppTheme::new(self.is_light)
    }

    /// Settings control state for this snapshot
    pub fn toggle_model(&self) -> ThemeToggleModel {
        ThemeToggleModel::new(self.theme_mode, self.is_light)
    }
}

enum Lifecycle {
    Created,
    Initializing,
    Running { watcher_stop: oneshot::Sender<()>, watcher: JoinHandle<()> },
    Disposed,
}

struct Inner {
    config: ThemeConfig,
    store: Arc<dyn PreferenceStore>,
    appearance: Arc<dyn SystemAppearance>,
    mode: Mutex<ThemeMode>,
    /// Set once any mutation lands; the initial load must not override it
    touched: AtomicBool,
    loaded: AtomicBool,
    snapshot_tx: watch::Sender<ThemeSnapshot>,
    writes: WriteQueue,
    lifecycle: Mutex<Lifecycle>,
}

impl Inner {
    /// Recompute the snapshot and notify subscribers if it changed
    ///
    /// Called with the mode lock held so publications follow mutation order.
    fn publish(&self, mode: ThemeMode) -> ThemeSnapshot {
        let snapshot = ThemeSnapshot::resolve(mode, self.appearance.color_scheme());
        self.snapshot_tx.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });
        snapshot
    }

    fn update(&self, f: impl FnOnce(ThemeMode, ColorScheme) -> ThemeMode) -> ThemeSnapshot {
        let mut mode = self.mode.lock();
        let next = f(*mode, self.appearance.color_scheme());

        *mode = next;
        self.touched.store(true, Ordering::SeqCst);
        self.writes.enqueue(next);
        self.publish(next)
    }
}

/// Theme provider state
///
/// Cheap to clone; every clone shares the same state, so all render trees
/// built from one resolver agree on the theme.
#[derive(Clone)]
pub struct ThemeResolver {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for ThemeResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeResolver")
            .field("state", &self.state())
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

impl ThemeResolver {
    /// Create a resolver; state reads work immediately and report the default mode
    pub fn new(
        store: Arc<dyn PreferenceStore>,
        appearance: Arc<dyn SystemAppearance>,
        config: ThemeConfig,
    ) -> Self {
        let mode = config.default_mode;
        let (snapshot_tx, _) = watch::channel(ThemeSnapshot::resolve(mode, appearance.color_scheme()));

        Self {
            inner: Arc::new(Inner {
                config,
                store,
                appearance,
                mode: Mutex::new(mode),
                touched: AtomicBool::new(false),
                loaded: AtomicBool::new(false),
                snapshot_tx,
                writes: WriteQueue::new(),
                lifecycle: Mutex::new(Lifecycle::Created),
            }),
        }
    }

    /// Load the persisted preference and start background work
    ///
    /// Only the first call does anything. Load failures and corrupt values
    /// are logged and leave the default mode in place.
    pub async fn init(&self) {
        {
            let mut lifecycle = self.inner.lifecycle.lock();
            if !matches!(*lifecycle, Lifecycle::Created) {
                tracing::warn!("theme resolver already initialized");
                return;
            }
            *lifecycle = Lifecycle::Initializing;
        }

        let persisted = self.load_persisted().await;
        {
            let mut mode = self.inner.mode.lock();
            if self.inner.touched.load(Ordering::SeqCst) {
                tracing::debug!(mode = %*mode, "theme mode changed while loading; keeping it");
            } else if let Some(persisted) = persisted {
                *mode = persisted;
                self.inner.publish(persisted);
            }
            self.inner.loaded.store(true, Ordering::SeqCst);
        }

        let mut lifecycle = self.inner.lifecycle.lock();
        if !matches!(*lifecycle, Lifecycle::Initializing) {
            tracing::debug!("theme resolver disposed during initialization");
            return;
        }

        self.inner
            .writes
            .start(Arc::clone(&self.inner.store), self.inner.config.storage_key.clone());

        let (watcher_stop, stop_rx) = oneshot::channel();
        let watcher = tokio::spawn(watch_appearance(
            Arc::downgrade(&self.inner),
            self.inner.appearance.subscribe(),
            stop_rx,
        ));
        *lifecycle = Lifecycle::Running { watcher_stop, watcher };

        // Catch up on platform changes made before the watcher existed
        let mode = self.inner.mode.lock();
        let snapshot = self.inner.publish(*mode);
        tracing::info!(mode = %*mode, is_light = snapshot.is_light, "theme resolver initialized");
    }

    /// Stop watching the platform and finish the last pending write
    ///
    /// Later mutations still change in-memory state but are not persisted.
    pub async fn dispose(&self) {
        let previous = std::mem::replace(&mut *self.inner.lifecycle.lock(), Lifecycle::Disposed);

        match previous {
            Lifecycle::Disposed => return,
            Lifecycle::Running { watcher_stop, watcher } => {
                let _ = watcher_stop.send(());
                if let Err(e) = watcher.await {
                    tracing::error!(error = %e, "appearance watcher panicked");
                }
            }
            Lifecycle::Created | Lifecycle::Initializing => {}
        }

        self.inner.writes.stop().await;
        tracing::info!("theme resolver disposed");
    }

    async fn load_persisted(&self) -> Option<ThemeMode> {
        let key = self.inner.config.storage_key.as_str();

        match self.inner.store.get(key).await {
            Ok(Some(raw)) => match raw.parse::<ThemeMode>() {
                Ok(mode) => {
                    tracing::debug!(key, %mode, "loaded persisted theme mode");
                    Some(mode)
                }
                Err(error) => {
                    tracing::warn!(key, %error, "ignoring corrupt persisted theme mode");
                    None
                }
            },
            Ok(None) => {
                tracing::debug!(key, "no persisted theme mode");
                None
            }
            Err(error) => {
                tracing::warn!(key, %error, "failed to load theme mode; using default");
                None
            }
        }
    }

    /// Current theme, derived from the mode and the platform scheme
    pub fn state(&self) -> ThemeSnapshot {
        let mode = *self.inner.mode.lock();
        ThemeSnapshot::resolve(mode, self.inner.appearance.color_scheme())
    }

    /// The user's current preference
    pub fn theme_mode(&self) -> ThemeMode {
        *self.inner.mode.lock()
    }

    /// Whether the light palette is in effect
    pub fn is_light(&self) -> bool {
        self.state().is_light
    }

    /// The active brand palette
    pub fn palette(&self) -> &'static BrandPalette {
        self.state().palette
    }

    /// Set the user's preference
    ///
    /// Takes effect immediately; persistence happens in the background.
    pub fn set_theme_mode(&self, mode: ThemeMode) -> ThemeSnapshot {
        let snapshot = self.inner.update(|_, _| mode);
        tracing::debug!(%mode, is_light = snapshot.is_light, "theme mode set");
        snapshot
    }

    /// Set the preference from its literal (`"light"`, `"dark"`, `"system"`)
    ///
    /// Anything else is rejected and leaves the state untouched.
    pub fn set_theme_mode_str(&self, value: &str) -> Result<ThemeSnapshot> {
        let mode = value.parse::<ThemeMode>()?;
        Ok(self.set_theme_mode(mode))
    }

    /// Flip between light and dark
    ///
    /// In system mode this pins the opposite of what is currently shown.
    pub fn toggle_theme(&self) -> ThemeSnapshot {
        let snapshot = self.inner.update(|mode, scheme| {
            if resolve_is_light(mode, scheme) {
                ThemeMode::Dark
            } else {
                ThemeMode::Light
            }
        });
        tracing::debug!(mode = %snapshot.theme_mode, "theme toggled");
        snapshot
    }

    /// Apply an action from the settings control
    pub fn apply(&self, action: ToggleAction) -> ThemeSnapshot {
        match action {
            ToggleAction::SwitchFlipped => self.toggle_theme(),
            ToggleAction::ModePicked(mode) => self.set_theme_mode(mode),
        }
    }

    /// Observe theme changes
    ///
    /// Only observable changes are published; repeated sets of the same mode
    /// and platform changes that do not affect the palette are silent.
    pub fn subscribe(&self) -> watch::Receiver<ThemeSnapshot> {
        self.inner.snapshot_tx.subscribe()
    }

    /// Wait until all changes so far have been handed to the store
    pub async fn flush(&self) {
        self.inner.writes.flush().await;
    }

    /// Whether the persisted preference has been loaded
    pub fn is_loaded(&self) -> bool {
        self.inner.loaded.load(Ordering::SeqCst)
    }

    /// The configuration in use
    pub fn config(&self) -> &ThemeConfig {
        &self.inner.config
    }
}

async fn watch_appearance(
    inner: Weak<Inner>,
    mut scheme_rx: watch::Receiver<ColorScheme>,
    mut stop_rx: oneshot::Receiver<()>,
) {
    loop {
        tokio::select! {
            changed = scheme_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let scheme = *scheme_rx.borrow_and_update();
                let Some(shared) = inner.upgrade() else {
                    break;
                };

                let mode = shared.mode.lock();
                let snapshot = shared.publish(*mode);
                tracing::debug!(?scheme, mode = %*mode, is_light = snapshot.is_light, "system color scheme changed");
            }
            // Also fires when the last resolver drops and takes the sender with it
            _ = &mut stop_rx => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_platform::ManualAppearance;
    use app_ui::{DARK_PALETTE, LIGHT_PALETTE};
    use async_trait::async_trait;
    use mockall::mock;
    use std::time::Duration;
    use storage::test_utils::ScriptedStore;
    use storage::{MemoryPreferenceStore, StoreError, THEME_MODE_KEY};

    mock! {
        Store {}

        #[async_trait]
        impl PreferenceStore for Store {
            async fn get(&self, key: &str) -> storage::preferences::Result<Option<String>>;
            async fn set(&self, key: &str, value: &str) -> storage::preferences::Result<()>;
        }
    }

    fn resolver_with(
        store: Arc<dyn PreferenceStore>,
        scheme: ColorScheme,
    ) -> (ThemeResolver, Arc<ManualAppearance>) {
        let appearance = Arc::new(ManualAppearance::new(scheme));
        let resolver = ThemeResolver::new(store, appearance.clone(), ThemeConfig::default());
        (resolver, appearance)
    }

    // ==========================================================================
    // Reads and mutations
    // ==========================================================================

    #[test]
    fn test_snapshot_resolution() {
        let snapshot = ThemeSnapshot::resolve(ThemeMode::System, ColorScheme::Unknown);
        assert!(snapshot.is_light);
        assert_eq!(snapshot.palette, &LIGHT_PALETTE);

        let snapshot = ThemeSnapshot::resolve(ThemeMode::System, ColorScheme::Dark);
        assert!(!snapshot.is_light);
        assert_eq!(snapshot.palette, &DARK_PALETTE);
        assert!(snapshot.app_theme().is_dark());
        assert!(snapshot.toggle_model().dark_switch_on);
    }

    #[tokio::test]
    async fn test_default_state_before_init() {
        let (resolver, _) = resolver_with(Arc::new(MemoryPreferenceStore::new()), ColorScheme::Dark);

        let state = resolver.state();
        assert_eq!(state.theme_mode, ThemeMode::Light);
        assert!(state.is_light);
        assert!(!resolver.is_loaded());
    }

    #[tokio::test]
    async fn test_set_theme_mode_is_synchronous() {
        let (resolver, _) = resolver_with(Arc::new(MemoryPreferenceStore::new()), ColorScheme::Light);
        resolver.init().await;

        resolver.set_theme_mode(ThemeMode::Dark);
        assert_eq!(resolver.theme_mode(), ThemeMode::Dark);
        assert!(!resolver.is_light());
        assert_eq!(resolver.palette(), &DARK_PALETTE);
    }

    #[tokio::test]
    async fn test_set_theme_mode_idempotent() {
        let store = Arc::new(ScriptedStore::new());
        let (resolver, _) = resolver_with(store.clone(), ColorScheme::Light);
        resolver.init().await;
        let mut rx = resolver.subscribe();

        let once = resolver.set_theme_mode(ThemeMode::Dark);
        assert!(rx.has_changed().unwrap());
        rx.borrow_and_update();

        let twice = resolver.set_theme_mode(ThemeMode::Dark);
        assert_eq!(once, twice);
        assert_eq!(resolver.state(), once);
        assert!(!rx.has_changed().unwrap());

        resolver.flush().await;
        assert_eq!(store.value(THEME_MODE_KEY).await, Some("dark".to_string()));
    }

    #[tokio::test]
    async fn test_invalid_mode_rejected() {
        let store = Arc::new(ScriptedStore::new());
        let (resolver, _) = resolver_with(store.clone(), ColorScheme::Light);
        resolver.init().await;
        resolver.set_theme_mode(ThemeMode::System);
        resolver.flush().await;

        let result = resolver.set_theme_mode_str("purple");
        assert!(matches!(result, Err(ThemeError::InvalidMode(InvalidModeError(ref v))) if v == "purple"));
        assert_eq!(resolver.theme_mode(), ThemeMode::System);

        resolver.flush().await;
        assert_eq!(store.write_attempts(), 1);
    }

    #[tokio::test]
    async fn test_set_theme_mode_str_accepts_literals() {
        let (resolver, _) = resolver_with(Arc::new(MemoryPreferenceStore::new()), ColorScheme::Light);

        let snapshot = resolver.set_theme_mode_str("dark").unwrap();
        assert_eq!(snapshot.theme_mode, ThemeMode::Dark);
    }

    // ==========================================================================
    // Toggle
    // ==========================================================================

    #[tokio::test]
    async fn test_toggle_between_light_and_dark() {
        let (resolver, _) = resolver_with(Arc::new(MemoryPreferenceStore::new()), ColorScheme::Light);

        resolver.set_theme_mode(ThemeMode::Light);
        assert_eq!(resolver.toggle_theme().theme_mode, ThemeMode::Dark);
        assert_eq!(resolver.toggle_theme().theme_mode, ThemeMode::Light);
    }

    #[tokio::test]
    async fn test_toggle_from_system_pins_opposite() {
        let (resolver, appearance) =
            resolver_with(Arc::new(MemoryPreferenceStore::new()), ColorScheme::Dark);

        resolver.set_theme_mode(ThemeMode::System);
        assert!(!resolver.is_light());
        assert_eq!(resolver.toggle_theme().theme_mode, ThemeMode::Light);

        appearance.set(ColorScheme::Unknown);
        resolver.set_theme_mode(ThemeMode::System);
        assert_eq!(resolver.toggle_theme().theme_mode, ThemeMode::Dark);
    }

    #[tokio::test]
    async fn test_apply_toggle_actions() {
        let (resolver, _) = resolver_with(Arc::new(MemoryPreferenceStore::new()), ColorScheme::Light);

        assert_eq!(resolver.apply(ToggleAction::SwitchFlipped).theme_mode, ThemeMode::Dark);
        assert_eq!(
            resolver.apply(ToggleAction::ModePicked(ThemeMode::System)).theme_mode,
            ThemeMode::System
        );
    }

    // ==========================================================================
    // Persistence
    // ==========================================================================

    #[tokio::test]
    async fn test_init_loads_persisted_mode() {
        let store = Arc::new(MemoryPreferenceStore::with_value(THEME_MODE_KEY, "system"));
        let (resolver, _) = resolver_with(store, ColorScheme::Dark);
        let mut rx = resolver.subscribe();

        resolver.init().await;

        assert!(resolver.is_loaded());
        assert_eq!(resolver.theme_mode(), ThemeMode::System);
        assert!(rx.has_changed().unwrap());
        assert!(!rx.borrow_and_update().is_light);
    }

    #[tokio::test]
    async fn test_corrupt_persisted_value_falls_back_to_default() {
        let store = Arc::new(MemoryPreferenceStore::with_value(THEME_MODE_KEY, "blue"));
        let (resolver, _) = resolver_with(store, ColorScheme::Dark);

        resolver.init().await;

        assert!(resolver.is_loaded());
        assert_eq!(resolver.theme_mode(), ThemeMode::Light);
    }

    #[tokio::test]
    async fn test_read_failure_falls_back_to_default() {
        let mut store = MockStore::new();
        store
            .expect_get()
            .times(1)
            .returning(|key| Err(StoreError::read(key, "disk unavailable")));
        let config = ThemeConfig::new().default_mode(ThemeMode::System);
        let resolver = ThemeResolver::new(
            Arc::new(store),
            Arc::new(ManualAppearance::new(ColorScheme::Dark)),
            config,
        );

        resolver.init().await;

        assert!(resolver.is_loaded());
        assert_eq!(resolver.theme_mode(), ThemeMode::System);
    }

    #[tokio::test]
    async fn test_write_failure_keeps_in_memory_state() {
        let mut store = MockStore::new();
        store.expect_get().returning(|_| Ok(None));
        store
            .expect_set()
            .withf(|key, value| key.to_string() == THEME_MODE_KEY && value.to_string() == "dark")
            .times(1)
            .returning(|key, _| Err(StoreError::write(key, "read-only filesystem")));
        let (resolver, _) = resolver_with(Arc::new(store), ColorScheme::Light);
        resolver.init().await;

        resolver.set_theme_mode(ThemeMode::Dark);
        resolver.flush().await;

        assert_eq!(resolver.theme_mode(), ThemeMode::Dark);
        resolver.dispose().await;
    }

    #[tokio::test]
    async fn test_write_failure_reconciled_by_next_write() {
        let store = Arc::new(ScriptedStore::new());
        let (resolver, _) = resolver_with(store.clone(), ColorScheme::Light);
        resolver.init().await;

        store.fail_writes(true);
        resolver.set_theme_mode(ThemeMode::Dark);
        resolver.flush().await;
        assert_eq!(store.value(THEME_MODE_KEY).await, None);
        assert_eq!(resolver.theme_mode(), ThemeMode::Dark);

        store.fail_writes(false);
        resolver.set_theme_mode(ThemeMode::Light);
        resolver.flush().await;

        assert_eq!(store.value(THEME_MODE_KEY).await, Some("light".to_string()));
        assert_eq!(store.write_attempts(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_changes_persist_last_value() {
        let store = Arc::new(ScriptedStore::new());
        store
            .delay_writes([Duration::from_millis(300), Duration::from_millis(5)])
            .await;
        let (resolver, _) = resolver_with(store.clone(), ColorScheme::Light);
        resolver.init().await;

        resolver.set_theme_mode(ThemeMode::Dark);
        resolver.set_theme_mode(ThemeMode::Light);
        resolver.flush().await;

        let writes = store.writes().await;
        assert_eq!(writes.last().map(|(_, v)| v.as_str()), Some("light"));
        assert_eq!(store.value(THEME_MODE_KEY).await, Some("light".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_write_is_not_clobbered() {
        let store = Arc::new(ScriptedStore::new());
        store
            .delay_writes([Duration::from_millis(300), Duration::from_millis(5)])
            .await;
        let (resolver, _) = resolver_with(store.clone(), ColorScheme::Light);
        resolver.init().await;

        resolver.set_theme_mode(ThemeMode::Dark);
        tokio::time::sleep(Duration::from_millis(10)).await;
        resolver.set_theme_mode(ThemeMode::Light);
        resolver.flush().await;

        let values: Vec<_> = store.writes().await.into_iter().map(|(_, v)| v).collect();
        assert_eq!(values, vec!["dark".to_string(), "light".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_change_during_load_wins() {
        let store = Arc::new(ScriptedStore::with_value(THEME_MODE_KEY, "dark"));
        store.delay_reads(Duration::from_millis(100)).await;
        let (resolver, _) = resolver_with(store.clone(), ColorScheme::Light);

        let init = tokio::spawn({
            let resolver = resolver.clone();
            async move { resolver.init().await }
        });
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(!resolver.is_loaded());

        resolver.set_theme_mode(ThemeMode::System);
        init.await.unwrap();

        assert!(resolver.is_loaded());
        assert_eq!(resolver.theme_mode(), ThemeMode::System);

        resolver.flush().await;
        assert_eq!(store.value(THEME_MODE_KEY).await, Some("system".to_string()));
    }

    // ==========================================================================
    // System appearance
    // ==========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_system_change_republishes_in_system_mode() {
        let (resolver, appearance) =
            resolver_with(Arc::new(MemoryPreferenceStore::new()), ColorScheme::Light);
        resolver.init().await;
        resolver.set_theme_mode(ThemeMode::System);
        let mut rx = resolver.subscribe();
        rx.borrow_and_update();

        appearance.set(ColorScheme::Dark);
        // Reads never lag the platform
        assert!(!resolver.is_light());

        rx.changed().await.unwrap();
        let snapshot = *rx.borrow_and_update();
        assert_eq!(snapshot.theme_mode, ThemeMode::System);
        assert!(!snapshot.is_light);
        assert_eq!(snapshot.palette, &DARK_PALETTE);
    }

    #[tokio::test(start_paused = true)]
    async fn test_system_change_silent_in_explicit_mode() {
        let (resolver, appearance) =
            resolver_with(Arc::new(MemoryPreferenceStore::new()), ColorScheme::Light);
        resolver.init().await;
        resolver.set_theme_mode(ThemeMode::Light);
        let mut rx = resolver.subscribe();
        rx.borrow_and_update();

        appearance.set(ColorScheme::Dark);
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert!(!rx.has_changed().unwrap());
        assert!(resolver.is_light());
    }

    // ==========================================================================
    // Lifecycle
    // ==========================================================================

    #[tokio::test]
    async fn test_init_twice_is_noop() {
        let store = Arc::new(ScriptedStore::with_value(THEME_MODE_KEY, "dark"));
        let (resolver, _) = resolver_with(store.clone(), ColorScheme::Light);

        resolver.init().await;
        resolver.set_theme_mode(ThemeMode::Light);
        resolver.init().await;

        assert_eq!(resolver.theme_mode(), ThemeMode::Light);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let (resolver, _) = resolver_with(Arc::new(MemoryPreferenceStore::new()), ColorScheme::Light);
        let other = resolver.clone();

        other.set_theme_mode(ThemeMode::Dark);
        assert_eq!(resolver.state(), other.state());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_resolver_stops_watcher() {
        let (resolver, appearance) =
            resolver_with(Arc::new(MemoryPreferenceStore::new()), ColorScheme::Light);
        resolver.init().await;
        assert_eq!(appearance.subscriber_count(), 1);

        drop(resolver);
        tokio::time::sleep(Duration::from_millis(1)).await;

        // No platform change was needed for the watcher to exit
        assert_eq!(appearance.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_dispose_stops_persistence() {
        let store = Arc::new(ScriptedStore::new());
        let (resolver, _) = resolver_with(store.clone(), ColorScheme::Light);
        resolver.init().await;

        resolver.set_theme_mode(ThemeMode::Dark);
        resolver.dispose().await;
        assert_eq!(store.value(THEME_MODE_KEY).await, Some("dark".to_string()));

        resolver.set_theme_mode(ThemeMode::System);
        resolver.flush().await;
        assert_eq!(resolver.theme_mode(), ThemeMode::System);
        assert_eq!(store.value(THEME_MODE_KEY).await, Some("dark".to_string()));

        // Second dispose is harmless
        resolver.dispose().await;
    }
}
