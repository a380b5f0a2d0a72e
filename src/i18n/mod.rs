//! Internationalization module
//!
//! Resolves UI keys to display text for the current language. Translations
//! are fetched from the backend one language at a time and fully replace the
//! previous mapping. Missing keys fall back to a caller default or the key
//! itself, and are recorded so untranslated strings can be listed.
//!
//! Consumers learn about language changes either through callback listeners
//! or by subscribing to the [`TranslationEvent`] channel.

mod store;
pub mod titles;

pub use store::{FileLanguageStore, LanguageStore, MemoryLanguageStore};

use crate::api::{extract_content, Backend};
use crate::core::{I18nConfig, Navigation, Result, TranslationEvent};
use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::broadcast;

/// Callback fired after the translation state changes
pub type Listener = Arc<dyn Fn() + Send + Sync>;

/// Handle returned by [`TranslationService::add_listener`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

const EVENT_CAPACITY: usize = 16;

#[derive(Default)]
struct TranslationState {
    current_language: Option<String>,
    translations: HashMap<String, String>,
}

/// Translation resolver shared by every page of the site
pub struct TranslationService {
    config: I18nConfig,
    backend: Arc<dyn Backend>,
    store: Box<dyn LanguageStore>,
    state: RwLock<TranslationState>,
    listeners: Mutex<Vec<(ListenerId, Listener)>>,
    next_listener: AtomicU64,
    events: broadcast::Sender<TranslationEvent>,
    untranslated: Mutex<BTreeSet<String>>,
}

impl TranslationService {
    /// Create a service with an empty mapping and no language loaded yet
    pub fn new(
        config: I18nConfig,
        backend: Arc<dyn Backend>,
        store: Box<dyn LanguageStore>,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            config,
            backend,
            store,
            state: RwLock::new(TranslationState::default()),
            listeners: Mutex::new(Vec::new()),
            next_listener: AtomicU64::new(1),
            events,
            untranslated: Mutex::new(BTreeSet::new()),
        }
    }

    /// Settings this service was built with
    pub fn config(&self) -> &I18nConfig {
        &self.config
    }

    /// Get the current language code.
    ///
    /// Falls back to the persisted preference, then to the configured
    /// default. Always returns a supported code.
    pub fn current_language(&self) -> String {
        if let Some(language) = self.read_state().current_language.clone() {
            return language;
        }
        self.persisted_language()
            .unwrap_or_else(|| self.config.default_language.clone())
    }

    /// Fetch and install the translations for a language.
    ///
    /// On success the mapping and current language are replaced together and
    /// listeners fire. On any failure the mapping is emptied, the current
    /// language is left alone, and an empty mapping is returned.
    pub async fn load_translations(&self, language: &str) -> HashMap<String, String> {
        let language = self.resolve_language(language);

        match self.fetch_translations(&language).await {
            Ok(translations) => {
                let entries = translations.len();
                {
                    let mut state = self.write_state();
                    state.translations = translations.clone();
                    state.current_language = Some(language.clone());
                }
                log::info!("Language set to: {} ({} entries)", language, entries);
                self.notify(&language, entries);
                translations
            }
            Err(e) => {
                log::error!("Failed to load translations for '{}': {}", language, e);
                self.write_state().translations = HashMap::new();
                HashMap::new()
            }
        }
    }

    async fn fetch_translations(&self, language: &str) -> Result<HashMap<String, String>> {
        let body = self.backend.fetch_translations(language).await?;
        Ok(extract_content(body))
    }

    /// Get a translated string by key.
    ///
    /// Returns the translation when present and non-empty, else `default`
    /// when non-empty, else the key itself.
    pub fn get_text(&self, key: &str, default: Option<&str>) -> String {
        if let Some(text) = self.read_state().translations.get(key) {
            if !text.is_empty() {
                return text.clone();
            }
        }

        self.record_untranslated(key);

        match default {
            Some(default) if !default.is_empty() => default.to_string(),
            _ => key.to_string(),
        }
    }

    /// Shorthand for [`get_text`](Self::get_text) without a default
    pub fn t(&self, key: &str) -> String {
        self.get_text(key, None)
    }

    /// Check whether the loaded mapping contains a key
    pub fn has_translation(&self, key: &str) -> bool {
        self.read_state().translations.contains_key(key)
    }

    /// Get all translations
    pub fn get_all(&self) -> HashMap<String, String> {
        self.read_state().translations.clone()
    }

    /// Make a language current without fetching, persist it, and notify
    pub fn set_language(&self, language: &str) {
        let language = self.resolve_language(language);
        let entries = {
            let mut state = self.write_state();
            state.current_language = Some(language.clone());
            state.translations.len()
        };
        self.persist(&language);
        self.notify(&language, entries);
    }

    /// Explicit language switch: load, then persist the choice
    pub async fn change_language(&self, language: &str) -> HashMap<String, String> {
        let language = self.resolve_language(language);
        let translations = self.load_translations(&language).await;
        self.persist(&language);
        translations
    }

    /// Reload the current language
    pub async fn refresh_translations(&self) -> HashMap<String, String> {
        let language = self.current_language();
        self.load_translations(&language).await
    }

    /// Ask the backend to translate one key, falling back to the key
    pub async fn translate_text(&self, key: &str, language: &str) -> String {
        match self.backend.translate_text(key, language).await {
            Ok(text) => text,
            Err(e) => {
                log::warn!("Remote translation of '{}' failed: {}", key, e);
                key.to_string()
            }
        }
    }

    /// Language code carried by the first path segment, if supported
    pub fn language_from_path(&self, path: &str) -> Option<String> {
        let first = path
            .split(['?', '#'])
            .next()
            .unwrap_or("")
            .split('/')
            .find(|segment| !segment.is_empty())?;

        if self.config.is_supported(first) {
            Some(first.to_string())
        } else {
            None
        }
    }

    /// Decide which language a navigation should use and whether to redirect
    pub fn resolve_navigation(&self, path: &str) -> Navigation {
        match self.language_from_path(path) {
            Some(language) => Navigation {
                language,
                redirect: None,
            },
            None => {
                let language = self.current_language();
                let redirect = Some(redirect_path(&language, path));
                Navigation { language, redirect }
            }
        }
    }

    /// Load the language for the page being entered: URL, then saved, then default
    pub async fn initialize(&self, path: &str) -> Navigation {
        let navigation = match self.language_from_path(path) {
            Some(language) => Navigation {
                language,
                redirect: None,
            },
            None => {
                let language = self
                    .persisted_language()
                    .unwrap_or_else(|| self.config.default_language.clone());
                let redirect = Some(redirect_path(&language, path));
                Navigation { language, redirect }
            }
        };

        self.load_translations(&navigation.language).await;
        navigation
    }

    /// Register a callback fired after every language change
    pub fn add_listener(&self, listener: impl Fn() + Send + Sync + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener.fetch_add(1, Ordering::Relaxed));
        lock(&self.listeners).push((id, Arc::new(listener)));
        id
    }

    /// Deregister a callback; returns whether it was registered
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = lock(&self.listeners);
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    /// Subscribe to language change events
    pub fn subscribe(&self) -> broadcast::Receiver<TranslationEvent> {
        self.events.subscribe()
    }

    /// Keys that were looked up without a translation, sorted
    pub fn untranslated_keys(&self) -> Vec<String> {
        lock(&self.untranslated).iter().cloned().collect()
    }

    /// Forget the recorded untranslated keys
    pub fn clear_untranslated_keys(&self) {
        lock(&self.untranslated).clear();
    }

    fn resolve_language(&self, language: &str) -> String {
        let requested = language.trim().to_ascii_lowercase();
        let resolved = self.config.resolve(&requested);
        if resolved != requested {
            log::warn!(
                "Unsupported language '{}', using '{}' instead",
                language,
                resolved
            );
        }
        resolved
    }

    fn persisted_language(&self) -> Option<String> {
        match self.store.load() {
            Ok(Some(language)) if self.config.is_supported(&language) => Some(language),
            Ok(Some(language)) => {
                log::warn!("Ignoring unsupported saved language '{}'", language);
                None
            }
            Ok(None) => None,
            Err(e) => {
                log::warn!("Failed to read saved language: {}", e);
                None
            }
        }
    }

    fn persist(&self, language: &str) {
        if let Err(e) = self.store.save(language) {
            log::error!("Failed to save language '{}': {}", language, e);
        }
    }

    fn notify(&self, language: &str, entries: usize) {
        // Snapshot so listeners may call back into the service
        let listeners: Vec<Listener> = lock(&self.listeners)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener();
        }

        // No receivers is fine
        let _ = self.events.send(TranslationEvent::LanguageChanged {
            language: language.to_string(),
            entries,
        });
    }

    fn record_untranslated(&self, key: &str) {
        let mut seen = lock(&self.untranslated);
        if !seen.contains(key) {
            log::debug!("Missing translation for '{}'", key);
            seen.insert(key.to_string());
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, TranslationState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, TranslationState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn redirect_path(language: &str, path: &str) -> String {
    match path.trim_start_matches('/') {
        "" => format!("/{}", language),
        rest => format!("/{}/{}", language, rest),
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
