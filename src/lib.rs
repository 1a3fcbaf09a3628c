//! # safer-el3arbiat
//!
//! Localization core of the Safer El3arbiat car marketplace, packaged as a
//! [Bevy](https://bevyengine.org/) plugin, plus the marketplace records, form
//! state and store interface its pages are built on.
//!
//! - **Bilingual**: every message has an English and an Arabic variant
//! - **Fallback-to-key**: an unknown key resolves to the key itself, never an error
//! - **Direction aware**: Arabic switches the host to right-to-left
//! - **Number formatting**: `en-EG` / `ar-EG` conventions through ICU4X
//! - **Flexible loading**: bundled at build time or read from `messages/`
//!
//! ## Quick Start
//!
//! ```no_run
//! use bevy::prelude::*;
//! use safer_el3arbiat::{ LocalizationPlugin, Localizer };
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(MinimalPlugins)
//!         .add_plugins(LocalizationPlugin::default())
//!         .add_systems(Startup, greet)
//!         .run();
//! }
//!
//! fn greet(localizer: Res<Localizer>) {
//!     let ctx = localizer.context();
//!     info!("{} - {} {}", ctx.t("heroTitle"), ctx.format_number(12000), ctx.t("currency"));
//! }
//! ```

use std::sync::Arc;

use bevy::log::{ debug, info, warn };
use bevy::prelude::*;

mod context;
mod error;
mod format;
mod locale;
mod table;

pub mod forms;
pub mod listing;
pub mod routes;
pub mod store;

pub use context::{ LocaleContext, LocaleHook };
pub use error::LocalizationError;
pub use format::{ Number, format_number };
pub use locale::{ Locale, LocaleInfo, TextDirection };
pub use table::{
    TranslationTable,
    Variants,
    bundled_table,
    load_bundled_translations,
    load_filesystem_translations,
};
#[cfg(not(target_arch = "wasm32"))]
pub use table::load_translation_from_fs;

/// Configuration for the localization plugin.
///
/// # Example
///
/// ```
/// use safer_el3arbiat::{ Locale, LocalizationConfig };
///
/// let config = LocalizationConfig {
///     use_bundled_translations: false,
///     messages_folder: "locales".to_string(),
///     default_locale: Locale::Ar,
/// };
/// assert!(config.default_locale.is_right_to_left());
/// ```
#[derive(Debug, Clone, Resource)]
pub struct LocalizationConfig {
    /// Whether to use translations bundled at build time (true) or read
    /// `messages_folder` at runtime (false). Defaults to `true` on WASM or
    /// with the `bundle-only` feature.
    pub use_bundled_translations: bool,
    /// Folder holding `<locale>/<file>.json` message files.
    /// Default: "messages"
    pub messages_folder: String,
    /// Locale the session starts in.
    /// Default: English
    pub default_locale: Locale,
}

impl Default for LocalizationConfig {
    fn default() -> Self {
        Self {
            use_bundled_translations: cfg!(target_arch = "wasm32") || cfg!(feature = "bundle-only"),
            messages_folder: "messages".to_string(),
            default_locale: Locale::default(),
        }
    }
}

// ---------- Bevy Plugin ----------

/// Installs the [`Localizer`] session and the [`DocumentAttributes`] it drives.
///
/// ```no_run
/// use bevy::prelude::*;
/// use safer_el3arbiat::{ Locale, LocalizationConfig, LocalizationPlugin };
///
/// App::new().add_plugins(LocalizationPlugin::with_config(LocalizationConfig {
///     default_locale: Locale::Ar,
///     ..Default::default()
/// }));
/// ```
#[derive(Default)]
pub struct LocalizationPlugin {
    pub config: LocalizationConfig,
}

impl LocalizationPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: LocalizationConfig) -> Self {
        Self { config }
    }
}

impl Plugin for LocalizationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone())
            .init_resource::<Localizer>()
            .insert_resource(DocumentAttributes::from(self.config.default_locale))
            .add_systems(
                PostUpdate,
                sync_document_attributes.run_if(resource_changed::<Localizer>)
            );
    }
}

/// Direction and language attributes of the hosting document, as the view
/// layer should mirror them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Resource)]
pub struct DocumentAttributes {
    pub dir: TextDirection,
    pub lang: Locale,
}

impl DocumentAttributes {
    pub fn dir_attr(&self) -> &'static str {
        self.dir.attr()
    }

    pub fn lang_attr(&self) -> &'static str {
        self.lang.tag()
    }
}

impl From<Locale> for DocumentAttributes {
    fn from(locale: Locale) -> Self {
        Self {
            dir: locale.direction(),
            lang: locale,
        }
    }
}

impl Default for DocumentAttributes {
    fn default() -> Self {
        Locale::default().into()
    }
}

/// Mirrors locale switches made through `ResMut<Localizer>` into
/// [`DocumentAttributes`].
fn sync_document_attributes(localizer: Res<Localizer>, mut document: ResMut<DocumentAttributes>) {
    let attributes = DocumentAttributes::from(localizer.locale());
    // set_if_neq keeps change detection quiet when nothing moved
    document.set_if_neq(attributes);
}

// ---------- Session ----------

/// The application's localization session.
///
/// Owns the shared [`TranslationTable`], the current locale and the hooks
/// notified when it changes.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use safer_el3arbiat::{ Locale, Localizer, TranslationTable };
///
/// let table = TranslationTable::new().with("home", "Home", "الرئيسية");
/// let mut localizer = Localizer::new(Arc::new(table), Locale::En);
///
/// assert_eq!(localizer.resolve("home"), "Home");
/// localizer.set_locale(Locale::Ar);
/// assert_eq!(localizer.resolve("home"), "الرئيسية");
/// assert_eq!(localizer.resolve("nonexistentKey"), "nonexistentKey");
/// assert!(localizer.current_locale().is_right_to_left);
/// ```
#[derive(Resource)]
pub struct Localizer {
    table: Arc<TranslationTable>,
    locale: Locale,
    hooks: Vec<Box<dyn LocaleHook>>,
}

impl FromWorld for Localizer {
    fn from_world(world: &mut World) -> Self {
        let config = world.get_resource::<LocalizationConfig>().cloned().unwrap_or_default();

        let table = if config.use_bundled_translations {
            load_bundled_translations(&config.messages_folder)
        } else {
            load_filesystem_translations(&config.messages_folder)
        };
        info!("Loaded {} translation keys, starting in '{}'", table.len(), config.default_locale);

        Self::new(table, config.default_locale)
    }
}

impl Localizer {
    pub fn new(table: Arc<TranslationTable>, locale: Locale) -> Self {
        Self {
            table,
            locale,
            hooks: Vec::new(),
        }
    }

    /// Session over the translations compiled into the binary.
    pub fn bundled(locale: Locale) -> Self {
        Self::new(bundled_table(), locale)
    }

    /// Text for `key` in the current locale, or `key` itself when the table
    /// has no text for it.
    pub fn resolve<'a>(&'a self, key: &'a str) -> &'a str {
        self.table.lookup(key, self.locale).unwrap_or(key)
    }

    /// Switches the locale. Hooks run synchronously, before this returns,
    /// and only when the locale actually changes.
    pub fn set_locale(&mut self, locale: Locale) {
        if self.locale == locale {
            return;
        }
        debug!("Switching locale from '{}' to '{}'", self.locale, locale);
        self.locale = locale;

        let info = self.current_locale();
        for hook in &mut self.hooks {
            hook.locale_changed(info);
        }
    }

    /// Flips between English and Arabic, returning the new locale.
    pub fn toggle_locale(&mut self) -> Locale {
        self.set_locale(self.locale.toggled());
        self.locale
    }

    pub fn format_number(&self, value: impl Into<Number>) -> String {
        format_number(value, self.locale)
    }

    pub fn current_locale(&self) -> LocaleInfo {
        self.locale.into()
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn is_right_to_left(&self) -> bool {
        self.locale.is_right_to_left()
    }

    pub fn table(&self) -> &TranslationTable {
        &self.table
    }

    pub fn context(&self) -> LocaleContext<'_> {
        LocaleContext::new(&self.table, self.locale)
    }

    /// Registers a hook and runs it once with the current locale, so the
    /// host starts out in sync.
    pub fn add_hook(&mut self, mut hook: impl LocaleHook + 'static) {
        hook.locale_changed(self.current_locale());
        self.hooks.push(Box::new(hook));
    }
}

// ---------- API ----------

/// Extension trait for `App` to switch locale outside of systems.
///
/// Updates the [`Localizer`] and the [`DocumentAttributes`] together, so
/// both are current as soon as the call returns.
pub trait LocaleAppExt {
    fn set_locale(&mut self, locale: Locale);
    fn current_locale(&self) -> Option<LocaleInfo>;
}

impl LocaleAppExt for App {
    fn set_locale(&mut self, locale: Locale) {
        let world = self.world_mut();
        let Some(mut localizer) = world.get_resource_mut::<Localizer>() else {
            warn!("Locale '{}' ignored: LocalizationPlugin is not installed", locale);
            return;
        };
        localizer.set_locale(locale);

        if let Some(mut document) = world.get_resource_mut::<DocumentAttributes>() {
            document.set_if_neq(DocumentAttributes::from(locale));
        }
    }

    fn current_locale(&self) -> Option<LocaleInfo> {
        self.world().get_resource::<Localizer>().map(Localizer::current_locale)
    }
}
