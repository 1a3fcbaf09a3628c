use bevy::prelude::*;
use safer_el3arbiat::{
    DocumentAttributes,
    Locale,
    LocaleAppExt,
    LocalizationConfig,
    LocalizationPlugin,
    Localizer,
    TextDirection,
};

fn bundled_app(default_locale: Locale) -> App {
    let mut app = App::new();
    app.add_plugins(
        LocalizationPlugin::with_config(LocalizationConfig {
            use_bundled_translations: true,
            default_locale,
            ..Default::default()
        })
    );
    app
}

#[test]
fn plugin_installs_session_and_document() {
    let mut app = bundled_app(Locale::Ar);
    app.update();

    let localizer = app.world().resource::<Localizer>();
    assert_eq!(localizer.resolve("heroTitle"), "سفير العربيات");

    let document = app.world().resource::<DocumentAttributes>();
    assert_eq!(document.dir_attr(), "rtl");
    assert_eq!(document.lang_attr(), "ar");
}

#[test]
fn app_switch_updates_document_before_returning() {
    let mut app = bundled_app(Locale::En);

    app.set_locale(Locale::Ar);

    let document = *app.world().resource::<DocumentAttributes>();
    assert_eq!(document.dir, TextDirection::Rtl);
    assert_eq!(document.lang, Locale::Ar);
    assert_eq!(app.current_locale().map(|info| info.is_right_to_left), Some(true));
    assert_eq!(app.world().resource::<Localizer>().resolve("home"), "الرئيسية");
}

#[test]
fn system_driven_switch_is_mirrored() {
    let mut app = bundled_app(Locale::En);
    app.add_systems(Update, |mut localizer: ResMut<Localizer>| {
        if localizer.locale() == Locale::En {
            localizer.toggle_locale();
        }
    });

    app.update();

    let document = app.world().resource::<DocumentAttributes>();
    assert_eq!(*document, DocumentAttributes::from(Locale::Ar));
}

#[test]
fn missing_messages_folder_degrades_to_keys() {
    let mut app = App::new();
    app.add_plugins(
        LocalizationPlugin::with_config(LocalizationConfig {
            use_bundled_translations: false,
            messages_folder: "no/such/messages".to_string(),
            default_locale: Locale::En,
        })
    );
    app.update();

    let localizer = app.world().resource::<Localizer>();
    assert!(localizer.table().is_empty());
    assert_eq!(localizer.resolve("heroTitle"), "heroTitle");
}

#[test]
fn filesystem_loading_reads_messages_folder() {
    let mut app = App::new();
    app.add_plugins(
        LocalizationPlugin::with_config(LocalizationConfig {
            use_bundled_translations: false,
            messages_folder: concat!(env!("CARGO_MANIFEST_DIR"), "/messages").to_string(),
            default_locale: Locale::En,
        })
    );

    let localizer = app.world().resource::<Localizer>();
    assert_eq!(localizer.resolve("sendInquiry"), "Send Inquiry");
}

#[test]
fn set_locale_without_plugin_is_ignored() {
    let mut app = App::new();
    app.set_locale(Locale::Ar);
    assert_eq!(app.current_locale(), None);
}
