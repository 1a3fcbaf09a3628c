use std::fmt;
use std::str::FromStr;

use serde::{ Deserialize, Serialize };

use crate::error::LocalizationError;

/// The two languages the marketplace is published in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ar,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Ar];

    /// Language tag mirrored into the host's `lang` attribute.
    pub fn tag(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ar => "ar",
        }
    }

    /// Regional locale whose numbering conventions drive number formatting.
    pub fn numbering_locale(self) -> &'static str {
        match self {
            Locale::En => "en-EG",
            Locale::Ar => "ar-EG",
        }
    }

    pub fn direction(self) -> TextDirection {
        match self {
            Locale::En => TextDirection::Ltr,
            Locale::Ar => TextDirection::Rtl,
        }
    }

    pub fn is_right_to_left(self) -> bool {
        self.direction() == TextDirection::Rtl
    }

    /// The other locale; backs the navbar language switch.
    pub fn toggled(self) -> Locale {
        match self {
            Locale::En => Locale::Ar,
            Locale::Ar => Locale::En,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = LocalizationError;

    /// Accepts bare tags and region-qualified ones (`ar-EG`, `en_US`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let language = s.trim().split(['-', '_']).next().unwrap_or_default();
        match language.to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "ar" => Ok(Locale::Ar),
            _ => Err(LocalizationError::UnknownLocale(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

impl TextDirection {
    /// Value for the host's `dir` attribute.
    pub fn attr(self) -> &'static str {
        match self {
            TextDirection::Ltr => "ltr",
            TextDirection::Rtl => "rtl",
        }
    }
}

/// Snapshot returned by `Localizer::current_locale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleInfo {
    pub locale: Locale,
    pub is_right_to_left: bool,
}

impl From<Locale> for LocaleInfo {
    fn from(locale: Locale) -> Self {
        Self {
            locale,
            is_right_to_left: locale.is_right_to_left(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_and_regional_tags() {
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!("AR".parse::<Locale>().unwrap(), Locale::Ar);
        assert_eq!("ar-EG".parse::<Locale>().unwrap(), Locale::Ar);
        assert_eq!("en_US".parse::<Locale>().unwrap(), Locale::En);
    }

    #[test]
    fn rejects_other_languages() {
        let err = "fr".parse::<Locale>().unwrap_err();
        assert!(matches!(err, LocalizationError::UnknownLocale(tag) if tag == "fr"));
        assert!("".parse::<Locale>().is_err());
    }

    #[test]
    fn direction_follows_locale() {
        assert_eq!(Locale::Ar.direction().attr(), "rtl");
        assert_eq!(Locale::En.direction().attr(), "ltr");
        assert!(LocaleInfo::from(Locale::Ar).is_right_to_left);
        assert!(!LocaleInfo::from(Locale::En).is_right_to_left);
    }

    #[test]
    fn toggling_swaps_locales() {
        assert_eq!(Locale::En.toggled(), Locale::Ar);
        assert_eq!(Locale::Ar.toggled().toggled(), Locale::Ar);
    }

    #[test]
    fn serializes_as_lowercase_tag() {
        assert_eq!(serde_json::to_string(&Locale::Ar).unwrap(), "\"ar\"");
        let locale: Locale = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(locale, Locale::En);
    }
}
