use crate::format::{ self, Number };
use crate::locale::{ Locale, LocaleInfo, TextDirection };
use crate::table::TranslationTable;

/// Borrowed view of the active locale, threaded through rendering code.
///
/// Every consumer handed the same context sees the same locale; a new
/// context must be taken from the [`Localizer`](crate::Localizer) after a
/// locale switch.
#[derive(Debug, Clone, Copy)]
pub struct LocaleContext<'a> {
    table: &'a TranslationTable,
    locale: Locale,
}

impl<'a> LocaleContext<'a> {
    pub fn new(table: &'a TranslationTable, locale: Locale) -> Self {
        Self { table, locale }
    }

    /// Resolves `key` for the context's locale, falling back to the key itself.
    pub fn t<'k>(&self, key: &'k str) -> &'k str where 'a: 'k {
        self.table.lookup(key, self.locale).unwrap_or(key)
    }

    pub fn format_number(&self, value: impl Into<Number>) -> String {
        format::format_number(value, self.locale)
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn direction(&self) -> TextDirection {
        self.locale.direction()
    }

    pub fn is_right_to_left(&self) -> bool {
        self.locale.is_right_to_left()
    }

    pub fn info(&self) -> LocaleInfo {
        self.locale.into()
    }
}

/// Host-side reaction to a locale switch, such as syncing the document's
/// `dir` and `lang` attributes.
pub trait LocaleHook: Send + Sync {
    fn locale_changed(&mut self, info: LocaleInfo);
}

impl<F> LocaleHook for F where F: FnMut(LocaleInfo) + Send + Sync {
    fn locale_changed(&mut self, info: LocaleInfo) {
        (*self)(info)
    }
}
