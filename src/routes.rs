//! URL paths of the marketplace pages.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Cars,
    Sell,
    CarDetails { id: String },
    Buy { id: String },
    NotFound,
}

/// Navbar entries as `(route, translation key)`.
pub const NAV_LINKS: [(Route, &str); 3] = [
    (Route::Home, "home"),
    (Route::Cars, "cars"),
    (Route::Sell, "sell"),
];

impl Route {
    /// Maps a path to its page, extracting the listing id where there is one.
    pub fn parse(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["cars"] => Route::Cars,
            ["sell"] => Route::Sell,
            ["car", id] => Route::CarDetails { id: (*id).to_string() },
            ["buy", id] => Route::Buy { id: (*id).to_string() },
            _ => Route::NotFound,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Cars => "/cars".to_string(),
            Route::Sell => "/sell".to_string(),
            Route::CarDetails { id } => format!("/car/{}", id),
            Route::Buy { id } => format!("/buy/{}", id),
            Route::NotFound => "/404".to_string(),
        }
    }

    /// The listing id carried by the path, if any.
    pub fn listing_id(&self) -> Option<&str> {
        match self {
            Route::CarDetails { id } | Route::Buy { id } => Some(id.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
