//! Marketplace records and their localized presentation.

use serde::{ Deserialize, Serialize };

use crate::context::LocaleContext;
use crate::locale::Locale;

/// Shown when a listing has no image.
pub const PLACEHOLDER_IMAGE: &str =
    "https://images.unsplash.com/photo-1544636331-e26879cd4d9b?auto=format&fit=crop&w=800&q=80";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    New,
    #[default]
    Used,
    Certified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transmission {
    #[default]
    Automatic,
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
    #[default]
    Petrol,
    Diesel,
    Electric,
    Hybrid,
}

// Stored values double as translation keys.
impl Condition {
    pub const ALL: [Condition; 3] = [Condition::New, Condition::Used, Condition::Certified];

    pub fn translation_key(self) -> &'static str {
        match self {
            Condition::New => "new",
            Condition::Used => "used",
            Condition::Certified => "certified",
        }
    }
}

impl Transmission {
    pub const ALL: [Transmission; 2] = [Transmission::Automatic, Transmission::Manual];

    pub fn translation_key(self) -> &'static str {
        match self {
            Transmission::Automatic => "automatic",
            Transmission::Manual => "manual",
        }
    }
}

impl FuelType {
    pub const ALL: [FuelType; 4] = [
        FuelType::Petrol,
        FuelType::Diesel,
        FuelType::Electric,
        FuelType::Hybrid,
    ];

    pub fn translation_key(self) -> &'static str {
        match self {
            FuelType::Petrol => "petrol",
            FuelType::Diesel => "diesel",
            FuelType::Electric => "electric",
            FuelType::Hybrid => "hybrid",
        }
    }
}

/// A row of the `cars` collection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CarListing {
    pub id: String,
    pub title: String,
    pub title_ar: Option<String>,
    pub brand: String,
    pub model: String,
    pub year: u32,
    pub price: f64,
    pub mileage: Option<u64>,
    pub condition: Condition,
    pub transmission: Transmission,
    pub fuel_type: FuelType,
    pub color: Option<String>,
    pub color_ar: Option<String>,
    pub description: Option<String>,
    pub description_ar: Option<String>,
    pub image_url: Option<String>,
    pub location: Option<String>,
    pub location_ar: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub seller_name: Option<String>,
    pub is_featured: bool,
    pub is_sold: bool,
    pub created_at: Option<String>,
}

/// Fields submitted by the sell form; the store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewListing {
    pub title: String,
    pub brand: String,
    pub model: String,
    pub year: u32,
    pub price: f64,
    pub mileage: Option<u64>,
    pub condition: Condition,
    pub transmission: Transmission,
    pub fuel_type: FuelType,
    pub color: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub seller_name: Option<String>,
}

/// A row of the `inquiries` collection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewInquiry {
    pub car_id: String,
    pub buyer_name: String,
    pub buyer_email: String,
    pub buyer_phone: Option<String>,
    pub message: Option<String>,
}

/// Arabic text when the locale is Arabic and a non-empty variant exists.
fn localized<'a>(locale: Locale, base: &'a str, arabic: Option<&'a str>) -> &'a str {
    match (locale, arabic) {
        (Locale::Ar, Some(text)) if !text.is_empty() => text,
        _ => base,
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl CarListing {
    pub fn display_title(&self, ctx: &LocaleContext<'_>) -> &str {
        localized(ctx.locale(), &self.title, self.title_ar.as_deref())
    }

    pub fn display_location(&self, ctx: &LocaleContext<'_>) -> Option<&str> {
        let base = non_empty(&self.location)?;
        Some(localized(ctx.locale(), base, self.location_ar.as_deref()))
    }

    pub fn display_description(&self, ctx: &LocaleContext<'_>) -> Option<&str> {
        let base = non_empty(&self.description)?;
        Some(localized(ctx.locale(), base, self.description_ar.as_deref()))
    }

    pub fn display_color(&self, ctx: &LocaleContext<'_>) -> Option<&str> {
        let base = non_empty(&self.color)?;
        Some(localized(ctx.locale(), base, self.color_ar.as_deref()))
    }

    /// e.g. `"12,000 EGP"`.
    pub fn price_label(&self, ctx: &LocaleContext<'_>) -> String {
        format!("{} {}", ctx.format_number(self.price), ctx.t("currency"))
    }

    /// e.g. `"85,000 km"`; absent or zero mileage is not shown.
    pub fn mileage_label(&self, ctx: &LocaleContext<'_>) -> Option<String> {
        let mileage = self.mileage.filter(|m| *m > 0)?;
        Some(format!("{} {}", ctx.format_number(mileage), ctx.t("km")))
    }

    pub fn condition_label<'a>(&self, ctx: &LocaleContext<'a>) -> &'a str {
        ctx.t(self.condition.translation_key())
    }

    pub fn transmission_label<'a>(&self, ctx: &LocaleContext<'a>) -> &'a str {
        ctx.t(self.transmission.translation_key())
    }

    pub fn fuel_type_label<'a>(&self, ctx: &LocaleContext<'a>) -> &'a str {
        ctx.t(self.fuel_type.translation_key())
    }

    pub fn featured_badge<'a>(&self, ctx: &LocaleContext<'a>) -> Option<&'a str> {
        self.is_featured.then(|| ctx.t("featured"))
    }

    /// `"<brand> <model> - <year>"`, as on the purchase summary.
    pub fn summary(&self) -> String {
        format!("{} {} - {}", self.brand, self.model, self.year)
    }

    pub fn image_src(&self) -> &str {
        non_empty(&self.image_url).unwrap_or(PLACEHOLDER_IMAGE)
    }

    /// Whether the contact-seller block has anything to show.
    pub fn has_contact(&self) -> bool {
        [&self.seller_name, &self.phone, &self.email]
            .into_iter()
            .any(|field| non_empty(field).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{ TranslationTable, bundled_table };

    fn listing() -> CarListing {
        CarListing {
            id: "car-1".into(),
            title: "Toyota Corolla 2020".into(),
            title_ar: Some("تويوتا كورولا 2020".into()),
            brand: "Toyota".into(),
            model: "Corolla".into(),
            year: 2020,
            price: 450000.0,
            mileage: Some(85000),
            location: Some("Cairo".into()),
            location_ar: Some(String::new()),
            ..Default::default()
        }
    }

    #[test]
    fn titles_follow_locale() {
        let table = TranslationTable::new();
        let car = listing();

        assert_eq!(car.display_title(&LocaleContext::new(&table, Locale::En)), "Toyota Corolla 2020");
        assert_eq!(car.display_title(&LocaleContext::new(&table, Locale::Ar)), "تويوتا كورولا 2020");
    }

    #[test]
    fn empty_arabic_variant_falls_back_to_base() {
        let table = TranslationTable::new();
        let car = listing();
        let ar = LocaleContext::new(&table, Locale::Ar);

        assert_eq!(car.display_location(&ar), Some("Cairo"));
        assert_eq!(car.display_description(&ar), None);
    }

    #[test]
    fn labels_use_table_and_number_format() {
        let table = bundled_table();
        let en = LocaleContext::new(&table, Locale::En);
        let car = listing();

        assert_eq!(car.price_label(&en), "450,000 EGP");
        assert_eq!(car.mileage_label(&en).as_deref(), Some("85,000 km"));
        assert_eq!(car.condition_label(&en), "Used");
        assert_eq!(car.fuel_type_label(&en), "Petrol");
        assert_eq!(car.featured_badge(&en), None);

        let ar = LocaleContext::new(&table, Locale::Ar);
        assert!(car.price_label(&ar).ends_with("ج.م"));
        assert_eq!(car.transmission_label(&ar), "أوتوماتيك");
    }

    #[test]
    fn image_and_contact_helpers() {
        let mut car = listing();
        assert_eq!(car.image_src(), PLACEHOLDER_IMAGE);
        assert!(!car.has_contact());

        car.image_url = Some("https://example.com/car.jpg".into());
        car.phone = Some("+20 100 000 0000".into());
        assert_eq!(car.image_src(), "https://example.com/car.jpg");
        assert!(car.has_contact());
        assert_eq!(car.summary(), "Toyota Corolla - 2020");
    }

    #[test]
    fn deserializes_store_rows() {
        let row = r#"{
            "id": "abc", "title": "Golf", "brand": "VW", "model": "Golf",
            "year": 2018, "price": 300000, "condition": "certified",
            "transmission": "manual", "fuel_type": "diesel", "is_featured": true,
            "mileage": null
        }"#;
        let car: CarListing = serde_json::from_str(row).unwrap();

        assert_eq!(car.condition, Condition::Certified);
        assert_eq!(car.transmission, Transmission::Manual);
        assert_eq!(car.fuel_type, FuelType::Diesel);
        assert!(car.is_featured && !car.is_sold);
        assert_eq!(car.mileage, None);
    }
}
