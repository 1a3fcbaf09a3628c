//! Client-side state of the sell and purchase-inquiry forms.
//!
//! Validation errors name the field by its translation key, so the view can
//! point at the offending input with its localized label.

use bevy::log::{ info, warn };
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::context::LocaleContext;
use crate::listing::{ Condition, FuelType, NewInquiry, NewListing, Transmission };
use crate::routes::Route;
use crate::store::ListingStore;

// Same shape the browser enforces for `type="email"` inputs.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("required field '{0}' is empty")]
    Missing(&'static str),
    #[error("field '{0}' is not a valid email address")]
    InvalidEmail(&'static str),
}

impl FormError {
    pub fn field_key(&self) -> &'static str {
        match self {
            FormError::Missing(key) | FormError::InvalidEmail(key) => key,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Toast shown after a submission, plus where to navigate next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub redirect: Option<Route>,
}

impl Notice {
    fn success(ctx: &LocaleContext<'_>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: ctx.t("success").to_string(),
            redirect: Some(Route::Cars),
        }
    }

    // A failed submit stays on the page; the user resubmits by hand.
    fn failure(ctx: &LocaleContext<'_>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: ctx.t("error").to_string(),
            redirect: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == NoticeKind::Success
    }
}

fn required(value: &str, key: &'static str) -> Result<String, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FormError::Missing(key));
    }
    Ok(trimmed.to_string())
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn check_email(value: &str, key: &'static str) -> Result<(), FormError> {
    if EMAIL_RE.is_match(value) {
        Ok(())
    } else {
        Err(FormError::InvalidEmail(key))
    }
}

fn button_label<'a>(ctx: &LocaleContext<'a>, busy: bool, idle_key: &'static str) -> &'a str {
    ctx.t(if busy { "loading" } else { idle_key })
}

// ---------- Sell form ----------

/// The "sell my car" form.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingForm {
    pub title: String,
    pub brand: String,
    pub model: String,
    pub year: u32,
    pub price: f64,
    pub mileage: u64,
    pub condition: Condition,
    pub transmission: Transmission,
    pub fuel_type: FuelType,
    pub color: String,
    pub description: String,
    pub image_url: String,
    pub location: String,
    pub phone: String,
    pub email: String,
    pub seller_name: String,
}

impl ListingForm {
    /// Blank form; `current_year` pre-fills the year field.
    pub fn new(current_year: u32) -> Self {
        Self {
            title: String::new(),
            brand: String::new(),
            model: String::new(),
            year: current_year,
            price: 0.0,
            mileage: 0,
            condition: Condition::Used,
            transmission: Transmission::Automatic,
            fuel_type: FuelType::Petrol,
            color: String::new(),
            description: String::new(),
            image_url: String::new(),
            location: String::new(),
            phone: String::new(),
            email: String::new(),
            seller_name: String::new(),
        }
    }

    pub fn validate(&self) -> Result<NewListing, FormError> {
        let title = required(&self.title, "carTitle")?;
        let brand = required(&self.brand, "brand")?;
        let model = required(&self.model, "model")?;
        if self.year == 0 {
            return Err(FormError::Missing("year"));
        }
        if !(self.price.is_finite() && self.price > 0.0) {
            return Err(FormError::Missing("price"));
        }
        let email = optional(&self.email);
        if let Some(email) = &email {
            check_email(email, "email")?;
        }

        Ok(NewListing {
            title,
            brand,
            model,
            year: self.year,
            price: self.price,
            mileage: (self.mileage > 0).then_some(self.mileage),
            condition: self.condition,
            transmission: self.transmission,
            fuel_type: self.fuel_type,
            color: optional(&self.color),
            description: optional(&self.description),
            image_url: optional(&self.image_url),
            location: optional(&self.location),
            phone: optional(&self.phone),
            email,
            seller_name: optional(&self.seller_name),
        })
    }

    /// Validates and inserts once. Validation failures never reach the store.
    pub fn submit(
        &self,
        store: &mut dyn ListingStore,
        ctx: &LocaleContext<'_>
    ) -> Result<Notice, FormError> {
        let listing = self.validate()?;
        match store.insert_listing(listing) {
            Ok(()) => {
                info!("Listing '{}' submitted", self.title.trim());
                Ok(Notice::success(ctx))
            }
            Err(e) => {
                warn!("Listing submission failed: {}", e);
                Ok(Notice::failure(ctx))
            }
        }
    }

    pub fn submit_label<'a>(ctx: &LocaleContext<'a>, busy: bool) -> &'a str {
        button_label(ctx, busy, "submitListing")
    }
}

// ---------- Inquiry form ----------

/// The purchase inquiry form on the buy page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InquiryForm {
    pub buyer_name: String,
    pub buyer_email: String,
    pub buyer_phone: String,
    pub message: String,
}

impl InquiryForm {
    pub fn validate(&self, car_id: &str) -> Result<NewInquiry, FormError> {
        let buyer_name = required(&self.buyer_name, "yourName")?;
        let buyer_email = required(&self.buyer_email, "yourEmail")?;
        check_email(&buyer_email, "yourEmail")?;

        Ok(NewInquiry {
            car_id: car_id.to_string(),
            buyer_name,
            buyer_email,
            buyer_phone: optional(&self.buyer_phone),
            message: optional(&self.message),
        })
    }

    pub fn submit(
        &self,
        car_id: &str,
        store: &mut dyn ListingStore,
        ctx: &LocaleContext<'_>
    ) -> Result<Notice, FormError> {
        let inquiry = self.validate(car_id)?;
        match store.insert_inquiry(inquiry) {
            Ok(()) => {
                info!("Inquiry for '{}' submitted", car_id);
                Ok(Notice::success(ctx))
            }
            Err(e) => {
                warn!("Inquiry for '{}' failed: {}", car_id, e);
                Ok(Notice::failure(ctx))
            }
        }
    }

    pub fn submit_label<'a>(ctx: &LocaleContext<'a>, busy: bool) -> &'a str {
        button_label(ctx, busy, "sendInquiry")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locale;
    use crate::table::TranslationTable;

    fn filled() -> ListingForm {
        ListingForm {
            title: " Kia Sportage ".into(),
            brand: "Kia".into(),
            model: "Sportage".into(),
            price: 900000.0,
            ..ListingForm::new(2024)
        }
    }

    #[test]
    fn new_form_has_marketplace_defaults() {
        let form = ListingForm::new(2025);
        assert_eq!(form.year, 2025);
        assert_eq!(form.condition, Condition::Used);
        assert_eq!(form.transmission, Transmission::Automatic);
        assert_eq!(form.fuel_type, FuelType::Petrol);
    }

    #[test]
    fn validation_trims_and_drops_empty_optionals() {
        let listing = filled().validate().unwrap();
        assert_eq!(listing.title, "Kia Sportage");
        assert_eq!(listing.mileage, None);
        assert_eq!(listing.color, None);
    }

    #[test]
    fn missing_fields_name_their_label_key() {
        let form = ListingForm { brand: "  ".into(), ..filled() };
        assert_eq!(form.validate(), Err(FormError::Missing("brand")));

        let form = ListingForm { price: 0.0, ..filled() };
        assert_eq!(form.validate().unwrap_err().field_key(), "price");

        let form = ListingForm { email: "not-an-email".into(), ..filled() };
        assert_eq!(form.validate(), Err(FormError::InvalidEmail("email")));
    }

    #[test]
    fn inquiry_requires_name_and_valid_email() {
        let form = InquiryForm { buyer_name: "Omar".into(), ..Default::default() };
        assert_eq!(form.validate("car-1"), Err(FormError::Missing("yourEmail")));

        let form = InquiryForm { buyer_email: "omar@example.com".into(), ..form };
        let inquiry = form.validate("car-1").unwrap();
        assert_eq!(inquiry.car_id, "car-1");
        assert_eq!(inquiry.buyer_phone, None);
    }

    #[test]
    fn button_label_switches_while_busy() {
        let table = TranslationTable::new()
            .with("loading", "Loading...", "جاري التحميل...")
            .with("sendInquiry", "Send Inquiry", "إرسال الاستفسار");
        let ctx = LocaleContext::new(&table, Locale::En);

        assert_eq!(InquiryForm::submit_label(&ctx, false), "Send Inquiry");
        assert_eq!(InquiryForm::submit_label(&ctx, true), "Loading...");
        assert_eq!(ListingForm::submit_label(&ctx, false), "submitListing");
    }
}
