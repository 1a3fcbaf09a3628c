use std::sync::{ Arc, Mutex };

use safer_el3arbiat::forms::{ InquiryForm, ListingForm, NoticeKind };
use safer_el3arbiat::listing::{ CarListing, Condition };
use safer_el3arbiat::routes::{ NAV_LINKS, Route };
use safer_el3arbiat::store::{ InMemoryStore, ListingQuery, ListingStore };
use safer_el3arbiat::{ Locale, LocaleInfo, Localizer };

fn sell_form() -> ListingForm {
    ListingForm {
        title: "Hyundai Elantra".into(),
        brand: "Hyundai".into(),
        model: "Elantra".into(),
        price: 650000.0,
        mileage: 42000,
        condition: Condition::Certified,
        ..ListingForm::new(2024)
    }
}

#[test]
fn submitted_listing_shows_on_all_cars_page() {
    let localizer = Localizer::bundled(Locale::En);
    let ctx = localizer.context();
    let mut store = InMemoryStore::new();

    let notice = sell_form().submit(&mut store, &ctx).unwrap();
    assert_eq!(notice.kind, NoticeKind::Success);
    assert_eq!(notice.message, "Success!");
    assert_eq!(notice.redirect, Some(Route::Cars));

    let cars = store.list_listings(&ListingQuery::available()).unwrap();
    assert_eq!(cars.len(), 1);
    assert_eq!(cars[0].price_label(&ctx), "650,000 EGP");
    assert_eq!(cars[0].condition_label(&ctx), "Certified");
}

#[test]
fn store_failure_yields_localized_error_without_redirect() {
    let localizer = Localizer::bundled(Locale::Ar);
    let ctx = localizer.context();
    let mut store = InMemoryStore::new();
    store.set_offline(true);

    let notice = sell_form().submit(&mut store, &ctx).unwrap();
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.message, "حدث خطأ");
    assert_eq!(notice.redirect, None);

    // no automatic retry: coming back online does not replay the submission
    store.set_offline(false);
    assert_eq!(store.listing_count(), 0);
}

#[test]
fn invalid_form_never_reaches_store() {
    let localizer = Localizer::bundled(Locale::En);
    let mut store = InMemoryStore::new();
    let form = ListingForm { model: String::new(), ..sell_form() };

    let err = form.submit(&mut store, &localizer.context()).unwrap_err();
    assert_eq!(err.field_key(), "model");
    assert_eq!(localizer.resolve(err.field_key()), "Model");
    assert_eq!(store.listing_count(), 0);
}

#[test]
fn inquiry_for_listed_car() {
    let localizer = Localizer::bundled(Locale::En);
    let ctx = localizer.context();
    let mut store = InMemoryStore::new();
    store.seed(CarListing {
        id: "car-77".into(),
        title: "BMW 320i".into(),
        ..Default::default()
    });

    let route = Route::parse("/buy/car-77");
    let car_id = route.listing_id().unwrap();
    let form = InquiryForm {
        buyer_name: "Sara".into(),
        buyer_email: "sara@example.com".into(),
        message: "Is the price negotiable?".into(),
        ..Default::default()
    };

    let notice = form.submit(car_id, &mut store, &ctx).unwrap();
    assert!(notice.is_success());
    assert_eq!(store.inquiries()[0].car_id, "car-77");

    let unknown = form.submit("car-404", &mut store, &ctx).unwrap();
    assert_eq!(unknown.kind, NoticeKind::Error);
    assert_eq!(store.inquiries().len(), 1);
}

#[test]
fn navbar_toggle_relabels_links_and_syncs_document() {
    let document = Arc::new(Mutex::new(Vec::new()));
    let mut localizer = Localizer::bundled(Locale::En);

    let sink = Arc::clone(&document);
    localizer.add_hook(move |info: LocaleInfo| {
        let dir = if info.is_right_to_left { "rtl" } else { "ltr" };
        sink.lock().unwrap().push((dir, info.locale.tag()));
    });

    let labels = |localizer: &Localizer| -> Vec<String> {
        NAV_LINKS.iter().map(|(_, key)| localizer.resolve(key).to_string()).collect()
    };
    assert_eq!(labels(&localizer), ["Home", "All Cars", "Sell Car"]);

    localizer.toggle_locale();
    assert_eq!(labels(&localizer), ["الرئيسية", "جميع السيارات", "بيع سيارة"]);
    assert_eq!(*document.lock().unwrap(), vec![("ltr", "en"), ("rtl", "ar")]);
}
