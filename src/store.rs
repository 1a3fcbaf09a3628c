//! Interface to the hosted table store that persists listings and inquiries.
//!
//! Every call is a single request/response: no retries, caching or paging.

use thiserror::Error;

use crate::listing::{ CarListing, NewInquiry, NewListing };

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("store rejected the request: {0}")]
    Rejected(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

/// Filter, order and limit for listing queries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListingQuery {
    pub include_sold: bool,
    pub order: SortOrder,
    pub limit: Option<usize>,
}

impl ListingQuery {
    /// Unsold listings, newest first: the all-cars page.
    pub fn available() -> Self {
        Self::default()
    }

    /// The home page strip: the six newest unsold listings.
    pub fn featured() -> Self {
        Self::available().with_limit(6)
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    pub fn matches(&self, listing: &CarListing) -> bool {
        self.include_sold || !listing.is_sold
    }
}

/// The `cars` and `inquiries` collections of the hosted store.
pub trait ListingStore {
    /// Lists listings matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the request fails.
    fn list_listings(&self, query: &ListingQuery) -> Result<Vec<CarListing>, StoreError>;

    /// Fetches one listing; `Ok(None)` when no row has that id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the request fails.
    fn listing_by_id(&self, id: &str) -> Result<Option<CarListing>, StoreError>;

    /// Inserts a listing submitted through the sell form.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the insert is rejected or fails.
    fn insert_listing(&mut self, listing: NewListing) -> Result<(), StoreError>;

    /// Inserts a purchase inquiry.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the insert is rejected or fails.
    fn insert_inquiry(&mut self, inquiry: NewInquiry) -> Result<(), StoreError>;
}

/// Process-local store used by tests and demos.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    // (insertion sequence, row)
    listings: Vec<(u64, CarListing)>,
    inquiries: Vec<NewInquiry>,
    next_seq: u64,
    offline: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a complete row, keeping its id. Later seeds count as newer.
    pub fn seed(&mut self, listing: CarListing) {
        let seq = self.bump();
        self.listings.push((seq, listing));
    }

    /// While offline every call fails with [`StoreError::Unavailable`].
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    pub fn inquiries(&self) -> &[NewInquiry] {
        &self.inquiries
    }

    pub fn listing_count(&self) -> usize {
        self.listings.len()
    }

    fn bump(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline {
            return Err(StoreError::Unavailable("in-memory store is offline".to_string()));
        }
        Ok(())
    }
}

impl ListingStore for InMemoryStore {
    fn list_listings(&self, query: &ListingQuery) -> Result<Vec<CarListing>, StoreError> {
        self.check_online()?;

        let mut rows: Vec<&(u64, CarListing)> = self.listings
            .iter()
            .filter(|(_, listing)| query.matches(listing))
            .collect();
        match query.order {
            SortOrder::NewestFirst => rows.sort_by(|a, b| b.0.cmp(&a.0)),
            SortOrder::OldestFirst => rows.sort_by(|a, b| a.0.cmp(&b.0)),
        }

        let limit = query.limit.unwrap_or(usize::MAX);
        Ok(rows.into_iter().take(limit).map(|(_, listing)| listing.clone()).collect())
    }

    fn listing_by_id(&self, id: &str) -> Result<Option<CarListing>, StoreError> {
        self.check_online()?;
        Ok(self.listings.iter().find(|(_, listing)| listing.id == id).map(|(_, l)| l.clone()))
    }

    fn insert_listing(&mut self, listing: NewListing) -> Result<(), StoreError> {
        self.check_online()?;
        if listing.title.trim().is_empty() {
            return Err(StoreError::Rejected("title is required".to_string()));
        }

        let seq = self.bump();
        let row = CarListing {
            id: format!("car-{}", seq),
            title: listing.title,
            brand: listing.brand,
            model: listing.model,
            year: listing.year,
            price: listing.price,
            mileage: listing.mileage,
            condition: listing.condition,
            transmission: listing.transmission,
            fuel_type: listing.fuel_type,
            color: listing.color,
            description: listing.description,
            image_url: listing.image_url,
            location: listing.location,
            phone: listing.phone,
            email: listing.email,
            seller_name: listing.seller_name,
            ..Default::default()
        };
        self.listings.push((seq, row));
        Ok(())
    }

    fn insert_inquiry(&mut self, inquiry: NewInquiry) -> Result<(), StoreError> {
        self.check_online()?;
        if !self.listings.iter().any(|(_, listing)| listing.id == inquiry.car_id) {
            return Err(StoreError::Rejected(format!("unknown car '{}'", inquiry.car_id)));
        }
        self.inquiries.push(inquiry);
        Ok(())
    }
}
