use std::cmp::Ordering;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Domain representation of a single price-list entry for a brand's product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Price {
    /// Unique identifier of the price record.
    pub id: i32,
    /// Brand the product is sold under.
    pub brand_id: i32,
    /// Identifier of the priced product.
    pub product_id: i32,
    /// Tariff (price list) this entry belongs to.
    pub price_list: i32,
    /// First instant the price applies (inclusive).
    pub start_date: NaiveDateTime,
    /// Last instant the price applies (inclusive).
    pub end_date: NaiveDateTime,
    /// Higher values win when several entries apply at the same instant.
    pub priority: i32,
    /// Price represented in the smallest currency unit (for example cents).
    pub price_cents: i64,
    /// ISO 4217 currency code associated with the price.
    pub currency: String,
}

impl Price {
    /// Whether `at` falls inside the closed `[start_date, end_date]` window.
    pub fn is_active_at(&self, at: NaiveDateTime) -> bool {
        self.start_date <= at && at <= self.end_date
    }

    /// Whether the record belongs to the given brand and product.
    pub fn matches(&self, brand_id: i32, product_id: i32) -> bool {
        self.brand_id == brand_id && self.product_id == product_id
    }

    /// Precedence between two entries that apply at the same instant.
    ///
    /// Priority decides first. Equal priorities fall back to the most recently
    /// started entry, then to the highest price list and finally to the
    /// highest id so that the outcome never depends on input order.
    pub fn precedence(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| self.start_date.cmp(&other.start_date))
            .then_with(|| self.price_list.cmp(&other.price_list))
            .then_with(|| self.id.cmp(&other.id))
    }
}

/// Select the price that applies to `brand_id`/`product_id` at `at`.
///
/// Candidates for other brands or products are ignored, so callers may pass
/// either a pre-narrowed or a wider set. Returns `None` when no candidate's
/// window contains `at`.
pub fn resolve(
    at: NaiveDateTime,
    brand_id: i32,
    product_id: i32,
    candidates: &[Price],
) -> Option<&Price> {
    candidates
        .iter()
        .filter(|price| price.matches(brand_id, product_id))
        .filter(|price| price.is_active_at(at))
        .max_by(|a, b| a.precedence(b))
}

/// A validated request for the price of a brand's product at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceLookup {
    pub at: NaiveDateTime,
    pub brand_id: i32,
    pub product_id: i32,
}

impl PriceLookup {
    /// Storage query narrowed to the entries that can apply to this lookup.
    pub fn to_list_query(&self) -> PriceListQuery {
        PriceListQuery::new(self.brand_id, self.product_id).active_at(self.at)
    }

    /// Run [`resolve`] for this lookup over `candidates`.
    pub fn resolve<'a>(&self, candidates: &'a [Price]) -> Option<&'a Price> {
        resolve(self.at, self.brand_id, self.product_id, candidates)
    }
}

/// Payload required to insert a new price record.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPrice {
    pub brand_id: i32,
    pub product_id: i32,
    pub price_list: i32,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub priority: i32,
    pub price_cents: i64,
    pub currency: String,
}

impl NewPrice {
    /// Build a new price payload with default priority `0`.
    pub fn new(
        brand_id: i32,
        product_id: i32,
        price_list: i32,
        start_date: NaiveDateTime,
        end_date: NaiveDateTime,
        price_cents: i64,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            brand_id,
            product_id,
            price_list,
            start_date,
            end_date,
            priority: 0,
            price_cents,
            currency: currency.into(),
        }
    }

    /// Set the priority used when the entry overlaps another one.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

/// Query definition used to fetch candidate prices from storage.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceListQuery {
    /// Brand the product is sold under.
    pub brand_id: i32,
    /// Identifier of the priced product.
    pub product_id: i32,
    /// Optional instant the returned entries must be valid at.
    pub active_at: Option<NaiveDateTime>,
}

impl PriceListQuery {
    /// Construct a query that targets every entry of a brand's product.
    pub fn new(brand_id: i32, product_id: i32) -> Self {
        Self {
            brand_id,
            product_id,
            active_at: None,
        }
    }

    /// Only return entries whose window contains `at`.
    pub fn active_at(mut self, at: NaiveDateTime) -> Self {
        self.active_at = Some(at);
        self
    }
}
