use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::price::{Price, PriceLookup};
use crate::forms::prices::{PriceQueryForm, UploadPricesForm};
use crate::repository::{PriceReader, PriceWriter};
use crate::services::{ServiceError, ServiceResult};

/// JSON body returned for a resolved price.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceView {
    pub brand_id: i32,
    pub product_id: i32,
    pub price_list: i32,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    /// Decimal amount, written as a JSON number such as `35.5`.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub currency: String,
}

impl From<Price> for PriceView {
    fn from(price: Price) -> Self {
        Self {
            brand_id: price.brand_id,
            product_id: price.product_id,
            price_list: price.price_list,
            start_date: price.start_date,
            end_date: price.end_date,
            price: Decimal::new(price.price_cents, 2),
            currency: price.currency,
        }
    }
}

/// Outcome of a price lookup together with the validated request.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceResolution {
    pub lookup: PriceLookup,
    /// `None` when no price list covers the instant.
    pub price: Option<Price>,
}

/// Resolves the price applicable to the queried brand, product and instant.
pub fn find_applicable_price<R>(repo: &R, query: PriceQueryForm) -> ServiceResult<PriceResolution>
where
    R: PriceReader + ?Sized,
{
    let lookup = query
        .into_price_lookup()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let candidates = repo
        .list_prices(lookup.to_list_query())
        .map_err(ServiceError::from)?;

    let price = lookup.resolve(&candidates).cloned();

    match &price {
        Some(price) => log::debug!(
            "Resolved price list {} for brand {} product {} at {}",
            price.price_list,
            lookup.brand_id,
            lookup.product_id,
            lookup.at
        ),
        None => log::debug!(
            "No price for brand {} product {} at {} among {} candidates",
            lookup.brand_id,
            lookup.product_id,
            lookup.at,
            candidates.len()
        ),
    }

    Ok(PriceResolution { lookup, price })
}

/// Imports price reference data from a CSV payload.
pub fn import_prices<R>(repo: &R, form: UploadPricesForm) -> ServiceResult<usize>
where
    R: PriceWriter + ?Sized,
{
    let prices = form
        .into_new_prices()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_prices(&prices).map_err(ServiceError::from)
}
