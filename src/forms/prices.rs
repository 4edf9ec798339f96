use std::io::Cursor;
use std::str::FromStr;

use chrono::NaiveDateTime;
use csv::{StringRecord, Trim};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::price::{NewPrice, PriceLookup};

/// Format of the `appTime` query parameter.
pub const APP_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Alternative datetime layouts accepted in uploaded CSV files.
const CSV_DATETIME_FORMATS: [&str; 3] = [
    APP_TIME_FORMAT,
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d-%H.%M.%S",
];

/// ISO 4217 currency codes are three ASCII alphabetic characters.
const CURRENCY_CODE_LEN: usize = 3;

/// Result type returned by the price form helpers.
pub type PriceFormResult<T> = Result<T, PriceFormError>;

/// Errors that can occur while processing price queries and uploads.
#[derive(Debug, Error)]
pub enum PriceFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// A required query parameter was not supplied.
    #[error("missing required parameter `{0}`")]
    MissingParameter(&'static str),
    /// The `appTime` parameter is not a `yyyy-MM-ddTHH:mm:ss` datetime.
    #[error("invalid appTime `{value}`, expected yyyy-MM-ddTHH:mm:ss")]
    InvalidAppTime { value: String },
    /// The uploaded CSV is missing a required column.
    #[error("upload is missing the `{column}` column")]
    MissingRequiredHeader { column: &'static str },
    /// A CSV row left a required column empty.
    #[error("row {row} is missing a value for `{column}`")]
    UploadMissingValue { row: usize, column: &'static str },
    /// A CSV row contained a non-integer identifier or priority.
    #[error("row {row} has invalid `{column}` value `{value}`")]
    UploadInvalidInteger {
        row: usize,
        column: &'static str,
        value: String,
    },
    /// A CSV row contained an unparseable datetime.
    #[error("row {row} has invalid datetime `{value}`")]
    UploadInvalidDateTime { row: usize, value: String },
    /// A CSV row contained an unparseable price.
    #[error("row {row} has invalid price `{value}`")]
    UploadInvalidPrice { row: usize, value: String },
    /// A CSV row contained an invalid currency code.
    #[error("row {row} has invalid currency `{value}`")]
    UploadInvalidCurrency { row: usize, value: String },
    /// A CSV row ends before it starts.
    #[error("row {row} has a start date after its end date")]
    UploadInvertedWindow { row: usize },
    /// The upload did not contain any price rows.
    #[error("upload contains no prices")]
    EmptyUpload,
    /// CSV parsing failures.
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Query parameters accepted by the price lookup endpoint.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PriceQueryForm {
    /// Instant to resolve the price at, formatted as `yyyy-MM-ddTHH:mm:ss`.
    #[validate(required)]
    pub app_time: Option<String>,
    /// Brand the product is sold under.
    #[validate(required, range(min = 1))]
    pub brand_id: Option<i32>,
    /// Identifier of the priced product.
    #[validate(required, range(min = 1))]
    pub product_id: Option<i32>,
}

impl PriceQueryForm {
    /// Validates the parameters and converts them into a domain `PriceLookup`.
    pub fn into_price_lookup(self) -> PriceFormResult<PriceLookup> {
        self.validate()?;

        let app_time = self
            .app_time
            .ok_or(PriceFormError::MissingParameter("appTime"))?;
        let brand_id = self
            .brand_id
            .ok_or(PriceFormError::MissingParameter("brandId"))?;
        let product_id = self
            .product_id
            .ok_or(PriceFormError::MissingParameter("productId"))?;

        let at = NaiveDateTime::parse_from_str(app_time.trim(), APP_TIME_FORMAT)
            .map_err(|_| PriceFormError::InvalidAppTime { value: app_time })?;

        Ok(PriceLookup {
            at,
            brand_id,
            product_id,
        })
    }
}

/// Raw CSV payload with price reference data.
pub struct UploadPricesForm {
    /// Raw CSV bytes.
    pub bytes: Vec<u8>,
}

impl UploadPricesForm {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Parse the CSV and convert it into domain `NewPrice` values.
    ///
    /// Expected columns: `brand_id`, `product_id`, `price_list`, `start_date`,
    /// `end_date`, `priority`, `price` and `curr` (or `currency`).
    pub fn into_new_prices(self) -> PriceFormResult<Vec<NewPrice>> {
        let cursor = Cursor::new(self.bytes);
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(cursor);

        let headers = reader.headers()?.clone();
        let columns = PriceColumns::locate(&headers)?;

        let mut prices = Vec::new();

        for (index, row) in reader.records().enumerate() {
            let row_number = index + 2; // account for header row
            let record = row?;

            if record.iter().all(|value| value.is_empty()) {
                continue;
            }

            prices.push(columns.parse_row(&record, row_number)?);
        }

        if prices.is_empty() {
            return Err(PriceFormError::EmptyUpload);
        }

        Ok(prices)
    }
}

struct PriceColumns {
    brand_id: usize,
    product_id: usize,
    price_list: usize,
    start_date: usize,
    end_date: usize,
    priority: usize,
    price: usize,
    currency: usize,
}

impl PriceColumns {
    fn locate(headers: &StringRecord) -> PriceFormResult<Self> {
        let required = |column: &'static str| {
            locate_header(headers, column)
                .ok_or(PriceFormError::MissingRequiredHeader { column })
        };

        Ok(Self {
            brand_id: required("brand_id")?,
            product_id: required("product_id")?,
            price_list: required("price_list")?,
            start_date: required("start_date")?,
            end_date: required("end_date")?,
            priority: required("priority")?,
            price: required("price")?,
            currency: locate_header(headers, "curr")
                .or_else(|| locate_header(headers, "currency"))
                .ok_or(PriceFormError::MissingRequiredHeader { column: "curr" })?,
        })
    }

    fn parse_row(&self, record: &StringRecord, row: usize) -> PriceFormResult<NewPrice> {
        let value = move |index: usize, column: &'static str| {
            record
                .get(index)
                .filter(|raw| !raw.is_empty())
                .ok_or(PriceFormError::UploadMissingValue { row, column })
        };
        let integer = |index: usize, column: &'static str| -> PriceFormResult<i32> {
            let raw = value(index, column)?;
            raw.parse::<i32>()
                .map_err(|_| PriceFormError::UploadInvalidInteger {
                    row,
                    column,
                    value: raw.to_string(),
                })
        };
        let datetime = |index: usize, column: &'static str| -> PriceFormResult<NaiveDateTime> {
            let raw = value(index, column)?;
            parse_datetime(raw).ok_or_else(|| PriceFormError::UploadInvalidDateTime {
                row,
                value: raw.to_string(),
            })
        };

        let brand_id = integer(self.brand_id, "brand_id")?;
        let product_id = integer(self.product_id, "product_id")?;
        let price_list = integer(self.price_list, "price_list")?;
        let priority = integer(self.priority, "priority")?;
        let start_date = datetime(self.start_date, "start_date")?;
        let end_date = datetime(self.end_date, "end_date")?;

        if start_date > end_date {
            return Err(PriceFormError::UploadInvertedWindow { row });
        }

        let price_raw = value(self.price, "price")?;
        let price_cents =
            parse_price_cents(price_raw).ok_or_else(|| PriceFormError::UploadInvalidPrice {
                row,
                value: price_raw.to_string(),
            })?;

        let currency_raw = value(self.currency, "curr")?;
        let currency =
            sanitize_currency(currency_raw).ok_or_else(|| PriceFormError::UploadInvalidCurrency {
                row,
                value: currency_raw.to_string(),
            })?;

        Ok(NewPrice::new(
            brand_id,
            product_id,
            price_list,
            start_date,
            end_date,
            price_cents,
            currency,
        )
        .with_priority(priority))
    }
}

fn locate_header(headers: &StringRecord, expected: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.eq_ignore_ascii_case(expected))
}

fn parse_datetime(input: &str) -> Option<NaiveDateTime> {
    CSV_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
}

/// Convert a non-negative decimal amount into cents, rejecting sub-cent precision.
fn parse_price_cents(input: &str) -> Option<i64> {
    let amount = Decimal::from_str(input).ok()?.normalize();

    if amount < Decimal::ZERO || amount.scale() > 2 {
        return None;
    }

    (amount * Decimal::ONE_HUNDRED).to_i64()
}

fn sanitize_currency(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.len() != CURRENCY_CODE_LEN || !trimmed.chars().all(|ch| ch.is_ascii_alphabetic()) {
        return None;
    }

    Some(trimmed.to_ascii_uppercase())
}
