use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::price::{NewPrice as DomainNewPrice, Price as DomainPrice};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::prices)]
pub struct Price {
    pub id: i32,
    pub brand_id: i32,
    pub product_id: i32,
    pub price_list: i32,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub priority: i32,
    pub price_cents: i64,
    pub currency: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::prices)]
pub struct NewPrice<'a> {
    pub brand_id: i32,
    pub product_id: i32,
    pub price_list: i32,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub priority: i32,
    pub price_cents: i64,
    pub currency: &'a str,
}

impl From<Price> for DomainPrice {
    fn from(value: Price) -> Self {
        Self {
            id: value.id,
            brand_id: value.brand_id,
            product_id: value.product_id,
            price_list: value.price_list,
            start_date: value.start_date,
            end_date: value.end_date,
            priority: value.priority,
            price_cents: value.price_cents,
            currency: value.currency,
        }
    }
}

impl<'a> From<&'a DomainNewPrice> for NewPrice<'a> {
    fn from(value: &'a DomainNewPrice) -> Self {
        Self {
            brand_id: value.brand_id,
            product_id: value.product_id,
            price_list: value.price_list,
            start_date: value.start_date,
            end_date: value.end_date,
            priority: value.priority,
            price_cents: value.price_cents,
            currency: value.currency.as_str(),
        }
    }
}
