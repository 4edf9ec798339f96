use pushkind_common::db::{DbConnection, DbPool};
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::price::{NewPrice, Price, PriceListQuery};

pub mod price;

#[cfg(test)]
pub mod mock;

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over price records.
pub trait PriceReader {
    /// Return every price of the queried brand and product, in no particular order.
    fn list_prices(&self, query: PriceListQuery) -> RepositoryResult<Vec<Price>>;
}

/// Write operations used to load price reference data.
pub trait PriceWriter {
    fn create_prices(&self, new_prices: &[NewPrice]) -> RepositoryResult<usize>;
}
