use mockall::mock;

use super::{PriceReader, PriceWriter};
use crate::domain::price::{NewPrice, Price, PriceListQuery};
use pushkind_common::repository::errors::RepositoryResult;

mock! {
    pub PriceReader {}

    impl PriceReader for PriceReader {
        fn list_prices(&self, query: PriceListQuery) -> RepositoryResult<Vec<Price>>;
    }
}

mock! {
    pub PriceWriter {}

    impl PriceWriter for PriceWriter {
        fn create_prices(&self, new_prices: &[NewPrice]) -> RepositoryResult<usize>;
    }
}
