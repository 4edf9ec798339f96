use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::price::{NewPrice as DomainNewPrice, Price as DomainPrice, PriceListQuery},
    models::price::{NewPrice as DbNewPrice, Price as DbPrice},
    repository::{DieselRepository, PriceReader, PriceWriter},
};

impl PriceReader for DieselRepository {
    fn list_prices(&self, query: PriceListQuery) -> RepositoryResult<Vec<DomainPrice>> {
        use crate::schema::prices;

        let mut conn = self.conn()?;

        let mut items = prices::table
            .filter(prices::brand_id.eq(query.brand_id))
            .filter(prices::product_id.eq(query.product_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(at) = query.active_at {
            items = items
                .filter(prices::start_date.le(at))
                .filter(prices::end_date.ge(at));
        }

        let db_prices = items.load::<DbPrice>(&mut conn)?;

        Ok(db_prices.into_iter().map(Into::into).collect())
    }
}

impl PriceWriter for DieselRepository {
    fn create_prices(&self, new_prices: &[DomainNewPrice]) -> RepositoryResult<usize> {
        use crate::schema::prices;

        let mut conn = self.conn()?;

        conn.transaction::<usize, RepositoryError, _>(|conn| {
            let mut count_inserted: usize = 0;

            for new in new_prices {
                let db_new: DbNewPrice = new.into();

                diesel::insert_into(prices::table)
                    .values(&db_new)
                    .execute(conn)?;
                count_inserted += 1;
            }

            Ok(count_inserted)
        })
    }
}
