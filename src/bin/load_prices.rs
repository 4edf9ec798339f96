//! Loads price reference data from a CSV file into the prices database.
//!
//! Usage: `load-prices <file.csv>`; the target database is taken from
//! `DATABASE_URL` (default `app.db`).

use std::env;

use dotenvy::dotenv;
use pushkind_common::db::establish_connection_pool;

use pushkind_prices::forms::prices::UploadPricesForm;
use pushkind_prices::repository::DieselRepository;
use pushkind_prices::services::prices::import_prices;

fn main() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok();

    let Some(csv_path) = env::args().nth(1) else {
        log::error!("Usage: load-prices <file.csv>");
        std::process::exit(2);
    };

    let database_url = env::var("DATABASE_URL").unwrap_or("app.db".to_string());

    let bytes = match std::fs::read(&csv_path) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::error!("Failed to read {csv_path}: {e}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    match import_prices(&repo, UploadPricesForm::new(bytes)) {
        Ok(count) => log::info!("Loaded {count} prices from {csv_path} into {database_url}"),
        Err(err) => {
            log::error!("Failed to load prices from {csv_path}: {err}");
            std::process::exit(1);
        }
    }
}
