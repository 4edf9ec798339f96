//! Helpers for integration tests.

use std::path::{Path, PathBuf};

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tempfile::TempDir;

use pushkind_common::db::{DbPool, establish_connection_pool};
use pushkind_prices::forms::prices::UploadPricesForm;
use pushkind_prices::repository::{DieselRepository, PriceWriter};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Price list shipped in `data/prices.csv` (brand 1, product 35455).
#[allow(dead_code)]
pub const SAMPLE_PRICES_CSV: &str = include_str!("../../data/prices.csv");

/// Migrated SQLite database living in its own temporary directory.
pub struct TestDb {
    path: PathBuf,
    pool: DbPool,
    _dir: TempDir,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temporary directory.");
        let path = dir.path().join(filename);
        let url = path.to_str().expect("Temporary path is not UTF-8.");

        let pool = establish_connection_pool(url).expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");

        TestDb {
            path,
            pool,
            _dir: dir,
        }
    }

    /// Database pre-populated with the sample price list.
    #[allow(dead_code)]
    pub fn seeded(filename: &str) -> Self {
        let test_db = Self::new(filename);
        let prices = UploadPricesForm::new(SAMPLE_PRICES_CSV.as_bytes().to_vec())
            .into_new_prices()
            .expect("Sample prices must parse.");
        DieselRepository::new(test_db.pool())
            .create_prices(&prices)
            .expect("Failed to seed prices.");
        test_db
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    #[allow(dead_code)]
    pub fn path(&self) -> &Path {
        &self.path
    }
}
