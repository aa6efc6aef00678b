use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;
use crate::models::CatalogItem;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// PostgreSQL-backed catalog of marketplace listings
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    /// Fetch the whole catalog, oldest listings first
    ///
    /// The feed scores every listing, so no row limit is applied here.
    pub async fn fetch_all_items(&self) -> Result<Vec<CatalogItem>, PostgresError> {
        let query = r#"
            SELECT id, title, tags, price, category, original_price, purchase_year, condition
            FROM items
            ORDER BY id
        "#;

        let rows = sqlx::query(query)
            .fetch_all(&self.pool)
            .await?;

        let items: Vec<CatalogItem> = rows.iter().map(item_from_row).collect();

        tracing::debug!("Fetched {} catalog items", items.len());

        Ok(items)
    }

    /// Insert new listings inside one transaction
    ///
    /// Database ids are assigned by PostgreSQL; any `id` on the input is ignored.
    pub async fn insert_items(&self, items: &[CatalogItem]) -> Result<u64, PostgresError> {
        if let Some(item) = items.iter().find(|i| i.title.trim().is_empty()) {
            return Err(PostgresError::InvalidInput(format!(
                "item with empty title (tags: {:?})",
                item.tags
            )));
        }

        let query = r#"
            INSERT INTO items (title, tags, price, category, original_price, purchase_year, condition)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#;

        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for item in items {
            let result = sqlx::query(query)
                .bind(&item.title)
                .bind(&item.tags)
                .bind(item.price)
                .bind(&item.category)
                .bind(item.original_price)
                .bind(item.purchase_year)
                .bind(&item.condition)
                .execute(&mut *tx)
                .await?;
            inserted += result.rows_affected();
        }

        tx.commit().await?;

        tracing::info!("Inserted {} catalog items", inserted);

        Ok(inserted)
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

fn item_from_row(row: &PgRow) -> CatalogItem {
    CatalogItem {
        id: Some(row.get("id")),
        title: row.get("title"),
        tags: row.get("tags"),
        price: row.get("price"),
        category: row.get("category"),
        original_price: row.get("original_price"),
        purchase_year: row.get("purchase_year"),
        condition: row.get("condition"),
    }
}
