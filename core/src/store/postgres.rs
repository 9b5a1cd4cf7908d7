// core/src/store/postgres.rs

//! PostgreSQL backend. One `products` table; full-text matching goes through a
//! GIN index over name, description and category.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{Postgres, QueryBuilder};
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use super::{to_i64, ProductStore};
use crate::error::{CatalogError, CatalogResult};
use crate::models::{NewProduct, Product, ProductSummary};
use crate::params::TrendingMetric;
use crate::query::{text_terms, PatternFields, SearchCondition};

const SUMMARY_COLUMNS: &str = "id, name, description, price, category, image, views, likes";
const PRODUCT_COLUMNS: &str = "id, name, description, price, category, image, views, likes, created_at";
const SEARCH_DOCUMENT: &str = "to_tsvector('simple', name || ' ' || description || ' ' || category)";

const SCHEMA: &[&str] = &[
  r#"
  CREATE TABLE IF NOT EXISTS products (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL CHECK (btrim(name) <> ''),
    description TEXT NOT NULL CHECK (btrim(description) <> ''),
    price DOUBLE PRECISION NOT NULL CHECK (price >= 0),
    category TEXT NOT NULL CHECK (btrim(category) <> ''),
    image TEXT NOT NULL DEFAULT 'https://via.placeholder.com/150',
    views BIGINT NOT NULL DEFAULT 0 CHECK (views >= 0),
    likes BIGINT NOT NULL DEFAULT 0 CHECK (likes >= 0),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
  )
  "#,
  "CREATE INDEX IF NOT EXISTS products_name_idx ON products (name)",
  "CREATE INDEX IF NOT EXISTS products_description_idx ON products (description)",
  "CREATE INDEX IF NOT EXISTS products_category_idx ON products (category)",
  "CREATE INDEX IF NOT EXISTS products_views_idx ON products (views DESC)",
  "CREATE INDEX IF NOT EXISTS products_likes_idx ON products (likes DESC)",
  "CREATE INDEX IF NOT EXISTS products_search_idx ON products USING GIN \
   (to_tsvector('simple', name || ' ' || description || ' ' || category))",
];

/// `lap pro` becomes `lap:* | pro:*`. `None` when the query has no words.
pub fn prefix_tsquery(query: &str) -> Option<String> {
  let terms = text_terms(query);
  if terms.is_empty() {
    return None;
  }
  Some(
    terms
      .iter()
      .map(|term| format!("{term}:*"))
      .collect::<Vec<_>>()
      .join(" | "),
  )
}

fn push_condition(builder: &mut QueryBuilder<'_, Postgres>, condition: &SearchCondition) {
  match condition {
    SearchCondition::All => {}
    SearchCondition::FullText { query } => match prefix_tsquery(query) {
      Some(tsquery) => {
        builder.push(" WHERE ");
        builder.push(SEARCH_DOCUMENT);
        builder.push(" @@ to_tsquery('simple', ");
        builder.push_bind(tsquery);
        builder.push(")");
      }
      None => {
        builder.push(" WHERE FALSE");
      }
    },
    SearchCondition::Pattern {
      pattern,
      fields: PatternFields::NameOrCategory,
    } => {
      builder.push(" WHERE (name ~* ");
      builder.push_bind(pattern.clone());
      builder.push(" OR category ~* ");
      builder.push_bind(pattern.clone());
      builder.push(")");
    }
    SearchCondition::Pattern {
      pattern,
      fields: PatternFields::Name,
    } => {
      builder.push(" WHERE name ~* ");
      builder.push_bind(pattern.clone());
    }
    SearchCondition::Category(category) => {
      builder.push(" WHERE category = ");
      builder.push_bind(category.clone());
    }
  }
}

fn count_query(condition: &SearchCondition) -> QueryBuilder<'static, Postgres> {
  let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM products");
  push_condition(&mut builder, condition);
  builder
}

fn page_query(condition: &SearchCondition, skip: u64, limit: u64) -> QueryBuilder<'static, Postgres> {
  let mut builder = QueryBuilder::new(format!("SELECT {SUMMARY_COLUMNS} FROM products"));
  push_condition(&mut builder, condition);
  builder.push(" ORDER BY views DESC, id ASC LIMIT ");
  builder.push_bind(to_i64(limit));
  builder.push(" OFFSET ");
  builder.push_bind(to_i64(skip));
  builder
}

fn names_query(condition: &SearchCondition, limit: u64) -> QueryBuilder<'static, Postgres> {
  let mut builder = QueryBuilder::new("SELECT name FROM products");
  push_condition(&mut builder, condition);
  builder.push(" GROUP BY name ORDER BY MAX(views) DESC, name ASC LIMIT ");
  builder.push_bind(to_i64(limit));
  builder
}

fn metric_column(metric: TrendingMetric) -> &'static str {
  match metric {
    TrendingMetric::Views => "views",
    TrendingMetric::Likes => "likes",
  }
}

#[derive(Debug, Clone)]
pub struct PgProductStore {
  pool: PgPool,
}

impl PgProductStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  /// Opens a pool against `database_url`. Fails fast; there is no retry.
  #[instrument(name = "pg_store::connect", skip(database_url), err(Display))]
  pub async fn connect(database_url: &str, max_connections: u32) -> CatalogResult<Self> {
    let pool = PgPoolOptions::new()
      .max_connections(max_connections)
      .connect(database_url)
      .await
      .map_err(|e| {
        error!(error = %e, "Failed to connect to the database.");
        CatalogError::Database(e)
      })?;
    info!("Successfully connected to the database.");
    Ok(Self::new(pool))
  }

  pub fn pool(&self) -> &PgPool {
    &self.pool
  }

  /// Creates the products table and its indexes if they are missing.
  #[instrument(name = "pg_store::ensure_schema", skip(self), err(Display))]
  pub async fn ensure_schema(&self) -> CatalogResult<()> {
    for statement in SCHEMA {
      sqlx::query(statement).execute(&self.pool).await?;
    }
    debug!("Products schema is in place.");
    Ok(())
  }
}

#[async_trait]
impl ProductStore for PgProductStore {
  async fn count(&self, condition: &SearchCondition) -> CatalogResult<u64> {
    let count: i64 = count_query(condition).build_query_scalar().fetch_one(&self.pool).await?;
    Ok(count.max(0) as u64)
  }

  async fn find_page(&self, condition: &SearchCondition, skip: u64, limit: u64) -> CatalogResult<Vec<ProductSummary>> {
    let rows = page_query(condition, skip, limit)
      .build_query_as::<ProductSummary>()
      .fetch_all(&self.pool)
      .await?;
    Ok(rows)
  }

  async fn distinct_categories(&self) -> CatalogResult<Vec<String>> {
    let categories = sqlx::query_scalar("SELECT DISTINCT category FROM products ORDER BY category")
      .fetch_all(&self.pool)
      .await?;
    Ok(categories)
  }

  async fn distinct_names(&self, condition: &SearchCondition, limit: u64) -> CatalogResult<Vec<String>> {
    let names = names_query(condition, limit)
      .build_query_scalar()
      .fetch_all(&self.pool)
      .await?;
    Ok(names)
  }

  async fn top_by(&self, metric: TrendingMetric, limit: u64) -> CatalogResult<Vec<Product>> {
    let sql = format!(
      "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY {} DESC, id ASC LIMIT $1",
      metric_column(metric)
    );
    let products = sqlx::query_as::<_, Product>(&sql)
      .bind(to_i64(limit))
      .fetch_all(&self.pool)
      .await?;
    Ok(products)
  }

  #[instrument(name = "pg_store::increment_views", skip(self, ids), fields(id_count = ids.len()), err(Display))]
  async fn increment_views(&self, ids: &[Uuid]) -> CatalogResult<u64> {
    if ids.is_empty() {
      return Ok(0);
    }
    let result = sqlx::query("UPDATE products SET views = views + 1 WHERE id = ANY($1)")
      .bind(ids.to_vec())
      .execute(&self.pool)
      .await?;
    Ok(result.rows_affected())
  }

  #[instrument(name = "pg_store::replace_all", skip(self, products), fields(count = products.len()), err(Display))]
  async fn replace_all(&self, products: Vec<NewProduct>) -> CatalogResult<usize> {
    let now = Utc::now();
    let materialized = products
      .into_iter()
      .map(|product| product.into_product(now))
      .collect::<CatalogResult<Vec<_>>>()?;

    let mut tx = self.pool.begin().await?;
    let deleted = sqlx::query("DELETE FROM products").execute(&mut *tx).await?;
    debug!(deleted = deleted.rows_affected(), "Cleared products table.");

    if !materialized.is_empty() {
      let mut insert = QueryBuilder::<Postgres>::new(format!("INSERT INTO products ({PRODUCT_COLUMNS}) "));
      insert.push_values(materialized.iter(), |mut row, product| {
        row
          .push_bind(product.id)
          .push_bind(product.name.clone())
          .push_bind(product.description.clone())
          .push_bind(product.price)
          .push_bind(product.category.clone())
          .push_bind(product.image.clone())
          .push_bind(product.views)
          .push_bind(product.likes)
          .push_bind(product.created_at);
      });
      insert.build().execute(&mut *tx).await?;
    }
    tx.commit().await?;
    Ok(materialized.len())
  }

  async fn close(&self) {
    info!("Closing database pool.");
    self.pool.close().await;
  }
}
