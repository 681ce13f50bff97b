use super::SchemaSnapshot;
use resgen_core::{GeneratorError, GeneratorResult};
use sqlx::postgres::PgPoolOptions;

const COLUMNS_QUERY: &str = "SELECT table_name::text, column_name::text \
     FROM information_schema.columns \
     WHERE table_schema = $1 \
     ORDER BY table_name, ordinal_position";

/// Read every table's column listing from a PostgreSQL schema
///
/// Runs once before generation so the per-model lookups stay synchronous.
pub async fn load_snapshot(database_url: &str, schema: &str) -> GeneratorResult<SchemaSnapshot> {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(database_url)
        .await
        .map_err(|e| GeneratorError::database(format!("Failed to connect to database: {}", e)))?;

    let rows: Vec<(String, String)> = sqlx::query_as(COLUMNS_QUERY)
        .bind(schema)
        .fetch_all(&pool)
        .await
        .map_err(|e| GeneratorError::database(format!("Failed to read column listing: {}", e)))?;

    pool.close().await;

    let mut snapshot = SchemaSnapshot::new();
    for (table, column) in rows {
        snapshot.push_column(&table, column);
    }

    tracing::debug!(schema, tables = snapshot.table_count(), "loaded schema snapshot");
    Ok(snapshot)
}
