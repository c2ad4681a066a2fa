// ============================================================================
// Pomodoro Infrastructure - PostgreSQL Document Store
// File: crates/pomodoro-infrastructure/src/database/postgres/document_store_impl.rs
// ============================================================================
//! Collections are tables of JSONB documents `(id BIGSERIAL, doc JSONB)`.
//! Filters match with `doc @> filter`, unique indexes are expression
//! indexes on `doc->>'field'`.

use async_trait::async_trait;
use sqlx::{types::Json, Connection, PgConnection};
use tracing::{debug, error, info};

use pomodoro_core::repositories::{validate_name, Document, DocumentStore, IndexInfo, UpsertOutcome};
use pomodoro_core::StoreError;
use pomodoro_shared::config::StoreSettings;

use crate::database::connection::{close_connection, open_connection};

const UNDEFINED_TABLE: &str = "42P01";

pub struct PgDocumentStore {
    settings: StoreSettings,
}

impl PgDocumentStore {
    pub fn new(settings: StoreSettings) -> Self {
        Self { settings }
    }

    async fn connect(&self) -> Result<PgConnection, StoreError> {
        open_connection(&self.settings).await
    }
}

fn index_name(collection: &str, field: &str) -> String {
    format!("{}_{}_key", collection, field)
}

/// Field of a `<collection>_<field>_key` constraint.
fn constraint_field<'a>(collection: &str, constraint: &'a str) -> Option<&'a str> {
    constraint
        .strip_prefix(collection)?
        .strip_prefix('_')?
        .strip_suffix("_key")
}

/// Indexed field of a `pg_indexes.indexdef`, either the JSON key of an
/// expression index or the plain column.
fn indexed_field(indexdef: &str) -> Option<String> {
    if let Some(start) = indexdef.find("->> '") {
        let rest = &indexdef[start + 5..];
        return rest.find('\'').map(|end| rest[..end].to_string());
    }
    let open = indexdef.rfind('(')?;
    let rest = &indexdef[open + 1..];
    rest.find(')').map(|end| rest[..end].trim().to_string())
}

fn is_undefined_table(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some(UNDEFINED_TABLE))
}

fn map_sqlx_error(err: sqlx::Error, collection: &str, doc: Option<&Document>) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            let field = db
                .constraint()
                .and_then(|c| constraint_field(collection, c))
                .unwrap_or("unknown")
                .to_string();
            let value = doc
                .and_then(|d| d.get(&field))
                .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
                .unwrap_or_default();
            StoreError::DuplicateKey {
                collection: collection.to_string(),
                field,
                value,
            }
        }
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => StoreError::Connection(err.to_string()),
        _ => {
            error!("Database error in collection {}: {}", collection, err);
            StoreError::Query(err.to_string())
        }
    }
}

async fn ensure_table(conn: &mut PgConnection, collection: &str) -> Result<(), sqlx::Error> {
    let sql = format!(
        r#"CREATE TABLE IF NOT EXISTS "{}" (id BIGSERIAL PRIMARY KEY, doc JSONB NOT NULL)"#,
        collection
    );
    sqlx::query(&sql).execute(&mut *conn).await?;
    Ok(())
}

async fn find_all_on(
    conn: &mut PgConnection,
    collection: &str,
    filter: &Document,
    limit: Option<i64>,
) -> Result<Vec<Document>, sqlx::Error> {
    let sql = match limit {
        Some(n) => format!(r#"SELECT doc FROM "{}" WHERE doc @> $1 ORDER BY id LIMIT {}"#, collection, n),
        None => format!(r#"SELECT doc FROM "{}" WHERE doc @> $1 ORDER BY id"#, collection),
    };
    let rows: Vec<Json<Document>> = sqlx::query_scalar(&sql)
        .bind(Json(filter))
        .fetch_all(&mut *conn)
        .await?;
    Ok(rows.into_iter().map(|Json(doc)| doc).collect())
}

async fn insert_on(conn: &mut PgConnection, collection: &str, doc: &Document) -> Result<(), sqlx::Error> {
    ensure_table(conn, collection).await?;
    let sql = format!(r#"INSERT INTO "{}" (doc) VALUES ($1)"#, collection);
    sqlx::query(&sql).bind(Json(doc)).execute(&mut *conn).await?;
    Ok(())
}

async fn upsert_on(
    conn: &mut PgConnection,
    collection: &str,
    filter: &Document,
    doc: &Document,
) -> Result<UpsertOutcome, sqlx::Error> {
    ensure_table(conn, collection).await?;
    let mut tx = conn.begin().await?;

    let update = format!(
        r#"UPDATE "{c}" SET doc = $2
           WHERE id = (SELECT id FROM "{c}" WHERE doc @> $1 ORDER BY id LIMIT 1)"#,
        c = collection
    );
    let matched = sqlx::query(&update)
        .bind(Json(filter))
        .bind(Json(doc))
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let outcome = if matched > 0 {
        UpsertOutcome { matched, upserted: false }
    } else {
        let insert = format!(r#"INSERT INTO "{}" (doc) VALUES ($1)"#, collection);
        sqlx::query(&insert).bind(Json(doc)).execute(&mut *tx).await?;
        UpsertOutcome { matched: 0, upserted: true }
    };

    tx.commit().await?;
    Ok(outcome)
}

async fn table_exists(conn: &mut PgConnection, collection: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT to_regclass($1) IS NOT NULL")
        .bind(format!("\"{}\"", collection))
        .fetch_one(&mut *conn)
        .await
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn find_one(&self, collection: &str, filter: &Document) -> Result<Option<Document>, StoreError> {
        validate_name(collection)?;
        let mut conn = self.connect().await?;
        let result = find_all_on(&mut conn, collection, filter, Some(1)).await;
        close_connection(conn).await;

        match result {
            Ok(docs) => Ok(docs.into_iter().next()),
            Err(e) if is_undefined_table(&e) => Ok(None),
            Err(e) => Err(map_sqlx_error(e, collection, None)),
        }
    }

    async fn find_all(&self, collection: &str, filter: &Document) -> Result<Vec<Document>, StoreError> {
        validate_name(collection)?;
        let mut conn = self.connect().await?;
        let result = find_all_on(&mut conn, collection, filter, None).await;
        close_connection(conn).await;

        match result {
            Ok(docs) => Ok(docs),
            Err(e) if is_undefined_table(&e) => Ok(Vec::new()),
            Err(e) => Err(map_sqlx_error(e, collection, None)),
        }
    }

    async fn insert(&self, collection: &str, doc: &Document) -> Result<(), StoreError> {
        validate_name(collection)?;
        let mut conn = self.connect().await?;
        let result = insert_on(&mut conn, collection, doc).await;
        close_connection(conn).await;

        result.map_err(|e| map_sqlx_error(e, collection, Some(doc)))
    }

    async fn upsert(&self, collection: &str, filter: &Document, doc: &Document) -> Result<UpsertOutcome, StoreError> {
        validate_name(collection)?;
        let mut conn = self.connect().await?;
        let result = upsert_on(&mut conn, collection, filter, doc).await;
        close_connection(conn).await;

        result.map_err(|e| map_sqlx_error(e, collection, Some(doc)))
    }

    async fn delete_many(&self, collection: &str, filter: &Document) -> Result<u64, StoreError> {
        validate_name(collection)?;
        let mut conn = self.connect().await?;
        let sql = format!(r#"DELETE FROM "{}" WHERE doc @> $1"#, collection);
        let result = sqlx::query(&sql).bind(Json(filter)).execute(&mut conn).await;
        close_connection(conn).await;

        match result {
            Ok(done) => {
                debug!("Deleted {} documents from {}", done.rows_affected(), collection);
                Ok(done.rows_affected())
            }
            Err(e) if is_undefined_table(&e) => Ok(0),
            Err(e) => Err(map_sqlx_error(e, collection, None)),
        }
    }

    async fn ensure_unique_index(&self, collection: &str, field: &str) -> Result<(), StoreError> {
        validate_name(collection)?;
        validate_name(field)?;
        let mut conn = self.connect().await?;
        let sql = format!(
            r#"CREATE UNIQUE INDEX IF NOT EXISTS "{}" ON "{}" ((doc->>'{}'))"#,
            index_name(collection, field),
            collection,
            field
        );
        let result = match ensure_table(&mut conn, collection).await {
            Ok(()) => sqlx::query(&sql).execute(&mut conn).await.map(|_| ()),
            Err(e) => Err(e),
        };
        close_connection(conn).await;

        result.map_err(|e| map_sqlx_error(e, collection, None))?;
        info!("Unique index ensured on {}.{}", collection, field);
        Ok(())
    }

    async fn index_information(&self, collection: &str) -> Result<Vec<IndexInfo>, StoreError> {
        validate_name(collection)?;
        let mut conn = self.connect().await?;
        let result: Result<Vec<(String, String)>, sqlx::Error> = sqlx::query_as(
            r#"
            SELECT indexname::text, indexdef
            FROM pg_indexes
            WHERE schemaname = current_schema() AND tablename = $1
              AND indexname NOT LIKE '%\_pkey'
            ORDER BY indexname
            "#,
        )
        .bind(collection)
        .fetch_all(&mut conn)
        .await;
        close_connection(conn).await;

        let rows = result.map_err(|e| map_sqlx_error(e, collection, None))?;
        Ok(rows
            .into_iter()
            .map(|(name, def)| IndexInfo {
                field: indexed_field(&def).unwrap_or_default(),
                unique: def.contains("UNIQUE"),
                name,
            })
            .collect())
    }

    async fn collection_names(&self) -> Result<Vec<String>, StoreError> {
        let mut conn = self.connect().await?;
        let result: Result<Vec<String>, sqlx::Error> = sqlx::query_scalar(
            "SELECT tablename::text FROM pg_tables WHERE schemaname = current_schema() ORDER BY tablename",
        )
        .fetch_all(&mut conn)
        .await;
        close_connection(conn).await;

        result.map_err(|e| map_sqlx_error(e, "", None))
    }

    async fn drop_collection(&self, collection: &str) -> Result<bool, StoreError> {
        validate_name(collection)?;
        let mut conn = self.connect().await?;
        let sql = format!(r#"DROP TABLE IF EXISTS "{}""#, collection);
        let result = match table_exists(&mut conn, collection).await {
            Ok(existed) => sqlx::query(&sql).execute(&mut conn).await.map(|_| existed),
            Err(e) => Err(e),
        };
        close_connection(conn).await;

        let existed = result.map_err(|e| map_sqlx_error(e, collection, None))?;
        info!("Dropped collection {} (existed: {})", collection, existed);
        Ok(existed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_field() {
        assert_eq!(constraint_field("sessions", "sessions_token_key"), Some("token"));
        assert_eq!(constraint_field("users", "users_username_key"), Some("username"));
        assert_eq!(constraint_field("sessions", "users_username_key"), None);
        assert_eq!(constraint_field("sessions", "sessions_pkey"), None);
    }

    #[test]
    fn test_indexed_field_from_indexdef() {
        let expr = "CREATE UNIQUE INDEX sessions_token_key ON public.sessions USING btree (((doc ->> 'token'::text)))";
        assert_eq!(indexed_field(expr).as_deref(), Some("token"));

        let pkey = "CREATE UNIQUE INDEX sessions_pkey ON public.sessions USING btree (id)";
        assert_eq!(indexed_field(pkey).as_deref(), Some("id"));
    }

    #[test]
    fn test_index_name() {
        assert_eq!(index_name("sessions", "token"), "sessions_token_key");
    }

    #[tokio::test]
    async fn test_invalid_collection_is_rejected_before_connecting() {
        // Unreachable URL: validation must fail first.
        let mut settings = StoreSettings::memory();
        settings.url = "postgres://127.0.0.1:1/none".into();
        let store = PgDocumentStore::new(settings);
        let err = store
            .find_one("bad name", &Document::new())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidName(_)));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_connection_error() {
        let mut settings = StoreSettings::memory();
        settings.url = "postgres://127.0.0.1:1/none".into();
        settings.connect_timeout_secs = Some(2);
        let store = PgDocumentStore::new(settings);
        let err = store.find_one("sessions", &Document::new()).await.unwrap_err();
        assert!(matches!(err, StoreError::Connection(_)));
        assert_eq!(err.status_code(), Some(503));
    }
}
