//! Per-operation database connections

use sqlx::{postgres::PgConnectOptions, Connection, PgConnection};
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

use pomodoro_core::StoreError;
use pomodoro_shared::config::StoreSettings;

/// Opens a fresh connection. Without `connect_timeout_secs` a stalled
/// server stalls the caller.
pub async fn open_connection(settings: &StoreSettings) -> Result<PgConnection, StoreError> {
    let options = PgConnectOptions::from_str(&settings.url)
        .map_err(|e| StoreError::Connection(format!("invalid store url: {}", e)))?;

    let connect = PgConnection::connect_with(&options);
    let result = match settings.connect_timeout_secs {
        Some(secs) => tokio::time::timeout(Duration::from_secs(secs), connect)
            .await
            .map_err(|_| StoreError::Connection(format!("connect timed out after {}s", secs)))?,
        None => connect.await,
    };

    result.map_err(|e| StoreError::Connection(e.to_string()))
}

/// Closes the connection; a failed close only affects this connection.
pub async fn close_connection(conn: PgConnection) {
    if let Err(e) = conn.close().await {
        warn!("Failed to close store connection: {}", e);
    }
}
