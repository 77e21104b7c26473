use std::fmt;

use rusqlite::types::ValueRef;
use serde_json::{Map, Value};

use crate::db::DbPool;

/// Name of the archive collection in the backing store.
pub const ARCHIVE_TABLE: &str = "digital_archive";

/// Failure reported by the backing store. The message is relayed verbatim
/// to the caller in the error payload.
#[derive(Debug, Clone)]
pub struct StoreError(pub String);

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for StoreError {}

/// Read access to the digital archive collection. Handlers receive this as
/// an injected handle owned by the process entry point; there is no
/// module-global client.
pub trait ArchiveStore: Send + Sync {
    /// Fetch every row of the collection, unfiltered and unpaginated, as
    /// opaque JSON objects.
    fn fetch_all(&self) -> Result<Vec<Value>, StoreError>;
}

/// Archive store backed by the application's SQLite pool.
pub struct SqliteArchiveStore {
    pool: DbPool,
}

impl SqliteArchiveStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl ArchiveStore for SqliteArchiveStore {
    fn fetch_all(&self) -> Result<Vec<Value>, StoreError> {
        let conn = self.pool.get().map_err(|e| StoreError(e.to_string()))?;
        let mut stmt = conn
            .prepare(&format!("SELECT * FROM {ARCHIVE_TABLE}"))
            .map_err(|e| StoreError(e.to_string()))?;
        // The row shape is opaque to the endpoint; columns are discovered
        // per query, not assumed.
        let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
        let mut rows = stmt.query([]).map_err(|e| StoreError(e.to_string()))?;

        let mut out = Vec::new();
        while let Some(row) = rows.next().map_err(|e| StoreError(e.to_string()))? {
            let mut obj = Map::new();
            for (i, name) in columns.iter().enumerate() {
                let value = match row.get_ref(i).map_err(|e| StoreError(e.to_string()))? {
                    ValueRef::Null => Value::Null,
                    ValueRef::Integer(n) => Value::from(n),
                    ValueRef::Real(f) => Value::from(f),
                    ValueRef::Text(t) => Value::from(String::from_utf8_lossy(t).into_owned()),
                    ValueRef::Blob(b) => Value::from(hex::encode(b)),
                };
                obj.insert(name.clone(), value);
            }
            out.push(Value::Object(obj));
        }
        Ok(out)
    }
}
