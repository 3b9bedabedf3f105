//! [`SqliteStore`]: the SQLite implementation of [`QueryStore`].

use std::{path::Path, time::Duration};

use askdata_core::{
  plan::QueryPlan,
  result::{ResultSet, Value},
  schema::SchemaDescriptor,
  store::{Execution, QueryStore},
};
use rusqlite::OpenFlags;

use crate::{
  Error, Result,
  decode::{RawColumn, decode_value},
  seed::SEED,
};

const LIST_TABLES: &str = "SELECT name FROM sqlite_master \
                           WHERE type IN ('table', 'view') AND name NOT LIKE 'sqlite_%' \
                           ORDER BY name";

const TABLE_INFO: &str = "SELECT name, type, pk FROM pragma_table_info(?1) ORDER BY cid";

/// Rows read on the connection thread, before conversion.
struct RawRows {
  columns:   Vec<String>,
  rows:      Vec<Vec<Value>>,
  truncated: bool,
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A read-only askdata store backed by SQLite.
///
/// Cloning is cheap: the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open an existing database file read-only.
  ///
  /// `busy_timeout` bounds how long a query waits on a lock held by another
  /// process before failing with a timeout.
  pub async fn open(path: impl AsRef<Path>, busy_timeout: Duration) -> Result<Self> {
    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
      | OpenFlags::SQLITE_OPEN_URI
      | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let conn = tokio_rusqlite::Connection::open_with_flags(path, flags).await?;
    let store = Self { conn };
    store.configure(busy_timeout).await?;
    Ok(store)
  }

  /// Open an in-memory store loaded with the demo `orders` / `summary`
  /// dataset. The connection is switched to `query_only` once seeded.
  pub async fn open_demo() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    conn
      .call(|conn| {
        conn.execute_batch(SEED)?;
        Ok(())
      })
      .await?;
    let store = Self { conn };
    store.configure(Duration::from_secs(5)).await?;
    Ok(store)
  }

  async fn configure(&self, busy_timeout: Duration) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.busy_timeout(busy_timeout)?;
        conn.pragma_update(None, "query_only", true)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── QueryStore impl ─────────────────────────────────────────────────────────

impl QueryStore for SqliteStore {
  type Error = Error;

  async fn execute<'a>(&'a self, plan: &'a QueryPlan, max_rows: usize) -> Result<Execution> {
    let sql = plan.statement().to_owned();

    let raw: Option<RawRows> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        if !stmt.readonly() {
          return Ok(None);
        }
        let columns: Vec<String> =
          stmt.column_names().into_iter().map(str::to_owned).collect();
        let width = columns.len();

        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        let mut truncated = false;
        while let Some(row) = rows.next()? {
          if out.len() == max_rows {
            truncated = true;
            break;
          }
          let mut values = Vec::with_capacity(width);
          for i in 0..width {
            values.push(decode_value(row.get_ref(i)?));
          }
          out.push(values);
        }
        Ok(Some(RawRows { columns, rows: out, truncated }))
      })
      .await?;

    let raw = raw.ok_or(Error::NotReadOnly)?;
    let mut result = ResultSet::new(raw.columns);
    for row in raw.rows {
      result.push_row(row)?;
    }
    tracing::debug!(rows = result.len(), truncated = raw.truncated, "rows materialised");
    Ok(Execution { result, truncated: raw.truncated })
  }

  async fn describe(&self) -> Result<SchemaDescriptor> {
    let tables: Vec<(String, Vec<RawColumn>)> = self
      .conn
      .call(|conn| {
        let mut list = conn.prepare(LIST_TABLES)?;
        let names = list
          .query_map([], |row| row.get::<_, String>(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut info = conn.prepare(TABLE_INFO)?;
        let mut tables = Vec::with_capacity(names.len());
        for name in names {
          let columns = info
            .query_map([&name], |row| {
              Ok(RawColumn {
                name:        row.get(0)?,
                declared:    row.get(1)?,
                primary_key: row.get::<_, i64>(2)? > 0,
              })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          tables.push((name, columns));
        }
        Ok(tables)
      })
      .await?;

    Ok(tables.into_iter().fold(SchemaDescriptor::new(), |schema, (name, columns)| {
      schema.with_table(name, columns.into_iter().map(RawColumn::into_descriptor).collect())
    }))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn demo_connection_refuses_writes() {
    let store = SqliteStore::open_demo().await.unwrap();
    let refused = store
      .conn
      .call(|conn| {
        conn.execute("DELETE FROM orders", [])?;
        Ok(())
      })
      .await;
    assert!(refused.is_err());
  }
}
