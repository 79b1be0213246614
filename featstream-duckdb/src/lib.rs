//! DuckDB-backed [`QueryEngine`].
//!
//! One pooled connection is opened at startup (extensions are installed
//! and loaded there); every call checks out its own cloned session, so
//! concurrent requests never share statement state. Scans run on a
//! blocking thread and hand converted Arrow record batches through a
//! bounded channel: at most one undelivered batch exists at a time, and
//! dropping the receiver (client disconnect) ends the scan at the next
//! send.

mod convert;

use async_trait::async_trait;
use duckdb::Connection;
use featstream_api::{EngineError, Predicate, QueryEngine, RowBatchStream, ScanPlan};
use featstream_core::{ColumnInfo, RowBatch};
use futures::stream;
use std::sync::Mutex;
use tokio::sync::mpsc;
use tracing::debug;

/// Engine connection options.
#[derive(Debug, Clone)]
pub struct DuckDbConfig {
    /// Extensions to `INSTALL`/`LOAD` at startup. `httpfs` enables remote
    /// sources; `spatial` provides the geometry conversion functions.
    pub extensions: Vec<String>,
}

impl Default for DuckDbConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["httpfs".to_string(), "spatial".to_string()],
        }
    }
}

/// Embedded DuckDB session pool (one connection, cloned per request).
pub struct DuckDbEngine {
    conn: Mutex<Connection>,
}

impl DuckDbEngine {
    /// Open an in-memory database and load the configured extensions.
    pub fn connect(config: &DuckDbConfig) -> Result<Self, EngineError> {
        let conn = Connection::open_in_memory().map_err(session_err)?;
        if !config.extensions.is_empty() {
            let setup: String = config
                .extensions
                .iter()
                .map(|ext| format!("INSTALL {ext}; LOAD {ext};"))
                .collect::<Vec<_>>()
                .join("\n");
            conn.execute_batch(&setup).map_err(session_err)?;
            debug!(extensions = ?config.extensions, "extensions loaded");
        }
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Check out a dedicated session for one request.
    fn session(&self) -> Result<Connection, EngineError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| EngineError::Session("connection lock poisoned".to_string()))?;
        conn.try_clone().map_err(session_err)
    }
}

#[async_trait]
impl QueryEngine for DuckDbEngine {
    async fn count(&self, source: &str, predicate: &Predicate) -> Result<u64, EngineError> {
        let session = self.session()?;
        let sql = count_sql(source, predicate);
        let params: Vec<String> = predicate.params().to_vec();
        let source = source.to_string();
        debug!(%sql, "count query");

        tokio::task::spawn_blocking(move || {
            let mut stmt = session
                .prepare(&sql)
                .map_err(|e| source_err(&source, e))?;
            let total: i64 = stmt
                .query_row(duckdb::params_from_iter(params), |row| row.get(0))
                .map_err(exec_err)?;
            Ok(total.max(0) as u64)
        })
        .await
        .map_err(|e| EngineError::Execution(format!("count task failed: {e}")))?
    }

    async fn scan(&self, plan: ScanPlan) -> Result<RowBatchStream, EngineError> {
        let session = self.session()?;
        let sql = scan_sql(&plan);
        let params: Vec<String> = plan.predicate.params().to_vec();
        debug!(%sql, "scan query");

        // Capacity 1: the reader drains a batch before the scanner can
        // produce the next one, keeping memory bounded by one batch.
        let (tx, rx) = mpsc::channel::<Result<RowBatch, EngineError>>(1);
        tokio::task::spawn_blocking(move || {
            if let Err(e) = run_scan(&session, &plan.source, &sql, params, &tx) {
                // Receiver may already be gone; nothing left to do then.
                let _ = tx.blocking_send(Err(e));
            }
        });

        Ok(Box::pin(stream::unfold(rx, |mut rx| async move {
            let item = rx.recv().await?;
            Some((item, rx))
        })))
    }

    async fn describe(&self, source: &str) -> Result<Vec<ColumnInfo>, EngineError> {
        let session = self.session()?;
        let sql = format!("DESCRIBE SELECT * FROM {}", from_clause(source));
        let source = source.to_string();
        debug!(%sql, "describe query");

        tokio::task::spawn_blocking(move || {
            let mut stmt = session
                .prepare(&sql)
                .map_err(|e| source_err(&source, e))?;
            let mut rows = stmt.query([]).map_err(exec_err)?;
            let mut columns = Vec::new();
            while let Some(row) = rows.next().map_err(exec_err)? {
                columns.push(ColumnInfo {
                    name: row.get(0).map_err(exec_err)?,
                    datatype: row.get(1).map_err(exec_err)?,
                });
            }
            Ok(columns)
        })
        .await
        .map_err(|e| EngineError::Execution(format!("describe task failed: {e}")))?
    }
}

fn run_scan(
    session: &Connection,
    source: &str,
    sql: &str,
    params: Vec<String>,
    tx: &mpsc::Sender<Result<RowBatch, EngineError>>,
) -> Result<(), EngineError> {
    let mut stmt = session.prepare(sql).map_err(|e| source_err(source, e))?;
    let batches = stmt
        .query_arrow(duckdb::params_from_iter(params))
        .map_err(exec_err)?;
    for batch in batches {
        let rows = convert::record_batch_rows(&batch)?;
        if tx.blocking_send(Ok(rows)).is_err() {
            // Client went away; stop scanning.
            debug!("scan receiver dropped, aborting");
            break;
        }
    }
    Ok(())
}

/// Relation over the source location. The location is a trusted
/// deployment-level input; embedded quotes are still escaped.
fn from_clause(source: &str) -> String {
    format!("read_parquet('{}')", source.replace('\'', "''"))
}

fn count_sql(source: &str, predicate: &Predicate) -> String {
    match predicate.where_clause() {
        Some(cond) => format!(
            "SELECT COUNT(*) AS total FROM {} WHERE {}",
            from_clause(source),
            cond
        ),
        None => format!("SELECT COUNT(*) AS total FROM {}", from_clause(source)),
    }
}

fn scan_sql(plan: &ScanPlan) -> String {
    let mut sql = format!(
        "SELECT {} FROM {}",
        plan.projection(),
        from_clause(&plan.source)
    );
    if let Some(cond) = plan.predicate.where_clause() {
        sql.push_str(" WHERE ");
        sql.push_str(&cond);
    }
    sql.push_str(&format!(" LIMIT {} OFFSET {}", plan.limit, plan.offset));
    sql
}

fn session_err(e: duckdb::Error) -> EngineError {
    EngineError::Session(e.to_string())
}

fn exec_err(e: duckdb::Error) -> EngineError {
    EngineError::Execution(e.to_string())
}

fn source_err(source: &str, e: duckdb::Error) -> EngineError {
    EngineError::Source {
        src: source.to_string(),
        message: e.to_string(),
    }
}
