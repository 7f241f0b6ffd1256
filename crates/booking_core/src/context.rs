//! Request-scoped context and transactional session.
//!
//! # Responsibility
//! - Carry the connection and the single evaluation instant of one request.
//! - Open write sessions that commit explicitly and roll back on drop.
//!
//! # Invariants
//! - `now` is captured once per context and truncated to whole seconds, the
//!   precision of stored start times.
//! - A session that is not committed is rolled back when dropped, on every
//!   exit path including panics.
//! - While a session is open the context cannot be used for other work.

use crate::db::DbResult;
use crate::model::show::{start_time_to_db, truncate_to_seconds};
use chrono::{Local, NaiveDateTime};
use log::{debug, info, warn};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::time::Instant;

/// Per-request handle passed explicitly into queries and mutations.
pub struct RequestContext<'conn> {
    conn: &'conn mut Connection,
    now: NaiveDateTime,
}

impl<'conn> RequestContext<'conn> {
    /// Creates a context evaluated at the local wall-clock time.
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self::at(conn, Local::now().naive_local())
    }

    /// Creates a context evaluated at a caller-chosen instant.
    pub fn at(conn: &'conn mut Connection, now: NaiveDateTime) -> Self {
        Self {
            conn,
            now: truncate_to_seconds(now),
        }
    }

    /// Evaluation instant shared by every query made through this context.
    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    pub(crate) fn now_db_text(&self) -> String {
        start_time_to_db(self.now)
    }

    /// Read-only access for queries.
    pub fn conn(&self) -> &Connection {
        &*self.conn
    }

    /// Starts an immediate write transaction labelled with `operation`.
    pub fn begin(&mut self, operation: &'static str) -> DbResult<Session<'_>> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        debug!("event=session_open module=context status=ok operation={operation}");
        Ok(Session {
            tx,
            close: SessionClose {
                operation,
                started_at: Instant::now(),
                state: SessionState::Open,
            },
        })
    }
}

/// Lifecycle of a write session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Open,
    Committed,
    RolledBack,
}

/// Scoped write transaction. Commit consumes it; dropping it uncommitted
/// rolls every statement back.
pub struct Session<'ctx> {
    // Declared first so the transaction is finished before `close` logs.
    tx: Transaction<'ctx>,
    close: SessionClose,
}

impl Session<'_> {
    pub fn conn(&self) -> &Connection {
        &self.tx
    }

    pub fn state(&self) -> SessionState {
        self.close.state
    }

    /// Commits the session. On failure the transaction is rolled back.
    pub fn commit(mut self) -> DbResult<()> {
        self.tx.commit()?;
        self.close.state = SessionState::Committed;
        Ok(())
    }
}

/// Emits `session_close` once the transaction has been finished.
struct SessionClose {
    operation: &'static str,
    started_at: Instant,
    state: SessionState,
}

impl Drop for SessionClose {
    fn drop(&mut self) {
        if self.state == SessionState::Open {
            self.state = SessionState::RolledBack;
        }
        let duration_ms = self.started_at.elapsed().as_millis();
        match self.state {
            SessionState::Committed => info!(
                "event=session_close module=context status=committed operation={} duration_ms={duration_ms}",
                self.operation
            ),
            _ => warn!(
                "event=session_close module=context status=rolled_back operation={} duration_ms={duration_ms}",
                self.operation
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RequestContext, SessionState};
    use crate::db::{open_db, open_db_in_memory};
    use chrono::NaiveDate;
    use rusqlite::Connection;
    use std::time::Duration;

    #[test]
    fn now_is_truncated_to_seconds() {
        let mut conn = open_db_in_memory().unwrap();
        let instant = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_milli_opt(3, 4, 5, 678)
            .unwrap();
        let ctx = RequestContext::at(&mut conn, instant);
        assert_eq!(ctx.now_db_text(), "2024-01-02 03:04:05");
    }

    #[test]
    fn dropped_session_rolls_back_and_releases_connection() {
        let mut conn = open_db_in_memory().unwrap();
        {
            let mut ctx = RequestContext::new(&mut conn);
            let session = ctx.begin("test_insert").unwrap();
            session
                .conn()
                .execute(
                    "INSERT INTO artist (name, city, state) VALUES ('a', 'b', 'c');",
                    [],
                )
                .unwrap();
            assert_eq!(session.state(), SessionState::Open);
            assert!(!session.conn().is_autocommit());
        }

        assert!(conn.is_autocommit());
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM artist;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn committed_session_persists_rows() {
        let mut conn = open_db_in_memory().unwrap();
        {
            let mut ctx = RequestContext::new(&mut conn);
            let session = ctx.begin("test_insert").unwrap();
            session
                .conn()
                .execute(
                    "INSERT INTO artist (name, city, state) VALUES ('a', 'b', 'c');",
                    [],
                )
                .unwrap();
            session.commit().unwrap();
        }

        assert!(conn.is_autocommit());
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM artist;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn open_session_holds_the_write_lock_until_closed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lock.sqlite3");
        let mut conn = open_db(&path).unwrap();
        let other = Connection::open(&path).unwrap();
        other.busy_timeout(Duration::ZERO).unwrap();

        {
            let mut ctx = RequestContext::new(&mut conn);
            let session = ctx.begin("test_lock").unwrap();
            assert!(other.execute_batch("BEGIN IMMEDIATE;").is_err());
            drop(session);
        }

        other.execute_batch("BEGIN IMMEDIATE; ROLLBACK;").unwrap();
    }
}
