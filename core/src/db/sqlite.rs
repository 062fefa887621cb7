// Roster
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Common utilities to interact with an SQLite database.

use crate::db::{Db, DbError, DbResult, Executor, TxExecutor};
use async_trait::async_trait;
use log::warn;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{Sqlite, SqliteConnection, SqlitePool};
use sqlx::Transaction;

/// Takes a raw SQLx error `e` and converts it to our generic error type.
pub fn map_sqlx_error(e: sqlx::Error) -> DbError {
    match e {
        sqlx::Error::ColumnDecode { source, .. } => DbError::DataIntegrityError(source.to_string()),
        sqlx::Error::RowNotFound => DbError::NotFound,
        e if e.to_string().contains("FOREIGN KEY constraint failed") => DbError::NotFound,
        e if e.to_string().contains("UNIQUE constraint failed") => DbError::AlreadyExists,
        e if e.to_string().contains("CHECK constraint failed")
            || e.to_string().contains("NOT NULL constraint failed") =>
        {
            DbError::ConstraintViolation(e.to_string())
        }
        e => DbError::BackendError(e.to_string()),
    }
}

/// Opens a connection pool against the database described by `conn_str`.
///
/// The special `:memory:` string yields a private in-memory database shared by all the
/// connections of the returned pool.
pub async fn connect(conn_str: &str) -> DbResult<SqliteDb> {
    let pool = SqlitePool::connect(conn_str).await.map_err(map_sqlx_error)?;
    Ok(SqliteDb { pool })
}

/// A generic database executor implementation for SQLite.
#[derive(Debug)]
pub enum SqliteExecutor {
    /// An executor backed by a pool.  Operations issued via this executor aren't guaranteed to
    /// happen on the same connection.
    PoolExec(PoolConnection<Sqlite>),

    /// An executor backed by a transaction.
    TxExec(Transaction<'static, Sqlite>),
}

impl SqliteExecutor {
    /// Returns the raw connection to pass to `sqlx` query functions.
    pub fn conn(&mut self) -> &mut SqliteConnection {
        match self {
            SqliteExecutor::PoolExec(conn) => &mut **conn,
            SqliteExecutor::TxExec(tx) => &mut **tx,
        }
    }

    /// Commits the transaction if this executor is backed by one.
    ///
    /// Calling this on a non-transaction-based executor results in a panic.
    pub(super) async fn commit(self) -> DbResult<()> {
        match self {
            SqliteExecutor::PoolExec(_) => unreachable!("Do not call commit on direct executors"),
            SqliteExecutor::TxExec(tx) => tx.commit().await.map_err(map_sqlx_error),
        }
    }
}

/// A database instance backed by an SQLite database.
pub struct SqliteDb {
    /// Shared SQLite connection pool.  This is a cloneable type that all concurrent
    /// transactions can use concurrently.
    pool: SqlitePool,
}

impl SqliteDb {
    /// Returns an executor of the specific type used by this database.
    pub async fn typed_ex(&self) -> DbResult<SqliteExecutor> {
        let conn = self.pool.acquire().await.map_err(map_sqlx_error)?;
        Ok(SqliteExecutor::PoolExec(conn))
    }
}

impl Drop for SqliteDb {
    fn drop(&mut self) {
        if !self.pool.is_closed() {
            warn!("Dropping connection without having called close() first");
        }
    }
}

#[async_trait]
impl Db for SqliteDb {
    async fn ex(&self) -> DbResult<Executor> {
        let ex = self.typed_ex().await?;
        Ok(Executor::Sqlite(ex))
    }

    async fn begin(&self) -> DbResult<TxExecutor> {
        let tx = self.pool.begin().await.map_err(map_sqlx_error)?;
        Ok(TxExecutor(Executor::Sqlite(SqliteExecutor::TxExec(tx))))
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

/// Helper function to initialize the database with a schema.
///
/// The `schema` may contain multiple statements separated by semicolons.
pub async fn run_schema(e: &mut SqliteExecutor, schema: &str) -> DbResult<()> {
    sqlx::raw_sql(schema).execute(e.conn()).await.map_err(map_sqlx_error)?;
    Ok(())
}

/// Test utilities for the SQLite connection.
#[cfg(any(feature = "testutils", test))]
pub mod testutils {
    use super::*;

    /// Initializes the test database.
    pub async fn setup() -> SqliteDb {
        let _can_fail = env_logger::builder().is_test(true).try_init();
        connect(":memory:").await.unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::testutils::*;
    use super::*;
    use crate::db::backend_tests::generate_db_rw_tests;

    generate_db_rw_tests!(Box::new(setup().await));

    #[tokio::test]
    async fn test_map_sqlx_error_unique() {
        let db = setup().await;
        let mut ex = db.typed_ex().await.unwrap();
        run_schema(
            &mut ex,
            "CREATE TABLE test (i INTEGER UNIQUE); INSERT INTO test (i) VALUES (1);",
        )
        .await
        .unwrap();

        let err = sqlx::query("INSERT INTO test (i) VALUES (1)")
            .execute(ex.conn())
            .await
            .map_err(map_sqlx_error)
            .unwrap_err();
        assert_eq!(DbError::AlreadyExists, err);

        drop(ex);
        db.close().await;
    }

    #[tokio::test]
    async fn test_map_sqlx_error_check() {
        let db = setup().await;
        let mut ex = db.typed_ex().await.unwrap();
        run_schema(&mut ex, "CREATE TABLE test (i INTEGER NOT NULL CHECK (i > 0))").await.unwrap();

        for query in ["INSERT INTO test (i) VALUES (0)", "INSERT INTO test (i) VALUES (NULL)"] {
            match sqlx::query(query).execute(ex.conn()).await.map_err(map_sqlx_error) {
                Err(DbError::ConstraintViolation(_)) => (),
                e => panic!("Unexpected result for {}: {:?}", query, e),
            }
        }

        drop(ex);
        db.close().await;
    }

    #[tokio::test]
    async fn test_map_sqlx_error_not_found() {
        let db = setup().await;
        let mut ex = db.typed_ex().await.unwrap();

        let err = sqlx::query("SELECT 1 WHERE 1 = 0")
            .fetch_one(ex.conn())
            .await
            .map_err(map_sqlx_error)
            .map(|_| ())
            .unwrap_err();
        assert_eq!(DbError::NotFound, err);

        drop(ex);
        db.close().await;
    }
}
