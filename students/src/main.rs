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

//! Entry point to the student records service.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use log::{error, info};
use roster_core::db::postgres::{PostgresDb, PostgresOptions};
use roster_core::db::{sqlite, Db};
use roster_core::env::get_optional_var;
use roster_students::db::init_schema;
use roster_students::{serve, ServerOptions};
use std::error::Error;
use std::sync::Arc;

/// Opens the database selected by the environment.
///
/// SQLite is used if `ROSTER_SQLITE` holds a connection string.  Otherwise, PostgreSQL is
/// configured from the `PGSQL_PROD_*` variables.
async fn connect_db() -> Result<Arc<dyn Db + Send + Sync>, Box<dyn Error>> {
    if let Some(conn_str) = get_optional_var::<String>("ROSTER", "SQLITE")? {
        info!("Using SQLite database {}", conn_str);
        let db: Arc<dyn Db + Send + Sync> = Arc::new(sqlite::connect(&conn_str).await?);
        return Ok(db);
    }

    let db_opts = PostgresOptions::from_env("PGSQL_PROD")?;
    info!("Using PostgreSQL database {} on {}", db_opts.database, db_opts.host);
    let db: Arc<dyn Db + Send + Sync> = Arc::new(PostgresDb::connect(db_opts)?);
    Ok(db)
}

/// Sets up all resources and runs the server until it is asked to terminate.
async fn run() -> Result<(), Box<dyn Error>> {
    let opts = ServerOptions::from_env("ROSTER")?;

    let db = connect_db().await?;
    init_schema(&mut db.ex().await?).await?;

    let result = serve(opts.bind_addr(), db.clone()).await;
    db.close().await;
    result
}

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(e) = run().await {
        error!("{}", e);
        std::process::exit(1);
    }
}
