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

//! REST service that manages a roster of student records.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use log::{info, warn};
use roster_core::db::Db;
use roster_core::env::get_optional_var;
use std::error::Error;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

pub mod db;
pub mod driver;
use driver::Driver;
pub mod model;
mod rest;
use rest::app;

/// Port to listen on when none is configured.
const DEFAULT_PORT: u16 = 3000;

/// Configuration options for the HTTP server.
#[derive(Clone, Debug, PartialEq)]
pub struct ServerOptions {
    /// Port to listen on.
    pub port: u16,

    /// Whether to listen on all network interfaces instead of only on the loopback one.
    pub bind_all: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self { port: DEFAULT_PORT, bind_all: false }
    }
}

impl ServerOptions {
    /// Creates a new set of options from environment variables whose name is prefixed with
    /// `prefix`.
    pub fn from_env(prefix: &str) -> Result<Self, String> {
        Ok(Self {
            port: get_optional_var::<u16>(prefix, "PORT")?.unwrap_or(DEFAULT_PORT),
            bind_all: get_optional_var::<bool>(prefix, "BIND_ALL")?.unwrap_or(false),
        })
    }

    /// Returns the address to bind the server to.
    pub fn bind_addr(&self) -> SocketAddr {
        let ip = if self.bind_all { Ipv4Addr::UNSPECIFIED } else { Ipv4Addr::LOCALHOST };
        SocketAddr::from((ip, self.port))
    }
}

/// Waits until the process is asked to terminate.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutting down"),
        Err(e) => {
            warn!("Cannot listen for termination signals: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

/// Instantiates all resources to serve the application on `bind_addr` until the process is
/// asked to terminate.
///
/// The `db` must have been initialized with the schema.  Closing it is the responsibility of the
/// caller once this returns.
///
/// While it'd be nice to push this responsibility to `main`, doing so would force us to expose many
/// crate-internal types to the public, which in turn would make dead code detection harder.
pub async fn serve(
    bind_addr: impl Into<SocketAddr>,
    db: Arc<dyn Db + Send + Sync>,
) -> Result<(), Box<dyn Error>> {
    let driver = Driver::new(db);
    let app = app(driver);

    let listener = tokio::net::TcpListener::bind(bind_addr.into()).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_options_from_env_defaults() {
        temp_env::with_vars([("ROSTER_PORT", None::<&str>), ("ROSTER_BIND_ALL", None)], || {
            let opts = ServerOptions::from_env("ROSTER").unwrap();
            assert_eq!(ServerOptions::default(), opts);
            assert_eq!(SocketAddr::from((Ipv4Addr::LOCALHOST, 3000)), opts.bind_addr());
        });
    }

    #[test]
    fn test_server_options_from_env_all_present() {
        temp_env::with_vars(
            [("ROSTER_PORT", Some("8080")), ("ROSTER_BIND_ALL", Some("true"))],
            || {
                let opts = ServerOptions::from_env("ROSTER").unwrap();
                assert_eq!(ServerOptions { port: 8080, bind_all: true }, opts);
                assert_eq!(SocketAddr::from((Ipv4Addr::UNSPECIFIED, 8080)), opts.bind_addr());
            },
        );
    }

    #[test]
    fn test_server_options_from_env_bad_values() {
        temp_env::with_vars([("ROSTER_PORT", Some("70000")), ("ROSTER_BIND_ALL", None)], || {
            let err = ServerOptions::from_env("ROSTER").unwrap_err();
            assert!(err.contains("ROSTER_PORT"), "{}", err);
        });

        temp_env::with_vars([("ROSTER_PORT", None), ("ROSTER_BIND_ALL", Some("yes"))], || {
            let err = ServerOptions::from_env("ROSTER").unwrap_err();
            assert!(err.contains("ROSTER_BIND_ALL"), "{}", err);
        });
    }
}
