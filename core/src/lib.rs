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

//! Shared plumbing for record-management web services.
//!
//! Services built on top of this crate follow a layered architecture, and they should structure
//! their code to have these modules as well:
//!
//! 1.  `model`: High-level data types that represent concepts in the domain of the application.
//!     Types in here validate their contents at construction time so that the rest of the app
//!     can trust them.  Extensive use of the newtype pattern is strongly encouraged.
//!
//! 1.  `db`: The persistence layer.  Services implement free functions that receive an
//!     `Executor` and issue backend-specific queries for each supported database.
//!
//! 1.  `driver`: The business logic layer.  Services provide their own `Driver` type that holds
//!     an injected database handle and coordinates transactions against it.
//!
//! 1.  `rest`: The HTTP layer.  Services provide an `axum::Router` whose handlers are thin
//!     wrappers over the `Driver` operations.
//!
//! 1.  `main`: The app launcher.  Its only purpose is to gather configuration from environment
//!     variables, create the database handle and hand everything over to the app.
//!
//! There are result and error types in every layer, such as `DbResult` and `DbError`.  Errors
//! float to the top of the app via the `?` operator and are translated to HTTP status codes once
//! returned from the REST layer.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

pub mod db;
pub mod driver;
pub mod env;
pub mod model;
pub mod rest;
