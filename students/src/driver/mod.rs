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

//! Business logic for the student records service.

use crate::model::StudentId;
use log::warn;
use roster_core::db::{Db, DbError};
use roster_core::driver::DriverError;
use roster_core::model::EmailAddress;
use std::sync::Arc;

mod student;
mod students;
#[cfg(test)]
pub(crate) mod testutils;

/// Builds the error returned when the student `id` does not exist.
fn not_found(id: StudentId) -> DriverError {
    DriverError::NotFound(format!("Student not found with id: {}", id))
}

/// Builds the error returned when `email` is already in use by another student.
fn duplicate_email(email: &EmailAddress) -> DriverError {
    DriverError::AlreadyExists(format!("Email already exists: {}", email.as_str()))
}

/// Converts the error of a write that stores `email` into a driver error.
///
/// The callers check for duplicate addresses before writing, so a uniqueness failure here means
/// that a concurrent transaction claimed `email` in between.
fn map_write_error(e: DbError, email: &EmailAddress) -> DriverError {
    match e {
        DbError::AlreadyExists => {
            warn!("Email {} was taken concurrently", email.as_str());
            duplicate_email(email)
        }
        e => e.into(),
    }
}

/// Business logic.
///
/// The public operations exposed by the driver are all "one shot": they start and commit a
/// transaction, so it's incorrect for the caller to use two separate calls.  For this reason,
/// these operations consume the driver in an attempt to minimize the possibility of executing
/// two operations.
#[derive(Clone)]
pub struct Driver {
    /// The database that the driver uses for persistence.
    db: Arc<dyn Db + Send + Sync>,
}

impl Driver {
    /// Creates a new driver backed by the given injected components.
    pub fn new(db: Arc<dyn Db + Send + Sync>) -> Self {
        Self { db }
    }
}
