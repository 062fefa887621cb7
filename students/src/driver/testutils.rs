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

//! Test utilities for the business logic layer.

use crate::db;
use crate::driver::Driver;
use crate::model::{Age, Student, StudentFields, StudentFilter};
use roster_core::db::{Db, Executor};
use roster_core::model::EmailAddress;
use std::sync::Arc;

/// Syntactic sugar to build the validated fields of a student.
pub(crate) fn make_fields(name: &str, email: &str, course: &str, age: i32) -> StudentFields {
    StudentFields::new(
        name.to_owned(),
        EmailAddress::from(email),
        course.to_owned(),
        Age::new(age).unwrap(),
    )
}

/// State of a running test.
pub(crate) struct TestContext {
    /// The database backing the driver.
    db: Arc<dyn Db + Send + Sync>,

    /// The driver under test.
    driver: Driver,
}

impl TestContext {
    /// Initializes the driver using an in-memory database.
    pub(crate) async fn setup() -> Self {
        let db = Arc::from(roster_core::db::sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let driver = Driver::new(db.clone());
        Self { db, driver }
    }

    /// Gets a direct executor against the database.
    pub(crate) async fn ex(&self) -> Executor {
        self.db.ex().await.unwrap()
    }

    /// Gets a copy of the driver in this test context.
    pub(crate) fn driver(&self) -> Driver {
        self.driver.clone()
    }

    /// Creates a student by directly modifying the backing database.
    pub(crate) async fn create_student(
        &self,
        name: &str,
        email: &str,
        course: &str,
        age: i32,
    ) -> Student {
        db::create_student(&mut self.ex().await, &make_fields(name, email, course, age))
            .await
            .unwrap()
    }

    /// Counts the students in the backing database.
    pub(crate) async fn count_students(&self) -> usize {
        db::count_students(&mut self.ex().await, &StudentFilter::All).await.unwrap()
    }
}
