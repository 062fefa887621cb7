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

//! Test utilities for the REST API.

use crate::db;
use crate::driver::Driver;
use crate::model::{Age, Student, StudentFields, StudentFilter, StudentId};
use crate::rest::app;
use axum::Router;
use roster_core::db::{Db, DbError};
use roster_core::model::EmailAddress;
use std::sync::Arc;

/// State of a running test.
pub(crate) struct TestContext {
    /// The router of the app under test.
    app: Router,

    /// The database backing the app, for direct inspection.
    db: Arc<dyn Db + Send + Sync>,
}

impl TestContext {
    /// Initializes the app using an in-memory database.
    pub(crate) async fn setup() -> Self {
        let db = Arc::from(roster_core::db::sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let app = app(Driver::new(db.clone()));
        Self { app, db }
    }

    /// Gets a clone of the app router.
    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    /// Consumes the context and transforms it into the app router.
    pub(crate) fn into_app(self) -> Router {
        self.app
    }

    /// Creates a student by directly modifying the backing database.
    pub(crate) async fn create_student(
        &self,
        name: &str,
        email: &str,
        course: &str,
        age: i32,
    ) -> Student {
        let fields = StudentFields::new(
            name.to_owned(),
            EmailAddress::from(email),
            course.to_owned(),
            Age::new(age).unwrap(),
        );
        db::create_student(&mut self.db.ex().await.unwrap(), &fields).await.unwrap()
    }

    /// Gets a student by directly querying the backing database.
    pub(crate) async fn get_student(&self, id: StudentId) -> Option<Student> {
        match db::get_student(&mut self.db.ex().await.unwrap(), id).await {
            Ok(student) => Some(student),
            Err(DbError::NotFound) => None,
            Err(e) => panic!("{:?}", e),
        }
    }

    /// Counts the students by directly querying the backing database.
    pub(crate) async fn count_students(&self) -> usize {
        db::count_students(&mut self.db.ex().await.unwrap(), &StudentFilter::All).await.unwrap()
    }
}
