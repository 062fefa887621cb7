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

//! Extends the driver with the operations on individual students.

use crate::db;
use crate::driver::{duplicate_email, map_write_error, not_found, Driver};
use crate::model::{Student, StudentFields, StudentId};
use log::info;
use roster_core::db::DbError;
use roster_core::driver::DriverResult;

impl Driver {
    /// Creates a new student with `fields` and returns it with its assigned identifier.
    pub(crate) async fn create_student(self, fields: StudentFields) -> DriverResult<Student> {
        let mut tx = self.db.begin().await?;

        if db::get_student_by_email(tx.ex(), fields.email()).await?.is_some() {
            return Err(duplicate_email(fields.email()));
        }

        let student = db::create_student(tx.ex(), &fields)
            .await
            .map_err(|e| map_write_error(e, fields.email()))?;

        tx.commit().await?;
        info!("Created student {}", student.id());
        Ok(student)
    }

    /// Gets the student identified by `id`.
    pub(crate) async fn get_student(self, id: StudentId) -> DriverResult<Student> {
        let mut ex = self.db.ex().await?;
        match db::get_student(&mut ex, id).await {
            Ok(student) => Ok(student),
            Err(DbError::NotFound) => Err(not_found(id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Replaces the contents of the student identified by `id` with `fields`.
    ///
    /// The email address is only checked for uniqueness when it changes.
    pub(crate) async fn update_student(
        self,
        id: StudentId,
        fields: StudentFields,
    ) -> DriverResult<Student> {
        let mut tx = self.db.begin().await?;

        let current = match db::get_student(tx.ex(), id).await {
            Ok(student) => student,
            Err(DbError::NotFound) => return Err(not_found(id)),
            Err(e) => return Err(e.into()),
        };

        if current.fields().email() != fields.email() {
            if let Some(other) = db::get_student_by_email(tx.ex(), fields.email()).await? {
                if *other.id() != id {
                    return Err(duplicate_email(fields.email()));
                }
            }
        }

        let student = match db::update_student(tx.ex(), id, &fields).await {
            Ok(student) => student,
            Err(DbError::NotFound) => return Err(not_found(id)),
            Err(e) => return Err(map_write_error(e, fields.email())),
        };

        tx.commit().await?;
        info!("Updated student {}", id);
        Ok(student)
    }

    /// Deletes the student identified by `id`.
    pub(crate) async fn delete_student(self, id: StudentId) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;

        match db::delete_student(tx.ex(), id).await {
            Ok(()) => (),
            Err(DbError::NotFound) => return Err(not_found(id)),
            Err(e) => return Err(e.into()),
        }

        tx.commit().await?;
        info!("Deleted student {}", id);
        Ok(())
    }
}
