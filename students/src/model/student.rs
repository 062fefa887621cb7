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

//! The student record and the raw input it is built from.

use derive_getters::Getters;
use derive_more::Constructor;
use roster_core::model::{EmailAddress, FieldErrors, ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum age a student must have to be enrolled.
pub const MIN_AGE: i32 = 18;

/// Identifier of a student record.  Identifiers are assigned by the database at creation time
/// and never change afterwards.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct StudentId(i64);

impl StudentId {
    /// Wraps a raw identifier as returned by the database.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the identifier as an `i64` for database bindings.
    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Age of a student, guaranteed to be at least `MIN_AGE`.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Age(i32);

impl Age {
    /// Creates a new age from an untrusted value, making sure it is within range.
    pub fn new(age: i32) -> ModelResult<Self> {
        if age < MIN_AGE {
            return Err(ModelError(format!("Age must be at least {} but got {}", MIN_AGE, age)));
        }
        Ok(Self(age))
    }

    /// Returns the age as an `i32`.
    pub fn as_i32(self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for Age {
    type Error = ModelError;

    fn try_from(age: i32) -> ModelResult<Self> {
        Age::new(age)
    }
}

impl From<Age> for i32 {
    fn from(age: Age) -> Self {
        age.0
    }
}

/// The business fields of a student, all of them validated.
#[derive(Clone, Constructor, Debug, Deserialize, Getters, PartialEq, Serialize)]
pub struct StudentFields {
    /// Full name of the student.  Never blank.
    name: String,

    /// Contact address of the student.  Unique across all students.
    email: EmailAddress,

    /// Course the student is enrolled in.  Never blank.
    course: String,

    /// Age of the student.
    age: Age,
}

/// A persisted student.
#[derive(Clone, Constructor, Debug, Deserialize, Getters, PartialEq, Serialize)]
pub struct Student {
    /// Identifier assigned by the database.
    id: StudentId,

    /// Current contents of the record.
    #[serde(flatten)]
    fields: StudentFields,
}

/// Untrusted contents of a student as received from a client.
///
/// Every field is optional at parse time so that missing fields can be reported together with
/// other validation failures instead of aborting deserialization at the first one.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct StudentRequest {
    /// Desired name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Desired email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Desired course.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,

    /// Desired age.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
}

/// Returns `value` if it is present and not blank, or records `message` against `field`.
fn required_text(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<String>,
    message: &str,
) -> Option<String> {
    match value {
        Some(value) if !value.trim().is_empty() => Some(value),
        _ => {
            errors.add(field, message);
            None
        }
    }
}

impl StudentRequest {
    /// Checks every field of the request and returns the validated fields or the full list of
    /// failures.
    pub fn validate(self) -> Result<StudentFields, FieldErrors> {
        let mut errors = FieldErrors::default();

        let name = required_text(&mut errors, "name", self.name, "Name is required");

        let email = required_text(&mut errors, "email", self.email, "Email is required").and_then(
            |email| match EmailAddress::new(email) {
                Ok(email) => Some(email),
                Err(_) => {
                    errors.add("email", "Email should be valid");
                    None
                }
            },
        );

        let course = required_text(&mut errors, "course", self.course, "Course is required");

        let age = match self.age {
            Some(age) => match Age::new(age) {
                Ok(age) => Some(age),
                Err(_) => {
                    errors.add("age", "Age must be greater than 18");
                    None
                }
            },
            None => {
                errors.add("age", "Age is required");
                None
            }
        };

        match (name, email, course, age) {
            (Some(name), Some(email), Some(course), Some(age)) => {
                Ok(StudentFields::new(name, email, course, age))
            }
            _ => Err(errors),
        }
    }
}
