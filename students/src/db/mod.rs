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

//! Database abstraction to manipulate student records.

use crate::model::{Age, PageRequest, Sort, Student, StudentFields, StudentFilter, StudentId};
#[cfg(feature = "postgres")]
use roster_core::db::postgres;
#[cfg(any(feature = "sqlite", test))]
use roster_core::db::sqlite;
use roster_core::db::{count_as_usize, ensure_one_row, DbError, DbResult, Executor};
use roster_core::model::EmailAddress;
use sqlx::Row;
#[cfg(feature = "postgres")]
use sqlx::postgres::PgRow;
#[cfg(any(feature = "sqlite", test))]
use sqlx::sqlite::SqliteRow;

mod query;
use query::{fold_case, Dialect, QueryBuf};

/// Initializes the database schema.
pub async fn init_schema(ex: &mut Executor) -> DbResult<()> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => postgres::run_schema(ex, include_str!("postgres.sql")).await,

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => sqlite::run_schema(ex, include_str!("sqlite.sql")).await,

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Assembles a student from the raw values of a row, validating them along the way.
fn build_student(
    id: i64,
    name: String,
    email: String,
    course: String,
    age: i32,
) -> DbResult<Student> {
    let fields = StudentFields::new(name, EmailAddress::new(email)?, course, Age::new(age)?);
    Ok(Student::new(StudentId::new(id), fields))
}

#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for Student {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(postgres::map_sqlx_error)?;
        let email: String = row.try_get("email").map_err(postgres::map_sqlx_error)?;
        let course: String = row.try_get("course").map_err(postgres::map_sqlx_error)?;
        let age: i32 = row.try_get("age").map_err(postgres::map_sqlx_error)?;

        build_student(id, name, email, course, age)
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for Student {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(sqlite::map_sqlx_error)?;
        let email: String = row.try_get("email").map_err(sqlite::map_sqlx_error)?;
        let course: String = row.try_get("course").map_err(sqlite::map_sqlx_error)?;
        let age: i32 = row.try_get("age").map_err(sqlite::map_sqlx_error)?;

        build_student(id, name, email, course, age)
    }
}

/// Runs a query built for the backend of `ex` that returns whole students.
async fn fetch_students<F>(ex: &mut Executor, build: F) -> DbResult<Vec<Student>>
where
    F: FnOnce(Dialect) -> QueryBuf,
{
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let q = build(Dialect::Postgres);
            let rows = q
                .build::<sqlx::Postgres>()
                .fetch_all(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            rows.into_iter().map(Student::try_from).collect()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let q = build(Dialect::Sqlite);
            let rows = q
                .build::<sqlx::Sqlite>()
                .fetch_all(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            rows.into_iter().map(Student::try_from).collect()
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Creates a new student with the given `fields` and returns it with its assigned identifier.
pub(crate) async fn create_student(ex: &mut Executor, fields: &StudentFields) -> DbResult<Student> {
    let id: i64 = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO students
                    (name, email, course, age, name_key, email_key, course_key)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING id";
            let row = sqlx::query(query_str)
                .bind(fields.name().as_str())
                .bind(fields.email().as_str())
                .bind(fields.course().as_str())
                .bind(fields.age().as_i32())
                .bind(fold_case(fields.name()))
                .bind(fold_case(fields.email().as_str()))
                .bind(fold_case(fields.course()))
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get("id").map_err(postgres::map_sqlx_error)?
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                INSERT INTO students
                    (name, email, course, age, name_key, email_key, course_key)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                RETURNING id";
            let row = sqlx::query(query_str)
                .bind(fields.name().as_str())
                .bind(fields.email().as_str())
                .bind(fields.course().as_str())
                .bind(fields.age().as_i32())
                .bind(fold_case(fields.name()))
                .bind(fold_case(fields.email().as_str()))
                .bind(fold_case(fields.course()))
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            row.try_get("id").map_err(sqlite::map_sqlx_error)?
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    Ok(Student::new(StudentId::new(id), fields.clone()))
}

/// Gets the student identified by `id`.
pub(crate) async fn get_student(ex: &mut Executor, id: StudentId) -> DbResult<Student> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT id, name, email, course, age FROM students WHERE id = $1";
            let row = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            Student::try_from(row)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT id, name, email, course, age FROM students WHERE id = ?";
            let row = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Student::try_from(row)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Gets the student that owns `email`, if any.
pub(crate) async fn get_student_by_email(
    ex: &mut Executor,
    email: &EmailAddress,
) -> DbResult<Option<Student>> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT id, name, email, course, age FROM students WHERE email = $1";
            let maybe_row = sqlx::query(query_str)
                .bind(email.as_str())
                .fetch_optional(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            maybe_row.map(Student::try_from).transpose()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT id, name, email, course, age FROM students WHERE email = ?";
            let maybe_row = sqlx::query(query_str)
                .bind(email.as_str())
                .fetch_optional(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            maybe_row.map(Student::try_from).transpose()
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Replaces the fields of the existing student `id` with `fields`.
pub(crate) async fn update_student(
    ex: &mut Executor,
    id: StudentId,
    fields: &StudentFields,
) -> DbResult<Student> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                UPDATE students
                SET name = $1, email = $2, course = $3, age = $4,
                    name_key = $5, email_key = $6, course_key = $7
                WHERE id = $8";
            let done = sqlx::query(query_str)
                .bind(fields.name().as_str())
                .bind(fields.email().as_str())
                .bind(fields.course().as_str())
                .bind(fields.age().as_i32())
                .bind(fold_case(fields.name()))
                .bind(fold_case(fields.email().as_str()))
                .bind(fold_case(fields.course()))
                .bind(id.as_i64())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                UPDATE students
                SET name = ?, email = ?, course = ?, age = ?,
                    name_key = ?, email_key = ?, course_key = ?
                WHERE id = ?";
            let done = sqlx::query(query_str)
                .bind(fields.name().as_str())
                .bind(fields.email().as_str())
                .bind(fields.course().as_str())
                .bind(fields.age().as_i32())
                .bind(fold_case(fields.name()))
                .bind(fold_case(fields.email().as_str()))
                .bind(fold_case(fields.course()))
                .bind(id.as_i64())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    ensure_one_row(rows_affected)?;
    Ok(Student::new(id, fields.clone()))
}

/// Deletes the student identified by `id`.
pub(crate) async fn delete_student(ex: &mut Executor, id: StudentId) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "DELETE FROM students WHERE id = $1";
            let done = sqlx::query(query_str)
                .bind(id.as_i64())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "DELETE FROM students WHERE id = ?";
            let done = sqlx::query(query_str)
                .bind(id.as_i64())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    ensure_one_row(rows_affected)
}

/// Gets all students that match `filter`, sorted by `sort`.
pub(crate) async fn list_students(
    ex: &mut Executor,
    filter: &StudentFilter,
    sort: Sort,
) -> DbResult<Vec<Student>> {
    fetch_students(ex, |dialect| query::select_students(dialect, filter, sort)).await
}

/// Gets the page of students described by `request` among those that match `filter`.
pub(crate) async fn list_students_page(
    ex: &mut Executor,
    filter: &StudentFilter,
    request: &PageRequest,
) -> DbResult<Vec<Student>> {
    fetch_students(ex, |dialect| query::select_students_page(dialect, filter, request)).await
}

/// Counts the students that match `filter`.
pub(crate) async fn count_students(ex: &mut Executor, filter: &StudentFilter) -> DbResult<usize> {
    let total: i64 = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let q = query::count_students(Dialect::Postgres, filter);
            let row = q
                .build::<sqlx::Postgres>()
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get("total").map_err(postgres::map_sqlx_error)?
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let q = query::count_students(Dialect::Sqlite, filter);
            let row = q
                .build::<sqlx::Sqlite>()
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            row.try_get("total").map_err(sqlite::map_sqlx_error)?
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    count_as_usize(total)
}
