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

//! Construction of the dynamic queries used to list students.

use crate::model::{PageRequest, Sort, SortDirection, SortField, StudentFilter};
use sqlx::query::Query;
use sqlx::{Database, Encode, Type};

/// Columns returned by every query that fetches whole students.
pub(crate) const STUDENT_COLUMNS: &str = "id, name, email, course, age";

/// Placeholder syntax of the database a query is built for.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Dialect {
    /// Numbered placeholders like `$1`.
    #[cfg_attr(not(feature = "postgres"), allow(unused))]
    Postgres,

    /// Positional placeholders like `?`.
    #[cfg_attr(not(any(feature = "sqlite", test)), allow(unused))]
    Sqlite,
}

/// Value bound to a query placeholder.
#[derive(Debug, PartialEq)]
pub(crate) enum Param {
    /// A text value.
    Text(String),

    /// An integer value.
    Int(i64),
}

/// SQL text under construction along with the values of its placeholders.
#[derive(Debug)]
pub(crate) struct QueryBuf {
    /// Placeholder syntax to emit.
    dialect: Dialect,

    /// The SQL statement.
    sql: String,

    /// Values for the placeholders in `sql`, in order.
    params: Vec<Param>,
}

/// Folds the case of `s` for storage in, or comparison against, the `*_key` columns.
///
/// Folding happens here and not with SQL's `LOWER` because SQLite only folds ASCII letters.
pub(crate) fn fold_case(s: &str) -> String {
    s.to_lowercase()
}

/// Escapes the `LIKE` wildcards in `term` and wraps it to match as a substring of a `*_key`
/// column.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in fold_case(term).chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

impl QueryBuf {
    /// Starts a new query with the `sql` prefix.
    fn new(dialect: Dialect, sql: &str) -> Self {
        Self { dialect, sql: sql.to_owned(), params: vec![] }
    }

    /// Records `param` and appends its placeholder to the query.
    fn push_param(&mut self, param: Param) {
        self.params.push(param);
        match self.dialect {
            Dialect::Postgres => {
                self.sql.push('$');
                self.sql.push_str(&self.params.len().to_string());
            }
            Dialect::Sqlite => self.sql.push('?'),
        }
    }

    /// Appends a case-insensitive containment test of `term` against the case-folded `column`.
    fn push_contains(&mut self, column: &'static str, term: &str) {
        self.sql.push_str(column);
        self.sql.push_str(" LIKE ");
        self.push_param(Param::Text(contains_pattern(term)));
        self.sql.push_str(" ESCAPE '\\'");
    }

    /// Appends the `WHERE` clause for `filter`, if any.
    fn push_filter(&mut self, filter: &StudentFilter) {
        match filter {
            StudentFilter::All => (),
            StudentFilter::Name(name) => {
                self.sql.push_str(" WHERE ");
                self.push_contains("name_key", name);
            }
            StudentFilter::Course(course) => {
                self.sql.push_str(" WHERE ");
                self.push_contains("course_key", course);
            }
            StudentFilter::NameAndCourse(name, course) => {
                self.sql.push_str(" WHERE ");
                self.push_contains("name_key", name);
                self.sql.push_str(" AND ");
                self.push_contains("course_key", course);
            }
        }
    }

    /// Appends the `ORDER BY` clause for `sort`.  Ties are broken by identifier so that the
    /// order is total.
    fn push_order_by(&mut self, sort: Sort) {
        let dir = match sort.direction {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        };

        self.sql.push_str(" ORDER BY ");
        self.sql.push_str(sort.field.column());
        self.sql.push(' ');
        self.sql.push_str(dir);
        if sort.field != SortField::Id {
            self.sql.push_str(", id ASC");
        }
    }

    /// Appends the `LIMIT` and `OFFSET` clauses for `request`.
    fn push_window(&mut self, request: &PageRequest) {
        self.sql.push_str(" LIMIT ");
        self.push_param(Param::Int(i64::from(request.size())));
        self.sql.push_str(" OFFSET ");
        // Offsets beyond i64::MAX are past the end of any table, so clamping keeps them there.
        let offset = i64::try_from(request.offset()).unwrap_or(i64::MAX);
        self.push_param(Param::Int(offset));
    }

    /// Returns the SQL text of the query.
    pub(crate) fn sql(&self) -> &str {
        &self.sql
    }

    /// Returns the values bound to the placeholders of the query.
    #[cfg(test)]
    pub(crate) fn params(&self) -> &[Param] {
        &self.params
    }

    /// Creates an `sqlx` query for this text with all parameters bound.
    pub(crate) fn build<'q, DB>(&'q self) -> Query<'q, DB, <DB as Database>::Arguments<'q>>
    where
        DB: Database,
        &'q str: Encode<'q, DB> + Type<DB>,
        i64: Encode<'q, DB> + Type<DB>,
    {
        let mut query = sqlx::query::<DB>(&self.sql);
        for param in &self.params {
            query = match param {
                Param::Text(s) => query.bind(s.as_str()),
                Param::Int(i) => query.bind(*i),
            };
        }
        query
    }
}

/// Builds the query to fetch all students that match `filter`, sorted by `sort`.
pub(crate) fn select_students(dialect: Dialect, filter: &StudentFilter, sort: Sort) -> QueryBuf {
    let mut q = QueryBuf::new(dialect, &format!("SELECT {} FROM students", STUDENT_COLUMNS));
    q.push_filter(filter);
    q.push_order_by(sort);
    q
}

/// Builds the query to fetch the page of students described by `request` among those that
/// match `filter`.
pub(crate) fn select_students_page(
    dialect: Dialect,
    filter: &StudentFilter,
    request: &PageRequest,
) -> QueryBuf {
    let mut q = select_students(dialect, filter, request.sort());
    q.push_window(request);
    q
}

/// Builds the query to count the students that match `filter`.  The count is returned in the
/// `total` column.
pub(crate) fn count_students(dialect: Dialect, filter: &StudentFilter) -> QueryBuf {
    let mut q = QueryBuf::new(dialect, "SELECT COUNT(*) AS total FROM students");
    q.push_filter(filter);
    q
}
