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

//! Types that describe which students to fetch and in which order.

use roster_core::model::{ModelError, ModelResult};

/// Restriction on the students returned by a listing.
///
/// Text terms match when they are contained in the corresponding field, ignoring case.  When both
/// terms are given, a student must match both of them.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum StudentFilter {
    /// Matches every student.
    #[default]
    All,

    /// Matches students whose name contains the term.
    Name(String),

    /// Matches students whose course contains the term.
    Course(String),

    /// Matches students whose name contains the first term and whose course contains the second.
    NameAndCourse(String, String),
}

impl StudentFilter {
    /// Picks the filter to apply given the optional `name` and `course` terms.
    ///
    /// Empty terms count as present and thus match everything.
    pub fn new(name: Option<String>, course: Option<String>) -> Self {
        match (name, course) {
            (Some(name), Some(course)) => StudentFilter::NameAndCourse(name, course),
            (Some(name), None) => StudentFilter::Name(name),
            (None, Some(course)) => StudentFilter::Course(course),
            (None, None) => StudentFilter::All,
        }
    }
}

/// Field to sort students by.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SortField {
    /// Sort by identifier, which matches creation order.
    #[default]
    Id,

    /// Sort by name, ignoring case.
    Name,

    /// Sort by email address, ignoring case.
    Email,

    /// Sort by course, ignoring case.
    Course,

    /// Sort by age.
    Age,
}

impl SortField {
    /// Parses the name of a field as given by a client.
    pub fn parse(s: &str) -> ModelResult<Self> {
        match s {
            "id" => Ok(SortField::Id),
            "name" => Ok(SortField::Name),
            "email" => Ok(SortField::Email),
            "course" => Ok(SortField::Course),
            "age" => Ok(SortField::Age),
            _ => Err(ModelError(format!("Cannot sort by unknown field '{}'", s))),
        }
    }

    /// Returns the name of the database column to sort on.  Text fields map to their
    /// case-folded copies.
    pub fn column(self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Name => "name_key",
            SortField::Email => "email_key",
            SortField::Course => "course_key",
            SortField::Age => "age",
        }
    }
}

/// Direction of a sort.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SortDirection {
    /// Smallest values first.
    #[default]
    Ascending,

    /// Largest values first.
    Descending,
}

impl SortDirection {
    /// Parses a direction as given by a client.  Only `desc` in any case means descending and
    /// anything else falls back to ascending.
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("desc") {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        }
    }
}

/// Sort criteria for a listing.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Sort {
    /// Field to sort by.
    pub field: SortField,

    /// Direction to sort in.
    pub direction: SortDirection,
}

impl Sort {
    /// Creates a new sort criteria.
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

/// Window of a listing to fetch.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PageRequest {
    /// Zero-based index of the page.
    page: u32,

    /// Maximum number of items per page.  Never zero.
    size: u32,

    /// Order of the items across all pages.
    sort: Sort,
}

impl PageRequest {
    /// Creates a new page request, making sure that the page `size` is usable.
    pub fn new(page: u32, size: u32, sort: Sort) -> ModelResult<Self> {
        if size == 0 {
            return Err(ModelError("Page size must be greater than zero".to_owned()));
        }
        Ok(Self { page, size, sort })
    }

    /// Returns the zero-based index of the page.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Returns the maximum number of items per page.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Returns the order of the items.
    pub fn sort(&self) -> Sort {
        self.sort
    }

    /// Returns the number of items that precede this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

/// One page of a listing plus the details needed to navigate the rest.
#[derive(Debug, PartialEq)]
pub struct Page<T> {
    /// Items in this page.
    items: Vec<T>,

    /// Zero-based index of this page.
    page: u32,

    /// Requested maximum number of items per page.
    size: u32,

    /// Number of items across all pages.
    total: usize,
}

impl<T> Page<T> {
    /// Creates a page holding `items` fetched for `request` out of `total` matching items.
    pub fn new(items: Vec<T>, request: &PageRequest, total: usize) -> Self {
        Self { items, page: request.page, size: request.size, total }
    }

    /// Returns the items in this page.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consumes the page and returns its items.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Returns the zero-based index of this page.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Returns the requested maximum number of items per page.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Returns the number of items across all pages.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Returns the number of pages, which is at least one even if there are no items.
    pub fn total_pages(&self) -> usize {
        // `size` is never zero as guaranteed by `PageRequest`.
        let size = self.size as usize;
        self.total.div_ceil(size).max(1)
    }

    /// Returns true if there is a page after this one.
    pub fn has_next(&self) -> bool {
        (self.page as usize) + 1 < self.total_pages()
    }

    /// Returns true if there is a page before this one.
    pub fn has_previous(&self) -> bool {
        self.page > 0
    }
}
