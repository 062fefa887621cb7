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

//! Query parameters and response bodies shared by the listing APIs.

use crate::model::{Page, PageRequest, Sort, SortDirection, SortField, Student, StudentFilter};
use roster_core::rest::RestResult;
use serde::{Deserialize, Serialize};

/// Page index used when the client does not specify one.
const DEFAULT_PAGE: u32 = 0;

/// Page size used when the client does not specify one.
const DEFAULT_SIZE: u32 = 10;

/// Sort field used when the client does not specify one.
const DEFAULT_SORT_BY: &str = "id";

/// Sort direction used when the client does not specify one.
const DEFAULT_SORT_DIR: &str = "asc";

/// Optional search terms accepted by the search APIs.
#[derive(Debug, Default, Deserialize)]
#[cfg_attr(test, derive(Serialize))]
pub(crate) struct SearchQuery {
    /// Substring to look for in names.
    #[cfg_attr(test, serde(skip_serializing_if = "Option::is_none"))]
    pub(crate) name: Option<String>,

    /// Substring to look for in courses.
    #[cfg_attr(test, serde(skip_serializing_if = "Option::is_none"))]
    pub(crate) course: Option<String>,
}

impl SearchQuery {
    /// Converts the search terms into a filter.
    pub(crate) fn into_filter(self) -> StudentFilter {
        StudentFilter::new(self.name, self.course)
    }
}

/// Pagination parameters accepted by the paginated APIs.
#[derive(Debug, Default, Deserialize)]
#[cfg_attr(test, derive(Serialize))]
#[serde(rename_all = "camelCase")]
pub(crate) struct PageQuery {
    /// Zero-based index of the page to return.
    #[cfg_attr(test, serde(skip_serializing_if = "Option::is_none"))]
    pub(crate) page: Option<u32>,

    /// Maximum number of students per page.
    #[cfg_attr(test, serde(skip_serializing_if = "Option::is_none"))]
    pub(crate) size: Option<u32>,

    /// Name of the field to sort by.
    #[cfg_attr(test, serde(skip_serializing_if = "Option::is_none"))]
    pub(crate) sort_by: Option<String>,

    /// Direction of the sort: `desc` for descending and anything else for ascending.
    #[cfg_attr(test, serde(skip_serializing_if = "Option::is_none"))]
    pub(crate) sort_dir: Option<String>,
}

impl PageQuery {
    /// Validates the parameters and converts them into a page request, applying defaults for
    /// the missing ones.
    pub(crate) fn into_request(self) -> RestResult<PageRequest> {
        let field = SortField::parse(self.sort_by.as_deref().unwrap_or(DEFAULT_SORT_BY))?;
        let direction = SortDirection::parse(self.sort_dir.as_deref().unwrap_or(DEFAULT_SORT_DIR));
        let request = PageRequest::new(
            self.page.unwrap_or(DEFAULT_PAGE),
            self.size.unwrap_or(DEFAULT_SIZE),
            Sort::new(field, direction),
        )?;
        Ok(request)
    }
}

/// Page envelope returned by the paginated APIs.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
#[serde(rename_all = "camelCase")]
pub(crate) struct PageResponse {
    /// Students in this page.
    pub(crate) students: Vec<Student>,

    /// Zero-based index of this page.
    pub(crate) current_page: u32,

    /// Number of students across all pages.
    pub(crate) total_items: usize,

    /// Number of pages, at least one.
    pub(crate) total_pages: usize,

    /// Requested maximum number of students per page.
    pub(crate) page_size: u32,

    /// Whether there is a page after this one.
    pub(crate) has_next: bool,

    /// Whether there is a page before this one.
    pub(crate) has_previous: bool,
}

impl From<Page<Student>> for PageResponse {
    fn from(page: Page<Student>) -> Self {
        Self {
            current_page: page.page(),
            total_items: page.total(),
            total_pages: page.total_pages(),
            page_size: page.size(),
            has_next: page.has_next(),
            has_previous: page.has_previous(),
            students: page.into_items(),
        }
    }
}
