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

//! API to search for students by name and course one page at a time.

use crate::driver::Driver;
use crate::rest::params::{PageQuery, PageResponse, SearchQuery};
use axum::extract::{Query, State};
use axum::Json;
use roster_core::rest::{EmptyBody, RestResult};

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Query(search): Query<SearchQuery>,
    Query(paging): Query<PageQuery>,
    _: EmptyBody,
) -> RestResult<Json<PageResponse>> {
    let request = paging.into_request()?;
    let page = driver.search_students_paginated(search.into_filter(), request).await?;
    Ok(Json(PageResponse::from(page)))
}
