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

//! REST interface for the student records service.

use crate::driver::Driver;
use axum::Router;

mod params;
mod student_delete;
mod student_get;
mod student_post;
mod student_put;
mod students_get;
mod students_paginated_get;
mod students_paginated_search_get;
mod students_search_get;
#[cfg(test)]
mod testutils;

/// Creates the router for the application.
pub(crate) fn app(driver: Driver) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/api/students", get(students_get::handler).post(student_post::handler))
        .route("/api/students/search", get(students_search_get::handler))
        .route("/api/students/paginated", get(students_paginated_get::handler))
        .route("/api/students/paginated/search", get(students_paginated_search_get::handler))
        .route(
            "/api/students/:id",
            get(student_get::handler).put(student_put::handler).delete(student_delete::handler),
        )
        .with_state(driver)
}
