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

//! API to get a single student.

use crate::driver::Driver;
use crate::model::{Student, StudentId};
use axum::extract::{Path, State};
use axum::Json;
use roster_core::rest::{EmptyBody, RestResult};

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<StudentId>,
    _: EmptyBody,
) -> RestResult<Json<Student>> {
    let student = driver.get_student(id).await?;
    Ok(Json(student))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::testutils::*;
    use axum::http;
    use roster_core::rest::testutils::OneShotBuilder;
    use roster_core::test_payload_must_be_empty;

    fn route(id: i64) -> (http::Method, String) {
        (http::Method::GET, format!("/api/students/{}", id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let alice = context.create_student("Alice", "a@x.com", "CS", 20).await;
        let bob = context.create_student("Bob", "b@x.com", "EE", 21).await;

        let response = OneShotBuilder::new(context.app(), route(alice.id().as_i64()))
            .send_empty()
            .await
            .expect_json::<Student>()
            .await;
        assert_eq!(alice, response);

        let response = OneShotBuilder::new(context.app(), route(bob.id().as_i64()))
            .send_empty()
            .await
            .expect_json::<Student>()
            .await;
        assert_eq!(bob, response);
    }

    #[tokio::test]
    async fn test_not_found() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.into_app(), route(123))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("Student not found with id: 123")
            .await;
    }

    #[tokio::test]
    async fn test_bad_id() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.into_app(), (http::Method::GET, "/api/students/abc"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_text("Invalid URL")
            .await;
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route(1));
}
