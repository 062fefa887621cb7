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

//! API to delete an existing student.

use crate::driver::Driver;
use crate::model::StudentId;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use roster_core::rest::{EmptyBody, RestResult};

/// DELETE handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<StudentId>,
    _: EmptyBody,
) -> RestResult<StatusCode> {
    driver.delete_student(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::testutils::*;
    use axum::http;
    use roster_core::rest::testutils::OneShotBuilder;
    use roster_core::test_payload_must_be_empty;

    fn route(id: i64) -> (http::Method, String) {
        (http::Method::DELETE, format!("/api/students/{}", id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let alice = context.create_student("Alice", "a@x.com", "CS", 20).await;
        let bob = context.create_student("Bob", "b@x.com", "EE", 21).await;

        OneShotBuilder::new(context.app(), route(alice.id().as_i64()))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NO_CONTENT)
            .expect_empty()
            .await;

        assert_eq!(None, context.get_student(*alice.id()).await);
        assert_eq!(Some(bob.clone()), context.get_student(*bob.id()).await);
    }

    #[tokio::test]
    async fn test_not_found() {
        let context = TestContext::setup().await;

        context.create_student("Alice", "a@x.com", "CS", 20).await;

        OneShotBuilder::new(context.app(), route(2))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("Student not found with id: 2")
            .await;

        assert_eq!(1, context.count_students().await);
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route(1));
}
