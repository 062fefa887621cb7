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

//! API to list all students.

use crate::driver::Driver;
use crate::model::Student;
use axum::extract::State;
use axum::Json;
use roster_core::rest::{EmptyBody, RestResult};

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    _: EmptyBody,
) -> RestResult<Json<Vec<Student>>> {
    let students = driver.list_students().await?;
    Ok(Json(students))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::testutils::*;
    use axum::http;
    use roster_core::rest::testutils::OneShotBuilder;
    use roster_core::test_payload_must_be_empty;

    fn route() -> (http::Method, String) {
        (http::Method::GET, "/api/students".to_owned())
    }

    #[tokio::test]
    async fn test_empty() {
        let context = TestContext::setup().await;

        let response = OneShotBuilder::new(context.into_app(), route())
            .send_empty()
            .await
            .expect_json::<Vec<Student>>()
            .await;
        assert!(response.is_empty());
    }

    #[tokio::test]
    async fn test_some() {
        let context = TestContext::setup().await;

        let alice = context.create_student("Alice", "a@x.com", "CS", 20).await;
        let bob = context.create_student("Bob", "b@x.com", "EE", 21).await;
        let carl = context.create_student("Carl", "c@x.com", "ME", 22).await;

        let response = OneShotBuilder::new(context.into_app(), route())
            .send_empty()
            .await
            .expect_json::<Vec<Student>>()
            .await;
        assert_eq!(vec![alice, bob, carl], response);
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route());
}
