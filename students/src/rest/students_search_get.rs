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

//! API to search for students by name and course.

use crate::driver::Driver;
use crate::model::Student;
use crate::rest::params::SearchQuery;
use axum::extract::{Query, State};
use axum::Json;
use roster_core::rest::{EmptyBody, RestResult};

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Query(query): Query<SearchQuery>,
    _: EmptyBody,
) -> RestResult<Json<Vec<Student>>> {
    let students = driver.search_students(query.into_filter()).await?;
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
        (http::Method::GET, "/api/students/search".to_owned())
    }

    /// Builds the query to send given optional `name` and `course` terms.
    fn query(name: Option<&str>, course: Option<&str>) -> SearchQuery {
        SearchQuery { name: name.map(str::to_owned), course: course.map(str::to_owned) }
    }

    #[tokio::test]
    async fn test_filters() {
        let context = TestContext::setup().await;

        let ann = context.create_student("Ann", "ann@x.com", "Computer Science", 20).await;
        let joanne = context.create_student("Joanne", "jo@x.com", "Physics", 21).await;
        let bob = context.create_student("Bob", "bob@x.com", "computer engineering", 22).await;

        for (q, exp) in [
            (query(None, None), vec![ann.clone(), joanne.clone(), bob.clone()]),
            (query(Some("Ann"), None), vec![ann.clone(), joanne.clone()]),
            (query(None, Some("COMPUTER")), vec![ann.clone(), bob.clone()]),
            (query(Some("ann"), Some("computer")), vec![ann.clone()]),
            (query(Some("bob"), Some("physics")), vec![]),
            (query(Some(""), None), vec![ann.clone(), joanne.clone(), bob.clone()]),
            (query(Some("50%"), None), vec![]),
        ] {
            let response = OneShotBuilder::new(context.app(), route())
                .with_query(&q)
                .send_empty()
                .await
                .expect_json::<Vec<Student>>()
                .await;
            assert_eq!(exp, response, "query {:?}", q);
        }
    }

    #[tokio::test]
    async fn test_non_ascii_ignores_case() {
        let context = TestContext::setup().await;

        let elodie = context.create_student("Élodie", "e@x.com", "Économie", 20).await;
        context.create_student("Eve", "v@x.com", "Art", 21).await;

        for q in [query(Some("élodie"), None), query(None, Some("ÉCON"))] {
            let response = OneShotBuilder::new(context.app(), route())
                .with_query(&q)
                .send_empty()
                .await
                .expect_json::<Vec<Student>>()
                .await;
            assert_eq!(vec![elodie.clone()], response, "query {:?}", q);
        }
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route());
}
