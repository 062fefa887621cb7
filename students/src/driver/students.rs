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

//! Extends the driver with the operations on collections of students.

use crate::db;
use crate::driver::Driver;
use crate::model::{Page, PageRequest, Sort, Student, StudentFilter};
use roster_core::driver::DriverResult;

impl Driver {
    /// Gets all students in creation order.
    pub(crate) async fn list_students(self) -> DriverResult<Vec<Student>> {
        self.search_students(StudentFilter::All).await
    }

    /// Gets all students that match `filter` in creation order.
    pub(crate) async fn search_students(self, filter: StudentFilter) -> DriverResult<Vec<Student>> {
        let mut ex = self.db.ex().await?;
        Ok(db::list_students(&mut ex, &filter, Sort::default()).await?)
    }

    /// Gets the page of all students described by `request`.
    pub(crate) async fn list_students_paginated(
        self,
        request: PageRequest,
    ) -> DriverResult<Page<Student>> {
        self.search_students_paginated(StudentFilter::All, request).await
    }

    /// Gets the page described by `request` of the students that match `filter`.
    pub(crate) async fn search_students_paginated(
        self,
        filter: StudentFilter,
        request: PageRequest,
    ) -> DriverResult<Page<Student>> {
        // The count and the page must come from the same snapshot.
        let mut tx = self.db.begin().await?;
        let total = db::count_students(tx.ex(), &filter).await?;
        let items = db::list_students_page(tx.ex(), &filter, &request).await?;
        tx.commit().await?;

        Ok(Page::new(items, &request, total))
    }
}
