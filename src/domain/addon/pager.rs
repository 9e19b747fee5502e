// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::addon::Addon;
use crate::domain::pager::Pager;
use crate::domain::query::{any_of, in_set, like_contains};
use crate::infrastructure::ocm::{AddonsListRequest, OcmConnection};
use std::sync::Arc;
use tracing::Span;

pub type AddonPager = Pager<AddonsListRequest, Addon>;

impl Pager<AddonsListRequest, Addon> {
    /// Pager over the full add-on catalog.
    pub fn retrieve(conn: Arc<dyn OcmConnection>, span: Span) -> Self {
        let request = AddonsListRequest::new(Arc::clone(&conn));
        let decode_span = span.clone();

        Pager::new(request, span, move |object| {
            Addon::new(object, Arc::clone(&conn), decode_span.clone())
        })
    }

    /// Narrow to add-ons whose name or ID contains `pattern`. An empty
    /// pattern leaves the pager unchanged.
    pub fn search_by_name_or_id(self, pattern: &str) -> Self {
        if pattern.is_empty() {
            return self;
        }

        let predicate = any_of(&[like_contains("name", pattern), like_contains("id", pattern)]);

        self.search(&predicate)
    }

    /// Narrow to the given add-on IDs. No IDs leaves the pager unchanged.
    pub fn find_by_ids<S: AsRef<str>>(self, ids: &[S]) -> Self {
        if ids.is_empty() {
            return self;
        }

        self.search(&in_set("id", ids))
    }
}
