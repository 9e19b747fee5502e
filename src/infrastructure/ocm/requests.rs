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

//! Narrow list-request seam between the pagers and the wire client

use crate::infrastructure::ocm::client::OcmConnection;
use crate::infrastructure::ocm::models::{AddonObject, ClusterObject, ListPage};
use crate::shared::error::AddonsError;
use std::sync::Arc;

/// A searchable, pageable list request.
#[async_trait::async_trait]
pub trait ListRequester: Clone + Send + Sync {
    type Item: Send;

    /// Narrow the request with a search predicate. Any predicate already set
    /// is kept and combined with `and`.
    fn search(&self, predicate: &str) -> Self;

    async fn request_page(
        &self,
        page: usize,
        size: usize,
    ) -> Result<ListPage<Self::Item>, AddonsError>;
}

/// Combine an existing predicate with a new one.
pub fn and_predicates(current: Option<&str>, next: &str) -> Option<String> {
    match (current.filter(|c| !c.is_empty()), next.trim()) {
        (None, "") => None,
        (None, next) => Some(next.to_string()),
        (Some(current), "") => Some(current.to_string()),
        (Some(current), next) => Some(format!("({}) and ({})", current, next)),
    }
}

#[derive(Clone)]
pub struct ClustersListRequest {
    conn: Arc<dyn OcmConnection>,
    search: Option<String>,
}

impl ClustersListRequest {
    pub fn new(conn: Arc<dyn OcmConnection>) -> Self {
        Self { conn, search: None }
    }

    pub fn predicate(&self) -> Option<&str> {
        self.search.as_deref()
    }
}

#[async_trait::async_trait]
impl ListRequester for ClustersListRequest {
    type Item = ClusterObject;

    fn search(&self, predicate: &str) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
            search: and_predicates(self.search.as_deref(), predicate),
        }
    }

    async fn request_page(
        &self,
        page: usize,
        size: usize,
    ) -> Result<ListPage<ClusterObject>, AddonsError> {
        self.conn
            .list_clusters(self.search.as_deref(), page, size)
            .await
    }
}

#[derive(Clone)]
pub struct AddonsListRequest {
    conn: Arc<dyn OcmConnection>,
    search: Option<String>,
}

impl AddonsListRequest {
    pub fn new(conn: Arc<dyn OcmConnection>) -> Self {
        Self { conn, search: None }
    }

    pub fn predicate(&self) -> Option<&str> {
        self.search.as_deref()
    }
}

#[async_trait::async_trait]
impl ListRequester for AddonsListRequest {
    type Item = AddonObject;

    fn search(&self, predicate: &str) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
            search: and_predicates(self.search.as_deref(), predicate),
        }
    }

    async fn request_page(
        &self,
        page: usize,
        size: usize,
    ) -> Result<ListPage<AddonObject>, AddonsError> {
        self.conn.list_addons(self.search.as_deref(), page, size).await
    }
}
