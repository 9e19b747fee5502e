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

//! In-memory [`OcmConnection`] for unit tests. Search predicates are
//! recorded but not evaluated.

use crate::infrastructure::ocm::client::OcmConnection;
use crate::infrastructure::ocm::models::{
    AddonInstallationObject, AddonObject, AddonVersionObject, ClusterObject, ListPage,
    LogEntryObject, NewLogEntryObject, SubscriptionObject,
};
use crate::shared::error::AddonsError;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub struct MemoryConnection {
    pub clusters: Vec<ClusterObject>,
    pub addons: Vec<AddonObject>,
    pub installations: HashMap<String, Vec<AddonInstallationObject>>,
    pub subscriptions: HashMap<String, SubscriptionObject>,
    pub versions: HashMap<(String, String), AddonVersionObject>,
    pub logs: Vec<LogEntryObject>,
    pub fail_installations: bool,
    pub posted: Mutex<Vec<NewLogEntryObject>>,
    pub searches: Mutex<Vec<String>>,
    pub cluster_pages: AtomicUsize,
    pub addon_pages: AtomicUsize,
}

impl MemoryConnection {
    pub fn cluster_page_requests(&self) -> usize {
        self.cluster_pages.load(Ordering::SeqCst)
    }

    pub fn addon_page_requests(&self) -> usize {
        self.addon_pages.load(Ordering::SeqCst)
    }

    fn record(&self, search: Option<&str>) {
        if let Some(s) = search {
            self.searches.lock().unwrap().push(s.to_string());
        }
    }

    fn not_found(what: &str) -> AddonsError {
        AddonsError::Api {
            status: 404,
            code: "TEST-404".to_string(),
            reason: format!("{} not found", what),
        }
    }
}

fn slice_page<T: Clone>(items: &[T], page: usize, size: usize) -> ListPage<T> {
    let start = (page.saturating_sub(1) * size).min(items.len());
    let end = (start + size).min(items.len());
    ListPage::new(page, items[start..end].to_vec(), Some(items.len()))
}

#[async_trait::async_trait]
impl OcmConnection for MemoryConnection {
    async fn list_clusters(
        &self,
        search: Option<&str>,
        page: usize,
        size: usize,
    ) -> Result<ListPage<ClusterObject>, AddonsError> {
        self.cluster_pages.fetch_add(1, Ordering::SeqCst);
        self.record(search);
        Ok(slice_page(&self.clusters, page, size))
    }

    async fn list_addons(
        &self,
        search: Option<&str>,
        page: usize,
        size: usize,
    ) -> Result<ListPage<AddonObject>, AddonsError> {
        self.addon_pages.fetch_add(1, Ordering::SeqCst);
        self.record(search);
        Ok(slice_page(&self.addons, page, size))
    }

    async fn list_cluster_addon_installations(
        &self,
        cluster_id: &str,
    ) -> Result<Vec<AddonInstallationObject>, AddonsError> {
        if self.fail_installations {
            return Err(AddonsError::Api {
                status: 500,
                code: "TEST-500".to_string(),
                reason: "installations unavailable".to_string(),
            });
        }

        Ok(self
            .installations
            .get(cluster_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_subscription(&self, id: &str) -> Result<SubscriptionObject, AddonsError> {
        self.subscriptions
            .get(id)
            .cloned()
            .ok_or_else(|| Self::not_found("subscription"))
    }

    async fn get_addon_version(
        &self,
        addon_id: &str,
        version_id: &str,
    ) -> Result<AddonVersionObject, AddonsError> {
        self.versions
            .get(&(addon_id.to_string(), version_id.to_string()))
            .cloned()
            .ok_or_else(|| Self::not_found("addon version"))
    }

    async fn list_cluster_logs(
        &self,
        cluster_uuid: &str,
        search: Option<&str>,
    ) -> Result<Vec<LogEntryObject>, AddonsError> {
        self.record(search);
        Ok(self
            .logs
            .iter()
            .filter(|l| l.cluster_uuid == cluster_uuid)
            .cloned()
            .collect())
    }

    async fn add_cluster_log(&self, entry: &NewLogEntryObject) -> Result<(), AddonsError> {
        self.posted.lock().unwrap().push(entry.clone());
        Ok(())
    }
}
