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

use crate::infrastructure::constants::{
    ACCOUNTS_MGMT_PATH, CLUSTERS_MGMT_PATH, SERVICE_LOGS_PATH, USER_AGENT,
};
use crate::infrastructure::ocm::models::{
    AddonInstallationObject, AddonObject, AddonVersionObject, ApiErrorBody, ClusterObject,
    ListPage, LogEntryObject, NewLogEntryObject, SubscriptionObject,
};
use crate::shared::error::AddonsError;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

/// Requests this plug-in makes against OCM. Every call is a single round-trip.
#[async_trait::async_trait]
pub trait OcmConnection: Send + Sync {
    async fn list_clusters(
        &self,
        search: Option<&str>,
        page: usize,
        size: usize,
    ) -> Result<ListPage<ClusterObject>, AddonsError>;

    async fn list_addons(
        &self,
        search: Option<&str>,
        page: usize,
        size: usize,
    ) -> Result<ListPage<AddonObject>, AddonsError>;

    async fn list_cluster_addon_installations(
        &self,
        cluster_id: &str,
    ) -> Result<Vec<AddonInstallationObject>, AddonsError>;

    async fn get_subscription(&self, id: &str) -> Result<SubscriptionObject, AddonsError>;

    async fn get_addon_version(
        &self,
        addon_id: &str,
        version_id: &str,
    ) -> Result<AddonVersionObject, AddonsError>;

    async fn list_cluster_logs(
        &self,
        cluster_uuid: &str,
        search: Option<&str>,
    ) -> Result<Vec<LogEntryObject>, AddonsError>;

    async fn add_cluster_log(&self, entry: &NewLogEntryObject) -> Result<(), AddonsError>;
}

/// reqwest-backed connection authenticated with a bearer token.
pub struct OcmClient {
    client: Client,
    base_url: Url,
    token: String,
}

impl OcmClient {
    pub fn new(base_url: &str, token: impl Into<String>) -> Result<Self, AddonsError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Self::with_client(client, base_url, token)
    }

    pub fn with_client(
        client: Client,
        base_url: &str,
        token: impl Into<String>,
    ) -> Result<Self, AddonsError> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(AddonsError::config_error(format!(
                "OCM URL '{}' cannot be used as a base URL",
                base_url
            )));
        }

        Ok(Self {
            client,
            base_url,
            token: token.into(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, api_path: &str, segments: &[&str]) -> Result<Url, AddonsError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                AddonsError::config_error(format!("invalid OCM URL '{}'", self.base_url))
            })?;
            path.pop_if_empty();
            path.extend(api_path.split('/').filter(|s| !s.is_empty()));
            path.extend(segments);
        }
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, AddonsError> {
        let request = request.bearer_auth(&self.token).build()?;
        let endpoint = request.url().path().to_string();

        trace!(method = %request.method(), url = %request.url(), "sending request");

        let response = self.client.execute(request).await?;
        let status = response.status();
        let body = response.bytes().await?;

        debug!(%status, endpoint = %endpoint, bytes = body.len(), "received response");

        if !status.is_success() {
            return Err(api_error(status.as_u16(), &body));
        }

        if body.is_empty() {
            return serde_json::from_slice(b"null")
                .map_err(|e| AddonsError::decode(&endpoint, e));
        }

        serde_json::from_slice(&body).map_err(|e| AddonsError::decode(&endpoint, e))
    }

    async fn list_page<T: DeserializeOwned>(
        &self,
        url: Url,
        search: Option<&str>,
        page: usize,
        size: usize,
    ) -> Result<ListPage<T>, AddonsError> {
        let mut query = vec![("page", page.to_string()), ("size", size.to_string())];
        if let Some(search) = search.filter(|s| !s.is_empty()) {
            query.push(("search", search.to_string()));
        }

        self.send(self.client.get(url).query(&query)).await
    }
}

fn api_error(status: u16, body: &[u8]) -> AddonsError {
    match serde_json::from_slice::<ApiErrorBody>(body) {
        Ok(err) if !err.reason.is_empty() => AddonsError::Api {
            status,
            code: err.code,
            reason: err.reason,
        },
        _ => AddonsError::Api {
            status,
            code: String::new(),
            reason: String::from_utf8_lossy(body).trim().to_string(),
        },
    }
}

#[async_trait::async_trait]
impl OcmConnection for OcmClient {
    async fn list_clusters(
        &self,
        search: Option<&str>,
        page: usize,
        size: usize,
    ) -> Result<ListPage<ClusterObject>, AddonsError> {
        let url = self.endpoint(CLUSTERS_MGMT_PATH, &["clusters"])?;
        self.list_page(url, search, page, size).await
    }

    async fn list_addons(
        &self,
        search: Option<&str>,
        page: usize,
        size: usize,
    ) -> Result<ListPage<AddonObject>, AddonsError> {
        let url = self.endpoint(CLUSTERS_MGMT_PATH, &["addons"])?;
        self.list_page(url, search, page, size).await
    }

    async fn list_cluster_addon_installations(
        &self,
        cluster_id: &str,
    ) -> Result<Vec<AddonInstallationObject>, AddonsError> {
        let url = self.endpoint(CLUSTERS_MGMT_PATH, &["clusters", cluster_id, "addons"])?;
        let page: ListPage<AddonInstallationObject> = self.send(self.client.get(url)).await?;
        Ok(page.items)
    }

    async fn get_subscription(&self, id: &str) -> Result<SubscriptionObject, AddonsError> {
        let url = self.endpoint(ACCOUNTS_MGMT_PATH, &["subscriptions", id])?;
        self.send(self.client.get(url).query(&[("fetchAccounts", "true")]))
            .await
    }

    async fn get_addon_version(
        &self,
        addon_id: &str,
        version_id: &str,
    ) -> Result<AddonVersionObject, AddonsError> {
        let url = self.endpoint(
            CLUSTERS_MGMT_PATH,
            &["addons", addon_id, "versions", version_id],
        )?;
        self.send(self.client.get(url)).await
    }

    async fn list_cluster_logs(
        &self,
        cluster_uuid: &str,
        search: Option<&str>,
    ) -> Result<Vec<LogEntryObject>, AddonsError> {
        let url = self.endpoint(
            SERVICE_LOGS_PATH,
            &["clusters", cluster_uuid, "cluster_logs"],
        )?;

        let mut request = self.client.get(url);
        if let Some(search) = search.filter(|s| !s.is_empty()) {
            request = request.query(&[("search", search)]);
        }

        let page: ListPage<LogEntryObject> = self.send(request).await?;
        Ok(page.items)
    }

    async fn add_cluster_log(&self, entry: &NewLogEntryObject) -> Result<(), AddonsError> {
        let url = self.endpoint(SERVICE_LOGS_PATH, &["cluster_logs"])?;
        let _: serde_json::Value = self.send(self.client.post(url).json(entry)).await?;
        Ok(())
    }
}
