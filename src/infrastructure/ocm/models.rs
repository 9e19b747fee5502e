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

//! Wire types for the OCM REST API
//!
//! Only the fields this plug-in reads are modelled. Every field defaults so
//! that sparse objects returned by the API still decode.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One page of a list endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListPage<T> {
    pub kind: String,
    pub page: usize,
    pub size: usize,
    pub total: Option<usize>,
    pub items: Vec<T>,
}

impl<T> Default for ListPage<T> {
    fn default() -> Self {
        Self {
            kind: String::new(),
            page: 0,
            size: 0,
            total: None,
            items: Vec::new(),
        }
    }
}

impl<T> ListPage<T> {
    pub fn new(page: usize, items: Vec<T>, total: Option<usize>) -> Self {
        Self {
            kind: String::new(),
            page,
            size: items.len(),
            total,
            items,
        }
    }
}

/// Error body returned by OCM for non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiErrorBody {
    pub kind: String,
    pub id: String,
    pub code: String,
    pub reason: String,
    pub operation_id: String,
}

/// A bare `{ "id": ... }` link to another resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ObjectRef {
    pub id: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ProductRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CloudProviderRef {
    pub id: String,
    pub name: String,
    pub display_name: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ClusterApi {
    pub url: String,
    pub listening: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ClusterConsole {
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ClusterCcs {
    pub enabled: bool,
    pub disable_scp_checks: bool,
    pub id: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ClusterDns {
    pub base_domain: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ClusterNetwork {
    #[serde(rename = "type")]
    pub network_type: String,
    pub host_prefix: Option<u32>,
    pub machine_cidr: String,
    pub pod_cidr: String,
    pub service_cidr: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ClusterProxy {
    pub http_proxy: String,
    pub https_proxy: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ClusterObject {
    pub id: String,
    pub external_id: String,
    pub name: String,
    pub state: String,
    pub health_state: String,
    pub openshift_version: String,
    pub billing_model: String,
    pub managed: bool,
    pub multi_az: bool,
    pub fips: bool,
    pub etcd_encryption: bool,
    pub disable_user_workload_monitoring: bool,
    pub additional_trust_bundle: String,
    pub load_balancer_quota: Option<u32>,
    pub creation_timestamp: Option<DateTime<Utc>>,
    pub expiration_timestamp: Option<DateTime<Utc>>,
    pub cloud_provider: CloudProviderRef,
    pub region: ObjectRef,
    pub product: ProductRef,
    pub subscription: ObjectRef,
    pub api: ClusterApi,
    pub console: ClusterConsole,
    pub ccs: ClusterCcs,
    pub dns: ClusterDns,
    pub network: ClusterNetwork,
    pub proxy: ClusterProxy,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AddonObject {
    pub id: String,
    pub name: String,
    pub description: String,
    pub docs_link: String,
    pub enabled: bool,
    pub hidden: bool,
    pub has_external_resources: bool,
    pub install_mode: String,
    pub label: String,
    pub operator_name: String,
    pub resource_cost: Option<f64>,
    pub resource_name: String,
    pub target_namespace: String,
    pub version: ObjectRef,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AddonVersionObject {
    pub id: String,
    pub available_upgrades: Vec<String>,
    pub channel: String,
    pub enabled: bool,
    pub source_image: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct InstallationParameter {
    pub id: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct InstallationParameters {
    pub items: Vec<InstallationParameter>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AddonInstallationObject {
    pub id: String,
    pub addon: ObjectRef,
    pub addon_version: ObjectRef,
    pub state: String,
    pub state_description: String,
    pub operator_version: String,
    pub creation_timestamp: Option<DateTime<Utc>>,
    pub updated_timestamp: Option<DateTime<Utc>>,
    pub parameters: Option<InstallationParameters>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Account {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SubscriptionObject {
    pub id: String,
    pub creator: Account,
    pub organization_id: String,
    pub support_level: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LogEntryObject {
    pub id: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub severity: String,
    pub summary: String,
    pub description: String,
    pub service_name: String,
    pub cluster_id: String,
    pub cluster_uuid: String,
    pub username: String,
    pub internal_only: bool,
}

/// Body posted to the cluster_logs endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewLogEntryObject {
    pub cluster_id: String,
    pub cluster_uuid: String,
    pub description: String,
    pub internal_only: bool,
    pub service_name: String,
    pub severity: String,
    pub summary: String,
}
