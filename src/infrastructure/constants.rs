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

/// Paging
pub const DEFAULT_PAGE_SIZE: usize = 50;
pub const MAX_PAGE_SIZE: usize = 100;

/// Time format accepted by OCM search queries and by the --before/--after flags
pub const OCM_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Backup suffix format used when swapping the plug-in binary
pub const BACKUP_TIME_FORMAT: &str = "%Y.%m.%d_%H:%M:%S";

/// OCM endpoints and defaults
pub const DEFAULT_OCM_URL: &str = "https://api.openshift.com";
pub const DEFAULT_TOKEN_URL: &str =
    "https://sso.redhat.com/auth/realms/redhat-external/protocol/openid-connect/token";
pub const DEFAULT_CLIENT_ID: &str = "cloud-services";

pub const CLUSTERS_MGMT_PATH: &str = "/api/clusters_mgmt/v1";
pub const ACCOUNTS_MGMT_PATH: &str = "/api/accounts_mgmt/v1";
pub const SERVICE_LOGS_PATH: &str = "/api/service_logs/v1";

/// Config file locations
pub const OCM_CONFIG_ENV: &str = "OCM_CONFIG";
pub const OCM_CONFIG_DIR: &str = "ocm";
pub const OCM_CONFIG_FILE: &str = "ocm.json";
pub const PLUGIN_CONFIG_ENV: &str = "OCM_ADDONS_CONFIG";
pub const PLUGIN_CONFIG_DIR: &str = "ocm-addons";
pub const PLUGIN_CONFIG_FILE: &str = "config.toml";

/// Notifications
pub const DEFAULT_SERVICE_NAME: &str = "SREManualAction";

/// Self-update source
pub const GITHUB_API_URL: &str = "https://api.github.com";
pub const GITHUB_ORGANIZATION: &str = "mt-sre";
pub const GITHUB_REPOSITORY: &str = "ocm-addons";
pub const PLUGIN_BINARY: &str = "ocm-addons";
pub const BINARY_MODE: u32 = 0o755;

/// Default columns per command
pub const COLUMNS_ADDON_LIST: &str = "id, name, enabled";
pub const COLUMNS_CLUSTER_INFO: &str =
    "id, external_id, name, organization_id, product_id, installed_addons, dns_base_domain";
pub const COLUMNS_CLUSTER_EVENTS: &str = "timestamp, cluster_uuid, severity, summary";
pub const COLUMNS_INSTALLATIONS: &str =
    "addon_id, addon_name, installed_version_id, cluster_id, cluster_name, cluster_state, state";
pub const COLUMNS_NOTIFICATIONS: &str = "team, product, id, severity, summary";

/// HTTP user agent
pub const USER_AGENT: &str = concat!("ocm-addons/", env!("CARGO_PKG_VERSION"));
