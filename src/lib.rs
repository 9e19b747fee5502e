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

// Core modules
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod shared;

// Re-export commonly used types
pub use domain::addon::{Addon, AddonInstallation, AddonInstallations, AddonPager};
pub use domain::cluster::{Cluster, ClusterPager, JoinReport, Subscription};
pub use domain::config::{OcmConfig, PluginConfig};
pub use domain::logs::{GetLogsOptions, LogEntry, LogLevel, Order};
pub use domain::notification::{NotificationConfig, NotificationId, NotificationTree};
pub use domain::pager::{Page, Pager};
pub use domain::update::VersionUpdater;
pub use infrastructure::ocm::{ListRequester, OcmClient, OcmConnection};
pub use infrastructure::scm::GitHubClient;
pub use shared::{AddonsError, Result};
