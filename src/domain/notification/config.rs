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

use crate::domain::logs::LogLevel;
use crate::infrastructure::constants::DEFAULT_SERVICE_NAME;
use crate::infrastructure::ocm::models::NewLogEntryObject;
use crate::shared::error::AddonsError;
use crate::shared::row::{ProvideRowData, RowData};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

fn default_service_name() -> String {
    DEFAULT_SERVICE_NAME.to_string()
}

fn ends_with_word_char() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\w$").unwrap_or_else(|_| unreachable!()))
}

/// A customer notification that can be posted to a cluster's service log.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NotificationConfig {
    pub summary: String,
    pub description: String,
    pub severity: String,
    #[serde(rename = "serviceName", default = "default_service_name")]
    pub service_name: String,
    #[serde(rename = "internalOnly", default)]
    pub internal_only: bool,
}

impl NotificationConfig {
    /// Check required fields, severity and description format.
    pub fn validate(&self) -> Result<(), String> {
        if self.summary.trim().is_empty() {
            return Err("summary is required".to_string());
        }

        if self.description.trim().is_empty() {
            return Err("description is required".to_string());
        }

        if !ends_with_word_char().is_match(&self.description) {
            return Err(
                "description must end with a letter, digit or underscore".to_string(),
            );
        }

        if !LogLevel::ALL.iter().any(|l| l.as_str() == self.severity) {
            return Err(format!(
                "severity '{}' must be one of: Debug, Info, Warning, Error, Fatal",
                self.severity
            ));
        }

        Ok(())
    }

    /// Service-log body for the cluster identified by `cluster_id` and
    /// `cluster_uuid` (the external ID).
    pub fn to_log_entry(&self, cluster_id: &str, cluster_uuid: &str) -> NewLogEntryObject {
        NewLogEntryObject {
            cluster_id: cluster_id.to_string(),
            cluster_uuid: cluster_uuid.to_string(),
            description: self.description.clone(),
            internal_only: self.internal_only,
            service_name: self.service_name.clone(),
            severity: self.severity.clone(),
            summary: self.summary.clone(),
        }
    }
}

impl ProvideRowData for NotificationConfig {
    fn provide_row_data(&self) -> RowData {
        RowData::from([
            ("Description".to_string(), self.description.clone()),
            ("Internal Only".to_string(), self.internal_only.to_string()),
            ("Service Name".to_string(), self.service_name.clone()),
            ("Severity".to_string(), self.severity.clone()),
            ("Summary".to_string(), self.summary.clone()),
        ])
    }
}

/// `team/product/id` address of a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationId {
    pub team: String,
    pub product: String,
    pub id: String,
}

impl FromStr for NotificationId {
    type Err = AddonsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, '/');

        match (parts.next(), parts.next(), parts.next()) {
            (Some(team), Some(product), Some(id))
                if !team.is_empty() && !product.is_empty() && !id.is_empty() =>
            {
                Ok(Self {
                    team: team.to_string(),
                    product: product.to_string(),
                    id: id.to_string(),
                })
            }
            _ => Err(AddonsError::invalid_argument(format!(
                "invalid notification ID '{}' (expected TEAM/PRODUCT/ID)",
                s
            ))),
        }
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.team, self.product, self.id)
    }
}
