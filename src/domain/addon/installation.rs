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
use crate::domain::cluster::ClusterContext;
use crate::infrastructure::ocm::models::AddonInstallationObject;
use crate::shared::row::{merge_prefixed, opt_time, ProvideRowData, RowData};

/// An add-on installed on a cluster, joined with both sides' metadata.
#[derive(Debug, Clone)]
pub struct AddonInstallation {
    object: AddonInstallationObject,
    addon: Addon,
    cluster: ClusterContext,
}

impl AddonInstallation {
    pub fn new(object: AddonInstallationObject, addon: Addon, cluster: ClusterContext) -> Self {
        Self {
            object,
            addon,
            cluster,
        }
    }

    pub fn id(&self) -> &str {
        self.addon.id()
    }

    pub fn name(&self) -> &str {
        self.addon.name()
    }

    pub fn state(&self) -> &str {
        &self.object.state
    }

    pub fn addon(&self) -> &Addon {
        &self.addon
    }

    pub fn cluster(&self) -> &ClusterContext {
        &self.cluster
    }

    fn parameters(&self) -> String {
        match &self.object.parameters {
            None => "None".to_string(),
            Some(params) => params
                .items
                .iter()
                .map(|p| format!("{}: {}", p.id, p.value))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

impl ProvideRowData for AddonInstallation {
    fn provide_row_data(&self) -> RowData {
        let mut row = RowData::from([
            (
                "Creation Timestamp".to_string(),
                opt_time(&self.object.creation_timestamp),
            ),
            (
                "Installed Version ID".to_string(),
                self.object.addon_version.id.clone(),
            ),
            (
                "Operator Version".to_string(),
                self.object.operator_version.clone(),
            ),
            ("Parameters".to_string(), self.parameters()),
            ("State".to_string(), self.object.state.clone()),
            (
                "State Description".to_string(),
                self.object.state_description.clone(),
            ),
            (
                "Updated Timestamp".to_string(),
                opt_time(&self.object.updated_timestamp),
            ),
        ]);

        merge_prefixed(&mut row, "Addon ", self.addon.provide_row_data());
        merge_prefixed(&mut row, "Cluster ", self.cluster.provide_row_data());

        row
    }
}

/// Installations joined for one cluster, in catalog order.
#[derive(Debug, Clone, Default)]
pub struct AddonInstallations(Vec<AddonInstallation>);

impl AddonInstallations {
    pub fn new(installations: Vec<AddonInstallation>) -> Self {
        Self(installations)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AddonInstallation> {
        self.0.iter()
    }

    /// Keep installations whose add-on name or ID contains `pattern`.
    pub fn matching(self, pattern: &str) -> Self {
        Self(
            self.0
                .into_iter()
                .filter(|i| i.name().contains(pattern) || i.id().contains(pattern))
                .collect(),
        )
    }
}

impl IntoIterator for AddonInstallations {
    type Item = AddonInstallation;
    type IntoIter = std::vec::IntoIter<AddonInstallation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a AddonInstallations {
    type Item = &'a AddonInstallation;
    type IntoIter = std::slice::Iter<'a, AddonInstallation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
