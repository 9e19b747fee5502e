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

use crate::infrastructure::ocm::models::{AddonObject, AddonVersionObject};
use crate::infrastructure::ocm::OcmConnection;
use crate::shared::error::Result;
use crate::shared::row::{merge_prefixed, opt_display, ProvideRowData, RowData};
use std::sync::Arc;
use tracing::{trace, Instrument, Span};

/// An add-on from the OCM catalog.
#[derive(Clone)]
pub struct Addon {
    object: Arc<AddonObject>,
    version: Option<Arc<AddonVersionObject>>,
    conn: Arc<dyn OcmConnection>,
    span: Span,
}

impl Addon {
    pub fn new(object: AddonObject, conn: Arc<dyn OcmConnection>, span: Span) -> Self {
        Self {
            object: Arc::new(object),
            version: None,
            conn,
            span,
        }
    }

    pub fn id(&self) -> &str {
        &self.object.id
    }

    pub fn name(&self) -> &str {
        &self.object.name
    }

    pub fn enabled(&self) -> bool {
        self.object.enabled
    }

    pub fn version(&self) -> Option<&AddonVersionObject> {
        self.version.as_deref()
    }

    /// Fetch the add-on's current version and attach it.
    pub async fn with_version(&mut self) -> Result<&mut Self> {
        let version_id = self.object.version.id.clone();

        self.span.in_scope(|| {
            trace!(addon = %self.object.id, version = %version_id, "requesting version information")
        });

        let version = self
            .conn
            .get_addon_version(&self.object.id, &version_id)
            .instrument(self.span.clone())
            .await?;

        self.version = Some(Arc::new(version));

        Ok(self)
    }
}

fn version_row_data(version: &AddonVersionObject) -> RowData {
    RowData::from([
        (
            "Available Upgrades".to_string(),
            version.available_upgrades.join(", "),
        ),
        ("Channel".to_string(), version.channel.clone()),
        ("Enabled".to_string(), version.enabled.to_string()),
        ("Source Image".to_string(), version.source_image.clone()),
    ])
}

impl ProvideRowData for Addon {
    fn provide_row_data(&self) -> RowData {
        let a = &self.object;
        let mut row = RowData::from([
            ("Description".to_string(), a.description.clone()),
            ("Docs Link".to_string(), a.docs_link.clone()),
            ("Enabled".to_string(), a.enabled.to_string()),
            (
                "Has External Resources".to_string(),
                a.has_external_resources.to_string(),
            ),
            ("Hidden".to_string(), a.hidden.to_string()),
            ("ID".to_string(), a.id.clone()),
            ("Install Mode".to_string(), a.install_mode.clone()),
            ("Label".to_string(), a.label.clone()),
            ("Name".to_string(), a.name.clone()),
            ("Operator Name".to_string(), a.operator_name.clone()),
            ("Resource Cost".to_string(), opt_display(&a.resource_cost)),
            ("Resource Name".to_string(), a.resource_name.clone()),
            ("Target Namespace".to_string(), a.target_namespace.clone()),
            ("Version ID".to_string(), a.version.id.clone()),
        ]);

        if let Some(version) = &self.version {
            merge_prefixed(&mut row, "Version ", version_row_data(version));
        }

        row
    }
}

impl std::fmt::Debug for Addon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Addon")
            .field("id", &self.object.id)
            .field("name", &self.object.name)
            .field("version", &self.version.as_ref().map(|v| &v.id))
            .finish()
    }
}
