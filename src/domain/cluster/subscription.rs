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

use crate::infrastructure::ocm::models::SubscriptionObject;
use crate::shared::row::{ProvideRowData, RowData};

/// Billing/organization metadata attached to a cluster.
#[derive(Debug, Clone)]
pub struct Subscription {
    object: SubscriptionObject,
}

impl Subscription {
    /// Row fields contributed by a subscription.
    pub const FIELDS: [&'static str; 6] = [
        "Creator ID",
        "Creator Email",
        "Creator Name",
        "Creator Username",
        "Organization ID",
        "Support Level",
    ];

    pub fn new(object: SubscriptionObject) -> Self {
        Self { object }
    }

    pub fn id(&self) -> &str {
        &self.object.id
    }

    pub fn organization_id(&self) -> &str {
        &self.object.organization_id
    }
}

impl ProvideRowData for Subscription {
    fn provide_row_data(&self) -> RowData {
        let creator = &self.object.creator;
        let values = [
            creator.id.clone(),
            creator.email.clone(),
            format!("{} {}", creator.first_name, creator.last_name)
                .trim()
                .to_string(),
            creator.username.clone(),
            self.object.organization_id.clone(),
            self.object.support_level.clone(),
        ];

        Self::FIELDS
            .iter()
            .map(|f| f.to_string())
            .zip(values)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ocm::models::Account;

    #[test]
    fn test_row_data() {
        let sub = Subscription::new(SubscriptionObject {
            id: "sub-1".to_string(),
            creator: Account {
                id: "acc-1".to_string(),
                email: "jane@example.com".to_string(),
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
                username: "jdoe".to_string(),
            },
            organization_id: "org-1".to_string(),
            support_level: "Premium".to_string(),
        });

        let row = sub.provide_row_data();
        assert_eq!(row.len(), Subscription::FIELDS.len());
        assert_eq!(row["Creator Name"], "Jane Doe");
        assert_eq!(row["Organization ID"], "org-1");
        assert_eq!(row["Support Level"], "Premium");
    }
}
