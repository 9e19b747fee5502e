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

use crate::domain::addon::{Addon, AddonInstallation, AddonInstallations, AddonPager};
use crate::domain::cluster::subscription::Subscription;
use crate::domain::logs::{GetLogsOptions, LogEntry};
use crate::domain::notification::NotificationConfig;
use crate::infrastructure::ocm::models::{AddonInstallationObject, ClusterObject};
use crate::infrastructure::ocm::OcmConnection;
use crate::shared::error::{AddonsError, Result};
use crate::shared::row::{merge_prefixed, opt_display, opt_time, ProvideRowData, RowData};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, trace, warn, Instrument, Span};

/// Outcome of joining a cluster's installation records with the add-on
/// catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinReport {
    pub joined: usize,
    /// Installation IDs for which the catalog returned no add-on.
    pub unmatched_installations: Vec<String>,
    /// Add-ons returned by the catalog with no installation record.
    pub unmatched_addons: usize,
}

impl JoinReport {
    pub fn is_complete(&self) -> bool {
        self.unmatched_installations.is_empty() && self.unmatched_addons == 0
    }
}

/// Read-only view of a cluster carried by each joined installation.
#[derive(Debug, Clone)]
pub struct ClusterContext {
    object: Arc<ClusterObject>,
    subscription: Option<Arc<Subscription>>,
}

impl ClusterContext {
    pub fn id(&self) -> &str {
        &self.object.id
    }

    pub fn name(&self) -> &str {
        &self.object.name
    }

    pub fn state(&self) -> &str {
        &self.object.state
    }
}

impl ProvideRowData for ClusterContext {
    fn provide_row_data(&self) -> RowData {
        let c = &self.object;
        let mut row = RowData::new();

        let mut put = |k: &str, v: String| {
            row.insert(k.to_string(), v);
        };

        put("Additional Trust Bundle", c.additional_trust_bundle.clone());
        put("API Listening Method", c.api.listening.clone());
        put("API URL", c.api.url.clone());
        put("Billing Model", c.billing_model.clone());
        put("CCS Disable SCP Checks", c.ccs.disable_scp_checks.to_string());
        put("CCS Enabled", c.ccs.enabled.to_string());
        put("CCS ID", c.ccs.id.clone());
        put("CloudProvider ID", c.cloud_provider.id.clone());
        put("CloudProvider Display Name", c.cloud_provider.display_name.clone());
        put("CloudProvider Name", c.cloud_provider.name.clone());
        put("Console URL", c.console.url.clone());
        put("Creation Timestamp", opt_time(&c.creation_timestamp));
        put(
            "Disable User Workload Monitoring",
            c.disable_user_workload_monitoring.to_string(),
        );
        put("DNS Base Domain", c.dns.base_domain.clone());
        put("ETCD Encryption", c.etcd_encryption.to_string());
        put("Expiration Timestamp", opt_time(&c.expiration_timestamp));
        put("External ID", c.external_id.clone());
        put("FIPS", c.fips.to_string());
        put("Health State", c.health_state.clone());
        put("ID", c.id.clone());
        put("Load Balancer Quota", opt_display(&c.load_balancer_quota));
        put("Managed", c.managed.to_string());
        put("Multi AZ", c.multi_az.to_string());
        put("Name", c.name.clone());
        put("Network Host Prefix", opt_display(&c.network.host_prefix));
        put("Network Machine CIDR", c.network.machine_cidr.clone());
        put("Network Pod CIDR", c.network.pod_cidr.clone());
        put("Network Service CIDR", c.network.service_cidr.clone());
        put("Network Type", c.network.network_type.clone());
        put("OpenShift Version", c.openshift_version.clone());
        put("Product ID", c.product.id.clone());
        put("Product Name", c.product.name.clone());
        put("Product Type", product_type(c));
        put("HTTP Proxy", c.proxy.http_proxy.clone());
        put("HTTPS Proxy", c.proxy.https_proxy.clone());
        put("Region ID", c.region.id.clone());
        put("State", c.state.clone());
        put("Subscription ID", c.subscription.id.clone());

        match &self.subscription {
            Some(sub) => merge_prefixed(&mut row, "", sub.provide_row_data()),
            None => {
                for field in Subscription::FIELDS {
                    row.insert(field.to_string(), String::new());
                }
            }
        }

        row
    }
}

/// `<product>,ccs` or `<product>,no-ccs`.
fn product_type(c: &ClusterObject) -> String {
    let ccs = if c.ccs.enabled { "ccs" } else { "no-ccs" };
    format!("{},{}", c.product.id, ccs)
}

/// A cluster decoded from one page item, with its associations filled in by
/// explicit follow-up calls.
pub struct Cluster {
    object: Arc<ClusterObject>,
    subscription: Option<Arc<Subscription>>,
    addon_installations: Option<AddonInstallations>,
    conn: Arc<dyn OcmConnection>,
    span: Span,
}

impl Cluster {
    pub fn new(object: ClusterObject, conn: Arc<dyn OcmConnection>, span: Span) -> Self {
        Self {
            object: Arc::new(object),
            subscription: None,
            addon_installations: None,
            conn,
            span,
        }
    }

    pub fn id(&self) -> &str {
        &self.object.id
    }

    pub fn external_id(&self) -> &str {
        &self.object.external_id
    }

    pub fn name(&self) -> &str {
        &self.object.name
    }

    pub fn state(&self) -> &str {
        &self.object.state
    }

    /// Product identifier combined with the CCS model, e.g. `osd,ccs`.
    pub fn product_id(&self) -> String {
        product_type(&self.object)
    }

    pub fn subscription(&self) -> Option<&Subscription> {
        self.subscription.as_deref()
    }

    /// Joined installations, `None` until [`Cluster::with_addon_installations`]
    /// has succeeded.
    pub fn addon_installations(&self) -> Option<&AddonInstallations> {
        self.addon_installations.as_ref()
    }

    pub fn take_addon_installations(&mut self) -> AddonInstallations {
        self.addon_installations.take().unwrap_or_default()
    }

    pub fn context(&self) -> ClusterContext {
        ClusterContext {
            object: Arc::clone(&self.object),
            subscription: self.subscription.clone(),
        }
    }

    /// Fetch the cluster's subscription, with accounts expanded.
    pub async fn with_subscription(&mut self) -> Result<&mut Self> {
        let id = self.object.subscription.id.clone();

        self.span.in_scope(|| {
            trace!(cluster = %self.object.id, subscription = %id, "requesting subscription")
        });

        let object = self
            .conn
            .get_subscription(&id)
            .instrument(self.span.clone())
            .await?;

        self.subscription = Some(Arc::new(Subscription::new(object)));

        Ok(self)
    }

    /// Join the cluster's installation records with the add-on catalog.
    ///
    /// Only a failure to list the installations or to page through the
    /// catalog is returned as an error; records that cannot be matched are
    /// skipped, logged and counted in the returned [`JoinReport`].
    pub async fn with_addon_installations(&mut self) -> Result<JoinReport> {
        let records = self.retrieve_installations().await?;

        if records.is_empty() {
            self.addon_installations = Some(AddonInstallations::default());
            return Ok(JoinReport::default());
        }

        let ids: Vec<String> = records.iter().map(|r| r.id.clone()).collect();
        let mut pending: HashMap<String, AddonInstallationObject> =
            records.into_iter().map(|r| (r.id.clone(), r)).collect();

        let context = self.context();
        let span = self.span.clone();
        let mut joined = Vec::with_capacity(ids.len());
        let mut unmatched_addons = 0usize;

        let mut addons =
            AddonPager::retrieve(Arc::clone(&self.conn), self.span.clone()).find_by_ids(&ids);

        addons
            .for_each(async |addon: Addon| {
                match pending.remove(addon.id()) {
                    Some(install) => {
                        joined.push(AddonInstallation::new(install, addon, context.clone()));
                    }
                    None => {
                        unmatched_addons += 1;
                        span.in_scope(|| {
                            warn!(
                                cluster = %context.id(),
                                addon = %addon.id(),
                                "addon has no installation record on cluster"
                            )
                        });
                    }
                }
                Ok::<(), AddonsError>(())
            })
            .await?;

        let unmatched_installations: Vec<String> = ids
            .into_iter()
            .filter(|id| pending.contains_key(id))
            .collect();

        self.span.in_scope(|| {
            for id in &unmatched_installations {
                warn!(cluster = %self.object.id, installation = %id, "no addon found for installation");
            }
        });

        let report = JoinReport {
            joined: joined.len(),
            unmatched_installations,
            unmatched_addons,
        };

        self.addon_installations = Some(AddonInstallations::new(joined));

        Ok(report)
    }

    async fn retrieve_installations(&self) -> Result<Vec<AddonInstallationObject>> {
        self.span.in_scope(|| {
            trace!(cluster = %self.object.id, "requesting addon installations")
        });

        let records = self
            .conn
            .list_cluster_addon_installations(&self.object.id)
            .instrument(self.span.clone())
            .await?;

        self.span.in_scope(|| {
            info!(cluster = %self.object.id, count = records.len(), "retrieved addon installations")
        });

        Ok(records)
    }

    /// Fetch the cluster's service-log entries matching `options`, sorted
    /// with the options' comparator.
    pub async fn get_logs(&self, options: &GetLogsOptions) -> Result<Vec<LogEntry>> {
        let query = options.query();

        self.span.in_scope(|| {
            trace!(cluster = %self.object.id, query = %query, "retrieving cluster log entries")
        });

        let search = (!query.is_empty()).then_some(query.as_str());
        let objects = self
            .conn
            .list_cluster_logs(&self.object.external_id, search)
            .instrument(self.span.clone())
            .await?;

        let mut sorter = options.sorter(objects.len());
        for object in objects {
            sorter.push(LogEntry::new(object));
        }
        sorter.sort();

        Ok(sorter.into_entries())
    }

    /// Post `notification` to the cluster's service log.
    pub async fn post_log(&self, notification: &NotificationConfig) -> Result<()> {
        let entry = notification.to_log_entry(&self.object.id, &self.object.external_id);

        self.span.in_scope(|| {
            debug!(
                cluster = %self.object.id,
                severity = %entry.severity,
                summary = %entry.summary,
                "posting log entry"
            )
        });

        self.conn
            .add_cluster_log(&entry)
            .instrument(self.span.clone())
            .await
    }

    /// `id(state)` for every joined installation, comma separated.
    pub fn installed_addons(&self) -> String {
        self.addon_installations
            .as_ref()
            .map(|installs| {
                installs
                    .iter()
                    .map(|i| format!("{}({})", i.id(), i.state()))
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .unwrap_or_default()
    }
}

impl ProvideRowData for Cluster {
    fn provide_row_data(&self) -> RowData {
        let mut row = self.context().provide_row_data();
        row.insert("Installed Addons".to_string(), self.installed_addons());
        row
    }
}

impl std::fmt::Debug for Cluster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cluster")
            .field("id", &self.object.id)
            .field("external_id", &self.object.external_id)
            .field("name", &self.object.name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::logs::{LogLevel, Order};
    use crate::infrastructure::ocm::memory::MemoryConnection;
    use crate::infrastructure::ocm::models::{
        AddonObject, LogEntryObject, ObjectRef, ProductRef, SubscriptionObject,
    };
    use chrono::{TimeZone, Utc};

    fn cluster_object() -> ClusterObject {
        ClusterObject {
            id: "c1".to_string(),
            external_id: "uuid-1".to_string(),
            name: "prod".to_string(),
            state: "ready".to_string(),
            subscription: ObjectRef {
                id: "sub-1".to_string(),
            },
            ..ClusterObject::default()
        }
    }

    fn installation(id: &str, state: &str) -> AddonInstallationObject {
        AddonInstallationObject {
            id: id.to_string(),
            addon: ObjectRef { id: id.to_string() },
            state: state.to_string(),
            ..AddonInstallationObject::default()
        }
    }

    fn addon(id: &str) -> AddonObject {
        AddonObject {
            id: id.to_string(),
            name: format!("{} name", id),
            ..AddonObject::default()
        }
    }

    fn log(id: &str, hour: u32) -> LogEntryObject {
        LogEntryObject {
            id: id.to_string(),
            cluster_uuid: "uuid-1".to_string(),
            timestamp: Some(Utc.with_ymd_and_hms(2022, 1, 1, hour, 0, 0).unwrap()),
            ..LogEntryObject::default()
        }
    }

    fn cluster(conn: MemoryConnection) -> (Cluster, Arc<MemoryConnection>) {
        let conn = Arc::new(conn);
        let cluster = Cluster::new(cluster_object(), conn.clone(), Span::none());
        (cluster, conn)
    }

    #[tokio::test]
    async fn test_join_skips_installation_without_addon() {
        let mut conn = MemoryConnection {
            addons: vec![addon("a")],
            ..MemoryConnection::default()
        };
        conn.installations.insert(
            "c1".to_string(),
            vec![installation("a", "ready"), installation("b", "failed")],
        );
        let (mut cluster, conn) = cluster(conn);

        let report = cluster.with_addon_installations().await.unwrap();

        assert_eq!(report.joined, 1);
        assert_eq!(report.unmatched_installations, vec!["b".to_string()]);
        assert_eq!(report.unmatched_addons, 0);
        assert!(!report.is_complete());

        let installs = cluster.addon_installations().unwrap();
        assert_eq!(installs.len(), 1);
        assert_eq!(installs.iter().next().unwrap().addon().name(), "a name");
        assert_eq!(cluster.installed_addons(), "a(ready)");
        assert_eq!(
            conn.searches.lock().unwrap().as_slice(),
            ["id in ('a','b')".to_string()]
        );
    }

    #[tokio::test]
    async fn test_join_without_installations_skips_catalog() {
        let (mut cluster, conn) = cluster(MemoryConnection::default());

        let report = cluster.with_addon_installations().await.unwrap();

        assert!(report.is_complete());
        assert!(cluster.addon_installations().unwrap().is_empty());
        assert_eq!(conn.addon_page_requests(), 0);
    }

    #[tokio::test]
    async fn test_failed_listing_leaves_installations_unset() {
        let (mut cluster, _) = cluster(MemoryConnection {
            fail_installations: true,
            ..MemoryConnection::default()
        });

        assert!(cluster.with_addon_installations().await.is_err());
        assert!(cluster.addon_installations().is_none());
        assert_eq!(cluster.installed_addons(), "");
    }

    #[tokio::test]
    async fn test_subscription_reaches_installation_context() {
        let mut conn = MemoryConnection {
            addons: vec![addon("a")],
            ..MemoryConnection::default()
        };
        conn.installations
            .insert("c1".to_string(), vec![installation("a", "ready")]);
        conn.subscriptions.insert(
            "sub-1".to_string(),
            SubscriptionObject {
                id: "sub-1".to_string(),
                organization_id: "org-1".to_string(),
                ..SubscriptionObject::default()
            },
        );
        let (mut cluster, _) = cluster(conn);

        cluster.with_subscription().await.unwrap();
        cluster.with_addon_installations().await.unwrap();

        let row = cluster.provide_row_data();
        assert_eq!(row["Organization ID"], "org-1");
        assert_eq!(row["Installed Addons"], "a(ready)");

        let install = cluster.take_addon_installations().into_iter().next().unwrap();
        assert_eq!(install.cluster().provide_row_data()["Organization ID"], "org-1");
    }

    #[test]
    fn test_row_carries_product_name_and_trust_bundle() {
        let object = ClusterObject {
            product: ProductRef {
                id: "osd".to_string(),
                name: "OpenShift Dedicated".to_string(),
            },
            additional_trust_bundle: "REDACTED".to_string(),
            ..cluster_object()
        };
        let cluster = Cluster::new(object, Arc::new(MemoryConnection::default()), Span::none());

        let row = cluster.provide_row_data();
        assert_eq!(row["Product Name"], "OpenShift Dedicated");
        assert_eq!(row["Additional Trust Bundle"], "REDACTED");
        assert_eq!(row["Product ID"], "osd");
    }

    #[tokio::test]
    async fn test_missing_subscription_is_an_error() {
        let (mut cluster, _) = cluster(MemoryConnection::default());

        let err = cluster.with_subscription().await.unwrap_err();
        assert!(err.is_not_found());
        assert!(cluster.subscription().is_none());
        assert_eq!(cluster.provide_row_data()["Organization ID"], "");
    }

    #[tokio::test]
    async fn test_get_logs_sorts_and_searches() {
        let (cluster, conn) = cluster(MemoryConnection {
            logs: vec![log("t2", 2), log("t1", 1), log("t3", 3)],
            ..MemoryConnection::default()
        });

        let ids = |entries: Vec<LogEntry>| -> Vec<String> {
            entries.iter().map(|e| e.id().to_string()).collect()
        };

        let options = GetLogsOptions::new().sorted(Order::Ascending);
        assert_eq!(ids(cluster.get_logs(&options).await.unwrap()), ["t1", "t2", "t3"]);

        let options = GetLogsOptions::new().with_level(LogLevel::Error);
        assert_eq!(ids(cluster.get_logs(&options).await.unwrap()), ["t3", "t2", "t1"]);

        assert_eq!(
            conn.searches.lock().unwrap().as_slice(),
            ["severity = 'Error'".to_string()]
        );
    }

    #[tokio::test]
    async fn test_post_log_addresses_cluster() {
        let (cluster, conn) = cluster(MemoryConnection::default());
        let notification = NotificationConfig {
            summary: "Install failed".to_string(),
            description: "The add-on failed to install".to_string(),
            severity: "Error".to_string(),
            service_name: "SREManualAction".to_string(),
            internal_only: false,
        };

        cluster.post_log(&notification).await.unwrap();

        let posted = conn.posted.lock().unwrap();
        assert_eq!(posted.len(), 1);
        assert_eq!(posted[0].cluster_id, "c1");
        assert_eq!(posted[0].cluster_uuid, "uuid-1");
        assert_eq!(posted[0].summary, "Install failed");
    }
}
