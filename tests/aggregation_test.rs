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

//! Cluster lookups end to end against a mocked OCM API.

#[cfg(test)]
mod tests {
    use ocm_addons::cli::display::TableRenderer;
    use ocm_addons::*;
    use serde_json::json;
    use std::sync::Arc;
    use tracing::Span;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn list(items: serde_json::Value) -> ResponseTemplate {
        let size = items.as_array().map(|a| a.len()).unwrap_or(0);
        ResponseTemplate::new(200).set_body_json(json!({
            "kind": "List",
            "page": 1,
            "size": size,
            "total": size,
            "items": items,
        }))
    }

    async fn mount_cluster(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/api/clusters_mgmt/v1/clusters"))
            .and(query_param(
                "search",
                "name like '%prod%' or id like '%prod%' or external_id = 'prod'",
            ))
            .respond_with(list(json!([{
                "id": "c1",
                "external_id": "uuid-1",
                "name": "prod",
                "state": "ready",
                "product": { "id": "osd" },
                "ccs": { "enabled": true },
                "subscription": { "id": "sub-1" },
            }])))
            .mount(server)
            .await;
    }

    async fn cluster(server: &MockServer) -> Cluster {
        mount_cluster(server).await;

        let conn: Arc<dyn OcmConnection> = Arc::new(OcmClient::new(&server.uri(), "token").unwrap());
        let mut clusters = ClusterPager::retrieve(conn, Span::none()).search_by_name_or_id("prod");

        let mut found = clusters.collect().await.unwrap();
        assert_eq!(found.len(), 1);
        found.remove(0)
    }

    #[tokio::test]
    async fn test_installations_join_with_catalog() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/clusters_mgmt/v1/clusters/c1/addons"))
            .respond_with(list(json!([
                { "id": "reference-addon", "state": "ready", "addon_version": { "id": "0.1.0" } },
                { "id": "retired-addon", "state": "failed" },
            ])))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/clusters_mgmt/v1/addons"))
            .and(query_param("search", "id in ('reference-addon','retired-addon')"))
            .respond_with(list(json!([
                { "id": "reference-addon", "name": "Reference Addon", "enabled": true },
            ])))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/accounts_mgmt/v1/subscriptions/sub-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "sub-1",
                "organization_id": "org-1",
                "creator": { "username": "sre" },
            })))
            .mount(&server)
            .await;

        let mut cluster = cluster(&server).await;
        assert_eq!(cluster.product_id(), "osd,ccs");

        cluster.with_subscription().await.unwrap();
        let report = cluster.with_addon_installations().await.unwrap();

        assert_eq!(report.joined, 1);
        assert_eq!(report.unmatched_installations, vec!["retired-addon".to_string()]);
        assert_eq!(cluster.installed_addons(), "reference-addon(ready)");

        let mut table = TableRenderer::new(
            "addon_name, installed_version_id, cluster_name, cluster_organization_id, state",
        )
        .no_headers(true)
        .no_color(true);

        for install in cluster.take_addon_installations().matching("reference") {
            table.write(&install);
        }

        let rendered = table.render();
        let row: Vec<&str> = rendered.split_whitespace().collect();
        assert_eq!(row, ["Reference", "Addon", "0.1.0", "prod", "org-1", "ready"]);
    }

    #[tokio::test]
    async fn test_events_are_filtered_and_sorted() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/service_logs/v1/clusters/uuid-1/cluster_logs"))
            .and(query_param(
                "search",
                "description like '%fail%' and severity = 'Error'",
            ))
            .respond_with(list(json!([
                { "id": "2", "timestamp": "2022-01-02T00:00:00Z", "severity": "Error", "description": "fail 2" },
                { "id": "1", "timestamp": "2022-01-01T00:00:00Z", "severity": "Error", "description": "fail 1" },
                { "id": "3", "timestamp": "2022-01-03T00:00:00Z", "severity": "Error", "description": "fail 3" },
            ])))
            .expect(2)
            .mount(&server)
            .await;

        let cluster = cluster(&server).await;
        let options = GetLogsOptions::new()
            .matching_pattern("fail")
            .with_level(LogLevel::Error);

        let ids = |entries: Vec<LogEntry>| -> Vec<String> {
            entries.iter().map(|e| e.id().to_string()).collect()
        };

        let newest_first = cluster.get_logs(&options).await.unwrap();
        assert_eq!(ids(newest_first), ["3", "2", "1"]);

        let oldest_first = cluster
            .get_logs(&options.clone().sorted(Order::Ascending))
            .await
            .unwrap();
        assert_eq!(ids(oldest_first), ["1", "2", "3"]);
    }

    #[tokio::test]
    async fn test_builtin_notification_is_posted() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/service_logs/v1/cluster_logs"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "log-1" })))
            .expect(1)
            .mount(&server)
            .await;

        let tree = NotificationTree::builtin().unwrap();
        let id: NotificationId = "mt-sre/reference-addon/install-failed".parse().unwrap();
        let notification = tree.find(&id).unwrap();

        let cluster = cluster(&server).await;
        cluster.post_log(notification).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let posted = requests
            .iter()
            .find(|r| r.method.as_str() == "POST")
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&posted.body).unwrap();

        assert_eq!(body["cluster_id"], "c1");
        assert_eq!(body["cluster_uuid"], "uuid-1");
        assert_eq!(body["severity"], "Error");
        assert_eq!(body["summary"], json!(notification.summary));
    }
}
