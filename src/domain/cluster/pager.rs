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

use crate::domain::cluster::Cluster;
use crate::domain::pager::Pager;
use crate::domain::query::{any_of, equals, like_contains};
use crate::infrastructure::ocm::{ClustersListRequest, OcmConnection};
use std::sync::Arc;
use tracing::Span;

pub type ClusterPager = Pager<ClustersListRequest, Cluster>;

impl Pager<ClustersListRequest, Cluster> {
    /// Pager over every cluster visible to the connection.
    pub fn retrieve(conn: Arc<dyn OcmConnection>, span: Span) -> Self {
        let request = ClustersListRequest::new(Arc::clone(&conn));
        let decode_span = span.clone();

        Pager::new(request, span, move |object| {
            Cluster::new(object, Arc::clone(&conn), decode_span.clone())
        })
    }

    /// Narrow to clusters whose name or ID contains `pattern`, or whose
    /// external ID equals it. An empty pattern leaves the pager unchanged.
    pub fn search_by_name_or_id(self, pattern: &str) -> Self {
        if pattern.is_empty() {
            return self;
        }

        let predicate = any_of(&[
            like_contains("name", pattern),
            like_contains("id", pattern),
            equals("external_id", pattern),
        ]);

        self.search(&predicate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ocm::memory::MemoryConnection;
    use crate::infrastructure::ocm::models::ClusterObject;

    fn cluster(id: &str, name: &str) -> ClusterObject {
        ClusterObject {
            id: id.to_string(),
            external_id: format!("ext-{}", id),
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_search_by_name_or_id_predicate() {
        let conn = Arc::new(MemoryConnection::default());
        let pager = ClusterPager::retrieve(conn, Span::none()).search_by_name_or_id("prod");

        assert_eq!(
            pager.request().predicate(),
            Some("name like '%prod%' or id like '%prod%' or external_id = 'prod'")
        );
    }

    #[test]
    fn test_empty_pattern_is_noop() {
        let conn = Arc::new(MemoryConnection::default());
        let pager = ClusterPager::retrieve(conn, Span::none()).search_by_name_or_id("");

        assert_eq!(pager.request().predicate(), None);
        assert_eq!(pager.index(), 1);
    }

    #[tokio::test]
    async fn test_retrieve_decodes_clusters() {
        let conn = Arc::new(MemoryConnection {
            clusters: vec![cluster("c1", "alpha"), cluster("c2", "beta")],
            ..Default::default()
        });

        let mut pager = ClusterPager::retrieve(conn.clone(), Span::none());
        let clusters = pager.collect().await.unwrap();

        let names: Vec<&str> = clusters.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["alpha", "beta"]);
        assert_eq!(clusters[1].external_id(), "ext-c2");
        assert_eq!(conn.cluster_page_requests(), 1);
    }
}
