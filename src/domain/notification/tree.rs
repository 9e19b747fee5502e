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

//! Notification configs keyed by team, product and ID
//!
//! The built-in set is compiled from `data/notifications/<team>/<product>.yaml`.
//! A directory with the same layout can be merged on top; its entries replace
//! built-in ones with the same address.

use crate::domain::notification::config::{NotificationConfig, NotificationId};
use crate::shared::error::{AddonsError, Result};
use include_dir::{include_dir, Dir};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

type ProductTree = BTreeMap<String, NotificationConfig>;
type TeamTree = BTreeMap<String, ProductTree>;

static BUILTIN: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/data/notifications");

#[derive(Debug, Clone, Default)]
pub struct NotificationTree {
    teams: BTreeMap<String, TeamTree>,
}

impl NotificationTree {
    /// Notifications compiled into the binary.
    pub fn builtin() -> Result<Self> {
        let mut tree = Self::default();

        for team_dir in BUILTIN.dirs() {
            let team = team_dir
                .path()
                .file_name()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();

            for file in team_dir.files().filter(|f| is_yaml(f.path())) {
                let name = file.path().display().to_string();
                let contents = file.contents_utf8().ok_or_else(|| {
                    AddonsError::Notification(format!("{}: not valid UTF-8", name))
                })?;

                let (product, configs) = parse_product_file(&name, contents)?;
                tree.insert_product(&team, &product, configs);
            }
        }

        Ok(tree)
    }

    /// Built-in notifications with `dir` merged over them, if given.
    pub fn load(dir: Option<&Path>) -> Result<Self> {
        let mut tree = Self::builtin()?;

        if let Some(dir) = dir {
            tree.merge(Self::from_dir(dir)?);
        }

        Ok(tree)
    }

    /// Read `<dir>/<team>/<product>.yaml`. Files without a `.yaml` or `.yml`
    /// extension are ignored.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let mut tree = Self::default();

        for team_entry in fs::read_dir(dir)? {
            let team_entry = team_entry?;
            if !team_entry.file_type()?.is_dir() {
                continue;
            }

            let team = team_entry.file_name().to_string_lossy().to_string();

            for file_entry in fs::read_dir(team_entry.path())? {
                let file_entry = file_entry?;
                let path = file_entry.path();

                if !is_yaml(&path) || !file_entry.file_type()?.is_file() {
                    continue;
                }

                let contents = fs::read_to_string(&path)?;
                let (product, configs) =
                    parse_product_file(&path.display().to_string(), &contents)?;

                debug!(team = %team, product = %product, count = configs.len(), "loaded notifications");

                tree.insert_product(&team, &product, configs);
            }
        }

        Ok(tree)
    }

    fn insert_product(&mut self, team: &str, product: &str, configs: ProductTree) {
        self.teams
            .entry(team.to_string())
            .or_default()
            .entry(product.to_string())
            .or_default()
            .extend(configs);
    }

    /// Entries in `other` replace entries at the same address.
    pub fn merge(&mut self, other: NotificationTree) {
        for (team, products) in other.teams {
            for (product, configs) in products {
                self.insert_product(&team, &product, configs);
            }
        }
    }

    pub fn teams(&self) -> Vec<&str> {
        self.teams.keys().map(String::as_str).collect()
    }

    pub fn products(&self, team: &str) -> Vec<&str> {
        self.teams
            .get(team)
            .map(|products| products.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn get_notification(
        &self,
        team: &str,
        product: &str,
        id: &str,
    ) -> Option<&NotificationConfig> {
        self.teams.get(team)?.get(product)?.get(id)
    }

    /// Look up a parsed `team/product/id` address.
    pub fn find(&self, id: &NotificationId) -> Result<&NotificationConfig> {
        self.get_notification(&id.team, &id.product, &id.id)
            .ok_or_else(|| AddonsError::notification_not_found(&id.team, &id.product, &id.id))
    }

    /// Every notification as `(team, product, id, config)`, ordered by address.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &str, &NotificationConfig)> {
        self.teams.iter().flat_map(|(team, products)| {
            products.iter().flat_map(move |(product, configs)| {
                configs
                    .iter()
                    .map(move |(id, cfg)| (team.as_str(), product.as_str(), id.as_str(), cfg))
            })
        })
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Parse one product file, returning the product name (the file stem) and
/// its validated notifications.
fn parse_product_file(file: &str, contents: &str) -> Result<(String, ProductTree)> {
    let product = Path::new(file)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .ok_or_else(|| AddonsError::Notification(format!("{}: missing file name", file)))?;

    let configs: ProductTree = serde_yaml::from_str(contents)
        .map_err(|e| AddonsError::Notification(format!("{}: {}", file, e)))?;

    for (id, cfg) in &configs {
        cfg.validate().map_err(|reason| {
            AddonsError::Notification(format!("{}: notification '{}': {}", file, id, reason))
        })?;
    }

    Ok((product, configs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_notifications_are_valid() {
        let tree = NotificationTree::builtin().unwrap();

        assert_eq!(tree.teams(), vec!["mt-sre"]);
        assert_eq!(
            tree.products("mt-sre"),
            vec!["managed-api-service", "reference-addon"]
        );

        let cfg = tree
            .get_notification("mt-sre", "reference-addon", "install-failed")
            .unwrap();
        assert_eq!(cfg.severity, "Error");
        assert_eq!(cfg.service_name, "SREManualAction");
        assert!(tree.products("unknown").is_empty());
    }

    #[test]
    fn test_builtin_covers_every_data_file() {
        let on_disk = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/notifications");
        let expected = NotificationTree::from_dir(&on_disk).unwrap();
        let builtin = NotificationTree::builtin().unwrap();

        let addresses = |tree: &NotificationTree| -> Vec<String> {
            tree.iter()
                .map(|(t, p, i, _)| format!("{}/{}/{}", t, p, i))
                .collect()
        };

        assert!(!builtin.is_empty());
        assert_eq!(addresses(&builtin), addresses(&expected));
    }

    #[test]
    fn test_iter_is_ordered_by_address() {
        let tree = NotificationTree::builtin().unwrap();
        let addresses: Vec<String> = tree
            .iter()
            .map(|(t, p, i, _)| format!("{}/{}/{}", t, p, i))
            .collect();

        let mut sorted = addresses.clone();
        sorted.sort();
        assert_eq!(addresses, sorted);
        assert_eq!(addresses.len(), tree.len());
    }

    #[test]
    fn test_find_unknown_is_not_found() {
        let tree = NotificationTree::builtin().unwrap();
        let id: NotificationId = "mt-sre/reference-addon/nope".parse().unwrap();

        assert!(matches!(
            tree.find(&id),
            Err(AddonsError::NotificationNotFound { .. })
        ));
    }

    #[test]
    fn test_directory_merges_over_builtin() {
        let dir = TempDir::new().unwrap();
        let team = dir.path().join("mt-sre");
        fs::create_dir(&team).unwrap();
        fs::write(
            team.join("reference-addon.yml"),
            "install-failed:\n  summary: overridden\n  description: replaced text\n  severity: Fatal\n",
        )
        .unwrap();
        fs::write(team.join("README.md"), "ignored").unwrap();

        let other = dir.path().join("other-team");
        fs::create_dir(&other).unwrap();
        fs::write(
            other.join("widget.yaml"),
            "broken:\n  summary: widget broken\n  description: the widget broke\n  severity: Warning\n  internalOnly: true\n",
        )
        .unwrap();

        let tree = NotificationTree::load(Some(dir.path())).unwrap();

        let cfg = tree
            .get_notification("mt-sre", "reference-addon", "install-failed")
            .unwrap();
        assert_eq!(cfg.summary, "overridden");
        assert_eq!(cfg.severity, "Fatal");

        // untouched built-ins survive the merge
        assert!(tree
            .get_notification("mt-sre", "reference-addon", "maintenance")
            .is_some());
        assert!(tree
            .get_notification("other-team", "widget", "broken")
            .unwrap()
            .internal_only);
    }

    #[test]
    fn test_invalid_file_names_file_and_id() {
        let dir = TempDir::new().unwrap();
        let team = dir.path().join("team");
        fs::create_dir(&team).unwrap();
        fs::write(
            team.join("product.yaml"),
            "bad-one:\n  summary: s\n  description: ends badly!\n  severity: Info\n",
        )
        .unwrap();

        let err = NotificationTree::from_dir(dir.path()).unwrap_err().to_string();
        assert!(err.contains("product.yaml"), "{err}");
        assert!(err.contains("bad-one"), "{err}");
    }
}
