//! `notify` and `notify list`

use crate::cli::display::colors::paint;
use crate::cli::display::{ColorTheme, StatusIcon};
use crate::cli::options::OutputOptions;
use crate::cli::output::emit;
use crate::cli::prompt::confirm;
use crate::cli::session::Session;
use crate::domain::cluster::Cluster;
use crate::domain::config::PluginConfig;
use crate::domain::notification::{NotificationConfig, NotificationId, NotificationTree};
use crate::infrastructure::constants::COLUMNS_NOTIFICATIONS;
use crate::shared::row::RowData;
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::fmt::Write as _;
use tracing::info;

#[derive(Parser, Debug, Clone)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
pub struct NotifyCommand {
    #[command(subcommand)]
    pub command: Option<NotifySubcommand>,

    /// Cluster name, ID or external ID (substring match on name and ID)
    #[arg(value_name = "SEARCH", required = true)]
    pub search: Option<String>,

    /// Notification to send, as TEAM/PRODUCT/ID
    #[arg(value_name = "NOTIFICATION", required = true)]
    pub notification: Option<NotificationId>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum NotifySubcommand {
    /// List the available notifications
    #[command(visible_alias = "ls")]
    List(NotifyListCommand),
}

impl NotifyCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        if let Some(NotifySubcommand::List(cmd)) = &self.command {
            return cmd.execute();
        }

        let (Some(search), Some(id)) = (&self.search, &self.notification) else {
            anyhow::bail!("a cluster and a notification are required");
        };

        let plugin = PluginConfig::load().context("loading plug-in config")?;
        let tree = NotificationTree::load(plugin.notifications_dir.as_deref())
            .context("loading notifications")?;
        let notification = tree.find(id)?;

        let session = Session::new().await.context("starting session")?;
        let theme = ColorTheme::default();

        let mut clusters = session.clusters().search_by_name_or_id(search);

        clusters
            .for_each(async |cluster: Cluster| {
                print!("{}", describe(&cluster, id, notification, &theme));

                let message = format!("Send notification to cluster '{}'?", cluster.name());
                if !confirm(&message).context("reading answer")? {
                    println!("{} skipped cluster {}", StatusIcon::WARNING, cluster.id());
                    return Ok(());
                }

                match cluster.post_log(notification).await {
                    Ok(()) => {
                        session.span().in_scope(|| {
                            info!(cluster = %cluster.id(), notification = %id, "notification sent")
                        });
                        println!("{} notification sent to cluster {}", StatusIcon::SUCCESS, cluster.id());
                        Ok(())
                    }
                    Err(e) => {
                        println!("{} sending to cluster {} failed", StatusIcon::ERROR, cluster.id());
                        Err(anyhow::Error::from(e).context("posting notification"))
                    }
                }
            })
            .await
    }
}

/// Summary of what is about to be sent to `cluster`.
fn describe(
    cluster: &Cluster,
    id: &NotificationId,
    notification: &NotificationConfig,
    theme: &ColorTheme,
) -> String {
    let severity = paint(
        &notification.severity,
        theme.severity_color(&notification.severity),
    );

    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "Cluster:       {} ({})", cluster.name(), cluster.id());
    let _ = writeln!(out, "External ID:   {}", cluster.external_id());
    let _ = writeln!(out, "Notification:  {}", id);
    let _ = writeln!(out, "Severity:      {}", severity);
    let _ = writeln!(out, "Service Name:  {}", notification.service_name);
    let _ = writeln!(out, "Internal Only: {}", notification.internal_only);
    let _ = writeln!(out, "Summary:       {}", notification.summary);
    let _ = writeln!(out, "Description:   {}", notification.description);
    out
}

#[derive(Parser, Debug, Clone)]
pub struct NotifyListCommand {
    /// Comma separated list of columns to display
    #[arg(long, default_value = COLUMNS_NOTIFICATIONS)]
    pub columns: String,

    #[command(flatten)]
    pub output: OutputOptions,
}

impl NotifyListCommand {
    pub fn execute(&self) -> anyhow::Result<()> {
        let plugin = PluginConfig::load().context("loading plug-in config")?;
        let tree = NotificationTree::load(plugin.notifications_dir.as_deref())
            .context("loading notifications")?;

        emit(&self.render(&tree), plugin.pager.as_deref()).context("writing table")
    }

    fn render(&self, tree: &NotificationTree) -> String {
        let mut table = self.output.renderer(&self.columns);

        for (team, product, id, notification) in tree.iter() {
            table.write_with_fields(
                notification,
                RowData::from([
                    ("Team".to_string(), team.to_string()),
                    ("Product".to_string(), product.to_string()),
                    ("ID".to_string(), id.to_string()),
                ]),
            );
        }

        table.render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ocm::memory::MemoryConnection;
    use crate::infrastructure::ocm::models::ClusterObject;
    use std::sync::Arc;
    use tracing::Span;

    #[derive(Parser)]
    struct Cli {
        #[command(subcommand)]
        command: Commands,
    }

    #[derive(Subcommand)]
    enum Commands {
        Notify(NotifyCommand),
    }

    fn parse(args: &[&str]) -> Result<NotifyCommand, clap::Error> {
        let Commands::Notify(cmd) =
            Cli::try_parse_from(["ocm-addons", "notify"].iter().chain(args))?.command;
        Ok(cmd)
    }

    #[test]
    fn test_notify_parses_cluster_and_id() {
        let cmd = parse(&["my-cluster", "mt-sre/reference-addon/install-failed"]).unwrap();

        assert!(cmd.command.is_none());
        assert_eq!(cmd.search.as_deref(), Some("my-cluster"));
        assert_eq!(
            cmd.notification.unwrap().to_string(),
            "mt-sre/reference-addon/install-failed"
        );
    }

    #[test]
    fn test_notify_rejects_bad_id() {
        assert!(parse(&["my-cluster", "mt-sre/install-failed"]).is_err());
        assert!(parse(&["my-cluster"]).is_err());
    }

    #[test]
    fn test_notify_list_alias() {
        let cmd = parse(&["ls", "--no-headers"]).unwrap();
        match cmd.command {
            Some(NotifySubcommand::List(list)) => assert!(list.output.no_headers),
            None => panic!("expected list subcommand"),
        }
    }

    #[test]
    fn test_list_renders_builtin_notifications() {
        let cmd = NotifyListCommand {
            columns: "team, product, id, severity".to_string(),
            output: OutputOptions {
                no_headers: true,
                no_color: true,
            },
        };

        let out = cmd.render(&NotificationTree::builtin().unwrap());
        let rows: Vec<Vec<&str>> = out
            .lines()
            .map(|l| l.split_whitespace().collect())
            .filter(|r: &Vec<&str>| !r.is_empty())
            .collect();

        assert!(rows.contains(&vec!["mt-sre", "reference-addon", "install-failed", "Error"]));
        assert!(rows
            .iter()
            .all(|r| r.len() == 4 && r[0] == "mt-sre"));
    }

    #[test]
    fn test_describe_names_cluster_and_notification() {
        colored::control::set_override(false);

        let cluster = Cluster::new(
            ClusterObject {
                id: "c1".to_string(),
                external_id: "uuid-1".to_string(),
                name: "prod".to_string(),
                ..ClusterObject::default()
            },
            Arc::new(MemoryConnection::default()),
            Span::none(),
        );
        let id: NotificationId = "mt-sre/reference-addon/install-failed".parse().unwrap();
        let tree = NotificationTree::builtin().unwrap();
        let notification = tree.find(&id).unwrap();

        let out = describe(&cluster, &id, notification, &ColorTheme::default());

        assert!(out.contains("Cluster:       prod (c1)"));
        assert!(out.contains("External ID:   uuid-1"));
        assert!(out.contains("Severity:      Error"));
        assert!(out.contains(&format!("Summary:       {}", notification.summary)));
    }
}
