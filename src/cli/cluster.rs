//! `cluster info` and `cluster events`

use crate::cli::options::{parse_time, OutputOptions};
use crate::cli::output::emit;
use crate::cli::session::Session;
use crate::domain::cluster::Cluster;
use crate::domain::logs::{GetLogsOptions, LogLevel, Order};
use crate::infrastructure::constants::{COLUMNS_CLUSTER_EVENTS, COLUMNS_CLUSTER_INFO};
use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tracing::debug;

#[derive(Parser, Debug, Clone)]
pub struct ClusterCommand {
    #[command(subcommand)]
    pub command: ClusterSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ClusterSubcommand {
    /// Show clusters with their subscription and installed add-ons
    Info(ClusterInfoCommand),

    /// Show service-log events for clusters
    Events(ClusterEventsCommand),
}

impl ClusterCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        match &self.command {
            ClusterSubcommand::Info(cmd) => cmd.execute().await,
            ClusterSubcommand::Events(cmd) => cmd.execute().await,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct ClusterInfoCommand {
    /// Cluster name, ID or external ID (substring match on name and ID)
    #[arg(value_name = "SEARCH")]
    pub search: String,

    /// Comma separated list of columns to display
    #[arg(long, default_value = COLUMNS_CLUSTER_INFO)]
    pub columns: String,

    #[command(flatten)]
    pub output: OutputOptions,
}

impl ClusterInfoCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let session = Session::new().await.context("starting session")?;
        let mut table = self.output.renderer(&self.columns);

        let mut clusters = session.clusters().search_by_name_or_id(&self.search);

        clusters
            .for_each(async |mut cluster: Cluster| {
                cluster
                    .with_subscription()
                    .await
                    .context("retrieving subscription")?;

                let report = cluster
                    .with_addon_installations()
                    .await
                    .context("retrieving addon installations")?;

                session.span().in_scope(|| {
                    debug!(cluster = %cluster.id(), joined = report.joined, complete = report.is_complete(), "joined installations")
                });

                table.write(&cluster);
                Ok::<(), anyhow::Error>(())
            })
            .await?;

        emit(&table.render(), session.pager()).context("writing table")
    }
}

#[derive(Parser, Debug, Clone)]
pub struct ClusterEventsCommand {
    /// Cluster name, ID or external ID (substring match on name and ID)
    #[arg(value_name = "SEARCH")]
    pub cluster: String,

    /// Only show events whose description contains this text
    #[arg(long, default_value = "")]
    pub search: String,

    /// Sort order of events by time: ascending or descending
    #[arg(long, default_value = "descending")]
    pub order: Order,

    /// Only show events with this severity
    #[arg(long, default_value = "")]
    pub level: LogLevel,

    /// Only show events before this time (YYYY-MM-DD HH:MM:SS, UTC)
    #[arg(long, value_parser = parse_time)]
    pub before: Option<DateTime<Utc>>,

    /// Only show events at or after this time (YYYY-MM-DD HH:MM:SS, UTC)
    #[arg(long, value_parser = parse_time)]
    pub after: Option<DateTime<Utc>>,

    /// Comma separated list of columns to display
    #[arg(long, default_value = COLUMNS_CLUSTER_EVENTS)]
    pub columns: String,

    #[command(flatten)]
    pub output: OutputOptions,
}

impl ClusterEventsCommand {
    pub fn log_options(&self) -> GetLogsOptions {
        GetLogsOptions::new()
            .matching_pattern(&self.search)
            .with_level(self.level)
            .before(self.before)
            .after(self.after)
            .sorted(self.order)
    }

    pub async fn execute(&self) -> anyhow::Result<()> {
        let session = Session::new().await.context("starting session")?;
        let mut table = self.output.renderer(&self.columns);
        let options = self.log_options();

        let mut clusters = session.clusters().search_by_name_or_id(&self.cluster);

        clusters
            .for_each(async |cluster: Cluster| {
                let entries = cluster
                    .get_logs(&options)
                    .await
                    .with_context(|| format!("retrieving events for cluster {}", cluster.id()))?;

                for entry in &entries {
                    table.write(entry);
                }

                Ok::<(), anyhow::Error>(())
            })
            .await?;

        emit(&table.render(), session.pager()).context("writing table")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Parser)]
    struct Cli {
        #[command(subcommand)]
        command: ClusterSubcommand,
    }

    #[test]
    fn test_events_defaults() {
        let cli = Cli::parse_from(["cluster", "events", "my-cluster"]);
        let ClusterSubcommand::Events(cmd) = cli.command else {
            panic!("expected events");
        };

        assert_eq!(cmd.cluster, "my-cluster");
        assert_eq!(cmd.order, Order::Descending);
        assert_eq!(cmd.level, LogLevel::None);
        assert_eq!(cmd.columns, COLUMNS_CLUSTER_EVENTS);
        assert_eq!(cmd.log_options().query(), "");
    }

    #[test]
    fn test_events_flags_build_query() {
        let cli = Cli::parse_from([
            "cluster",
            "events",
            "my-cluster",
            "--search",
            "fail",
            "--level",
            "error",
            "--after",
            "2022-01-01 00:00:00",
            "--order",
            "asc",
        ]);
        let ClusterSubcommand::Events(cmd) = cli.command else {
            panic!("expected events");
        };

        assert_eq!(cmd.order, Order::Ascending);
        assert_eq!(
            cmd.log_options().query(),
            "description like '%fail%' and severity = 'Error' and timestamp >= '2022-01-01 00:00:00'"
        );
    }

    #[test]
    fn test_events_rejects_bad_time() {
        assert!(Cli::try_parse_from(["cluster", "events", "c", "--before", "noon"]).is_err());
    }

    #[test]
    fn test_info_requires_search() {
        assert!(Cli::try_parse_from(["cluster", "info"]).is_err());
    }
}
