//! Flags shared between commands

use crate::cli::display::TableRenderer;
use crate::infrastructure::constants::OCM_TIME_FORMAT;
use chrono::{DateTime, NaiveDateTime, Utc};
use clap::Args;

/// Output flags accepted by every table-producing command.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputOptions {
    /// Do not print the header row
    #[arg(long)]
    pub no_headers: bool,

    /// Do not color the output
    #[arg(long)]
    pub no_color: bool,
}

impl OutputOptions {
    /// A renderer for `columns` honoring these flags. Also turns off
    /// colored output process-wide when `--no-color` is set.
    pub fn renderer(&self, columns: &str) -> TableRenderer {
        if self.no_color {
            colored::control::set_override(false);
        }

        TableRenderer::new(columns)
            .no_headers(self.no_headers)
            .no_color(self.no_color)
    }
}

/// Parse a `YYYY-MM-DD HH:MM:SS` time, read as UTC.
pub fn parse_time(value: &str) -> Result<DateTime<Utc>, String> {
    NaiveDateTime::parse_from_str(value.trim(), OCM_TIME_FORMAT)
        .map(|t| t.and_utc())
        .map_err(|e| {
            format!(
                "invalid time '{}': {} (expected format 'YYYY-MM-DD HH:MM:SS')",
                value, e
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_time() {
        let t = parse_time("2022-03-04 05:06:07").unwrap();
        assert_eq!((t.year(), t.month(), t.day()), (2022, 3, 4));
        assert_eq!((t.hour(), t.minute(), t.second()), (5, 6, 7));
    }

    #[test]
    fn test_parse_time_rejects_other_formats() {
        assert!(parse_time("2022-03-04T05:06:07Z").is_err());
        assert!(parse_time("yesterday").unwrap_err().contains("YYYY-MM-DD"));
    }
}
