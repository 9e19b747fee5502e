//! Color theme for CLI output

use colored::{Color as TermColor, Colorize};
use comfy_table::Color as TableColor;

/// Color theme for terminal output
#[derive(Debug, Clone)]
pub struct ColorTheme {
    pub success: TableColor,
    pub warning: TableColor,
    pub error: TableColor,
    pub info: TableColor,
    pub muted: TableColor,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            success: TableColor::Green,
            warning: TableColor::Yellow,
            error: TableColor::Red,
            info: TableColor::Cyan,
            muted: TableColor::DarkGrey,
        }
    }
}

impl ColorTheme {
    /// Color for a cluster or installation state.
    pub fn state_color(&self, state: &str) -> Option<TableColor> {
        match state.to_lowercase().as_str() {
            "ready" | "installed" | "succeeded" => Some(self.success),
            "installing" | "pending" | "updating" | "upgrading" | "validating"
            | "waiting" | "hibernating" | "resuming" | "powering_down" => Some(self.warning),
            "error" | "failed" | "deleting" | "uninstalling" => Some(self.error),
            "" => None,
            _ => Some(self.muted),
        }
    }

    /// Color for a service-log severity.
    pub fn severity_color(&self, severity: &str) -> Option<TableColor> {
        match severity.to_lowercase().as_str() {
            "fatal" | "error" => Some(self.error),
            "warning" => Some(self.warning),
            "info" => Some(self.info),
            "debug" => Some(self.muted),
            _ => None,
        }
    }

    /// Color for a boolean flag such as `enabled`.
    pub fn flag_color(&self, value: &str) -> Option<TableColor> {
        match value {
            "true" => Some(self.success),
            "false" => Some(self.muted),
            _ => None,
        }
    }

    /// Pick a color for `value` in the normalized `column`, if that column is
    /// colored at all.
    pub fn column_color(&self, column: &str, value: &str) -> Option<TableColor> {
        if column == "state" || column.ends_with("_state") {
            self.state_color(value)
        } else if column == "severity" {
            self.severity_color(value)
        } else if column == "enabled" || column.ends_with("_enabled") {
            self.flag_color(value)
        } else {
            None
        }
    }
}

/// Convert comfy_table::Color to colored::Color
pub fn table_color_to_colored(color: TableColor) -> TermColor {
    match color {
        TableColor::Green => TermColor::Green,
        TableColor::Yellow => TermColor::Yellow,
        TableColor::Red => TermColor::Red,
        TableColor::Cyan => TermColor::Cyan,
        TableColor::DarkGrey => TermColor::BrightBlack,
        _ => TermColor::White,
    }
}

/// Paint `text` for plain (non-table) output.
pub fn paint(text: &str, color: Option<TableColor>) -> String {
    match color {
        Some(c) => text.color(table_color_to_colored(c)).to_string(),
        None => text.to_string(),
    }
}
