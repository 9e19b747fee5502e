//! Status icons for CLI output

/// Icons prefixed to progress and outcome messages
pub struct StatusIcon;

impl StatusIcon {
    /// Action completed
    pub const SUCCESS: &'static str = "✓";

    /// Action skipped or needs attention
    pub const WARNING: &'static str = "⚠";

    /// Action failed
    pub const ERROR: &'static str = "✗";

    /// Action in progress
    pub const PENDING: &'static str = "⏳";
}
