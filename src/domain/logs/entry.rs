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

use crate::infrastructure::ocm::models::LogEntryObject;
use crate::shared::error::AddonsError;
use crate::shared::row::{opt_time, ProvideRowData, RowData};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// A service-log record attached to a cluster.
#[derive(Debug, Clone)]
pub struct LogEntry {
    object: LogEntryObject,
}

impl LogEntry {
    pub fn new(object: LogEntryObject) -> Self {
        Self { object }
    }

    pub fn id(&self) -> &str {
        &self.object.id
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.object.timestamp
    }

    pub fn severity(&self) -> &str {
        &self.object.severity
    }

    pub fn summary(&self) -> &str {
        &self.object.summary
    }
}

impl ProvideRowData for LogEntry {
    fn provide_row_data(&self) -> RowData {
        let e = &self.object;

        RowData::from([
            ("timestamp".to_string(), opt_time(&e.timestamp)),
            ("cluster_uuid".to_string(), e.cluster_uuid.clone()),
            ("description".to_string(), e.description.clone()),
            ("id".to_string(), e.id.clone()),
            ("service_name".to_string(), e.service_name.clone()),
            ("severity".to_string(), e.severity.to_uppercase()),
            ("summary".to_string(), e.summary.clone()),
            ("username".to_string(), e.username.clone()),
        ])
    }
}

/// Service-log severity. `None` means "any level".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    #[default]
    None,
    Debug,
    Info,
    Warning,
    Error,
    Fatal,
}

impl LogLevel {
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Fatal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::None => "",
            LogLevel::Debug => "Debug",
            LogLevel::Info => "Info",
            LogLevel::Warning => "Warning",
            LogLevel::Error => "Error",
            LogLevel::Fatal => "Fatal",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = AddonsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" => Ok(LogLevel::None),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warning" | "warn" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            "fatal" => Ok(LogLevel::Fatal),
            other => Err(AddonsError::invalid_argument(format!(
                "unknown log level '{}' (expected one of: debug, info, warning, error, fatal)",
                other
            ))),
        }
    }
}

/// Sort direction for log entries. `None` sorts newest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Order {
    #[default]
    None,
    Ascending,
    Descending,
}

impl FromStr for Order {
    type Err = AddonsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" => Ok(Order::None),
            "asc" | "ascending" => Ok(Order::Ascending),
            "desc" | "descending" => Ok(Order::Descending),
            other => Err(AddonsError::invalid_argument(format!(
                "unknown sort order '{}' (expected 'ascending' or 'descending')",
                other
            ))),
        }
    }
}

pub type LogEntryComparator = Arc<dyn Fn(&LogEntry, &LogEntry) -> Ordering + Send + Sync>;

/// Compare entries by timestamp in the given order.
pub fn log_entry_by_time(order: Order) -> LogEntryComparator {
    match order {
        Order::Ascending => Arc::new(|a: &LogEntry, b: &LogEntry| a.timestamp().cmp(&b.timestamp())),
        Order::Descending | Order::None => {
            Arc::new(|a: &LogEntry, b: &LogEntry| b.timestamp().cmp(&a.timestamp()))
        }
    }
}

/// Insertion-ordered buffer sorted once after collection.
pub struct LogEntrySorter {
    entries: Vec<LogEntry>,
    compare: LogEntryComparator,
}

impl LogEntrySorter {
    pub fn new(capacity: usize, compare: LogEntryComparator) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            compare,
        }
    }

    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn sort(&mut self) {
        let compare = &self.compare;
        self.entries.sort_by(|a, b| compare(a, b));
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<LogEntry> {
        self.entries
    }
}
