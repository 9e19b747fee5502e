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

//! Server-side filter for cluster service logs

use crate::domain::logs::entry::{
    log_entry_by_time, LogEntryComparator, LogEntrySorter, LogLevel, Order,
};
use crate::domain::query::{all_of, equals, like_contains};
use crate::infrastructure::constants::OCM_TIME_FORMAT;
use chrono::{DateTime, Utc};

#[derive(Clone)]
pub struct GetLogsOptions {
    pattern: String,
    level: LogLevel,
    before: Option<DateTime<Utc>>,
    after: Option<DateTime<Utc>>,
    compare: LogEntryComparator,
}

impl Default for GetLogsOptions {
    fn default() -> Self {
        Self {
            pattern: String::new(),
            level: LogLevel::None,
            before: None,
            after: None,
            compare: log_entry_by_time(Order::None),
        }
    }
}

impl GetLogsOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn matching_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn before(mut self, time: Option<DateTime<Utc>>) -> Self {
        self.before = time;
        self
    }

    pub fn after(mut self, time: Option<DateTime<Utc>>) -> Self {
        self.after = time;
        self
    }

    pub fn sorted(mut self, order: Order) -> Self {
        self.compare = log_entry_by_time(order);
        self
    }

    pub fn sorted_by(mut self, compare: LogEntryComparator) -> Self {
        self.compare = compare;
        self
    }

    /// Predicate string for the cluster_logs search parameter. Empty when
    /// no filter is set.
    pub fn query(&self) -> String {
        let mut predicates = Vec::new();

        if !self.pattern.is_empty() {
            predicates.push(like_contains("description", &self.pattern));
        }

        if self.level != LogLevel::None {
            predicates.push(equals("severity", self.level.as_str()));
        }

        if let Some(after) = self.after {
            predicates.push(format!(
                "timestamp >= '{}'",
                after.format(OCM_TIME_FORMAT)
            ));
        }

        if let Some(before) = self.before {
            predicates.push(format!(
                "timestamp <= '{}'",
                before.format(OCM_TIME_FORMAT)
            ));
        }

        all_of(&predicates)
    }

    pub(crate) fn sorter(&self, capacity: usize) -> LogEntrySorter {
        LogEntrySorter::new(capacity, self.compare.clone())
    }
}

impl std::fmt::Debug for GetLogsOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GetLogsOptions")
            .field("query", &self.query())
            .finish()
    }
}
