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

//! Row-producing contract shared by domain objects and the table renderer

use crate::infrastructure::constants::OCM_TIME_FORMAT;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Display field name -> rendered value.
pub type RowData = BTreeMap<String, String>;

/// Implemented by anything that can be written as a table row.
pub trait ProvideRowData {
    fn provide_row_data(&self) -> RowData;
}

/// Normalize a column or field name so that "Cluster ID", "cluster-id" and
/// "cluster_id" all refer to the same column.
pub fn normalize(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

/// Copy every field of `other` into `row` with `prefix` prepended.
pub fn merge_prefixed(row: &mut RowData, prefix: &str, other: RowData) {
    for (k, v) in other {
        row.insert(format!("{}{}", prefix, k), v);
    }
}

pub(crate) fn opt_display<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(|v| v.to_string()).unwrap_or_default()
}

/// Render an optional UTC timestamp, empty when absent.
pub(crate) fn opt_time(value: &Option<DateTime<Utc>>) -> String {
    value
        .map(|t| t.format(OCM_TIME_FORMAT).to_string())
        .unwrap_or_default()
}
