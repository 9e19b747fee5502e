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

//! Build metadata, stamped by `cargo xtask dist` through environment
//! variables at compile time.

const VERSION: Option<&str> = option_env!("OCM_ADDONS_VERSION");
const COMMIT: Option<&str> = option_env!("OCM_ADDONS_COMMIT");
const DATE: Option<&str> = option_env!("OCM_ADDONS_DATE");
const BUILT_BY: Option<&str> = option_env!("OCM_ADDONS_BUILT_BY");

fn format_version(version: Option<&str>) -> String {
    match version.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => format!("v{}", v.trim_start_matches('v')),
        None => "dev".to_string(),
    }
}

/// `v<version>`, or `dev` for unreleased builds.
pub fn version() -> String {
    format_version(VERSION)
}

pub fn long_version() -> String {
    format!(
        "version: {}\ncommit: {}\ndate: {}\nbuilt by: {}",
        version(),
        COMMIT.unwrap_or("n/a"),
        DATE.unwrap_or("n/a"),
        BUILT_BY.unwrap_or("n/a"),
    )
}
