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

//! Builders for OCM's SQL-like search predicates

/// Render `value` as a single-quoted string literal, doubling embedded quotes.
pub fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// `field like '%value%'`
pub fn like_contains(field: &str, value: &str) -> String {
    format!("{} like {}", field, quote(&format!("%{}%", value)))
}

/// `field = 'value'`
pub fn equals(field: &str, value: &str) -> String {
    format!("{} = {}", field, quote(value))
}

/// `field in ('a','b')`
pub fn in_set<S: AsRef<str>>(field: &str, values: &[S]) -> String {
    let quoted: Vec<String> = values.iter().map(|v| quote(v.as_ref())).collect();
    format!("{} in ({})", field, quoted.join(","))
}

/// Join predicates with ` or `.
pub fn any_of(predicates: &[String]) -> String {
    predicates.join(" or ")
}

/// Join predicates with ` and `.
pub fn all_of(predicates: &[String]) -> String {
    predicates.join(" and ")
}
