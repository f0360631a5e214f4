/*
[INPUT]:  Request parameters supplied by service facades
[OUTPUT]: Canonical (key-sorted, escaped, empty-filtered) query strings
[POS]:    HTTP layer - parameter set shared by signer and transport
[UPDATE]: When changing query canonicalization or escaping rules
*/

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use url::form_urlencoded::byte_serialize;

/// Parameter set for a single API call.
///
/// Keys iterate in byte-lexicographic order, which is the canonical order
/// required for a reproducible signature.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    inner: BTreeMap<String, String>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a parameter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl fmt::Display) {
        self.inner.insert(key.into(), value.to_string());
    }

    /// Chained form of [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert only when `value` is `Some`.
    pub fn with_opt<V: fmt::Display>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.insert(key, value);
        }
        self
    }

    /// Insert a time as epoch milliseconds, only when `time` is `Some`.
    pub fn with_time(self, key: impl Into<String>, time: Option<DateTime<Utc>>) -> Self {
        self.with_opt(key, time.map(|t| t.timestamp_millis()))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Build the canonical query string.
    ///
    /// Pairs are emitted in key order as `key=escaped_value` and joined with `&`.
    /// Parameters whose value is the empty string are dropped. Values are escaped
    /// with form-urlencoded rules (space becomes `+`); keys are emitted verbatim.
    pub fn to_query_string(&self) -> String {
        self.iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| format!("{key}={}", escape(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            inner: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn escape(value: &str) -> String {
    byte_serialize(value.as_bytes()).collect()
}
