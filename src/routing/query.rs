//! Query string helpers.
//!
//! Pure functions over `application/x-www-form-urlencoded` query strings.
//! They share no state with route matching.

use serde::ser::{Serialize, SerializeMap, Serializer};
use url::form_urlencoded;

use crate::history::Location;
use crate::routing::base::BasePath;

/// Flat, ordered key → value mapping.
///
/// Inserting an existing key replaces its value in place, so a key keeps the
/// position of its first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query(Vec<(String, String)>);

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let pos = self.0.iter().position(|(k, _)| k == key)?;
        Some(self.0.remove(pos).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Query {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = Query::new();
        for (k, v) in iter {
            query.insert(k, v);
        }
        query
    }
}

impl Serialize for Query {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// A value that may be absent from a query.
///
/// `None` and `""` both mean "drop this key".
pub trait QueryValue {
    fn as_query_value(&self) -> Option<&str>;
}

impl QueryValue for str {
    fn as_query_value(&self) -> Option<&str> {
        Some(self)
    }
}

impl QueryValue for String {
    fn as_query_value(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl<T: QueryValue> QueryValue for Option<T> {
    fn as_query_value(&self) -> Option<&str> {
        self.as_ref().and_then(QueryValue::as_query_value)
    }
}

impl<T: QueryValue + ?Sized> QueryValue for &T {
    fn as_query_value(&self) -> Option<&str> {
        (**self).as_query_value()
    }
}

fn present<V: QueryValue + ?Sized>(value: &V) -> Option<&str> {
    value.as_query_value().filter(|v| !v.is_empty())
}

/// Parse a query string, with or without the leading `?`.
///
/// Duplicate keys keep the last value.
pub fn parse_query(search: &str) -> Query {
    let raw = search.strip_prefix('?').unwrap_or(search);
    form_urlencoded::parse(raw.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Serialize entries to a query string without the leading `?`.
///
/// Entries whose value is `None` or empty are omitted.
pub fn stringify_query<I, K, V>(entries: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: QueryValue,
{
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in entries {
        if let Some(value) = present(&value) {
            serializer.append_pair(key.as_ref(), value);
        }
    }
    serializer.finish()
}

/// URL for the current location with `patch` merged over its query.
///
/// Patch entries override existing keys; `None` or empty values remove the key.
/// The result always carries the base path exactly once.
pub fn get_url<I, K, V>(location: &Location, base: &BasePath, patch: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: QueryValue,
{
    let mut merged = parse_query(&location.search);
    for (key, value) in patch {
        match present(&value) {
            Some(value) => merged.insert(key.as_ref(), value),
            None => {
                merged.remove(key.as_ref());
            }
        }
    }

    let query = stringify_query(merged.iter());
    let path = base.strip(&location.pathname);
    if query.is_empty() {
        format!("{base}{path}")
    } else {
        format!("{base}{path}?{query}")
    }
}
