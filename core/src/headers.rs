//! Header-field mapping carried by a response descriptor.
//!
//! # Design
//! Entries are kept as an ordered `Vec` of owned pairs, so they serialize in
//! a stable order and map directly onto a C array.
//! Lookups compare names ASCII case-insensitively. Supplying the same name
//! twice keeps one entry: the position of the first, the spelling and value
//! of the last. Names and values are otherwise stored untouched.
//!
//! Equality is map equality: same names (case-insensitively) with the same
//! values, in any order. `HashMap` input is sorted by name before insertion
//! so order and case-variant collisions do not depend on the hasher.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Ordered header name/value pairs with case-insensitive map semantics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<(String, String)>", into = "Vec<(String, String)>")]
pub struct HeaderFields {
    entries: Vec<(String, String)>,
}

impl HeaderFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for `name`, compared case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name).map(|i| self.entries[i].1.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(k, _)| k.eq_ignore_ascii_case(name))
    }

    // Only reachable while building; the type exposes no mutators.
    fn insert(&mut self, name: String, value: String) {
        match self.position(&name) {
            Some(i) => self.entries[i] = (name, value),
            None => self.entries.push((name, value)),
        }
    }
}

impl PartialEq for HeaderFields {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(name, value)| other.get(name) == Some(value))
    }
}

impl Eq for HeaderFields {}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for HeaderFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = HeaderFields::new();
        for (k, v) in iter {
            fields.insert(k.into(), v.into());
        }
        fields
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for HeaderFields {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl From<Vec<(String, String)>> for HeaderFields {
    fn from(pairs: Vec<(String, String)>) -> Self {
        pairs.into_iter().collect()
    }
}

impl From<HashMap<String, String>> for HeaderFields {
    fn from(map: HashMap<String, String>) -> Self {
        let mut pairs: Vec<(String, String)> = map.into_iter().collect();
        pairs.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        pairs.into_iter().collect()
    }
}

impl From<BTreeMap<String, String>> for HeaderFields {
    fn from(map: BTreeMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl From<HeaderFields> for Vec<(String, String)> {
    fn from(fields: HeaderFields) -> Self {
        fields.entries
    }
}
