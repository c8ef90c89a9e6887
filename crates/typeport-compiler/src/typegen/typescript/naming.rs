//! Namespace prefixes and declaration names.
//!
//! Every struct lives in a namespace (e.g. an import path). The prefix map
//! turns that namespace into a short word that is prepended to the bare type
//! name, so `Document` in the genesis namespace becomes `GenesisDocument`.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::{Error, Result};

/// Namespace -> prefix mapping that remembers which entries were looked up.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NamespaceMap {
    prefixes: IndexMap<String, String>,
    consulted: HashSet<String>,
}

impl NamespaceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a prefix. Returns the previous prefix, if any.
    pub fn insert(&mut self, namespace: impl Into<String>, prefix: impl Into<String>) -> Option<String> {
        self.prefixes.insert(namespace.into(), prefix.into())
    }

    /// Look up a prefix without marking the namespace as consulted.
    pub fn prefix(&self, namespace: &str) -> Option<&str> {
        self.prefixes.get(namespace).map(String::as_str)
    }

    /// Look up a prefix and mark the namespace as consulted.
    pub(super) fn consult(&mut self, namespace: &str) -> Option<&str> {
        self.consulted.insert(namespace.to_string());
        self.prefix(namespace)
    }

    pub fn is_consulted(&self, namespace: &str) -> bool {
        self.consulted.contains(namespace)
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Configured namespaces never consulted, in insertion order.
    pub fn unused(&self) -> impl Iterator<Item = &str> {
        self.prefixes
            .keys()
            .filter(|ns| !self.consulted.contains(*ns))
            .map(String::as_str)
    }

    /// Fail if any configured prefix was never needed.
    pub fn ensure_all_consulted(&self) -> Result<()> {
        let namespaces: Vec<String> = self.unused().map(str::to_string).collect();
        if namespaces.is_empty() {
            return Ok(());
        }
        Err(Error::StaleConfiguration { namespaces })
    }
}

impl From<IndexMap<String, String>> for NamespaceMap {
    fn from(prefixes: IndexMap<String, String>) -> Self {
        Self {
            prefixes,
            consulted: HashSet::new(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for NamespaceMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let prefixes: IndexMap<String, String> = iter
            .into_iter()
            .map(|(ns, prefix)| (ns.into(), prefix.into()))
            .collect();
        Self::from(prefixes)
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for NamespaceMap {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (ns, prefix) in iter {
            self.insert(ns, prefix);
        }
    }
}

/// Declaration name for a struct: the bare name when the prefix already is
/// the name (so `Meta` in a namespace prefixed `Meta` stays `Meta`),
/// otherwise prefix followed by name.
pub fn reference_name(prefix: &str, name: &str) -> String {
    if prefix == name {
        name.to_string()
    } else {
        format!("{prefix}{name}")
    }
}
