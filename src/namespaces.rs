//! XML namespace handling
//!
//! This module provides the qualified name (QName) value type used for leaf
//! particles. A QName pairs an optional namespace URI with a local name;
//! prefix-to-namespace resolution happens in the grammar reader, which hands
//! finished QNames to the node store.

use crate::error::{Error, Result};
use crate::names;
use std::fmt;

/// XML Namespace URI
pub type NamespaceUri = String;

/// Qualified name (QName) - combination of namespace and local name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    /// Namespace URI (None for no namespace)
    pub namespace: Option<NamespaceUri>,
    /// Local name
    pub local_name: String,
}

impl QName {
    /// Create a new QName
    pub fn new(namespace: Option<impl Into<String>>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.map(|s| s.into()),
            local_name: local_name.into(),
        }
    }

    /// Create a QName without a namespace
    pub fn local(local_name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            local_name: local_name.into(),
        }
    }

    /// Create a QName with a namespace
    pub fn namespaced(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            local_name: local_name.into(),
        }
    }

    /// Parse a name in `local`, `prefix:local`, or `{uri}local` form
    ///
    /// Prefixed names are validated and reduced to their local part; mapping
    /// a prefix to a namespace needs the declaring context, which belongs to
    /// the grammar reader, not the node model.
    pub fn parse(name: &str) -> Result<Self> {
        if let Some(rest) = name.strip_prefix('{') {
            let (uri, local) = rest
                .split_once('}')
                .ok_or_else(|| Error::Name(format!("Unterminated namespace in '{}'", name)))?;
            names::validate_ncname(local)?;
            Ok(QName::namespaced(uri, local))
        } else {
            names::validate_qname(name)?;
            let (_, local) = names::split_qname(name);
            Ok(QName::local(local))
        }
    }
}

impl fmt::Display for QName {
    /// Clark notation (`{uri}local`) when namespaced, the bare local name
    /// otherwise
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.local_name),
            None => write!(f, "{}", self.local_name),
        }
    }
}
