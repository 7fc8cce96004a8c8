//! Wildcard particle axes
//!
//! A wildcard particle admits elements by namespace rather than by name. It
//! carries two independent axes: which namespaces it admits, and how strictly
//! a matched element is validated (processContents). Every combination of the
//! two is legal. A list wildcard holds a single namespace; multi-namespace
//! lists are built as choice chains with one node per member.
//!
//! Reference: https://www.w3.org/TR/xmlschema11-1/#Wildcards

use std::fmt;

/// Process contents mode for wildcards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProcessContents {
    /// Validate strictly - element must be declared
    #[default]
    Strict,
    /// Validate if declaration found, otherwise accept
    Lax,
    /// Skip validation entirely
    Skip,
}

impl ProcessContents {
    /// Parse from string value
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "strict" => Some(Self::Strict),
            "lax" => Some(Self::Lax),
            "skip" => Some(Self::Skip),
            _ => None,
        }
    }

    /// The XSD attribute value for this mode
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Lax => "lax",
            Self::Skip => "skip",
        }
    }
}

impl fmt::Display for ProcessContents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Namespace constraint of a wildcard node
///
/// `NamespaceList` carries one namespace: a wildcard admitting several listed
/// namespaces is stored as a choice chain of `NamespaceList` nodes, one per
/// member.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum NamespaceConstraint {
    /// Any namespace is allowed (##any)
    #[default]
    Any,
    /// Any namespace except the given one (##other)
    Other(String),
    /// One member of an explicit namespace list
    NamespaceList(String),
}

impl NamespaceConstraint {
    /// The namespace URI this constraint names, if it names one
    pub fn uri(&self) -> Option<&str> {
        match self {
            Self::Any => None,
            Self::Other(uri) | Self::NamespaceList(uri) => Some(uri),
        }
    }
}

impl fmt::Display for NamespaceConstraint {
    /// The canonical wildcard token used in rendered content models
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "##any"),
            Self::Other(uri) => write!(f, "##other:uri={}", uri),
            Self::NamespaceList(uri) => write!(f, "namespace:uri={}", uri),
        }
    }
}
