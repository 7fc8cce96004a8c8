//! Content model node representation
//!
//! A content model is stored as a forest of typed nodes that refer to each
//! other by integer [`Handle`]s instead of owned child links, so subtrees can
//! sit in flat storage and be shared between element declarations. The node
//! kinds mirror the operators of DTD content models plus the XML Schema
//! additions: `all` groups and namespace wildcards.
//!
//! N-ary choice/sequence/all lists are left-leaning chains of binary links of
//! the same variant; a link whose `right` is [`Handle::NIL`] carries no
//! further operand.
//!
//! Reference: https://www.w3.org/TR/xml/#sec-element-content

use crate::namespaces::QName;
use crate::wildcards::{NamespaceConstraint, ProcessContents};
use std::fmt;

/// Opaque integer key addressing a node inside a store
///
/// Two handle constants matter to callers: a root handle obtained from the
/// grammar builder, and [`Handle::NIL`] marking the absence of an operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(i32);

impl Handle {
    /// Sentinel for "no operand" / "no more chain links"
    pub const NIL: Handle = Handle(-2);

    /// Create a handle from its raw integer value
    pub const fn new(raw: i32) -> Self {
        Handle(raw)
    }

    /// Raw integer value of this handle
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Whether this is the NIL sentinel
    pub const fn is_nil(self) -> bool {
        self.0 == -2
    }

    /// Vector index for store-backed handles, if non-negative
    pub(crate) fn index(self) -> Option<usize> {
        usize::try_from(self.0).ok()
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nil() {
            write!(f, "NIL")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Group composition kind shared by the three chain variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelType {
    /// Ordered group (`,` separator)
    Sequence,
    /// Alternative group (`|` separator)
    Choice,
    /// Unordered group, XML Schema `all` (`,` separator)
    All,
}

impl ModelType {
    /// Separator between operands in the canonical form
    pub fn separator(self) -> char {
        match self {
            ModelType::Choice => '|',
            ModelType::Sequence | ModelType::All => ',',
        }
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelType::Sequence => write!(f, "sequence"),
            ModelType::Choice => write!(f, "choice"),
            ModelType::All => write!(f, "all"),
        }
    }
}

/// A single content model node
///
/// Equality and hashing are structural (variant, child handles, payloads),
/// which is what lets interning stores collapse equal subtrees into one
/// handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContentSpec {
    /// Element name particle, or the PCDATA text leaf when `name` is `None`
    Leaf {
        /// Element name; `None` marks the text leaf of a mixed model
        name: Option<QName>,
    },
    /// `?` repetition
    ZeroOrOne {
        /// The repeated particle
        operand: Handle,
    },
    /// `*` repetition
    ZeroOrMore {
        /// The repeated particle
        operand: Handle,
    },
    /// `+` repetition
    OneOrMore {
        /// The repeated particle
        operand: Handle,
    },
    /// One link of a `|` chain
    Choice {
        /// Operand at this link
        left: Handle,
        /// Next link or operand, [`Handle::NIL`] at the end of the chain
        right: Handle,
    },
    /// One link of a `,` chain
    Sequence {
        /// Operand at this link
        left: Handle,
        /// Next link or operand, [`Handle::NIL`] at the end of the chain
        right: Handle,
    },
    /// One link of an unordered `all` chain
    All {
        /// Operand at this link
        left: Handle,
        /// Next link or operand, [`Handle::NIL`] at the end of the chain
        right: Handle,
    },
    /// Namespace wildcard particle (XML Schema `any`)
    Wildcard {
        /// Which namespaces the wildcard admits
        constraint: NamespaceConstraint,
        /// Validation strictness for matched elements
        process_contents: ProcessContents,
    },
}

impl ContentSpec {
    /// The PCDATA text leaf of a mixed model
    pub fn pcdata() -> Self {
        ContentSpec::Leaf { name: None }
    }

    /// Whether this node is a leaf (named or PCDATA)
    pub fn is_leaf(&self) -> bool {
        matches!(self, ContentSpec::Leaf { .. })
    }

    /// Whether this node is the PCDATA text leaf
    pub fn is_pcdata(&self) -> bool {
        matches!(self, ContentSpec::Leaf { name: None })
    }

    /// Whether this node is a `?`/`*`/`+` repetition
    pub fn is_repetition(&self) -> bool {
        matches!(
            self,
            ContentSpec::ZeroOrOne { .. }
                | ContentSpec::ZeroOrMore { .. }
                | ContentSpec::OneOrMore { .. }
        )
    }

    /// Group kind of a Choice/Sequence/All link
    pub fn model_type(&self) -> Option<ModelType> {
        match self {
            ContentSpec::Choice { .. } => Some(ModelType::Choice),
            ContentSpec::Sequence { .. } => Some(ModelType::Sequence),
            ContentSpec::All { .. } => Some(ModelType::All),
            _ => None,
        }
    }
}
