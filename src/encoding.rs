//! Wire-compatible integer encoding of content spec nodes
//!
//! Grammar tables exchange nodes as flat records with a small integer tag.
//! The numbering is an interchange contract: base tags 0 through 9 name the
//! node kinds, and a wildcard's processContents mode rides on the tag as an
//! arithmetic offset (+16 for lax, +32 for skip) instead of a separate slot.
//! Decoding happens once, at the store boundary; the in-memory
//! [`ContentSpec`] keeps the two wildcard axes as ordinary fields and never
//! sees the offsets.

use crate::error::{Error, Result};
use crate::namespaces::QName;
use crate::node::{ContentSpec, Handle};
use crate::wildcards::{NamespaceConstraint, ProcessContents};

/// Mask extracting the base kind from a possibly offset tag
pub const TAG_MASK: u8 = 0x0f;
/// Offset a wildcard tag carries for processContents="lax"
pub const LAX_OFFSET: u8 = 16;
/// Offset a wildcard tag carries for processContents="skip"
pub const SKIP_OFFSET: u8 = 32;

/// Name or PCDATA leaf
pub const LEAF: u8 = 0;
/// `?` repetition
pub const ZERO_OR_ONE: u8 = 1;
/// `*` repetition
pub const ZERO_OR_MORE: u8 = 2;
/// `+` repetition
pub const ONE_OR_MORE: u8 = 3;
/// Choice chain link
pub const CHOICE: u8 = 4;
/// Sequence chain link
pub const SEQUENCE: u8 = 5;
/// `##any` wildcard, strict
pub const ANY: u8 = 6;
/// `##other` wildcard, strict
pub const ANY_OTHER: u8 = 7;
/// Namespace-list wildcard, strict
pub const ANY_NAMESPACE: u8 = 8;
/// All chain link
pub const ALL: u8 = 9;

/// `##any` wildcard, lax
pub const ANY_LAX: u8 = ANY + LAX_OFFSET;
/// `##other` wildcard, lax
pub const ANY_OTHER_LAX: u8 = ANY_OTHER + LAX_OFFSET;
/// Namespace-list wildcard, lax
pub const ANY_NAMESPACE_LAX: u8 = ANY_NAMESPACE + LAX_OFFSET;
/// `##any` wildcard, skip
pub const ANY_SKIP: u8 = ANY + SKIP_OFFSET;
/// `##other` wildcard, skip
pub const ANY_OTHER_SKIP: u8 = ANY_OTHER + SKIP_OFFSET;
/// Namespace-list wildcard, skip
pub const ANY_NAMESPACE_SKIP: u8 = ANY_NAMESPACE + SKIP_OFFSET;

/// Whether a tag's base kind is one of the three wildcard kinds
pub fn is_wildcard_tag(tag: u8) -> bool {
    matches!(tag & TAG_MASK, ANY | ANY_OTHER | ANY_NAMESPACE)
}

/// Split a raw tag into its base kind and processContents mode
///
/// Only wildcard bases may carry an offset; every other offset combination
/// and every unassigned base is a decoding error.
pub fn split_tag(tag: u8) -> Result<(u8, ProcessContents)> {
    let base = tag & TAG_MASK;
    let mode = match tag - base {
        0 => ProcessContents::Strict,
        LAX_OFFSET => ProcessContents::Lax,
        SKIP_OFFSET => ProcessContents::Skip,
        _ => {
            return Err(Error::Decode(format!(
                "unknown content spec tag offset in {}",
                tag
            )))
        }
    };
    if base > ALL {
        return Err(Error::Decode(format!("unknown content spec tag {}", tag)));
    }
    if mode != ProcessContents::Strict && !is_wildcard_tag(base) {
        return Err(Error::Decode(format!(
            "tag {} carries a processContents offset but is not a wildcard",
            tag
        )));
    }
    Ok((base, mode))
}

/// Combine a wildcard base tag with a processContents mode
pub fn combine_tag(base: u8, mode: ProcessContents) -> Result<u8> {
    if base & TAG_MASK != base || !is_wildcard_tag(base) {
        return Err(Error::Decode(format!(
            "tag {} cannot carry a processContents offset",
            base
        )));
    }
    Ok(base + mode_offset(mode))
}

fn mode_offset(mode: ProcessContents) -> u8 {
    match mode {
        ProcessContents::Strict => 0,
        ProcessContents::Lax => LAX_OFFSET,
        ProcessContents::Skip => SKIP_OFFSET,
    }
}

/// Flat record form of a single node, as a grammar table stores it
///
/// `name` carries the leaf payload and `uri` the wildcard payload; child
/// slots that hold no handle are [`Handle::NIL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawContentSpec {
    /// Node kind, possibly carrying a processContents offset
    pub tag: u8,
    /// First child, or the repetition operand
    pub left: Handle,
    /// Second child of a chain link
    pub right: Handle,
    /// Leaf name (`None` for PCDATA leaves and non-leaf nodes)
    pub name: Option<QName>,
    /// Wildcard namespace (`##other` and namespace-list kinds)
    pub uri: Option<String>,
}

impl RawContentSpec {
    /// Decode this record into a typed node
    pub fn decode(&self) -> Result<ContentSpec> {
        let (base, mode) = split_tag(self.tag)?;
        let spec = match base {
            LEAF => ContentSpec::Leaf {
                name: self.name.clone(),
            },
            ZERO_OR_ONE => ContentSpec::ZeroOrOne { operand: self.left },
            ZERO_OR_MORE => ContentSpec::ZeroOrMore { operand: self.left },
            ONE_OR_MORE => ContentSpec::OneOrMore { operand: self.left },
            CHOICE => ContentSpec::Choice {
                left: self.left,
                right: self.right,
            },
            SEQUENCE => ContentSpec::Sequence {
                left: self.left,
                right: self.right,
            },
            ALL => ContentSpec::All {
                left: self.left,
                right: self.right,
            },
            ANY => ContentSpec::Wildcard {
                constraint: NamespaceConstraint::Any,
                process_contents: mode,
            },
            ANY_OTHER => ContentSpec::Wildcard {
                constraint: NamespaceConstraint::Other(self.require_uri()?),
                process_contents: mode,
            },
            ANY_NAMESPACE => ContentSpec::Wildcard {
                constraint: NamespaceConstraint::NamespaceList(self.require_uri()?),
                process_contents: mode,
            },
            other => {
                return Err(Error::Decode(format!("unknown content spec tag {}", other)))
            }
        };
        Ok(spec)
    }

    fn require_uri(&self) -> Result<String> {
        self.uri.clone().ok_or_else(|| {
            Error::Decode(format!("tag {} record is missing its namespace", self.tag))
        })
    }
}

impl From<&ContentSpec> for RawContentSpec {
    /// Encode a typed node back into its flat record form
    fn from(spec: &ContentSpec) -> Self {
        let mut raw = RawContentSpec {
            tag: LEAF,
            left: Handle::NIL,
            right: Handle::NIL,
            name: None,
            uri: None,
        };
        match spec {
            ContentSpec::Leaf { name } => {
                raw.name = name.clone();
            }
            ContentSpec::ZeroOrOne { operand } => {
                raw.tag = ZERO_OR_ONE;
                raw.left = *operand;
            }
            ContentSpec::ZeroOrMore { operand } => {
                raw.tag = ZERO_OR_MORE;
                raw.left = *operand;
            }
            ContentSpec::OneOrMore { operand } => {
                raw.tag = ONE_OR_MORE;
                raw.left = *operand;
            }
            ContentSpec::Choice { left, right } => {
                raw.tag = CHOICE;
                raw.left = *left;
                raw.right = *right;
            }
            ContentSpec::Sequence { left, right } => {
                raw.tag = SEQUENCE;
                raw.left = *left;
                raw.right = *right;
            }
            ContentSpec::All { left, right } => {
                raw.tag = ALL;
                raw.left = *left;
                raw.right = *right;
            }
            ContentSpec::Wildcard {
                constraint,
                process_contents,
            } => {
                let base = match constraint {
                    NamespaceConstraint::Any => ANY,
                    NamespaceConstraint::Other(_) => ANY_OTHER,
                    NamespaceConstraint::NamespaceList(_) => ANY_NAMESPACE,
                };
                raw.tag = base + mode_offset(*process_contents);
                raw.uri = constraint.uri().map(String::from);
            }
        }
        raw
    }
}
