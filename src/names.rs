//! Validation helpers for XML Names, NCNames, and QNames.
//!
//! The checks implement the Name productions from the XML and
//! Namespaces in XML recommendations. Grammar builders run leaf names
//! through them before storing anything in a node store.
//!
//! Reference: https://www.w3.org/TR/xml/#NT-Name

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;

// Character classes from the Name production, colon included
const NAME_START: &str = r":A-Z_a-z\u{C0}-\u{D6}\u{D8}-\u{F6}\u{F8}-\u{2FF}\u{370}-\u{37D}\u{37F}-\u{1FFF}\u{200C}-\u{200D}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\u{10000}-\u{EFFFF}";
const NAME_EXTRA: &str = r"\-.0-9\u{B7}\u{300}-\u{36F}\u{203F}-\u{2040}";

static NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^[{0}][{0}{1}]*$", NAME_START, NAME_EXTRA)).unwrap()
});

static NCNAME: Lazy<Regex> = Lazy::new(|| {
    // the colon only appears in the start class
    let start = NAME_START.trim_start_matches(':');
    Regex::new(&format!("^[{0}][{0}{1}]*$", start, NAME_EXTRA)).unwrap()
});

/// Check whether a string matches the Name production.
pub fn is_valid_name(name: &str) -> bool {
    NAME.is_match(name)
}

/// Check whether a string matches the NCName production.
pub fn is_valid_ncname(name: &str) -> bool {
    NCNAME.is_match(name)
}

/// Check whether a string is a QName, either `local` or `prefix:local`.
pub fn is_valid_qname(name: &str) -> bool {
    // split_once leaves extra colons in the local part, which NCName rejects
    if let Some((prefix, local)) = name.split_once(':') {
        is_valid_ncname(prefix) && is_valid_ncname(local)
    } else {
        is_valid_ncname(name)
    }
}

/// Require that a string is a valid XML Name.
pub fn validate_name(name: &str) -> Result<()> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(Error::Name(format!("Invalid XML Name: '{}'", name)))
    }
}

/// Require that a string is a valid NCName.
pub fn validate_ncname(name: &str) -> Result<()> {
    if is_valid_ncname(name) {
        Ok(())
    } else {
        Err(Error::Name(format!("Invalid NCName: '{}'", name)))
    }
}

/// Require that a string is a valid QName.
pub fn validate_qname(name: &str) -> Result<()> {
    if is_valid_qname(name) {
        Ok(())
    } else {
        Err(Error::Name(format!("Invalid QName: '{}'", name)))
    }
}

/// Split a qualified name on the first colon into an optional prefix and a local part.
pub fn split_qname(qname: &str) -> (Option<&str>, &str) {
    if let Some((prefix, local)) = qname.split_once(':') {
        (Some(prefix), local)
    } else {
        (None, qname)
    }
}
