//! Error types for contentspec
//!
//! This module defines all error types used throughout the library.
//! Rendering failures carry the handle that triggered them, so a caller can
//! point at the broken part of a grammar when reporting.

use crate::node::Handle;
use thiserror::Error;

/// Result type alias using contentspec Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for content spec operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Canonical rendering error
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// Dangling or out-of-range handle
    #[error("handle error: {0}")]
    Handle(#[from] HandleNotFound),

    /// Name error (invalid XML name)
    #[error("name error: {0}")]
    Name(String),

    /// Decoding error (raw content spec record to node)
    #[error("decoding error: {0}")]
    Decode(String),
}

/// A handle that does not resolve to any stored node
///
/// Returned by [`crate::ContentSpecProvider::resolve`] for out-of-range,
/// stale, or [`Handle::NIL`] handles. A normal, recoverable outcome: callers
/// decide whether the owning grammar is unusable.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("no content spec node for handle {0}")]
pub struct HandleNotFound(pub Handle);

/// Failure while rendering a content model to its canonical form
///
/// All three conditions are deterministic structural problems in the grammar
/// data. They are returned, never panicked: the renderer commonly runs inside
/// validation error reporting and must not fail harder than the error it is
/// describing.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderError {
    /// A handle reached during the walk does not resolve to a node
    #[error("content spec handle {0} does not resolve to a node")]
    BrokenReference(Handle),

    /// A chain loops back through a handle already on the current path
    #[error("content spec cycle through handle {0}")]
    Cyclic(Handle),

    /// A PCDATA leaf appeared outside a mixed content model
    #[error("#PCDATA is only allowed inside mixed content models")]
    MisplacedPcdata,
}

impl From<HandleNotFound> for RenderError {
    fn from(err: HandleNotFound) -> Self {
        RenderError::BrokenReference(err.0)
    }
}
