//! # contentspec
//!
//! Content model representation and canonical serialization for validating
//! XML processors.
//!
//! Element content declarations (DTD `ELEMENT` bodies, XML Schema particle
//! trees) are stored as forests of typed nodes addressed by integer
//! handles, so subtrees can be shared across declarations instead of owned
//! by them. The renderer walks a forest from a root handle and reproduces
//! the minimal, correctly parenthesized textual form of the declaration.
//!
//! ## Features
//!
//! - Typed content model nodes addressed by opaque integer handles
//! - Arena and hash-consing node stores, plus traits to bring your own
//! - Canonical DTD-syntax rendering with exact parenthesization
//! - XML Schema wildcards, process contents modes, and `all` groups
//! - Raw tag/offset records for interchange with integer-encoded grammars
//!
//! ## Example
//!
//! ```rust
//! use contentspec::{render, ContentSpecArena, ContentSpecBuilder};
//!
//! # fn main() -> contentspec::Result<()> {
//! let mut arena = ContentSpecArena::new();
//! let head = arena.named_leaf("head")?;
//! let body = arena.named_leaf("body")?;
//! let model = arena.sequence(head, body);
//! assert_eq!(render(&arena, model)?, "(head,body)");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod encoding;
pub mod error;
pub mod names;
pub mod namespaces;
pub mod node;
pub mod provider;
pub mod render;
pub mod wildcards;

// Re-exports for convenience
pub use encoding::RawContentSpec;
pub use error::{Error, HandleNotFound, RenderError, Result};
pub use namespaces::QName;
pub use node::{ContentSpec, Handle, ModelType};
pub use provider::{ContentSpecArena, ContentSpecBuilder, ContentSpecInterner, ContentSpecProvider};
pub use render::render;
pub use wildcards::{NamespaceConstraint, ProcessContents};

/// Version of the contentspec library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
