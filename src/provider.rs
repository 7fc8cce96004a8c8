//! Node stores and handle resolution
//!
//! Content model nodes live in caller-owned stores and refer to each other by
//! [`Handle`]. Readers go through [`ContentSpecProvider::resolve`], which
//! hands back an owned copy of the node: a store stays free to back
//! resolution however it likes (a plain vector, a hash-consing set, a cache
//! filled by an external scanner) without pinning a borrow into the
//! traversal. Grammar builders construct nodes through
//! [`ContentSpecBuilder`].

use crate::encoding::RawContentSpec;
use crate::error::{Error, HandleNotFound};
use crate::namespaces::QName;
use crate::node::{ContentSpec, Handle, ModelType};
use crate::wildcards::{NamespaceConstraint, ProcessContents};
use indexmap::IndexSet;

/// Read access to stored content spec nodes
///
/// Resolving the same handle twice must return structurally equal nodes for
/// the duration of one traversal. A store that is still being filled while
/// readers run must hand them a consistent snapshot; readers take `&self`
/// and never lock or mutate.
pub trait ContentSpecProvider {
    /// Resolve a handle to the node it addresses
    ///
    /// An out-of-range, stale, or [`Handle::NIL`] handle is a recoverable
    /// [`HandleNotFound`], never a panic.
    fn resolve(&self, handle: Handle) -> Result<ContentSpec, HandleNotFound>;
}

/// Write access for grammar builders
///
/// One required method stores a finished node; the provided methods cover
/// each node kind and fold operand lists into the left-leaning chains the
/// rest of the crate expects. What "insert" means is up to the store
/// (append, intern).
pub trait ContentSpecBuilder {
    /// Store a node and return its handle
    fn insert(&mut self, spec: ContentSpec) -> Handle;

    /// Add a named element leaf
    fn leaf(&mut self, name: QName) -> Handle {
        self.insert(ContentSpec::Leaf { name: Some(name) })
    }

    /// Add a named element leaf, validating the name first
    fn named_leaf(&mut self, name: &str) -> Result<Handle, Error> {
        let name = QName::parse(name)?;
        Ok(self.leaf(name))
    }

    /// Add the PCDATA text leaf of a mixed model
    fn pcdata(&mut self) -> Handle {
        self.insert(ContentSpec::pcdata())
    }

    /// Add a `?` repetition over an operand
    fn zero_or_one(&mut self, operand: Handle) -> Handle {
        self.insert(ContentSpec::ZeroOrOne { operand })
    }

    /// Add a `*` repetition over an operand
    fn zero_or_more(&mut self, operand: Handle) -> Handle {
        self.insert(ContentSpec::ZeroOrMore { operand })
    }

    /// Add a `+` repetition over an operand
    fn one_or_more(&mut self, operand: Handle) -> Handle {
        self.insert(ContentSpec::OneOrMore { operand })
    }

    /// Add one choice link
    fn choice(&mut self, left: Handle, right: Handle) -> Handle {
        self.insert(ContentSpec::Choice { left, right })
    }

    /// Add one sequence link
    fn sequence(&mut self, left: Handle, right: Handle) -> Handle {
        self.insert(ContentSpec::Sequence { left, right })
    }

    /// Add one all link
    fn all(&mut self, left: Handle, right: Handle) -> Handle {
        self.insert(ContentSpec::All { left, right })
    }

    /// Add a wildcard particle
    fn wildcard(
        &mut self,
        constraint: NamespaceConstraint,
        process_contents: ProcessContents,
    ) -> Handle {
        self.insert(ContentSpec::Wildcard {
            constraint,
            process_contents,
        })
    }

    /// Fold operands into a left-leaning chain of `model` links
    ///
    /// Returns `None` for an empty slice; a single operand comes back as
    /// itself, without a group link around it.
    fn group_list(&mut self, model: ModelType, operands: &[Handle]) -> Option<Handle> {
        let (&first, rest) = operands.split_first()?;
        let mut chain = first;
        for &operand in rest {
            chain = match model {
                ModelType::Choice => self.choice(chain, operand),
                ModelType::Sequence => self.sequence(chain, operand),
                ModelType::All => self.all(chain, operand),
            };
        }
        Some(chain)
    }

    /// Fold operands into a left-leaning choice chain
    fn choice_list(&mut self, operands: &[Handle]) -> Option<Handle> {
        self.group_list(ModelType::Choice, operands)
    }

    /// Fold operands into a left-leaning sequence chain
    fn sequence_list(&mut self, operands: &[Handle]) -> Option<Handle> {
        self.group_list(ModelType::Sequence, operands)
    }

    /// Fold operands into a left-leaning all chain
    fn all_list(&mut self, operands: &[Handle]) -> Option<Handle> {
        self.group_list(ModelType::All, operands)
    }
}

/// Vector-backed node store
///
/// Handles are indices in insertion order. Nodes are never removed or
/// mutated; an edit is a new insertion under a new handle.
#[derive(Debug, Clone, Default)]
pub struct ContentSpecArena {
    nodes: Vec<ContentSpec>,
}

impl ContentSpecArena {
    /// Create an empty arena
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Create an empty arena with room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Append a node, returning its handle
    pub fn add(&mut self, spec: ContentSpec) -> Handle {
        let raw = i32::try_from(self.nodes.len()).expect("content spec arena is full");
        self.nodes.push(spec);
        Handle::new(raw)
    }

    /// Decode a raw record and append the node it describes
    pub fn add_raw(&mut self, raw: &RawContentSpec) -> Result<Handle, Error> {
        Ok(self.add(raw.decode()?))
    }

    /// Borrow a node without copying
    pub fn get(&self, handle: Handle) -> Option<&ContentSpec> {
        self.nodes.get(handle.index()?)
    }

    /// Number of stored nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena holds no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl ContentSpecProvider for ContentSpecArena {
    fn resolve(&self, handle: Handle) -> Result<ContentSpec, HandleNotFound> {
        self.get(handle).cloned().ok_or(HandleNotFound(handle))
    }
}

impl ContentSpecBuilder for ContentSpecArena {
    fn insert(&mut self, spec: ContentSpec) -> Handle {
        self.add(spec)
    }
}

/// Hash-consing node store
///
/// Structurally equal nodes share one handle, so equal subtrees inserted
/// from different element declarations collapse into shared storage. Handles
/// are set indices in first-insertion order.
#[derive(Debug, Clone, Default)]
pub struct ContentSpecInterner {
    nodes: IndexSet<ContentSpec>,
}

impl ContentSpecInterner {
    /// Create an empty interner
    pub fn new() -> Self {
        Self {
            nodes: IndexSet::new(),
        }
    }

    /// Intern a node, returning the shared handle for its structure
    pub fn intern(&mut self, spec: ContentSpec) -> Handle {
        let (index, _) = self.nodes.insert_full(spec);
        let raw = i32::try_from(index).expect("content spec interner is full");
        Handle::new(raw)
    }

    /// Handle of an already interned structure, if any
    pub fn lookup(&self, spec: &ContentSpec) -> Option<Handle> {
        let index = self.nodes.get_index_of(spec)?;
        Some(Handle::new(i32::try_from(index).ok()?))
    }

    /// Borrow a node without copying
    pub fn get(&self, handle: Handle) -> Option<&ContentSpec> {
        self.nodes.get_index(handle.index()?)
    }

    /// Number of distinct stored nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the interner holds no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl ContentSpecProvider for ContentSpecInterner {
    fn resolve(&self, handle: Handle) -> Result<ContentSpec, HandleNotFound> {
        self.get(handle).cloned().ok_or(HandleNotFound(handle))
    }
}

impl ContentSpecBuilder for ContentSpecInterner {
    fn insert(&mut self, spec: ContentSpec) -> Handle {
        self.intern(spec)
    }
}
