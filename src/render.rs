//! Canonical content model rendering
//!
//! Turns a stored content model back into the DTD-syntax expression it
//! declares, e.g. `(head,body)` or `(#PCDATA|em|strong)*`. The output is
//! canonical: same-kind group chains are flattened into one n-ary group,
//! and parentheses appear exactly where the grammar needs them, never
//! doubled.
//!
//! Reference: <https://www.w3.org/TR/xml/#sec-element-content>

use crate::error::RenderError;
use crate::namespaces::QName;
use crate::node::{ContentSpec, Handle, ModelType};
use crate::provider::ContentSpecProvider;

/// Render the content model rooted at `root` as canonical text
///
/// The surface form is the DTD declaration syntax extended with the schema
/// constructs that have no DTD spelling: `all(...)` for unordered groups
/// and the `##any` / `##other:uri=...` / `namespace:uri=...` wildcard
/// tokens. Element leaves print their local name only; namespace bindings
/// are grammar metadata, not part of the declaration surface. A wildcard's
/// process contents mode is likewise invisible here, so all three modes of
/// one constraint render identically.
///
/// Rendering is a pure read. It fails with [`RenderError::BrokenReference`]
/// when any handle in the model does not resolve, [`RenderError::Cyclic`]
/// when a node is reached again while still on the path that led to it, and
/// [`RenderError::MisplacedPcdata`] when the PCDATA leaf appears as a
/// direct operand of a sequence or all group. Subtrees shared between
/// already-completed branches are fine and render once per reference.
///
/// ```
/// use contentspec::{render, ContentSpecArena, ContentSpecBuilder};
///
/// let mut arena = ContentSpecArena::new();
/// let pcdata = arena.pcdata();
/// let em = arena.named_leaf("em")?;
/// let mixed = arena.choice(pcdata, em);
/// let model = arena.zero_or_more(mixed);
/// assert_eq!(render(&arena, model)?, "(#PCDATA|em)*");
/// # Ok::<(), contentspec::Error>(())
/// ```
pub fn render<P>(provider: &P, root: Handle) -> Result<String, RenderError>
where
    P: ContentSpecProvider + ?Sized,
{
    let mut renderer = Renderer {
        provider,
        out: String::new(),
        path: Vec::new(),
    };
    renderer.append_root(root)?;
    Ok(renderer.out)
}

/// One in-flight render call
///
/// `path` holds the handles between the root and the node currently being
/// written, so a handle revisited while still on it is a cycle. Handles
/// leave the path as soon as their subtree is finished, which keeps shared
/// subtrees from tripping the guard.
struct Renderer<'a, P: ?Sized> {
    provider: &'a P,
    out: String,
    path: Vec<Handle>,
}

impl<P: ContentSpecProvider + ?Sized> Renderer<'_, P> {
    fn resolve_guarded(&self, handle: Handle) -> Result<ContentSpec, RenderError> {
        if self.path.contains(&handle) {
            return Err(RenderError::Cyclic(handle));
        }
        Ok(self.provider.resolve(handle)?)
    }

    fn append_root(&mut self, root: Handle) -> Result<(), RenderError> {
        let spec = self.resolve_guarded(root)?;
        self.path.push(root);
        let result = self.append_root_spec(&spec);
        self.path.pop();
        result
    }

    /// The root node carries the declaration's outer shape: a lone leaf is
    /// wrapped in parentheses, a root repetition wraps per
    /// [`Self::append_root_repetition`], groups self-wrap, wildcards print
    /// bare.
    fn append_root_spec(&mut self, spec: &ContentSpec) -> Result<(), RenderError> {
        match spec {
            ContentSpec::Leaf { name } => {
                self.out.push('(');
                self.append_leaf(name.as_ref());
                self.out.push(')');
                Ok(())
            }
            ContentSpec::ZeroOrOne { operand } => self.append_root_repetition(*operand, '?'),
            ContentSpec::ZeroOrMore { operand } => self.append_root_repetition(*operand, '*'),
            ContentSpec::OneOrMore { operand } => self.append_root_repetition(*operand, '+'),
            _ => self.append_spec(spec, true, false),
        }
    }

    /// A repetition at the root parenthesizes a leaf operand (`(a)*`) and a
    /// repetition operand (`((a)?)*`); groups bring their own parentheses
    /// and wildcards stay bare (`##any*`).
    fn append_root_repetition(&mut self, operand: Handle, suffix: char) -> Result<(), RenderError> {
        let inner = self.resolve_guarded(operand)?;
        self.path.push(operand);
        let result = if let ContentSpec::Leaf { name } = &inner {
            self.out.push('(');
            self.append_leaf(name.as_ref());
            self.out.push(')');
            Ok(())
        } else if inner.is_repetition() {
            self.out.push('(');
            let nested = self.append_spec(&inner, true, true);
            self.out.push(')');
            nested
        } else {
            self.append_spec(&inner, true, true)
        };
        self.path.pop();
        result?;
        self.out.push(suffix);
        Ok(())
    }

    /// `parens` asks a group to wrap itself; the other node kinds ignore it.
    /// `parent_repetition` tells a repetition that another repetition sits
    /// directly above it.
    fn append_spec(
        &mut self,
        spec: &ContentSpec,
        parens: bool,
        parent_repetition: bool,
    ) -> Result<(), RenderError> {
        match spec {
            ContentSpec::Leaf { name } => {
                self.append_leaf(name.as_ref());
                Ok(())
            }
            ContentSpec::ZeroOrOne { operand } => {
                self.append_repetition(*operand, '?', parent_repetition)
            }
            ContentSpec::ZeroOrMore { operand } => {
                self.append_repetition(*operand, '*', parent_repetition)
            }
            ContentSpec::OneOrMore { operand } => {
                self.append_repetition(*operand, '+', parent_repetition)
            }
            ContentSpec::Choice { left, right } => {
                self.append_group(ModelType::Choice, *left, *right, parens)
            }
            ContentSpec::Sequence { left, right } => {
                self.append_group(ModelType::Sequence, *left, *right, parens)
            }
            ContentSpec::All { left, right } => {
                self.append_group(ModelType::All, *left, *right, parens)
            }
            ContentSpec::Wildcard { constraint, .. } => {
                self.out.push_str(&constraint.to_string());
                Ok(())
            }
        }
    }

    /// Stacked repetitions print as stacked suffixes with the innermost
    /// operand parenthesized once, `(a)?*`. The wrap is skipped for group
    /// operands, which self-wrap.
    fn append_repetition(
        &mut self,
        operand: Handle,
        suffix: char,
        parent_repetition: bool,
    ) -> Result<(), RenderError> {
        let inner = self.resolve_guarded(operand)?;
        self.path.push(operand);
        let wrap = parent_repetition && inner.model_type().is_none();
        if wrap {
            self.out.push('(');
        }
        let result = self.append_spec(&inner, true, true);
        if wrap {
            self.out.push(')');
        }
        self.path.pop();
        result?;
        self.out.push(suffix);
        Ok(())
    }

    /// Walk one group link as part of a flattened n-ary list. The chain
    /// ends at a [`Handle::NIL`] right operand; a singleton link prints
    /// without a trailing separator.
    fn append_group(
        &mut self,
        model: ModelType,
        left: Handle,
        right: Handle,
        parens: bool,
    ) -> Result<(), RenderError> {
        if parens {
            if model == ModelType::All {
                self.out.push_str("all(");
            } else {
                self.out.push('(');
            }
        }
        self.append_operand(left, model)?;
        if !right.is_nil() {
            self.out.push(model.separator());
            self.append_operand(right, model)?;
        }
        if parens {
            self.out.push(')');
        }
        Ok(())
    }

    /// An operand whose kind matches the enclosing group continues the
    /// flattened list inline; any other group kind wraps itself. PCDATA is
    /// only meaningful in the choice list of a mixed model, so sequence and
    /// all groups reject it here.
    fn append_operand(&mut self, operand: Handle, model: ModelType) -> Result<(), RenderError> {
        let spec = self.resolve_guarded(operand)?;
        if spec.is_pcdata() && model != ModelType::Choice {
            return Err(RenderError::MisplacedPcdata);
        }
        let parens = spec.model_type() != Some(model);
        self.path.push(operand);
        let result = self.append_spec(&spec, parens, false);
        self.path.pop();
        result
    }

    fn append_leaf(&mut self, name: Option<&QName>) {
        match name {
            Some(qname) => self.out.push_str(&qname.local_name),
            None => self.out.push_str("#PCDATA"),
        }
    }
}
