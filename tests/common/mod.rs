//! Shared helpers for the integration tests
//!
//! [`Tree`] is an owned description of a content model that can be loaded
//! into any builder, and [`parse`] is a small reader for the canonical text
//! form so tests can round-trip the renderer's output. The reader accepts
//! exactly the surface the renderer emits; it is not a general DTD parser.

#![allow(dead_code)]

use contentspec::{
    ContentSpec, ContentSpecBuilder, ContentSpecProvider, Handle, ModelType, NamespaceConstraint,
    ProcessContents,
};

/// Owned content model description, free of handles
#[derive(Debug, Clone)]
pub enum Tree {
    Pcdata,
    Leaf(String),
    Opt(Box<Tree>),
    Star(Box<Tree>),
    Plus(Box<Tree>),
    Choice(Vec<Tree>),
    Seq(Vec<Tree>),
    All(Vec<Tree>),
    Wildcard(NamespaceConstraint, ProcessContents),
}

/// Load a tree into a builder and return the root handle
pub fn load(tree: &Tree, store: &mut impl ContentSpecBuilder) -> Handle {
    match tree {
        Tree::Pcdata => store.pcdata(),
        Tree::Leaf(name) => store.named_leaf(name).expect("test leaf name is valid"),
        Tree::Opt(inner) => {
            let operand = load(inner, store);
            store.zero_or_one(operand)
        }
        Tree::Star(inner) => {
            let operand = load(inner, store);
            store.zero_or_more(operand)
        }
        Tree::Plus(inner) => {
            let operand = load(inner, store);
            store.one_or_more(operand)
        }
        Tree::Choice(items) => load_group(ModelType::Choice, items, store),
        Tree::Seq(items) => load_group(ModelType::Sequence, items, store),
        Tree::All(items) => load_group(ModelType::All, items, store),
        Tree::Wildcard(constraint, mode) => store.wildcard(constraint.clone(), *mode),
    }
}

fn load_group(model: ModelType, items: &[Tree], store: &mut impl ContentSpecBuilder) -> Handle {
    let handles: Vec<Handle> = items.iter().map(|item| load(item, store)).collect();
    store
        .group_list(model, &handles)
        .expect("test groups are non-empty")
}

/// Parse canonical content model text into a builder
pub fn parse(input: &str, store: &mut impl ContentSpecBuilder) -> Result<Handle, String> {
    let mut parser = Parser {
        input: input.as_bytes(),
        pos: 0,
    };
    let handle = parser.parse_item(store)?;
    if parser.pos != parser.input.len() {
        return Err(format!(
            "trailing input at byte {}: {:?}",
            parser.pos,
            &input[parser.pos..]
        ));
    }
    Ok(handle)
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn eat_str(&mut self, expected: &str) -> bool {
        if self.input[self.pos..].starts_with(expected.as_bytes()) {
            self.pos += expected.len();
            true
        } else {
            false
        }
    }

    /// One operand with any number of stacked `?` `*` `+` suffixes
    fn parse_item(&mut self, store: &mut impl ContentSpecBuilder) -> Result<Handle, String> {
        let mut handle = self.parse_primary(store)?;
        loop {
            match self.peek() {
                Some(b'?') => {
                    self.pos += 1;
                    handle = store.zero_or_one(handle);
                }
                Some(b'*') => {
                    self.pos += 1;
                    handle = store.zero_or_more(handle);
                }
                Some(b'+') => {
                    self.pos += 1;
                    handle = store.one_or_more(handle);
                }
                _ => break,
            }
        }
        Ok(handle)
    }

    fn parse_primary(&mut self, store: &mut impl ContentSpecBuilder) -> Result<Handle, String> {
        if self.eat_str("#PCDATA") {
            return Ok(store.pcdata());
        }
        if self.eat_str("##any") {
            return Ok(store.wildcard(NamespaceConstraint::Any, ProcessContents::Strict));
        }
        if self.eat_str("##other:uri=") {
            let uri = self.parse_until_delimiter();
            return Ok(store.wildcard(NamespaceConstraint::Other(uri), ProcessContents::Strict));
        }
        if self.eat_str("namespace:uri=") {
            let uri = self.parse_until_delimiter();
            return Ok(store.wildcard(
                NamespaceConstraint::NamespaceList(uri),
                ProcessContents::Strict,
            ));
        }
        if self.eat_str("all(") {
            return self.parse_group(store, Some(ModelType::All));
        }
        if self.eat_str("(") {
            return self.parse_group(store, None);
        }
        let name = self.parse_until_delimiter();
        if name.is_empty() {
            return Err(format!("expected a name at byte {}", self.pos));
        }
        store.named_leaf(&name).map_err(|err| err.to_string())
    }

    /// Body of a group whose opening token was already consumed
    fn parse_group(
        &mut self,
        store: &mut impl ContentSpecBuilder,
        forced: Option<ModelType>,
    ) -> Result<Handle, String> {
        let mut items = vec![self.parse_item(store)?];
        let mut separator: Option<u8> = None;
        loop {
            match self.peek() {
                Some(b')') => {
                    self.pos += 1;
                    break;
                }
                Some(byte @ (b'|' | b',')) => {
                    if separator.is_some() && separator != Some(byte) {
                        return Err(format!("mixed separators at byte {}", self.pos));
                    }
                    separator = Some(byte);
                    self.pos += 1;
                    items.push(self.parse_item(store)?);
                }
                other => {
                    return Err(format!(
                        "unexpected {:?} in group at byte {}",
                        other.map(char::from),
                        self.pos
                    ));
                }
            }
        }
        let model = match separator {
            Some(b'|') if forced.is_some() => {
                return Err(format!("'|' at byte {} in an unordered group", self.pos));
            }
            Some(b'|') => ModelType::Choice,
            Some(_) => forced.unwrap_or(ModelType::Sequence),
            None => {
                return Ok(match forced {
                    // all(a) keeps its group link so the prefix survives a reprint
                    Some(ModelType::All) => store.all(items[0], Handle::NIL),
                    Some(ModelType::Sequence) => store.sequence(items[0], Handle::NIL),
                    Some(ModelType::Choice) => store.choice(items[0], Handle::NIL),
                    None => items[0],
                });
            }
        };
        store
            .group_list(model, &items)
            .ok_or_else(|| "empty group".to_string())
    }

    fn parse_until_delimiter(&mut self) -> String {
        let start = self.pos;
        while let Some(byte) = self.peek() {
            if matches!(byte, b'(' | b')' | b'|' | b',' | b'?' | b'*' | b'+') {
                break;
            }
            self.pos += 1;
        }
        String::from_utf8_lossy(&self.input[start..self.pos]).into_owned()
    }
}

/// Structural equality between models held in different stores
///
/// Group chains compare link by link, so a chain only equals another chain
/// with the same shape and the same termination point.
pub fn structurally_equal(
    left_store: &impl ContentSpecProvider,
    left: Handle,
    right_store: &impl ContentSpecProvider,
    right: Handle,
) -> bool {
    let (Ok(left_spec), Ok(right_spec)) = (left_store.resolve(left), right_store.resolve(right))
    else {
        return false;
    };
    match (left_spec, right_spec) {
        (ContentSpec::Leaf { name: l }, ContentSpec::Leaf { name: r }) => l == r,
        (ContentSpec::ZeroOrOne { operand: l }, ContentSpec::ZeroOrOne { operand: r })
        | (ContentSpec::ZeroOrMore { operand: l }, ContentSpec::ZeroOrMore { operand: r })
        | (ContentSpec::OneOrMore { operand: l }, ContentSpec::OneOrMore { operand: r }) => {
            structurally_equal(left_store, l, right_store, r)
        }
        (
            ContentSpec::Choice {
                left: ll,
                right: lr,
            },
            ContentSpec::Choice {
                left: rl,
                right: rr,
            },
        )
        | (
            ContentSpec::Sequence {
                left: ll,
                right: lr,
            },
            ContentSpec::Sequence {
                left: rl,
                right: rr,
            },
        )
        | (
            ContentSpec::All {
                left: ll,
                right: lr,
            },
            ContentSpec::All {
                left: rl,
                right: rr,
            },
        ) => {
            if !structurally_equal(left_store, ll, right_store, rl) {
                return false;
            }
            match (lr.is_nil(), rr.is_nil()) {
                (true, true) => true,
                (false, false) => structurally_equal(left_store, lr, right_store, rr),
                _ => false,
            }
        }
        (
            ContentSpec::Wildcard {
                constraint: lc,
                process_contents: lp,
            },
            ContentSpec::Wildcard {
                constraint: rc,
                process_contents: rp,
            },
        ) => lc == rc && lp == rp,
        _ => false,
    }
}

/// Whether any parenthesis pair wraps nothing but another single pair
pub fn has_redundant_parens(text: &str) -> bool {
    let bytes = text.as_bytes();
    for start in 0..bytes.len() {
        if bytes[start] != b'(' {
            continue;
        }
        let Some(end) = matching_paren(bytes, start) else {
            continue;
        };
        if bytes[start + 1] == b'(' && matching_paren(bytes, start + 1) == Some(end - 1) {
            return true;
        }
    }
    false
}

fn matching_paren(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, &byte) in bytes.iter().enumerate().skip(open) {
        match byte {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(offset);
                }
            }
            _ => {}
        }
    }
    None
}
