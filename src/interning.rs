//! Node interner (component C5): a content-addressed store for RDF terms.
//!
//! Grounded on `oxrdf::interning`: a `lasso::Rodeo` backs all string storage (IRIs,
//! prefixes, blank node labels, literal values and language tags), and composite
//! node identity (a literal's value *and* its datatype/language, a prefixed name's
//! two parts) is deduplicated on top via a small handle table, because a single
//! `Spur` cannot represent a multi-field node the way it represents one string.
//! `InternedNode::{first,next,impossible}` mirror oxrdf's `Interned*` triad used to
//! build half-open `BTreeSet` range queries in the model's query planner.

use std::collections::HashMap;

use lasso::{Rodeo, Spur};

use crate::model::node::{
    BlankNodeRef, GraphName, LiteralRef, NamedNodeRef, Node, NodeRef, PrefixedNameRef, Subject,
};

/// A canonical, refcounted handle to an interned [`Node`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct InternedNode(u32);

impl InternedNode {
    /// The smallest handle that can ever be produced; used as a range lower bound
    /// when a query field is an unbound wildcard.
    #[must_use]
    pub const fn first() -> Self {
        Self(0)
    }

    /// One past `self`; used as an exclusive upper bound for range queries.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// A handle value guaranteed never to be produced by `intern`/`manage`; used as
    /// an upper bound when a lookup key was not found in the interner, so a query
    /// can still build a well-formed (and empty) range rather than erroring.
    #[must_use]
    pub const fn impossible() -> Self {
        Self(u32::MAX)
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
enum StoredNode {
    NamedNode(Spur),
    PrefixedName(Spur, Spur),
    BlankNode(Spur),
    Literal(Spur, StoredLiteralKind),
}

#[derive(Clone, PartialEq, Eq, Hash)]
enum StoredLiteralKind {
    Plain,
    Typed(Spur),
    Lang(Spur),
}

/// The hash-consed node store. Not `Sync`: concurrency is out of scope, callers
/// serialize access (see `spec.md` §4.2).
pub struct Interner {
    strings: Rodeo,
    nodes: Vec<Option<StoredNode>>,
    refcounts: Vec<u32>,
    index: HashMap<StoredNode, u32>,
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

impl Interner {
    #[must_use]
    pub fn new() -> Self {
        Self {
            strings: Rodeo::new(),
            nodes: Vec::new(),
            refcounts: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Interns `node`, returning its canonical handle. If an equivalent node is
    /// already stored, its refcount is incremented and the existing handle is
    /// returned; otherwise the node is copied in.
    pub fn intern(&mut self, node: NodeRef<'_>) -> InternedNode {
        let key = self.stored_key(node);
        self.intern_key(key)
    }

    /// Takes ownership of `node` and interns it; semantically identical to
    /// [`Self::intern`] for an owned value (there is no separate allocation to free
    /// on a hit the way the reference C implementation does, since Rust's `Node`
    /// is always freed by normal drop when this function returns without storing
    /// it).
    pub fn manage(&mut self, node: Node) -> InternedNode {
        self.intern(node.as_ref())
    }

    /// Decrements the refcount of `handle`; frees the backing record once it
    /// reaches zero. Freed slots are never reused by a later `intern`/`manage`.
    pub fn deref(&mut self, handle: InternedNode) {
        let idx = handle.0 as usize;
        if let Some(count) = self.refcounts.get_mut(idx) {
            if *count > 0 {
                *count -= 1;
            }
            if *count == 0 {
                if let Some(slot) = self.nodes.get_mut(idx) {
                    if let Some(key) = slot.take() {
                        self.index.remove(&key);
                    }
                }
            }
        }
    }

    /// Resolves a handle back to a borrowed node view. Panics if `handle` was
    /// fully dereferenced (a programmer error: callers must not decode a handle
    /// after its last `deref`).
    #[must_use]
    pub fn decode(&self, handle: InternedNode) -> NodeRef<'_> {
        let stored = self.nodes[handle.0 as usize]
            .as_ref()
            .expect("decode called on a fully dereferenced handle");
        match stored {
            StoredNode::NamedNode(s) => NodeRef::NamedNode(NamedNodeRef::new_unchecked(
                self.strings.resolve(s),
            )),
            StoredNode::PrefixedName(p, l) => NodeRef::PrefixedName(PrefixedNameRef::new(
                self.strings.resolve(p),
                self.strings.resolve(l),
            )),
            StoredNode::BlankNode(s) => {
                NodeRef::BlankNode(BlankNodeRef::new_unchecked(self.strings.resolve(s)))
            }
            StoredNode::Literal(value, kind) => {
                let value = self.strings.resolve(value);
                NodeRef::Literal(match kind {
                    StoredLiteralKind::Plain => LiteralRef::new_simple(value),
                    StoredLiteralKind::Typed(dt) => {
                        let dt = self.strings.resolve(dt);
                        LiteralRef::new_typed(value, NamedNodeRef::new_unchecked(dt))
                    }
                    StoredLiteralKind::Lang(lang) => {
                        let lang = self.strings.resolve(lang);
                        LiteralRef::new_language_tagged(value, lang)
                    }
                })
            }
        }
    }

    /// Looks up `node`'s handle without inserting it. Used by query planning, where
    /// a pattern field that was never interned can simply mean "no match" rather
    /// than requiring an allocation.
    #[must_use]
    pub fn lookup(&self, node: NodeRef<'_>) -> Option<InternedNode> {
        let key = match node {
            NodeRef::NamedNode(n) => StoredNode::NamedNode(self.strings.get(n.as_str())?),
            NodeRef::PrefixedName(n) => StoredNode::PrefixedName(
                self.strings.get(n.prefix())?,
                self.strings.get(n.local())?,
            ),
            NodeRef::BlankNode(n) => StoredNode::BlankNode(self.strings.get(n.as_str())?),
            NodeRef::Literal(n) => {
                let value = self.strings.get(n.value())?;
                let kind = if let Some(lang) = n.language() {
                    StoredLiteralKind::Lang(self.strings.get(lang)?)
                } else {
                    match n.datatype() {
                        Some(dt) if dt.as_str() == crate::model::node::XSD_STRING => {
                            StoredLiteralKind::Plain
                        }
                        Some(dt) => StoredLiteralKind::Typed(self.strings.get(dt.as_str())?),
                        None => StoredLiteralKind::Plain,
                    }
                };
                StoredNode::Literal(value, kind)
            }
        };
        self.index.get(&key).copied().map(InternedNode)
    }

    /// Looks up a [`Subject`]'s handle without inserting it.
    #[must_use]
    pub fn lookup_subject(&self, subject: &Subject) -> Option<InternedNode> {
        let node = match subject {
            Subject::NamedNode(n) => NodeRef::NamedNode(n.as_ref()),
            Subject::PrefixedName(n) => NodeRef::PrefixedName(n.as_ref()),
            Subject::BlankNode(n) => NodeRef::BlankNode(n.as_ref()),
        };
        self.lookup(node)
    }

    /// Looks up a [`GraphName`]'s handle without inserting it.
    #[must_use]
    pub fn lookup_graph(&self, graph: &GraphName) -> Option<InternedNode> {
        match graph {
            GraphName::DefaultGraph => {
                self.index
                    .get(&StoredNode::BlankNode(self.strings.get("urn:rdflex:default-graph")?))
                    .copied()
                    .map(InternedNode)
            }
            GraphName::NamedNode(n) => self.lookup(NodeRef::NamedNode(n.as_ref())),
            GraphName::PrefixedName(n) => self.lookup(NodeRef::PrefixedName(n.as_ref())),
            GraphName::BlankNode(n) => self.lookup(NodeRef::BlankNode(n.as_ref())),
        }
    }

    fn stored_key(&mut self, node: NodeRef<'_>) -> StoredNode {
        match node {
            NodeRef::NamedNode(n) => StoredNode::NamedNode(self.strings.get_or_intern(n.as_str())),
            NodeRef::PrefixedName(n) => StoredNode::PrefixedName(
                self.strings.get_or_intern(n.prefix()),
                self.strings.get_or_intern(n.local()),
            ),
            NodeRef::BlankNode(n) => StoredNode::BlankNode(self.strings.get_or_intern(n.as_str())),
            NodeRef::Literal(n) => {
                let value = self.strings.get_or_intern(n.value());
                let kind = if let Some(lang) = n.language() {
                    StoredLiteralKind::Lang(self.strings.get_or_intern(lang))
                } else {
                    match n.datatype() {
                        Some(dt) if dt.as_str() == crate::model::node::XSD_STRING => {
                            StoredLiteralKind::Plain
                        }
                        Some(dt) => StoredLiteralKind::Typed(self.strings.get_or_intern(dt.as_str())),
                        None => StoredLiteralKind::Plain,
                    }
                };
                StoredNode::Literal(value, kind)
            }
        }
    }

    fn intern_key(&mut self, key: StoredNode) -> InternedNode {
        if let Some(&idx) = self.index.get(&key) {
            self.refcounts[idx as usize] += 1;
            return InternedNode(idx);
        }
        let idx = self.nodes.len() as u32;
        self.nodes.push(Some(key.clone()));
        self.refcounts.push(1);
        self.index.insert(key, idx);
        InternedNode(idx)
    }

    /// Interns a [`Subject`], returning its handle.
    pub fn intern_subject(&mut self, subject: &Subject) -> InternedNode {
        let node = match subject {
            Subject::NamedNode(n) => NodeRef::NamedNode(n.as_ref()),
            Subject::PrefixedName(n) => NodeRef::PrefixedName(n.as_ref()),
            Subject::BlankNode(n) => NodeRef::BlankNode(n.as_ref()),
        };
        self.intern(node)
    }

    /// Interns a [`GraphName`], mapping the default graph to a single reserved
    /// handle shared by every statement outside an explicit graph.
    pub fn intern_graph(&mut self, graph: &GraphName) -> InternedNode {
        match graph {
            GraphName::DefaultGraph => {
                let marker = self.strings.get_or_intern("urn:rdflex:default-graph");
                self.intern_key(StoredNode::BlankNode(marker))
            }
            GraphName::NamedNode(n) => self.intern(NodeRef::NamedNode(n.as_ref())),
            GraphName::PrefixedName(n) => self.intern(NodeRef::PrefixedName(n.as_ref())),
            GraphName::BlankNode(n) => self.intern(NodeRef::BlankNode(n.as_ref())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::node::{Literal, NamedNode};

    #[test]
    fn interning_same_node_twice_returns_same_handle() {
        let mut interner = Interner::new();
        let a = interner.intern(NodeRef::NamedNode(NamedNodeRef::new_unchecked("http://ex/a")));
        let b = interner.intern(NodeRef::NamedNode(NamedNodeRef::new_unchecked("http://ex/a")));
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_nodes_get_distinct_handles() {
        let mut interner = Interner::new();
        let a = interner.intern(NodeRef::NamedNode(NamedNodeRef::new_unchecked("http://ex/a")));
        let b = interner.intern(NodeRef::NamedNode(NamedNodeRef::new_unchecked("http://ex/b")));
        assert_ne!(a, b);
    }

    #[test]
    fn decode_round_trips_named_node() {
        let mut interner = Interner::new();
        let h = interner.intern(NodeRef::NamedNode(NamedNodeRef::new_unchecked("http://ex/a")));
        assert_eq!(interner.decode(h).to_string(), "<http://ex/a>");
    }

    #[test]
    fn deref_to_zero_frees_the_slot() {
        let mut interner = Interner::new();
        let node = Node::NamedNode(NamedNode::new("http://ex/a"));
        let h = interner.manage(node);
        interner.deref(h);
        assert!(interner.index.is_empty());
    }
}
