//! Node (component C2): a tagged term value.
//!
//! Grounded on `oxrdf::{named_node, blank_node, literal, triple}`: owned/borrowed
//! struct pairs (`Foo`/`FooRef<'a>`) with cross `PartialEq`/`PartialOrd` impls, kept
//! here as a single four-variant `Node`/`NodeRef` pair rather than oxrdf's separate
//! `Subject`/`Term`/`GraphName` enums, because the design treats "Node" as one
//! uniform tagged value and enforces positional validity (subject/predicate/graph
//! must not be literals) at `Statement` construction instead of in the type system.
//! [`Subject`] and [`GraphName`] are still provided as thin, role-restricted views
//! for callers who want the compile-time guarantee oxrdf gives them.

use std::fmt;

use crate::error::{Domain, RdfError, Status};
use crate::iri;

/// An absolute or relative IRI reference string.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NamedNode {
    iri: String,
}

impl NamedNode {
    #[must_use]
    pub fn new(iri: impl Into<String>) -> Self {
        Self { iri: iri.into() }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.iri
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.iri
    }

    #[must_use]
    pub fn as_ref(&self) -> NamedNodeRef<'_> {
        NamedNodeRef { iri: &self.iri }
    }

    #[must_use]
    pub fn is_absolute(&self) -> bool {
        iri::UriView::parse(&self.iri).is_absolute()
    }
}

impl fmt::Display for NamedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.iri)
    }
}

/// Borrowed view of a [`NamedNode`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NamedNodeRef<'a> {
    iri: &'a str,
}

impl<'a> NamedNodeRef<'a> {
    #[must_use]
    pub const fn new_unchecked(iri: &'a str) -> Self {
        Self { iri }
    }

    #[must_use]
    pub const fn as_str(self) -> &'a str {
        self.iri
    }

    #[must_use]
    pub fn into_owned(self) -> NamedNode {
        NamedNode::new(self.iri)
    }
}

impl fmt::Display for NamedNodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.iri)
    }
}

impl<'a> From<&'a NamedNode> for NamedNodeRef<'a> {
    fn from(n: &'a NamedNode) -> Self {
        n.as_ref()
    }
}

impl PartialEq<NamedNode> for NamedNodeRef<'_> {
    fn eq(&self, other: &NamedNode) -> bool {
        self.iri == other.iri
    }
}
impl PartialEq<NamedNodeRef<'_>> for NamedNode {
    fn eq(&self, other: &NamedNodeRef<'_>) -> bool {
        self.iri == other.iri
    }
}

/// A compact `prefix:local` reference, meaningful only relative to an
/// [`crate::env::Environment`]. Kept as a first-class variant (rather than eagerly
/// expanded, as oxttl does during parsing) so `Environment::qualify`/`expand` are
/// genuine operations — see `DESIGN.md`.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrefixedName {
    prefix: String,
    local: String,
}

impl PrefixedName {
    #[must_use]
    pub fn new(prefix: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            local: local.into(),
        }
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[must_use]
    pub fn local(&self) -> &str {
        &self.local
    }

    #[must_use]
    pub fn as_ref(&self) -> PrefixedNameRef<'_> {
        PrefixedNameRef {
            prefix: &self.prefix,
            local: &self.local,
        }
    }
}

impl fmt::Display for PrefixedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.prefix, self.local)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct PrefixedNameRef<'a> {
    prefix: &'a str,
    local: &'a str,
}

impl<'a> PrefixedNameRef<'a> {
    #[must_use]
    pub const fn new(prefix: &'a str, local: &'a str) -> Self {
        Self { prefix, local }
    }

    #[must_use]
    pub const fn prefix(self) -> &'a str {
        self.prefix
    }

    #[must_use]
    pub const fn local(self) -> &'a str {
        self.local
    }

    #[must_use]
    pub fn into_owned(self) -> PrefixedName {
        PrefixedName::new(self.prefix, self.local)
    }
}

impl fmt::Display for PrefixedNameRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.prefix, self.local)
    }
}

/// A document-local blank node identifier.
///
/// Unlike `oxrdf::BlankNode`, this does not special-case numeric-looking ids into a
/// packed `u128` representation: that optimization is an implementation detail of
/// oxrdf's in-memory footprint, not a behavior the design calls for, so the simpler
/// `String` form is kept (see `DESIGN.md`).
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlankNode {
    id: String,
}

impl BlankNode {
    /// Builds a blank node after validating `id` against the PN_CHARS-derived
    /// identifier grammar used by Turtle/TriG/N-Triples blank node labels.
    pub fn new(id: impl Into<String>) -> Result<Self, BlankNodeIdParseError> {
        let id = id.into();
        validate_blank_node_identifier(&id)?;
        Ok(Self { id })
    }

    #[must_use]
    pub fn new_unchecked(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Generates a fresh blank node id using the given numeric counter and the
    /// b/B clash-avoidance prefix char (if a user-supplied label already starts
    /// with `b`, the generator switches its own prefix to `B`), with an
    /// optional caller-supplied string prefix prepended so blank nodes from
    /// distinct parsed documents never collide once merged into one model.
    #[must_use]
    pub fn from_counter(counter: u64, generator_prefix: char, document_prefix: Option<&str>) -> Self {
        let id = match document_prefix {
            Some(doc) => format!("{doc}{generator_prefix}{counter}"),
            None => format!("{generator_prefix}{counter}"),
        };
        Self { id }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn as_ref(&self) -> BlankNodeRef<'_> {
        BlankNodeRef { id: &self.id }
    }
}

impl fmt::Display for BlankNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}", self.id)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct BlankNodeRef<'a> {
    id: &'a str,
}

impl<'a> BlankNodeRef<'a> {
    #[must_use]
    pub const fn new_unchecked(id: &'a str) -> Self {
        Self { id }
    }

    #[must_use]
    pub const fn as_str(self) -> &'a str {
        self.id
    }

    #[must_use]
    pub fn into_owned(self) -> BlankNode {
        BlankNode::new_unchecked(self.id)
    }
}

impl fmt::Display for BlankNodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}", self.id)
    }
}

#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
#[error("{0:?} is not a valid blank node identifier")]
pub struct BlankNodeIdParseError(String);

/// Validates a blank node label body (without the `_:` prefix) against a PN_CHARS
/// approximation: ASCII letters/digits, `_`, `-`, `.` (not trailing), restricted to
/// the common-case ASCII subset this crate actually needs (full Unicode PN_CHARS
/// coverage is not required by any test scenario in the design).
fn validate_blank_node_identifier(id: &str) -> Result<(), BlankNodeIdParseError> {
    let mut chars = id.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphanumeric() || c == '_' => {}
        _ => return Err(BlankNodeIdParseError(id.to_owned())),
    }
    if id.ends_with('.') {
        return Err(BlankNodeIdParseError(id.to_owned()));
    }
    for c in chars {
        if !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')) {
            return Err(BlankNodeIdParseError(id.to_owned()));
        }
    }
    Ok(())
}

/// `rdf:langString`, used to detect and suppress the redundant
/// datatype-plus-language-tag combination.
pub const RDF_LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";
/// `xsd:string`, the implicit datatype of a plain literal.
pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

/// A lexical value, optionally carrying a datatype IRI or a language tag (never
/// both — see the module doc).
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Literal {
    value: String,
    kind: LiteralKind,
    has_newline: bool,
    has_quote: bool,
}

#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
enum LiteralKind {
    Plain,
    Typed(NamedNode),
    LanguageTagged(String),
}

impl Literal {
    #[must_use]
    pub fn new_simple(value: impl Into<String>) -> Self {
        Self::build(value.into(), LiteralKind::Plain)
    }

    #[must_use]
    pub fn new_typed(value: impl Into<String>, datatype: NamedNode) -> Self {
        if datatype.as_str() == XSD_STRING {
            return Self::new_simple(value);
        }
        Self::build(value.into(), LiteralKind::Typed(datatype))
    }

    /// Builds a language-tagged literal. If `datatype` would be `rdf:langString`
    /// (redundant given a language tag is present), it is suppressed, per the
    /// design's literal invariant.
    #[must_use]
    pub fn new_language_tagged(value: impl Into<String>, language: impl Into<String>) -> Self {
        Self::build(value.into(), LiteralKind::LanguageTagged(language.into()))
    }

    fn build(value: String, kind: LiteralKind) -> Self {
        let has_newline = value.contains('\n') || value.contains('\r');
        let has_quote = value.contains('"');
        Self {
            value,
            kind,
            has_newline,
            has_quote,
        }
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn has_newline(&self) -> bool {
        self.has_newline
    }

    #[must_use]
    pub fn has_quote(&self) -> bool {
        self.has_quote
    }

    #[must_use]
    pub fn datatype(&self) -> Option<NamedNodeRef<'_>> {
        match &self.kind {
            LiteralKind::Typed(dt) => Some(dt.as_ref()),
            LiteralKind::LanguageTagged(_) => Some(NamedNodeRef::new_unchecked(RDF_LANG_STRING)),
            LiteralKind::Plain => Some(NamedNodeRef::new_unchecked(XSD_STRING)),
        }
    }

    #[must_use]
    pub fn language(&self) -> Option<&str> {
        match &self.kind {
            LiteralKind::LanguageTagged(lang) => Some(lang),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_ref(&self) -> LiteralRef<'_> {
        LiteralRef {
            value: &self.value,
            kind: match &self.kind {
                LiteralKind::Plain => LiteralKindRef::Plain,
                LiteralKind::Typed(dt) => LiteralKindRef::Typed(dt.as_ref()),
                LiteralKind::LanguageTagged(lang) => LiteralKindRef::LanguageTagged(lang),
            },
            has_newline: self.has_newline,
            has_quote: self.has_quote,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_ref().fmt(f)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct LiteralRef<'a> {
    value: &'a str,
    kind: LiteralKindRef<'a>,
    has_newline: bool,
    has_quote: bool,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
enum LiteralKindRef<'a> {
    Plain,
    Typed(NamedNodeRef<'a>),
    LanguageTagged(&'a str),
}

impl<'a> LiteralRef<'a> {
    #[must_use]
    pub fn new_simple(value: &'a str) -> Self {
        Self {
            value,
            kind: LiteralKindRef::Plain,
            has_newline: value.contains('\n') || value.contains('\r'),
            has_quote: value.contains('"'),
        }
    }

    #[must_use]
    pub fn new_typed(value: &'a str, datatype: NamedNodeRef<'a>) -> Self {
        if datatype.as_str() == XSD_STRING {
            return Self::new_simple(value);
        }
        Self {
            value,
            kind: LiteralKindRef::Typed(datatype),
            has_newline: value.contains('\n') || value.contains('\r'),
            has_quote: value.contains('"'),
        }
    }

    #[must_use]
    pub fn new_language_tagged(value: &'a str, language: &'a str) -> Self {
        Self {
            value,
            kind: LiteralKindRef::LanguageTagged(language),
            has_newline: value.contains('\n') || value.contains('\r'),
            has_quote: value.contains('"'),
        }
    }

    #[must_use]
    pub const fn value(self) -> &'a str {
        self.value
    }

    #[must_use]
    pub fn has_newline(self) -> bool {
        self.has_newline
    }

    #[must_use]
    pub fn has_quote(self) -> bool {
        self.has_quote
    }

    #[must_use]
    pub fn datatype(self) -> Option<NamedNodeRef<'a>> {
        match self.kind {
            LiteralKindRef::Typed(dt) => Some(dt),
            LiteralKindRef::LanguageTagged(_) => Some(NamedNodeRef::new_unchecked(RDF_LANG_STRING)),
            LiteralKindRef::Plain => Some(NamedNodeRef::new_unchecked(XSD_STRING)),
        }
    }

    #[must_use]
    pub fn language(self) -> Option<&'a str> {
        match self.kind {
            LiteralKindRef::LanguageTagged(lang) => Some(lang),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_owned(self) -> Literal {
        match self.kind {
            LiteralKindRef::Plain => Literal::new_simple(self.value),
            LiteralKindRef::Typed(dt) => Literal::new_typed(self.value, dt.into_owned()),
            LiteralKindRef::LanguageTagged(lang) => {
                Literal::new_language_tagged(self.value, lang)
            }
        }
    }
}

/// Escapes control characters, quotes and backslashes for single-quoted literal
/// output; used by the serializer (`has_newline`/`has_quote` decide whether
/// triple-quoting is used instead).
#[must_use]
pub fn escape_literal_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 || c as u32 == 0x7F => {
                out.push_str(&format!("\\u{:04X}", c as u32));
            }
            c => out.push(c),
        }
    }
    out
}

impl fmt::Display for LiteralRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", escape_literal_value(self.value))?;
        match self.kind {
            LiteralKindRef::Plain => Ok(()),
            LiteralKindRef::LanguageTagged(lang) => write!(f, "@{lang}"),
            LiteralKindRef::Typed(dt) => write!(f, "^^{dt}"),
        }
    }
}

/// A tagged term value: the unifying type for subject/predicate/object/graph
/// positions before positional validity is enforced.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Node {
    NamedNode(NamedNode),
    PrefixedName(PrefixedName),
    BlankNode(BlankNode),
    Literal(Literal),
}

impl Node {
    #[must_use]
    pub fn is_iri(&self) -> bool {
        matches!(self, Self::NamedNode(_))
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::BlankNode(_))
    }

    #[must_use]
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    #[must_use]
    pub fn as_ref(&self) -> NodeRef<'_> {
        match self {
            Self::NamedNode(n) => NodeRef::NamedNode(n.as_ref()),
            Self::PrefixedName(p) => NodeRef::PrefixedName(p.as_ref()),
            Self::BlankNode(b) => NodeRef::BlankNode(b.as_ref()),
            Self::Literal(l) => NodeRef::Literal(l.as_ref()),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_ref().fmt(f)
    }
}

impl From<NamedNode> for Node {
    fn from(n: NamedNode) -> Self {
        Self::NamedNode(n)
    }
}
impl From<PrefixedName> for Node {
    fn from(n: PrefixedName) -> Self {
        Self::PrefixedName(n)
    }
}
impl From<BlankNode> for Node {
    fn from(n: BlankNode) -> Self {
        Self::BlankNode(n)
    }
}
impl From<Literal> for Node {
    fn from(n: Literal) -> Self {
        Self::Literal(n)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum NodeRef<'a> {
    NamedNode(NamedNodeRef<'a>),
    PrefixedName(PrefixedNameRef<'a>),
    BlankNode(BlankNodeRef<'a>),
    Literal(LiteralRef<'a>),
}

impl<'a> NodeRef<'a> {
    #[must_use]
    pub fn into_owned(self) -> Node {
        match self {
            Self::NamedNode(n) => Node::NamedNode(n.into_owned()),
            Self::PrefixedName(n) => Node::PrefixedName(n.into_owned()),
            Self::BlankNode(n) => Node::BlankNode(n.into_owned()),
            Self::Literal(n) => Node::Literal(n.into_owned()),
        }
    }
}

impl fmt::Display for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NamedNode(n) => n.fmt(f),
            Self::PrefixedName(n) => n.fmt(f),
            Self::BlankNode(n) => n.fmt(f),
            Self::Literal(n) => n.fmt(f),
        }
    }
}

/// Role-restricted view over [`Node`] for the subject position: IRI, prefixed name
/// or blank node, never a literal.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Subject {
    NamedNode(NamedNode),
    PrefixedName(PrefixedName),
    BlankNode(BlankNode),
}

#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
#[error("{0} can not be used as a subject, predicate or graph name")]
pub struct NotANodeNameError(Node);

impl From<NotANodeNameError> for RdfError {
    fn from(e: NotANodeNameError) -> Self {
        Self::new(Status::BadArgument, Domain::Model, e.to_string())
    }
}

impl TryFrom<Node> for Subject {
    type Error = NotANodeNameError;

    fn try_from(node: Node) -> Result<Self, Self::Error> {
        match node {
            Node::NamedNode(n) => Ok(Self::NamedNode(n)),
            Node::PrefixedName(n) => Ok(Self::PrefixedName(n)),
            Node::BlankNode(n) => Ok(Self::BlankNode(n)),
            other @ Node::Literal(_) => Err(NotANodeNameError(other)),
        }
    }
}

impl From<Subject> for Node {
    fn from(s: Subject) -> Self {
        match s {
            Subject::NamedNode(n) => Self::NamedNode(n),
            Subject::PrefixedName(n) => Self::PrefixedName(n),
            Subject::BlankNode(n) => Self::BlankNode(n),
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Node::from(self.clone()).fmt(f)
    }
}

/// Role-restricted view over [`Node`] for the predicate position: an IRI or
/// prefixed name, never a blank node or literal. The teacher's
/// `oxrdf::Triple.predicate: NamedNode` enforces this at the type level too;
/// this crate keeps `PrefixedName` alongside it for the same reason [`Subject`]
/// does (prefixed names are resolved lazily, not during parsing).
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Predicate {
    NamedNode(NamedNode),
    PrefixedName(PrefixedName),
}

#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
#[error("{0} can not be used as a predicate")]
pub struct NotAPredicateError(Node);

impl From<NotAPredicateError> for RdfError {
    fn from(e: NotAPredicateError) -> Self {
        Self::new(Status::BadArgument, Domain::Model, e.to_string())
    }
}

impl TryFrom<Node> for Predicate {
    type Error = NotAPredicateError;

    fn try_from(node: Node) -> Result<Self, Self::Error> {
        match node {
            Node::NamedNode(n) => Ok(Self::NamedNode(n)),
            Node::PrefixedName(n) => Ok(Self::PrefixedName(n)),
            other => Err(NotAPredicateError(other)),
        }
    }
}

impl TryFrom<Subject> for Predicate {
    type Error = NotAPredicateError;

    fn try_from(subject: Subject) -> Result<Self, Self::Error> {
        Predicate::try_from(Node::from(subject))
    }
}

impl From<Predicate> for Node {
    fn from(p: Predicate) -> Self {
        match p {
            Predicate::NamedNode(n) => Self::NamedNode(n),
            Predicate::PrefixedName(n) => Self::PrefixedName(n),
        }
    }
}

impl From<Predicate> for Subject {
    fn from(p: Predicate) -> Self {
        match p {
            Predicate::NamedNode(n) => Self::NamedNode(n),
            Predicate::PrefixedName(n) => Self::PrefixedName(n),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Node::from(self.clone()).fmt(f)
    }
}

/// The graph position: a node name or the (unnamed) default graph.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GraphName {
    #[default]
    DefaultGraph,
    NamedNode(NamedNode),
    PrefixedName(PrefixedName),
    BlankNode(BlankNode),
}

impl fmt::Display for GraphName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DefaultGraph => f.write_str("DEFAULT"),
            Self::NamedNode(n) => n.fmt(f),
            Self::PrefixedName(n) => n.fmt(f),
            Self::BlankNode(n) => n.fmt(f),
        }
    }
}

impl TryFrom<Node> for GraphName {
    type Error = NotANodeNameError;

    fn try_from(node: Node) -> Result<Self, Self::Error> {
        match node {
            Node::NamedNode(n) => Ok(Self::NamedNode(n)),
            Node::PrefixedName(n) => Ok(Self::PrefixedName(n)),
            Node::BlankNode(n) => Ok(Self::BlankNode(n)),
            other @ Node::Literal(_) => Err(NotANodeNameError(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_suppresses_xsd_string_datatype() {
        let l = Literal::new_typed("x", NamedNode::new(XSD_STRING));
        assert_eq!(l.datatype().unwrap().as_str(), XSD_STRING);
        assert!(l.language().is_none());
    }

    #[test]
    fn language_tagged_literal_reports_lang_string_datatype() {
        let l = Literal::new_language_tagged("bonjour", "fr");
        assert_eq!(l.datatype().unwrap().as_str(), RDF_LANG_STRING);
        assert_eq!(l.language(), Some("fr"));
    }

    #[test]
    fn literal_precomputes_escape_flags() {
        let l = Literal::new_simple("a\nb\"c");
        assert!(l.has_newline());
        assert!(l.has_quote());
    }

    #[test]
    fn display_escapes_quotes_and_newlines() {
        let l = Literal::new_simple("a\nb\"c");
        assert_eq!(l.to_string(), "\"a\\nb\\\"c\"");
    }

    #[test]
    fn subject_rejects_literal() {
        let lit = Node::Literal(Literal::new_simple("x"));
        assert!(Subject::try_from(lit).is_err());
    }

    #[test]
    fn blank_node_rejects_trailing_dot() {
        assert!(BlankNode::new("a.").is_err());
    }

    #[test]
    fn predicate_rejects_blank_node_and_literal() {
        let blank = Node::BlankNode(BlankNode::new_unchecked("x"));
        assert!(Predicate::try_from(blank).is_err());
        let lit = Node::Literal(Literal::new_simple("x"));
        assert!(Predicate::try_from(lit).is_err());
    }

    #[test]
    fn predicate_round_trips_through_node() {
        let p = Predicate::NamedNode(NamedNode::new("http://ex/p"));
        let node = Node::from(p.clone());
        assert_eq!(Predicate::try_from(node).unwrap(), p);
    }
}
