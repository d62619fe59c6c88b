//! Sink combinators (component C11): small [`Sink`](crate::event::Sink) adapters
//! that compose into a pipeline, per the design's "capability set `{on_event}`"
//! note (`spec.md` §9).
//!
//! Grounded on `oxrdfio::parser::QuadMapper` (blank-node renaming and term
//! expansion applied while streaming quads) and `oxrdf::dataset::Dataset`'s
//! `insert` (terminal consumption into a model).

use crate::env::Environment;
use crate::error::RdfError;
use crate::event::{Event, Sink};
use crate::model::node::{GraphName, Literal, Node, Predicate, Subject};
use crate::model::store::{Model, Pattern};
use crate::util::format;

fn expand_subject(environment: &Environment, subject: Subject) -> Result<Subject, RdfError> {
    let expanded = environment.expand(Node::from(subject))?;
    Ok(Subject::try_from(expanded)?)
}

fn expand_predicate(environment: &Environment, predicate: Predicate) -> Result<Predicate, RdfError> {
    let expanded = environment.expand(Node::from(predicate))?;
    Ok(Predicate::try_from(expanded)?)
}

fn expand_graph(environment: &Environment, graph: GraphName) -> Result<GraphName, RdfError> {
    let node = match graph {
        GraphName::DefaultGraph => return Ok(GraphName::DefaultGraph),
        GraphName::NamedNode(n) => Node::NamedNode(n),
        GraphName::PrefixedName(n) => Node::PrefixedName(n),
        GraphName::BlankNode(n) => Node::BlankNode(n),
    };
    let expanded = environment.expand(node)?;
    Ok(GraphName::try_from(expanded)?)
}

/// A terminal sink: tracks `@base`/`@prefix` declarations in its own
/// [`Environment`], expands every statement's terms against it, interns them,
/// and inserts the result into a [`Model`].
pub struct Inserter<'m> {
    environment: Environment,
    model: &'m mut Model,
}

impl<'m> Inserter<'m> {
    pub fn new(model: &'m mut Model) -> Self {
        Self {
            environment: Environment::new(),
            model,
        }
    }

    #[must_use]
    pub fn environment(&self) -> &Environment {
        &self.environment
    }
}

impl Sink for Inserter<'_> {
    fn on_event(&mut self, event: Event) -> Result<(), RdfError> {
        match event {
            Event::Base(iri) => self.environment.set_base(Some(iri.as_str())),
            Event::Prefix { name, iri } => self.environment.set_prefix(&name, iri.as_str()),
            Event::Statement { statement, .. } => {
                let subject = expand_subject(&self.environment, statement.subject)?;
                let predicate = expand_predicate(&self.environment, statement.predicate)?;
                let object = self.environment.expand(statement.object)?;
                let graph = expand_graph(&self.environment, statement.graph)?;
                self.model.add(&subject, &predicate, &object, &graph)?;
                Ok(())
            }
            Event::End(_) => Ok(()),
        }
    }
}

/// A bound-or-wildcard pattern over raw (pre-intern) terms, used by [`Filter`].
#[derive(Debug, Clone, Default)]
pub struct NodePattern {
    pub subject: Option<Subject>,
    pub predicate: Option<Predicate>,
    pub object: Option<Node>,
    pub graph: Option<GraphName>,
}

impl NodePattern {
    fn matches(&self, statement: &crate::model::statement::Statement) -> bool {
        self.subject.as_ref().is_none_or(|s| *s == statement.subject)
            && self.predicate.as_ref().is_none_or(|p| *p == statement.predicate)
            && self.object.as_ref().is_none_or(|o| *o == statement.object)
            && self.graph.as_ref().is_none_or(|g| *g == statement.graph)
    }
}

trait IsNoneOr<T> {
    fn is_none_or(self, f: impl FnOnce(T) -> bool) -> bool;
}
impl<T> IsNoneOr<T> for Option<T> {
    fn is_none_or(self, f: impl FnOnce(T) -> bool) -> bool {
        match self {
            None => true,
            Some(v) => f(v),
        }
    }
}

/// Forwards every event to `inner` unchanged, except that `Statement` events
/// whose statement does not match `pattern` are dropped. Non-statement events
/// (base/prefix/end) always pass through, since they carry no statement to test.
pub struct Filter<S> {
    pattern: NodePattern,
    inner: S,
}

impl<S: Sink> Filter<S> {
    pub fn new(pattern: NodePattern, inner: S) -> Self {
        Self { pattern, inner }
    }
}

impl<S: Sink> Sink for Filter<S> {
    fn on_event(&mut self, event: Event) -> Result<(), RdfError> {
        match &event {
            Event::Statement { statement, .. } if !self.pattern.matches(statement) => Ok(()),
            _ => self.inner.on_event(event),
        }
    }
}

/// Tracks `@base`/`@prefix` declarations in its own [`Environment`] and rewrites
/// every statement's terms against it before forwarding to `inner`, so a
/// downstream sink always sees fully-resolved IRIs instead of prefixed names or
/// relative references.
pub struct Expander<S> {
    environment: Environment,
    inner: S,
}

impl<S: Sink> Expander<S> {
    pub fn new(inner: S) -> Self {
        Self {
            environment: Environment::new(),
            inner,
        }
    }
}

impl<S: Sink> Sink for Expander<S> {
    fn on_event(&mut self, event: Event) -> Result<(), RdfError> {
        match event {
            Event::Base(iri) => {
                self.environment.set_base(Some(iri.as_str()))?;
                self.inner.on_event(Event::Base(iri))
            }
            Event::Prefix { name, iri } => {
                self.environment.set_prefix(&name, iri.as_str())?;
                self.inner.on_event(Event::Prefix { name, iri })
            }
            Event::Statement { mut statement, flags } => {
                statement.subject = expand_subject(&self.environment, statement.subject)?;
                statement.predicate = expand_predicate(&self.environment, statement.predicate)?;
                statement.object = self.environment.expand(statement.object)?;
                statement.graph = expand_graph(&self.environment, statement.graph)?;
                self.inner.on_event(Event::Statement { statement, flags })
            }
            other @ Event::End(_) => self.inner.on_event(other),
        }
    }
}

/// Rewrites literal lexical forms into canonical form for `xsd:boolean`,
/// `xsd:float`, `xsd:double`, `xsd:decimal` and the integer family before
/// forwarding to `inner`; every other event and every non-numeric literal passes
/// through unchanged.
pub struct Normaliser<S> {
    inner: S,
}

impl<S: Sink> Normaliser<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    fn normalize(object: Node) -> Result<Node, RdfError> {
        let Node::Literal(literal) = object else {
            return Ok(object);
        };
        let Some(datatype) = literal.datatype() else {
            return Ok(Node::Literal(literal));
        };
        let canonical = match datatype.as_str() {
            "http://www.w3.org/2001/XMLSchema#boolean" => {
                format::canonicalize_boolean(literal.value()).map(ToOwned::to_owned)
            }
            "http://www.w3.org/2001/XMLSchema#decimal" => {
                format::canonicalize_decimal(literal.value(), None, None)
            }
            "http://www.w3.org/2001/XMLSchema#double" => format::parse_xsd_double(literal.value())
                .map(format::format_double),
            "http://www.w3.org/2001/XMLSchema#float" => format::parse_xsd_double(literal.value())
                .map(|v| format::format_float(v as f32)),
            "http://www.w3.org/2001/XMLSchema#integer"
            | "http://www.w3.org/2001/XMLSchema#int"
            | "http://www.w3.org/2001/XMLSchema#long"
            | "http://www.w3.org/2001/XMLSchema#short"
            | "http://www.w3.org/2001/XMLSchema#nonNegativeInteger" => {
                format::canonicalize_integer(literal.value())
            }
            _ => None,
        };
        match canonical {
            Some(value) => Ok(Node::Literal(Literal::new_typed(
                value,
                datatype.into_owned(),
            ))),
            None => Ok(Node::Literal(literal)),
        }
    }
}

impl<S: Sink> Sink for Normaliser<S> {
    fn on_event(&mut self, event: Event) -> Result<(), RdfError> {
        match event {
            Event::Statement { mut statement, flags } => {
                statement.object = Self::normalize(statement.object)?;
                self.inner.on_event(Event::Statement { statement, flags })
            }
            other => self.inner.on_event(other),
        }
    }
}

/// Executes `query` against `model` and removes every matching statement,
/// returning the count removed. A thin convenience wrapper over
/// [`Model::query`]/[`Model::erase`], since a bare range pattern is the common
/// bulk-removal case named in `spec.md` §4.7's `erase_range`.
pub fn erase_range(model: &mut Model, pattern: Pattern) -> Result<usize, RdfError> {
    let iter = model.query(pattern);
    model.erase(iter)
}
