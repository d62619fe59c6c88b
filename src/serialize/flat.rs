//! Flat serializer: N-Triples/N-Quads output, one statement per line, always
//! fully qualified (`spec.md` §4.6 "for flat syntaxes, always emit fully
//! qualified form with one statement per line").
//!
//! Grounded on `oxttl::trig::LowLevelTriGWriter::write_quad`'s shape, with
//! abbreviation turned off: subject/predicate state is not tracked, and every
//! node is written in full. Like [`crate::sink::Inserter`], this serializer
//! owns an [`Environment`] so a `Node::PrefixedName`/relative `NamedNode`
//! reaching it from a non-expanding parser run is still resolved before
//! output — a flat document has no prefix declarations to fall back on.

use std::io::Write;

use crate::env::Environment;
use crate::error::RdfError;
use crate::event::{Event, Sink};
use crate::model::node::{GraphName, Node, Predicate, Subject};
use crate::serialize::{write_iri, write_literal, SerializerOptions};

/// Writes events as N-Triples (every statement in the default graph) or
/// N-Quads (any statement carries an explicit graph), one line per statement.
pub struct FlatSerializer<W> {
    writer: W,
    options: SerializerOptions,
    environment: Environment,
}

impl<W: Write> FlatSerializer<W> {
    pub fn new(writer: W, options: SerializerOptions) -> Self {
        Self {
            writer,
            options,
            environment: Environment::new(),
        }
    }

    fn expand_subject(&self, subject: Subject) -> Result<Subject, RdfError> {
        let expanded = self.environment.expand(Node::from(subject))?;
        Ok(Subject::try_from(expanded)?)
    }

    fn expand_predicate(&self, predicate: Predicate) -> Result<Predicate, RdfError> {
        let expanded = self.environment.expand(Node::from(predicate))?;
        Ok(Predicate::try_from(expanded)?)
    }

    fn expand_graph(&self, graph: GraphName) -> Result<GraphName, RdfError> {
        let node = match graph {
            GraphName::DefaultGraph => return Ok(GraphName::DefaultGraph),
            GraphName::NamedNode(n) => Node::NamedNode(n),
            GraphName::PrefixedName(n) => Node::PrefixedName(n),
            GraphName::BlankNode(n) => Node::BlankNode(n),
        };
        let expanded = self.environment.expand(node)?;
        Ok(GraphName::try_from(expanded)?)
    }

    fn write_node(&self, out: &mut String, node: &Node) {
        match node {
            Node::NamedNode(n) => write_iri(out, n.as_str(), &self.options),
            Node::BlankNode(b) => {
                out.push_str("_:");
                out.push_str(b.as_str());
            }
            Node::Literal(l) => write_literal(out, l.as_ref(), &self.options, false, |out, dt| {
                write_iri(out, dt, &self.options);
            }),
            Node::PrefixedName(_) => unreachable!("expand() never returns a prefixed name"),
        }
    }

    fn write_subject(&self, out: &mut String, subject: &Subject) {
        self.write_node(out, &Node::from(subject.clone()));
    }

    fn write_predicate(&self, out: &mut String, predicate: &Predicate) {
        self.write_node(out, &Node::from(predicate.clone()));
    }

    /// Flushes any buffered output.
    pub fn finish(mut self) -> Result<W, RdfError> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> Sink for FlatSerializer<W> {
    fn on_event(&mut self, event: Event) -> Result<(), RdfError> {
        match event {
            Event::Base(iri) => {
                self.environment.set_base(Some(iri.as_str()))?;
                Ok(())
            }
            Event::Prefix { name, iri } => {
                self.environment.set_prefix(&name, iri.as_str())?;
                Ok(())
            }
            Event::Statement { statement, .. } => {
                let subject = self.expand_subject(statement.subject)?;
                let predicate = self.expand_predicate(statement.predicate)?;
                let object = self.environment.expand(statement.object)?;
                let graph = self.expand_graph(statement.graph)?;
                let mut line = String::new();
                self.write_subject(&mut line, &subject);
                line.push(' ');
                self.write_predicate(&mut line, &predicate);
                line.push(' ');
                self.write_node(&mut line, &object);
                if !matches!(graph, GraphName::DefaultGraph) {
                    line.push(' ');
                    self.write_node(&mut line, &Node::from(graph_to_node(graph)));
                }
                line.push_str(" .\n");
                self.writer.write_all(line.as_bytes())?;
                Ok(())
            }
            Event::End(_) => Ok(()),
        }
    }
}

fn graph_to_node(graph: GraphName) -> Node {
    match graph {
        GraphName::DefaultGraph => unreachable!("caller already excluded the default graph"),
        GraphName::NamedNode(n) => Node::NamedNode(n),
        GraphName::PrefixedName(n) => Node::PrefixedName(n),
        GraphName::BlankNode(n) => Node::BlankNode(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::node::{Literal, NamedNode};
    use crate::model::statement::Statement;
    use crate::event::StatementFlags;

    fn write_one(statement: Statement) -> String {
        let mut serializer = FlatSerializer::new(Vec::new(), SerializerOptions::new());
        serializer
            .on_event(Event::Statement {
                statement,
                flags: StatementFlags::default(),
            })
            .unwrap();
        String::from_utf8(serializer.finish().unwrap()).unwrap()
    }

    #[test]
    fn default_graph_statement_has_no_trailing_graph_term() {
        let out = write_one(Statement::new(
            Subject::NamedNode(NamedNode::new("http://ex/s")),
            Predicate::NamedNode(NamedNode::new("http://ex/p")),
            Node::Literal(Literal::new_simple("v")),
            GraphName::DefaultGraph,
        ));
        assert_eq!(out, "<http://ex/s> <http://ex/p> \"v\" .\n");
    }

    #[test]
    fn named_graph_statement_appends_the_graph_term() {
        let out = write_one(Statement::new(
            Subject::NamedNode(NamedNode::new("http://ex/s")),
            Predicate::NamedNode(NamedNode::new("http://ex/p")),
            Node::Literal(Literal::new_simple("v")),
            GraphName::NamedNode(NamedNode::new("http://ex/g")),
        ));
        assert_eq!(out, "<http://ex/s> <http://ex/p> \"v\" <http://ex/g> .\n");
    }

    #[test]
    fn prefixed_name_is_expanded_against_a_declared_prefix() {
        let mut serializer = FlatSerializer::new(Vec::new(), SerializerOptions::new());
        serializer
            .on_event(Event::Prefix {
                name: "ex".to_owned(),
                iri: NamedNode::new("http://example.com/"),
            })
            .unwrap();
        serializer
            .on_event(Event::Statement {
                statement: Statement::new(
                    Subject::PrefixedName(crate::model::node::PrefixedName::new("ex", "s")),
                    Predicate::NamedNode(NamedNode::new("http://ex/p")),
                    Node::Literal(Literal::new_simple("v")),
                    GraphName::DefaultGraph,
                ),
                flags: StatementFlags::default(),
            })
            .unwrap();
        let out = String::from_utf8(serializer.finish().unwrap()).unwrap();
        assert_eq!(out, "<http://example.com/s> <http://ex/p> \"v\" .\n");
    }

    #[test]
    fn ascii_option_escapes_non_ascii_literal_content() {
        let mut serializer = FlatSerializer::new(Vec::new(), SerializerOptions::new().with_ascii(true));
        serializer
            .on_event(Event::Statement {
                statement: Statement::new(
                    Subject::NamedNode(NamedNode::new("http://ex/s")),
                    Predicate::NamedNode(NamedNode::new("http://ex/p")),
                    Node::Literal(Literal::new_simple("caf\u{e9}")),
                    GraphName::DefaultGraph,
                ),
                flags: StatementFlags::default(),
            })
            .unwrap();
        let out = String::from_utf8(serializer.finish().unwrap()).unwrap();
        assert_eq!(out, "<http://ex/s> <http://ex/p> \"caf\\u00E9\" .\n");
    }
}
