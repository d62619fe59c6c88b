//! N-Quads: the flat-quads syntax (`spec.md` §4 "flat" format family).
//!
//! An N-Triples statement plus an optional fourth graph-name term before the
//! terminating `.`; grounded on `oxttl::NQuadsParser`, which shares N-Triples'
//! term grammar and adds exactly this one optional term.

use std::io::Read;

use crate::error::{Domain, RdfError, Status};
use crate::event::{Event, Sink, StatementFlags};
use crate::io::source::ByteSource;
use crate::model::node::{BlankNode, GraphName, Literal, NamedNode, Node, Predicate, Subject};
use crate::model::statement::Statement;
use crate::parse::{cursor_at, BlankNodeGenerator, Lexer, ParserOptions, RecoveryMode};

/// A pull parser over an N-Quads document.
pub struct NQuadsParser<R> {
    source: ByteSource<R>,
    options: ParserOptions,
    blanks: BlankNodeGenerator,
}

impl<R: Read> NQuadsParser<R> {
    pub fn new(source: ByteSource<R>, options: ParserOptions) -> Self {
        let blanks = BlankNodeGenerator::with_document_prefix(options.blank_node_prefix.clone());
        Self {
            source,
            options,
            blanks,
        }
    }

    fn lexer(&mut self) -> Lexer<'_, R> {
        Lexer::new(&mut self.source, self.options.max_token_len)
    }

    fn read_subject(&mut self) -> Result<Subject, RdfError> {
        match self.lexer().peek()? {
            Some(b'<') => Ok(Subject::NamedNode(NamedNode::new(self.lexer().read_iriref()?))),
            Some(b'_') => {
                let label = self.lexer().read_blank_node_label()?;
                self.blanks.observe_user_label(&label);
                Ok(Subject::BlankNode(BlankNode::new(label).map_err(|e| {
                    RdfError::new(Status::BadSyntax, Domain::Parser, e.to_string())
                })?))
            }
            Some(b) => Err(RdfError::new(
                Status::BadSyntax,
                Domain::Parser,
                format!("expected a subject, found {:?}", b as char),
            )),
            None => Err(RdfError::new(
                Status::BadSyntax,
                Domain::Parser,
                "expected a subject, found end of input",
            )),
        }
    }

    fn read_object(&mut self) -> Result<Node, RdfError> {
        match self.lexer().peek()? {
            Some(b'<') => Ok(Node::NamedNode(NamedNode::new(self.lexer().read_iriref()?))),
            Some(b'_') => {
                let label = self.lexer().read_blank_node_label()?;
                self.blanks.observe_user_label(&label);
                Ok(Node::BlankNode(BlankNode::new(label).map_err(|e| {
                    RdfError::new(Status::BadSyntax, Domain::Parser, e.to_string())
                })?))
            }
            Some(b'"') => {
                let value = self.lexer().read_quoted_string()?;
                let (datatype, language) = self.lexer().read_literal_suffix()?;
                Ok(Node::Literal(match (datatype, language) {
                    (_, Some(lang)) => Literal::new_language_tagged(value, lang),
                    (Some(Node::NamedNode(dt)), None) => Literal::new_typed(value, dt),
                    _ => Literal::new_simple(value),
                }))
            }
            Some(b) => Err(RdfError::new(
                Status::BadSyntax,
                Domain::Parser,
                format!("expected an object, found {:?}", b as char),
            )),
            None => Err(RdfError::new(
                Status::BadSyntax,
                Domain::Parser,
                "expected an object, found end of input",
            )),
        }
    }

    fn read_graph(&mut self) -> Result<GraphName, RdfError> {
        match self.lexer().peek()? {
            Some(b'<') => Ok(GraphName::NamedNode(NamedNode::new(self.lexer().read_iriref()?))),
            Some(b'_') => {
                let label = self.lexer().read_blank_node_label()?;
                self.blanks.observe_user_label(&label);
                Ok(GraphName::BlankNode(BlankNode::new(label).map_err(|e| {
                    RdfError::new(Status::BadSyntax, Domain::Parser, e.to_string())
                })?))
            }
            Some(b) => Err(RdfError::new(
                Status::BadSyntax,
                Domain::Parser,
                format!("expected a graph name, found {:?}", b as char),
            )),
            None => Err(RdfError::new(
                Status::BadSyntax,
                Domain::Parser,
                "expected a graph name, found end of input",
            )),
        }
    }

    fn parse_one(&mut self) -> Result<Statement, RdfError> {
        let cursor = cursor_at(&self.source, &self.options.document);
        let subject = self.read_subject()?;
        self.lexer().skip_ws_and_comments()?;
        let predicate_iri = self.lexer().read_iriref()?;
        let predicate = Predicate::NamedNode(NamedNode::new(predicate_iri));
        self.lexer().skip_ws_and_comments()?;
        let object = self.read_object()?;
        self.lexer().skip_ws_and_comments()?;
        let graph = if matches!(self.lexer().peek()?, Some(b'.')) {
            GraphName::DefaultGraph
        } else {
            let g = self.read_graph()?;
            self.lexer().skip_ws_and_comments()?;
            g
        };
        self.lexer().expect(b'.')?;
        Ok(Statement::new(subject, predicate, object, graph).with_origin(cursor))
    }

    fn skip_to_next_statement(&mut self) -> Result<(), RdfError> {
        loop {
            match self.lexer().source.advance()? {
                None => return Ok(()),
                Some(b'.') => return Ok(()),
                Some(_) => {}
            }
        }
    }

    /// Parses and returns the next statement, or `None` at end of input.
    pub fn next_statement(&mut self) -> Option<Result<Statement, RdfError>> {
        if let Err(e) = self.lexer().skip_ws_and_comments() {
            return Some(Err(e));
        }
        if matches!(self.lexer().peek(), Ok(None)) {
            return None;
        }
        Some(self.parse_one())
    }

    /// Drives every statement in the document into `sink`, returning the number
    /// successfully parsed, with the same strict/lax behavior as
    /// [`crate::parse::ntriples::NTriplesParser::parse_all`].
    pub fn parse_all<S: Sink>(&mut self, sink: &mut S) -> Result<usize, RdfError> {
        let mut count = 0;
        loop {
            if let Err(e) = self.lexer().skip_ws_and_comments() {
                return Err(e);
            }
            if matches!(self.lexer().peek(), Ok(None)) {
                return Ok(count);
            }
            match self.parse_one() {
                Ok(statement) => {
                    sink.on_event(Event::Statement {
                        statement,
                        flags: StatementFlags::default(),
                    })?;
                    count += 1;
                }
                Err(e) => match self.options.recovery {
                    RecoveryMode::Strict => return Err(e),
                    RecoveryMode::Lax => {
                        log::warn!("{e}");
                        self.skip_to_next_statement()?;
                    }
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_quad_with_explicit_graph() {
        let source = ByteSource::from_str(
            "<http://ex/s> <http://ex/p> \"v\" <http://ex/g> .\n",
        )
        .unwrap();
        let mut parser = NQuadsParser::new(source, ParserOptions::new());
        let statement = parser.next_statement().unwrap().unwrap();
        assert_eq!(statement.graph.to_string(), "<http://ex/g>");
    }

    #[test]
    fn missing_graph_defaults_to_default_graph() {
        let source = ByteSource::from_str("<http://ex/s> <http://ex/p> \"v\" .\n").unwrap();
        let mut parser = NQuadsParser::new(source, ParserOptions::new());
        let statement = parser.next_statement().unwrap().unwrap();
        assert!(statement.is_default_graph());
    }
}
