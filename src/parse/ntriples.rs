//! N-Triples: the flat-triples syntax (`spec.md` §4 "flat" format family).
//!
//! Grounded on `oxttl::NTriplesParser`: one statement per line in the common case,
//! but the grammar itself is whitespace-insensitive, so this recognizer treats
//! newlines as ordinary whitespace and terminates statements on `.` alone.

use std::io::Read;

use crate::error::{Domain, RdfError, Status};
use crate::event::{Event, Sink, StatementFlags};
use crate::io::source::ByteSource;
use crate::model::node::{GraphName, Literal, Node, Predicate, Subject};
use crate::model::statement::Statement;
use crate::parse::{cursor_at, BlankNodeGenerator, Lexer, ParserOptions, RecoveryMode};

/// A pull parser over an N-Triples document.
pub struct NTriplesParser<R> {
    source: ByteSource<R>,
    options: ParserOptions,
    blanks: BlankNodeGenerator,
}

impl<R: Read> NTriplesParser<R> {
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
            Some(b'<') => Ok(Subject::NamedNode(crate::model::node::NamedNode::new(
                self.lexer().read_iriref()?,
            ))),
            Some(b'_') => {
                let label = self.lexer().read_blank_node_label()?;
                self.blanks.observe_user_label(&label);
                Ok(Subject::BlankNode(
                    crate::model::node::BlankNode::new(label).map_err(|e| {
                        RdfError::new(Status::BadSyntax, Domain::Parser, e.to_string())
                    })?,
                ))
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
            Some(b'<') => Ok(Node::NamedNode(crate::model::node::NamedNode::new(
                self.lexer().read_iriref()?,
            ))),
            Some(b'_') => {
                let label = self.lexer().read_blank_node_label()?;
                self.blanks.observe_user_label(&label);
                Ok(Node::BlankNode(
                    crate::model::node::BlankNode::new(label).map_err(|e| {
                        RdfError::new(Status::BadSyntax, Domain::Parser, e.to_string())
                    })?,
                ))
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

    fn parse_one(&mut self) -> Result<Statement, RdfError> {
        let cursor = cursor_at(&self.source, &self.options.document);
        let subject = self.read_subject()?;
        self.lexer().skip_ws_and_comments()?;
        let predicate_iri = self.lexer().read_iriref()?;
        let predicate = Predicate::NamedNode(crate::model::node::NamedNode::new(predicate_iri));
        self.lexer().skip_ws_and_comments()?;
        let object = self.read_object()?;
        self.lexer().skip_ws_and_comments()?;
        self.lexer().expect(b'.')?;
        Ok(Statement::new(subject, predicate, object, GraphName::DefaultGraph).with_origin(cursor))
    }

    /// Recovers from a bad statement in [`RecoveryMode::Lax`] by skipping to the
    /// next top-level `.` terminator.
    fn skip_to_next_statement(&mut self) -> Result<(), RdfError> {
        loop {
            match self.lexer().source.advance()? {
                None => return Ok(()),
                Some(b'.') => return Ok(()),
                Some(_) => {}
            }
        }
    }

    /// Drives every statement in the document into `sink` as [`Event::Statement`]
    /// events, returning the number of statements successfully parsed. In
    /// [`RecoveryMode::Lax`], a bad statement is skipped and parsing continues;
    /// in [`RecoveryMode::Strict`], the first error stops parsing.
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
    fn parses_a_simple_triple() {
        let source = ByteSource::from_str(
            "<http://ex/s> <http://ex/p> \"hello\" .\n",
        )
        .unwrap();
        let mut parser = NTriplesParser::new(source, ParserOptions::new());
        let statement = parser.next_statement().unwrap().unwrap();
        assert_eq!(statement.subject.to_string(), "<http://ex/s>");
        assert_eq!(statement.object.to_string(), "\"hello\"");
        assert!(parser.next_statement().is_none());
    }

    #[test]
    fn parses_typed_and_tagged_literals() {
        let source = ByteSource::from_str(
            "<http://ex/s> <http://ex/p> \"1\"^^<http://www.w3.org/2001/XMLSchema#integer> .\n\
             <http://ex/s> <http://ex/p> \"bonjour\"@fr .\n",
        )
        .unwrap();
        let mut parser = NTriplesParser::new(source, ParserOptions::new());
        let first = parser.next_statement().unwrap().unwrap();
        assert_eq!(
            first.object.to_string(),
            "\"1\"^^<http://www.w3.org/2001/XMLSchema#integer>"
        );
        let second = parser.next_statement().unwrap().unwrap();
        assert_eq!(second.object.to_string(), "\"bonjour\"@fr");
    }

    #[test]
    fn lax_recovery_skips_a_bad_statement_and_continues() {
        let source = ByteSource::from_str(
            "<http://ex/s> <http://ex/p> not-a-term .\n<http://ex/s> <http://ex/p> \"ok\" .\n",
        )
        .unwrap();
        let mut parser = NTriplesParser::new(
            source,
            ParserOptions::new().with_recovery(RecoveryMode::Lax),
        );
        let mut sink = crate::event::CollectingSink::default();
        let count = parser.parse_all(&mut sink).unwrap();
        assert_eq!(count, 1);
        assert_eq!(sink.events.len(), 1);
    }

    #[test]
    fn strict_recovery_stops_at_first_error() {
        let source = ByteSource::from_str("<http://ex/s> <http://ex/p> not-a-term .\n").unwrap();
        let mut parser = NTriplesParser::new(source, ParserOptions::new());
        let mut sink = crate::event::CollectingSink::default();
        assert!(parser.parse_all(&mut sink).is_err());
    }
}
