//! TriG: the terse-quads syntax (`spec.md` §4 "terse" format family).
//!
//! Turtle's grammar plus graph blocks: `{ ... }` (default graph), `GRAPH name {
//! ... }` and the bare `name { ... }` shorthand. Grounded on `oxttl::TriGParser`,
//! which layers exactly this dispatch over the same term/triples-block grammar
//! Turtle uses — here that shared grammar lives in
//! [`crate::parse::turtle::TurtleEngine`] and this module only adds the
//! graph-block recognition around it. TriG disallows nested graph blocks, so
//! a block's body is driven with the plain triples-block grammar directly
//! rather than recursing into this module's own dispatch.

use std::io::Read;

use crate::error::RdfError;
use crate::event::{Event, Sink};
use crate::io::source::ByteSource;
use crate::model::node::{GraphName, Node};
use crate::parse::turtle::TurtleEngine;
use crate::parse::ParserOptions;

pub struct TrigParser<R> {
    engine: TurtleEngine<R>,
}

impl<R: Read> TrigParser<R> {
    pub fn new(source: ByteSource<R>, options: ParserOptions) -> Self {
        Self {
            engine: TurtleEngine::new(source, options),
        }
    }

    fn parser_err(&self, message: impl Into<String>) -> RdfError {
        RdfError::new(
            crate::error::Status::BadSyntax,
            crate::error::Domain::Parser,
            message.into(),
        )
    }

    /// Parses one graph block's body (the triples it contains) up to and
    /// including its closing `}`, driving statements through the shared
    /// engine with `current_graph` already set by the caller.
    fn parse_graph_block_body(&mut self) -> Result<(), RdfError> {
        loop {
            self.engine.skip_ws()?;
            let next = self.engine.lexer().peek()?;
            match next {
                Some(b'}') => {
                    self.engine.lexer().expect(b'}')?;
                    return Ok(());
                }
                Some(b'@') => self.engine.parse_at_directive()?,
                Some(b) if b.is_ascii_alphabetic() => {
                    self.engine.dispatch_alpha_leading_statement()?;
                }
                _ => self.engine.parse_triples_block()?,
            }
        }
    }

    fn parse_graph_block(&mut self, name: GraphName) -> Result<(), RdfError> {
        self.engine.lexer().expect(b'{')?;
        let previous = std::mem::replace(&mut self.engine.current_graph, name);
        let result = self.parse_graph_block_body();
        self.engine
            .queue
            .push_back(Event::End(self.engine.current_graph.clone()));
        self.engine.current_graph = previous;
        result
    }

    /// Handles one top-level statement: a directive, an explicit `GRAPH name {
    /// ... }` or `{ ... }` block, an implicit `name { ... }` block, or an
    /// ordinary triples block — in that dispatch order.
    fn fill_queue(&mut self) -> Result<(), RdfError> {
        self.engine.skip_ws()?;
        let next = self.engine.lexer().peek()?;
        match next {
            None => Ok(()),
            Some(b'@') => self.engine.parse_at_directive(),
            Some(b'{') => self.parse_graph_block(GraphName::DefaultGraph),
            Some(b) if b.is_ascii_alphabetic() => {
                let word = self.engine.lexer().read_ascii_word()?;
                if matches!(self.engine.lexer().peek()?, Some(b':')) {
                    self.engine.lexer().expect(b':')?;
                    let local = self.engine.lexer().read_pn_local()?;
                    let name = crate::parse::prefixed_node(word, local);
                    self.after_leading_term(name)
                } else if word.eq_ignore_ascii_case("graph") {
                    self.engine.skip_ws()?;
                    let name = self.engine.read_graph_label()?;
                    self.engine.skip_ws()?;
                    let graph = to_graph_name(name).map_err(|_| self.parser_err("GRAPH name must not be a literal"))?;
                    self.parse_graph_block(graph)
                } else {
                    match word.to_ascii_lowercase().as_str() {
                        "prefix" => self.engine.parse_sparql_prefix_body(),
                        "base" => self.engine.parse_sparql_base_body(),
                        _ => Err(self.parser_err(format!("unexpected token {word:?}"))),
                    }
                }
            }
            Some(_) => {
                let (term, kind) = self.engine.read_subject_term()?;
                self.engine.skip_ws()?;
                if matches!(self.engine.lexer().peek()?, Some(b'{')) {
                    let graph =
                        to_graph_name(term).map_err(|_| self.parser_err("graph name must not be a literal"))?;
                    self.parse_graph_block(graph)
                } else {
                    self.engine.finish_triples_block(term, kind)
                }
            }
        }
    }

    /// Finishes dispatch for a subject read as a bare `prefix:local` term: either
    /// the start of an implicit `name { ... }` graph block, or an ordinary
    /// triples block.
    fn after_leading_term(&mut self, term: Node) -> Result<(), RdfError> {
        self.engine.skip_ws()?;
        if matches!(self.engine.lexer().peek()?, Some(b'{')) {
            let graph = to_graph_name(term).map_err(|_| self.parser_err("graph name must not be a literal"))?;
            self.parse_graph_block(graph)
        } else {
            self.engine
                .finish_triples_block(term, crate::parse::turtle::TermKind::Plain)
        }
    }

    pub fn next_event(&mut self) -> Option<Result<Event, RdfError>> {
        loop {
            if let Some(event) = self.engine.queue.pop_front() {
                return Some(Ok(event));
            }
            match self.engine.skip_ws() {
                Ok(()) => {}
                Err(e) => return Some(Err(e)),
            }
            match self.engine.lexer().peek() {
                Ok(None) => return None,
                Ok(Some(_)) => {}
                Err(e) => return Some(Err(e)),
            }
            if let Err(e) = self.fill_queue() {
                return Some(Err(e));
            }
        }
    }

    pub fn parse_all<S: Sink>(&mut self, sink: &mut S) -> Result<usize, RdfError> {
        let mut count = 0;
        loop {
            self.engine.skip_ws()?;
            if matches!(self.engine.lexer().peek()?, None) {
                return Ok(count);
            }
            match self.fill_queue() {
                Ok(()) => {
                    while let Some(event) = self.engine.queue.pop_front() {
                        if matches!(event, Event::Statement { .. }) {
                            count += 1;
                        }
                        sink.on_event(event)?;
                    }
                }
                Err(e) => {
                    self.engine.queue.clear();
                    match self.engine.options.recovery {
                        crate::parse::RecoveryMode::Strict => return Err(e),
                        crate::parse::RecoveryMode::Lax => {
                            log::warn!("{e}");
                            self.engine.source.advance()?;
                        }
                    }
                }
            }
        }
    }
}

fn to_graph_name(node: Node) -> Result<GraphName, crate::model::node::NotANodeNameError> {
    GraphName::try_from(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::CollectingSink;

    fn parse(input: &str) -> CollectingSink {
        let source = ByteSource::from_str(input).unwrap();
        let mut parser = TrigParser::new(source, ParserOptions::new());
        let mut sink = CollectingSink::default();
        parser.parse_all(&mut sink).unwrap();
        sink
    }

    #[test]
    fn explicit_graph_block_tags_every_statement_with_its_name() {
        let sink = parse(
            "@prefix ex: <http://example.com/> .\nGRAPH ex:g { ex:s ex:p ex:o . }\n",
        );
        let mut found = false;
        for event in &sink.events {
            if let Event::Statement { statement, .. } = event {
                assert!(!statement.is_default_graph());
                found = true;
            }
        }
        assert!(found);
    }

    #[test]
    fn bare_name_before_a_brace_is_an_implicit_graph_block() {
        let sink = parse("<http://ex/g> { <http://ex/s> <http://ex/p> <http://ex/o> . }\n");
        let Event::Statement { statement, .. } = sink
            .events
            .iter()
            .find(|e| matches!(e, Event::Statement { .. }))
            .unwrap()
        else {
            panic!("expected a statement event");
        };
        assert_eq!(statement.graph.to_string(), "<http://ex/g>");
    }

    #[test]
    fn unnamed_brace_block_is_the_default_graph() {
        let sink = parse("{ <http://ex/s> <http://ex/p> <http://ex/o> . }\n");
        let Event::Statement { statement, .. } = sink
            .events
            .iter()
            .find(|e| matches!(e, Event::Statement { .. }))
            .unwrap()
        else {
            panic!("expected a statement event");
        };
        assert!(statement.is_default_graph());
    }

    #[test]
    fn triples_block_outside_any_graph_also_targets_the_default_graph() {
        let sink = parse("<http://ex/s> <http://ex/p> <http://ex/o> .\n");
        let Event::Statement { statement, .. } = &sink.events[0] else {
            panic!("expected a statement event");
        };
        assert!(statement.is_default_graph());
    }
}
