//! Turtle: the terse-triples syntax (`spec.md` §4 "terse" format family).
//!
//! Grounded on `oxttl::TurtleParser`/`TurtleRecognizer`: directives, abbreviated
//! predicate/object lists (`,`/`;`), the `a` keyword, collections and anonymous
//! (`[...]`) nodes. The recognizer here is organized as [`TurtleEngine`], a
//! statement-at-a-time driver shared with [`crate::parse::trig`] (TriG is Turtle
//! plus graph blocks layered on the same term grammar).
//!
//! One narrow exception to the design's "terms stay unresolved until the
//! `Expander`/`Inserter` sink" rule: when [`ParserOptions::expand_prefixed_names`]
//! is set (the default), a literal's `^^prefix:local` datatype is resolved
//! against the engine's own running [`Environment`] immediately, because
//! [`Literal`] has no representation for an unresolved prefixed-name datatype
//! (only [`Node`] itself carries a `PrefixedName` variant). Subjects,
//! predicates, plain objects and graph names are completely unaffected and stay
//! raw, as everywhere else in the parser. Turning the option off trades that
//! convenience for strictness: such a literal is reported as a parse error
//! instead of being silently resolved, since there is nowhere to stash the
//! unresolved prefix.

use std::collections::VecDeque;
use std::io::Read;

use crate::env::Environment;
use crate::error::{Domain, RdfError, Status};
use crate::event::{Event, Sink, StatementFlags};
use crate::io::source::ByteSource;
use crate::model::node::{BlankNode, GraphName, Literal, NamedNode, Node, Predicate, Subject};
use crate::model::statement::Statement;
use crate::parse::{cursor_at, iri_node, numeric_literal, prefixed_node, BlankNodeGenerator, Lexer, ParserOptions, RecoveryMode};

/// How a term came to be: a plain token, a freshly-generated anonymous
/// (`[...]`) blank node, or the head of a `rdf:first`/`rdf:rest` list chain.
/// Carried alongside a parsed term so the statement it participates in can be
/// tagged with the matching [`StatementFlags`].
#[derive(Debug, Clone, Copy)]
pub(crate) enum TermKind {
    Plain,
    Anon { empty: bool },
    ListHead,
}

const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
const RDF_FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";
const RDF_REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";
const RDF_NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";

/// Shared Turtle/TriG statement grammar, driving one [`ByteSource`] and
/// accumulating parsed [`Event`]s into a queue a statement at a time.
pub(crate) struct TurtleEngine<R> {
    pub(crate) source: ByteSource<R>,
    pub(crate) options: ParserOptions,
    pub(crate) blanks: BlankNodeGenerator,
    pub(crate) environment: Environment,
    pub(crate) queue: VecDeque<Event>,
    pub(crate) current_graph: GraphName,
}

impl<R: Read> TurtleEngine<R> {
    pub(crate) fn new(source: ByteSource<R>, options: ParserOptions) -> Self {
        let mut environment = Environment::new();
        if let Some(base) = &options.base {
            // Ignore a malformed caller-supplied base here; `Environment::expand`
            // will surface the problem the first time it is actually needed.
            let _ = environment.set_base(Some(base));
        }
        let blanks = BlankNodeGenerator::with_document_prefix(options.blank_node_prefix.clone());
        Self {
            source,
            options,
            blanks,
            environment,
            queue: VecDeque::new(),
            current_graph: GraphName::DefaultGraph,
        }
    }

    pub(crate) fn lexer(&mut self) -> Lexer<'_, R> {
        Lexer::new(&mut self.source, self.options.max_token_len)
    }

    pub(crate) fn skip_ws(&mut self) -> Result<(), RdfError> {
        self.lexer().skip_ws_and_comments()
    }

    fn parser_err(&self, message: impl Into<String>) -> RdfError {
        RdfError::new(Status::BadSyntax, Domain::Parser, message.into()).with_cursor(cursor_at(
            &self.source,
            &self.options.document,
        ))
    }

    fn fresh_blank_node(&mut self, label: String) -> Result<BlankNode, RdfError> {
        self.blanks.observe_user_label(&label);
        BlankNode::new(label).map_err(|e| self.parser_err(e.to_string()))
    }

    // --- directives ---------------------------------------------------

    pub(crate) fn parse_at_directive(&mut self) -> Result<(), RdfError> {
        self.lexer().expect(b'@')?;
        let word = self.lexer().read_ascii_word()?;
        self.skip_ws()?;
        match word.to_ascii_lowercase().as_str() {
            "prefix" => {
                let (name, _) = self.lexer().read_prefixed_name()?;
                self.skip_ws()?;
                let iri = self.lexer().read_iriref()?;
                self.skip_ws()?;
                self.lexer().expect(b'.')?;
                self.environment.set_prefix(&name, &iri)?;
                self.queue.push_back(Event::Prefix {
                    name,
                    iri: NamedNode::new(iri),
                });
                Ok(())
            }
            "base" => {
                let iri = self.lexer().read_iriref()?;
                self.skip_ws()?;
                self.lexer().expect(b'.')?;
                self.environment.set_base(Some(&iri))?;
                self.queue.push_back(Event::Base(NamedNode::new(iri)));
                Ok(())
            }
            other => Err(self.parser_err(format!("unknown directive @{other}"))),
        }
    }

    pub(crate) fn parse_sparql_prefix_body(&mut self) -> Result<(), RdfError> {
        let (name, _) = self.lexer().read_prefixed_name()?;
        self.skip_ws()?;
        let iri = self.lexer().read_iriref()?;
        self.environment.set_prefix(&name, &iri)?;
        self.queue.push_back(Event::Prefix {
            name,
            iri: NamedNode::new(iri),
        });
        Ok(())
    }

    pub(crate) fn parse_sparql_base_body(&mut self) -> Result<(), RdfError> {
        self.skip_ws()?;
        let iri = self.lexer().read_iriref()?;
        self.environment.set_base(Some(&iri))?;
        self.queue.push_back(Event::Base(NamedNode::new(iri)));
        Ok(())
    }

    // --- terms ----------------------------------------------------------

    pub(crate) fn parse_anon(&mut self) -> Result<(Node, TermKind), RdfError> {
        self.lexer().expect(b'[')?;
        let bnode = self.blanks.fresh();
        self.skip_ws()?;
        if matches!(self.lexer().peek()?, Some(b']')) {
            self.lexer().expect(b']')?;
            return Ok((Node::BlankNode(bnode), TermKind::Anon { empty: true }));
        }
        self.parse_predicate_object_list(&Node::BlankNode(bnode.clone()), TermKind::Anon { empty: false })?;
        self.skip_ws()?;
        self.lexer().expect(b']')?;
        self.queue.push_back(Event::End(self.current_graph.clone()));
        Ok((Node::BlankNode(bnode), TermKind::Anon { empty: false }))
    }

    pub(crate) fn parse_collection(&mut self) -> Result<(Node, TermKind), RdfError> {
        self.lexer().expect(b'(')?;
        self.skip_ws()?;
        let rdf_nil = iri_node(RDF_NIL.to_owned());
        if matches!(self.lexer().peek()?, Some(b')')) {
            self.lexer().expect(b')')?;
            return Ok((rdf_nil, TermKind::Plain));
        }
        let mut items = Vec::new();
        loop {
            self.skip_ws()?;
            if matches!(self.lexer().peek()?, Some(b')')) {
                break;
            }
            let (item, _) = self.read_term()?;
            items.push(item);
            self.skip_ws()?;
        }
        self.lexer().expect(b')')?;
        let mut nodes: Vec<BlankNode> = Vec::with_capacity(items.len());
        for _ in 0..items.len() {
            nodes.push(self.blanks.fresh());
        }
        for (i, item) in items.into_iter().enumerate() {
            let node = Node::BlankNode(nodes[i].clone());
            let rest = if i + 1 < nodes.len() {
                Node::BlankNode(nodes[i + 1].clone())
            } else {
                rdf_nil.clone()
            };
            self.push_statement(node.clone(), TermKind::ListHead, iri_node(RDF_FIRST.to_owned()), item, TermKind::Plain)?;
            self.push_statement(node, TermKind::ListHead, iri_node(RDF_REST.to_owned()), rest, TermKind::Plain)?;
        }
        Ok((Node::BlankNode(nodes[0].clone()), TermKind::ListHead))
    }

    /// Reads a subject that starts with `<`, `_:`, `[` or `(` — the cases not
    /// already disambiguated by the caller's alphabetic-token lookahead (see
    /// [`Self::finish_triples_block`] callers in `turtle`/`trig`).
    pub(crate) fn read_subject_term(&mut self) -> Result<(Node, TermKind), RdfError> {
        let next = self.lexer().peek()?;
        match next {
            Some(b'<') => Ok((iri_node(self.lexer().read_iriref()?), TermKind::Plain)),
            Some(b'_') => {
                let label = self.lexer().read_blank_node_label()?;
                let bnode = self.fresh_blank_node(label)?;
                Ok((Node::BlankNode(bnode), TermKind::Plain))
            }
            Some(b'[') => self.parse_anon(),
            Some(b'(') => self.parse_collection(),
            Some(b) => Err(self.parser_err(format!("expected a subject, found {:?}", b as char))),
            None => Err(self.parser_err("expected a subject, found end of input")),
        }
    }

    /// Reads a graph name for a TriG graph block: `<iri>`, `_:label`, or
    /// `prefix:local`. Collections and anonymous nodes are not valid graph
    /// names.
    pub(crate) fn read_graph_label(&mut self) -> Result<Node, RdfError> {
        let next = self.lexer().peek()?;
        match next {
            Some(b'<') => Ok(iri_node(self.lexer().read_iriref()?)),
            Some(b'_') => {
                let label = self.lexer().read_blank_node_label()?;
                let bnode = self.fresh_blank_node(label)?;
                Ok(Node::BlankNode(bnode))
            }
            Some(b) if b.is_ascii_alphabetic() => {
                let (prefix, local) = self.lexer().read_prefixed_name()?;
                Ok(prefixed_node(prefix, local))
            }
            Some(b) => Err(self.parser_err(format!("expected a graph name, found {:?}", b as char))),
            None => Err(self.parser_err("expected a graph name, found end of input")),
        }
    }

    pub(crate) fn read_term(&mut self) -> Result<(Node, TermKind), RdfError> {
        self.skip_ws()?;
        let next = self.lexer().peek()?;
        let followed_by_digit = next == Some(b'.') && matches!(self.source.peek_second()?, Some(d) if d.is_ascii_digit());
        match next {
            Some(b'<') => Ok((iri_node(self.lexer().read_iriref()?), TermKind::Plain)),
            Some(b'_') => {
                let label = self.lexer().read_blank_node_label()?;
                let bnode = self.fresh_blank_node(label)?;
                Ok((Node::BlankNode(bnode), TermKind::Plain))
            }
            Some(b'[') => self.parse_anon(),
            Some(b'(') => self.parse_collection(),
            Some(b'"' | b'\'') => {
                let value = self.lexer().read_quoted_string()?;
                let (datatype, language) = self.lexer().read_literal_suffix()?;
                let literal = match (datatype, language) {
                    (_, Some(lang)) => Literal::new_language_tagged(value, lang),
                    (Some(Node::NamedNode(dt)), None) => Literal::new_typed(value, dt),
                    (Some(Node::PrefixedName(p)), None) => {
                        if !self.options.expand_prefixed_names {
                            return Err(self.parser_err(format!(
                                "a `^^{p}` literal datatype needs prefix expansion, but \
                                 expand_prefixed_names is disabled and Literal has no way to \
                                 carry an unresolved prefixed name"
                            )));
                        }
                        match self.environment.expand(Node::PrefixedName(p))? {
                            Node::NamedNode(dt) => Literal::new_typed(value, dt),
                            _ => Literal::new_simple(value),
                        }
                    }
                    _ => Literal::new_simple(value),
                };
                Ok((Node::Literal(literal), TermKind::Plain))
            }
            Some(b) if b.is_ascii_digit() || matches!(b, b'+' | b'-') => {
                Ok((Node::Literal(numeric_literal(&self.lexer().read_numeric_token()?)), TermKind::Plain))
            }
            Some(b'.') if followed_by_digit => {
                Ok((Node::Literal(numeric_literal(&self.lexer().read_numeric_token()?)), TermKind::Plain))
            }
            Some(b) if b.is_ascii_alphabetic() || b == b':' => {
                Ok((self.lexer().read_prefixed_name_or_keyword()?, TermKind::Plain))
            }
            Some(b) => Err(self.parser_err(format!("expected a term, found {:?}", b as char))),
            None => Err(self.parser_err("expected a term, found end of input")),
        }
    }

    // --- statements -------------------------------------------------------

    fn push_statement(
        &mut self,
        subject: Node,
        subject_kind: TermKind,
        predicate: Node,
        object: Node,
        object_kind: TermKind,
    ) -> Result<(), RdfError> {
        let subject = Subject::try_from(subject)?;
        let predicate = Predicate::try_from(predicate)?;
        let flags = StatementFlags {
            anon_subject: matches!(subject_kind, TermKind::Anon { .. }),
            anon_object: matches!(object_kind, TermKind::Anon { .. }),
            list_subject: matches!(subject_kind, TermKind::ListHead),
            list_object: matches!(object_kind, TermKind::ListHead),
            empty_blank: matches!(subject_kind, TermKind::Anon { empty: true })
                || matches!(object_kind, TermKind::Anon { empty: true }),
        };
        let cursor = cursor_at(&self.source, &self.options.document);
        let statement =
            Statement::new(subject, predicate, object, self.current_graph.clone()).with_origin(cursor);
        self.queue.push_back(Event::Statement { statement, flags });
        Ok(())
    }

    fn push_object_list(&mut self, subject: &Node, subject_kind: TermKind, verb: Node) -> Result<(), RdfError> {
        loop {
            let (object, object_kind) = self.read_term()?;
            self.push_statement(subject.clone(), subject_kind, verb.clone(), object, object_kind)?;
            self.skip_ws()?;
            if matches!(self.lexer().peek()?, Some(b',')) {
                self.lexer().expect(b',')?;
                self.skip_ws()?;
                continue;
            }
            break;
        }
        Ok(())
    }

    pub(crate) fn parse_predicate_object_list(&mut self, subject: &Node, subject_kind: TermKind) -> Result<(), RdfError> {
        loop {
            self.skip_ws()?;
            let verb = self.lexer().read_verb()?;
            self.skip_ws()?;
            self.push_object_list(subject, subject_kind, verb)?;
            self.skip_ws()?;
            if matches!(self.lexer().peek()?, Some(b';')) {
                self.lexer().expect(b';')?;
                self.skip_ws()?;
                if matches!(self.lexer().peek()?, Some(b'.') | Some(b']') | None) {
                    break;
                }
                continue;
            }
            break;
        }
        Ok(())
    }

    /// Finishes a triples statement given an already-parsed subject: an
    /// optional `predicateObjectList` (mandatory unless `kind` shows the
    /// subject was itself a `[...]`/`(...)` term) followed by `.`.
    pub(crate) fn finish_triples_block(&mut self, subject: Node, kind: TermKind) -> Result<(), RdfError> {
        self.skip_ws()?;
        let optional = matches!(kind, TermKind::Anon { .. } | TermKind::ListHead);
        if !(optional && matches!(self.lexer().peek()?, Some(b'.'))) {
            self.parse_predicate_object_list(&subject, kind)?;
        }
        self.skip_ws()?;
        self.lexer().expect(b'.')?;
        Ok(())
    }

    pub(crate) fn parse_triples_block(&mut self) -> Result<(), RdfError> {
        let (subject, kind) = self.read_subject_term()?;
        self.finish_triples_block(subject, kind)
    }

    /// Handles the common ambiguity at the start of a top-level statement: a
    /// bare alphabetic run is either a SPARQL-style `PREFIX`/`BASE` keyword or
    /// the prefix of a `prefix:local` subject, distinguished by whether a `:`
    /// immediately follows (no directive keyword is itself followed by `:`).
    pub(crate) fn dispatch_alpha_leading_statement(&mut self) -> Result<(), RdfError> {
        let word = self.lexer().read_ascii_word()?;
        if matches!(self.lexer().peek()?, Some(b':')) {
            self.lexer().expect(b':')?;
            let local = self.lexer().read_pn_local()?;
            self.finish_triples_block(prefixed_node(word, local), TermKind::Plain)
        } else {
            match word.to_ascii_lowercase().as_str() {
                "prefix" => self.parse_sparql_prefix_body(),
                "base" => self.parse_sparql_base_body(),
                _ => Err(self.parser_err(format!("unexpected token {word:?}"))),
            }
        }
    }

    pub(crate) fn fill_queue(&mut self) -> Result<(), RdfError> {
        self.skip_ws()?;
        let next = self.lexer().peek()?;
        match next {
            None => Ok(()),
            Some(b'@') => self.parse_at_directive(),
            Some(b) if b.is_ascii_alphabetic() => self.dispatch_alpha_leading_statement(),
            Some(_) => self.parse_triples_block(),
        }
    }

    fn skip_to_next_statement(&mut self) -> Result<(), RdfError> {
        loop {
            match self.source.advance()? {
                None => return Ok(()),
                Some(b'.') => return Ok(()),
                Some(_) => {}
            }
        }
    }

    pub(crate) fn next_event(&mut self) -> Option<Result<Event, RdfError>> {
        loop {
            if let Some(event) = self.queue.pop_front() {
                return Some(Ok(event));
            }
            if let Err(e) = self.skip_ws() {
                return Some(Err(e));
            }
            match self.lexer().peek() {
                Ok(None) => return None,
                Ok(Some(_)) => {}
                Err(e) => return Some(Err(e)),
            }
            if let Err(e) = self.fill_queue() {
                return Some(Err(e));
            }
        }
    }

    pub(crate) fn parse_all<S: Sink>(&mut self, sink: &mut S) -> Result<usize, RdfError> {
        let mut count = 0;
        loop {
            self.skip_ws()?;
            if matches!(self.lexer().peek()?, None) {
                return Ok(count);
            }
            match self.fill_queue() {
                Ok(()) => {
                    while let Some(event) = self.queue.pop_front() {
                        if matches!(event, Event::Statement { .. }) {
                            count += 1;
                        }
                        sink.on_event(event)?;
                    }
                }
                Err(e) => {
                    self.queue.clear();
                    match self.options.recovery {
                        RecoveryMode::Strict => return Err(e),
                        RecoveryMode::Lax => {
                            log::warn!("{e}");
                            self.skip_to_next_statement()?;
                        }
                    }
                }
            }
        }
    }
}

/// A pull parser over a Turtle document.
pub struct TurtleParser<R> {
    engine: TurtleEngine<R>,
}

impl<R: Read> TurtleParser<R> {
    pub fn new(source: ByteSource<R>, options: ParserOptions) -> Self {
        Self {
            engine: TurtleEngine::new(source, options),
        }
    }

    /// Returns the next event (`@base`/`@prefix`/statement/end-of-anon), or
    /// `None` at end of input.
    pub fn next_event(&mut self) -> Option<Result<Event, RdfError>> {
        self.engine.next_event()
    }

    /// Drives every event in the document into `sink`, returning the number of
    /// statements successfully parsed.
    pub fn parse_all<S: Sink>(&mut self, sink: &mut S) -> Result<usize, RdfError> {
        self.engine.parse_all(sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::CollectingSink;

    fn parse(input: &str) -> CollectingSink {
        let source = ByteSource::from_str(input).unwrap();
        let mut parser = TurtleParser::new(source, ParserOptions::new());
        let mut sink = CollectingSink::default();
        parser.parse_all(&mut sink).unwrap();
        sink
    }

    #[test]
    fn parses_prefix_directive_and_abbreviated_predicate_object_list() {
        let sink = parse(
            "@prefix ex: <http://example.com/> .\nex:s ex:p ex:o1 , ex:o2 ; ex:q ex:o3 .\n",
        );
        let statements: Vec<_> = sink
            .events
            .iter()
            .filter_map(|e| match e {
                Event::Statement { statement, .. } => Some(statement),
                _ => None,
            })
            .collect();
        assert_eq!(statements.len(), 3);
    }

    #[test]
    fn the_a_keyword_expands_to_rdf_type() {
        let sink = parse("<http://ex/s> a <http://ex/Type> .\n");
        let Event::Statement { statement, .. } = &sink.events[0] else {
            panic!("expected a statement event");
        };
        assert_eq!(statement.predicate.to_string(), format!("<{RDF_TYPE}>"));
    }

    #[test]
    fn anonymous_node_produces_its_own_statements_and_an_end_event() {
        let sink = parse("<http://ex/s> <http://ex/p> [ <http://ex/q> <http://ex/r> ] .\n");
        let mut saw_end = false;
        let mut statement_count = 0;
        for event in &sink.events {
            match event {
                Event::Statement { flags, .. } => {
                    statement_count += 1;
                    if flags.anon_object {
                        assert!(!flags.anon_subject);
                    }
                }
                Event::End(_) => saw_end = true,
                _ => {}
            }
        }
        assert_eq!(statement_count, 2);
        assert!(saw_end);
    }

    #[test]
    fn collection_expands_to_a_rdf_first_rest_chain() {
        let sink = parse("<http://ex/s> <http://ex/p> ( 1 2 ) .\n");
        let statements: Vec<_> = sink
            .events
            .iter()
            .filter_map(|e| match e {
                Event::Statement { statement, flags } => Some((statement, flags)),
                _ => None,
            })
            .collect();
        // one outer statement (object = list head) + 2 rdf:first + 2 rdf:rest
        assert_eq!(statements.len(), 5);
        assert!(statements[0].1.list_object);
    }

    #[test]
    fn numeric_and_boolean_shorthands_are_typed() {
        let sink = parse("<http://ex/s> <http://ex/p> 1 .\n<http://ex/s> <http://ex/p> 1.5 .\n<http://ex/s> <http://ex/p> true .\n");
        let objects: Vec<String> = sink
            .events
            .iter()
            .filter_map(|e| match e {
                Event::Statement { statement, .. } => Some(statement.object.to_string()),
                _ => None,
            })
            .collect();
        assert!(objects[0].ends_with("#integer>"));
        assert!(objects[1].ends_with("#decimal>"));
        assert!(objects[2].ends_with("#boolean>"));
    }

    #[test]
    fn trailing_period_after_bare_integer_is_not_consumed_into_the_number() {
        let sink = parse("<http://ex/s> <http://ex/p> 1 .");
        let Event::Statement { statement, .. } = &sink.events[0] else {
            panic!("expected a statement event");
        };
        assert!(statement.object.to_string().starts_with("\"1\""));
    }

    #[test]
    fn prefixed_datatype_is_resolved_eagerly_by_default() {
        let sink = parse(
            "@prefix xsd: <http://www.w3.org/2001/XMLSchema#> .\n\
             <http://ex/s> <http://ex/p> \"1\"^^xsd:integer .\n",
        );
        let Event::Statement { statement, .. } = sink
            .events
            .iter()
            .find(|e| matches!(e, Event::Statement { .. }))
            .unwrap()
        else {
            panic!("expected a statement event");
        };
        assert_eq!(
            statement.object.to_string(),
            "\"1\"^^<http://www.w3.org/2001/XMLSchema#integer>"
        );
    }

    #[test]
    fn disabling_expand_prefixed_names_rejects_a_prefixed_datatype() {
        let source = ByteSource::from_str(
            "@prefix xsd: <http://www.w3.org/2001/XMLSchema#> .\n\
             <http://ex/s> <http://ex/p> \"1\"^^xsd:integer .\n",
        )
        .unwrap();
        let mut parser = TurtleParser::new(
            source,
            ParserOptions::new().with_expand_prefixed_names(false),
        );
        let mut sink = CollectingSink::default();
        assert!(parser.parse_all(&mut sink).is_err());
    }

    #[test]
    fn a_caller_supplied_blank_node_prefix_is_prepended_to_generated_labels() {
        let source = ByteSource::from_str("[ <http://ex/p> <http://ex/o> ] .\n").unwrap();
        let mut parser = TurtleParser::new(
            source,
            ParserOptions::new().with_blank_node_prefix("doc7-"),
        );
        let mut sink = CollectingSink::default();
        parser.parse_all(&mut sink).unwrap();
        let Event::Statement { statement, .. } = sink
            .events
            .iter()
            .find(|e| matches!(e, Event::Statement { .. }))
            .unwrap()
        else {
            panic!("expected a statement event");
        };
        assert!(statement.subject.to_string().starts_with("_:doc7-b"));
    }
}
