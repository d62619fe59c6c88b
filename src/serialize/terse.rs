//! Terse serializer: Turtle (default graph only) / TriG output, abbreviating
//! wherever `spec.md` §4.6 allows it.
//!
//! Grounded on `oxttl::trig::LowLevelTriGWriter::write_quad`'s state machine:
//! a running `(subject, predicate)` pair decides between `,` (same subject
//! and predicate), `;` (same subject, new predicate) and a fresh statement,
//! and a running graph name decides when to open/close a `{ ... }` block. `a`
//! for `rdf:type` and prefixed-name abbreviation follow `TurtlePredicate`/
//! `TurtleTerm`'s `Display` impls in the same file.
//!
//! One deliberate addition beyond that writer: anonymous-node (`[...]`) and
//! list (`(...)`) inlining, driven by [`StatementFlags`]. oxttl's own writer
//! always spells blank nodes and `rdf:first`/`rdf:rest` chains out literally;
//! `spec.md` §4.6 calls inlining out as a serializer responsibility, and the
//! flags exist on every event specifically to make it possible, so this is
//! built as an enrichment on top of the teacher's shape rather than a
//! simplification away from it (see `DESIGN.md`). Because the parser emits a
//! bracketed term's own statements before the statement that uses it as an
//! object, this serializer buffers a blank node's statements the moment they
//! arrive tagged `anon_subject`/`list_subject`, and only writes them — inline
//! as `[...]`/`(...)`, recursively — once something else's object names that
//! blank node, or (for a genuinely top-level `[...]`/`(...)` term) once it is
//! clear nothing ever will.
//!
//! Unlike [`crate::serialize::flat::FlatSerializer`], subjects/predicates/
//! objects/graph names are never run through an [`Environment`]: a
//! `Node::PrefixedName` that arrives from the parser is assumed to already be
//! the abbreviation the caller wants and is written as-is. `Environment` is
//! kept here only for its `qualify` side — offering a `prefix:local` spelling
//! for a `NamedNode` that arrived fully expanded (e.g. from a store).

use std::collections::HashMap;
use std::io::Write;

use crate::env::Environment;
use crate::error::RdfError;
use crate::event::{Event, Sink, StatementFlags};
use crate::model::node::{BlankNode, GraphName, Node, Predicate, Subject};
use crate::model::statement::Statement;
use crate::serialize::{is_valid_pn_local, write_iri, write_literal, SerializerOptions, RDF_NIL, RDF_TYPE};

const RDF_FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";
const RDF_REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BracketKind {
    Anon,
    List,
}

type BufferedEntry = (Predicate, Node, bool);

/// Writes events as Turtle (statements only ever in the default graph) or
/// TriG (any non-default graph gets its own `{ ... }` block).
pub struct TerseSerializer<W> {
    writer: W,
    options: SerializerOptions,
    environment: Environment,
    current_graph: GraphName,
    current_subject_predicate: Option<(Subject, Predicate)>,
    buffered: HashMap<BlankNode, (BracketKind, Vec<BufferedEntry>)>,
    roots: Vec<BlankNode>,
}

impl<W: Write> TerseSerializer<W> {
    pub fn new(writer: W, options: SerializerOptions) -> Self {
        Self {
            writer,
            options,
            environment: Environment::new(),
            current_graph: GraphName::DefaultGraph,
            current_subject_predicate: None,
            buffered: HashMap::new(),
            roots: Vec::new(),
        }
    }

    fn write_statement(&mut self, statement: Statement, flags: StatementFlags) -> Result<(), RdfError> {
        if (flags.anon_subject && !flags.empty_blank) || flags.list_subject {
            return self.buffer_statement(statement, flags);
        }

        let consuming = match (&statement.object, flags.anon_object || flags.list_object) {
            (Node::BlankNode(b), true) if !flags.empty_blank => Some(b.clone()),
            _ => None,
        };
        let leftovers: Vec<BlankNode> = self
            .roots
            .iter()
            .filter(|b| consuming.as_ref() != Some(*b))
            .cloned()
            .collect();
        for root in leftovers {
            self.flush_root(&root)?;
        }

        self.open_graph(statement.graph)?;

        let subject_is_empty_anon = flags.anon_subject && flags.empty_blank;
        let object_is_empty_anon = flags.anon_object && flags.empty_blank;

        let same_subject =
            matches!(&self.current_subject_predicate, Some((s, _)) if *s == statement.subject);
        let same_predicate = same_subject
            && matches!(&self.current_subject_predicate, Some((_, p)) if *p == statement.predicate);

        let mut line = String::new();
        if same_predicate {
            line.push_str(" , ");
        } else if same_subject {
            line.push_str(" ;\n\t");
            self.render_predicate(&mut line, &statement.predicate);
            line.push(' ');
        } else {
            if self.current_subject_predicate.is_some() {
                self.writer.write_all(b" .\n")?;
            }
            self.render_subject_like(&mut line, &statement.subject, subject_is_empty_anon);
            line.push(' ');
            self.render_predicate(&mut line, &statement.predicate);
            line.push(' ');
        }
        self.render_object(&mut line, &statement.object, object_is_empty_anon);
        self.writer.write_all(line.as_bytes())?;
        self.current_subject_predicate = Some((statement.subject, statement.predicate));
        Ok(())
    }

    fn buffer_statement(&mut self, statement: Statement, flags: StatementFlags) -> Result<(), RdfError> {
        let bnode = match statement.subject {
            Subject::BlankNode(b) => b,
            _ => unreachable!("anon/list subject is always a blank node"),
        };
        let kind = if flags.list_subject { BracketKind::List } else { BracketKind::Anon };
        let object_is_empty_anon = flags.anon_object && flags.empty_blank;
        if !self.buffered.contains_key(&bnode) {
            self.roots.push(bnode.clone());
        }
        self.buffered
            .entry(bnode)
            .or_insert_with(|| (kind, Vec::new()))
            .1
            .push((statement.predicate, statement.object, object_is_empty_anon));
        Ok(())
    }

    fn flush_root(&mut self, bnode: &BlankNode) -> Result<(), RdfError> {
        if !self.buffered.contains_key(bnode) {
            return Ok(());
        }
        if self.current_subject_predicate.take().is_some() {
            self.writer.write_all(b" .\n")?;
        }
        let mut line = String::new();
        self.render_inline(&mut line, bnode);
        line.push_str(" .\n");
        self.writer.write_all(line.as_bytes())?;
        Ok(())
    }

    fn open_graph(&mut self, graph: GraphName) -> Result<(), RdfError> {
        if graph == self.current_graph {
            return Ok(());
        }
        if self.current_subject_predicate.take().is_some() {
            self.writer.write_all(b" .\n")?;
        }
        if !matches!(self.current_graph, GraphName::DefaultGraph) {
            self.writer.write_all(b"}\n")?;
        }
        self.current_graph = graph.clone();
        if !matches!(graph, GraphName::DefaultGraph) {
            let subject = graph_to_subject(graph);
            let mut header = String::new();
            self.render_subject_like(&mut header, &subject, false);
            header.push_str(" {\n");
            self.writer.write_all(header.as_bytes())?;
        }
        Ok(())
    }

    fn render_predicate(&mut self, out: &mut String, predicate: &Predicate) {
        if let Predicate::NamedNode(n) = predicate {
            if n.as_str() == RDF_TYPE {
                out.push('a');
                return;
            }
        }
        match predicate {
            Predicate::NamedNode(n) => render_iri_or_prefixed(&self.environment, &self.options, out, n.as_str()),
            Predicate::PrefixedName(p) => out.push_str(&p.to_string()),
        }
    }

    fn render_subject_like(&mut self, out: &mut String, node: &Subject, is_empty_anon: bool) {
        match node {
            Subject::NamedNode(n) => render_iri_or_prefixed(&self.environment, &self.options, out, n.as_str()),
            Subject::PrefixedName(p) => out.push_str(&p.to_string()),
            Subject::BlankNode(b) => {
                if is_empty_anon {
                    out.push_str("[]");
                } else {
                    self.render_inline(out, b);
                }
            }
        }
    }

    fn render_object(&mut self, out: &mut String, node: &Node, is_empty_anon: bool) {
        match node {
            Node::NamedNode(n) if n.as_str() == RDF_NIL => out.push_str("()"),
            Node::NamedNode(n) => render_iri_or_prefixed(&self.environment, &self.options, out, n.as_str()),
            Node::PrefixedName(p) => out.push_str(&p.to_string()),
            Node::BlankNode(b) => {
                if is_empty_anon {
                    out.push_str("[]");
                } else {
                    self.render_inline(out, b);
                }
            }
            Node::Literal(l) => {
                let env = self.environment.clone();
                let opts = self.options.clone();
                write_literal(out, l.as_ref(), &opts, true, |out, dt| {
                    render_iri_or_prefixed(&env, &opts, out, dt);
                });
            }
        }
    }

    /// Renders `bnode` as `[...]`/`(...)` if it is a buffered anon/list root,
    /// else as an ordinary `_:label` reference.
    fn render_inline(&mut self, out: &mut String, bnode: &BlankNode) {
        match self.buffered.get(bnode).map(|(kind, _)| *kind) {
            Some(BracketKind::Anon) => self.render_anon(out, bnode),
            Some(BracketKind::List) => self.render_list(out, bnode),
            None => {
                out.push_str("_:");
                out.push_str(bnode.as_str());
            }
        }
    }

    fn render_anon(&mut self, out: &mut String, bnode: &BlankNode) {
        self.roots.retain(|b| b != bnode);
        let Some((_, entries)) = self.buffered.remove(bnode) else {
            out.push_str("_:");
            out.push_str(bnode.as_str());
            return;
        };
        out.push_str("[ ");
        for (i, (predicate, object, object_is_empty_anon)) in entries.into_iter().enumerate() {
            if i > 0 {
                out.push_str(" ; ");
            }
            self.render_predicate(out, &predicate);
            out.push(' ');
            self.render_object(out, &object, object_is_empty_anon);
        }
        out.push_str(" ]");
    }

    fn render_list(&mut self, out: &mut String, head: &BlankNode) {
        out.push('(');
        let mut cur = head.clone();
        let mut wrote_item = false;
        loop {
            self.roots.retain(|b| b != &cur);
            let Some((_, entries)) = self.buffered.remove(&cur) else {
                break;
            };
            let mut first_item = None;
            let mut rest_item = None;
            for (predicate, object, object_is_empty_anon) in entries {
                match &predicate {
                    Predicate::NamedNode(n) if n.as_str() == RDF_FIRST => {
                        first_item = Some((object, object_is_empty_anon));
                    }
                    Predicate::NamedNode(n) if n.as_str() == RDF_REST => rest_item = Some(object),
                    _ => {}
                }
            }
            if let Some((object, object_is_empty_anon)) = first_item {
                if wrote_item {
                    out.push(' ');
                }
                self.render_object(out, &object, object_is_empty_anon);
                wrote_item = true;
            }
            match rest_item {
                Some(Node::NamedNode(n)) if n.as_str() == RDF_NIL => break,
                Some(Node::BlankNode(next)) => cur = next,
                _ => break,
            }
        }
        out.push(')');
    }

    /// Flushes any statements buffered but never referenced (a top-level
    /// `[...]`/`(...)` term that was never anyone's object), closes the
    /// current statement and graph block, and flushes buffered output.
    pub fn finish(mut self) -> Result<W, RdfError> {
        let roots = std::mem::take(&mut self.roots);
        for root in roots {
            self.flush_root(&root)?;
        }
        if self.current_subject_predicate.take().is_some() {
            self.writer.write_all(b" .\n")?;
        }
        if !matches!(self.current_graph, GraphName::DefaultGraph) {
            self.writer.write_all(b"}\n")?;
        }
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> Sink for TerseSerializer<W> {
    fn on_event(&mut self, event: Event) -> Result<(), RdfError> {
        match event {
            Event::Base(iri) => {
                if self.current_subject_predicate.take().is_some() {
                    self.writer.write_all(b" .\n")?;
                }
                self.environment.set_base(Some(iri.as_str()))?;
                self.writer.write_all(format!("@base <{}> .\n", iri.as_str()).as_bytes())?;
                Ok(())
            }
            Event::Prefix { name, iri } => {
                if self.current_subject_predicate.take().is_some() {
                    self.writer.write_all(b" .\n")?;
                }
                self.environment.set_prefix(&name, iri.as_str())?;
                self.writer
                    .write_all(format!("@prefix {name}: <{}> .\n", iri.as_str()).as_bytes())?;
                Ok(())
            }
            Event::Statement { statement, flags } => self.write_statement(statement, flags),
            Event::End(_) => Ok(()),
        }
    }
}

fn graph_to_subject(graph: GraphName) -> Subject {
    match graph {
        GraphName::DefaultGraph => unreachable!("caller already excluded the default graph"),
        GraphName::NamedNode(n) => Subject::NamedNode(n),
        GraphName::PrefixedName(n) => Subject::PrefixedName(n),
        GraphName::BlankNode(n) => Subject::BlankNode(n),
    }
}

fn render_iri_or_prefixed(environment: &Environment, options: &SerializerOptions, out: &mut String, iri: &str) {
    if let Some(prefixed) = environment.qualify(iri) {
        if is_valid_pn_local(prefixed.local()) {
            out.push_str(&prefixed.to_string());
            return;
        }
    }
    write_iri(out, iri, options);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::node::{Literal, NamedNode, PrefixedName};

    fn events_to_string(events: Vec<Event>) -> String {
        let mut serializer = TerseSerializer::new(Vec::new(), SerializerOptions::new());
        for event in events {
            serializer.on_event(event).unwrap();
        }
        String::from_utf8(serializer.finish().unwrap()).unwrap()
    }

    fn stmt(subject: Subject, predicate: Predicate, object: Node, flags: StatementFlags) -> Event {
        Event::Statement {
            statement: Statement::new(subject, predicate, object, GraphName::DefaultGraph),
            flags,
        }
    }

    #[test]
    fn same_subject_and_predicate_joins_with_a_comma() {
        let s = Subject::NamedNode(NamedNode::new("http://ex/s"));
        let p = Predicate::NamedNode(NamedNode::new("http://ex/p"));
        let out = events_to_string(vec![
            stmt(s.clone(), p.clone(), Node::Literal(Literal::new_simple("a")), StatementFlags::default()),
            stmt(s, p, Node::Literal(Literal::new_simple("b")), StatementFlags::default()),
        ]);
        assert_eq!(out, "<http://ex/s> <http://ex/p> \"a\" , \"b\" .\n");
    }

    #[test]
    fn same_subject_different_predicate_joins_with_a_semicolon() {
        let s = Subject::NamedNode(NamedNode::new("http://ex/s"));
        let out = events_to_string(vec![
            stmt(
                s.clone(),
                Predicate::NamedNode(NamedNode::new("http://ex/p1")),
                Node::Literal(Literal::new_simple("a")),
                StatementFlags::default(),
            ),
            stmt(
                s,
                Predicate::NamedNode(NamedNode::new("http://ex/p2")),
                Node::Literal(Literal::new_simple("b")),
                StatementFlags::default(),
            ),
        ]);
        assert_eq!(
            out,
            "<http://ex/s> <http://ex/p1> \"a\" ;\n\t<http://ex/p2> \"b\" .\n"
        );
    }

    #[test]
    fn rdf_type_predicate_abbreviates_to_a() {
        let out = events_to_string(vec![stmt(
            Subject::NamedNode(NamedNode::new("http://ex/s")),
            Predicate::NamedNode(NamedNode::new(RDF_TYPE)),
            Node::NamedNode(NamedNode::new("http://ex/Type")),
            StatementFlags::default(),
        )]);
        assert_eq!(out, "<http://ex/s> a <http://ex/Type> .\n");
    }

    #[test]
    fn prefixed_name_terms_pass_through_unexpanded() {
        let out = events_to_string(vec![stmt(
            Subject::PrefixedName(PrefixedName::new("ex", "s")),
            Predicate::PrefixedName(PrefixedName::new("ex", "p")),
            Node::PrefixedName(PrefixedName::new("ex", "o")),
            StatementFlags::default(),
        )]);
        assert_eq!(out, "ex:s ex:p ex:o .\n");
    }

    #[test]
    fn bare_integer_literal_is_written_without_quotes() {
        const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
        let out = events_to_string(vec![stmt(
            Subject::NamedNode(NamedNode::new("http://ex/s")),
            Predicate::NamedNode(NamedNode::new("http://ex/p")),
            Node::Literal(Literal::new_typed("1", NamedNode::new(XSD_INTEGER))),
            StatementFlags::default(),
        )]);
        assert_eq!(out, "<http://ex/s> <http://ex/p> 1 .\n");
    }

    #[test]
    fn nonempty_anon_object_is_inlined_as_a_bracket_term() {
        let b = BlankNode::new("b0").unwrap();
        let inner = stmt(
            Subject::BlankNode(b.clone()),
            Predicate::NamedNode(NamedNode::new("http://ex/q")),
            Node::NamedNode(NamedNode::new("http://ex/r")),
            StatementFlags {
                anon_subject: true,
                ..StatementFlags::default()
            },
        );
        let outer = stmt(
            Subject::NamedNode(NamedNode::new("http://ex/s")),
            Predicate::NamedNode(NamedNode::new("http://ex/p")),
            Node::BlankNode(b),
            StatementFlags {
                anon_object: true,
                ..StatementFlags::default()
            },
        );
        let out = events_to_string(vec![inner, Event::End(GraphName::DefaultGraph), outer]);
        assert_eq!(out, "<http://ex/s> <http://ex/p> [ <http://ex/q> <http://ex/r> ] .\n");
    }

    #[test]
    fn standalone_top_level_anon_is_flushed_once_nothing_else_references_it() {
        let b = BlankNode::new("b0").unwrap();
        let inner = stmt(
            Subject::BlankNode(b),
            Predicate::NamedNode(NamedNode::new("http://ex/p")),
            Node::Literal(Literal::new_simple("v")),
            StatementFlags {
                anon_subject: true,
                ..StatementFlags::default()
            },
        );
        let unrelated = stmt(
            Subject::NamedNode(NamedNode::new("http://ex/x")),
            Predicate::NamedNode(NamedNode::new("http://ex/y")),
            Node::NamedNode(NamedNode::new("http://ex/z")),
            StatementFlags::default(),
        );
        let out = events_to_string(vec![inner, Event::End(GraphName::DefaultGraph), unrelated]);
        assert_eq!(
            out,
            "[ <http://ex/p> \"v\" ] .\n<http://ex/x> <http://ex/y> <http://ex/z> .\n"
        );
    }

    #[test]
    fn list_object_is_inlined_as_a_parenthesized_term() {
        let head = BlankNode::new("l0").unwrap();
        let tail = BlankNode::new("l1").unwrap();
        let first_of_head = stmt(
            Subject::BlankNode(head.clone()),
            Predicate::NamedNode(NamedNode::new(RDF_FIRST)),
            Node::Literal(Literal::new_simple("1")),
            StatementFlags {
                list_subject: true,
                ..StatementFlags::default()
            },
        );
        let rest_of_head = stmt(
            Subject::BlankNode(head.clone()),
            Predicate::NamedNode(NamedNode::new(RDF_REST)),
            Node::BlankNode(tail.clone()),
            StatementFlags {
                list_subject: true,
                ..StatementFlags::default()
            },
        );
        let first_of_tail = stmt(
            Subject::BlankNode(tail.clone()),
            Predicate::NamedNode(NamedNode::new(RDF_FIRST)),
            Node::Literal(Literal::new_simple("2")),
            StatementFlags {
                list_subject: true,
                ..StatementFlags::default()
            },
        );
        let rest_of_tail = stmt(
            Subject::BlankNode(tail),
            Predicate::NamedNode(NamedNode::new(RDF_REST)),
            Node::NamedNode(NamedNode::new(RDF_NIL)),
            StatementFlags {
                list_subject: true,
                ..StatementFlags::default()
            },
        );
        let outer = stmt(
            Subject::NamedNode(NamedNode::new("http://ex/s")),
            Predicate::NamedNode(NamedNode::new("http://ex/p")),
            Node::BlankNode(head),
            StatementFlags {
                list_object: true,
                ..StatementFlags::default()
            },
        );
        let out = events_to_string(vec![first_of_head, rest_of_head, first_of_tail, rest_of_tail, outer]);
        assert_eq!(out, "<http://ex/s> <http://ex/p> ( \"1\" \"2\" ) .\n");
    }

    #[test]
    fn empty_anon_object_is_a_bare_bracket_pair() {
        let out = events_to_string(vec![stmt(
            Subject::NamedNode(NamedNode::new("http://ex/s")),
            Predicate::NamedNode(NamedNode::new("http://ex/p")),
            Node::BlankNode(BlankNode::new("b0").unwrap()),
            StatementFlags {
                anon_object: true,
                empty_blank: true,
                ..StatementFlags::default()
            },
        )]);
        assert_eq!(out, "<http://ex/s> <http://ex/p> [] .\n");
    }

    #[test]
    fn non_default_graph_opens_and_closes_a_brace_block() {
        let out = events_to_string(vec![stmt(
            Subject::NamedNode(NamedNode::new("http://ex/s")),
            Predicate::NamedNode(NamedNode::new("http://ex/p")),
            Node::NamedNode(NamedNode::new("http://ex/o")),
            StatementFlags::default(),
        )
        .into_named_graph(NamedNode::new("http://ex/g"))]);
        assert_eq!(out, "<http://ex/g> {\n<http://ex/s> <http://ex/p> <http://ex/o> .\n}\n");
    }

    #[test]
    fn a_declared_prefix_qualifies_a_plain_iri_on_output() {
        let mut serializer = TerseSerializer::new(Vec::new(), SerializerOptions::new());
        serializer
            .on_event(Event::Prefix {
                name: "ex".to_owned(),
                iri: NamedNode::new("http://example.com/"),
            })
            .unwrap();
        serializer
            .on_event(stmt(
                Subject::NamedNode(NamedNode::new("http://example.com/s")),
                Predicate::NamedNode(NamedNode::new("http://example.com/p")),
                Node::NamedNode(NamedNode::new("http://example.com/o")),
                StatementFlags::default(),
            ))
            .unwrap();
        let out = String::from_utf8(serializer.finish().unwrap()).unwrap();
        assert_eq!(out, "@prefix ex: <http://example.com/> .\nex:s ex:p ex:o .\n");
    }

    trait IntoNamedGraph {
        fn into_named_graph(self, graph: NamedNode) -> Self;
    }

    impl IntoNamedGraph for Event {
        fn into_named_graph(self, graph: NamedNode) -> Self {
            match self {
                Event::Statement { statement, flags } => Event::Statement {
                    statement: Statement::new(statement.subject, statement.predicate, statement.object, GraphName::NamedNode(graph)),
                    flags,
                },
                other => other,
            }
        }
    }
}
