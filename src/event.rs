//! Event & Sink (component C6): the typed event union and the sink capability.
//!
//! Grounded on how `oxrdfio::FromReadQuadReader` yields one item per statement, and
//! on the design's explicit note (`spec.md` §9) that a faithful implementation
//! should prefer a single unified event interface over legacy separate
//! base/prefix/statement/end handlers — mapped here to a `Sink` trait with one
//! `on_event` entry point, the "capability set `{on_event}`" the design calls for,
//! so the inserter, filter, expander and normaliser (C11) are all just
//! implementations of the same trait.

use crate::error::RdfError;
use crate::model::node::{GraphName, NamedNode};
use crate::model::statement::Statement;

/// One item of the parser's output stream.
#[derive(Debug, Clone)]
pub enum Event {
    /// A `@base`/`BASE` directive.
    Base(NamedNode),
    /// A `@prefix`/`PREFIX` directive.
    Prefix { name: String, iri: NamedNode },
    /// A complete statement, with flags describing inline-abbreviation context.
    Statement {
        statement: Statement,
        flags: StatementFlags,
    },
    /// The end of an anonymous (`[...]`) node, matching its most recent begin.
    End(GraphName),
}

/// Flags describing the inline-abbreviation context a statement was produced in,
/// carried so a serializer consuming the same event stream can choose matching
/// abbreviations without re-deriving them from raw text.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct StatementFlags {
    pub anon_subject: bool,
    pub anon_object: bool,
    pub list_subject: bool,
    pub list_object: bool,
    pub empty_blank: bool,
}

/// An event consumer: a directed endpoint for base/prefix/statement/end events.
/// Implementations return a non-success [`RdfError`] to stop the call that is
/// driving the event stream (the parser or a model replay); the design specifies
/// that a non-success status unwinds the call with that status rather than being
/// silently swallowed.
pub trait Sink {
    fn on_event(&mut self, event: Event) -> Result<(), RdfError>;
}

impl<F> Sink for F
where
    F: FnMut(Event) -> Result<(), RdfError>,
{
    fn on_event(&mut self, event: Event) -> Result<(), RdfError> {
        self(event)
    }
}

/// A sink that collects every event into a `Vec`, useful for tests asserting on
/// the exact event sequence a parser produced (see `spec.md` §8's concrete
/// scenarios).
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub events: Vec<Event>,
}

impl Sink for CollectingSink {
    fn on_event(&mut self, event: Event) -> Result<(), RdfError> {
        self.events.push(event);
        Ok(())
    }
}
