//! Statement (component C9): an ordered quadruple plus an optional origin cursor.
//!
//! Grounded on `oxrdf::triple::{Triple, Quad}`: `Display` composes subject,
//! predicate and object separated by spaces, terminated by a period; `Quad`
//! additionally omits the graph name in `Display` when it is the default graph,
//! matching N-Triples vs N-Quads output.

use std::fmt;

use crate::error::Cursor;
use crate::model::node::{GraphName, Node, Predicate, Subject};

/// A subject/predicate/object triple, optionally placed in a named graph.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Statement {
    pub subject: Subject,
    pub predicate: Predicate,
    pub object: Node,
    pub graph: GraphName,
    pub origin: Option<Cursor>,
}

impl Statement {
    #[must_use]
    pub fn new(subject: Subject, predicate: Predicate, object: Node, graph: GraphName) -> Self {
        Self {
            subject,
            predicate,
            object,
            graph,
            origin: None,
        }
    }

    #[must_use]
    pub fn with_origin(mut self, origin: Cursor) -> Self {
        self.origin = Some(origin);
        self
    }

    #[must_use]
    pub fn is_default_graph(&self) -> bool {
        matches!(self.graph, GraphName::DefaultGraph)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.subject, self.predicate, self.object)?;
        if !self.is_default_graph() {
            write!(f, " {}", self.graph)?;
        }
        f.write_str(" .")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::node::{Literal, NamedNode};

    #[test]
    fn display_omits_default_graph() {
        let s = Statement::new(
            Subject::NamedNode(NamedNode::new("http://ex/s")),
            Predicate::NamedNode(NamedNode::new("http://ex/p")),
            Node::Literal(Literal::new_simple("v")),
            GraphName::DefaultGraph,
        );
        assert_eq!(s.to_string(), "<http://ex/s> <http://ex/p> \"v\" .");
    }

    #[test]
    fn display_includes_named_graph() {
        let s = Statement::new(
            Subject::NamedNode(NamedNode::new("http://ex/s")),
            Predicate::NamedNode(NamedNode::new("http://ex/p")),
            Node::Literal(Literal::new_simple("v")),
            GraphName::NamedNode(NamedNode::new("http://ex/g")),
        );
        assert_eq!(
            s.to_string(),
            "<http://ex/s> <http://ex/p> \"v\" <http://ex/g> ."
        );
    }
}
