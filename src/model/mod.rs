//! Node model (C2), statement (C9) and indexed store (C10).

pub mod node;
pub mod statement;
pub mod store;

pub use node::{
    BlankNode, BlankNodeRef, GraphName, Literal, LiteralRef, NamedNode, NamedNodeRef, Node,
    NodeRef, NotANodeNameError, NotAPredicateError, Predicate, PrefixedName, PrefixedNameRef,
    Subject,
};
pub use statement::Statement;
pub use store::{IndexFlags, Mode, Model, Ordering, Pattern, QueryIter};
