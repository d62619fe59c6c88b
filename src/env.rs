//! Environment (component C4): base reference + prefix map.
//!
//! Grounded on how `oxttl::TurtleParser`/`TriGParser` accumulate `@base`/`@prefix`
//! declarations while parsing and how `oxrdfio::RdfSerializer::with_prefix` builds
//! the mirror-image table for output; generalized here into a standalone type so
//! `qualify`/`expand` are real, independently testable operations per the design.

use crate::error::{Domain, RdfError, Status};
use crate::iri;
use crate::model::node::{NamedNode, Node, PrefixedName};

/// Base IRI plus an ordered prefix table, used to resolve references while parsing
/// and to shorten them while serializing.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    base: Option<String>,
    // Ordered so that a later `set_prefix` with a duplicate name replaces the
    // earlier entry in place, matching the design's "duplicate names replace
    // earlier entries" rule while preserving declaration order for serialization.
    prefixes: Vec<(String, String)>,
}

impl Environment {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    /// Sets the base reference. `node` must be an absolute IRI; passing `None`
    /// clears the base. A relative base is resolved against the current base
    /// before being stored, matching the design's "relative bases are resolved
    /// against the current base" rule.
    pub fn set_base(&mut self, iri: Option<&str>) -> Result<(), RdfError> {
        match iri {
            None => {
                self.base = None;
                Ok(())
            }
            Some(iri) => {
                let resolved = match &self.base {
                    Some(current) if !iri::UriView::parse(iri).is_absolute() => {
                        iri::resolve(iri, current)?
                    }
                    _ => iri.to_owned(),
                };
                if !iri::UriView::parse(&resolved).is_absolute() {
                    return Err(RdfError::new(
                        Status::BadArgument,
                        Domain::Environment,
                        "base must be an absolute IRI",
                    ));
                }
                self.base = Some(resolved);
                Ok(())
            }
        }
    }

    /// Declares (or replaces) a prefix. `uri` is resolved against the current base
    /// if relative; a relative `uri` without a base set is an error.
    pub fn set_prefix(&mut self, name: &str, uri: &str) -> Result<(), RdfError> {
        if !is_valid_prefix_name(name) {
            return Err(RdfError::new(
                Status::BadArgument,
                Domain::Environment,
                format!("{name:?} is not a valid prefix name"),
            ));
        }
        let resolved = if iri::UriView::parse(uri).is_absolute() {
            uri.to_owned()
        } else {
            let base = self.base.as_deref().ok_or_else(|| {
                RdfError::new(
                    Status::BadArgument,
                    Domain::Environment,
                    "relative prefix IRI requires a base to be set",
                )
            })?;
            iri::resolve(uri, base)?
        };
        if let Some(entry) = self.prefixes.iter_mut().find(|(n, _)| n == name) {
            entry.1 = resolved;
        } else {
            self.prefixes.push((name.to_owned(), resolved));
        }
        Ok(())
    }

    #[must_use]
    pub fn prefixes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes
            .iter()
            .map(|(name, uri)| (name.as_str(), uri.as_str()))
    }

    #[must_use]
    pub fn lookup_prefix(&self, name: &str) -> Option<&str> {
        self.prefixes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, uri)| uri.as_str())
    }

    /// Searches prefixes by longest-expansion-is-prefix-of-uri, returning the
    /// shortened `PrefixedName` form when a qualifying prefix exists.
    #[must_use]
    pub fn qualify(&self, uri: &str) -> Option<PrefixedName> {
        self.prefixes
            .iter()
            .filter(|(_, expansion)| uri.starts_with(expansion.as_str()) && !expansion.is_empty())
            .max_by_key(|(_, expansion)| expansion.len())
            .map(|(name, expansion)| PrefixedName::new(name.clone(), &uri[expansion.len()..]))
    }

    /// Expands `node` against this environment:
    /// - a prefixed name becomes an absolute IRI;
    /// - a relative IRI is resolved against the base;
    /// - any other node (including every literal — its datatype is always a
    ///   `NamedNode`, never a prefixed name, once parsed) is returned unchanged.
    ///
    /// Returns an error if expansion is required but cannot succeed (unknown
    /// prefix, relative IRI without a base).
    pub fn expand(&self, node: Node) -> Result<Node, RdfError> {
        match node {
            Node::PrefixedName(p) => {
                let expansion = self.lookup_prefix(p.prefix()).ok_or_else(|| {
                    RdfError::new(
                        Status::BadCurie,
                        Domain::Environment,
                        format!("unknown prefix {:?}", p.prefix()),
                    )
                })?;
                Ok(Node::NamedNode(NamedNode::new(format!(
                    "{expansion}{}",
                    p.local()
                ))))
            }
            Node::NamedNode(n) if !n.is_absolute() => {
                let base = self.base.as_deref().ok_or_else(|| {
                    RdfError::new(
                        Status::BadArgument,
                        Domain::Environment,
                        "relative IRI without a base",
                    )
                })?;
                Ok(Node::NamedNode(NamedNode::new(iri::resolve(
                    n.as_str(),
                    base,
                )?)))
            }
            other => Ok(other),
        }
    }
}

fn is_valid_prefix_name(name: &str) -> bool {
    if name.is_empty() {
        return true; // the default prefix `:` is the empty name
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualify_then_expand_round_trips() {
        let mut env = Environment::new();
        env.set_prefix("ex", "http://example.com/").unwrap();
        let qualified = env.qualify("http://example.com/foo").unwrap();
        assert_eq!(qualified.to_string(), "ex:foo");
        let expanded = env.expand(Node::PrefixedName(qualified)).unwrap();
        assert_eq!(expanded.to_string(), "<http://example.com/foo>");
    }

    #[test]
    fn qualify_picks_longest_matching_prefix() {
        let mut env = Environment::new();
        env.set_prefix("a", "http://example.com/").unwrap();
        env.set_prefix("b", "http://example.com/sub/").unwrap();
        let qualified = env.qualify("http://example.com/sub/x").unwrap();
        assert_eq!(qualified.prefix(), "b");
        assert_eq!(qualified.local(), "x");
    }

    #[test]
    fn expand_resolves_relative_iri_against_base() {
        let mut env = Environment::new();
        env.set_base(Some("http://example.com/a/")).unwrap();
        let expanded = env.expand(Node::NamedNode(NamedNode::new("b"))).unwrap();
        assert_eq!(expanded.to_string(), "<http://example.com/a/b>");
    }

    #[test]
    fn expand_fails_without_qualifying_prefix() {
        let env = Environment::new();
        let err = env
            .expand(Node::PrefixedName(PrefixedName::new("ex", "foo")))
            .unwrap_err();
        assert_eq!(err.status(), Status::BadCurie);
    }

    #[test]
    fn set_base_rejects_relative_without_current_base() {
        let mut env = Environment::new();
        assert!(env.set_base(Some("relative")).is_err());
    }
}
