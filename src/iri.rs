//! URI view and resolver (component C3).
//!
//! A minimal, dependency-free implementation of RFC 3986 reference resolution,
//! reimplemented locally in the spirit of how `oxiri` is used elsewhere in the
//! teacher workspace, but without bringing in the external crate: this crate's
//! needs are limited to `parse`/`resolve`/relative-serialize, not the full IRI
//! normalization surface `oxiri` exposes.

use crate::error::{Domain, RdfError, Status};
use std::fmt;

/// Borrowed view over the six components of a URI reference, per RFC 3986 §3.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct UriView<'a> {
    pub scheme: Option<&'a str>,
    pub authority: Option<&'a str>,
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub fragment: Option<&'a str>,
}

impl<'a> UriView<'a> {
    /// Splits `input` into its components. Never fails: any string is a valid
    /// relative reference at worst.
    #[must_use]
    pub fn parse(input: &'a str) -> Self {
        let (without_fragment, fragment) = match input.split_once('#') {
            Some((head, tail)) => (head, Some(tail)),
            None => (input, None),
        };
        let (without_query, query) = match without_fragment.split_once('?') {
            Some((head, tail)) => (head, Some(tail)),
            None => (without_fragment, None),
        };
        if let Some(colon) = without_query.find(':') {
            let (scheme_candidate, rest) = without_query.split_at(colon);
            if is_scheme(scheme_candidate) {
                let rest = &rest[1..]; // drop the ':'
                let (authority, path) = split_authority(rest);
                return Self {
                    scheme: Some(scheme_candidate),
                    authority,
                    path,
                    query,
                    fragment,
                };
            }
        }
        let (authority, path) = split_authority(without_query);
        Self {
            scheme: None,
            authority,
            path,
            query,
            fragment,
        }
    }

    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.scheme.is_some()
    }
}

impl fmt::Display for UriView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(scheme) = self.scheme {
            write!(f, "{scheme}:")?;
        }
        if let Some(authority) = self.authority {
            write!(f, "//{authority}")?;
        }
        f.write_str(self.path)?;
        if let Some(query) = self.query {
            write!(f, "?{query}")?;
        }
        if let Some(fragment) = self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}

fn split_authority(rest: &str) -> (Option<&str>, &str) {
    if let Some(stripped) = rest.strip_prefix("//") {
        let end = stripped
            .find(['/', '?', '#'])
            .unwrap_or(stripped.len());
        (Some(&stripped[..end]), &stripped[end..])
    } else {
        (None, rest)
    }
}

fn is_scheme(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Resolves `reference` against `base` following RFC 3986 §5.3, returning the
/// target as an owned, absolute string. `base` must itself be absolute.
pub fn resolve(reference: &str, base: &str) -> Result<String, RdfError> {
    let base_view = UriView::parse(base);
    if !base_view.is_absolute() {
        return Err(RdfError::new(
            Status::BadArgument,
            Domain::Environment,
            "base is not an absolute IRI",
        ));
    }
    let r = UriView::parse(reference);
    if r.is_absolute() {
        return Ok(reference.to_owned());
    }

    let scheme = base_view.scheme;
    let (authority, path, query) = if r.authority.is_some() {
        (r.authority, remove_dot_segments(r.path), r.query)
    } else if r.path.is_empty() {
        (base_view.authority, base_view.path.to_owned(), r.query.or(base_view.query))
    } else if r.path.starts_with('/') {
        (base_view.authority, remove_dot_segments(r.path), r.query)
    } else {
        let merged = merge_paths(base_view, r.path);
        (base_view.authority, remove_dot_segments(&merged), r.query)
    };

    let mut out = String::new();
    if let Some(scheme) = scheme {
        out.push_str(scheme);
        out.push(':');
    }
    if let Some(authority) = authority {
        out.push_str("//");
        out.push_str(authority);
    }
    out.push_str(&path);
    if let Some(query) = query {
        out.push('?');
        out.push_str(query);
    }
    if let Some(fragment) = r.fragment {
        out.push('#');
        out.push_str(fragment);
    }
    Ok(out)
}

fn merge_paths(base: UriView<'_>, reference_path: &str) -> String {
    if base.authority.is_some() && base.path.is_empty() {
        format!("/{reference_path}")
    } else if let Some(last_slash) = base.path.rfind('/') {
        format!("{}{}", &base.path[..=last_slash], reference_path)
    } else {
        reference_path.to_owned()
    }
}

/// RFC 3986 §5.2.4 dot-segment removal.
fn remove_dot_segments(path: &str) -> String {
    let mut input: Vec<&str> = Vec::new();
    // Split while keeping track of a leading slash, processed segment by segment.
    let mut rest = path;
    let absolute = rest.starts_with('/');
    if absolute {
        rest = &rest[1..];
    }
    for segment in rest.split('/') {
        input.push(segment);
    }

    let mut output: Vec<&str> = Vec::new();
    let mut i = 0;
    while i < input.len() {
        match input[i] {
            "." => {
                i += 1;
            }
            ".." => {
                if output.len() > 1 || (output.len() == 1 && !output[0].is_empty()) {
                    output.pop();
                } else if output.is_empty() && !absolute {
                    output.push("..");
                }
                i += 1;
            }
            seg => {
                output.push(seg);
                i += 1;
            }
        }
    }

    let mut result = String::new();
    if absolute {
        result.push('/');
    }
    result.push_str(&output.join("/"));
    result
}

/// Serializes `target` relative to `base`, bounded so that the relative form never
/// climbs above `root` (if given). Falls back to the absolute form when no
/// beneficial relative form exists.
#[must_use]
pub fn relativize<'a>(target: &'a str, base: &str, root: Option<&str>) -> &'a str {
    if let Some(root) = root {
        if !target.starts_with(root) {
            return target;
        }
    }
    if let Some(stripped) = common_prefix_relative(target, base) {
        return stripped;
    }
    target
}

fn common_prefix_relative<'a>(target: &'a str, base: &str) -> Option<&'a str> {
    // Only handle the simple, common case: same scheme+authority and target is a
    // path extension of base's directory. Full RFC relative-reference synthesis
    // (with "../" climbing) is intentionally not attempted: the design only asks
    // for the shortest form under a root, not full RFC 3986 §4.2 reversal.
    let base_view = UriView::parse(base);
    let target_view = UriView::parse(target);
    if base_view.scheme != target_view.scheme || base_view.authority != target_view.authority {
        return None;
    }
    let base_dir = match base_view.path.rfind('/') {
        Some(i) => &base_view.path[..=i],
        None => return None,
    };
    let full_base = format!(
        "{}{}{}",
        base_view.scheme.map(|s| format!("{s}:")).unwrap_or_default(),
        base_view
            .authority
            .map(|a| format!("//{a}"))
            .unwrap_or_default(),
        base_dir
    );
    target.strip_prefix(&full_base).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_absolute_reference_unchanged() {
        assert_eq!(
            resolve("http://other/x", "http://example.com/a/b").unwrap(),
            "http://other/x"
        );
    }

    #[test]
    fn resolves_relative_path_against_base() {
        assert_eq!(
            resolve("c", "http://example.com/a/b").unwrap(),
            "http://example.com/a/c"
        );
    }

    #[test]
    fn resolves_absolute_path_against_base() {
        assert_eq!(
            resolve("/c", "http://example.com/a/b").unwrap(),
            "http://example.com/c"
        );
    }

    #[test]
    fn resolves_fragment_only_reference() {
        assert_eq!(
            resolve("#frag", "http://example.com/a/b").unwrap(),
            "http://example.com/a/b#frag"
        );
    }

    #[test]
    fn removes_dot_segments() {
        assert_eq!(
            resolve("../c", "http://example.com/a/b/d").unwrap(),
            "http://example.com/a/c"
        );
    }

    #[test]
    fn rejects_relative_base() {
        assert!(resolve("x", "not-absolute").is_err());
    }

    #[test]
    fn idempotent_under_repeated_resolution() {
        let base = "http://example.com/a/";
        let once = resolve("b", base).unwrap();
        let twice = resolve(&once, base).unwrap();
        assert_eq!(once, twice);
    }
}
