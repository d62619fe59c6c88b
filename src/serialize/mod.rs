//! Serializer (component C8): a pretty-printer that consumes the same event
//! stream the parser produces and emits syntactically valid text.
//!
//! Grounded on `oxttl::trig::LowLevelTriGWriter`/`TurtleTerm`: a single writer
//! tracks `current_graph_name`/`current_subject_predicate` and decides between
//! `,`, `;` and a fresh statement by comparing against the previous call, with a
//! `TurtleTerm`-style `Display` helper choosing prefixed-name and bare-numeric
//! abbreviations. [`flat::FlatSerializer`] is the same shape with abbreviation
//! turned off (`spec.md` §4.6 "for flat syntaxes, always emit fully qualified
//! form with one statement per line"); [`terse::TerseSerializer`] implements
//! the full policy, generalized to `Sink` so either can be driven directly off
//! a parser's event stream rather than oxttl's `Quad`-at-a-time `write_quad`.

pub mod flat;
pub mod terse;

use crate::model::node::{escape_literal_value, LiteralRef, XSD_STRING};

/// `rdf:type`, abbreviated to `a` as a predicate in terse output.
pub(crate) const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
/// `rdf:nil`, abbreviated to `()` as an object in terse output.
pub(crate) const RDF_NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";

/// Output configuration shared by both serializers, grounded on
/// `oxttl::turtle::TurtleSerializer`'s builder-style construction.
#[derive(Debug, Clone, Default)]
pub struct SerializerOptions {
    /// Escape every non-ASCII character as `\uXXXX`/`\UXXXXXXXX` rather than
    /// writing it raw.
    pub ascii: bool,
    /// Emit IRIs under `base`/`root` in relative form (`spec.md` §4.6 "URI
    /// output").
    pub relative: bool,
    pub base: Option<String>,
    pub root: Option<String>,
}

impl SerializerOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_ascii(mut self, ascii: bool) -> Self {
        self.ascii = ascii;
        self
    }

    #[must_use]
    pub fn with_relative_uris(mut self, base: impl Into<String>, root: Option<String>) -> Self {
        self.relative = true;
        self.base = Some(base.into());
        self.root = root;
        self
    }
}

fn push_ascii_escape(out: &mut String, c: char) {
    let code = c as u32;
    if code <= 0xFFFF {
        out.push_str(&format!("\\u{code:04X}"));
    } else {
        out.push_str(&format!("\\U{code:08X}"));
    }
}

/// Escapes every non-ASCII character in `value`, leaving ASCII bytes (already
/// escaped or otherwise) untouched. Used for both IRI and literal output when
/// [`SerializerOptions::ascii`] is set.
pub(crate) fn escape_ascii(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            push_ascii_escape(&mut out, c);
        }
    }
    out
}

/// Writes `iri` between angle brackets, honoring `base`/`root`-relative output
/// and ASCII escaping.
pub(crate) fn write_iri(out: &mut String, iri: &str, options: &SerializerOptions) {
    let body = if options.relative {
        match &options.base {
            Some(base) => crate::iri::relativize(iri, base, options.root.as_deref()),
            None => iri,
        }
    } else {
        iri
    };
    out.push('<');
    if options.ascii {
        out.push_str(&escape_ascii(body));
    } else {
        out.push_str(body);
    }
    out.push('>');
}

/// A `prefix:local`/bare-IRI's local part is a valid `PN_LOCAL` under this
/// crate's (ASCII-only) grammar — see `parse::Lexer::read_pn_local`.
pub(crate) fn is_valid_pn_local(local: &str) -> bool {
    !local.is_empty() && local.bytes().all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-'))
}

/// `[19] INTEGER ::= [+-]? [0-9]+`
pub(crate) fn is_bare_integer(value: &str) -> bool {
    let value = value.strip_prefix(['+', '-']).unwrap_or(value);
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// `[20] DECIMAL ::= [+-]? [0-9]* '.' [0-9]+`
pub(crate) fn is_bare_decimal(value: &str) -> bool {
    let value = value.strip_prefix(['+', '-']).unwrap_or(value);
    match value.split_once('.') {
        Some((int_part, frac_part)) => {
            int_part.bytes().all(|b| b.is_ascii_digit())
                && !frac_part.is_empty()
                && frac_part.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

pub(crate) fn is_bare_boolean(value: &str) -> bool {
    matches!(value, "true" | "false")
}

/// Writes a literal's quoted lexical form plus any datatype/language suffix.
/// `qualify_datatype` lets each serializer supply its own abbreviation for a
/// non-inlined datatype IRI (fully qualified for flat output, prefix-aware for
/// terse output).
pub(crate) fn write_literal(
    out: &mut String,
    literal: LiteralRef<'_>,
    options: &SerializerOptions,
    allow_bare: bool,
    write_datatype: impl FnOnce(&mut String, &str),
) {
    let value = literal.value();
    let datatype = literal.datatype().map(|d| d.as_str()).unwrap_or(XSD_STRING);
    if allow_bare
        && literal.language().is_none()
        && match datatype {
            "http://www.w3.org/2001/XMLSchema#boolean" => is_bare_boolean(value),
            "http://www.w3.org/2001/XMLSchema#integer" => is_bare_integer(value),
            "http://www.w3.org/2001/XMLSchema#decimal" => is_bare_decimal(value),
            _ => false,
        }
    {
        out.push_str(value);
        return;
    }
    if literal.has_newline() || literal.has_quote() {
        out.push_str("\"\"\"");
        write_triple_quoted_body(out, value, options.ascii);
        out.push_str("\"\"\"");
    } else {
        out.push('"');
        let escaped = escape_literal_value(value);
        if options.ascii {
            out.push_str(&escape_ascii(&escaped));
        } else {
            out.push_str(&escaped);
        }
        out.push('"');
    }
    if let Some(lang) = literal.language() {
        out.push('@');
        out.push_str(lang);
    } else if datatype != XSD_STRING {
        out.push_str("^^");
        write_datatype(out, datatype);
    }
}

fn write_triple_quoted_body(out: &mut String, value: &str, ascii: bool) {
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            c if ascii && !c.is_ascii() => push_ascii_escape(out, c),
            c => out.push(c),
        }
    }
}
