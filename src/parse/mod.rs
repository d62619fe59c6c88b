//! Parser (component C7): streaming recognizers for the four textual syntaxes.
//!
//! Grounded on `oxttl::toolkit::{lexer, parser}`'s pull-based `RuleRecognizer`
//! driving a `Parser<RR>` state machine one token at a time off a buffered byte
//! source; this module keeps the same pull shape — a parser struct wrapping a
//! [`crate::io::source::ByteSource`] that callers drive one statement at a time
//! via `next_event` — but recognizes a whole statement's tokens per call rather
//! than suspending mid-token, since `spec.md` §4.7 specifies 1-byte lookahead and
//! a bounded scratch buffer, not `oxttl`'s full incremental-chunk resumability.

use crate::error::{Cursor, Domain, RdfError, Status};
use crate::io::source::ByteSource;
use crate::model::node::{BlankNode, Literal, NamedNode, Node, PrefixedName};
use std::io::Read;

pub mod nquads;
pub mod ntriples;
pub mod trig;
pub mod turtle;

/// How a parser reacts to a malformed statement.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum RecoveryMode {
    /// Stop at the first syntax error (`spec.md` §8 scenario 6, strict case).
    #[default]
    Strict,
    /// Skip to the next statement terminator and report the error, continuing
    /// (`spec.md` §8 scenario 6, lax case).
    Lax,
}

/// Shared parser configuration, mirroring `oxttl::{TurtleParser, NQuadsParser}`'s
/// builder-style options.
#[derive(Debug, Clone)]
pub struct ParserOptions {
    pub base: Option<String>,
    pub recovery: RecoveryMode,
    pub document: Option<String>,
    /// Upper bound on a single scratch token (IRI, literal value, blank node
    /// label); exceeding it is reported as [`Status::Overflow`] rather than
    /// silently growing, per `spec.md` §9's "Parser stack" design note.
    pub max_token_len: usize,
    /// A string prepended to every generated blank node label (`spec.md`
    /// §4.5), so blank nodes parsed from distinct documents can be merged
    /// into one model without colliding. Distinct from the generator's own
    /// b/B clash heuristic, which only protects against collisions with
    /// user-supplied labels within a single document.
    pub blank_node_prefix: Option<String>,
    /// Whether `^^prefix:local` literal datatypes are eagerly resolved
    /// against the parser's own running `@prefix`/`PREFIX` declarations
    /// instead of being left as an unresolved `PrefixedName` for a downstream
    /// sink to expand. Defaults to `true`; Turtle/TriG are the only formats
    /// this affects, since N-Triples/N-Quads have no prefix declarations.
    pub expand_prefixed_names: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            base: None,
            recovery: RecoveryMode::Strict,
            document: None,
            max_token_len: 1 << 20,
            blank_node_prefix: None,
            expand_prefixed_names: true,
        }
    }
}

impl ParserOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    #[must_use]
    pub fn with_recovery(mut self, recovery: RecoveryMode) -> Self {
        self.recovery = recovery;
        self
    }

    #[must_use]
    pub fn with_document_name(mut self, name: impl Into<String>) -> Self {
        self.document = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_blank_node_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.blank_node_prefix = Some(prefix.into());
        self
    }

    #[must_use]
    pub fn with_expand_prefixed_names(mut self, expand: bool) -> Self {
        self.expand_prefixed_names = expand;
        self
    }
}

/// A fixed-capacity scratch buffer for incrementally building a node's lexical
/// form. Growth past `max` is reported rather than silently reallocated, per the
/// design's "Parser stack" note.
pub(crate) struct BoundedBuffer {
    buf: String,
    max: usize,
}

impl BoundedBuffer {
    pub(crate) fn new(max: usize) -> Self {
        Self {
            buf: String::new(),
            max,
        }
    }

    pub(crate) fn push(&mut self, c: char) -> Result<(), RdfError> {
        if self.buf.len() + c.len_utf8() > self.max {
            return Err(RdfError::new(
                Status::Overflow,
                Domain::Parser,
                "token exceeds the configured maximum length",
            ));
        }
        self.buf.push(c);
        Ok(())
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.buf
    }

    pub(crate) fn into_string(self) -> String {
        self.buf
    }

    pub(crate) fn clear(&mut self) {
        self.buf.clear();
    }
}

/// Generates fresh blank node identifiers for anonymous (`[]`) and list nodes,
/// applying the `b`/`B` prefix-clash heuristic from `spec.md` §9: once a
/// document uses a user-supplied label starting with the generator's current
/// prefix, the generator switches to the other letter so it can never collide
/// with a label the document might still introduce.
#[derive(Debug, Default)]
pub(crate) struct BlankNodeGenerator {
    counter: u64,
    prefix: char,
    document_prefix: Option<String>,
}

impl BlankNodeGenerator {
    pub(crate) fn with_document_prefix(document_prefix: Option<String>) -> Self {
        Self {
            counter: 0,
            prefix: 'b',
            document_prefix,
        }
    }

    pub(crate) fn observe_user_label(&mut self, label: &str) {
        if label.starts_with(self.prefix) {
            self.prefix = if self.prefix == 'b' { 'B' } else { 'b' };
        }
    }

    pub(crate) fn fresh(&mut self) -> BlankNode {
        let node = BlankNode::from_counter(self.counter, self.prefix, self.document_prefix.as_deref());
        self.counter += 1;
        node
    }
}

/// Unescapes a Turtle/N-Triples string body (already stripped of its enclosing
/// quotes), handling `\t \b \n \r \f \" \' \\`, `\uXXXX`, and `\UXXXXXXXX`.
pub(crate) fn unescape(input: &str) -> Result<String, RdfError> {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let escape = chars.next().ok_or_else(|| {
            RdfError::new(Status::BadSyntax, Domain::Parser, "dangling escape at end of literal")
        })?;
        match escape {
            't' => out.push('\t'),
            'b' => out.push('\u{08}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            'f' => out.push('\u{0C}'),
            '"' => out.push('"'),
            '\'' => out.push('\''),
            '\\' => out.push('\\'),
            'u' => out.push(read_hex_escape(&mut chars, 4)?),
            'U' => out.push(read_hex_escape(&mut chars, 8)?),
            other => {
                return Err(RdfError::new(
                    Status::BadSyntax,
                    Domain::Parser,
                    format!("unknown escape \\{other}"),
                ))
            }
        }
    }
    Ok(out)
}

fn read_hex_escape(chars: &mut std::str::Chars<'_>, digits: usize) -> Result<char, RdfError> {
    let mut value: u32 = 0;
    for _ in 0..digits {
        let c = chars.next().ok_or_else(|| {
            RdfError::new(Status::BadSyntax, Domain::Parser, "truncated unicode escape")
        })?;
        let digit = c.to_digit(16).ok_or_else(|| {
            RdfError::new(Status::BadSyntax, Domain::Parser, "invalid hex digit in unicode escape")
        })?;
        value = value * 16 + digit;
    }
    char::from_u32(value).ok_or_else(|| {
        RdfError::new(Status::BadSyntax, Domain::Parser, "unicode escape names no valid scalar value")
    })
}

/// Classifies a bare numeric/boolean token's datatype by lexical form, per
/// `spec.md` §4.5: an exponent means `xsd:double`, a decimal point means
/// `xsd:decimal`, otherwise `xsd:integer`.
pub(crate) fn classify_numeric(token: &str) -> &'static str {
    if token.contains(['e', 'E']) {
        "http://www.w3.org/2001/XMLSchema#double"
    } else if token.contains('.') {
        "http://www.w3.org/2001/XMLSchema#decimal"
    } else {
        "http://www.w3.org/2001/XMLSchema#integer"
    }
}

pub(crate) fn numeric_literal(token: &str) -> Literal {
    Literal::new_typed(token, NamedNode::new(classify_numeric(token)))
}

pub(crate) fn cursor_at<R>(source: &ByteSource<R>, document: &Option<String>) -> Cursor
where
    R: Read,
{
    Cursor::new(document.clone(), source.line(), source.column())
}

/// A node that has not yet been resolved to an absolute IRI: a relative/absolute
/// `NamedNode`, a `PrefixedName`, a `BlankNode`, or a `Literal`. Parsers produce
/// these; `crate::sink::Expander`/`Inserter` resolve them against an
/// [`crate::env::Environment`].
pub(crate) type RawNode = Node;

pub(crate) fn iri_node(iri: String) -> RawNode {
    Node::NamedNode(NamedNode::new(iri))
}

pub(crate) fn prefixed_node(prefix: String, local: String) -> RawNode {
    Node::PrefixedName(PrefixedName::new(prefix, local))
}

/// Shared low-level token reading over a [`ByteSource`], used by every format's
/// recognizer. Grounded on `oxttl::toolkit::lexer::Lexer`'s byte-class dispatch,
/// simplified to whole-token reads per the module's pull-one-statement contract.
pub(crate) struct Lexer<'s, R> {
    pub source: &'s mut ByteSource<R>,
    pub max_token_len: usize,
}

impl<'s, R: Read> Lexer<'s, R> {
    pub(crate) fn new(source: &'s mut ByteSource<R>, max_token_len: usize) -> Self {
        Self {
            source,
            max_token_len,
        }
    }

    fn err(&self, message: impl Into<String>) -> RdfError {
        RdfError::new(Status::BadSyntax, Domain::Parser, message.into()).with_cursor(Cursor::new(
            None,
            self.source.line(),
            self.source.column(),
        ))
    }

    pub(crate) fn skip_ws_and_comments(&mut self) -> Result<(), RdfError> {
        loop {
            match self.source.peek()? {
                Some(b' ' | b'\t' | b'\r' | b'\n') => {
                    self.source.advance()?;
                }
                Some(b'#') => {
                    while !matches!(self.source.peek()?, None | Some(b'\n')) {
                        self.source.advance()?;
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    pub(crate) fn peek(&mut self) -> Result<Option<u8>, RdfError> {
        self.source.peek()
    }

    pub(crate) fn expect(&mut self, byte: u8) -> Result<(), RdfError> {
        match self.source.advance()? {
            Some(b) if b == byte => Ok(()),
            Some(b) => Err(self.err(format!(
                "expected {:?}, found {:?}",
                byte as char, b as char
            ))),
            None => Err(self.err(format!("expected {:?}, found end of input", byte as char))),
        }
    }

    /// Reads an IRIREF: `<` ... `>`, with `\uXXXX`/`\UXXXXXXXX` escapes and raw
    /// control characters rejected.
    pub(crate) fn read_iriref(&mut self) -> Result<String, RdfError> {
        self.expect(b'<')?;
        let mut buf = BoundedBuffer::new(self.max_token_len);
        loop {
            match self.source.advance()? {
                None => return Err(self.err("unterminated IRI reference")),
                Some(b'>') => break,
                Some(b'\\') => {
                    let escape = self
                        .source
                        .advance()?
                        .ok_or_else(|| self.err("dangling escape in IRI reference"))?;
                    let c = match escape {
                        b'u' => self.read_hex_escape(4)?,
                        b'U' => self.read_hex_escape(8)?,
                        other => return Err(self.err(format!("invalid IRI escape \\{}", other as char))),
                    };
                    buf.push(c)?;
                }
                Some(b) if b < 0x20 => return Err(self.err("control character in IRI reference")),
                Some(b) => {
                    buf.push(self.read_utf8_continuation(b)?)?;
                }
            }
        }
        Ok(buf.into_string())
    }

    fn read_hex_escape(&mut self, digits: usize) -> Result<char, RdfError> {
        let mut value: u32 = 0;
        for _ in 0..digits {
            let b = self
                .source
                .advance()?
                .ok_or_else(|| self.err("truncated unicode escape"))?;
            let digit = (b as char)
                .to_digit(16)
                .ok_or_else(|| self.err("invalid hex digit in unicode escape"))?;
            value = value * 16 + digit;
        }
        char::from_u32(value).ok_or_else(|| self.err("unicode escape names no valid scalar value"))
    }

    /// Reads one UTF-8 scalar value starting with the already-consumed lead byte
    /// `first`. Invalid continuation sequences are replaced with `U+FFFD`
    /// (lax decoding, per `spec.md` §4.1).
    fn read_utf8_continuation(&mut self, first: u8) -> Result<char, RdfError> {
        let extra = match first {
            0x00..=0x7F => 0,
            0xC0..=0xDF => 1,
            0xE0..=0xEF => 2,
            0xF0..=0xF7 => 3,
            _ => return Ok('\u{FFFD}'),
        };
        let mut bytes = vec![first];
        for _ in 0..extra {
            match self.source.peek()? {
                Some(b) if (0x80..0xC0).contains(&b) => {
                    bytes.push(b);
                    self.source.advance()?;
                }
                _ => break,
            }
        }
        Ok(std::str::from_utf8(&bytes)
            .ok()
            .and_then(|s| s.chars().next())
            .unwrap_or('\u{FFFD}'))
    }

    /// Reads a blank node label: `_:` followed by a PN_CHARS-ish run.
    pub(crate) fn read_blank_node_label(&mut self) -> Result<String, RdfError> {
        self.expect(b'_')?;
        self.expect(b':')?;
        let mut buf = BoundedBuffer::new(self.max_token_len);
        loop {
            match self.source.peek()? {
                Some(b) if b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.') => {
                    buf.push(b as char)?;
                    self.source.advance()?;
                }
                _ => break,
            }
        }
        let label = buf.into_string();
        let label = label.trim_end_matches('.').to_owned();
        Ok(label)
    }

    /// Reads a single-, double- or triple-quoted string body (the design's
    /// `spec.md` §4.5 literal grammar), returning the unescaped value.
    pub(crate) fn read_quoted_string(&mut self) -> Result<String, RdfError> {
        let quote = match self.source.advance()? {
            Some(b @ (b'"' | b'\'')) => b,
            _ => return Err(self.err("expected a quote to begin a string literal")),
        };
        let triple = if self.source.peek()? == Some(quote) {
            self.source.advance()?;
            if self.source.peek()? == Some(quote) {
                self.source.advance()?;
                true
            } else {
                // Two quotes with nothing between them: an empty single-line string.
                return Ok(String::new());
            }
        } else {
            false
        };
        let mut buf = BoundedBuffer::new(self.max_token_len);
        loop {
            match self.source.advance()? {
                None => return Err(self.err("unterminated string literal")),
                Some(b) if b == quote => {
                    if !triple {
                        break;
                    }
                    if self.source.peek()? == Some(quote) {
                        self.source.advance()?;
                        if self.source.peek()? == Some(quote) {
                            self.source.advance()?;
                            break;
                        }
                        buf.push(quote as char)?;
                        buf.push(quote as char)?;
                    } else {
                        buf.push(quote as char)?;
                    }
                }
                Some(b'\\') => {
                    let escape = self
                        .source
                        .advance()?
                        .ok_or_else(|| self.err("dangling escape in string literal"))?;
                    let c = match escape {
                        b't' => '\t',
                        b'b' => '\u{08}',
                        b'n' => '\n',
                        b'r' => '\r',
                        b'f' => '\u{0C}',
                        b'"' => '"',
                        b'\'' => '\'',
                        b'\\' => '\\',
                        b'u' => self.read_hex_escape(4)?,
                        b'U' => self.read_hex_escape(8)?,
                        other => return Err(self.err(format!("unknown escape \\{}", other as char))),
                    };
                    buf.push(c)?;
                }
                Some(b) if !triple && (b == b'\n' || b == b'\r') => {
                    return Err(self.err("newline in a non-triple-quoted string literal"))
                }
                Some(b) => buf.push(self.read_utf8_continuation(b)?)?,
            }
        }
        Ok(buf.into_string())
    }

    /// Reads an optional `^^<IRI>`/`^^prefix:local` datatype or `@lang` language
    /// tag following a quoted literal.
    pub(crate) fn read_literal_suffix(&mut self) -> Result<(Option<RawNode>, Option<String>), RdfError> {
        match self.peek()? {
            Some(b'^') => {
                self.expect(b'^')?;
                self.expect(b'^')?;
                let dt = if self.peek()? == Some(b'<') {
                    iri_node(self.read_iriref()?)
                } else {
                    let (prefix, local) = self.read_prefixed_name()?;
                    prefixed_node(prefix, local)
                };
                Ok((Some(dt), None))
            }
            Some(b'@') => {
                self.expect(b'@')?;
                let mut buf = BoundedBuffer::new(self.max_token_len);
                loop {
                    match self.source.peek()? {
                        Some(b) if b.is_ascii_alphanumeric() || b == b'-' => {
                            buf.push(b as char)?;
                            self.source.advance()?;
                        }
                        _ => break,
                    }
                }
                Ok((None, Some(buf.into_string())))
            }
            _ => Ok((None, None)),
        }
    }

    /// Reads a `prefix:local` pair (an empty prefix is the default `:` prefix).
    pub(crate) fn read_prefixed_name(&mut self) -> Result<(String, String), RdfError> {
        let mut prefix = BoundedBuffer::new(self.max_token_len);
        while let Some(b) = self.source.peek()? {
            if b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.') {
                prefix.push(b as char)?;
                self.source.advance()?;
            } else {
                break;
            }
        }
        self.expect(b':')?;
        let local = self.read_pn_local()?;
        Ok((prefix.into_string(), local))
    }

    /// Reads a prefixed name's local part (the run after the `:`).
    pub(crate) fn read_pn_local(&mut self) -> Result<String, RdfError> {
        let mut local = BoundedBuffer::new(self.max_token_len);
        while let Some(b) = self.source.peek()? {
            if b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-') {
                local.push(b as char)?;
                self.source.advance()?;
            } else {
                break;
            }
        }
        Ok(local.into_string())
    }

    /// Reads a bare run of ASCII letters — a directive keyword (`prefix`,
    /// `base`, `GRAPH`) or the prefix of a prefixed name, before the caller has
    /// decided which.
    pub(crate) fn read_ascii_word(&mut self) -> Result<String, RdfError> {
        let mut buf = BoundedBuffer::new(self.max_token_len);
        while matches!(self.source.peek()?, Some(b) if b.is_ascii_alphabetic()) {
            buf.push(self.source.advance()?.unwrap() as char)?;
        }
        Ok(buf.into_string())
    }

    /// Reads a bare numeric or keyword token (`1`, `1.5`, `1.5e10`, `true`,
    /// `false`, `a`), stopping at the first byte that cannot extend one.
    pub(crate) fn read_bare_token(&mut self) -> Result<String, RdfError> {
        let mut buf = BoundedBuffer::new(self.max_token_len);
        while let Some(b) = self.source.peek()? {
            if b.is_ascii_alphanumeric() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E') {
                buf.push(b as char)?;
                self.source.advance()?;
            } else {
                break;
            }
        }
        Ok(buf.into_string())
    }

    /// Reads a bare `INTEGER`/`DECIMAL`/`DOUBLE` token, treating a trailing `.`
    /// as part of the number only when a digit follows it — otherwise that `.`
    /// is left unconsumed, since it is the statement terminator.
    pub(crate) fn read_numeric_token(&mut self) -> Result<String, RdfError> {
        let mut buf = BoundedBuffer::new(self.max_token_len);
        if matches!(self.source.peek()?, Some(b'+' | b'-')) {
            buf.push(self.source.advance()?.unwrap() as char)?;
        }
        while matches!(self.source.peek()?, Some(b) if b.is_ascii_digit()) {
            buf.push(self.source.advance()?.unwrap() as char)?;
        }
        if self.source.peek()? == Some(b'.') && matches!(self.source.peek_second()?, Some(b) if b.is_ascii_digit())
        {
            buf.push(self.source.advance()?.unwrap() as char)?;
            while matches!(self.source.peek()?, Some(b) if b.is_ascii_digit()) {
                buf.push(self.source.advance()?.unwrap() as char)?;
            }
        }
        if matches!(self.source.peek()?, Some(b'e' | b'E')) {
            let mut exponent = String::new();
            exponent.push(self.source.advance()?.unwrap() as char);
            if matches!(self.source.peek()?, Some(b'+' | b'-')) {
                exponent.push(self.source.advance()?.unwrap() as char);
            }
            let mut saw_digit = false;
            while matches!(self.source.peek()?, Some(b) if b.is_ascii_digit()) {
                exponent.push(self.source.advance()?.unwrap() as char);
                saw_digit = true;
            }
            if saw_digit {
                for c in exponent.chars() {
                    buf.push(c)?;
                }
            }
            // Otherwise `e`/`E` wasn't an exponent after all; it is left
            // consumed but unused, which only occurs for malformed input.
        }
        Ok(buf.into_string())
    }

    /// Reads a `prefix:local` pair, a bare `true`/`false` boolean, or a bare
    /// numeric literal — the three kinds of unquoted term Turtle allows outside
    /// of IRIs, blank nodes and quoted literals.
    pub(crate) fn read_prefixed_name_or_keyword(&mut self) -> Result<RawNode, RdfError> {
        match self.peek()? {
            Some(b) if b.is_ascii_digit() || matches!(b, b'+' | b'-') => {
                Ok(numeric_node(&self.read_numeric_token()?))
            }
            Some(b'.') if matches!(self.source.peek_second()?, Some(d) if d.is_ascii_digit()) => {
                Ok(numeric_node(&self.read_numeric_token()?))
            }
            _ => {
                let (prefix, local) = self.read_prefixed_name()?;
                if prefix.is_empty() && (local == "true" || local == "false") {
                    Ok(Node::Literal(Literal::new_typed(
                        local,
                        NamedNode::new("http://www.w3.org/2001/XMLSchema#boolean"),
                    )))
                } else {
                    Ok(prefixed_node(prefix, local))
                }
            }
        }
    }

    /// Reads a verb: the keyword `a` (shorthand for `rdf:type`) or an
    /// IRI/prefixed-name predicate.
    pub(crate) fn read_verb(&mut self) -> Result<RawNode, RdfError> {
        if self.peek()? == Some(b'a')
            && !matches!(self.source.peek_second()?, Some(b) if b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.' | b':'))
        {
            self.expect(b'a')?;
            return Ok(iri_node("http://www.w3.org/1999/02/22-rdf-syntax-ns#type".to_owned()));
        }
        match self.peek()? {
            Some(b'<') => Ok(iri_node(self.read_iriref()?)),
            _ => {
                let (prefix, local) = self.read_prefixed_name()?;
                Ok(prefixed_node(prefix, local))
            }
        }
    }
}

fn numeric_node(token: &str) -> RawNode {
    Node::Literal(numeric_literal(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_node_generator_without_a_document_prefix_matches_the_bare_counter_form() {
        let mut generator = BlankNodeGenerator::with_document_prefix(None);
        assert_eq!(generator.fresh().as_str(), "b0");
        assert_eq!(generator.fresh().as_str(), "b1");
    }

    #[test]
    fn blank_node_generator_prepends_the_caller_supplied_document_prefix() {
        let mut generator = BlankNodeGenerator::with_document_prefix(Some("doc1-".to_owned()));
        assert_eq!(generator.fresh().as_str(), "doc1-b0");
        assert_eq!(generator.fresh().as_str(), "doc1-b1");
    }

    #[test]
    fn document_prefix_coexists_with_the_b_upper_b_clash_heuristic() {
        let mut generator = BlankNodeGenerator::with_document_prefix(Some("doc1-".to_owned()));
        generator.observe_user_label("b0");
        assert_eq!(generator.fresh().as_str(), "doc1-B0");
    }

    #[test]
    fn parser_options_default_expands_prefixed_names() {
        assert!(ParserOptions::new().expand_prefixed_names);
    }

    #[test]
    fn with_expand_prefixed_names_overrides_the_default() {
        let options = ParserOptions::new().with_expand_prefixed_names(false);
        assert!(!options.expand_prefixed_names);
    }

    #[test]
    fn with_blank_node_prefix_sets_the_option() {
        let options = ParserOptions::new().with_blank_node_prefix("doc1-");
        assert_eq!(options.blank_node_prefix.as_deref(), Some("doc1-"));
    }
}
