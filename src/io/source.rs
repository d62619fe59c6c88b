//! Byte source (component C1): buffered pull with 1-byte lookahead and line/column
//! tracking.
//!
//! Grounded on `oxttl::toolkit::lexer::Lexer`'s buffering (`extend_from_reader`,
//! page-sized growth bounded by a maximum) and its `\r`/`\n`/`\r\n`-aware line
//! counting, simplified here to the narrower 1-byte-lookahead contract `spec.md`
//! §4.1 asks for rather than a full tokenizer buffer.

use std::io::Read;

use crate::error::{Domain, RdfError, Status};

/// Default page size for a reader-backed source (≥ 4 KiB per the design).
pub const DEFAULT_PAGE_SIZE: usize = 4096;

/// A buffered byte source with 1-byte lookahead, used by the parser.
pub struct ByteSource<R> {
    reader: Option<R>,
    buffer: Vec<u8>,
    pos: usize,
    page_size: usize,
    line: u64,
    column: u64,
    eof: bool,
}

impl<R: Read> ByteSource<R> {
    /// Wraps a [`Read`] implementation, reading in pages of at least `page_size`
    /// bytes. A leading UTF-8 BOM is consumed silently.
    pub fn new(reader: R, page_size: usize) -> Result<Self, RdfError> {
        let mut source = Self {
            reader: Some(reader),
            buffer: Vec::new(),
            pos: 0,
            page_size: page_size.max(1),
            line: 1,
            column: 1,
            eof: false,
        };
        source.fill()?;
        source.skip_bom()?;
        Ok(source)
    }

    fn fill(&mut self) -> Result<(), RdfError> {
        if self.eof {
            return Ok(());
        }
        let Some(reader) = &mut self.reader else {
            self.eof = true;
            return Ok(());
        };
        if self.pos >= self.buffer.len() {
            self.buffer.clear();
            self.pos = 0;
        }
        let mut page = vec![0_u8; self.page_size];
        let n = reader.read(&mut page)?;
        if n == 0 {
            self.eof = true;
        } else {
            self.buffer.extend_from_slice(&page[..n]);
        }
        Ok(())
    }

    fn skip_bom(&mut self) -> Result<(), RdfError> {
        const BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
        while self.buffer.len() - self.pos < BOM.len() && !self.eof {
            self.fill()?;
        }
        if self.buffer[self.pos..].starts_with(&BOM) {
            self.pos += BOM.len();
        }
        Ok(())
    }

    /// Returns the next byte without consuming it, or `None` at end of input.
    pub fn peek(&mut self) -> Result<Option<u8>, RdfError> {
        while self.pos >= self.buffer.len() && !self.eof {
            self.fill()?;
        }
        Ok(self.buffer.get(self.pos).copied())
    }

    /// Returns the byte one past the next one, without consuming either. Used
    /// only to resolve the Turtle numeric-literal/statement-terminator
    /// ambiguity (`1.` vs `1.5`), where a single byte of lookahead is not
    /// enough to tell a trailing decimal point from the period that ends the
    /// statement.
    pub fn peek_second(&mut self) -> Result<Option<u8>, RdfError> {
        while self.pos + 1 >= self.buffer.len() && !self.eof {
            self.fill()?;
        }
        Ok(self.buffer.get(self.pos + 1).copied())
    }

    /// Consumes and returns the next byte, updating line/column tracking.
    pub fn advance(&mut self) -> Result<Option<u8>, RdfError> {
        let Some(byte) = self.peek()? else {
            return Ok(None);
        };
        self.pos += 1;
        if byte == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Ok(Some(byte))
    }

    #[must_use]
    pub fn line(&self) -> u64 {
        self.line
    }

    #[must_use]
    pub fn column(&self) -> u64 {
        self.column
    }

    /// Releases the underlying reader. After this call, `peek`/`advance` behave as
    /// though at end of input.
    pub fn close(&mut self) {
        self.reader = None;
        self.eof = true;
    }
}

impl<'a> ByteSource<std::io::Cursor<&'a [u8]>> {
    /// Wraps an in-memory buffer with page size 1, matching the design's
    /// "or wraps a null-terminated string with page size 1" clause.
    pub fn from_str(input: &'a str) -> Result<Self, RdfError> {
        Self::new(std::io::Cursor::new(input.as_bytes()), 1)
    }
}

pub(crate) fn bad_syntax(domain: Domain, message: impl Into<String>) -> RdfError {
    RdfError::new(Status::BadSyntax, domain, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peek_does_not_consume() {
        let mut s = ByteSource::from_str("ab").unwrap();
        assert_eq!(s.peek().unwrap(), Some(b'a'));
        assert_eq!(s.peek().unwrap(), Some(b'a'));
        assert_eq!(s.advance().unwrap(), Some(b'a'));
        assert_eq!(s.advance().unwrap(), Some(b'b'));
        assert_eq!(s.advance().unwrap(), None);
    }

    #[test]
    fn tracks_line_and_column() {
        let mut s = ByteSource::from_str("a\nb").unwrap();
        assert_eq!((s.line(), s.column()), (1, 1));
        s.advance().unwrap();
        assert_eq!((s.line(), s.column()), (1, 2));
        s.advance().unwrap(); // '\n'
        assert_eq!((s.line(), s.column()), (2, 1));
    }

    #[test]
    fn skips_leading_bom() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(b"x");
        let mut s = ByteSource::new(std::io::Cursor::new(bytes), 16).unwrap();
        assert_eq!(s.advance().unwrap(), Some(b'x'));
    }
}
