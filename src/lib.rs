//! rdflex: streaming RDF parsing, serialization and in-memory indexing for
//! N-Triples, N-Quads, Turtle and TriG.
//!
//! The crate is organized the way the design's component list (`spec.md` §3)
//! names them: a byte source ([`io`]) feeds a syntax-specific recognizer
//! ([`parse`]) that emits a stream of [`event::Event`]s against a running
//! [`env::Environment`]; a [`event::Sink`] consumes that stream, either
//! directly ([`serialize`]) or through one of the [`sink`] combinators into an
//! indexed [`model::store::Model`]. [`model::node`] and [`model::statement`]
//! are the shared term/statement vocabulary; [`interning`] and [`util`] are
//! the supporting machinery the store and the numeric-literal parsers lean on.
//!
//! ```
//! use rdflex::io::ByteSource;
//! use rdflex::model::{IndexFlags, Model};
//! use rdflex::parse::ntriples::NTriplesParser;
//! use rdflex::parse::ParserOptions;
//! use rdflex::sink::Inserter;
//!
//! let source = ByteSource::from_str(
//!     "<http://example.com/s> <http://example.com/p> \"o\" .\n",
//! )?;
//! let mut parser = NTriplesParser::new(source, ParserOptions::new());
//! let mut model = Model::new(IndexFlags::mandatory_only());
//! parser.parse_all(&mut Inserter::new(&mut model))?;
//! assert_eq!(model.size(), 1);
//! # Ok::<(), rdflex::error::RdfError>(())
//! ```

pub mod env;
pub mod error;
pub mod event;
pub mod interning;
pub mod io;
pub mod iri;
pub mod model;
pub mod parse;
pub mod serialize;
pub mod sink;
pub mod util;

pub use error::RdfError;
pub use event::{Event, Sink};
pub use model::{Model, Statement};
