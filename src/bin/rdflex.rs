//! A thin CLI front end over the library's `Parser`/`Serializer` facade,
//! grounded on how `oxigraph-cli` drives `oxrdfio::{RdfParser,RdfSerializer}`
//! (`SPEC_FULL.md` §6). Not part of the library's public API surface.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::{Parser as ClapParser, Subcommand, ValueEnum};

use rdflex::error::RdfError;
use rdflex::event::{Event, Sink};
use rdflex::io::ByteSource;
use rdflex::parse::nquads::NQuadsParser;
use rdflex::parse::ntriples::NTriplesParser;
use rdflex::parse::trig::TrigParser;
use rdflex::parse::turtle::TurtleParser;
use rdflex::parse::{ParserOptions, RecoveryMode};
use rdflex::serialize::flat::FlatSerializer;
use rdflex::serialize::terse::TerseSerializer;
use rdflex::serialize::SerializerOptions;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Ntriples,
    Nquads,
    Turtle,
    Trig,
}

#[derive(Debug, ClapParser)]
#[command(name = "rdflex", about = "Parse and reformat N-Triples/N-Quads/Turtle/TriG")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parses a document and reports the number of statements read.
    Parse {
        #[arg(long, value_enum)]
        from: Format,
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long)]
        base: Option<String>,
        /// Recover from syntax errors instead of stopping at the first one.
        #[arg(long)]
        lax: bool,
    },
    /// Parses a document in one syntax and writes it out in another.
    Convert {
        #[arg(long, value_enum)]
        from: Format,
        #[arg(long, value_enum)]
        to: Format,
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long)]
        base: Option<String>,
        #[arg(long)]
        lax: bool,
        /// Escape every non-ASCII character in the output.
        #[arg(long)]
        ascii: bool,
    },
}

fn open_input(path: Option<PathBuf>) -> Result<Box<dyn Read>, RdfError> {
    match path {
        Some(path) => Ok(Box::new(File::open(path)?)),
        None => Ok(Box::new(io::stdin())),
    }
}

fn open_output(path: Option<PathBuf>) -> Result<Box<dyn Write>, RdfError> {
    match path {
        Some(path) => Ok(Box::new(File::create(path)?)),
        None => Ok(Box::new(io::stdout())),
    }
}

fn parser_options(base: Option<String>, lax: bool) -> ParserOptions {
    let mut options = ParserOptions::new();
    if let Some(base) = base {
        options = options.with_base(base);
    }
    if lax {
        options = options.with_recovery(RecoveryMode::Lax);
    }
    options
}

fn count_statements(format: Format, source: ByteSource<Box<dyn Read>>, options: ParserOptions) -> Result<usize, RdfError> {
    let mut sink = |_event: Event| Ok(());
    match format {
        Format::Ntriples => NTriplesParser::new(source, options).parse_all(&mut sink),
        Format::Nquads => NQuadsParser::new(source, options).parse_all(&mut sink),
        Format::Turtle => TurtleParser::new(source, options).parse_all(&mut sink),
        Format::Trig => TrigParser::new(source, options).parse_all(&mut sink),
    }
}

/// Either half of the serializer pair, dispatched over one concrete [`Sink`]
/// impl so every input parser (each a distinct generic type) can drive it
/// through the same `parse_all::<S: Sink>` call.
enum OutputSink {
    Flat(FlatSerializer<Box<dyn Write>>),
    Terse(TerseSerializer<Box<dyn Write>>),
}

impl Sink for OutputSink {
    fn on_event(&mut self, event: Event) -> Result<(), RdfError> {
        match self {
            Self::Flat(sink) => sink.on_event(event),
            Self::Terse(sink) => sink.on_event(event),
        }
    }
}

fn convert(
    from: Format,
    source: ByteSource<Box<dyn Read>>,
    options: ParserOptions,
    sink: &mut OutputSink,
) -> Result<usize, RdfError> {
    match from {
        Format::Ntriples => NTriplesParser::new(source, options).parse_all(sink),
        Format::Nquads => NQuadsParser::new(source, options).parse_all(sink),
        Format::Turtle => TurtleParser::new(source, options).parse_all(sink),
        Format::Trig => TrigParser::new(source, options).parse_all(sink),
    }
}

fn run() -> Result<(), RdfError> {
    let cli = Cli::parse();
    match cli.command {
        Command::Parse { from, input, base, lax } => {
            let source = ByteSource::new(open_input(input)?, rdflex::io::source::DEFAULT_PAGE_SIZE)?;
            let count = count_statements(from, source, parser_options(base, lax))?;
            println!("{count} statement(s)");
            Ok(())
        }
        Command::Convert {
            from,
            to,
            input,
            output,
            base,
            lax,
            ascii,
        } => {
            let source = ByteSource::new(open_input(input)?, rdflex::io::source::DEFAULT_PAGE_SIZE)?;
            let writer = open_output(output)?;
            let serializer_options = SerializerOptions::new().with_ascii(ascii);
            let mut sink = match to {
                Format::Ntriples | Format::Nquads => OutputSink::Flat(FlatSerializer::new(writer, serializer_options)),
                Format::Turtle | Format::Trig => OutputSink::Terse(TerseSerializer::new(writer, serializer_options)),
            };
            convert(from, source, parser_options(base, lax), &mut sink)?;
            match sink {
                OutputSink::Flat(s) => {
                    s.finish()?;
                }
                OutputSink::Terse(s) => {
                    s.finish()?;
                }
            }
            Ok(())
        }
    }
}

fn main() -> Result<(), RdfError> {
    run()
}
