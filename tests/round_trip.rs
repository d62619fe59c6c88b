//! Parsing into a model and serializing back out, across the flat and terse
//! writers, round-trips the same statement count and exact N-Triples content.

use rdflex::event::Sink;
use rdflex::io::ByteSource;
use rdflex::model::{IndexFlags, Model};
use rdflex::parse::ntriples::NTriplesParser;
use rdflex::parse::turtle::TurtleParser;
use rdflex::parse::ParserOptions;
use rdflex::serialize::flat::FlatSerializer;
use rdflex::serialize::terse::TerseSerializer;
use rdflex::serialize::SerializerOptions;
use rdflex::sink::Inserter;

#[test]
fn turtle_source_reserializes_as_exact_flat_ntriples() {
    let source = ByteSource::from_str(
        "@prefix ex: <http://example.com/> .\nex:s ex:p \"v\" .\n",
    )
    .unwrap();
    let mut parser = TurtleParser::new(source, ParserOptions::new());
    let mut serializer = FlatSerializer::new(Vec::new(), SerializerOptions::new());
    let count = parser.parse_all(&mut serializer).unwrap();
    assert_eq!(count, 1);
    let out = String::from_utf8(serializer.finish().unwrap()).unwrap();
    assert_eq!(out, "<http://example.com/s> <http://example.com/p> \"v\" .\n");
}

#[test]
fn ntriples_reparsed_after_a_terse_round_trip_has_the_same_statement_count() {
    let original = "<http://ex/s> <http://ex/p> <http://ex/o1> .\n\
                    <http://ex/s> <http://ex/p> <http://ex/o2> .\n\
                    <http://ex/s> <http://ex/q> \"v\" .\n";

    let mut model = Model::new(IndexFlags::mandatory_only());
    let mut parser = NTriplesParser::new(ByteSource::from_str(original).unwrap(), ParserOptions::new());
    parser.parse_all(&mut Inserter::new(&mut model)).unwrap();
    assert_eq!(model.size(), 3);

    let mut terse = TerseSerializer::new(Vec::new(), SerializerOptions::new());
    for statement in model.query(rdflex::model::Pattern::default()).collect_all(&model).unwrap() {
        terse
            .on_event(rdflex::event::Event::Statement {
                statement,
                flags: rdflex::event::StatementFlags::default(),
            })
            .unwrap();
    }
    let turtle_out = String::from_utf8(terse.finish().unwrap()).unwrap();

    let mut reparsed = Model::new(IndexFlags::mandatory_only());
    let mut reparser = TurtleParser::new(ByteSource::from_str(&turtle_out).unwrap(), ParserOptions::new());
    reparser.parse_all(&mut Inserter::new(&mut reparsed)).unwrap();
    assert_eq!(reparsed.size(), 3);
}
