//! End-to-end: each of the four textual syntaxes, parsed through its own
//! recognizer and inserted into a `Model`, answers `query`/`ask`/`count`
//! correctly against the public API surface.

use rdflex::io::ByteSource;
use rdflex::model::{GraphName, IndexFlags, Model, NamedNode, Node, Pattern, Predicate, Subject};
use rdflex::parse::nquads::NQuadsParser;
use rdflex::parse::ntriples::NTriplesParser;
use rdflex::parse::trig::TrigParser;
use rdflex::parse::turtle::TurtleParser;
use rdflex::parse::ParserOptions;
use rdflex::sink::Inserter;

fn model_from_ntriples(doc: &str) -> Model {
    let source = ByteSource::from_str(doc).unwrap();
    let mut parser = NTriplesParser::new(source, ParserOptions::new());
    let mut model = Model::new(IndexFlags::mandatory_only());
    parser.parse_all(&mut Inserter::new(&mut model)).unwrap();
    model
}

#[test]
fn ntriples_statements_are_queryable_by_subject() {
    let model = model_from_ntriples(
        "<http://ex/s1> <http://ex/p> \"a\" .\n<http://ex/s2> <http://ex/p> \"b\" .\n",
    );
    assert_eq!(model.size(), 2);

    let s1 = model
        .interner()
        .lookup_subject(&Subject::NamedNode(NamedNode::new("http://ex/s1")))
        .unwrap();
    let results = model
        .query(Pattern {
            subject: Some(s1),
            ..Pattern::default()
        })
        .collect_all(&model)
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].object.to_string(), "\"a\"");
}

#[test]
fn nquads_statement_lands_in_its_named_graph() {
    let source = ByteSource::from_str("<http://ex/s> <http://ex/p> \"v\" <http://ex/g> .\n").unwrap();
    let mut parser = NQuadsParser::new(source, ParserOptions::new());
    let mut model = Model::new(IndexFlags::mandatory_only());
    parser.parse_all(&mut Inserter::new(&mut model)).unwrap();

    let g = model
        .interner()
        .lookup_graph(&GraphName::NamedNode(NamedNode::new("http://ex/g")))
        .unwrap();
    assert!(model.ask(Pattern {
        graph: Some(g),
        ..Pattern::default()
    }));
    assert!(model.ask(Pattern::default()));
}

#[test]
fn turtle_predicate_object_list_expands_to_multiple_statements_in_one_model() {
    let source = ByteSource::from_str(
        "@prefix ex: <http://example.com/> .\nex:s ex:p ex:o1 , ex:o2 ; ex:q ex:o3 .\n",
    )
    .unwrap();
    let mut parser = TurtleParser::new(source, ParserOptions::new());
    let mut model = Model::new(IndexFlags::mandatory_only());
    parser.parse_all(&mut Inserter::new(&mut model)).unwrap();
    assert_eq!(model.size(), 3);

    let p = model
        .interner()
        .lookup(Node::from(Predicate::NamedNode(NamedNode::new("http://example.com/p"))).as_ref())
        .unwrap();
    assert_eq!(
        model.count(Pattern {
            predicate: Some(p),
            ..Pattern::default()
        }),
        2
    );
}

#[test]
fn trig_graph_block_statements_are_distinguishable_from_default_graph_ones() {
    let source = ByteSource::from_str(
        "@prefix ex: <http://example.com/> .\nex:s ex:p ex:o .\nGRAPH ex:g { ex:s ex:p ex:o2 . }\n",
    )
    .unwrap();
    let mut parser = TrigParser::new(source, ParserOptions::new());
    let mut model = Model::new(IndexFlags::mandatory_only());
    parser.parse_all(&mut Inserter::new(&mut model)).unwrap();
    assert_eq!(model.size(), 2);

    let default_graph_count = model.count(Pattern {
        graph: model.interner().lookup_graph(&GraphName::DefaultGraph),
        ..Pattern::default()
    });
    assert_eq!(default_graph_count, 1);
}
