//! Two documents, each with its own caller-supplied `blank_node_prefix`, merge
//! into one model without their anonymous nodes colliding.

use rdflex::io::ByteSource;
use rdflex::model::{IndexFlags, Model};
use rdflex::parse::turtle::TurtleParser;
use rdflex::parse::ParserOptions;
use rdflex::sink::Inserter;

#[test]
fn blank_nodes_from_two_documents_stay_distinct_after_merging() {
    let mut model = Model::new(IndexFlags::mandatory_only());

    let doc_a = "<http://ex/s> <http://ex/p> [ <http://ex/q> \"a\" ] .\n";
    let doc_b = "<http://ex/s> <http://ex/p> [ <http://ex/q> \"b\" ] .\n";

    let mut parser_a = TurtleParser::new(
        ByteSource::from_str(doc_a).unwrap(),
        ParserOptions::new().with_blank_node_prefix("docA-"),
    );
    parser_a.parse_all(&mut Inserter::new(&mut model)).unwrap();

    let mut parser_b = TurtleParser::new(
        ByteSource::from_str(doc_b).unwrap(),
        ParserOptions::new().with_blank_node_prefix("docB-"),
    );
    parser_b.parse_all(&mut Inserter::new(&mut model)).unwrap();

    // Each document contributes one statement about `<http://ex/s>` and one
    // about its own anonymous node; a label clash would have merged the two
    // blank nodes into one, leaving fewer than 4 statements total.
    assert_eq!(model.size(), 4);
}
