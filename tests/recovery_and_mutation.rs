//! Lax recovery, bulk insertion (`add_range`) and bulk removal (`erase_range`)
//! exercised together against a `Model` built from parsed statements.

use rdflex::io::ByteSource;
use rdflex::model::{GraphName, IndexFlags, Model, NamedNode, Node, Pattern, Predicate, Subject};
use rdflex::model::Statement;
use rdflex::parse::ntriples::NTriplesParser;
use rdflex::parse::{ParserOptions, RecoveryMode};
use rdflex::sink::Inserter;

#[test]
fn lax_recovery_skips_bad_statements_but_inserts_the_rest() {
    let source = ByteSource::from_str(
        "<http://ex/s> <http://ex/p> not-a-term .\n<http://ex/s> <http://ex/p> \"ok\" .\n",
    )
    .unwrap();
    let mut parser = NTriplesParser::new(source, ParserOptions::new().with_recovery(RecoveryMode::Lax));
    let mut model = Model::new(IndexFlags::mandatory_only());
    let count = parser.parse_all(&mut Inserter::new(&mut model)).unwrap();
    assert_eq!(count, 1);
    assert_eq!(model.size(), 1);
}

#[test]
fn add_range_then_erase_range_leaves_the_model_empty() {
    let mut model = Model::new(IndexFlags::mandatory_only());
    let statements = vec![
        Statement::new(
            Subject::NamedNode(NamedNode::new("http://ex/s1")),
            Predicate::NamedNode(NamedNode::new("http://ex/p")),
            Node::Literal(rdflex::model::Literal::new_simple("a")),
            GraphName::DefaultGraph,
        ),
        Statement::new(
            Subject::NamedNode(NamedNode::new("http://ex/s2")),
            Predicate::NamedNode(NamedNode::new("http://ex/p")),
            Node::Literal(rdflex::model::Literal::new_simple("b")),
            GraphName::DefaultGraph,
        ),
    ];
    assert_eq!(model.add_range(&statements).unwrap(), 2);
    assert_eq!(model.add_range(&statements).unwrap(), 0, "re-adding the same statements inserts nothing new");
    assert_eq!(model.size(), 2);

    let erased = rdflex::sink::erase_range(&mut model, Pattern::default()).unwrap();
    assert_eq!(erased, 2);
    assert_eq!(model.size(), 0);
}
