//! Model (component C10): up to twelve ordered indices over interned statements.
//!
//! Grounded on `oxrdf::dataset::Dataset`'s six always-on `BTreeSet<(Interned*, ...)>`
//! indices and its `quads_for_subject`/`quads_for_predicate`-style range queries
//! built from `Interned*::first()`/`next()`; generalized to a caller-selectable
//! subset of twelve orderings with an explicit query planner and to a version
//! counter for iterator invalidation, neither of which `oxrdf::Dataset` needs
//! (it has no external iterator handles that survive a mutation) but which
//! `spec.md` §4.7/§9 both require.

use std::cell::Cell;
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

use crate::error::{Domain, RdfError, Status};
use crate::interning::{InternedNode, Interner};
use crate::model::node::{GraphName, Node, Predicate, Subject};
use crate::model::statement::Statement;

/// The twelve field orderings named by the design: the six permutations of
/// `{subject, predicate, object}`, each either graph-leading or graph-trailing.
/// `Spo` is mandatory; the other eleven are selected via [`IndexFlags`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum Ordering {
    Spo,
    Pos,
    Osp,
    Pso,
    Sop,
    Ops,
    Gspo,
    Gpos,
    Gosp,
    Gpso,
    Gsop,
    Gops,
}

impl Ordering {
    const ALL: [Self; 12] = [
        Self::Spo,
        Self::Pos,
        Self::Osp,
        Self::Pso,
        Self::Sop,
        Self::Ops,
        Self::Gspo,
        Self::Gpos,
        Self::Gosp,
        Self::Gpso,
        Self::Gsop,
        Self::Gops,
    ];

    /// The field positions of this ordering, in tuple order. Graph is always
    /// present (for disambiguation across graphs sharing a triple) but is the
    /// *leading* field only for the `G`-prefixed orderings; for the others it
    /// trails, so a graph-bound-only pattern cannot use a contiguous prefix of a
    /// plain ordering (matching the design's "otherwise graph is treated as
    /// equal-or-wildcard only").
    const fn fields(self) -> [Field; 4] {
        use Field::{Graph, Object, Predicate, Subject};
        match self {
            Self::Spo => [Subject, Predicate, Object, Graph],
            Self::Pos => [Predicate, Object, Subject, Graph],
            Self::Osp => [Object, Subject, Predicate, Graph],
            Self::Pso => [Predicate, Subject, Object, Graph],
            Self::Sop => [Subject, Object, Predicate, Graph],
            Self::Ops => [Object, Predicate, Subject, Graph],
            Self::Gspo => [Graph, Subject, Predicate, Object],
            Self::Gpos => [Graph, Predicate, Object, Subject],
            Self::Gosp => [Graph, Object, Subject, Predicate],
            Self::Gpso => [Graph, Predicate, Subject, Object],
            Self::Gsop => [Graph, Subject, Object, Predicate],
            Self::Gops => [Graph, Object, Predicate, Subject],
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum Field {
    Subject,
    Predicate,
    Object,
    Graph,
}

/// A caller-selected subset of the twelve orderings. `Spo` is always enabled.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct IndexFlags {
    enabled: [bool; 12],
}

impl Default for IndexFlags {
    fn default() -> Self {
        Self::mandatory_only()
    }
}

impl IndexFlags {
    /// Only the mandatory `Spo` index.
    #[must_use]
    pub fn mandatory_only() -> Self {
        let mut enabled = [false; 12];
        enabled[0] = true; // Spo
        Self { enabled }
    }

    /// Every index enabled.
    #[must_use]
    pub fn all() -> Self {
        Self {
            enabled: [true; 12],
        }
    }

    #[must_use]
    pub fn with(mut self, ordering: Ordering) -> Self {
        self.enabled[Self::index_of(ordering)] = true;
        self
    }

    #[must_use]
    pub fn contains(&self, ordering: Ordering) -> bool {
        self.enabled[Self::index_of(ordering)]
    }

    fn index_of(ordering: Ordering) -> usize {
        Ordering::ALL.iter().position(|o| *o == ordering).unwrap()
    }

    fn iter_enabled(&self) -> impl Iterator<Item = Ordering> + '_ {
        Ordering::ALL
            .into_iter()
            .filter(move |o| self.contains(*o))
    }
}

type Key = (InternedNode, InternedNode, InternedNode, InternedNode);

#[derive(Debug, Clone)]
struct Record {
    subject: InternedNode,
    predicate: InternedNode,
    object: InternedNode,
    graph: InternedNode,
}

/// A bound-or-wildcard query over the four statement fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pattern {
    pub subject: Option<InternedNode>,
    pub predicate: Option<InternedNode>,
    pub object: Option<InternedNode>,
    pub graph: Option<InternedNode>,
}

impl Pattern {
    fn get(&self, field: Field) -> Option<InternedNode> {
        match field {
            Field::Subject => self.subject,
            Field::Predicate => self.predicate,
            Field::Object => self.object,
            Field::Graph => self.graph,
        }
    }

    fn matches(&self, key: &Key) -> bool {
        self.subject.is_none_or(|s| s == key.0)
            && self.predicate.is_none_or(|p| p == key.1)
            && self.object.is_none_or(|o| o == key.2)
            && self.graph.is_none_or(|g| g == key.3)
    }
}

// `Option::is_none_or` is 1.82+; this crate targets 1.74, so a local shim is used.
trait IsNoneOr<T> {
    fn is_none_or(self, f: impl FnOnce(T) -> bool) -> bool;
}
impl<T: Copy> IsNoneOr<T> for Option<T> {
    fn is_none_or(self, f: impl FnOnce(T) -> bool) -> bool {
        match self {
            None => true,
            Some(v) => f(v),
        }
    }
}

/// How a query was executed, recorded on the returned iterator per the design.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Mode {
    /// A contiguous range scan on an ordering whose leading fields exactly match
    /// the bound pattern fields.
    Range,
    /// A range scan on the longest enabled prefix, with a residual filter for the
    /// remaining bound fields.
    FilterRange,
    /// No ordering's prefix matches any bound field: scan everything and filter.
    FullScan,
}

#[derive(Debug, Clone, Copy)]
struct Plan {
    ordering: Ordering,
    prefix_len: usize,
    mode: Mode,
}

fn plan_query(flags: &IndexFlags, pattern: &Pattern) -> Plan {
    // Exact match: an enabled ordering whose leading fields are a contiguous run of
    // bound fields and whose remaining fields are all wildcard.
    for ordering in flags.iter_enabled() {
        let fields = ordering.fields();
        let bound_prefix_len = fields
            .iter()
            .take_while(|f| pattern.get(**f).is_some())
            .count();
        let rest_all_wildcard = fields[bound_prefix_len..]
            .iter()
            .all(|f| pattern.get(*f).is_none());
        if bound_prefix_len > 0 && rest_all_wildcard {
            return Plan {
                ordering,
                prefix_len: bound_prefix_len,
                mode: Mode::Range,
            };
        }
    }
    // Otherwise: the enabled ordering with the longest usable bound prefix,
    // filtering the remainder.
    let mut best: Option<(Ordering, usize)> = None;
    for ordering in flags.iter_enabled() {
        let fields = ordering.fields();
        let bound_prefix_len = fields
            .iter()
            .take_while(|f| pattern.get(**f).is_some())
            .count();
        if bound_prefix_len > 0 && best.is_none_or(|(_, len)| bound_prefix_len > len) {
            best = Some((ordering, bound_prefix_len));
        }
    }
    match best {
        Some((ordering, prefix_len)) => Plan {
            ordering,
            prefix_len,
            mode: Mode::FilterRange,
        },
        None => Plan {
            ordering: Ordering::Spo,
            prefix_len: 0,
            mode: Mode::FullScan,
        },
    }
}

/// Token shared between a model and its outstanding iterators, used to implement
/// the "insertion may not proceed while iterators are live" rule.
#[derive(Debug, Clone, Default)]
struct LiveGuardCounter(Rc<Cell<u32>>);

impl LiveGuardCounter {
    fn acquire(&self) -> LiveGuard {
        self.0.set(self.0.get() + 1);
        LiveGuard(self.0.clone())
    }

    fn count(&self) -> u32 {
        self.0.get()
    }
}

#[derive(Debug)]
struct LiveGuard(Rc<Cell<u32>>);

impl Drop for LiveGuard {
    fn drop(&mut self) {
        self.0.set(self.0.get().saturating_sub(1));
    }
}

/// An in-memory, multi-index RDF model.
pub struct Model {
    interner: Interner,
    flags: IndexFlags,
    indices: HashMap<Ordering, BTreeSet<(InternedNode, InternedNode, InternedNode, InternedNode)>>,
    records: HashMap<u64, Record>,
    ids_by_spo: HashMap<Key, u64>,
    next_id: u64,
    version: u64,
    live: LiveGuardCounter,
}

impl Model {
    #[must_use]
    pub fn new(flags: IndexFlags) -> Self {
        let mut flags = flags;
        flags.enabled[IndexFlags::index_of(Ordering::Spo)] = true;
        let mut indices = HashMap::new();
        for ordering in flags.iter_enabled() {
            indices.insert(ordering, BTreeSet::new());
        }
        Self {
            interner: Interner::new(),
            flags,
            indices,
            records: HashMap::new(),
            ids_by_spo: HashMap::new(),
            next_id: 0,
            version: 0,
            live: LiveGuardCounter::default(),
        }
    }

    #[must_use]
    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn ordered_key(record: &Record, ordering: Ordering) -> Key {
        let get = |field: Field| match field {
            Field::Subject => record.subject,
            Field::Predicate => record.predicate,
            Field::Object => record.object,
            Field::Graph => record.graph,
        };
        let fields = ordering.fields();
        (
            get(fields[0]),
            get(fields[1]),
            get(fields[2]),
            get(fields[3]),
        )
    }

    /// Un-permutes a key produced under `ordering` back to subject/predicate/
    /// object/graph order, so any ordering's matches can be resolved to a
    /// statement id via the single canonical index.
    fn canonical_key(ordering: Ordering, key: &Key) -> Key {
        let fields = ordering.fields();
        let values = [key.0, key.1, key.2, key.3];
        let mut out = [InternedNode::first(); 4];
        for (slot, field) in fields.iter().enumerate() {
            let canonical_index = match field {
                Field::Subject => 0,
                Field::Predicate => 1,
                Field::Object => 2,
                Field::Graph => 3,
            };
            out[canonical_index] = values[slot];
        }
        (out[0], out[1], out[2], out[3])
    }

    /// Interns and inserts a statement. Returns `Ok(true)` if newly inserted,
    /// `Ok(false)` if an equal statement already existed (model idempotence, per
    /// `spec.md` §8).
    pub fn add(
        &mut self,
        subject: &Subject,
        predicate: &Predicate,
        object: &Node,
        graph: &GraphName,
    ) -> Result<bool, RdfError> {
        if self.live.count() > 0 {
            return Err(RdfError::new(
                Status::Invalid,
                Domain::Model,
                "cannot insert while iterators are live",
            ));
        }
        let s = self.interner.intern_subject(subject);
        let p = self.interner.intern_subject(&Subject::from(predicate.clone()));
        let o = self.interner.intern(object.as_ref());
        let g = self.interner.intern_graph(graph);
        let record = Record {
            subject: s,
            predicate: p,
            object: o,
            graph: g,
        };
        let spo_key = Self::ordered_key(&record, Ordering::Spo);
        if self.indices[&Ordering::Spo].contains(&spo_key) {
            // Undo the refcount bumps `intern*` just performed for this attempt.
            self.interner.deref(s);
            self.interner.deref(p);
            self.interner.deref(o);
            self.interner.deref(g);
            return Ok(false);
        }
        let id = self.next_id;
        self.next_id += 1;
        for ordering in self.flags.iter_enabled() {
            let key = Self::ordered_key(&record, ordering);
            self.indices.get_mut(&ordering).unwrap().insert(key);
        }
        self.ids_by_spo.insert(spo_key, id);
        self.records.insert(id, record);
        self.version += 1;
        Ok(true)
    }

    pub fn insert(&mut self, statement: &Statement) -> Result<bool, RdfError> {
        self.add(
            &statement.subject,
            &statement.predicate,
            &statement.object,
            &statement.graph,
        )
    }

    /// Inserts every statement from `statements`, stopping at the first error.
    /// Returns the count actually inserted (idempotent re-insertions of an
    /// already-present statement do not count), matching [`Model::add`]'s
    /// per-statement `bool` semantics summed across the range.
    pub fn add_range<'s, I>(&mut self, statements: I) -> Result<usize, RdfError>
    where
        I: IntoIterator<Item = &'s Statement>,
    {
        let mut inserted = 0;
        for statement in statements {
            if self.insert(statement)? {
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    /// Builds a [`QueryIter`] over every statement matching `pattern`, choosing an
    /// ordering/mode per the query planner described in `spec.md` §4.7.
    #[must_use]
    pub fn query(&self, pattern: Pattern) -> QueryIter {
        let plan = plan_query(&self.flags, &pattern);
        let index = &self.indices[&plan.ordering];
        let matches: Vec<Key> = match plan.mode {
            Mode::FullScan => index.iter().filter(|k| pattern.matches(k)).copied().collect(),
            Mode::Range | Mode::FilterRange => {
                // Only the contiguous bound prefix participates in the range key;
                // fields beyond it are left at their full span and narrowed by the
                // post-filter instead, even if they happen to be bound in
                // `pattern` — folding them into the range bound here would
                // wrongly exclude records whose unconstrained middle fields sort
                // below the bound value (see `DESIGN.md`).
                let fields = plan.ordering.fields();
                let mut lower_fields = [InternedNode::first(); 4];
                let mut upper_fields = [InternedNode::impossible(); 4];
                for i in 0..plan.prefix_len {
                    let value = pattern.get(fields[i]).expect("prefix field must be bound");
                    lower_fields[i] = value;
                    upper_fields[i] = if i + 1 == plan.prefix_len {
                        value.next()
                    } else {
                        value
                    };
                }
                let lower: Key = (lower_fields[0], lower_fields[1], lower_fields[2], lower_fields[3]);
                let upper: Key = (upper_fields[0], upper_fields[1], upper_fields[2], upper_fields[3]);
                index
                    .range(lower..upper)
                    .filter(|k| pattern.matches(k))
                    .copied()
                    .collect()
            }
        };
        let statement_ids = self.ids_for_keys(plan.ordering, &matches);
        QueryIter {
            ids: statement_ids,
            position: 0,
            version: self.version,
            _guard: self.live.acquire(),
            pattern,
            plan_ordering: plan.ordering,
            plan_prefix_len: plan.prefix_len,
            plan_mode: plan.mode,
        }
    }

    fn ids_for_keys(&self, ordering: Ordering, keys: &[Key]) -> Vec<u64> {
        keys.iter()
            .filter_map(|key| {
                let canonical = Self::canonical_key(ordering, key);
                self.ids_by_spo.get(&canonical).copied()
            })
            .collect()
    }

    #[must_use]
    pub fn ask(&self, pattern: Pattern) -> bool {
        self.query(pattern).len() > 0
    }

    #[must_use]
    pub fn count(&self, pattern: Pattern) -> usize {
        self.query(pattern).len()
    }

    /// Returns the single statement matching `pattern`, which must have exactly one
    /// field left as a wildcard.
    pub fn get_statement(&self, pattern: Pattern) -> Result<Statement, RdfError> {
        let wildcards = [pattern.subject, pattern.predicate, pattern.object, pattern.graph]
            .iter()
            .filter(|f| f.is_none())
            .count();
        if wildcards != 1 {
            return Err(RdfError::new(
                Status::BadArgument,
                Domain::Model,
                "get_statement requires exactly one wildcard field",
            ));
        }
        let mut iter = self.query(pattern);
        match iter.next(self) {
            Some(Ok(statement)) => Ok(statement),
            Some(Err(e)) => Err(e),
            None => Err(RdfError::new(Status::NotFound, Domain::Model, "no matching statement")),
        }
    }

    #[must_use]
    pub fn decode(&self, id: u64) -> Option<Statement> {
        let record = self.records.get(&id)?;
        let subject = Subject::try_from(self.interner.decode(record.subject).into_owned()).ok()?;
        let predicate =
            Predicate::try_from(self.interner.decode(record.predicate).into_owned()).ok()?;
        let object = self.interner.decode(record.object).into_owned();
        let graph = if self.is_default_graph_handle(record.graph) {
            GraphName::DefaultGraph
        } else {
            GraphName::try_from(self.interner.decode(record.graph).into_owned()).ok()?
        };
        Some(Statement::new(subject, predicate, object, graph))
    }

    fn is_default_graph_handle(&self, handle: InternedNode) -> bool {
        self.interner
            .lookup_graph(&GraphName::DefaultGraph)
            .map(|h| h == handle)
            .unwrap_or(false)
    }

    /// Removes every statement yielded by `iter`. `iter` must have been produced by
    /// this model and not be stale; other outstanding iterators are invalidated.
    pub fn erase(&mut self, iter: QueryIter) -> Result<usize, RdfError> {
        if iter.version != self.version {
            return Err(RdfError::new(
                Status::BadIterator,
                Domain::Model,
                "iterator was produced against a stale model version",
            ));
        }
        let mut removed = 0;
        for id in &iter.ids {
            if let Some(record) = self.records.remove(id) {
                for ordering in self.flags.iter_enabled() {
                    let key = Self::ordered_key(&record, ordering);
                    self.indices.get_mut(&ordering).unwrap().remove(&key);
                }
                let spo_key = Self::ordered_key(&record, Ordering::Spo);
                self.ids_by_spo.remove(&spo_key);
                self.interner.deref(record.subject);
                self.interner.deref(record.predicate);
                self.interner.deref(record.object);
                self.interner.deref(record.graph);
                removed += 1;
            }
        }
        drop(iter); // release this iterator's own guard before bumping the version
        self.version += 1;
        Ok(removed)
    }
}

/// A snapshot iterator over a model query. Carries the chosen ordering, prefix
/// length and mode for introspection, and a version snapshot: any `next()` call
/// made after the originating model was mutated (by anyone other than the erase
/// call consuming this very iterator) returns `Status::BadIterator`.
pub struct QueryIter {
    ids: Vec<u64>,
    position: usize,
    version: u64,
    _guard: LiveGuard,
    pattern: Pattern,
    plan_ordering: Ordering,
    plan_prefix_len: usize,
    plan_mode: Mode,
}

impl QueryIter {
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The pattern that produced this iterator.
    #[must_use]
    pub fn pattern(&self) -> Pattern {
        self.pattern
    }

    #[must_use]
    pub fn ordering(&self) -> Ordering {
        self.plan_ordering
    }

    #[must_use]
    pub fn prefix_len(&self) -> usize {
        self.plan_prefix_len
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.plan_mode
    }

    /// Advances the iterator, decoding the next matching statement. Returns `None`
    /// once exhausted. `model` must be the same model the iterator was produced
    /// from.
    pub fn next(&mut self, model: &Model) -> Option<Result<Statement, RdfError>> {
        if self.version != model.version {
            return Some(Err(RdfError::new(
                Status::BadIterator,
                Domain::Model,
                "iterator invalidated by a subsequent mutation",
            )));
        }
        let id = *self.ids.get(self.position)?;
        self.position += 1;
        Some(
            model
                .decode(id)
                .ok_or_else(|| RdfError::new(Status::Internal, Domain::Model, "dangling statement id")),
        )
    }

    /// Materializes every remaining statement; fails fast on the first invalid or
    /// undecodable entry.
    pub fn collect_all(mut self, model: &Model) -> Result<Vec<Statement>, RdfError> {
        let mut out = Vec::with_capacity(self.len());
        while let Some(item) = self.next(model) {
            out.push(item?);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::node::{Literal, NamedNode};

    fn named(iri: &str) -> Subject {
        Subject::NamedNode(NamedNode::new(iri))
    }

    fn pred(iri: &str) -> Predicate {
        Predicate::NamedNode(NamedNode::new(iri))
    }

    #[test]
    fn inserting_same_statement_twice_is_idempotent() {
        let mut model = Model::new(IndexFlags::mandatory_only());
        let inserted_once = model
            .add(&named("http://ex/s"), &pred("http://ex/p"), &Node::Literal(Literal::new_simple("v")), &GraphName::DefaultGraph)
            .unwrap();
        let inserted_twice = model
            .add(&named("http://ex/s"), &pred("http://ex/p"), &Node::Literal(Literal::new_simple("v")), &GraphName::DefaultGraph)
            .unwrap();
        assert!(inserted_once);
        assert!(!inserted_twice);
        assert_eq!(model.size(), 1);
    }

    #[test]
    fn wildcard_query_enumerates_every_statement() {
        let mut model = Model::new(IndexFlags::all());
        model
            .add(&named("http://ex/s1"), &pred("http://ex/p1"), &Node::NamedNode(NamedNode::new("http://ex/o1")), &GraphName::DefaultGraph)
            .unwrap();
        model
            .add(&named("http://ex/s1"), &pred("http://ex/p2"), &Node::NamedNode(NamedNode::new("http://ex/o2")), &GraphName::DefaultGraph)
            .unwrap();
        let all = model.query(Pattern::default());
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn query_planner_uses_spo_for_subject_bound_pattern() {
        let mut model = Model::new(IndexFlags::mandatory_only());
        model
            .add(&named("http://ex/s1"), &pred("http://ex/p1"), &Node::NamedNode(NamedNode::new("http://ex/o1")), &GraphName::DefaultGraph)
            .unwrap();
        model
            .add(&named("http://ex/s1"), &pred("http://ex/p2"), &Node::NamedNode(NamedNode::new("http://ex/o2")), &GraphName::DefaultGraph)
            .unwrap();
        let s1_handle = model.interner.lookup_subject(&named("http://ex/s1")).unwrap();
        let pattern = Pattern {
            subject: Some(s1_handle),
            ..Pattern::default()
        };
        let results = model.query(pattern);
        assert_eq!(results.ordering(), Ordering::Spo);
        assert_eq!(results.mode(), Mode::Range);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn erasing_invalidates_other_live_iterators() {
        let mut model = Model::new(IndexFlags::all());
        model
            .add(&named("http://ex/s"), &pred("http://ex/p"), &Node::NamedNode(NamedNode::new("http://ex/o")), &GraphName::DefaultGraph)
            .unwrap();
        let stale = model.query(Pattern::default());
        let to_erase = model.query(Pattern::default());
        drop(stale); // drop our own handle to the "other" iterator before mutating differently
        let stale = model.query(Pattern::default());
        model.erase(to_erase).unwrap();
        let mut stale = stale;
        let result = stale.next(&model);
        assert!(matches!(result, Some(Err(e)) if e.status() == Status::BadIterator));
    }

    #[test]
    fn insertion_blocked_while_iterator_is_live() {
        let mut model = Model::new(IndexFlags::mandatory_only());
        let iter = model.query(Pattern::default());
        let err = model
            .add(&named("http://ex/s"), &pred("http://ex/p"), &Node::NamedNode(NamedNode::new("http://ex/o")), &GraphName::DefaultGraph)
            .unwrap_err();
        assert_eq!(err.status(), Status::Invalid);
        drop(iter);
        assert!(model
            .add(&named("http://ex/s"), &pred("http://ex/p"), &Node::NamedNode(NamedNode::new("http://ex/o")), &GraphName::DefaultGraph)
            .unwrap());
    }

    #[test]
    fn add_range_counts_only_newly_inserted_statements() {
        use crate::model::statement::Statement;
        let mut model = Model::new(IndexFlags::mandatory_only());
        let statements = vec![
            Statement::new(
                Subject::NamedNode(NamedNode::new("http://ex/s1")),
                Predicate::NamedNode(NamedNode::new("http://ex/p")),
                Node::Literal(Literal::new_simple("v")),
                GraphName::DefaultGraph,
            ),
            Statement::new(
                Subject::NamedNode(NamedNode::new("http://ex/s2")),
                Predicate::NamedNode(NamedNode::new("http://ex/p")),
                Node::Literal(Literal::new_simple("v")),
                GraphName::DefaultGraph,
            ),
        ];
        assert_eq!(model.add_range(&statements).unwrap(), 2);
        assert_eq!(model.add_range(&statements).unwrap(), 0);
        assert_eq!(model.size(), 2);
    }

    #[test]
    fn query_iter_records_the_pattern_that_produced_it() {
        let mut model = Model::new(IndexFlags::mandatory_only());
        model
            .add(&named("http://ex/s"), &pred("http://ex/p"), &Node::NamedNode(NamedNode::new("http://ex/o")), &GraphName::DefaultGraph)
            .unwrap();
        let s_handle = model.interner.lookup_subject(&named("http://ex/s")).unwrap();
        let pattern = Pattern {
            subject: Some(s_handle),
            ..Pattern::default()
        };
        let results = model.query(pattern);
        assert_eq!(results.pattern().subject, Some(s_handle));
        assert!(results.pattern().predicate.is_none());
    }
}
