use std::cmp::Ordering;
use std::sync::Arc;

use ordo::config::SortConfig;
use ordo::document::document::Document;
use ordo::error::Result;
use ordo::history::{HistoryEntry, UserHistory, UserHistoryStore};
use ordo::issue::{Issue, IssueFactory, IssueKeyComparator, PriorityComparator};
use ordo::segment::{MemorySegment, SegmentReader};
use ordo::sort::{
    DocumentSortComparatorSource, FieldComparator, RecordComparatorAdapter, SortField,
    TopFieldCollector, UserHistoryComparatorSource,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

type IssueSource<C> = DocumentSortComparatorSource<RecordComparatorAdapter<C, IssueFactory>>;

fn issue_doc(id: i64, key: &str, priority: Option<i64>) -> Document {
    let mut builder = Document::builder().add_text("key", key).add_integer("id", id);
    if let Some(priority) = priority {
        builder = builder.add_integer("priority", priority);
    }
    builder.build()
}

fn segment_of(docs: Vec<Document>) -> Arc<dyn SegmentReader> {
    Arc::new(MemorySegment::from_documents(docs))
}

fn priority_source() -> IssueSource<PriorityComparator> {
    DocumentSortComparatorSource::new(RecordComparatorAdapter::new(
        PriorityComparator,
        IssueFactory::default(),
    ))
}

fn history_of(entries: &[(&str, i64)]) -> UserHistory {
    entries
        .iter()
        .map(|(id, t)| HistoryEntry::new(*id, *t))
        .collect()
}

fn doc_ids(collector: &TopFieldCollector) -> Vec<u64> {
    collector.results().iter().map(|hit| hit.doc_id).collect()
}

#[test]
fn history_sort_ranks_most_recent_first() -> Result<()> {
    let segment = segment_of(vec![
        issue_doc(1, "ISSUE-1", None),
        issue_doc(2, "ISSUE-2", None),
    ]);
    let history = history_of(&[("ISSUE-1", 100), ("ISSUE-2", 200)]);
    let source = UserHistoryComparatorSource::for_field(history, "key");

    let mut collector = TopFieldCollector::new(&[SortField::new(Arc::new(source))], 2)?;
    collector.collect_segment(segment)?;

    assert_eq!(doc_ids(&collector), vec![1, 0]);
    Ok(())
}

#[test]
fn history_sort_ranks_viewed_before_unviewed() -> Result<()> {
    let segment = segment_of(vec![
        issue_doc(3, "ISSUE-3", None),
        issue_doc(1, "ISSUE-1", None),
    ]);
    let history = history_of(&[("ISSUE-1", 100)]);
    let source = UserHistoryComparatorSource::for_field(history, "key");

    let mut collector = TopFieldCollector::new(&[SortField::new(Arc::new(source))], 2)?;
    collector.collect_segment(segment)?;

    assert_eq!(doc_ids(&collector), vec![1, 0]);
    Ok(())
}

#[test]
fn document_sort_compares_rebuilt_records() -> Result<()> {
    let segment = segment_of(vec![
        issue_doc(1, "HSP-1", Some(3)),
        issue_doc(2, "HSP-2", Some(1)),
        issue_doc(3, "HSP-3", Some(2)),
    ]);
    let mut comparator = priority_source().comparator_for(3)?;
    comparator.set_next_reader(segment)?;
    for slot in 0..3 {
        comparator.copy(slot, slot as u64)?;
    }

    assert_eq!(comparator.compare(1, 2), 1.cmp(&2));
    assert_eq!(comparator.compare(0, 1), 3.cmp(&1));
    assert_eq!(comparator.compare(2, 2), Ordering::Equal);
    Ok(())
}

#[test]
fn document_sort_compare_is_antisymmetric() -> Result<()> {
    let segment = segment_of(vec![
        issue_doc(1, "HSP-1", Some(2)),
        issue_doc(2, "HSP-2", None),
        issue_doc(3, "HSP-3", Some(1)),
        issue_doc(4, "HSP-4", Some(2)),
        issue_doc(5, "HSP-5", None),
    ]);
    let mut comparator = priority_source().comparator_for(5)?;
    comparator.set_next_reader(segment)?;
    for slot in 0..5 {
        comparator.copy(slot, slot as u64)?;
    }

    for a in 0..5 {
        for b in 0..5 {
            assert_eq!(comparator.compare(a, b), comparator.compare(b, a).reverse());
        }
    }
    // Two missing priorities tie; a present one beats a missing one.
    assert_eq!(comparator.compare(1, 4), Ordering::Equal);
    assert_eq!(comparator.compare(0, 1), Ordering::Less);
    assert_eq!(comparator.compare(1, 0), Ordering::Greater);
    Ok(())
}

#[test]
fn history_sort_missing_values_tie_and_rank_last() -> Result<()> {
    let segment = segment_of(vec![
        issue_doc(1, "HSP-1", None),
        issue_doc(2, "HSP-2", None),
        issue_doc(3, "HSP-3", None),
    ]);
    let source = UserHistoryComparatorSource::for_field(history_of(&[("HSP-2", 5)]), "key");
    let mut comparator = source.comparator_for(3)?;
    comparator.set_next_reader(segment)?;
    for slot in 0..3 {
        comparator.copy(slot, slot as u64)?;
    }

    assert_eq!(comparator.compare(0, 2), Ordering::Equal);
    assert_eq!(comparator.compare(1, 0), Ordering::Less);
    assert_eq!(comparator.compare(0, 1), Ordering::Greater);
    assert_eq!(comparator.compare(1, 2), Ordering::Less);
    Ok(())
}

#[test]
fn document_sort_cache_growth_preserves_values() -> Result<()> {
    let docs = (0..40)
        .map(|i| issue_doc(i, &format!("HSP-{i}"), Some(i * 7 % 11)))
        .collect();
    let segment = segment_of(docs);
    let mut comparator = priority_source().comparator_for(100)?;
    comparator.set_next_reader(segment)?;

    let initial = comparator.cache_capacity();
    for slot in 0..40 {
        comparator.copy(slot, slot as u64)?;
    }

    assert!(initial < 40);
    assert!(comparator.cache_capacity() >= 40);
    assert!(comparator.cache_capacity() <= 100);
    for slot in 0..40 {
        let issue: &Issue = comparator.record(slot).unwrap();
        assert_eq!(issue.id, slot as i64);
        assert_eq!(issue.priority, Some(slot as i64 * 7 % 11));
    }
    Ok(())
}

#[test]
fn history_index_is_rebuilt_only_on_segment_change() -> Result<()> {
    init_logger();
    let first = segment_of(vec![issue_doc(1, "HSP-1", None)]);
    let second = segment_of(vec![issue_doc(2, "HSP-2", None)]);
    let source = UserHistoryComparatorSource::for_field(
        history_of(&[("HSP-1", 10), ("HSP-2", 20)]),
        "key",
    );
    let mut comparator = source.comparator_for(4)?;

    comparator.set_next_reader(Arc::clone(&first))?;
    comparator.set_next_reader(Arc::clone(&first))?;
    assert_eq!(comparator.rebuild_count(), 1);
    assert_eq!(comparator.segment_index_len(), 1);

    comparator.set_next_reader(Arc::clone(&second))?;
    assert_eq!(comparator.rebuild_count(), 2);

    comparator.set_next_reader(first)?;
    assert_eq!(comparator.rebuild_count(), 3);
    Ok(())
}

#[test]
fn history_sort_skips_deleted_records() -> Result<()> {
    let segment: Arc<dyn SegmentReader> = Arc::new(
        MemorySegment::builder()
            .add_document(issue_doc(1, "HSP-1", None))
            .add_document(issue_doc(2, "HSP-2", None))
            .add_document(issue_doc(3, "HSP-3", None))
            .delete_document(2)
            .build(),
    );
    let source = UserHistoryComparatorSource::for_field(
        history_of(&[("HSP-3", 300), ("HSP-1", 100), ("HSP-9", 900)]),
        "key",
    );

    let mut comparator = source.comparator_for(3)?;
    comparator.set_next_reader(Arc::clone(&segment))?;
    assert_eq!(comparator.segment_index_len(), 1);

    let mut collector = TopFieldCollector::new(&[SortField::new(Arc::new(source))], 3)?;
    collector.collect_segment(segment)?;
    assert_eq!(doc_ids(&collector), vec![0, 1]);
    assert_eq!(collector.total_hits(), 2);
    Ok(())
}

#[test]
fn issue_key_sort_orders_numerically_across_segments() -> Result<()> {
    let first = segment_of(vec![
        issue_doc(10, "HSP-10", None),
        issue_doc(2, "ABC-2", None),
    ]);
    let second = segment_of(vec![
        issue_doc(9, "HSP-9", None),
        issue_doc(11, "ABC-11", None),
    ]);
    let source: IssueSource<IssueKeyComparator> = DocumentSortComparatorSource::from_parts(
        Some(IssueKeyComparator),
        Some(IssueFactory::default()),
    )?;

    let mut collector = TopFieldCollector::new(&[SortField::new(Arc::new(source))], 3)?;
    collector.collect_segment(Arc::clone(&first))?;
    collector.collect_segment(Arc::clone(&second))?;

    let hits = collector.results();
    let found: Vec<_> = hits.iter().map(|hit| (hit.segment, hit.doc_id)).collect();
    assert_eq!(
        found,
        vec![(first.id(), 1), (second.id(), 1), (second.id(), 0)]
    );
    Ok(())
}

#[test]
fn priority_sort_falls_back_to_history() -> Result<()> {
    let segment = segment_of(vec![
        issue_doc(1, "HSP-1", Some(2)),
        issue_doc(2, "HSP-2", Some(1)),
        issue_doc(3, "HSP-3", Some(2)),
        issue_doc(4, "HSP-4", Some(2)),
    ]);
    let history = history_of(&[("HSP-4", 400), ("HSP-1", 100)]);
    let fields = [
        SortField::new(Arc::new(priority_source())),
        SortField::new(Arc::new(UserHistoryComparatorSource::for_field(history, "key"))),
    ];

    let mut collector = TopFieldCollector::new(&fields, 4)?;
    collector.collect_segment(segment)?;

    assert_eq!(doc_ids(&collector), vec![1, 3, 0, 2]);
    Ok(())
}

#[test]
fn reversed_priority_sort_puts_missing_first() -> Result<()> {
    let segment = segment_of(vec![
        issue_doc(1, "HSP-1", Some(1)),
        issue_doc(2, "HSP-2", None),
        issue_doc(3, "HSP-3", Some(3)),
    ]);
    let field = SortField::new(Arc::new(priority_source())).reversed();

    let mut collector = TopFieldCollector::new(&[field], 3)?;
    collector.collect_segment(segment)?;

    assert_eq!(doc_ids(&collector), vec![1, 2, 0]);
    Ok(())
}

#[test]
fn corrupt_record_aborts_the_sort() -> Result<()> {
    let segment = segment_of(vec![
        issue_doc(1, "HSP-1", Some(1)),
        Document::builder().add_text("key", "HSP-2").build(),
    ]);
    let mut collector = TopFieldCollector::new(&[SortField::new(Arc::new(priority_source()))], 5)?;

    let err = collector.collect_segment(segment).unwrap_err();
    assert!(err.is_reconstruction());
    Ok(())
}

#[test]
fn history_store_snapshot_drives_the_sort() -> Result<()> {
    init_logger();
    let config = SortConfig::from_json_str(r#"{ "history": { "max_items": 2 } }"#)?;
    let store = UserHistoryStore::with_config(&config.history)?;
    store.add_item("admin", "HSP-1", 100);
    store.add_item("admin", "HSP-2", 200);
    store.add_item("admin", "HSP-1", 300);
    store.add_item("fred", "HSP-3", 50);

    let segment = segment_of(vec![
        issue_doc(1, "HSP-1", None),
        issue_doc(2, "HSP-2", None),
        issue_doc(3, "HSP-3", None),
    ]);
    let source = UserHistoryComparatorSource::with_config(store.history("admin"), &config.history);

    // Later views do not leak into a source built from an earlier snapshot.
    store.add_item("admin", "HSP-3", 400);

    let mut collector = TopFieldCollector::with_config(
        &[SortField::new(Arc::new(source))],
        &config.collector,
    )?;
    collector.collect_segment(segment)?;

    assert_eq!(doc_ids(&collector), vec![0, 1, 2]);
    assert_eq!(store.history("admin").len(), 2);
    Ok(())
}
