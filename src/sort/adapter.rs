//! Lifting a plain comparator into a [`RecordComparator`].

use std::cmp::Ordering;
use std::fmt::Debug;
use std::hash::{Hash, Hasher};

use crate::document::document::Document;
use crate::error::{OrdoError, Result};
use crate::sort::record::{PlainComparator, RecordComparator, RecordFactory};

/// Wraps a [`PlainComparator`] and a [`RecordFactory`] into a
/// [`RecordComparator`].
///
/// Equality and hashing look only at the wrapped comparator, so two adapters
/// over equal comparators are interchangeable wherever sources are cached or
/// deduplicated.
#[derive(Debug, Clone)]
pub struct RecordComparatorAdapter<C, F> {
    comparator: C,
    factory: F,
}

impl<C, F> RecordComparatorAdapter<C, F>
where
    C: PlainComparator,
    F: RecordFactory<Output = C::Item>,
{
    pub fn new(comparator: C, factory: F) -> Self {
        RecordComparatorAdapter {
            comparator,
            factory,
        }
    }

    pub fn builder() -> RecordComparatorAdapterBuilder<C, F> {
        RecordComparatorAdapterBuilder::default()
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }
}

impl<C, F> RecordComparator for RecordComparatorAdapter<C, F>
where
    C: PlainComparator,
    C::Item: Clone + Send + Sync + Debug,
    F: RecordFactory<Output = C::Item>,
{
    type Record = C::Item;

    fn compare(&self, a: &Self::Record, b: &Self::Record) -> Ordering {
        self.comparator.compare(a, b)
    }

    fn record_from_raw(&self, raw: &Document) -> Result<Self::Record> {
        self.factory.from_raw(raw)
    }
}

impl<C: PartialEq, F> PartialEq for RecordComparatorAdapter<C, F> {
    fn eq(&self, other: &Self) -> bool {
        self.comparator == other.comparator
    }
}

impl<C: Eq, F> Eq for RecordComparatorAdapter<C, F> {}

impl<C: Hash, F> Hash for RecordComparatorAdapter<C, F> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.comparator.hash(state);
    }
}

/// Builder for [`RecordComparatorAdapter`] whose collaborators may not be
/// known up front. Building without either one is a configuration error.
#[derive(Debug)]
pub struct RecordComparatorAdapterBuilder<C, F> {
    comparator: Option<C>,
    factory: Option<F>,
}

impl<C, F> Default for RecordComparatorAdapterBuilder<C, F> {
    fn default() -> Self {
        RecordComparatorAdapterBuilder {
            comparator: None,
            factory: None,
        }
    }
}

impl<C, F> RecordComparatorAdapterBuilder<C, F>
where
    C: PlainComparator,
    F: RecordFactory<Output = C::Item>,
{
    pub fn comparator(mut self, comparator: C) -> Self {
        self.comparator = Some(comparator);
        self
    }

    pub fn factory(mut self, factory: F) -> Self {
        self.factory = Some(factory);
        self
    }

    pub fn build(self) -> Result<RecordComparatorAdapter<C, F>> {
        let comparator = self
            .comparator
            .ok_or_else(|| OrdoError::config("record comparator adapter requires a comparator"))?;
        let factory = self
            .factory
            .ok_or_else(|| OrdoError::config("record comparator adapter requires a record factory"))?;
        Ok(RecordComparatorAdapter::new(comparator, factory))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    struct ByLength {
        descending: bool,
    }

    impl PlainComparator for ByLength {
        type Item = String;

        fn compare(&self, a: &String, b: &String) -> Ordering {
            let cmp = a.len().cmp(&b.len());
            if self.descending { cmp.reverse() } else { cmp }
        }
    }

    #[derive(Debug, Clone)]
    struct TitleFactory(&'static str);

    impl RecordFactory for TitleFactory {
        type Output = String;

        fn from_raw(&self, raw: &Document) -> Result<String> {
            raw.get_field(self.0)
                .and_then(|v| v.as_text())
                .map(str::to_string)
                .ok_or_else(|| OrdoError::reconstruction("missing title"))
        }
    }

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_adapter_delegates() {
        let adapter = RecordComparatorAdapter::new(ByLength { descending: false }, TitleFactory("title"));

        let doc = Document::builder().add_text("title", "abc").build();
        let record = adapter.record_from_raw(&doc).unwrap();
        assert_eq!(record, "abc");
        assert_eq!(
            adapter.compare(&"a".to_string(), &"abc".to_string()),
            Ordering::Less
        );

        let bad = Document::builder().add_integer("title", 1).build();
        assert!(adapter.record_from_raw(&bad).unwrap_err().is_reconstruction());
    }

    #[test]
    fn test_equality_follows_wrapped_comparator() {
        let a = RecordComparatorAdapter::new(ByLength { descending: false }, TitleFactory("title"));
        let b = RecordComparatorAdapter::new(ByLength { descending: false }, TitleFactory("name"));
        let c = RecordComparatorAdapter::new(ByLength { descending: true }, TitleFactory("title"));

        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_ne!(a, c);
    }

    #[test]
    fn test_builder_requires_both_collaborators() {
        let missing_factory = RecordComparatorAdapter::<ByLength, TitleFactory>::builder()
            .comparator(ByLength { descending: false })
            .build();
        assert!(matches!(missing_factory, Err(OrdoError::Config(_))));

        let missing_comparator = RecordComparatorAdapter::<ByLength, TitleFactory>::builder()
            .factory(TitleFactory("title"))
            .build();
        assert!(matches!(missing_comparator, Err(OrdoError::Config(_))));

        let built = RecordComparatorAdapter::<ByLength, TitleFactory>::builder()
            .comparator(ByLength { descending: false })
            .factory(TitleFactory("title"))
            .build()
            .unwrap();
        assert_eq!(built.comparator(), &ByLength { descending: false });
    }
}
