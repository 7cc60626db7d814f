//! Placement of missing sort values.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Where a slot or document without a value ranks relative to one with a
/// value, in the comparator's natural direction.
///
/// Two missing values always compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MissingOrder {
    /// Missing values rank after every present value.
    #[default]
    Last,
    /// Missing values rank before every present value.
    First,
}

impl MissingOrder {
    /// Compare two optional values, delegating to `cmp` when both are present.
    ///
    /// ```
    /// use std::cmp::Ordering;
    /// use ordo::sort::MissingOrder;
    ///
    /// let order = MissingOrder::Last;
    /// assert_eq!(order.compare(Some(&1), None, |a, b| a.cmp(b)), Ordering::Less);
    /// assert_eq!(order.compare::<i32, _>(None, None, |a, b| a.cmp(b)), Ordering::Equal);
    /// ```
    pub fn compare<T, F>(self, a: Option<&T>, b: Option<&T>, cmp: F) -> Ordering
    where
        T: ?Sized,
        F: FnOnce(&T, &T) -> Ordering,
    {
        match (a, b) {
            (Some(a), Some(b)) => cmp(a, b),
            (None, None) => Ordering::Equal,
            (Some(_), None) => match self {
                MissingOrder::Last => Ordering::Less,
                MissingOrder::First => Ordering::Greater,
            },
            (None, Some(_)) => match self {
                MissingOrder::Last => Ordering::Greater,
                MissingOrder::First => Ordering::Less,
            },
        }
    }
}
