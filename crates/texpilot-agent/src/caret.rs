//! Last-known caret position.

use parking_lot::Mutex;

/// A cloned selection range captured on a selection-change event.
///
/// Nothing invalidates a snapshot: if the document changes structurally the
/// range may point somewhere unexpected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaretSnapshot<R> {
    range: R,
}

impl<R> CaretSnapshot<R> {
    pub fn new(range: R) -> Self {
        Self { range }
    }

    pub fn range(&self) -> &R {
        &self.range
    }

    pub fn into_range(self) -> R {
        self.range
    }
}

/// Holder of the most recent [`CaretSnapshot`]. Last write wins.
#[derive(Debug)]
pub struct CaretTracker<R> {
    last: Mutex<Option<CaretSnapshot<R>>>,
}

impl<R: Clone> CaretTracker<R> {
    pub fn new() -> Self {
        Self {
            last: Mutex::new(None),
        }
    }

    /// Overwrite the snapshot with `range`.
    pub fn record(&self, range: R) {
        *self.last.lock() = Some(CaretSnapshot::new(range));
    }

    /// A copy of the latest snapshot, if any was recorded.
    pub fn latest(&self) -> Option<CaretSnapshot<R>> {
        self.last.lock().clone()
    }
}

impl<R: Clone> Default for CaretTracker<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tracker() {
        let tracker: CaretTracker<usize> = CaretTracker::new();
        assert!(tracker.latest().is_none());
    }

    #[test]
    fn test_last_write_wins() {
        let tracker = CaretTracker::new();
        tracker.record(3usize);
        tracker.record(11usize);
        assert_eq!(tracker.latest().unwrap().into_range(), 11);
    }

    #[test]
    fn test_latest_is_a_copy() {
        let tracker = CaretTracker::new();
        tracker.record(vec![1, 2]);
        let snapshot = tracker.latest().unwrap();
        tracker.record(vec![9]);
        assert_eq!(snapshot.range(), &vec![1, 2]);
    }
}
