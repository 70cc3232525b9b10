/// Cursor over cumulative text snapshots that yields only newly appended
/// text.
///
/// One tracker belongs to exactly one session's producer and starts at the
/// beginning of the output. Snapshots must be prefix-extensions of their
/// predecessors (the backend contract); the boundary only ever moves forward.
#[derive(Debug, Default)]
pub struct DeltaTracker {
    emitted: usize,
}

impl DeltaTracker {
    /// Creates a tracker positioned at the start of the output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the suffix of `snapshot` past the last emitted boundary and
    /// advances the boundary to the end of `snapshot`.
    ///
    /// The first call returns the whole snapshot; a snapshot identical to the
    /// previous one yields an empty delta.
    pub fn advance(&mut self, snapshot: &str) -> String {
        let delta = snapshot.get(self.emitted..).unwrap_or_default().to_string();
        self.emitted = self.emitted.max(snapshot.len());
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_snapshot_is_returned_whole() {
        let mut tracker = DeltaTracker::new();
        assert_eq!(tracker.advance("hello"), "hello");
    }

    #[test]
    fn growth_yields_only_the_appended_suffix() {
        let mut tracker = DeltaTracker::new();
        assert_eq!(tracker.advance("hello"), "hello");
        assert_eq!(tracker.advance("hello world"), " world");
        assert_eq!(tracker.advance("hello world"), "");
    }

    #[test]
    fn concatenated_deltas_reproduce_the_final_snapshot() {
        let snapshots = ["T", "Th", "The", "The qu", "The quick", "The quick fox"];
        let mut tracker = DeltaTracker::new();
        let mut rebuilt = String::new();
        for snapshot in snapshots {
            rebuilt.push_str(&tracker.advance(snapshot));
        }
        assert_eq!(rebuilt, "The quick fox");
    }

    #[test]
    fn boundary_never_moves_backwards() {
        let mut tracker = DeltaTracker::new();
        assert_eq!(tracker.advance("hello"), "hello");
        // Out-of-contract shrinking input: nothing is re-emitted.
        assert_eq!(tracker.advance("he"), "");
        assert_eq!(tracker.advance("hello!"), "!");
    }

    #[test]
    fn multibyte_text_splits_on_snapshot_boundaries() {
        let mut tracker = DeltaTracker::new();
        assert_eq!(tracker.advance("héllo"), "héllo");
        assert_eq!(tracker.advance("héllo wörld"), " wörld");
    }
}
