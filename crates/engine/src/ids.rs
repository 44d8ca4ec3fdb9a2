use crate::timeline::{SegmentId, TimelineSegment};

/// Source of fresh segment ids, injected into the editor so split results
/// are deterministic under test.
pub trait SegmentIdSource {
    fn next_id(&mut self) -> SegmentId;

    /// Called when the editor adopts a new segment list, so later ids can
    /// skip the ones it already uses.
    fn observe(&mut self, _segments: &[TimelineSegment]) {}
}

/// Monotonic counter starting at 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Creates a counter that will never hand out an id already present in
    /// `segments`.
    ///
    /// # Example
    /// ```
    /// use engine::ids::{SegmentIdSource, SequentialIds};
    /// use engine::timeline::{SegmentId, TimelineSegment};
    ///
    /// let segments = vec![TimelineSegment::new(SegmentId(7), 0.0, 30.0, 0.5)];
    /// let mut ids = SequentialIds::after(&segments);
    /// assert_eq!(ids.next_id(), SegmentId(8));
    /// ```
    pub fn after(segments: &[TimelineSegment]) -> Self {
        let mut ids = Self::new();
        ids.observe(segments);
        ids
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl SegmentIdSource for SequentialIds {
    fn next_id(&mut self) -> SegmentId {
        let id = SegmentId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }

    /// Raises the counter past the highest id in `segments`. Never lowers it.
    fn observe(&mut self, segments: &[TimelineSegment]) {
        if let Some(max) = segments.iter().map(|segment| segment.id.0).max() {
            if max >= self.next {
                self.next = max.wrapping_add(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SegmentIdSource, SequentialIds};
    use crate::timeline::{SegmentId, TimelineSegment};

    #[test]
    fn sequential_ids_count_up_from_one() {
        let mut ids = SequentialIds::new();
        assert_eq!(ids.next_id(), SegmentId(1));
        assert_eq!(ids.next_id(), SegmentId(2));
    }

    #[test]
    fn after_empty_list_starts_at_one() {
        let mut ids = SequentialIds::after(&[]);
        assert_eq!(ids.next_id(), SegmentId(1));
    }

    #[test]
    fn observe_only_moves_the_counter_forward() {
        let mut ids = SequentialIds::new();
        ids.observe(&[TimelineSegment::new(SegmentId(5), 0.0, 10.0, 0.5)]);
        assert_eq!(ids.next_id(), SegmentId(6));

        ids.observe(&[TimelineSegment::new(SegmentId(2), 0.0, 10.0, 0.5)]);
        assert_eq!(ids.next_id(), SegmentId(7));
    }

    #[test]
    fn after_the_largest_id_wraps_instead_of_overflowing() {
        let segments = vec![TimelineSegment::new(SegmentId(u64::MAX), 0.0, 10.0, 0.5)];
        let mut ids = SequentialIds::after(&segments);
        assert_eq!(ids.next_id(), SegmentId(0));
        assert_eq!(ids.next_id(), SegmentId(1));
    }
}
