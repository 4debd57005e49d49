use std::collections::VecDeque;

use crate::shared::entities::Segment;

/// FIFO of pending segments. Insertion order is playback order; one live
/// queue per chat session, owned by its scheduler.
#[derive(Debug, Default)]
pub struct SegmentQueue {
    inner: VecDeque<Segment>,
}

impl SegmentQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_batch(&mut self, segments: Vec<Segment>) {
        self.inner.extend(segments);
    }

    pub fn pop(&mut self) -> Option<Segment> {
        self.inner.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(sentence: &str) -> Segment {
        Segment {
            sentence: sentence.to_string(),
            sentiment: String::new(),
            audio_file: None,
            animation: None,
            start_timestamp: 0.0,
            end_timestamp: 0.0,
        }
    }

    #[test]
    fn pops_in_insertion_order() {
        let mut q = SegmentQueue::new();
        q.push_batch(vec![segment("a"), segment("b")]);
        q.push_batch(vec![segment("c")]);
        assert_eq!(q.len(), 3);
        assert_eq!(q.pop().unwrap().sentence, "a");
        assert_eq!(q.pop().unwrap().sentence, "b");
        assert_eq!(q.pop().unwrap().sentence, "c");
        assert!(q.pop().is_none());
        assert!(q.is_empty());
    }
}
