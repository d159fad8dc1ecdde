use crate::common::Result;
use crate::shim::KeyValue;

// Result of a range query. Each entry carries its own result so that a
// single unreadable record surfaces at the position it was encountered.
pub struct StateIterator {
    results: std::vec::IntoIter<Result<KeyValue>>,
}

impl StateIterator {
    pub fn new(results: Vec<Result<KeyValue>>) -> Self {
        Self {
            results: results.into_iter(),
        }
    }

    pub fn has_next(&self) -> bool {
        !self.results.as_slice().is_empty()
    }
}

impl Iterator for StateIterator {
    type Item = Result<KeyValue>;

    fn next(&mut self) -> Option<Self::Item> {
        self.results.next()
    }
}
