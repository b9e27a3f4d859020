//! Pull-based enumeration of values.

use std::sync::Arc;

use super::{Heap, Value};
use crate::Indexable;

#[derive(Clone)]
enum Source {
    Empty,
    Array(Heap<Vec<Value>>),
    /// Keys are snapshotted when enumeration starts; values are fetched as
    /// they are pulled.
    Dictionary {
        map: Heap<dyn Indexable>,
        keys: Arc<[String]>,
    },
    Elements(Arc<[Value]>),
}

/// A finite, restartable sequence of values.
///
/// Produced by [`Value::enumerate`]. Cloning an iterator is cheap and the
/// clone continues from the same position; [`ValueIter::restart`] rewinds to
/// the first element.
#[derive(Clone)]
pub struct ValueIter {
    source: Source,
    position: usize,
}

impl ValueIter {
    pub(crate) fn empty() -> Self {
        ValueIter {
            source: Source::Empty,
            position: 0,
        }
    }

    pub(crate) fn array(items: Heap<Vec<Value>>) -> Self {
        ValueIter {
            source: Source::Array(items),
            position: 0,
        }
    }

    pub(crate) fn dictionary(map: Heap<dyn Indexable>) -> Self {
        let keys: Arc<[String]> = map.keys().into();
        ValueIter {
            source: Source::Dictionary { map, keys },
            position: 0,
        }
    }

    pub(crate) fn elements(items: Vec<Value>) -> Self {
        ValueIter {
            source: Source::Elements(items.into()),
            position: 0,
        }
    }

    /// Rewind to the first element.
    pub fn restart(&mut self) {
        self.position = 0;
    }

    /// Total number of elements, independent of the current position.
    pub fn total_len(&self) -> usize {
        match &self.source {
            Source::Empty => 0,
            Source::Array(items) => items.len(),
            Source::Dictionary { keys, .. } => keys.len(),
            Source::Elements(items) => items.len(),
        }
    }
}

impl Iterator for ValueIter {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        let item = match &self.source {
            Source::Empty => None,
            Source::Array(items) => items.get(self.position).cloned(),
            Source::Elements(items) => items.get(self.position).cloned(),
            Source::Dictionary { map, keys } => keys.get(self.position).map(|key| {
                // A key that vanished since the snapshot reads as nil.
                let value = map.try_get_value(key).unwrap_or(Value::Nil);
                Value::array(vec![Value::string(key.as_str()), value])
            }),
        };
        if item.is_some() {
            self.position += 1;
        }
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total_len().saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ValueIter {}
