//! Binary min-heap used to drive the flood fill.
//!
//! Unlike [std::collections::BinaryHeap] this orders on an `f64` priority directly and has no
//! decrease-key: the flood fill pushes duplicates for a cell and discards the stale ones when
//! they surface.
use crate::error::{DistanceMapError, Result};
use crate::INITIAL_QUEUE_CAPACITY;

/// An entry of the [PriorityQueue]: accumulated cost `f` and the 1-indexed cell it belongs to.
/// Only `f` takes part in the ordering, so ties come out in no particular order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QueueElement {
    pub f: f64,
    pub x: u16,
    pub y: u16,
}

impl QueueElement {
    pub fn new(f: f64, x: u16, y: u16) -> QueueElement {
        QueueElement { f, x, y }
    }
}

#[inline]
fn lesseq(lhs: &QueueElement, rhs: &QueueElement) -> bool {
    lhs.f <= rhs.f
}

#[inline]
fn left_child(idx: usize) -> usize {
    2 * idx + 1
}

#[inline]
fn parent(idx: usize) -> usize {
    (idx - 1) / 2
}

/// Array-backed binary min-heap over [QueueElement]s.
#[derive(Clone, Debug)]
pub struct PriorityQueue {
    data: Vec<QueueElement>,
}

impl Default for PriorityQueue {
    fn default() -> PriorityQueue {
        PriorityQueue::with_capacity(INITIAL_QUEUE_CAPACITY)
    }
}

impl PriorityQueue {
    pub fn new() -> PriorityQueue {
        PriorityQueue::default()
    }
    pub fn with_capacity(capacity: usize) -> PriorityQueue {
        PriorityQueue {
            data: Vec::with_capacity(capacity.max(1)),
        }
    }
    /// Number of queued elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Inserts an element, moving the hole up from the end while the parent is strictly greater.
    pub fn push(&mut self, element: QueueElement) {
        if self.data.len() == self.data.capacity() {
            // Capacity doubles when full
            self.data.reserve_exact(self.data.capacity().max(1));
        }
        let mut hole = self.data.len();
        self.data.push(element);
        while hole > 0 {
            let up = parent(hole);
            if lesseq(&self.data[up], &element) {
                break;
            }
            self.data[hole] = self.data[up];
            hole = up;
        }
        self.data[hole] = element;
    }

    /// Removes and returns an element with minimal `f`.
    pub fn pop(&mut self) -> Result<QueueElement> {
        let to_insert = self.data.pop().ok_or(DistanceMapError::EmptyQueuePop)?;
        if self.data.is_empty() {
            return Ok(to_insert);
        }
        let ret = self.data[0];
        let size = self.data.len();

        // Move the hole down from the root until to_insert fits
        let mut hole = 0;
        while left_child(hole) < size {
            let left = left_child(hole);
            let right = left + 1;
            let mut smallest = left;
            if right < size && lesseq(&self.data[right], &self.data[left]) {
                smallest = right;
            }
            if lesseq(&to_insert, &self.data[smallest]) {
                break;
            }
            self.data[hole] = self.data[smallest];
            hole = smallest;
        }
        self.data[hole] = to_insert;
        Ok(ret)
    }

    /// The current minimum, if any.
    pub fn peek(&self) -> Option<&QueueElement> {
        self.data.first()
    }

    #[cfg(test)]
    fn is_heap(&self) -> bool {
        (1..self.data.len()).all(|i| lesseq(&self.data[parent(i)], &self.data[i]))
    }
}
