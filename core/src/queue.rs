//! The team's work queue.
//!
//! Tokens are popped from the head and pushed onto the tail. Order is
//! arrival order except where processing defers a token to the tail.
//! The queue itself is unbounded; capacity is a processing concern.

use crate::{
    error::{SimError, SimResult},
    work::{CategoryCounts, WorkCategory},
};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkQueue {
    items: VecDeque<WorkCategory>,
}

impl WorkQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a token at the tail.
    pub fn append(&mut self, category: WorkCategory) {
        self.items.push_back(category);
    }

    /// Add `n` tokens of the same category at the tail.
    pub fn append_many(&mut self, category: WorkCategory, n: u64) {
        for _ in 0..n {
            self.items.push_back(category);
        }
    }

    /// Remove and return the earliest-arrived token.
    pub fn pop_head(&mut self) -> SimResult<WorkCategory> {
        self.items.pop_front().ok_or(SimError::EmptyQueue)
    }

    /// Remove the earliest token of `category`. A no-op when none is queued.
    /// Returns whether a token was removed.
    pub fn remove_first(&mut self, category: WorkCategory) -> bool {
        match self.items.iter().position(|c| *c == category) {
            Some(pos) => {
                self.items.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Replace the queue contents with `tokens`, in order.
    pub fn refill(&mut self, tokens: &[WorkCategory]) {
        self.items = tokens.iter().copied().collect();
    }

    pub fn count(&self, category: WorkCategory) -> u32 {
        self.items.iter().filter(|c| **c == category).count() as u32
    }

    pub fn census(&self) -> CategoryCounts {
        self.items.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WorkCategory> {
        self.items.iter()
    }
}
