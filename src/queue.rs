// SPDX-FileCopyrightText: Copyright (c) 2024 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0
//! Bounded FIFO queues with explicit read/write heads.
//!
//! Both the gate queue (gates ingested from a netlist) and the event queue
//! (nets whose value just changed) are arenas of fixed capacity addressed
//! by two monotonically increasing cursors. The logical content is the
//! absolute index range `[read_head, write_head)`; an absolute index `i`
//! lives in slot `i % capacity`. Keeping the heads explicit lets the admin
//! view inspect queue contents without consuming them.

use crate::error::{Result, SimError};
use crate::logic::LogicValue;
use crate::netlist::Gate;
use serde::Serialize;

/// A net value change produced by the scheduler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Event {
    /// Net whose value changed.
    pub net: usize,
    /// The value written.
    pub value: LogicValue,
    /// Propagation depth: 0 for stimulus, 1 + deepest input for gate outputs.
    pub depth: u32,
}

/// Fixed-capacity FIFO with monotonic head indices.
#[derive(Debug, Clone)]
pub struct HeadQueue<T> {
    slots: Vec<Option<T>>,
    read_head: u64,
    write_head: u64,
}

pub type GateQueue = HeadQueue<Gate>;
pub type EventQueue = HeadQueue<Event>;

impl<T> Default for HeadQueue<T> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<T> HeadQueue<T> {
    /// Create an empty queue holding at most `capacity` entries at a time.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            slots,
            read_head: 0,
            write_head: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of entries between the heads.
    #[inline]
    pub fn len(&self) -> usize {
        (self.write_head - self.read_head) as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.read_head == self.write_head
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    /// `(read_head, write_head)`.
    #[inline]
    pub fn peek_heads(&self) -> (u64, u64) {
        (self.read_head, self.write_head)
    }

    #[inline]
    fn slot(&self, index: u64) -> usize {
        (index % self.slots.len() as u64) as usize
    }

    /// Append at the write head.
    pub fn push(&mut self, item: T) -> Result<()> {
        if self.is_full() {
            return Err(SimError::Overflow {
                capacity: self.capacity(),
            });
        }
        let slot = self.slot(self.write_head);
        self.slots[slot] = Some(item);
        self.write_head += 1;
        debug_assert!(self.write_head >= self.read_head);
        Ok(())
    }

    /// Take the entry at the read head.
    pub fn pop(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(SimError::Empty);
        }
        let slot = self.slot(self.read_head);
        let item = self.slots[slot].take().ok_or(SimError::Empty)?;
        self.read_head += 1;
        Ok(item)
    }

    /// Look at the entry with absolute index `index` without consuming it.
    ///
    /// Only indices in `[read_head, write_head)` are readable.
    pub fn read(&self, index: u64) -> Result<&T> {
        if index < self.read_head || index >= self.write_head {
            return Err(SimError::OutOfRange {
                index,
                len: self.write_head,
            });
        }
        self.slots[self.slot(index)]
            .as_ref()
            .ok_or(SimError::OutOfRange {
                index,
                len: self.write_head,
            })
    }

    /// Iterate over the pending entries in FIFO order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        (self.read_head..self.write_head).filter_map(move |i| self.slots[self.slot(i)].as_ref())
    }
}
