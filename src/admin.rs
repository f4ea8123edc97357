// SPDX-FileCopyrightText: Copyright (c) 2024 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0
//! Read-only introspection of a simulation run.
//!
//! Kept apart from the operational API in [`crate::sim`] and compiled only
//! with the `admin` feature. Nothing here takes `&mut`.

use crate::error::Result;
use crate::logic::LogicValue;
use crate::netlist::Gate;
use crate::queue::Event;
use crate::sim::Simulator;

/// Borrowed view over a [`Simulator`]'s net table and queues.
#[derive(Debug, Clone, Copy)]
pub struct AdminView<'a> {
    sim: &'a Simulator,
}

impl Simulator {
    pub fn admin(&self) -> AdminView<'_> {
        AdminView { sim: self }
    }
}

impl<'a> AdminView<'a> {
    /// Current value of `net`; `Unknown` until the net is written.
    pub fn view_net_table(&self, net: usize) -> Result<LogicValue> {
        self.sim.state.net_table.get(net)
    }

    /// Pending event at absolute queue index `index`.
    pub fn read_event_queue(&self, index: u64) -> Result<Event> {
        self.sim.state.event_queue.read(index).copied()
    }

    /// Pending gate at absolute queue index `index`.
    pub fn read_gate_queue(&self, index: u64) -> Result<Gate> {
        self.sim.state.gate_queue.read(index).cloned()
    }

    pub fn get_event_queue_read_head(&self) -> u64 {
        self.sim.state.event_queue.peek_heads().0
    }

    pub fn get_event_queue_write_head(&self) -> u64 {
        self.sim.state.event_queue.peek_heads().1
    }

    pub fn get_gate_queue_read_head(&self) -> u64 {
        self.sim.state.gate_queue.peek_heads().0
    }

    pub fn get_gate_queue_write_head(&self) -> u64 {
        self.sim.state.gate_queue.peek_heads().1
    }

    /// Net count of the submitted netlist, 0 before submission.
    pub fn net_count(&self) -> usize {
        self.sim.shape().map_or(0, |s| s.net_count)
    }

    pub fn input_net_count(&self) -> usize {
        self.sim.shape().map_or(0, |s| s.input_net_count)
    }

    pub fn output_net_count(&self) -> usize {
        self.sim.shape().map_or(0, |s| s.output_net_count)
    }

    /// Every net value, in index order.
    pub fn net_values(&self) -> Vec<LogicValue> {
        self.sim.state.net_table.iter().collect()
    }
}
