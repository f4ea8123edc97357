// SPDX-FileCopyrightText: Copyright (c) 2024 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0
//! Event-driven scheduler.
//!
//! The scheduler drains the gate queue into a gate list and a fanout map
//! (net → consuming gates), seeds the input nets from the stimulus
//! generator, then processes net-change events FIFO until the event queue
//! is empty:
//!
//! ```text
//! pop event(net) → for gate in fanout[net] (registration order)
//!                    skip unless every input is known
//!                    out = kind.eval(inputs)
//!                    if out != net_table[gate.output]: set + push event
//! ```
//!
//! Gate declaration order is never assumed to be topological. An output
//! that does not change enqueues nothing, so re-evaluating a settled gate
//! is a no-op. In an acyclic netlist each net changes at most once, which
//! bounds the event count by `input_net_count + gate_count`.

use crate::error::Result;
use crate::logic::LogicValue;
use crate::net_table::NetTable;
use crate::netlist::{Gate, NetlistShape};
use crate::perf::RunStats;
use crate::queue::{Event, EventQueue, GateQueue};
use crate::stimulus::StimulusGenerator;
use smallvec::SmallVec;

/// Net index → gates consuming it, in registration order.
#[derive(Debug, Clone, Default)]
pub struct FanoutMap {
    consumers: Vec<SmallVec<[usize; 4]>>,
}

impl FanoutMap {
    /// Build from the ingested gate list. A gate reading the same net on
    /// several pins is registered once for that net.
    pub fn build(net_count: usize, gates: &[Gate]) -> Self {
        let mut consumers: Vec<SmallVec<[usize; 4]>> = vec![SmallVec::new(); net_count];
        for (gate_i, gate) in gates.iter().enumerate() {
            for &net in &gate.inputs {
                let list = &mut consumers[net];
                if !list.contains(&gate_i) {
                    list.push(gate_i);
                }
            }
        }
        Self { consumers }
    }

    #[inline]
    pub fn consumers(&self, net: usize) -> &[usize] {
        self.consumers.get(net).map_or(&[], |c| c.as_slice())
    }
}

/// State mutated by one run: net values and the two queues.
#[derive(Debug, Clone, Default)]
pub struct RunState {
    pub net_table: NetTable,
    pub gate_queue: GateQueue,
    pub event_queue: EventQueue,
}

/// What a finished run hands back besides the mutated [`RunState`].
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Gates drained from the gate queue, in ingestion order.
    pub gates: Vec<Gate>,
    pub stats: RunStats,
}

/// Drive `state` to quiescence.
///
/// Fails with `Overflow` if the event queue is too small for the
/// propagation, or `OutOfRange` if a gate references a net beyond the
/// table (ingestion rejects both for well-formed netlists).
pub fn run(
    state: &mut RunState,
    shape: &NetlistShape,
    stimulus: &mut StimulusGenerator,
) -> Result<RunOutcome> {
    let mut gates = Vec::with_capacity(state.gate_queue.len());
    while !state.gate_queue.is_empty() {
        gates.push(state.gate_queue.pop()?);
    }
    let fanout = FanoutMap::build(shape.net_count, &gates);
    let mut depths = vec![0u32; shape.net_count];
    let mut stats = RunStats::default();

    for (net, bit) in stimulus
        .generate_input_values(shape.input_net_count)
        .into_iter()
        .enumerate()
    {
        let value = LogicValue::from(bit);
        state.net_table.set(net, value)?;
        state.event_queue.push(Event {
            net,
            value,
            depth: 0,
        })?;
    }

    let mut inputs: SmallVec<[bool; 4]> = SmallVec::new();
    while !state.event_queue.is_empty() {
        let event = state.event_queue.pop()?;
        stats.events_processed += 1;

        for &gate_i in fanout.consumers(event.net) {
            let gate = &gates[gate_i];
            inputs.clear();
            let mut depth = 0;
            let mut ready = true;
            for &net in &gate.inputs {
                match state.net_table.get(net)?.to_bool() {
                    Some(b) => {
                        inputs.push(b);
                        depth = depth.max(depths[net]);
                    }
                    None => {
                        ready = false;
                        break;
                    }
                }
            }
            if !ready {
                continue;
            }

            let out = LogicValue::from(gate.kind.eval(&inputs));
            stats.gate_evaluations += 1;
            if state.net_table.get(gate.output)? == out {
                stats.unchanged_evaluations += 1;
                continue;
            }

            let depth = depth + 1;
            state.net_table.set(gate.output, out)?;
            depths[gate.output] = depth;
            stats.max_depth = stats.max_depth.max(depth);
            state.event_queue.push(Event {
                net: gate.output,
                value: out,
                depth,
            })?;
        }
    }

    clilog::debug!(
        "quiescent after {} events, {} evaluations ({} unchanged), depth {}",
        stats.events_processed,
        stats.gate_evaluations,
        stats.unchanged_evaluations,
        stats.max_depth
    );

    Ok(RunOutcome { gates, stats })
}
