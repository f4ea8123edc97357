// SPDX-FileCopyrightText: Copyright (c) 2024 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0
//! Operational API of a simulation run: seed, submit, run, reset.
//!
//! A [`Simulator`] is bound to one seed and one netlist snapshot at a time.
//! The typical sequence mirrors the driver:
//!
//! ```
//! use evsim::fulladder::full_adder4;
//! use evsim::sim::Simulator;
//!
//! let adder = full_adder4();
//! let mut sim = Simulator::default();
//! sim.initialize_seed(42).unwrap();
//! sim.submit_gates_for_simulation(&adder).unwrap();
//! let perf = sim.run_simulation(&adder).unwrap();
//! assert_eq!(perf.area, 17);
//! ```

use crate::config::SimConfig;
use crate::error::{Result, SimError};
use crate::net_table::NetTable;
use crate::netlist::{Netlist, NetlistShape};
use crate::perf::{self, PerfEstimate, RunStats};
use crate::queue::{EventQueue, GateQueue};
use crate::scheduler::{self, RunState};
use crate::stimulus::StimulusGenerator;

/// One simulation run and the state it owns.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimConfig,
    stimulus: Option<StimulusGenerator>,
    shape: Option<NetlistShape>,
    pub(crate) state: RunState,
    result: Option<(PerfEstimate, RunStats)>,
}

impl Simulator {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Fix the stimulus seed for this run. May be called once per run.
    pub fn initialize_seed(&mut self, seed: u64) -> Result<()> {
        if self.stimulus.is_some() {
            return Err(SimError::AlreadySeeded);
        }
        clilog::debug!("stimulus seed {}", seed);
        self.stimulus = Some(StimulusGenerator::new(seed));
        Ok(())
    }

    pub fn seed(&self) -> Option<u64> {
        self.stimulus.as_ref().map(|s| s.seed())
    }

    /// Ingest every gate of `netlist` into the gate queue, in declared order.
    ///
    /// Sizes the net table and both queues for this netlist. Nothing is
    /// kept if validation or a push fails.
    pub fn submit_gates_for_simulation(&mut self, netlist: &dyn Netlist) -> Result<()> {
        if self.shape.is_some() {
            return Err(SimError::AlreadySubmitted);
        }
        let (shape, gates) = NetlistShape::validate(netlist)?;

        let mut gate_queue = GateQueue::with_capacity(self.config.gate_queue_capacity_for(&shape));
        for gate in gates {
            gate_queue.push(gate)?;
        }
        self.state = RunState {
            net_table: NetTable::new(shape.net_count),
            gate_queue,
            event_queue: EventQueue::with_capacity(self.config.event_queue_capacity_for(&shape)),
        };
        clilog::info!(
            "{}: submitted {} gates over {} nets ({} in, {} out)",
            netlist.name(),
            shape.gate_count,
            shape.net_count,
            shape.input_net_count,
            shape.output_net_count
        );
        self.shape = Some(shape);
        Ok(())
    }

    /// Run the scheduler to quiescence and estimate performance.
    ///
    /// The run works on a copy of the current state; the net table and
    /// queues are only replaced when it succeeds, so a failed run publishes
    /// nothing.
    pub fn run_simulation(&mut self, netlist: &dyn Netlist) -> Result<PerfEstimate> {
        if self.result.is_some() {
            return Err(SimError::AlreadyCompleted);
        }
        let stimulus = self.stimulus.as_ref().ok_or(SimError::NotSeeded)?;
        let shape = self.shape.ok_or(SimError::NotSubmitted)?;
        check_same_shape(&shape, netlist)?;

        let mut work = self.state.clone();
        let mut stimulus = stimulus.clone();
        let outcome = scheduler::run(&mut work, &shape, &mut stimulus)?;

        let unknown_outputs = work.net_table.unknown_in(shape.outputs());
        if !unknown_outputs.is_empty() {
            clilog::warn!(
                "{}: {} output net(s) unknown after quiescence",
                netlist.name(),
                unknown_outputs.len()
            );
            return Err(SimError::IncompleteRun { unknown_outputs });
        }

        let estimate = perf::estimate(
            &outcome.gates,
            &outcome.stats,
            self.config.area_model,
            self.config.latency_model,
        );
        clilog::info!(
            "{}: latency {} area {} ({} events)",
            netlist.name(),
            estimate.latency_unitless,
            estimate.area,
            outcome.stats.events_processed
        );

        self.state = work;
        self.result = Some((estimate, outcome.stats));
        Ok(estimate)
    }

    /// Discard seed, netlist and all run state.
    pub fn reset(&mut self) {
        *self = Self::new(self.config.clone());
    }

    pub fn shape(&self) -> Option<&NetlistShape> {
        self.shape.as_ref()
    }

    /// Estimate of the completed run.
    pub fn last_estimate(&self) -> Option<PerfEstimate> {
        self.result.as_ref().map(|(e, _)| *e)
    }

    /// Scheduler counters of the completed run.
    pub fn last_stats(&self) -> Option<&RunStats> {
        self.result.as_ref().map(|(_, s)| s)
    }

    pub fn is_completed(&self) -> bool {
        self.result.is_some()
    }
}

fn check_same_shape(shape: &NetlistShape, netlist: &dyn Netlist) -> Result<()> {
    let given = (
        netlist.net_count(),
        netlist.input_net_count(),
        netlist.output_net_count(),
    );
    let expected = (shape.net_count, shape.input_net_count, shape.output_net_count);
    if given != expected {
        return Err(SimError::NetlistMismatch(format!(
            "net counts {:?}, submitted {:?}",
            given, expected
        )));
    }
    Ok(())
}
