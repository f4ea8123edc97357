// SPDX-FileCopyrightText: Copyright (c) 2024 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0
//! Performance estimation: unitless latency and area of a run.

use crate::netlist::{Gate, GateKind};
use serde::{Deserialize, Serialize};

/// How `area` is summed over the ingested gates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaModel {
    /// One unit per gate.
    #[default]
    Unit,
    /// Per-kind cost, roughly proportional to transistor count.
    Weighted,
}

impl AreaModel {
    pub fn cost(self, gate: &Gate) -> u64 {
        match self {
            AreaModel::Unit => 1,
            AreaModel::Weighted => {
                // extra inputs beyond two add one unit each
                let extra = gate.inputs.len().saturating_sub(2) as u64;
                match gate.kind {
                    GateKind::Not => 1,
                    GateKind::Buf => 2,
                    GateKind::Nand | GateKind::Nor => 2 + extra,
                    GateKind::And | GateKind::Or => 3 + extra,
                    GateKind::Xor | GateKind::Xnor => 4 + 2 * extra,
                    GateKind::Maj => 6,
                    GateKind::Xor3 => 8,
                }
            }
        }
    }
}

/// What `latency_unitless` measures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LatencyModel {
    /// Longest dependency chain traversed (input nets have depth 0).
    #[default]
    Depth,
    /// Total events processed by the scheduler.
    EventCount,
}

/// Counters collected by the scheduler during one run.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Events popped from the event queue, stimulus included.
    pub events_processed: u64,
    /// Gates whose boolean function was evaluated.
    pub gate_evaluations: u64,
    /// Evaluations whose output matched the stored value.
    pub unchanged_evaluations: u64,
    pub max_depth: u32,
}

/// Terminal summary of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PerfEstimate {
    pub latency_unitless: u64,
    pub area: u64,
}

/// Sum of gate costs; independent of the stimulus.
pub fn estimate_area(gates: &[Gate], model: AreaModel) -> u64 {
    gates.iter().map(|g| model.cost(g)).sum()
}

pub fn estimate_latency(stats: &RunStats, model: LatencyModel) -> u64 {
    match model {
        LatencyModel::Depth => stats.max_depth as u64,
        LatencyModel::EventCount => stats.events_processed,
    }
}

pub fn estimate(gates: &[Gate], stats: &RunStats, area: AreaModel, latency: LatencyModel) -> PerfEstimate {
    PerfEstimate {
        latency_unitless: estimate_latency(stats, latency),
        area: estimate_area(gates, area),
    }
}
