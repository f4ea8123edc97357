// SPDX-FileCopyrightText: Copyright (c) 2024 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0
//! End-to-end adder check.
//!
//! Reads operands and sum back out of the net table using the adder's
//! bit-packing (see [`crate::fulladder`]) and compares against `A + B`.

use crate::admin::AdminView;
use crate::config::SimConfig;
use crate::error::{Result, SimError};
use crate::netlist::Netlist;
use crate::perf::PerfEstimate;
use crate::sim::Simulator;
use serde::Serialize;

/// Result of checking one seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdderReport {
    pub seed: u64,
    pub a: u64,
    pub b: u64,
    pub sum: u64,
    pub perf: PerfEstimate,
    pub passed: bool,
}

fn bit(view: &AdminView<'_>, net: usize) -> Result<u64> {
    let value = view.view_net_table(net)?;
    value.to_bit().ok_or(SimError::IncompleteRun {
        unknown_outputs: vec![net],
    })
}

/// Widest operand whose sum still fits the `u64` sum.
pub const MAX_OPERAND_BITS: usize = 63;

/// Output nets holding sum bits, LSB first.
fn sum_nets(view: &AdminView<'_>) -> impl Iterator<Item = usize> {
    let net_count = view.net_count();
    (net_count - view.output_net_count()..net_count)
        .filter(move |&net| net % 2 == 1 || net == net_count - 1)
}

/// Operands A (even input nets) and B (odd input nets), LSB first.
///
/// Fails with `InvalidNetlist` if an operand is wider than
/// [`MAX_OPERAND_BITS`].
pub fn decode_operands(view: &AdminView<'_>) -> Result<(u64, u64)> {
    let operand_bits = view.input_net_count().div_ceil(2);
    if operand_bits > MAX_OPERAND_BITS {
        return Err(SimError::InvalidNetlist(format!(
            "{} input nets make {}-bit operands (max {})",
            view.input_net_count(),
            operand_bits,
            MAX_OPERAND_BITS
        )));
    }
    let (mut a, mut b) = (0u64, 0u64);
    for net in 0..view.input_net_count() {
        let v = bit(view, net)?;
        let pos = net / 2;
        if net % 2 == 0 {
            a |= v << pos;
        } else {
            b |= v << pos;
        }
    }
    Ok((a, b))
}

/// Sum: odd-indexed output nets plus the final (carry-out) net, LSB first.
///
/// Fails with `InvalidNetlist` if the sum has more than 64 bits.
pub fn decode_sum(view: &AdminView<'_>) -> Result<u64> {
    let sum_bits = sum_nets(view).count();
    if sum_bits > u64::BITS as usize {
        return Err(SimError::InvalidNetlist(format!(
            "{} sum bits do not fit in {} bits",
            sum_bits,
            u64::BITS
        )));
    }
    let mut sum = 0u64;
    for (pos, net) in sum_nets(view).enumerate() {
        sum |= bit(view, net)? << pos;
    }
    Ok(sum)
}

/// Seed, submit, run and verify one adder simulation.
pub fn check_adder(netlist: &dyn Netlist, seed: u64, config: &SimConfig) -> Result<AdderReport> {
    let mut sim = Simulator::new(config.clone());
    sim.initialize_seed(seed)?;
    sim.submit_gates_for_simulation(netlist)?;
    let perf = sim.run_simulation(netlist)?;

    let view = sim.admin();
    let (a, b) = decode_operands(&view)?;
    let sum = decode_sum(&view)?;
    // both operands are below 2^63
    let passed = sum == a + b;
    if passed {
        clilog::debug!("seed {}: {} + {} = {}", seed, a, b, sum);
    } else {
        clilog::error!("seed {}: {} != {} + {}", seed, sum, a, b);
    }
    Ok(AdderReport {
        seed,
        a,
        b,
        sum,
        perf,
        passed,
    })
}
