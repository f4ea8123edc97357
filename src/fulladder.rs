// SPDX-FileCopyrightText: Copyright (c) 2024 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0
//! Ripple-carry adder netlist generator.
//!
//! Produced netlists follow the net-index packing the adder harness reads:
//!
//! ```text
//! inputs   0 .. 2n          a0 b0 a1 b1 ... (even = A, odd = B, LSB first)
//! internal 2n .. base       per-bit temporaries
//! outputs  base .. base+2n  s0 c0 s1 c1 ... s(n-1) c(n-1)
//! ```
//!
//! `base` is always odd, so sum bits sit at odd indices and the last net is
//! the carry-out. When the internal net count would make `base` even,
//! bit 0's carry is routed through a `BUF`.

use crate::error::{Result, SimError};
use crate::netlist::{GateDescriptor, GateKind, NetlistFile};

/// Widths the generator accepts; the sum of two operands must fit a `u64`.
pub const ADDER_BITS: std::ops::RangeInclusive<usize> = 1..=63;

/// Which primitives each bit is built from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum AdderStyle {
    /// XOR/AND/OR full adders (five gates per bit above bit 0).
    #[default]
    Gates,
    /// `XOR3` sum and `MAJ` carry cells.
    Cells,
}

#[derive(Debug, Clone)]
pub struct FullAdderBuilder {
    bits: usize,
    style: AdderStyle,
}

impl FullAdderBuilder {
    pub fn new(bits: usize) -> Self {
        Self {
            bits,
            style: AdderStyle::default(),
        }
    }

    pub fn style(mut self, style: AdderStyle) -> Self {
        self.style = style;
        self
    }

    /// Fails with `InvalidNetlist` if the width is outside [`ADDER_BITS`].
    pub fn build(&self) -> Result<NetlistFile> {
        if !ADDER_BITS.contains(&self.bits) {
            return Err(SimError::InvalidNetlist(format!(
                "adder width must be within {}..={}, got {}",
                ADDER_BITS.start(),
                ADDER_BITS.end(),
                self.bits
            )));
        }
        Ok(self.assemble())
    }

    fn assemble(&self) -> NetlistFile {
        let n = self.bits;
        let a = |i: usize| 2 * i;
        let b = |i: usize| 2 * i + 1;

        let per_bit_internal = match self.style {
            AdderStyle::Gates => 3,
            AdderStyle::Cells => 0,
        };
        let internal = per_bit_internal * (n - 1);
        let buffered_carry = internal % 2 == 0;
        let base = 2 * n + internal + buffered_carry as usize;
        let net_count = base + 2 * n;
        let s = |i: usize| base + 2 * i;
        let c = |i: usize| base + 2 * i + 1;

        let mut next_internal = 2 * n;
        let mut alloc = || {
            let net = next_internal;
            next_internal += 1;
            net
        };

        let mut per_bit: Vec<Vec<GateDescriptor>> = Vec::with_capacity(n);

        // bit 0: half adder
        let mut bit0 = vec![GateDescriptor::new(GateKind::Xor, &[a(0), b(0)], s(0))];
        if buffered_carry {
            let t0 = alloc();
            bit0.push(GateDescriptor::new(GateKind::And, &[a(0), b(0)], t0));
            bit0.push(GateDescriptor::new(GateKind::Buf, &[t0], c(0)));
        } else {
            bit0.push(GateDescriptor::new(GateKind::And, &[a(0), b(0)], c(0)));
        }
        per_bit.push(bit0);

        for i in 1..n {
            let cin = c(i - 1);
            let gates = match self.style {
                AdderStyle::Gates => {
                    let (x, t, u) = (alloc(), alloc(), alloc());
                    vec![
                        GateDescriptor::new(GateKind::Xor, &[a(i), b(i)], x),
                        GateDescriptor::new(GateKind::Xor, &[x, cin], s(i)),
                        GateDescriptor::new(GateKind::And, &[a(i), b(i)], t),
                        GateDescriptor::new(GateKind::And, &[x, cin], u),
                        GateDescriptor::new(GateKind::Or, &[t, u], c(i)),
                    ]
                }
                AdderStyle::Cells => vec![
                    GateDescriptor::new(GateKind::Xor3, &[a(i), b(i), cin], s(i)),
                    GateDescriptor::new(GateKind::Maj, &[a(i), b(i), cin], c(i)),
                ],
            };
            per_bit.push(gates);
        }
        debug_assert_eq!(next_internal, base);

        let style = match self.style {
            AdderStyle::Gates => "",
            AdderStyle::Cells => "_cells",
        };
        NetlistFile {
            name: format!("fulladder{}{}", n, style),
            net_count,
            input_net_count: 2 * n,
            output_net_count: 2 * n,
            // most significant bit first: declaration order is not topological
            gates: per_bit.into_iter().rev().flatten().collect(),
        }
    }
}

/// `bits`-wide adder built from two-input gates.
pub fn full_adder(bits: usize) -> Result<NetlistFile> {
    FullAdderBuilder::new(bits).build()
}

/// The 4-bit adder driven by the harness: 25 nets, 8 inputs, 8 outputs, 17 gates.
pub fn full_adder4() -> NetlistFile {
    FullAdderBuilder::new(4).assemble()
}
