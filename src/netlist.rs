// SPDX-FileCopyrightText: Copyright (c) 2024 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0
//! Netlist descriptions and ingestion checks.
//!
//! A netlist is produced outside the simulator. It exposes three net counts
//! and a list of [`GateDescriptor`]s whose kind is a plain mnemonic
//! (`"AND"`, `"XOR3"`, ...). Ingestion turns each descriptor into a typed
//! [`Gate`] and rejects anything the scheduler could not simulate.

use crate::error::{Result, SimError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::VecDeque;
use std::path::Path;
use std::str::FromStr;

/// Combinational primitive kinds understood by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateKind {
    Buf,
    Not,
    And,
    Or,
    Xor,
    Nand,
    Nor,
    Xnor,
    /// Three-input parity, the sum cell of a full adder.
    Xor3,
    /// Three-input majority, the carry cell of a full adder.
    Maj,
}

impl GateKind {
    pub const ALL: [GateKind; 10] = [
        GateKind::Buf,
        GateKind::Not,
        GateKind::And,
        GateKind::Or,
        GateKind::Xor,
        GateKind::Nand,
        GateKind::Nor,
        GateKind::Xnor,
        GateKind::Xor3,
        GateKind::Maj,
    ];

    /// Canonical mnemonic used in netlist files.
    pub fn name(self) -> &'static str {
        match self {
            GateKind::Buf => "BUF",
            GateKind::Not => "NOT",
            GateKind::And => "AND",
            GateKind::Or => "OR",
            GateKind::Xor => "XOR",
            GateKind::Nand => "NAND",
            GateKind::Nor => "NOR",
            GateKind::Xnor => "XNOR",
            GateKind::Xor3 => "XOR3",
            GateKind::Maj => "MAJ",
        }
    }

    /// Whether a gate of this kind may have `n` inputs.
    pub fn accepts_arity(self, n: usize) -> bool {
        match self {
            GateKind::Buf | GateKind::Not => n == 1,
            GateKind::Xor3 | GateKind::Maj => n == 3,
            _ => n >= 2,
        }
    }

    /// Boolean function of the gate. `inputs` must satisfy [`Self::accepts_arity`].
    pub fn eval(self, inputs: &[bool]) -> bool {
        match self {
            GateKind::Buf => inputs[0],
            GateKind::Not => !inputs[0],
            GateKind::And => inputs.iter().all(|&b| b),
            GateKind::Or => inputs.iter().any(|&b| b),
            GateKind::Xor | GateKind::Xor3 => inputs.iter().fold(false, |acc, &b| acc ^ b),
            GateKind::Nand => !inputs.iter().all(|&b| b),
            GateKind::Nor => !inputs.iter().any(|&b| b),
            GateKind::Xnor => !inputs.iter().fold(false, |acc, &b| acc ^ b),
            GateKind::Maj => inputs.iter().filter(|&&b| b).count() >= 2,
        }
    }
}

impl FromStr for GateKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        let upper = s.trim().to_ascii_uppercase();
        GateKind::ALL
            .iter()
            .copied()
            .find(|k| k.name() == upper)
            .ok_or_else(|| SimError::UnknownGateKind(s.to_string()))
    }
}

impl std::fmt::Display for GateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Gate as declared by an external netlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateDescriptor {
    /// Kind mnemonic, parsed case-insensitively at ingestion.
    pub kind: String,
    pub inputs: Vec<usize>,
    pub output: usize,
}

impl GateDescriptor {
    pub fn new(kind: GateKind, inputs: &[usize], output: usize) -> Self {
        Self {
            kind: kind.name().to_string(),
            inputs: inputs.to_vec(),
            output,
        }
    }
}

/// Ingested gate: the snapshot stored in the gate queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Gate {
    #[serde(serialize_with = "serialize_kind")]
    pub kind: GateKind,
    pub inputs: SmallVec<[usize; 4]>,
    pub output: usize,
}

fn serialize_kind<S: serde::Serializer>(kind: &GateKind, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_str(kind.name())
}

impl TryFrom<&GateDescriptor> for Gate {
    type Error = SimError;

    fn try_from(desc: &GateDescriptor) -> Result<Self> {
        let kind: GateKind = desc.kind.parse()?;
        if !kind.accepts_arity(desc.inputs.len()) {
            return Err(SimError::UnknownGateKind(format!(
                "{} with {} input(s)",
                kind,
                desc.inputs.len()
            )));
        }
        Ok(Gate {
            kind,
            inputs: desc.inputs.iter().copied().collect(),
            output: desc.output,
        })
    }
}

/// Structure of a circuit as seen by the simulator.
///
/// Implementors only describe the circuit; they never hold simulation state.
pub trait Netlist {
    fn net_count(&self) -> usize;
    fn input_net_count(&self) -> usize;
    fn output_net_count(&self) -> usize;
    /// All gate descriptors, in declaration order.
    fn gates(&self) -> Vec<GateDescriptor>;

    fn name(&self) -> &str {
        "netlist"
    }
}

/// Netlist stored as JSON.
///
/// ```json
/// { "name": "fulladder4", "net_count": 25, "input_net_count": 8,
///   "output_net_count": 8,
///   "gates": [ { "kind": "XOR", "inputs": [0, 1], "output": 17 } ] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetlistFile {
    #[serde(default = "default_name")]
    pub name: String,
    pub net_count: usize,
    pub input_net_count: usize,
    pub output_net_count: usize,
    pub gates: Vec<GateDescriptor>,
}

fn default_name() -> String {
    "netlist".to_string()
}

impl NetlistFile {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Netlist for NetlistFile {
    fn net_count(&self) -> usize {
        self.net_count
    }

    fn input_net_count(&self) -> usize {
        self.input_net_count
    }

    fn output_net_count(&self) -> usize {
        self.output_net_count
    }

    fn gates(&self) -> Vec<GateDescriptor> {
        self.gates.clone()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Net counts of an ingested netlist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NetlistShape {
    pub net_count: usize,
    pub input_net_count: usize,
    pub output_net_count: usize,
    pub gate_count: usize,
}

impl NetlistShape {
    /// Range of output net indices.
    pub fn outputs(&self) -> std::ops::Range<usize> {
        (self.net_count - self.output_net_count)..self.net_count
    }

    /// Parse and check every gate of `netlist`.
    ///
    /// Rejects malformed descriptors, nets outside `[0, net_count)`, gates
    /// driving input nets, nets with more than one driver, and feedback
    /// loops. Undriven non-input nets are only warned about.
    pub fn validate(netlist: &dyn Netlist) -> Result<(NetlistShape, Vec<Gate>)> {
        let net_count = netlist.net_count();
        let input_net_count = netlist.input_net_count();
        let output_net_count = netlist.output_net_count();
        if input_net_count
            .checked_add(output_net_count)
            .map_or(true, |n| n > net_count)
        {
            return Err(SimError::InvalidNetlist(format!(
                "{} input + {} output nets exceed net count {}",
                input_net_count, output_net_count, net_count
            )));
        }

        let gates = netlist
            .gates()
            .iter()
            .map(Gate::try_from)
            .collect::<Result<Vec<_>>>()?;

        // net -> driving gate, in declaration order
        let mut drivers: IndexMap<usize, usize> = IndexMap::with_capacity(gates.len());
        for (gate_i, gate) in gates.iter().enumerate() {
            if let Some(&net) = gate
                .inputs
                .iter()
                .chain(std::iter::once(&gate.output))
                .find(|&&net| net >= net_count)
            {
                return Err(SimError::InvalidNetlist(format!(
                    "gate {} ({}) references net {} beyond net count {}",
                    gate_i, gate.kind, net, net_count
                )));
            }
            if gate.output < input_net_count {
                return Err(SimError::InvalidNetlist(format!(
                    "gate {} ({}) drives input net {}",
                    gate_i, gate.kind, gate.output
                )));
            }
            if let Some(prev) = drivers.insert(gate.output, gate_i) {
                return Err(SimError::InvalidNetlist(format!(
                    "net {} driven by both gate {} and gate {}",
                    gate.output, prev, gate_i
                )));
            }
        }

        let undriven = (input_net_count..net_count)
            .filter(|net| !drivers.contains_key(net))
            .count();
        if undriven > 0 {
            clilog::warn!(
                "{}: {} non-input net(s) have no driver and will stay unknown",
                netlist.name(),
                undriven
            );
        }

        check_acyclic(net_count, &gates, &drivers)?;

        let shape = NetlistShape {
            net_count,
            input_net_count,
            output_net_count,
            gate_count: gates.len(),
        };
        Ok((shape, gates))
    }
}

/// Kahn's algorithm over gate dependencies.
fn check_acyclic(net_count: usize, gates: &[Gate], drivers: &IndexMap<usize, usize>) -> Result<()> {
    let mut consumers: Vec<Vec<usize>> = vec![Vec::new(); net_count];
    let mut pending = vec![0usize; gates.len()];
    for (gate_i, gate) in gates.iter().enumerate() {
        let mut seen: SmallVec<[usize; 4]> = SmallVec::new();
        for &net in &gate.inputs {
            if seen.contains(&net) {
                continue;
            }
            seen.push(net);
            if drivers.contains_key(&net) {
                consumers[net].push(gate_i);
                pending[gate_i] += 1;
            }
        }
    }

    let mut ready: VecDeque<usize> = (0..gates.len()).filter(|&g| pending[g] == 0).collect();
    let mut visited = 0;
    while let Some(gate_i) = ready.pop_front() {
        visited += 1;
        for &next in &consumers[gates[gate_i].output] {
            pending[next] -= 1;
            if pending[next] == 0 {
                ready.push_back(next);
            }
        }
    }

    if visited < gates.len() {
        return Err(SimError::CombinationalLoop {
            nets: gates.len() - visited,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn netlist(net_count: usize, inputs: usize, outputs: usize, gates: Vec<GateDescriptor>) -> NetlistFile {
        NetlistFile {
            name: "test".to_string(),
            net_count,
            input_net_count: inputs,
            output_net_count: outputs,
            gates,
        }
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!("xor".parse::<GateKind>().unwrap(), GateKind::Xor);
        assert_eq!(" MAJ ".parse::<GateKind>().unwrap(), GateKind::Maj);
        assert!(matches!(
            "DFF".parse::<GateKind>(),
            Err(SimError::UnknownGateKind(_))
        ));
    }

    #[test]
    fn test_truth_tables() {
        use GateKind::*;
        for a in [false, true] {
            for b in [false, true] {
                assert_eq!(And.eval(&[a, b]), a & b);
                assert_eq!(Or.eval(&[a, b]), a | b);
                assert_eq!(Xor.eval(&[a, b]), a ^ b);
                assert_eq!(Nand.eval(&[a, b]), !(a & b));
                assert_eq!(Nor.eval(&[a, b]), !(a | b));
                assert_eq!(Xnor.eval(&[a, b]), !(a ^ b));
                for c in [false, true] {
                    assert_eq!(Xor3.eval(&[a, b, c]), a ^ b ^ c);
                    assert_eq!(Maj.eval(&[a, b, c]), (a & b) | (a & c) | (b & c));
                }
            }
            assert_eq!(Not.eval(&[a]), !a);
            assert_eq!(Buf.eval(&[a]), a);
        }
        assert!(And.eval(&[true, true, true, true]));
        assert!(!And.eval(&[true, false, true]));
    }

    #[test]
    fn test_arity_mismatch_is_unknown_kind() {
        let desc = GateDescriptor {
            kind: "NOT".to_string(),
            inputs: vec![0, 1],
            output: 2,
        };
        assert!(matches!(Gate::try_from(&desc), Err(SimError::UnknownGateKind(_))));
        let desc = GateDescriptor {
            kind: "AND".to_string(),
            inputs: vec![0],
            output: 2,
        };
        assert!(matches!(Gate::try_from(&desc), Err(SimError::UnknownGateKind(_))));
    }

    #[test]
    fn test_validate_ok() {
        let nl = netlist(
            4,
            2,
            1,
            vec![
                GateDescriptor::new(GateKind::Not, &[2], 3),
                GateDescriptor::new(GateKind::And, &[0, 1], 2),
            ],
        );
        let (shape, gates) = NetlistShape::validate(&nl).unwrap();
        assert_eq!(shape.gate_count, 2);
        assert_eq!(shape.outputs(), 3..4);
        assert_eq!(gates[0].kind, GateKind::Not);
    }

    #[test]
    fn test_validate_counts() {
        let nl = netlist(3, 2, 2, vec![]);
        assert!(matches!(
            NetlistShape::validate(&nl),
            Err(SimError::InvalidNetlist(_))
        ));
    }

    #[test]
    fn test_validate_counts_overflow() {
        let nl = netlist(4, usize::MAX, 2, vec![]);
        assert!(matches!(
            NetlistShape::validate(&nl),
            Err(SimError::InvalidNetlist(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_nets() {
        let out_of_range = netlist(3, 2, 1, vec![GateDescriptor::new(GateKind::And, &[0, 7], 2)]);
        assert!(matches!(
            NetlistShape::validate(&out_of_range),
            Err(SimError::InvalidNetlist(_))
        ));

        let drives_input = netlist(3, 2, 1, vec![GateDescriptor::new(GateKind::Not, &[0], 1)]);
        assert!(matches!(
            NetlistShape::validate(&drives_input),
            Err(SimError::InvalidNetlist(_))
        ));

        let double_driver = netlist(
            3,
            2,
            1,
            vec![
                GateDescriptor::new(GateKind::And, &[0, 1], 2),
                GateDescriptor::new(GateKind::Or, &[0, 1], 2),
            ],
        );
        assert!(matches!(
            NetlistShape::validate(&double_driver),
            Err(SimError::InvalidNetlist(_))
        ));
    }

    #[test]
    fn test_validate_rejects_loop() {
        // 2 = AND(0, 3), 3 = NOT(2)
        let nl = netlist(
            4,
            1,
            1,
            vec![
                GateDescriptor::new(GateKind::And, &[0, 3], 2),
                GateDescriptor::new(GateKind::Not, &[2], 3),
            ],
        );
        assert!(matches!(
            NetlistShape::validate(&nl),
            Err(SimError::CombinationalLoop { nets: 2 })
        ));
    }

    #[test]
    fn test_json_roundtrip_and_unknown_kind() {
        let json = r#"{
            "net_count": 3, "input_net_count": 2, "output_net_count": 1,
            "gates": [ { "kind": "xor", "inputs": [0, 1], "output": 2 } ]
        }"#;
        let nl = NetlistFile::from_json(json).unwrap();
        assert_eq!(nl.name(), "netlist");
        assert_eq!(NetlistFile::from_json(&nl.to_json_pretty().unwrap()).unwrap(), nl);

        let bad = json.replace("xor", "LATCH");
        let nl = NetlistFile::from_json(&bad).unwrap();
        assert!(matches!(
            NetlistShape::validate(&nl),
            Err(SimError::UnknownGateKind(_))
        ));
    }
}
