// SPDX-FileCopyrightText: Copyright (c) 2024 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0
//! Simulator configuration (loaded from JSON).

use crate::error::Result;
use crate::netlist::NetlistShape;
use crate::perf::{AreaModel, LatencyModel};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Simulator configuration.
///
/// Queue capacities left unset are sized to the worst case of the submitted
/// netlist: `gate_count` for the gate queue, `input_net_count + gate_count`
/// for the event queue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub gate_queue_capacity: Option<usize>,
    pub event_queue_capacity: Option<usize>,
    pub area_model: AreaModel,
    pub latency_model: LatencyModel,
}

impl SimConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn gate_queue_capacity_for(&self, shape: &NetlistShape) -> usize {
        self.gate_queue_capacity.unwrap_or(shape.gate_count)
    }

    /// In an acyclic netlist every net changes at most once, so inputs plus
    /// gate outputs bound the number of events.
    pub fn event_queue_capacity_for(&self, shape: &NetlistShape) -> usize {
        self.event_queue_capacity
            .unwrap_or(shape.input_net_count + shape.gate_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(SimConfig::from_json("{}").unwrap(), SimConfig::default());
    }

    #[test]
    fn test_parse_config() {
        let cfg = SimConfig::from_json(
            r#"{ "event_queue_capacity": 3, "area_model": "weighted", "latency_model": "event_count" }"#,
        )
        .unwrap();
        assert_eq!(cfg.gate_queue_capacity, None);
        assert_eq!(cfg.event_queue_capacity, Some(3));
        assert_eq!(cfg.area_model, AreaModel::Weighted);
        assert_eq!(cfg.latency_model, LatencyModel::EventCount);
    }

    #[test]
    fn test_capacity_sizing() {
        let shape = NetlistShape {
            net_count: 25,
            input_net_count: 8,
            output_net_count: 8,
            gate_count: 17,
        };
        let cfg = SimConfig::default();
        assert_eq!(cfg.gate_queue_capacity_for(&shape), 17);
        assert_eq!(cfg.event_queue_capacity_for(&shape), 25);
        let cfg = SimConfig {
            gate_queue_capacity: Some(4),
            ..Default::default()
        };
        assert_eq!(cfg.gate_queue_capacity_for(&shape), 4);
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            SimConfig::from_json("{ \"area_model\": \"huge\" }"),
            Err(crate::error::SimError::Json(_))
        ));
    }
}
