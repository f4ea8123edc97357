// SPDX-FileCopyrightText: Copyright (c) 2024 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0
//! Error type shared by every simulator component.

use thiserror::Error;

/// Failures reported by the simulator.
///
/// None of these are retried internally. A failed run leaves the
/// previously published net table untouched.
#[derive(Debug, Error)]
pub enum SimError {
    /// Index accessor beyond a table or queue bound.
    #[error("index {index} out of range (len {len})")]
    OutOfRange { index: u64, len: u64 },

    /// Push into a queue that already holds `capacity` entries.
    #[error("queue overflow (capacity {capacity})")]
    Overflow { capacity: usize },

    /// Pop from an exhausted queue.
    #[error("queue is empty")]
    Empty,

    /// Unsupported mnemonic or a descriptor with the wrong number of inputs.
    #[error("unknown or malformed gate kind: {0}")]
    UnknownGateKind(String),

    /// Run reached quiescence with output nets still unknown.
    #[error("simulation finished with unknown output net(s): {unknown_outputs:?}")]
    IncompleteRun { unknown_outputs: Vec<usize> },

    #[error("invalid netlist: {0}")]
    InvalidNetlist(String),

    /// Feedback loop through `nets` nets; only combinational netlists are simulated.
    #[error("netlist contains a combinational loop through {nets} net(s)")]
    CombinationalLoop { nets: usize },

    #[error("netlist does not match the submitted one: {0}")]
    NetlistMismatch(String),

    #[error("seed already initialized for this run")]
    AlreadySeeded,

    #[error("seed not initialized")]
    NotSeeded,

    #[error("gates already submitted for this run")]
    AlreadySubmitted,

    #[error("no gates submitted")]
    NotSubmitted,

    #[error("simulation already completed; reset before running again")]
    AlreadyCompleted,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
