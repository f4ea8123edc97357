// SPDX-FileCopyrightText: Copyright (c) 2024 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

//! evsim: deterministic event-driven gate-level logic simulator.
//!
//! evsim ingests a combinational gate-level netlist, drives its input nets
//! with seeded pseudo-random stimulus and propagates value changes gate by
//! gate until the circuit is quiescent. Each run reports a unitless latency
//! (propagation depth) and area (gate cost).
//!
//! # Pipeline
//!
//! ```text
//! Netlist            (netlist — external gate list + net counts)
//!   → Gate queue      (queue — bounded FIFO with read/write heads)
//!   → Stimulus        (stimulus — ChaCha8 seeded input bits)
//!   → Scheduler       (scheduler — fanout map + FIFO event drain)
//!   → Net table       (net_table — final tri-state net values)
//!   → PerfEstimate    (perf — latency and area)
//! ```
//!
//! # Key modules
//!
//! - [`sim`] — operational API: seed, submit, run, reset
//! - [`admin`] — read-only introspection of the net table and queues (feature `admin`)
//! - [`scheduler`] — event-driven propagation to quiescence
//! - [`queue`] — head-indexed gate and event queues
//! - [`netlist`] — gate kinds, netlist trait, JSON netlists, ingestion checks
//! - [`fulladder`] — ripple-carry adder generator used by the harness
//! - [`harness`] — `S == A + B` check over simulated adders (feature `admin`)
//! - [`config`] — JSON configuration (queue sizing, estimator models)

pub mod logic;

pub mod error;

pub mod netlist;

pub mod fulladder;

pub mod net_table;

pub mod queue;

pub mod stimulus;

pub mod scheduler;

pub mod perf;

pub mod config;

pub mod sim;

#[cfg(feature = "admin")]
pub mod admin;

#[cfg(feature = "admin")]
pub mod harness;

pub use error::{Result, SimError};
pub use logic::LogicValue;
