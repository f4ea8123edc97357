// SPDX-FileCopyrightText: Copyright (c) 2024 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0
//! Seeded stimulus for input nets.
//!
//! The stream is ChaCha8 seeded through `seed_from_u64`, so a given seed
//! produces the same input bits on every platform and every run.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic source of input-net values.
///
/// The seed is fixed at construction; there is no way to reseed a
/// generator, a new run builds a new one.
#[derive(Debug, Clone)]
pub struct StimulusGenerator {
    seed: u64,
    rng: ChaCha8Rng,
}

impl StimulusGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// One bit per input net, in net-index order.
    pub fn generate_input_values(&mut self, input_net_count: usize) -> Vec<bool> {
        (0..input_net_count).map(|_| self.rng.gen::<bool>()).collect()
    }
}
